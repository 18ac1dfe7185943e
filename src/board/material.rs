// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Not};
use strum_macros::{Display, EnumIter, EnumString};

use super::square::Square;

/// A piece standing on the board: its variant, its team, the square it
/// occupies and whether it has moved yet.
///
/// `first_move` only matters to pawns (double advance) and to kings and
/// rooks (castling). The stored square is kept in sync by `Board::place`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    piece: Piece,
    square: Square,
    first_move: bool,
}

impl Material {
    #[inline]
    pub const fn new(color: Color, piece: Piece, square: Square) -> Self {
        Self {
            color,
            piece,
            square,
            first_move: true,
        }
    }

    #[inline]
    pub const fn white(piece: Piece, square: Square) -> Self {
        Self::new(White, piece, square)
    }

    #[inline]
    pub const fn black(piece: Piece, square: Square) -> Self {
        Self::new(Black, piece, square)
    }

    /// Same piece, flagged as having already moved.
    #[inline]
    pub fn moved(mut self) -> Self {
        self.first_move = false;
        self
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub fn first_move(&self) -> bool {
        self.first_move
    }

    #[inline]
    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    /// Pawns advance toward higher ranks for white and lower ranks for black.
    #[inline]
    pub fn direction(&self) -> isize {
        match self.color {
            White => 1,
            Black => -1,
        }
    }

    /// Same team and variant, ignoring position and move history.
    #[inline]
    pub fn is_same_kind(&self, other: &Material) -> bool {
        self.color == other.color && self.piece == other.piece
    }
}

use Color::{Black, White};

#[derive(
    Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

/// One value per team, indexable by `Color`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(
    Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};

impl Piece {
    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_rook(&self) -> bool {
        matches!(*self, Rook)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
}

/// The four variants a pawn may promote to. Parses from the lowercase
/// names a front end collects (`"queen"`, `"rook"`, `"bishop"`, `"knight"`).
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];
}

impl From<Promotion> for Piece {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Queen => Queen,
            Promotion::Rook => Rook,
            Promotion::Bishop => Bishop,
            Promotion::Knight => Knight,
        }
    }
}
