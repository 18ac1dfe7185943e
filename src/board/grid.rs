// Copyright 2023 Tobin Edwards
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
use std::fmt;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::square::{between, File, Rank, Square};

use Color::*;
use Piece::*;

/// Piece placement on an 8x8 board, indexed `[file][rank]`.
///
/// The board owns placement only and knows nothing about the rules. Each
/// cell holds at most one piece, and placing a piece rewrites the square
/// the piece has stored so the two never disagree.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Material>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Self::empty();
        for (file, piece) in File::iter().zip(BACK_RANK) {
            for color in Color::iter() {
                let back = Square::new(file, Rank::back_rank(color));
                let pawns = Square::new(file, pawn_rank(color));
                board.place(back, Material::new(color, piece, back));
                board.place(pawns, Material::new(color, Pawn, pawns));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Material> {
        self.cells[square.file_index()][square.rank_index()]
    }

    /// Puts `material` on `square`, returning whatever was there before.
    pub fn place(&mut self, square: Square, mut material: Material) -> Option<Material> {
        material.set_square(square);
        self.cells[square.file_index()][square.rank_index()].replace(material)
    }

    pub fn remove(&mut self, square: Square) -> Option<Material> {
        self.cells[square.file_index()][square.rank_index()].take()
    }

    /// Moves the occupant of `from` to `to`, returning any captured piece.
    /// Does nothing when `from` is empty.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Material> {
        let material = self.remove(from)?;
        self.place(to, material)
    }

    /// The position that would result from moving `from` to `to` (and from
    /// removing the piece on `also_remove`, for en passant). `self` is left
    /// untouched, so the caller always sees the state it started with.
    #[must_use]
    pub fn simulate(&self, from: Square, to: Square, also_remove: Option<Square>) -> Board {
        let mut scratch = *self;
        if let Some(square) = also_remove {
            scratch.remove(square);
        }
        scratch.relocate(from, to);
        scratch
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// True when every square strictly between `from` and `to` is empty.
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        between(from, to).iter().all(|square| self.is_vacant(square))
    }

    /// Every piece on the board, file by file.
    pub fn pieces(&self) -> impl Iterator<Item = Material> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Material> + '_ {
        self.pieces().filter(move |material| material.color() == color)
    }

    /// Square of `color`'s king. During play there is always exactly one.
    pub fn king(&self, color: Color) -> Option<Square> {
        let mut kings = self
            .pieces_of(color)
            .filter(|material| material.piece().is_king());
        let king = kings.next()?;
        debug_assert!(kings.next().is_none(), "more than one {} king", color);
        Some(king.square())
    }
}

fn pawn_rank(color: Color) -> Rank {
    match color {
        White => Rank::Rank2,
        Black => Rank::Rank7,
    }
}

/// Letter for a piece: uppercase for white, lowercase for black.
pub fn symbol(material: &Material) -> char {
    let c = match material.piece() {
        Pawn => 'p',
        Knight => 'n',
        Bishop => 'b',
        Rook => 'r',
        Queen => 'q',
        King => 'k',
    };
    match material.color() {
        White => c.to_ascii_uppercase(),
        Black => c,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.get(Square::new(file, rank)) {
                    Some(material) => write!(f, "{}", symbol(&material))?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Board {
    pub fn with(mut self, material: Material) -> Self {
        self.place(material.square(), material);
        self
    }
    pub fn without(mut self, square: Square) -> Self {
        self.remove(square);
        self
    }
}
