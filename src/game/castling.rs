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

use crate::board::{Board, File, Material, Offset, Square};

use super::check::leaves_king_in_check;
use super::state::GameState;

use File::*;

/// The rook half of a castling move. The king half is the move itself.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castle {
    pub rook_from: Square,
    pub rook_to: Square,
}

impl Castle {
    /// Resolves a two-file king move to `to` into a castle, or `None` when
    /// castling is not allowed.
    ///
    /// The king and the rook nearest the destination must both be unmoved,
    /// the squares between them empty and the square the king passes over
    /// not attacked. The king's starting square is not examined, and whether
    /// the landing square is attacked is left to the ordinary self-check
    /// filter.
    pub fn resolve(king: &Material, board: &Board, state: &GameState, to: Square) -> Option<Self> {
        let from = king.square();
        let offset = to - from;
        if !king.first_move() || offset.y != 0 || offset.x.abs() != 2 {
            return None;
        }
        let queenside = to.file_index() < 7 - to.file_index();
        let (rook_file, rook_to_file) = if queenside {
            (FileA, FileD)
        } else {
            (FileH, FileF)
        };
        let rook_from = Square::new(rook_file, from.rank());
        let rook = board.get(rook_from)?;
        if rook.color() != king.color() || !rook.piece().is_rook() || !rook.first_move() {
            return None;
        }
        if !board.is_path_clear(from, rook_from) {
            return None;
        }
        let passed = (from + Offset::new(offset.x.signum(), 0))?;
        if leaves_king_in_check(board, state, king, passed, None) {
            return None;
        }
        Some(Self {
            rook_from,
            rook_to: Square::new(rook_to_file, from.rank()),
        })
    }
}
