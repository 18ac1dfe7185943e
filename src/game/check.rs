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

use log::warn;
use strum::IntoEnumIterator;

use crate::board::{Board, Color, Material, Square};

use super::moves::Query;
use super::state::GameState;

/// True when some piece of the other team could move onto `color`'s king.
/// A board without that king is never in check.
pub fn is_in_check(board: &Board, state: &GameState, color: Color) -> bool {
    let Some(king) = board.king(color) else {
        warn!("no {} king on the board", color);
        return false;
    };
    board
        .pieces_of(!color)
        .any(|attacker| attacker.can_move_to(board, state, Query::Simulated, king))
}

/// Whether moving `material` to `to` (and removing `also_remove`) would
/// leave its own king in check. Runs on a scratch copy of the board.
pub(crate) fn leaves_king_in_check(
    board: &Board,
    state: &GameState,
    material: &Material,
    to: Square,
    also_remove: Option<Square>,
) -> bool {
    let after = board.simulate(material.square(), to, also_remove);
    is_in_check(&after, state, material.color())
}

/// True when at least one piece of `color` has a move that leaves its king
/// safe. Tries every piece against every square.
pub fn has_legal_move(board: &Board, state: &GameState, color: Color) -> bool {
    board.pieces_of(color).any(|material| {
        Square::iter().any(|to| material.can_move_to(board, state, Query::Live, to))
    })
}

pub fn is_checkmate(board: &Board, state: &GameState, color: Color) -> bool {
    is_in_check(board, state, color) && !has_legal_move(board, state, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece::*;
    use Color::*;
    use Square::*;

    #[test]
    fn test_standard_not_in_check() {
        let board = Board::standard();
        let state = GameState::default();
        assert!(!is_in_check(&board, &state, White));
        assert!(!is_in_check(&board, &state, Black));
        assert!(has_legal_move(&board, &state, White));
    }

    #[test]
    fn test_attackers() {
        let state = GameState::default();
        let kings = Board::empty()
            .with(Material::white(King, E1))
            .with(Material::black(King, A8));
        assert!(is_in_check(&kings.with(Material::black(Knight, F3)), &state, White));
        assert!(is_in_check(&kings.with(Material::black(Pawn, D2)), &state, White));
        assert!(!is_in_check(&kings.with(Material::black(Pawn, E2)), &state, White));
        assert!(is_in_check(&kings.with(Material::black(Queen, H4)), &state, White));
        let blocked = kings
            .with(Material::black(Queen, H4))
            .with(Material::white(Pawn, F2));
        assert!(!is_in_check(&blocked, &state, White));
    }

    #[test]
    fn test_missing_king() {
        let board = Board::empty().with(Material::black(Queen, E2));
        assert!(!is_in_check(&board, &GameState::default(), White));
    }

    #[test]
    fn test_back_rank_mate() {
        let state = GameState::default();
        let board = Board::empty()
            .with(Material::white(King, G1).moved())
            .with(Material::white(Pawn, F2).moved())
            .with(Material::white(Pawn, G2).moved())
            .with(Material::white(Pawn, H2).moved())
            .with(Material::black(Rook, A1))
            .with(Material::black(King, G8));
        assert!(is_checkmate(&board, &state, White));
        // a defender that can capture the rook
        let board = board.with(Material::white(Rook, A5));
        assert!(!is_checkmate(&board, &state, White));
    }

    #[test]
    fn test_check_with_escape() {
        let state = GameState::default();
        let board = Board::empty()
            .with(Material::white(King, E1).moved())
            .with(Material::black(Rook, E8))
            .with(Material::black(King, A8));
        assert!(is_in_check(&board, &state, White));
        assert!(!is_checkmate(&board, &state, White));
    }

    #[test]
    fn test_no_moves_without_check_is_not_mate() {
        let state = GameState::default();
        let board = Board::empty()
            .with(Material::white(King, A1).moved())
            .with(Material::black(Queen, B3))
            .with(Material::black(King, H8));
        assert!(!has_legal_move(&board, &state, White));
        assert!(!is_checkmate(&board, &state, White));
    }
}
