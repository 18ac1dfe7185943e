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

use crate::board::{Board, Material, Piece, Rank, Square};

use super::castling::Castle;
use super::check::leaves_king_in_check;
use super::state::GameState;

use Piece::*;

/// How a legality query is being asked.
///
/// `Simulated` exists for one purpose: scanning whether some piece attacks a
/// king. It skips the self-check filter (which would recurse back into the
/// scan) and never considers castling. Everything else asks `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Live,
    Simulated,
}

/// The shape of a geometrically legal move, which decides the side effects
/// applied when it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Standard,
    EnPassant { captured: Square },
    Castle(Castle),
    Promotion,
}

impl MoveKind {
    /// Square emptied as a side effect of the move, besides the destination.
    fn captured_aside(&self) -> Option<Square> {
        match *self {
            MoveKind::EnPassant { captured } => Some(captured),
            _ => None,
        }
    }
}

impl Material {
    /// Legality of moving this piece to the zero-indexed `(file, rank)`.
    /// Off-board destinations are never legal.
    pub fn can_move(
        &self,
        board: &Board,
        state: &GameState,
        query: Query,
        file: i32,
        rank: i32,
    ) -> bool {
        Square::try_from_indices(file, rank)
            .is_some_and(|to| self.can_move_to(board, state, query, to))
    }

    #[inline]
    pub fn can_move_to(&self, board: &Board, state: &GameState, query: Query, to: Square) -> bool {
        self.move_kind(board, state, query, to).is_some()
    }

    /// Classifies a move to `to`, or returns `None` when it is illegal.
    ///
    /// The base checks come first (not the piece's own square, not a square
    /// held by its own team), then the variant's geometry, then, for `Live`
    /// queries, the rule that the mover's king must not be left in check.
    pub fn move_kind(
        &self,
        board: &Board,
        state: &GameState,
        query: Query,
        to: Square,
    ) -> Option<MoveKind> {
        if to == self.square() {
            return None;
        }
        if board
            .get(to)
            .is_some_and(|occupant| occupant.color() == self.color())
        {
            return None;
        }
        let kind = match self.piece() {
            Pawn => self.pawn_move(board, state, to)?,
            Knight => self.knight_move(to)?,
            Bishop => self.bishop_move(board, to)?,
            Rook => self.rook_move(board, to)?,
            Queen => self.queen_move(board, to)?,
            King => self.king_move(board, state, query, to)?,
        };
        if query == Query::Live
            && leaves_king_in_check(board, state, self, to, kind.captured_aside())
        {
            return None;
        }
        Some(kind)
    }

    fn knight_move(&self, to: Square) -> Option<MoveKind> {
        let offset = to - self.square();
        matches!((offset.x.abs(), offset.y.abs()), (1, 2) | (2, 1)).then_some(MoveKind::Standard)
    }

    fn bishop_move(&self, board: &Board, to: Square) -> Option<MoveKind> {
        let offset = to - self.square();
        let diagonal = offset.x.abs() == offset.y.abs();
        (diagonal && board.is_path_clear(self.square(), to)).then_some(MoveKind::Standard)
    }

    fn rook_move(&self, board: &Board, to: Square) -> Option<MoveKind> {
        let offset = to - self.square();
        let straight = offset.x == 0 || offset.y == 0;
        (straight && board.is_path_clear(self.square(), to)).then_some(MoveKind::Standard)
    }

    fn queen_move(&self, board: &Board, to: Square) -> Option<MoveKind> {
        self.bishop_move(board, to)
            .or_else(|| self.rook_move(board, to))
    }

    fn king_move(
        &self,
        board: &Board,
        state: &GameState,
        query: Query,
        to: Square,
    ) -> Option<MoveKind> {
        let offset = to - self.square();
        if offset.x.abs() <= 1 && offset.y.abs() <= 1 {
            return Some(MoveKind::Standard);
        }
        if query == Query::Simulated {
            return None;
        }
        Castle::resolve(self, board, state, to).map(MoveKind::Castle)
    }

    fn pawn_move(&self, board: &Board, state: &GameState, to: Square) -> Option<MoveKind> {
        let direction = self.direction();
        let offset = to - self.square();
        let x = offset.x * direction;
        let y = offset.y * direction;
        if !(1..=2).contains(&y) || !(-1..=1).contains(&x) {
            return None;
        }
        if y == 2 && (x != 0 || !self.first_move()) {
            return None;
        }
        let advance = if to.rank() == Rank::promotion_rank(self.color()) {
            MoveKind::Promotion
        } else {
            MoveKind::Standard
        };
        if x == 0 {
            // a pawn never captures straight ahead
            let clear = board.is_path_clear(self.square(), to) && board.is_vacant(to);
            return clear.then_some(advance);
        }
        if board.get(to).is_some() {
            // the base checks already ruled out a friendly occupant
            return Some(advance);
        }
        self.en_passant_victim(state, to)
            .map(|captured| MoveKind::EnPassant { captured })
    }

    /// The enemy pawn a diagonal move to the empty square `to` would capture
    /// en passant: it must have jumped two ranks on the very last move and
    /// landed beside this pawn, one rank behind `to`.
    fn en_passant_victim(&self, state: &GameState, to: Square) -> Option<Square> {
        let last = state.last_move()?;
        if !last.was_pawn_jump() || last.material().color() == self.color() {
            return None;
        }
        let landed = last.to();
        let beside = landed.file() == to.file() && landed.rank() + self.direction() == Some(to.rank());
        beside.then_some(landed)
    }
}
