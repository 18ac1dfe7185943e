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

//! The referee: turn order, move validation and the game lifecycle.
//!
//! A `Game` owns a `Board` and a `GameState`. Front ends select a piece
//! with `select_piece`, ask `can_move` or `legal_destinations` to highlight
//! targets, and submit with `try_move`. Every committed move clears the
//! mover's check flag, passes the turn and then tests the other team for
//! check and checkmate. Checkmate ends the game; there is no draw detection.

use anyhow::Result;
use log::{debug, info};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::board::{from_notation, Board, Color, Mask, Material, Promotion, Square};

mod castling;
mod check;
mod moves;
mod state;

pub use castling::*;
pub use check::{has_legal_move, is_checkmate, is_in_check};
pub use moves::*;
pub use state::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RefereeError {
    #[error("Coordinate ({file}, {rank}) is outside the board")]
    OutOfBounds { file: i32, rank: i32 },
    #[error("No piece located at {0}")]
    EmptySquare(Square),
    #[error("The piece at {0} belongs to the other player")]
    NotYourPiece(Square),
    #[error("Illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("Promotion requires a promotion provider")]
    NoPromotionHandler,
    #[error("Unrecognized promotion choice: {0}")]
    UnrecognizedPromotionChoice(String),
    #[error("The game is not running")]
    GameNotRunning,
}

use RefereeError::*;

/// Chooses the variant a pawn promotes to. Any
/// `FnMut(&[Promotion; 4]) -> Promotion` closure works.
pub trait PromotionProvider {
    fn choose(&mut self, options: &[Promotion; 4]) -> Promotion;
}

impl<F> PromotionProvider for F
where
    F: FnMut(&[Promotion; 4]) -> Promotion,
{
    fn choose(&mut self, options: &[Promotion; 4]) -> Promotion {
        self(options)
    }
}

pub struct Game {
    board: Board,
    state: GameState,
    promoter: Option<Box<dyn PromotionProvider>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("state", &self.state)
            .field("promoter", &self.promoter.is_some())
            .finish()
    }
}

impl Game {
    /// The standard starting position, white to move, not yet started.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// An arbitrary position with `turn` to move. Check flags start cleared
    /// and are recomputed only when a move is committed.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            state: GameState::new(turn),
            promoter: None,
        }
    }

    pub fn start(&mut self) {
        if self.state.start() {
            info!("game started, {} to move", self.state.turn());
        }
    }

    pub fn set_promoter(&mut self, promoter: impl PromotionProvider + 'static) {
        self.promoter = Some(Box::new(promoter));
    }

    pub fn clear_promoter(&mut self) {
        self.promoter = None;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }
    #[inline]
    pub fn turn(&self) -> Color {
        self.state.turn()
    }
    #[inline]
    pub fn status(&self) -> Status {
        self.state.status()
    }
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.status() == Status::Running
    }
    /// The check flag recorded for `color` by the last committed move.
    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        self.state.in_check(color)
    }

    /// The team that delivered checkmate, once the game has ended.
    pub fn winner(&self) -> Option<Color> {
        if self.state.status() != Status::Ended {
            return None;
        }
        Color::iter()
            .find(|color| self.state.in_check(*color))
            .map(|mated| !mated)
    }

    /// Looks up the piece on the square named by a file letter and a
    /// one-indexed rank number (`'e'`, `2`) on behalf of `player`.
    pub fn select_piece(&self, letter: char, number: i32, player: Color) -> Result<Material> {
        let (file, rank) = from_notation(letter, number);
        let square = Square::try_from_indices(file, rank).ok_or(OutOfBounds { file, rank })?;
        self.select(square, player)
    }

    pub fn select(&self, square: Square, player: Color) -> Result<Material> {
        let material = self.board.get(square).ok_or(EmptySquare(square))?;
        if material.color() != player {
            return Err(NotYourPiece(square).into());
        }
        Ok(material)
    }

    /// Full legality of moving `piece` to the zero-indexed `(file, rank)`,
    /// including the self-check filter. A promotion is only legal while a
    /// promotion provider is installed.
    pub fn can_move(&self, piece: &Material, file: i32, rank: i32) -> bool {
        Square::try_from_indices(file, rank).is_some_and(|to| self.can_move_to(piece, to))
    }

    pub fn can_move_to(&self, piece: &Material, to: Square) -> bool {
        match piece.move_kind(&self.board, &self.state, Query::Live, to) {
            Some(MoveKind::Promotion) => self.promoter.is_some(),
            Some(_) => true,
            None => false,
        }
    }

    /// Every square the piece on `from` may legally move to.
    pub fn legal_destinations(&self, from: Square) -> Mask {
        let Some(material) = self.board.get(from) else {
            return Mask::empty();
        };
        Square::iter()
            .filter(|to| self.can_move_to(&material, *to))
            .collect()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, &self.state, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        is_checkmate(&self.board, &self.state, color)
    }

    /// Validates and commits a move of `piece` to the zero-indexed
    /// `(file, rank)`, returning the team that moved.
    ///
    /// `piece` is matched against the board by its square, so a stale copy
    /// from `select_piece` is fine as long as the same piece still stands
    /// there. On any error the board and state are left as they were.
    pub fn try_move(&mut self, piece: &Material, file: i32, rank: i32) -> Result<Color> {
        if !self.is_running() {
            return Err(GameNotRunning.into());
        }
        let from = piece.square();
        let mover = self
            .board
            .get(from)
            .filter(|material| material.is_same_kind(piece))
            .ok_or(EmptySquare(from))?;
        if mover.color() != self.state.turn() {
            return Err(NotYourPiece(from).into());
        }
        let to = Square::try_from_indices(file, rank).ok_or(OutOfBounds { file, rank })?;
        let Some(kind) = mover.move_kind(&self.board, &self.state, Query::Live, to) else {
            debug!("rejected {} {} from {} to {}", mover.color(), mover.piece(), from, to);
            return Err(IllegalMove { from, to }.into());
        };
        let promotion = match kind {
            MoveKind::Promotion => {
                let promoter = self.promoter.as_mut().ok_or(NoPromotionHandler)?;
                Some(promoter.choose(&Promotion::ALL))
            }
            _ => None,
        };
        self.commit(mover, to, kind, promotion);
        Ok(mover.color())
    }

    fn commit(&mut self, mover: Material, to: Square, kind: MoveKind, promotion: Option<Promotion>) {
        let from = mover.square();
        let team = mover.color();
        match promotion {
            Some(choice) => {
                self.promote(choice, from, to, team);
            }
            None => {
                self.board.remove(from);
                self.board.place(to, mover.moved());
            }
        }
        match kind {
            MoveKind::Castle(castle) => {
                if let Some(rook) = self.board.remove(castle.rook_from) {
                    self.board.place(castle.rook_to, rook.moved());
                }
                debug!("{} castled, rook {} to {}", team, castle.rook_from, castle.rook_to);
            }
            MoveKind::EnPassant { captured } => {
                self.board.remove(captured);
                debug!("{} captured en passant on {}", team, captured);
            }
            MoveKind::Standard | MoveKind::Promotion => {}
        }
        debug!("{} {} from {} to {}", team, mover.piece(), from, to);

        self.state.record(MoveRecord::new(mover, from, to));
        self.state.set_in_check(team, false);
        self.state.pass_turn();

        let opponent = !team;
        let in_check = is_in_check(&self.board, &self.state, opponent);
        self.state.set_in_check(opponent, in_check);
        if in_check {
            info!("{} is in check", opponent);
            if !has_legal_move(&self.board, &self.state, opponent) {
                self.state.end();
                info!("checkmate, {} wins", team);
            }
        }
    }

    /// Replaces `team`'s pawn on `from` with the variant named by `choice`,
    /// standing on `to`. Whatever occupied `to` is captured.
    pub fn promote_pawn(
        &mut self,
        choice: &str,
        from: Square,
        to: Square,
        team: Color,
    ) -> Result<Material> {
        let choice = Promotion::from_str(choice)
            .map_err(|_| UnrecognizedPromotionChoice(choice.to_string()))?;
        let pawn = self.board.get(from).ok_or(EmptySquare(from))?;
        if pawn.color() != team {
            return Err(NotYourPiece(from).into());
        }
        if !pawn.piece().is_pawn() {
            return Err(IllegalMove { from, to }.into());
        }
        Ok(self.promote(choice, from, to, team))
    }

    fn promote(&mut self, choice: Promotion, from: Square, to: Square, team: Color) -> Material {
        self.board.remove(from);
        let promoted = Material::new(team, choice.into(), to).moved();
        self.board.place(to, promoted);
        info!("{} pawn promoted to {} on {}", team, choice, to);
        promoted
    }
}
