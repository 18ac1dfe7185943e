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

use crate::board::{Color, Material, Pair, Square};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    NotStarted,
    Running,
    Ended,
}

/// The last committed half-move. This is the only history the referee keeps,
/// and it exists for en passant timing.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    material: Material,
    from: Square,
    to: Square,
}

impl MoveRecord {
    pub fn new(material: Material, from: Square, to: Square) -> Self {
        Self { material, from, to }
    }
    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }
    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }
    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    /// True when the move was a pawn advancing two ranks.
    pub fn was_pawn_jump(&self) -> bool {
        self.material.piece().is_pawn() && (self.to - self.from).y.abs() == 2
    }
}

/// Whose turn it is, the per-team check flags, the running flag and the last
/// committed move. Only `Game`'s commit path writes to it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    turn: Color,
    in_check: Pair<bool>,
    status: Status,
    last_move: Option<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Color::White)
    }
}

impl GameState {
    pub fn new(turn: Color) -> Self {
        Self {
            turn,
            in_check: Pair::new(false, false),
            status: Status::NotStarted,
            last_move: None,
        }
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }
    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        self.in_check[color]
    }
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }
    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    /// Moves `NotStarted` to `Running`. Returns whether the status changed.
    pub(crate) fn start(&mut self) -> bool {
        if self.status != Status::NotStarted {
            return false;
        }
        self.status = Status::Running;
        true
    }
    pub(crate) fn end(&mut self) {
        self.status = Status::Ended;
    }
    pub(crate) fn set_in_check(&mut self, color: Color, value: bool) {
        self.in_check[color] = value;
    }
    pub(crate) fn record(&mut self, record: MoveRecord) {
        self.last_move = Some(record);
    }
    pub(crate) fn pass_turn(&mut self) {
        self.turn = !self.turn;
    }
}

#[cfg(test)]
impl GameState {
    pub fn with_last_move(mut self, record: MoveRecord) -> Self {
        self.last_move = Some(record);
        self
    }
}
