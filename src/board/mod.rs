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

//! Board geometry and piece placement
//!
//! This module knows where pieces stand but nothing about the rules of
//! chess; legality lives in `game`. Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square
//!   on an 8-by-8 board. The 8 rows and 8 columns on a board
//!   are represented by `Rank` (`Rank1` .. `Rank8`) and `File`
//!   (`FileA` .. `FileH`) respectively. Squares are named using the
//!   letter of the file followed by the number of the rank (`A1` .. `H8`).
//!   Front ends speak in a letter and a one-indexed number; the
//!   `from_notation` and `to_notation` helpers convert to and from the
//!   zero-indexed `(file, rank)` pairs used everywhere else.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Masks represent sets of squares, such as the
//!   squares strictly between two others (`between`) or the legal
//!   destinations of a piece.
//!
//! * `Material` is a piece standing on the board: a `Color`, a `Piece`
//!   variant, its current square and whether it has moved yet. Pawn
//!   promotion choices use a separate `Promotion` type with only four
//!   variants, convertible with `From<Promotion>`.
//!
//! * A `Board` is the 8x8 grid of optional `Material`. It is a plain
//!   `Copy` value, so a hypothetical move is tried with `simulate`, which
//!   returns the resulting position and leaves the board it was called on
//!   untouched.

mod grid;
mod material;
mod square;

pub use grid::*;
pub use material::*;
pub use square::*;
