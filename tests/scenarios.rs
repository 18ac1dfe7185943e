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

use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;

use chess_referee::{
    from_notation, Board, Color, Game, Material, Piece, Promotion, RefereeError, Square, Status,
};

use Color::*;
use Piece::*;
use Square::*;

/// Plays `from` to `to` for whoever is on move, both given as e.g. `"e2"`.
fn play(game: &mut Game, from: &str, to: &str) -> Result<Color> {
    let (letter, number) = split(from);
    let piece = game.select_piece(letter, number, game.turn())?;
    let (letter, number) = split(to);
    let (file, rank) = from_notation(letter, number);
    game.try_move(&piece, file, rank)
}

fn split(name: &str) -> (char, i32) {
    let mut chars = name.chars();
    let letter = chars.next().unwrap();
    let number = chars.next().unwrap().to_digit(10).unwrap() as i32;
    (letter, number)
}

fn play_all(game: &mut Game, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        play(game, from, to).unwrap();
    }
}

fn position(pieces: &[Material]) -> Board {
    let mut board = Board::empty();
    for material in pieces {
        board.place(material.square(), *material);
    }
    board
}

fn started(board: Board, turn: Color) -> Game {
    let mut game = Game::from_board(board, turn);
    game.start();
    game
}

fn standard() -> Game {
    started(Board::standard(), White)
}

fn error_of(result: Result<Color>) -> RefereeError {
    result.unwrap_err().downcast::<RefereeError>().unwrap()
}

#[test]
fn kingside_castle_moves_rook() {
    let mut game = standard();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
        ],
    );
    assert_eq!(play(&mut game, "e1", "g1").unwrap(), White);
    let board = game.board();
    assert_eq!(board.get(G1).map(|m| m.piece()), Some(King));
    assert_eq!(board.get(F1).map(|m| m.piece()), Some(Rook));
    assert!(board.is_vacant(E1));
    assert!(board.is_vacant(H1));
    assert!(!board.get(F1).unwrap().first_move());
    assert_eq!(game.turn(), Black);
}

#[test]
fn queenside_castle_moves_rook() {
    let mut game = standard();
    play_all(
        &mut game,
        &[
            ("d2", "d4"),
            ("d7", "d5"),
            ("b1", "c3"),
            ("b8", "c6"),
            ("c1", "f4"),
            ("c8", "f5"),
            ("d1", "d2"),
            ("d8", "d7"),
        ],
    );
    play(&mut game, "e1", "c1").unwrap();
    play(&mut game, "e8", "c8").unwrap();
    let board = game.board();
    assert_eq!(board.get(C1).map(|m| m.piece()), Some(King));
    assert_eq!(board.get(D1).map(|m| m.piece()), Some(Rook));
    assert_eq!(board.get(C8).map(|m| m.piece()), Some(King));
    assert_eq!(board.get(D8).map(|m| m.piece()), Some(Rook));
    assert!(board.is_vacant(A1));
    assert!(board.is_vacant(A8));
}

#[test]
fn castle_refused_after_rook_moves() {
    let mut game = standard();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
            ("h1", "g1"),
            ("a7", "a6"),
            ("g1", "h1"),
            ("a6", "a5"),
        ],
    );
    assert_eq!(
        error_of(play(&mut game, "e1", "g1")),
        RefereeError::IllegalMove { from: E1, to: G1 }
    );
}

#[test]
fn castle_refused_through_attacked_square() {
    let board = position(&[
        Material::white(King, E1),
        Material::white(Rook, H1),
        Material::black(King, A8),
        Material::black(Bishop, A6),
    ]);
    let mut game = started(board, White);
    let king = game.select(E1, White).unwrap();
    // the bishop on a6 covers f1
    assert!(!game.can_move(&king, 6, 0));
    assert!(play(&mut game, "e1", "g1").is_err());
    assert_eq!(game.board().get(H1).map(|m| m.piece()), Some(Rook));
}

#[test]
fn castle_allowed_with_only_king_square_attacked() {
    let board = position(&[
        Material::white(King, E1),
        Material::white(Rook, H1),
        Material::black(King, A8),
        Material::black(Rook, E5),
    ]);
    let mut game = started(board, White);
    let king = game.select(E1, White).unwrap();
    assert!(game.can_move(&king, 6, 0));
    play(&mut game, "e1", "g1").unwrap();
    assert_eq!(game.board().get(G1).map(|m| m.piece()), Some(King));
    assert_eq!(game.board().get(F1).map(|m| m.piece()), Some(Rook));
    assert!(game.board().is_vacant(H1));
}

#[test]
fn en_passant_removes_jumped_pawn() {
    let mut game = standard();
    play_all(
        &mut game,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    play(&mut game, "e5", "d6").unwrap();
    let board = game.board();
    assert!(board.is_vacant(D5));
    assert!(board.is_vacant(E5));
    assert_eq!(board.get(D6), Some(Material::white(Pawn, D6).moved()));
    assert_eq!(board.pieces_of(Black).count(), 15);
}

#[test]
fn en_passant_window_closes() {
    let mut game = standard();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("a7", "a6"),
            ("e4", "e5"),
            ("d7", "d5"),
            ("h2", "h3"),
            ("a6", "a5"),
        ],
    );
    assert_eq!(
        error_of(play(&mut game, "e5", "d6")),
        RefereeError::IllegalMove { from: E5, to: D6 }
    );
    assert!(game.board().get(D5).is_some());
}

#[test]
fn ladder_mate_ends_game() {
    let board = position(&[
        Material::white(King, H3),
        Material::black(Rook, G6),
        Material::black(Rook, E5),
        Material::black(King, A8),
    ]);
    let mut game = started(board, Black);
    assert_eq!(play(&mut game, "e5", "h5").unwrap(), Black);
    assert!(game.in_check(White));
    assert_eq!(game.status(), Status::Ended);
    assert_eq!(game.winner(), Some(Black));
    assert_eq!(
        error_of(play(&mut game, "h3", "g2")),
        RefereeError::GameNotRunning
    );
}

#[test]
fn ladder_check_with_defender_continues() {
    let board = position(&[
        Material::white(King, H3),
        Material::white(Rook, C4),
        Material::black(Rook, G6),
        Material::black(Rook, E5),
        Material::black(King, A8),
    ]);
    let mut game = started(board, Black);
    play(&mut game, "e5", "h5").unwrap();
    assert!(game.in_check(White));
    assert_eq!(game.status(), Status::Running);
    assert_eq!(game.winner(), None);
    // the only answers block on h4
    let rook = game.select(C4, White).unwrap();
    assert!(game.can_move(&rook, 7, 3));
    assert!(!game.can_move(&rook, 2, 7));
    play(&mut game, "c4", "h4").unwrap();
    assert!(!game.in_check(White));
}

#[test]
fn scholars_mate() {
    let mut game = standard();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
            ("h5", "f7"),
        ],
    );
    assert!(game.in_check(Black));
    assert_eq!(game.status(), Status::Ended);
    assert_eq!(game.winner(), Some(White));
}

#[test]
fn pinned_piece_cannot_move() {
    let board = position(&[
        Material::white(King, E1),
        Material::white(Bishop, E2),
        Material::black(Rook, E8),
        Material::black(King, A8),
    ]);
    let mut game = started(board, White);
    assert!(game.legal_destinations(E2).is_empty());
    assert_eq!(
        error_of(play(&mut game, "e2", "d3")),
        RefereeError::IllegalMove { from: E2, to: D3 }
    );
}

#[test]
fn obstructed_slides_are_illegal() {
    let mut game = standard();
    assert!(play(&mut game, "a1", "a3").is_err());
    assert!(play(&mut game, "c1", "e3").is_err());
    assert!(play(&mut game, "d1", "d3").is_err());
    assert_eq!(game.board(), &Board::standard());
    assert_eq!(game.turn(), White);
}

#[test]
fn promotion_asks_provider() {
    let board = position(&[
        Material::white(King, E1),
        Material::white(Pawn, G7).moved(),
        Material::black(King, A1),
        Material::black(Rook, H8),
    ]);
    let mut game = started(board, White);
    let asked = Rc::new(Cell::new(0));
    let counter = Rc::clone(&asked);
    game.set_promoter(move |options: &[Promotion; 4]| {
        counter.set(counter.get() + 1);
        assert_eq!(options, &Promotion::ALL);
        Promotion::Rook
    });
    play(&mut game, "g7", "h8").unwrap();
    assert_eq!(asked.get(), 1);
    let promoted = game.board().get(H8).unwrap();
    assert_eq!(promoted.piece(), Rook);
    assert_eq!(promoted.color(), White);
    assert!(game.board().is_vacant(G7));
    assert!(!game.in_check(Black));
    assert_eq!(game.turn(), Black);
}

#[test]
fn queries_leave_game_unchanged() {
    let mut game = standard();
    play_all(&mut game, &[("e2", "e4"), ("d7", "d5")]);
    let board = *game.board();
    let state = *game.state();
    for square in Board::standard().pieces().map(|m| m.square()) {
        let _ = game.legal_destinations(square);
    }
    for color in [White, Black] {
        let _ = game.is_in_check(color);
        let _ = game.is_checkmate(color);
    }
    assert_eq!(game.board(), &board);
    assert_eq!(game.state(), &state);
}

#[test]
fn capture_removes_piece() {
    let mut game = standard();
    play_all(&mut game, &[("e2", "e4"), ("d7", "d5")]);
    play(&mut game, "e4", "d5").unwrap();
    assert_eq!(game.board().pieces().count(), 31);
    assert_eq!(game.board().get(D5).map(|m| m.color()), Some(White));
}
