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

//! Two players sharing one terminal. Squares are entered as a file letter
//! and a rank number, e.g. `e 2`. Set `REFEREE_LOG=debug` to trace moves.

use anyhow::Result;
use env_logger::Env;
use log::debug;
use std::io::{self, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;

use chess_referee::{Board, Color, File, Game, Material, Piece, Promotion, Rank, Square};

fn main() -> Result<()> {
    let env = Env::default().filter_or("REFEREE_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    let mut game = Game::new();
    game.set_promoter(prompt_promotion);
    game.start();

    'turns: while game.is_running() {
        let player = game.turn();
        print!("{}", render(game.board(), player));
        println!("{} to move (input format example: e 2)", player);

        'select: loop {
            let Some(input) = prompt("Enter piece coordinates: ")? else {
                break 'turns;
            };
            let Some(square) = Square::try_from_string(&input) else {
                println!("Invalid input: expected a letter a-h and a number 1-8");
                continue;
            };
            let piece = match game.select(square, player) {
                Ok(piece) => piece,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };
            println!(
                "Selected {} on {} (enter 'back' to choose another piece)",
                piece.piece(),
                square
            );
            loop {
                let Some(input) = prompt("Enter square coordinates: ")? else {
                    break 'turns;
                };
                if input.trim() == "back" {
                    continue 'select;
                }
                let Some(target) = Square::try_from_string(&input) else {
                    println!("Invalid input: expected a letter a-h and a number 1-8");
                    continue;
                };
                let (file, rank) = target.indices();
                match game.try_move(&piece, file, rank) {
                    Ok(moved) => {
                        debug!("{} played {} to {}", moved, square, target);
                        break 'select;
                    }
                    Err(err) => println!("{}, try again", err),
                }
            }
        }
    }

    if let Some(winner) = game.winner() {
        print!("{}", render(game.board(), winner));
        println!("Checkmate! {} wins!", winner);
    }
    Ok(())
}

/// Reads one line from stdin, or `None` at end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_promotion(options: &[Promotion; 4]) -> Promotion {
    let names: Vec<String> = options.iter().map(|option| option.to_string()).collect();
    loop {
        let message = format!("Choose a promotion piece ({}): ", names.join(", "));
        match prompt(&message) {
            Ok(Some(input)) => match Promotion::from_str(&input) {
                Ok(choice) if options.contains(&choice) => return choice,
                _ => continue,
            },
            // no one left to ask
            _ => return Promotion::Queen,
        }
    }
}

fn glyph(material: &Material) -> char {
    match (material.color(), material.piece()) {
        (Color::White, Piece::King) => '♚',
        (Color::White, Piece::Queen) => '♛',
        (Color::White, Piece::Rook) => '♜',
        (Color::White, Piece::Bishop) => '♝',
        (Color::White, Piece::Knight) => '♞',
        (Color::White, Piece::Pawn) => '◉',
        (Color::Black, Piece::King) => '♔',
        (Color::Black, Piece::Queen) => '♕',
        (Color::Black, Piece::Rook) => '♖',
        (Color::Black, Piece::Bishop) => '♗',
        (Color::Black, Piece::Knight) => '♘',
        (Color::Black, Piece::Pawn) => '○',
    }
}

/// The board as seen from `pov`'s side of the table.
fn render(board: &Board, pov: Color) -> String {
    let (files, ranks): (Vec<File>, Vec<Rank>) = match pov {
        Color::White => (File::iter().collect(), Rank::iter().rev().collect()),
        Color::Black => (File::iter().rev().collect(), Rank::iter().collect()),
    };
    let letters: String = files.iter().map(|file| format!("     {}", file)).collect();
    let mut out = format!("\n{}\n   {}\n", letters, "_".repeat(47));
    for rank in &ranks {
        out.push_str(&format!("  |{}\n", "     |".repeat(8)));
        out.push_str(&format!("{} |", rank));
        for file in &files {
            match board.get(Square::new(*file, *rank)) {
                Some(material) => out.push_str(&format!("  {}  |", glyph(&material))),
                None => out.push_str("     |"),
            }
        }
        out.push_str(&format!("\n  |{}\n", "_____|".repeat(8)));
    }
    out.push_str(&format!("\n{}\n\n", letters));
    out
}
