//! Interactive command-line loop for playing GHQ against yourself or one of
//! the sample agents.

use std::io::{self, Write};

use ghq::agents::{greedy, random};
use ghq::core::apply;
use ghq::core::board::Board;
use ghq::core::movegen::generate_legal_moves;
use ghq::core::outcome::outcome;
use ghq::notation::{fen, movetext};
use ghq::render::render;

fn print_help() {
    println!("commands:");
    println!("  <movetext>       play a move, e.g. f2f3, rIh1, sfd5, skip");
    println!("  moves            list every legal move in the current position");
    println!("  fen              print the current position's FEN");
    println!("  load <fen...>    replace the position with the given FEN");
    println!("  agent random     let the random agent play one move");
    println!("  agent greedy     let the greedy agent play one move");
    println!("  help             show this message");
    println!("  quit             exit");
}

fn main() {
    let mut board = Board::starting_position();
    println!("{}", render(&board));
    print_help();

    let stdin = io::stdin();
    loop {
        if let Some(result) = outcome(&board) {
            println!("game over: {:?}, result {}", result.termination, result.result_string());
            break;
        }

        print!("{:?}> ", board.turn());
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "help" => print_help(),
            "fen" => println!("{}", fen::to_fen(&board)),
            "moves" => {
                for m in generate_legal_moves(&board) {
                    println!("{}", movetext::to_movetext(&m));
                }
            }
            "agent random" => apply_agent_move(&mut board, random::choose_move(&board)),
            "agent greedy" => apply_agent_move(&mut board, greedy::choose_move(&board)),
            _ if line.starts_with("load ") => match fen::from_fen(&line["load ".len()..]) {
                Ok(loaded) => board = loaded,
                Err(e) => println!("error: {e}"),
            },
            _ => match movetext::parse_movetext(line, &board) {
                Ok(m) if board.is_legal(&m) => {
                    apply::push(&mut board, m);
                    println!("{}", render(&board));
                }
                Ok(m) => println!("not legal in this position: {}", movetext::to_movetext(&m)),
                Err(e) => println!("error: {e}"),
            },
        }
    }
}

fn apply_agent_move(board: &mut Board, m: Option<ghq::core::moves::Move>) {
    match m {
        Some(m) => {
            println!("{}", movetext::to_movetext(&m));
            apply::push(board, m);
            println!("{}", render(board));
        }
        None => println!("no legal move available"),
    }
}
