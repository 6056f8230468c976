//! Command-line front-end: position analysis and PGN self-play.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use rand::Rng;

use lodestone::board::{
    search, Board, Color, SearchResult, SearchState, VALUE_MATE, VALUE_MATE_IN_MAX_PLY,
};

#[derive(Parser)]
#[command(name = "lodestone", version, about = "Minimal traditional chess engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a position and report the best move
    Analyze {
        /// Position in FEN notation; may be given as separate words
        #[arg(required = true, num_args = 1..)]
        fen: Vec<String>,

        /// Maximum search depth
        #[arg(long, default_value_t = 10)]
        depth: i32,

        /// Search time budget in milliseconds
        #[arg(long, default_value_t = 1000)]
        time_ms: u64,
    },
    /// Generate engine self-play games in PGN
    Play {
        /// Number of games to play
        games: u32,

        /// Maximum game length in plies before adjudicating a draw
        max_ply: u32,

        /// White's time budget per move in milliseconds
        white_time_ms: u64,

        /// Black's time budget per move in milliseconds
        black_time_ms: u64,
    },
}

/// Render a score for display: centipawns, or mate distance in moves.
fn format_score(score: i32) -> String {
    if score >= VALUE_MATE_IN_MAX_PLY {
        format!("Mate in {}", (VALUE_MATE - score + 1) / 2)
    } else if score <= -VALUE_MATE_IN_MAX_PLY {
        format!("Mated in {}", (VALUE_MATE + score) / 2)
    } else {
        score.to_string()
    }
}

fn format_best_move(result: &SearchResult) -> String {
    result
        .best_move
        .map_or_else(|| "0000".to_string(), |m| m.to_string())
}

fn cmd_analyze(fen: &str, depth: i32, time_ms: u64) -> ExitCode {
    let mut board = match Board::try_from_fen(fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Error setting position: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Analyzing FEN: {fen}");
    println!("Static eval: {}", board.evaluate());

    let mut state = SearchState::new();
    let result = search(&mut board, &mut state, depth, time_ms);

    println!("Evaluation: {}", format_score(result.score));
    println!("Best move: {}", format_best_move(&result));
    println!("Depth: {} Nodes: {}", result.depth, result.nodes);
    ExitCode::SUCCESS
}

/// Adjudicate a position with no legal moves for the side to move.
fn terminal_result(board: &Board) -> &'static str {
    if board.checkers() != 0 {
        if board.side_to_move() == Color::White {
            "0-1"
        } else {
            "1-0"
        }
    } else {
        "1/2-1/2"
    }
}

fn cmd_play(games: u32, max_ply: u32, white_time_ms: u64, black_time_ms: u64) -> ExitCode {
    let mut rng = rand::thread_rng();
    // One state for the whole run: the transposition table carries over
    // between games, exactly as it carries over between moves
    let mut state = SearchState::new();

    let mut total_depth: u64 = 0;
    let mut total_moves: u64 = 0;

    for game in 0..games {
        let mut board = Board::new();

        println!("[Event \"Engine Self-Play\"]");
        println!("[Site \"Minimal Traditional Engine\"]");
        println!("[Date \"????.??.??\"]");
        println!("[Round \"{}\"]", game + 1);
        println!("[White \"Lodestone\"]");
        println!("[Black \"Lodestone\"]");

        let mut pgn = String::new();
        let mut ply: u32 = 0;
        let mut game_result = "*";

        while ply < max_ply {
            let time_ms = if board.side_to_move() == Color::White {
                white_time_ms
            } else {
                black_time_ms
            };

            // Vary the openings so games diverge
            if ply < 6 && rng.gen_range(0..100) < 30 {
                let moves = board.generate_moves();
                if moves.is_empty() {
                    game_result = terminal_result(&board);
                    break;
                }
                let random_move = moves.as_slice()[rng.gen_range(0..moves.len())];

                if ply % 2 == 0 {
                    pgn.push_str(&format!("{}. ", ply / 2 + 1));
                }
                pgn.push_str(&format!("{random_move} "));
                board.make_move(&random_move);
                ply += 1;
                continue;
            }

            let result = search(&mut board, &mut state, 10, time_ms);
            total_depth += result.depth as u64;
            total_moves += 1;

            let Some(best_move) = result.best_move else {
                game_result = terminal_result(&board);
                break;
            };

            if board.halfmove_clock() >= 100 || board.is_draw() {
                game_result = "1/2-1/2";
                break;
            }

            if ply % 2 == 0 {
                pgn.push_str(&format!("{}. ", ply / 2 + 1));
            }
            pgn.push_str(&format!("{best_move} "));
            board.make_move(&best_move);
            ply += 1;
        }

        if ply >= max_ply {
            game_result = "1/2-1/2";
        }

        debug!("game {} finished after {} plies: {}", game + 1, ply, game_result);

        println!("[Result \"{game_result}\"]");
        println!();
        println!("{pgn}{game_result}");
        println!();
    }

    if total_moves > 0 {
        #[allow(clippy::cast_precision_loss)]
        let average = total_depth as f64 / total_moves as f64;
        println!("Average depth: {average}");
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            fen,
            depth,
            time_ms,
        } => cmd_analyze(&fen.join(" "), depth, time_ms),
        Command::Play {
            games,
            max_ply,
            white_time_ms,
            black_time_ms,
        } => cmd_play(games, max_ply, white_time_ms, black_time_ms),
    }
}
