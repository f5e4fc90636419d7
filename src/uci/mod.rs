//! Universal Chess Interface (UCI) protocol implementation.
//!
//! Handles communication with chess GUIs following the UCI specification.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::board::{Board, FenError, MoveParseError};
use crate::engine::{ClockInfo, EngineController, SearchParams, TimeConfig};
use crate::types::Move;

pub mod command;
pub mod print;
pub mod report;

use command::{parse_go_params, parse_uci_command, GoParams, UciCommand};

/// Error type for UCI position command parsing.
#[derive(Debug, Clone)]
pub enum UciError {
    InvalidFen(FenError),
    InvalidMove { move_str: String, error: MoveParseError },
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Parses a move in UCI format ("e2e4", "e7e8q"). Returns `None` if the move
/// isn't legal in `board`'s current position.
#[must_use]
pub fn parse_uci_move(board: &mut Board, uci_string: &str) -> Option<Move> {
    board.parse_move(uci_string).ok()
}

/// Parses a UCI `position` command's already-split tokens, returning an
/// error on failure rather than printing one.
pub fn try_parse_position_command(board: &mut Board, parts: &[&str]) -> Result<(), UciError> {
    let mut i = 1;

    if i >= parts.len() {
        return Err(UciError::MissingParts);
    }

    if parts[i] == "startpos" {
        *board = Board::new();
        i += 1;
    } else if parts[i] == "fen" {
        if i + 6 >= parts.len() {
            return Err(UciError::MissingParts);
        }
        let fen = parts[i + 1..i + 7].join(" ");
        *board = Board::try_from_fen(&fen)?;
        i += 7;
    } else {
        return Err(UciError::MissingParts);
    }

    if i < parts.len() && parts[i] == "moves" {
        i += 1;
        while i < parts.len() {
            let mv = board
                .parse_move(parts[i])
                .map_err(|e| UciError::InvalidMove {
                    move_str: parts[i].to_string(),
                    error: e,
                })?;
            board.make_move(mv);
            i += 1;
        }
    }

    Ok(())
}

/// Convenience wrapper over [`try_parse_position_command`] that logs
/// failures to stderr instead of propagating them — used by the main loop,
/// where a malformed `position` command shouldn't kill the process.
pub fn parse_position_command(board: &mut Board, parts: &[&str]) {
    if let Err(e) = try_parse_position_command(board, parts) {
        #[cfg(feature = "logging")]
        log::debug!("rejected malformed position command: {e}");
        eprintln!("info string error: {e}");
    }
}

#[must_use]
pub fn format_uci_move(mv: &Move) -> String {
    mv.to_string()
}

fn clock_from_go_params(p: &GoParams) -> ClockInfo {
    ClockInfo {
        wtime_ms: p.wtime,
        btime_ms: p.btime,
        winc_ms: p.winc,
        binc_ms: p.binc,
        movestogo: p.movestogo,
        movetime_ms: p.movetime,
    }
}

/// Runs the blocking UCI command loop against stdin/stdout.
pub fn run_uci_loop() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut controller = EngineController::default();
    let time_config = TimeConfig::default();

    controller.set_info_callback(Some(Arc::new(|info: &crate::search::SearchInfo| {
        let pv = info
            .pv
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "info depth {} score cp {} nodes {} time {} pv {}",
            info.depth, info.score, info.nodes, info.elapsed_ms, pv
        );
    })));

    for line in stdin.lock().lines() {
        let line = line.expect("failed to read line from stdin");
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parse_uci_command(&line) {
            Some(UciCommand::Uci) => {
                println!("id name mailbox_chess");
                println!("id author mailbox_chess contributors");
                println!("option name Hash type spin default {} min 1 max 4096", crate::config::DEFAULT_TT_SIZE_MB);
                println!("uciok");
            }
            Some(UciCommand::IsReady) => report::print_ready(),
            Some(UciCommand::UciNewGame) => controller.new_game(),
            Some(UciCommand::Position(_)) => {
                // Route through `set_board` rather than mutating the
                // controller's board in place: `set_board` stops any
                // in-flight search first, so a `position` arriving while a
                // search thread still holds the old position can't race it.
                let mut board = controller.board().clone();
                parse_position_command(&mut board, &parts);
                controller.set_board(board);
            }
            Some(UciCommand::Go(_)) => {
                let go_params = parse_go_params(&parts);
                let white_to_move = controller.board().side_to_move == crate::types::Color::White;
                let clock = clock_from_go_params(&go_params);
                let deadline_ms =
                    crate::engine::compute_move_time_ms(&clock, white_to_move, &time_config);
                controller.start_search(
                    SearchParams {
                        deadline_ms: Some(deadline_ms),
                    },
                    Box::new(|best| {
                        let best = (best != crate::types::NO_MOVE).then_some(best);
                        report::print_bestmove(best);
                    }),
                );
            }
            Some(UciCommand::Perft(depth)) => {
                let mut board = controller.board().clone();
                let start = std::time::Instant::now();
                let nodes = crate::board::perft(&mut board, depth as u32);
                print::print_perft_info(depth, nodes, start.elapsed());
            }
            Some(UciCommand::SetOption(tokens)) => {
                handle_setoption(&mut controller, &tokens);
            }
            Some(UciCommand::Debug(_)) => {}
            Some(UciCommand::Stop) => controller.stop_search(),
            Some(UciCommand::PonderHit) => {}
            Some(UciCommand::Quit) => {
                // Join any in-flight search before exiting, so a `quit`
                // arriving right after `go` can't race the search thread's
                // `bestmove` out of existence.
                controller.stop_search();
                break;
            }
            Some(UciCommand::Unknown(_)) | None => {}
        }

        stdout.flush().expect("failed to flush stdout");
    }
}

fn handle_setoption(controller: &mut EngineController, tokens: &[String]) {
    // "setoption name Hash value 128"
    let name_pos = tokens.iter().position(|t| t == "name");
    let value_pos = tokens.iter().position(|t| t == "value");
    let (Some(name_pos), Some(value_pos)) = (name_pos, value_pos) else {
        return;
    };
    let name = tokens[name_pos + 1..value_pos].join(" ");
    let value = tokens[value_pos + 1..].join(" ");
    if name.eq_ignore_ascii_case("Hash") {
        if let Ok(mb) = value.parse::<usize>() {
            controller.resize_hash(mb.max(1));
        }
    }
}
