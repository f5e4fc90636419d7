//! Tournament-protocol TCP client: a thin adapter that drives the engine
//! over a line-framed socket protocol instead of UCI. No search/eval logic
//! lives here — every move request goes through the same `EngineController`
//! the UCI binary uses.
//!
//! Usage: `tourney_client <host> <port> <tournament-name> <player-name>`

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::mpsc;
use std::time::Duration;

use mailbox_chess::board::Board;
use mailbox_chess::engine::{EngineController, SearchParams};

fn write_line(stream: &mut TcpStream, line: &str) -> std::io::Result<()> {
    stream.write_all(line.as_bytes())?;
    stream.write_all(b"\n")?;
    stream.flush()
}

/// Blocks until the engine produces a move against `deadline_ms`.
fn best_move_within(controller: &mut EngineController, deadline_ms: u64) -> String {
    let (tx, rx) = mpsc::channel();
    controller.start_search(
        SearchParams {
            deadline_ms: Some(deadline_ms),
        },
        Box::new(move |m| {
            let _ = tx.send(m);
        }),
    );
    let best = rx
        .recv_timeout(Duration::from_millis(deadline_ms + 2_000))
        .expect("search thread did not report a move");
    controller.stop_search();
    best.to_string()
}

fn main() {
    let mut args = std::env::args().skip(1);
    let host = args.next().expect("usage: tourney_client <host> <port> <tournament> <player>");
    let port: u16 = args.next().expect("missing port").parse().expect("port must be numeric");
    let tournament = args.next().expect("missing tournament name");
    let player = args.next().expect("missing player name");

    let mut stream = TcpStream::connect((host.as_str(), port)).expect("failed to connect");
    let mut reader = BufReader::new(stream.try_clone().expect("failed to clone socket"));

    write_line(&mut stream, &format!("JOIN {tournament} {player}")).expect("failed to send JOIN");

    let mut controller = EngineController::default();
    let mut game_id = String::new();
    let mut moves_to_go: u64 = 50;

    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).expect("failed to read from socket");
        if bytes_read == 0 {
            break;
        }
        let input = line.trim_end();
        if input.is_empty() {
            continue;
        }
        println!("{input}");

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.first().copied() {
            Some("GAME_PAIRED") => {
                game_id = parts.get(1).unwrap_or(&"").to_string();
                write_line(&mut stream, &format!("ACK {game_id}")).expect("failed to send ACK");
            }
            Some("GAME_STARTED") => {
                controller.new_game();
                moves_to_go = 50;
            }
            Some("YOUR_MOVE") => {
                if parts.len() < 7 {
                    continue;
                }
                let white_time_s: f64 = parts[2].parse().unwrap_or(0.0);
                let black_time_s: f64 = parts[3].parse().unwrap_or(0.0);
                let fen = parts[4..].join(" ");

                controller.set_board(Board::from_fen(&fen));
                let own_time_s = if controller.board().side_to_move == mailbox_chess::types::Color::White {
                    white_time_s
                } else {
                    black_time_s
                };
                moves_to_go = moves_to_go.saturating_sub(1).max(1);
                let deadline_ms = ((own_time_s * 1000.0) / moves_to_go as f64) as u64;

                let mv = best_move_within(&mut controller, deadline_ms.max(1));
                write_line(&mut stream, &format!("MOVE {game_id} {mv}")).expect("failed to send MOVE");
            }
            _ => {}
        }
    }
}
