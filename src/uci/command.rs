//! Tokenizing the UCI command line into a typed command. Pure parsing: no
//! board or search state is touched here, so the dispatcher in `uci/mod.rs`
//! decides what each command means.

/// A parsed UCI command. `Position`/`Go`/`SetOption` keep their raw tokens
/// (including the leading command word) rather than a further-parsed
/// payload — `try_parse_position_command` and `parse_go_params` do that
/// parsing against live board/clock state, which this module doesn't have.
#[derive(Debug, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    Perft(usize),
    SetOption(Vec<String>),
    Debug(Option<String>),
    Stop,
    PonderHit,
    Quit,
    Unknown(String),
}

/// Clock/time-control parameters extracted from a `go` line. Pondering and
/// depth/node/mate search limits are accepted (so a GUI sending them
/// doesn't trip an `Unknown` command) but not acted on — this engine always
/// runs iterative deepening to a time deadline, per its search scope.
#[derive(Default, Debug, Clone)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movetime: Option<u64>,
    pub movestogo: Option<u64>,
}

/// One recognized `go` keyword: how many extra tokens it consumes, and
/// where to write its parsed value.
struct GoParam {
    key: &'static str,
    set: fn(&mut GoParams, u64),
}

const GO_PARAMS: &[GoParam] = &[
    GoParam { key: "wtime", set: |p, v| p.wtime = Some(v) },
    GoParam { key: "btime", set: |p, v| p.btime = Some(v) },
    GoParam { key: "winc", set: |p, v| p.winc = Some(v) },
    GoParam { key: "binc", set: |p, v| p.binc = Some(v) },
    GoParam { key: "movetime", set: |p, v| p.movetime = Some(v) },
    GoParam { key: "movestogo", set: |p, v| p.movestogo = Some(v) },
];

#[must_use]
pub fn parse_go_params(parts: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut i = 1;
    while i < parts.len() {
        let token = parts[i];
        if let Some(param) = GO_PARAMS.iter().find(|p| p.key == token) {
            if let Some(value) = parts.get(i + 1).and_then(|v| v.parse::<u64>().ok()) {
                (param.set)(&mut params, value);
                i += 2;
                continue;
            }
        }
        // Unrecognized keyword, or a recognized one missing its value
        // (e.g. trailing "depth" with nothing after it, or "ponder"/
        // "infinite" which take none): skip just this token.
        i += 1;
    }
    params
}

#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *parts.first()?;

    let owned = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<_>>();

    let command = match first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned()),
        "go" => UciCommand::Go(owned()),
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "setoption" => UciCommand::SetOption(owned()),
        "debug" => UciCommand::Debug(parts.get(1).map(|v| (*v).to_string())),
        "stop" => UciCommand::Stop,
        "ponderhit" => UciCommand::PonderHit,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_params_reads_known_time_control_keywords() {
        let params = parse_go_params(&["go", "wtime", "1000", "btime", "2000", "movestogo", "5"]);
        assert_eq!(params.wtime, Some(1000));
        assert_eq!(params.btime, Some(2000));
        assert_eq!(params.movestogo, Some(5));
        assert_eq!(params.winc, None);
    }

    #[test]
    fn go_params_ignores_unrecognized_and_flag_keywords() {
        let params = parse_go_params(&["go", "ponder", "infinite", "movetime", "500"]);
        assert_eq!(params.movetime, Some(500));
    }

    #[test]
    fn empty_line_parses_to_no_command() {
        assert!(parse_uci_command("   ").is_none());
    }

    #[test]
    fn unrecognized_word_becomes_unknown() {
        match parse_uci_command("xyzzy") {
            Some(UciCommand::Unknown(s)) => assert_eq!(s, "xyzzy"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }
}
