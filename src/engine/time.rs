//! Time management for the UCI `go` command: turning clock/increment/movestogo
//! parameters into a single move-time budget.

use crate::config::{DEFAULT_MOVE_TIME_MS, MAX_MOVE_TIME_MS};

/// Tunables for translating a clock reading into a move-time budget.
#[derive(Debug, Clone, Copy)]
pub struct TimeConfig {
    /// Reserved for communication/GC latency, subtracted from any computed
    /// budget before it's used as a deadline.
    pub move_overhead_ms: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        TimeConfig {
            move_overhead_ms: 50,
        }
    }
}

/// Clock state reported by a UCI `go` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockInfo {
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u64>,
    pub movetime_ms: Option<u64>,
}

/// Time budget, in milliseconds, for the side to move: `own_time / max(1, K)`
/// plus increment, falling back to `DEFAULT_MOVE_TIME_MS` when no clock
/// information was supplied, and always clamped to `MAX_MOVE_TIME_MS`.
#[must_use]
pub fn compute_move_time_ms(clock: &ClockInfo, white_to_move: bool, config: &TimeConfig) -> u64 {
    if let Some(fixed) = clock.movetime_ms {
        return fixed.max(1);
    }

    let own_time = if white_to_move {
        clock.wtime_ms
    } else {
        clock.btime_ms
    };
    let own_inc = if white_to_move {
        clock.winc_ms
    } else {
        clock.binc_ms
    }
    .unwrap_or(0);

    let Some(own_time) = own_time else {
        return DEFAULT_MOVE_TIME_MS;
    };

    let moves_left = clock.movestogo.unwrap_or(1).max(1);
    let budget = own_time / moves_left + own_inc;
    let budget = budget.saturating_sub(config.move_overhead_ms).max(1);
    budget.min(MAX_MOVE_TIME_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_without_clock_info() {
        let clock = ClockInfo::default();
        let ms = compute_move_time_ms(&clock, true, &TimeConfig::default());
        assert_eq!(ms, DEFAULT_MOVE_TIME_MS);
    }

    #[test]
    fn divides_remaining_time_by_moves_to_go() {
        let clock = ClockInfo {
            wtime_ms: Some(10_000),
            movestogo: Some(10),
            ..ClockInfo::default()
        };
        let ms = compute_move_time_ms(&clock, true, &TimeConfig::default());
        assert_eq!(ms, 10_000 / 10 - 50);
    }

    #[test]
    fn explicit_movetime_is_used_directly() {
        let clock = ClockInfo {
            movetime_ms: Some(2_500),
            wtime_ms: Some(60_000),
            ..ClockInfo::default()
        };
        let ms = compute_move_time_ms(&clock, true, &TimeConfig::default());
        assert_eq!(ms, 2_500);
    }

    #[test]
    fn clamps_to_max_move_time() {
        let clock = ClockInfo {
            wtime_ms: Some(10_000_000),
            movestogo: Some(1),
            ..ClockInfo::default()
        };
        let ms = compute_move_time_ms(&clock, true, &TimeConfig::default());
        assert_eq!(ms, MAX_MOVE_TIME_MS);
    }
}
