//! Centralized tunables so magic numbers live in one place.

/// Default transposition table size when none is requested.
pub const DEFAULT_TT_SIZE_MB: usize = 64;

/// Iterative deepening stops handing out a new depth once this is reached.
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Move-time bounds applied when a GUI sends `go` without any clock info.
pub const DEFAULT_MOVE_TIME_MS: u64 = 7_000;
pub const MAX_MOVE_TIME_MS: u64 = 60_000;

/// The search thread gets its own larger stack: deep recursion plus
/// quiescence can otherwise overflow the default thread stack.
pub const SEARCH_STACK_SIZE_BYTES: usize = 32 * 1024 * 1024;

/// Safety margin subtracted from a hard deadline so the timer thread's own
/// wake-up latency can't push the search past it.
pub const HARD_STOP_MARGIN_MS: u64 = 5;

/// How often the dispatcher's deadline-watcher thread wakes up to check
/// whether the search has finished or the deadline has passed.
pub const DEADLINE_POLL_MS: u64 = 100;
