//! Engine controller: owns the position and transposition table and drives
//! the search thread in response to UCI commands.

mod controller;
pub mod time;

pub use controller::{
    EngineController, SearchCompleteCallback, SearchInfoCallback, SearchJob, SearchParams,
};
pub use time::{compute_move_time_ms, ClockInfo, TimeConfig};
