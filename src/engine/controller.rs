//! Engine controller: owns the position and transposition table, and drives
//! the search thread in response to UCI commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::board::Board;
use crate::config::{DEADLINE_POLL_MS, HARD_STOP_MARGIN_MS, SEARCH_STACK_SIZE_BYTES};
use crate::search::{Search, SearchInfo};
use crate::tt::TranspositionTable;

pub type SearchInfoCallback = Arc<dyn Fn(&SearchInfo) + Send + Sync>;
pub type SearchCompleteCallback = Box<dyn FnOnce(crate::types::Move) + Send>;

/// A search running on its own thread, plus the timer thread enforcing its
/// hard deadline.
pub struct SearchJob {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
    timer_handle: Option<JoinHandle<()>>,
}

impl SearchJob {
    pub fn stop_and_wait(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
        if let Some(timer) = self.timer_handle {
            let _ = timer.join();
        }
    }

    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Parameters for a single `go` search.
#[derive(Default, Clone, Copy)]
pub struct SearchParams {
    /// Hard deadline, in milliseconds from now. `None` means search until
    /// `stop` is received.
    pub deadline_ms: Option<u64>,
}

pub struct EngineController {
    board: Board,
    tt: Arc<Mutex<TranspositionTable>>,
    current_job: Option<SearchJob>,
    info_callback: Option<SearchInfoCallback>,
}

impl EngineController {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        EngineController {
            board: Board::new(),
            tt: Arc::new(Mutex::new(TranspositionTable::new(tt_mb))),
            current_job: None,
            info_callback: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.stop_search();
        self.board = board;
    }

    pub fn new_game(&mut self) {
        self.stop_search();
        self.board = Board::new();
        self.tt.lock().clear();
    }

    pub fn stop_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.stop_and_wait();
        }
    }

    pub fn signal_stop(&mut self) {
        if let Some(job) = &self.current_job {
            job.signal_stop();
        }
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job.is_some()
    }

    pub fn resize_hash(&mut self, mb: usize) {
        self.stop_search();
        *self.tt.lock() = TranspositionTable::new(mb);
        #[cfg(feature = "logging")]
        log::info!("transposition table resized to {mb} MB");
    }

    pub fn set_info_callback(&mut self, cb: Option<SearchInfoCallback>) {
        self.info_callback = cb;
    }

    fn spawn_hard_stop_timer(
        deadline: Option<Instant>,
        stop: Arc<AtomicBool>,
    ) -> Option<JoinHandle<()>> {
        deadline.map(|deadline| {
            thread::spawn(move || loop {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                let now = Instant::now();
                if now >= deadline {
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
                let sleep_for = (deadline - now).min(Duration::from_millis(DEADLINE_POLL_MS));
                thread::sleep(sleep_for);
            })
        })
    }

    /// Starts a search on a dedicated thread; `on_complete` is invoked with
    /// the chosen move once the search finishes or is stopped.
    pub fn start_search(&mut self, params: SearchParams, on_complete: SearchCompleteCallback) {
        self.stop_search();

        #[cfg(feature = "logging")]
        log::info!("search starting, deadline_ms={:?}", params.deadline_ms);

        let stop = Arc::new(AtomicBool::new(false));
        let start = Instant::now();
        let hard_deadline = params
            .deadline_ms
            .map(|ms| start + Duration::from_millis(ms.saturating_sub(HARD_STOP_MARGIN_MS)));

        let timer_handle = Self::spawn_hard_stop_timer(hard_deadline, Arc::clone(&stop));

        let mut search_board = self.board.clone();
        let tt = Arc::clone(&self.tt);
        let stop_clone = Arc::clone(&stop);
        let info_callback = self.info_callback.clone();

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE_BYTES)
            .spawn(move || {
                let mut tt_guard = tt.lock();
                let mut search = Search::new(&mut tt_guard, &stop_clone);
                let best = search.go(&mut search_board, |info| {
                    if let Some(cb) = &info_callback {
                        cb(info);
                    }
                });
                #[cfg(feature = "logging")]
                log::info!("search finished, best_move={best}");
                on_complete(best);
            })
            .expect("failed to spawn search thread");

        self.current_job = Some(SearchJob {
            stop,
            handle,
            timer_handle,
        });
    }
}

impl Default for EngineController {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TT_SIZE_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn start_search_reports_a_legal_move_via_callback() {
        let mut controller = EngineController::new(1);
        let (tx, rx) = mpsc::channel();
        controller.start_search(
            SearchParams {
                deadline_ms: Some(50),
            },
            Box::new(move |m| {
                let _ = tx.send(m);
            }),
        );
        let best = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        controller.stop_search();
        let mut legal = crate::types::MoveList::new();
        controller.board_mut().generate_legal_moves(&mut legal);
        assert!(legal.as_slice().iter().any(|m| *m == best));
    }
}
