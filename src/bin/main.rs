//! UCI entry point: reads commands from stdin, writes `info`/`bestmove`
//! lines to stdout.

fn main() {
    mailbox_chess::uci::run_uci_loop();
}
