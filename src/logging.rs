//! Console Logging
//!
//! `console_log` backend for the `log` facade. Messages carry their own
//! `[TAG]` prefix.

use log::{Level, LevelFilter};

/// Install the console logger at `Info`. Later calls are ignored.
pub fn init() {
    let _ = console_log::init_with_level(Level::Info);
}

pub fn set_verbose(verbose: bool) {
    log::set_max_level(max_level(verbose));
}

fn max_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
