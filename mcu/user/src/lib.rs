#![cfg_attr(not(test), no_std)]

pub mod error;
pub use error::Error;

pub mod cali;
pub mod hal;
pub mod tasks;
pub mod transform;

extern crate alloc;

use cali::{Calibrator, SchemeKind};
use hal::{Board, Clock, Efuse};
use tasks::{Control, LoopConfig};

/// Firmware entry point. Never returns, a device error aborts.
pub fn user_main<B: Board, K: Clock, E: Efuse>(board: B, clock: K, efuse: E) -> ! {
    log::info!("Enter user code");

    let calibrator = Calibrator::new(efuse, SchemeKind::PRIORITY);
    let stats = tasks::STATISTICS.clone();
    let control = match Control::new(board, clock, calibrator, LoopConfig::default(), stats) {
        Ok(control) => control,
        Err(e) => panic!("Setup failed: {}", e),
    };

    log::info!("Starting control loop ...");
    control.run()
}
