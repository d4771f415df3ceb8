pub mod control;
pub mod stats;

pub use control::{Control, LoopConfig};
pub use stats::{Statistics, STATISTICS};
