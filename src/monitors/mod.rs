pub mod poller;
pub mod stats;
pub mod thresholds;
