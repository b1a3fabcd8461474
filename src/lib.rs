pub mod config;
pub mod error;
pub mod monitors;
pub mod sample;
pub mod util;

pub use sample::{Sample, Usage};
