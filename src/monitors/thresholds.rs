use std::fmt;

use tracing::trace;

use crate::{Sample, config::Limits};

/// A threshold breach found in a single sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warning {
    LoadAverage(f64),
    Memory { percent: i64 },
    Network { available_mbit: u64 },
    Disk { free_mb: u64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // shortest round-trip decimal (`35`, `30.0001`), never exponent notation
            Warning::LoadAverage(load) => write!(f, "Load Average is too high: {load}"),
            Warning::Memory { percent } => write!(f, "Memory usage too high: {percent}%"),
            Warning::Network { available_mbit } => {
                write!(f, "Network bandwidth usage high: {available_mbit} Mbit/s available")
            }
            Warning::Disk { free_mb } => write!(f, "Free disk space is too low: {free_mb} Mb left"),
        }
    }
}

/// Check a sample against the limits.
///
/// Every check runs independently; the result keeps the order load, memory, network, disk.
pub fn evaluate(sample: &Sample, limits: &Limits) -> Vec<Warning> {
    let mut warnings = vec![];

    if sample.load_average > limits.load_average {
        warnings.push(Warning::LoadAverage(sample.load_average));
    }

    if let Some(percent) = sample.memory.percent()
        && percent > limits.memory
    {
        warnings.push(Warning::Memory { percent });
    }

    // the free byte rate is reported as is, without a bits conversion
    if let Some(percent) = sample.network.percent()
        && percent > limits.network
    {
        warnings.push(Warning::Network {
            available_mbit: sample.network.free_mebi(),
        });
    }

    if let Some(percent) = sample.disk.percent()
        && percent > limits.disk
    {
        warnings.push(Warning::Disk {
            free_mb: sample.disk.free_mebi(),
        });
    }

    trace!("{sample:?} -> {} warning(s)", warnings.len());

    warnings
}
