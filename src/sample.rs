//! Parsing of the comma-separated stats line
//!
//! The endpoint answers with `load,mem_total,mem_used,disk_total,disk_used,net_total,net_used`.
//! Memory and disk are in bytes, network is a byte rate.

use std::str::FromStr;

use crate::error::SampleError;

const FIELD_COUNT: usize = 7;

/// One validated reading of the stats endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub load_average: f64,
    pub memory: Usage,
    pub disk: Usage,
    pub network: Usage,
}

/// A total/used pair; `total` is strictly positive once parsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    pub total: f64,
    pub used: f64,
}

impl Usage {
    pub fn new(total: f64, used: f64) -> Self {
        Self { total, used }
    }

    /// Used share in whole percent, truncated toward zero.
    ///
    /// `None` when `total` is not positive.
    pub fn percent(&self) -> Option<i64> {
        if self.total <= 0.0 {
            return None;
        }
        Some((self.used * 100.0 / self.total) as i64)
    }

    /// Remaining capacity in whole mebi-units (bytes / 1024²), never negative
    pub fn free_mebi(&self) -> u64 {
        let free = (self.total - self.used).max(0.0);
        (free / (1024.0 * 1024.0)) as u64
    }
}

impl FromStr for Sample {
    type Err = SampleError;

    fn from_str(body: &str) -> Result<Self, Self::Err> {
        let parts = body.trim().split(',').collect::<Vec<_>>();
        if parts.len() != FIELD_COUNT {
            return Err(SampleError::FieldCount {
                expected: FIELD_COUNT,
                found: parts.len(),
            });
        }

        let mut values = [0.0f64; FIELD_COUNT];
        for (index, (slot, part)) in values.iter_mut().zip(parts).enumerate() {
            let part = part.trim();
            *slot = part.parse().map_err(|_| SampleError::InvalidNumber {
                index,
                value: part.to_string(),
            })?;
        }

        let [load_average, mem_total, mem_used, disk_total, disk_used, net_total, net_used] =
            values;

        for (field, value) in [
            ("memory", mem_total),
            ("disk", disk_total),
            ("network", net_total),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(SampleError::NonPositiveTotal { field, value });
            }
        }

        Ok(Sample {
            load_average,
            memory: Usage::new(mem_total, mem_used),
            disk: Usage::new(disk_total, disk_used),
            network: Usage::new(net_total, net_used),
        })
    }
}
