//! Part-of-day categories
//!
//! A fixed five-value domain: four clock buckets plus `Unknown` for users
//! without any usable hour-of-day signal.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket of the clock hour a visit happened in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum PartOfDay {
    /// [0, 6)
    Night,
    /// [6, 12)
    Morning,
    /// [12, 18)
    Afternoon,
    /// [18, 24)
    Evening,
    #[default]
    Unknown,
}

impl PartOfDay {
    /// Category order; also the tie-break order for most-frequent bucket
    pub const ALL: [PartOfDay; 5] = [
        PartOfDay::Night,
        PartOfDay::Morning,
        PartOfDay::Afternoon,
        PartOfDay::Evening,
        PartOfDay::Unknown,
    ];

    /// The four clock buckets, without `Unknown`
    pub const BUCKETS: [PartOfDay; 4] = [
        PartOfDay::Night,
        PartOfDay::Morning,
        PartOfDay::Afternoon,
        PartOfDay::Evening,
    ];

    /// Bucket an hour of day. Hours outside `0..24` have no bucket.
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0..=5 => Some(PartOfDay::Night),
            6..=11 => Some(PartOfDay::Morning),
            12..=17 => Some(PartOfDay::Afternoon),
            18..=23 => Some(PartOfDay::Evening),
            _ => None,
        }
    }

    /// Position in [`PartOfDay::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartOfDay::Night => "Night",
            PartOfDay::Morning => "Morning",
            PartOfDay::Afternoon => "Afternoon",
            PartOfDay::Evening => "Evening",
            PartOfDay::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartOfDay::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownPartOfDay(s.to_string()))
    }
}
