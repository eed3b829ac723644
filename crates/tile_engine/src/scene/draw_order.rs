//! Draw-order keys

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort key for siblings in a scene
///
/// Compares by `z`, then by `bias`, using the IEEE total order so every key
/// is comparable. Components with no key sort before every keyed component
/// (`Option<DrawOrder>` puts `None` first).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DrawOrder {
    /// Primary key
    pub z: f64,
    /// Tie-breaker
    pub bias: f64,
}

impl DrawOrder {
    /// A key with no bias
    pub const fn new(z: f64) -> Self {
        Self { z, bias: 0.0 }
    }

    /// A key with a tie-breaker
    pub const fn with_bias(z: f64, bias: f64) -> Self {
        Self { z, bias }
    }
}

impl PartialEq for DrawOrder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DrawOrder {}

impl PartialOrd for DrawOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DrawOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.z
            .total_cmp(&other.z)
            .then_with(|| self.bias.total_cmp(&other.bias))
    }
}

/// Whether the keys are already in non-decreasing order
pub fn is_sorted(keys: impl IntoIterator<Item = Option<DrawOrder>>) -> bool {
    let mut max = None;
    for key in keys {
        if key < max {
            return false;
        }
        max = key;
    }
    true
}
