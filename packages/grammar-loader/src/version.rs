//! Grammar ABI version ranges
//!
//! Every generated parser records the table-format version it was
//! generated for. The runtime accepts a contiguous range of them.

use std::fmt;

use serde::Serialize;
use tree_sitter::{LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

use crate::errors::AbiRangeError;

/// Inclusive range of accepted grammar ABI versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AbiRange {
    min: usize,
    max: usize,
}

impl AbiRange {
    /// Range supported by the linked tree-sitter runtime
    pub const fn host() -> Self {
        Self {
            min: MIN_COMPATIBLE_LANGUAGE_VERSION,
            max: LANGUAGE_VERSION,
        }
    }

    pub fn new(min: usize, max: usize) -> Result<Self, AbiRangeError> {
        if min > max {
            return Err(AbiRangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// A sub-range of [`AbiRange::host`], e.g. to pin grammars to the newest ABI.
    pub fn narrowed(min: usize, max: usize) -> Result<Self, AbiRangeError> {
        let range = Self::new(min, max)?;
        let host = Self::host();
        if !host.covers(&range) {
            return Err(AbiRangeError::OutsideHost {
                min,
                max,
                host_min: host.min,
                host_max: host.max,
            });
        }
        Ok(range)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub fn contains(&self, version: usize) -> bool {
        self.min <= version && version <= self.max
    }

    /// True if `other` lies entirely inside `self`
    pub fn covers(&self, other: &AbiRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

impl Default for AbiRange {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for AbiRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
