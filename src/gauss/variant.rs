//! Solver variant selection
//!
//! The strategy is a tag chosen once per solve, not a runtime dispatch on
//! matrix types: callers pick it from the file header and the decoded
//! representation, normally through [`choose_variant`].

use crate::format::{FileHeader, FormatVersion};
use crate::storage::Coefficients;
use serde::Serialize;

/// Dimension above which compressed input should decode into compact
/// storage rather than a dense grid.
///
/// The point is bounding memory at O(n·bandwidth) for very large systems,
/// not raw speed.
pub const COMPACT_STORAGE_THRESHOLD: usize = 5000;

/// Elimination strategy, tagged with the band limits it honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolverVariant {
    /// Classic elimination over the full matrix; dense storage.
    Full,
    /// Band-limited loop ranges over dense storage.
    Banded {
        /// Lower bandwidth p
        lower: usize,
        /// Upper bandwidth q
        upper: usize,
    },
    /// Band-limited elimination over compact storage; the bandwidths come
    /// from the grid itself.
    Compact,
}

impl SolverVariant {
    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            SolverVariant::Full => "full",
            SolverVariant::Banded { .. } => "banded",
            SolverVariant::Compact => "compact",
        }
    }
}

/// Whether a header should decode into compact storage.
pub fn prefer_compact(header: &FileHeader) -> bool {
    header.version == FormatVersion::Compressed && header.n > COMPACT_STORAGE_THRESHOLD
}

/// Pick the solver variant for a decoded system.
///
/// Compact storage always solves compact. Compressed input decoded densely
/// gets the band-aware strategy when it has a nonzero lower bandwidth;
/// everything else runs the full elimination.
pub fn choose_variant(header: &FileHeader, matrix: &Coefficients) -> SolverVariant {
    match matrix {
        Coefficients::Banded(_) => SolverVariant::Compact,
        Coefficients::Dense(_) => {
            if header.version == FormatVersion::Compressed && header.lower > 0 {
                SolverVariant::Banded {
                    lower: header.lower,
                    upper: header.upper,
                }
            } else {
                SolverVariant::Full
            }
        }
    }
}
