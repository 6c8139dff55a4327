//! Engine mode types.
//!
//! These enums select between the two behaviors the engine supports at each
//! point where concurrent work can interleave:
//!
//! - [`ValidationOrdering`]: which validation result wins when runs overlap
//! - [`SubmitGuard`]: which state the submit guard inspects
//!
//! Both are configured through [`Config`](crate::Config) and parse from the
//! kebab-case names used in configuration files.
//!
//! # Example
//!
//! ```rust
//! use formstate::app::modes::{SubmitGuard, ValidationOrdering};
//!
//! let ordering: ValidationOrdering = "completion-order".parse().unwrap();
//! assert_eq!(ordering, ValidationOrdering::CompletionOrder);
//! assert_eq!(SubmitGuard::default(), SubmitGuard::Snapshot);
//! ```

use crate::domain::FormError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Policy for applying results of overlapping validation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationOrdering {
    /// Only the most recently started run may apply its result.
    ///
    /// Each run takes a ticket when it starts; a run whose ticket has been
    /// superseded by the time its validator completes is discarded.
    #[default]
    LatestWins,

    /// Every run applies its result when it completes.
    ///
    /// A slow run started earlier can overwrite the errors of a faster run
    /// started later.
    CompletionOrder,
}

impl FromStr for ValidationOrdering {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latest-wins" => Ok(Self::LatestWins),
            "completion-order" => Ok(Self::CompletionOrder),
            other => Err(FormError::Config(format!(
                "unknown validation ordering `{other}`"
            ))),
        }
    }
}

/// Which state the submit guard checks before invoking the submit callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitGuard {
    /// Check the snapshot read when the submit handler started.
    ///
    /// The validation run triggered by the same submit is not awaited first,
    /// so the guard may see errors from before it.
    #[default]
    Snapshot,

    /// Await the triggered validation run, then check the live state.
    AwaitValidation,
}

impl FromStr for SubmitGuard {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "snapshot" => Ok(Self::Snapshot),
            "await-validation" => Ok(Self::AwaitValidation),
            other => Err(FormError::Config(format!("unknown submit guard `{other}`"))),
        }
    }
}
