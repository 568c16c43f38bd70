//! Per-attempt outcome types shared by the direct and fallback acquisition paths.
//!
//! Every acquisition attempt resolves to an [`AttemptOutcome`]; failures are
//! carried by value as a [`FailureKind`] and never escape as an error.

use std::fmt;

/// Where a successfully acquired PDF came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionSource {
    /// Direct download from a link scraped off the results page.
    Url(String),
    /// External acquisition tool, identified by its log label.
    Tool(String),
}

impl fmt::Display for AcquisitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Tool(label) => f.write_str(label),
        }
    }
}

/// Classified reason for a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-200 status, network error, timeout, or filesystem error on the direct path.
    Transport {
        /// Human-readable reason.
        reason: String,
    },
    /// Retrieved file did not carry the PDF signature and was deleted.
    Validation {
        /// Human-readable reason.
        reason: String,
    },
    /// External tool exited non-zero, produced no file, or failed to launch.
    Tool {
        /// Human-readable reason.
        reason: String,
    },
}

impl FailureKind {
    /// Creates a transport failure.
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Creates a validation failure.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a tool failure.
    pub fn tool(reason: impl Into<String>) -> Self {
        Self::Tool {
            reason: reason.into(),
        }
    }

    /// Returns the failure reason text.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Transport { reason } | Self::Validation { reason } | Self::Tool { reason } => {
                reason
            }
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Transport { .. } => "transport",
            Self::Validation { .. } => "validation",
            Self::Tool { .. } => "tool",
        };
        write!(f, "{kind} failure: {}", self.reason())
    }
}

/// Result of one acquisition attempt for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// A new PDF was written and recorded in the success log.
    Acquired {
        /// Filename inside the run folder.
        filename: String,
        /// Origin recorded in the success log.
        source: AcquisitionSource,
    },
    /// The success log already listed this filename; no work was done.
    AlreadyAcquired {
        /// Filename found in the success log.
        filename: String,
    },
    /// The attempt failed.
    Failed(FailureKind),
}

impl AttemptOutcome {
    /// Returns true when the record ends up present in the success log.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// Returns the failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&FailureKind> {
        match self {
            Self::Failed(kind) => Some(kind),
            _ => None,
        }
    }
}
