/// Outcome definitions for addresses visited during a crawl session
///
/// An address moves through `Pending` to exactly one terminal outcome and is
/// never revisited within the same session.
use std::fmt;

/// Represents what happened to a claimed address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Address has been claimed and its fetch has not resolved yet
    Pending,

    /// Address was fetched and handed to the processor
    Succeeded,

    /// Address could not be fetched; carries the failure reason
    Failed(String),
}

impl Outcome {
    /// Returns true once the fetch for this address has resolved
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if the address was fetched successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns true if fetching the address failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the failure reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Short lowercase label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed: {}", reason),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// A single ledger record: an address and its current outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedEntry {
    /// The normalized address
    pub address: String,

    /// What happened to it
    pub outcome: Outcome,
}
