//! Failure records
//!
//! Stages never stop on a per-application problem; they append a
//! [`Failure`] to the shared [`FailureLog`] and move on.

use std::fmt;

/// Failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Expected file or directory is absent
    MissingResource,
    /// Manifest does not parse as valid structured data
    MalformedData,
    /// Copy or archive operation failed
    IoFailure,
    /// Ordering file absent or not a list
    FatalConfiguration,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingResource => "missing",
            Self::MalformedData => "malformed",
            Self::IoFailure => "io",
            Self::FatalConfiguration => "config",
        };
        f.write_str(label)
    }
}

/// One recorded failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Application name (or stage name for global steps)
    pub subject: String,
    /// Category
    pub kind: FailureKind,
    /// Human-readable reason
    pub reason: String,
}

impl Failure {
    /// Create a failure record
    pub fn new(subject: impl Into<String>, kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.reason)
    }
}

/// Ordered accumulation of failures across a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureLog {
    entries: Vec<Failure>,
}

impl FailureLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure
    pub fn push(&mut self, failure: Failure) {
        tracing::debug!("Recorded failure ({}) {failure}", failure.kind);
        self.entries.push(failure);
    }

    /// Shorthand for `push(Failure::new(..))`
    pub fn record(
        &mut self,
        subject: impl Into<String>,
        kind: FailureKind,
        reason: impl Into<String>,
    ) {
        self.push(Failure::new(subject, kind, reason));
    }

    /// All failures in recording order
    pub fn entries(&self) -> &[Failure] {
        &self.entries
    }

    /// Failures for one subject
    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Failure> + 'a {
        self.entries.iter().filter(move |f| f.subject == subject)
    }

    /// Number of failures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing failed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
