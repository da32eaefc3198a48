//! Degradation bookkeeping for analysis results.
//!
//! Upstream failures never fail a request; they substitute a
//! deterministic fallback. `Outcome` records which path produced a
//! value. Operations that can genuinely fail return
//! `Result<Outcome<T>, E>`, keeping the failed case in the usual
//! `Result` channel.

/// An analysis value plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Produced on the primary path with all dependencies available.
    Full(T),
    /// Produced after an upstream dependency failed or was disabled.
    Degraded {
        value: T,
        /// What degraded, e.g. "inference API token not configured".
        reason: String,
    },
}

impl<T> Outcome<T> {
    /// Shorthand for the degraded variant.
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Outcome::Degraded {
            value,
            reason: reason.into(),
        }
    }

    /// Borrow the carried value regardless of path.
    pub fn value(&self) -> &T {
        match self {
            Outcome::Full(value) => value,
            Outcome::Degraded { value, .. } => value,
        }
    }

    /// Consume the outcome, keeping only the value.
    pub fn into_value(self) -> T {
        match self {
            Outcome::Full(value) => value,
            Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    /// The degradation reason, when there is one.
    pub fn degradation(&self) -> Option<&str> {
        match self {
            Outcome::Full(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    /// Map the carried value, preserving the path.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Full(value) => Outcome::Full(f(value)),
            Outcome::Degraded { value, reason } => Outcome::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}
