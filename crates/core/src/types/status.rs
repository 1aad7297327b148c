//! Status enums for the order submission flow.

use serde::{Deserialize, Serialize};

/// Whether an order submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// No request in flight; the place-order button is enabled.
    #[default]
    Idle,
    /// A place-order request has been sent and not yet answered.
    Submitting,
}

impl SubmissionState {
    #[must_use]
    pub const fn is_submitting(self) -> bool {
        matches!(self, Self::Submitting)
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
        }
    }
}

impl std::str::FromStr for SubmissionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "submitting" => Ok(Self::Submitting),
            _ => Err(format!("invalid submission state: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SubmissionState::default(), SubmissionState::Idle);
        assert!(!SubmissionState::Idle.is_submitting());
        assert!(SubmissionState::Submitting.is_submitting());
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for state in [SubmissionState::Idle, SubmissionState::Submitting] {
            assert_eq!(state.to_string().parse::<SubmissionState>().unwrap(), state);
        }
        assert!("done".parse::<SubmissionState>().is_err());
    }
}
