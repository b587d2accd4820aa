//! Threshold: the analog water-level reading that triggers the device.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::error::{AquaHubError, ValidationError};
use crate::subsystem::{Command, Reservation, Subsystem};
use crate::time::{Timestamp, now};

/// Lowest accepted threshold.
pub const MIN_THRESHOLD: u16 = 1;
/// Highest accepted threshold (10-bit ADC).
pub const MAX_THRESHOLD: u16 = 1023;
/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: u16 = 500;

/// Check that `value` is an acceptable threshold.
///
/// # Errors
///
/// Returns [`ValidationError::ThresholdOutOfRange`] outside
/// `MIN_THRESHOLD..=MAX_THRESHOLD`.
pub fn check_threshold(value: i64) -> Result<u16, ValidationError> {
    u16::try_from(value)
        .ok()
        .filter(|v| (MIN_THRESHOLD..=MAX_THRESHOLD).contains(v))
        .ok_or(ValidationError::ThresholdOutOfRange {
            value,
            min: MIN_THRESHOLD,
            max: MAX_THRESHOLD,
        })
}

/// Shadow state of the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdState {
    pub value: u16,
    pub last_changed: Timestamp,
}

/// Commands accepted by the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdCommand {
    Set { value: i64 },
}

impl Command for ThresholdCommand {
    fn endpoint(&self) -> Endpoint {
        Endpoint::SetThreshold
    }

    fn payload(&self) -> Option<serde_json::Value> {
        let Self::Set { value } = self;
        Some(serde_json::json!({ "threshold": value }))
    }

    fn success_message(&self) -> &'static str {
        "threshold updated"
    }
}

/// The threshold subsystem.
#[derive(Debug)]
pub struct Threshold {
    state: ThresholdState,
}

impl Default for Threshold {
    fn default() -> Self {
        Self::with_value(DEFAULT_THRESHOLD)
    }
}

impl Threshold {
    /// Create a threshold starting at `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdOutOfRange`] when `initial` is
    /// outside the accepted range.
    pub fn new(initial: i64) -> Result<Self, ValidationError> {
        check_threshold(initial).map(Self::with_value)
    }

    fn with_value(value: u16) -> Self {
        Self {
            state: ThresholdState {
                value,
                last_changed: now(),
            },
        }
    }
}

impl Subsystem for Threshold {
    const NAME: &'static str = "threshold";

    type State = ThresholdState;
    type Command = ThresholdCommand;

    fn validate(&self, command: &ThresholdCommand) -> Result<(), AquaHubError> {
        let ThresholdCommand::Set { value } = *command;
        check_threshold(value)?;
        Ok(())
    }

    fn reserve(&self, command: &ThresholdCommand) -> Reservation<ThresholdState> {
        let ThresholdCommand::Set { value } = *command;
        Reservation::new(ThresholdState {
            value: check_threshold(value).unwrap_or(self.state.value),
            last_changed: self.state.last_changed,
        })
    }

    fn commit(&mut self, reservation: Reservation<ThresholdState>) {
        self.state = reservation.into_inner();
        self.state.last_changed = now();
    }

    fn peek(&self) -> ThresholdState {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_at_default() {
        assert_eq!(Threshold::default().peek().value, DEFAULT_THRESHOLD);
    }

    #[test]
    fn should_accept_bounds() {
        assert_eq!(check_threshold(1), Ok(1));
        assert_eq!(check_threshold(1023), Ok(1023));
    }

    #[test]
    fn should_reject_values_outside_range() {
        for value in [0, -1, 1024, i64::from(u16::MAX) + 1] {
            assert!(
                matches!(
                    check_threshold(value),
                    Err(ValidationError::ThresholdOutOfRange { .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn should_reject_out_of_range_initial_value() {
        assert!(Threshold::new(0).is_err());
        assert_eq!(Threshold::new(800).unwrap().peek().value, 800);
    }

    #[test]
    fn should_commit_new_value() {
        let mut threshold = Threshold::default();
        let reservation = threshold
            .prepare(&ThresholdCommand::Set { value: 700 })
            .unwrap();
        assert_eq!(threshold.peek().value, DEFAULT_THRESHOLD);
        threshold.commit(reservation);
        assert_eq!(threshold.peek().value, 700);
    }

    #[test]
    fn should_fail_validation_as_validation_error() {
        let threshold = Threshold::default();
        let result = threshold.validate(&ThresholdCommand::Set { value: 2000 });
        assert!(matches!(result, Err(AquaHubError::Validation(_))));
    }

    #[test]
    fn should_send_threshold_as_payload() {
        let command = ThresholdCommand::Set { value: 321 };
        assert_eq!(command.endpoint(), Endpoint::SetThreshold);
        assert_eq!(
            command.payload(),
            Some(serde_json::json!({ "threshold": 321 }))
        );
    }
}
