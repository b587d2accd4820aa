//! Reservoir: a water tank of fixed capacity, measured in whole liters.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::error::{AquaHubError, InvariantViolation, ValidationError};
use crate::subsystem::{Command, Reservation, Subsystem};
use crate::time::{Timestamp, now};

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: u32 = 100;

/// Unit reported alongside every volume.
pub const UNIT: &str = "liters";

/// Shadow state of the reservoir. Always `current_level <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservoirState {
    pub current_level: u32,
    pub capacity: u32,
    pub last_changed: Timestamp,
}

/// Commands accepted by the reservoir.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservoirCommand {
    /// Dispense `amount` liters.
    Supply { amount: i64 },
    /// Fill back up to capacity.
    Refill,
    /// Mark the reservoir as empty.
    Reset,
}

impl Command for ReservoirCommand {
    fn endpoint(&self) -> Endpoint {
        match self {
            Self::Supply { .. } => Endpoint::Supply,
            Self::Refill => Endpoint::Refill,
            Self::Reset => Endpoint::Reset,
        }
    }

    fn payload(&self) -> Option<serde_json::Value> {
        match self {
            Self::Supply { amount } => Some(serde_json::json!({ "amount": amount })),
            Self::Refill | Self::Reset => None,
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Self::Supply { .. } => "water supplied",
            Self::Refill => "reservoir refilled",
            Self::Reset => "reservoir reset",
        }
    }
}

/// The reservoir subsystem. Starts full.
#[derive(Debug)]
pub struct Reservoir {
    state: ReservoirState,
}

impl Default for Reservoir {
    fn default() -> Self {
        Self::full(DEFAULT_CAPACITY)
    }
}

impl Reservoir {
    /// Create a full reservoir of the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(capacity: u32) -> Result<Self, ValidationError> {
        if capacity == 0 {
            return Err(ValidationError::ZeroCapacity);
        }
        Ok(Self::full(capacity))
    }

    fn full(capacity: u32) -> Self {
        Self {
            state: ReservoirState {
                current_level: capacity,
                capacity,
                last_changed: now(),
            },
        }
    }

    fn next_level(&self, command: ReservoirCommand) -> u32 {
        match command {
            ReservoirCommand::Supply { amount } => {
                let amount = u32::try_from(amount).unwrap_or(u32::MAX);
                self.state.current_level.saturating_sub(amount)
            }
            ReservoirCommand::Refill => self.state.capacity,
            ReservoirCommand::Reset => 0,
        }
    }
}

impl Subsystem for Reservoir {
    const NAME: &'static str = "reservoir";

    type State = ReservoirState;
    type Command = ReservoirCommand;

    fn validate(&self, command: &ReservoirCommand) -> Result<(), AquaHubError> {
        // Refill and reset are always permitted.
        let ReservoirCommand::Supply { amount } = *command else {
            return Ok(());
        };
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount { amount }.into());
        }
        let requested =
            u32::try_from(amount).map_err(|_| ValidationError::AmountTooLarge { amount })?;
        let remaining = self.state.current_level;
        if requested > remaining {
            return Err(InvariantViolation::InsufficientVolume {
                requested,
                remaining,
            }
            .into());
        }
        Ok(())
    }

    fn reserve(&self, command: &ReservoirCommand) -> Reservation<ReservoirState> {
        Reservation::new(ReservoirState {
            current_level: self.next_level(*command),
            ..self.state.clone()
        })
    }

    fn commit(&mut self, reservation: Reservation<ReservoirState>) {
        let next = reservation.into_inner();
        self.state.current_level = next.current_level.min(self.state.capacity);
        self.state.last_changed = now();
    }

    fn peek(&self) -> ReservoirState {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(reservoir: &mut Reservoir, command: ReservoirCommand) -> Result<(), AquaHubError> {
        let reservation = reservoir.prepare(&command)?;
        reservoir.commit(reservation);
        Ok(())
    }

    #[test]
    fn should_start_full_with_default_capacity() {
        let state = Reservoir::default().peek();
        assert_eq!(state.current_level, DEFAULT_CAPACITY);
        assert_eq!(state.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn should_reject_zero_capacity() {
        assert!(matches!(
            Reservoir::new(0),
            Err(ValidationError::ZeroCapacity)
        ));
    }

    #[test]
    fn should_supply_then_reject_when_volume_insufficient() {
        let mut reservoir = Reservoir::new(100).unwrap();
        apply(&mut reservoir, ReservoirCommand::Supply { amount: 30 }).unwrap();
        assert_eq!(reservoir.peek().current_level, 70);

        let result = apply(&mut reservoir, ReservoirCommand::Supply { amount: 80 });
        assert!(matches!(
            result,
            Err(AquaHubError::Invariant(
                InvariantViolation::InsufficientVolume {
                    requested: 80,
                    remaining: 70
                }
            ))
        ));
        assert_eq!(reservoir.peek().current_level, 70);
    }

    #[test]
    fn should_allow_supplying_exactly_the_remaining_volume() {
        let mut reservoir = Reservoir::new(10).unwrap();
        apply(&mut reservoir, ReservoirCommand::Supply { amount: 10 }).unwrap();
        assert_eq!(reservoir.peek().current_level, 0);
    }

    #[test]
    fn should_reject_non_positive_amounts() {
        let reservoir = Reservoir::default();
        for amount in [0, -5] {
            let result = reservoir.validate(&ReservoirCommand::Supply { amount });
            assert!(matches!(
                result,
                Err(AquaHubError::Validation(
                    ValidationError::NonPositiveAmount { .. }
                ))
            ));
        }
    }

    #[test]
    fn should_reject_amount_beyond_volume_type() {
        let reservoir = Reservoir::default();
        let result = reservoir.validate(&ReservoirCommand::Supply {
            amount: i64::from(u32::MAX) + 1,
        });
        assert!(matches!(
            result,
            Err(AquaHubError::Validation(
                ValidationError::AmountTooLarge { .. }
            ))
        ));
    }

    #[test]
    fn should_refill_to_capacity_from_any_level() {
        let mut reservoir = Reservoir::new(50).unwrap();
        apply(&mut reservoir, ReservoirCommand::Supply { amount: 45 }).unwrap();
        apply(&mut reservoir, ReservoirCommand::Refill).unwrap();
        assert_eq!(reservoir.peek().current_level, 50);

        apply(&mut reservoir, ReservoirCommand::Refill).unwrap();
        assert_eq!(reservoir.peek().current_level, 50);
    }

    #[test]
    fn should_reset_to_empty_and_stay_empty() {
        let mut reservoir = Reservoir::default();
        apply(&mut reservoir, ReservoirCommand::Reset).unwrap();
        assert_eq!(reservoir.peek().current_level, 0);
        apply(&mut reservoir, ReservoirCommand::Reset).unwrap();
        assert_eq!(reservoir.peek().current_level, 0);
    }

    #[test]
    fn should_keep_level_when_reservation_is_dropped() {
        let reservoir = Reservoir::default();
        let reservation = reservoir.prepare(&ReservoirCommand::Reset).unwrap();
        assert_eq!(reservation.next().current_level, 0);
        drop(reservation);
        assert_eq!(reservoir.peek().current_level, DEFAULT_CAPACITY);
    }

    #[test]
    fn should_send_amount_as_payload() {
        let payload = ReservoirCommand::Supply { amount: 30 }.payload().unwrap();
        assert_eq!(payload, serde_json::json!({ "amount": 30 }));
        assert!(ReservoirCommand::Refill.payload().is_none());
        assert_eq!(ReservoirCommand::Reset.endpoint(), Endpoint::Reset);
    }
}
