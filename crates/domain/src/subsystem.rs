//! Subsystem contract: validate, reserve, commit, peek.
//!
//! A subsystem owns one piece of shadow state. Mutations never happen in
//! place: the caller first [`prepare`](Subsystem::prepare)s a
//! [`Reservation`] holding the prospective state, performs the remote side
//! effect, and only then hands the reservation back to
//! [`commit`](Subsystem::commit). Dropping a reservation is a rollback.

use crate::endpoint::Endpoint;
use crate::error::AquaHubError;

/// A command that maps onto a single controller endpoint.
pub trait Command {
    /// Endpoint that performs this command on the physical device.
    fn endpoint(&self) -> Endpoint;

    /// JSON body sent along with the command, if any.
    fn payload(&self) -> Option<serde_json::Value>;

    /// Human-readable confirmation once the command has been committed.
    fn success_message(&self) -> &'static str;
}

/// A computed but not yet committed state transition.
///
/// Only this crate can build one, so a commit is always backed by a
/// prior `reserve` on the same kind of subsystem. It cannot be cloned, so a
/// stale copy can never be committed after the state has moved on.
///
/// ```compile_fail
/// fn cloneable<T: Clone>() {}
/// cloneable::<aquahub_domain::subsystem::Reservation<u32>>();
/// ```
#[derive(Debug)]
#[must_use = "a reservation does nothing until it is committed"]
pub struct Reservation<S> {
    next: S,
}

impl<S> Reservation<S> {
    pub(crate) fn new(next: S) -> Self {
        Self { next }
    }

    /// The state that will become current on commit.
    pub fn next(&self) -> &S {
        &self.next
    }

    pub(crate) fn into_inner(self) -> S {
        self.next
    }
}

/// Shadow state of one independently controlled part of the device.
pub trait Subsystem {
    /// Name used in logs (`cover`, `reservoir`, `threshold`).
    const NAME: &'static str;

    /// Snapshot type returned by [`peek`](Self::peek).
    type State: Clone;

    /// Commands accepted by this subsystem.
    type Command: Command;

    /// Check the command against its own parameters and the committed state.
    ///
    /// # Errors
    ///
    /// Returns [`AquaHubError::Validation`] for malformed parameters and
    /// [`AquaHubError::Invariant`] when the command conflicts with the
    /// current state.
    fn validate(&self, command: &Self::Command) -> Result<(), AquaHubError>;

    /// Compute the state that would result from `command`.
    ///
    /// Does not check invariants; use [`prepare`](Self::prepare) unless
    /// [`validate`](Self::validate) has already passed.
    fn reserve(&self, command: &Self::Command) -> Reservation<Self::State>;

    /// Replace the committed state with the reserved one.
    fn commit(&mut self, reservation: Reservation<Self::State>);

    /// Snapshot of the committed state.
    fn peek(&self) -> Self::State;

    /// Validate then reserve.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`validate`](Self::validate).
    fn prepare(&self, command: &Self::Command) -> Result<Reservation<Self::State>, AquaHubError> {
        self.validate(command)?;
        Ok(self.reserve(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_reserved_state() {
        let reservation = Reservation::new(42_u32);
        assert_eq!(*reservation.next(), 42);
        assert_eq!(reservation.into_inner(), 42);
    }
}
