use thiserror::Error;

use crate::State;

/// Raised whenever a state index is used that does not exist in the automaton it is passed
/// to. The automaton is never modified by a call that fails with this error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("state {state} is out of range, the automaton has {num_states} states")]
pub struct OutOfRangeError {
    /// The offending state index.
    pub state: State,
    /// Number of states of the automaton at the time of the call.
    pub num_states: usize,
}

impl OutOfRangeError {
    /// Creates a new error for `state` in an automaton with `num_states` states.
    pub fn new(state: State, num_states: usize) -> Self {
        Self { state, num_states }
    }

    /// Returns `Ok(())` if `state` lies in `[0, num_states)` and the corresponding error
    /// otherwise.
    pub fn check(state: State, num_states: usize) -> Result<(), Self> {
        if state < num_states {
            Ok(())
        } else {
            Err(Self::new(state, num_states))
        }
    }
}

/// Errors that can occur when building or transforming automata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NfaError {
    /// A state index was out of range, see [`OutOfRangeError`].
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
    /// The subset construction would have produced more states than allowed.
    #[error("determinization exceeded the limit of {limit} states")]
    DeterminizationLimit {
        /// The configured maximal number of states.
        limit: usize,
    },
}
