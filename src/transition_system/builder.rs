use itertools::Itertools;

use crate::prelude::*;

/// Helper struct for the construction of automata. It collects transitions as well as
/// initial and final states and validates all of them at once when [`NfaBuilder::into_nfa`]
/// is called.
///
/// # Example
///
/// We want to create an automaton with two states 0 and 1 over the symbols `0` and `1` which
/// accepts all words that contain at least one `1`:
/// ```
/// use automata_nfa::prelude::*;
///
/// let nfa = NfaBuilder::default()
///     .with_transitions([(0, 0, 0), (0, 1, 1), (1, 0, 1), (1, 1, 1)])
///     .with_initial([0])
///     .with_final([1])
///     .into_nfa()
///     .unwrap();
/// assert!(nfa.accepts([0, 1, 0]));
/// assert!(!nfa.accepts([0, 0]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct NfaBuilder {
    num_states: Option<usize>,
    transitions: Vec<Transition>,
    initial: Vec<State>,
    finals: Vec<State>,
}

impl NfaBuilder {
    /// Fixes the number of states of the automaton that is built. If this is not called, the
    /// automaton has one state more than the largest state that is referenced.
    pub fn with_num_states(mut self, num_states: usize) -> Self {
        self.num_states = Some(num_states);
        self
    }

    /// Adds a list of transitions, these can be given as `(source, symbol, target)` tuples.
    pub fn with_transitions<I, T>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoTransition,
    {
        self.transitions
            .extend(iter.into_iter().map(IntoTransition::into_transition));
        self
    }

    /// Marks the given states as initial.
    pub fn with_initial<I: IntoIterator<Item = State>>(mut self, iter: I) -> Self {
        self.initial.extend(iter);
        self
    }

    /// Marks the given states as final.
    pub fn with_final<I: IntoIterator<Item = State>>(mut self, iter: I) -> Self {
        self.finals.extend(iter);
        self
    }

    fn inferred_num_states(&self) -> usize {
        self.transitions
            .iter()
            .flat_map(|t| [t.source, t.target])
            .chain(self.initial.iter().copied())
            .chain(self.finals.iter().copied())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Builds the automaton. Fails with [`NfaError::OutOfRange`] if some state that was given
    /// is not below the configured number of states.
    pub fn into_nfa(self) -> Result<Nfa, NfaError> {
        let num_states = self
            .num_states
            .unwrap_or_else(|| self.inferred_num_states());
        let mut nfa = Nfa::new(num_states);
        nfa.add_transitions(self.transitions)?;
        nfa.add_initial_states(self.initial.into_iter().unique())?;
        nfa.add_final_states(self.finals.into_iter().unique())?;
        Ok(nfa)
    }
}
