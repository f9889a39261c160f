use tracing::debug;

use crate::prelude::*;

impl Nfa {
    /// Builds an automaton that accepts a word if `self` or `other` accepts it.
    ///
    /// The result is the disjoint union of both automata: the states of `self` keep their
    /// indices and every state `q` of `other` becomes `q + self.num_states()`. Initial and
    /// final states of both parts stay initial and final, respectively.
    pub fn union(&self, other: &Nfa) -> Nfa {
        let offset = self.num_states();
        let mut delta = self.delta().clone();
        delta.grow(offset);
        delta.merge(&other.delta().shifted(offset));

        let initial = self
            .initial_states()
            .iter()
            .copied()
            .chain(other.initial_states().iter().map(|q| q + offset))
            .collect();
        let finals = self
            .final_states()
            .iter()
            .copied()
            .chain(other.final_states().iter().map(|q| q + offset))
            .collect();

        debug!(
            "union of automata with {} and {} states",
            self.num_states(),
            other.num_states()
        );
        Nfa::from_parts(offset + other.num_states(), initial, finals, delta)
    }
}
