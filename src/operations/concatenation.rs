use itertools::Itertools;
use tracing::debug;

use crate::prelude::*;

impl Nfa {
    /// Builds an automaton for the concatenation of the languages of `self` and `other`, it
    /// accepts `uv` whenever `self` accepts `u` and `other` accepts `v`.
    ///
    /// States of `other` are shifted by `self.num_states()`. Since there are no epsilon
    /// transitions, every transition of `self` that enters a final state is copied to also
    /// enter each initial state of `other`. The initial states of `other` are initial in the
    /// result if `self` accepts the empty word, and the final states of `self` remain final
    /// if `other` accepts it.
    pub fn concatenate(&self, other: &Nfa) -> Nfa {
        let offset = self.num_states();
        let self_accepts_empty = self.initial_states().iter().any(|&q| self.is_final(q));
        let other_accepts_empty = other.initial_states().iter().any(|&q| other.is_final(q));
        let other_initial = other
            .initial_states()
            .iter()
            .map(|q| q + offset)
            .collect_vec();

        let mut delta = self.delta().clone();
        delta.grow(offset);
        delta.merge(&other.delta().shifted(offset));
        for t in self.transitions().filter(|t| self.is_final(t.target)) {
            for &target in &other_initial {
                delta.insert(t.source, t.symbol, target);
            }
        }

        let mut initial = self.initial_states().clone();
        if self_accepts_empty {
            initial.extend(other_initial.iter().copied());
        }
        let mut finals: OrderedSet<State> =
            other.final_states().iter().map(|q| q + offset).collect();
        if other_accepts_empty {
            finals.extend(self.final_states().iter().copied());
        }

        debug!(
            "concatenated automata with {} and {} states",
            self.num_states(),
            other.num_states()
        );
        Nfa::from_parts(offset + other.num_states(), initial, finals, delta)
    }

    /// Concatenates `self` and `other` by connecting every final state of `self` to every
    /// initial state of `other` with a transition on `epsilon`. The result accepts
    /// `u epsilon v` whenever `self` accepts `u` and `other` accepts `v`. `epsilon` is an
    /// ordinary symbol for all other operations, it should not be used by either input.
    ///
    /// States of `other` are shifted by `self.num_states()`, the initial states are those of
    /// `self` and the final states are those of `other`.
    pub fn concatenate_over_epsilon(&self, other: &Nfa, epsilon: Symbol) -> Nfa {
        let offset = self.num_states();
        let mut delta = self.delta().clone();
        delta.grow(offset);
        delta.merge(&other.delta().shifted(offset));
        for (&source, &target) in self
            .final_states()
            .iter()
            .cartesian_product(other.initial_states().iter())
        {
            delta.insert(source, epsilon, target + offset);
        }
        let finals = other.final_states().iter().map(|q| q + offset).collect();

        debug!(
            "concatenated automata with {} and {} states over symbol {epsilon}",
            self.num_states(),
            other.num_states()
        );
        Nfa::from_parts(
            offset + other.num_states(),
            self.initial_states().clone(),
            finals,
            delta,
        )
    }
}
