use tracing::debug;

use crate::prelude::*;

impl Nfa {
    /// Builds the reverse automaton, which accepts the mirror image of every word accepted
    /// by `self`. All transitions are reversed and initial and final states swap roles.
    pub fn revert(&self) -> Nfa {
        Nfa::from_parts(
            self.num_states(),
            self.final_states().clone(),
            self.initial_states().clone(),
            self.delta().reversed(),
        )
    }

    /// The states from which some final state can be reached, including the final states.
    pub fn coreachable_states(&self) -> OrderedSet<State> {
        self.delta()
            .reversed()
            .reachable_states_from(self.final_states().iter().copied())
            .collect()
    }

    /// The states that are reachable from an initial state and from which a final state is
    /// reachable. Exactly these states lie on a path of some accepting run.
    pub fn useful_states(&self) -> OrderedSet<State> {
        let coreachable = self.coreachable_states();
        self.reachable_states()
            .into_iter()
            .filter(|q| coreachable.contains(q))
            .collect()
    }

    /// Removes every state that is not useful, see [`Nfa::useful_states`], and renumbers the
    /// remaining ones densely while keeping their relative order. The returned bijection maps
    /// every kept state (left) to its new index (right). The language does not change.
    pub fn trim(&mut self) -> Bijection<State, State> {
        let renaming: Bijection<State, State> = self
            .useful_states()
            .into_iter()
            .enumerate()
            .map(|(new, old)| (old, new))
            .collect();
        let rename = |states: &OrderedSet<State>| -> OrderedSet<State> {
            states
                .iter()
                .filter_map(|q| renaming.get_by_left(q).copied())
                .collect()
        };

        let mut delta = Delta::with_states(renaming.len());
        for t in self.transitions() {
            if let (Some(&source), Some(&target)) = (
                renaming.get_by_left(&t.source),
                renaming.get_by_left(&t.target),
            ) {
                delta.insert(source, t.symbol, target);
            }
        }
        let initial = rename(self.initial_states());
        let finals = rename(self.final_states());

        debug!(
            "trimming removed {} of {} states",
            self.num_states() - renaming.len(),
            self.num_states()
        );
        *self = Nfa::from_parts(renaming.len(), initial, finals, delta);
        renaming
    }
}
