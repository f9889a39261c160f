use tracing::trace;

use crate::prelude::*;

impl Nfa {
    /// Simulates the automaton on `word` and returns the set of states that can be reached
    /// from some initial state by reading it. The simulation propagates sets of states, so
    /// it takes time linear in the length of the word times the size of the automaton.
    pub fn run<W: IntoIterator<Item = Symbol>>(&self, word: W) -> OrderedSet<State> {
        self.run_from(self.initial_states(), word)
    }

    /// Returns `true` if the automaton accepts `word`, i.e. if some final state can be
    /// reached from an initial state by reading it.
    pub fn accepts<W: IntoIterator<Item = Symbol>>(&self, word: W) -> bool {
        self.run(word).iter().any(|&q| self.is_final(q))
    }

    /// Returns `true` if the automaton accepts no word at all. This is a forward search from
    /// the initial states that stops as soon as a final state is found, so it takes time
    /// linear in the size of the automaton.
    pub fn is_lang_empty(&self) -> bool {
        if self.final_states().is_empty() {
            return true;
        }
        let witness = self
            .reachable_states_from(self.initial_states().iter().copied())
            .find(|&q| self.is_final(q));
        if let Some(q) = witness {
            trace!("language is nonempty, final state {q} is reachable");
        }
        witness.is_none()
    }

    /// Returns a shortest word that is accepted by the automaton. Among the shortest words,
    /// the lexicographically smallest is picked. Returns `None` if the language is empty.
    pub fn accepted_word(&self) -> Option<Vec<Symbol>> {
        self.minimal_representatives_from(self.initial_states().iter().copied())
            .find(|(_, q)| self.is_final(*q))
            .map(|(word, _)| word)
    }

    /// The set of states that can be reached from some initial state.
    pub fn reachable_states(&self) -> OrderedSet<State> {
        self.reachable_states_from(self.initial_states().iter().copied())
            .collect()
    }
}
