use std::collections::VecDeque;

use bit_set::BitSet;

use crate::prelude::*;

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<Symbol>, State);

/// Struct that can return the minimal representatives of a transition system. A minimal representative
/// for a state `q` of some transition system is the length-lexicographically minimal word with which
/// `q` can be reached from one of the given origins.
///
/// The traversal is a breadth-first search, every state is visited at most once and every
/// transition is inspected at most once.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a, Ts> {
    ts: &'a Ts,
    seen: BitSet,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a, Ts: TransitionSystem> MinimalRepresentatives<'a, Ts> {
    /// Starts the search in all states of `origins`, which are reached by the empty word.
    pub fn new<I: IntoIterator<Item = State>>(ts: &'a Ts, origins: I) -> Self {
        let mut seen = BitSet::with_capacity(ts.num_states());
        let mut queue = VecDeque::new();
        for origin in origins {
            if seen.insert(origin) {
                queue.push_back((vec![], origin));
            }
        }
        Self { ts, seen, queue }
    }
}

impl<'a, Ts: TransitionSystem> Iterator for MinimalRepresentatives<'a, Ts> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for (symbol, p) in self.ts.edges_from(q) {
            if self.seen.insert(p) {
                let mut extended = access.clone();
                extended.push(symbol);
                self.queue.push_back((extended, p));
            }
        }
        Some((access, q))
    }
}

/// Allows iterating over the reachable states of a transition system. Unlike
/// [`MinimalRepresentatives`] this does not keep track of access words.
#[derive(Debug, Clone)]
pub struct ReachableStates<'a, Ts> {
    ts: &'a Ts,
    seen: BitSet,
    queue: VecDeque<State>,
}

impl<'a, Ts: TransitionSystem> ReachableStates<'a, Ts> {
    /// Starts the search in all states of `origins`.
    pub fn new<I: IntoIterator<Item = State>>(ts: &'a Ts, origins: I) -> Self {
        let mut seen = BitSet::with_capacity(ts.num_states());
        let mut queue = VecDeque::new();
        for origin in origins {
            if seen.insert(origin) {
                queue.push_back(origin);
            }
        }
        Self { ts, seen, queue }
    }
}

impl<'a, Ts: TransitionSystem> Iterator for ReachableStates<'a, Ts> {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        let q = self.queue.pop_front()?;
        for (_, p) in self.ts.edges_from(q) {
            if self.seen.insert(p) {
                self.queue.push_back(p);
            }
        }
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    #[test_log::test]
    fn reachable_states() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, 0, 1), (0, 1, 0), (1, 0, 2), (1, 1, 0), (2, 0, 2), (3, 0, 0)])
            .with_initial([0])
            .with_final([2])
            .into_nfa()
            .unwrap();

        assert_eq!(
            nfa.minimal_representatives_from([0]).collect_vec(),
            vec![(vec![], 0), (vec![0], 1), (vec![0, 0], 2)]
        );
        assert_eq!(nfa.reachable_states_from([0]).collect_vec(), vec![0, 1, 2]);
        assert_eq!(nfa.reachable_states_from([2]).collect_vec(), vec![2]);
        assert_eq!(
            nfa.reachable_states_from([3]).sorted().collect_vec(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(nfa.reachable_states_from([]).count(), 0);
    }

    #[test_log::test]
    fn representatives_prefer_smaller_symbols() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, 5, 1), (0, 2, 2), (2, 0, 1), (1, 0, 3), (2, 9, 3)])
            .into_nfa()
            .unwrap();
        let reps: Map<State, Vec<Symbol>> = nfa
            .minimal_representatives_from([0])
            .map(|(word, q)| (q, word))
            .collect();
        assert_eq!(reps[&1], vec![5]);
        assert_eq!(reps[&2], vec![2]);
        assert_eq!(reps[&3], vec![2, 9]);
    }
}
