use bit_set::BitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::prelude::*;

impl Nfa {
    /// Computes the maximal direct simulation of `self`. The returned vector holds, for
    /// every state `p`, the set of states `q` that simulate `p`. That is the case if `q` is
    /// final whenever `p` is and every transition `(p, a, p')` can be answered by some
    /// transition `(q, a, q')` such that `q'` simulates `p'`. If `q` simulates `p`, then `q`
    /// accepts every word that `p` accepts.
    pub fn direct_simulation(&self) -> Vec<BitSet> {
        let mut simulators: Vec<BitSet> = self
            .states()
            .map(|p| {
                self.states()
                    .filter(|&q| !self.is_final(p) || self.is_final(q))
                    .collect()
            })
            .collect();

        let mut rounds = 0;
        loop {
            rounds += 1;
            let mut changed = false;
            for p in self.states() {
                let refuted = simulators[p]
                    .iter()
                    .filter(|&q| !self.answers_all_moves(p, q, &simulators))
                    .collect_vec();
                for q in refuted {
                    trace!("{q} does not simulate {p}");
                    simulators[p].remove(q);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        trace!("simulation stabilized after {rounds} rounds");
        simulators
    }

    fn answers_all_moves(&self, p: State, q: State, simulators: &[BitSet]) -> bool {
        self.edges_from(p).all(|(symbol, p_next)| {
            self.successors(q, symbol).is_some_and(|targets| {
                targets
                    .iter()
                    .any(|&q_next| simulators[p_next].contains(q_next))
            })
        })
    }

    /// Reduces the number of states and transitions of `self` using its direct simulation,
    /// see [`Nfa::direct_simulation`]. States that simulate each other are merged into one,
    /// the resulting states are numbered by the smallest state they contain. Among the
    /// targets of a transition and among the initial states, a state is dropped if another
    /// one strictly simulates it. The language does not change.
    pub fn reduce(&self) -> Nfa {
        let simulators = self.direct_simulation();
        let equivalent =
            |p: State, q: State| simulators[p].contains(q) && simulators[q].contains(p);

        let mut class_of = vec![0; self.num_states()];
        let mut representatives: Vec<State> = vec![];
        for q in self.states() {
            match representatives.iter().position(|&r| equivalent(r, q)) {
                Some(class) => class_of[q] = class,
                None => {
                    class_of[q] = representatives.len();
                    representatives.push(q);
                }
            }
        }

        let strictly_simulated = |small: State, large: State| {
            let (small, large) = (representatives[small], representatives[large]);
            simulators[small].contains(large) && !simulators[large].contains(small)
        };
        let maximal = |classes: &OrderedSet<State>| -> Vec<State> {
            classes
                .iter()
                .copied()
                .filter(|&c| !classes.iter().any(|&d| strictly_simulated(c, d)))
                .collect()
        };

        let mut moves: Vec<OrderedMap<Symbol, OrderedSet<State>>> =
            vec![OrderedMap::new(); representatives.len()];
        for t in self.transitions() {
            moves[class_of[t.source]]
                .entry(t.symbol)
                .or_default()
                .insert(class_of[t.target]);
        }
        let mut delta = Delta::with_states(representatives.len());
        for (source, post) in moves.iter().enumerate() {
            for (&symbol, targets) in post {
                for target in maximal(targets) {
                    delta.insert(source, symbol, target);
                }
            }
        }

        let initial: OrderedSet<State> =
            self.initial_states().iter().map(|&q| class_of[q]).collect();
        let initial = maximal(&initial).into_iter().collect();
        let finals = self.final_states().iter().map(|&q| class_of[q]).collect();

        let reduced = Nfa::from_parts(representatives.len(), initial, finals, delta);
        debug!(
            "reduced automaton with {} states and {} transitions to {} states and {} transitions",
            self.num_states(),
            self.num_transitions(),
            reduced.num_states(),
            reduced.num_transitions()
        );
        reduced
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::*;

    #[test_log::test]
    fn simulation_of_branches() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, 0, 1), (0, 0, 2), (1, 1, 3), (2, 1, 3), (2, 2, 3)])
            .with_initial([0])
            .with_final([3])
            .into_nfa()
            .unwrap();
        let simulators = nfa.direct_simulation();
        assert_eq!(simulators[1].iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(simulators[2].iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(simulators[3].iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(simulators[0].iter().collect::<Vec<_>>(), vec![0]);

        let reduced = nfa.reduce();
        assert_eq!(reduced.num_states(), 4);
        assert!(!reduced.has_transition(0, 0, 1));
        assert!(reduced.has_transition(0, 0, 2));
        assert_eq!(reduced.num_transitions(), 4);
        assert!(reduced.are_equivalent(&nfa));
    }

    #[test_log::test]
    fn equivalent_states_are_merged() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, 0, 1), (0, 0, 2), (1, 1, 3), (2, 1, 3)])
            .with_initial([0])
            .with_final([3])
            .into_nfa()
            .unwrap();
        let reduced = nfa.reduce();
        assert_eq!(reduced.num_states(), 3);
        assert!(reduced.is_deterministic());
        assert!(reduced.accepts([0, 1]));
        assert!(!reduced.accepts([0]));
        assert!(reduced.are_equivalent(&nfa));
    }

    #[test_log::test]
    fn reduction_keeps_the_language() {
        for nfa in [
            fa_odd_ones(),
            fa_even_ones(),
            nfa_two_states_uni(),
            divisible_by(3),
            dfa_one_state_empty(),
        ] {
            let reduced = nfa.reduce();
            assert!(reduced.num_states() <= nfa.num_states());
            for word in all_words(2, 6) {
                assert_eq!(
                    reduced.accepts(word.iter().copied()),
                    nfa.accepts(word.iter().copied()),
                    "{}",
                    word.show()
                );
            }
        }
        assert_eq!(Nfa::new(0).reduce().num_states(), 0);
    }
}
