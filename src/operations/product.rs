use std::collections::VecDeque;

use itertools::{EitherOrBoth, Itertools};
use tracing::{debug, trace};

use crate::prelude::*;

/// Identifies a state of a product automaton by the pair of states it consists of.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProductIndex(pub State, pub State);

impl Show for ProductIndex {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl Nfa {
    /// Builds the product of `self` and `other`, an automaton that accepts precisely the
    /// words which are accepted by both. See [`Nfa::intersection_with_pairs`] for details.
    pub fn intersection(&self, other: &Nfa) -> Nfa {
        self.intersection_with_pairs(other).0
    }

    /// Builds the product of `self` and `other` and additionally returns which pair of
    /// states each product state corresponds to.
    ///
    /// Only pairs that are reachable from a pair of initial states are created. A pair
    /// `(p, q)` is final if both `p` and `q` are final and there is a transition from
    /// `(p, q)` to `(p', q')` on `a` if `p` reaches `p'` on `a` and `q` reaches `q'` on `a`.
    /// Neither input is modified.
    pub fn intersection_with_pairs(&self, other: &Nfa) -> (Nfa, Map<ProductIndex, State>) {
        self.product(other, None)
    }

    /// Builds the product of `self` and `other` in which `epsilon` is not synchronized. A
    /// transition `(p, epsilon, p')` of `self` yields a transition from `(p, q)` to `(p', q)`
    /// on `epsilon` for every `q`, all other symbols are handled as in [`Nfa::intersection`].
    ///
    /// If `epsilon` separates the parts of a concatenation, see
    /// [`Nfa::concatenate_over_epsilon`], the product accepts `u epsilon v` whenever `self`
    /// accepts it and `other` accepts `uv`.
    pub fn intersection_over_epsilon(&self, other: &Nfa, epsilon: Symbol) -> Nfa {
        self.product(other, Some(epsilon)).0
    }

    fn product(&self, other: &Nfa, epsilon: Option<Symbol>) -> (Nfa, Map<ProductIndex, State>) {
        let mut pairs: Map<ProductIndex, State> = Map::default();
        let mut queue = VecDeque::new();
        let mut initial = OrderedSet::new();
        let mut finals = OrderedSet::new();
        let mut delta = Delta::new();

        let discover = |pair: ProductIndex,
                            pairs: &mut Map<ProductIndex, State>,
                            queue: &mut VecDeque<ProductIndex>,
                            finals: &mut OrderedSet<State>| {
            if let Some(&id) = pairs.get(&pair) {
                return id;
            }
            let id = pairs.len();
            pairs.insert(pair, id);
            if self.is_final(pair.0) && other.is_final(pair.1) {
                finals.insert(id);
            }
            trace!("discovered product state {id} = {}", pair.show());
            queue.push_back(pair);
            id
        };

        for (&p, &q) in self
            .initial_states()
            .iter()
            .cartesian_product(other.initial_states().iter())
        {
            let id = discover(ProductIndex(p, q), &mut pairs, &mut queue, &mut finals);
            initial.insert(id);
        }

        while let Some(pair) = queue.pop_front() {
            let source = pairs[&pair];
            let left = self.state_post(pair.0).map_or(&[][..], StatePost::moves);
            let right = other.state_post(pair.1).map_or(&[][..], StatePost::moves);
            // moves are sorted by symbol on both sides, so a merge finds the common symbols
            for matched in left
                .iter()
                .merge_join_by(right.iter(), |l, r| l.symbol.cmp(&r.symbol))
            {
                let (l, r) = match matched {
                    EitherOrBoth::Both(l, r) => (l, Some(r)),
                    EitherOrBoth::Left(l) => (l, None),
                    EitherOrBoth::Right(_) => continue,
                };
                if Some(l.symbol) == epsilon {
                    for &p in &l.targets {
                        let target = discover(
                            ProductIndex(p, pair.1),
                            &mut pairs,
                            &mut queue,
                            &mut finals,
                        );
                        delta.insert(source, l.symbol, target);
                    }
                } else if let Some(r) = r {
                    for (&p, &q) in l.targets.iter().cartesian_product(r.targets.iter()) {
                        let target =
                            discover(ProductIndex(p, q), &mut pairs, &mut queue, &mut finals);
                        delta.insert(source, l.symbol, target);
                    }
                }
            }
        }

        debug!(
            "product of automata with {} and {} states has {} reachable states",
            self.num_states(),
            other.num_states(),
            pairs.len()
        );
        (Nfa::from_parts(pairs.len(), initial, finals, delta), pairs)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::*;

    #[test_log::test]
    fn product_of_parities() {
        let odd = fa_odd_ones();
        let even = fa_even_ones();

        let both = odd.intersection(&even);
        assert!(both.is_lang_empty());

        let odd_and_two_states = odd.intersection(&nfa_two_states_uni());
        for word in all_words(2, 6) {
            let expected = odd.accepts(word.iter().copied())
                && nfa_two_states_uni().accepts(word.iter().copied());
            assert_eq!(odd_and_two_states.accepts(word.iter().copied()), expected);
        }
        assert_eq!(odd_and_two_states.accepted_word(), Some(vec![0, 1]));
    }

    #[test_log::test]
    fn product_with_divisibility() {
        let by_two = divisible_by(2);
        let by_four = divisible_by(4);
        let product = by_two.intersection(&by_four);
        for ones in 1..=12 {
            assert_eq!(
                product.accepts(word_with_ones(ones)),
                ones % 4 == 0,
                "{ones} ones"
            );
        }
    }

    #[test_log::test]
    fn only_reachable_pairs_are_built() {
        let (product, pairs) = divisible_by(2).intersection_with_pairs(&divisible_by(2));
        assert_eq!(product.num_states(), 3);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[&ProductIndex(0, 0)], 0);
        assert!(pairs.contains_key(&ProductIndex(2, 2)));
        assert!(!pairs.contains_key(&ProductIndex(1, 2)));
        assert!(product.is_final(pairs[&ProductIndex(2, 2)]));
        assert!(product.is_initial(0));
    }

    #[test_log::test]
    fn product_without_initial_states() {
        let mut lhs = dfa_one_state_uni();
        lhs.remove_initial_state(0);
        let product = lhs.intersection(&dfa_one_state_uni());
        assert_eq!(product.num_states(), 0);
        assert!(product.is_lang_empty());
    }

    #[test_log::test]
    fn epsilon_moves_of_left_side_are_kept() {
        let epsilon = 2;
        let lhs = NfaBuilder::default()
            .with_transitions([(0, 0, 1), (1, epsilon, 2), (2, 1, 3)])
            .with_initial([0])
            .with_final([3])
            .into_nfa()
            .unwrap();
        let rhs = NfaBuilder::default()
            .with_transitions([(0, 0, 1), (1, 1, 2)])
            .with_initial([0])
            .with_final([2])
            .into_nfa()
            .unwrap();

        let product = lhs.intersection_over_epsilon(&rhs, epsilon);
        assert_eq!(product.num_states(), 4);
        assert!(product.accepts([0, epsilon, 1]));
        assert!(!product.accepts([0, 1]));
        assert_eq!(product.accepted_word(), Some(vec![0, epsilon, 1]));

        assert!(lhs.intersection(&rhs).is_lang_empty());
        assert_eq!(
            lhs.intersection_over_epsilon(&rhs, 7),
            lhs.intersection(&rhs)
        );
    }

    #[test_log::test]
    fn inputs_are_not_modified() {
        let lhs = nfa_two_states_uni();
        let rhs = divisible_by(2);
        let (lhs_copy, rhs_copy) = (lhs.clone(), rhs.clone());
        let _ = lhs.intersection(&rhs);
        assert_eq!(lhs, lhs_copy);
        assert_eq!(rhs, rhs_copy);
    }
}
