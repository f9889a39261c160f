use fastrand::Rng;
use tracing::debug;

use crate::prelude::*;

/// Generates a random automaton with `size` states over the symbols `0..symbols`. Every
/// possible transition `(p, a, q)` is inserted independently with probability `density`,
/// every state is final with probability one half and state `0` is always initial, all
/// other states are initial with a small probability.
pub fn generate_random_nfa(rng: &mut Rng, symbols: usize, size: usize, density: f64) -> Nfa {
    let mut delta = Delta::with_states(size);
    for source in 0..size {
        for symbol in 0..symbols {
            for target in 0..size {
                if rng.f64() < density {
                    delta.insert(source, symbol, target);
                }
            }
        }
    }
    let initial = (0..size).filter(|&q| q == 0 || rng.f64() < 0.1).collect();
    let finals = (0..size).filter(|_| rng.bool()).collect();

    let nfa = Nfa::from_parts(size, initial, finals, delta);
    debug!(
        "generated random automaton with {size} states and {} transitions",
        nfa.num_transitions()
    );
    nfa
}

/// Uses a sprout-like algorithm to generate a random deterministic and complete automaton
/// over the symbols `0..symbols`. `probability` determines how likely it is that a back
/// edge is taken instead of creating a new state. The algorithm is as follows:
/// 1. Start with a single state, which is initial.
/// 2. For each symbol, go through the existing states in order and with probability
///    `probability` add an edge to that state.
/// 3. If no such edge was added, we insert an edge to a new state. Once `max_size` states
///    exist, a uniformly drawn existing state is used instead.
/// 4. Repeat until all states and symbols have been treated.
///
/// The result has at least one and at most `max_size` states, all of them reachable from
/// the initial one, and each is final with probability one half.
pub fn generate_random_dfa(
    rng: &mut Rng,
    symbols: usize,
    probability: f64,
    max_size: usize,
) -> Nfa {
    let max_size = max_size.max(1);
    let mut delta = Delta::with_states(1);
    let mut size = 1;
    let mut current = 0;

    while current < size {
        'symbols: for symbol in 0..symbols {
            for target in 0..=current {
                if rng.f64() < probability {
                    delta.insert(current, symbol, target);
                    continue 'symbols;
                }
            }
            if size < max_size {
                // no target was picked so we sprout a new state
                delta.insert(current, symbol, size);
                size += 1;
            } else {
                delta.insert(current, symbol, rng.usize(..size));
            }
        }
        current += 1;
    }

    let finals = (0..size).filter(|_| rng.bool()).collect();
    Nfa::from_parts(size, OrderedSet::from([0]), finals, delta)
}

/// Generates a random word over the symbols `0..symbols`, its length is drawn uniformly from
/// `min_len..=max_len`. If `max_len` is smaller than `min_len`, every word has length
/// `min_len`. Without symbols the only word is the empty one.
pub fn generate_random_word(
    rng: &mut Rng,
    symbols: usize,
    min_len: usize,
    max_len: usize,
) -> Vec<Symbol> {
    if symbols == 0 {
        return vec![];
    }
    let length = rng.usize(min_len..=max_len.max(min_len));
    (0..length).map(|_| rng.usize(..symbols)).collect()
}

/// Generates `number` random words, see [`generate_random_word`].
pub fn generate_random_words(
    rng: &mut Rng,
    symbols: usize,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> Vec<Vec<Symbol>> {
    (0..number)
        .map(|_| generate_random_word(rng, symbols, min_len, max_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;

    use super::*;
    use crate::tests::all_words;

    const SEEDS: u64 = 40;

    /// Pairs of small random automata over `{0, 1}` for every seed.
    fn random_pairs() -> impl Iterator<Item = (Nfa, Nfa)> {
        (0..SEEDS).map(|seed| {
            let mut rng = Rng::with_seed(seed);
            let lhs_size = rng.usize(1..=5);
            let rhs_size = rng.usize(1..=5);
            (
                generate_random_nfa(&mut rng, 2, lhs_size, 0.3),
                generate_random_nfa(&mut rng, 2, rhs_size, 0.3),
            )
        })
    }

    fn words() -> Vec<Vec<Symbol>> {
        all_words(2, 6)
    }

    #[test_log::test]
    fn generated_automata_are_well_formed() {
        let mut rng = Rng::with_seed(7);
        let nfa = generate_random_nfa(&mut rng, 3, 6, 0.2);
        assert_eq!(nfa.num_states(), 6);
        assert!(nfa.is_initial(0));
        assert!(nfa.used_symbols().iter().all(|&sym| sym < 3));

        let dfa = generate_random_dfa(&mut rng, 2, 0.5, 50);
        assert!(dfa.is_deterministic());
        assert!(dfa.is_complete([0, 1]));
        assert_eq!(dfa.reachable_states().len(), dfa.num_states());

        let words = generate_random_words(&mut rng, 2, 1, 4, 10);
        assert_eq!(words.len(), 10);
        assert!(words
            .iter()
            .all(|w| (1..=4).contains(&w.len()) && w.iter().all(|&sym| sym < 2)));
        assert!(generate_random_word(&mut rng, 0, 3, 3).is_empty());
    }

    #[test_log::test]
    fn degenerate_generator_arguments() {
        let mut rng = Rng::with_seed(3);
        for probability in [0.0, -1.0] {
            let dfa = generate_random_dfa(&mut rng, 2, probability, 5);
            assert_eq!(dfa.num_states(), 5);
            assert!(dfa.is_deterministic());
            assert!(dfa.is_complete([0, 1]));
        }
        assert_eq!(generate_random_dfa(&mut rng, 3, 0.0, 0).num_states(), 1);
        assert_eq!(generate_random_dfa(&mut rng, 0, 0.0, 5).num_states(), 1);

        assert_eq!(generate_random_word(&mut rng, 2, 4, 1).len(), 4);
        assert!(generate_random_words(&mut rng, 2, 3, 0, 5)
            .iter()
            .all(|w| w.len() == 3));
    }

    #[test_log::test]
    fn determinization_preserves_language() {
        for (nfa, _) in random_pairs() {
            let dfa = nfa.determinize();
            assert!(dfa.is_deterministic());
            for word in words() {
                assert_eq!(
                    nfa.accepts(word.iter().copied()),
                    dfa.accepts(word.iter().copied()),
                    "{nfa:?}\n{}",
                    word.show()
                );
            }
            assert!(nfa.are_equivalent(&dfa));
        }
    }

    #[test_log::test]
    fn product_is_conjunction_and_union_is_disjunction() {
        for (lhs, rhs) in random_pairs() {
            let product = lhs.intersection(&rhs);
            let union = lhs.union(&rhs);
            for word in words() {
                let left = lhs.accepts(word.iter().copied());
                let right = rhs.accepts(word.iter().copied());
                assert_eq!(product.accepts(word.iter().copied()), left && right);
                assert_eq!(union.accepts(word.iter().copied()), left || right);
            }
            assert!(product.is_included(&lhs));
            assert!(rhs.is_included(&union));
        }
    }

    #[test_log::test]
    fn emptiness_agrees_with_witnesses() {
        for (lhs, rhs) in random_pairs() {
            let product = lhs.intersection(&rhs);
            for nfa in [lhs, rhs, product] {
                let witness = nfa.accepted_word();
                assert_eq!(nfa.is_lang_empty(), witness.is_none());
                if let Some(word) = &witness {
                    assert!(nfa.accepts(word.iter().copied()));
                    assert!(word.len() < nfa.num_states());
                }
                let found = words().into_iter().any(|w| nfa.accepts(w));
                assert_eq!(found, witness.is_some_and(|w| w.len() <= 6));
            }
        }
    }

    #[test_log::test]
    fn complement_concatenation_and_revert() {
        let alphabet = EnumAlphabet::from_iter([0, 1]);
        for (lhs, rhs) in random_pairs() {
            let complement = lhs.complement(&alphabet);
            let concatenation = lhs.concatenate(&rhs);
            let reverted = lhs.revert();
            for word in all_words(2, 5) {
                let accepted = lhs.accepts(word.iter().copied());
                assert_ne!(complement.accepts(word.iter().copied()), accepted);
                assert_eq!(reverted.accepts(word.iter().rev().copied()), accepted);

                let split = (0..=word.len()).any(|i| {
                    lhs.accepts(word[..i].iter().copied())
                        && rhs.accepts(word[i..].iter().copied())
                });
                assert_eq!(concatenation.accepts(word.iter().copied()), split);
            }
        }
    }

    #[test_log::test]
    fn trimming_preserves_language() {
        for (nfa, _) in random_pairs() {
            let mut trimmed = nfa.clone();
            let renaming = trimmed.trim();
            assert_eq!(renaming.len(), trimmed.num_states());
            assert_eq!(trimmed.useful_states().len(), trimmed.num_states());
            for word in words() {
                assert_eq!(
                    trimmed.accepts(word.iter().copied()),
                    nfa.accepts(word.iter().copied())
                );
            }
        }
    }

    #[test_log::test]
    fn reduction_preserves_language() {
        for (nfa, _) in random_pairs() {
            let reduced = nfa.reduce();
            assert!(reduced.num_states() <= nfa.num_states());
            for word in words() {
                assert_eq!(
                    reduced.accepts(word.iter().copied()),
                    nfa.accepts(word.iter().copied()),
                    "{nfa:?}\n{}",
                    word.show()
                );
            }
        }
    }

    #[test_log::test]
    fn noodles_exist_exactly_for_solvable_equations() {
        for (seed, (lhs, rhs)) in random_pairs().enumerate() {
            let mut rng = Rng::with_seed(seed as u64 + SEEDS);
            let right = generate_random_nfa(&mut rng, 2, 4, 0.4);
            let left = [lhs, rhs];
            let solvable = !left[0].concatenate(&left[1]).intersection(&right).is_lang_empty();
            for reduction in [None, Some(Reduction::Bidirectional)] {
                let noodles = Nfa::noodlify_for_equation(&left, &right, false, reduction);
                assert_eq!(!noodles.is_empty(), solvable, "seed {seed}");
                for noodle in &noodles {
                    assert_eq!(noodle.len(), 2);
                    assert!(noodle.iter().all(|segment| !segment.is_lang_empty()));
                }
            }
        }
    }
}
