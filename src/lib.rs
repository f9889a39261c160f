//! Library for working with nondeterministic finite automata (NFA) over integer symbols.
//!
//! An automaton ([`Nfa`]) consists of a number of states, which are simply the integers in
//! `0..num_states`, a transition relation ([`transition_system::Delta`]) as well as a set of
//! initial and a set of final (accepting) states. Every transition consumes exactly one
//! symbol, there are no epsilon transitions. Operations that need to mark borders inside a
//! word, such as [`Nfa::concatenate_over_epsilon`] and [`Nfa::noodlify`], use a symbol that
//! does not occur otherwise instead. Nondeterminism is part of the data model: a
//! state may have any number of successors on the same symbol, which means running a word
//! produces a *set* of reached states.
//!
//! Automata are built incrementally, either through the mutating methods on [`Nfa`] or
//! through an [`transition_system::NfaBuilder`]. All methods that take a state index verify
//! that the state exists and fail with an [`OutOfRangeError`] otherwise, leaving the
//! automaton untouched. Symbols are unrestricted, they can be used directly as raw integers
//! or be obtained from an [`alphabet::OnTheFlyAlphabet`], which assigns codes to string
//! labels on demand.
//!
//! Once an automaton is built, language queries such as [`Nfa::accepts`] and
//! [`Nfa::is_lang_empty`] never modify it, and operations combining automata (for example
//! [`Nfa::intersection`], [`Nfa::union`] or [`Nfa::determinize`]) borrow their inputs and
//! return a freshly allocated result.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_nfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, EnumAlphabet, OnTheFlyAlphabet},
        automaton::Nfa,
        error::{NfaError, OutOfRangeError},
        math,
        math::{Bijection, Map, OrderedMap, OrderedSet, Set},
        operations::{
            DeterminizeOptions, Determinized, Noodle, ProductIndex, Reduction, Segmentation,
        },
        transition_system::{
            Delta, IntoTransition, MinimalRepresentatives, Move, NfaBuilder, ReachableStates,
            StatePost, Transition, TransitionSystem,
        },
        Show, State, Symbol,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Errors that are produced when constructing or transforming automata.
pub mod error;
pub use error::{NfaError, OutOfRangeError};

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// This module defines the transition relation and the traversals built on top of it.
pub mod transition_system;
pub use transition_system::TransitionSystem;

/// Defines the automaton type together with its construction API and language queries.
pub mod automaton;
pub use automaton::Nfa;

/// Operations that combine or transform automata, such as products and determinization.
pub mod operations;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// A state of an automaton is an index in `0..num_states`.
pub type State = usize;

/// Symbols are plain integers without an upper bound, see [`alphabet`] for a way of obtaining
/// them from labels.
pub type Symbol = usize;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example 0, 1, 2, ... and for a transition (0, a, 1) it should be (0, a, 1).
    /// This is mainly used for debugging purposes.
    fn show(&self) -> String;
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!("[{}]", self.iter().map(|x| x.show()).join(", "))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show> Show for math::OrderedSet<S> {
    fn show(&self) -> String {
        if self.is_empty() {
            "∅".to_string()
        } else {
            format!("{{{}}}", self.iter().map(|x| x.show()).join(", "))
        }
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// One state with a self-loop on `0` and `1` that is both initial and final.
    pub fn dfa_one_state_uni() -> Nfa {
        let mut nfa = Nfa::new(1);
        nfa.add_initial_state(0).unwrap();
        nfa.add_transition(0, 0, 0).unwrap();
        nfa.add_transition(0, 1, 0).unwrap();
        nfa.add_final_state(0).unwrap();
        nfa
    }

    /// Same as [`dfa_one_state_uni`] but without a final state.
    pub fn dfa_one_state_empty() -> Nfa {
        let mut nfa = Nfa::new(1);
        nfa.add_initial_state(0).unwrap();
        nfa.add_transition(0, 0, 0).unwrap();
        nfa.add_transition(0, 1, 0).unwrap();
        nfa
    }

    /// Two states, accepts every word over `{0, 1}` that contains at least one `0`.
    pub fn nfa_two_states_uni() -> Nfa {
        let mut nfa = Nfa::new(2);
        nfa.add_initial_state(0).unwrap();
        nfa.add_transition(0, 0, 0).unwrap();
        nfa.add_transition(0, 1, 0).unwrap();
        nfa.add_transition(0, 0, 1).unwrap();
        nfa.add_transition(1, 0, 1).unwrap();
        nfa.add_transition(1, 1, 1).unwrap();
        nfa.add_final_state(1).unwrap();
        nfa
    }

    /// Accepts the words over `{0, 1}` in which the number of `1`s is a positive multiple
    /// of `k`.
    pub fn divisible_by(k: usize) -> Nfa {
        assert!(k > 1);
        let mut nfa = Nfa::new(k + 1);
        nfa.add_initial_state(0).unwrap();
        nfa.add_transition(0, 0, 0).unwrap();
        for i in 1..=k {
            nfa.add_transition(i - 1, 1, i).unwrap();
            nfa.add_transition(i, 0, i).unwrap();
        }
        nfa.add_transition(k, 1, 1).unwrap();
        nfa.add_final_state(k).unwrap();
        nfa
    }

    /// Accepts the words with an odd number of `1`s.
    pub fn fa_odd_ones() -> Nfa {
        NfaBuilder::default()
            .with_transitions([(0, 0, 0), (0, 1, 1), (1, 1, 0), (1, 0, 1)])
            .with_initial([0])
            .with_final([1])
            .into_nfa()
            .unwrap()
    }

    /// Accepts the words with an even number of `1`s.
    pub fn fa_even_ones() -> Nfa {
        NfaBuilder::default()
            .with_transitions([(0, 0, 0), (0, 1, 1), (1, 1, 0), (1, 0, 1)])
            .with_initial([0])
            .with_final([0])
            .into_nfa()
            .unwrap()
    }

    /// The alphabet where the label `"0"` has code `0` and `"1"` has code `1`.
    pub fn binary_alphabet() -> OnTheFlyAlphabet {
        let mut alphabet = OnTheFlyAlphabet::new();
        alphabet.resolve("0");
        alphabet.resolve("1");
        alphabet
    }

    /// All words over the symbols `0..symbols` with length at most `max_len`, shortest first.
    pub fn all_words(symbols: Symbol, max_len: usize) -> Vec<Vec<Symbol>> {
        let mut words = vec![vec![]];
        let mut last = vec![vec![]];
        for _ in 0..max_len {
            let mut next = vec![];
            for word in &last {
                for sym in 0..symbols {
                    let mut extended: Vec<Symbol> = word.clone();
                    extended.push(sym);
                    next.push(extended);
                }
            }
            words.extend(next.iter().cloned());
            last = next;
        }
        words
    }

    /// A word over `{0, 1}` consisting of `ones` many `1`s, separated by `0`s.
    pub fn word_with_ones(ones: usize) -> Vec<Symbol> {
        let mut word = vec![0];
        for _ in 0..ones {
            word.extend([1, 0]);
        }
        word
    }

    #[test_log::test]
    fn fixtures_are_well_formed() {
        assert_eq!(dfa_one_state_uni().num_transitions(), 2);
        assert_eq!(nfa_two_states_uni().num_states(), 2);
        assert_eq!(divisible_by(4).num_states(), 5);
        assert_eq!(fa_odd_ones().num_states(), 2);
        assert!(fa_even_ones().is_final(0));
        assert_eq!(binary_alphabet().size(), 2);
        assert_eq!(all_words(2, 2).len(), 7);
        assert_eq!(word_with_ones(2), vec![0, 1, 0, 1, 0]);
    }

    #[test_log::test]
    fn show_formats() {
        assert_eq!(vec![0usize, 1].show(), "[0, 1]");
        assert_eq!(OrderedSet::from([2usize, 1]).show(), "{1, 2}");
        assert_eq!(OrderedSet::<usize>::new().show(), "∅");
        assert_eq!((1usize, true).show(), "(1, +)");
    }
}
