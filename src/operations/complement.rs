use tracing::debug;

use crate::prelude::*;

impl Nfa {
    /// Builds an automaton that accepts exactly the words over `alphabet` which `self`
    /// rejects. Symbols that occur on transitions of `self` are treated as part of the
    /// alphabet, even if `alphabet` does not contain them.
    ///
    /// The automaton is determinized and completed by a sink state, then final and
    /// non-final states are swapped. The result is therefore deterministic and complete.
    pub fn complement<A: Alphabet>(&self, alphabet: &A) -> Nfa {
        let mut symbols = alphabet.symbols();
        symbols.extend(self.used_symbols());

        let mut dfa = if self.initial_states().is_empty() {
            let mut delta = Delta::with_states(1);
            for &symbol in &symbols {
                delta.insert(0, symbol, 0);
            }
            Nfa::from_parts(1, OrderedSet::from([0]), OrderedSet::new(), delta)
        } else {
            self.determinize()
        };
        dfa.make_complete(symbols.iter().copied());

        let finals = dfa.states().filter(|&q| !dfa.is_final(q)).collect();
        debug!(
            "complement over {} symbols has {} states",
            symbols.len(),
            dfa.num_states()
        );
        Nfa::from_parts(
            dfa.num_states(),
            dfa.initial_states().clone(),
            finals,
            dfa.delta().clone(),
        )
    }

    /// Returns `true` if every word over `alphabet` (together with the symbols used by
    /// `self`) is accepted.
    pub fn is_universal<A: Alphabet>(&self, alphabet: &A) -> bool {
        self.complement(alphabet).is_lang_empty()
    }

    /// Returns a shortest word that is accepted by `self` but not by `other`, or `None` if
    /// the language of `self` is contained in that of `other`.
    pub fn inclusion_counterexample(&self, other: &Nfa) -> Option<Vec<Symbol>> {
        // a word using a symbol that `self` never reads is rejected by `self` anyway
        let alphabet = EnumAlphabet::from_nfas([self, other]);
        self.intersection(&other.complement(&alphabet))
            .accepted_word()
    }

    /// Returns `true` if every word accepted by `self` is also accepted by `other`.
    pub fn is_included(&self, other: &Nfa) -> bool {
        self.inclusion_counterexample(other).is_none()
    }

    /// Returns `true` if `self` and `other` accept the same language.
    pub fn are_equivalent(&self, other: &Nfa) -> bool {
        self.is_included(other) && other.is_included(self)
    }
}
