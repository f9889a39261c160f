use itertools::Itertools;

use crate::prelude::*;

/// An alphabet is a finite collection of symbols. Automata themselves are not tied to an
/// alphabet, their transitions may carry arbitrary symbols. Alphabets are needed where the
/// set of symbols matters, for example when complementing an automaton.
pub trait Alphabet {
    /// All symbols of the alphabet in ascending order.
    fn symbols(&self) -> OrderedSet<Symbol>;

    /// Number of symbols in the alphabet.
    fn size(&self) -> usize;

    /// Returns `true` if `symbol` belongs to the alphabet.
    fn contains(&self, symbol: Symbol) -> bool;
}

/// An alphabet that maps string labels to symbols and grows whenever a label is resolved for
/// the first time. Codes are handed out in the order in which labels are first seen,
/// starting at `0`. The mapping is append-only, so a label keeps its code forever and no
/// code is ever given to two labels.
///
/// # Example
/// ```
/// use automata_nfa::prelude::*;
///
/// let mut alphabet = OnTheFlyAlphabet::new();
/// assert_eq!(alphabet.resolve("a"), 0);
/// assert_eq!(alphabet.resolve("b"), 1);
/// assert_eq!(alphabet.resolve("a"), 0);
/// assert_eq!(alphabet.size(), 2);
/// assert_eq!(alphabet.label(1), Some("b"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnTheFlyAlphabet {
    table: Bijection<String, Symbol>,
    next_value: Symbol,
}

impl OnTheFlyAlphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol for `label`. Labels that were not seen before are assigned the
    /// next unused code.
    pub fn resolve<L: AsRef<str>>(&mut self, label: L) -> Symbol {
        let label = label.as_ref();
        if let Some(&symbol) = self.table.get_by_left(label) {
            return symbol;
        }
        let symbol = self.next_value;
        self.next_value += 1;
        self.table.insert(label.to_string(), symbol);
        symbol
    }

    /// Resolves every label of the given word.
    pub fn resolve_word<I, L>(&mut self, labels: I) -> Vec<Symbol>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        labels.into_iter().map(|label| self.resolve(label)).collect()
    }

    /// Looks up the symbol of `label` without inserting it.
    pub fn find(&self, label: &str) -> Option<Symbol> {
        self.table.get_by_left(label).copied()
    }

    /// Returns the label that was resolved to `symbol`.
    pub fn label(&self, symbol: Symbol) -> Option<&str> {
        self.table.get_by_right(&symbol).map(String::as_str)
    }

    /// The code that the next previously unseen label will receive.
    pub fn next_value(&self) -> Symbol {
        self.next_value
    }

    /// Returns `true` if no label has been resolved so far.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates over all pairs of label and symbol in the order in which the labels were
    /// resolved.
    pub fn labels(&self) -> impl Iterator<Item = (&str, Symbol)> + '_ {
        self.table
            .iter()
            .map(|(label, &symbol)| (label.as_str(), symbol))
            .sorted_by_key(|&(_, symbol)| symbol)
    }
}

impl Alphabet for OnTheFlyAlphabet {
    fn symbols(&self) -> OrderedSet<Symbol> {
        self.table.right_values().copied().collect()
    }

    fn size(&self) -> usize {
        self.table.len()
    }

    fn contains(&self, symbol: Symbol) -> bool {
        self.table.contains_right(&symbol)
    }
}

impl<L: AsRef<str>> FromIterator<L> for OnTheFlyAlphabet {
    fn from_iter<T: IntoIterator<Item = L>>(iter: T) -> Self {
        let mut alphabet = Self::new();
        for label in iter {
            alphabet.resolve(label);
        }
        alphabet
    }
}

impl<L: AsRef<str>> Extend<L> for OnTheFlyAlphabet {
    fn extend<T: IntoIterator<Item = L>>(&mut self, iter: T) {
        for label in iter {
            self.resolve(label);
        }
    }
}

/// An alphabet given by an explicit set of symbols, typically collected from the
/// transitions of some automata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EnumAlphabet {
    symbols: OrderedSet<Symbol>,
}

impl EnumAlphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects all symbols that are used by one of the given automata.
    pub fn from_nfas<'a, I: IntoIterator<Item = &'a Nfa>>(nfas: I) -> Self {
        let mut alphabet = Self::new();
        for nfa in nfas {
            alphabet.add_symbols_from(nfa);
        }
        alphabet
    }

    /// Adds all symbols that are used by `nfa`.
    pub fn add_symbols_from(&mut self, nfa: &Nfa) {
        self.symbols.extend(nfa.used_symbols());
    }

    /// Adds a single symbol, returns `true` if it was not yet part of the alphabet.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        self.symbols.insert(symbol)
    }

    /// Returns a symbol that is larger than every symbol of the alphabet, this can be used
    /// whenever a fresh symbol is needed.
    pub fn next_value(&self) -> Symbol {
        self.symbols.last().map_or(0, |&max| max + 1)
    }
}

impl Alphabet for EnumAlphabet {
    fn symbols(&self) -> OrderedSet<Symbol> {
        self.symbols.clone()
    }

    fn size(&self) -> usize {
        self.symbols.len()
    }

    fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl FromIterator<Symbol> for EnumAlphabet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}
