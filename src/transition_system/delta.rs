use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::prelude::*;

/// All targets that can be reached from some state on one particular symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    /// The symbol that labels the move.
    pub symbol: Symbol,
    /// The (nonempty) set of states that are reached.
    pub targets: OrderedSet<State>,
}

impl Move {
    fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            targets: OrderedSet::new(),
        }
    }
}

/// The outgoing transitions of a single state. Moves are stored in a vector that is kept
/// sorted by symbol, so lookups are a binary search and iteration is proportional to the
/// out-degree of the state, never to the size of the alphabet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatePost {
    moves: Vec<Move>,
}

impl StatePost {
    fn position(&self, symbol: Symbol) -> Result<usize, usize> {
        self.moves.binary_search_by(|mv| mv.symbol.cmp(&symbol))
    }

    /// Returns the move on `symbol` if it exists.
    pub fn get(&self, symbol: Symbol) -> Option<&Move> {
        self.position(symbol).ok().map(|pos| &self.moves[pos])
    }

    /// Inserts `target` into the move on `symbol`, returns `true` if it was not present.
    pub fn insert(&mut self, symbol: Symbol, target: State) -> bool {
        let pos = match self.position(symbol) {
            Ok(pos) => pos,
            Err(pos) => {
                self.moves.insert(pos, Move::new(symbol));
                pos
            }
        };
        self.moves[pos].targets.insert(target)
    }

    /// Removes `target` from the move on `symbol`. Moves that become empty are dropped.
    pub fn remove(&mut self, symbol: Symbol, target: State) -> bool {
        let Ok(pos) = self.position(symbol) else {
            return false;
        };
        let removed = self.moves[pos].targets.remove(&target);
        if self.moves[pos].targets.is_empty() {
            self.moves.remove(pos);
        }
        removed
    }

    /// The moves of this state in ascending order of their symbols.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Iterates over all `(symbol, target)` pairs leaving this state.
    pub fn edges(&self) -> impl Iterator<Item = (Symbol, State)> + '_ {
        self.moves
            .iter()
            .flat_map(|mv| mv.targets.iter().map(move |&q| (mv.symbol, q)))
    }

    /// Returns `true` if no transition leaves the state.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of transitions leaving the state.
    pub fn len(&self) -> usize {
        self.moves.iter().map(|mv| mv.targets.len()).sum()
    }
}

/// The transition relation of an automaton, a set of `(source, symbol, target)` triples that
/// is indexed by the source state.
///
/// Two relations are equal if they contain the same triples, regardless of how many source
/// states storage has been allocated for.
#[derive(Clone, Debug, Default)]
pub struct Delta {
    posts: Vec<StatePost>,
}

impl Delta {
    /// Creates an empty transition relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty transition relation with room for `num_states` source states.
    pub fn with_states(num_states: usize) -> Self {
        Self {
            posts: vec![StatePost::default(); num_states],
        }
    }

    /// Makes sure there is an entry for every state below `num_states`.
    pub fn grow(&mut self, num_states: usize) {
        if num_states > self.posts.len() {
            self.posts.resize_with(num_states, StatePost::default);
        }
    }

    /// Adds the transition `(source, symbol, target)`. Returns `false` if it was already
    /// present, in which case nothing changes.
    pub fn insert(&mut self, source: State, symbol: Symbol, target: State) -> bool {
        self.grow(source + 1);
        self.posts[source].insert(symbol, target)
    }

    /// Removes the transition `(source, symbol, target)`, returning whether it was present.
    pub fn remove(&mut self, source: State, symbol: Symbol, target: State) -> bool {
        self.posts
            .get_mut(source)
            .map(|post| post.remove(symbol, target))
            .unwrap_or(false)
    }

    /// Returns `true` if the transition `(source, symbol, target)` exists.
    pub fn contains(&self, source: State, symbol: Symbol, target: State) -> bool {
        self.successors(source, symbol)
            .is_some_and(|targets| targets.contains(&target))
    }

    /// Gives the outgoing transitions of `source`. States without any outgoing transition
    /// yield an empty [`StatePost`].
    pub fn state_post(&self, source: State) -> Option<&StatePost> {
        self.posts.get(source)
    }

    /// All targets that are reached from `source` by reading `symbol`. Returns `None` if
    /// there are no such targets.
    pub fn successors(&self, source: State, symbol: Symbol) -> Option<&OrderedSet<State>> {
        self.posts
            .get(source)?
            .get(symbol)
            .map(|mv| &mv.targets)
    }

    /// Iterates over all `(symbol, target)` pairs of transitions leaving `source`.
    pub fn outgoing(&self, source: State) -> impl Iterator<Item = (Symbol, State)> + '_ {
        self.posts.get(source).into_iter().flat_map(|post| post.edges())
    }

    /// Iterates over all transitions, ordered by source, then symbol, then target.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.posts.iter().enumerate().flat_map(|(source, post)| {
            post.edges()
                .map(move |(symbol, target)| Transition::new(source, symbol, target))
        })
    }

    /// Total number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.posts.iter().map(StatePost::len).sum()
    }

    /// Returns `true` if there are no transitions at all.
    pub fn is_empty(&self) -> bool {
        self.posts.iter().all(StatePost::is_empty)
    }

    /// The set of all symbols that appear on at least one transition.
    pub fn used_symbols(&self) -> OrderedSet<Symbol> {
        self.posts
            .iter()
            .flat_map(|post| post.moves().iter().map(|mv| mv.symbol))
            .collect()
    }

    /// Builds the relation that contains `(target, symbol, source)` for every transition
    /// `(source, symbol, target)` of `self`.
    pub fn reversed(&self) -> Delta {
        let mut reversed = Delta::with_states(self.posts.len());
        for t in self.transitions() {
            reversed.insert(t.target, t.symbol, t.source);
        }
        reversed
    }

    /// Builds a new relation in which every state `q` is replaced by `q + offset`.
    pub(crate) fn shifted(&self, offset: usize) -> Delta {
        let posts: Vec<StatePost> = self
            .posts
            .iter()
            .map(|post| StatePost {
                moves: post
                    .moves
                    .iter()
                    .map(|mv| Move {
                        symbol: mv.symbol,
                        targets: mv.targets.iter().map(|q| q + offset).collect(),
                    })
                    .collect(),
            })
            .collect();
        let mut shifted = Delta::with_states(offset);
        shifted.posts.extend(posts);
        shifted
    }

    /// Adds all transitions of `other` to `self`.
    pub(crate) fn merge(&mut self, other: &Delta) {
        for t in other.transitions() {
            self.insert(t.source, t.symbol, t.target);
        }
    }

    /// Number of source states for which storage has been allocated.
    pub(crate) fn num_posts(&self) -> usize {
        self.posts.len()
    }
}

impl PartialEq for Delta {
    fn eq(&self, other: &Self) -> bool {
        self.transitions().eq(other.transitions())
    }
}

impl Eq for Delta {}

impl Hash for Delta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for t in self.transitions() {
            t.hash(state);
        }
    }
}

impl Show for Delta {
    fn show(&self) -> String {
        format!(
            "{{{}}}",
            self.transitions().map(|t| t.show()).join(", ")
        )
    }
}
