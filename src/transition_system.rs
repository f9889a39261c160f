use crate::prelude::*;

mod delta;
pub use delta::{Delta, Move, StatePost};

mod edge;
pub use edge::{IntoTransition, Transition};

mod reachable;
pub use reachable::{MinimalRepresentative, MinimalRepresentatives, ReachableStates};

mod builder;
pub use builder::NfaBuilder;

/// A transition system is a finite collection of states, identified by the indices
/// `0..num_states`, together with outgoing transitions for each state. Everything that
/// traverses an automaton (reachability, simulation, products) is written against this
/// trait, so it works on an [`Nfa`] as well as on a bare [`Delta`].
pub trait TransitionSystem {
    /// Number of states, all states are below this value.
    fn num_states(&self) -> usize;

    /// Returns the outgoing transitions of `state`, or `None` if there are none.
    fn state_post(&self, state: State) -> Option<&StatePost>;

    /// Iterates over all `(symbol, target)` pairs of transitions leaving `state`.
    fn edges_from(&self, state: State) -> impl Iterator<Item = (Symbol, State)> + '_ {
        self.state_post(state)
            .into_iter()
            .flat_map(|post| post.edges())
    }

    /// All states reached from `state` on `symbol`.
    fn successors(&self, state: State, symbol: Symbol) -> Option<&OrderedSet<State>> {
        self.state_post(state)?.get(symbol).map(|mv| &mv.targets)
    }

    /// Computes the union of the successors on `symbol` over all states in `states`.
    fn post<'a, I>(&self, states: I, symbol: Symbol) -> OrderedSet<State>
    where
        I: IntoIterator<Item = &'a State>,
    {
        states
            .into_iter()
            .filter_map(|&q| self.successors(q, symbol))
            .flatten()
            .copied()
            .collect()
    }

    /// Runs `word` from the set of states `origins` and returns the set of states that is
    /// reached after consuming all symbols. Returns the empty set as soon as no state is
    /// left.
    fn run_from<'a, I, W>(&self, origins: I, word: W) -> OrderedSet<State>
    where
        I: IntoIterator<Item = &'a State>,
        W: IntoIterator<Item = Symbol>,
    {
        let mut current: OrderedSet<State> = origins.into_iter().copied().collect();
        for symbol in word {
            if current.is_empty() {
                break;
            }
            current = self.post(&current, symbol);
        }
        current
    }

    /// Returns an iterator over the states that can be reached from one of the given
    /// `origins`, including the origins themselves.
    fn reachable_states_from<I>(&self, origins: I) -> ReachableStates<'_, Self>
    where
        I: IntoIterator<Item = State>,
        Self: Sized,
    {
        ReachableStates::new(self, origins)
    }

    /// Returns an iterator over the minimal representatives of all states that can be
    /// reached from one of the `origins`, see [`MinimalRepresentatives`].
    fn minimal_representatives_from<I>(&self, origins: I) -> MinimalRepresentatives<'_, Self>
    where
        I: IntoIterator<Item = State>,
        Self: Sized,
    {
        MinimalRepresentatives::new(self, origins)
    }
}

impl TransitionSystem for Delta {
    fn num_states(&self) -> usize {
        self.num_posts()
    }

    fn state_post(&self, state: State) -> Option<&StatePost> {
        Delta::state_post(self, state)
    }
}

impl<Ts: TransitionSystem> TransitionSystem for &Ts {
    fn num_states(&self) -> usize {
        Ts::num_states(self)
    }

    fn state_post(&self, state: State) -> Option<&StatePost> {
        Ts::state_post(self, state)
    }
}
