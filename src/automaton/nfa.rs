use std::{fmt::Debug, ops::Range};

use bit_set::BitSet;
use itertools::Itertools;
use tracing::trace;

use crate::prelude::*;

/// A nondeterministic finite automaton. The states are the indices `0..num_states`, they are
/// connected by a [`Delta`] and there is a set of initial and a set of final states.
///
/// The automaton is only ever changed through the explicit mutation methods below. Each of
/// them verifies that every state it is given exists and returns an [`OutOfRangeError`]
/// otherwise, in which case the automaton is left exactly as it was. Adding something that is
/// already present has no effect.
#[derive(Clone, PartialEq, Eq)]
pub struct Nfa {
    num_states: usize,
    initial: OrderedSet<State>,
    finals: OrderedSet<State>,
    delta: Delta,
}

impl Nfa {
    /// Creates an automaton with `num_states` states, no transitions and neither initial nor
    /// final states.
    pub fn new(num_states: usize) -> Self {
        Self {
            num_states,
            initial: OrderedSet::new(),
            finals: OrderedSet::new(),
            delta: Delta::with_states(num_states),
        }
    }

    /// Returns a builder, see [`NfaBuilder`].
    pub fn builder() -> NfaBuilder {
        NfaBuilder::default()
    }

    /// Assembles an automaton from parts that are known to be consistent.
    pub(crate) fn from_parts(
        num_states: usize,
        initial: OrderedSet<State>,
        finals: OrderedSet<State>,
        mut delta: Delta,
    ) -> Self {
        debug_assert!(initial.iter().chain(finals.iter()).all(|&q| q < num_states));
        debug_assert!(delta
            .transitions()
            .all(|t| t.source < num_states && t.target < num_states));
        delta.grow(num_states);
        Self {
            num_states,
            initial,
            finals,
            delta,
        }
    }

    /// Number of states of the automaton.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Iterates over all states of the automaton.
    pub fn states(&self) -> Range<State> {
        0..self.num_states
    }

    fn check(&self, state: State) -> Result<(), OutOfRangeError> {
        OutOfRangeError::check(state, self.num_states)
    }

    /// Adds a new state and returns its index.
    pub fn add_state(&mut self) -> State {
        let state = self.num_states;
        self.num_states += 1;
        self.delta.grow(self.num_states);
        state
    }

    /// Adds `count` new states, returning the range of their indices.
    pub fn add_states(&mut self, count: usize) -> Range<State> {
        let first = self.num_states;
        self.num_states += count;
        self.delta.grow(self.num_states);
        first..self.num_states
    }

    /// Marks `state` as initial.
    pub fn add_initial_state(&mut self, state: State) -> Result<(), OutOfRangeError> {
        self.check(state)?;
        self.initial.insert(state);
        Ok(())
    }

    /// Marks all given states as initial. Either all of them exist and are marked, or
    /// nothing changes.
    pub fn add_initial_states<I>(&mut self, states: I) -> Result<(), OutOfRangeError>
    where
        I: IntoIterator<Item = State>,
    {
        let states = states.into_iter().collect_vec();
        states.iter().try_for_each(|&q| self.check(q))?;
        self.initial.extend(states);
        Ok(())
    }

    /// Marks `state` as final.
    pub fn add_final_state(&mut self, state: State) -> Result<(), OutOfRangeError> {
        self.check(state)?;
        self.finals.insert(state);
        Ok(())
    }

    /// Marks all given states as final. Either all of them exist and are marked, or nothing
    /// changes.
    pub fn add_final_states<I>(&mut self, states: I) -> Result<(), OutOfRangeError>
    where
        I: IntoIterator<Item = State>,
    {
        let states = states.into_iter().collect_vec();
        states.iter().try_for_each(|&q| self.check(q))?;
        self.finals.extend(states);
        Ok(())
    }

    /// Removes `state` from the initial states, returns whether it was initial.
    pub fn remove_initial_state(&mut self, state: State) -> bool {
        self.initial.remove(&state)
    }

    /// Removes `state` from the final states, returns whether it was final.
    pub fn remove_final_state(&mut self, state: State) -> bool {
        self.finals.remove(&state)
    }

    /// Returns `true` if `state` is initial.
    pub fn is_initial(&self, state: State) -> bool {
        self.initial.contains(&state)
    }

    /// Returns `true` if `state` is final.
    pub fn is_final(&self, state: State) -> bool {
        self.finals.contains(&state)
    }

    /// The set of initial states.
    pub fn initial_states(&self) -> &OrderedSet<State> {
        &self.initial
    }

    /// The set of final states.
    pub fn final_states(&self) -> &OrderedSet<State> {
        &self.finals
    }

    /// Adds a transition from `source` to `target` on `symbol`. There is no restriction on
    /// the value of `symbol`.
    pub fn add_transition(
        &mut self,
        source: State,
        symbol: Symbol,
        target: State,
    ) -> Result<(), OutOfRangeError> {
        self.check(source)?;
        self.check(target)?;
        if self.delta.insert(source, symbol, target) {
            trace!("added transition ({source}, {symbol}, {target})");
        }
        Ok(())
    }

    /// Adds all given transitions. If one of them refers to a state that does not exist,
    /// an error is returned before any of them is added.
    pub fn add_transitions<I, T>(&mut self, transitions: I) -> Result<(), OutOfRangeError>
    where
        I: IntoIterator<Item = T>,
        T: IntoTransition,
    {
        let transitions = transitions
            .into_iter()
            .map(IntoTransition::into_transition)
            .collect_vec();
        transitions.iter().try_for_each(|t| {
            self.check(t.source)?;
            self.check(t.target)
        })?;
        for t in transitions {
            self.delta.insert(t.source, t.symbol, t.target);
        }
        Ok(())
    }

    /// Removes the given transition, returns whether it was present.
    pub fn remove_transition(&mut self, source: State, symbol: Symbol, target: State) -> bool {
        self.delta.remove(source, symbol, target)
    }

    /// Returns `true` if the transition `(source, symbol, target)` exists.
    pub fn has_transition(&self, source: State, symbol: Symbol, target: State) -> bool {
        self.delta.contains(source, symbol, target)
    }

    /// Gives access to the transition relation.
    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    /// Iterates over all transitions.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.delta.transitions()
    }

    /// Total number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.delta.num_transitions()
    }

    /// The set of symbols that label at least one transition.
    pub fn used_symbols(&self) -> OrderedSet<Symbol> {
        self.delta.used_symbols()
    }

    /// Returns `true` if there is at most one initial state and every state has at most one
    /// successor on each symbol.
    pub fn is_deterministic(&self) -> bool {
        self.initial.len() <= 1
            && self.states().all(|q| {
                self.delta
                    .state_post(q)
                    .map_or(true, |post| post.moves().iter().all(|mv| mv.targets.len() == 1))
            })
    }

    /// Returns `true` if every state has at least one transition on each of the given
    /// symbols.
    pub fn is_complete<I: IntoIterator<Item = Symbol>>(&self, symbols: I) -> bool {
        let symbols = symbols.into_iter().collect_vec();
        self.states().all(|q| {
            symbols
                .iter()
                .all(|&sym| self.delta.successors(q, sym).is_some())
        })
    }

    /// Makes the automaton complete with respect to the given symbols. If some state lacks a
    /// transition on one of them, a (non-final) sink state is added, which loops on every
    /// symbol, and all missing transitions are redirected to it. Returns the sink if one was
    /// added.
    pub fn make_complete<I: IntoIterator<Item = Symbol>>(&mut self, symbols: I) -> Option<State> {
        let symbols: OrderedSet<Symbol> = symbols.into_iter().collect();
        if self.is_complete(symbols.iter().copied()) {
            return None;
        }

        let sink = self.add_state();
        let mut present = BitSet::with_capacity(symbols.len());
        for q in self.states().collect_vec() {
            present.clear();
            for (i, &sym) in symbols.iter().enumerate() {
                if q != sink && self.delta.successors(q, sym).is_some() {
                    present.insert(i);
                }
            }
            for (i, &sym) in symbols.iter().enumerate() {
                if !present.contains(i) {
                    self.delta.insert(q, sym, sink);
                }
            }
        }
        trace!("completed automaton over {} with sink {sink}", symbols.show());
        Some(sink)
    }

    /// Replaces the initial states by one fresh initial state. The new state receives a copy
    /// of every transition leaving one of the old initial states and it is final if one of
    /// them was. The accepted language does not change.
    pub fn unify_initial(&mut self) {
        if self.initial.len() <= 1 {
            return;
        }
        let fresh = self.add_state();
        let copied = self
            .initial
            .iter()
            .flat_map(|&q| self.delta.outgoing(q))
            .collect_vec();
        for (symbol, target) in copied {
            self.delta.insert(fresh, symbol, target);
        }
        if self.initial.iter().any(|q| self.finals.contains(q)) {
            self.finals.insert(fresh);
        }
        self.initial = OrderedSet::from([fresh]);
    }

    /// Replaces the final states by one fresh final state. Every transition that reaches an
    /// old final state is duplicated to also reach the new one. If the empty word was
    /// accepted, the new state is made initial as well, so the accepted language does not
    /// change.
    pub fn unify_final(&mut self) {
        if self.finals.len() <= 1 {
            return;
        }
        let fresh = self.add_state();
        let redirected = self
            .delta
            .transitions()
            .filter(|t| self.finals.contains(&t.target))
            .collect_vec();
        for t in redirected {
            self.delta.insert(t.source, t.symbol, fresh);
        }
        if self.initial.iter().any(|q| self.finals.contains(q)) {
            self.initial.insert(fresh);
        }
        self.finals = OrderedSet::from([fresh]);
    }

    /// Returns a string representation of the transition table of the automaton. Initial
    /// states are prefixed with `→` and final states are marked with `*`.
    pub fn build_transition_table(&self) -> String {
        let symbols = self.used_symbols();
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(symbols.iter().map(|sym| sym.show())),
        );
        for q in self.states() {
            let mut row = vec![format!(
                "{}{}{}",
                if self.is_initial(q) { "→" } else { "" },
                q.show(),
                if self.is_final(q) { "*" } else { "" }
            )];
            for &sym in &symbols {
                row.push(
                    self.delta
                        .successors(q, sym)
                        .map_or_else(|| "-".to_string(), |targets| targets.show()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl TransitionSystem for Nfa {
    fn num_states(&self) -> usize {
        self.num_states
    }

    fn state_post(&self, state: State) -> Option<&StatePost> {
        self.delta.state_post(state)
    }
}

impl Debug for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NFA with {} states and {} transitions\n{}",
            self.num_states,
            self.num_transitions(),
            self.build_transition_table()
        )
    }
}
