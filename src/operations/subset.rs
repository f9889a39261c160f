use std::{collections::VecDeque, convert::Infallible};

use tracing::{debug, warn};

use crate::prelude::*;

/// Options for [`Nfa::determinize_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeterminizeOptions {
    max_states: Option<usize>,
}

impl DeterminizeOptions {
    /// Options without a limit on the number of created states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the construction once more than `max_states` states would be created.
    pub fn with_max_states(self, max_states: usize) -> Self {
        Self {
            max_states: Some(max_states),
        }
    }

    /// The configured limit, if any.
    pub fn max_states(&self) -> Option<usize> {
        self.max_states
    }
}

/// The result of a subset construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Determinized {
    /// The deterministic automaton.
    pub nfa: Nfa,
    /// For every state of [`Determinized::nfa`], the set of original states it stands for.
    pub subsets: Vec<OrderedSet<State>>,
}

impl Determinized {
    /// Looks up which state of the deterministic automaton represents `subset`.
    pub fn state_of(&self, subset: &OrderedSet<State>) -> Option<State> {
        self.subsets.iter().position(|s| s == subset)
    }
}

impl Nfa {
    /// Builds a deterministic automaton that accepts the same language as `self` using the
    /// subset construction. Only subsets reachable from the set of initial states are
    /// created and the empty subset is never materialized, so the result is deterministic
    /// but in general not complete.
    ///
    /// The construction takes exponential time and space in the worst case, an automaton
    /// with `n` states can have up to `2^n` reachable subsets. No other operation calls it
    /// implicitly, except for [`Nfa::complement`] and the inclusion checks built on it.
    ///
    /// An automaton without initial states yields an automaton with no states at all.
    pub fn determinize(&self) -> Nfa {
        match self.subset_construction(|_| Ok::<(), Infallible>(())) {
            Ok(determinized) => determinized.nfa,
            Err(never) => match never {},
        }
    }

    /// Same as [`Nfa::determinize`], but configurable through `options` and additionally
    /// returns the subset each new state corresponds to. Fails with
    /// [`NfaError::DeterminizationLimit`] if a limit is set and exceeded.
    pub fn determinize_with(&self, options: DeterminizeOptions) -> Result<Determinized, NfaError> {
        let Some(limit) = options.max_states else {
            return self
                .subset_construction(|_| Ok::<(), Infallible>(()))
                .map_err(|never| match never {});
        };
        self.subset_construction(|created| {
            if created >= limit {
                warn!("subset construction exceeds the limit of {limit} states");
                Err(NfaError::DeterminizationLimit { limit })
            } else {
                Ok(())
            }
        })
    }

    /// Runs the subset construction. `admit` is consulted with the number of subsets created
    /// so far before a new one is added and may abort the construction.
    fn subset_construction<E>(
        &self,
        mut admit: impl FnMut(usize) -> Result<(), E>,
    ) -> Result<Determinized, E> {
        if self.initial_states().is_empty() {
            debug!("determinizing automaton without initial states");
            return Ok(Determinized {
                nfa: Nfa::new(0),
                subsets: vec![],
            });
        }

        let mut ids: Map<OrderedSet<State>, State> = Map::default();
        let mut subsets: Vec<OrderedSet<State>> = vec![];
        let mut queue = VecDeque::new();
        let mut delta = Delta::new();

        let mut discover = |subset: OrderedSet<State>,
                            subsets: &mut Vec<OrderedSet<State>>,
                            queue: &mut VecDeque<State>|
         -> Result<State, E> {
            if let Some(&id) = ids.get(&subset) {
                return Ok(id);
            }
            admit(subsets.len())?;
            let id = subsets.len();
            ids.insert(subset.clone(), id);
            subsets.push(subset);
            queue.push_back(id);
            Ok(id)
        };

        let initial = discover(self.initial_states().clone(), &mut subsets, &mut queue)?;

        while let Some(source) = queue.pop_front() {
            let mut successors: OrderedMap<Symbol, OrderedSet<State>> = OrderedMap::new();
            for &q in &subsets[source] {
                let Some(post) = self.state_post(q) else {
                    continue;
                };
                for mv in post.moves() {
                    successors
                        .entry(mv.symbol)
                        .or_default()
                        .extend(mv.targets.iter().copied());
                }
            }
            for (symbol, targets) in successors {
                let target = discover(targets, &mut subsets, &mut queue)?;
                delta.insert(source, symbol, target);
            }
        }

        let finals = subsets
            .iter()
            .enumerate()
            .filter(|(_, subset)| subset.iter().any(|&q| self.is_final(q)))
            .map(|(id, _)| id)
            .collect();

        debug!(
            "determinized automaton with {} states into one with {} states",
            self.num_states(),
            subsets.len()
        );
        Ok(Determinized {
            nfa: Nfa::from_parts(subsets.len(), OrderedSet::from([initial]), finals, delta),
            subsets,
        })
    }
}
