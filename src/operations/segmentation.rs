use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::prelude::*;

/// Splits an automaton into segments along the transitions on a designated `epsilon`
/// symbol.
///
/// The epsilon depth of a state is the number of epsilon transitions on the first path
/// found to it by a breadth first search from the initial states. Every epsilon
/// transition belongs to the depth of its source. Segment `d` consists of the whole
/// automaton without epsilon transitions, its initial states are the targets of the
/// epsilon transitions at depth `d - 1` and its final states are the sources of those at
/// depth `d`. The first segment starts in the initial states of the automaton and the last
/// one ends in its final states.
///
/// Segmentation is meant for automata in which every accepting path crosses the same
/// number of epsilon transitions, like the ones built by
/// [`Nfa::concatenate_over_epsilon`].
#[derive(Clone, Debug)]
pub struct Segmentation {
    epsilon: Symbol,
    epsilon_depths: OrderedMap<usize, Vec<Transition>>,
    segments: Vec<Nfa>,
}

impl Segmentation {
    /// Computes the segmentation of `nfa` along the transitions on `epsilon`.
    pub fn new(nfa: &Nfa, epsilon: Symbol) -> Self {
        let epsilon_depths = Self::compute_epsilon_depths(nfa, epsilon);
        let segments = Self::split(nfa, epsilon, &epsilon_depths);
        debug!(
            "split automaton with {} states into {} segments",
            nfa.num_states(),
            segments.len()
        );
        Self {
            epsilon,
            epsilon_depths,
            segments,
        }
    }

    /// The symbol along which the automaton was split.
    pub fn epsilon(&self) -> Symbol {
        self.epsilon
    }

    /// The epsilon transitions grouped by the depth of their source, each group sorted.
    pub fn epsilon_depths(&self) -> &OrderedMap<usize, Vec<Transition>> {
        &self.epsilon_depths
    }

    /// The segments, one more than there are epsilon depths. They are not trimmed, so each
    /// one has as many states as the segmented automaton.
    pub fn untrimmed_segments(&self) -> &[Nfa] {
        &self.segments
    }

    /// Same as [`Segmentation::untrimmed_segments`], but every segment is trimmed.
    pub fn segments(&self) -> Vec<Nfa> {
        self.segments
            .iter()
            .map(|segment| {
                let mut segment = segment.clone();
                segment.trim();
                segment
            })
            .collect()
    }

    fn compute_epsilon_depths(nfa: &Nfa, epsilon: Symbol) -> OrderedMap<usize, Vec<Transition>> {
        let mut depths: OrderedMap<usize, Vec<Transition>> = OrderedMap::new();
        let mut seen = BitSet::with_capacity(nfa.num_states());
        let mut queue: VecDeque<(State, usize)> = nfa
            .initial_states()
            .iter()
            .filter(|&&q| seen.insert(q))
            .map(|&q| (q, 0))
            .collect();

        while let Some((source, depth)) = queue.pop_front() {
            for (symbol, target) in nfa.edges_from(source) {
                let next = if symbol == epsilon {
                    trace!("epsilon transition from {source} to {target} at depth {depth}");
                    depths
                        .entry(depth)
                        .or_default()
                        .push(Transition::new(source, symbol, target));
                    depth + 1
                } else {
                    depth
                };
                if seen.insert(target) {
                    queue.push_back((target, next));
                }
            }
        }

        for transitions in depths.values_mut() {
            transitions.sort();
        }
        depths
    }

    fn split(
        nfa: &Nfa,
        epsilon: Symbol,
        depths: &OrderedMap<usize, Vec<Transition>>,
    ) -> Vec<Nfa> {
        let mut delta = Delta::with_states(nfa.num_states());
        for t in nfa.transitions().filter(|t| t.symbol != epsilon) {
            delta.insert(t.source, t.symbol, t.target);
        }

        let num_segments = depths.len() + 1;
        let mut initial = vec![OrderedSet::new(); num_segments];
        let mut finals = vec![OrderedSet::new(); num_segments];
        initial[0] = nfa.initial_states().clone();
        finals[num_segments - 1] = nfa.final_states().clone();
        // depths are consecutive starting from zero, so the index of a depth is the depth
        for (index, transitions) in depths.values().enumerate() {
            for t in transitions {
                finals[index].insert(t.source);
                initial[index + 1].insert(t.target);
            }
        }

        initial
            .into_iter()
            .zip(finals)
            .map(|(initial, finals)| {
                Nfa::from_parts(nfa.num_states(), initial, finals, delta.clone())
            })
            .collect()
    }
}

impl Nfa {
    /// Segments `self` along the transitions on `epsilon`, see [`Segmentation`].
    pub fn segmentation(&self, epsilon: Symbol) -> Segmentation {
        Segmentation::new(self, epsilon)
    }
}
