use itertools::Itertools;
use tracing::{debug, trace};

use crate::prelude::*;

/// A sequence of automata, one per segment of a segmented automaton.
pub type Noodle = Vec<Nfa>;

/// Selects how [`Nfa::noodlify_for_equation`] shrinks the product before splitting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Reduce with the direct simulation of the product.
    Forward,
    /// Reduce with the direct simulation of the reverted product.
    Backward,
    /// A forward reduction followed by a backward one.
    Bidirectional,
}

/// The trimmed copies of one segment that have a single initial and/or a single final state.
/// `None` means that all initial or all final states of the segment are kept.
type SegmentCopies = OrderedMap<(Option<State>, Option<State>), Nfa>;

impl Nfa {
    /// Splits `self` into noodles along the transitions on `epsilon`, see [`Segmentation`].
    ///
    /// A noodle picks one epsilon transition per epsilon depth and consists of the trimmed
    /// segments between consecutive picks. The first segment keeps all initial states of
    /// `self`, the last one all of its final states. Every accepting path of `self` runs
    /// through exactly one noodle. Unless `include_empty` is set, noodles with a segment of
    /// empty language are left out.
    pub fn noodlify(&self, epsilon: Symbol, include_empty: bool) -> Vec<Noodle> {
        let segmentation = self.segmentation(epsilon);
        let segments = segmentation.untrimmed_segments();
        let keep = |segment: &Nfa| include_empty || segment.num_states() > 0;

        if let [segment] = segments {
            let mut segment = segment.clone();
            segment.trim();
            return if keep(&segment) {
                vec![vec![segment]]
            } else {
                vec![]
            };
        }

        let last = segments.len() - 1;
        let copies: Vec<SegmentCopies> = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let initial: Vec<Option<State>> = if index == 0 {
                    vec![None]
                } else {
                    segment.initial_states().iter().copied().map(Some).collect()
                };
                let finals: Vec<Option<State>> = if index == last {
                    vec![None]
                } else {
                    segment.final_states().iter().copied().map(Some).collect()
                };
                initial
                    .into_iter()
                    .cartesian_product(finals)
                    .filter_map(|(i, f)| {
                        let mut copy = Nfa::from_parts(
                            segment.num_states(),
                            i.map_or_else(|| segment.initial_states().clone(), |i| [i].into()),
                            f.map_or_else(|| segment.final_states().clone(), |f| [f].into()),
                            segment.delta().clone(),
                        );
                        copy.trim();
                        keep(&copy).then_some(((i, f), copy))
                    })
                    .collect()
            })
            .collect();

        let mut noodles = vec![];
        for picked in segmentation
            .epsilon_depths()
            .values()
            .map(|transitions| transitions.iter())
            .multi_cartesian_product()
        {
            // the segment between two picks starts where the earlier one ends
            let borders = std::iter::once(None)
                .chain(picked.iter().map(|t| Some(t.target)))
                .zip(picked.iter().map(|t| Some(t.source)).chain(std::iter::once(None)));
            let noodle: Option<Noodle> = borders
                .zip(&copies)
                .map(|(border, copies)| copies.get(&border).cloned())
                .collect();
            match noodle {
                Some(noodle) => noodles.push(noodle),
                None => trace!(
                    "skipping noodle through {}",
                    picked.iter().map(|t| t.show()).join(" ")
                ),
            }
        }

        debug!(
            "noodlified automaton with {} segments into {} noodles",
            segments.len(),
            noodles.len()
        );
        noodles
    }

    /// Computes the noodles of the equation `l_1 l_2 ... l_n = r`, where the languages of
    /// `left` and `right` stand for the sides of the equation.
    ///
    /// The automata in `left` are concatenated over a fresh symbol, which is intersected with
    /// `right` while keeping the fresh transitions, see [`Nfa::intersection_over_epsilon`].
    /// The trimmed product, reduced according to `reduction`, is then split by
    /// [`Nfa::noodlify`]. The `i`-th segment of a noodle accepts words of `l_i` that can be
    /// combined with the other segments into a word of `r`.
    ///
    /// Without left automata, or if any side has no solution, there are no noodles.
    pub fn noodlify_for_equation(
        left: &[Nfa],
        right: &Nfa,
        include_empty: bool,
        reduction: Option<Reduction>,
    ) -> Vec<Noodle> {
        if left.is_empty() || right.is_lang_empty() {
            return vec![];
        }
        let mut alphabet = EnumAlphabet::from_nfas(left);
        alphabet.add_symbols_from(right);
        let epsilon = alphabet.next_value();

        let unified = left.iter().map(|nfa| {
            let mut nfa = nfa.clone();
            nfa.unify_initial();
            nfa.unify_final();
            nfa
        });
        let Some(concatenation) =
            unified.reduce(|lhs, rhs| lhs.concatenate_over_epsilon(&rhs, epsilon))
        else {
            return vec![];
        };

        let mut product = concatenation.intersection_over_epsilon(right, epsilon);
        product.trim();
        if product.is_lang_empty() {
            debug!("equation over {} left automata has no solution", left.len());
            return vec![];
        }

        if let Some(reduction) = reduction {
            if matches!(reduction, Reduction::Forward | Reduction::Bidirectional) {
                product = product.reduce();
            }
            if matches!(reduction, Reduction::Backward | Reduction::Bidirectional) {
                product = product.revert().reduce().revert();
            }
        }
        product.noodlify(epsilon, include_empty)
    }
}
