use crate::prelude::*;

/// A single transition, i.e. a triple consisting of a source state, the symbol that is
/// consumed and the target state that is reached.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, PartialOrd, Ord)]
pub struct Transition {
    /// The state the transition leaves.
    pub source: State,
    /// The symbol that is consumed.
    pub symbol: Symbol,
    /// The state the transition reaches.
    pub target: State,
}

impl Transition {
    /// Creates a new transition from the given components.
    pub fn new(source: State, symbol: Symbol, target: State) -> Self {
        Self {
            source,
            symbol,
            target,
        }
    }

    /// Destructures the transition into a `(source, symbol, target)` tuple.
    pub fn into_tuple(self) -> (State, Symbol, State) {
        (self.source, self.symbol, self.target)
    }
}

impl PartialEq<(State, Symbol, State)> for Transition {
    fn eq(&self, other: &(State, Symbol, State)) -> bool {
        self.source == other.0 && self.symbol == other.1 && self.target == other.2
    }
}

impl Show for Transition {
    fn show(&self) -> String {
        format!(
            "({}, {}, {})",
            self.source.show(),
            self.symbol.show(),
            self.target.show()
        )
    }
}

/// Anything that can be turned into a [`Transition`], this allows passing plain tuples to
/// the methods that add transitions.
pub trait IntoTransition {
    /// Performs the conversion.
    fn into_transition(self) -> Transition;
}

impl IntoTransition for Transition {
    fn into_transition(self) -> Transition {
        self
    }
}

impl IntoTransition for (State, Symbol, State) {
    fn into_transition(self) -> Transition {
        Transition::new(self.0, self.1, self.2)
    }
}

impl IntoTransition for &(State, Symbol, State) {
    fn into_transition(self) -> Transition {
        Transition::new(self.0, self.1, self.2)
    }
}
