mod nfa;
pub use nfa::Nfa;

mod language;
