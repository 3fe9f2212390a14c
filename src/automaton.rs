//! An automaton consists of a [`crate::TransitionSystem`] together with an acceptance component.
//! For the deterministic finite automata in this crate the acceptance component is a set of
//! accepting states, a finite word is accepted if and only if the state it reaches is accepting.
//!
//! All operations treat their inputs as immutable values and return freshly built automata.

mod dfa;
pub use dfa::Dfa;
