//! Library for deciding language equivalence of deterministic finite automata (DFAs).
//!
//! A [`Dfa`] consists of a [`TransitionSystem`] together with a set of accepting states. The transition
//! system is total: every state has exactly one outgoing transition for every symbol of the
//! [`Alphabet`], which is the set of symbols leaving the initial state. This uniformity is checked
//! when a transition system is constructed, so all operations below are total on the values they receive.
//!
//! The automaton algebra consists of
//! - [`Dfa::complement`], which swaps accepting and rejecting states,
//! - [`TransitionSystem::product`], which eagerly builds the full cross product of two transition
//!   systems over the common alphabet, using [`ProductIndex`] pairs as state identifiers,
//! - [`Dfa::union`] and [`Dfa::intersection`], which differ only in the states they mark as accepting.
//!
//! Emptiness is decided by a breadth-first search over the reachable states (see
//! [`transition_system::MinimalRepresentatives`]), which also produces the length-lexicographically
//! least accepted word if the language is not empty. Combining all of the above, the
//! [`Equivalence`] decider computes the symmetric difference `(A ∩ ¬B) ∪ (B ∩ ¬A)` and searches it
//! for a word, which is then a shortest word on which the two automata disagree.
//!
//! Automata are exchanged as JSON objects, see [`json`].
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use eqdfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol},
        automaton::Dfa,
        equivalence::{AlphabetPolicy, Equivalence},
        error::DfaError,
        math,
        transition_system::{ProductIndex, StateIndex, TSBuilder, TransitionSystem},
        Show,
    };
}

/// This module contains the collection types used throughout the crate.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// This module defines transition systems, their product and the breadth-first exploration of them.
pub mod transition_system;
pub use transition_system::{ProductIndex, TransitionSystem};

/// Defines deterministic finite automata and the boolean operations on them.
pub mod automaton;
pub use automaton::Dfa;

/// Decides whether two automata accept the same language.
pub mod equivalence;
pub use equivalence::{AlphabetPolicy, Equivalence};

/// The error type shared by all fallible operations.
pub mod error;
pub use error::DfaError;

/// Reading and writing automata in the JSON exchange format.
pub mod json;

/// Implements the generation of random automata. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// Helper trait which can be used to display states, symbols and words.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example q0, q1, q2, ... and for a product state (q0, p1) it should be (q0, p1).
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of states this should be {q0, q1, q2, ...}.
    /// By default the shown elements are joined with commas and wrapped in braces.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

macro_rules! impl_show_for_integers {
    ($($t:ty),*) => {
        $(
            impl Show for $t {
                fn show(&self) -> String {
                    self.to_string()
                }
            }
        )*
    }
}

impl_show_for_integers!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!("\"{}\"", self.iter().map(|x| x.show()).join(""))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
