use crate::{alphabet::Symbol, math::Map, prelude::*};

use super::TransitionRow;

/// Helper struct for the construction of transition systems and DFAs. It stores a list of edges,
/// a list of accepting states and a list of additional states without outgoing edges.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']`. We want to add the following transitions:
/// - From state 0 to state 0 on symbol 'a'
/// - From state 0 to state 1 on symbol 'b'
/// - From state 1 to state 1 on symbol 'a'
/// - From state 1 to state 0 on symbol 'b'
///
/// Further, state 0 should be initial and accepting. This can be done as follows
/// ```
/// use eqdfa::prelude::*;
///
/// let dfa = TSBuilder::new()
///     .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .with_accepting([0])
///     .into_dfa(0); // 0 is the initial state
/// assert!(dfa.accepts("abba".chars()));
/// ```
#[derive(Debug, Clone)]
pub struct TSBuilder<Q, S> {
    edges: Vec<(Q, S, Q)>,
    states: Vec<Q>,
    accepting: Vec<Q>,
}

impl<Q, S> Default for TSBuilder<Q, S> {
    fn default() -> Self {
        Self {
            edges: vec![],
            states: vec![],
            accepting: vec![],
        }
    }
}

impl<Q: StateIndex, S: Symbol> TSBuilder<Q, S> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given `(source, symbol, target)` triples. If two edges leave the same state on
    /// the same symbol, the one that was added last wins.
    pub fn with_edges<I: IntoIterator<Item = (Q, S, Q)>>(mut self, iter: I) -> Self {
        self.edges.extend(iter);
        self
    }

    /// Forces the given states to exist, even if no edge mentions them.
    pub fn with_states<I: IntoIterator<Item = Q>>(mut self, iter: I) -> Self {
        self.states.extend(iter);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = Q>>(mut self, iter: I) -> Self {
        self.accepting.extend(iter);
        self
    }

    /// Collects the edges into a [`TransitionSystem`] with the given initial state. Every state
    /// that is mentioned anywhere (as source, target, accepting or explicitly added state) gets a
    /// row, so the validation of [`TransitionSystem::from_parts`] reports states whose outgoing
    /// edges do not cover the alphabet.
    pub fn try_into_ts(&self, initial: Q) -> Result<TransitionSystem<Q, S>, DfaError> {
        let mut transitions: Map<Q, TransitionRow<Q, S>> = Map::default();
        for q in std::iter::once(&initial)
            .chain(&self.states)
            .chain(&self.accepting)
        {
            transitions.entry(q.clone()).or_default();
        }
        for (q, sym, p) in &self.edges {
            transitions.entry(p.clone()).or_default();
            transitions
                .entry(q.clone())
                .or_default()
                .insert(sym.clone(), p.clone());
        }
        TransitionSystem::from_parts(transitions, initial)
    }

    /// Builds a [`Dfa`] with the given initial state.
    pub fn try_into_dfa(self, initial: Q) -> Result<Dfa<Q, S>, DfaError> {
        let ts = self.try_into_ts(initial)?;
        Dfa::from_parts(ts, self.accepting)
    }

    /// Builds a [`Dfa`] with the given initial state.
    ///
    /// # Panics
    /// If the edges do not form a complete deterministic transition system, see [`Self::try_into_dfa`]
    /// for a fallible variant.
    pub fn into_dfa(self, initial: Q) -> Dfa<Q, S> {
        match self.try_into_dfa(initial) {
            Ok(dfa) => dfa,
            Err(e) => panic!("could not build DFA: {e}"),
        }
    }
}
