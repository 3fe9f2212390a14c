use std::{borrow::Borrow, fmt::Display};

use itertools::Itertools;
use tracing::debug;

use crate::{alphabet::Symbol, math::Set, prelude::*};

/// A deterministic finite automaton (DFA) is a complete deterministic transition system with a
/// set of accepting states. It accepts a finite word if it reaches an accepting state.
///
/// # Example
/// ```
/// use eqdfa::prelude::*;
///
/// // accepts all words over {0, 1} with an odd number of ones
/// let odd = TSBuilder::new()
///     .with_edges([("q0", '0', "q0"), ("q0", '1', "q1"), ("q1", '0', "q1"), ("q1", '1', "q0")])
///     .with_accepting(["q1"])
///     .into_dfa("q0");
/// assert!(!odd.accepts("0101".chars()));
/// assert_eq!(odd.give_word(), Some(vec!['1']));
/// assert_eq!(odd.complement().give_word(), Some(vec![]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa<Q: StateIndex = String, S: Symbol = String> {
    ts: TransitionSystem<Q, S>,
    accepting: Set<Q>,
}

impl<Q: StateIndex, S: Symbol> Dfa<Q, S> {
    /// Creates a new [`Dfa`] from the given transition system and iterator over accepting
    /// states. Fails with [`DfaError::UnknownState`] if a supposed accepting state is not a
    /// state of `ts`.
    pub fn from_parts(
        ts: TransitionSystem<Q, S>,
        accepting: impl IntoIterator<Item = Q>,
    ) -> Result<Self, DfaError> {
        let accepting: Set<Q> = accepting.into_iter().collect();
        if let Some(q) = accepting
            .iter()
            .sorted()
            .find(|q| !ts.contains_state(q))
        {
            return Err(DfaError::UnknownState(q.show()));
        }
        Ok(Self { ts, accepting })
    }

    /// Decomposes the automaton into its transition system and its set of accepting states.
    pub fn into_parts(self) -> (TransitionSystem<Q, S>, Set<Q>) {
        (self.ts, self.accepting)
    }

    /// Returns a reference to the underlying transition system.
    pub fn ts(&self) -> &TransitionSystem<Q, S> {
        &self.ts
    }

    /// The alphabet of the underlying transition system.
    pub fn alphabet(&self) -> &Alphabet<S> {
        self.ts.alphabet()
    }

    /// The initial state.
    pub fn initial(&self) -> &Q {
        self.ts.initial()
    }

    /// Iterates over all states.
    pub fn states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.ts.states()
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.ts.size()
    }

    /// Returns `true` if `state` is accepting.
    pub fn is_accepting(&self, state: &Q) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the indices of all states that are accepting.
    pub fn accepting_states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.accepting.iter()
    }

    /// Returns the indices of all states that are rejecting.
    pub fn rejecting_states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.states().filter(|q| !self.is_accepting(q))
    }

    /// Returns whether the automaton accepts the given finite word. A word that uses a symbol
    /// outside of the alphabet is rejected.
    pub fn accepts<W, B>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = B>,
        B: Borrow<S>,
    {
        self.ts
            .reached_state(word)
            .is_some_and(|q| self.is_accepting(q))
    }

    /// Computes the complement of `self` by swapping accepting and non-accepting states. Every
    /// state is flipped, including the ones that are not reachable.
    pub fn complement(&self) -> Self {
        Self {
            ts: self.ts.clone(),
            accepting: self
                .states()
                .filter(|q| !self.is_accepting(q))
                .cloned()
                .collect(),
        }
    }

    /// Computes the union of `self` with `other` through a product construction. A pair of
    /// states is accepting if at least one of its components is.
    pub fn union<R: StateIndex>(&self, other: &Dfa<R, S>) -> Dfa<ProductIndex<Q, R>, S> {
        let ts = self.ts.product(other.ts());
        let accepting = ts
            .states()
            .filter(|ProductIndex(l, r)| self.is_accepting(l) || other.is_accepting(r))
            .cloned()
            .collect();
        Dfa { ts, accepting }
    }

    /// Computes the intersection of `self` with `other` through a product construction. A pair
    /// of states is accepting if both of its components are, so the accepting states are
    /// exactly the pairs of accepting states.
    pub fn intersection<R: StateIndex>(&self, other: &Dfa<R, S>) -> Dfa<ProductIndex<Q, R>, S> {
        let ts = self.ts.product(other.ts());
        let accepting = self
            .accepting_states()
            .cartesian_product(other.accepting.iter())
            .map(|(l, r)| ProductIndex(l.clone(), r.clone()))
            .collect();
        Dfa { ts, accepting }
    }

    /// Searches for a shortest accepted word. Among all accepted words of minimal length, the
    /// least one with respect to the order on symbols is returned. If the accepted language is
    /// empty, the function returns `None`.
    pub fn give_word(&self) -> Option<Vec<S>> {
        let word = self
            .ts
            .minimal_representatives()
            .find_map(|(rep, q)| self.is_accepting(q).then_some(rep));
        match &word {
            Some(w) => debug!("found accepted word {}", w.show()),
            None => debug!("accepted language is empty"),
        }
        word
    }

    /// Returns true if and only if the accepted language is empty.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Checks whether `self` and `other` accept the same language, see [`Equivalence::equivalent`].
    /// The alphabets of both automata must coincide.
    pub fn equivalent<R: StateIndex>(&self, other: &Dfa<R, S>) -> Result<bool, DfaError> {
        Equivalence::default().equivalent(self, other)
    }

    /// Computes a shortest word on which `self` and `other` disagree, see
    /// [`Equivalence::distinguishing_word`]. The alphabets of both automata must coincide.
    pub fn distinguishing_word<R: StateIndex>(
        &self,
        other: &Dfa<R, S>,
    ) -> Result<Option<Vec<S>>, DfaError> {
        Equivalence::default().distinguishing_word(self, other)
    }
}

impl<Q: StateIndex, S: Symbol> Display for Dfa<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initial = self.initial();
        let table = self.ts.build_transition_table(|q| {
            format!(
                "{}{}{}",
                if q == initial { "-> " } else { "" },
                q.show(),
                if self.is_accepting(q) { " +" } else { "" }
            )
        });
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{math::Set, prelude::*, tests::odd_ones};

    #[test]
    fn dfa_from_parts() {
        let ts = TSBuilder::new()
            .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 0), (1, 'b', 1)])
            .try_into_ts(0)
            .unwrap();

        assert!(Dfa::from_parts(ts.clone(), [0]).unwrap().accepts("".chars()));
        assert!(!Dfa::from_parts(ts.clone(), [1]).unwrap().accepts("a".chars()));
        assert!(!Dfa::from_parts(ts.clone(), []).unwrap().accepts("a".chars()));
        assert!(matches!(
            Dfa::from_parts(ts, [0, 4]),
            Err(DfaError::UnknownState(q)) if q == "4"
        ));
    }

    #[test]
    fn accepting_and_rejecting() {
        let dfa = crate::tests::wiki_dfa();
        assert_eq!(dfa.accepting_states().sorted().collect_vec(), vec![&2, &3, &4]);
        assert_eq!(dfa.rejecting_states().sorted().collect_vec(), vec![&0, &1, &5]);
        assert!(!dfa.accepts("bc".chars()), "c is not a symbol of the alphabet");
    }

    #[test]
    fn complement_is_an_involution() {
        let dfa = crate::tests::wiki_dfa();
        let complement = dfa.complement();
        assert_eq!(complement.ts(), dfa.ts());
        assert_eq!(
            complement.accepting_states().cloned().collect::<Set<_>>(),
            dfa.rejecting_states().cloned().collect::<Set<_>>()
        );
        assert_eq!(complement.complement(), dfa);
    }

    #[test]
    fn union_and_intersection() {
        let odd = odd_ones();
        let ends_with_zero = TSBuilder::new()
            .with_edges([(0, '0', 1), (0, '1', 0), (1, '0', 1), (1, '1', 0)])
            .with_accepting([1])
            .into_dfa(0);

        let union = odd.union(&ends_with_zero);
        let intersection = odd.intersection(&ends_with_zero);
        assert_eq!(union.size(), 4);
        assert_eq!(intersection.size(), 4);

        for word in ["", "0", "1", "10", "11", "110", "1010", "100"] {
            let a = odd.accepts(word.chars());
            let b = ends_with_zero.accepts(word.chars());
            assert_eq!(union.accepts(word.chars()), a || b, "union on {word:?}");
            assert_eq!(
                intersection.accepts(word.chars()),
                a && b,
                "intersection on {word:?}"
            );
        }

        assert_eq!(intersection.give_word(), Some(vec!['1', '0']));
        assert_eq!(union.give_word(), Some(vec!['0']));
    }

    #[test]
    fn intersection_accepts_pairs_of_accepting_states() {
        let dfa = crate::tests::wiki_dfa();
        let intersection = dfa.intersection(&dfa.complement());
        assert_eq!(intersection.accepting_states().count(), 9);
        assert!(intersection.is_empty_language());
    }

    #[test]
    fn intersection_with_differently_indexed_automaton() {
        let odd = odd_ones();
        let ends_with_one = TSBuilder::new()
            .with_edges([(0u32, '0', 0), (0, '1', 1), (1, '0', 0), (1, '1', 1)])
            .with_accepting([1])
            .into_dfa(0);

        let intersection = odd.intersection(&ends_with_one);
        assert_eq!(
            intersection.accepting_states().collect_vec(),
            vec![&ProductIndex("q1", 1)]
        );
        assert!(intersection.accepts("0111".chars()));
        assert!(!intersection.accepts("011".chars()));
        assert_eq!(intersection.give_word(), Some(vec!['1']));
    }

    #[test_log::test]
    fn give_word() {
        let dfa = crate::tests::wiki_dfa();
        assert_eq!(dfa.give_word(), Some(vec!['b']));
        assert_eq!(dfa.complement().give_word(), Some(vec![]));

        let never = TSBuilder::new()
            .with_edges([(0, 'a', 1), (1, 'a', 1)])
            .with_states([2])
            .with_accepting([2])
            .try_into_dfa(0);
        assert!(
            never.is_err(),
            "state 2 has no outgoing edges while the alphabet is non-empty"
        );

        let unreachable = TSBuilder::new()
            .with_edges([(0, 'a', 1), (1, 'a', 1), (2, 'a', 0)])
            .with_accepting([2])
            .into_dfa(0);
        assert!(unreachable.is_empty_language());
    }

    #[test]
    fn display_marks_initial_and_accepting_states() {
        let rendered = odd_ones().to_string();
        assert!(rendered.contains("-> q0"));
        assert!(rendered.contains("q1 +"));
    }
}
