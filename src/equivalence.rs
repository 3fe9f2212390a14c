use tracing::{debug, info, warn};

use crate::{alphabet::Symbol, prelude::*};

/// The automaton whose language is the symmetric difference of the languages of a `Dfa<Q, S>` and
/// a `Dfa<R, S>`. Its states pair up a state of `A ∩ ¬B` with a state of `B ∩ ¬A`.
pub type SymmetricDifference<Q, R, S> = Dfa<ProductIndex<ProductIndex<Q, R>, ProductIndex<R, Q>>, S>;

/// Determines what happens when two automata over different alphabets are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlphabetPolicy {
    /// The alphabets have to be identical, otherwise [`DfaError::AlphabetMismatch`] is returned.
    #[default]
    Strict,
    /// The automata are compared over the symbols that both alphabets have in common. A word
    /// that distinguishes the two automata but uses a symbol known to only one of them is never
    /// found this way.
    Intersect,
}

/// Decides whether two DFAs accept the same language. This is done by building the automaton for
/// the symmetric difference `(A ∩ ¬B) ∪ (B ∩ ¬A)` and searching it for an accepted word. Such a
/// word is accepted by precisely one of the two automata, and it is of minimal length among all
/// such words.
///
/// # Example
/// ```
/// use eqdfa::prelude::*;
///
/// let even_a = TSBuilder::new()
///     .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
///     .with_accepting([0])
///     .into_dfa(0);
/// let no_a = TSBuilder::new()
///     .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 1)])
///     .with_accepting([0])
///     .into_dfa(0);
///
/// let eq = Equivalence::default();
/// assert!(eq.equivalent(&even_a, &even_a).unwrap());
/// assert_eq!(eq.distinguishing_word(&even_a, &no_a).unwrap(), Some(vec!['a', 'a']));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equivalence {
    policy: AlphabetPolicy,
}

impl Equivalence {
    /// Creates a decider that treats differing alphabets according to `policy`.
    pub fn new(policy: AlphabetPolicy) -> Self {
        Self { policy }
    }

    /// Returns the configured [`AlphabetPolicy`].
    pub fn policy(&self) -> AlphabetPolicy {
        self.policy
    }

    fn check_alphabets<Q, R, S>(&self, left: &Dfa<Q, S>, right: &Dfa<R, S>) -> Result<(), DfaError>
    where
        Q: StateIndex,
        R: StateIndex,
        S: Symbol,
    {
        if left.alphabet() == right.alphabet() {
            return Ok(());
        }
        match self.policy {
            AlphabetPolicy::Strict => Err(DfaError::AlphabetMismatch {
                left: left.alphabet().show(),
                right: right.alphabet().show(),
            }),
            AlphabetPolicy::Intersect => {
                warn!(
                    "comparing automata over alphabets {} and {} only on their common symbols {}",
                    left.alphabet().show(),
                    right.alphabet().show(),
                    left.alphabet().intersection(right.alphabet()).show()
                );
                Ok(())
            }
        }
    }

    /// Builds the automaton accepting precisely the words on which `left` and `right` disagree.
    pub fn symmetric_difference<Q, R, S>(
        &self,
        left: &Dfa<Q, S>,
        right: &Dfa<R, S>,
    ) -> Result<SymmetricDifference<Q, R, S>, DfaError>
    where
        Q: StateIndex,
        R: StateIndex,
        S: Symbol,
    {
        self.check_alphabets(left, right)?;

        let left_only = left.intersection(&right.complement());
        let right_only = right.intersection(&left.complement());
        let difference = left_only.union(&right_only);
        debug!(
            "symmetric difference of automata with {} and {} states has {} states",
            left.size(),
            right.size(),
            difference.size()
        );
        Ok(difference)
    }

    /// Computes a shortest word that is accepted by exactly one of `left` and `right`, or `None`
    /// if the two automata are equivalent. Among the shortest such words, the least one with
    /// respect to the order on symbols is returned.
    pub fn distinguishing_word<Q, R, S>(
        &self,
        left: &Dfa<Q, S>,
        right: &Dfa<R, S>,
    ) -> Result<Option<Vec<S>>, DfaError>
    where
        Q: StateIndex,
        R: StateIndex,
        S: Symbol,
    {
        let witness = self.symmetric_difference(left, right)?.give_word();
        match &witness {
            Some(word) => info!("automata differ on {}", word.show()),
            None => info!("automata are equivalent"),
        }
        Ok(witness)
    }

    /// Returns `true` if and only if `left` and `right` accept the same language.
    pub fn equivalent<Q, R, S>(&self, left: &Dfa<Q, S>, right: &Dfa<R, S>) -> Result<bool, DfaError>
    where
        Q: StateIndex,
        R: StateIndex,
        S: Symbol,
    {
        Ok(self.distinguishing_word(left, right)?.is_none())
    }
}
