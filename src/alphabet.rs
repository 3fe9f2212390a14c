use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::Show;

/// A symbol is a single letter of an [`Alphabet`]. Symbols need a total order, which is used
/// to expand the outgoing transitions of a state in a fixed order during exploration.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug + Show {}

impl<T: Clone + Eq + Ord + Hash + Debug + Show> Symbol for T {}

/// Represents a finite set of symbols. The symbols are stored sorted and without duplicates,
/// so iterating over the [`Alphabet::universe`] always yields them in ascending order.
///
/// # Example
/// ```
/// use eqdfa::prelude::*;
///
/// let alphabet = Alphabet::from_iter(['b', 'a', 'b']);
/// assert_eq!(alphabet.size(), 2);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec![&'a', &'b']);
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct Alphabet<S>(Vec<S>);

impl<S> Default for Alphabet<S> {
    fn default() -> Self {
        Self(vec![])
    }
}

impl<S: Symbol> FromIterator<S> for Alphabet<S> {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().unique().sorted().collect())
    }
}

impl<S: Symbol> Alphabet<S> {
    /// Returns an iterator over all symbols in ascending order.
    pub fn universe(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }

    /// The number of distinct symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the alphabet contains no symbol at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether `symbol` is part of the alphabet.
    pub fn contains(&self, symbol: &S) -> bool {
        self.0.binary_search(symbol).is_ok()
    }

    /// Computes the alphabet consisting of the symbols that appear in both `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Self {
        Self(
            self.universe()
                .filter(|sym| other.contains(sym))
                .cloned()
                .collect(),
        )
    }
}

impl<S: Symbol> Show for Alphabet<S> {
    fn show(&self) -> String {
        S::show_collection(self.universe())
    }
}

#[cfg(test)]
mod tests {
    use super::Alphabet;
    use crate::Show;

    #[test]
    fn alphabet_is_sorted_and_deduplicated() {
        let alphabet: Alphabet<char> = "cabbac".chars().collect();
        assert_eq!(alphabet.size(), 3);
        assert!(alphabet.contains(&'b'));
        assert!(!alphabet.contains(&'d'));
        assert_eq!(alphabet.show(), "{a, b, c}");
    }

    #[test]
    fn intersection() {
        let left: Alphabet<char> = "abc".chars().collect();
        let right: Alphabet<char> = "bcd".chars().collect();
        let common = left.intersection(&right);
        assert_eq!(common, "cb".chars().collect());
        assert!(left.intersection(&Alphabet::default()).is_empty());
    }
}
