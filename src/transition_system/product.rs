use tracing::{debug, trace};

use crate::{alphabet::Symbol, math::Map, prelude::*};

use super::TransitionRow;

/// Identifies a state of a product transition system, it consists of a state of the left
/// and a state of the right factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductIndex<L, R>(pub L, pub R);

impl<L: Show, R: Show> Show for ProductIndex<L, R> {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<L, R> From<(L, R)> for ProductIndex<L, R> {
    fn from((l, r): (L, R)) -> Self {
        Self(l, r)
    }
}

impl<Q: StateIndex, S: Symbol> TransitionSystem<Q, S> {
    /// Builds the product of `self` with `other`. The states of the product are all pairs
    /// [`ProductIndex`]`(l, r)` where `l` is a state of `self` and `r` a state of `other`, every pair is
    /// materialized regardless of whether it is reachable. The alphabet of the product is the
    /// intersection of both alphabets, symbols that only one of the factors knows are dropped.
    ///
    /// The product starts in the pair of initial states and moves on a symbol by moving both
    /// components simultaneously.
    pub fn product<R: StateIndex>(
        &self,
        other: &TransitionSystem<R, S>,
    ) -> TransitionSystem<ProductIndex<Q, R>, S> {
        let alphabet = self.alphabet().intersection(other.alphabet());
        if &alphabet != self.alphabet() || &alphabet != other.alphabet() {
            debug!(
                "product restricts alphabets {} and {} to {}",
                self.alphabet().show(),
                other.alphabet().show(),
                alphabet.show()
            );
        }

        let mut transitions = Map::with_capacity_and_hasher(
            self.size() * other.size(),
            fxhash::FxBuildHasher::default(),
        );
        for (l, left_row) in self.rows() {
            for (r, right_row) in other.rows() {
                // rows are uniform, so both factors have a transition on every common symbol
                let row: TransitionRow<_, _> = alphabet
                    .universe()
                    .map(|sym| {
                        (
                            sym.clone(),
                            ProductIndex(left_row[sym].clone(), right_row[sym].clone()),
                        )
                    })
                    .collect();
                trace!("adding product state ({}, {})", l.show(), r.show());
                transitions.insert(ProductIndex(l.clone(), r.clone()), row);
            }
        }
        debug!(
            "built product with {} states over alphabet {}",
            transitions.len(),
            alphabet.show()
        );

        TransitionSystem::from_parts_unchecked(
            alphabet,
            transitions,
            ProductIndex(self.initial().clone(), other.initial().clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn product() {
        let dfa = TSBuilder::new()
            .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 0)])
            .with_accepting([0])
            .into_dfa(0);
        let dfb = TSBuilder::new()
            .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 0)])
            .with_accepting([0, 1])
            .into_dfa(0);

        let product = dfa.ts().product(dfb.ts());
        assert_eq!(product.initial(), &ProductIndex(0, 0));
        assert_eq!(product.reached_state("abb".chars()), Some(&ProductIndex(0, 0)));
        assert_eq!(product.reached_state("aa".chars()), Some(&ProductIndex(1, 1)));
        assert_eq!(product.alphabet(), dfa.alphabet());
    }

    #[test]
    fn product_materializes_all_pairs() {
        let left = crate::tests::wiki_dfa();
        let right = crate::tests::odd_ones();
        let product = left.ts().product(right.ts());

        assert_eq!(product.size(), left.size() * right.size());
        // the alphabets {a, b} and {0, 1} are disjoint, so only the initial pair is reachable
        assert!(product.alphabet().is_empty());
        assert_eq!(product.reachable_state_indices().count(), 1);
        for l in left.states() {
            for r in right.states() {
                assert!(product.contains_state(&ProductIndex(*l, *r)));
            }
        }
    }

    #[test]
    fn product_over_common_symbols() {
        let left = TSBuilder::new()
            .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
            .into_dfa(0);
        let right = TSBuilder::new()
            .with_edges([(0, 'a', 0), (0, 'c', 1), (1, 'a', 1), (1, 'c', 0)])
            .into_dfa(0);
        let product = left.ts().product(right.ts());

        assert_eq!(product.alphabet(), &Alphabet::from_iter(['a']));
        assert_eq!(product.size(), 4);
        assert_eq!(
            product.successor(&ProductIndex(0, 1), &'a'),
            Some(&ProductIndex(1, 1))
        );
        assert_eq!(product.successor(&ProductIndex(0, 1), &'b'), None);
    }
}
