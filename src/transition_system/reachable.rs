use std::collections::VecDeque;

use tracing::trace;

use crate::{alphabet::Symbol, math::Set, prelude::*};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative<'a, Q, S> = (Vec<S>, &'a Q);

/// Struct that can return the minimal representatives of a transition system. A minimal representative
/// for a state `q` of some transition system is the length-lexicographically minimal string with which
/// `q` can be reached from a given state.
///
/// The states are explored breadth-first and the outgoing transitions of each state are expanded in
/// the order of the alphabet. A state that already has an access sequence is never revisited, so
/// representatives are produced in length-lexicographic order of their access sequences.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a, Q: StateIndex, S: Symbol> {
    ts: &'a TransitionSystem<Q, S>,
    seen: Set<&'a Q>,
    queue: VecDeque<MinimalRepresentative<'a, Q, S>>,
}

impl<'a, Q: StateIndex, S: Symbol> MinimalRepresentatives<'a, Q, S> {
    /// Starts the exploration in `origin`, whose representative is the empty word.
    pub fn new(ts: &'a TransitionSystem<Q, S>, origin: &'a Q) -> Self {
        let seen = Set::from_iter([origin]);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { ts, seen, queue }
    }
}

impl<'a, Q: StateIndex, S: Symbol> Iterator for MinimalRepresentatives<'a, Q, S> {
    type Item = MinimalRepresentative<'a, Q, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        if let Some(edges) = self.ts.edges_from(q) {
            for (sym, p) in edges {
                if self.seen.insert(p) {
                    let mut new_access = access.clone();
                    new_access.push(sym.clone());
                    trace!(
                        "reached {} with {}",
                        p.show(),
                        new_access.as_slice().show()
                    );
                    self.queue.push_back((new_access, p));
                }
            }
        }
        Some((access, q))
    }
}

/// Allows iterating over the indices of all reachable states in a [`TransitionSystem`].
#[derive(Debug, Clone)]
pub struct ReachableStateIndices<'a, Q: StateIndex, S: Symbol>(MinimalRepresentatives<'a, Q, S>);

impl<'a, Q: StateIndex, S: Symbol> ReachableStateIndices<'a, Q, S> {
    /// Starts the exploration in `origin`.
    pub fn new(ts: &'a TransitionSystem<Q, S>, origin: &'a Q) -> Self {
        Self(MinimalRepresentatives::new(ts, origin))
    }
}

impl<'a, Q: StateIndex, S: Symbol> Iterator for ReachableStateIndices<'a, Q, S> {
    type Item = &'a Q;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, q)| q)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    #[test]
    fn reachable_states() {
        let dfa = TSBuilder::new()
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 2),
                (1, 'b', 0),
                (2, 'a', 2),
                (2, 'b', 2),
                (3, 'a', 0),
                (3, 'b', 0),
            ])
            .with_accepting([2])
            .into_dfa(0);

        assert_eq!(
            dfa.ts().minimal_representatives().collect::<Vec<_>>(),
            vec![(vec![], &0), (vec!['a'], &1), (vec!['a', 'a'], &2)]
        );
        assert_eq!(
            dfa.ts().reachable_state_indices().collect_vec(),
            vec![&0, &1, &2]
        );
        assert_eq!(
            dfa.ts().reachable_state_indices().count() + 1,
            dfa.size(),
            "state 3 is unreachable"
        );
    }

    #[test]
    fn representatives_are_length_lexicographically_minimal() {
        // 0 -b-> 1 -a-> 3 and 0 -a-> 2 -b-> 3, so 3 is reached by "ab" before "ba"
        let dfa = TSBuilder::new()
            .with_edges([
                (0, 'a', 2),
                (0, 'b', 1),
                (1, 'a', 3),
                (1, 'b', 1),
                (2, 'a', 2),
                (2, 'b', 3),
                (3, 'a', 3),
                (3, 'b', 3),
            ])
            .into_dfa(0);

        let reps = dfa.ts().minimal_representatives().collect::<Vec<_>>();
        assert_eq!(
            reps,
            vec![
                (vec![], &0),
                (vec!['a'], &2),
                (vec!['b'], &1),
                (vec!['a', 'b'], &3)
            ]
        );
    }
}
