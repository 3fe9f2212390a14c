use std::{borrow::Borrow, fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::{
    alphabet::Symbol,
    math::{Map, Set},
    Alphabet, DfaError, Show,
};

mod builder;
pub use builder::TSBuilder;

mod product;
pub use product::ProductIndex;

mod reachable;
pub use reachable::{MinimalRepresentative, MinimalRepresentatives, ReachableStateIndices};

/// A state index identifies a state within one transition system. Apart from identity it carries
/// no meaning, the total order is only used for printing states in a stable order.
pub trait StateIndex: Clone + Eq + Ord + Hash + Debug + Show {}

impl<T: Clone + Eq + Ord + Hash + Debug + Show> StateIndex for T {}

/// Type alias for a single row of the transition table, mapping each symbol to the successor state.
pub type TransitionRow<Q, S> = Map<S, Q>;

/// A deterministic and complete transition system. Every state has precisely one outgoing
/// transition for every symbol of the [`Alphabet`], which is derived from the symbols on
/// which the initial state has a transition.
///
/// The set of states is the set of keys in the transition table, in particular it may contain
/// states that are not reachable from the initial state.
///
/// # Example
/// ```
/// use eqdfa::prelude::*;
///
/// let mut transitions = math::Map::default();
/// transitions.insert(0, math::Map::from_iter([('a', 1), ('b', 0)]));
/// transitions.insert(1, math::Map::from_iter([('a', 1), ('b', 0)]));
/// let ts = TransitionSystem::from_parts(transitions, 0).unwrap();
/// assert_eq!(ts.size(), 2);
/// assert_eq!(ts.reached_state("ab".chars()), Some(&0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionSystem<Q: StateIndex, S: Symbol> {
    alphabet: Alphabet<S>,
    transitions: Map<Q, TransitionRow<Q, S>>,
    initial: Q,
}

impl<Q: StateIndex, S: Symbol> TransitionSystem<Q, S> {
    /// Creates a transition system from its table and initial state. This fails if
    /// - `initial` has no row in `transitions`,
    /// - some row does not have exactly the symbols of the initial row, or
    /// - some transition leads to a state that has no row.
    pub fn from_parts(
        transitions: Map<Q, TransitionRow<Q, S>>,
        initial: Q,
    ) -> Result<Self, DfaError> {
        let alphabet: Alphabet<S> = transitions
            .get(&initial)
            .ok_or_else(|| DfaError::MissingInitialState(initial.show()))?
            .keys()
            .cloned()
            .collect();

        for (state, row) in transitions.iter().sorted_by(|x, y| x.0.cmp(y.0)) {
            if row.len() != alphabet.size() || row.keys().any(|sym| !alphabet.contains(sym)) {
                return Err(DfaError::NonUniformAlphabet {
                    state: state.show(),
                    expected: alphabet.show(),
                    found: S::show_collection(row.keys().sorted()),
                });
            }
            if let Some(target) = row
                .values()
                .sorted()
                .find(|target| !transitions.contains_key(*target))
            {
                return Err(DfaError::UnknownState(target.show()));
            }
        }

        Ok(Self::from_parts_unchecked(alphabet, transitions, initial))
    }

    /// Assembles a transition system whose table is already known to be uniform over `alphabet`.
    pub(crate) fn from_parts_unchecked(
        alphabet: Alphabet<S>,
        transitions: Map<Q, TransitionRow<Q, S>>,
        initial: Q,
    ) -> Self {
        debug_assert!(transitions.contains_key(&initial));
        Self {
            alphabet,
            transitions,
            initial,
        }
    }

    /// Returns a reference to the alphabet, i.e. the symbols on which the initial state has a transition.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// Returns the designated initial state.
    pub fn initial(&self) -> &Q {
        &self.initial
    }

    /// Iterates over all states, reachable or not, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &Q> + '_ {
        self.transitions.keys()
    }

    /// Collects the set of all states.
    pub fn state_set(&self) -> Set<Q> {
        self.states().cloned().collect()
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.transitions.len()
    }

    /// Returns `true` if `state` has a row in the transition table.
    pub fn contains_state(&self, state: &Q) -> bool {
        self.transitions.contains_key(state)
    }

    /// Returns the transition row of `state`, if it exists.
    pub fn row(&self, state: &Q) -> Option<&TransitionRow<Q, S>> {
        self.transitions.get(state)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = (&Q, &TransitionRow<Q, S>)> + '_ {
        self.transitions.iter()
    }

    /// Returns the state that is reached from `state` on `symbol`, or `None` if there is no
    /// such transition.
    pub fn successor(&self, state: &Q, symbol: &S) -> Option<&Q> {
        self.transitions.get(state)?.get(symbol)
    }

    /// Like [`Self::successor`], but a missing transition is reported as an
    /// [`DfaError::UndefinedTransition`] instead of `None`.
    pub fn transition(&self, state: &Q, symbol: &S) -> Result<&Q, DfaError> {
        self.successor(state, symbol)
            .ok_or_else(|| DfaError::UndefinedTransition {
                state: state.show(),
                symbol: symbol.show(),
            })
    }

    /// Iterates over the outgoing transitions of `state` in the order of the alphabet. Returns
    /// `None` if `state` does not exist.
    pub fn edges_from<'a>(
        &'a self,
        state: &Q,
    ) -> Option<impl Iterator<Item = (&'a S, &'a Q)> + 'a> {
        let row = self.transitions.get(state)?;
        Some(
            self.alphabet
                .universe()
                .filter_map(move |sym| row.get(sym).map(|target| (sym, target))),
        )
    }

    /// Runs `word` starting in `origin` and returns the state that is reached. If the run gets
    /// stuck because some symbol has no transition, `None` is returned.
    pub fn reached_state_from<'a, W, B>(&'a self, origin: &'a Q, word: W) -> Option<&'a Q>
    where
        W: IntoIterator<Item = B>,
        B: Borrow<S>,
    {
        word.into_iter()
            .try_fold(origin, |state, sym| self.successor(state, sym.borrow()))
    }

    /// Runs `word` from the initial state, see [`Self::reached_state_from`].
    pub fn reached_state<W, B>(&self, word: W) -> Option<&Q>
    where
        W: IntoIterator<Item = B>,
        B: Borrow<S>,
    {
        self.reached_state_from(&self.initial, word)
    }

    /// Returns an iterator over the minimal representatives of all states that are reachable from the
    /// initial state, see [`MinimalRepresentatives`].
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_, Q, S> {
        MinimalRepresentatives::new(self, &self.initial)
    }

    /// Returns an iterator over the indices of all states reachable from the initial state.
    pub fn reachable_state_indices(&self) -> ReachableStateIndices<'_, Q, S> {
        ReachableStateIndices::new(self, &self.initial)
    }

    /// Renders the transition table as a table with one row per state and one column per
    /// symbol. The first column of each row is produced by `state_decorator`.
    pub fn build_transition_table<SD>(&self, state_decorator: SD) -> String
    where
        SD: Fn(&Q) -> String,
    {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(self.alphabet.universe().map(Show::show)),
        );
        for (state, row) in self.transitions.iter().sorted_by(|x, y| x.0.cmp(y.0)) {
            builder.push_record(std::iter::once(state_decorator(state)).chain(
                self.alphabet.universe().map(|sym| {
                    row.get(sym)
                        .map(Show::show)
                        .unwrap_or_else(|| "-".to_string())
                }),
            ));
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}
