use tracing::trace;

use crate::{math::Map, prelude::*};

/// Returns the first `size` lowercase letters, which are used as alphabet for random automata.
pub fn letters(size: usize) -> Vec<char> {
    assert!(size <= 26, "Alphabet is too large");
    (0..size).map(|i| (b'a' + i as u8) as char).collect()
}

/// Generate a random complete DFA with `size` states over the first `symbols` letters by randomly
/// drawing transitions. The algorithm is as follows:
/// 1. Start with `size` states `0..size` and no transitions, state `0` is initial.
/// 2. For each state, for each symbol draw a target state uniformly and add the corresponding edge.
/// 3. Each state is accepting with probability `accepting_probability`.
///
/// Note that depending on the drawn transitions, there may be unreachable states.
pub fn generate_random_dfa(symbols: usize, size: usize, accepting_probability: f64) -> Dfa<u32, char> {
    assert!(size > 0, "a DFA needs at least an initial state");
    let alphabet = letters(symbols);

    let mut transitions: Map<u32, Map<char, u32>> = Map::default();
    for q in 0..size as u32 {
        let row = alphabet
            .iter()
            .map(|sym| (*sym, fastrand::u32(..size as u32)))
            .collect();
        transitions.insert(q, row);
    }
    let accepting = (0..size as u32)
        .filter(|_| fastrand::f64() < accepting_probability)
        .collect::<Vec<_>>();
    trace!("drew random DFA with {size} states and accepting states {accepting:?}");

    let ts = TransitionSystem::from_parts_unchecked(alphabet.into_iter().collect(), transitions, 0);
    Dfa::from_parts(ts, accepting).expect("accepting states are drawn from the existing states")
}

/// Draws a random word over `alphabet` whose length lies in `min_len..=max_len`.
///
/// # Panics
/// If `alphabet` is empty while `max_len` is positive.
pub fn generate_random_word(alphabet: &[char], min_len: usize, max_len: usize) -> Vec<char> {
    assert!(
        !alphabet.is_empty() || max_len == 0,
        "cannot draw a non-empty word over an empty alphabet"
    );
    let len = fastrand::usize(min_len..=max_len);
    (0..len)
        .map(|_| alphabet[fastrand::usize(..alphabet.len())])
        .collect()
}
