//! An automaton is exchanged as a JSON object with three fields
//! - `delta`, mapping the name of each state to an object that maps each symbol to the name of the successor state,
//! - `init`, the name of the initial state, and
//! - `accept`, the list of names of accepting states.
//!
//! State names and symbols are strings. A word over such an automaton is printed as the concatenation
//! of its symbols.
//!
//! # Example
//! ```
//! use eqdfa::json;
//!
//! let dfa = json::from_json_str(
//!     r#"{"delta": {"q0": {"a": "q1"}, "q1": {"a": "q0"}}, "init": "q0", "accept": ["q1"]}"#,
//! )
//! .unwrap();
//! assert_eq!(dfa.size(), 2);
//! assert!(dfa.accepts(["a".to_string()]));
//! ```
use std::{collections::BTreeMap, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{math::Map, prelude::*};

/// The serialized form of a [`Dfa`] over `String` states and symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaDescription {
    /// The transition table, the outer key is the origin state, the inner key the symbol.
    pub delta: BTreeMap<String, BTreeMap<String, String>>,
    /// Name of the initial state.
    pub init: String,
    /// Names of the accepting states.
    pub accept: Vec<String>,
}

impl TryFrom<DfaDescription> for Dfa {
    type Error = DfaError;

    fn try_from(value: DfaDescription) -> Result<Self, Self::Error> {
        let transitions: Map<String, Map<String, String>> = value
            .delta
            .into_iter()
            .map(|(q, row)| (q, row.into_iter().collect()))
            .collect();
        let ts = TransitionSystem::from_parts(transitions, value.init)?;
        let dfa = Dfa::from_parts(ts, value.accept)?;
        trace!("parsed automaton\n{dfa}");
        Ok(dfa)
    }
}

impl From<&Dfa> for DfaDescription {
    fn from(dfa: &Dfa) -> Self {
        let delta = dfa
            .states()
            .map(|q| {
                let row = dfa
                    .ts()
                    .edges_from(q)
                    .into_iter()
                    .flatten()
                    .map(|(sym, p)| (sym.clone(), p.clone()))
                    .collect();
                (q.clone(), row)
            })
            .collect();
        Self {
            delta,
            init: dfa.initial().clone(),
            accept: dfa.accepting_states().sorted().cloned().collect(),
        }
    }
}

/// Parses a single automaton from its JSON encoding.
pub fn from_json_str(json: &str) -> Result<Dfa, DfaError> {
    let description: DfaDescription = serde_json::from_str(json)?;
    description.try_into()
}

/// Parses a JSON array of automata.
pub fn array_from_json_str(json: &str) -> Result<Vec<Dfa>, DfaError> {
    let descriptions: Vec<DfaDescription> = serde_json::from_str(json)?;
    descriptions.into_iter().map(Dfa::try_from).collect()
}

fn read_file(path: &Path) -> Result<String, DfaError> {
    debug!("reading automata from {}", path.display());
    std::fs::read_to_string(path).map_err(|source| DfaError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads a single automaton from a file containing its JSON encoding.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Dfa, DfaError> {
    from_json_str(&read_file(path.as_ref())?)
}

/// Reads a file containing a JSON array of automata.
pub fn array_from_json_file(path: impl AsRef<Path>) -> Result<Vec<Dfa>, DfaError> {
    array_from_json_str(&read_file(path.as_ref())?)
}

/// Encodes `dfa` as a JSON object.
pub fn to_json_string(dfa: &Dfa) -> Result<String, DfaError> {
    Ok(serde_json::to_string(&DfaDescription::from(dfa))?)
}

/// Renders a distinguishing word as JSON: the concatenation of its symbols as a string, or
/// `null` if there is no such word.
pub fn render_witness(witness: Option<&[String]>) -> String {
    match witness {
        Some(word) => serde_json::Value::String(word.concat()).to_string(),
        None => serde_json::Value::Null.to_string(),
    }
}
