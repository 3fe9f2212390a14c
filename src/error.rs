use thiserror::Error;

/// Everything that can go wrong when constructing, loading or comparing automata. States and
/// symbols are stored in their shown form (see [`crate::Show`]), so the error type does not
/// depend on the type parameters of the automaton that caused it.
#[derive(Debug, Error)]
pub enum DfaError {
    /// The initial state has no row in the transition table.
    #[error("initial state \"{0}\" does not appear in the transition table")]
    MissingInitialState(String),
    /// A transition target or accepting state is not a state of the automaton.
    #[error("state \"{0}\" is referenced but has no row in the transition table")]
    UnknownState(String),
    /// The outgoing symbols of some state differ from the outgoing symbols of the initial state.
    #[error("state \"{state}\" has outgoing symbols {found}, but the alphabet is {expected}")]
    NonUniformAlphabet {
        /// The offending state.
        state: String,
        /// The alphabet derived from the initial state.
        expected: String,
        /// The symbols on which `state` has a transition.
        found: String,
    },
    /// A transition was requested for a symbol on which the state has none.
    #[error("state \"{state}\" has no transition on symbol \"{symbol}\"")]
    UndefinedTransition {
        /// The origin of the requested transition.
        state: String,
        /// The requested symbol.
        symbol: String,
    },
    /// The two automata that should be compared are defined over different alphabets.
    #[error("automata are defined over different alphabets {left} and {right}")]
    AlphabetMismatch {
        /// Alphabet of the left automaton.
        left: String,
        /// Alphabet of the right automaton.
        right: String,
    },
    /// The JSON encoding of an automaton could not be parsed.
    #[error("malformed automaton description: {0}")]
    Json(#[from] serde_json::Error),
    /// A file containing automata could not be read.
    #[error("could not read \"{path}\": {source}")]
    Io {
        /// The path of the file.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },
}
