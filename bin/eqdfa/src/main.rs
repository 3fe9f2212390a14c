use std::path::PathBuf;
use std::process::ExitCode;

use eqdfa::prelude::*;
use eqdfa::json;

use tracing::{debug, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

const ABOUT: &str = "Given two DFAs, decides whether they accept the same language";

const LONG_ABOUT: &str = "Given two DFAs, decides whether they accept the same language.

A DFA is encoded as a JSON object of the form
    {\"delta\":  {name_of_state: {letter: name_of_next_state}},
     \"init\":   name_of_init_state,
     \"accept\": [accepting_states]}
Exactly two DFAs have to be given, they are read in the order in which they appear on the command line.";

fn cli() -> Command {
    Command::new("eqdfa")
        .about(ABOUT)
        .long_about(LONG_ABOUT)
        .arg_required_else_help(true)
        .arg(
            Arg::new("string")
                .short('s')
                .value_name("JSON")
                .action(ArgAction::Append)
                .help("JSON encoding of a DFA"),
        )
        .arg(
            Arg::new("strings")
                .short('S')
                .value_name("JSON")
                .action(ArgAction::Append)
                .help("JSON encoding of an array of DFAs"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Append)
                .help("path to a file containing the JSON encoding of a DFA"),
        )
        .arg(
            Arg::new("files")
                .short('F')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Append)
                .help("path to a file containing the JSON encoding of an array of DFAs"),
        )
        .arg(
            Arg::new("diff")
                .short('d')
                .action(ArgAction::SetTrue)
                .help("output the shortest word that distinguishes the two DFAs, or null if they are equivalent"),
        )
        .arg(
            Arg::new("common-alphabet")
                .long("common-alphabet")
                .action(ArgAction::SetTrue)
                .help("compare DFAs over different alphabets on their common symbols instead of failing"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("please provide two DFAs")]
    WrongCount(usize),
    #[error(transparent)]
    Dfa(#[from] DfaError),
}

/// A place from which automata are read.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Json(String),
    JsonArray(String),
    File(PathBuf),
    FileArray(PathBuf),
}

impl Source {
    fn load(&self) -> Result<Vec<Dfa>, DfaError> {
        debug!("loading automata from {self:?}");
        Ok(match self {
            Source::Json(text) => vec![json::from_json_str(text)?],
            Source::JsonArray(text) => json::array_from_json_str(text)?,
            Source::File(path) => vec![json::from_json_file(path)?],
            Source::FileArray(path) => json::array_from_json_file(path)?,
        })
    }
}

/// Collects all sources in the order in which they were given on the command line.
fn sources(matches: &ArgMatches) -> Vec<Source> {
    fn tagged<T: Clone + Send + Sync + 'static>(
        matches: &ArgMatches,
        id: &str,
        wrap: fn(T) -> Source,
    ) -> Vec<(usize, Source)> {
        matches
            .indices_of(id)
            .into_iter()
            .flatten()
            .zip(matches.get_many::<T>(id).into_iter().flatten().cloned())
            .map(|(index, value)| (index, wrap(value)))
            .collect()
    }

    let mut sources = tagged(matches, "string", Source::Json);
    sources.extend(tagged(matches, "strings", Source::JsonArray));
    sources.extend(tagged(matches, "file", Source::File));
    sources.extend(tagged(matches, "files", Source::FileArray));
    sources.sort_by_key(|(index, _)| *index);
    sources.into_iter().map(|(_, source)| source).collect()
}

/// Loads the automata from `sources`, compares them and returns the line that should be printed.
fn run(sources: &[Source], diff: bool, policy: AlphabetPolicy) -> Result<String, CliError> {
    let mut dfas = Vec::new();
    for source in sources {
        dfas.extend(source.load()?);
    }
    let [left, right] = <[Dfa; 2]>::try_from(dfas).map_err(|dfas| CliError::WrongCount(dfas.len()))?;

    let witness = Equivalence::new(policy).distinguishing_word(&left, &right)?;
    Ok(if diff {
        json::render_witness(witness.as_deref())
    } else {
        witness.is_none().to_string()
    })
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let policy = if matches.get_flag("common-alphabet") {
        AlphabetPolicy::Intersect
    } else {
        AlphabetPolicy::Strict
    };

    match run(&sources(&matches), matches.get_flag("diff"), policy) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e @ CliError::WrongCount(count)) => {
            debug!("received {count} automata");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
