use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, ExitCode};

use clap::Parser;
use eqdfa::prelude::{DfaError, Show};
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::{filter, prelude::*};

const CHECK_ANSWER_PREFIX: &str = "/checkanswerapi/";

#[derive(Debug, Clone, clap::Parser)]
#[command(
    name = "eqdfa-server",
    about = "Serves answer checking for DFA exercises over HTTP",
    long_about = "Serves answer checking for DFA exercises over HTTP.

POST /checkanswerapi/<level> with the JSON encoding of a DFA as body compares it against the reference \
automaton <levels>/<level>.json and responds with the shortest distinguishing word, or null if the two \
are equivalent. Other GET requests are answered with files from the static directory."
)]
struct Cli {
    /// Address the server listens on.
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    address: String,
    /// Directory containing the reference automata, one `<level>.json` per level.
    #[arg(short, long, default_value = ".")]
    levels: PathBuf,
    /// Directory from which static files are served.
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
    /// The equivalence checker that is invoked for every request.
    #[arg(long, default_value = "eqdfa")]
    eqdfa: PathBuf,
    /// Increase logging verbosity, can be given multiple times.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// The answer to a request before it is turned into a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into().into_bytes(),
        }
    }

    fn into_response(self) -> Response<std::io::Cursor<Vec<u8>>> {
        let response = Response::from_data(self.body).with_status_code(self.status);
        match Header::from_bytes("Content-Type", self.content_type) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

fn is_valid_level(level: &str) -> bool {
    !level.is_empty()
        && level
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Compares the candidate automaton in `guess` against the reference automaton of `level` by
/// running the equivalence checker in witness mode.
fn check_answer(cli: &Cli, level: &str, guess: &str) -> Reply {
    info!("checking answer for level {level}");
    trace!("guess = {guess}");
    if !is_valid_level(level) {
        return Reply::text(400, format!("invalid level name \"{level}\""));
    }
    if guess.trim().is_empty() {
        return Reply::text(510, "empty answer");
    }
    let candidate = match eqdfa::json::from_json_str(guess) {
        Ok(dfa) => dfa,
        Err(e) => {
            debug!("rejecting malformed answer: {e}");
            return Reply::text(400, e.to_string());
        }
    };

    let answer = cli.levels.join(format!("{level}.json"));
    if !answer.is_file() {
        warn!("no reference automaton at {}", answer.display());
        return Reply::text(404, format!("unknown level \"{level}\""));
    }
    let reference = match eqdfa::json::from_json_file(&answer) {
        Ok(dfa) => dfa,
        Err(e) => {
            error!("reference automaton of level {level} is unusable: {e}");
            return Reply::text(500, "invalid reference automaton");
        }
    };
    if candidate.alphabet() != reference.alphabet() {
        let mismatch = DfaError::AlphabetMismatch {
            left: candidate.alphabet().show(),
            right: reference.alphabet().show(),
        };
        debug!("rejecting answer for level {level}: {mismatch}");
        return Reply::text(400, mismatch.to_string());
    }

    let output = match Command::new(&cli.eqdfa)
        .arg("-d")
        .arg("-s")
        .arg(guess)
        .arg("-f")
        .arg(&answer)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            error!("could not run {}: {e}", cli.eqdfa.display());
            return Reply::text(500, "could not run equivalence check");
        }
    };

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout).into_owned();
        info!("result = {}", result.trim_end());
        Reply {
            status: 200,
            content_type: "application/json",
            body: result.into_bytes(),
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        error!("equivalence check exited with {}: {}", output.status, stderr.trim_end());
        Reply::text(500, stderr)
    }
}

/// Maps a request path onto a file below `root`, refusing paths that would leave it.
fn static_path(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    let file = root.join(relative);
    Some(if file.is_dir() {
        file.join("index.html")
    } else {
        file
    })
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

fn serve_static(cli: &Cli, url: &str) -> Reply {
    let not_found = || Reply::text(404, "not found");
    let Some(path) = static_path(&cli.static_dir, url) else {
        return not_found();
    };
    match std::fs::read(&path) {
        Ok(body) => Reply {
            status: 200,
            content_type: content_type(&path),
            body,
        },
        Err(e) => {
            debug!("could not serve {}: {e}", path.display());
            not_found()
        }
    }
}

fn dispatch(cli: &Cli, method: &Method, url: &str, body: &str) -> Reply {
    match (method, url.strip_prefix(CHECK_ANSWER_PREFIX)) {
        (Method::Post, Some(level)) => check_answer(cli, level, body),
        (_, Some(_)) => Reply::text(405, "method not allowed"),
        (Method::Get, None) => serve_static(cli, url),
        _ => Reply::text(405, "method not allowed"),
    }
}

fn handle(cli: &Cli, mut request: Request) {
    debug!("{} {}", request.method(), request.url());
    let mut body = String::new();
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => dispatch(cli, request.method(), request.url(), &body),
        Err(e) => Reply::text(400, format!("could not read request body: {e}")),
    };
    if let Err(e) = request.respond(reply.into_response()) {
        warn!("could not send response: {e}");
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => filter::LevelFilter::INFO,
        1 => filter::LevelFilter::DEBUG,
        _ => filter::LevelFilter::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let server = match Server::http(&cli.address) {
        Ok(server) => server,
        Err(e) => {
            error!("could not listen on {}: {e}", cli.address);
            return ExitCode::FAILURE;
        }
    };
    info!("listening on {}", cli.address);

    for request in server.incoming_requests() {
        handle(&cli, request);
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    const ODD: &str = r#"{"delta": {"q0": {"0": "q0", "1": "q1"}, "q1": {"0": "q1", "1": "q0"}}, "init": "q0", "accept": ["q1"]}"#;

    fn cli(levels: &Path, eqdfa: &str) -> Cli {
        Cli {
            address: "127.0.0.1:0".to_string(),
            levels: levels.to_path_buf(),
            static_dir: levels.to_path_buf(),
            eqdfa: eqdfa.into(),
            verbose: 0,
        }
    }

    #[test]
    fn level_names() {
        assert!(is_valid_level("level1"));
        assert!(is_valid_level("intro_2-b"));
        assert!(!is_valid_level(""));
        assert!(!is_valid_level("../secret"));
        assert!(!is_valid_level("a.b"));
    }

    #[test]
    fn request_validation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level1.json"), ODD).unwrap();
        let cli = cli(dir.path(), "eqdfa");

        assert_eq!(check_answer(&cli, "level1", "  ").status, 510);
        assert_eq!(check_answer(&cli, "..", ODD).status, 400);
        assert_eq!(check_answer(&cli, "level1", "{\"delta\": {}}").status, 400);
        assert_eq!(check_answer(&cli, "level2", ODD).status, 404);
        assert_eq!(
            dispatch(&cli, &Method::Get, "/checkanswerapi/level1", "").status,
            405
        );
    }

    #[test]
    fn answers_over_another_alphabet_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("nothing.json"),
            r#"{"delta": {"q": {"a": "q", "b": "q"}}, "init": "q", "accept": []}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        // the checker must not be reached, a spawned process would answer 500
        let cli = cli(dir.path(), "false");

        let guess = r#"{"delta": {"p": {"0": "p", "1": "p"}}, "init": "p", "accept": ["p"]}"#;
        let reply = check_answer(&cli, "nothing", guess);
        assert_eq!(reply.status, 400);
        assert_eq!(
            String::from_utf8(reply.body).unwrap(),
            "automata are defined over different alphabets {0, 1} and {a, b}"
        );
        assert_eq!(check_answer(&cli, "broken", guess).status, 500);
    }

    #[test]
    fn static_directory_defaults_to_static() {
        let cli = Cli::try_parse_from(["eqdfa-server"]).unwrap();
        assert_eq!(cli.static_dir, PathBuf::from("static"));
        assert_eq!(cli.address, "127.0.0.1:5000");
    }

    #[cfg(unix)]
    #[test]
    fn invokes_checker_in_witness_mode() {
        let dir = tempfile::tempdir().unwrap();
        let answer = dir.path().join("level1.json");
        std::fs::write(&answer, ODD).unwrap();
        let cli = cli(dir.path(), "echo");

        let reply = dispatch(&cli, &Method::Post, "/checkanswerapi/level1", ODD);
        assert_eq!(reply.status, 200);
        assert_eq!(
            String::from_utf8(reply.body).unwrap(),
            format!("-d -s {ODD} -f {}\n", answer.display())
        );

        let failing = Cli {
            eqdfa: "false".into(),
            ..cli.clone()
        };
        assert_eq!(check_answer(&failing, "level1", ODD).status, 500);
        let missing = Cli {
            eqdfa: dir.path().join("no-such-binary"),
            ..cli
        };
        assert_eq!(check_answer(&missing, "level1", ODD).status, 500);
    }

    #[test]
    fn static_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        std::fs::write(dir.path().join("script.js"), "const radius = 60;").unwrap();
        let cli = cli(dir.path(), "eqdfa");

        let index = dispatch(&cli, &Method::Get, "/", "");
        assert_eq!(index.status, 200);
        assert_eq!(index.content_type, "text/html; charset=utf-8");

        let script = dispatch(&cli, &Method::Get, "/script.js?v=2", "");
        assert_eq!(script.status, 200);
        assert_eq!(script.body, b"const radius = 60;");

        assert_eq!(dispatch(&cli, &Method::Get, "/../etc/passwd", "").status, 404);
        assert_eq!(dispatch(&cli, &Method::Get, "/missing.css", "").status, 404);
        assert_eq!(dispatch(&cli, &Method::Delete, "/", "").status, 405);
        assert!(static_path(dir.path(), "/a/../b").is_none());
    }
}
