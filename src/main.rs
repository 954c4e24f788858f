//! `app-container-sid`: prints the SID of an AppContainer name.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for the name on stderr and read it from stdin
//! app-container-sid
//!
//! # Resolve a name given on the command line, with debug logs
//! app-container-sid -vv Contoso.DemoApp_8wekyb3d8bbwe
//!
//! # Force the in-process derivation
//! app-container-sid --backend portable Contoso.DemoApp_8wekyb3d8bbwe
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use app_container_sid::{Backend, ErrorKind, resolve_with};
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

const PROMPT: &str = "You can find the SID of a published UWP app in the Partner Center. \
If the app is not published yet, or is deployed as MSIX from a website, FTP or a shared \
folder, enter its app container name. For UWP apps it is the Package Family Name (PFN):";

/// Prints the Security Identifier of an AppContainer name.
#[derive(Parser, Debug)]
#[command(name = "app-container-sid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AppContainer name (package family name); read from stdin when omitted
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Identity subsystem used to derive the SID
    #[arg(long, value_enum, default_value_t = BackendArg::Auto)]
    backend: BackendArg,

    /// Log more (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// Host on Windows, portable elsewhere
    Auto,
    /// The Windows identity subsystem
    Host,
    /// In-process derivation, available everywhere
    Portable,
}

impl From<BackendArg> for Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Auto => Self::Auto,
            BackendArg::Host => Self::Host,
            BackendArg::Portable => Self::Portable,
        }
    }
}

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

const fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidName => 2,
        ErrorKind::ConversionFailure => 3,
        ErrorKind::SystemUnavailable => 4,
    }
}

/// Writes the prompt to stderr and reads one line.
fn prompt_name() -> io::Result<String> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{PROMPT}")?;
    writeln!(stderr)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_for(cli.verbose))
        .with_writer(io::stderr)
        .init();

    let backend = Backend::from(cli.backend);
    tracing::info!(?backend, effective = ?backend.effective(), "selected backend");

    let name = match cli.name {
        Some(name) => name,
        None => match prompt_name() {
            Ok(name) => name,
            Err(err) => {
                eprintln!("error: reading the container name failed: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    match resolve_with(backend, name.trim()) {
        Ok(sid) => {
            let mut stdout = io::stdout().lock();
            if let Err(err) = writeln!(stdout, "SID: {sid}") {
                eprintln!("error: writing the SID failed: {err}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(exit_code(err.kind()))
        }
    }
}
