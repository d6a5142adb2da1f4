//! uecc-gen: writes the conformance fixture set.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use uecc_fixtures::catalog::{catalog, Entry};
use uecc_fixtures::driver::Generator;
use uecc_fixtures::Error;

#[derive(Parser)]
#[command(name = "uecc-gen")]
#[command(about = "Generate byte-exact Curve25519 arithmetic fixtures", long_about = None)]
#[command(version)]
struct Cli {
    /// Fixture directory (created if missing)
    #[arg(long, default_value = "cases")]
    dir: PathBuf,

    /// Print the catalog entry names and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn list(entries: &[Entry]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for e in entries {
        let kind = match e {
            Entry::Fixture(_) => "fixture",
            Entry::Check(_) => "check",
        };
        writeln!(out, "{} {}", kind, e.name())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let entries = catalog();
    if cli.list {
        return match list(&entries) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("uecc-gen: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let generator = Generator::new(cli.dir);
    let r = generator.run(&entries, &mut io::stdout(), &mut io::stderr());
    match r {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(dir = %generator.dir().display(), error = ?e, "generation failed");
            let _ = report_failure(&e, &mut io::stderr());
            ExitCode::FAILURE
        }
    }
}

// Writes the one-line diagnostic for a fatal error, after the progress
// tokens.
fn report_failure<W: Write + ?Sized>(e: &Error, w: &mut W) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "uecc-gen: {}", e)?;
    w.flush()
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn failure_reported_once() {
        let e = Error::Unpack { index: 1 };
        let mut w = Vec::new();
        report_failure(&e, &mut w).unwrap();
        let text = String::from_utf8(w).unwrap();
        assert_eq!(text, "\nuecc-gen: fixed test key 1 does not decode to a curve point\n");
        assert_eq!(text.matches("does not decode").count(), 1);
    }
}
