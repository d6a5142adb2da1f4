//! Idempotent fixture generation.
//!
//! The generator walks the catalog in order. A fixture whose file
//! already exists is skipped without being recomputed; otherwise the
//! case is evaluated, encoded in memory, written to a temporary file in
//! the fixture directory and moved into place with a no-clobber rename.
//! A fixture is thus never observed half-written under its final name,
//! and a fixture that appears concurrently is left alone (the case
//! counts as skipped).
//!
//! Console output goes to two caller-provided sinks:
//!
//!  - `out` receives `generating... `, then ` name=value` for each
//!    check, then `\ndone.`;
//!  - `progress` receives ` name` for each newly created fixture.
//!
//! Any error aborts the run; fixtures created before the error remain
//! on disk, so a later run only completes the missing ones.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::string::String;
use std::vec::Vec;

use tracing::{debug, info};

use super::catalog::{Case, Entry};
use super::error::{Error, Result};

/// Outcome of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Names of the fixtures created by this run, in catalog order.
    pub created: Vec<String>,
    /// Number of fixtures left untouched because they already existed.
    pub skipped: usize,
    /// Printed checks, as (name, value).
    pub checks: Vec<(String, u32)>,
}

/// Fixture generator bound to one fixture directory.
#[derive(Clone, Debug)]
pub struct Generator {
    dir: PathBuf,
}

impl Generator {

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Runs all entries, creating the fixture directory if needed.
    pub fn run<O, E>(&self, entries: &[Entry], out: &mut O, progress: &mut E)
        -> Result<Summary>
        where O: Write + ?Sized, E: Write + ?Sized
    {
        fs::create_dir_all(&self.dir).map_err(|source| Error::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        info!(dir = %self.dir.display(), entries = entries.len(), "generating fixtures");

        writeln!(out, "generating... ")?;
        out.flush()?;

        let mut summary = Summary::default();
        for entry in entries {
            match entry {
                Entry::Fixture(case) => {
                    if self.generate(case)? {
                        write!(progress, " {}", case.name())?;
                        progress.flush()?;
                        summary.created.push(case.name().into());
                    } else {
                        summary.skipped += 1;
                    }
                }
                Entry::Check(check) => {
                    let value = check.eval();
                    debug!(name = check.name(), value, "check");
                    write!(out, " {}={}", check.name(), value)?;
                    summary.checks.push((check.name().into(), value));
                }
            }
        }

        writeln!(out, "\ndone.")?;
        out.flush()?;
        info!(created = summary.created.len(), skipped = summary.skipped,
            "fixture generation complete");
        Ok(summary)
    }

    // Produces one fixture; returns false if it already existed.
    fn generate(&self, case: &Case) -> Result<bool> {
        let path = self.dir.join(case.name());
        if path.exists() {
            debug!(name = case.name(), "fixture exists, skipped");
            return Ok(false);
        }
        let bytes = case.eval()?.encode();
        let created = persist(&self.dir, &path, &bytes)?;
        if created {
            debug!(name = case.name(), len = bytes.len(), "fixture created");
        } else {
            debug!(name = case.name(), "fixture appeared concurrently, skipped");
        }
        Ok(created)
    }
}

// Writes `bytes` to `path` through a temporary file in `dir`. Returns
// false if `path` already exists (it is not modified).
fn persist(dir: &Path, path: &Path, bytes: &[u8]) -> Result<bool> {
    let err = |source: io::Error| Error::Persist { path: path.to_path_buf(), source };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(err)?;
    tmp.write_all(bytes).map_err(err)?;
    tmp.flush().map_err(err)?;
    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(err(e.error)),
    }
}

// ========================================================================
