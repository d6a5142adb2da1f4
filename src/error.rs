//! Errors of the fixture generator.
//!
//! Every variant is fatal: a run stops at the first error, since a
//! partially wrong fixture set would silently invalidate the ports
//! validated against it. An already existing fixture is not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot create fixture directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write fixture {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },

    #[error("fixed test key {index} does not decode to a curve point")]
    Unpack { index: usize },

    #[error("cannot write console output: {source}")]
    Report {
        #[from]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {

    use super::*;
    use std::string::ToString;

    #[test]
    fn messages() {
        let e = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(e.to_string(), "cannot write console output: closed");
        assert_eq!(Error::Unpack { index: 2 }.to_string(),
            "fixed test key 2 does not decode to a curve point");
    }
}
