//! Shells out to the external markup-to-HTML converter. The converter wants
//! a file, not stdin, so the markup goes into a scratch directory first; the
//! scratch directory is removed again when rendering returns, success or
//! not.

use std::fmt;
use std::fs;
use std::process::Command;

/// The converter's own base stylesheet, always passed ahead of the site
/// stylesheet.
const BASE_STYLESHEET: &str = "html4css1.css";

/// The file name the markup is staged under inside the scratch directory.
const SCRATCH_FILE: &str = "page.rst";

/// Invokes the external converter: one command, one stylesheet argument, one
/// markup file, HTML on stdout.
pub struct Renderer {
    program: String,
    stylesheets: String,
}

impl Renderer {
    pub fn new(program: &str, site_stylesheet: &str) -> Renderer {
        Renderer {
            program: program.to_owned(),
            stylesheets: format!("{},{}", BASE_STYLESHEET, site_stylesheet),
        }
    }

    /// Renders `markup` to HTML. The converter's exit status is not
    /// inspected; whatever it wrote to stdout is the result. A converter
    /// that produced nothing yields an empty page, which downstream
    /// template splicing degrades on silently.
    pub fn render(&self, markup: &str) -> Result<String> {
        let scratch = tempfile::tempdir()?;
        let path = scratch.path().join(SCRATCH_FILE);
        fs::write(&path, markup)?;

        let output = Command::new(&self.program)
            .arg(format!("--stylesheet={}", self.stylesheets))
            .arg(&path)
            .output()
            .map_err(|e| Error::Spawn {
                program: self.program.clone(),
                err: e,
            })?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem invoking the external converter.
#[derive(Debug)]
pub enum Error {
    /// Returned when the converter can't be spawned at all.
    Spawn { program: String, err: std::io::Error },

    /// Returned for I/O problems staging the markup into the scratch
    /// directory.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Spawn { program, err } => {
                write!(f, "Running renderer '{}': {}", program, err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn { program: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
