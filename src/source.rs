//! Defines the [`Source`] type: where an entry's raw markup comes from. A
//! source is either a file on disk or a remote git repository whose
//! `README.rst` is the post. Fetching a remote source clones the repository
//! into a scratch directory, reads the README out of the clone, and removes
//! the scratch directory again on every path out of the function.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The file read out of a cloned repository.
const README: &str = "README.rst";

/// A single capability: produce the raw markup text for an entry.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// A markup file on the local filesystem.
    Local(PathBuf),

    /// A git repository locator whose `README.rst` is the markup.
    Git(String),
}

impl Source {
    /// Produces the raw markup text. `vcs` is the clone command to shell out
    /// to for remote sources.
    ///
    /// The clone's exit status is deliberately not inspected: a clone that
    /// failed leaves no `README.rst` behind, and the read below reports
    /// that. Only a spawn failure (e.g. the command does not exist) errors
    /// out directly.
    pub fn fetch(&self, vcs: &str) -> Result<String> {
        match self {
            Source::Local(path) => read(path),
            Source::Git(url) => {
                let scratch = tempfile::tempdir()?;
                Command::new(vcs)
                    .arg("clone")
                    .arg(url)
                    .arg(scratch.path())
                    .status()
                    .map_err(|e| Error::Clone {
                        url: url.clone(),
                        err: e,
                    })?;
                read(&scratch.path().join(README))
            }
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_owned(),
        err: e,
    })
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem producing an entry's raw markup.
#[derive(Debug)]
pub enum Error {
    /// Returned when a source file can't be read. For remote sources this is
    /// also how a failed clone surfaces: the expected `README.rst` is not
    /// there to read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when the clone command can't be spawned at all.
    Clone { url: String, err: std::io::Error },

    /// Returned for other I/O errors, e.g. creating the scratch directory.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err } => {
                write!(f, "Reading source file '{}': {}", path.display(), err)
            }
            Error::Clone { url, err } => write!(f, "Cloning '{}': {}", url, err),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
            Error::Clone { url: _, err } => Some(err),
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

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_fetch_local() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("hello.rst");
        write!(fs::File::create(&path)?, "Hello\n=====\n\nBody text.\n")?;

        let source = Source::Local(path);
        assert_eq!(source.fetch("git")?, "Hello\n=====\n\nBody text.\n");
        Ok(())
    }

    #[test]
    fn test_fetch_local_missing() {
        let source = Source::Local(PathBuf::from("/no/such/file.rst"));
        match source.fetch("git") {
            Err(Error::Read { path, err: _ }) => {
                assert_eq!(path, PathBuf::from("/no/such/file.rst"))
            }
            other => panic!("expected a read error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_fetch_git() -> anyhow::Result<()> {
        // A stand-in clone command that drops a README into the target
        // directory. `$3` is the scratch directory the fetch passes after
        // `clone <url>`.
        let source = Source::Git(String::from("git@example.org:someone/post"));
        assert_eq!(
            source.fetch(&fake_vcs("mkdir -p \"$3\" && printf 'Title\\n=====\\n' > \"$3\"/README.rst")?)?,
            "Title\n=====\n"
        );
        Ok(())
    }

    #[test]
    fn test_fetch_git_failed_clone_reports_missing_readme() -> anyhow::Result<()> {
        // A clone that exits non-zero without producing anything must
        // surface as the README read failing, not as a clone error.
        let source = Source::Git(String::from("git@example.org:someone/post"));
        match source.fetch(&fake_vcs("exit 128")?) {
            Err(Error::Read { path, err: _ }) => {
                assert!(path.ends_with(README));
                Ok(())
            }
            other => panic!("expected a read error, got {:?}", other.map(|_| ())),
        }
    }

    // Writes a fake clone executable wrapping `script` and returns its path.
    // The tempdir is leaked so the executable outlives the helper.
    fn fake_vcs(script: &str) -> anyhow::Result<String> {
        let dir = tempfile::tempdir()?.into_path();
        let path = dir.join("fake-git");
        write!(fs::File::create(&path)?, "#!/bin/sh\n{}\n", script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path.to_string_lossy().into_owned())
    }
}
