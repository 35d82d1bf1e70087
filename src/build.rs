//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: writing every entry's page
//! ([`crate::entry`]), writing the generated index page ([`crate::index`]),
//! and copying the static assets into the output tree.

use crate::config::Config;
use crate::entry::{Entry, Error as EntryError};
use crate::index::{self, Error as IndexError};
use crate::render::Renderer;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// The subdirectory of the output directory the assets land in.
const ASSETS_OUTPUT: &str = "resources";

/// Builds the whole site into `outputdir`: one page per configured entry, in
/// order, then `index.html`, then the asset copy. Any failure aborts the
/// run; pages written before the failing step stay on disk.
pub fn build_site(config: &Config, outputdir: &Path) -> Result<()> {
    fs::create_dir_all(outputdir)?;

    let renderer = Renderer::new(&config.renderer, &config.stylesheet);
    let mut entries: Vec<Entry> = config
        .entries
        .iter()
        .cloned()
        .map(|e| Entry::new(e.title, e.date, e.source))
        .collect();

    for entry in &mut entries {
        let path = entry.write(outputdir, &renderer, config)?;
        info!(path = %path.display(), "wrote entry page");
    }

    let index = index::build_index(&mut entries, &renderer, config)?;
    fs::write(outputdir.join("index.html"), index)?;
    info!("wrote index page");

    copy_dir(&config.assets, &outputdir.join(ASSETS_OUTPUT))?;
    info!(from = %config.assets.display(), "copied static assets");

    Ok(())
}

/// Recursively copies `src` into `dst`. `dst` must not already exist; there
/// are no merge semantics, so rerunning into a populated output directory
/// fails here, with everything written earlier left in place.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir(dst).map_err(|e| Error::CopyAssets {
        path: dst.to_owned(),
        err: e,
    })?;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        // strip_prefix can't fail: `src` is always an ancestor of the entry
        let target = dst.join(entry.path().strip_prefix(src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during entry writing,
/// index building, asset copying, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors writing an entry's page.
    Entry(EntryError),

    /// Returned for errors building the index page.
    Index(IndexError),

    /// Returned when the asset destination can't be created, most commonly
    /// because it already exists from an earlier run.
    CopyAssets { path: PathBuf, err: std::io::Error },

    /// Returned for errors walking the asset directory.
    Walk(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Entry(err) => err.fmt(f),
            Error::Index(err) => err.fmt(f),
            Error::CopyAssets { path, err } => {
                write!(f, "Copying assets to '{}': {}", path.display(), err)
            }
            Error::Walk(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Entry(err) => Some(err),
            Error::Index(err) => Some(err),
            Error::CopyAssets { path: _, err } => Some(err),
            Error::Walk(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<EntryError> for Error {
    /// Converts [`EntryError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: EntryError) -> Error {
        Error::Entry(err)
    }
}

impl From<IndexError> for Error {
    /// Converts [`IndexError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: IndexError) -> Error {
        Error::Index(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::Walk(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{Author, EntryConfig};
    use crate::source::Source;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_copy_dir_copies_nested_tree() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("resources");
        fs::create_dir_all(src.join("img"))?;
        fs::write(src.join("blog.css"), "body {}")?;
        fs::write(src.join("img/favicon.png"), "png")?;
        let dst = dir.path().join("out/resources");
        fs::create_dir(dir.path().join("out"))?;

        copy_dir(&src, &dst)?;
        assert_eq!(fs::read_to_string(dst.join("blog.css"))?, "body {}");
        assert_eq!(fs::read_to_string(dst.join("img/favicon.png"))?, "png");
        Ok(())
    }

    #[test]
    fn test_copy_dir_refuses_existing_destination() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("resources");
        fs::create_dir(&src)?;
        let dst = dir.path().join("dst");
        fs::create_dir(&dst)?;

        match copy_dir(&src, &dst) {
            Err(Error::CopyAssets { path, err: _ }) => assert_eq!(path, dst),
            other => panic!("expected a copy error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_build_site_writes_pages_index_and_assets() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = project(dir.path())?;
        let outputdir = dir.path().join("out/site");

        build_site(&config, &outputdir)?;

        let page = fs::read_to_string(outputdir.join("Hello_World.html"))?;
        assert!(page.contains("Posted on 2020-01-01"));
        let index = fs::read_to_string(outputdir.join("index.html"))?;
        assert!(index.contains("Latest Posts"));
        assert!(index.contains("`Hello <Hello_World.html>`_"));
        assert!(!index.contains("disqus_thread"));
        assert_eq!(
            fs::read_to_string(outputdir.join("resources/blog.css"))?,
            "body {}"
        );
        Ok(())
    }

    #[test]
    fn test_rerun_fails_on_asset_copy_and_keeps_pages() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = project(dir.path())?;
        let outputdir = dir.path().join("site");

        build_site(&config, &outputdir)?;
        match build_site(&config, &outputdir) {
            Err(Error::CopyAssets { path: _, err: _ }) => {}
            other => panic!("expected the asset copy to fail, got {:?}", other),
        }
        assert!(outputdir.join("Hello_World.html").exists());
        assert!(outputdir.join("index.html").exists());
        Ok(())
    }

    // Lays out a minimal project under `dir`: one local post, an assets
    // directory, and a fake converter that wraps the markup in a minimal
    // HTML document.
    fn project(dir: &Path) -> anyhow::Result<Config> {
        let post = dir.join("hello.rst");
        write!(fs::File::create(&post)?, "Hello\n=====\n\nBody text.\n")?;
        fs::create_dir_all(dir.join("resources"))?;
        fs::write(dir.join("resources/blog.css"), "body {}")?;

        let renderer = dir.join("fake-rst2html");
        write!(
            fs::File::create(&renderer)?,
            "#!/bin/sh\nprintf '<html><head></head><body>'\ncat \"$2\"\nprintf '</body></html>'\n"
        )?;
        fs::set_permissions(&renderer, fs::Permissions::from_mode(0o755))?;

        Ok(Config {
            title: String::from("A Quiet Corner"),
            domain: String::from("blog.example.org"),
            stylesheet: String::from("resources/blog.css"),
            assets: dir.join("resources"),
            author: Some(Author {
                name: String::from("J. Doe"),
                email: None,
            }),
            comments: None,
            renderer: renderer.to_string_lossy().into_owned(),
            vcs: String::from("git"),
            entries: vec![EntryConfig {
                title: String::from("Hello World"),
                date: String::from("2020-01-01"),
                source: Source::Local(post),
            }],
        })
    }
}
