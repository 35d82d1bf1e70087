//! Loads the `blog.yaml` project file. The project file pins down everything
//! about the site that isn't an output-directory decision: the site's
//! metadata, the external commands the build shells out to, and the ordered
//! list of entries. Entries are fixed before the build starts; nothing adds
//! or removes them at runtime.

use crate::source::Source;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The file name the project file is discovered under.
const PROJECT_FILE: &str = "blog.yaml";

/// The author credited in the page footer.
#[derive(Clone, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// One configured blog entry: a display title, a display date (echoed
/// verbatim, never parsed), and where its raw markup comes from.
#[derive(Clone, Deserialize)]
pub struct EntryConfig {
    pub title: String,
    pub date: String,
    pub source: Source,
}

#[derive(Deserialize)]
pub struct Config {
    /// The site title, linked from the navigation header.
    pub title: String,

    /// The domain the site is served from. Only used to build the canonical
    /// page URL handed to the comment widget.
    pub domain: String,

    /// The site stylesheet, passed through to the renderer alongside the
    /// renderer's own base stylesheet.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    /// The static-assets directory copied verbatim into the output tree.
    #[serde(default = "default_assets")]
    pub assets: PathBuf,

    #[serde(default)]
    pub author: Option<Author>,

    /// The comment-widget account. Entry pages get a comment section when
    /// this is set; the index page never does.
    #[serde(default)]
    pub comments: Option<String>,

    /// The external markup-to-HTML command.
    #[serde(default = "default_renderer")]
    pub renderer: String,

    /// The external version-control command used to fetch remote sources.
    #[serde(default = "default_vcs")]
    pub vcs: String,

    /// The entries, in order. Order is significant: it is the index-page
    /// order, and the first six entries are the ones the index excerpts.
    pub entries: Vec<EntryConfig>,
}

fn default_stylesheet() -> String {
    String::from("resources/blog.css")
}

fn default_assets() -> PathBuf {
    PathBuf::from("resources")
}

fn default_renderer() -> String {
    String::from("rst2html")
}

fn default_vcs() -> String {
    String::from("git")
}

impl Config {
    /// Walks upward from `dir` until it finds a `blog.yaml` and loads it.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            match Config::from_project_file(&path) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        use crate::util::read;
        let mut config: Config = serde_yaml::from_str(&read(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                // Local source paths and the assets directory are written
                // relative to the project file; the build itself runs with an
                // arbitrary working directory.
                config.assets = project_root.join(&config.assets);
                for entry in &mut config.entries {
                    if let Source::Local(path) = &entry.source {
                        entry.source = Source::Local(project_root.join(path));
                    }
                }
                Ok(config)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    const PROJECT: &str = r#"
title: A Quiet Corner
domain: blog.example.org
entries:
  - title: Hello World
    date: 2020-01-01
    source:
      local: posts/hello.rst
  - title: Unit testing with Fortran and CTest
    date: 2017-04-06
    source:
      git: "git@github.com:example/ctest-fortran-unittest"
"#;

    #[test]
    fn test_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        write!(std::fs::File::create(&path)?, "{}", PROJECT)?;

        let config = Config::from_project_file(&path)?;
        assert_eq!(config.stylesheet, "resources/blog.css");
        assert_eq!(config.assets, dir.path().join("resources"));
        assert_eq!(config.renderer, "rst2html");
        assert_eq!(config.vcs, "git");
        assert!(config.comments.is_none());
        assert_eq!(config.entries.len(), 2);
        Ok(())
    }

    #[test]
    fn test_local_sources_resolve_against_project_root() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        write!(std::fs::File::create(&path)?, "{}", PROJECT)?;

        let config = Config::from_project_file(&path)?;
        match &config.entries[0].source {
            Source::Local(path) => {
                assert_eq!(path, &dir.path().join("posts/hello.rst"))
            }
            Source::Git(_) => panic!("first entry should be a local source"),
        }
        match &config.entries[1].source {
            Source::Git(url) => {
                assert_eq!(url, "git@github.com:example/ctest-fortran-unittest")
            }
            Source::Local(_) => panic!("second entry should be a git source"),
        }
        Ok(())
    }

    #[test]
    fn test_from_directory_walks_parents() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        write!(std::fs::File::create(&path)?, "{}", PROJECT)?;
        let nested = dir.path().join("posts/drafts");
        std::fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested)?;
        assert_eq!(config.title, "A Quiet Corner");
        Ok(())
    }
}
