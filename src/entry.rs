//! Defines the [`Entry`] type: one blog post, from raw markup to an HTML
//! file on disk. An entry assembles its final markup (raw source plus a
//! `Posted on` line), hands it to the renderer, splices the page chrome in,
//! and remembers the result. Both the fetched remote source and the
//! compiled page are computed at most once per entry per process; neither is
//! ever invalidated.

use crate::config::Config;
use crate::render::{Error as RenderError, Renderer};
use crate::source::{Error as SourceError, Source};
use crate::template;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Entry {
    pub title: String,
    pub date: String,
    source: Source,

    /// Raw text fetched for a remote source, so index building and page
    /// writing clone only once.
    fetched: Option<String>,

    /// The fully assembled page. Populated by the first [`Entry::compile`]
    /// and returned unchanged ever after, even if the underlying source
    /// changes.
    compiled: Option<String>,
}

impl Entry {
    pub fn new(title: String, date: String, source: Source) -> Entry {
        Entry {
            title,
            date,
            source,
            fetched: None,
            compiled: None,
        }
    }

    /// The output file name: the title with spaces replaced by underscores,
    /// suffixed `.html`. Nothing else is sanitized; a title containing a
    /// slash or colon produces exactly that filename.
    pub fn filename(&self) -> String {
        format!("{}.html", self.title.replace(' ', "_"))
    }

    /// Returns the entry's markup with its `Posted on` line in place. Local
    /// sources are authored with the title and underline on the first two
    /// lines, so the date goes in right behind them; a fetched README's
    /// layout is not under our control, so the date goes at the end.
    pub fn get_source(&mut self, vcs: &str) -> Result<String> {
        let raw = self.fetch(vcs)?;
        Ok(match &self.source {
            Source::Local(_) => insert_date_line(&raw, &self.date),
            Source::Git(_) => append_date_line(&raw, &self.date),
        })
    }

    fn fetch(&mut self, vcs: &str) -> Result<String> {
        if let Some(raw) = &self.fetched {
            return Ok(raw.clone());
        }
        let raw = self.source.fetch(vcs)?;
        if let Source::Git(_) = &self.source {
            self.fetched = Some(raw.clone());
        }
        Ok(raw)
    }

    /// Renders the entry into a finished page: markup assembly, one renderer
    /// invocation, template splicing. The result is cached; subsequent calls
    /// return it without touching the source again.
    pub fn compile(&mut self, renderer: &Renderer, config: &Config) -> Result<String> {
        if let Some(page) = &self.compiled {
            return Ok(page.clone());
        }

        let mut markup = self.get_source(&config.vcs)?;
        if config.comments.is_some() {
            // The heading renders with an empty body; the spliced widget
            // fills it visually.
            markup.push_str("\n\nComments\n========\n");
        }
        let html = renderer.render(&markup)?;
        let page = template::apply(&html, config, Some(&self.filename()));
        self.compiled = Some(page.clone());
        Ok(page)
    }

    /// Writes the compiled page to `outputdir`, creating or overwriting the
    /// file, and returns the path written.
    pub fn write(
        &mut self,
        outputdir: &Path,
        renderer: &Renderer,
        config: &Config,
    ) -> Result<PathBuf> {
        let path = outputdir.join(self.filename());
        fs::write(&path, self.compile(renderer, config)?)?;
        Ok(path)
    }
}

fn insert_date_line(raw: &str, date: &str) -> String {
    let posted = format!("Posted on {}", date);
    let mut lines: Vec<&str> = raw.lines().collect();
    let at = lines.len().min(3);
    lines.insert(at, &posted);
    lines.insert(at + 1, "");
    let mut out = lines.join("\n");
    if raw.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn append_date_line(raw: &str, date: &str) -> String {
    format!("{}\n\nPosted on {}\n", raw.trim_end_matches('\n'), date)
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem producing or writing an entry's page.
#[derive(Debug)]
pub enum Error {
    /// Returned when the entry's raw markup can't be produced.
    Source(SourceError),

    /// Returned when the external renderer can't be invoked.
    Render(RenderError),

    /// Returned for I/O problems writing the finished page.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Source(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Source(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<SourceError> for Error {
    /// Converts [`SourceError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: SourceError) -> Error {
        Error::Source(err)
    }
}

impl From<RenderError> for Error {
    /// Converts [`RenderError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: RenderError) -> Error {
        Error::Render(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
