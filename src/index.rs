//! Builds the index page: an excerpt of each of the latest entries, each
//! promoted into a link to its page, assembled into one markup document and
//! rendered in a single converter call.

use crate::config::Config;
use crate::entry::{Entry, Error as EntryError};
use crate::render::{Error as RenderError, Renderer};
use crate::template;
use std::fmt;

/// How many entries the index lists.
const INDEX_ENTRIES: usize = 6;

/// How many characters of each entry's source the excerpt keeps. The cut is
/// blunt; mid-word and mid-construct truncation is accepted.
const EXCERPT_CHARS: usize = 300;

/// Assembles and renders the index page, returning the final HTML. The page
/// is spliced with the shared chrome but never with a comment widget.
pub fn build_index(
    entries: &mut [Entry],
    renderer: &Renderer,
    config: &Config,
) -> Result<String> {
    let markup = index_markup(entries, &config.vcs)?;
    tracing::debug!(markup = %markup, "assembled index markup");
    let html = renderer.render(&markup)?;
    Ok(template::apply(&html, config, None))
}

fn index_markup(entries: &mut [Entry], vcs: &str) -> Result<String> {
    let mut markup = String::from("Latest Posts\n============\n\n");
    let count = entries.len().min(INDEX_ENTRIES);
    for entry in entries[..count].iter_mut() {
        let filename = entry.filename();
        let source = entry.get_source(vcs)?;
        markup.push_str(&excerpt(&source, &filename));
        markup.push_str("... ");
        markup.push_str(&format!("`Read more <{}>`_\n\n", filename));
    }
    Ok(markup)
}

/// Truncates an entry's source and rewrites its heading: the first line
/// becomes a hyperlink to the entry's page, the second an underline matching
/// the rewritten line. Every source is required to carry at least those two
/// lines; anything shorter fails the build.
fn excerpt(source: &str, filename: &str) -> String {
    let truncated: String = source.chars().take(EXCERPT_CHARS).collect();
    // A '=' anywhere in the slice could reconstitute a heading underline
    // mid-excerpt once truncated; turn them all into '-'.
    let defused = truncated.replace('=', "-");
    let mut lines: Vec<String> = defused.lines().map(str::to_owned).collect();
    lines[0] = format!("`{} <{}>`_", lines[0], filename);
    lines[1] = "-".repeat(lines[0].len());
    lines.join("\n")
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem building the index page.
#[derive(Debug)]
pub enum Error {
    /// Returned when an entry's source can't be produced.
    Entry(EntryError),

    /// Returned when the external renderer can't be invoked.
    Render(RenderError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Entry(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Entry(err) => Some(err),
            Error::Render(err) => Some(err),
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

impl From<RenderError> for Error {
    /// Converts [`RenderError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: RenderError) -> Error {
        Error::Render(err)
    }
}
