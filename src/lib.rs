//! The library code for the `rushlight` static blog generator. The
//! architecture can be generally broken down into three distinct steps:
//!
//! 1. Producing each entry's raw markup ([`crate::source`]), either read
//!    from a local file or fetched by cloning a remote git repository and
//!    taking its `README.rst`
//! 2. Compiling entries into finished pages ([`crate::entry`]): markup
//!    assembly, one external renderer invocation per page
//!    ([`crate::render`]), and page-chrome splicing ([`crate::template`])
//! 3. Writing the output site ([`crate::build`]): every entry page in
//!    configured order, a generated index of the latest entries
//!    ([`crate::index`]), and a verbatim copy of the static assets
//!
//! Everything is sequential and fail-fast: entries are processed one after
//! another, each external invocation blocks until it completes, and the
//! first error aborts the whole run. The only state that outlives a step is
//! the pair of compute-once caches on each entry (the fetched remote source
//! and the compiled page), which are never invalidated.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod entry;
pub mod index;
pub mod render;
pub mod source;
pub mod template;
pub mod util;
