//! Markdown rendering with document-aware link rewriting.
//!
//! This crate turns markdown into HTML fragments while rewriting links that
//! point at other known source documents so they resolve to the generated
//! pages instead. Everything here operates on repository-relative paths and
//! performs no I/O; discovering documents on disk is the builder's job.

pub mod html;
pub mod index;
pub mod links;
pub mod route;

pub use html::render_html;
pub use index::{DocumentIndex, RouteConflict};
pub use links::LinkRewriter;
pub use route::html_route;
