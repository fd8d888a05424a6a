//! Static site builder for folio.
//!
//! Turns a directory of markdown documents into a directory of HTML pages,
//! rewriting links between documents and mirroring a static asset tree.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildReport, SiteBuilder};
pub use templates::Portrait;
