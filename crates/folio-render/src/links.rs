//! Best-effort rewriting of hrefs that point at known source documents.

use percent_encoding::percent_decode_str;
use relative_path::{RelativePath, RelativePathBuf};

use crate::index::DocumentIndex;
use crate::route::html_route;

/// Rewrites link targets for one referring document.
///
/// Constructed per document: hrefs resolve relative to the referring
/// document's own directory, so a `./c.md` link inside `a/b.md` means
/// `a/c.md`, not `c.md` at the root. The index is shared and read-only.
pub struct LinkRewriter<'a> {
    index: &'a DocumentIndex,
    doc_dir: RelativePathBuf,
}

impl<'a> LinkRewriter<'a> {
    /// Create a rewriter for a document living in `doc_dir` (repo-relative;
    /// empty for documents at the repository root).
    pub fn new(index: &'a DocumentIndex, doc_dir: impl AsRef<RelativePath>) -> Self {
        Self {
            index,
            doc_dir: doc_dir.as_ref().to_relative_path_buf(),
        }
    }

    /// Rewrite `href` if it names a known source document.
    ///
    /// Returns the replacement href, relative to the referring page's output
    /// directory, with any `#fragment` suffix preserved. Returns `None` when
    /// the href should pass through untouched: external URLs, protocol-relative
    /// and absolute paths, fragment-only links, hrefs that do not decode to
    /// UTF-8, and local paths not present in the index. Never fails; this is
    /// a best-effort layer, not a validator.
    pub fn rewrite(&self, href: &str) -> Option<String> {
        if href.is_empty() || href.starts_with('#') || href.starts_with('/') || is_opaque(href) {
            return None;
        }

        let (raw_path, fragment) = match href.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (href, None),
        };

        let decoded = percent_decode_str(raw_path).decode_utf8().ok()?;
        let resolved = self
            .doc_dir
            .join_normalized(RelativePath::new(decoded.as_ref()));

        if !self.index.contains(&resolved) {
            return None;
        }

        let page = html_route(&resolved);

        // The output tree mirrors the source tree with case folded, so the
        // referring page's output directory is its source directory lowercased.
        let out_dir = RelativePathBuf::from(self.doc_dir.as_str().to_lowercase());
        let mut rewritten = out_dir.relative(&page).as_str().to_string();

        if let Some(fragment) = fragment {
            rewritten.push('#');
            rewritten.push_str(fragment);
        }

        tracing::debug!(href, to = %rewritten, "rewrote document link");
        Some(rewritten)
    }
}

/// Whether an href is something other than a plain relative path: a scheme'd
/// URL (`https:`, `mailto:`) or a protocol-relative URL (`//host/...`).
fn is_opaque(href: &str) -> bool {
    if href.starts_with("//") {
        return true;
    }

    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
