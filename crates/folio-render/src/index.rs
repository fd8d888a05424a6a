//! Index of the source documents known to a single build run.

use std::collections::{HashMap, HashSet};

use relative_path::{RelativePath, RelativePathBuf};

use crate::route::html_route;

/// Two source documents mapped to the same output page.
///
/// Routes are case-normalized, so `Notes.md` and `notes.md` would silently
/// overwrite each other's output; the index rejects the second one instead.
#[derive(Debug, Clone, thiserror::Error)]
#[error("documents `{existing}` and `{incoming}` both map to output page `{route}`")]
pub struct RouteConflict {
    /// The document registered first.
    pub existing: RelativePathBuf,
    /// The document that collided with it.
    pub incoming: RelativePathBuf,
    /// The contested output route.
    pub route: RelativePathBuf,
}

/// The set of source document paths discovered at build start.
///
/// Built once by the orchestrator, read-only afterwards; link rewriting
/// consults it to decide whether an href points at a convertible document.
/// Paths are stored in normalized repo-relative form and compared exactly
/// as link targets are normalized before lookup.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    sources: HashSet<RelativePathBuf>,
    routes: HashMap<RelativePathBuf, RelativePathBuf>,
}

impl DocumentIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a discovered source document.
    ///
    /// Fails if another registered document already maps to the same output
    /// route. Registering the same path twice is a no-op.
    pub fn insert(&mut self, source: impl AsRef<RelativePath>) -> Result<(), RouteConflict> {
        let source = source.as_ref().to_relative_path_buf();
        let route = html_route(&source);

        if let Some(existing) = self.routes.get(&route) {
            if *existing != source {
                return Err(RouteConflict {
                    existing: existing.clone(),
                    incoming: source,
                    route,
                });
            }
            return Ok(());
        }

        self.routes.insert(route, source.clone());
        self.sources.insert(source);
        Ok(())
    }

    /// Whether a normalized path names a known source document.
    pub fn contains(&self, path: &RelativePath) -> bool {
        self.sources.contains(path)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Iterate over the indexed source paths.
    pub fn sources(&self) -> impl Iterator<Item = &RelativePath> {
        self.sources.iter().map(RelativePathBuf::as_relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_inserted_paths() {
        let mut index = DocumentIndex::new();
        index.insert("notes.md").unwrap();
        index.insert("a/b.md").unwrap();

        assert!(index.contains(RelativePath::new("notes.md")));
        assert!(index.contains(RelativePath::new("a/b.md")));
        assert!(!index.contains(RelativePath::new("missing.md")));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn reinserting_same_path_is_ok() {
        let mut index = DocumentIndex::new();
        index.insert("notes.md").unwrap();
        index.insert("notes.md").unwrap();

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn rejects_case_variant_collision() {
        let mut index = DocumentIndex::new();
        index.insert("Notes.md").unwrap();

        let err = index.insert("notes.md").unwrap_err();
        assert_eq!(err.existing.as_str(), "Notes.md");
        assert_eq!(err.incoming.as_str(), "notes.md");
        assert_eq!(err.route.as_str(), "notes.html");
    }

    #[test]
    fn rejects_readme_index_collision() {
        // README.md maps to index.html, so a literal index.md collides.
        let mut index = DocumentIndex::new();
        index.insert("README.md").unwrap();

        let err = index.insert("index.md").unwrap_err();
        assert_eq!(err.route.as_str(), "index.html");
    }

    #[test]
    fn lookup_is_case_sensitive_on_sources() {
        // Link targets are matched against paths exactly as discovered;
        // only output routes are case-folded.
        let mut index = DocumentIndex::new();
        index.insert("About.md").unwrap();

        assert!(index.contains(RelativePath::new("About.md")));
        assert!(!index.contains(RelativePath::new("about.md")));
    }
}
