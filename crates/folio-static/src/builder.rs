//! Build orchestration: discover documents, render pages, mirror assets.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use relative_path::{RelativePath, RelativePathBuf};
use walkdir::WalkDir;

use folio_render::route::SOURCE_EXT;
use folio_render::{html_route, render_html, DocumentIndex, LinkRewriter};

use crate::assets::{copy_tree, reset_dir};
use crate::templates::{page_title, Context, Portrait, TemplateEngine};

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source directory containing the markdown documents
    pub source_dir: PathBuf,

    /// Output directory (cleared on every build)
    pub output_dir: PathBuf,

    /// Name of the asset subtree inside the source directory
    pub assets_dir: String,

    /// Stylesheet to inline into every page
    pub stylesheet: Option<PathBuf>,

    /// Site title
    pub site_title: String,

    /// Site description meta tag
    pub description: String,

    /// Theme color meta tag
    pub theme_color: String,

    /// Profile image for the index page
    pub portrait: Option<Portrait>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("build"),
            assets_dir: "static".to_string(),
            stylesheet: None,
            site_title: "Site".to_string(),
            description: String::new(),
            theme_color: "#101723".to_string(),
            portrait: None,
        }
    }
}

/// Result of a completed build.
#[derive(Debug)]
pub struct BuildReport {
    /// Number of pages generated
    pub pages: usize,

    /// Number of asset files mirrored
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during a build.
///
/// Every variant carries the path it failed on; the first error aborts the
/// whole build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to scan source tree {}: {message}", path.display())]
    Discovery { path: PathBuf, message: String },

    #[error("Failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("Failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a builder for the given configuration.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the site.
    ///
    /// Resets the output directory, mirrors the asset tree, indexes the
    /// source documents, then renders every page. Pages render in parallel;
    /// the index is complete and read-only before the first render starts.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        if !self.config.source_dir.is_dir() {
            return Err(BuildError::Discovery {
                path: self.config.source_dir.clone(),
                message: "source directory not found".to_string(),
            });
        }

        reset_dir(&self.config.output_dir).map_err(|e| BuildError::Write {
            path: self.config.output_dir.clone(),
            message: e.to_string(),
        })?;

        let assets = self.copy_assets()?;

        let inline_css = match &self.config.stylesheet {
            Some(path) => Some(fs::read_to_string(path).map_err(|e| BuildError::Read {
                path: path.clone(),
                message: e.to_string(),
            })?),
            None => None,
        };

        let documents = self.discover_documents()?;
        let index = self.build_index(&documents)?;

        tracing::info!("indexed {} documents", index.len());

        let results: Vec<Result<(), BuildError>> = documents
            .par_iter()
            .map(|doc| self.build_page(doc, &index, inline_css.as_deref()))
            .collect();

        for result in results {
            result?;
        }

        Ok(BuildReport {
            pages: documents.len(),
            assets,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Mirror the asset tree into the output directory, if there is one.
    fn copy_assets(&self) -> Result<usize, BuildError> {
        let source = self.config.source_dir.join(&self.config.assets_dir);
        if !source.is_dir() {
            tracing::debug!("no asset directory at {}", source.display());
            return Ok(0);
        }

        let dest = self.config.output_dir.join(&self.config.assets_dir);
        copy_tree(&source, &dest).map_err(|e| BuildError::Write {
            path: dest,
            message: e.to_string(),
        })
    }

    /// Enumerate source documents under the source directory.
    ///
    /// Skips the asset tree, the output directory, build artifacts, and
    /// dot-files.
    fn discover_documents(&self) -> Result<Vec<RelativePathBuf>, BuildError> {
        let mut documents = Vec::new();

        let walker = WalkDir::new(&self.config.source_dir)
            .into_iter()
            .filter_entry(|entry| {
                let relative = entry
                    .path()
                    .strip_prefix(&self.config.source_dir)
                    .unwrap_or(entry.path());
                !self.is_excluded(relative)
            });

        for entry in walker {
            let entry = entry.map_err(|e| BuildError::Discovery {
                path: self.config.source_dir.clone(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.config.source_dir)
                .unwrap_or(entry.path());

            // Non-UTF-8 names cannot be linked to from markdown; skip them.
            let Ok(relative) = RelativePathBuf::from_path(relative) else {
                continue;
            };

            if relative.extension() == Some(SOURCE_EXT) {
                documents.push(relative.normalize());
            }
        }

        documents.sort();
        Ok(documents)
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        let name = relative
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if name.starts_with('.') {
            return true;
        }

        if relative.starts_with(&self.config.assets_dir) || relative.starts_with("target") {
            return true;
        }

        let output = &self.config.output_dir;
        let output_relative = output
            .strip_prefix(&self.config.source_dir)
            .unwrap_or(output);
        !output_relative.as_os_str().is_empty() && relative.starts_with(output_relative)
    }

    /// Register all discovered documents, rejecting output route collisions.
    fn build_index(&self, documents: &[RelativePathBuf]) -> Result<DocumentIndex, BuildError> {
        let mut index = DocumentIndex::new();

        for document in documents {
            index
                .insert(document)
                .map_err(|e| BuildError::Discovery {
                    path: self.config.source_dir.clone(),
                    message: e.to_string(),
                })?;
        }

        Ok(index)
    }

    /// Render one document and write its page.
    fn build_page(
        &self,
        source: &RelativePath,
        index: &DocumentIndex,
        inline_css: Option<&str>,
    ) -> Result<(), BuildError> {
        let source_path = source.to_path(&self.config.source_dir);
        let markdown = fs::read_to_string(&source_path).map_err(|e| BuildError::Read {
            path: source_path.clone(),
            message: e.to_string(),
        })?;

        // Link targets resolve relative to the document's own directory.
        let doc_dir = source.parent().unwrap_or(RelativePath::new(""));
        let rewriter = LinkRewriter::new(index, doc_dir);
        let fragment = render_html(&markdown, &rewriter);

        let route = html_route(source);
        let stem = route.file_stem().unwrap_or("index");
        let is_site_index = route.as_str() == "index.html";

        let depth = route
            .parent()
            .map(|p| p.components().count())
            .unwrap_or(0);
        let assets_base = if depth == 0 {
            format!("./{}/", self.config.assets_dir)
        } else {
            format!("{}{}/", "../".repeat(depth), self.config.assets_dir)
        };

        let context = Context {
            page_title: page_title(stem, &self.config.site_title),
            description: self.config.description.clone(),
            theme_color: self.config.theme_color.clone(),
            assets_base,
            inline_css: inline_css.map(str::to_string),
            portrait: self.config.portrait.clone(),
            content: fragment,
        };

        let template = if is_site_index {
            "index.html"
        } else {
            "page.html"
        };

        let html = self
            .templates
            .render_page(template, &context)
            .map_err(|e| BuildError::Render {
                path: source_path,
                message: e.to_string(),
            })?;

        let target = route.to_path(&self.config.output_dir);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::Write {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        fs::write(&target, html).map_err(|e| BuildError::Write {
            path: target.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!("wrote {}", target.display());
        Ok(())
    }
}
