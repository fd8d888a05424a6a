//! Mapping from source document paths to output page routes.

use relative_path::{RelativePath, RelativePathBuf};

/// Extension of convertible source documents.
pub const SOURCE_EXT: &str = "md";

/// Extension of generated pages.
pub const OUTPUT_EXT: &str = "html";

/// Compute the output route for a source document path.
///
/// Routes are case-normalized: the whole relative path is lowercased, the
/// `.md` suffix is replaced with `.html`, and directories are preserved.
/// A document whose stem is `readme` (in any casing) becomes the site index.
///
/// Pure function: no I/O, same input always yields the same route.
pub fn html_route(source: &RelativePath) -> RelativePathBuf {
    let mut route = RelativePathBuf::from(source.as_str().to_lowercase());

    if route.file_stem() == Some("readme") {
        route.set_file_name("index");
    }
    route.set_extension(OUTPUT_EXT);

    route
}
