//! Markdown to HTML rendering.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

use crate::links::LinkRewriter;

// Outward-arrow marker appended inside external anchors.
const EXTERNAL_ICON: &str = r#"<svg style="width: 0.4em; vertical-align: middle; padding-bottom: 0.4em;" focusable="false" aria-hidden="true" viewBox="3 6 23 20"><path stroke="currentcolor" stroke-width="4" fill="none" d="M24 8L8 24M8 8H24v16"></path></svg>"#;

/// Render a markdown document to an HTML fragment.
///
/// Link destinations are passed through the rewriter; when it yields a
/// replacement, only the destination changes — title, text, and every other
/// event are emitted exactly as the parser produced them. External
/// (`http`/`https`) links get a small arrow icon before the closing tag.
pub fn render_html(markdown: &str, rewriter: &LinkRewriter) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options);

    let mut events = Vec::new();
    let mut in_external_link = false;

    for event in parser {
        match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                in_external_link = is_http(&dest_url);

                let dest_url = match rewriter.rewrite(&dest_url) {
                    Some(rewritten) => rewritten.into(),
                    None => dest_url,
                };

                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }));
            }
            Event::End(TagEnd::Link) => {
                if in_external_link {
                    events.push(Event::Html(EXTERNAL_ICON.into()));
                    in_external_link = false;
                }
                events.push(Event::End(TagEnd::Link));
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

fn is_http(dest: &str) -> bool {
    dest.starts_with("http://") || dest.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DocumentIndex;
    use pretty_assertions::assert_eq;

    fn rewriter_for<'a>(index: &'a DocumentIndex, dir: &str) -> LinkRewriter<'a> {
        LinkRewriter::new(index, dir)
    }

    #[test]
    fn rewrites_document_links() {
        let mut index = DocumentIndex::new();
        index.insert("notes.md").unwrap();

        let html = render_html("[my notes](notes.md)", &rewriter_for(&index, ""));

        assert_eq!(html, "<p><a href=\"notes.html\">my notes</a></p>\n");
    }

    #[test]
    fn keeps_link_title_and_text() {
        let mut index = DocumentIndex::new();
        index.insert("notes.md").unwrap();

        let html = render_html(
            "[my notes](notes.md \"the notes\")",
            &rewriter_for(&index, ""),
        );

        assert_eq!(
            html,
            "<p><a href=\"notes.html\" title=\"the notes\">my notes</a></p>\n"
        );
    }

    #[test]
    fn leaves_unknown_links_untouched() {
        let index = DocumentIndex::new();

        let html = render_html("[data](data.txt)", &rewriter_for(&index, ""));

        assert_eq!(html, "<p><a href=\"data.txt\">data</a></p>\n");
    }

    #[test]
    fn leaves_fragment_links_untouched() {
        let index = DocumentIndex::new();

        let html = render_html("[top](#top)", &rewriter_for(&index, ""));

        assert_eq!(html, "<p><a href=\"#top\">top</a></p>\n");
    }

    #[test]
    fn marks_external_links_with_icon() {
        let index = DocumentIndex::new();

        let html = render_html("[site](https://example.com)", &rewriter_for(&index, ""));

        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("<svg"));
        assert!(html.ends_with("</a></p>\n"));
    }

    #[test]
    fn no_icon_on_local_links() {
        let mut index = DocumentIndex::new();
        index.insert("notes.md").unwrap();

        let html = render_html("[n](notes.md)", &rewriter_for(&index, ""));

        assert!(!html.contains("<svg"));
    }

    #[test]
    fn rewrites_relative_to_document_directory() {
        let mut index = DocumentIndex::new();
        index.insert("a/b.md").unwrap();
        index.insert("a/c.md").unwrap();

        let html = render_html("[c](./c.md)", &rewriter_for(&index, "a"));

        assert_eq!(html, "<p><a href=\"c.html\">c</a></p>\n");
    }

    #[test]
    fn leaves_non_link_markup_alone() {
        let index = DocumentIndex::new();

        let html = render_html(
            "# Title\n\nSome *emphasis* and `code`.",
            &rewriter_for(&index, ""),
        );

        assert_eq!(
            html,
            "<h1>Title</h1>\n<p>Some <em>emphasis</em> and <code>code</code>.</p>\n"
        );
    }
}
