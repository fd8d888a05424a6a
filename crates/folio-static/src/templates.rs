//! Page shells wrapping rendered markdown fragments.

use minijinja::{context, Environment};

/// Profile image shown on the site index page.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Portrait {
    /// Asset-relative path to the webp variant.
    pub webp: String,
    /// Asset-relative path to the jpeg fallback.
    pub jpeg: String,
    /// Alt text for the image.
    pub alt: String,
}

/// Everything a page shell needs to render.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Full document title (site title, suffixed for non-index pages)
    pub page_title: String,
    /// Site description meta tag content
    pub description: String,
    /// Theme color meta tag content
    pub theme_color: String,
    /// Href prefix reaching the asset tree from this page's directory
    pub assets_base: String,
    /// Stylesheet contents to inline, if configured
    pub inline_css: Option<String>,
    /// Profile image for the index shell
    pub portrait: Option<Portrait>,
    /// Rendered markdown fragment
    pub content: String,
}

/// Compose a document title from a page's file stem.
///
/// The index page carries the bare site title; every other page is suffixed
/// with it.
pub fn page_title(stem: &str, site_title: &str) -> String {
    if stem == "index" {
        site_title.to_string()
    } else {
        format!("{stem} — {site_title}")
    }
}

/// Template engine holding the embedded page shells.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine with the built-in `index.html` and `page.html` shells.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        Self { env }
    }

    /// Render a page using the specified shell.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            page_title => &context.page_title,
            description => &context.description,
            theme_color => &context.theme_color,
            assets_base => &context.assets_base,
            inline_css => &context.inline_css,
            portrait => &context.portrait,
            content => &context.content,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1,shrink-to-fit=no">
  <title>{{ page_title }}</title>
  <meta name="description" content="{{ description }}">
  {% if inline_css %}<style>{{ inline_css | safe }}</style>
  {% endif %}<link rel="apple-touch-icon" sizes="180x180" href="{{ assets_base }}apple-touch-icon.png">
  <link rel="icon" type="image/png" sizes="32x32" href="{{ assets_base }}favicon-32x32.png">
  <meta name="theme-color" content="{{ theme_color }}">
</head>
<body>
  {% block content %}{% endblock %}
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div id="content-wrapper" class="page-index">
  {% if portrait %}<picture>
    <div class="image-placeholder"></div>
    <source type="image/webp" srcset="{{ assets_base }}{{ portrait.webp }}">
    <source type="image/jpeg" srcset="{{ assets_base }}{{ portrait.jpeg }}">
    <img src="{{ assets_base }}{{ portrait.jpeg }}" alt="{{ portrait.alt }}" width="100%">
  </picture>
  {% endif %}<main>{{ content | safe }}</main>
</div>
{% endblock %}"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div id="content-wrapper">{{ content | safe }}</div>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context {
            page_title: "Juliette".to_string(),
            description: "Engineer".to_string(),
            theme_color: "#101723".to_string(),
            assets_base: "./static/".to_string(),
            inline_css: None,
            portrait: None,
            content: "<p>Hello world</p>".to_string(),
        }
    }

    #[test]
    fn renders_plain_page_shell() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("page.html", &context()).unwrap();

        assert!(html.contains("<title>Juliette</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Engineer\">"));
        assert!(html.contains("<div id=\"content-wrapper\"><p>Hello world</p></div>"));
        assert!(!html.contains("<picture>"));
    }

    #[test]
    fn index_shell_includes_portrait_block() {
        let engine = TemplateEngine::new();

        let mut ctx = context();
        ctx.portrait = Some(Portrait {
            webp: "me.webp".to_string(),
            jpeg: "me.jpg".to_string(),
            alt: "Me, outside".to_string(),
        });

        let html = engine.render_page("index.html", &ctx).unwrap();

        assert!(html.contains("<picture>"));
        assert!(html.contains("srcset=\"./static/me.webp\""));
        assert!(html.contains("alt=\"Me, outside\""));
        assert!(html.contains("<main><p>Hello world</p></main>"));
    }

    #[test]
    fn index_shell_without_portrait_keeps_main() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("index.html", &context()).unwrap();

        assert!(!html.contains("<picture>"));
        assert!(html.contains("<main><p>Hello world</p></main>"));
    }

    #[test]
    fn inlines_stylesheet_when_present() {
        let engine = TemplateEngine::new();

        let mut ctx = context();
        ctx.inline_css = Some("body { margin: 0 }".to_string());

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains("<style>body { margin: 0 }</style>"));
    }

    #[test]
    fn asset_links_use_page_prefix() {
        let engine = TemplateEngine::new();

        let mut ctx = context();
        ctx.assets_base = "../static/".to_string();

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains("href=\"../static/favicon-32x32.png\""));
    }

    #[test]
    fn titles_are_suffixed_except_index() {
        assert_eq!(page_title("index", "Juliette"), "Juliette");
        assert_eq!(page_title("notes", "Juliette"), "notes — Juliette");
    }
}
