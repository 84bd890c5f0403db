//! Placeholder rendering and static-shell rewriting. The shell is loaded
//! once at startup and held in memory, so a per-request rewrite is a
//! bounded set of single-pass regex substitutions over a known document
//! rather than a streaming parse.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde_json::json;

/// `{{identifier}}` tokens; unknown identifiers render as empty strings.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap());

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<title>.*?</title>").unwrap());
static META_DESC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta name="description" content="[^"]*"\s*/?>"#).unwrap());
static ROBOTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta name="robots" content="[^"]*"\s*/?>"#).unwrap());
static CANONICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<link rel="canonical" href="[^"]*"\s*/?>"#).unwrap());
static OG_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta property="og:title" content="[^"]*"\s*/?>"#).unwrap());
static OG_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:description" content="[^"]*"\s*/?>"#).unwrap()
});
static OG_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta property="og:url" content="[^"]*"\s*/?>"#).unwrap());
static TW_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta name="twitter:title" content="[^"]*"\s*/?>"#).unwrap());
static TW_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta name="twitter:description" content="[^"]*"\s*/?>"#).unwrap()
});
static CONTENT_TOP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div id="seo-content-top">.*?</div>"#).unwrap());
static CONTENT_BOTTOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div id="seo-content-bottom">.*?</div>"#).unwrap());

/// Minimal shell used when the configured shell file is missing, and by
/// the handler tests.
pub const DEFAULT_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>NumberGenerator.ai</title>
<meta name="description" content="Free online random number generators.">
<meta name="robots" content="index, follow">
<link rel="canonical" href="https://numbergenerator.ai/">
<meta property="og:title" content="NumberGenerator.ai">
<meta property="og:description" content="Free online random number generators.">
<meta property="og:url" content="https://numbergenerator.ai/">
<meta name="twitter:title" content="NumberGenerator.ai">
<meta name="twitter:description" content="Free online random number generators.">
</head>
<body>
<div id="seo-content-top"></div>
<div id="app"></div>
<div id="seo-content-bottom"></div>
</body>
</html>
"#;

/// Everything a single page rewrite needs, already rendered.
#[derive(Debug, Clone)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    pub robots: String,
    pub canonical: String,
    pub content_top: String,
    pub content_bottom: String,
    /// Hydration payload for the client, exposed as `window.__NG_CONFIG__`.
    pub config: serde_json::Value,
}

/// Substitute `{{key}}` tokens from the variable map. Total: unmatched
/// tokens become empty strings, the literal token never leaks through.
pub fn render_placeholders(template: &str, vars: &HashMap<String, String>) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &regex::Captures| {
            vars.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Flatten a params object plus the slug into placeholder variables.
pub fn template_vars(slug: &str, params: &serde_json::Value) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("slug".to_string(), slug.to_string());
    if let Some(obj) = params.as_object() {
        for (key, value) in obj {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            vars.insert(key.clone(), text);
        }
    }
    vars
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn replace_first(html: String, re: &Regex, replacement: &str) -> String {
    re.replace(&html, NoExpand(replacement)).into_owned()
}

/// The shared static shell, loaded once at startup.
pub struct Shell {
    html: String,
}

impl Shell {
    pub fn new(html: String) -> Self {
        Shell { html }
    }

    /// The untouched shell, for pass-through responses.
    pub fn raw(&self) -> &str {
        &self.html
    }

    /// Rewrite the shell for one page: head metadata, content containers,
    /// the hydration config global, and JSON-LD.
    pub fn rewrite(&self, seo: &PageSeo) -> String {
        let title = html_escape(&seo.title);
        let description = html_escape(&seo.description);
        let canonical = html_escape(&seo.canonical);

        let mut html = self.html.clone();
        html = replace_first(html, &TITLE_RE, &format!("<title>{title}</title>"));
        html = replace_first(
            html,
            &META_DESC_RE,
            &format!(r#"<meta name="description" content="{description}">"#),
        );
        html = replace_first(
            html,
            &ROBOTS_RE,
            &format!(r#"<meta name="robots" content="{}">"#, seo.robots),
        );
        html = replace_first(
            html,
            &CANONICAL_RE,
            &format!(r#"<link rel="canonical" href="{canonical}">"#),
        );
        html = replace_first(
            html,
            &OG_TITLE_RE,
            &format!(r#"<meta property="og:title" content="{title}">"#),
        );
        html = replace_first(
            html,
            &OG_DESC_RE,
            &format!(r#"<meta property="og:description" content="{description}">"#),
        );
        html = replace_first(
            html,
            &OG_URL_RE,
            &format!(r#"<meta property="og:url" content="{canonical}">"#),
        );
        html = replace_first(
            html,
            &TW_TITLE_RE,
            &format!(r#"<meta name="twitter:title" content="{title}">"#),
        );
        html = replace_first(
            html,
            &TW_DESC_RE,
            &format!(r#"<meta name="twitter:description" content="{description}">"#),
        );
        html = replace_first(
            html,
            &CONTENT_TOP_RE,
            &format!(r#"<div id="seo-content-top">{}</div>"#, seo.content_top),
        );
        html = replace_first(
            html,
            &CONTENT_BOTTOM_RE,
            &format!(
                r#"<div id="seo-content-bottom">{}</div>"#,
                seo.content_bottom
            ),
        );

        let json_ld = json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": seo.title,
            "description": seo.description,
            "url": seo.canonical,
        });
        let injected = format!(
            "<script>window.__NG_CONFIG__ = {};</script>\n<script type=\"application/ld+json\">{}</script>\n</head>",
            seo.config, json_ld
        );
        html.replacen("</head>", &injected, 1)
    }
}
