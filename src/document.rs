//! HTML `<head>` metadata builder.
//!
//! A `Document` accumulates the title, keywords, description and the
//! `<meta>`, `<link>` and `<script>` entries of a page during a request,
//! then renders them as an HTML fragment for the view layer to embed.
//!
//! # Example
//!
//! ```rust
//! use basic_libs::document::Document;
//!
//! let mut doc = Document::new();
//! doc.set_title("Home");
//! doc.set_keywords(["rust", "web"]);
//! doc.add_stylesheet("/css/site.css");
//!
//! let html = doc.render();
//! assert!(html.starts_with("<title>Home</title>\n"));
//! ```

use serde::Serialize;

/// Indentation prefix for every entry line produced by the `render_*` methods.
const ENTRY_INDENT: &str = "    ";

/// An ordered list of tag attributes.
///
/// Attributes render in insertion order. Keys are not deduplicated: adding the
/// same key twice emits it twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Append an attribute in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Look up the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

/// Values accepted by [`Document::set_keywords`].
///
/// A single string is stored verbatim; a list is joined with `", "`.
pub trait IntoKeywords {
    /// Normalize into the stored keywords string.
    fn into_keywords(self) -> String;
}

impl IntoKeywords for &str {
    fn into_keywords(self) -> String {
        self.to_string()
    }
}

impl IntoKeywords for String {
    fn into_keywords(self) -> String {
        self
    }
}

impl<S: AsRef<str>> IntoKeywords for &[S] {
    fn into_keywords(self) -> String {
        join_keywords(self.iter().map(<S as AsRef<str>>::as_ref))
    }
}

impl<S: AsRef<str>> IntoKeywords for Vec<S> {
    fn into_keywords(self) -> String {
        join_keywords(self.iter().map(<S as AsRef<str>>::as_ref))
    }
}

impl<S: AsRef<str>, const N: usize> IntoKeywords for [S; N] {
    fn into_keywords(self) -> String {
        join_keywords(self.iter().map(<S as AsRef<str>>::as_ref))
    }
}

fn join_keywords<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

/// Structured view of a document, as returned by [`Document::fetch`].
///
/// `metas`, `links` and `scripts` hold already-rendered HTML fragments, not
/// the raw attribute lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    /// Raw page title
    pub title: String,

    /// Raw keywords string (list input already joined with ", ")
    pub keywords: String,

    /// Raw page description
    pub description: String,

    /// Rendered `<meta>` lines, as from `render_metas()`
    pub metas: String,

    /// Rendered `<script>` lines, as from `render_scripts()`
    pub scripts: String,

    /// Rendered `<link>` lines, as from `render_links()`
    pub links: String,
}

/// Page metadata accumulated over a single request.
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    keywords: String,
    description: String,
    metas: Vec<Attributes>,
    links: Vec<Attributes>,
    scripts: Vec<Attributes>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Scalar Fields ====================

    /// Set the page title.
    ///
    /// Renders as `<title>{title}</title>`.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the keywords meta tag content.
    ///
    /// Accepts a single string (stored as is) or a list of strings (joined
    /// with `", "`). Renders as `<meta name="keywords" content="{keywords}">`.
    pub fn set_keywords(&mut self, keywords: impl IntoKeywords) {
        self.keywords = keywords.into_keywords();
    }

    /// Set the description meta tag content.
    ///
    /// Renders as `<meta name="description" content="{description}">`.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Get the raw, unescaped title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the raw keywords string.
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Get the raw description.
    pub fn description(&self) -> &str {
        &self.description
    }

    // ==================== Metas ====================

    /// Append a `<meta>` entry built from arbitrary attributes.
    pub fn add_meta_attributes(&mut self, attributes: impl Into<Attributes>) {
        self.metas.push(attributes.into());
    }

    /// Append `<meta content="{content}" name="{name}">`.
    pub fn add_meta(&mut self, content: impl Into<String>, name: impl Into<String>) {
        self.add_meta_attributes(
            Attributes::new()
                .with("content", content)
                .with("name", name),
        );
    }

    /// Append an OpenGraph `<meta property="{property}" content="{content}">`.
    pub fn add_og_meta(&mut self, property: impl Into<String>, content: impl Into<String>) {
        self.add_meta_attributes(
            Attributes::new()
                .with("property", property)
                .with("content", content),
        );
    }

    /// Accumulated `<meta>` entries in insertion order.
    pub fn metas(&self) -> &[Attributes] {
        &self.metas
    }

    // ==================== Links ====================

    /// Append a `<link>` entry built from arbitrary attributes.
    pub fn add_link_attributes(&mut self, attributes: impl Into<Attributes>) {
        self.links.push(attributes.into());
    }

    /// Append `<link href="{href}" rel="{rel}">`.
    pub fn add_link(&mut self, href: impl Into<String>, rel: impl Into<String>) {
        self.add_link_attributes(Attributes::new().with("href", href).with("rel", rel));
    }

    /// Append a CSS stylesheet link.
    pub fn add_stylesheet(&mut self, href: impl Into<String>) {
        self.add_link_attributes(
            Attributes::new()
                .with("href", href)
                .with("rel", "stylesheet")
                .with("type", "text/css"),
        );
    }

    /// Accumulated `<link>` entries in insertion order.
    pub fn links(&self) -> &[Attributes] {
        &self.links
    }

    // ==================== Scripts ====================

    /// Append a `<script>` entry built from arbitrary attributes.
    pub fn add_script_attributes(&mut self, attributes: impl Into<Attributes>) {
        self.scripts.push(attributes.into());
    }

    /// Append `<script src="{src}" type="text/javascript"></script>`.
    pub fn add_script(&mut self, src: impl Into<String>) {
        self.add_script_attributes(
            Attributes::new()
                .with("src", src)
                .with("type", "text/javascript"),
        );
    }

    /// Accumulated `<script>` entries in insertion order.
    pub fn scripts(&self) -> &[Attributes] {
        &self.scripts
    }

    // ==================== Rendering ====================

    /// Render every `<meta>` entry, one line each.
    pub fn render_metas(&self) -> String {
        render_entries(&self.metas, "meta", ">")
    }

    /// Render every `<link>` entry, one line each.
    pub fn render_links(&self) -> String {
        render_entries(&self.links, "link", ">")
    }

    /// Render every `<script>` entry, one line each.
    pub fn render_scripts(&self) -> String {
        render_entries(&self.scripts, "script", "></script>")
    }

    /// Render the whole head fragment.
    ///
    /// Order is fixed: title, keywords, description, a blank line, then the
    /// metas, links and scripts blocks.
    pub fn render(&self) -> String {
        let mut html = String::new();

        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        html.push_str(&format!(
            "<meta name=\"keywords\" content=\"{}\">\n",
            escape_html(&self.keywords)
        ));
        html.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n\n",
            escape_html(&self.description)
        ));

        html.push_str(&self.render_metas());
        html.push_str(&self.render_links());
        html.push_str(&self.render_scripts());

        html
    }

    /// Snapshot of the document with the entry lists already rendered.
    pub fn fetch(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            title: self.title.clone(),
            keywords: self.keywords.clone(),
            description: self.description.clone(),
            metas: self.render_metas(),
            scripts: self.render_scripts(),
            links: self.render_links(),
        }
    }
}

fn render_entries(entries: &[Attributes], tag: &str, close: &str) -> String {
    let mut html = String::new();

    for entry in entries {
        html.push_str(ENTRY_INDENT);
        html.push('<');
        html.push_str(tag);
        html.push(' ');
        for (key, value) in entry.iter() {
            html.push_str(key);
            html.push_str("=\"");
            html.push_str(&escape_html(value));
            html.push_str("\" ");
        }
        html.push_str(close);
        html.push('\n');
    }

    html
}

/// Escape text for use inside HTML element content or a quoted attribute value.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
