//! Rich-text documents as delivered by the CMS.
//!
//! A document is a tree of nodes: blocks (`paragraph`, `heading-2`, ..),
//! inlines (`hyperlink`, ..) and `text` leaves carrying marks. The tree is
//! kept as-is and walked generically for plain text, word counts and HTML.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

const BLOCK_TYPES: &[&str] = &[
    "document",
    "paragraph",
    "heading-1",
    "heading-2",
    "heading-3",
    "heading-4",
    "heading-5",
    "heading-6",
    "ordered-list",
    "unordered-list",
    "list-item",
    "hr",
    "blockquote",
    "embedded-entry-block",
    "embedded-asset-block",
    "embedded-resource-block",
    "table",
    "table-row",
    "table-cell",
    "table-header-cell",
];

/// One node of a rich-text tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextNode {
    pub node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<RichTextNode>,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

/// Text decoration on a `text` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for RichTextNode {
    fn default() -> Self {
        Self::document(Vec::new())
    }
}

impl RichTextNode {
    pub fn document(content: Vec<RichTextNode>) -> Self {
        Self::block("document", content)
    }

    pub fn block(node_type: &str, content: Vec<RichTextNode>) -> Self {
        Self {
            node_type: node_type.to_string(),
            value: None,
            marks: Vec::new(),
            content,
            data: Value::Null,
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Self::block("paragraph", vec![Self::text(text)])
    }

    pub fn text(value: &str) -> Self {
        Self {
            node_type: "text".to_string(),
            value: Some(value.to_string()),
            marks: Vec::new(),
            content: Vec::new(),
            data: Value::Null,
        }
    }

    pub fn is_text(&self) -> bool {
        self.node_type == "text"
    }

    pub fn is_block(&self) -> bool {
        BLOCK_TYPES.contains(&self.node_type.as_str())
    }

    /// Plain text with sibling blocks separated by a single space.
    pub fn plain_text(&self) -> String {
        if self.is_text() {
            return self.value.clone().unwrap_or_default();
        }

        let mut out = String::new();
        for (i, node) in self.content.iter().enumerate() {
            let text = node.plain_text();
            if text.is_empty() && !node.is_text() {
                continue;
            }
            out.push_str(&text);

            let next_is_block = self.content.get(i + 1).is_some_and(RichTextNode::is_block);
            if next_is_block {
                out.push(' ');
            }
        }
        out
    }

    /// Text of the top-level paragraphs, one per line.
    pub fn paragraph_text(&self) -> String {
        self.content
            .iter()
            .filter(|node| node.node_type == "paragraph")
            .map(|node| {
                node.content
                    .iter()
                    .filter_map(|child| child.value.as_deref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn word_count(&self) -> usize {
        self.plain_text().split_whitespace().count()
    }

    /// Minutes to read at [`WORDS_PER_MINUTE`], never less than one.
    pub fn reading_time(&self) -> u32 {
        reading_time_for_words(self.word_count())
    }

    /// Visit every node depth-first, allowing in-place edits.
    pub fn walk_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut RichTextNode),
    {
        f(self);
        for child in &mut self.content {
            child.walk_mut(f);
        }
    }

    /// Render the tree as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_children(&self, out: &mut String) {
        for child in &self.content {
            child.write_html(out);
        }
    }

    fn wrap(&self, out: &mut String, tag: &str) {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.write_children(out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    fn write_html(&self, out: &mut String) {
        match self.node_type.as_str() {
            "text" => self.write_text(out),
            "document" => self.write_children(out),
            "paragraph" => self.wrap(out, "p"),
            "heading-1" => self.wrap(out, "h1"),
            "heading-2" => self.wrap(out, "h2"),
            "heading-3" => self.wrap(out, "h3"),
            "heading-4" => self.wrap(out, "h4"),
            "heading-5" => self.wrap(out, "h5"),
            "heading-6" => self.wrap(out, "h6"),
            "unordered-list" => self.wrap(out, "ul"),
            "ordered-list" => self.wrap(out, "ol"),
            "list-item" => self.wrap(out, "li"),
            "blockquote" => self.wrap(out, "blockquote"),
            "table" => self.wrap(out, "table"),
            "table-row" => self.wrap(out, "tr"),
            "table-cell" => self.wrap(out, "td"),
            "table-header-cell" => self.wrap(out, "th"),
            "hr" => out.push_str("<hr/>"),
            "hyperlink" => {
                let uri = self.data.get("uri").and_then(Value::as_str).unwrap_or("#");
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                    escape_html(safe_href(uri))
                ));
                self.write_children(out);
                out.push_str("</a>");
            }
            "embedded-asset-block" => {
                // Asset links are resolved into `data.url` when the post is built.
                if let Some(url) = self.data.get("url").and_then(Value::as_str) {
                    let title = self
                        .data
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or("Blog image");
                    out.push_str(&format!(
                        "<figure><img src=\"{}\" alt=\"{}\"/></figure>",
                        escape_html(url),
                        escape_html(title)
                    ));
                }
            }
            // Unknown and embedded-entry nodes render their children only.
            _ => self.write_children(out),
        }
    }

    fn write_text(&self, out: &mut String) {
        let mut html = escape_html(self.value.as_deref().unwrap_or_default());
        for mark in &self.marks {
            let tag = match mark.kind.as_str() {
                "bold" => "strong",
                "italic" => "em",
                "underline" => "u",
                "code" => "code",
                "superscript" => "sup",
                "subscript" => "sub",
                _ => continue,
            };
            html = format!("<{tag}>{html}</{tag}>");
        }
        out.push_str(&html);
    }
}

/// Minutes to read `words` words, rounded up, minimum one.
pub fn reading_time_for_words(words: usize) -> u32 {
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Link target for an anchor: http, https, mailto and relative URIs pass,
/// anything else becomes `#`.
fn safe_href(uri: &str) -> &str {
    let uri = uri.trim();
    // Browsers drop tabs and newlines inside a scheme.
    let compact: String = uri
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    match compact.find([':', '/', '?', '#']) {
        Some(end) if compact[end..].starts_with(':') => {
            let scheme = compact[..end].to_ascii_lowercase();
            if matches!(scheme.as_str(), "http" | "https" | "mailto") {
                uri
            } else {
                "#"
            }
        }
        _ => uri,
    }
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
