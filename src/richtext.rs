//! Strapi rich-text rendering.
//!
//! CMS long-form fields arrive either as a plain string or as a tree of
//! typed nodes (paragraphs, headings, lists, links, text runs with
//! formatting flags). [`render`] turns any of those shapes into markup;
//! [`plain_text`] flattens them for meta descriptions and fallbacks.

use maud::{html, Markup};
use serde::{Deserialize, Serialize};

/// A rich-text field in any of the shapes the CMS serves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RichText {
    Text(String),
    Nodes(Vec<RichTextNode>),
    Node(Box<RichTextNode>),
}

/// One node of the structured rich-text tree.
///
/// `node_type` distinguishes blocks (`paragraph`, `heading`, `list`,
/// `link`) from `text` leaves; unknown types render their children.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub children: Option<Vec<RichTextNode>>,
    pub content: Option<Vec<RichTextNode>>,
    pub text: Option<String>,
    pub level: Option<u8>,
    pub format: Option<String>,
    pub url: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub code: Option<bool>,
}

impl RichTextNode {
    fn child_nodes(&self) -> &[RichTextNode] {
        self.children
            .as_deref()
            .or(self.content.as_deref())
            .unwrap_or(&[])
    }
}

impl RichText {
    pub fn is_empty(&self) -> bool {
        plain_text(self).trim().is_empty()
    }
}

/// Render rich text to markup. Strings become a single paragraph.
pub fn render(content: &RichText) -> Markup {
    match content {
        RichText::Text(s) => html! { p { (s) } },
        RichText::Nodes(nodes) => html! {
            @for node in nodes { (render_node(node)) }
        },
        RichText::Node(node) => render_node(node),
    }
}

fn render_node(node: &RichTextNode) -> Markup {
    let children = node.child_nodes();
    match node.node_type.as_deref() {
        Some("doc") | Some("root") | None => html! {
            @for child in children { (render_node(child)) }
        },
        Some("paragraph") => html! {
            p { @for child in children { (render_node(child)) } }
        },
        Some("heading") => {
            let inner = html! { @for child in children { (render_node(child)) } };
            match node.level.unwrap_or(1) {
                1 => html! { h1 { (inner) } },
                2 => html! { h2 { (inner) } },
                3 => html! { h3 { (inner) } },
                4 => html! { h4 { (inner) } },
                5 => html! { h5 { (inner) } },
                _ => html! { h6 { (inner) } },
            }
        }
        Some("list") => {
            let items = html! {
                @for child in children { li { (render_node_children(child)) } }
            };
            if node.format.as_deref() == Some("ordered") {
                html! { ol { (items) } }
            } else {
                html! { ul { (items) } }
            }
        }
        Some("list-item") => html! {
            @for child in children { (render_node(child)) }
        },
        Some("quote") => html! {
            blockquote { @for child in children { (render_node(child)) } }
        },
        Some("link") => html! {
            a href=(node.url.as_deref().unwrap_or("#")) {
                @for child in children { (render_node(child)) }
            }
        },
        Some("text") => render_text_leaf(node),
        // Unknown block types: render what's inside rather than dropping it.
        Some(_) => html! {
            @for child in children { (render_node(child)) }
        },
    }
}

fn render_node_children(node: &RichTextNode) -> Markup {
    if node.node_type.as_deref() == Some("list-item") {
        html! { @for child in node.child_nodes() { (render_node(child)) } }
    } else {
        render_node(node)
    }
}

fn render_text_leaf(node: &RichTextNode) -> Markup {
    let text = node.text.as_deref().unwrap_or("");
    let mut markup = html! { (text) };
    if node.bold == Some(true) {
        markup = html! { strong { (markup) } };
    }
    if node.italic == Some(true) {
        markup = html! { em { (markup) } };
    }
    if node.underline == Some(true) {
        markup = html! { u { (markup) } };
    }
    if node.strikethrough == Some(true) {
        markup = html! { s { (markup) } };
    }
    if node.code == Some(true) {
        markup = html! { code { (markup) } };
    }
    markup
}

/// Flatten rich text to plain text, one line per top-level node.
pub fn plain_text(content: &RichText) -> String {
    match content {
        RichText::Text(s) => s.clone(),
        RichText::Nodes(nodes) => {
            let lines: Vec<String> = nodes.iter().map(node_plain_text).collect();
            lines.join("\n")
        }
        RichText::Node(node) => node_plain_text(node),
    }
}

fn node_plain_text(node: &RichTextNode) -> String {
    if let Some(text) = &node.text {
        return text.clone();
    }
    node.child_nodes()
        .iter()
        .map(node_plain_text)
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodes(v: serde_json::Value) -> RichText {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn plain_string_renders_as_paragraph() {
        let rt = RichText::Text("hello".into());
        assert_eq!(render(&rt).into_string(), "<p>hello</p>");
    }

    #[test]
    fn paragraph_with_marks() {
        let rt = nodes(json!([{
            "type": "paragraph",
            "children": [
                { "type": "text", "text": "plain " },
                { "type": "text", "text": "bold", "bold": true },
            ]
        }]));
        let html = render(&rt).into_string();
        assert_eq!(html, "<p>plain <strong>bold</strong></p>");
    }

    #[test]
    fn heading_level_is_respected() {
        let rt = nodes(json!([{
            "type": "heading",
            "level": 3,
            "children": [{ "type": "text", "text": "Title" }]
        }]));
        assert_eq!(render(&rt).into_string(), "<h3>Title</h3>");
    }

    #[test]
    fn ordered_and_unordered_lists() {
        let rt = nodes(json!([{
            "type": "list",
            "format": "ordered",
            "children": [
                { "type": "list-item", "children": [{ "type": "text", "text": "one" }] },
            ]
        }]));
        assert_eq!(render(&rt).into_string(), "<ol><li>one</li></ol>");
    }

    #[test]
    fn link_renders_href() {
        let rt = nodes(json!([{
            "type": "link",
            "url": "https://example.com",
            "children": [{ "type": "text", "text": "here" }]
        }]));
        assert_eq!(
            render(&rt).into_string(),
            "<a href=\"https://example.com\">here</a>"
        );
    }

    #[test]
    fn text_is_escaped() {
        let rt = RichText::Text("<script>alert(1)</script>".into());
        let html = render(&rt).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn unknown_node_types_render_children() {
        let rt = nodes(json!([{
            "type": "callout",
            "children": [{ "type": "text", "text": "inside" }]
        }]));
        assert_eq!(render(&rt).into_string(), "inside");
    }

    #[test]
    fn plain_text_flattens_tree() {
        let rt = nodes(json!([
            { "type": "paragraph", "children": [{ "type": "text", "text": "a" }] },
            { "type": "paragraph", "children": [{ "type": "text", "text": "b" }] },
        ]));
        assert_eq!(plain_text(&rt), "a\nb");
        assert!(!rt.is_empty());
        assert!(RichText::Text("  ".into()).is_empty());
    }
}
