//! HTML rendering of type descriptions
//!
//! Schema references become links built from a template such as
//! `/schemas/{name}/`, `oneOf` listings become an unordered list.

use apiref_schema::DisplayToken;
use url::Url;

/// Placeholder replaced by the schema name in link templates
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Scratch URL whose single path segment receives the encoded name
const SEGMENT_BASE: &str = "http://localhost/";

/// Builds link targets for named schemas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLinks {
    template: String,
}

impl SchemaLinks {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Link target of the schema called `name`
    pub fn href(&self, name: &str) -> String {
        self.template.replace(NAME_PLACEHOLDER, &encode_path_segment(name))
    }
}

/// Render a type description as HTML
pub fn render_markup(token: &DisplayToken, links: &SchemaLinks) -> String {
    match token {
        DisplayToken::Text { value } => escape_html(value),
        DisplayToken::Reference { schema_name } => format!(
            "<a href='{}'>{}</a>",
            escape_html(&links.href(schema_name)),
            escape_html(schema_name)
        ),
        DisplayToken::Container { container, element } => format!(
            "{} ({})",
            escape_html(container),
            render_markup(element, links)
        ),
        DisplayToken::List { items } => {
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", render_markup(item, links)))
                .collect();
            format!("one of: <ul>{}</ul>", items)
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Percent-encode `segment` with the URL path-segment rules
fn encode_path_segment(segment: &str) -> String {
    Url::parse(SEGMENT_BASE)
        .ok()
        .and_then(|mut url| {
            url.path_segments_mut().ok()?.clear().push(segment);
            Some(url.path().trim_start_matches('/').to_string())
        })
        .unwrap_or_else(|| segment.to_string())
}
