//! The HTML listing page.
//!
//! The page source is compiled once at startup and shared read-only by every
//! request. It understands a deliberately small tag set:
//!
//! - `{{count}}` number of observations
//! - `{{#rows}}...{{/rows}}` repeated for every observation, newest first
//! - `{{#latest}}...{{/latest}}` rendered once for the newest observation
//! - `{{#empty}}...{{/empty}}` rendered only when there are no observations
//! - `{{id}}`, `{{gross_price}}`, `{{gross_price_normalised}}`,
//!   `{{created_at}}` inside `rows` and `latest`
//!
//! Unknown tags and unbalanced sections are rejected when the template is
//! parsed, so rendering itself cannot fail.

use crate::models::PriceObservation;
use thiserror::Error;

const INDEX_SOURCE: &str = include_str!("../templates/index.html");

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated tag at byte {0}")]
    UnterminatedTag(usize),

    #[error("unknown tag {{{{{0}}}}}")]
    UnknownTag(String),

    #[error("tag {{{{{0}}}}} is only valid inside a row section")]
    OutOfScope(String),

    #[error("section {{{{#{0}}}}} is never closed")]
    UnclosedSection(String),

    #[error("unexpected {{{{/{0}}}}}")]
    UnexpectedClose(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Count,
    Id,
    GrossPrice,
    GrossPriceNormalised,
    CreatedAt,
}

impl Field {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "count" => Some(Field::Count),
            "id" => Some(Field::Id),
            "gross_price" => Some(Field::GrossPrice),
            "gross_price_normalised" => Some(Field::GrossPriceNormalised),
            "created_at" => Some(Field::CreatedAt),
            _ => None,
        }
    }

    fn needs_row(self) -> bool {
        !matches!(self, Field::Count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Rows,
    Latest,
    Empty,
}

impl Section {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "rows" => Some(Section::Rows),
            "latest" => Some(Section::Latest),
            "empty" => Some(Section::Empty),
            _ => None,
        }
    }

    fn binds_row(self) -> bool {
        matches!(self, Section::Rows | Section::Latest)
    }

    fn name(self) -> &'static str {
        match self {
            Section::Rows => "rows",
            Section::Latest => "latest",
            Section::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(Field),
    Section(Section, Vec<Node>),
}

/// A compiled page template
#[derive(Debug, Clone)]
pub struct PageTemplate {
    nodes: Vec<Node>,
}

impl PageTemplate {
    /// Compile the page bundled with the binary
    pub fn index() -> Result<Self, TemplateError> {
        Self::parse(INDEX_SOURCE)
    }

    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parser = Parser { source, pos: 0 };
        let nodes = parser.nodes(None, false)?;
        Ok(Self { nodes })
    }

    /// Render the listing. `observations` must already be newest first.
    pub fn render(&self, observations: &[PriceObservation]) -> String {
        let mut out = String::with_capacity(4096 + observations.len() * 160);
        render_nodes(&self.nodes, observations, None, &mut out);
        out
    }
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn nodes(&mut self, closing: Option<Section>, in_row: bool) -> Result<Vec<Node>, TemplateError> {
        let source = self.source;
        let mut nodes = Vec::new();

        loop {
            let rest = &source[self.pos..];
            let Some(start) = rest.find(OPEN) else {
                if !rest.is_empty() {
                    nodes.push(Node::Text(rest.to_string()));
                }
                self.pos = source.len();
                return match closing {
                    Some(section) => Err(TemplateError::UnclosedSection(section.name().to_string())),
                    None => Ok(nodes),
                };
            };

            if start > 0 {
                nodes.push(Node::Text(rest[..start].to_string()));
            }

            let tag_start = self.pos + start;
            let after_open = tag_start + OPEN.len();
            let end = source[after_open..]
                .find(CLOSE)
                .ok_or(TemplateError::UnterminatedTag(tag_start))?;
            let tag = source[after_open..after_open + end].trim();
            self.pos = after_open + end + CLOSE.len();

            if let Some(name) = tag.strip_prefix('#') {
                let section = Section::lookup(name)
                    .ok_or_else(|| TemplateError::UnknownTag(tag.to_string()))?;
                let body = self.nodes(Some(section), in_row || section.binds_row())?;
                nodes.push(Node::Section(section, body));
            } else if let Some(name) = tag.strip_prefix('/') {
                return match closing {
                    Some(section) if section.name() == name => Ok(nodes),
                    _ => Err(TemplateError::UnexpectedClose(name.to_string())),
                };
            } else {
                let field = Field::lookup(tag).ok_or_else(|| TemplateError::UnknownTag(tag.to_string()))?;
                if field.needs_row() && !in_row {
                    return Err(TemplateError::OutOfScope(tag.to_string()));
                }
                nodes.push(Node::Field(field));
            }
        }
    }
}

fn render_nodes(
    nodes: &[Node],
    observations: &[PriceObservation],
    row: Option<&PriceObservation>,
    out: &mut String,
) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(field) => render_field(*field, observations, row, out),
            Node::Section(Section::Rows, body) => {
                for observation in observations {
                    render_nodes(body, observations, Some(observation), out);
                }
            }
            Node::Section(Section::Latest, body) => {
                if let Some(latest) = observations.first() {
                    render_nodes(body, observations, Some(latest), out);
                }
            }
            Node::Section(Section::Empty, body) => {
                if observations.is_empty() {
                    render_nodes(body, observations, row, out);
                }
            }
        }
    }
}

fn render_field(
    field: Field,
    observations: &[PriceObservation],
    row: Option<&PriceObservation>,
    out: &mut String,
) {
    if field == Field::Count {
        out.push_str(&observations.len().to_string());
        return;
    }

    // Scope is checked at parse time
    let Some(row) = row else { return };

    match field {
        Field::Id => out.push_str(&row.id.to_string()),
        Field::GrossPrice => escape_into(&row.gross_price, out),
        Field::GrossPriceNormalised => out.push_str(&row.gross_price_normalised.to_string()),
        Field::CreatedAt => {
            out.push_str(&row.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        }
        Field::Count => {}
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
