//! Display document: an ordered list of typed blocks
//!
//! The renderer produces documents; UI adapters project them. The plain-text
//! projection is what gets downloaded and printed by the headless CLI.

use serde::Serialize;

/// Visual emphasis hint for adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Plain,
    Accent,
    Success,
    Warning,
    Error,
}

/// Token category line: `LABEL (count): v1, v2` or a "no tokens" notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLine {
    pub category: String,
    pub count: u64,
    pub values: Vec<String>,
}

/// One display block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String, tone: Tone },
    Category(CategoryLine),
    Paragraph { label: Option<String>, text: String, tone: Tone },
    KeyValue { title: String, entries: Vec<(String, String)> },
    List { title: String, items: Vec<String>, tone: Tone },
    Preformatted { title: String, text: String, tone: Tone },
    Divider,
}

/// Notice shown for a category with zero tokens
pub const NO_TOKENS_NOTICE: &str = "⚠ No se encontraron tokens.";

/// Delimiter between token values on a category line
pub const VALUE_DELIMITER: &str = ", ";

impl Block {
    pub fn heading(text: impl Into<String>, tone: Tone) -> Self {
        Block::Heading {
            text: text.into(),
            tone,
        }
    }

    pub fn paragraph(text: impl Into<String>, tone: Tone) -> Self {
        Block::Paragraph {
            label: None,
            text: text.into(),
            tone,
        }
    }

    pub fn labelled(label: impl Into<String>, text: impl Into<String>) -> Self {
        Block::Paragraph {
            label: Some(label.into()),
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    pub fn preformatted(title: impl Into<String>, text: impl Into<String>, tone: Tone) -> Self {
        Block::Preformatted {
            title: title.into(),
            text: text.into(),
            tone,
        }
    }

    /// Plain-text lines for this block
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            Block::Heading { text, .. } => vec![text.clone()],
            Block::Category(line) => vec![line.to_text()],
            Block::Paragraph { label, text, .. } => match label {
                Some(label) => vec![format!("{} {}", label, text)],
                None => text.lines().map(str::to_string).collect(),
            },
            Block::KeyValue { title, entries } => {
                let joined = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![title.clone(), joined]
            }
            Block::List { title, items, .. } => {
                let mut lines = vec![title.clone()];
                lines.extend(items.iter().map(|item| format!("  • {}", item)));
                lines
            }
            Block::Preformatted { title, text, .. } => {
                let mut lines = vec![title.clone()];
                lines.extend(text.lines().map(str::to_string));
                lines
            }
            Block::Divider => vec!["────────────────────".to_string()],
        }
    }
}

impl CategoryLine {
    /// Whether the "no tokens" notice replaces the value list
    pub fn is_empty_notice(&self) -> bool {
        self.count == 0
    }

    pub fn label(&self) -> String {
        format!("{} ({}):", self.category, self.count)
    }

    pub fn values_text(&self) -> String {
        if self.is_empty_notice() {
            NO_TOKENS_NOTICE.to_string()
        } else {
            self.values.join(VALUE_DELIMITER)
        }
    }

    pub fn to_text(&self) -> String {
        format!("{} {}", self.label(), self.values_text())
            .trim_end()
            .to_string()
    }
}

/// Ordered sequence of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Plain-text lines of the whole document
    pub fn to_lines(&self) -> Vec<String> {
        self.blocks.iter().flat_map(Block::to_lines).collect()
    }

    /// Plain-text projection (one line per row, trailing newline when non-empty)
    pub fn to_plain_text(&self) -> String {
        let mut text = self.to_lines().join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}
