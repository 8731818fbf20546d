//! Structured markdown builder used by every section generator.
//!
//! Generators push typed blocks; `render` is the only place that knows the
//! textual shape of each block. The shapes are the contract the enricher
//! reads back, so changing one here means changing its recognizer too.

/// Separator between inline list items (languages, coursework, executive skills).
pub const INLINE_SEPARATOR: &str = " • ";

/// Prefix of every skills table cell that holds an item.
pub const SKILL_BULLET: &str = "✓";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `# **text**`
    Name(String),
    /// `## text`
    Section(String),
    /// `### text`
    Title(String),
    /// `![alt](src)`
    Image { alt: String, src: String },
    /// `_text_`
    Italic(String),
    /// `_text_<br>`
    ItalicBreak(String),
    /// `*text*`
    Emphasis(String),
    /// `**text**` followed verbatim by `suffix`
    Bold { text: String, suffix: String },
    /// `* text`
    Bullet(String),
    /// `- text`
    Dash(String),
    /// `> text`
    Quote(String),
    /// Pipe table with a bold header row and left-aligned columns.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Text(String),
    Blank,
}

impl Block {
    fn render_into(&self, out: &mut Vec<String>) {
        match self {
            Block::Name(text) => out.push(format!("# **{text}**")),
            Block::Section(text) => out.push(format!("## {text}")),
            Block::Title(text) => out.push(format!("### {text}")),
            Block::Image { alt, src } => out.push(format!("![{alt}]({src})")),
            Block::Italic(text) => out.push(format!("_{text}_")),
            Block::ItalicBreak(text) => out.push(format!("_{text}_<br>")),
            Block::Emphasis(text) => out.push(format!("*{text}*")),
            Block::Bold { text, suffix } => out.push(format!("**{text}**{suffix}")),
            Block::Bullet(text) => out.push(format!("* {text}")),
            Block::Dash(text) => out.push(format!("- {text}")),
            Block::Quote(text) => out.push(format!("> {text}")),
            Block::Table { headers, rows } => {
                out.push(table_row(headers.iter().map(|h| format!("**{h}**"))));
                out.push(table_row(headers.iter().map(|_| ":---".to_string())));
                for row in rows {
                    out.push(table_row(row.iter().cloned()));
                }
            }
            Block::Text(text) => out.push(text.clone()),
            Block::Blank => out.push(String::new()),
        }
    }
}

fn table_row(cells: impl Iterator<Item = String>) -> String {
    let cells: Vec<String> = cells.collect();
    format!("| {} |", cells.join(" | "))
}

/// Ordered list of blocks making up one section (or a whole document).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownDoc {
    blocks: Vec<Block>,
}

impl MarkdownDoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    /// Pushes a block followed by a blank line.
    pub fn paragraph(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self.blocks.push(Block::Blank);
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.push(Block::Blank)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Renders the blocks joined by newlines, without trailing blank lines.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            block.render_into(&mut lines);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

/// Title casing of a snake_case key; every letter after a non-letter is uppercased: `leadership_impact` -> `Leadership Impact`.
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_alpha = false;
    for ch in key.replace('_', " ").chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

pub fn join_inline<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(INLINE_SEPARATOR)
}
