//! Minimal HTML node builder. Text is escaped on construction; only
//! `Node::Html` carries pre-rendered markup.

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Escaped text.
    Text(String),
    /// Trusted inline markup (already escaped).
    Html(String),
    /// A source line passed through untouched.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
    inline: bool,
    void: bool,
}

const INDENT: &str = "  ";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Element {
    /// Block-level element; children go on their own lines unless all inline.
    pub fn block(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            inline: false,
            void: false,
        }
    }

    pub fn inline(tag: &'static str) -> Self {
        Self {
            inline: true,
            ..Self::block(tag)
        }
    }

    /// Self-closing element such as `img`.
    pub fn void(tag: &'static str) -> Self {
        Self {
            inline: true,
            void: true,
            ..Self::block(tag)
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, escape(value)));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.child(Node::Text(escape(text)))
    }

    pub fn html(self, html: impl Into<String>) -> Self {
        self.child(Node::Html(html.into()))
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn open_tag(&self) -> String {
        let mut tag = format!("<{}", self.tag);
        for (name, value) in &self.attrs {
            tag.push_str(&format!(" {name}=\"{value}\""));
        }
        if self.void {
            tag.push_str(" />");
        } else {
            tag.push('>');
        }
        tag
    }

    fn render_inline(&self) -> String {
        if self.void {
            return self.open_tag();
        }
        let mut out = self.open_tag();
        for child in &self.children {
            out.push_str(&child.render_inline());
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }

    fn all_children_inline(&self) -> bool {
        self.children.iter().all(|c| match c {
            Node::Element(e) => e.inline,
            Node::Text(_) | Node::Html(_) => true,
            Node::Raw(_) => false,
        })
    }

    fn render_lines(&self, depth: usize, out: &mut Vec<String>) {
        let pad = INDENT.repeat(depth);
        if self.inline || self.void || self.all_children_inline() {
            out.push(format!("{pad}{}", self.render_inline()));
            return;
        }
        out.push(format!("{pad}{}", self.open_tag()));
        for child in &self.children {
            child.render_lines(depth + 1, out);
        }
        out.push(format!("{pad}</{}>", self.tag));
    }

    pub fn render(&self) -> String {
        let mut out = Vec::new();
        self.render_lines(0, &mut out);
        out.join("\n")
    }
}

impl Node {
    fn render_inline(&self) -> String {
        match self {
            Node::Element(e) => e.render_inline(),
            Node::Text(t) | Node::Html(t) | Node::Raw(t) => t.clone(),
        }
    }

    fn render_lines(&self, depth: usize, out: &mut Vec<String>) {
        match self {
            Node::Element(e) => e.render_lines(depth, out),
            // passthrough keeps its own indentation
            Node::Raw(line) => out.push(line.clone()),
            Node::Text(t) | Node::Html(t) => out.push(format!("{}{t}", INDENT.repeat(depth))),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
