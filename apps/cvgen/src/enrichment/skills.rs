//! Skills section: markdown tables become a sized table, `**Category**: items`
//! lines become executive skill categories.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::enrichment::html::{Element, Node};
use crate::enrichment::inline::format_inline;
use crate::enrichment::rules::{classify_line, LineShape};

static SEPARATOR_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("valid separator regex"));

const BULLET: &str = "✓";

fn is_separator(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| SEPARATOR_CELL.is_match(c))
}

fn strip_bold(cell: &str) -> &str {
    cell.strip_prefix("**")
        .and_then(|c| c.strip_suffix("**"))
        .unwrap_or(cell)
}

/// Header plus body rows collected from consecutive table lines.
#[derive(Debug, Default)]
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn add(&mut self, cells: Vec<String>) {
        if is_separator(&cells) {
            return;
        }
        if self.headers.is_empty() {
            self.headers = cells.iter().map(|c| strip_bold(c).to_string()).collect();
        } else {
            self.rows.push(cells);
        }
    }

    fn render(self) -> Element {
        let columns = self.headers.len().max(1);
        let width = format!("width: {:.1}%;", 100.0 / columns as f64);

        let mut head_row = Element::block("tr");
        for header in &self.headers {
            head_row.push(
                Element::inline("th")
                    .class("cv-skills-header")
                    .attr("style", &width)
                    .child(Element::inline("strong").html(format_inline(header))),
            );
        }

        let mut body = Element::block("tbody");
        for row in &self.rows {
            let mut tr = Element::block("tr").class("cv-skills-row");
            for cell in row {
                tr.push(skill_cell(cell));
            }
            body.push(tr);
        }

        let table = Element::block("table")
            .class("cv-skills-table cv-skills-dynamic")
            .attr("data-columns", &columns.to_string())
            .child(Element::block("thead").child(head_row))
            .child(body);
        Element::block("div")
            .class("cv-skills-table-container")
            .child(table)
    }
}

fn skill_cell(cell: &str) -> Element {
    let td = Element::inline("td").class("cv-skill-item");
    match cell.strip_prefix(BULLET) {
        Some(rest) => td
            .child(Element::inline("span").class("cv-skill-bullet").text(BULLET))
            .html(format!(" {}", format_inline(rest.trim()))),
        None => td.html(format_inline(cell)),
    }
}

fn category_node(label: &str, rest: &str) -> Element {
    let items = rest.trim_start().trim_start_matches(':').trim();
    Element::block("div")
        .class("cv-skill-category cv-executive-skills")
        .child(
            Element::block("p")
                .class("cv-skill-category-header")
                .child(Element::inline("strong").text(label.trim_end_matches(':')))
                .html(format!(": {}", format_inline(items))),
        )
}

pub fn render_skills(lines: &[&str]) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut table: Option<Table> = None;

    for raw in lines {
        let shape = classify_line(raw);
        if let LineShape::TableRow(cells) = shape {
            table.get_or_insert_with(Table::default).add(cells);
            continue;
        }
        if let Some(done) = table.take() {
            nodes.push(done.render().into());
        }
        match shape {
            LineShape::Blank => {}
            LineShape::BoldLabel { label, rest }
                if label.ends_with(':') || rest.trim_start().starts_with(':') =>
            {
                nodes.push(category_node(&label, &rest).into());
            }
            _ => nodes.push(Node::Raw(raw.to_string())),
        }
    }
    if let Some(done) = table {
        nodes.push(done.render().into());
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> String {
        let lines: Vec<&str> = md.lines().collect();
        render_skills(&lines)
            .into_iter()
            .map(|n| match n {
                Node::Element(e) => e.render(),
                Node::Raw(r) | Node::Text(r) | Node::Html(r) => r,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_table_sizing_and_bullets() {
        let html = render(
            "| **Languages** | **Domain** | **Tools** |\n| :--- | :--- | :--- |\n| ✓ C | ✓ ML |  |\n| ✓ C++ |  |  |",
        );
        assert!(html.contains("data-columns=\"3\""));
        assert!(html.contains(
            "<th class=\"cv-skills-header\" style=\"width: 33.3%;\"><strong>Languages</strong></th>"
        ));
        assert_eq!(html.matches("<tr class=\"cv-skills-row\">").count(), 2);
        assert!(html.contains(
            "<td class=\"cv-skill-item\"><span class=\"cv-skill-bullet\">✓</span> C++</td>"
        ));
        assert!(html.contains("<td class=\"cv-skill-item\"></td>"));
    }

    #[test]
    fn test_executive_categories() {
        let html = render("**Leadership Impact**: Team Leadership (7+ Direct Reports) • Hiring");
        assert_eq!(
            html,
            "<div class=\"cv-skill-category cv-executive-skills\">\n  <p class=\"cv-skill-category-header\"><strong>Leadership Impact</strong>: Team Leadership (7+ Direct Reports) • Hiring</p>\n</div>"
        );
    }

    #[test]
    fn test_bold_line_without_colon_passes_through() {
        let html = render("**Open to contract work**\n**Cloud:** AWS • GCP");
        assert!(html.starts_with("**Open to contract work**\n"), "{html}");
        assert!(!html.contains("Open to contract work</strong>:"));
        assert!(html.contains("<strong>Cloud</strong>: AWS • GCP"));
    }

    #[test]
    fn test_other_lines_pass_through() {
        let html = render("Some free text\n\n| **A** |\n| --- |\n| ✓ x |");
        assert!(html.starts_with("Some free text\n<div class=\"cv-skills-table-container\">"));
        assert!(html.contains("width: 100.0%;"));
    }
}
