//! Markdown to plain text, for copying bot replies to the clipboard.
//!
//! Inline markup (emphasis, code spans, links) is dropped while block
//! structure survives: paragraphs are separated by a blank line and list
//! items keep their markers.

use markdown::{mdast, to_mdast, ParseOptions};

pub fn plain_text(source: &str) -> String {
    let root = match to_mdast(source, &ParseOptions::gfm()) {
        Ok(node) => node,
        Err(_) => return source.to_string(),
    };
    let nodes = match root {
        mdast::Node::Root(root) => root.children,
        other => vec![other],
    };
    blocks(&nodes, 0).join("\n\n")
}

fn blocks(nodes: &[mdast::Node], depth: usize) -> Vec<String> {
    nodes.iter().filter_map(|node| block(node, depth)).collect()
}

fn block(node: &mdast::Node, depth: usize) -> Option<String> {
    let text = match node {
        mdast::Node::Paragraph(paragraph) => inline(&paragraph.children),
        mdast::Node::Heading(heading) => inline(&heading.children),
        mdast::Node::Code(code) => code.value.clone(),
        mdast::Node::Math(math) => math.value.clone(),
        mdast::Node::Blockquote(quote) => blocks(&quote.children, depth).join("\n\n"),
        mdast::Node::List(list) => list_text(list, depth),
        mdast::Node::Table(table) => table
            .children
            .iter()
            .filter_map(|row| match row {
                mdast::Node::TableRow(row) => Some(
                    row.children
                        .iter()
                        .map(|cell| match cell {
                            mdast::Node::TableCell(cell) => inline(&cell.children),
                            _ => String::new(),
                        })
                        .collect::<Vec<_>>()
                        .join("\t"),
                ),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
        mdast::Node::Html(html) => html.value.clone(),
        mdast::Node::ThematicBreak(_) => return None,
        other => inline(std::slice::from_ref(other)),
    };
    Some(text)
}

fn list_text(list: &mdast::List, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut number = list.start.unwrap_or(1);
    let mut lines = Vec::new();
    for node in &list.children {
        let mdast::Node::ListItem(item) = node else {
            continue;
        };
        let marker = if list.ordered {
            let marker = format!("{}.", number);
            number += 1;
            marker
        } else {
            "-".to_string()
        };

        let mut first = true;
        for child in &item.children {
            match child {
                mdast::Node::List(nested) => lines.push(list_text(nested, depth + 1)),
                other => {
                    let Some(text) = block(other, depth) else {
                        continue;
                    };
                    if first {
                        lines.push(format!("{}{} {}", indent, marker, text));
                        first = false;
                    } else {
                        lines.push(format!("{}  {}", indent, text));
                    }
                }
            }
        }
    }
    lines.join("\n")
}

fn inline(nodes: &[mdast::Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            mdast::Node::Text(text) => out.push_str(&text.value),
            mdast::Node::InlineCode(code) => out.push_str(&code.value),
            mdast::Node::InlineMath(math) => out.push_str(&math.value),
            mdast::Node::Strong(strong) => out.push_str(&inline(&strong.children)),
            mdast::Node::Emphasis(emphasis) => out.push_str(&inline(&emphasis.children)),
            mdast::Node::Delete(delete) => out.push_str(&inline(&delete.children)),
            mdast::Node::Link(link) => out.push_str(&inline(&link.children)),
            mdast::Node::Image(image) => out.push_str(&image.alt),
            mdast::Node::Html(html) => out.push_str(&html.value),
            mdast::Node::Break(_) => out.push('\n'),
            _ => {}
        }
    }
    out
}
