/*!
 * Directory tree rendering
 *
 * The plain listing goes into the payload header. The annotated listing is
 * printed to the console with each file's token count aligned in one column.
 */

use std::collections::HashMap;
use std::path::PathBuf;

use unicode_width::UnicodeWidthStr;

use crate::types::{Node, TreeLine};

/// Spaces between the widest entry and the token column
pub const TOKEN_COLUMN_GAP: usize = 4;

/// Width of the right-justified token field
pub const TOKEN_FIELD_WIDTH: usize = 6;

/// Column header printed above the first count
pub const TOKEN_HEADER: &str = "Tokens";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Flatten scanned nodes into tree lines
///
/// When `counts` is given, file lines carry their count (0 when missing).
pub fn build_lines(nodes: &[Node], counts: Option<&HashMap<PathBuf, usize>>) -> Vec<TreeLine> {
    let mut lines = Vec::new();

    for node in nodes {
        lines.push(TreeLine {
            depth: 0,
            is_last: true,
            prefix: String::new(),
            name: node.name(),
            tokens: file_tokens(node, counts),
        });
        if let Node::Directory(dir) = node {
            push_children(&dir.contents, "", 1, counts, &mut lines);
        }
    }

    lines
}

fn push_children(
    children: &[Node],
    prefix: &str,
    depth: usize,
    counts: Option<&HashMap<PathBuf, usize>>,
    lines: &mut Vec<TreeLine>,
) {
    for (idx, child) in children.iter().enumerate() {
        let is_last = idx + 1 == children.len();
        let connector = if is_last { LAST_BRANCH } else { BRANCH };

        lines.push(TreeLine {
            depth,
            is_last,
            prefix: format!("{}{}", prefix, connector),
            name: child.name(),
            tokens: file_tokens(child, counts),
        });

        if let Node::Directory(dir) = child {
            let continuation = if is_last { BLANK } else { PIPE };
            push_children(
                &dir.contents,
                &format!("{}{}", prefix, continuation),
                depth + 1,
                counts,
                lines,
            );
        }
    }
}

fn file_tokens(node: &Node, counts: Option<&HashMap<PathBuf, usize>>) -> Option<usize> {
    match (node, counts) {
        (Node::File(entry), Some(counts)) => {
            Some(counts.get(&entry.absolute_path).copied().unwrap_or(0))
        }
        _ => None,
    }
}

/// Render the tree without token counts
pub fn render_plain(nodes: &[Node]) -> String {
    build_lines(nodes, None)
        .iter()
        .map(TreeLine::label)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the tree with per-file token counts in a shared column
///
/// Line widths are only known once the whole tree is built, so the lines
/// are built first and padded in a second pass.
pub fn render_annotated(nodes: &[Node], counts: &HashMap<PathBuf, usize>) -> String {
    let lines = build_lines(nodes, Some(counts));
    let widest = lines
        .iter()
        .map(|line| line.label().width())
        .max()
        .unwrap_or(0);
    let column = widest + TOKEN_COLUMN_GAP;

    let mut out = Vec::with_capacity(lines.len() + 1);
    let mut header_written = false;

    for line in &lines {
        let label = line.label();
        match line.tokens {
            Some(tokens) => {
                if !header_written {
                    out.push(format!(
                        "{}{:>width$}",
                        " ".repeat(column),
                        TOKEN_HEADER,
                        width = TOKEN_FIELD_WIDTH
                    ));
                    header_written = true;
                }
                let padding = column - label.width();
                out.push(format!(
                    "{}{}{:>width$}",
                    label,
                    " ".repeat(padding),
                    tokens,
                    width = TOKEN_FIELD_WIDTH
                ));
            }
            None => out.push(label),
        }
    }

    out.join("\n")
}
