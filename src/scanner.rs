//! Fenced diagram block extraction from Markdown documents

use crate::classify::classify_mermaid;
use crate::types::{DiagramBlock, Dialect, Subtype};

/// Scan a Markdown document and extract every fenced code block tagged
/// with a recognized diagram dialect, in document order.
///
/// A block opens on a line whose trimmed content is ``` followed by a
/// recognized tag, and closes on a bare ``` line. Everything in between
/// is captured verbatim — including lines that look like opening fences
/// (no nesting support). An unterminated block at end of document is
/// discarded: a truncated block carries no reliable structure.
pub fn scan_markdown(document: &str) -> Vec<DiagramBlock> {
    let mut blocks = Vec::new();

    let mut current: Option<(Dialect, usize, Vec<&str>)> = None;

    for (i, line) in document.lines().enumerate() {
        let trimmed = line.trim();

        match current.as_mut() {
            None => {
                if let Some(tag) = trimmed.strip_prefix("```") {
                    if let Some(dialect) = Dialect::from_tag(tag) {
                        current = Some((dialect, i, Vec::new()));
                    }
                }
            }
            Some((dialect, start, buffered)) => {
                if trimmed == "```" {
                    let source = buffered.join("\n");
                    let subtype = match dialect {
                        Dialect::Mermaid => classify_mermaid(&source),
                        _ => Subtype::Generic,
                    };
                    blocks.push(DiagramBlock::new(*dialect, subtype, source, *start, i));
                    current = None;
                } else {
                    buffered.push(line);
                }
            }
        }
    }

    blocks
}
