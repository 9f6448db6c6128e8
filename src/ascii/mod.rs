//! Built-in fallback renderers.
//!
//! Each renderer is a pure function `(source, width) -> String` with no
//! external dependency: it re-parses the diagram source with its own
//! minimal line-oriented patterns, draws a box-drawn approximation, and
//! clamps the result to the requested width. When nothing recognizable
//! is found, every renderer degrades to [`code_frame`], which always
//! succeeds.

pub mod canvas;
pub mod class_diagram;
pub mod d2_outline;
pub mod flowchart;
pub mod sequence;

use canvas::clamp_width;

/// Frame the source verbatim with the dialect tag in the top border:
///
/// ```text
/// ┌─ mermaid ────┐
/// │ graph TD     │
/// │ A --> B      │
/// └──────────────┘
/// ```
///
/// This is the terminal fallback — total for any input and width.
pub fn code_frame(source: &str, tag: &str, width: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();

    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(tag.chars().count() + 2))
        .max()
        .unwrap_or(1)
        .clamp(1, width.saturating_sub(4).max(1));

    let mut out = Vec::with_capacity(lines.len() + 2);

    let header = format!("┌─ {} ", tag);
    let header_len = header.chars().count();
    let total = inner + 4;
    if header_len < total {
        out.push(format!("{}{}┐", header, "─".repeat(total - header_len - 1)));
    } else {
        out.push(format!("┌{}┐", "─".repeat(total.saturating_sub(2))));
    }

    for line in &lines {
        let truncated: String = line.chars().take(inner).collect();
        out.push(format!("│ {:<1$} │", truncated, inner));
    }

    out.push(format!("└{}┘", "─".repeat(total - 2)));

    clamp_width(&out.join("\n"), width)
}
