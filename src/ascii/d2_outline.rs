//! D2 structure outline fallback.
//!
//! No layout is attempted: the shape declarations and connections are
//! listed in a framed panel, which is enough to read the structure of a
//! small diagram without the external tool.

use super::canvas::clamp_width;
use super::code_frame;

const MAX_SHAPES: usize = 10;
const MAX_CONNECTIONS: usize = 8;

/// Render d2 source as a framed shape/connection outline, bounded to
/// `width` columns. Degrades to a framed dump when nothing is found.
pub fn render(source: &str, width: usize) -> String {
    let mut shapes: Vec<String> = Vec::new();
    let mut connections: Vec<String> = Vec::new();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains("->") || line.contains("<-") {
            if connections.len() < MAX_CONNECTIONS {
                connections.push(line.to_string());
            }
        } else if let Some((id, label)) = line.split_once(':') {
            // Style/shape attribute lines are noise, not shapes
            let id = id.trim();
            if !id.starts_with("style") && !id.contains('.') && shapes.len() < MAX_SHAPES {
                shapes.push(format!("{}: {}", id, label.trim()));
            }
        }
    }

    if shapes.is_empty() && connections.is_empty() {
        return code_frame(source, "d2", width);
    }

    let inner = shapes
        .iter()
        .chain(&connections)
        .map(|l| l.chars().count() + 2)
        .chain(std::iter::once(4))
        .max()
        .unwrap_or(4)
        .clamp(1, width.saturating_sub(4).max(1));

    let pad = |s: &str| -> String {
        let truncated: String = s.chars().take(inner).collect();
        format!("│ {:<1$} │", truncated, inner)
    };

    let mut out: Vec<String> = Vec::new();
    out.push(format!("┌{}┐", "─".repeat(inner + 2)));
    for shape in &shapes {
        out.push(pad(&format!("▪ {}", shape)));
    }
    if !shapes.is_empty() && !connections.is_empty() {
        out.push(format!("├{}┤", "─".repeat(inner + 2)));
    }
    for conn in &connections {
        out.push(pad(conn));
    }
    out.push(format!("└{}┘", "─".repeat(inner + 2)));

    clamp_width(&out.join("\n"), width)
}
