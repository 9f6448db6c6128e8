//! Flowchart fallback renderer.
//!
//! Lays nodes out as a vertical chain of boxes with connectors where an
//! edge links consecutive nodes; edges that don't fit the chain are
//! listed underneath. A deliberate simplification — the external graph
//! tool owns real 2D layout.

use lazy_static::lazy_static;
use regex::Regex;

use super::canvas::clamp_width;
use super::code_frame;

lazy_static! {
    static ref RE_EDGE_SPLIT: Regex = Regex::new(r"\s*(?:-\.->|==>|-->)\s*").unwrap();
    static ref RE_EDGE_LABEL: Regex = Regex::new(r"^\|([^|]*)\|\s*").unwrap();
    static ref RE_NODE_BRACKET: Regex = Regex::new(r"^([\w-]+)\[([^\]]+)\]").unwrap();
    static ref RE_NODE_PAREN: Regex = Regex::new(r"^([\w-]+)\(([^)]+)\)").unwrap();
    static ref RE_NODE_BRACE: Regex = Regex::new(r"^([\w-]+)\{([^}]+)\}").unwrap();
    static ref RE_BARE_ID: Regex = Regex::new(r"^([\w-]+)$").unwrap();
}

const MAX_NODES: usize = 15;

struct FlowSketch {
    ids: Vec<String>,
    labels: Vec<String>,
    /// (from, to, label) as indices into `ids`
    edges: Vec<(usize, usize, String)>,
}

impl FlowSketch {
    fn node(&mut self, id: &str, label: Option<&str>) -> Option<usize> {
        if let Some(i) = self.ids.iter().position(|n| n == id) {
            if let Some(l) = label {
                // A later declaration may carry the real label
                if self.labels[i] == self.ids[i] {
                    self.labels[i] = l.to_string();
                }
            }
            return Some(i);
        }
        if self.ids.len() >= MAX_NODES {
            return None;
        }
        self.ids.push(id.to_string());
        self.labels.push(label.unwrap_or(id).to_string());
        Some(self.ids.len() - 1)
    }
}

fn parse_term(sketch: &mut FlowSketch, term: &str) -> Option<usize> {
    let term = term.trim();
    for re in [&*RE_NODE_BRACKET, &*RE_NODE_PAREN, &*RE_NODE_BRACE] {
        if let Some(caps) = re.captures(term) {
            return sketch.node(&caps[1], Some(caps[2].trim()));
        }
    }
    RE_BARE_ID
        .captures(term)
        .and_then(|caps| sketch.node(&caps[1], None))
}

fn parse(source: &str) -> FlowSketch {
    let mut sketch = FlowSketch {
        ids: Vec::new(),
        labels: Vec::new(),
        edges: Vec::new(),
    };

    for line in source.lines() {
        let line = line.trim();
        let head = line.to_lowercase();
        if line.is_empty()
            || head.starts_with("flowchart")
            || head.starts_with("graph")
            || head.starts_with("subgraph")
            || line == "end"
        {
            continue;
        }

        let segments: Vec<&str> = RE_EDGE_SPLIT.split(line).collect();
        if segments.len() == 1 {
            parse_term(&mut sketch, line);
            continue;
        }

        // Edge chain: A[Start] --> |ok| B --> C
        let mut prev: Option<usize> = None;
        for seg in segments {
            let (label, rest) = match RE_EDGE_LABEL.captures(seg) {
                Some(caps) => (caps[1].trim().to_string(), &seg[caps[0].len()..]),
                None => (String::new(), seg),
            };
            let Some(node) = parse_term(&mut sketch, rest) else {
                prev = None;
                continue;
            };
            if let Some(from) = prev.take() {
                sketch.edges.push((from, node, label));
            }
            prev = Some(node);
        }
    }

    sketch
}

/// Render flowchart source to a boxed node chain, bounded to `width`
/// columns. Degrades to a framed dump when no nodes are found.
pub fn render(source: &str, width: usize) -> String {
    let sketch = parse(source);
    if sketch.ids.is_empty() {
        return code_frame(source, "flowchart", width);
    }

    let mut out: Vec<String> = Vec::new();
    let mut chained: Vec<bool> = vec![false; sketch.edges.len()];

    for (i, label) in sketch.labels.iter().enumerate() {
        if i > 0 {
            // Connector if an edge links the previous node to this one
            let link = sketch
                .edges
                .iter()
                .position(|(f, t, _)| *f == i - 1 && *t == i);
            match link {
                Some(e) => {
                    chained[e] = true;
                    let edge_label = &sketch.edges[e].2;
                    if edge_label.is_empty() {
                        out.push("  │".to_string());
                    } else {
                        out.push(format!("  │ {}", edge_label));
                    }
                    out.push("  ▼".to_string());
                }
                None => out.push(String::new()),
            }
        }

        let w = label.chars().count() + 2;
        out.push(format!("┌{}┐", "─".repeat(w)));
        out.push(format!("│ {} │", label));
        out.push(format!("└{}┘", "─".repeat(w)));
    }

    // Edges not representable in the vertical chain
    let extra: Vec<String> = sketch
        .edges
        .iter()
        .zip(&chained)
        .filter(|(_, used)| !**used)
        .map(|((f, t, label), _)| {
            if label.is_empty() {
                format!("{} ─▶ {}", sketch.ids[*f], sketch.ids[*t])
            } else {
                format!("{} ─▶ {}: {}", sketch.ids[*f], sketch.ids[*t], label)
            }
        })
        .collect();
    if !extra.is_empty() {
        out.push(String::new());
        out.extend(extra);
    }

    clamp_width(&out.join("\n"), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_gets_boxes_and_connectors() {
        let out = render("graph TD\nA[Start] --> B[Work] --> C[Done]", 80);
        assert!(out.contains("│ Start │"));
        assert!(out.contains("│ Work │"));
        assert!(out.contains("│ Done │"));
        assert!(out.contains('▼'));
    }

    #[test]
    fn edge_labels_ride_the_connector() {
        let out = render("graph TD\nA[Ask] -->|yes| B[Do it]", 80);
        assert!(out.contains("│ yes"));
    }

    #[test]
    fn non_chain_edges_are_listed() {
        let out = render("graph TD\nA --> B\nB --> C\nC --> A", 80);
        assert!(out.contains("C ─▶ A"));
    }

    #[test]
    fn node_count_is_capped() {
        let source: String = (0..40).map(|i| format!("N{}[Node {}]\n", i, i)).collect();
        let out = render(&source, 80);
        assert!(out.contains("Node 0"));
        assert!(!out.contains("Node 20"));
    }

    #[test]
    fn no_structure_degrades_to_frame() {
        let out = render("%% only a comment", 80);
        assert!(out.starts_with("┌─ flowchart"));
    }

    #[test]
    fn output_is_width_bounded() {
        let out = render("graph LR\nA[An extremely long node label goes here] --> B", 20);
        assert!(out.lines().all(|l| l.chars().count() <= 20));
    }
}
