//! Structural Mermaid → D2 rewrite.
//!
//! Used when the external graph tool only understands D2 syntax. This is
//! a best-effort line-oriented extraction, not a grammar: it pulls out
//! messages, nodes/edges, or class inheritance depending on which
//! top-level construct the source declares. Input that matches nothing
//! is passed through unchanged — translation never fails.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SEQ_MSG: Regex =
        Regex::new(r"^(\S+?)\s*(?:-->>|->>|-->|->)\s*(\S+?)\s*:\s*(.+)$").unwrap();
    static ref RE_EDGE_SPLIT: Regex = Regex::new(r"\s*(?:-\.->|==>|-->)\s*").unwrap();
    static ref RE_EDGE_LABEL: Regex = Regex::new(r"^\|([^|]*)\|\s*").unwrap();
    static ref RE_NODE_BRACKET: Regex = Regex::new(r"^([\w-]+)\[([^\]]+)\]").unwrap();
    static ref RE_NODE_PAREN: Regex = Regex::new(r"^([\w-]+)\(([^)]+)\)").unwrap();
    static ref RE_NODE_BRACE: Regex = Regex::new(r"^([\w-]+)\{([^}]+)\}").unwrap();
    static ref RE_BARE_ID: Regex = Regex::new(r"^([\w-]+)").unwrap();
    static ref RE_CLASS_DECL: Regex = Regex::new(r"^class\s+([\w-]+)").unwrap();
    static ref RE_CLASS_INHERIT: Regex = Regex::new(r"^([\w-]+)\s*<\|--\s*([\w-]+)").unwrap();
}

/// Rewrite mermaid diagram text into D2 statements.
///
/// Emission order is deterministic: node declarations first, then shape
/// annotations, then edges, each in first-appearance order. Unmatched
/// input comes back unchanged.
pub fn mermaid_to_d2(source: &str) -> String {
    let lower = source.to_lowercase();

    let statements = if lower.contains("sequencediagram") {
        extract_sequence(source)
    } else if is_flowchart(&lower) {
        extract_flowchart(source)
    } else if lower.contains("classdiagram") {
        extract_class(source)
    } else {
        Vec::new()
    };

    if statements.is_empty() {
        source.to_string()
    } else {
        statements.join("\n")
    }
}

fn is_flowchart(lower: &str) -> bool {
    lower
        .lines()
        .any(|l| l.trim_start().starts_with("flowchart") || l.trim_start().starts_with("graph"))
}

fn extract_sequence(source: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in source.lines() {
        let line = line.trim();
        if let Some(caps) = RE_SEQ_MSG.captures(line) {
            out.push(format!("{} -> {}: {}", &caps[1], &caps[2], caps[3].trim()));
        }
    }
    out
}

/// Accumulates extracted statements in the required emission order
#[derive(Default)]
struct D2Builder {
    nodes: Vec<String>,
    node_ids: Vec<String>,
    shapes: Vec<String>,
    edges: Vec<String>,
}

impl D2Builder {
    fn declare_node(&mut self, id: &str, label: Option<&str>, diamond: bool) {
        if !self.node_ids.iter().any(|n| n == id) {
            self.node_ids.push(id.to_string());
            match label {
                Some(l) => self.nodes.push(format!("{}: {}", id, l)),
                None => self.nodes.push(id.to_string()),
            }
            if diamond {
                self.shapes.push(format!("{}.shape: diamond", id));
            }
        }
    }

    fn declare_edge(&mut self, from: &str, to: &str, label: Option<&str>) {
        match label {
            Some(l) if !l.is_empty() => self.edges.push(format!("{} -> {}: {}", from, to, l)),
            _ => self.edges.push(format!("{} -> {}", from, to)),
        }
    }

    fn finish(self) -> Vec<String> {
        let mut out = self.nodes;
        out.extend(self.shapes);
        out.extend(self.edges);
        out
    }
}

fn extract_flowchart(source: &str) -> Vec<String> {
    let mut b = D2Builder::default();

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
            // A standalone node declaration
            parse_node_term(segments[0], &mut b);
            continue;
        }

        // An edge chain: A[Start] --> |ok| B --> C
        let mut prev: Option<String> = None;
        for seg in segments {
            let (edge_label, rest) = match RE_EDGE_LABEL.captures(seg) {
                Some(caps) => (Some(caps[1].trim().to_string()), &seg[caps[0].len()..]),
                None => (None, seg),
            };
            let Some(id) = parse_node_term(rest, &mut b) else {
                prev = None;
                continue;
            };
            if let Some(from) = prev.take() {
                b.declare_edge(&from, &id, edge_label.as_deref());
            }
            prev = Some(id);
        }
    }

    b.finish()
}

/// Parse one node term (`id[label]`, `id(label)`, `id{label}`, or a bare
/// id), registering labeled declarations on the builder. Returns the id.
fn parse_node_term(term: &str, b: &mut D2Builder) -> Option<String> {
    let term = term.trim();
    if let Some(caps) = RE_NODE_BRACKET.captures(term) {
        b.declare_node(&caps[1], Some(caps[2].trim()), false);
        return Some(caps[1].to_string());
    }
    if let Some(caps) = RE_NODE_PAREN.captures(term) {
        b.declare_node(&caps[1], Some(caps[2].trim()), false);
        return Some(caps[1].to_string());
    }
    if let Some(caps) = RE_NODE_BRACE.captures(term) {
        // Brace labels are decision diamonds in mermaid
        b.declare_node(&caps[1], Some(caps[2].trim()), true);
        return Some(caps[1].to_string());
    }
    RE_BARE_ID.captures(term).map(|caps| caps[1].to_string())
}

fn extract_class(source: &str) -> Vec<String> {
    let mut b = D2Builder::default();

    for line in source.lines() {
        let line = line.trim();
        if let Some(caps) = RE_CLASS_INHERIT.captures(line) {
            let base = &caps[1];
            let derived = &caps[2];
            b.declare_node(derived, None, false);
            b.declare_node(base, None, false);
            b.declare_edge(derived, base, Some("extends"));
        } else if let Some(caps) = RE_CLASS_DECL.captures(line) {
            b.declare_node(&caps[1], None, false);
        }
    }

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_messages_become_d2_edges() {
        let src = "sequenceDiagram\n  participant A\n  A->>B: Hello\n  B-->>A: Hi back";
        assert_eq!(mermaid_to_d2(src), "A -> B: Hello\nB -> A: Hi back");
    }

    #[test]
    fn labeled_edge_keeps_exact_label_and_endpoints() {
        let src = "graph TD\n  A-->|ok|B";
        assert_eq!(mermaid_to_d2(src), "A -> B: ok");
    }

    #[test]
    fn inline_node_declarations_are_hoisted_before_edges() {
        let src = "flowchart LR\n  A[Start] --> B{Decide?}\n  B --> C[Done]";
        let out = mermaid_to_d2(src);
        assert_eq!(
            out,
            "A: Start\nB: Decide?\nC: Done\nB.shape: diamond\nA -> B\nB -> C"
        );
    }

    #[test]
    fn paren_labels_do_not_get_a_shape_annotation() {
        let src = "graph TD\n  A(Round) --> B";
        let out = mermaid_to_d2(src);
        assert_eq!(out, "A: Round\nA -> B");
    }

    #[test]
    fn edge_chains_connect_consecutive_nodes() {
        let src = "graph LR\n  A --> B --> C";
        assert_eq!(mermaid_to_d2(src), "A -> B\nB -> C");
    }

    #[test]
    fn class_inheritance_becomes_extends_edge() {
        let src = "classDiagram\n  class Animal\n  Animal <|-- Dog";
        assert_eq!(mermaid_to_d2(src), "Animal\nDog\nDog -> Animal: extends");
    }

    #[test]
    fn unmatched_input_round_trips_unchanged() {
        let src = "just some prose\nwith no diagram structure";
        assert_eq!(mermaid_to_d2(src), src);
    }

    #[test]
    fn recognized_header_with_no_statements_round_trips() {
        let src = "gantt\n  title Plan";
        assert_eq!(mermaid_to_d2(src), src);
    }

    #[test]
    fn translation_is_deterministic() {
        let src = "flowchart TD\n  A[One] --> B[Two]\n  A --> C[Three]";
        assert_eq!(mermaid_to_d2(src), mermaid_to_d2(src));
    }
}
