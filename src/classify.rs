//! Mermaid subtype classification

use crate::types::Subtype;

/// Determine the structural sub-kind of a mermaid diagram by keyword
/// containment over the lowercased source. First match wins under a
/// fixed priority ordering; anything unrecognized is `Generic`.
///
/// Total and deterministic — never fails, even on empty input.
pub fn classify_mermaid(source: &str) -> Subtype {
    let lower = source.to_lowercase();

    if lower.contains("sequencediagram") {
        Subtype::Sequence
    } else if lower.contains("flowchart") || lower.contains("graph td") || lower.contains("graph lr")
    {
        Subtype::Flowchart
    } else if lower.contains("classdiagram") {
        Subtype::Class
    } else if lower.contains("erdiagram") {
        Subtype::Er
    } else if lower.contains("statediagram") {
        Subtype::State
    } else if lower.contains("gantt") {
        Subtype::Gantt
    } else if lower.contains("pie") {
        Subtype::Pie
    } else if lower.contains("gitgraph") {
        Subtype::Git
    } else if lower.contains("mindmap") {
        Subtype::Mindmap
    } else if lower.contains("timeline") {
        Subtype::Timeline
    } else if lower.contains("journey") {
        Subtype::Journey
    } else if lower.contains("requirementdiagram") {
        Subtype::Requirement
    } else if lower.contains("c4context") || lower.contains("c4container") {
        Subtype::C4
    } else {
        Subtype::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_subtype() {
        assert_eq!(
            classify_mermaid("sequenceDiagram\nA->>B: hi"),
            Subtype::Sequence
        );
        assert_eq!(classify_mermaid("flowchart LR\nA --> B"), Subtype::Flowchart);
        assert_eq!(classify_mermaid("graph TD\nA --> B"), Subtype::Flowchart);
        assert_eq!(classify_mermaid("classDiagram\nclass Foo"), Subtype::Class);
        assert_eq!(classify_mermaid("erDiagram\nA ||--o{ B : has"), Subtype::Er);
        assert_eq!(classify_mermaid("stateDiagram-v2\n[*] --> S"), Subtype::State);
        assert_eq!(classify_mermaid("gantt\ntitle plan"), Subtype::Gantt);
        assert_eq!(classify_mermaid("pie\n\"a\": 1"), Subtype::Pie);
        assert_eq!(classify_mermaid("gitGraph\ncommit"), Subtype::Git);
        assert_eq!(classify_mermaid("mindmap\nroot"), Subtype::Mindmap);
        assert_eq!(classify_mermaid("timeline\n2024"), Subtype::Timeline);
        assert_eq!(classify_mermaid("journey\ntitle trip"), Subtype::Journey);
        assert_eq!(
            classify_mermaid("requirementDiagram\nrequirement r"),
            Subtype::Requirement
        );
        assert_eq!(classify_mermaid("C4Context\nPerson(a, A)"), Subtype::C4);
    }

    #[test]
    fn unknown_and_empty_input_is_generic() {
        assert_eq!(classify_mermaid(""), Subtype::Generic);
        assert_eq!(classify_mermaid("quadrantChart\n  x-axis"), Subtype::Generic);
    }

    #[test]
    fn sequence_wins_over_later_keywords() {
        // Priority is fixed: sequence outranks flowchart even when both
        // keywords appear in the text.
        let src = "sequenceDiagram\nNote over A: see the flowchart below";
        assert_eq!(classify_mermaid(src), Subtype::Sequence);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_mermaid("SEQUENCEDIAGRAM"), Subtype::Sequence);
        assert_eq!(classify_mermaid("ClassDiagram"), Subtype::Class);
    }
}
