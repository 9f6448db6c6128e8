//! Class diagram fallback renderer.
//!
//! Draws each class as a UML-style box with name, attribute, and method
//! compartments, then lists inheritance relations underneath.

use lazy_static::lazy_static;
use regex::Regex;

use super::canvas::clamp_width;
use super::code_frame;

lazy_static! {
    static ref RE_CLASS_OPEN: Regex = Regex::new(r"^class\s+([\w-]+)\s*\{").unwrap();
    static ref RE_CLASS_DECL: Regex = Regex::new(r"^class\s+([\w-]+)\s*$").unwrap();
    static ref RE_MEMBER: Regex = Regex::new(r"^([+\-#~])\s*(.+)$").unwrap();
    static ref RE_INHERIT: Regex = Regex::new(r"^([\w-]+)\s*<\|--\s*([\w-]+)").unwrap();
}

const MAX_CLASSES: usize = 8;
const MAX_MEMBERS: usize = 10;

struct ClassSketch {
    name: String,
    attributes: Vec<String>,
    methods: Vec<String>,
}

fn parse(source: &str) -> (Vec<ClassSketch>, Vec<(String, String)>) {
    let mut classes: Vec<ClassSketch> = Vec::new();
    let mut inherits: Vec<(String, String)> = Vec::new();
    let mut open: Option<usize> = None;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.to_lowercase().starts_with("classdiagram") {
            continue;
        }

        if let Some(caps) = RE_INHERIT.captures(line) {
            // `Base <|-- Derived`
            inherits.push((caps[2].to_string(), caps[1].to_string()));
            continue;
        }

        if let Some(caps) = RE_CLASS_OPEN.captures(line) {
            open = push_class(&mut classes, &caps[1]);
            continue;
        }
        if let Some(caps) = RE_CLASS_DECL.captures(line) {
            push_class(&mut classes, &caps[1]);
            continue;
        }

        if line == "}" {
            open = None;
            continue;
        }

        if let (Some(idx), Some(caps)) = (open, RE_MEMBER.captures(line)) {
            let class = &mut classes[idx];
            if class.attributes.len() + class.methods.len() >= MAX_MEMBERS {
                continue;
            }
            let member = format!("{}{}", &caps[1], caps[2].trim());
            // Methods carry parentheses, attributes don't
            if member.contains('(') {
                class.methods.push(member);
            } else {
                class.attributes.push(member);
            }
        }
    }

    (classes, inherits)
}

fn push_class(classes: &mut Vec<ClassSketch>, name: &str) -> Option<usize> {
    if let Some(i) = classes.iter().position(|c| c.name == name) {
        return Some(i);
    }
    if classes.len() >= MAX_CLASSES {
        return None;
    }
    classes.push(ClassSketch {
        name: name.to_string(),
        attributes: Vec::new(),
        methods: Vec::new(),
    });
    Some(classes.len() - 1)
}

/// Render class diagram source to UML-style boxes, bounded to `width`
/// columns. Degrades to a framed dump when no classes are found.
pub fn render(source: &str, width: usize) -> String {
    let (classes, inherits) = parse(source);
    if classes.is_empty() {
        return code_frame(source, "class", width);
    }

    let mut out: Vec<String> = Vec::new();

    for (i, class) in classes.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }

        let inner = class
            .attributes
            .iter()
            .chain(&class.methods)
            .map(|m| m.chars().count())
            .chain(std::iter::once(class.name.chars().count()))
            .max()
            .unwrap_or(1)
            .clamp(1, width.saturating_sub(4).max(1));

        let pad = |s: &str| -> String {
            let truncated: String = s.chars().take(inner).collect();
            format!("│ {:<1$} │", truncated, inner)
        };

        out.push(format!("┌{}┐", "─".repeat(inner + 2)));
        out.push(pad(&class.name));
        if !class.attributes.is_empty() || !class.methods.is_empty() {
            out.push(format!("├{}┤", "─".repeat(inner + 2)));
            for attr in &class.attributes {
                out.push(pad(attr));
            }
            if !class.attributes.is_empty() && !class.methods.is_empty() {
                out.push(format!("├{}┤", "─".repeat(inner + 2)));
            }
            for method in &class.methods {
                out.push(pad(method));
            }
        }
        out.push(format!("└{}┘", "─".repeat(inner + 2)));
    }

    if !inherits.is_empty() {
        out.push(String::new());
        for (derived, base) in &inherits {
            out.push(format!("{} ──▷ {}", derived, base));
        }
    }

    clamp_width(&out.join("\n"), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIMALS: &str = "classDiagram\n\
        class Animal {\n  +name\n  -age\n  +speak()\n}\n\
        class Dog\n\
        Animal <|-- Dog";

    #[test]
    fn draws_compartmented_boxes() {
        let out = render(ANIMALS, 80);
        assert!(out.contains("│ Animal"));
        assert!(out.contains("│ +name"));
        assert!(out.contains("│ -age"));
        assert!(out.contains("│ +speak()"));
        assert!(out.contains("│ Dog"));
    }

    #[test]
    fn inheritance_is_listed_derived_to_base() {
        let out = render(ANIMALS, 80);
        assert!(out.contains("Dog ──▷ Animal"));
    }

    #[test]
    fn class_count_is_capped() {
        let source: String = (0..20).map(|i| format!("class C{}\n", i)).collect();
        let out = render(&source, 80);
        assert!(out.contains("C0"));
        assert!(!out.contains("C12"));
    }

    #[test]
    fn no_classes_degrades_to_frame() {
        let out = render("just text", 80);
        assert!(out.starts_with("┌─ class"));
    }

    #[test]
    fn output_is_width_bounded() {
        let out = render(ANIMALS, 12);
        assert!(out.lines().all(|l| l.chars().count() <= 12));
    }
}
