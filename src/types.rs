//! Type definitions for diagram blocks and render outcomes

use serde::Serialize;

/// The diagram markup family a fenced block was tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Mermaid family (` ```mermaid ` / ` ```mmd `) — the only dialect
    /// with multiple structural subtypes
    Mermaid,
    /// D2 graph language (` ```d2 `)
    D2,
    /// LaTeX-style math expressions (` ```math ` / ` ```latex `)
    Math,
    /// Diagon-style sequence shorthand (` ```sequence ` / ` ```seq `)
    Sequence,
}

impl Dialect {
    /// Map a fence tag to a dialect. Tags are matched case-insensitively;
    /// unknown tags yield `None` and the block is not extracted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "mermaid" | "mmd" => Some(Dialect::Mermaid),
            "d2" => Some(Dialect::D2),
            "math" | "latex" => Some(Dialect::Math),
            "sequence" | "seq" => Some(Dialect::Sequence),
            _ => None,
        }
    }

    /// Canonical tag, used when framing a raw dump of the block
    pub fn tag(&self) -> &'static str {
        match self {
            Dialect::Mermaid => "mermaid",
            Dialect::D2 => "d2",
            Dialect::Math => "math",
            Dialect::Sequence => "sequence",
        }
    }
}

/// Structural sub-kind of a mermaid diagram, determined by content
/// inspection. Non-mermaid dialects always carry `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    Sequence,
    Flowchart,
    Class,
    Er,
    State,
    Gantt,
    Pie,
    Git,
    Mindmap,
    Timeline,
    Journey,
    Requirement,
    C4,
    Generic,
}

impl Subtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::Sequence => "sequence",
            Subtype::Flowchart => "flowchart",
            Subtype::Class => "class",
            Subtype::Er => "er",
            Subtype::State => "state",
            Subtype::Gantt => "gantt",
            Subtype::Pie => "pie",
            Subtype::Git => "git",
            Subtype::Mindmap => "mindmap",
            Subtype::Timeline => "timeline",
            Subtype::Journey => "journey",
            Subtype::Requirement => "requirement",
            Subtype::C4 => "c4",
            Subtype::Generic => "generic",
        }
    }
}

/// One fenced diagram block extracted from a Markdown document.
///
/// `start_line` / `end_line` are 0-based indices into the originating
/// document and include the fence lines themselves; `source` is the
/// verbatim text strictly between the fences.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramBlock {
    pub dialect: Dialect,
    pub subtype: Subtype,
    pub source: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl DiagramBlock {
    pub fn new(
        dialect: Dialect,
        subtype: Subtype,
        source: String,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        debug_assert!(start_line < end_line);
        Self {
            dialect,
            subtype,
            source,
            start_line,
            end_line,
        }
    }
}

/// Which rendering pipeline produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderTool {
    /// External `d2` CLI (file-based graph tool)
    D2,
    /// External `diagon` CLI (stdin/stdout text tool)
    Diagon,
    /// One of the built-in subtype-specific renderers
    BuiltinAscii,
    /// The framed verbatim dump
    RawFallback,
}

/// Result of rendering one diagram block.
///
/// `succeeded == true` always comes with non-empty `rendered`.
/// `error_detail` is set when the render failed outright, or when a
/// preferred external strategy failed and a fallback was used instead
/// (degradation, not error).
#[derive(Debug, Clone, Serialize)]
pub struct RenderOutcome {
    pub rendered: String,
    pub tool: RenderTool,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl RenderOutcome {
    pub fn success(rendered: String, tool: RenderTool) -> Self {
        Self {
            rendered,
            tool,
            succeeded: true,
            error_detail: None,
        }
    }

    pub fn degraded(rendered: String, tool: RenderTool, detail: String) -> Self {
        Self {
            rendered,
            tool,
            succeeded: true,
            error_detail: Some(detail),
        }
    }

    pub fn failure(rendered: String, tool: RenderTool, detail: String) -> Self {
        Self {
            rendered,
            tool,
            succeeded: false,
            error_detail: Some(detail),
        }
    }
}

/// Which external tools are present on the search path.
///
/// Populated at most once per process by [`crate::exec::probe::tools`];
/// a tool installed mid-session is not picked up until restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolAvailability {
    pub d2: bool,
    pub diagon: bool,
}

impl ToolAvailability {
    /// No external tools — forces the built-in fallback renderers
    pub fn none() -> Self {
        Self::default()
    }
}
