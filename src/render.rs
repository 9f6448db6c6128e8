//! Render strategy orchestration.
//!
//! For each `(dialect, subtype)` an ordered list of external strategies
//! is tried first; the built-in fallback renderer for that shape runs
//! when none succeeds. Falling back is degradation, not error: the
//! outcome stays successful, with the abandoned strategy's diagnostic
//! carried in `error_detail`. Math has no subtype-specific builtin and
//! degrades to the framed dump like the unrecognized mermaid subtypes.

use crate::ascii;
use crate::ascii::canvas::clamp_width;
use crate::error::ToolError;
use crate::exec::{invoke, probe, D2_BIN, DIAGON_BIN};
use crate::translate::mermaid_to_d2;
use crate::types::{DiagramBlock, Dialect, RenderOutcome, RenderTool, Subtype, ToolAvailability};

/// Render a diagram block using the process-wide tool probe.
pub fn render(block: &DiagramBlock, width: usize) -> RenderOutcome {
    render_with(block, width, probe::tools())
}

/// One candidate external pipeline for a block
enum Strategy {
    /// `d2 <in> <out> --format txt`, rendering read from the out file
    D2 { payload: String },
    /// `diagon <generator>`, payload on stdin, rendering on stdout
    Diagon {
        generator: &'static str,
        payload: String,
    },
}

impl Strategy {
    fn tool(&self) -> RenderTool {
        match self {
            Strategy::D2 { .. } => RenderTool::D2,
            Strategy::Diagon { .. } => RenderTool::Diagon,
        }
    }
}

/// Render a diagram block with explicit tool availability. Strategies
/// run strictly in order, each completing before the next starts; the
/// first success wins. Never panics across this boundary.
pub fn render_with(block: &DiagramBlock, width: usize, tools: &ToolAvailability) -> RenderOutcome {
    let mut last_failure: Option<String> = None;

    for strategy in candidates(block, tools) {
        match attempt(&strategy, width) {
            Ok(rendered) if !rendered.trim().is_empty() => {
                return RenderOutcome::success(rendered, strategy.tool());
            }
            Ok(_) => {
                last_failure = Some("external tool produced empty output".to_string());
            }
            Err(err) => {
                log::debug!("render strategy failed for {:?}: {}", block.dialect, err);
                last_failure = Some(err.to_string());
            }
        }
    }

    fallback(block, width, last_failure)
}

fn candidates(block: &DiagramBlock, tools: &ToolAvailability) -> Vec<Strategy> {
    let mut list = Vec::new();

    match block.dialect {
        Dialect::Mermaid => match block.subtype {
            Subtype::Sequence => {
                // Diagon draws the nicest sequence diagrams; d2 can
                // take a translated version if diagon is missing
                if tools.diagon {
                    list.push(Strategy::Diagon {
                        generator: "sequence",
                        payload: block.source.clone(),
                    });
                }
                if tools.d2 {
                    list.push(Strategy::D2 {
                        payload: mermaid_to_d2(&block.source),
                    });
                }
            }
            Subtype::Flowchart => {
                if tools.d2 {
                    list.push(Strategy::D2 {
                        payload: mermaid_to_d2(&block.source),
                    });
                }
                if tools.diagon {
                    list.push(Strategy::Diagon {
                        generator: "flowchart",
                        payload: block.source.clone(),
                    });
                }
            }
            Subtype::Class | Subtype::Er | Subtype::State => {
                if tools.d2 {
                    list.push(Strategy::D2 {
                        payload: mermaid_to_d2(&block.source),
                    });
                }
            }
            _ => {}
        },
        Dialect::D2 => {
            if tools.d2 {
                list.push(Strategy::D2 {
                    payload: block.source.clone(),
                });
            }
        }
        Dialect::Math => {
            if tools.diagon {
                list.push(Strategy::Diagon {
                    generator: "math",
                    payload: block.source.clone(),
                });
            }
        }
        Dialect::Sequence => {
            if tools.diagon {
                list.push(Strategy::Diagon {
                    generator: "sequence",
                    payload: block.source.clone(),
                });
            }
        }
    }

    list
}

fn attempt(strategy: &Strategy, width: usize) -> Result<String, ToolError> {
    match strategy {
        Strategy::D2 { payload } => {
            // Success means the destination file got written, whatever
            // the exit code; content is returned verbatim
            invoke::run_with_files(D2_BIN, payload, ".d2", ".txt", &["--format", "txt"])
        }
        Strategy::Diagon { generator, payload } => {
            let out = invoke::run_with_stdin(DIAGON_BIN, &[generator], payload)?;
            Ok(clamp_width(&out, width))
        }
    }
}

fn fallback(block: &DiagramBlock, width: usize, detail: Option<String>) -> RenderOutcome {
    let source = &block.source;

    let (rendered, tool) = match block.dialect {
        Dialect::Mermaid => match block.subtype {
            Subtype::Sequence => (ascii::sequence::render(source, width), RenderTool::BuiltinAscii),
            Subtype::Flowchart => (
                ascii::flowchart::render(source, width),
                RenderTool::BuiltinAscii,
            ),
            Subtype::Class => (
                ascii::class_diagram::render(source, width),
                RenderTool::BuiltinAscii,
            ),
            _ => (
                ascii::code_frame(source, "mermaid", width),
                RenderTool::RawFallback,
            ),
        },
        Dialect::D2 => (
            ascii::d2_outline::render(source, width),
            RenderTool::BuiltinAscii,
        ),
        Dialect::Sequence => (ascii::sequence::render(source, width), RenderTool::BuiltinAscii),
        // No built-in math renderer exists; the framed dump stands in
        Dialect::Math => (
            ascii::code_frame(source, "math", width),
            RenderTool::RawFallback,
        ),
    };

    match detail {
        Some(detail) => RenderOutcome::degraded(rendered, tool, detail),
        None => RenderOutcome::success(rendered, tool),
    }
}
