//! md2term - Extract diagram blocks from Markdown and render them for the terminal
//!
//! This library scans Markdown documents for fenced diagram blocks
//! (mermaid, d2, math, sequence), classifies mermaid sources into
//! subtypes, and renders each block to text. Rendering prefers external
//! tools (`d2`, `diagon`) when they are on PATH and degrades to
//! built-in Unicode box-drawing renderers when they are not.
//!
//! # Example
//!
//! ```rust
//! use md2term::{render_markdown, scan_markdown};
//!
//! let doc = "```mermaid\ngraph TD\nA[Start] --> B[End]\n```";
//! assert_eq!(scan_markdown(doc).len(), 1);
//!
//! for (block, outcome) in render_markdown(doc, 80) {
//!     println!("{} ({:?})", block.dialect.tag(), outcome.tool);
//!     println!("{}", outcome.rendered);
//! }
//! ```
//!
//! # Supported Fence Tags
//!
//! - `mermaid` / `mmd` (sequence, flowchart, class, er, state and more)
//! - `d2`
//! - `math` / `latex`
//! - `sequence` / `seq`

pub mod ascii;
pub mod classify;
pub mod error;
pub mod exec;
pub mod render;
pub mod scanner;
pub mod translate;
pub mod types;

pub use classify::classify_mermaid;
pub use render::{render, render_with};
pub use scanner::scan_markdown;
pub use translate::mermaid_to_d2;
pub use types::*;

/// Scan a document and render every diagram block it contains.
///
/// Tool availability is probed once per process; pass explicit
/// availability through [`render_with`] to override it.
pub fn render_markdown(document: &str, width: usize) -> Vec<(DiagramBlock, RenderOutcome)> {
    scan_markdown(document)
        .into_iter()
        .map(|block| {
            let outcome = render::render(&block, width);
            (block, outcome)
        })
        .collect()
}
