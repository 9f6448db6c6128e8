use md2term::{
    classify_mermaid, mermaid_to_d2, render_markdown, render_with, scan_markdown, Dialect,
    RenderTool, Subtype, ToolAvailability,
};

#[test]
fn scans_blocks_in_document_order() {
    let doc = "\
# Notes

```mermaid
sequenceDiagram
A->>B: ping
```

prose in between

```d2
a -> b
```

```math
\\sum_{i=0}^n i
```
";
    let blocks = scan_markdown(doc);
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].dialect, Dialect::Mermaid);
    assert_eq!(blocks[0].subtype, Subtype::Sequence);
    assert_eq!(blocks[1].dialect, Dialect::D2);
    assert_eq!(blocks[2].dialect, Dialect::Math);
    // Fence lines are excluded from the captured source
    assert!(!blocks[0].source.contains("```"));
    assert_eq!(blocks[1].source, "a -> b");
}

#[test]
fn unterminated_fence_is_discarded() {
    let doc = "```mermaid\ngraph TD\nA --> B\n";
    assert!(scan_markdown(doc).is_empty());
}

#[test]
fn unsupported_fence_tags_are_ignored() {
    let doc = "```rust\nfn main() {}\n```\n```python\npass\n```";
    assert!(scan_markdown(doc).is_empty());
}

#[test]
fn classification_covers_every_block() {
    let doc = "\
```mermaid
flowchart LR
A --> B
```
```mmd
classDiagram
class Foo
```
```mermaid
just some text
```
";
    let blocks = scan_markdown(doc);
    assert_eq!(blocks[0].subtype, Subtype::Flowchart);
    assert_eq!(blocks[1].subtype, Subtype::Class);
    assert_eq!(blocks[2].subtype, Subtype::Generic);
    assert_eq!(classify_mermaid("stateDiagram-v2\n[*] --> Idle"), Subtype::State);
}

#[test]
fn translation_is_identity_on_unrecognized_input() {
    let source = "%%{init: {}}%%\n";
    assert_eq!(mermaid_to_d2(source), source);
}

#[test]
fn translation_handles_labeled_edges() {
    let out = mermaid_to_d2("graph TD\nA-->|ok|B");
    assert!(out.contains("A -> B: ok"));
}

#[test]
fn builtin_renderers_honor_the_width_limit() {
    let long_label = "L".repeat(200);
    let doc = format!(
        "```mermaid\nsequenceDiagram\nA->>B: {}\n```\n```seq\nA -> B: hi\n```",
        long_label
    );
    for (block, _) in render_markdown(&doc, 40) {
        let outcome = render_with(&block, 40, &ToolAvailability::none());
        for line in outcome.rendered.lines() {
            assert!(line.chars().count() <= 40, "line too wide: {:?}", line);
        }
    }
}

#[test]
fn mermaid_sequence_renders_without_any_tools() {
    let doc = "\
```mermaid
sequenceDiagram
participant Alice
participant Bob
Alice->>Bob: Hello
Bob-->>Alice: Hi back
```
";
    let blocks = scan_markdown(doc);
    assert_eq!(blocks.len(), 1);
    let outcome = render_with(&blocks[0], 80, &ToolAvailability::none());
    assert!(outcome.succeeded);
    assert_eq!(outcome.tool, RenderTool::BuiltinAscii);
    assert!(outcome.rendered.contains("Alice"));
    assert!(outcome.rendered.contains("Bob"));
    assert!(outcome.rendered.contains("Hello"));
}

#[test]
fn math_without_diagon_succeeds_as_framed_dump() {
    let doc = "```math\ne^{i\\pi} + 1 = 0\n```";
    let blocks = scan_markdown(doc);
    let outcome = render_with(&blocks[0], 80, &ToolAvailability::none());
    assert!(outcome.succeeded);
    assert_eq!(outcome.tool, RenderTool::RawFallback);
    assert!(outcome.error_detail.is_none());
    assert!(outcome.rendered.contains("e^{i\\pi}"));
}

#[cfg(unix)]
mod failing_tool {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn temp_residue(tool: &str) -> usize {
        let prefix = format!("md2term_{}_", tool);
        fs::read_dir(std::env::temp_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_name().to_string_lossy().starts_with(&prefix))
                    .count()
            })
            .unwrap_or(0)
    }

    // Puts a d2 stub that always fails at the front of PATH, restoring
    // PATH before returning the render outcome
    fn render_against_failing_d2(doc: &str) -> md2term::RenderOutcome {
        let dir = tempfile::tempdir().expect("tempdir");
        let stub = dir.path().join("d2");
        fs::write(&stub, "#!/bin/sh\necho 'boom' >&2\nexit 1\n").expect("write stub");
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).expect("chmod");

        let old_path = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![dir.path().to_path_buf()];
        paths.extend(std::env::split_paths(&old_path));
        let new_path = std::env::join_paths(paths).expect("join paths");
        std::env::set_var("PATH", &new_path);

        let blocks = scan_markdown(doc);
        let tools = ToolAvailability {
            d2: true,
            diagon: false,
        };
        let outcome = render_with(&blocks[0], 80, &tools);

        std::env::set_var("PATH", &old_path);
        outcome
    }

    #[test]
    #[serial]
    fn broken_d2_degrades_to_builtin_and_cleans_up() {
        let before = temp_residue("d2");

        let doc = "```mermaid\nflowchart TD\nA[Go] --> B[Stop]\n```";
        let outcome = render_against_failing_d2(doc);

        assert!(outcome.succeeded);
        assert_eq!(outcome.tool, RenderTool::BuiltinAscii);
        let detail = outcome.error_detail.expect("degradation detail");
        assert!(detail.contains("boom"), "detail was {:?}", detail);
        assert!(outcome.rendered.contains("Go"));
        assert_eq!(temp_residue("d2"), before);
    }

    #[test]
    #[serial]
    fn broken_d2_on_a_d2_block_falls_back_to_outline() {
        let doc = "```d2\nserver: Web Server\nserver -> db: queries\n```";
        let outcome = render_against_failing_d2(doc);

        assert!(outcome.succeeded);
        assert_eq!(outcome.tool, RenderTool::BuiltinAscii);
        assert!(outcome.error_detail.is_some());
        assert!(outcome.rendered.contains("▪ server: Web Server"));
        assert!(outcome.rendered.contains("server -> db: queries"));
    }
}
