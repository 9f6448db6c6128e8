//! External process invocation with scoped temporary resources.
//!
//! Two invocation shapes exist: stdin/stdout tools (diagon) and
//! file-based tools (d2). File-based invocation writes the payload to a
//! uniquely named temp file and expects the tool to fill a second temp
//! file; both are owned by RAII guards, so they are removed on every
//! exit path — success, tool failure, or early return.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::{Builder, NamedTempFile};

use crate::error::ToolError;

use super::STDERR_LIMIT;

/// Invoke a tool that takes its payload on stdin and renders to stdout.
///
/// Non-zero exit surfaces the first [`STDERR_LIMIT`] chars of stderr as
/// the failure detail.
pub fn run_with_stdin(
    tool: &'static str,
    args: &[&str],
    payload: &str,
) -> Result<String, ToolError> {
    log::debug!("invoking {} {:?} ({} bytes on stdin)", tool, args, payload.len());

    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::Spawn { tool, source })?;

    if let Some(mut stdin) = child.stdin.take() {
        // The tool may exit without draining stdin; a broken pipe here
        // is reported through the exit status below, not as a fault.
        let _ = stdin.write_all(payload.as_bytes());
    }

    let output = child
        .wait_with_output()
        .map_err(|source| ToolError::Spawn { tool, source })?;

    if !output.status.success() {
        return Err(ToolError::ExecutionFailed {
            tool,
            detail: failure_detail(&output.stderr, output.status.code()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Invoke a file-based tool as `tool <input> <output> [extra args...]`.
///
/// The payload is written to a scoped temp file whose name embeds a
/// content hash (concurrent invocations with different payloads never
/// collide). Success is determined by the output file existing and
/// being non-empty after the process exits, not by exit code alone.
pub fn run_with_files(
    tool: &'static str,
    payload: &str,
    in_suffix: &str,
    out_suffix: &str,
    extra_args: &[&str],
) -> Result<String, ToolError> {
    let tag = content_tag(payload);

    let mut input = scoped_file(tool, &tag, in_suffix)?;
    input
        .write_all(payload.as_bytes())
        .and_then(|_| input.flush())
        .map_err(|source| ToolError::Spawn { tool, source })?;

    // Created empty; the tool overwrites it in place.
    let output_path = scoped_file(tool, &tag, out_suffix)?.into_temp_path();

    log::debug!("invoking {} {:?} -> {:?}", tool, input.path(), output_path);

    let result = Command::new(tool)
        .arg(input.path())
        .arg(&output_path)
        .args(extra_args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| ToolError::Spawn { tool, source })?;

    let rendered = std::fs::read_to_string(&output_path).unwrap_or_default();
    if rendered.is_empty() {
        return Err(ToolError::ExecutionFailed {
            tool,
            detail: failure_detail(&result.stderr, result.status.code()),
        });
    }

    Ok(rendered)
}

fn scoped_file(tool: &str, tag: &str, suffix: &str) -> Result<NamedTempFile, ToolError> {
    Builder::new()
        .prefix(&format!("md2term_{}_{}_", tool, tag))
        .suffix(suffix)
        .tempfile()
        .map_err(|source| ToolError::Spawn {
            tool: "tempfile",
            source,
        })
}

fn content_tag(payload: &str) -> String {
    let mut hasher = DefaultHasher::new();
    payload.hash(&mut hasher);
    format!("{:08x}", hasher.finish() as u32)
}

fn failure_detail(stderr: &[u8], code: Option<i32>) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let slice: String = stderr.trim().chars().take(STDERR_LIMIT).collect();
    if slice.is_empty() {
        match code {
            Some(c) => format!("exit code {}", c),
            None => "terminated by signal".to_string(),
        }
    } else {
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scoped to one tool's prefix so parallel tests don't see each
    // other's in-flight files
    fn residual_temp_files(tool: &str) -> usize {
        let prefix = format!("md2term_{}_", tool);
        std::fs::read_dir(std::env::temp_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_name().to_string_lossy().starts_with(&prefix))
                    .count()
            })
            .unwrap_or(0)
    }

    #[test]
    fn missing_tool_is_a_spawn_error() {
        let err = run_with_stdin("md2term-no-such-tool", &[], "x").unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn stdin_tool_round_trips_payload() {
        let out = run_with_stdin("cat", &[], "hello\nworld\n").unwrap();
        assert_eq!(out, "hello\nworld\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_carries_bounded_stderr() {
        let err = run_with_stdin("sh", &["-c", "echo boom >&2; exit 3"], "").unwrap_err();
        match err {
            ToolError::ExecutionFailed { detail, .. } => {
                assert!(detail.contains("boom"));
                assert!(detail.chars().count() <= STDERR_LIMIT);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn file_tool_output_is_read_back() {
        // `cp <input> <output>` stands in for a file-based renderer
        let out = run_with_files("cp", "a -> b\n", ".in", ".out", &[]).unwrap();
        assert_eq!(out, "a -> b\n");
        assert_eq!(residual_temp_files("cp"), 0);
    }

    #[test]
    fn failed_invocation_leaves_no_temp_files() {
        let err = run_with_files("md2term-no-such-tool", "payload", ".in", ".out", &[]);
        assert!(err.is_err());
        assert_eq!(residual_temp_files("md2term-no-such-tool"), 0);
    }

    #[cfg(unix)]
    #[test]
    fn empty_output_despite_zero_exit_is_a_failure() {
        // `true` exits 0 without touching the output file
        let err = run_with_files("true", "payload", ".in", ".out", &[]).unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
        assert_eq!(residual_temp_files("true"), 0);
    }
}
