//! One-shot external tool availability probe.
//!
//! The probe walks `PATH` once per process and memoizes the result.
//! Absence is treated as permanent for the process lifetime — a tool
//! installed mid-session is only seen after a restart.

use std::path::Path;
use std::sync::OnceLock;

use crate::types::ToolAvailability;

use super::{D2_BIN, DIAGON_BIN};

static TOOL_STATE: OnceLock<ToolAvailability> = OnceLock::new();

/// Process-wide tool availability, probed on first call.
pub fn tools() -> &'static ToolAvailability {
    TOOL_STATE.get_or_init(|| {
        let state = ToolAvailability {
            d2: in_path(D2_BIN),
            diagon: in_path(DIAGON_BIN),
        };
        log::debug!(
            "external tool probe: d2={} diagon={}",
            state.d2,
            state.diagon
        );
        state
    })
}

/// Check whether an executable with the given name exists in any `PATH`
/// entry. A plain existence check, like `which` — no execute-bit or
/// version validation.
pub fn in_path(name: &str) -> bool {
    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|dir| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return true;
        }
        if cfg!(windows) {
            return Path::new(&dir).join(format!("{}.exe", name)).is_file();
        }
        false
    })
}
