//! Launch command templates.
//!
//! Substitution is pure, case-sensitive string replacement. Placeholders
//! with no resolved value stay in the command verbatim — the template
//! author is responsible for a well-formed command line.

use std::path::Path;

use rom_shelf_core::util;

/// Escape a path for inclusion in a shell command line by
/// backslash-escaping spaces and shell metacharacters.
pub fn escape_path(path: &Path) -> String {
    const ESCAPED: &str = " \\!\"'`^&*(){}[]=?;<>|$~#";
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if ESCAPED.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Substitute the launch placeholders into `template`:
///
/// * `%ROM%` — shell-escaped ROM path
/// * `%BASENAME%` — ROM filename stem
/// * `%ROM_RAW%` — unescaped ROM path
/// * `%CORE%` — resolved core library path, when one was resolved
/// * `%CONFIG%` — resolved per-platform config path, when given
pub fn build_command(
    template: &str,
    rom: &Path,
    core_path: Option<&Path>,
    config_path: Option<&Path>,
) -> String {
    let mut command = template.to_string();
    if let Some(core) = core_path {
        command = command.replace("%CORE%", &core.to_string_lossy());
    }
    if let Some(config) = config_path {
        command = command.replace("%CONFIG%", &config.to_string_lossy());
    }
    command = command.replace("%ROM%", &escape_path(rom));
    command = command.replace("%BASENAME%", &util::stem_lossy(rom));
    command.replace("%ROM_RAW%", &rom.to_string_lossy())
}
