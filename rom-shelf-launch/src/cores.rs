//! Emulator core descriptors and extension-based resolution.

use std::path::{Path, PathBuf};

/// A registered emulator core. Extensions are lowercase without the dot.
/// Lower priority values are preferred. The descriptor list is consumed
/// read-only here; a configuration UI may rewrite it between launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreDescriptor {
    pub name: String,
    pub extensions: Vec<String>,
    pub priority: u32,
}

/// Select the core for a file extension: the first core in priority
/// order that supports it, else the highest-priority core outright, else
/// `None` when no cores are registered at all.
pub fn resolve_core<'a>(
    cores: &'a [CoreDescriptor],
    ext: Option<&str>,
) -> Option<&'a CoreDescriptor> {
    let mut ordered: Vec<&CoreDescriptor> = cores.iter().collect();
    ordered.sort_by_key(|core| core.priority);

    if let Some(ext) = ext {
        if let Some(&found) = ordered
            .iter()
            .find(|core| core.extensions.iter().any(|e| e == ext))
        {
            return Some(found);
        }
    }
    ordered.first().copied()
}

/// Library path for a resolved core: `<core_dir>/<name>_libretro.so`.
pub fn core_library_path(core_dir: &Path, name: &str) -> PathBuf {
    core_dir.join(format!("{name}_libretro.so"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(name: &str, extensions: &[&str], priority: u32) -> CoreDescriptor {
        CoreDescriptor {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            priority,
        }
    }

    #[test]
    fn test_resolve_by_extension() {
        let cores = vec![
            core("snes9x", &["sfc", "smc"], 0),
            core("pcsx", &["cue", "chd"], 1),
        ];
        assert_eq!(resolve_core(&cores, Some("chd")).unwrap().name, "pcsx");
        assert_eq!(resolve_core(&cores, Some("sfc")).unwrap().name, "snes9x");
    }

    #[test]
    fn test_priority_order_wins_on_overlap() {
        let cores = vec![
            core("mednafen", &["cue"], 2),
            core("pcsx", &["cue"], 1),
        ];
        assert_eq!(resolve_core(&cores, Some("cue")).unwrap().name, "pcsx");
    }

    #[test]
    fn test_unmatched_extension_falls_back_to_highest_priority() {
        let cores = vec![
            core("pcsx", &["cue"], 1),
            core("snes9x", &["sfc"], 0),
        ];
        assert_eq!(resolve_core(&cores, Some("n64")).unwrap().name, "snes9x");
        assert_eq!(resolve_core(&cores, None).unwrap().name, "snes9x");
    }

    #[test]
    fn test_empty_core_list() {
        assert!(resolve_core(&[], Some("cue")).is_none());
    }

    #[test]
    fn test_core_library_path() {
        assert_eq!(
            core_library_path(Path::new("/opt/cores"), "pcsx"),
            PathBuf::from("/opt/cores/pcsx_libretro.so")
        );
    }
}
