use std::path::Path;

/// Lowercased file extension of a path, without the dot ("CUE" -> "cue").
///
/// Returns `None` for paths with no extension.
pub fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// File stem (name without extension) as a lossy string, "" if absent.
pub fn stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name (with extension) as a lossy string, "" if absent.
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Strip trailing parenthesized/bracketed qualifiers from a title:
/// `"Doom (USA) [!]"` becomes `"Doom"`. Used for clean collection names.
pub fn remove_parenthesis(name: &str) -> String {
    let mut out = name.to_string();
    loop {
        let trimmed = out.trim_end();
        let stripped = match trimmed.as_bytes().last() {
            Some(b')') => trimmed.rfind('('),
            Some(b']') => trimmed.rfind('['),
            _ => None,
        };
        match stripped {
            Some(open) if open > 0 => out.truncate(open),
            _ => break,
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ext_lower() {
        assert_eq!(ext_lower(Path::new("/roms/a.CUE")).as_deref(), Some("cue"));
        assert_eq!(ext_lower(Path::new("/roms/a.bin")).as_deref(), Some("bin"));
        assert_eq!(ext_lower(Path::new("/roms/noext")), None);
    }

    #[test]
    fn test_stem_lossy() {
        assert_eq!(stem_lossy(&PathBuf::from("/roms/Doom (USA).cue")), "Doom (USA)");
        assert_eq!(stem_lossy(&PathBuf::from("/")), "");
    }

    #[test]
    fn test_remove_parenthesis() {
        assert_eq!(remove_parenthesis("Doom (USA)"), "Doom");
        assert_eq!(remove_parenthesis("Doom (USA) [!]"), "Doom");
        assert_eq!(remove_parenthesis("Doom"), "Doom");
        assert_eq!(remove_parenthesis("(proto)"), "(proto)");
    }
}
