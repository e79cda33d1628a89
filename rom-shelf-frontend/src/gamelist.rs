//! Gamelist sidecar: the persisted per-platform catalog file.
//!
//! Reading yields the registered-path set the projection engine consumes;
//! writing rewrites the whole sidecar from the tree at save points. Paths
//! in the file are relative to the sidecar's own directory (`./Doom.cue`).

use std::collections::BTreeSet;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use rom_shelf_core::projection::RegisteredSource;
use rom_shelf_core::tree::{Catalog, KindMask, Platform, PlatformId};

use crate::error::GamelistError;

/// Path of a platform's sidecar file: `<rom_dir>/gamelist.xml`.
pub fn gamelist_path(platform: &Platform) -> PathBuf {
    platform.rom_dir().join("gamelist.xml")
}

/// Registered-path source backed by the gamelist sidecar.
///
/// The file is re-read on every call — the projection engine assumes the
/// source may change between queries, so nothing is cached here. A
/// missing or malformed sidecar yields the empty set, never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct GamelistSource;

impl RegisteredSource for GamelistSource {
    fn load_registered_paths(&self, platform: &Platform) -> BTreeSet<PathBuf> {
        let path = gamelist_path(platform);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(_) => return BTreeSet::new(),
        };
        let base = path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        match read_game_paths(std::io::BufReader::new(file), &base) {
            Ok(paths) => paths,
            Err(e) => {
                log::warn!("ignoring malformed gamelist {}: {e}", path.display());
                BTreeSet::new()
            }
        }
    }
}

/// Parse the `<path>` of every `<game>` element, resolving relative
/// entries against `base`.
pub fn read_game_paths<R: BufRead>(
    reader: R,
    base: &Path,
) -> Result<BTreeSet<PathBuf>, GamelistError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut paths = BTreeSet::new();
    let mut in_game = false;
    let mut in_path = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"game" => in_game = true,
                b"path" if in_game => in_path = true,
                _ => {}
            },
            Event::Text(ref e) => {
                if in_path {
                    let text = e.unescape()?.to_string();
                    paths.insert(resolve_entry_path(&text, base));
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"game" => in_game = false,
                b"path" => in_path = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paths)
}

/// Apply the sidecar's metadata decoration to a platform's tree.
///
/// Each `<game>`/`<folder>` element is matched to a node by path and its
/// child elements written into the node's metadata record. Loaded values
/// do not count as changes (the changed flag is reset afterwards), so a
/// freshly loaded tree has nothing to save. Entries whose path matches
/// no node are skipped. Returns the number of nodes decorated; a missing
/// sidecar decorates nothing.
pub fn apply_gamelist(
    catalog: &mut Catalog,
    platform: PlatformId,
) -> Result<usize, GamelistError> {
    let path = gamelist_path(catalog.platform(platform));
    let file = match fs::File::open(&path) {
        Ok(file) => file,
        Err(_) => return Ok(0),
    };
    let base = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let entries = read_entries(std::io::BufReader::new(file), &base)?;

    let root = catalog.platform(platform).root();
    let nodes = catalog.files_recursive(root, KindMask::ALL, None);
    let mut applied = 0;
    for entry in entries {
        // Unlike the registered-path lookup this also matches folder
        // entries, so folder decoration survives a save/load cycle.
        let node = match nodes
            .iter()
            .copied()
            .find(|&node| catalog.node(node).path() == entry.path)
        {
            Some(node) => node,
            None => {
                log::debug!("gamelist entry has no node: {}", entry.path.display());
                continue;
            }
        };
        let metadata = &mut catalog.node_mut(node).metadata;
        for (key, value) in entry.fields {
            metadata.set(key, value);
        }
        metadata.reset_changed_flag();
        applied += 1;
    }
    Ok(applied)
}

struct GamelistEntry {
    path: PathBuf,
    fields: Vec<(String, String)>,
}

/// Parse every `<game>`/`<folder>` element into (path, metadata fields).
fn read_entries<R: BufRead>(reader: R, base: &Path) -> Result<Vec<GamelistEntry>, GamelistError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut in_entry = false;
    let mut current_tag = String::new();
    let mut current_path: Option<PathBuf> = None;
    let mut current_fields: Vec<(String, String)> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag.as_str() {
                    "game" | "folder" => {
                        in_entry = true;
                        current_path = None;
                        current_fields.clear();
                    }
                    _ if in_entry => current_tag = tag,
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if in_entry && !current_tag.is_empty() {
                    let text = e.unescape()?.to_string();
                    if current_tag == "path" {
                        current_path = Some(resolve_entry_path(&text, base));
                    } else {
                        current_fields.push((current_tag.clone(), text));
                    }
                }
            }
            Event::End(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag.as_str() {
                    "game" | "folder" => {
                        if let Some(path) = current_path.take() {
                            entries.push(GamelistEntry {
                                path,
                                fields: std::mem::take(&mut current_fields),
                            });
                        }
                        in_entry = false;
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// `./Doom.cue` resolves under `base`; absolute entries pass through.
fn resolve_entry_path(entry: &str, base: &Path) -> PathBuf {
    let trimmed = entry.strip_prefix("./").unwrap_or(entry);
    let path = Path::new(trimmed);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Rewrite a platform's sidecar from its tree.
///
/// An entry is persisted for every non-alias node carrying curated
/// metadata — any non-default value besides the path-derived `name`.
/// Play counts, favorites, and scraped fields all qualify, so a game
/// becomes registered the first time it is launched or decorated.
/// Changed flags are cleared afterwards (this is the save point).
///
/// Returns the number of entries written.
pub fn write_gamelist(
    catalog: &mut Catalog,
    platform: PlatformId,
    out_path: &Path,
) -> Result<usize, GamelistError> {
    let root = catalog.platform(platform).root();
    let rom_dir = catalog.platform(platform).rom_dir().to_path_buf();
    let nodes = catalog.files_recursive(root, KindMask::ALL, None);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\"?>\n");
    xml.push_str("<gameList>\n");

    let mut written = 0;
    for &id in &nodes {
        let node = catalog.node(id);
        if node.is_alias() {
            continue;
        }
        let curated = node
            .metadata
            .iter_schema()
            .any(|(key, _)| key != "name" && !node.metadata.is_default(key));
        if !curated {
            continue;
        }

        let tag = if node.is_folder() { "folder" } else { "game" };
        xml.push_str("  <");
        xml.push_str(tag);
        xml.push_str(">\n");
        write_tag(&mut xml, "path", &relative_entry_path(node.path(), &rom_dir));
        for (key, value) in node.metadata.iter_schema() {
            if key == "name" || !node.metadata.is_default(key) {
                write_tag(&mut xml, key, value);
            }
        }
        xml.push_str("  </");
        xml.push_str(tag);
        xml.push_str(">\n");
        written += 1;
    }

    xml.push_str("</gameList>\n");

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(out_path)?;
    file.write_all(xml.as_bytes())?;

    for &id in &nodes {
        catalog.node_mut(id).metadata.reset_changed_flag();
    }

    Ok(written)
}

fn relative_entry_path(path: &Path, rom_dir: &Path) -> String {
    match pathdiff::diff_paths(path, rom_dir) {
        Some(rel) => format!("./{}", rel.display()),
        None => path.display().to_string(),
    }
}

fn write_tag(xml: &mut String, tag: &str, value: &str) {
    xml.push_str("    <");
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape_xml(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
