//! Directory scanner populating a platform tree from disk.
//!
//! Plain recursive walk: directories become folder nodes, files with a
//! matching extension become game nodes. Traversal is sorted so repeated
//! scans produce the same tree, and the tree's idempotent insert makes
//! re-scanning over a live catalog safe.

use std::fs;
use std::io;
use std::path::Path;

use rom_shelf_core::tree::{Catalog, NodeId, PlatformId};
use rom_shelf_core::util;

/// Scan the platform's ROM directory into its tree. Returns the number
/// of game entries found (including nested ones).
pub fn scan_platform(catalog: &mut Catalog, platform: PlatformId) -> io::Result<usize> {
    let root = catalog.platform(platform).root();
    let rom_dir = catalog.platform(platform).rom_dir().to_path_buf();
    let extensions = catalog.platform(platform).extensions().to_vec();
    let found = scan_dir(catalog, platform, root, &rom_dir, &extensions)?;
    log::debug!(
        "scanned {} game(s) for platform {}",
        found,
        catalog.platform(platform).name()
    );
    Ok(found)
}

fn scan_dir(
    catalog: &mut Catalog,
    platform: PlatformId,
    parent: NodeId,
    dir: &Path,
    extensions: &[String],
) -> io::Result<usize> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut found = 0;
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name == "gamelist.xml" {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            // A re-scan descends into the existing folder node instead of
            // building a duplicate subtree the idempotent insert would drop.
            if let Some(existing) = catalog.child_by_key(parent, &name) {
                if catalog.node(existing).is_folder() {
                    found += scan_dir(catalog, platform, existing, &path, extensions)?;
                }
                continue;
            }
            // Build the subtree first; folders with no games are dropped.
            let folder = catalog.new_folder(platform, &path);
            let nested = scan_dir(catalog, platform, folder, &path, extensions)?;
            if nested > 0 {
                catalog.add_child(parent, folder);
                found += nested;
            } else {
                catalog.remove_subtree(folder);
            }
        } else if file_type.is_file() && matches_extension(&path, extensions) {
            if catalog.child_by_key(parent, &name).is_some() {
                continue;
            }
            let game = catalog.new_game(platform, &path);
            catalog.add_child(parent, game);
            found += 1;
        }
    }
    Ok(found)
}

/// An empty allow-list accepts every file.
fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    match util::ext_lower(path) {
        Some(ext) => extensions.iter().any(|allowed| *allowed == ext),
        None => false,
    }
}
