//! Display projection engine.
//!
//! Computes the effective child list a presentation layer should render
//! for a folder, given a display mode, the active filter predicate, and
//! the registered-path source. All inputs arrive through an explicit
//! [`DisplayContext`], so the projection is a pure function of catalog +
//! context and recomputes fully on every query — the registered-path
//! source and the filter may both change between calls.
//!
//! Cost is O(subtree size) per query. Callers needing interactive
//! performance should query per visible folder, not over the whole tree
//! every frame.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;

use crate::filter::FilterPredicate;
use crate::tree::{Catalog, KindMask, NodeId, NodeKind, Platform};
use crate::util;

/// Extensions that always show as playable entries, in priority order.
const PRIORITY_EXTS: &[&str] = &["m3u", "chd", "iso", "pbp", "cue", "ccd", "img"];

/// The three mutually exclusive projection modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Raw children, filtered pointwise when a predicate is active.
    All,
    /// Only games whose path is in the registered set; never folders.
    Registered,
    /// Registered games first, then heuristic multi-file collapsing for
    /// unregistered folders.
    SmartAuto,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "registered" | "scraped" => Ok(Self::Registered),
            "auto" | "smart" => Ok(Self::SmartAuto),
            other => Err(format!("unknown display mode: {other}")),
        }
    }
}

/// Registered-path source boundary: the persisted sidecar listing paths
/// explicitly known to the catalog. Missing or malformed sources yield
/// an empty set, never an error.
pub trait RegisteredSource {
    fn load_registered_paths(&self, platform: &Platform) -> BTreeSet<PathBuf>;
}

/// A source with no registered paths (stand-in when no sidecar exists).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

impl RegisteredSource for EmptyRegistry {
    fn load_registered_paths(&self, _platform: &Platform) -> BTreeSet<PathBuf> {
        BTreeSet::new()
    }
}

/// Everything a projection query depends on, passed explicitly per call.
pub struct DisplayContext<'a> {
    pub mode: DisplayMode,
    pub filter: &'a dyn FilterPredicate,
    pub registry: &'a dyn RegisteredSource,
}

impl<'a> DisplayContext<'a> {
    pub fn new(
        mode: DisplayMode,
        filter: &'a dyn FilterPredicate,
        registry: &'a dyn RegisteredSource,
    ) -> Self {
        Self {
            mode,
            filter,
            registry,
        }
    }

    fn passes(&self, catalog: &Catalog, node: NodeId) -> bool {
        !self.filter.is_filtered() || self.filter.show_file(catalog, node)
    }
}

/// The effective child sequence of `folder` under the given context.
pub fn display_children(catalog: &Catalog, folder: NodeId, ctx: &DisplayContext) -> Vec<NodeId> {
    match ctx.mode {
        DisplayMode::All => {
            if !ctx.filter.is_filtered() {
                return catalog.node(folder).children().to_vec();
            }
            catalog
                .node(folder)
                .children()
                .iter()
                .copied()
                .filter(|&child| ctx.filter.show_file(catalog, child))
                .collect()
        }
        DisplayMode::Registered => registered_children(catalog, folder, ctx),
        DisplayMode::SmartAuto => smart_auto_children(catalog, folder, ctx),
    }
}

/// Registered-only mode: resolve each registered path to a game node
/// under `folder`. Registration targets leaf files, so folders are never
/// emitted. Set iteration order makes the output deterministic.
fn registered_children(catalog: &Catalog, folder: NodeId, ctx: &DisplayContext) -> Vec<NodeId> {
    let registered = ctx
        .registry
        .load_registered_paths(catalog.platform_of(folder));
    let mut out = Vec::new();
    for path in &registered {
        if let Some(game) = catalog.find_by_path(folder, path) {
            if ctx.passes(catalog, game) {
                out.push(game);
            }
        }
    }
    out
}

/// Smart-auto mode: registered games take absolute priority, then each
/// unregistered child is either shown, collapsed to a single playable
/// entry, or left as a folder for the presentation layer to recurse into.
fn smart_auto_children(catalog: &Catalog, folder: NodeId, ctx: &DisplayContext) -> Vec<NodeId> {
    let registered = ctx
        .registry
        .load_registered_paths(catalog.platform_of(folder));
    let mut out = Vec::new();
    let mut added: BTreeSet<PathBuf> = BTreeSet::new();

    // Registered games first, tracked so the fallback pass never
    // duplicates them.
    for path in &registered {
        if let Some(game) = catalog.find_by_path(folder, path) {
            if ctx.passes(catalog, game) {
                out.push(game);
                added.insert(path.clone());
            }
        }
    }

    for &child in catalog.node(folder).children() {
        if !ctx.passes(catalog, child) {
            continue;
        }
        match catalog.node(child).kind() {
            NodeKind::Folder => {
                let games = catalog.files_recursive(child, KindMask::GAME, None);
                if games
                    .iter()
                    .any(|&game| added.contains(catalog.node(game).path()))
                {
                    // Registered descendants were already emitted
                    // individually; the folder itself is suppressed.
                    continue;
                }
                match collapse_folder(catalog, &games) {
                    Some(game) => {
                        if ctx.passes(catalog, game) {
                            out.push(game);
                        }
                    }
                    None => out.push(child),
                }
            }
            NodeKind::Game => {
                if added.contains(catalog.node(child).path()) {
                    continue;
                }
                if should_show_file(catalog, child) {
                    out.push(child);
                }
            }
        }
    }
    out
}

/// Collapse heuristic for a folder with no registered descendants:
/// an `.m3u` playlist wins outright; else a folder whose only playable
/// image is a single `.cue` collapses to it; else `None` (the folder is
/// shown and the presentation layer recurses).
fn collapse_folder(catalog: &Catalog, games: &[NodeId]) -> Option<NodeId> {
    let mut m3u = None;
    let mut cue = None;
    let mut playable = 0;
    for &game in games {
        match util::ext_lower(catalog.node(game).path()).as_deref() {
            Some("m3u") => m3u = Some(game),
            Some("cue") => {
                cue = Some(game);
                playable += 1;
            }
            Some("chd") | Some("iso") | Some("pbp") => playable += 1,
            _ => {}
        }
    }
    if m3u.is_some() {
        return m3u;
    }
    if playable == 1 {
        if let Some(game) = cue {
            return Some(game);
        }
    }
    None
}

/// Loose-file heuristic: playable extensions always show; a `.bin` is
/// suppressed when a same-stem `.cue` sibling exists in the same folder
/// (the cue sheet is assumed to reference it); everything else shows.
fn should_show_file(catalog: &Catalog, id: NodeId) -> bool {
    let node = catalog.node(id);
    let Some(ext) = util::ext_lower(node.path()) else {
        return true;
    };
    if PRIORITY_EXTS.contains(&ext.as_str()) {
        return true;
    }
    if ext == "bin" {
        if let Some(parent) = node.parent() {
            let cue_key = format!("{}.cue", util::stem_lossy(node.path()));
            if catalog.child_by_key(parent, &cue_key).is_some() {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
#[path = "tests/projection_tests.rs"]
mod tests;
