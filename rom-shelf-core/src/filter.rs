//! Filter predicate boundary.
//!
//! The projection engine only ever asks "is a filter active" and "is this
//! node visible"; what the predicate actually matches on (favorites, text,
//! genre) is the caller's business.

use crate::tree::{Catalog, KindMask, NodeId, NodeKind};

/// Answers visibility questions for the projection engine.
pub trait FilterPredicate {
    /// Whether any filtering is active at all. When false, `show_file`
    /// is never consulted.
    fn is_filtered(&self) -> bool;

    /// Whether the given node should be visible.
    fn show_file(&self, catalog: &Catalog, node: NodeId) -> bool;
}

/// The inactive predicate: shows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unfiltered;

impl FilterPredicate for Unfiltered {
    fn is_filtered(&self) -> bool {
        false
    }

    fn show_file(&self, _catalog: &Catalog, _node: NodeId) -> bool {
        true
    }
}

/// Shows games whose `favorite` metadata is set, and folders containing
/// at least one such game.
#[derive(Debug, Clone, Copy, Default)]
pub struct FavoriteFilter;

impl FilterPredicate for FavoriteFilter {
    fn is_filtered(&self) -> bool {
        true
    }

    fn show_file(&self, catalog: &Catalog, node: NodeId) -> bool {
        let is_favorite = |id: NodeId| catalog.node(id).metadata.get("favorite") == "true";
        match catalog.node(node).kind() {
            NodeKind::Game => is_favorite(node),
            NodeKind::Folder => catalog
                .files_recursive(node, KindMask::GAME, None)
                .into_iter()
                .any(is_favorite),
        }
    }
}
