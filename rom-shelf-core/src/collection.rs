//! Collection overlay: virtual platforms whose trees hold alias nodes.
//!
//! An alias projects a game from its home platform into a collection tree
//! ("Favorites", "All Arcade") without taking ownership: metadata writes
//! always target the source node, and every alias re-copies the source's
//! snapshot on refresh. An alias's join key is its full path, so
//! same-named files from different platforms coexist in one collection.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::tree::{Catalog, KindMask, Node, NodeId, PlatformCategory, PlatformDef, PlatformId};

impl Catalog {
    /// Register a virtual collection platform.
    pub fn add_collection(
        &mut self,
        name: impl Into<String>,
        full_name: impl Into<String>,
    ) -> PlatformId {
        let name = name.into();
        // Synthetic root path; collections have no on-disk ROM directory.
        let rom_dir = PathBuf::from("collections").join(&name);
        self.add_platform(
            PlatformDef::new(name, full_name, rom_dir).category(PlatformCategory::Collection),
        )
    }

    /// Build an unattached alias of `source` owned by `collection`.
    ///
    /// The stored source is always the canonical root source: an alias of
    /// an alias still points at the one true underlying node, resolved
    /// here once rather than chased at read time.
    pub fn create_alias(&mut self, source: NodeId, collection: PlatformId) -> NodeId {
        let canonical = self.source_of(source);
        let source_node = self.node(canonical);
        let kind = source_node.kind;
        let path = source_node.path.clone();
        let mut metadata = source_node.metadata.clone();
        metadata.reset_changed_flag();
        self.alloc(Node {
            kind,
            path,
            platform: collection,
            parent: None,
            children: Vec::new(),
            children_by_key: HashMap::new(),
            metadata,
            source: Some(canonical),
            name_cache: None,
        })
    }

    /// Alias `source` into the collection's root folder, returning the
    /// existing alias when the game is already present.
    pub fn add_to_collection(&mut self, source: NodeId, collection: PlatformId) -> NodeId {
        let canonical = self.source_of(source);
        let key = self.node(canonical).path().to_string_lossy().into_owned();
        let root = self.platform(collection).root();
        if let Some(existing) = self.child_by_key(root, &key) {
            return existing;
        }
        let alias = self.create_alias(source, collection);
        self.add_child(root, alias);
        alias
    }

    /// Re-copy the source's current metadata snapshot into an alias and
    /// invalidate its display-name cache. No-op for real nodes.
    pub fn refresh_metadata(&mut self, alias: NodeId) {
        let Some(canonical) = self.node(alias).source else {
            return;
        };
        let mut metadata = self.node(canonical).metadata.clone();
        metadata.reset_changed_flag();
        let node = self.node_mut(alias);
        node.metadata = metadata;
        node.name_cache = None;
    }

    /// Refresh every alias of `source` across all collection platforms,
    /// so that play counts and timestamps written to the source are
    /// visible through each collection.
    pub fn refresh_collections_for(&mut self, source: NodeId) {
        let canonical = self.source_of(source);
        let roots: Vec<NodeId> = self
            .platforms()
            .filter(|(_, p)| p.category() == PlatformCategory::Collection)
            .map(|(_, p)| p.root())
            .collect();
        let mut refreshed = 0;
        for root in roots {
            let aliases: Vec<NodeId> = self
                .files_recursive(root, KindMask::ALL, None)
                .into_iter()
                .filter(|&node| self.node(node).source == Some(canonical))
                .collect();
            for alias in aliases {
                self.refresh_metadata(alias);
                refreshed += 1;
            }
        }
        log::debug!("refreshed {refreshed} collection aliases for {canonical:?}");
    }

    /// Drop every entry from a collection's tree. Sources are untouched;
    /// only the alias nodes are freed.
    pub fn clear_collection(&mut self, collection: PlatformId) {
        let root = self.platform(collection).root();
        let children = self.node(root).children().to_vec();
        for child in children {
            self.remove_subtree(child);
        }
    }
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
