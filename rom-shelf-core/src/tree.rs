//! The catalog tree: platforms, folders, and game entries.
//!
//! All nodes (across every platform, real or virtual) live in one
//! index-addressed arena owned by [`Catalog`]. Parent/child relations are
//! [`NodeId`] indices rather than ownership pointers, which gives O(1)
//! parent lookup without reference cycles. A folder exclusively owns its
//! children: removing a subtree frees every descendant's arena slot.
//!
//! Invariant violations (adding a child to a game node, removing a node
//! that isn't present) panic — they signal internal corruption, not a
//! recoverable condition.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filter::FilterPredicate;
use crate::metadata::{MetadataRecord, MetadataSchema};
use crate::util;

/// Index of a node in the catalog arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// Index of a platform registered with the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformId(pub(crate) u32);

/// Discriminant for the two node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Game,
    Folder,
}

impl NodeKind {
    fn mask_bit(self) -> u8 {
        match self {
            Self::Game => 0b01,
            Self::Folder => 0b10,
        }
    }
}

/// Bit mask selecting node kinds for recursive walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindMask(u8);

impl KindMask {
    pub const GAME: KindMask = KindMask(0b01);
    pub const FOLDER: KindMask = KindMask(0b10);
    pub const ALL: KindMask = KindMask(0b11);

    pub fn includes(self, kind: NodeKind) -> bool {
        self.0 & kind.mask_bit() != 0
    }
}

/// Broad platform category. Arcade-family categories route display names
/// through the registered [`NameLookup`]; `Collection` marks virtual
/// platforms whose trees hold alias nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformCategory {
    Console,
    Arcade,
    NeoGeo,
    Collection,
}

/// External lookup collaborator mapping ROM file stems to canonical
/// titles (e.g., MAME set names to real arcade titles).
pub trait NameLookup {
    /// Canonical title for a stem, or `None` to keep the stem as-is.
    fn canonical_name(&self, stem: &str) -> Option<String>;
}

/// Definition used to register a platform with [`Catalog::add_platform`].
#[derive(Debug, Clone)]
pub struct PlatformDef {
    pub name: String,
    pub full_name: String,
    pub rom_dir: PathBuf,
    pub category: PlatformCategory,
    pub extensions: Vec<String>,
    pub launch_command: Option<String>,
}

impl PlatformDef {
    pub fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        rom_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            rom_dir: rom_dir.into(),
            category: PlatformCategory::Console,
            extensions: Vec::new(),
            launch_command: None,
        }
    }

    pub fn category(mut self, category: PlatformCategory) -> Self {
        self.category = category;
        self
    }

    /// ROM file extensions accepted by this platform (lowercase, no dot).
    /// An empty list accepts everything.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Launch command template with `%ROM%`-style placeholders.
    pub fn launch_command(mut self, command: impl Into<String>) -> Self {
        self.launch_command = Some(command.into());
        self
    }
}

/// A registered platform context: identity, ROM directory, and the root
/// folder of its tree.
#[derive(Debug)]
pub struct Platform {
    def: PlatformDef,
    root: NodeId,
}

impl Platform {
    /// Short name used for folders and config lookup (e.g., "snes").
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn full_name(&self) -> &str {
        &self.def.full_name
    }

    pub fn rom_dir(&self) -> &Path {
        &self.def.rom_dir
    }

    pub fn category(&self) -> PlatformCategory {
        self.def.category
    }

    pub fn extensions(&self) -> &[String] {
        &self.def.extensions
    }

    pub fn launch_command(&self) -> Option<&str> {
        self.def.launch_command.as_deref()
    }

    /// Root folder node of this platform's tree.
    pub fn root(&self) -> NodeId {
        self.root
    }
}

/// One folder or game entry in a platform's tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) path: PathBuf,
    pub(crate) platform: PlatformId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) children_by_key: HashMap<String, NodeId>,
    pub metadata: MetadataRecord,
    /// Canonical source node for alias entries, `None` for real entries.
    pub(crate) source: Option<NodeId>,
    /// Formatted display name for alias entries, rebuilt when invalidated.
    pub(crate) name_cache: Option<String>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn platform(&self) -> PlatformId {
        self.platform
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node is an alias projected from another platform.
    pub fn is_alias(&self) -> bool {
        self.source.is_some()
    }
}

/// Owner of the node arena and the platform registry.
pub struct Catalog {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) free: Vec<u32>,
    pub(crate) platforms: Vec<Platform>,
    name_lookup: Option<Box<dyn NameLookup>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            platforms: Vec::new(),
            name_lookup: None,
        }
    }

    /// Install the canonical-title lookup used for arcade-family platforms.
    pub fn set_name_lookup(&mut self, lookup: Box<dyn NameLookup>) {
        self.name_lookup = Some(lookup);
    }

    // -- platforms --

    /// Register a platform and create its root folder node.
    pub fn add_platform(&mut self, def: PlatformDef) -> PlatformId {
        let id = PlatformId(self.platforms.len() as u32);
        let root = self.alloc(Node {
            kind: NodeKind::Folder,
            path: def.rom_dir.clone(),
            platform: id,
            parent: None,
            children: Vec::new(),
            children_by_key: HashMap::new(),
            metadata: MetadataRecord::new(MetadataSchema::Folder),
            source: None,
            name_cache: None,
        });
        self.platforms.push(Platform { def, root });
        let name = self.compute_display_name(root);
        let node = self.node_mut(root);
        node.metadata.set("name", name);
        node.metadata.reset_changed_flag();
        id
    }

    pub fn platform(&self, id: PlatformId) -> &Platform {
        &self.platforms[id.0 as usize]
    }

    pub fn platforms(&self) -> impl Iterator<Item = (PlatformId, &Platform)> {
        self.platforms
            .iter()
            .enumerate()
            .map(|(i, p)| (PlatformId(i as u32), p))
    }

    /// Platform owning a node.
    pub fn platform_of(&self, id: NodeId) -> &Platform {
        self.platform(self.node(id).platform)
    }

    // -- node construction --

    /// Create an unattached game node. The metadata `name` is seeded from
    /// the filename stem (via the name lookup for arcade platforms) and
    /// the changed flag is reset.
    pub fn new_game(&mut self, platform: PlatformId, path: impl Into<PathBuf>) -> NodeId {
        self.new_node(NodeKind::Game, platform, path.into(), MetadataSchema::Game)
    }

    /// Create an unattached folder node.
    pub fn new_folder(&mut self, platform: PlatformId, path: impl Into<PathBuf>) -> NodeId {
        self.new_node(
            NodeKind::Folder,
            platform,
            path.into(),
            MetadataSchema::Folder,
        )
    }

    fn new_node(
        &mut self,
        kind: NodeKind,
        platform: PlatformId,
        path: PathBuf,
        schema: MetadataSchema,
    ) -> NodeId {
        let id = self.alloc(Node {
            kind,
            path,
            platform,
            parent: None,
            children: Vec::new(),
            children_by_key: HashMap::new(),
            metadata: MetadataRecord::new(schema),
            source: None,
            name_cache: None,
        });
        let name = self.compute_display_name(id);
        let node = self.node_mut(id);
        node.metadata.set("name", name);
        node.metadata.reset_changed_flag();
        id
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot as usize] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() as u32 - 1)
            }
        }
    }

    // -- node access --

    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.0 as usize]
            .as_ref()
            .expect("stale node id: slot was freed")
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.0 as usize]
            .as_mut()
            .expect("stale node id: slot was freed")
    }

    /// The canonical underlying node: the alias source for alias nodes
    /// (already resolved past any intermediate alias at construction),
    /// the node itself otherwise.
    pub fn source_of(&self, id: NodeId) -> NodeId {
        self.node(id).source.unwrap_or(id)
    }

    /// Join key used for duplicate detection within one folder: the file
    /// name for real nodes, the full path for alias nodes (several
    /// platforms may contain same-named files).
    pub fn join_key(&self, id: NodeId) -> String {
        let node = self.node(id);
        if node.source.is_some() {
            node.path.to_string_lossy().into_owned()
        } else {
            util::file_name_lossy(&node.path)
        }
    }

    // -- tree mutation --

    /// Attach `child` under `parent`. Panics if `parent` is not a folder
    /// or `child` already has a parent. Adding a second node with an
    /// already-present join key is a silent no-op, so repeated scans are
    /// idempotent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.node(parent).is_folder(),
            "add_child: parent {parent:?} is not a folder"
        );
        assert!(
            self.node(child).parent.is_none(),
            "add_child: node {child:?} already has a parent"
        );
        let key = self.join_key(child);
        let parent_node = self.node_mut(parent);
        if parent_node.children_by_key.contains_key(&key) {
            return;
        }
        parent_node.children_by_key.insert(key, child);
        parent_node.children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Detach `child` from `parent`. Panics if `child`'s parent is not
    /// `parent` or the child is missing from the parent's sequence, which
    /// indicates index corruption.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        assert_eq!(
            self.node(child).parent,
            Some(parent),
            "remove_child: node {child:?} is not a child of {parent:?}"
        );
        let key = self.join_key(child);
        let parent_node = self.node_mut(parent);
        parent_node.children_by_key.remove(&key);
        let position = parent_node
            .children
            .iter()
            .position(|&c| c == child)
            .expect("remove_child: node missing from child sequence");
        parent_node.children.remove(position);
        self.node_mut(child).parent = None;
    }

    /// Detach a node from its parent and free its whole subtree. Used for
    /// platform unload and collection rebuilds; freeing an alias never
    /// touches its source node.
    pub fn remove_subtree(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.remove_child(parent, id);
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = self.nodes[next.0 as usize]
                .take()
                .expect("stale node id: slot was freed");
            stack.extend(node.children);
            self.free.push(next.0);
        }
    }

    // -- queries --

    /// Flattened pre-order descendants matching `mask`. With a filter,
    /// only nodes the predicate shows are included (but the walk still
    /// descends through hidden folders). Re-walks the tree on every call;
    /// the tree may mutate between calls, so nothing is cached.
    pub fn files_recursive(
        &self,
        id: NodeId,
        mask: KindMask,
        filter: Option<&dyn FilterPredicate>,
    ) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.files_recursive_into(id, mask, filter, &mut out);
        out
    }

    fn files_recursive_into(
        &self,
        id: NodeId,
        mask: KindMask,
        filter: Option<&dyn FilterPredicate>,
        out: &mut Vec<NodeId>,
    ) {
        for &child in &self.node(id).children {
            if mask.includes(self.node(child).kind) {
                let shown = match filter {
                    Some(f) => !f.is_filtered() || f.show_file(self, child),
                    None => true,
                };
                if shown {
                    out.push(child);
                }
            }
            if !self.node(child).children.is_empty() {
                self.files_recursive_into(child, mask, filter, out);
            }
        }
    }

    /// Direct child of a folder by join key (file name for real nodes).
    pub fn child_by_key(&self, folder: NodeId, key: &str) -> Option<NodeId> {
        self.node(folder).children_by_key.get(key).copied()
    }

    /// Find a game node with an exact path anywhere under `from`
    /// (including `from` itself).
    pub fn find_by_path(&self, from: NodeId, path: &Path) -> Option<NodeId> {
        let node = self.node(from);
        if node.kind == NodeKind::Game && node.path == path {
            return Some(from);
        }
        for &child in &node.children {
            if let Some(found) = self.find_by_path(child, path) {
                return Some(found);
            }
        }
        None
    }

    // -- names --

    /// Human-readable name. Real nodes read their metadata `name`; alias
    /// nodes format "Title [SYSTEM]" and cache the result until the next
    /// metadata refresh.
    pub fn display_name(&mut self, id: NodeId) -> &str {
        if self.node(id).source.is_some() {
            if self.node(id).name_cache.is_none() {
                let name = self.alias_entry_name(id);
                self.node_mut(id).name_cache = Some(name);
            }
            return self.node(id).name_cache.as_deref().unwrap();
        }
        self.node(id).metadata.get("name")
    }

    /// Name used by sort comparators: metadata `sortname` when set,
    /// otherwise `name`.
    pub fn sort_name(&self, id: NodeId) -> &str {
        let metadata = &self.node(id).metadata;
        let sortname = metadata.get("sortname");
        if sortname.is_empty() {
            metadata.get("name")
        } else {
            sortname
        }
    }

    /// Name derived from the path alone: the filename stem, routed
    /// through the name lookup for arcade-family platforms.
    pub(crate) fn compute_display_name(&self, id: NodeId) -> String {
        let node = self.node(id);
        let stem = util::stem_lossy(&node.path);
        match self.platform(node.platform).category() {
            PlatformCategory::Arcade | PlatformCategory::NeoGeo => self
                .name_lookup
                .as_ref()
                .and_then(|lookup| lookup.canonical_name(&stem))
                .unwrap_or(stem),
            _ => stem,
        }
    }

    /// "Title [SYSTEM]" label for an alias, derived from its source.
    fn alias_entry_name(&self, id: NodeId) -> String {
        let source = self.source_of(id);
        let title = util::remove_parenthesis(self.node(source).metadata.get("name"));
        let system = self.platform_of(source).name().to_uppercase();
        format!("{title} [{system}]")
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
