//! Core game-catalog engine: the per-platform tree of folders and game
//! entries, metadata records, display projections, sorting, and the
//! cross-platform collection overlay.
//!
//! Everything here is single-threaded and synchronous: one logical
//! thread of control owns the [`Catalog`] and performs all mutation,
//! filtering, and sorting. Presentation layers query projections through
//! an explicit [`DisplayContext`]; nothing reads ambient global state.

pub mod collection;
pub mod filter;
pub mod metadata;
pub mod projection;
pub mod sort;
pub mod tree;
pub mod util;

pub use filter::{FavoriteFilter, FilterPredicate, Unfiltered};
pub use metadata::{MetadataRecord, MetadataSchema};
pub use projection::{
    DisplayContext, DisplayMode, EmptyRegistry, RegisteredSource, display_children,
};
pub use sort::{SORT_TYPES, SortDescriptor, get_sort_type, sort_tree};
pub use tree::{
    Catalog, KindMask, NameLookup, Node, NodeId, NodeKind, Platform, PlatformCategory,
    PlatformDef, PlatformId,
};
