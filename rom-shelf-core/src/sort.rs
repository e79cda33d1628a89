//! Sort engine: pluggable comparators applied recursively per folder.
//!
//! Each folder's children are sorted locally; there is no global order.
//! Sorting is not triggered by tree mutation — re-apply the descriptor
//! after inserts to restore order.

use std::cmp::Ordering;

use crate::tree::{Catalog, NodeId};

/// Comparator over two nodes in the same catalog.
pub type Comparator = fn(&Catalog, NodeId, NodeId) -> Ordering;

/// An immutable (comparator, direction, label) triple.
#[derive(Clone, Copy)]
pub struct SortDescriptor {
    pub label: &'static str,
    pub compare: Comparator,
    pub ascending: bool,
}

/// Built-in sort descriptors in registration order. Lookup by label falls
/// back to the first entry.
pub const SORT_TYPES: &[SortDescriptor] = &[
    SortDescriptor {
        label: "name, ascending",
        compare: compare_name,
        ascending: true,
    },
    SortDescriptor {
        label: "name, descending",
        compare: compare_name,
        ascending: false,
    },
    SortDescriptor {
        label: "rating, ascending",
        compare: compare_rating,
        ascending: true,
    },
    SortDescriptor {
        label: "rating, descending",
        compare: compare_rating,
        ascending: false,
    },
    SortDescriptor {
        label: "times played, ascending",
        compare: compare_times_played,
        ascending: true,
    },
    SortDescriptor {
        label: "times played, descending",
        compare: compare_times_played,
        ascending: false,
    },
    SortDescriptor {
        label: "last played, ascending",
        compare: compare_last_played,
        ascending: true,
    },
    SortDescriptor {
        label: "last played, descending",
        compare: compare_last_played,
        ascending: false,
    },
    SortDescriptor {
        label: "number players, ascending",
        compare: compare_num_players,
        ascending: true,
    },
    SortDescriptor {
        label: "number players, descending",
        compare: compare_num_players,
        ascending: false,
    },
    SortDescriptor {
        label: "release date, ascending",
        compare: compare_release_date,
        ascending: true,
    },
    SortDescriptor {
        label: "release date, descending",
        compare: compare_release_date,
        ascending: false,
    },
    SortDescriptor {
        label: "genre, ascending",
        compare: compare_genre,
        ascending: true,
    },
    SortDescriptor {
        label: "genre, descending",
        compare: compare_genre,
        ascending: false,
    },
    SortDescriptor {
        label: "developer, ascending",
        compare: compare_developer,
        ascending: true,
    },
    SortDescriptor {
        label: "developer, descending",
        compare: compare_developer,
        ascending: false,
    },
    SortDescriptor {
        label: "publisher, ascending",
        compare: compare_publisher,
        ascending: true,
    },
    SortDescriptor {
        label: "publisher, descending",
        compare: compare_publisher,
        ascending: false,
    },
    SortDescriptor {
        label: "system, ascending",
        compare: compare_system,
        ascending: true,
    },
    SortDescriptor {
        label: "system, descending",
        compare: compare_system,
        ascending: false,
    },
];

/// Descriptor matching a label, or the first registered descriptor when
/// nothing matches.
pub fn get_sort_type(label: &str) -> &'static SortDescriptor {
    SORT_TYPES
        .iter()
        .find(|sort| sort.label == label)
        .unwrap_or(&SORT_TYPES[0])
}

/// Stable-sort the direct children of `node`, then recurse into every
/// child that itself has children.
///
/// Descending order reverses the sequence around a stable ascending
/// sort (reverse, sort, reverse) rather than reversing the comparator:
/// applied after an ascending sort, tied elements keep their ascending
/// relative positions while everything else reverses.
pub fn sort_tree(catalog: &mut Catalog, node: NodeId, sort: &SortDescriptor) {
    let mut children = std::mem::take(&mut catalog.node_mut(node).children);
    {
        let catalog: &Catalog = catalog;
        if sort.ascending {
            children.sort_by(|&a, &b| (sort.compare)(catalog, a, b));
        } else {
            children.reverse();
            children.sort_by(|&a, &b| (sort.compare)(catalog, a, b));
            children.reverse();
        }
    }
    catalog.node_mut(node).children = children;

    let children = catalog.node(node).children().to_vec();
    for child in children {
        if !catalog.node(child).children().is_empty() {
            sort_tree(catalog, child, sort);
        }
    }
}

// -- comparators --

fn compare_name(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    let a = catalog.sort_name(a).to_lowercase();
    let b = catalog.sort_name(b).to_lowercase();
    a.cmp(&b)
}

fn compare_rating(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    let a = catalog.node(a).metadata.get_float("rating");
    let b = catalog.node(b).metadata.get_float("rating");
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn compare_times_played(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    let a = catalog.node(a).metadata.get_int("playcount");
    let b = catalog.node(b).metadata.get_int("playcount");
    a.cmp(&b)
}

fn compare_last_played(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    let a = catalog.node(a).metadata.get("lastplayed");
    let b = catalog.node(b).metadata.get("lastplayed");
    a.cmp(b)
}

fn compare_num_players(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    let a = catalog.node(a).metadata.get_int("players");
    let b = catalog.node(b).metadata.get_int("players");
    a.cmp(&b)
}

fn compare_release_date(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    let a = catalog.node(a).metadata.get("releasedate");
    let b = catalog.node(b).metadata.get("releasedate");
    a.cmp(b)
}

fn compare_genre(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    compare_meta_ci(catalog, a, b, "genre")
}

fn compare_developer(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    compare_meta_ci(catalog, a, b, "developer")
}

fn compare_publisher(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    compare_meta_ci(catalog, a, b, "publisher")
}

fn compare_system(catalog: &Catalog, a: NodeId, b: NodeId) -> Ordering {
    let a = catalog.platform_of(a).full_name().to_lowercase();
    let b = catalog.platform_of(b).full_name().to_lowercase();
    a.cmp(&b)
}

fn compare_meta_ci(catalog: &Catalog, a: NodeId, b: NodeId, key: &str) -> Ordering {
    let a = catalog.node(a).metadata.get(key).to_lowercase();
    let b = catalog.node(b).metadata.get(key).to_lowercase();
    a.cmp(&b)
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
