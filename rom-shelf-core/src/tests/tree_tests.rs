use super::*;

fn test_platform(catalog: &mut Catalog) -> PlatformId {
    catalog.add_platform(PlatformDef::new(
        "snes",
        "Super Nintendo Entertainment System",
        "/roms/snes",
    ))
}

fn add_game(catalog: &mut Catalog, parent: NodeId, name: &str) -> NodeId {
    let platform = catalog.node(parent).platform();
    let path = catalog.node(parent).path().join(name);
    let game = catalog.new_game(platform, path);
    catalog.add_child(parent, game);
    game
}

fn add_folder(catalog: &mut Catalog, parent: NodeId, name: &str) -> NodeId {
    let platform = catalog.node(parent).platform();
    let path = catalog.node(parent).path().join(name);
    let folder = catalog.new_folder(platform, path);
    catalog.add_child(parent, folder);
    folder
}

#[test]
fn test_add_child_sets_parent() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "Doom.sfc");

    assert_eq!(catalog.node(game).parent(), Some(root));
    assert_eq!(catalog.node(root).children(), &[game]);
}

#[test]
fn test_add_child_duplicate_key_is_noop() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    add_game(&mut catalog, root, "Doom.sfc");

    // Second node with the same file name: silently ignored, so repeated
    // scans stay idempotent.
    let duplicate = catalog.new_game(platform, "/roms/snes/Doom.sfc");
    catalog.add_child(root, duplicate);
    assert_eq!(catalog.node(root).children().len(), 1);
    assert_eq!(catalog.node(duplicate).parent(), None);
}

#[test]
#[should_panic(expected = "not a folder")]
fn test_add_child_to_game_panics() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "Doom.sfc");
    let other = catalog.new_game(platform, "/roms/snes/Quake.sfc");
    catalog.add_child(game, other);
}

#[test]
#[should_panic(expected = "already has a parent")]
fn test_add_child_twice_panics() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "Doom.sfc");
    let folder = add_folder(&mut catalog, root, "shooters");
    catalog.add_child(folder, game);
}

#[test]
fn test_remove_child_then_re_add() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "Doom.sfc");

    catalog.remove_child(root, game);
    assert_eq!(catalog.node(game).parent(), None);
    assert!(catalog.node(root).children().is_empty());

    catalog.add_child(root, game);
    assert_eq!(catalog.node(game).parent(), Some(root));
    assert_eq!(catalog.node(root).children(), &[game]);
}

#[test]
#[should_panic(expected = "is not a child of")]
fn test_remove_child_wrong_parent_panics() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let folder = add_folder(&mut catalog, root, "shooters");
    let game = add_game(&mut catalog, folder, "Doom.sfc");
    catalog.remove_child(root, game);
}

#[test]
fn test_remove_subtree_frees_descendants() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let folder = add_folder(&mut catalog, root, "shooters");
    add_game(&mut catalog, folder, "Doom.sfc");
    add_game(&mut catalog, folder, "Quake.sfc");

    catalog.remove_subtree(folder);
    assert!(catalog.node(root).children().is_empty());
    assert_eq!(
        catalog.files_recursive(root, KindMask::ALL, None).len(),
        0
    );
}

#[test]
#[should_panic(expected = "stale node id")]
fn test_stale_id_access_panics() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "Doom.sfc");
    catalog.remove_subtree(game);
    catalog.node(game);
}

#[test]
fn test_files_recursive_preorder_and_mask() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let a = add_game(&mut catalog, root, "a.sfc");
    let folder = add_folder(&mut catalog, root, "sub");
    let b = add_game(&mut catalog, folder, "b.sfc");
    let c = add_game(&mut catalog, root, "c.sfc");

    let games = catalog.files_recursive(root, KindMask::GAME, None);
    assert_eq!(games, vec![a, b, c]);

    let folders = catalog.files_recursive(root, KindMask::FOLDER, None);
    assert_eq!(folders, vec![folder]);

    let all = catalog.files_recursive(root, KindMask::ALL, None);
    assert_eq!(all, vec![a, folder, b, c]);
}

#[test]
fn test_files_recursive_displayed_only() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let a = add_game(&mut catalog, root, "a.sfc");
    let b = add_game(&mut catalog, root, "b.sfc");
    catalog.node_mut(a).metadata.set("favorite", "true");

    let filter = crate::filter::FavoriteFilter;
    let shown = catalog.files_recursive(root, KindMask::GAME, Some(&filter));
    assert_eq!(shown, vec![a]);
    let _ = b;
}

#[test]
fn test_find_by_path() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let folder = add_folder(&mut catalog, root, "sub");
    let game = add_game(&mut catalog, folder, "Doom.sfc");

    assert_eq!(
        catalog.find_by_path(root, std::path::Path::new("/roms/snes/sub/Doom.sfc")),
        Some(game)
    );
    assert_eq!(
        catalog.find_by_path(root, std::path::Path::new("/roms/snes/sub")),
        None,
        "folders never match"
    );
    assert_eq!(
        catalog.find_by_path(root, std::path::Path::new("/roms/snes/missing.sfc")),
        None
    );
}

#[test]
fn test_display_name_defaults_to_stem() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "Doom (USA).sfc");
    assert_eq!(catalog.display_name(game), "Doom (USA)");

    catalog.node_mut(game).metadata.set("name", "Doom");
    assert_eq!(catalog.display_name(game), "Doom");
}

#[test]
fn test_sort_name_prefers_sortname() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "The Firemen.sfc");
    assert_eq!(catalog.sort_name(game), "The Firemen");

    catalog.node_mut(game).metadata.set("sortname", "Firemen, The");
    assert_eq!(catalog.sort_name(game), "Firemen, The");
}

struct UpperLookup;

impl NameLookup for UpperLookup {
    fn canonical_name(&self, stem: &str) -> Option<String> {
        match stem {
            "sf2" => Some("Street Fighter II".to_string()),
            _ => None,
        }
    }
}

#[test]
fn test_arcade_name_lookup() {
    let mut catalog = Catalog::new();
    catalog.set_name_lookup(Box::new(UpperLookup));
    let arcade = catalog.add_platform(
        PlatformDef::new("arcade", "Arcade", "/roms/arcade")
            .category(PlatformCategory::Arcade),
    );
    let root = catalog.platform(arcade).root();
    let known = catalog.new_game(arcade, "/roms/arcade/sf2.zip");
    let unknown = catalog.new_game(arcade, "/roms/arcade/obscure.zip");
    catalog.add_child(root, known);
    catalog.add_child(root, unknown);

    assert_eq!(catalog.display_name(known), "Street Fighter II");
    assert_eq!(catalog.display_name(unknown), "obscure");
}

#[test]
fn test_join_key_is_file_name() {
    let mut catalog = Catalog::new();
    let platform = test_platform(&mut catalog);
    let root = catalog.platform(platform).root();
    let game = add_game(&mut catalog, root, "Doom.sfc");
    assert_eq!(catalog.join_key(game), "Doom.sfc");
    assert_eq!(catalog.child_by_key(root, "Doom.sfc"), Some(game));
}
