use super::*;

fn catalog_with_game() -> (Catalog, NodeId, PlatformId) {
    let mut catalog = Catalog::new();
    let snes = catalog.add_platform(PlatformDef::new("snes", "Super Nintendo", "/roms/snes"));
    let root = catalog.platform(snes).root();
    let game = catalog.new_game(snes, "/roms/snes/Doom (USA).sfc");
    catalog.add_child(root, game);
    let favorites = catalog.add_collection("favorites", "Favorites");
    (catalog, game, favorites)
}

#[test]
fn test_alias_snapshots_source_metadata() {
    let (mut catalog, game, favorites) = catalog_with_game();
    catalog.node_mut(game).metadata.set("rating", "0.8");
    let alias = catalog.add_to_collection(game, favorites);

    assert_eq!(catalog.node(alias).metadata.get("rating"), "0.8");
    assert!(catalog.node(alias).is_alias());
    assert!(!catalog.node(alias).metadata.was_changed());
}

#[test]
fn test_alias_refresh_sees_source_writes() {
    let (mut catalog, game, favorites) = catalog_with_game();
    let alias = catalog.add_to_collection(game, favorites);

    let source = catalog.source_of(alias);
    let count = catalog.node(source).metadata.get_int("playcount") + 1;
    catalog.node_mut(source).metadata.set("playcount", count.to_string());
    assert_eq!(catalog.node(alias).metadata.get_int("playcount"), 0);

    catalog.refresh_metadata(alias);
    assert_eq!(
        catalog.node(alias).metadata.get_int("playcount"),
        catalog.node(game).metadata.get_int("playcount")
    );
}

#[test]
fn test_alias_of_alias_resolves_to_root_source() {
    let (mut catalog, game, favorites) = catalog_with_game();
    let arcade_hits = catalog.add_collection("arcade-hits", "Arcade Hits");

    let alias = catalog.add_to_collection(game, favorites);
    let alias_of_alias = catalog.add_to_collection(alias, arcade_hits);

    assert_eq!(catalog.source_of(alias_of_alias), game);
    assert_eq!(catalog.source_of(alias), game);
    assert_eq!(catalog.source_of(game), game);
}

#[test]
fn test_alias_join_key_is_full_path() {
    let mut catalog = Catalog::new();
    let snes = catalog.add_platform(PlatformDef::new("snes", "Super Nintendo", "/roms/snes"));
    let genesis = catalog.add_platform(PlatformDef::new("genesis", "Sega Genesis", "/roms/genesis"));
    let all = catalog.add_collection("all-games", "All Games");

    let on_snes = catalog.new_game(snes, "/roms/snes/Doom.sfc");
    let on_genesis = catalog.new_game(genesis, "/roms/genesis/Doom.sfc");
    let snes_root = catalog.platform(snes).root();
    let genesis_root = catalog.platform(genesis).root();
    catalog.add_child(snes_root, on_snes);
    catalog.add_child(genesis_root, on_genesis);

    // Same file name from two platforms: both must coexist in the
    // collection because alias keys are full paths.
    catalog.add_to_collection(on_snes, all);
    catalog.add_to_collection(on_genesis, all);
    let root = catalog.platform(all).root();
    assert_eq!(catalog.node(root).children().len(), 2);
}

#[test]
fn test_add_to_collection_is_idempotent() {
    let (mut catalog, game, favorites) = catalog_with_game();
    let first = catalog.add_to_collection(game, favorites);
    let second = catalog.add_to_collection(game, favorites);
    assert_eq!(first, second);

    let root = catalog.platform(favorites).root();
    assert_eq!(catalog.node(root).children().len(), 1);
}

#[test]
fn test_destroying_alias_leaves_source_intact() {
    let (mut catalog, game, favorites) = catalog_with_game();
    let recent = catalog.add_collection("recent", "Recently Played");
    let fav_alias = catalog.add_to_collection(game, favorites);
    let recent_alias = catalog.add_to_collection(game, recent);

    catalog.remove_subtree(fav_alias);

    assert_eq!(catalog.node(game).path().to_str(), Some("/roms/snes/Doom (USA).sfc"));
    assert_eq!(catalog.source_of(recent_alias), game);
    let root = catalog.platform(favorites).root();
    assert!(catalog.node(root).children().is_empty());
}

#[test]
fn test_refresh_collections_for_updates_all_aliases() {
    let (mut catalog, game, favorites) = catalog_with_game();
    let recent = catalog.add_collection("recent", "Recently Played");
    let fav_alias = catalog.add_to_collection(game, favorites);
    let recent_alias = catalog.add_to_collection(game, recent);

    catalog.node_mut(game).metadata.set("playcount", "7");
    catalog.refresh_collections_for(game);

    assert_eq!(catalog.node(fav_alias).metadata.get_int("playcount"), 7);
    assert_eq!(catalog.node(recent_alias).metadata.get_int("playcount"), 7);
}

#[test]
fn test_alias_display_name_carries_system_tag() {
    let (mut catalog, game, favorites) = catalog_with_game();
    catalog.node_mut(game).metadata.set("name", "Doom (USA)");
    let alias = catalog.add_to_collection(game, favorites);

    assert_eq!(catalog.display_name(alias), "Doom [SNES]");

    // The cache is rebuilt after a refresh.
    catalog.node_mut(game).metadata.set("name", "Doom II (USA)");
    catalog.refresh_metadata(alias);
    assert_eq!(catalog.display_name(alias), "Doom II [SNES]");
}

#[test]
fn test_clear_collection_keeps_sources() {
    let (mut catalog, game, favorites) = catalog_with_game();
    catalog.add_to_collection(game, favorites);
    catalog.clear_collection(favorites);

    let root = catalog.platform(favorites).root();
    assert!(catalog.node(root).children().is_empty());
    assert_eq!(catalog.node(game).metadata.get("name"), "Doom (USA)");
}
