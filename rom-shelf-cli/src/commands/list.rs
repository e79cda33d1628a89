use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_shelf_core::projection::{DisplayContext, DisplayMode, display_children};
use rom_shelf_core::sort::{get_sort_type, sort_tree};
use rom_shelf_core::tree::{Catalog, NodeId};
use rom_shelf_core::{FavoriteFilter, FilterPredicate, Unfiltered};
use rom_shelf_frontend::GamelistSource;

use crate::error::CliError;
use crate::settings::load_settings;

use super::open_platform;

/// Print the projected tree for a directory under a display mode.
pub(crate) fn run_list(
    platform_name: &str,
    dir: &Path,
    mode: &str,
    favorites: bool,
    sort: Option<String>,
) -> Result<(), CliError> {
    let mode: DisplayMode = mode.parse().map_err(CliError::invalid_argument)?;
    let settings = load_settings();
    let mut catalog = Catalog::new();
    let platform = open_platform(&mut catalog, platform_name, dir, &settings)?;
    let root = catalog.platform(platform).root();

    if let Some(label) = sort {
        sort_tree(&mut catalog, root, get_sort_type(&label));
    }

    let filter: &dyn FilterPredicate = if favorites { &FavoriteFilter } else { &Unfiltered };
    let registry = GamelistSource;
    let ctx = DisplayContext::new(mode, filter, &registry);
    print_tree(&mut catalog, root, &ctx, 0);
    Ok(())
}

fn print_tree(catalog: &mut Catalog, folder: NodeId, ctx: &DisplayContext, depth: usize) {
    let children = display_children(catalog, folder, ctx);
    for child in children {
        let indent = "  ".repeat(depth);
        if catalog.node(child).is_folder() {
            println!(
                "{indent}{}/",
                catalog
                    .display_name(child)
                    .if_supports_color(Stdout, |t| t.cyan()),
            );
            print_tree(catalog, child, ctx, depth + 1);
        } else {
            let playcount = catalog.node(child).metadata.get_int("playcount");
            let name = catalog.display_name(child).to_string();
            if playcount > 0 {
                println!("{indent}{name} (played {playcount}x)");
            } else {
                println!("{indent}{name}");
            }
        }
    }
}
