use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_shelf_core::tree::{Catalog, KindMask};

use crate::error::CliError;
use crate::settings::load_settings;

use super::open_platform;

/// Scan a directory and report what the tree now holds.
pub(crate) fn run_scan(platform_name: &str, dir: &Path) -> Result<(), CliError> {
    let settings = load_settings();
    let mut catalog = Catalog::new();
    let platform = open_platform(&mut catalog, platform_name, dir, &settings)?;

    let root = catalog.platform(platform).root();
    let games = catalog.files_recursive(root, KindMask::GAME, None).len();
    let folders = catalog.files_recursive(root, KindMask::FOLDER, None).len();

    println!(
        "{} {} game(s) in {} folder(s) under {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        games,
        folders + 1,
        dir.display(),
    );
    Ok(())
}
