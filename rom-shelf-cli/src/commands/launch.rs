use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_shelf_core::tree::Catalog;
use rom_shelf_frontend::{gamelist_path, write_gamelist};
use rom_shelf_launch::{LaunchCoordinator, NoHooks, ShellRunner};

use crate::error::CliError;
use crate::settings::load_settings;

use super::open_platform;

/// Launch a ROM from the scanned tree, then persist the play through
/// the sidecar (the save point).
pub(crate) fn run_launch(platform_name: &str, dir: &Path, rom: &Path) -> Result<(), CliError> {
    let settings = load_settings();
    let mut catalog = Catalog::new();
    let platform = open_platform(&mut catalog, platform_name, dir, &settings)?;
    let root = catalog.platform(platform).root();

    let rom_path = if rom.is_absolute() {
        rom.to_path_buf()
    } else {
        dir.join(rom)
    };
    let game = catalog.find_by_path(root, &rom_path).ok_or_else(|| {
        CliError::RomNotFound(rom.display().to_string(), dir.display().to_string())
    })?;

    let mut coordinator = LaunchCoordinator::new();
    let outcome = coordinator.launch(
        &mut catalog,
        game,
        &settings.launch_config(),
        &mut NoHooks,
        &mut ShellRunner,
    )?;

    if outcome.exit_code == 0 {
        println!(
            "{} exited cleanly",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "{} exited with code {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.yellow()),
            outcome.exit_code,
        );
    }

    let sidecar = gamelist_path(catalog.platform(platform));
    write_gamelist(&mut catalog, platform, &sidecar)?;
    Ok(())
}
