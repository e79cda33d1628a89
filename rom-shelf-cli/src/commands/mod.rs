mod launch;
mod list;
mod scan;
mod sorts;

pub(crate) use launch::run_launch;
pub(crate) use list::run_list;
pub(crate) use scan::run_scan;
pub(crate) use sorts::run_sorts;

use std::path::Path;

use rom_shelf_core::tree::{Catalog, PlatformDef, PlatformId};
use rom_shelf_frontend::{apply_gamelist, scan_platform};

use crate::error::CliError;
use crate::settings::Settings;

/// Register a platform for `dir`, scan it, and apply the sidecar's
/// metadata decoration. Every subcommand starts here.
pub(crate) fn open_platform(
    catalog: &mut Catalog,
    name: &str,
    dir: &Path,
    settings: &Settings,
) -> Result<PlatformId, CliError> {
    let platform = catalog.add_platform(
        PlatformDef::new(name, name, dir).launch_command(settings.launch_command()),
    );
    scan_platform(catalog, platform)?;
    apply_gamelist(catalog, platform)?;
    Ok(platform)
}
