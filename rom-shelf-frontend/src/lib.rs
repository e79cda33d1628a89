//! Sidecar boundary for the catalog: the per-platform `gamelist.xml`
//! (registered paths in, metadata back out) and the directory scanner
//! that populates a platform tree from disk.

pub mod error;
pub mod gamelist;
pub mod scan;

pub use error::GamelistError;
pub use gamelist::{GamelistSource, apply_gamelist, gamelist_path, read_game_paths, write_gamelist};
pub use scan::scan_platform;
