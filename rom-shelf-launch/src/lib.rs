//! Launch coordination: resolve which emulator core runs a catalog
//! entry, build the command line from a template, block on the external
//! process, and record the play in the catalog afterwards.

pub mod command;
pub mod coordinator;
pub mod cores;
pub mod error;

pub use command::{build_command, escape_path};
pub use coordinator::{
    LaunchConfig, LaunchCoordinator, LaunchOutcome, LaunchState, NoHooks, ProcessRunner,
    ShellRunner, SubsystemHooks,
};
pub use cores::{CoreDescriptor, core_library_path, resolve_core};
pub use error::LaunchError;
