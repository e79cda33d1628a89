//! The launch state machine.
//!
//! Linear lifecycle with no branches or retries:
//! `Idle → PreLaunch → ResolveCommand → Running → PostLaunch → Idle`.
//! `Running` is a blocking suspension point — audio/input collaborators
//! are deliberately torn down for the duration, so no other catalog
//! operation may run until the external process exits. Cancellation
//! mid-launch is not supported.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use chrono::Local;

use rom_shelf_core::tree::{Catalog, NodeId};
use rom_shelf_core::util;

use crate::command::build_command;
use crate::cores::{CoreDescriptor, core_library_path, resolve_core};
use crate::error::LaunchError;

/// Observable coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchState {
    #[default]
    Idle,
    PreLaunch,
    ResolveCommand,
    Running,
    PostLaunch,
}

/// Collaborators suspended for the duration of a launch (audio, input,
/// window). Suspend runs before command resolution; resume runs as soon
/// as the process has exited, before catalog state is updated.
pub trait SubsystemHooks {
    fn suspend(&mut self) {}
    fn resume(&mut self) {}
}

/// No-op hooks for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl SubsystemHooks for NoHooks {}

/// Boundary that actually runs the resolved command and reports the
/// process exit code.
pub trait ProcessRunner {
    fn run(&mut self, command: &str) -> io::Result<i32>;
}

/// Runs the command through `sh -c` and blocks until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&mut self, command: &str) -> io::Result<i32> {
        let status = Command::new("sh").arg("-c").arg(command).status()?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Static launch configuration: registered cores and the directories
/// backing the `%CORE%` and `%CONFIG%` substitutions.
#[derive(Debug, Clone, Default)]
pub struct LaunchConfig {
    pub cores: Vec<CoreDescriptor>,
    pub core_dir: PathBuf,
    pub config_dir: PathBuf,
}

/// What a completed launch resolved and how the process exited.
#[derive(Debug, Clone)]
pub struct LaunchOutcome {
    pub command: String,
    pub core: Option<String>,
    pub exit_code: i32,
}

/// Drives the launch lifecycle for catalog entries.
#[derive(Debug, Default)]
pub struct LaunchCoordinator {
    state: LaunchState,
}

impl LaunchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Launch the game behind `node`, blocking until the external
    /// process exits.
    ///
    /// A non-zero exit code is logged as a warning, not escalated: the
    /// play count and last-played timestamp are recorded either way.
    /// Both always target the canonical source node (launching through a
    /// collection alias must credit the real entry), and collection
    /// aliases are refreshed afterwards so their snapshots stay current.
    pub fn launch(
        &mut self,
        catalog: &mut Catalog,
        node: NodeId,
        config: &LaunchConfig,
        hooks: &mut dyn SubsystemHooks,
        runner: &mut dyn ProcessRunner,
    ) -> Result<LaunchOutcome, LaunchError> {
        let target = catalog.source_of(node);
        let platform = catalog.platform_of(target);
        let platform_name = platform.name().to_string();
        let template = platform
            .launch_command()
            .ok_or_else(|| LaunchError::MissingTemplate(platform_name.clone()))?
            .to_string();
        let rom = catalog.node(target).path().to_path_buf();

        log::info!("attempting to launch {}", rom.display());
        self.state = LaunchState::PreLaunch;
        hooks.suspend();

        self.state = LaunchState::ResolveCommand;
        let ext = util::ext_lower(&rom);
        let core = resolve_core(&config.cores, ext.as_deref());
        let core_name = core.map(|c| c.name.clone());
        let core_path = core.map(|c| core_library_path(&config.core_dir, &c.name));
        if let Some(ref name) = core_name {
            log::info!("using core: {name}");
        }
        let config_path = config.config_dir.join(&platform_name).join("retroarch.cfg");
        let command = build_command(&template, &rom, core_path.as_deref(), Some(&config_path));

        self.state = LaunchState::Running;
        log::info!("    {command}");
        let run_result = runner.run(&command);

        self.state = LaunchState::PostLaunch;
        hooks.resume();

        let exit_code = match run_result {
            Ok(code) => code,
            Err(e) => {
                self.state = LaunchState::Idle;
                return Err(e.into());
            }
        };
        if exit_code != 0 {
            log::warn!("launch terminated with nonzero exit code {exit_code}");
        }

        let metadata = &mut catalog.node_mut(target).metadata;
        let count = metadata.get_int("playcount") + 1;
        metadata.set("playcount", count.to_string());
        metadata.set("lastplayed", Local::now().format("%Y%m%dT%H%M%S").to_string());
        catalog.refresh_collections_for(target);

        self.state = LaunchState::Idle;
        Ok(LaunchOutcome {
            command,
            core: core_name,
            exit_code,
        })
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
