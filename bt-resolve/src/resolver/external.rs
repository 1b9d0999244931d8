//! External address-to-line tool backend
//!
//! Runs `<tool> <flags...> -e <elf> <addr...>` with inherited stdio, so the
//! tool's output reaches the terminal untouched. Process creation sits
//! behind [`ToolRunner`] so tests can observe invocations without spawning.

use super::AddressResolver;
use crate::domain::{AddressList, ResolveError};
use log::{debug, warn};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Command;

/// Program and argument vector for one tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status of a finished tool run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ToolStatus {
    #[must_use]
    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

/// Process boundary: runs an invocation to completion
pub trait ToolRunner {
    /// Run and wait, streaming the child's output to our stdout/stderr
    ///
    /// # Errors
    /// The process could not be started.
    fn run(&self, invocation: &ToolInvocation) -> io::Result<ToolStatus>;
}

/// Spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &ToolInvocation) -> io::Result<ToolStatus> {
        // status() inherits stdin, stdout and stderr
        let status = Command::new(&invocation.program).args(&invocation.args).status()?;
        Ok(ToolStatus { code: status.code() })
    }
}

/// Backend delegating to an external tool such as `xtensa-esp32-elf-addr2line`
pub struct ExternalTool<R> {
    tool: String,
    flags: Vec<String>,
    elf: PathBuf,
    runner: R,
}

impl<R: ToolRunner> ExternalTool<R> {
    pub fn new(tool: String, flags: Vec<String>, elf: PathBuf, runner: R) -> Self {
        Self { tool, flags, elf, runner }
    }

    /// Argument vector: flags, `-e <elf>`, then the addresses in input order
    #[must_use]
    pub fn invocation(&self, addresses: &AddressList) -> ToolInvocation {
        let mut args = self.flags.clone();
        args.push("-e".to_string());
        args.push(self.elf.to_string_lossy().into_owned());
        args.extend(addresses.iter().map(ToString::to_string));

        ToolInvocation { program: self.tool.clone(), args }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: ToolRunner> AddressResolver for ExternalTool<R> {
    fn resolve_addresses(&self, addresses: &AddressList) -> Result<(), ResolveError> {
        let invocation = self.invocation(addresses);
        if addresses.is_empty() {
            warn!("Running {} without addresses", self.tool);
        }
        debug!("Running: {invocation}");

        let status = self
            .runner
            .run(&invocation)
            .map_err(|source| ResolveError::ToolSpawn { tool: self.tool.clone(), source })?;

        if !status.success() {
            return Err(ResolveError::ToolFailed { tool: self.tool.clone(), code: status.code });
        }

        Ok(())
    }
}
