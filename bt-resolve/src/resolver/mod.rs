//! # Backtrace resolution
//!
//! Turns one line of crash output into a resolved stack trace:
//!
//! ```text
//! "Guru Meditation ... Backtrace:0x400d1:0x3ffb 0x400d2:0x3ffc"
//!        │
//!        ▼  backtrace::extract_addresses
//! ["0x400d1", "0x400d2"]
//!        │
//!        ▼  AddressResolver (external tool or native DWARF)
//! 0x400d1: app_main at main.c:42
//! 0x400d2: main_task at app_startup.c:208
//! ```
//!
//! The backend is chosen by [`ResolverConfig::backend`]. The external tool
//! is the default; the native backend exists for hosts without the
//! cross toolchain.

pub mod external;
pub mod native;

use crate::backtrace::extract_addresses;
use crate::domain::{AddressList, ResolveError};
use log::{debug, info};
use std::path::PathBuf;

pub use external::{ExternalTool, SystemRunner, ToolInvocation, ToolRunner, ToolStatus};
pub use native::NativeResolver;

/// Address-to-line tool shipped with the ESP32 Xtensa toolchain
pub const DEFAULT_TOOL: &str = "xtensa-esp32-elf-addr2line";

/// Firmware image produced by the project build
pub const DEFAULT_ELF: &str = "./build/firmware.elf";

/// Pretty-print, function names, inlines, addresses, demangle
pub const DEFAULT_FLAGS: &[&str] = &["-pfiaC"];

/// Diagnostic printed when the input carries no backtrace
pub const NO_BACKTRACE_MESSAGE: &str = "No backtrace";

/// Resolution mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Spawn the external address-to-line tool
    #[default]
    External,
    /// Read DWARF from the firmware image in-process
    Native,
}

/// Everything that used to be a compiled-in constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub tool: String,
    pub flags: Vec<String>,
    pub elf: PathBuf,
    pub backend: Backend,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            flags: DEFAULT_FLAGS.iter().map(ToString::to_string).collect(),
            elf: PathBuf::from(DEFAULT_ELF),
            backend: Backend::default(),
        }
    }
}

impl ResolverConfig {
    /// Build the backend this configuration selects
    #[must_use]
    pub fn build_resolver(&self) -> Box<dyn AddressResolver> {
        match self.backend {
            Backend::External => Box::new(ExternalTool::new(
                self.tool.clone(),
                self.flags.clone(),
                self.elf.clone(),
                SystemRunner,
            )),
            Backend::Native => Box::new(NativeResolver::new(self.elf.clone())),
        }
    }
}

/// Result of resolving one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The line had no `Backtrace:` marker; nothing was resolved
    NoBacktraceFound,
    /// The backend ran to completion on this many addresses
    Resolved { addresses: usize },
}

/// A mechanism that prints resolved source locations for addresses
pub trait AddressResolver {
    /// Resolve and print every address, in order
    ///
    /// # Errors
    /// Any failure of the underlying mechanism; never swallowed.
    fn resolve_addresses(&self, addresses: &AddressList) -> Result<(), ResolveError>;
}

impl<T: AddressResolver + ?Sized> AddressResolver for Box<T> {
    fn resolve_addresses(&self, addresses: &AddressList) -> Result<(), ResolveError> {
        (**self).resolve_addresses(addresses)
    }
}

/// Resolve the backtrace carried by `line`
///
/// An empty address list (`"Backtrace:"` with nothing after it) is still
/// handed to the resolver.
///
/// # Errors
/// Propagates the resolver's failure, e.g. a non-zero tool exit.
pub fn resolve<R: AddressResolver + ?Sized>(
    line: &str,
    resolver: &R,
) -> Result<ResolutionOutcome, ResolveError> {
    let Some(addresses) = extract_addresses(line) else {
        info!("No backtrace marker in input");
        return Ok(ResolutionOutcome::NoBacktraceFound);
    };

    info!("Resolving {} addresses", addresses.len());
    debug!("Addresses: {addresses}");

    resolver.resolve_addresses(&addresses)?;

    Ok(ResolutionOutcome::Resolved { addresses: addresses.len() })
}
