//! In-process backend reading DWARF from the firmware image
//!
//! Prints the same shape of output as `addr2line -pfiaC`, one block per
//! address. Tokens that are not hex numbers are echoed with `?? ??:0`
//! rather than rejected.

use super::AddressResolver;
use crate::domain::{AddressList, ResolveError};
use crate::symbolization::Symbolizer;
use log::warn;
use std::io::{self, Write};
use std::path::PathBuf;

pub struct NativeResolver {
    elf: PathBuf,
}

impl NativeResolver {
    #[must_use]
    pub fn new(elf: PathBuf) -> Self {
        Self { elf }
    }

    /// Load the image and write one resolution block per address to `out`
    ///
    /// # Errors
    /// The image cannot be loaded, or writing to `out` fails.
    pub fn write_resolution<W: Write>(
        &self,
        addresses: &AddressList,
        out: &mut W,
    ) -> Result<(), ResolveError> {
        let symbolizer = Symbolizer::new(&self.elf)
            .map_err(|e| ResolveError::Symbolization(format!("{e:#}")))?;

        if !symbolizer.has_debug_info() {
            warn!("{} has no DWARF debug info, source locations unavailable", self.elf.display());
        }

        let width = symbolizer.address_width();
        for address in addresses {
            match address.as_u64() {
                Some(addr) => writeln!(out, "{}", symbolizer.resolve(addr).format_pretty(width))?,
                None => writeln!(out, "{address}: ?? ??:0")?,
            }
        }
        out.flush()?;

        Ok(())
    }
}

impl AddressResolver for NativeResolver {
    fn resolve_addresses(&self, addresses: &AddressList) -> Result<(), ResolveError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_resolution(addresses, &mut out)
    }
}
