// String formatting intentionally uses format! for clarity
#![allow(clippy::format_push_string)]

use addr2line::Context;
use anyhow::{Context as _, Result};
use gimli::{EndianRcSlice, RunTimeEndian};
use log::debug;
use object::{Object, ObjectSection, ObjectSymbol, SymbolKind};
use rustc_demangle::demangle;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Placeholder binutils prints for anything it cannot resolve
pub const UNKNOWN: &str = "??";

/// Symbolizer for resolving program counters to source locations
///
/// Includes a cache: backtraces of recursive or looping crashes repeat the
/// same addresses many times.
pub struct Symbolizer {
    ctx: Context<EndianRcSlice<RunTimeEndian>>,
    /// Function symbols sorted by start address, for images without DWARF
    symbols: Vec<(u64, String)>,
    has_debug_info: bool,
    is_64: bool,
    /// Cache of resolved frames by address
    cache: RefCell<HashMap<u64, ResolvedFrame>>,
}

impl Symbolizer {
    /// Create a new symbolizer for the given firmware image
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed as an object file,
    /// or if its DWARF sections are malformed
    pub fn new<P: AsRef<Path>>(binary_path: P) -> Result<Self> {
        let path = binary_path.as_ref();
        let binary_data = fs::read(path)
            .with_context(|| format!("Failed to read firmware image {}", path.display()))?;

        let obj_file = object::File::parse(&*binary_data).context("Failed to parse object file")?;

        let endian =
            if obj_file.is_little_endian() { RunTimeEndian::Little } else { RunTimeEndian::Big };

        let load_section =
            |id: gimli::SectionId| -> Result<EndianRcSlice<RunTimeEndian>, gimli::Error> {
                let data = obj_file
                    .section_by_name(id.name())
                    .and_then(|section| section.uncompressed_data().ok())
                    .unwrap_or(std::borrow::Cow::Borrowed(&[][..]));
                Ok(EndianRcSlice::new(Rc::from(&*data), endian))
            };

        let dwarf = gimli::Dwarf::load(&load_section)?;
        let ctx = Context::from_dwarf(dwarf).context("Failed to load DWARF debug information")?;

        let has_debug_info = obj_file.section_by_name(".debug_info").is_some_and(|s| s.size() > 0);

        let mut symbols: Vec<(u64, String)> = obj_file
            .symbols()
            .filter(|sym| sym.kind() == SymbolKind::Text && sym.address() != 0)
            .filter_map(|sym| sym.name().ok().map(|name| (sym.address(), name.to_string())))
            .filter(|(_, name)| !name.is_empty())
            .collect();
        symbols.sort_by_key(|(addr, _)| *addr);

        debug!(
            "loaded {}: debug_info={has_debug_info}, {} function symbols",
            path.display(),
            symbols.len()
        );

        Ok(Self {
            ctx,
            symbols,
            has_debug_info,
            is_64: obj_file.is_64(),
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Whether the image carries DWARF `.debug_info`
    #[must_use]
    pub fn has_debug_info(&self) -> bool {
        self.has_debug_info
    }

    /// Hex digits used when printing addresses of this image
    #[must_use]
    pub fn address_width(&self) -> usize {
        if self.is_64 {
            16
        } else {
            8
        }
    }

    /// Resolve a program counter to source location information
    ///
    /// Uses a cache to avoid re-resolving the same address multiple times.
    pub fn resolve(&self, addr: u64) -> ResolvedFrame {
        if let Some(cached) = self.cache.borrow().get(&addr) {
            return cached.clone();
        }

        let mut result = Vec::new();

        if let Ok(mut frame_iter) = self.ctx.find_frames(addr).skip_all_loads() {
            while let Ok(Some(frame)) = frame_iter.next() {
                let function =
                    frame.function.and_then(|f| f.demangle().ok().map(|s| s.to_string()));

                let location = frame.location.map(|loc| SourceLocation {
                    file: loc.file.map(std::string::ToString::to_string),
                    line: loc.line,
                    column: loc.column,
                });

                result.push(InlinedFrame { function, location });
            }
        }

        if result.is_empty() {
            result.push(InlinedFrame { function: None, location: None });
        }
        // Line tables without subprogram info still leave the function unnamed
        if result.len() == 1 && result[0].function.is_none() {
            result[0].function = self.symbol_for(addr).map(Self::demangle_symbol);
        }

        let resolved = ResolvedFrame { addr, frames: result };

        self.cache.borrow_mut().insert(addr, resolved.clone());

        resolved
    }

    /// Nearest function symbol at or below `addr`
    fn symbol_for(&self, addr: u64) -> Option<&str> {
        let idx = self.symbols.partition_point(|(start, _)| *start <= addr);
        idx.checked_sub(1).map(|i| self.symbols[i].1.as_str())
    }

    /// Demangle a Rust symbol name; other names come back unchanged
    #[must_use]
    pub fn demangle_symbol(symbol: &str) -> String {
        format!("{:#}", demangle(symbol))
    }
}

/// A resolved address (may contain multiple inlined frames, innermost first)
#[derive(Debug, Clone)]
pub struct ResolvedFrame {
    pub addr: u64,
    pub frames: Vec<InlinedFrame>,
}

/// An inlined frame within a resolved frame
#[derive(Debug, Clone)]
pub struct InlinedFrame {
    pub function: Option<String>,
    pub location: Option<SourceLocation>,
}

/// Source code location
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl InlinedFrame {
    /// `function at file:line`, with `??` for unknown parts
    ///
    /// An address that resolved to nothing at all prints `?? ??:0`.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.function.is_none() && self.location.is_none() {
            return format!("{UNKNOWN} {UNKNOWN}:0");
        }
        let function = self.function.as_deref().unwrap_or(UNKNOWN);
        let location = match &self.location {
            Some(SourceLocation { file: Some(file), line: Some(line), .. }) => {
                format!("{file}:{line}")
            }
            Some(SourceLocation { file: Some(file), line: None, .. }) => format!("{file}:?"),
            _ => format!("{UNKNOWN}:0"),
        };
        format!("{function} at {location}")
    }
}

impl ResolvedFrame {
    /// Format the address the way `addr2line -pfiaC` does
    ///
    /// ```text
    /// 0x400d1e4a: app_main at /project/main/main.c:42
    ///  (inlined by) start at /project/main/start.c:7
    /// ```
    #[must_use]
    pub fn format_pretty(&self, width: usize) -> String {
        let mut output = format!("0x{:0width$x}: ", self.addr);

        for (idx, inlined) in self.frames.iter().enumerate() {
            if idx > 0 {
                output.push_str("\n (inlined by) ");
            }
            output.push_str(&inlined.describe());
        }

        output
    }
}
