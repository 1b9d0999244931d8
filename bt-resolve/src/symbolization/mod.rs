//! # Symbol Resolution for Firmware Images
//!
//! Converts raw program counters taken from a crash backtrace into function
//! names, source files and line numbers, using the DWARF debug information
//! embedded in the firmware ELF. This is the in-process counterpart of
//! running `xtensa-esp32-elf-addr2line -pfiaC -e firmware.elf <addr>...`.
//!
//! ## Libraries used
//!
//! - `object`: ELF parsing (sections, symbol table)
//! - `gimli`: low-level DWARF parser
//! - `addr2line`: address → frames lookup built on gimli, inline-aware
//! - `rustc-demangle`: demangling of symbol-table fallback names
//!
//! ## Addresses
//!
//! Firmware images are linked at fixed addresses, so unlike hosted
//! executables there is no load bias to subtract: the program counter in
//! the backtrace is looked up in DWARF as-is.
//!
//! ## Inlining
//!
//! One address can map to a chain of frames when the compiler inlined
//! calls. `addr2line` yields the innermost frame first; the output prints
//! the outer ones as ` (inlined by) ...` lines, like the binutils tool.
//!
//! ## Limitations
//!
//! - **Requires debug info**: without `.debug_info`/`.debug_line` only the
//!   symbol table fallback is available (function name, no location)
//! - **Stripped images** resolve to `?? ??:0`

pub mod symbolizer;

pub use symbolizer::{InlinedFrame, ResolvedFrame, SourceLocation, Symbolizer};
