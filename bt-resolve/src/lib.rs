//! # bt-resolve - Firmware Backtrace Resolver
//!
//! When an ESP32 firmware crashes, its panic handler prints the call stack
//! as a single line of raw program counters:
//!
//! ```text
//! Guru Meditation Error: Core 0 panic'ed (LoadProhibited).
//! Backtrace:0x400d1e4a:0x3ffb5f60 0x400d2b1c:0x3ffb5f80 0x40087a5d:0x3ffb5fa0
//! ```
//!
//! This crate turns that line back into functions and source lines by
//! resolving the addresses against the firmware image.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────────┐
//! │  cli         │──▶│  backtrace   │──▶│  resolver                    │
//! │ (line input) │   │ (addresses)  │   │  ├─ external (addr2line tool)│
//! └──────────────┘   └──────────────┘   │  └─ native (symbolization)   │
//!                                       └──────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`backtrace`]: find the `Backtrace:` marker and extract address tokens
//! - [`resolver`]: resolution outcome, backend trait and configuration
//!   - `external`: runs `xtensa-esp32-elf-addr2line -pfiaC -e <elf> <addr>...`
//!   - `native`: same output shape, produced in-process from DWARF
//! - [`symbolization`]: DWARF lookups via the `addr2line` crate
//! - [`cli`]: command-line arguments (with `BT_RESOLVE_*` env overrides)
//! - [`domain`]: address newtypes and error types
//!
//! ## Typical Usage
//!
//! ```bash
//! # Paste the panic line at the prompt
//! bt-resolve
//!
//! # Different chip / build directory
//! BT_RESOLVE_TOOL=riscv32-esp-elf-addr2line bt-resolve -e build/app.elf
//!
//! # No cross toolchain installed
//! bt-resolve --backend native 'Backtrace:0x400d1e4a:0x3ffb5f60'
//! ```

pub mod backtrace;
pub mod cli;
pub mod domain;
pub mod resolver;
pub mod symbolization;
