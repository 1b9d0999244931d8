//! CLI argument definitions

use crate::resolver::{Backend, ResolverConfig, DEFAULT_ELF, DEFAULT_TOOL};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bt-resolve",
    version,
    about = "Resolve a firmware crash backtrace to functions and source lines",
    after_help = "\
EXAMPLES:
    bt-resolve                                      Prompt for a line, paste the panic output
    bt-resolve 'Backtrace:0x400d1e4a:0x3ffb5f60'    Resolve a line given as argument
    bt-resolve -e build/app.elf --backend native    Resolve in-process, no toolchain needed"
)]
pub struct Args {
    /// Crash output line containing `Backtrace:` (read from stdin if omitted)
    #[arg(value_name = "LINE")]
    pub line: Option<String>,

    /// Address-to-line tool to run
    #[arg(long, env = "BT_RESOLVE_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Firmware image with debug symbols
    #[arg(short, long, env = "BT_RESOLVE_ELF", default_value = DEFAULT_ELF)]
    pub elf: PathBuf,

    /// Flags passed to the tool before `-e <ELF>` (whitespace separated)
    #[arg(long, env = "BT_RESOLVE_FLAGS", default_value = "-pfiaC", allow_hyphen_values = true)]
    pub flags: String,

    /// Resolution backend
    #[arg(long, env = "BT_RESOLVE_BACKEND", value_enum, default_value_t = Backend::External)]
    pub backend: Backend,

    /// Do not print the input prompt
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn to_config(&self) -> ResolverConfig {
        ResolverConfig {
            tool: self.tool.clone(),
            flags: self.flags.split_whitespace().map(str::to_string).collect(),
            elf: self.elf.clone(),
            backend: self.backend,
        }
    }
}
