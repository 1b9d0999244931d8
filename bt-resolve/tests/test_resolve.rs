use bt_resolve::domain::ResolveError;
use bt_resolve::resolver::{
    resolve, ExternalTool, ResolutionOutcome, ToolInvocation, ToolRunner, ToolStatus,
};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

/// Records every invocation instead of spawning a process
struct RecordingRunner {
    invocations: RefCell<Vec<ToolInvocation>>,
    code: Option<i32>,
}

impl RecordingRunner {
    fn exiting_with(code: Option<i32>) -> Self {
        Self { invocations: RefCell::new(Vec::new()), code }
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &ToolInvocation) -> io::Result<ToolStatus> {
        self.invocations.borrow_mut().push(invocation.clone());
        Ok(ToolStatus { code: self.code })
    }
}

fn addr2line(code: Option<i32>) -> ExternalTool<RecordingRunner> {
    ExternalTool::new(
        "xtensa-esp32-elf-addr2line".to_string(),
        vec!["-pfiaC".to_string()],
        PathBuf::from("./build/firmware.elf"),
        RecordingRunner::exiting_with(code),
    )
}

fn trailing_args(invocation: &ToolInvocation) -> &[String] {
    &invocation.args[3..]
}

#[test]
fn test_guru_meditation_line_resolves_in_order() {
    let tool = addr2line(Some(0));

    let outcome =
        resolve("Guru Meditation Error: Backtrace:0x400d1 0x400d2:0x1 0x400d3", &tool).unwrap();

    assert_eq!(outcome, ResolutionOutcome::Resolved { addresses: 3 });
    let invocations = tool.runner().invocations.borrow();
    assert_eq!(invocations.len(), 1);
    assert_eq!(trailing_args(&invocations[0]), ["0x400d1", "0x400d2", "0x400d3"]);
}

#[test]
fn test_missing_marker_never_spawns() {
    let tool = addr2line(Some(0));

    for line in ["no trace here", "", "backtrace:0x1", "Backtrace 0x1 0x2"] {
        assert_eq!(resolve(line, &tool).unwrap(), ResolutionOutcome::NoBacktraceFound);
    }

    assert!(tool.runner().invocations.borrow().is_empty());
}

#[test]
fn test_fixed_flags_then_image_then_addresses() {
    let tool = addr2line(Some(0));

    resolve("Backtrace:0xAA 0xBB", &tool).unwrap();

    let invocations = tool.runner().invocations.borrow();
    assert_eq!(invocations[0].program, "xtensa-esp32-elf-addr2line");
    assert_eq!(invocations[0].args, ["-pfiaC", "-e", "./build/firmware.elf", "0xAA", "0xBB"]);
}

#[test]
fn test_marker_without_addresses_still_invokes_tool() {
    let tool = addr2line(Some(0));

    let outcome = resolve("Backtrace:", &tool).unwrap();

    assert_eq!(outcome, ResolutionOutcome::Resolved { addresses: 0 });
    let invocations = tool.runner().invocations.borrow();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].args, ["-pfiaC", "-e", "./build/firmware.elf"]);
}

#[test]
fn test_nonzero_tool_exit_is_an_error() {
    let tool = addr2line(Some(1));

    let err = resolve("Backtrace:0x400d1e4a:0x3ffb5f60", &tool).unwrap_err();

    match err {
        ResolveError::ToolFailed { ref tool, code } => {
            assert_eq!(tool, "xtensa-esp32-elf-addr2line");
            assert_eq!(code, Some(1));
        }
        ref other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_malformed_tokens_forwarded_verbatim() {
    let tool = addr2line(Some(0));

    resolve("Backtrace:0x400d1e4a:0x3ffb 0x4008|<-CORRUPTED nothex:1", &tool).unwrap();

    let invocations = tool.runner().invocations.borrow();
    assert_eq!(trailing_args(&invocations[0]), ["0x400d1e4a", "0x4008|<-CORRUPTED", "nothex"]);
}
