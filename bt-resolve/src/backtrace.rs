//! Backtrace line parsing
//!
//! ESP-IDF panic handlers print the call stack as a single line:
//!
//! ```text
//! Backtrace:0x400d1e4a:0x3ffb5f60 0x400d2b1c:0x3ffb5f80 0x40087a5d:0x3ffb5fa0
//! ```
//!
//! Each token is `<pc>:<sp>`. Only the program counter matters for symbol
//! lookup, so everything from the first colon onwards is dropped.

use crate::domain::{Address, AddressList};

/// Literal marker preceding the address tokens
pub const BACKTRACE_MARKER: &str = "Backtrace:";

/// Extract the address list from a crash-report line
///
/// Returns `None` when the line carries no `Backtrace:` marker. Text before
/// the marker is ignored; if the marker appears more than once, the tokens
/// after the last one are used.
///
/// A marker with nothing after it yields an empty list, not `None`.
/// Tokens whose address part is empty (e.g. `:0x3ffb`) are dropped along
/// with the empty segments left by repeated spaces.
#[must_use]
pub fn extract_addresses(line: &str) -> Option<AddressList> {
    let line = line.trim_end_matches(['\n', '\r']);
    // Only the first line counts, matching `.` never crossing a newline
    let line = line.split('\n').next().unwrap_or(line);

    let start = line.rfind(BACKTRACE_MARKER)? + BACKTRACE_MARKER.len();
    let tokens = &line[start..];

    Some(
        tokens
            .split(' ')
            .map(|token| token.split(':').next().unwrap_or(token))
            .filter(|addr| !addr.is_empty())
            .map(Address::from)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(list: &AddressList) -> Vec<&str> {
        list.as_strs()
    }

    #[test]
    fn test_guru_meditation_line() {
        let list =
            extract_addresses("Guru Meditation Error: Backtrace:0x400d1 0x400d2:0x1 0x400d3")
                .unwrap();
        assert_eq!(strs(&list), vec!["0x400d1", "0x400d2", "0x400d3"]);
    }

    #[test]
    fn test_no_marker() {
        assert!(extract_addresses("no trace here").is_none());
        assert!(extract_addresses("").is_none());
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert!(extract_addresses("backtrace:0x1 0x2").is_none());
        assert!(extract_addresses("BACKTRACE:0x1").is_none());
    }

    #[test]
    fn test_marker_without_tokens_gives_empty_list() {
        let list = extract_addresses("Backtrace:").unwrap();
        assert!(list.is_empty());

        let list = extract_addresses("Backtrace:    ").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_repeated_spaces_are_skipped() {
        let list = extract_addresses("Backtrace:  0xAA   0xBB ").unwrap();
        assert_eq!(strs(&list), vec!["0xAA", "0xBB"]);
    }

    #[test]
    fn test_order_duplicates_and_case_preserved() {
        let list = extract_addresses("Backtrace:0xbb:1 0xAA:2 0xbb:3").unwrap();
        assert_eq!(strs(&list), vec!["0xbb", "0xAA", "0xbb"]);
    }

    #[test]
    fn test_only_first_colon_splits() {
        let list = extract_addresses("Backtrace:0x1:0x2:0x3").unwrap();
        assert_eq!(strs(&list), vec!["0x1"]);
    }

    #[test]
    fn test_leading_colon_token_is_dropped() {
        let list = extract_addresses("Backtrace::0x3ffb 0x1").unwrap();
        assert_eq!(strs(&list), vec!["0x1"]);
    }

    #[test]
    fn test_malformed_tokens_pass_through() {
        let list = extract_addresses("Backtrace:zzz 0x4008|<-CORRUPTED").unwrap();
        assert_eq!(strs(&list), vec!["zzz", "0x4008|<-CORRUPTED"]);
    }

    #[test]
    fn test_last_marker_wins() {
        let list = extract_addresses("Backtrace: junk Backtrace:0x10 0x20").unwrap();
        assert_eq!(strs(&list), vec!["0x10", "0x20"]);
    }

    #[test]
    fn test_trailing_newline_is_stripped() {
        let list = extract_addresses("Backtrace:0x10 0x20\r\n").unwrap();
        assert_eq!(strs(&list), vec!["0x10", "0x20"]);
    }

    #[test]
    fn test_tabs_are_not_separators() {
        let list = extract_addresses("Backtrace:0x10\t0x20").unwrap();
        assert_eq!(strs(&list), vec!["0x10\t0x20"]);
    }
}
