//! Domain types providing compile-time safety and self-documentation
//!
//! Addresses stay as the operator typed them. Only the native backend ever
//! interprets them numerically; the external tool receives them verbatim.

use std::fmt;

/// A single backtrace address token, exactly as extracted from the input
///
/// No validation happens on construction: malformed tokens are forwarded to
/// the resolver, whose own error reporting is the user-visible signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(pub String);

impl Address {
    /// Parse the token as a hexadecimal address (`0x` prefix optional)
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        let digits = self
            .0
            .strip_prefix("0x")
            .or_else(|| self.0.strip_prefix("0X"))
            .unwrap_or(&self.0);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u64::from_str_radix(digits, 16).ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(token: &str) -> Self {
        Address(token.to_string())
    }
}

/// Ordered list of backtrace addresses
///
/// Input order, duplicates and letter case are all preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList(pub Vec<Address>);

impl AddressList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.0.iter()
    }

    /// Address tokens as plain strings, e.g. for use as process arguments
    #[must_use]
    pub fn as_strs(&self) -> Vec<&str> {
        self.0.iter().map(Address::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Address> for AddressList {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        AddressList(iter.into_iter().collect())
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.as_strs().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parses_prefixed_hex() {
        assert_eq!(Address::from("0x400d1234").as_u64(), Some(0x400d_1234));
        assert_eq!(Address::from("0X40").as_u64(), Some(0x40));
    }

    #[test]
    fn test_address_parses_bare_hex() {
        assert_eq!(Address::from("deadbeef").as_u64(), Some(0xdead_beef));
    }

    #[test]
    fn test_malformed_address_is_kept_but_not_numeric() {
        let addr = Address::from("0xZZ");
        assert_eq!(addr.as_u64(), None);
        assert_eq!(addr.to_string(), "0xZZ");
        assert_eq!(Address::from("0x").as_u64(), None);
    }

    #[test]
    fn test_signed_address_is_malformed() {
        assert_eq!(Address::from("0x+400d").as_u64(), None);
        assert_eq!(Address::from("+400d").as_u64(), None);
        assert_eq!(Address::from("-1").as_u64(), None);
    }

    #[test]
    fn test_address_list_display() {
        let list: AddressList = ["0xAA", "0xBB"].into_iter().map(Address::from).collect();
        assert_eq!(list.to_string(), "[0xAA, 0xBB]");
        assert_eq!(list.as_strs(), vec!["0xAA", "0xBB"]);
    }
}
