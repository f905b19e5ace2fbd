//! 48-bit hardware (MAC) address parsing.

use std::fmt;

/// A 48-bit hardware address.
///
/// Equality and validity are independent of any textual rendering;
/// formatting is a separate concern handled by
/// [`crate::hw::dialect::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HwAddr(pub [u8; 6]);

impl HwAddr {
    /// Create a hardware address from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Parse a token in any of the common notations.
    ///
    /// Accepted forms: six groups of one or two hex digits separated by
    /// `:` or `-`, three groups of up to four hex digits separated by
    /// `:`, `-`, or `.`, and bare twelve-digit hex. Anything else
    /// yields `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let sep = token.chars().find(|c| matches!(c, ':' | '-' | '.'));
        let Some(sep) = sep else {
            return Self::parse_bare(token);
        };

        let groups: Vec<&str> = token.split(sep).collect();
        match groups.len() {
            6 => {
                let mut bytes = [0u8; 6];
                for (i, group) in groups.iter().enumerate() {
                    if !Self::is_hex_group(group, 2) {
                        return None;
                    }
                    bytes[i] = u8::from_str_radix(group, 16).ok()?;
                }
                Some(Self(bytes))
            }
            3 => {
                let mut bytes = [0u8; 6];
                for (i, group) in groups.iter().enumerate() {
                    if !Self::is_hex_group(group, 4) {
                        return None;
                    }
                    let word = u16::from_str_radix(group, 16).ok()?;
                    bytes[i * 2] = (word >> 8) as u8;
                    bytes[i * 2 + 1] = word as u8;
                }
                Some(Self(bytes))
            }
            _ => None,
        }
    }

    /// The six raw octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    fn parse_bare(token: &str) -> Option<Self> {
        if token.len() != 12 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&token[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }

    fn is_hex_group(group: &str, max_len: usize) -> bool {
        !group.is_empty()
            && group.len() <= max_len
            && group.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for HwAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}
