//! Data-driven hardware address rendering dialects.
//!
//! A dialect is a descriptor (group width, separator, case, padding)
//! consumed by one generic renderer. Adding a dialect means adding a
//! descriptor, not a formatter.

use crate::hw::addr::HwAddr;

/// A textual rendering convention for a hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Bytes per output group.
    pub group_bytes: usize,
    /// Separator between groups, if any.
    pub separator: Option<char>,
    /// Render hex digits in uppercase.
    pub uppercase: bool,
    /// Zero-pad single-byte groups to two digits.
    pub zero_pad: bool,
}

/// Standard EUI-48: colon-separated uppercase pairs (`win`, `eui48`).
pub const EUI48: Dialect = Dialect {
    group_bytes: 1,
    separator: Some(':'),
    uppercase: true,
    zero_pad: true,
};

/// Unix convention: hyphen-separated lowercase pairs, no zero padding.
pub const UNIX: Dialect = Dialect {
    group_bytes: 1,
    separator: Some('-'),
    uppercase: false,
    zero_pad: false,
};

/// PostgreSQL macaddr form: colon-separated two-byte groups.
pub const PGSQL: Dialect = Dialect {
    group_bytes: 2,
    separator: Some(':'),
    uppercase: false,
    zero_pad: true,
};

/// Cisco triplet form: dot-separated two-byte groups.
pub const CISCO: Dialect = Dialect {
    group_bytes: 2,
    separator: Some('.'),
    uppercase: false,
    zero_pad: true,
};

/// Twelve contiguous hex digits, no separators.
pub const BARE: Dialect = Dialect {
    group_bytes: 6,
    separator: None,
    uppercase: true,
    zero_pad: true,
};

/// Like [`UNIX`] but with every byte zero-padded to two digits.
pub const LINUX: Dialect = Dialect {
    group_bytes: 1,
    separator: Some('-'),
    uppercase: false,
    zero_pad: true,
};

impl Dialect {
    /// Look up a dialect by query keyword, including aliases.
    pub fn from_keyword(query: &str) -> Option<&'static Dialect> {
        match query {
            "win" | "eui48" => Some(&EUI48),
            "unix" => Some(&UNIX),
            "pgsql" | "postgresql" | "psql" => Some(&PGSQL),
            "cisco" => Some(&CISCO),
            "bare" => Some(&BARE),
            "linux" => Some(&LINUX),
            _ => None,
        }
    }
}

/// Render a hardware address in the given dialect.
///
/// Pure function: the address carries no rendering state, so formatting
/// is reentrant by construction.
pub fn render(mac: &HwAddr, dialect: &Dialect) -> String {
    let octets = mac.octets();
    let groups: Vec<String> = octets
        .chunks(dialect.group_bytes)
        .map(|chunk| {
            let mut group = String::new();
            for byte in chunk {
                if dialect.zero_pad || chunk.len() > 1 {
                    group.push_str(&format!("{:02x}", byte));
                } else {
                    group.push_str(&format!("{:x}", byte));
                }
            }
            group
        })
        .collect();

    let joined = match dialect.separator {
        Some(sep) => groups.join(&sep.to_string()),
        None => groups.concat(),
    };

    if dialect.uppercase {
        joined.to_uppercase()
    } else {
        joined
    }
}
