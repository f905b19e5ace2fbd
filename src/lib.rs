//! addr-filter - query-driven address classification filters.
//!
//! This library classifies a textual token as an IP address, a CIDR
//! network block, or a 48-bit hardware address, and answers a fixed set
//! of queries about it: its type, numeric value, network portion,
//! netmask, broadcast address, reverse-DNS form, dialect-formatted MAC
//! string, membership in another network, and so on.
//!
//! Results are three-way: a value, a soft "not applicable" (rendered as
//! `false`), or a hard error for malformed input given a query that
//! demands validity. All evaluation is pure computation over the input
//! token; nothing is resolved, probed, or cached.

pub mod error;
pub mod filter;
pub mod hw;
pub mod ip;

pub use error::{Error, Result};
pub use filter::{ip_filter, ipaddr, ipv4, ipv6, FilterResult, Query, QueryEngine};
pub use hw::{hw_filter, hwaddr, macaddr, Dialect, HwAddr};
pub use ip::{AddressParser, IpVersion, ParsedAddress};

/// Package name.
pub const PACKAGE: &str = "addr-filter";
