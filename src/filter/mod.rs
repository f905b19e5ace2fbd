//! IP address filter entry points and query dispatch.

pub mod engine;
pub mod membership;
pub mod query;

pub use engine::QueryEngine;
pub use query::{FilterResult, Query};

use crate::error::Result;
use crate::ip::{AddressParser, IpVersion};

/// Classify `value` and answer `query` about it.
///
/// The general entry point: both IP families are accepted.
pub fn ipaddr(value: &str, query: &str) -> Result<FilterResult> {
    ip_filter(value, query, None, "ipaddr")
}

/// Like [`ipaddr`], restricted to IPv4 values.
pub fn ipv4(value: &str, query: &str) -> Result<FilterResult> {
    ip_filter(value, query, Some(IpVersion::V4), "ipv4")
}

/// Like [`ipaddr`], restricted to IPv6 values.
pub fn ipv6(value: &str, query: &str) -> Result<FilterResult> {
    ip_filter(value, query, Some(IpVersion::V6), "ipv6")
}

/// Backing implementation for the IP filter family.
///
/// `alias` names the invoking filter in hard error messages.
pub fn ip_filter(
    value: &str,
    query: &str,
    version: Option<IpVersion>,
    alias: &'static str,
) -> Result<FilterResult> {
    let parsed = AddressParser::parse(value);
    QueryEngine::evaluate(value, &parsed, query, version, alias)
}
