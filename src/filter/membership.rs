//! Membership-literal resolution for non-keyword queries.
//!
//! When a query is not a recognized keyword, the engine tries it as a
//! second address literal: a network to test the first value against.

use ipnet::IpNet;
use tracing::debug;

use crate::filter::query::FilterResult;
use crate::ip::{AddressParser, ParsedAddress};

/// Try to resolve a query token as a network literal.
///
/// Only tokens that classify as a network qualify; a bare address
/// literal is not a membership query.
pub fn resolve_network(query: &str) -> Option<IpNet> {
    match AddressParser::parse(query) {
        ParsedAddress::Network(net) => Some(net),
        _ => None,
    }
}

/// Containment test against a resolved network.
///
/// Echoes the original token iff the parsed value is a single address
/// contained in `net`. Network inputs never match, even when the block
/// is fully contained; network-in-network containment is deliberately
/// not evaluated by this path.
pub fn evaluate(token: &str, parsed: &ParsedAddress, net: &IpNet) -> FilterResult {
    match parsed {
        ParsedAddress::Address(ip) if net.contains(ip) => {
            debug!(token, network = %net, "membership matched");
            FilterResult::echo(token)
        }
        _ => FilterResult::NotApplicable,
    }
}
