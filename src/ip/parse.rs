//! Address token parsing.
//!
//! Classifies raw tokens into the tagged address model. Parsing is
//! address-first: a bare address like `192.0.2.1` must classify as an
//! address, never as a /32 network, even though every address has a
//! network representation.

use std::net::IpAddr;

use ipnet::IpNet;

use crate::ip::addr::ParsedAddress;

/// Parser for IP address and network tokens.
pub struct AddressParser;

impl AddressParser {
    /// Classify a token as an address, a network, or unparseable.
    ///
    /// Never fails; malformed input (including leading or trailing
    /// whitespace) yields [`ParsedAddress::Unparseable`].
    pub fn parse(token: &str) -> ParsedAddress {
        if let Ok(addr) = token.parse::<IpAddr>() {
            return ParsedAddress::Address(addr);
        }
        if let Ok(net) = token.parse::<IpNet>() {
            return ParsedAddress::Network(net);
        }
        ParsedAddress::Unparseable
    }
}
