//! Tagged address values and the facts derived from them.
//!
//! A token classifies as exactly one of: a single IP address, a CIDR
//! network block, or unparseable. Networks retain the host address as
//! written, so `10.0.0.5/24` is distinguishable from `10.0.0.0/24`.

use std::net::{IpAddr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

/// IP protocol version of a parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Version number as reported by the `version` query.
    pub fn number(self) -> u8 {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }
}

/// Classification of an input token.
///
/// Exactly one variant holds for any input; the parser never returns an
/// ambiguous result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAddress {
    /// A single IP address.
    Address(IpAddr),
    /// A CIDR network block, host bits preserved.
    Network(IpNet),
    /// The token matched neither form.
    Unparseable,
}

impl ParsedAddress {
    /// Protocol version, or `None` for unparseable input.
    pub fn version(&self) -> Option<IpVersion> {
        match self {
            ParsedAddress::Address(IpAddr::V4(_)) | ParsedAddress::Network(IpNet::V4(_)) => {
                Some(IpVersion::V4)
            }
            ParsedAddress::Address(IpAddr::V6(_)) | ParsedAddress::Network(IpNet::V6(_)) => {
                Some(IpVersion::V6)
            }
            ParsedAddress::Unparseable => None,
        }
    }
}

/// Numeric value of an address, widened to 128 bits for both families.
pub fn numeric_value(ip: &IpAddr) -> u128 {
    match ip {
        IpAddr::V4(a) => u128::from(u32::from(*a)),
        IpAddr::V6(a) => u128::from(*a),
    }
}

/// Whether the address is itself a valid netmask pattern: a contiguous
/// run of one bits followed by zeros.
pub fn is_netmask(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(a) => {
            let inv = !u32::from(*a);
            inv & inv.wrapping_add(1) == 0
        }
        IpAddr::V6(a) => {
            let inv = !u128::from(*a);
            inv & inv.wrapping_add(1) == 0
        }
    }
}

/// Whether the address is itself a valid hostmask pattern: zeros
/// followed by a contiguous run of one bits.
pub fn is_hostmask(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(a) => {
            let v = u32::from(*a);
            v & v.wrapping_add(1) == 0
        }
        IpAddr::V6(a) => {
            let v = u128::from(*a);
            v & v.wrapping_add(1) == 0
        }
    }
}

/// Whether the address is multicast (224.0.0.0/4 or ff00::/8).
pub fn is_multicast(ip: &IpAddr) -> bool {
    ip.is_multicast()
}

/// Whether the address is unicast (anything that is not multicast).
pub fn is_unicast(ip: &IpAddr) -> bool {
    !ip.is_multicast()
}

/// Whether the address belongs to a private or link-local range.
///
/// IPv4: RFC 1918 ranges plus 169.254.0.0/16. IPv6: unique-local
/// fc00::/7, link-local fe80::/10, and the deprecated site-local
/// fec0::/10.
pub fn is_private(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(a) => a.is_private() || a.is_link_local(),
        IpAddr::V6(a) => {
            let seg0 = a.segments()[0];
            (seg0 & 0xfe00) == 0xfc00
                || (seg0 & 0xffc0) == 0xfe80
                || (seg0 & 0xffc0) == 0xfec0
        }
    }
}

/// Whether the address is a loopback address (127.0.0.0/8 or ::1).
pub fn is_loopback(ip: &IpAddr) -> bool {
    ip.is_loopback()
}

/// Reverse-DNS name for the address, with the trailing root dot.
///
/// IPv4 yields the `in-addr.arpa.` form, IPv6 the nibble-reversed
/// `ip6.arpa.` form. No lookup is performed; this is pure string
/// construction.
pub fn reverse_dns(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(a) => {
            let o = a.octets();
            format!("{}.{}.{}.{}.in-addr.arpa.", o[3], o[2], o[1], o[0])
        }
        IpAddr::V6(a) => {
            let mut nibbles: Vec<String> = Vec::with_capacity(32);
            for byte in a.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", byte >> 4));
            }
            format!("{}.ip6.arpa.", nibbles.join("."))
        }
    }
}

/// IPv4-mapped IPv6 form of an IPv4 address.
pub fn to_mapped_ipv6(a: &std::net::Ipv4Addr) -> Ipv6Addr {
    a.to_ipv6_mapped()
}

/// IPv4 form of an IPv6 address, if it is an IPv4-mapped address.
///
/// Only the `::ffff:0:0/96` mapping is honored; `::1` and other
/// non-mapped values have no IPv4 form.
pub fn to_ipv4(a: &Ipv6Addr) -> Option<std::net::Ipv4Addr> {
    a.to_ipv4_mapped()
}

/// IPv4-mapped IPv6 form of an IPv4 network (prefix shifted by 96).
pub fn network_to_ipv6(net: &Ipv4Net) -> Ipv6Net {
    // prefix_len() <= 32, so the shifted prefix is always valid
    Ipv6Net::new(net.addr().to_ipv6_mapped(), net.prefix_len() + 96).unwrap()
}

/// IPv4 form of an IPv6 network, if the address is IPv4-mapped and the
/// prefix covers only the mapped range.
pub fn network_to_ipv4(net: &Ipv6Net) -> Option<Ipv4Net> {
    if net.prefix_len() < 96 {
        return None;
    }
    let v4 = net.addr().to_ipv4_mapped()?;
    Ipv4Net::new(v4, net.prefix_len() - 96).ok()
}

/// Count of addresses in the block.
///
/// The IPv6 `::/0` count does not fit in 128 bits and saturates to
/// `u128::MAX`.
pub fn network_size(net: &IpNet) -> u128 {
    match net {
        IpNet::V4(n) => 1u128 << (32 - n.prefix_len()),
        IpNet::V6(n) => {
            let host_bits = 128 - u32::from(n.prefix_len());
            if host_bits == 128 {
                u128::MAX
            } else {
                1u128 << host_bits
            }
        }
    }
}
