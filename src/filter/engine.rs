//! Query evaluation engine for IP address and network filters.
//!
//! Query resolution is a two-stage resolver: keyword lookup first, then
//! an explicit attempt to read the query as a membership network
//! literal. Anything that survives neither stage is a hard error.

use ipnet::IpNet;
use std::net::IpAddr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::membership;
use crate::filter::query::{FilterResult, Query};
use crate::ip::{addr, IpVersion, ParsedAddress};

/// Resolved form of a query token.
enum ResolvedQuery {
    /// No query was given.
    Empty,
    /// A recognized keyword.
    Keyword(Query),
    /// A network literal for a membership test.
    Membership(IpNet),
}

/// Evaluates queries against parsed address values.
pub struct QueryEngine;

impl QueryEngine {
    /// Evaluate `query` against `parsed`.
    ///
    /// `token` is the original input, echoed by queries whose answer is
    /// the input itself. `want_version` restricts the filter to one IP
    /// family; a mismatch is a soft failure. `alias` prefixes hard
    /// error messages.
    pub fn evaluate(
        token: &str,
        parsed: &ParsedAddress,
        query: &str,
        want_version: Option<IpVersion>,
        alias: &'static str,
    ) -> Result<FilterResult> {
        if matches!(parsed, ParsedAddress::Unparseable) {
            if query.is_empty() || query == "bool" {
                return Ok(FilterResult::NotApplicable);
            }
            // A membership literal never demands a parsed first value;
            // an unparseable input simply is not contained in anything.
            if Query::from_keyword(query).is_none() && membership::resolve_network(query).is_some()
            {
                return Ok(FilterResult::NotApplicable);
            }
            return Err(Error::NotAnAddress {
                alias,
                token: token.to_string(),
            });
        }

        let resolved = Self::resolve_query(query, alias)?;

        if let Some(want) = want_version {
            if parsed.version() != Some(want) {
                debug!(token, want = want.number(), "version filter mismatch");
                return Ok(FilterResult::NotApplicable);
            }
        }

        Ok(match resolved {
            ResolvedQuery::Empty => FilterResult::echo(token),
            ResolvedQuery::Membership(net) => membership::evaluate(token, parsed, &net),
            ResolvedQuery::Keyword(keyword) => Self::dispatch(token, parsed, keyword),
        })
    }

    /// Stage one: keyword lookup. Stage two: membership literal.
    fn resolve_query(query: &str, alias: &'static str) -> Result<ResolvedQuery> {
        if query.is_empty() {
            return Ok(ResolvedQuery::Empty);
        }
        if let Some(keyword) = Query::from_keyword(query) {
            return Ok(ResolvedQuery::Keyword(keyword));
        }
        if let Some(net) = membership::resolve_network(query) {
            return Ok(ResolvedQuery::Membership(net));
        }
        Err(Error::UnknownFilterType {
            alias,
            query: query.to_string(),
        })
    }

    /// The per-query behavior matrix. Only reached with a parsed value;
    /// never errors, soft failures are `NotApplicable`.
    fn dispatch(token: &str, parsed: &ParsedAddress, query: Query) -> FilterResult {
        use FilterResult::{Bool, Int, NotApplicable, Str};

        match (query, parsed) {
            (_, ParsedAddress::Unparseable) => NotApplicable,

            (Query::Type, ParsedAddress::Address(_)) => Str("address".to_string()),
            (Query::Type, ParsedAddress::Network(_)) => Str("network".to_string()),

            (Query::Bool, _) => Bool(true),

            (Query::Int, ParsedAddress::Address(ip)) => Int(addr::numeric_value(ip)),
            // A network has no single integer value
            (Query::Int, ParsedAddress::Network(_)) => NotApplicable,

            (Query::Version, _) => match parsed.version() {
                Some(v) => Int(u128::from(v.number())),
                None => NotApplicable,
            },

            (Query::Size, ParsedAddress::Address(_)) => Int(1),
            (Query::Size, ParsedAddress::Network(net)) => Int(addr::network_size(net)),

            (Query::Address, ParsedAddress::Address(_)) => FilterResult::echo(token),
            (Query::Address, ParsedAddress::Network(net)) => {
                // The host IP is only distinct when host bits are set
                if net.addr() != net.network() {
                    Str(net.addr().to_string())
                } else {
                    NotApplicable
                }
            }

            (Query::Network, ParsedAddress::Network(net)) => Str(net.network().to_string()),
            (Query::Network, ParsedAddress::Address(_)) => NotApplicable,

            (Query::Subnet, ParsedAddress::Network(net)) => Str(net.trunc().to_string()),
            (Query::Subnet, ParsedAddress::Address(_)) => NotApplicable,

            (Query::Prefix, ParsedAddress::Network(net)) => Str(net.prefix_len().to_string()),
            (Query::Prefix, ParsedAddress::Address(_)) => NotApplicable,

            (Query::Broadcast, ParsedAddress::Network(net)) => Str(net.broadcast().to_string()),
            (Query::Broadcast, ParsedAddress::Address(_)) => NotApplicable,

            (Query::Netmask, ParsedAddress::Address(ip)) => {
                if addr::is_netmask(ip) {
                    FilterResult::echo(token)
                } else {
                    NotApplicable
                }
            }
            (Query::Netmask, ParsedAddress::Network(net)) => Str(net.netmask().to_string()),

            (Query::Hostmask, ParsedAddress::Address(ip)) => {
                if addr::is_hostmask(ip) {
                    FilterResult::echo(token)
                } else {
                    NotApplicable
                }
            }
            (Query::Hostmask, ParsedAddress::Network(net)) => Str(net.hostmask().to_string()),

            (Query::Unicast, _) => Self::predicate(token, parsed, addr::is_unicast),
            (Query::Multicast, _) => Self::predicate(token, parsed, addr::is_multicast),
            (Query::Private, _) => Self::predicate(token, parsed, addr::is_private),
            (Query::Public, _) => {
                Self::predicate(token, parsed, |ip| addr::is_unicast(ip) && !addr::is_private(ip))
            }

            (Query::Loopback, ParsedAddress::Address(ip)) => {
                if addr::is_loopback(ip) {
                    FilterResult::echo(token)
                } else {
                    NotApplicable
                }
            }
            // Networks are never loopback
            (Query::Loopback, ParsedAddress::Network(_)) => NotApplicable,

            (Query::Revdns, ParsedAddress::Address(ip)) => Str(addr::reverse_dns(ip)),
            (Query::Revdns, ParsedAddress::Network(_)) => NotApplicable,

            (Query::Wrap, ParsedAddress::Address(ip)) => match ip {
                IpAddr::V6(_) => Str(format!("[{}]", ip)),
                IpAddr::V4(_) => FilterResult::echo(token),
            },
            (Query::Wrap, ParsedAddress::Network(net)) => match net {
                IpNet::V6(_) => Str(format!("[{}]/{}", net.addr(), net.prefix_len())),
                IpNet::V4(_) => FilterResult::echo(token),
            },

            (Query::Ipv6, ParsedAddress::Address(ip)) => match ip {
                IpAddr::V4(a) => Str(addr::to_mapped_ipv6(a).to_string()),
                IpAddr::V6(_) => FilterResult::echo(token),
            },
            (Query::Ipv6, ParsedAddress::Network(net)) => match net {
                IpNet::V4(n) => Str(addr::network_to_ipv6(n).to_string()),
                IpNet::V6(_) => FilterResult::echo(token),
            },

            (Query::Ipv4, ParsedAddress::Address(ip)) => match ip {
                IpAddr::V6(a) => match addr::to_ipv4(a) {
                    Some(v4) => Str(v4.to_string()),
                    None => NotApplicable,
                },
                IpAddr::V4(_) => FilterResult::echo(token),
            },
            (Query::Ipv4, ParsedAddress::Network(net)) => match net {
                IpNet::V6(n) => match addr::network_to_ipv4(n) {
                    Some(v4net) => Str(v4net.to_string()),
                    None => NotApplicable,
                },
                IpNet::V4(_) => FilterResult::echo(token),
            },
        }
    }

    /// Apply an address predicate to either variant; networks are tested
    /// on their host IP.
    fn predicate<F>(token: &str, parsed: &ParsedAddress, holds: F) -> FilterResult
    where
        F: Fn(&IpAddr) -> bool,
    {
        let ip = match parsed {
            ParsedAddress::Address(ip) => *ip,
            ParsedAddress::Network(net) => net.addr(),
            ParsedAddress::Unparseable => return FilterResult::NotApplicable,
        };
        if holds(&ip) {
            FilterResult::echo(token)
        } else {
            FilterResult::NotApplicable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::AddressParser;

    fn query(token: &str, q: &str) -> Result<FilterResult> {
        let parsed = AddressParser::parse(token);
        QueryEngine::evaluate(token, &parsed, q, None, "ipaddr")
    }

    fn ok(token: &str, q: &str) -> FilterResult {
        query(token, q).unwrap()
    }

    fn s(v: &str) -> FilterResult {
        FilterResult::Str(v.to_string())
    }

    #[test]
    fn test_empty_query_echoes() {
        assert_eq!(ok("192.0.2.1", ""), s("192.0.2.1"));
        assert_eq!(ok("192.0.2.0/24", ""), s("192.0.2.0/24"));
        assert_eq!(ok("not-an-ip", ""), FilterResult::NotApplicable);
    }

    #[test]
    fn test_type() {
        assert_eq!(ok("192.0.2.1", "type"), s("address"));
        assert_eq!(ok("2001:db8::1", "type"), s("address"));
        assert_eq!(ok("192.0.2.0/24", "type"), s("network"));
        assert_eq!(ok("2001:db8::/32", "type"), s("network"));
    }

    #[test]
    fn test_bool() {
        assert_eq!(ok("192.0.2.1", "bool"), FilterResult::Bool(true));
        assert_eq!(ok("2001:db8::/32", "bool"), FilterResult::Bool(true));
        assert_eq!(ok("not-an-ip", "bool"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_int() {
        assert_eq!(ok("0.0.0.1", "int"), FilterResult::Int(1));
        assert_eq!(ok("192.0.2.1", "int"), FilterResult::Int(0xC0000201));
        assert_eq!(ok("::1", "int"), FilterResult::Int(1));
        // Networks have no single integer value
        assert_eq!(ok("192.0.2.0/24", "int"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_version() {
        assert_eq!(ok("192.0.2.1", "version"), FilterResult::Int(4));
        assert_eq!(ok("2001:db8::1", "version"), FilterResult::Int(6));
        assert_eq!(ok("10.0.0.0/8", "version"), FilterResult::Int(4));
        assert_eq!(ok("2001:db8::/32", "version"), FilterResult::Int(6));
    }

    #[test]
    fn test_size() {
        assert_eq!(ok("192.0.2.1", "size"), FilterResult::Int(1));
        assert_eq!(ok("10.0.0.0/24", "size"), FilterResult::Int(256));
        assert_eq!(ok("2001:db8::/32", "size"), FilterResult::Int(1u128 << 96));
    }

    #[test]
    fn test_address_host_ip() {
        // Single addresses echo the token, for all three aliases
        assert_eq!(ok("192.0.2.1", "address"), s("192.0.2.1"));
        assert_eq!(ok("192.0.2.1", "ip"), s("192.0.2.1"));
        assert_eq!(ok("192.0.2.1", "host"), s("192.0.2.1"));

        // Networks yield the host IP only when host bits are set
        assert_eq!(ok("192.0.2.5/24", "address"), s("192.0.2.5"));
        assert_eq!(ok("192.0.2.0/24", "address"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_network_subnet_prefix() {
        assert_eq!(ok("192.0.2.5/24", "network"), s("192.0.2.0"));
        assert_eq!(ok("192.0.2.5/24", "subnet"), s("192.0.2.0/24"));
        assert_eq!(ok("192.0.2.5/24", "prefix"), s("24"));
        assert_eq!(ok("192.0.2.1", "network"), FilterResult::NotApplicable);
        assert_eq!(ok("192.0.2.1", "subnet"), FilterResult::NotApplicable);
        assert_eq!(ok("192.0.2.1", "prefix"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_broadcast() {
        assert_eq!(ok("192.0.2.0/24", "broadcast"), s("192.0.2.255"));
        assert_eq!(ok("10.0.0.0/8", "broadcast"), s("10.255.255.255"));
        // IPv6 has no broadcast; this is the derived last address
        assert_eq!(
            ok("2001:db8::/32", "broadcast"),
            s("2001:db8:ffff:ffff:ffff:ffff:ffff:ffff")
        );
        assert_eq!(ok("192.0.2.1", "broadcast"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_netmask() {
        assert_eq!(ok("192.0.2.0/24", "netmask"), s("255.255.255.0"));
        // An address that is itself a netmask pattern echoes
        assert_eq!(ok("255.255.255.0", "netmask"), s("255.255.255.0"));
        assert_eq!(ok("192.0.2.1", "netmask"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_hostmask() {
        assert_eq!(ok("192.0.2.0/24", "hostmask"), s("0.0.0.255"));
        assert_eq!(ok("0.0.0.255", "hostmask"), s("0.0.0.255"));
        assert_eq!(ok("192.0.2.1", "hostmask"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_unicast_multicast() {
        assert_eq!(ok("192.0.2.1", "unicast"), s("192.0.2.1"));
        assert_eq!(ok("224.0.0.251", "unicast"), FilterResult::NotApplicable);
        assert_eq!(ok("224.0.0.251", "multicast"), s("224.0.0.251"));
        assert_eq!(ok("192.0.2.1", "multicast"), FilterResult::NotApplicable);
        // Predicates apply to networks too
        assert_eq!(ok("224.0.0.0/4", "multicast"), s("224.0.0.0/4"));
        assert_eq!(ok("ff00::/8", "multicast"), s("ff00::/8"));
    }

    #[test]
    fn test_private_public() {
        assert_eq!(ok("10.0.0.1", "private"), s("10.0.0.1"));
        assert_eq!(ok("8.8.8.8", "private"), FilterResult::NotApplicable);
        assert_eq!(ok("8.8.8.8", "public"), s("8.8.8.8"));
        assert_eq!(ok("10.0.0.1", "public"), FilterResult::NotApplicable);
        // Multicast is not public either
        assert_eq!(ok("224.0.0.251", "public"), FilterResult::NotApplicable);
        assert_eq!(ok("192.168.0.0/16", "private"), s("192.168.0.0/16"));
    }

    #[test]
    fn test_loopback() {
        assert_eq!(ok("127.0.0.1", "loopback"), s("127.0.0.1"));
        assert_eq!(ok("127.0.0.1", "lo"), s("127.0.0.1"));
        assert_eq!(ok("::1", "loopback"), s("::1"));
        assert_eq!(ok("192.0.2.1", "loopback"), FilterResult::NotApplicable);
        // Networks are never loopback
        assert_eq!(ok("127.0.0.0/8", "loopback"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_revdns() {
        assert_eq!(ok("192.0.2.1", "revdns"), s("1.2.0.192.in-addr.arpa."));
        assert_eq!(ok("192.0.2.0/24", "revdns"), FilterResult::NotApplicable);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(ok("2001:db8::1", "wrap"), s("[2001:db8::1]"));
        assert_eq!(ok("2001:db8::5/32", "wrap"), s("[2001:db8::5]/32"));
        // IPv4 passes through unchanged
        assert_eq!(ok("192.0.2.1", "wrap"), s("192.0.2.1"));
        assert_eq!(ok("192.0.2.0/24", "wrap"), s("192.0.2.0/24"));
    }

    #[test]
    fn test_ipv6_conversion() {
        assert_eq!(ok("8.8.8.8", "ipv6"), s("::ffff:8.8.8.8"));
        assert_eq!(ok("8.8.8.8", "v6"), s("::ffff:8.8.8.8"));
        assert_eq!(ok("192.0.2.0/24", "ipv6"), s("::ffff:192.0.2.0/120"));
        // Already v6: pass through
        assert_eq!(ok("2001:db8::1", "ipv6"), s("2001:db8::1"));
    }

    #[test]
    fn test_ipv4_conversion() {
        assert_eq!(ok("::ffff:1.2.3.4", "ipv4"), s("1.2.3.4"));
        // Loopback has no IPv4 mapping
        assert_eq!(ok("::1", "ipv4"), FilterResult::NotApplicable);
        assert_eq!(ok("2001:db8::1", "ipv4"), FilterResult::NotApplicable);
        assert_eq!(ok("2001:db8::/32", "ipv4"), FilterResult::NotApplicable);
        // Already v4: pass through
        assert_eq!(ok("192.0.2.1", "ipv4"), s("192.0.2.1"));
        assert_eq!(ok("192.0.2.1", "v4"), s("192.0.2.1"));
    }

    #[test]
    fn test_membership_fallback() {
        assert_eq!(ok("192.0.2.5", "192.0.2.0/24"), s("192.0.2.5"));
        assert_eq!(ok("10.0.0.1", "192.0.2.0/24"), FilterResult::NotApplicable);
        // Network-in-network is not evaluated
        assert_eq!(
            ok("192.0.2.0/24", "192.0.2.0/24"),
            FilterResult::NotApplicable
        );
    }

    #[test]
    fn test_unknown_query_is_hard_error() {
        let err = query("192.0.2.1", "frobnicate").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownFilterType {
                alias: "ipaddr",
                query: "frobnicate".to_string(),
            }
        );
        assert!(err.to_string().contains("frobnicate"));
        // A bare address is not a membership literal, so it is unknown
        assert!(query("192.0.2.1", "10.0.0.1").is_err());
    }

    #[test]
    fn test_unparseable_input() {
        assert_eq!(ok("hello", ""), FilterResult::NotApplicable);
        assert_eq!(ok("hello", "bool"), FilterResult::NotApplicable);
        // Membership literals do not demand a parsed value
        assert_eq!(ok("hello", "192.0.2.0/24"), FilterResult::NotApplicable);
        // Any other query does
        let err = query("hello", "int").unwrap_err();
        assert_eq!(
            err,
            Error::NotAnAddress {
                alias: "ipaddr",
                token: "hello".to_string(),
            }
        );
        assert!(query("hello", "frobnicate").is_err());
    }

    #[test]
    fn test_version_filter() {
        let eval = |token: &str, q: &str, want: IpVersion| {
            let parsed = AddressParser::parse(token);
            QueryEngine::evaluate(token, &parsed, q, Some(want), "ipv4")
        };

        // Mismatches are soft failures for empty, keyword, and
        // membership queries alike
        assert_eq!(
            eval("2001:db8::1", "", IpVersion::V4).unwrap(),
            FilterResult::NotApplicable
        );
        assert_eq!(
            eval("2001:db8::1", "type", IpVersion::V4).unwrap(),
            FilterResult::NotApplicable
        );
        assert_eq!(
            eval("2001:db8::1", "2001:db8::/32", IpVersion::V4).unwrap(),
            FilterResult::NotApplicable
        );

        // Matching version evaluates normally
        assert_eq!(
            eval("192.0.2.1", "type", IpVersion::V4).unwrap(),
            FilterResult::Str("address".to_string())
        );
        assert_eq!(
            eval("2001:db8::1", "type", IpVersion::V6).unwrap(),
            FilterResult::Str("address".to_string())
        );

        // Unknown queries stay hard errors regardless of version
        assert!(eval("2001:db8::1", "frobnicate", IpVersion::V4).is_err());
    }

    #[test]
    fn test_netmask_idempotence() {
        // A non-false netmask answer reparses as a valid value
        let FilterResult::Str(mask) = ok("10.0.0.0/24", "netmask") else {
            panic!("expected a string netmask");
        };
        assert_eq!(ok(&mask, "bool"), FilterResult::Bool(true));
        assert_eq!(ok(&mask, "netmask"), s("255.255.255.0"));
    }
}
