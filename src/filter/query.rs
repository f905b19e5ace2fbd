//! Query keywords and the filter result model.

use std::fmt;

use serde::{Serialize, Serializer};

/// Recognized query keywords.
///
/// [`Query::from_keyword`] is the single source of truth for the keyword
/// vocabulary; anything it rejects is treated as a candidate membership
/// literal by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Type,
    Bool,
    Int,
    Version,
    Size,
    /// `address`, `ip`, or `host`.
    Address,
    Network,
    Subnet,
    Prefix,
    Broadcast,
    Netmask,
    Hostmask,
    Unicast,
    Multicast,
    Private,
    Public,
    /// `loopback` or `lo`.
    Loopback,
    Revdns,
    Wrap,
    /// `ipv6` or `v6`.
    Ipv6,
    /// `ipv4` or `v4`.
    Ipv4,
}

impl Query {
    /// Look up a query keyword, including its aliases.
    pub fn from_keyword(query: &str) -> Option<Query> {
        match query {
            "type" => Some(Query::Type),
            "bool" => Some(Query::Bool),
            "int" => Some(Query::Int),
            "version" => Some(Query::Version),
            "size" => Some(Query::Size),
            "address" | "ip" | "host" => Some(Query::Address),
            "network" => Some(Query::Network),
            "subnet" => Some(Query::Subnet),
            "prefix" => Some(Query::Prefix),
            "broadcast" => Some(Query::Broadcast),
            "netmask" => Some(Query::Netmask),
            "hostmask" => Some(Query::Hostmask),
            "unicast" => Some(Query::Unicast),
            "multicast" => Some(Query::Multicast),
            "private" => Some(Query::Private),
            "public" => Some(Query::Public),
            "loopback" | "lo" => Some(Query::Loopback),
            "revdns" => Some(Query::Revdns),
            "wrap" => Some(Query::Wrap),
            "ipv6" | "v6" => Some(Query::Ipv6),
            "ipv4" | "v4" => Some(Query::Ipv4),
            _ => None,
        }
    }
}

/// Outcome of a filter evaluation.
///
/// Soft failure is a first-class variant: [`FilterResult::NotApplicable`]
/// means the query does not apply to this input's type or the predicate
/// does not hold. It renders and serializes as boolean `false`, but is
/// distinct from a query that genuinely produced `false`. Hard errors
/// travel separately as [`crate::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    /// A string value; echoes of the original token are also strings.
    Str(String),
    /// An integer value, wide enough for a full IPv6 address.
    Int(u128),
    /// A boolean value (the `bool` query).
    Bool(bool),
    /// Query not applicable to this input; rendered as `false`.
    NotApplicable,
}

impl FilterResult {
    /// Echo the original input token as a string value.
    pub fn echo(token: &str) -> FilterResult {
        FilterResult::Str(token.to_string())
    }

    /// Whether the evaluation produced a usable value.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, FilterResult::NotApplicable)
    }
}

impl fmt::Display for FilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterResult::Str(v) => write!(f, "{}", v),
            FilterResult::Int(v) => write!(f, "{}", v),
            FilterResult::Bool(v) => write!(f, "{}", v),
            FilterResult::NotApplicable => write!(f, "false"),
        }
    }
}

impl Serialize for FilterResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FilterResult::Str(v) => serializer.serialize_str(v),
            FilterResult::Int(v) => serializer.serialize_u128(*v),
            FilterResult::Bool(v) => serializer.serialize_bool(*v),
            FilterResult::NotApplicable => serializer.serialize_bool(false),
        }
    }
}
