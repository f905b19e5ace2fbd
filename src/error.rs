//! Error types for addr-filter.

use thiserror::Error;

/// Hard errors raised when a filter is given input it cannot work with.
///
/// Every message is prefixed with the alias the caller invoked (`ipaddr`,
/// `ipv4`, `ipv6`, `hwaddr`, `macaddr`) so the offending call site is
/// identifiable from the message alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value is not an IP address or network, but the query demands one.
    #[error("{alias}: not an IP address or network: {token}")]
    NotAnAddress { alias: &'static str, token: String },

    /// The value is not a hardware address, but the query demands one.
    #[error("{alias}: not a hardware address: {token}")]
    NotAHardwareAddress { alias: &'static str, token: String },

    /// The query is not a recognized keyword and does not parse as a
    /// network literal.
    #[error("{alias}: unknown filter type: {query}")]
    UnknownFilterType { alias: &'static str, query: String },
}

/// Result type alias for addr-filter operations.
pub type Result<T> = std::result::Result<T, Error>;
