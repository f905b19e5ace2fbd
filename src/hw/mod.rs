//! Hardware (MAC) address filter entry points.

pub mod addr;
pub mod dialect;

pub use addr::HwAddr;
pub use dialect::Dialect;

use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::FilterResult;

/// Classify `value` as a hardware address and answer `query` about it.
pub fn hwaddr(value: &str, query: &str) -> Result<FilterResult> {
    hw_filter(value, query, "hwaddr")
}

/// Alias of [`hwaddr`] with its own error-message prefix.
pub fn macaddr(value: &str, query: &str) -> Result<FilterResult> {
    hw_filter(value, query, "macaddr")
}

/// Backing implementation for the hardware filter family.
pub fn hw_filter(value: &str, query: &str, alias: &'static str) -> Result<FilterResult> {
    let Some(mac) = HwAddr::parse(value) else {
        if query.is_empty() || query == "bool" {
            return Ok(FilterResult::NotApplicable);
        }
        return Err(Error::NotAHardwareAddress {
            alias,
            token: value.to_string(),
        });
    };

    if query.is_empty() {
        return Ok(FilterResult::echo(value));
    }
    if query == "bool" {
        return Ok(FilterResult::Bool(true));
    }

    match Dialect::from_keyword(query) {
        Some(d) => {
            debug!(value, query, "rendering hardware address");
            Ok(FilterResult::Str(dialect::render(&mac, d)))
        }
        None => Err(Error::UnknownFilterType {
            alias,
            query: query.to_string(),
        }),
    }
}
