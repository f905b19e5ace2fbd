//! IP address and network value model.

pub mod addr;
pub mod parse;

pub use addr::{IpVersion, ParsedAddress};
pub use parse::AddressParser;
