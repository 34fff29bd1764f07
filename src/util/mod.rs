//! Utility modules for dates and URIs.
//!
//! - [`date`]: RFC 822 / RFC 3339 parsing and canonical formatting
//! - [`uri`]: lenient URI acceptance for feed links

pub mod date;
pub mod uri;

pub use date::{format_rfc3339, format_rfc822, parse_date, try_parse_date};
pub use uri::{parse_uri, require_absolute, UriError};
