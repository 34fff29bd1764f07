//! Format-independent feed data.
//!
//! - [`SyndicationContent`] / [`SyndicationAttribute`]: the generic content
//!   tree every element passes through on its way in or out
//! - [`SyndicationItem`], [`AtomEntry`], [`SyndicationLink`],
//!   [`SyndicationPerson`], [`SyndicationCategory`], [`SyndicationImage`]:
//!   the typed domain objects parsers produce and formatters consume
//! - [`FeedValue`]: scalar conversions for `read_value` / `write_value`

mod category;
mod content;
mod item;
mod link;
mod person;
mod value;

pub use category::{SyndicationCategory, SyndicationImage};
pub use content::{SyndicationAttribute, SyndicationContent};
pub use item::{AtomEntry, SyndicationItem};
pub use link::SyndicationLink;
pub use person::SyndicationPerson;
pub use value::{DateStyle, FeedValue};
