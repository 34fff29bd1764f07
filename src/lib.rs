//! Incremental RSS 2.0 and Atom 1.0 reading and writing.
//!
//! Both formats go through the same generic content tree,
//! [`SyndicationContent`]. A reader walks the feed one element at a time
//! and converts the current element into a tree, then into a typed object
//! ([`SyndicationItem`], [`SyndicationLink`], ...). A writer runs the same
//! pipeline in reverse and streams each element as soon as it is written.
//!
//! # Example
//!
//! ```
//! use syndication::{AtomEntry, AtomFeedWriter, SyndicationLink, SyndicationPerson, WriterConfig};
//!
//! let config = WriterConfig { xml_declaration: false, ..WriterConfig::default() };
//! let mut writer = AtomFeedWriter::with_config(Vec::new(), Vec::new(), config);
//! writer.write_title("Example Feed")?;
//!
//! let mut entry = AtomEntry::new();
//! entry.id = Some("urn:uuid:1".into());
//! entry.title = Some("Hello".into());
//! entry.last_updated = chrono::DateTime::parse_from_rfc3339("2017-07-06T20:25:00Z").ok();
//! entry.add_contributor(SyndicationPerson::new(Some("John Doe"), None)?);
//! entry.add_link(SyndicationLink::new("http://example.com/hello"));
//! writer.write_item(&entry)?;
//!
//! let xml = String::from_utf8(writer.finish()?).unwrap();
//! assert!(xml.starts_with(r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>Example Feed</title><entry>"#));
//! # Ok::<(), syndication::FeedError>(())
//! ```

pub mod atom;
pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod rss;
pub mod util;
pub(crate) mod xml;

pub use atom::{Atom, AtomFeedReader, AtomFeedWriter, AtomFormatter, AtomParser};
pub use config::{Config, ConfigError, ReaderConfig, WriterConfig};
pub use error::{FeedError, FeedResult};
pub use feed::{
    ElementKind, FeedFormatter, FeedParser, FeedSyntax, RootElement, XmlFeedReader, XmlFeedWriter,
};
pub use model::{
    AtomEntry, DateStyle, FeedValue, SyndicationAttribute, SyndicationCategory,
    SyndicationContent, SyndicationImage, SyndicationItem, SyndicationLink, SyndicationPerson,
};
pub use rss::{Rss, RssFeedReader, RssFeedWriter, RssFormatter, RssParser};
