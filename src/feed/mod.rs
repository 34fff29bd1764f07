//! Format-independent reading and writing machinery.
//!
//! - [`reader`]: pull reader that classifies and consumes one element at a time
//! - [`writer`]: streaming writer that opens the root lazily
//! - [`parser`] / [`formatter`]: the per-format conversion seams
//! - [`element`]: element kinds and the [`FeedSyntax`] description of a format
//!
//! # Example
//!
//! ```
//! use syndication::{ElementKind, RssFeedReader};
//!
//! let xml = r#"<rss version="2.0"><channel>
//!     <title>News</title>
//!     <item><title>First</title></item>
//! </channel></rss>"#;
//!
//! let mut reader = RssFeedReader::new(xml.as_bytes());
//! let mut items = 0;
//! while reader.advance()? {
//!     if reader.element_kind() == ElementKind::Item {
//!         let item = reader.read_item()?;
//!         assert_eq!(item.title.as_deref(), Some("First"));
//!         items += 1;
//!     }
//! }
//! assert_eq!(items, 1);
//! # Ok::<(), syndication::FeedError>(())
//! ```

pub mod element;
pub mod formatter;
pub mod parser;
pub mod reader;
pub mod writer;

pub use element::{ElementKind, FeedSyntax, RootElement};
pub use formatter::FeedFormatter;
pub use parser::FeedParser;
pub use reader::XmlFeedReader;
pub use writer::XmlFeedWriter;
