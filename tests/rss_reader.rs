//! Integration tests for reading RSS 2.0 documents element by element.
//!
//! The fixtures under `tests/fixtures/` are real-world shaped feeds; each
//! test walks one of them with a fresh reader.

use std::fs::File;
use std::io::BufReader;

use pretty_assertions::assert_eq;
use syndication::{ElementKind, FeedError, RssFeedReader};

/// Set `RUST_LOG=syndication=trace` to see element classification.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn open(name: &str) -> RssFeedReader<BufReader<File>> {
    init_tracing();
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    RssFeedReader::new(BufReader::new(File::open(path).unwrap()))
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_count_items() {
    let mut reader = open("rss20.xml");
    let mut items = 0;
    while reader.advance().unwrap() {
        if reader.element_kind() == ElementKind::Item {
            items += 1;
        }
    }
    assert_eq!(items, 10);
}

#[test]
fn test_read_sequential_content() {
    let mut reader = open("rss20.xml");
    assert!(reader.advance().unwrap());

    let title = reader.read_content().unwrap();
    assert_eq!(title.name, "title");
    let description = reader.read_content().unwrap();
    assert_eq!(description.name, "description");
    let link = reader.read_content().unwrap();
    assert_eq!(link.name, "link");
    assert_eq!(link.value.as_deref(), Some("http://example.com/"));
}

#[test]
fn test_read_every_kind() {
    let mut reader = open("rss20.xml");
    let mut seen = Vec::new();
    while reader.advance().unwrap() {
        let kind = reader.element_kind();
        match kind {
            ElementKind::Link => {
                reader.read_link().unwrap();
            }
            ElementKind::Item => {
                reader.read_item().unwrap();
            }
            ElementKind::Person => {
                reader.read_person().unwrap();
            }
            ElementKind::Image => {
                reader.read_image().unwrap();
            }
            ElementKind::Category => {
                reader.read_category().unwrap();
            }
            _ => {
                reader.read_content().unwrap();
            }
        }
        seen.push(kind);
    }
    assert_eq!(seen.iter().filter(|k| **k == ElementKind::Item).count(), 10);
    assert_eq!(seen.iter().filter(|k| **k == ElementKind::Link).count(), 1);
}

#[test]
fn test_item_as_content_keeps_field_order() {
    let mut reader = open("rss20.xml");
    while reader.advance().unwrap() {
        if reader.element_kind() != ElementKind::Item {
            continue;
        }
        let content = reader.read_content().unwrap();
        let names: Vec<&str> = content.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            &names[..6],
            &["title", "description", "link", "guid", "creator", "pubDate"]
        );
        assert_eq!(content.fields[3].attributes.len(), 1);
        assert_eq!(
            content.fields[4].namespace.as_deref(),
            Some("http://purl.org/dc/elements/1.1/")
        );
        assert!(content.fields.iter().all(|f| f.value.is_some()));
    }
}

#[test]
fn test_skip_lands_on_next_sibling() {
    let mut reader = open("rss20_2items.xml");
    while reader.advance().unwrap() {
        if reader.element_name() == Some("image") {
            break;
        }
    }
    assert!(reader.skip().unwrap());
    assert_eq!(reader.element_name(), Some("generator"));
    assert_eq!(reader.read_content().unwrap().value.as_deref(), Some("RSS for Node"));
}

// ============================================================================
// Typed reads
// ============================================================================

#[test]
fn test_read_feed_elements() {
    let mut reader = open("rss20_2items.xml");
    let mut items = 0;
    let mut people = 0;
    let mut links = 0;

    while reader.advance().unwrap() {
        match reader.element_kind() {
            ElementKind::Person => {
                let person = reader.read_person().unwrap();
                assert_eq!(person.email.as_deref(), Some("John Smith"));
                people += 1;
            }
            ElementKind::Link => {
                let link = reader.read_link().unwrap();
                assert_eq!(link.length, 123);
                assert_eq!(link.media_type.as_deref(), Some("testType"));
                assert_eq!(link.uri, "http://example.com/");
                links += 1;
            }
            ElementKind::Image => {
                let image = reader.read_image().unwrap();
                assert_eq!(image.title.as_deref(), Some("Microsoft News"));
                assert_eq!(image.description.as_deref(), Some("Test description"));
                assert_eq!(
                    image.url,
                    "http://2.bp.blogspot.com/-NA5Jb-64eUg/URx8CSdcj_I/AAAAAAAAAUo/eCx0irI0rq0/s1600/bg_Microsoft_logo3-20120824073001907469-620x349.jpg"
                );
            }
            ElementKind::Item => {
                items += 1;
                let item = reader.read_item().unwrap();
                let (title, description) = match items {
                    1 => (
                        "Lorem ipsum 2017-07-06T20:25:00+00:00",
                        "Exercitation sit dolore mollit et est eiusmod veniam aute officia veniam ipsum.",
                    ),
                    _ => (
                        "Lorem ipsum 2017-07-06T20:24:00+00:00",
                        "Do ipsum dolore veniam minim est cillum aliqua ea.",
                    ),
                };
                assert_eq!(item.title.as_deref(), Some(title));
                assert_eq!(item.description.as_deref(), Some(description));
                assert_eq!(item.links.len(), 3);
            }
            _ => {}
        }
    }

    assert_eq!(items, 2);
    assert_eq!(people, 1);
    assert_eq!(links, 1);
}

#[test]
fn test_read_categories() {
    let mut reader = open("rss20.xml");
    let mut item_categories = 0;
    while reader.advance().unwrap() {
        match reader.element_kind() {
            ElementKind::Category => {
                let category = reader.read_category().unwrap();
                assert_eq!(category.name, "Newspapers");
                assert_eq!(category.scheme.as_deref(), Some("http://example.com/news"));
            }
            ElementKind::Item => {
                for category in reader.read_item().unwrap().categories {
                    assert_eq!(category.name, "Newspapers");
                    assert!(matches!(
                        category.scheme.as_deref(),
                        None | Some("http://example.com/news/item")
                    ));
                    item_categories += 1;
                }
            }
            _ => {}
        }
    }
    assert_eq!(item_categories, 10);
}

#[test]
fn test_read_values() {
    let mut reader = open("rss20.xml");
    while reader.advance().unwrap() {
        match reader.element_name() {
            Some("ttl") => assert_eq!(reader.read_value::<u32>().unwrap(), 60),
            Some("lastBuildDate") => {
                let date = reader
                    .read_value::<chrono::DateTime<chrono::FixedOffset>>()
                    .unwrap();
                assert_eq!(date.to_rfc3339(), "2017-07-06T20:25:17+00:00");
            }
            Some("title") => {
                assert!(matches!(
                    reader.read_value::<u32>(),
                    Err(FeedError::Format(_))
                ));
            }
            _ => {}
        }
    }
}

#[test]
fn test_element_as_string_carries_namespaces() {
    let mut reader = open("rss20.xml");
    while reader.advance().unwrap() {
        if reader.element_kind() == ElementKind::Item {
            break;
        }
    }
    let xml = reader.read_element_as_string().unwrap();
    assert!(xml.starts_with("<item"), "{xml}");
    assert!(
        xml.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#),
        "{xml}"
    );
    assert_eq!(reader.element_kind(), ElementKind::Item);
}

#[test]
fn test_read_empty_elements_as_values() {
    let xml = r#"<rss version="2.0"><channel>
        <docs/>
        <description></description>
        <ttl/>
    </channel></rss>"#;
    let mut reader = RssFeedReader::new(xml.as_bytes());

    assert!(reader.advance().unwrap());
    assert_eq!(reader.element_name(), Some("docs"));
    assert_eq!(reader.read_value::<String>().unwrap(), "");

    assert!(reader.advance().unwrap());
    assert_eq!(reader.element_name(), Some("description"));
    assert_eq!(reader.read_value::<String>().unwrap(), "");

    assert!(reader.advance().unwrap());
    assert_eq!(reader.element_name(), Some("ttl"));
    let err = reader.read_value::<u32>().unwrap_err();
    assert!(matches!(err, FeedError::Format(_)));
    assert_eq!(
        err.to_string(),
        "Invalid format: Cannot convert value of 'ttl' to u32"
    );

    assert!(!reader.advance().unwrap());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_wrong_root_is_format_error() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>x</title></feed>"#;
    let mut reader = RssFeedReader::new(xml.as_bytes());
    assert!(matches!(reader.advance(), Err(FeedError::Format(_))));

    let xml = r#"<rss version="0.91"><channel/></rss>"#;
    let mut reader = RssFeedReader::new(xml.as_bytes());
    assert!(matches!(reader.advance(), Err(FeedError::Format(_))));
}

#[test]
fn test_mismatched_typed_read() {
    let mut reader = open("rss20.xml");
    assert!(reader.advance().unwrap());
    assert_eq!(reader.element_name(), Some("title"));
    assert!(matches!(
        reader.read_item(),
        Err(FeedError::InvalidOperation(_))
    ));
}

#[test]
fn test_empty_channel() {
    let mut reader = RssFeedReader::new(r#"<rss version="2.0"><channel/></rss>"#.as_bytes());
    assert!(!reader.advance().unwrap());
    assert_eq!(reader.element_kind(), ElementKind::None);
    assert!(matches!(
        reader.read_content(),
        Err(FeedError::InvalidOperation(_))
    ));
}
