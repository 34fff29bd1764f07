//! Atom 1.0 element, attribute and relationship names.

pub const NAMESPACE: &str = "http://www.w3.org/2005/Atom";

pub const AUTHOR: &str = "author";
pub const CATEGORY: &str = "category";
pub const CONTENT: &str = "content";
pub const CONTRIBUTOR: &str = "contributor";
pub const EMAIL: &str = "email";
pub const ENTRY: &str = "entry";
pub const FEED: &str = "feed";
pub const GENERATOR: &str = "generator";
pub const ICON: &str = "icon";
pub const ID: &str = "id";
pub const LINK: &str = "link";
pub const LOGO: &str = "logo";
pub const NAME: &str = "name";
pub const PUBLISHED: &str = "published";
pub const RIGHTS: &str = "rights";
pub const SOURCE: &str = "source";
pub const SUBTITLE: &str = "subtitle";
pub const SUMMARY: &str = "summary";
pub const TITLE: &str = "title";
pub const UPDATED: &str = "updated";
pub const URI: &str = "uri";

pub mod attr {
    pub const HREF: &str = "href";
    pub const LABEL: &str = "label";
    pub const LENGTH: &str = "length";
    pub const REL: &str = "rel";
    pub const SCHEME: &str = "scheme";
    pub const SRC: &str = "src";
    pub const TERM: &str = "term";
    pub const TITLE: &str = "title";
    pub const TYPE: &str = "type";
    pub const URI: &str = "uri";
    pub const VERSION: &str = "version";
}

/// Link relationship types.
pub mod rel {
    pub const ALTERNATE: &str = "alternate";
    pub const CONTENT: &str = "content";
    pub const SOURCE: &str = "source";
}

pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text";
