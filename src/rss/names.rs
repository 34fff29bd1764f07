//! RSS 2.0 element, attribute and relationship names.

pub const AUTHOR: &str = "author";
pub const CATEGORY: &str = "category";
pub const CHANNEL: &str = "channel";
pub const CLOUD: &str = "cloud";
pub const COMMENTS: &str = "comments";
pub const COPYRIGHT: &str = "copyright";
pub const DAY: &str = "day";
pub const DESCRIPTION: &str = "description";
pub const DOCS: &str = "docs";
pub const ENCLOSURE: &str = "enclosure";
pub const GENERATOR: &str = "generator";
pub const GUID: &str = "guid";
pub const HOUR: &str = "hour";
pub const IMAGE: &str = "image";
pub const ITEM: &str = "item";
pub const LANGUAGE: &str = "language";
pub const LAST_BUILD_DATE: &str = "lastBuildDate";
pub const LINK: &str = "link";
pub const MANAGING_EDITOR: &str = "managingEditor";
pub const PUB_DATE: &str = "pubDate";
pub const RSS: &str = "rss";
pub const SKIP_DAYS: &str = "skipDays";
pub const SKIP_HOURS: &str = "skipHours";
pub const SOURCE: &str = "source";
pub const TIME_TO_LIVE: &str = "ttl";
pub const TITLE: &str = "title";
pub const URL: &str = "url";
pub const WEB_MASTER: &str = "webMaster";

pub mod attr {
    pub const DOMAIN: &str = "domain";
    pub const IS_PERMA_LINK: &str = "isPermaLink";
    pub const LENGTH: &str = "length";
    pub const TYPE: &str = "type";
    pub const URL: &str = "url";
    pub const VERSION: &str = "version";

    // cloud
    pub const PORT: &str = "port";
    pub const PATH: &str = "path";
    pub const REGISTER_PROCEDURE: &str = "registerProcedure";
    pub const PROTOCOL: &str = "protocol";
}

/// Link relationship types.
pub mod rel {
    pub const ALTERNATE: &str = "alternate";
    pub const COMMENTS: &str = "comments";
    pub const ENCLOSURE: &str = "enclosure";
    pub const GUID: &str = "guid";
    pub const SOURCE: &str = "source";
}

pub const VERSION: &str = "2.0";
pub const SPECIFICATION_LINK: &str = "http://blogs.law.harvard.edu/tech/rss";
pub const DEFAULT_CLOUD_PROTOCOL: &str = "xml-rpc";
