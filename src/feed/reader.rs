//! Pull reader over a feed document.
//!
//! The reader walks the direct children of the feed's wrapper element(s)
//! one at a time. Each element is classified by the format's
//! [`FeedSyntax`] and can then be read as text, as a content tree, or as a
//! domain object through the format's [`FeedParser`].

use std::io::BufRead;
use std::marker::PhantomData;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::PrefixDeclaration;
use quick_xml::{NsReader, Writer};

use super::element::{ElementKind, FeedSyntax, RootElement};
use super::parser::FeedParser;
use crate::config::ReaderConfig;
use crate::error::{FeedError, FeedResult};
use crate::model::{
    FeedValue, SyndicationCategory, SyndicationContent, SyndicationImage, SyndicationLink,
    SyndicationPerson,
};
use crate::xml::{local_name, resolved_namespace};

type Declarations = Vec<(Option<String>, String)>;

#[derive(Debug)]
struct CurrentElement {
    start: BytesStart<'static>,
    empty: bool,
    name: String,
    kind: ElementKind,
}

#[derive(Debug)]
enum CursorState {
    /// Nothing read yet, or the last element failed mid-read.
    Unpositioned,
    /// On an element the caller has already advanced to.
    Positioned(CurrentElement),
    /// On an element reached by consuming its predecessor; the next
    /// `advance` reports it without moving.
    Pending(CurrentElement),
    Exhausted,
}

/// Pull reader generic over the input, the feed syntax and the parser.
///
/// Use the [`RssFeedReader`](crate::rss::RssFeedReader) and
/// [`AtomFeedReader`](crate::atom::AtomFeedReader) aliases.
pub struct XmlFeedReader<R, S, P> {
    reader: NsReader<R>,
    parser: P,
    config: ReaderConfig,
    buf: Vec<u8>,
    cursor: CursorState,
    /// Namespace declarations of the open wrapper elements.
    frames: Vec<Declarations>,
    started: bool,
    _syntax: PhantomData<S>,
}

impl<R: BufRead, S: FeedSyntax, P: FeedParser> XmlFeedReader<R, S, P> {
    /// Creates a reader with a custom parser.
    pub fn with_parser(input: R, parser: P, config: ReaderConfig) -> Self {
        Self {
            reader: NsReader::from_reader(input),
            parser,
            config,
            buf: Vec::new(),
            cursor: CursorState::Unpositioned,
            frames: Vec::new(),
            started: false,
            _syntax: PhantomData,
        }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Local name of the current element.
    pub fn element_name(&self) -> Option<&str> {
        self.current().map(|c| c.name.as_str())
    }

    /// Classification of the current element, [`ElementKind::None`] when
    /// there is none.
    pub fn element_kind(&self) -> ElementKind {
        self.current().map_or(ElementKind::None, |c| c.kind)
    }

    fn current(&self) -> Option<&CurrentElement> {
        match &self.cursor {
            CursorState::Positioned(c) | CursorState::Pending(c) => Some(c),
            CursorState::Unpositioned | CursorState::Exhausted => None,
        }
    }

    /// Moves to the next element.
    ///
    /// If the reader sits on an element that has not been read, that
    /// element's subtree is skipped first. Returns false at the end of the
    /// document.
    ///
    /// # Errors
    ///
    /// [`FeedError::Format`] on the first call if the document does not
    /// start with the format's wrapper elements.
    pub fn advance(&mut self) -> FeedResult<bool> {
        self.ensure_started()?;

        match std::mem::replace(&mut self.cursor, CursorState::Unpositioned) {
            CursorState::Pending(current) => {
                self.cursor = CursorState::Positioned(current);
                Ok(true)
            }
            CursorState::Positioned(current) => {
                self.skip_element(&current)?;
                self.scan(false)
            }
            CursorState::Unpositioned => self.scan(false),
            CursorState::Exhausted => {
                self.cursor = CursorState::Exhausted;
                Ok(false)
            }
        }
    }

    /// Skips the current element and stops on the next sibling.
    ///
    /// The sibling is reported by [`element_name`](Self::element_name)
    /// right away and is not moved past by the following
    /// [`advance`](Self::advance). Returns false if no element follows.
    pub fn skip(&mut self) -> FeedResult<bool> {
        if matches!(self.cursor, CursorState::Unpositioned) && !self.advance()? {
            return Ok(false);
        }

        match std::mem::replace(&mut self.cursor, CursorState::Unpositioned) {
            CursorState::Positioned(current) | CursorState::Pending(current) => {
                self.skip_element(&current)?;
                self.scan(true)
            }
            CursorState::Unpositioned | CursorState::Exhausted => {
                self.cursor = CursorState::Exhausted;
                Ok(false)
            }
        }
    }

    /// Returns the outer XML of the current element and moves past it.
    ///
    /// Namespace declarations inherited from the wrapper elements are
    /// added to the returned start tag so the text parses on its own.
    pub fn read_element_as_string(&mut self) -> FeedResult<String> {
        if matches!(self.cursor, CursorState::Unpositioned) {
            self.advance()?;
        }

        let current = match std::mem::replace(&mut self.cursor, CursorState::Unpositioned) {
            CursorState::Positioned(c) | CursorState::Pending(c) => c,
            other => {
                self.cursor = other;
                return Err(FeedError::InvalidOperation(
                    "Reader is not positioned on an element".into(),
                ));
            }
        };

        let text = self.capture(&current)?;
        self.scan(true)?;
        Ok(text)
    }

    pub fn read_content(&mut self) -> FeedResult<SyndicationContent> {
        let text = self.read_as(ElementKind::Content)?;
        self.parser.parse_content(&text)
    }

    pub fn read_item(&mut self) -> FeedResult<P::Item> {
        let text = self.read_as(ElementKind::Item)?;
        self.parser.parse_item(&text)
    }

    pub fn read_link(&mut self) -> FeedResult<SyndicationLink> {
        let text = self.read_as(ElementKind::Link)?;
        self.parser.parse_link(&text)
    }

    pub fn read_person(&mut self) -> FeedResult<SyndicationPerson> {
        let text = self.read_as(ElementKind::Person)?;
        self.parser.parse_person(&text)
    }

    pub fn read_category(&mut self) -> FeedResult<SyndicationCategory> {
        let text = self.read_as(ElementKind::Category)?;
        self.parser.parse_category(&text)
    }

    pub fn read_image(&mut self) -> FeedResult<SyndicationImage> {
        let text = self.read_as(ElementKind::Image)?;
        self.parser.parse_image(&text)
    }

    /// Reads the current element's text as a typed value.
    ///
    /// # Errors
    ///
    /// [`FeedError::Format`] if the text does not convert to `T`.
    pub fn read_value<T: FeedValue>(&mut self) -> FeedResult<T> {
        let content = self.read_content()?;
        self.parser
            .parse_value::<T>(content.value.as_deref())
            .ok_or_else(|| {
                FeedError::format(format!(
                    "Cannot convert value of '{}' to {}",
                    content.name,
                    T::NAME
                ))
            })
    }

    fn read_as(&mut self, expected: ElementKind) -> FeedResult<String> {
        if matches!(self.cursor, CursorState::Unpositioned) {
            self.advance()?;
        }

        let kind = self.element_kind();
        if kind == ElementKind::None {
            return Err(FeedError::InvalidOperation(format!(
                "Cannot read {expected}: reader is not positioned on an element"
            )));
        }
        if expected != ElementKind::Content && kind != expected {
            return Err(FeedError::InvalidOperation(format!(
                "Cannot read {expected}: current element is {kind}"
            )));
        }

        self.read_element_as_string()
    }

    /// Consumes the wrapper elements once, before the first element is read.
    fn ensure_started(&mut self) -> FeedResult<()> {
        if self.started {
            return Ok(());
        }

        for (index, root) in S::ROOT.iter().enumerate() {
            let (start, empty) = self.next_root_tag(root)?;
            let declarations = self.declarations(&start)?;
            self.frames.push(declarations);

            if empty {
                if index + 1 < S::ROOT.len() {
                    return Err(unknown_feed::<S>());
                }
                self.cursor = CursorState::Exhausted;
            }
        }

        self.started = true;
        tracing::debug!(format = S::NAME, "Recognized feed root");
        Ok(())
    }

    fn next_root_tag(&mut self, root: &RootElement) -> FeedResult<(BytesStart<'static>, bool)> {
        loop {
            self.buf.clear();
            let (ns, event) = self
                .reader
                .read_resolved_event_into(&mut self.buf)
                .map_err(FeedError::xml)?;
            let namespace = resolved_namespace(ns)?;
            let (start, empty) = match event {
                Event::Start(e) => (e.into_owned(), false),
                Event::Empty(e) => (e.into_owned(), true),
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                _ => return Err(unknown_feed::<S>()),
            };

            let name = local_name(start.local_name())?;
            if name != root.name || namespace.as_deref() != root.namespace {
                return Err(unknown_feed::<S>());
            }
            if let Some((attr_name, expected)) = root.required_attribute {
                let value = start
                    .try_get_attribute(attr_name)
                    .map_err(FeedError::xml)?
                    .map(|a| {
                        a.decode_and_unescape_value(self.reader.decoder())
                            .map(|v| v.into_owned())
                    })
                    .transpose()
                    .map_err(FeedError::xml)?;
                if value.as_deref() != Some(expected) {
                    return Err(unknown_feed::<S>());
                }
            }
            return Ok((start, empty));
        }
    }

    fn declarations(&self, start: &BytesStart<'_>) -> FeedResult<Declarations> {
        let mut declarations = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(FeedError::xml)?;
            let Some(binding) = attr.key.as_namespace_binding() else {
                continue;
            };
            let prefix = match binding {
                PrefixDeclaration::Default => None,
                PrefixDeclaration::Named(p) => {
                    Some(std::str::from_utf8(p).map_err(FeedError::xml)?.to_owned())
                }
            };
            let value = attr
                .decode_and_unescape_value(self.reader.decoder())
                .map_err(FeedError::xml)?;
            declarations.push((prefix, value.into_owned()));
        }
        Ok(declarations)
    }

    /// Pulls events until the next element start or the end of input.
    fn scan(&mut self, pending: bool) -> FeedResult<bool> {
        loop {
            self.buf.clear();
            let (ns, event) = self
                .reader
                .read_resolved_event_into(&mut self.buf)
                .map_err(FeedError::xml)?;
            let namespace = resolved_namespace(ns)?;
            let (start, empty) = match event {
                Event::Start(e) => (e.into_owned(), false),
                Event::Empty(e) => (e.into_owned(), true),
                Event::End(_) => {
                    self.frames.pop();
                    continue;
                }
                Event::Eof => {
                    self.cursor = CursorState::Exhausted;
                    return Ok(false);
                }
                _ => continue,
            };

            let name = local_name(start.local_name())?;
            let kind = S::classify(&name, namespace.as_deref());
            tracing::trace!(element = %name, kind = %kind, "Classified element");

            let current = CurrentElement {
                start,
                empty,
                name,
                kind,
            };
            self.cursor = if pending {
                CursorState::Pending(current)
            } else {
                CursorState::Positioned(current)
            };
            return Ok(true);
        }
    }

    fn skip_element(&mut self, current: &CurrentElement) -> FeedResult<()> {
        if current.empty {
            return Ok(());
        }

        let mut depth = 1usize;
        while depth > 0 {
            self.buf.clear();
            match self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(FeedError::xml)?
            {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(truncated(&current.name)),
                _ => {}
            }
        }

        tracing::trace!(element = %current.name, "Skipped element");
        Ok(())
    }

    /// Re-serializes the current element's subtree.
    fn capture(&mut self, current: &CurrentElement) -> FeedResult<String> {
        let mut out = Writer::new(Vec::new());
        let start = self.with_inherited_declarations(&current.start);

        if current.empty {
            out.write_event(Event::Empty(start))
                .map_err(FeedError::xml)?;
        } else {
            out.write_event(Event::Start(start))
                .map_err(FeedError::xml)?;

            let mut depth = 1usize;
            while depth > 0 {
                self.buf.clear();
                let event = self
                    .reader
                    .read_event_into(&mut self.buf)
                    .map_err(FeedError::xml)?;
                match &event {
                    Event::Start(_) => {
                        depth += 1;
                        if depth > self.config.max_depth {
                            return Err(FeedError::format(format!(
                                "Element nesting exceeds {} levels",
                                self.config.max_depth
                            )));
                        }
                    }
                    Event::End(_) => depth -= 1,
                    Event::Eof => return Err(truncated(&current.name)),
                    _ => {}
                }
                out.write_event(event).map_err(FeedError::xml)?;
            }
        }

        String::from_utf8(out.into_inner()).map_err(FeedError::xml)
    }

    /// Copies `start`, declaring every wrapper namespace it does not
    /// redeclare itself.
    fn with_inherited_declarations(&self, start: &BytesStart<'static>) -> BytesStart<'static> {
        let own: Vec<Option<Vec<u8>>> = start
            .attributes()
            .flatten()
            .filter_map(|a| {
                a.key.as_namespace_binding().map(|binding| match binding {
                    PrefixDeclaration::Default => None,
                    PrefixDeclaration::Named(p) => Some(p.to_vec()),
                })
            })
            .collect();

        let mut in_scope: Vec<(Option<&str>, &str)> = Vec::new();
        for (prefix, namespace) in self.frames.iter().flatten() {
            let prefix = prefix.as_deref();
            match in_scope.iter_mut().find(|(p, _)| *p == prefix) {
                Some(existing) => existing.1 = namespace.as_str(),
                None => in_scope.push((prefix, namespace.as_str())),
            }
        }

        let mut result = start.clone();
        for (prefix, namespace) in in_scope {
            if own.iter().any(|p| p.as_deref() == prefix.map(str::as_bytes)) {
                continue;
            }
            if prefix.is_none() && namespace.is_empty() {
                continue;
            }
            let key = match prefix {
                Some(p) => format!("xmlns:{p}"),
                None => "xmlns".to_owned(),
            };
            result.push_attribute((key.as_str(), namespace));
        }
        result
    }
}

fn unknown_feed<S: FeedSyntax>() -> FeedError {
    FeedError::format(format!("Unknown {} feed", S::NAME))
}

fn truncated(name: &str) -> FeedError {
    FeedError::format(format!("Unexpected end of input inside '{name}'"))
}
