//! Streaming markup push parser.
//!
//! [`MarkupParser`] accepts a document in arbitrarily sized chunks and drives
//! a [`MarkupHandler`] with element-start, element-end and text events in
//! document order. It knows nothing about layout documents; grammar checks
//! belong to the handler.
//!
//! The sequence of events never depends on where the input was split into
//! chunks: a token is only reported once it is complete, and text is only
//! reported once the markup that ends it has arrived.
//!
//! # Example
//!
//! ```
//! # use keyloom_parser::{Attributes, MarkupHandler, error::Result, markup};
//! #[derive(Default)]
//! struct Names(Vec<String>);
//!
//! impl MarkupHandler for Names {
//!     fn start_element(&mut self, name: &str, _: &Attributes, _: &[String]) -> Result<()> {
//!         self.0.push(name.to_string());
//!         Ok(())
//!     }
//!     fn end_element(&mut self, _: &str, _: &[String]) -> Result<()> {
//!         Ok(())
//!     }
//!     fn text(&mut self, _: &str, _: &[String]) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut names = Names::default();
//! markup::parse_str("<keyboards><keyboard id=\"us\"/></keyboards>", &mut names).unwrap();
//! assert_eq!(names.0, vec!["keyboards", "keyboard"]);
//! ```

mod entities;
mod tokenizer;

use std::{
    io::{self, Read},
    mem, str,
};

use log::trace;
use winnow::{
    error::ErrMode,
    stream::{Partial, Stream as _, StreamIsPartial as _},
};

use crate::{
    attributes::Attributes,
    error::{ParseError, Result},
};

use tokenizer::Token;

/// Size of the buffer documents are read with.
pub const READ_BUFFER_SIZE: usize = 8192;

/// Receives markup events from a [`MarkupParser`].
///
/// `open` lists the enclosing open elements, outermost first. For start and
/// end events it does not include the element itself; for text it ends with
/// the element containing the text. Returning an error aborts the parse.
pub trait MarkupHandler {
    fn start_element(&mut self, name: &str, attributes: &Attributes, open: &[String])
    -> Result<()>;

    fn end_element(&mut self, name: &str, open: &[String]) -> Result<()>;

    fn text(&mut self, text: &str, open: &[String]) -> Result<()>;
}

/// Restartable push parser for one document.
#[derive(Debug, Default)]
pub struct MarkupParser {
    /// Bytes received but not yet tokenized.
    pending: Vec<u8>,
    /// Document offset of the first pending byte.
    offset: usize,
    open: Vec<String>,
    root_seen: bool,
    failed: bool,
}

impl MarkupParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next chunk of the document.
    ///
    /// # Errors
    ///
    /// Returns the first markup or handler error. The parser is unusable
    /// afterwards.
    pub fn feed<H: MarkupHandler + ?Sized>(&mut self, chunk: &[u8], handler: &mut H) -> Result<()> {
        self.ensure_usable()?;

        let mut buffer = mem::take(&mut self.pending);
        buffer.extend_from_slice(chunk);

        match self.drain(&buffer, false, handler) {
            Ok(consumed) => {
                buffer.drain(..consumed);
                self.offset += consumed;
                self.pending = buffer;
                Ok(())
            }
            Err(err) => {
                self.failed = true;
                Err(err)
            }
        }
    }

    /// Signals the end of the document.
    ///
    /// # Errors
    ///
    /// Returns an error if markup is left unterminated, an element is still
    /// open, or the document has no root element.
    pub fn finish<H: MarkupHandler + ?Sized>(mut self, handler: &mut H) -> Result<()> {
        self.ensure_usable()?;

        let buffer = mem::take(&mut self.pending);
        let consumed = self.drain(&buffer, true, handler)?;
        let end = self.offset + consumed;

        if let Some(name) = self.open.last() {
            return Err(ParseError::markup(end, format!("unclosed element `{name}`")));
        }
        if !self.root_seen {
            return Err(ParseError::markup(end, "document has no root element"));
        }
        Ok(())
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.failed {
            return Err(ParseError::markup(self.offset, "parser already failed"));
        }
        Ok(())
    }

    /// Tokenizes as much of `buffer` as possible and returns how many bytes
    /// were consumed.
    fn drain<H: MarkupHandler + ?Sized>(
        &mut self,
        buffer: &[u8],
        complete: bool,
        handler: &mut H,
    ) -> Result<usize> {
        let mut input = Partial::new(buffer);
        if complete {
            let _ = input.complete();
        }

        loop {
            let consumed = buffer.len() - input.eof_offset();
            if consumed == buffer.len() {
                return Ok(consumed);
            }

            match tokenizer::token(&mut input) {
                Ok(token) => self.dispatch(token, self.offset + consumed, handler)?,
                Err(err) => {
                    let Some(err) = tokenizer::into_failure(err) else {
                        return Ok(consumed);
                    };
                    let rest = &buffer[consumed..];
                    let truncated = complete
                        && matches!(
                            tokenizer::token(&mut Partial::new(rest)),
                            Err(ErrMode::Incomplete(_))
                        );
                    let message = if truncated {
                        "unterminated markup at end of input".to_string()
                    } else {
                        tokenizer::describe(&err)
                    };
                    return Err(ParseError::markup(self.offset + consumed, message));
                }
            }
        }
    }

    fn dispatch<H: MarkupHandler + ?Sized>(
        &mut self,
        token: Token<'_>,
        offset: usize,
        handler: &mut H,
    ) -> Result<()> {
        match token {
            Token::Start {
                name,
                attributes,
                empty,
            } => {
                let name = utf8(name, offset)?;
                if self.open.is_empty() && self.root_seen {
                    return Err(ParseError::markup(
                        offset,
                        format!("element `{name}` after the root element"),
                    ));
                }

                let mut attrs = Attributes::new();
                for (attr_name, value) in attributes {
                    let attr_name = utf8(attr_name, offset)?;
                    let value = entities::unescape(utf8(value, offset)?)
                        .map_err(|message| ParseError::markup(offset, message))?;
                    if !attrs.insert(attr_name, value) {
                        return Err(ParseError::markup(
                            offset,
                            format!("duplicate attribute `{attr_name}` on `{name}`"),
                        ));
                    }
                }

                trace!(element = name, offset; "Start element");
                self.root_seen = true;
                handler.start_element(name, &attrs, &self.open)?;
                if empty {
                    handler.end_element(name, &self.open)?;
                } else {
                    self.open.push(name.to_string());
                }
            }
            Token::End { name } => {
                let name = utf8(name, offset)?;
                match self.open.last() {
                    Some(top) if top == name => {
                        self.open.pop();
                        handler.end_element(name, &self.open)?;
                    }
                    Some(top) => {
                        return Err(ParseError::markup(
                            offset,
                            format!("mismatched end tag `</{name}>`, expected `</{top}>`"),
                        ));
                    }
                    None => {
                        return Err(ParseError::markup(
                            offset,
                            format!("unexpected end tag `</{name}>`"),
                        ));
                    }
                }
            }
            Token::Text(raw) => {
                let raw = utf8(raw, offset)?;
                if self.open.is_empty() {
                    if raw.trim().is_empty() {
                        return Ok(());
                    }
                    return Err(ParseError::markup(offset, "text outside the root element"));
                }
                let text = entities::unescape(raw).map_err(|message| ParseError::markup(offset, message))?;
                handler.text(&text, &self.open)?;
            }
            Token::CData(raw) => {
                let raw = utf8(raw, offset)?;
                if self.open.is_empty() {
                    return Err(ParseError::markup(offset, "CDATA outside the root element"));
                }
                handler.text(raw, &self.open)?;
            }
            Token::Skip => {}
        }
        Ok(())
    }
}

fn utf8(bytes: &[u8], offset: usize) -> Result<&str> {
    str::from_utf8(bytes).map_err(|err| {
        ParseError::markup(offset + err.valid_up_to(), "invalid UTF-8")
    })
}

/// Parses a whole document from `reader`, reading [`READ_BUFFER_SIZE`] bytes
/// at a time.
///
/// Interrupted reads are retried; a short read is treated as more data.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if reading fails, or the first markup or
/// handler error.
pub fn parse_reader<R, H>(mut reader: R, handler: &mut H) -> Result<()>
where
    R: Read,
    H: MarkupHandler + ?Sized,
{
    let mut parser = MarkupParser::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        parser.feed(&buffer[..read], handler)?;
    }

    parser.finish(handler)
}

/// Parses a whole in-memory document.
///
/// # Errors
///
/// Returns the first markup or handler error.
pub fn parse_str<H: MarkupHandler + ?Sized>(source: &str, handler: &mut H) -> Result<()> {
    let mut parser = MarkupParser::new();
    parser.feed(source.as_bytes(), handler)?;
    parser.finish(handler)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Start(String, Vec<(String, String)>, Vec<String>),
        End(String, Vec<String>),
        Text(String),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl MarkupHandler for Recorder {
        fn start_element(&mut self, name: &str, attributes: &Attributes, open: &[String]) -> Result<()> {
            let attributes = attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            self.events
                .push(Event::Start(name.to_string(), attributes, open.to_vec()));
            Ok(())
        }

        fn end_element(&mut self, name: &str, open: &[String]) -> Result<()> {
            self.events.push(Event::End(name.to_string(), open.to_vec()));
            Ok(())
        }

        fn text(&mut self, text: &str, _open: &[String]) -> Result<()> {
            // Adjacent text and CDATA runs are merged so that comparisons do
            // not depend on how they were split.
            if let Some(Event::Text(previous)) = self.events.last_mut() {
                previous.push_str(text);
            } else {
                self.events.push(Event::Text(text.to_string()));
            }
            Ok(())
        }
    }

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<!-- keyboard geometry -->
<geometry version="0.90">
  <bounds x="10.0" y="10.0" width="410.0" height="229.0"/>
  <section angle="0">
    q w e r t y &amp; <![CDATA[<raw>]]>
    <button name="AC01" oref='default'/>
  </section>
  <outline id="default" corner-radius="1.0">
    <point x="0.0" y="0.0"/>
  </outline>
</geometry>
"#;

    fn record(source: &str) -> Result<Vec<Event>> {
        let mut recorder = Recorder::default();
        parse_str(source, &mut recorder)?;
        Ok(recorder.events)
    }

    fn record_chunked(source: &str, chunk_sizes: &[usize]) -> Result<Vec<Event>> {
        let bytes = source.as_bytes();
        let mut recorder = Recorder::default();
        let mut parser = MarkupParser::new();
        let mut position = 0;
        let mut sizes = chunk_sizes.iter().cycle();
        while position < bytes.len() {
            let size = (*sizes.next().unwrap()).max(1);
            let end = (position + size).min(bytes.len());
            parser.feed(&bytes[position..end], &mut recorder)?;
            position = end;
        }
        parser.finish(&mut recorder)?;
        Ok(recorder.events)
    }

    fn markup_message(err: ParseError) -> String {
        match err {
            ParseError::Markup { message, .. } => message,
            other => panic!("expected markup error, got {other:?}"),
        }
    }

    #[test]
    fn test_events_in_document_order() {
        let events = record("<a x=\"1\"><b/>hi</a>").unwrap();
        assert_eq!(
            events,
            vec![
                Event::Start("a".into(), vec![("x".into(), "1".into())], vec![]),
                Event::Start("b".into(), vec![], vec!["a".into()]),
                Event::End("b".into(), vec!["a".into()]),
                Event::Text("hi".into()),
                Event::End("a".into(), vec![]),
            ]
        );
    }

    #[test]
    fn test_entities_and_cdata_in_text() {
        let events = record(SAMPLE).unwrap();
        let text = events
            .iter()
            .find_map(|event| match event {
                Event::Text(text) if text.contains('q') => Some(text.clone()),
                _ => None,
            })
            .unwrap();
        assert!(text.contains("q w e r t y & <raw>"));
    }

    #[test]
    fn test_single_byte_chunks() {
        assert_eq!(record_chunked(SAMPLE, &[1]).unwrap(), record(SAMPLE).unwrap());
    }

    #[test]
    fn test_mismatched_end_tag() {
        let err = record("<a><b></a></b>").unwrap_err();
        assert!(markup_message(err).starts_with("mismatched end tag"));
    }

    #[test]
    fn test_unclosed_element() {
        let err = record("<a><b></b>").unwrap_err();
        assert_eq!(markup_message(err), "unclosed element `a`");
    }

    #[test]
    fn test_unterminated_markup() {
        let err = record("<a><b x=\"1\"").unwrap_err();
        assert_eq!(markup_message(err), "unterminated markup at end of input");
    }

    #[test]
    fn test_empty_document() {
        let err = record("  <!-- nothing -->\n").unwrap_err();
        assert_eq!(markup_message(err), "document has no root element");
    }

    #[test]
    fn test_content_outside_root() {
        assert!(record("<a/><b/>").is_err());
        assert!(record("junk<a/>").is_err());
        assert!(record("<a/>\n\t ").is_ok());
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = record("<a x=\"1\" x=\"2\"/>").unwrap_err();
        assert_eq!(markup_message(err), "duplicate attribute `x` on `a`");
    }

    #[test]
    fn test_error_offset() {
        let err = record("<a>\n  <b></c>").unwrap_err();
        assert!(matches!(err, ParseError::Markup { offset: 9, .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut recorder = Recorder::default();
        let mut parser = MarkupParser::new();
        let result = parser
            .feed(b"<a>\xff\xfe</a>", &mut recorder)
            .and_then(|()| parser.finish(&mut recorder));
        assert_eq!(markup_message(result.unwrap_err()), "invalid UTF-8");
    }

    #[test]
    fn test_parse_reader_small_reads() {
        struct Trickle<'a>(&'a [u8]);

        impl Read for Trickle<'_> {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                let n = buf.len().min(3).min(self.0.len());
                buf[..n].copy_from_slice(&self.0[..n]);
                self.0 = &self.0[n..];
                Ok(n)
            }
        }

        let mut recorder = Recorder::default();
        parse_reader(Trickle(SAMPLE.as_bytes()), &mut recorder).unwrap();
        assert_eq!(recorder.events, record(SAMPLE).unwrap());
    }

    #[test]
    fn test_handler_error_aborts() {
        struct Refuse;

        impl MarkupHandler for Refuse {
            fn start_element(&mut self, name: &str, _: &Attributes, _: &[String]) -> Result<()> {
                Err(ParseError::UnknownKeyReference(name.to_string()))
            }
            fn end_element(&mut self, _: &str, _: &[String]) -> Result<()> {
                Ok(())
            }
            fn text(&mut self, _: &str, _: &[String]) -> Result<()> {
                Ok(())
            }
        }

        let mut parser = MarkupParser::new();
        assert!(parser.feed(b"<a>", &mut Refuse).is_err());
        assert!(parser.feed(b"</a>", &mut Refuse).is_err());
    }

    /// Splitting a document at arbitrary points must not change its events.
    fn check_chunking_is_invisible(chunk_sizes: Vec<usize>) -> std::result::Result<(), TestCaseError> {
        let whole = record(SAMPLE).unwrap();
        let chunked = record_chunked(SAMPLE, &chunk_sizes).unwrap();
        prop_assert_eq!(whole, chunked);
        Ok(())
    }

    proptest! {
        #[test]
        fn chunking_is_invisible(chunk_sizes in prop::collection::vec(1usize..64, 1..16)) {
            check_chunking_is_invisible(chunk_sizes)?;
        }
    }
}
