//! Markup tokenizer over partial input.
//!
//! Tokens are recognized with winnow over a [`Partial`] byte stream, so a
//! token cut off by the end of the buffered input reports
//! [`ErrMode::Incomplete`] instead of failing. The caller keeps the unconsumed
//! bytes and retries once more input arrives.

use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, cut_err, delimited, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult, StrContext},
    stream::Partial,
    token::{literal, take_till, take_until, take_while},
};

pub(super) type Input<'i> = Partial<&'i [u8]>;

/// A raw markup token borrowing from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token<'i> {
    Start {
        name: &'i [u8],
        attributes: Vec<(&'i [u8], &'i [u8])>,
        empty: bool,
    },
    End {
        name: &'i [u8],
    },
    Text(&'i [u8]),
    CData(&'i [u8]),
    /// Comments, processing instructions and document type declarations.
    Skip,
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':' | b'.') || byte >= 0x80
}

fn name<'i>(input: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    take_while(1.., is_name_byte).parse_next(input)
}

fn quoted_value<'i>(input: &mut Input<'i>) -> ModalResult<&'i [u8]> {
    alt((
        delimited("\"", take_till(0.., b'"'), "\""),
        delimited("'", take_till(0.., b'\''), "'"),
    ))
    .parse_next(input)
}

fn attribute<'i>(input: &mut Input<'i>) -> ModalResult<(&'i [u8], &'i [u8])> {
    preceded(
        multispace1,
        (name, multispace0, "=", multispace0, quoted_value),
    )
    .map(|(name, _, _, _, value)| (name, value))
    .parse_next(input)
}

fn start_tag<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    let name = preceded("<", name).parse_next(input)?;
    let (attributes, _, empty): (Vec<_>, _, bool) = cut_err((
        repeat(0.., attribute),
        multispace0,
        alt((literal("/>").value(true), literal(">").value(false))),
    ))
    .context(StrContext::Label("start tag"))
    .parse_next(input)?;

    Ok(Token::Start {
        name,
        attributes,
        empty,
    })
}

fn end_tag<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    preceded(
        "</",
        cut_err(terminated(name, (multispace0, ">"))).context(StrContext::Label("end tag")),
    )
    .map(|name| Token::End { name })
    .parse_next(input)
}

fn comment<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    preceded(
        "<!--",
        cut_err(terminated(take_until(0.., "-->"), "-->")).context(StrContext::Label("comment")),
    )
    .value(Token::Skip)
    .parse_next(input)
}

fn cdata<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    preceded(
        "<![CDATA[",
        cut_err(terminated(take_until(0.., "]]>"), "]]>"))
            .context(StrContext::Label("CDATA section")),
    )
    .map(Token::CData)
    .parse_next(input)
}

fn doctype<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    preceded(
        "<!DOCTYPE",
        cut_err(terminated(take_till(0.., b'>'), ">"))
            .context(StrContext::Label("document type declaration")),
    )
    .value(Token::Skip)
    .parse_next(input)
}

fn processing_instruction<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    preceded(
        "<?",
        cut_err(terminated(take_until(0.., "?>"), "?>"))
            .context(StrContext::Label("processing instruction")),
    )
    .value(Token::Skip)
    .parse_next(input)
}

fn text<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    take_till(1.., b'<').map(Token::Text).parse_next(input)
}

/// Parses the next token.
pub(super) fn token<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    alt((
        comment,
        cdata,
        doctype,
        processing_instruction,
        end_tag,
        start_tag,
        text,
    ))
    .parse_next(input)
}

/// Describes a tokenizer failure using the innermost label, if any.
pub(super) fn describe(err: &ContextError) -> String {
    err.context()
        .find_map(|context| match context {
            StrContext::Label(label) => Some(format!("malformed {label}")),
            _ => None,
        })
        .unwrap_or_else(|| "malformed markup".to_string())
}

/// Returns the error inside a failed parse, if the failure was not a request
/// for more input.
pub(super) fn into_failure(err: ErrMode<ContextError>) -> Option<ContextError> {
    match err {
        ErrMode::Backtrack(err) | ErrMode::Cut(err) => Some(err),
        ErrMode::Incomplete(_) => None,
    }
}
