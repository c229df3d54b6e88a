//! Lexers for message templates using logos
//!
//! Two small token sets live here. [`Token`] finds `{{ name }}` placeholders,
//! [`Fence`] finds triple-backtick code blocks. Both close lazily: a
//! placeholder ends at the first `}}` after its opening braces, a code block
//! at the first fence after at least one character of content.

use logos::{Lexer, Logos};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Placeholder-level tokens of a message
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// `{{ name }}`; carries the raw, untrimmed name
    #[token("{{", placeholder)]
    Placeholder(String),

    #[token("{")]
    Brace,

    #[regex(r"[^{]+")]
    Text,
}

/// Code-fence-level tokens of a message
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Fence {
    /// A whole fenced block, fences included
    #[token("```", code_block)]
    CodeBlock,

    #[token("`")]
    Backtick,

    #[regex(r"[^`]+")]
    Text,
}

fn placeholder(lex: &mut Lexer<Token>) -> Option<String> {
    let rest = lex.remainder();
    let end = rest.find("}}")?;
    let name = rest[..end].to_string();
    lex.bump(end + 2);
    Some(name)
}

fn code_block(lex: &mut Lexer<Fence>) -> bool {
    let rest = lex.remainder();
    // The block needs at least one character of content before it may close.
    let Some(first) = rest.chars().next() else {
        return false;
    };
    let skip = first.len_utf8();
    match rest[skip..].find("```") {
        Some(end) => {
            lex.bump(skip + end + 3);
            true
        }
        None => false,
    }
}

/// Lex input into placeholders with their spans
///
/// An opening `{{` without a closing `}}` yields nothing.
pub fn placeholders(input: &str) -> impl Iterator<Item = (String, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| match tok {
            Ok(Token::Placeholder(name)) => Some((name, span)),
            _ => None,
        })
}

/// A message with its code blocks removed
///
/// Keeps enough bookkeeping to map spans in the stripped text back onto the
/// original message.
#[derive(Debug, Clone, PartialEq)]
pub struct Stripped {
    /// The message without code blocks
    pub text: String,
    /// `(stripped_start, original_start)` for every kept run of text
    segments: Vec<(usize, usize)>,
}

impl Stripped {
    /// Map a byte offset in the stripped text to the original message
    pub fn original_offset(&self, offset: usize) -> usize {
        let idx = self
            .segments
            .partition_point(|(stripped, _)| *stripped <= offset);
        match idx.checked_sub(1).map(|i| self.segments[i]) {
            Some((stripped, original)) => original + (offset - stripped),
            None => offset,
        }
    }

    /// Map a non-empty span in the stripped text to the original message
    pub fn original_span(&self, span: &Span) -> Span {
        if span.is_empty() {
            let at = self.original_offset(span.start);
            return at..at;
        }
        self.original_offset(span.start)..self.original_offset(span.end - 1) + 1
    }
}

/// Remove every fenced code block from the input
pub fn strip_code_blocks(input: &str) -> Stripped {
    let mut text = String::with_capacity(input.len());
    let mut segments = Vec::new();

    for (tok, span) in Fence::lexer(input).spanned() {
        if matches!(tok, Ok(Fence::CodeBlock)) {
            continue;
        }
        // Adjacent kept runs collapse into one segment.
        let contiguous = segments
            .last()
            .map(|(stripped, original)| original + (text.len() - stripped) == span.start)
            .unwrap_or(false);
        if !contiguous {
            segments.push((text.len(), span.start));
        }
        text.push_str(&input[span]);
    }

    Stripped { text, segments }
}
