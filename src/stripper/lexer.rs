//! Lexer splitting source text into comment, string, code and layout tokens

use super::syntax::{Quote, Syntax};
use super::StripError;

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifiers, operators, numbers and anything else
    Code,
    /// A complete string or char literal including its delimiters
    Str,
    /// A line or block comment
    Comment,
    /// Horizontal whitespace
    Whitespace,
    /// `\n` or `\r\n`
    Newline,
}

/// A token borrowing its text from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Single-pass lexer over one file
pub struct Lexer<'a> {
    src: &'a str,
    syntax: &'static Syntax,
    pos: usize,
    line: usize,
    /// Last code or string token, used to tell a regex from a division
    last_significant: Option<(TokenKind, &'a str)>,
}

/// Keywords after which `/` starts a regex literal
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case",
    "do", "else", "yield", "await",
];

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str, syntax: &'static Syntax) -> Self {
        Self {
            src,
            syntax,
            pos: 0,
            line: 1,
            last_significant: None,
        }
    }

    /// Split the whole source into tokens
    ///
    /// Concatenating the text of all tokens reproduces the input exactly.
    pub fn tokenize(mut self) -> Result<Vec<Token<'a>>, StripError> {
        let mut tokens = Vec::new();

        while self.pos < self.src.len() {
            let start = self.pos;
            let kind = self.next_token()?;
            let text = &self.src[start..self.pos];
            if matches!(kind, TokenKind::Code | TokenKind::Str) {
                self.last_significant = Some((kind, text));
            }
            tokens.push(Token { kind, text });
        }

        Ok(tokens)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn advance(&mut self, len: usize) {
        for _ in 0..len {
            if self.bump().is_none() {
                break;
            }
        }
    }

    fn prev_char(&self) -> Option<char> {
        self.src[..self.pos].chars().next_back()
    }

    fn next_token(&mut self) -> Result<TokenKind, StripError> {
        let rest = self.rest();

        if rest.starts_with("\r\n") {
            self.advance(2);
            return Ok(TokenKind::Newline);
        }
        if rest.starts_with('\n') {
            self.bump();
            return Ok(TokenKind::Newline);
        }
        if self.peek().is_some_and(is_horizontal_space) {
            while self.peek().is_some_and(is_horizontal_space) {
                self.bump();
            }
            return Ok(TokenKind::Whitespace);
        }
        if self.syntax.regex_literals && self.at_regex_start() {
            self.regex()?;
            return Ok(TokenKind::Str);
        }
        if self.syntax.url_literals && self.at_unquoted_url() {
            self.url()?;
            return Ok(TokenKind::Str);
        }
        if let Some((open, close)) = self.syntax.block_comment {
            if rest.starts_with(open) {
                self.block_comment(open, close)?;
                return Ok(TokenKind::Comment);
            }
        }
        if self.at_line_comment() {
            while self.peek().is_some_and(|c| c != '\n' && c != '\r') {
                self.bump();
            }
            // A lone '\r' not followed by '\n' belongs to the comment
            if self.rest().starts_with('\r') && !self.rest().starts_with("\r\n") {
                self.bump();
            }
            return Ok(TokenKind::Comment);
        }
        if self.syntax.raw_strings {
            if let Some(hashes) = raw_string_prefix(rest) {
                self.raw_string(hashes)?;
                return Ok(TokenKind::Str);
            }
        }
        if let Some(quote) = self.string_start() {
            self.string(quote)?;
            return Ok(TokenKind::Str);
        }

        self.code();
        Ok(TokenKind::Code)
    }

    fn at_line_comment(&self) -> bool {
        let rest = self.rest();
        if !self.syntax.line_comments.iter().any(|m| rest.starts_with(m)) {
            return false;
        }
        if self
            .syntax
            .comment_exception
            .is_some_and(|prefix| rest.starts_with(prefix))
        {
            return false;
        }
        !self.syntax.comment_needs_boundary
            || self.prev_char().map_or(true, char::is_whitespace)
    }

    /// `/` where an operand is expected, and not `//` or `/*`
    fn at_regex_start(&self) -> bool {
        let mut chars = self.rest().chars();
        if chars.next() != Some('/') || matches!(chars.next(), Some('/' | '*')) {
            return false;
        }

        match self.last_significant {
            None => true,
            Some((TokenKind::Code, text)) => {
                REGEX_KEYWORDS.contains(&text)
                    || !(text.starts_with(is_word_char) || matches!(text, ")" | "]" | "$"))
            }
            Some(_) => false,
        }
    }

    /// Consume `/.../flags`, honouring escapes and `[...]` classes
    fn regex(&mut self) -> Result<(), StripError> {
        let start_line = self.line;
        self.bump();
        let mut in_class = false;

        loop {
            match self.peek() {
                None | Some('\n' | '\r') => {
                    return Err(StripError::UnterminatedString { line: start_line });
                }
                _ => {}
            }
            match self.bump() {
                Some('\\') => {
                    if self.peek().is_some_and(|c| c != '\n' && c != '\r') {
                        self.bump();
                    }
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                _ => {}
            }
        }

        while self.peek().is_some_and(is_word_char) {
            self.bump();
        }
        Ok(())
    }

    /// `url(` followed by anything but a quoted string
    fn at_unquoted_url(&self) -> bool {
        let Some(inner) = self.rest().strip_prefix("url(") else {
            return false;
        };
        if self.prev_char().is_some_and(|c| is_word_char(c) || c == '-') {
            return false;
        }
        !inner.trim_start().starts_with(['"', '\''])
    }

    fn url(&mut self) -> Result<(), StripError> {
        let start_line = self.line;
        self.advance("url(".len());

        loop {
            match self.peek() {
                None | Some('\n' | '\r') => {
                    return Err(StripError::UnterminatedString { line: start_line });
                }
                Some(')') => {
                    self.bump();
                    return Ok(());
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn block_comment(&mut self, open: &str, close: &str) -> Result<(), StripError> {
        let start_line = self.line;
        let mut depth = 0usize;

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(StripError::UnterminatedComment { line: start_line });
            }
            if rest.starts_with(open) && (depth == 0 || self.syntax.nested_blocks) {
                depth += 1;
                self.advance(open.chars().count());
            } else if rest.starts_with(close) {
                depth -= 1;
                self.advance(close.chars().count());
                if depth == 0 {
                    return Ok(());
                }
            } else {
                self.bump();
            }
        }
    }

    fn string_start(&self) -> Option<Quote> {
        let rest = self.rest();
        let quote = *self
            .syntax
            .quotes
            .iter()
            .find(|q| rest.starts_with(q.delim))?;

        if self.syntax.char_or_lifetime && quote.delim == "'" && !is_char_literal(rest) {
            return None;
        }
        // `don't` in a YAML value or shell word is not a quote
        if self.syntax.quotes_need_boundary && self.prev_char().is_some_and(is_word_char) {
            return None;
        }
        Some(quote)
    }

    fn string(&mut self, quote: Quote) -> Result<(), StripError> {
        let start_line = self.line;
        self.advance(quote.delim.chars().count());

        loop {
            if self.rest().is_empty() {
                return Err(StripError::UnterminatedString { line: start_line });
            }
            if self.rest().starts_with(quote.delim) {
                self.advance(quote.delim.chars().count());
                return Ok(());
            }
            match self.bump() {
                Some('\\') if quote.escapes => {
                    // The escaped character is consumed as-is, a line
                    // continuation included
                    if self.rest().starts_with("\r\n") {
                        self.advance(2);
                    } else {
                        self.bump();
                    }
                }
                Some('\n') if !quote.multiline => {
                    return Err(StripError::UnterminatedString { line: start_line });
                }
                _ => {}
            }
        }
    }

    fn raw_string(&mut self, hashes: usize) -> Result<(), StripError> {
        let start_line = self.line;
        // Skip `b`, `r`, the hashes and the opening quote
        while self.peek() != Some('"') {
            self.bump();
        }
        self.bump();

        let closing = format!("\"{}", "#".repeat(hashes));
        loop {
            if self.rest().is_empty() {
                return Err(StripError::UnterminatedString { line: start_line });
            }
            if self.rest().starts_with(&closing) {
                self.advance(closing.len());
                return Ok(());
            }
            self.bump();
        }
    }

    /// Consume an identifier/number run or a single other character
    fn code(&mut self) {
        match self.bump() {
            Some(c) if is_word_char(c) => {
                while self.peek().is_some_and(is_word_char) {
                    self.bump();
                }
            }
            _ => {}
        }
    }
}

fn is_horizontal_space(c: char) -> bool {
    c != '\n' && c != '\r' && c.is_whitespace()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Number of `#` in a raw string opener like `r#"` or `br"`
fn raw_string_prefix(rest: &str) -> Option<usize> {
    let after_b = rest.strip_prefix('b').unwrap_or(rest);
    let after_r = after_b.strip_prefix('r')?;
    let hashes = after_r.chars().take_while(|&c| c == '#').count();
    after_r[hashes..].starts_with('"').then_some(hashes)
}

/// `'a'`, `'\n'` or `'\u{1F600}'`, as opposed to a lifetime like `'a`
fn is_char_literal(rest: &str) -> bool {
    let mut chars = rest.chars().skip(1);
    match chars.next() {
        Some('\\') => true,
        Some(_) => chars.next() == Some('\''),
        None => false,
    }
}
