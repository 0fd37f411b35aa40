use crate::error::Error;
use crate::error::ErrorKind;
use std::fmt;
use std::io;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Keyword(String),
    Integer(i64),
    Float(f64),
}

impl Token {
    fn classify(word: &str) -> Token {
        if let Ok(i) = word.parse::<i64>() {
            return Token::Integer(i);
        }
        if let Ok(f) = word.parse::<f64>() {
            return Token::Float(f);
        }
        Token::Keyword(String::from(word))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(k) => write!(f, "{}", k),
            Token::Integer(i) => write!(f, "{}", i),
            Token::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Splits a MEDIT ASCII stream into whitespace-delimited tokens while keeping
/// track of lines.
///
/// The grammar mixes two ways of reading: comments and keywords are
/// recognized per line, values are read from the stream regardless of line
/// breaks. The lexer keeps the current line in a buffer with a cursor so
/// both can be served from the same input.
pub struct Lexer<R> {
    input: R,
    line: String,
    pos: usize,
    lineno: usize,
    /// Whether the buffered line still has a remainder that has not been
    /// looked at as a line yet.
    pending: bool,
}

impl<R: io::BufRead> Lexer<R> {
    pub fn new(input: R) -> Self {
        Lexer {
            input,
            line: String::new(),
            pos: 0,
            lineno: 0,
            pending: false,
        }
    }

    /// The 1-based number of the line under the cursor, 0 before the first
    /// read.
    pub fn lineno(&self) -> usize {
        self.lineno
    }

    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.lineno)
    }

    fn read_line(&mut self) -> Result<bool, Error> {
        self.line.clear();
        self.pos = 0;
        let n = self
            .input
            .read_line(&mut self.line)
            .map_err(|err| self.error(ErrorKind::Io(err)))?;
        if n == 0 {
            self.pending = false;
            return Ok(false);
        }
        let content_len = self.line.trim_end_matches(['\n', '\r']).len();
        self.line.truncate(content_len);
        self.lineno += 1;
        self.pending = true;
        Ok(true)
    }

    fn rest(&self) -> &str {
        &self.line[self.pos..]
    }

    /// Move to the next line that is neither blank nor a comment.
    ///
    /// The unread part of the current line is the first candidate. A line
    /// is a comment when its first character is `#`. Returns `false` when the
    /// input ends first.
    pub fn next_substantive_line(&mut self) -> Result<bool, Error> {
        loop {
            if !self.pending && !self.read_line()? {
                return Ok(false);
            }
            let rest = self.rest();
            if rest.trim().is_empty() || rest.starts_with('#') {
                self.pending = false;
                continue;
            }
            return Ok(true);
        }
    }

    /// The next token of the current line, or `None` at the end of it.
    pub fn line_token(&mut self) -> Option<Token> {
        if !self.pending {
            return None;
        }
        let rest = self.rest();
        let start = rest.len() - rest.trim_start().len();
        let rest = &rest[start..];
        if rest.is_empty() {
            self.pos = self.line.len();
            return None;
        }
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = Token::classify(&rest[..len]);
        self.pos += start + len;
        Some(token)
    }

    /// The next token of the stream, reading as many lines as needed.
    ///
    /// Comments are not recognized here.
    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        loop {
            if let Some(token) = self.line_token() {
                return Ok(Some(token));
            }
            if !self.read_line()? {
                return Ok(None);
            }
        }
    }

    /// Drop whatever is left on the current line.
    pub fn finish_line(&mut self) {
        self.pos = self.line.len();
        self.pending = false;
    }
}
