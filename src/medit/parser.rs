use super::lexer::Lexer;
use super::lexer::Token;
use super::ReadOptions;
use super::Section;
use super::TetMesh;
use crate::error::Error;
use crate::error::ErrorKind;
use std::io;

const FORMAT_VERSION: i64 = 1;
const DIMENSION: i64 = 3;

/// Upper bound on the number of records allocated up front for a section.
///
/// Counts come from the file, the records themselves may not.
const MAX_PREALLOCATED_RECORDS: usize = 1 << 20;

fn unexpected<R: io::BufRead>(lexer: &Lexer<R>, expected: &str, found: &Token) -> Error {
    lexer.error(ErrorKind::UnexpectedToken {
        expected: String::from(expected),
        found: found.to_string(),
    })
}

fn truncated<R: io::BufRead>(lexer: &Lexer<R>, expected: String, found: Option<&Token>) -> Error {
    lexer.error(ErrorKind::Truncated {
        expected,
        found: found.map(Token::to_string),
    })
}

/// Skip comments and check that the next line starts with `keyword`.
fn expect_keyword<R: io::BufRead>(lexer: &mut Lexer<R>, keyword: &str) -> Result<(), Error> {
    let expected = format!("{:?}", keyword);
    if !lexer.next_substantive_line()? {
        return Err(truncated(lexer, expected, None));
    }
    match lexer.line_token() {
        Some(Token::Keyword(word)) if word == keyword => Ok(()),
        Some(token) => Err(unexpected(lexer, &expected, &token)),
        None => Err(truncated(lexer, expected, None)),
    }
}

/// Read the token that goes with a keyword.
///
/// A number on the keyword line is taken as the value. Otherwise the rest of
/// that line is dropped and the value is the next token of the stream.
/// Returns the token and whether it was found on the keyword line.
fn keyword_value<R: io::BufRead>(lexer: &mut Lexer<R>, what: &str) -> Result<(Token, bool), Error> {
    match lexer.line_token() {
        Some(token @ (Token::Integer(_) | Token::Float(_))) => return Ok((token, true)),
        Some(_) => lexer.finish_line(),
        None => {}
    }
    match lexer.next_token()? {
        Some(token) => Ok((token, false)),
        None => Err(truncated(lexer, String::from(what), None)),
    }
}

fn read_header_entry<R: io::BufRead>(
    lexer: &mut Lexer<R>,
    keyword: &'static str,
    supported: i64,
) -> Result<(), Error> {
    expect_keyword(lexer, keyword)?;
    let what = format!("a value for {}", keyword);
    let (token, same_line) = keyword_value(lexer, &what)?;
    let value = match token {
        Token::Integer(value) => value,
        token => return Err(unexpected(lexer, &what, &token)),
    };
    if same_line {
        lexer.finish_line();
    }
    tracing::trace!(keyword, value, "header entry");
    if value != supported {
        return Err(lexer.error(ErrorKind::Unsupported {
            keyword,
            expected: supported,
            found: value,
        }));
    }
    Ok(())
}

/// Check the `MeshVersionFormatted 1` and `Dimension 3` declarations.
pub fn read_header<R: io::BufRead>(lexer: &mut Lexer<R>) -> Result<(), Error> {
    read_header_entry(lexer, "MeshVersionFormatted", FORMAT_VERSION)?;
    read_header_entry(lexer, "Dimension", DIMENSION)?;
    Ok(())
}

fn read_count<R: io::BufRead>(lexer: &mut Lexer<R>, section: Section) -> Result<usize, Error> {
    let what = format!("number of {}", section.keyword().to_ascii_lowercase());
    match keyword_value(lexer, &what)? {
        (Token::Integer(count), _) => {
            usize::try_from(count).map_err(|_| unexpected(lexer, &what, &Token::Integer(count)))
        }
        (token @ Token::Keyword(_), _) => Err(truncated(lexer, what, Some(&token))),
        (token, _) => Err(unexpected(lexer, &what, &token)),
    }
}

/// Describes the field being read, for diagnostics.
struct Field {
    section: Section,
    record: usize,
    name: &'static str,
}

impl Field {
    fn describe(&self) -> String {
        format!(
            "{} of record {} in {}",
            self.name,
            self.record + 1,
            self.section,
        )
    }
}

fn read_integer<R: io::BufRead>(lexer: &mut Lexer<R>, field: &Field) -> Result<i64, Error> {
    match lexer.next_token()? {
        Some(Token::Integer(i)) => Ok(i),
        Some(token @ Token::Float(_)) => Err(unexpected(lexer, &field.describe(), &token)),
        found => Err(truncated(lexer, field.describe(), found.as_ref())),
    }
}

fn read_coordinate<R: io::BufRead>(lexer: &mut Lexer<R>, field: &Field) -> Result<f64, Error> {
    match lexer.next_token()? {
        Some(Token::Integer(i)) => Ok(i as f64),
        Some(Token::Float(f)) => Ok(f),
        found => Err(truncated(lexer, field.describe(), found.as_ref())),
    }
}

/// Convert one 1-based index from the file to a 0-based one.
fn read_index<R: io::BufRead>(lexer: &mut Lexer<R>, field: &Field) -> Result<i64, Error> {
    let index = read_integer(lexer, field)?;
    index.checked_sub(1).ok_or_else(|| {
        lexer.error(ErrorKind::Cast {
            value: index.to_string(),
            target: "a 0-based i64 index",
        })
    })
}

/// Read the keyword, the count and `count` records of `N` fields followed by
/// a reference field, which is discarded.
fn read_section<R, T, const N: usize>(
    lexer: &mut Lexer<R>,
    section: Section,
    field_name: &'static str,
    mut read_field: impl FnMut(&mut Lexer<R>, &Field) -> Result<T, Error>,
) -> Result<Vec<[T; N]>, Error>
where
    R: io::BufRead,
    T: Copy + Default,
{
    debug_assert_eq!(section.arity(), N);

    expect_keyword(lexer, section.keyword())?;
    let count = read_count(lexer, section)?;
    tracing::debug!(%section, count, lineno = lexer.lineno(), "reading section");

    let mut records = Vec::with_capacity(usize::min(count, MAX_PREALLOCATED_RECORDS));
    for record in 0..count {
        let mut field = Field {
            section,
            record,
            name: field_name,
        };
        let mut values = [T::default(); N];
        for value in &mut values {
            *value = read_field(lexer, &field)?;
        }
        field.name = "reference";
        let _reference = read_coordinate(lexer, &field)?;
        records.push(values);
    }

    Ok(records)
}

fn check_indices<const N: usize>(
    section: Section,
    records: &[[i64; N]],
    vertex_count: usize,
) -> Result<(), Error> {
    for (record, indices) in records.iter().enumerate() {
        let out_of_range = indices
            .iter()
            .find(|&&index| usize::try_from(index).map_or(true, |i| vertex_count <= i));
        if let Some(&index) = out_of_range {
            return Err(Error::new(ErrorKind::IndexOutOfRange {
                section,
                record,
                index,
                vertex_count,
            }));
        }
    }
    Ok(())
}

pub fn parse_ascii<R: io::BufRead>(input: R, options: &ReadOptions) -> Result<TetMesh, Error> {
    let mut lexer = Lexer::new(input);

    read_header(&mut lexer)?;
    let vertices: Vec<[f64; 3]> =
        read_section(&mut lexer, Section::Vertices, "coordinate", read_coordinate)?;
    let triangles: Vec<[i64; 3]> =
        read_section(&mut lexer, Section::Triangles, "index", read_index)?;
    let tetrahedra: Vec<[i64; 4]> =
        read_section(&mut lexer, Section::Tetrahedra, "index", read_index)?;

    if options.check_indices {
        check_indices(Section::Triangles, &triangles, vertices.len())?;
        check_indices(Section::Tetrahedra, &tetrahedra, vertices.len())?;
    }

    Ok(TetMesh {
        vertices,
        tetrahedra,
        triangles,
    })
}
