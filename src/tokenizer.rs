//! Content stream tokenizer.
//!
//! Lexes raw (already decompressed) page content bytes into a flat sequence
//! of [`Token`]s. Lexing is best-effort: nothing here fails. Bytes that do
//! not start a recognised token are skipped, as are hex strings and name
//! objects, which the text pipeline never looks at.

use crate::utils::decode_literal;

/// A primitive content stream token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal `( ... )` string, escapes resolved and decoded to text.
    String(String),
    /// Numeric operand, kept as written (`-4704.6`, `.5`, `0`).
    Number(String),
    /// Operator keyword such as `BT`, `Tj`, `TJ`, `Td`.
    Operator(String),
    /// `[ ... ]` array. Only string and number children are kept.
    Array(Vec<Token>),
}

impl Token {
    /// Numeric value of a [`Token::Number`], if it parses.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Token::Number(n) => n.parse().ok(),
            _ => None,
        }
    }
}

/// Tokenize a page content stream.
pub fn tokenize(input: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let b = input[pos];
        match b {
            _ if is_whitespace(b) => pos += 1,
            b'%' => skip_comment(input, &mut pos),
            b'(' => {
                let s = parse_literal_string(input, &mut pos);
                tokens.push(Token::String(decode_literal(&s)));
            }
            b'[' => {
                pos += 1;
                tokens.push(Token::Array(parse_array(input, &mut pos)));
            }
            b'0'..=b'9' | b'+' | b'-' | b'.' => {
                tokens.push(Token::Number(parse_number(input, &mut pos)));
            }
            b'/' => skip_name(input, &mut pos),
            // Hex strings and dictionaries alike; `<<` nests.
            b'<' => skip_angle_brackets(input, &mut pos),
            _ if is_delimiter(b) => pos += 1,
            _ => {
                let start = pos;
                while pos < input.len() && !is_whitespace(input[pos]) && !is_delimiter(input[pos])
                {
                    pos += 1;
                }
                let word = String::from_utf8_lossy(&input[start..pos]).into_owned();
                tokens.push(Token::Operator(word));
            }
        }
    }

    tokens
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn skip_comment(input: &[u8], pos: &mut usize) {
    while *pos < input.len() && input[*pos] != b'\n' && input[*pos] != b'\r' {
        *pos += 1;
    }
}

fn skip_name(input: &[u8], pos: &mut usize) {
    *pos += 1;
    while *pos < input.len() && !is_whitespace(input[*pos]) && !is_delimiter(input[*pos]) {
        *pos += 1;
    }
}

fn skip_angle_brackets(input: &[u8], pos: &mut usize) {
    *pos += 1;
    let mut depth = 1u32;
    while *pos < input.len() && depth > 0 {
        match input[*pos] {
            b'<' => depth += 1,
            b'>' => depth -= 1,
            _ => {}
        }
        *pos += 1;
    }
}

/// Read a literal string starting at `(`, leaving `pos` after the closing `)`.
///
/// Unescaped parentheses nest and are kept as literal characters. An
/// unterminated string runs to the end of input.
fn parse_literal_string(input: &[u8], pos: &mut usize) -> Vec<u8> {
    *pos += 1;
    let mut result = Vec::new();
    let mut depth = 1u32;

    while *pos < input.len() {
        let b = input[*pos];
        *pos += 1;
        match b {
            b'\\' => {
                let Some(&next) = input.get(*pos) else {
                    break;
                };
                *pos += 1;
                match next {
                    b'n' => result.push(b'\n'),
                    b'r' => result.push(b'\r'),
                    b't' => result.push(b'\t'),
                    b'b' => result.push(0x08),
                    b'f' => result.push(0x0C),
                    b'0'..=b'7' => {
                        let mut value = u32::from(next - b'0');
                        for _ in 0..2 {
                            match input.get(*pos) {
                                Some(&d @ b'0'..=b'7') => {
                                    value = value * 8 + u32::from(d - b'0');
                                    *pos += 1;
                                }
                                _ => break,
                            }
                        }
                        result.push(value as u8);
                    }
                    // Line continuation.
                    b'\r' => {
                        if input.get(*pos) == Some(&b'\n') {
                            *pos += 1;
                        }
                    }
                    b'\n' => {}
                    // `\(`, `\)`, `\\` and unknown escapes yield the character itself.
                    other => result.push(other),
                }
            }
            b'(' => {
                depth += 1;
                result.push(b);
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                result.push(b);
            }
            _ => result.push(b),
        }
    }

    result
}

/// Read array children after the opening `[`, leaving `pos` after `]`.
fn parse_array(input: &[u8], pos: &mut usize) -> Vec<Token> {
    let mut children = Vec::new();

    while *pos < input.len() {
        let b = input[*pos];
        match b {
            b']' => {
                *pos += 1;
                break;
            }
            b'(' => {
                let s = parse_literal_string(input, pos);
                children.push(Token::String(decode_literal(&s)));
            }
            b'0'..=b'9' | b'+' | b'-' | b'.' => {
                children.push(Token::Number(parse_number(input, pos)));
            }
            b'[' => {
                // Nested arrays are consumed but not kept.
                *pos += 1;
                parse_array(input, pos);
            }
            b'<' => skip_angle_brackets(input, pos),
            b'/' => skip_name(input, pos),
            b'%' => skip_comment(input, pos),
            _ => *pos += 1,
        }
    }

    children
}

/// Read an optionally signed, optionally fractional number greedily.
fn parse_number(input: &[u8], pos: &mut usize) -> String {
    let start = *pos;
    if matches!(input[*pos], b'+' | b'-') {
        *pos += 1;
    }
    while *pos < input.len() && (input[*pos].is_ascii_digit() || input[*pos] == b'.') {
        *pos += 1;
    }
    String::from_utf8_lossy(&input[start..*pos]).into_owned()
}
