//! Escape sequences inside message fields
//!
//!     With the canonical escape marker `\`:
//!
//!         \\  \#  \>  \:      reserved characters
//!         \n  \r              line feed, carriage return (anywhere)
//!         \s  \t  \u{A0}      space, tab, other whitespace (at field boundaries)
//!
//!     The serializer writes the boundary forms only where line trimming would
//!     otherwise drop the character. The lexer accepts every form anywhere.

use std::fmt::Write;

use crate::cfml::grammar::Grammar;

/// Escape a field value for the given grammar
pub fn escape_field(grammar: &Grammar, value: &str) -> String {
    let escape = grammar.dialect().escape;
    let last = value.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(value.len());

    for (i, c) in value.chars().enumerate() {
        let at_boundary = i == 0 || i == last;
        if grammar.is_reserved(c) {
            out.push(escape);
            out.push(c);
        } else if c == '\n' {
            out.push(escape);
            out.push('n');
        } else if c == '\r' {
            out.push(escape);
            out.push('r');
        } else if at_boundary && c.is_whitespace() {
            out.push(escape);
            match c {
                ' ' => out.push('s'),
                '\t' => out.push('t'),
                other => {
                    // Infallible for String
                    let _ = write!(out, "u{{{:04X}}}", other as u32);
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Decode the part of an escape sequence after the escape marker
pub fn decode_escape(grammar: &Grammar, sequence: &str) -> Option<char> {
    if let Some(hex) = sequence
        .strip_prefix("u{")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }

    let mut chars = sequence.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        's' => Some(' '),
        't' => Some('\t'),
        c if grammar.is_reserved(c) => Some(c),
        _ => None,
    }
}
