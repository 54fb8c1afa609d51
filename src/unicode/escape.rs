//! Backslash escape decoding.
//!
//! Supported forms: `\uhhhh`, `\Uhhhhhhhh`, `\xhh`, `\x{h...}`, octal
//! `\ooo`, the C escapes `\a \b \e \f \n \r \t \v`, and `\c` followed by a
//! control letter. A `\uhhhh` high surrogate followed by a `\uhhhh` low
//! surrogate combines into one codepoint. Any other escaped character
//! stands for itself.

use crate::error::{Error, Result};

/// Decode backslash escapes in `text`.
pub fn unescape(text: &str) -> Result<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < bytes.len() {
        let Some(rel) = text[i..].find('\\') else {
            out.push_str(&text[i..]);
            break;
        };
        out.push_str(&text[i..i + rel]);
        let esc = i + rel;
        let (value, next) = decode_one(text, esc)?;

        // Combine an escaped surrogate pair.
        let value = if (0xD800..0xDC00).contains(&value) && text[next..].starts_with("\\u") {
            let (low, after) = decode_one(text, next)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(Error::InvalidEscape(esc));
            }
            i = after;
            0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00)
        } else {
            i = next;
            value
        };

        out.push(char::from_u32(value).ok_or(Error::InvalidEscape(esc))?);
    }

    Ok(out)
}

/// Decode the escape starting at byte `at` (a backslash). Returns the scalar
/// value and the byte offset just after the escape.
fn decode_one(text: &str, at: usize) -> Result<(u32, usize)> {
    let rest = &text[at + 1..];
    let Some(c) = rest.chars().next() else {
        return Err(Error::InvalidEscape(at));
    };
    let body = at + 1 + c.len_utf8();

    let simple = |v: u32| Ok((v, body));
    match c {
        'u' => hex_fixed(text, body, 4, at),
        'U' => hex_fixed(text, body, 8, at),
        'x' if text[body..].starts_with('{') => {
            let close = text[body..].find('}').ok_or(Error::InvalidEscape(at))?;
            let digits = &text[body + 1..body + close];
            if digits.is_empty() || digits.len() > 8 {
                return Err(Error::InvalidEscape(at));
            }
            let v = u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidEscape(at))?;
            Ok((v, body + close + 1))
        }
        'x' => {
            let n = hex_run(&text[body..], 2);
            if n == 0 {
                return Err(Error::InvalidEscape(at));
            }
            let v = u32::from_str_radix(&text[body..body + n], 16)
                .map_err(|_| Error::InvalidEscape(at))?;
            Ok((v, body + n))
        }
        '0'..='7' => {
            let start = at + 1;
            let n = text[start..]
                .bytes()
                .take(3)
                .take_while(|b| (b'0'..=b'7').contains(b))
                .count();
            let v = u32::from_str_radix(&text[start..start + n], 8)
                .map_err(|_| Error::InvalidEscape(at))?;
            Ok((v, start + n))
        }
        'c' => {
            let ctl = text[body..]
                .chars()
                .next()
                .filter(char::is_ascii)
                .ok_or(Error::InvalidEscape(at))?;
            Ok((u32::from(ctl) & 0x1F, body + 1))
        }
        'a' => simple(0x07),
        'b' => simple(0x08),
        'e' => simple(0x1B),
        'f' => simple(0x0C),
        'n' => simple(0x0A),
        'r' => simple(0x0D),
        't' => simple(0x09),
        'v' => simple(0x0B),
        other => simple(u32::from(other)),
    }
}

fn hex_fixed(text: &str, body: usize, width: usize, at: usize) -> Result<(u32, usize)> {
    if hex_run(&text[body..], width) != width {
        return Err(Error::InvalidEscape(at));
    }
    let v = u32::from_str_radix(&text[body..body + width], 16)
        .map_err(|_| Error::InvalidEscape(at))?;
    Ok((v, body + width))
}

fn hex_run(s: &str, max: usize) -> usize {
    s.bytes().take(max).take_while(u8::is_ascii_hexdigit).count()
}
