//! Reader for C-style byte array literals
//!
//! Sprite sheets and previously emitted icons are stored as text containing a
//! single `{ 0x.., 0x.., ... }` array. Only the text between the first `{`
//! and the last `}` is scanned. Comments are removed first, then every
//! `0xN`/`0xNN` literal is collected in order. Anything else in the braces
//! (descriptor fields, identifiers, decimal numbers) is skipped.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{IconError, Result};
use crate::pixels::PixelBuffer;

const BYTE_LITERAL: &str = r"(?i)\b0x([0-9a-f]{1,2})\b";

fn byte_literal_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BYTE_LITERAL).ok()).as_ref()
}

/// Parse the byte literals of the array in `text`.
///
/// Fails with `MalformedSource` if there is no `{ ... }` region or it
/// contains no byte literals.
///
/// ```
/// use iconsheet::source::read_byte_array;
///
/// let text = "const uint8_t map[] = { 0x00, 0xF8, /* 0x11 */ 0x1f };";
/// assert_eq!(read_byte_array(text).unwrap(), vec![0x00, 0xF8, 0x1F]);
/// assert!(read_byte_array("int x = 5;").is_err());
/// ```
pub fn read_byte_array(text: &str) -> Result<Vec<u8>> {
    let body = array_body(text).ok_or(IconError::MalformedSource)?;
    let body = strip_comments(body);
    let literal = byte_literal_regex().ok_or(IconError::MalformedSource)?;

    let bytes: Vec<u8> = literal
        .captures_iter(&body)
        .filter_map(|caps| caps.get(1))
        .filter_map(|digits| u8::from_str_radix(digits.as_str(), 16).ok())
        .collect();

    if bytes.is_empty() {
        return Err(IconError::MalformedSource);
    }
    Ok(bytes)
}

/// Read a byte array literal from a file.
pub fn read_byte_array_file(path: &Path) -> Result<Vec<u8>> {
    let text = std::fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
    read_byte_array(&text)
}

/// Read previously emitted icon data as a square RGB565 image.
///
/// Byte pairs are combined little-endian and the side length is inferred
/// from the pixel count.
pub fn read_square_icon(text: &str) -> Result<PixelBuffer> {
    let bytes = read_byte_array(text)?;
    PixelBuffer::from_square(PixelBuffer::pixels_from_le_bytes(&bytes))
}

/// Text between the first `{` and the last `}`.
fn array_body(text: &str) -> Option<&str> {
    let start = text.find('{')? + 1;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..end])
}

/// Remove `/* ... */` and `// ...` comments. Unterminated block comments run
/// to the end of the input.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' {
            match chars.peek() {
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for inner in chars.by_ref() {
                        if prev == '*' && inner == '/' {
                            break;
                        }
                        prev = inner;
                    }
                    out.push(' ');
                    continue;
                }
                Some('/') => {
                    for inner in chars.by_ref() {
                        if inner == '\n' {
                            break;
                        }
                    }
                    out.push('\n');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }

    out
}
