//! Inner-markup codec: rendered text extraction and marker wrapping.
//!
//! Markup is split into tag and text runs. Only text runs are ever
//! rewritten; tags, attributes and comments are copied byte for byte.
//! Character references in text are decoded for matching and copied
//! verbatim to the output.

use std::borrow::Cow;
use std::ops::Range;

use crate::pattern::QueryPattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Tag(&'a str),
    Text(&'a str),
}

/// One rendered character and the raw bytes it came from.
#[derive(Debug, Clone)]
struct DecodedChar {
    ch: char,
    segment: usize,
    raw: Range<usize>,
}

/// Result of [`wrap_occurrences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub markup: String,
    /// Number of occurrences wrapped.
    pub wrapped: usize,
}

/// Rendered text of an inner-markup string.
pub fn text_content(markup: &str) -> String {
    decode(markup, &segments(markup)).into_iter().map(|d| d.ch).collect()
}

/// Wrap every occurrence of `pattern` in the rendered text of `markup`
/// between `open` and `close`.
///
/// An occurrence that crosses an inline tag is wrapped piecewise on each
/// side of the tag, so the output stays well nested.
pub fn wrap_occurrences(
    markup: &str,
    pattern: &QueryPattern,
    open: &str,
    close: &str,
) -> Highlighted {
    let segs = segments(markup);
    let decoded = decode(markup, &segs);

    let mut text = String::with_capacity(markup.len());
    let mut offsets = Vec::with_capacity(decoded.len());
    for d in &decoded {
        offsets.push(text.len());
        text.push(d.ch);
    }

    let occurrences = pattern.find_ranges(&text);
    if occurrences.is_empty() {
        return Highlighted {
            markup: markup.to_string(),
            wrapped: 0,
        };
    }

    // Occurrence index covering each decoded char.
    let mut owner: Vec<Option<usize>> = vec![None; decoded.len()];
    let mut occ = 0;
    for (i, offset) in offsets.iter().enumerate() {
        while occ < occurrences.len() && occurrences[occ].end <= *offset {
            occ += 1;
        }
        if occ < occurrences.len() && occurrences[occ].contains(offset) {
            owner[i] = Some(occ);
        }
    }

    let mut out = String::with_capacity(markup.len() + occurrences.len() * (open.len() + close.len()));
    let mut k = 0;
    for (idx, seg) in segs.iter().enumerate() {
        match seg {
            Segment::Tag(tag) => out.push_str(tag),
            Segment::Text(_) => {
                let mut current: Option<usize> = None;
                while k < decoded.len() && decoded[k].segment == idx {
                    if k > 0 && decoded[k - 1].raw == decoded[k].raw {
                        k += 1;
                        continue;
                    }
                    if owner[k] != current {
                        if current.is_some() {
                            out.push_str(close);
                        }
                        if owner[k].is_some() {
                            out.push_str(open);
                        }
                        current = owner[k];
                    }
                    out.push_str(&markup[decoded[k].raw.clone()]);
                    k += 1;
                }
                if current.is_some() {
                    out.push_str(close);
                }
            }
        }
    }

    Highlighted {
        markup: out,
        wrapped: occurrences.len(),
    }
}

/// Remove every `open` and `close` marker from `markup`.
pub fn strip_markers(markup: &str, open: &str, close: &str) -> String {
    markup.replace(open, "").replace(close, "")
}

/// Escape text for insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn segments(markup: &str) -> Vec<Segment<'_>> {
    let bytes = markup.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' && opens_tag(&bytes[i + 1..]) {
            if text_start < i {
                out.push(Segment::Text(&markup[text_start..i]));
            }
            let end = tag_end(markup, i);
            out.push(Segment::Tag(&markup[i..end]));
            i = end;
            text_start = end;
        } else {
            i += 1;
        }
    }
    if text_start < bytes.len() {
        out.push(Segment::Text(&markup[text_start..]));
    }
    out
}

fn opens_tag(rest: &[u8]) -> bool {
    matches!(rest.first(), Some(b) if b.is_ascii_alphabetic() || *b == b'/' || *b == b'!')
}

fn tag_end(markup: &str, start: usize) -> usize {
    let rest = &markup[start..];
    if rest.starts_with("<!--") {
        return rest
            .find("-->")
            .map(|p| start + p + 3)
            .unwrap_or(markup.len());
    }
    let mut quote: Option<u8> = None;
    for (off, b) in rest.bytes().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return start + off + 1,
            None => {}
        }
    }
    markup.len()
}

fn decode(markup: &str, segs: &[Segment<'_>]) -> Vec<DecodedChar> {
    let mut out = Vec::with_capacity(markup.len());
    let mut base = 0;
    for (idx, seg) in segs.iter().enumerate() {
        match seg {
            Segment::Tag(tag) => base += tag.len(),
            Segment::Text(text) => {
                let mut i = 0;
                while i < text.len() {
                    let Some(ch) = text[i..].chars().next() else {
                        break;
                    };
                    if ch == '&' {
                        if let Some((decoded, len)) = decode_entity(&text[i..]) {
                            // Multi-char references share one raw range.
                            for ch in decoded.chars() {
                                out.push(DecodedChar {
                                    ch,
                                    segment: idx,
                                    raw: base + i..base + i + len,
                                });
                            }
                            i += len;
                            continue;
                        }
                    }
                    out.push(DecodedChar {
                        ch,
                        segment: idx,
                        raw: base + i..base + i + ch.len_utf8(),
                    });
                    i += ch.len_utf8();
                }
                base += text.len();
            }
        }
    }
    out
}

/// Longest HTML5 entity name (`CounterClockwiseContourIntegral`) plus
/// the leading `&` and trailing `;`.
const MAX_REFERENCE_LEN: usize = 33;

/// Decode a character reference at the start of `raw` (which begins with
/// `&`). Returns the rendered text and the reference length in bytes.
///
/// Only `;`-terminated references are decoded. Numeric references to
/// NUL, surrogates or past U+10FFFF render as U+FFFD.
fn decode_entity(raw: &str) -> Option<(String, usize)> {
    let semi = raw.bytes().take(MAX_REFERENCE_LEN).position(|b| b == b';')?;
    let reference = &raw[..=semi];
    let name = &raw[1..semi];
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).unwrap_or(u32::MAX)
            }
            None if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => {
                num.parse::<u32>().unwrap_or(u32::MAX)
            }
            _ => return None,
        };
        let ch = match code {
            0 => char::REPLACEMENT_CHARACTER,
            code => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        return Some((ch.to_string(), semi + 1));
    }
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    match html_escape::decode_html_entities(reference) {
        Cow::Owned(decoded) if decoded != reference => Some((decoded, semi + 1)),
        _ => None,
    }
}
