//! Cursor-based scanner for LVue templates.
//!
//! Each `match_*` function inspects the unconsumed remainder of the source
//! and reports how many bytes the construct at its head spans. Matching never
//! consumes anything; the caller advances the [`Scanner`] once it has decided
//! what to do with the match. Every candidate is re-derived from the current
//! remainder, so there is no hidden matcher state between steps.

use memchr::{memchr, memchr2, memmem};

/// Character codes for fast comparison
pub mod char_codes {
    pub const DOUBLE_QUOTE: u8 = 0x22;
    pub const SINGLE_QUOTE: u8 = 0x27;
    pub const DASH: u8 = 0x2D;
    pub const DOT: u8 = 0x2E;
    pub const SLASH: u8 = 0x2F;
    pub const COLON: u8 = 0x3A;
    pub const LT: u8 = 0x3C;
    pub const EQ: u8 = 0x3D;
    pub const GT: u8 = 0x3E;
    pub const AT: u8 = 0x40;
    pub const UNDERSCORE: u8 = 0x5F;
}

use char_codes::*;

const DOCTYPE_OPEN: &[u8] = b"<!DOCTYPE";
const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &[u8] = b"-->";

/// Check if character is a word character (`[A-Za-z0-9_]`)
#[inline]
pub fn is_word_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == UNDERSCORE
}

/// Check if character may continue a tag name
#[inline]
pub fn is_tag_name_char(c: u8) -> bool {
    is_word_char(c) || c == DASH
}

/// Check if character may start an attribute name
#[inline]
pub fn is_attr_name_start(c: u8) -> bool {
    is_word_char(c) || c == COLON || c == AT
}

/// Check if character may continue an attribute name
#[inline]
pub fn is_attr_name_char(c: u8) -> bool {
    is_word_char(c) || c == DASH || c == COLON || c == DOT
}

/// Whether an attribute name has binding syntax (`:value`, `@click`,
/// `v-bind:class`)
#[inline]
pub fn is_binding_name(name: &str) -> bool {
    name.bytes().any(|c| c == COLON || c == AT)
}

/// Cursor over an immutable template source.
///
/// The cursor starts past leading whitespace and stops before trailing
/// whitespace, so positions always refer to the untrimmed source.
#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    source: &'s str,
    pos: usize,
    end: usize,
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        let pos = source.len() - source.trim_start().len();
        let end = source.trim_end().len().max(pos);
        Self { source, pos, end }
    }

    /// The full, untrimmed source
    #[inline]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Byte offset of the cursor
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed remainder
    #[inline]
    pub fn rest(&self) -> &'s str {
        &self.source[self.pos..self.end]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    #[inline]
    pub fn advance(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.end);
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }
}

/// One attribute as written in a start tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'s> {
    pub name: &'s str,
    /// Quoted value, trimmed. `None` for value-less attributes.
    pub value: Option<&'s str>,
}

/// `<!DOCTYPE ...>`, keyword matched case-insensitively. Yields the trimmed
/// declaration body.
pub fn match_doctype(rest: &str) -> Option<(usize, &str)> {
    let bytes = rest.as_bytes();
    let keyword = bytes.get(..DOCTYPE_OPEN.len())?;
    if !keyword.eq_ignore_ascii_case(DOCTYPE_OPEN) {
        return None;
    }
    let body_start = DOCTYPE_OPEN.len();
    let close = body_start + memchr(GT, &bytes[body_start..])?;
    Some((close + 1, rest[body_start..close].trim()))
}

/// `<!-- ... -->`, ending at the first `-->`. Yields the body verbatim.
pub fn match_comment(rest: &str) -> Option<(usize, &str)> {
    if !rest.starts_with(COMMENT_OPEN) {
        return None;
    }
    let body_start = COMMENT_OPEN.len();
    let close = body_start + memmem::find(&rest.as_bytes()[body_start..], COMMENT_CLOSE)?;
    Some((close + COMMENT_CLOSE.len(), &rest[body_start..close]))
}

fn tag_name_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(&c) if is_word_char(c) => {
            1 + bytes[1..]
                .iter()
                .take_while(|&&c| is_tag_name_char(c))
                .count()
        }
        _ => 0,
    }
}

/// `<name` at the head of a start tag. Yields the tag name.
pub fn match_start_tag_open(rest: &str) -> Option<(usize, &str)> {
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&LT) {
        return None;
    }
    let len = tag_name_len(&bytes[1..]);
    if len == 0 {
        return None;
    }
    Some((1 + len, &rest[1..1 + len]))
}

/// `>` or `/>` ending a start tag. Yields whether the tag was written
/// self-closing.
pub fn match_tag_close(rest: &str) -> Option<(usize, bool)> {
    if rest.starts_with("/>") {
        Some((2, true))
    } else if rest.starts_with('>') {
        Some((1, false))
    } else {
        None
    }
}

/// One attribute: `name`, optionally followed by `="value"` or `='value'`.
///
/// When the value part is incomplete (no `=`, no quote, or no closing quote)
/// only the name is matched; whatever follows is left for the caller to
/// reject.
pub fn match_attribute(rest: &str) -> Option<(usize, Attribute<'_>)> {
    let bytes = rest.as_bytes();
    match bytes.first() {
        Some(&c) if is_attr_name_start(c) => {}
        _ => return None,
    }
    let name_len = 1 + bytes[1..]
        .iter()
        .take_while(|&&c| is_attr_name_char(c))
        .count();
    let name = &rest[..name_len];

    match match_attribute_value(&rest[name_len..]) {
        Some((value_len, value)) => Some((
            name_len + value_len,
            Attribute {
                name,
                value: Some(value),
            },
        )),
        None => Some((name_len, Attribute { name, value: None })),
    }
}

fn match_attribute_value(rest: &str) -> Option<(usize, &str)> {
    let after_ws = rest.trim_start();
    let mut offset = rest.len() - after_ws.len();
    if after_ws.as_bytes().first() != Some(&EQ) {
        return None;
    }
    offset += 1;

    let after_eq = rest[offset..].trim_start();
    offset = rest.len() - after_eq.len();
    let quote = *after_eq.as_bytes().first()?;
    if quote != DOUBLE_QUOTE && quote != SINGLE_QUOTE {
        return None;
    }
    let value_start = offset + 1;
    let value_end = value_start + memchr(quote, &rest.as_bytes()[value_start..])?;
    Some((value_end + 1, rest[value_start..value_end].trim()))
}

/// `</name>`. Yields the tag name.
pub fn match_end_tag(rest: &str) -> Option<(usize, &str)> {
    let bytes = rest.as_bytes();
    if !rest.starts_with("</") {
        return None;
    }
    let len = tag_name_len(&bytes[2..]);
    if len == 0 || bytes.get(2 + len) != Some(&GT) {
        return None;
    }
    Some((2 + len + 1, &rest[2..2 + len]))
}

/// Maximal run of text: everything up to the next `<` or `/`.
pub fn match_text(rest: &str) -> Option<usize> {
    let len = memchr2(LT, SLASH, rest.as_bytes()).unwrap_or(rest.len());
    (len > 0).then_some(len)
}

/// Lookahead deciding whether the start tag at the head of `rest` is paired.
///
/// The element is paired when a `</name>` appears anywhere after the first
/// `>` following `<name`; otherwise it is void and completes at open. This
/// rescans the remainder for every start tag, which is quadratic in the worst
/// case and fine for component-sized templates.
pub fn has_closing_tag(rest: &str, name: &str) -> bool {
    let bytes = rest.as_bytes();
    let open_len = 1 + name.len();
    if bytes.len() < open_len {
        return false;
    }
    let Some(gt) = memchr(GT, &bytes[open_len..]) else {
        return false;
    };
    let mut needle = Vec::with_capacity(name.len() + 3);
    needle.extend_from_slice(b"</");
    needle.extend_from_slice(name.as_bytes());
    needle.push(GT);
    memmem::find(&bytes[open_len + gt + 1..], &needle).is_some()
}
