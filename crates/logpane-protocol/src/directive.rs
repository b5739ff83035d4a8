//! Substitution directive grammar.
//!
//! Patterns embed printf-style directives: `%` followed by one of
//! `c s o O i d f`, or a precision form `%.<digits>` ending in `i`, `d` or
//! `f`. Three operations share the grammar:
//!
//! - **Scanning** ([`Tokenizer`]) splits a pattern into literal text and
//!   directives for the renderer. The scan is escape-blind: in `%%d` the
//!   second percent still starts a directive.
//! - **Detection** ([`contains_directive`]) decides whether a string is an
//!   explicit pattern. Detection honors escapes: a directive counts only
//!   when its percent is not immediately preceded by another percent.
//! - **Unescaping** ([`unescape`]) collapses a run of two or more percents
//!   before a directive tail into a single percent, applied once to string
//!   arguments when a pattern is auto-generated.
//!
//! # Example
//!
//! ```
//! use logpane_protocol::{Directive, Token, Tokenizer};
//!
//! let tokens: Vec<_> = Tokenizer::new("count: %.3d").collect();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::Text("count: "),
//!         Token::Directive(Directive::Integer { precision: 3 }),
//!     ]
//! );
//! ```

/// A recognized substitution directive.
///
/// `%o` and `%O` are a single variant (both render through the object
/// encoder), and `%i`/`%d` are likewise one variant. A missing precision is
/// zero: no padding for integers, bare integer-part significant digits for
/// floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `%c`: opens an inline style span.
    Style,
    /// `%s`: HTML-escaped substitution text.
    Text,
    /// `%o` / `%O`: object-encoder markup.
    Object,
    /// `%i` / `%d` / `%.Ni` / `%.Nd`: integer, zero-padded to `precision`.
    Integer { precision: usize },
    /// `%f` / `%.Nf`: float at `precision` extra significant digits.
    Float { precision: usize },
}

impl Directive {
    /// Tries to match a directive tail right after a `%`.
    ///
    /// Returns the directive and the number of bytes consumed after the
    /// percent, or `None` when the percent is literal text.
    pub fn match_at(rest: &str) -> Option<(Directive, usize)> {
        let mut chars = rest.chars();
        match chars.next()? {
            'c' => Some((Directive::Style, 1)),
            's' => Some((Directive::Text, 1)),
            'o' | 'O' => Some((Directive::Object, 1)),
            'i' | 'd' => Some((Directive::Integer { precision: 0 }, 1)),
            'f' => Some((Directive::Float { precision: 0 }, 1)),
            '.' => {
                let digits: &str = {
                    let tail = &rest[1..];
                    let len = tail.bytes().take_while(u8::is_ascii_digit).count();
                    &tail[..len]
                };
                if digits.is_empty() {
                    return None;
                }
                let precision: usize = digits.parse().ok()?;
                let consumed = 1 + digits.len() + 1;
                match rest[1 + digits.len()..].chars().next()? {
                    'i' | 'd' => Some((Directive::Integer { precision }, consumed)),
                    'f' => Some((Directive::Float { precision }, consumed)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Token types produced by the pattern tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal pattern text, copied through (escaped at emission).
    Text(&'a str),
    /// A directive consuming one positional argument.
    Directive(Directive),
}

/// Splits a substitution pattern into text runs and directives.
///
/// Percents that do not start a recognized directive are literal text. The
/// scan does not honor `%%` escapes; only [`contains_directive`] does.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let rest = &self.input[self.pos..];
        if let Some(tail) = rest.strip_prefix('%') {
            if let Some((directive, consumed)) = Directive::match_at(tail) {
                self.pos += 1 + consumed;
                return Some(Token::Directive(directive));
            }
        }

        // Literal text runs up to the next position where a directive
        // actually starts; a lone or trailing percent stays text.
        let mut end = self.input.len();
        for (offset, ch) in rest.char_indices() {
            if offset == 0 {
                continue;
            }
            if ch == '%' && Directive::match_at(&rest[offset + 1..]).is_some() {
                end = self.pos + offset;
                break;
            }
        }
        let text = &self.input[self.pos..end];
        self.pos = end;
        Some(Token::Text(text))
    }
}

/// Whether `pattern` contains an un-escaped directive.
///
/// This is the explicit-pattern test applied to the first string argument
/// of a formattable command: a percent immediately preceded by another
/// percent does not count.
pub fn contains_directive(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] != b'%' {
            continue;
        }
        if i > 0 && bytes[i - 1] == b'%' {
            continue;
        }
        if Directive::match_at(&pattern[i + 1..]).is_some() {
            return true;
        }
    }
    false
}

/// Collapses escaped directives (`%%s`, `%%%%d`, ...) to single-percent form.
///
/// A run of two or more percents immediately followed by a directive tail
/// becomes one percent plus the tail; every other percent run is untouched.
/// Applied exactly once per string argument during pattern auto-generation,
/// so text that spelled out an escaped directive substitutes back to its
/// single-percent form.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        let run = rest[idx..].bytes().take_while(|&b| b == b'%').count();
        let after = &rest[idx + run..];
        if run >= 2 {
            if let Some((_, consumed)) = Directive::match_at(after) {
                out.push('%');
                out.push_str(&after[..consumed]);
                rest = &after[consumed..];
                continue;
            }
        }
        out.push_str(&rest[idx..idx + run]);
        rest = after;
    }
    out.push_str(rest);
    out
}
