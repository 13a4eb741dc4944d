//! Top-level form boundary location.
//!
//! The splitter only needs byte spans for each top-level form. Hosts
//! usually get them from their own structural editor; [`BracketLocator`]
//! is a small reader-level scanner for Lisp-family sources that is good
//! enough for files on disk and for tests.

use std::ops::Range;

/// Reports the byte spans of top-level forms in source text.
///
/// Spans must be ordered, non-overlapping, in bounds and on char
/// boundaries.
pub trait FormLocator {
    /// Locate all top-level forms in `text`.
    fn locate(&self, text: &str) -> Vec<Range<usize>>;
}

impl<F> FormLocator for F
where
    F: Fn(&str) -> Vec<Range<usize>>,
{
    fn locate(&self, text: &str) -> Vec<Range<usize>> {
        self(text)
    }
}

/// Bracket-balancing locator for Lisp-family syntax.
///
/// Skips whitespace, commas and `;` comments between forms. A form is a
/// balanced `()`, `[]` or `{}` group, a string, a character literal or an
/// atom, optionally preceded by reader prefixes (`'`, `` ` ``, `~`, `~@`,
/// `@`, `#'`, `#_`, `#=`, `#?`, `#?@`), metadata (`^meta form`) or a tag
/// (`#inst "..."`). An unterminated form runs to the end of the text and a
/// stray closing bracket is a form of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketLocator;

impl BracketLocator {
    /// Create a new locator.
    pub fn new() -> Self {
        Self
    }
}

impl FormLocator for BracketLocator {
    fn locate(&self, text: &str) -> Vec<Range<usize>> {
        let scanner = Scanner::new(text);
        let mut spans = Vec::new();

        let mut pos = scanner.skip_trivia(0);
        while pos < scanner.len() {
            let end = scanner.read_form(pos);
            spans.push(pos..end);
            pos = scanner.skip_trivia(end);
        }

        spans
    }
}

fn is_whitespace(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b','
}

fn is_delimiter(b: u8) -> bool {
    is_whitespace(b) || matches!(b, b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'"' | b';')
}

/// Byte-level scanner. Every position it returns is a char boundary, since
/// it only stops on ASCII bytes or at the end of the text.
struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
        }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn byte(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    /// Skip whitespace, commas and line comments.
    fn skip_trivia(&self, mut pos: usize) -> usize {
        while let Some(b) = self.byte(pos) {
            if is_whitespace(b) {
                pos += 1;
            } else if b == b';' {
                pos = self.line_end(pos);
            } else {
                break;
            }
        }
        pos
    }

    /// Position of the next newline, or the end of the text.
    fn line_end(&self, pos: usize) -> usize {
        self.bytes[pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.len(), |i| pos + i)
    }

    /// Read one form, including any prefixes, starting at `start`.
    fn read_form(&self, start: usize) -> usize {
        let mut pos = start;
        let mut end = start;
        // Forms still owed: a metadata prefix owes one extra.
        let mut pending = 1usize;

        while pending > 0 {
            pos = self.skip_trivia(pos);
            if pos >= self.len() {
                break;
            }

            if let Some(n) = self.prefix_len(pos) {
                pos += n;
            } else if let Some(n) = self.meta_prefix_len(pos) {
                pos += n;
                pending += 1;
            } else if self.is_tag(pos) {
                pos = self.atom_end(pos + 1);
            } else {
                pos = self.read_simple(pos);
                pending -= 1;
            }
            end = pos;
        }

        end
    }

    fn prefix_len(&self, pos: usize) -> Option<usize> {
        match (self.byte(pos)?, self.byte(pos + 1)) {
            (b'\'' | b'`' | b'@', _) => Some(1),
            (b'~', Some(b'@')) => Some(2),
            (b'~', _) => Some(1),
            (b'#', Some(b'\'' | b'_' | b'=')) => Some(2),
            (b'#', Some(b'?')) if self.byte(pos + 2) == Some(b'@') => Some(3),
            (b'#', Some(b'?')) => Some(2),
            _ => None,
        }
    }

    fn meta_prefix_len(&self, pos: usize) -> Option<usize> {
        match (self.byte(pos)?, self.byte(pos + 1)) {
            (b'^', _) => Some(1),
            (b'#', Some(b'^')) => Some(2),
            _ => None,
        }
    }

    fn is_tag(&self, pos: usize) -> bool {
        self.byte(pos) == Some(b'#')
            && self
                .byte(pos + 1)
                .is_some_and(|b| b.is_ascii_alphabetic() || b == b':')
    }

    /// Read a form without prefixes.
    fn read_simple(&self, pos: usize) -> usize {
        match (self.bytes[pos], self.byte(pos + 1)) {
            (b'(' | b'[' | b'{', _) => self.balanced_end(pos),
            (b')' | b']' | b'}', _) => pos + 1,
            (b'"', _) => self.string_end(pos),
            (b'\\', _) => self.char_end(pos),
            (b'#', Some(b'(' | b'{')) => self.balanced_end(pos + 1),
            (b'#', Some(b'"')) => self.string_end(pos + 1),
            _ => self.atom_end(pos),
        }
    }

    /// End of the bracket group opening at `pos`.
    fn balanced_end(&self, pos: usize) -> usize {
        let mut depth = 0usize;
        let mut i = pos;

        while let Some(b) = self.byte(i) {
            match b {
                b'(' | b'[' | b'{' => {
                    depth += 1;
                    i += 1;
                }
                b')' | b']' | b'}' => {
                    depth -= 1;
                    i += 1;
                    if depth == 0 {
                        return i;
                    }
                }
                b'"' => i = self.string_end(i),
                b'\\' => i = self.char_end(i),
                b';' => i = self.line_end(i),
                _ => i += 1,
            }
        }

        self.len()
    }

    /// End of the string literal opening at `pos`.
    fn string_end(&self, pos: usize) -> usize {
        let mut i = pos + 1;
        while let Some(b) = self.byte(i) {
            match b {
                b'\\' => i += 2,
                b'"' => return i + 1,
                _ => i += 1,
            }
        }
        self.len()
    }

    /// End of the character literal starting with `\` at `pos`.
    fn char_end(&self, pos: usize) -> usize {
        match self.text[pos + 1..].chars().next() {
            Some(c) => self.atom_end(pos + 1 + c.len_utf8()),
            None => self.len(),
        }
    }

    /// End of the atom at `pos`.
    fn atom_end(&self, pos: usize) -> usize {
        self.bytes[pos..]
            .iter()
            .position(|&b| is_delimiter(b))
            .map_or(self.len(), |i| pos + i)
    }
}
