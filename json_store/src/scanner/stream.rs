use std::str::CharIndices;

use peekmore::PeekMoreIterator;

use super::constants::{is_structural, DOUBLE_QUOTE, ESCAPE};

pub type CharStream<'a> = PeekMoreIterator<CharIndices<'a>>;

pub trait PeekableExt {
    fn drop_while<P>(&mut self, predicate: P)
    where
        P: FnMut(&char) -> bool;

    fn next_significant(&mut self) -> Option<(usize, char)>;

    /**
     * read a string body whose opening quote is already consumed, returns
     * the byte range between the quotes. Escapes are skipped, not decoded.
     */
    fn read_quoted_span(&mut self) -> Option<(usize, usize)>;

    /**
     * read the rest of a bare literal starting at `start` with `first`,
     * returns the end offset (exclusive).
     */
    fn read_bare_span(&mut self, start: usize, first: char) -> usize;
}

impl<'a> PeekableExt for CharStream<'a> {
    fn drop_while<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&char) -> bool,
    {
        while let Some((_, c)) = self.peek() {
            if predicate(c) {
                self.next();
            } else {
                break;
            }
        }
    }

    fn next_significant(&mut self) -> Option<(usize, char)> {
        self.drop_while(|c| c.is_whitespace());
        self.next()
    }

    fn read_quoted_span(&mut self) -> Option<(usize, usize)> {
        let start = self.peek().map(|(i, _)| *i)?;
        let mut in_escape = false;
        for (i, c) in self.by_ref() {
            if in_escape {
                in_escape = false;
            } else if c == ESCAPE {
                in_escape = true;
            } else if c == DOUBLE_QUOTE {
                return Some((start, i));
            }
        }
        None
    }

    fn read_bare_span(&mut self, start: usize, first: char) -> usize {
        let mut end = start + first.len_utf8();
        while let Some((i, c)) = self.peek() {
            if c.is_whitespace() || *c == DOUBLE_QUOTE || is_structural(*c) {
                break;
            }
            end = *i + c.len_utf8();
            self.next();
        }
        end
    }
}
