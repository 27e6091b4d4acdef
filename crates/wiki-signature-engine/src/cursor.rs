/// A byte cursor over page text or macro markup.
///
/// Every delimiter this crate scans for (`~`, `[[`, `]]`, `|`, `:`) is ASCII,
/// so byte positions handed out by the cursor always fall on UTF-8
/// character boundaries when they sit next to one of those delimiters.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes consecutive occurrences of `b` and returns how many were eaten.
    pub fn eat_while(&mut self, b: u8) -> usize {
        let start = self.i;
        while self.peek() == Some(b) {
            self.i += 1;
        }
        self.i - start
    }

    /// Moves to the next occurrence of `b` at or after the current position,
    /// or to end of input when there is none.
    pub fn skip_to(&mut self, b: u8) -> bool {
        match self.s.as_bytes()[self.i.min(self.s.len())..]
            .iter()
            .position(|&c| c == b)
        {
            Some(offset) => {
                self.i += offset;
                true
            }
            None => {
                self.i = self.s.len();
                false
            }
        }
    }

    /// Returns the text between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.s[start..self.i.min(self.s.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("[[user:joro]]");
        assert!(cur.starts_with(b"[["));
        assert!(!cur.starts_with(b"]]"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert!(cur.starts_with(b""));
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let mut cur = Cursor::new("ab");
        assert!(!cur.starts_with(b"abcdef"));
        cur.bump();
        assert!(!cur.starts_with(b"bc"));
        assert!(cur.starts_with(b"b"));
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn eat_while_counts_run() {
        let mut cur = Cursor::new("~~~~x~");
        assert_eq!(cur.eat_while(b'~'), 4);
        assert_eq!(cur.peek(), Some(b'x'));
        assert_eq!(cur.eat_while(b'~'), 0);
    }

    #[test]
    fn skip_to_finds_next_byte() {
        let mut cur = Cursor::new("ab~cd");
        assert!(cur.skip_to(b'~'));
        assert_eq!(cur.pos(), 2);
        // Already on the byte: no movement.
        assert!(cur.skip_to(b'~'));
        assert_eq!(cur.pos(), 2);
    }

    #[test]
    fn skip_to_missing_byte_goes_to_eof() {
        let mut cur = Cursor::new("abc");
        assert!(!cur.skip_to(b'~'));
        assert!(cur.eof());
    }

    #[test]
    fn skip_to_respects_multibyte_text() {
        let mut cur = Cursor::new("héllo ~~~");
        assert!(cur.skip_to(b'~'));
        assert_eq!(cur.slice_from(0), "héllo ");
    }
}
