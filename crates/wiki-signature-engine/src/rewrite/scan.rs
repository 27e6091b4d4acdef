use crate::cursor::Cursor;

use super::kinds::{SignatureKind, Tilde};

/// One maximal run of tildes found in page text.
///
/// Only runs of at least [`Tilde::MIN_RUN`] characters are ever produced;
/// shorter runs are ordinary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TildeRun {
    /// Byte offset of the first tilde.
    pub start: usize,
    /// Number of consecutive tildes.
    pub len: usize,
}

impl TildeRun {
    /// Byte offset one past the last tilde.
    pub fn end(self) -> usize {
        self.start + self.len
    }

    /// The signature this run expands to, if its length is one of the
    /// recognised forms.
    pub fn kind(self) -> Option<SignatureKind> {
        SignatureKind::from_run_len(self.len)
    }

    pub fn is_recognized(self) -> bool {
        self.kind().is_some()
    }
}

/// Lazy forward scan over the tilde runs of a text.
pub struct TildeRuns<'a> {
    cur: Cursor<'a>,
}

impl Iterator for TildeRuns<'_> {
    type Item = TildeRun;

    fn next(&mut self) -> Option<TildeRun> {
        while self.cur.skip_to(Tilde::CHAR) {
            let start = self.cur.pos();
            let len = self.cur.eat_while(Tilde::CHAR);
            if len >= Tilde::MIN_RUN {
                return Some(TildeRun { start, len });
            }
        }
        None
    }
}

/// Returns every tilde run of three or more characters in `text`, in order.
///
/// The scan visits each byte once; runs of one or two tildes are skipped.
pub fn tilde_runs(text: &str) -> TildeRuns<'_> {
    TildeRuns {
        cur: Cursor::new(text),
    }
}
