//! Delimiters and the run-length table for signatures.
//!
//! All signature syntax lives here; the scanner and rewriter never hardcode
//! `~` or the macro-call text.

pub struct Tilde;

impl Tilde {
    pub const CHAR: u8 = b'~';
    /// Shortest run worth looking at. `~` and `~~` are plain text.
    pub const MIN_RUN: usize = 3;
}

/// The macro call a recognised tilde run is replaced with.
pub struct SignatureCall;

impl SignatureCall {
    pub const PREFIX: &'static str = "-- ";
    pub const OPEN: &'static str = "[[Signature(";
    pub const CLOSE: &'static str = ")]]";
    pub const SEPARATOR: &'static str = ", ";
}

/// What a recognised tilde run signs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    /// `~~~`: username only.
    User,
    /// `~~~~`: username and timestamp.
    UserAndTimestamp,
    /// `~~~~~`: timestamp only.
    Timestamp,
}

impl SignatureKind {
    /// Maps a run length to its signature; any other length is copied through
    /// unchanged by the rewriter.
    pub fn from_run_len(len: usize) -> Option<Self> {
        match len {
            3 => Some(Self::User),
            4 => Some(Self::UserAndTimestamp),
            5 => Some(Self::Timestamp),
            _ => None,
        }
    }

    pub fn includes_user(self) -> bool {
        matches!(self, Self::User | Self::UserAndTimestamp)
    }

    pub fn includes_timestamp(self) -> bool {
        matches!(self, Self::UserAndTimestamp | Self::Timestamp)
    }
}
