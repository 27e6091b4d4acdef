//! # Signature Rewriting
//!
//! Replaces MediaWiki-style signatures in page text with calls to the
//! `Signature` macro when a page is saved.
//!
//! - `~~~` signs with the editor's username
//! - `~~~~` signs with the username and the time of the edit
//! - `~~~~~` signs with the time of the edit only
//!
//! Any other run of three or more tildes is kept as written.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiters and the run-length table ([`SignatureKind`])
//! - **`scan`**: lazy single-pass scanner producing [`TildeRun`]s
//!
//! The rewriter consumes the scan once, copying text between runs and
//! substituting recognised runs, so the page is visited in a single pass.

pub mod kinds;
pub mod scan;

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use log::debug;

use crate::datetime::format_iso8601;

pub use kinds::{SignatureCall, SignatureKind, Tilde};
pub use scan::{TildeRun, TildeRuns, tilde_runs};

/// The identity and moment a page edit is signed with.
///
/// Captured once per save so every signature on the page carries the same
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub username: String,
    pub full_name: Option<String>,
    pub timestamp: DateTime<FixedOffset>,
}

impl Signer {
    pub fn new(
        username: impl Into<String>,
        full_name: Option<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.filter(|n| !n.is_empty()),
            timestamp,
        }
    }

    /// Builds the `-- [[Signature(user, timestamp, full name)]]` text for one
    /// signature. Slots a kind does not use stay empty but keep their commas.
    pub fn macro_call(&self, kind: SignatureKind) -> String {
        let timestamp = kind
            .includes_timestamp()
            .then(|| format_iso8601(&self.timestamp));
        let (user, full_name) = if kind.includes_user() {
            (self.username.as_str(), self.full_name.as_deref().unwrap_or(""))
        } else {
            ("", "")
        };

        let args = [user, timestamp.as_deref().unwrap_or(""), full_name];
        format!(
            "{}{}{}{}",
            SignatureCall::PREFIX,
            SignatureCall::OPEN,
            args.join(SignatureCall::SEPARATOR),
            SignatureCall::CLOSE,
        )
    }
}

/// Rewrites every recognised signature in `text`.
///
/// Returns the input borrowed when nothing was substituted. Never fails:
/// unrecognised runs (six or more tildes) are copied verbatim.
pub fn rewrite<'a>(text: &'a str, signer: &Signer) -> Cow<'a, str> {
    let mut runs = tilde_runs(text)
        .filter_map(|run| run.kind().map(|kind| (run, kind)))
        .peekable();
    if runs.peek().is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 64);
    let mut copied_to = 0;
    for (run, kind) in runs {
        out.push_str(&text[copied_to..run.start]);
        out.push_str(&signer.macro_call(kind));
        copied_to = run.end();
        debug!(
            "replaced {}-tilde signature at byte {} with {:?} signature",
            run.len, run.start, kind
        );
    }
    out.push_str(&text[copied_to..]);
    Cow::Owned(out)
}

/// The identity an edit is attributed to.
///
/// An authenticated user is identified by their login. An anonymous editor
/// falls back to what they put in their session preferences: `Name <email>`
/// when both are known, either one alone, or `anonymous`.
pub fn reporter_id(
    authname: &str,
    session_name: Option<&str>,
    session_email: Option<&str>,
) -> String {
    if authname != ANONYMOUS {
        return authname.to_string();
    }
    let name = session_name.filter(|n| !n.is_empty());
    let email = session_email.filter(|e| !e.is_empty());
    match (name, email) {
        (Some(name), Some(email)) => format!("{name} <{email}>"),
        (Some(name), None) => name.to_string(),
        (None, Some(email)) => email.to_string(),
        (None, None) => authname.to_string(),
    }
}

pub const ANONYMOUS: &str = "anonymous";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn alice() -> Signer {
        let utc = FixedOffset::east_opt(0).unwrap();
        Signer::new(
            "alice",
            Some("Alice A.".to_string()),
            utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn text_without_tildes_is_borrowed_unchanged() {
        let text = "Nothing to sign here.";
        let out = rewrite(text, &alice());
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, text);
    }

    #[test]
    fn short_tilde_runs_are_left_alone() {
        let text = "approx ~5 and ~~strike~~";
        assert!(matches!(rewrite(text, &alice()), Cow::Borrowed(_)));
    }

    #[test]
    fn four_tildes_sign_with_user_and_time() {
        assert_eq!(
            rewrite("Thanks ~~~~ for the help", &alice()),
            "Thanks -- [[Signature(alice, 2024-01-01T00:00:00+00:00, Alice A.)]] for the help"
        );
    }

    #[rstest]
    #[case("~~~", "-- [[Signature(alice, , Alice A.)]]")]
    #[case("~~~~", "-- [[Signature(alice, 2024-01-01T00:00:00+00:00, Alice A.)]]")]
    #[case("~~~~~", "-- [[Signature(, 2024-01-01T00:00:00+00:00, )]]")]
    #[case("~~~~~~", "~~~~~~")]
    #[case("~~~~~~~~~~", "~~~~~~~~~~")]
    fn run_length_selects_signature(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(rewrite(text, &alice()), expected);
    }

    #[test]
    fn missing_full_name_leaves_slot_empty() {
        let signer = Signer::new("bob", None, alice().timestamp);
        assert_eq!(rewrite("~~~", &signer), "-- [[Signature(bob, , )]]");
    }

    #[test]
    fn empty_full_name_is_treated_as_missing() {
        let signer = Signer::new("bob", Some(String::new()), alice().timestamp);
        assert_eq!(signer.full_name, None);
    }

    #[test]
    fn rewrites_every_signature_on_the_page() {
        let text = "a ~~~\nb ~~~~~~ c ~~~~~\nend";
        assert_eq!(
            rewrite(text, &alice()),
            "a -- [[Signature(alice, , Alice A.)]]\n\
             b ~~~~~~ c -- [[Signature(, 2024-01-01T00:00:00+00:00, )]]\nend"
        );
    }

    #[test]
    fn only_tildes() {
        assert_eq!(rewrite("~~~~~~~", &alice()), "~~~~~~~");
        assert_eq!(rewrite("~~", &alice()), "~~");
    }

    #[test]
    fn rewritten_text_is_stable() {
        let once = rewrite("Signed ~~~~ and ~~~", &alice()).into_owned();
        let twice = rewrite(&once, &alice());
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice, once);
    }

    #[test]
    fn timestamp_keeps_offset() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let signer = Signer::new(
            "joro",
            None,
            cest.with_ymd_and_hms(2019, 10, 19, 14, 56, 0).unwrap(),
        );
        assert_eq!(
            signer.macro_call(SignatureKind::Timestamp),
            "-- [[Signature(, 2019-10-19T14:56:00+02:00, )]]"
        );
    }

    #[test]
    fn multibyte_text_around_signatures() {
        assert_eq!(
            rewrite("Grüße ~~~ ✓", &alice()),
            "Grüße -- [[Signature(alice, , Alice A.)]] ✓"
        );
    }

    #[rstest]
    #[case("joro", None, None, "joro")]
    #[case("joro", Some("John"), Some("j@example.org"), "joro")]
    #[case("anonymous", Some("John"), Some("j@example.org"), "John <j@example.org>")]
    #[case("anonymous", Some("John"), None, "John")]
    #[case("anonymous", None, Some("j@example.org"), "j@example.org")]
    #[case("anonymous", Some(""), None, "anonymous")]
    #[case("anonymous", None, None, "anonymous")]
    fn reporter_identity(
        #[case] authname: &str,
        #[case] name: Option<&str>,
        #[case] email: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(reporter_id(authname, name, email), expected);
    }
}
