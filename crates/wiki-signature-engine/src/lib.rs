//! MediaWiki-style signatures for wiki pages.
//!
//! On save, `~~~`, `~~~~` and `~~~~~` in a page are rewritten into
//! `[[Signature(username, timestamp, full name)]]` macro calls
//! ([`rewrite`]). When the page is shown, the macro renders a linked name and
//! a "3 months ago" timeline link ([`SignatureMacro`]).

pub mod components;
pub mod cursor;
pub mod datetime;
pub mod extension;
pub mod format;
pub mod host;
pub mod links;
pub mod params;
pub mod rewrite;

// Re-export key types for easier usage
pub use components::{MediaWikiSignature, SignatureMacro, UserLinkProvider};
pub use datetime::{DateParseError, format_iso8601, parse_date, pretty_timedelta, relative_label};
pub use extension::{
    ExtensionOptions, ExtensionRegistry, WikiMacro, WikiPageManipulator, WikiSyntaxProvider,
};
pub use format::format_to_oneliner;
pub use host::{Href, RenderContext, Request, StaticPages, ValidationWarning, WikiPage, WikiPages};
pub use links::{LinkRegistry, LinkResolver};
pub use params::SignatureParams;
pub use rewrite::{Signer, SignatureKind, TildeRun, rewrite, tilde_runs};
