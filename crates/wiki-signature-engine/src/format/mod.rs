//! # One-liner Formatting
//!
//! Converts a single line of wiki markup into an HTML fragment. Only what
//! signatures produce is understood:
//!
//! - `[[ns:target|label]]` links, dispatched to the [`LinkRegistry`]
//! - `` `code` `` spans, which are raw zones
//!
//! Everything else is HTML-escaped text.

pub mod kinds;
pub mod parser;

use crate::host::RenderContext;
use crate::links::LinkRegistry;

pub use parser::{Inline, parse_oneliner};

/// Formats `markup` to HTML.
///
/// A link whose namespace has no resolver is shown as written.
pub fn format_to_oneliner(ctx: &RenderContext<'_>, links: &LinkRegistry, markup: &str) -> String {
    let mut html = String::with_capacity(markup.len() * 2);
    for node in parse_oneliner(markup) {
        match node {
            Inline::Text(text) => html.push_str(&html_escape::encode_text(text)),
            Inline::Code(code) => {
                html.push_str("<code>");
                html.push_str(&html_escape::encode_text(code));
                html.push_str("</code>");
            }
            Inline::Link {
                ns,
                target,
                label,
                raw,
            } => {
                let label = label.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(target);
                match links.resolve(ctx, ns, target.trim(), label) {
                    Some(link) => html.push_str(&link),
                    None => html.push_str(&html_escape::encode_text(raw)),
                }
            }
        }
    }
    html
}
