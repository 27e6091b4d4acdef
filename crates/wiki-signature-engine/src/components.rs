//! The signature extension's three components.

use std::borrow::Cow;

use log::debug;

use crate::datetime::{parse_date, relative_label};
use crate::extension::{WikiMacro, WikiPageManipulator, WikiSyntaxProvider};
use crate::format::format_to_oneliner;
use crate::host::{RenderContext, Request, ValidationWarning, WikiPage};
use crate::links::{
    FullNameResolver, LinkRegistry, LinkResolver, TimelineLinkResolver, UserLinkResolver,
};
use crate::params::SignatureParams;
use crate::rewrite::rewrite;

/// Replaces `~~~`, `~~~~` and `~~~~~` with `Signature` macro calls when a
/// page is saved. Never rejects a page.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaWikiSignature;

impl WikiPageManipulator for MediaWikiSignature {
    fn validate_wiki_page(&self, req: &Request, page: &mut WikiPage) -> Vec<ValidationWarning> {
        let signer = req.signer();
        let signed = match rewrite(&page.text, &signer) {
            Cow::Owned(text) => Some(text),
            Cow::Borrowed(_) => None,
        };
        if let Some(text) = signed {
            debug!("signed page '{}' as '{}'", page.name, signer.username);
            page.text = text;
        }
        vec![]
    }
}

/// Provides the `user:` and `full-username:` link namespaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserLinkProvider;

impl WikiSyntaxProvider for UserLinkProvider {
    fn link_resolvers(&self) -> Vec<(&'static str, Box<dyn LinkResolver>)> {
        vec![
            (
                UserLinkResolver::NAMESPACE,
                Box::new(UserLinkResolver) as Box<dyn LinkResolver>,
            ),
            (FullNameResolver::NAMESPACE, Box::new(FullNameResolver)),
        ]
    }
}

/// The `[[Signature(username, timestamp, full name)]]` macro.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureMacro;

impl SignatureMacro {
    pub const NAME: &'static str = "Signature";

    pub const DESCRIPTION: &'static str = "\
Shows a signature made of a username and/or a timestamp.

Takes up to three positional arguments, all optional:
 * username: short name of whoever signed
 * timestamp: when they signed, as an ISO-8601 date
 * full name: what the signature shows; defaults to the username

A username is shown as a `user:` link, which points at the user's wiki page
when there is one. A full name without a username is shown unlinked. A
timestamp is shown as the time elapsed since then, e.g. `12 minutes ago`,
linked to the timeline at that moment.

`[[Signature(joro, 2019-10-19T14:56, John de Rooij)]]` shows
\"John de Rooij 3 months ago\".";

    /// The wiki markup a signature renders to, before formatting.
    ///
    /// A timestamp that does not parse is dropped without complaint.
    pub fn signature_markup(params: &SignatureParams, ctx: &RenderContext<'_>) -> String {
        let signature = match (&params.username, params.display_name()) {
            (Some(username), Some(label)) => {
                link_markup(UserLinkResolver::NAMESPACE, username, label)
            }
            (None, Some(full_name)) => {
                link_markup(FullNameResolver::NAMESPACE, full_name, full_name)
            }
            _ => String::new(),
        };

        let timeline = params
            .timestamp
            .as_deref()
            .and_then(|timestamp| match parse_date(timestamp, ctx.tz) {
                Ok(moment) => Some(link_markup(
                    TimelineLinkResolver::NAMESPACE,
                    timestamp,
                    &relative_label(&moment, &ctx.now),
                )),
                Err(e) => {
                    debug!("dropping signature timestamp: {e}");
                    None
                }
            })
            .unwrap_or_default();

        format!("{signature} {timeline}").trim().to_string()
    }

    /// Renders a macro argument string to HTML. Blank arguments render
    /// nothing.
    pub fn render(
        ctx: &RenderContext<'_>,
        links: &LinkRegistry,
        content: Option<&str>,
    ) -> String {
        let Some(params) = content.and_then(SignatureParams::parse) else {
            return String::new();
        };
        let markup = Self::signature_markup(&params, ctx);
        if markup.is_empty() {
            return markup;
        }
        format_to_oneliner(ctx, links, &markup)
    }
}

fn link_markup(ns: &str, target: &str, label: &str) -> String {
    format!("[[{ns}:{target}|{label}]]")
}

impl WikiMacro for SignatureMacro {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn expand_macro(
        &self,
        ctx: &RenderContext<'_>,
        links: &LinkRegistry,
        content: Option<&str>,
    ) -> String {
        Self::render(ctx, links, content)
    }
}
