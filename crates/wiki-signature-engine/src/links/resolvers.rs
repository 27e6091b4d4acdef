use log::debug;

use crate::datetime::{format_iso8601, parse_date_with_precision};
use crate::host::RenderContext;

use super::{LinkResolver, anchor};

/// CSS class shared by both user link styles.
pub const AUTHOR_CLASS: &str = "trac-author-user";

/// `user:` links: the username styled as an author, linked to the user's
/// wiki page when that page exists and the requester may view it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserLinkResolver;

impl UserLinkResolver {
    pub const NAMESPACE: &'static str = "user";
}

impl LinkResolver for UserLinkResolver {
    fn resolve(&self, ctx: &RenderContext<'_>, _ns: &str, target: &str, label: &str) -> String {
        let title = format!("username: {target}");
        let href = (ctx.pages.can_view(target) && ctx.pages.has_page(target))
            .then(|| ctx.href.wiki(target));
        anchor(AUTHOR_CLASS, href.as_deref(), Some(title.as_str()), label)
    }
}

/// `full-username:` links: only a display name is known, so there is nothing
/// to link to.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullNameResolver;

impl FullNameResolver {
    pub const NAMESPACE: &'static str = "full-username";
}

impl LinkResolver for FullNameResolver {
    fn resolve(&self, _ctx: &RenderContext<'_>, _ns: &str, _target: &str, label: &str) -> String {
        anchor(AUTHOR_CLASS, None, None, label)
    }
}

/// `timeline:` links to the timeline around a moment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineLinkResolver;

impl TimelineLinkResolver {
    pub const NAMESPACE: &'static str = "timeline";
}

impl LinkResolver for TimelineLinkResolver {
    fn resolve(&self, ctx: &RenderContext<'_>, _ns: &str, target: &str, label: &str) -> String {
        match parse_date_with_precision(target, ctx.tz) {
            Ok((moment, precision)) => {
                let from = format_iso8601(&moment);
                let href = ctx.href.timeline(&from, precision.map(|p| p.as_str()));
                let title = format!("See timeline at {from}");
                anchor("timeline", Some(href.as_str()), Some(title.as_str()), label)
            }
            Err(e) => {
                debug!("timeline link left unlinked: {e}");
                html_escape::encode_text(label).into_owned()
            }
        }
    }
}
