//! # Link Resolvers
//!
//! Wiki markup links of the form `[[ns:target|label]]` are resolved by the
//! resolver registered for their namespace `ns`.
//!
//! - **`resolvers`**: the `user:`, `full-username:` and `timeline:` resolvers

pub mod resolvers;

use std::collections::BTreeMap;

use log::warn;

use crate::host::RenderContext;

pub use resolvers::{FullNameResolver, TimelineLinkResolver, UserLinkResolver};

/// Turns one namespaced link into HTML.
pub trait LinkResolver {
    fn resolve(&self, ctx: &RenderContext<'_>, ns: &str, target: &str, label: &str) -> String;
}

impl<F> LinkResolver for F
where
    F: Fn(&RenderContext<'_>, &str, &str, &str) -> String,
{
    fn resolve(&self, ctx: &RenderContext<'_>, ns: &str, target: &str, label: &str) -> String {
        self(ctx, ns, target, label)
    }
}

/// Namespace to resolver dispatch table.
#[derive(Default)]
pub struct LinkRegistry {
    resolvers: BTreeMap<String, Box<dyn LinkResolver>>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resolver` for `ns`, replacing any earlier registration.
    pub fn register(&mut self, ns: impl Into<String>, resolver: Box<dyn LinkResolver>) {
        let ns = ns.into();
        if self.resolvers.contains_key(&ns) {
            warn!("link namespace '{ns}' registered twice, keeping the latest resolver");
        }
        self.resolvers.insert(ns, resolver);
    }

    pub fn contains(&self, ns: &str) -> bool {
        self.resolvers.contains_key(ns)
    }

    /// Resolves a link, or `None` when no resolver owns `ns`.
    pub fn resolve(
        &self,
        ctx: &RenderContext<'_>,
        ns: &str,
        target: &str,
        label: &str,
    ) -> Option<String> {
        let resolver = self.resolvers.get(ns)?;
        Some(resolver.resolve(ctx, ns, target, label))
    }

    /// Registered namespaces in sorted order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.resolvers.keys().map(String::as_str)
    }
}

/// Renders an `<a>` element with escaped attributes and label.
pub(crate) fn anchor(class: &str, href: Option<&str>, title: Option<&str>, label: &str) -> String {
    let mut html = format!(
        "<a class=\"{}\"",
        html_escape::encode_double_quoted_attribute(class)
    );
    if let Some(href) = href {
        html.push_str(" href=\"");
        html.push_str(&html_escape::encode_double_quoted_attribute(href));
        html.push('"');
    }
    if let Some(title) = title {
        html.push_str(" title=\"");
        html.push_str(&html_escape::encode_double_quoted_attribute(title));
        html.push('"');
    }
    html.push('>');
    html.push_str(&html_escape::encode_text(label));
    html.push_str("</a>");
    html
}
