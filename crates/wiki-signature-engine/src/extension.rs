//! # Extension Points
//!
//! The hosting wiki calls into extensions through three capabilities:
//!
//! - [`WikiPageManipulator`]: sees every page before it is saved
//! - [`WikiSyntaxProvider`]: contributes link namespaces
//! - [`WikiMacro`]: expands `[[Name(args)]]` calls while rendering
//!
//! [`ExtensionRegistry`] holds what was registered at startup and routes
//! host events to it. Nothing in here keeps state between calls.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::components::{MediaWikiSignature, SignatureMacro, UserLinkProvider};
use crate::format::format_to_oneliner;
use crate::host::{RenderContext, Request, ValidationWarning, WikiPage};
use crate::links::{LinkRegistry, LinkResolver, TimelineLinkResolver};

pub trait WikiPageManipulator {
    /// Called before the edit form is shown.
    fn prepare_wiki_page(&self, _req: &Request, _page: &WikiPage) {}

    /// Called when a page is about to be saved. May change the page text;
    /// any warning returned blocks the save.
    fn validate_wiki_page(&self, req: &Request, page: &mut WikiPage) -> Vec<ValidationWarning>;
}

pub trait WikiSyntaxProvider {
    fn link_resolvers(&self) -> Vec<(&'static str, Box<dyn LinkResolver>)>;
}

pub trait WikiMacro {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Expands one call. `content` is what was written between the
    /// parentheses, if anything. Returns an HTML fragment.
    fn expand_macro(
        &self,
        ctx: &RenderContext<'_>,
        links: &LinkRegistry,
        content: Option<&str>,
    ) -> String;
}

/// Which optional parts to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionOptions {
    /// Register the `user:`/`full-username:` link provider. Turn off when
    /// another extension owns the `user:` namespace.
    pub user_links: bool,
}

impl Default for ExtensionOptions {
    fn default() -> Self {
        Self { user_links: true }
    }
}

#[derive(Default)]
pub struct ExtensionRegistry {
    manipulators: Vec<Box<dyn WikiPageManipulator>>,
    macros: BTreeMap<&'static str, Box<dyn WikiMacro>>,
    links: LinkRegistry,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the signature extension provides, plus the host's own
    /// `timeline:` namespace the rendered signatures link through.
    pub fn with_defaults(options: ExtensionOptions) -> Self {
        let mut registry = Self::new();
        registry
            .links
            .register(TimelineLinkResolver::NAMESPACE, Box::new(TimelineLinkResolver));
        registry.add_page_manipulator(Box::new(MediaWikiSignature));
        registry.add_macro(Box::new(SignatureMacro));
        if options.user_links {
            registry.add_syntax_provider(&UserLinkProvider);
        } else {
            debug!("user link provider disabled");
        }
        registry
    }

    pub fn add_page_manipulator(&mut self, manipulator: Box<dyn WikiPageManipulator>) {
        self.manipulators.push(manipulator);
    }

    pub fn add_syntax_provider(&mut self, provider: &dyn WikiSyntaxProvider) {
        for (ns, resolver) in provider.link_resolvers() {
            self.links.register(ns, resolver);
        }
    }

    pub fn add_macro(&mut self, wiki_macro: Box<dyn WikiMacro>) {
        let name = wiki_macro.name();
        if self.macros.insert(name, wiki_macro).is_some() {
            warn!("macro '{name}' registered twice, keeping the latest");
        }
    }

    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    pub fn macro_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.macros.keys().copied()
    }

    pub fn macro_description(&self, name: &str) -> Option<&'static str> {
        self.macros.get(name).map(|m| m.description())
    }

    /// Runs every page manipulator over `page` in registration order and
    /// collects their warnings.
    pub fn validate_page(&self, req: &Request, page: &mut WikiPage) -> Vec<ValidationWarning> {
        self.manipulators
            .iter()
            .flat_map(|m| m.validate_wiki_page(req, page))
            .collect()
    }

    /// Expands the macro called `name`, or `None` when it is not registered.
    pub fn expand_macro(
        &self,
        ctx: &RenderContext<'_>,
        name: &str,
        content: Option<&str>,
    ) -> Option<String> {
        let wiki_macro = self.macros.get(name)?;
        Some(wiki_macro.expand_macro(ctx, &self.links, content))
    }

    /// Formats one line of markup with the registered link namespaces.
    pub fn format(&self, ctx: &RenderContext<'_>, markup: &str) -> String {
        format_to_oneliner(ctx, &self.links, markup)
    }
}
