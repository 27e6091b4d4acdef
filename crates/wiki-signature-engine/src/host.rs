//! What the wiki application hosting the extension provides: the request
//! being served, the page being saved, page lookups and URL building.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};

use crate::rewrite::{Signer, reporter_id};

/// Page existence and permission lookups.
pub trait WikiPages {
    fn has_page(&self, name: &str) -> bool;

    /// Whether the current requester may view `name`.
    fn can_view(&self, name: &str) -> bool;
}

/// An in-memory set of page names, all equally viewable or not.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: HashSet<String>,
    viewable: bool,
}

impl StaticPages {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            viewable: true,
        }
    }

    /// Same pages, but the requester lacks view permission on all of them.
    pub fn without_view_permission(mut self) -> Self {
        self.viewable = false;
        self
    }
}

impl WikiPages for StaticPages {
    fn has_page(&self, name: &str) -> bool {
        self.pages.contains(name)
    }

    fn can_view(&self, _name: &str) -> bool {
        self.viewable
    }
}

/// Builds URLs below the wiki's base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Href {
    base: String,
}

impl Href {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of a wiki page. Hierarchical page names keep their slashes.
    pub fn wiki(&self, page: &str) -> String {
        let path: Vec<_> = page
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/wiki/{}", self.base, path.join("/"))
    }

    /// URL of the timeline around `from`.
    pub fn timeline(&self, from: &str, precision: Option<&str>) -> String {
        let mut url = format!("{}/timeline?from={}", self.base, urlencoding::encode(from));
        if let Some(precision) = precision {
            url.push_str("&precision=");
            url.push_str(&urlencoding::encode(precision));
        }
        url
    }
}

/// Everything rendering needs to know about the current request.
pub struct RenderContext<'a> {
    pub now: DateTime<FixedOffset>,
    /// Timezone for timestamps written without an offset.
    pub tz: FixedOffset,
    pub href: Href,
    pub pages: &'a dyn WikiPages,
}

impl<'a> RenderContext<'a> {
    pub fn new(now: DateTime<FixedOffset>, href: Href, pages: &'a dyn WikiPages) -> Self {
        Self {
            now,
            tz: *now.offset(),
            href,
            pages,
        }
    }
}

/// The request saving a page.
#[derive(Debug, Clone)]
pub struct Request {
    /// Login of the editor, or `anonymous`.
    pub authname: String,
    pub session_name: Option<String>,
    pub session_email: Option<String>,
    /// The moment of the request, in the editor's timezone.
    pub now: DateTime<FixedOffset>,
}

impl Request {
    pub fn reporter_id(&self) -> String {
        reporter_id(
            &self.authname,
            self.session_name.as_deref(),
            self.session_email.as_deref(),
        )
    }

    /// The identity and time this request signs with.
    pub fn signer(&self) -> Signer {
        Signer::new(self.reporter_id(), self.session_name.clone(), self.now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub name: String,
    pub text: String,
}

/// A problem reported back to the editor when a page fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Form field the warning is about, if any.
    pub field: Option<String>,
    pub message: String,
}
