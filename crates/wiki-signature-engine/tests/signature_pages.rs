use chrono::{DateTime, FixedOffset, TimeZone};
use pretty_assertions::assert_eq;
use regex::Regex;
use wiki_signature_engine::{
    ExtensionOptions, ExtensionRegistry, Href, RenderContext, Request, StaticPages, WikiPage,
};

#[test]
fn fixture_discussion() {
    assert_fixture("discussion");
}

#[test]
fn fixture_inline_code() {
    assert_fixture("inline_code");
}

fn signed_at() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .unwrap()
}

fn alice() -> Request {
    Request {
        authname: "alice".into(),
        session_name: Some("Alice A.".into()),
        session_email: Some("alice@example.org".into()),
        now: signed_at(),
    }
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/pages/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn assert_fixture(name: &str) {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let mut page = WikiPage {
        name: name.to_string(),
        text: fixture(&format!("{name}.wiki")),
    };

    let warnings = registry.validate_page(&alice(), &mut page);

    assert!(warnings.is_empty());
    assert_eq!(page.text, fixture(&format!("{name}.signed.wiki")));
}

/// Pulls the argument strings out of every `[[Signature(...)]]` call.
fn signature_calls(text: &str) -> Vec<String> {
    let call = Regex::new(r"\[\[Signature\((.*?)\)\]\]").unwrap();
    call.captures_iter(text).map(|c| c[1].to_string()).collect()
}

#[test]
fn saved_signatures_render_as_links() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let mut page = WikiPage {
        name: "Talk".into(),
        text: "Agreed ~~~~".into(),
    };
    registry.validate_page(&alice(), &mut page);

    let pages = StaticPages::new(["alice"]);
    let twelve_minutes_later = signed_at() + chrono::Duration::minutes(12);
    let ctx = RenderContext::new(twelve_minutes_later, Href::new("/trac"), &pages);

    let calls = signature_calls(&page.text);
    assert_eq!(calls, vec!["alice, 2024-01-01T00:00:00+00:00, Alice A."]);

    let html = registry
        .expand_macro(&ctx, "Signature", Some(calls[0].as_str()))
        .unwrap();
    insta::assert_snapshot!(html, @r#"<a class="trac-author-user" href="/trac/wiki/alice" title="username: alice">Alice A.</a> <a class="timeline" href="/trac/timeline?from=2024-01-01T00%3A00%3A00%2B00%3A00&amp;precision=seconds" title="See timeline at 2024-01-01T00:00:00+00:00">12 minutes ago</a>"#);
}

#[test]
fn user_without_wiki_page_is_not_linked() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let pages = StaticPages::default();
    let ctx = RenderContext::new(signed_at(), Href::new("/trac"), &pages);

    let html = registry
        .expand_macro(&ctx, "Signature", Some("joro,,John de Rooij"))
        .unwrap();

    assert_eq!(
        html,
        "<a class=\"trac-author-user\" title=\"username: joro\">John de Rooij</a>"
    );
}

#[test]
fn timestamp_only_signature() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let pages = StaticPages::default();
    let now = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2020, 1, 19, 14, 56, 0)
        .unwrap();
    let ctx = RenderContext::new(now, Href::new(""), &pages);

    let html = registry
        .expand_macro(&ctx, "Signature", Some(",2019-10-19T14:56,"))
        .unwrap();

    assert_eq!(
        html,
        "<a class=\"timeline\" href=\"/timeline?from=2019-10-19T14%3A56%3A00%2B02%3A00&amp;precision=minutes\" \
         title=\"See timeline at 2019-10-19T14:56:00+02:00\">3 months ago</a>"
    );
}

#[test]
fn unparseable_timestamp_keeps_the_name() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let pages = StaticPages::default();
    let ctx = RenderContext::new(signed_at(), Href::new(""), &pages);

    let html = registry
        .expand_macro(&ctx, "Signature", Some("bob,not-a-date,"))
        .unwrap();

    assert_eq!(
        html,
        "<a class=\"trac-author-user\" title=\"username: bob\">bob</a>"
    );
}

#[test]
fn full_name_only_signature_is_escaped() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let pages = StaticPages::default();
    let ctx = RenderContext::new(signed_at(), Href::new(""), &pages);

    let html = registry
        .expand_macro(&ctx, "Signature", Some(", , Tom & Jerry"))
        .unwrap();

    assert_eq!(html, "<a class=\"trac-author-user\">Tom &amp; Jerry</a>");
}

#[test]
fn disabled_user_links_show_markup_as_written() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions { user_links: false });
    let pages = StaticPages::default();
    let ctx = RenderContext::new(signed_at(), Href::new(""), &pages);

    let html = registry
        .expand_macro(&ctx, "Signature", Some("joro"))
        .unwrap();

    assert_eq!(html, "[[user:joro|joro]]");
}

#[test]
fn empty_arguments_render_nothing() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let pages = StaticPages::default();
    let ctx = RenderContext::new(signed_at(), Href::new(""), &pages);

    assert_eq!(registry.expand_macro(&ctx, "Signature", None).as_deref(), Some(""));
    assert_eq!(registry.expand_macro(&ctx, "Signature", Some("")).as_deref(), Some(""));
    assert_eq!(registry.expand_macro(&ctx, "Unknown", Some("x")), None);
}

#[test]
fn anonymous_editor_signs_with_session_identity() {
    let registry = ExtensionRegistry::with_defaults(ExtensionOptions::default());
    let req = Request {
        authname: "anonymous".into(),
        session_name: Some("Guest".into()),
        session_email: Some("guest@example.org".into()),
        now: signed_at(),
    };
    let mut page = WikiPage {
        name: "Talk".into(),
        text: "~~~".into(),
    };

    registry.validate_page(&req, &mut page);

    assert_eq!(
        page.text,
        "-- [[Signature(Guest <guest@example.org>, , Guest)]]"
    );
}
