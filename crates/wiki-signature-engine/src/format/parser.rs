use crate::cursor::Cursor;

use super::kinds::{CodeSpan, NamespacedLink};

/// One piece of one-liner markup, borrowing from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<'a> {
    /// Plain text outside any construct.
    Text(&'a str),
    /// Backtick-delimited code. A raw zone: nothing is parsed inside.
    Code(&'a str),
    /// `[[ns:target|label]]`.
    Link {
        ns: &'a str,
        target: &'a str,
        label: Option<&'a str>,
        /// The whole link as written, for namespaces nobody resolves.
        raw: &'a str,
    },
}

/// Splits one-liner markup into text, code spans and namespaced links.
///
/// Code spans take precedence: `` `[[user:x]]` `` is code, not a link.
/// Unclosed constructs and links without a namespace are plain text.
pub fn parse_oneliner(s: &str) -> Vec<Inline<'_>> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text<'a>(out: &mut Vec<Inline<'a>>, s: &'a str, start: usize, end: usize) {
        if end > start {
            out.push(Inline::Text(&s[start..end]));
        }
    }

    while !cur.eof() {
        let start = cur.pos();
        let node = try_parse_code_span(&mut cur).or_else(|| try_parse_link(&mut cur));
        match node {
            Some(node) => {
                flush_text(&mut out, s, text_start, start);
                out.push(node);
                text_start = cur.pos();
            }
            None => {
                cur.bump();
            }
        }
    }

    flush_text(&mut out, s, text_start, s.len());
    out
}

/// On failure the cursor is left where it was.
fn try_parse_code_span<'a>(cur: &mut Cursor<'a>) -> Option<Inline<'a>> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    cur.bump(); // `
    let inner_start = cur.pos();
    while !cur.eof() && cur.peek() != Some(CodeSpan::TICK) {
        cur.bump();
    }
    if cur.eof() {
        *cur = saved;
        return None;
    }
    let inner = cur.slice_from(inner_start);
    cur.bump(); // closing `

    Some(Inline::Code(inner))
}

/// On failure the cursor is left where it was.
fn try_parse_link<'a>(cur: &mut Cursor<'a>) -> Option<Inline<'a>> {
    if !cur.starts_with(NamespacedLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(NamespacedLink::OPEN.len());
    let target_start = cur.pos();

    while !cur.eof()
        && cur.peek() != Some(NamespacedLink::LABEL)
        && !cur.starts_with(NamespacedLink::CLOSE)
    {
        cur.bump();
    }
    let full_target = cur.slice_from(target_start);

    let mut label = None;
    if cur.peek() == Some(NamespacedLink::LABEL) {
        cur.bump(); // |
        let label_start = cur.pos();
        while !cur.eof() && !cur.starts_with(NamespacedLink::CLOSE) {
            cur.bump();
        }
        label = Some(cur.slice_from(label_start));
    }

    if !cur.starts_with(NamespacedLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(NamespacedLink::CLOSE.len());

    let Some((ns, target)) = full_target.split_once(NamespacedLink::NAMESPACE as char) else {
        *cur = saved;
        return None;
    };
    if !NamespacedLink::is_namespace(ns) {
        *cur = saved;
        return None;
    }

    Some(Inline::Link {
        ns,
        target,
        label,
        raw: cur.slice_from(start),
    })
}
