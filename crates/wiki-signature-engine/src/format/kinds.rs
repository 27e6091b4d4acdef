pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}

/// `[[ns:target]]` or `[[ns:target|label]]`.
pub struct NamespacedLink;

impl NamespacedLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const LABEL: u8 = b'|';
    pub const NAMESPACE: u8 = b':';

    /// Namespaces are ASCII words with dashes, e.g. `user`, `full-username`.
    pub fn is_namespace(ns: &str) -> bool {
        !ns.is_empty()
            && ns
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}
