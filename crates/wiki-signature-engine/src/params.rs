use std::sync::LazyLock;

use regex::Regex;

/// Positional arguments of a `[[Signature(username, timestamp, full name)]]`
/// call.
///
/// Every field is optional. An absent full name falls back to the username,
/// so a lone username is both link target and label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureParams {
    pub username: Option<String>,
    pub timestamp: Option<String>,
    pub full_name: Option<String>,
}

/// The full name takes the rest of the string, commas included.
static ARGUMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xs)
        ^\s*
        (?P<username>[^,]*)\s*
        (?:,
            \s*(?P<timestamp>[^,]*)\s*
            (?:,
                \s*(?P<fullname>.*)
            )?
        )?
        $
        ",
    )
    .expect("signature argument pattern is valid")
});

impl SignatureParams {
    /// Splits a macro argument string into its three positional fields.
    ///
    /// Returns `None` for a blank string. Nothing else is rejected: fields are
    /// trimmed and empty ones become `None`.
    pub fn parse(content: &str) -> Option<Self> {
        if content.trim().is_empty() {
            return None;
        }
        let caps = ARGUMENTS.captures(content)?;
        let field = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let username = field("username");
        let full_name = field("fullname").or_else(|| username.clone());
        Some(Self {
            username,
            timestamp: field("timestamp"),
            full_name,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.timestamp.is_none() && self.full_name.is_none()
    }

    /// Text a signature is shown as: the full name, else the username.
    pub fn display_name(&self) -> Option<&str> {
        self.full_name.as_deref().or(self.username.as_deref())
    }
}
