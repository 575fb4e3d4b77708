use serde::Serialize;

/// Caller identity as handed over by the fronting proxy.
///
/// `raw` is the trimmed, lowercased header value (it may carry a
/// `DOMAIN\user` or `domain/user` prefix). `display` is the bare username,
/// which is what the allowlist and the per-user statistics key on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Identity {
    pub raw: String,
    pub display: String,
}

impl Identity {
    pub fn from_header(value: &str) -> Self {
        let raw = value.trim().to_lowercase();
        let display = bare_username(&raw).to_string();
        Self { raw, display }
    }

    pub fn is_anonymous(&self) -> bool {
        self.display.is_empty()
    }
}

/// Strips a `domain\` or `domain/` prefix.
pub fn bare_username(name: &str) -> &str {
    name.rsplit(['\\', '/']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_backslash_domain() {
        let id = Identity::from_header("CORP\\JDoe");
        assert_eq!(id.raw, "corp\\jdoe");
        assert_eq!(id.display, "jdoe");
    }

    #[test]
    fn strips_forward_slash_domain() {
        let id = Identity::from_header("corp/alice");
        assert_eq!(id.display, "alice");
    }

    #[test]
    fn plain_name_is_kept() {
        let id = Identity::from_header("  Bob ");
        assert_eq!(id.raw, "bob");
        assert_eq!(id.display, "bob");
    }

    #[test]
    fn empty_header_is_anonymous() {
        assert!(Identity::from_header("").is_anonymous());
        assert!(Identity::from_header("corp\\").is_anonymous());
        assert!(!Identity::from_header("x").is_anonymous());
    }
}
