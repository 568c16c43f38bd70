//! Shared User-Agent string for the search session and direct downloads.
//!
//! The search endpoint rejects obvious tool identities, so every request in a
//! session carries one fixed desktop browser User-Agent.

/// Desktop browser User-Agent attached to every request of a harvest session.
pub const SESSION_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_user_agent_looks_like_a_browser() {
        assert!(SESSION_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(SESSION_USER_AGENT.contains("Chrome/"));
        assert!(
            !SESSION_USER_AGENT.contains("  "),
            "line continuation must not leave double spaces: {SESSION_USER_AGENT}"
        );
    }
}
