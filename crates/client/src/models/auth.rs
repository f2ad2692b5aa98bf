//! Authentication context returned by the credential probe endpoint.

use serde::Deserialize;

/// The identity Splunk associates with the client's credentials.
///
/// Parsed from `entry[0].content` of
/// `GET /services/authentication/current-context`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthContext {
    pub username: String,
    #[serde(default)]
    pub realname: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(rename = "defaultApp", default)]
    pub default_app: Option<String>,
}

impl AuthContext {
    /// Check whether the authenticated user holds `capability`.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_auth_context() {
        let json = r#"{
            "username": "admin",
            "realname": "Administrator",
            "roles": ["admin", "power", "user"],
            "capabilities": ["search", "rtsearch"],
            "defaultApp": "search"
        }"#;
        let ctx: AuthContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.username, "admin");
        assert_eq!(ctx.roles.len(), 3);
        assert!(ctx.has_capability("rtsearch"));
        assert!(!ctx.has_capability("edit_user"));
        assert_eq!(ctx.default_app.as_deref(), Some("search"));
    }

    #[test]
    fn test_deserialize_minimal_auth_context() {
        let ctx: AuthContext = serde_json::from_str(r#"{"username": "svc"}"#).unwrap();
        assert_eq!(ctx.username, "svc");
        assert!(ctx.roles.is_empty());
        assert!(ctx.realname.is_none());
    }
}
