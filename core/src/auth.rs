//! Member-token authentication state.

/// Two-state authenticator. While `Authenticated`, every outgoing request
/// carries a `token` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Authenticator {
    #[default]
    Unauthenticated,
    Authenticated { token: String },
}

impl Authenticator {
    pub fn token(&self) -> Option<&str> {
        match self {
            Authenticator::Unauthenticated => None,
            Authenticator::Authenticated { token } => Some(token),
        }
    }

    /// Append the token parameter, if any, to a query string.
    pub fn apply(&self, query: &mut Vec<(String, String)>) {
        if let Some(token) = self.token() {
            query.push(("token".to_string(), token.to_string()));
        }
    }
}
