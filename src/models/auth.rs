use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RawUser, User};

/// Claims carried by the booking API's access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Login/register answer from the booking API. Some deployments return
/// `token`, others `access_token`; the user may sit next to it or under `data`.
#[derive(Deserialize, Default, Debug)]
pub struct RawAuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl RawAuthResponse {
    pub fn into_session(self) -> Option<AuthSession> {
        let nested = self.data.unwrap_or(Value::Null);
        let token = self
            .token
            .or(self.access_token)
            .or_else(|| nested.get("token").and_then(Value::as_str).map(String::from))
            .or_else(|| {
                nested
                    .get("access_token")
                    .and_then(Value::as_str)
                    .map(String::from)
            })?;
        let user = self
            .user
            .or_else(|| {
                nested
                    .get("user")
                    .cloned()
                    .and_then(|u| serde_json::from_value(u).ok())
            })
            .unwrap_or_default();

        Some(AuthSession {
            token,
            user: User::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_token_and_nested_user_are_found() {
        let raw: RawAuthResponse = serde_json::from_value(json!({
            "data": { "access_token": "abc", "user": { "id": 1, "name": "Iva", "role": "admin" } }
        }))
        .unwrap();
        let session = raw.into_session().unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.name, "Iva");
        assert!(session.user.is_admin());
    }

    #[test]
    fn missing_token_is_not_a_session() {
        let raw: RawAuthResponse =
            serde_json::from_value(json!({ "user": { "id": 1 } })).unwrap();
        assert!(raw.into_session().is_none());
    }
}
