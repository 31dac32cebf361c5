use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role {}", other)),
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct RawUser {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "de::opt_id")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub is_admin: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        let full_name = match (raw.first_name, raw.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first),
            (None, Some(last)) => Some(last),
            (None, None) => None,
        };
        let role = match (raw.role.as_deref(), raw.is_admin) {
            (Some(role), _) => Role::parse(role),
            (None, Some(true)) => Role::Admin,
            _ => Role::User,
        };
        let email = raw.email.unwrap_or_default();

        Self {
            id: raw.id.or(raw.object_id).unwrap_or_default(),
            name: raw
                .name
                .or(raw.username)
                .or(full_name)
                .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string()),
            email,
            role,
            phone: raw.phone,
            avatar: raw.avatar,
            created_at: raw.created_at,
        }
    }
}
