use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored user: a server-assigned `id` plus whatever attributes the client sent.
///
/// Attributes are kept as raw JSON and serialized flat next to `id`, so
/// `{"id":2,"name":"B"}` round-trips unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct User {
    pub id: u64,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub attributes: Map<String, Value>,
}

/// One entry of the stored collection.
///
/// Entries without a non-negative integer `id` are kept as raw JSON so they
/// survive reads and rewrites unchanged; they are never matched by id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum UserRecord {
    User(User),
    Unrecognized(Value),
}

impl UserRecord {
    pub fn id(&self) -> Option<u64> {
        match self {
            UserRecord::User(user) => Some(user.id),
            UserRecord::Unrecognized(_) => None,
        }
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            UserRecord::User(user) => Some(user),
            UserRecord::Unrecognized(_) => None,
        }
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        UserRecord::User(user)
    }
}

/// Body of `POST /api/users`. Any JSON object is accepted.
#[derive(Debug, Deserialize, Clone, Default, utoipa::ToSchema)]
#[schema(value_type = Object)]
pub struct NewUser(pub Map<String, Value>);

impl NewUser {
    /// Builds the stored record. A client-supplied `id` never overrides the allocated one.
    pub fn into_user(self, id: u64) -> User {
        let mut attributes = self.0;
        attributes.remove("id");
        User { id, attributes }
    }
}

/// Envelope returned by `GET /api/users/{id}`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestedUserResponse {
    pub requested_user: User,
}
