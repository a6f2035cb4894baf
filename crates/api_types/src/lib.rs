use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// One message per violated rule, present on validation failures only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct RegisterRequest {
        pub email: String,
        pub password: String,
        pub first_name: String,
        pub last_name: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub id: Uuid,
        pub email: String,
        pub first_name: String,
        pub last_name: String,
        pub created_at: DateTime<Utc>,
    }

    /// Returned by register and login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub user: UserView,
        /// Bearer token for the `Authorization` header.
        pub token: String,
    }
}

pub mod transaction {
    use super::*;

    /// Create payload.
    ///
    /// Every field is optional at the wire level so that missing values are
    /// reported as rule violations instead of a decoding error. `amount`
    /// accepts a JSON number or a numeric string. A `userId` sent by the
    /// client is ignored.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub category: Option<String>,
        pub amount: Option<serde_json::Value>,
        pub date: Option<String>,
    }

    /// Query string of `GET /transactions`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionListQuery {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub category: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: String,
        pub category: String,
        /// Major units as a plain number, e.g. `1000` or `12.5`.
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub user_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod category {
    use super::*;

    /// The fixed category table, keyed by transaction type.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTaxonomy {
        #[serde(rename = "INCOME")]
        pub income: Vec<String>,
        #[serde(rename = "EXPENSE")]
        pub expense: Vec<String>,
    }
}
