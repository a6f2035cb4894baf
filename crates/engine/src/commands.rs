//! Raw caller input for engine operations.
//!
//! These types carry exactly what a client sent, as text, before any rule is
//! applied. They are turned into typed values by [`crate::validation`]; the
//! engine's write and query methods only accept the validated forms.

/// Candidate transaction as submitted by a client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionInput {
    pub kind: Option<String>,
    pub category: Option<String>,
    /// Decimal text, e.g. `"1000"` or `"12.50"`.
    pub amount: Option<String>,
    /// ISO-8601 timestamp of when the transaction happened.
    pub date: Option<String>,
}

impl TransactionInput {
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(kind.into()),
            category: Some(category.into()),
            amount: Some(amount.into()),
            date: Some(date.into()),
        }
    }
}

/// Query parameters for listing transactions. Absent fields impose no
/// constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilterInput {
    pub kind: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TransactionFilterInput {
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }
}

/// Sign-up form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}
