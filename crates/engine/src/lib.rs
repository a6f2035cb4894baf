//! Transaction core of the personal finance tracker.
//!
//! The [`Engine`] owns the database connection and is the only way to read or
//! write user data. Every operation takes the id of the authenticated user and
//! never touches rows owned by someone else.

pub use amount::{Amount, AmountError};
pub use commands::{LoginInput, RegistrationInput, TransactionFilterInput, TransactionInput};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use taxonomy::{allowed_categories, is_allowed, is_known};
pub use transactions::{Transaction, TransactionKind, UnknownKind};
pub use users::User;
pub use validation::{
    Credentials, NewTransaction, Registration, TransactionFilter, Violation, Violations,
};

mod amount;
mod commands;
mod error;
mod ops;
pub mod taxonomy;
mod transactions;
mod users;
mod util;
pub mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
