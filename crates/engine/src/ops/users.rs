use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, SqlErr, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Credentials, EngineError, Registration, ResultEngine, User, users};

use super::{Engine, with_tx};

const EMAIL_TAKEN: &str = "Email already registered";

/// Runs a bcrypt call on the blocking pool so it does not stall the async
/// workers.
async fn off_runtime<T, F>(work: F) -> ResultEngine<T>
where
    F: FnOnce() -> bcrypt::BcryptResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| EngineError::Hashing(err.to_string()))?
        .map_err(|err| EngineError::Hashing(err.to_string()))
}

impl Engine {
    /// Creates an account. Emails are unique regardless of case.
    pub async fn register_user(&self, registration: Registration) -> ResultEngine<User> {
        let cost = self.password_cost;
        let password = registration.password;
        let password_hash = off_runtime(move || bcrypt::hash(password, cost)).await?;

        with_tx!(self, |db_tx| {
            let existing = users::Entity::find()
                .filter(users::Column::Email.eq(registration.email.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(EMAIL_TAKEN.to_string()));
            }

            let now = Utc::now();
            let model = users::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                email: ActiveValue::Set(registration.email),
                password_hash: ActiveValue::Set(password_hash),
                first_name: ActiveValue::Set(registration.first_name),
                last_name: ActiveValue::Set(registration.last_name),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    EngineError::ExistingKey(EMAIL_TAKEN.to_string())
                }
                _ => EngineError::Database(err),
            })?;

            let user = User::try_from(model)?;
            tracing::debug!("registered user {}", user.id);
            Ok(user)
        })
    }

    /// Checks an email/password pair. Unknown emails and wrong passwords
    /// yield the same error.
    pub async fn authenticate(&self, credentials: Credentials) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(credentials.email))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        let password = credentials.password;
        let hash = model.password_hash.clone();
        let valid = off_runtime(move || bcrypt::verify(password, &hash)).await?;
        if !valid {
            return Err(EngineError::InvalidCredentials);
        }
        User::try_from(model)
    }
}
