use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{NewTransaction, ResultEngine, Transaction, TransactionFilter, transactions};

use super::Engine;

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionFilter) -> Self {
        if let Some(kind) = filter.kind {
            self = self.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(category) = &filter.category {
            self = self.filter(transactions::Column::Category.eq(category.as_str()));
        }
        if let Some(start) = filter.start {
            self = self.filter(transactions::Column::OccurredAt.gte(start));
        }
        if let Some(end) = filter.end {
            self = self.filter(transactions::Column::OccurredAt.lte(end));
        }
        self
    }
}

impl Engine {
    /// Persists a validated transaction for `user_id`.
    ///
    /// The returned record carries the generated id and timestamps exactly as
    /// they were stored.
    pub async fn create_transaction(
        &self,
        data: NewTransaction,
        user_id: Uuid,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::new(data, user_id, Utc::now());
        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        tracing::debug!(
            "created {} transaction {} for user {}",
            tx.kind,
            tx.id,
            tx.user_id
        );
        Ok(tx)
    }

    /// Lists the transactions of `user_id` matching `filter`.
    ///
    /// Ordered newest first by occurrence date; rows sharing a date are
    /// ordered by id so the sequence is stable across calls.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        user_id: Uuid,
    ) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .apply_tx_filters(filter)
            .order_by_desc(transactions::Column::OccurredAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?;
        tracing::debug!("listed {} transactions for user {user_id}", models.len());
        transactions::from_models(models)
    }
}
