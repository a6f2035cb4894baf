use std::collections::BTreeSet;

use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};
use uuid::Uuid;

use crate::{ResultEngine, transactions};

use super::Engine;

impl Engine {
    /// Distinct categories `user_id` has recorded at least one transaction in.
    pub async fn list_user_categories(&self, user_id: Uuid) -> ResultEngine<BTreeSet<String>> {
        let categories: Vec<String> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Category)
            .distinct()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(transactions::Column::Category)
            .into_tuple()
            .all(&self.database)
            .await?;
        Ok(categories.into_iter().collect())
    }
}
