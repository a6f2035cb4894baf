//! Categories API endpoints.

use api_types::category::CategoryTaxonomy;
use axum::{Extension, Json, extract::State};
use engine::{TransactionKind, allowed_categories};

use crate::{Principal, ServerError, server::ServerState};

fn names(kind: TransactionKind) -> Vec<String> {
    allowed_categories(kind)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// The fixed category table, for building forms.
pub async fn taxonomy() -> Json<CategoryTaxonomy> {
    Json(CategoryTaxonomy {
        income: names(TransactionKind::Income),
        expense: names(TransactionKind::Expense),
    })
}

/// Categories the caller has actually used, sorted.
pub async fn user_categories(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<String>>, ServerError> {
    let categories = state
        .engine
        .list_user_categories(principal.user_id)
        .await?
        .into_iter()
        .collect();
    Ok(Json(categories))
}
