//! Transactions API endpoints

use api_types::transaction::{TransactionListQuery, TransactionNew, TransactionView};
use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use engine::{NewTransaction, TransactionFilter, TransactionFilterInput, TransactionInput};

use crate::{Principal, ServerError, server::ServerState};

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: tx.kind.as_str().to_string(),
        category: tx.category,
        amount: tx.amount.as_f64(),
        date: tx.occurred_at,
        user_id: tx.user_id,
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

/// Amounts arrive either as JSON numbers or as numeric strings; anything else
/// is left to the amount rules to reject.
fn amount_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let Json(payload) = payload.map_err(|err| ServerError::Generic(err.body_text()))?;

    let input = TransactionInput {
        kind: payload.kind,
        category: payload.category,
        amount: amount_text(payload.amount),
        date: payload.date,
    };
    let data = NewTransaction::parse(&input)?;

    let tx = state
        .engine
        .create_transaction(data, principal.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

pub async fn list(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let Query(query) = query.map_err(|err| ServerError::Generic(err.body_text()))?;

    let input = TransactionFilterInput {
        kind: query.kind,
        category: query.category,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let filter = TransactionFilter::parse(&input)?;

    let transactions = state
        .engine
        .list_transactions(&filter, principal.user_id)
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();

    Ok(Json(transactions))
}
