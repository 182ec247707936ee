//! Bulk request construction and response parsing.
//!
//! A bulk body is NDJSON: one action line followed by one source line per
//! document. The response carries one item per action, in request order.

use serde_json::{json, Value};

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationResult, BatchOperationSummary};
use song_seeder_shared::SongAction;

/// Build the bulk body lines for a batch of actions.
///
/// Uses the `create` operation so that a document already present under the
/// same `_id` is reported as a conflict instead of being overwritten.
pub(crate) fn bulk_lines(actions: &[SongAction]) -> Result<Vec<Value>, SearchIndexError> {
    let mut lines = Vec::with_capacity(actions.len() * 2);

    for action in actions {
        lines.push(json!({
            "create": {
                "_index": action.index,
                "_id": action.document_id(),
            }
        }));
        let source = serde_json::to_value(&action.document)
            .map_err(|e| SearchIndexError::parse(format!("Failed to serialize document: {}", e)))?;
        lines.push(source);
    }

    Ok(lines)
}

/// Parse a bulk response body into per-document results.
///
/// Items are matched to actions by position. An action without a matching
/// item is counted as failed.
pub(crate) fn parse_bulk_response(
    actions: &[SongAction],
    body: &Value,
) -> Result<BatchOperationSummary, SearchIndexError> {
    let items = body
        .get("items")
        .and_then(|i| i.as_array())
        .ok_or_else(|| SearchIndexError::parse("Bulk response has no items array"))?;

    let results = actions
        .iter()
        .enumerate()
        .map(|(position, action)| match items.get(position) {
            Some(item) => parse_item(action, item),
            None => BatchOperationResult::failed(
                action.document_id(),
                None,
                SearchIndexError::parse("Missing bulk response item"),
            ),
        })
        .collect();

    Ok(BatchOperationSummary::from_results(results))
}

fn parse_item(action: &SongAction, item: &Value) -> BatchOperationResult {
    // Each item is keyed by the operation name: {"create": {...}}
    let Some(outcome) = item.as_object().and_then(|o| o.values().next()) else {
        return BatchOperationResult::failed(
            action.document_id(),
            None,
            SearchIndexError::parse("Malformed bulk response item"),
        );
    };

    let document_id = outcome
        .get("_id")
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| action.document_id());
    let status = outcome
        .get("status")
        .and_then(|s| s.as_u64())
        .map(|s| s as u16);

    match outcome.get("error") {
        Some(error) => {
            let reason = describe_error(error);
            BatchOperationResult::failed(
                document_id,
                status,
                SearchIndexError::rejected(status.unwrap_or(0), reason),
            )
        }
        None if status.is_some_and(|s| !(200..300).contains(&s)) => {
            let code = status.unwrap_or(0);
            BatchOperationResult::failed(
                document_id,
                status,
                SearchIndexError::rejected(code, "unexpected item status"),
            )
        }
        None => BatchOperationResult::succeeded(document_id, status),
    }
}

fn describe_error(error: &Value) -> String {
    if let Some(reason) = error.as_str() {
        return reason.to_string();
    }

    let kind = error.get("type").and_then(|t| t.as_str());
    let reason = error.get("reason").and_then(|r| r.as_str());
    match (kind, reason) {
        (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
        (Some(kind), None) => kind.to_string(),
        (None, Some(reason)) => reason.to_string(),
        (None, None) => error.to_string(),
    }
}
