use crate::{Db, Result};

use matview_core::schema::ViewId;
use serde_json::{json, Value};

/// Canonical identifier of the refresh action. A linked scheduler binding's
/// `action` field always carries this value.
pub const REFRESH_MATERIALIZED_VIEW: &str = "matview.tasks.refresh_materialized_view";

/// The scheduled callback: resolves the view descriptor and refreshes it.
///
/// Fails with a not-found error when the id no longer exists (the view was
/// deleted after the schedule fired). Errors propagate to the runner's own
/// failure handling; retry and backoff policy belong to the runner.
pub async fn refresh_materialized_view(db: &Db, id: ViewId) -> Result<()> {
    let mut view = db.get_view(id).await?;
    db.refresh(&mut view).await
}

/// Action arguments encoding exactly one descriptor's id.
pub fn action_args(id: ViewId) -> Value {
    json!({ "materialized_view_id": id.to_string() })
}

/// Decodes a binding's action arguments back into a view id. Runners use this
/// to dispatch a fired binding into [`refresh_materialized_view`].
pub fn view_id_from_args(args: &Value) -> Result<ViewId> {
    let id = args
        .get("materialized_view_id")
        .and_then(Value::as_str)
        .ok_or_else(|| matview_core::err!("malformed action arguments: {args}"))?;

    Ok(id.parse::<ViewId>()?)
}
