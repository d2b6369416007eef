use matview_core::{
    schema::{MaterializedView, SchedulerBinding, ViewIndex},
    Result,
};

use jiff::Timestamp;
use std::time::Duration;
use tokio_postgres::Row;

/// Assembles a descriptor aggregate from its three metadata tables.
pub(crate) fn view(
    view_row: &Row,
    binding_row: &Row,
    index_rows: &[Row],
) -> Result<MaterializedView> {
    let created_at: String = view_row.get("created_at");
    let last_run_at: Option<String> = view_row.get("last_run_at");

    Ok(MaterializedView {
        id: view_row.get::<_, String>("id").parse()?,
        title: view_row.get("title"),
        table_name: view_row.get("table_name"),
        query_definition: view_row.get("query_definition"),
        binding: binding(binding_row)?,
        indexes: index_rows.iter().map(index).collect::<Result<_>>()?,
        created_by: view_row.get("created_by"),
        created_at: created_at.parse::<Timestamp>()?,
        last_run_at: match last_run_at {
            Some(at) => Some(at.parse::<Timestamp>()?),
            None => None,
        },
    })
}

pub(crate) fn binding(row: &Row) -> Result<SchedulerBinding> {
    let interval_ms: i64 = row.get("interval_ms");
    let args: String = row.get("args");

    Ok(SchedulerBinding {
        id: row.get::<_, String>("id").parse()?,
        interval: Duration::from_millis(interval_ms as u64),
        enabled: row.get("enabled"),
        action: row.get("action"),
        args: serde_json::from_str(&args)?,
    })
}

pub(crate) fn index(row: &Row) -> Result<ViewIndex> {
    let created_at: String = row.get("created_at");

    Ok(ViewIndex {
        id: row.get::<_, String>("id").parse()?,
        title: row.get("title"),
        view: row.get::<_, String>("view_id").parse()?,
        method: row.get::<_, String>("method").parse()?,
        column: row.get("column_name"),
        unique: row.get("is_unique"),
        created_by: row.get("created_by"),
        created_at: created_at.parse::<Timestamp>()?,
    })
}
