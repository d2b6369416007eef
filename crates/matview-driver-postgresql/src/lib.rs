mod row;

mod sqlstate;
pub(crate) use sqlstate::classify;

use matview_core::{
    async_trait,
    driver::{operation, Operation, Response, TransactionTracker},
    schema::{BindingId, MaterializedView, SchedulerBinding, ViewId, ViewIndex},
    Driver, Error, Result,
};
use matview_sql as sql;

use jiff::Timestamp;
use postgres::tls::MakeTlsConnect;
use postgres::Socket;
use std::sync::Mutex;
use tokio_postgres::{Client, Config};
use url::Url;

/// Bootstrap DDL for the metadata tables backing the record store. Index rows
/// cascade when their owning view row is deleted.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS matview_scheduler_bindings (
    id TEXT PRIMARY KEY,
    interval_ms BIGINT NOT NULL,
    enabled BOOLEAN NOT NULL,
    action TEXT,
    args TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS matview_views (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    table_name TEXT NOT NULL,
    query_definition TEXT NOT NULL,
    binding_id TEXT NOT NULL REFERENCES matview_scheduler_bindings (id),
    created_by TEXT,
    created_at TEXT NOT NULL,
    last_run_at TEXT
);
CREATE TABLE IF NOT EXISTS matview_view_indexes (
    id TEXT PRIMARY KEY,
    seq BIGSERIAL,
    title TEXT NOT NULL,
    view_id TEXT NOT NULL REFERENCES matview_views (id) ON DELETE CASCADE,
    method TEXT NOT NULL,
    column_name TEXT NOT NULL,
    is_unique BOOLEAN NOT NULL,
    created_by TEXT,
    created_at TEXT NOT NULL
);";

#[derive(Debug)]
pub struct PostgreSQL {
    /// The PostgreSQL client.
    client: Client,

    /// Transaction state for this connection; lifecycle operations never
    /// nest, and the tracker enforces that.
    tracker: Mutex<TransactionTracker>,
}

impl PostgreSQL {
    /// Initialize a matview PostgreSQL driver using an initialized connection.
    pub fn new(connection: Client) -> Self {
        Self {
            client: connection,
            tracker: Mutex::new(TransactionTracker::new()),
        }
    }

    /// Connects to a PostgreSQL database using a connection string.
    ///
    /// See [`tokio_postgres::Client`] for more information.
    pub async fn connect(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(anyhow::Error::from)?;

        if url.scheme() != "postgresql" {
            return Err(matview_core::err!(
                "connection URL does not have a `postgresql` scheme; url={}",
                url
            ));
        }

        let host = url
            .host_str()
            .ok_or_else(|| matview_core::err!("missing host in connection URL; url={}", url))?;

        if url.path().is_empty() {
            return Err(matview_core::err!(
                "no database specified - missing path in connection URL; url={}",
                url
            ));
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(url.path().trim_start_matches('/'));

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Self::connect_with_config(config, tokio_postgres::NoTls).await
    }

    /// Connects to a PostgreSQL database using a [`tokio_postgres::Config`].
    pub async fn connect_with_config<T>(config: Config, tls: T) -> Result<Self>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = config.connect(tls).await.map_err(classify)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {e}");
            }
        });

        Ok(Self::new(client))
    }

    /// Creates the metadata tables backing the record store.
    pub async fn push_schema(&self) -> Result<()> {
        self.client.batch_execute(SCHEMA).await.map_err(classify)
    }

    async fn ddl(&self, statement: &sql::Statement) -> Result<Response> {
        let stmt = sql::Serializer::postgresql().serialize(statement);
        self.client.batch_execute(&stmt).await.map_err(classify)?;
        Ok(Response::Unit)
    }

    async fn transaction(&self, op: operation::Transaction) -> Result<Response> {
        let stmt = self.tracker.lock().unwrap().apply(op)?;
        self.client.batch_execute(stmt).await.map_err(classify)?;
        Ok(Response::Unit)
    }

    async fn insert_binding(&self, binding: &SchedulerBinding) -> Result<Response> {
        let id = binding.id.to_string();
        let interval_ms = binding.interval.as_millis() as i64;
        let args = binding.args.to_string();

        self.client
            .execute(
                "INSERT INTO matview_scheduler_bindings \
                 (id, interval_ms, enabled, action, args) \
                 VALUES ($1, $2, $3, $4, $5)",
                &[&id, &interval_ms, &binding.enabled, &binding.action, &args],
            )
            .await
            .map_err(classify)?;

        Ok(Response::Unit)
    }

    async fn update_binding(&self, binding: &SchedulerBinding) -> Result<Response> {
        let id = binding.id.to_string();
        let interval_ms = binding.interval.as_millis() as i64;
        let args = binding.args.to_string();

        let updated = self
            .client
            .execute(
                "UPDATE matview_scheduler_bindings \
                 SET interval_ms = $2, enabled = $3, action = $4, args = $5 \
                 WHERE id = $1",
                &[&id, &interval_ms, &binding.enabled, &binding.action, &args],
            )
            .await
            .map_err(classify)?;

        if updated == 0 {
            return Err(Error::not_found(format!("scheduler binding id={id}")));
        }

        Ok(Response::Unit)
    }

    async fn delete_binding(&self, id: BindingId) -> Result<Response> {
        let id = id.to_string();

        let deleted = self
            .client
            .execute(
                "DELETE FROM matview_scheduler_bindings WHERE id = $1",
                &[&id],
            )
            .await
            .map_err(classify)?;

        if deleted == 0 {
            return Err(Error::not_found(format!("scheduler binding id={id}")));
        }

        Ok(Response::Unit)
    }

    async fn insert_view(&self, view: &MaterializedView) -> Result<Response> {
        let id = view.id.to_string();
        let binding_id = view.binding.id.to_string();
        let created_at = view.created_at.to_string();
        let last_run_at = view.last_run_at.map(|at| at.to_string());

        self.client
            .execute(
                "INSERT INTO matview_views \
                 (id, title, table_name, query_definition, binding_id, \
                  created_by, created_at, last_run_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                &[
                    &id,
                    &view.title,
                    &view.table_name,
                    &view.query_definition,
                    &binding_id,
                    &view.created_by,
                    &created_at,
                    &last_run_at,
                ],
            )
            .await
            .map_err(classify)?;

        Ok(Response::Unit)
    }

    async fn delete_view(&self, id: ViewId) -> Result<Response> {
        let id = id.to_string();

        // Index rows cascade via their foreign key
        let deleted = self
            .client
            .execute("DELETE FROM matview_views WHERE id = $1", &[&id])
            .await
            .map_err(classify)?;

        if deleted == 0 {
            return Err(Error::not_found(format!("materialized view id={id}")));
        }

        Ok(Response::Unit)
    }

    async fn update_last_run(&self, id: ViewId, at: Timestamp) -> Result<Response> {
        let id = id.to_string();
        let at = at.to_string();

        let updated = self
            .client
            .execute(
                "UPDATE matview_views SET last_run_at = $2 WHERE id = $1",
                &[&id, &at],
            )
            .await
            .map_err(classify)?;

        if updated == 0 {
            return Err(Error::not_found(format!("materialized view id={id}")));
        }

        Ok(Response::Unit)
    }

    async fn insert_index(&self, index: &ViewIndex) -> Result<Response> {
        let id = index.id.to_string();
        let view_id = index.view.to_string();
        let method = index.method.sql_name();
        let created_at = index.created_at.to_string();

        self.client
            .execute(
                "INSERT INTO matview_view_indexes \
                 (id, title, view_id, method, column_name, is_unique, \
                  created_by, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                &[
                    &id,
                    &index.title,
                    &view_id,
                    &method,
                    &index.column,
                    &index.unique,
                    &index.created_by,
                    &created_at,
                ],
            )
            .await
            .map_err(classify)?;

        Ok(Response::Unit)
    }

    async fn get_view(&self, id: ViewId) -> Result<Response> {
        let key = id.to_string();

        let view_row = self
            .client
            .query_opt("SELECT * FROM matview_views WHERE id = $1", &[&key])
            .await
            .map_err(classify)?
            .ok_or_else(|| Error::not_found(format!("materialized view id={key}")))?;

        let binding_id: String = view_row.get("binding_id");
        let binding_row = self
            .client
            .query_opt(
                "SELECT * FROM matview_scheduler_bindings WHERE id = $1",
                &[&binding_id],
            )
            .await
            .map_err(classify)?
            .ok_or_else(|| Error::not_found(format!("scheduler binding id={binding_id}")))?;

        let index_rows = self
            .client
            .query(
                "SELECT * FROM matview_view_indexes WHERE view_id = $1 ORDER BY seq",
                &[&key],
            )
            .await
            .map_err(classify)?;

        let view = row::view(&view_row, &binding_row, &index_rows)?;
        Ok(Response::from(view))
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    async fn exec(&self, op: Operation) -> Result<Response> {
        match op {
            Operation::Ddl(op) => self.ddl(&op.statement).await,
            Operation::Transaction(op) => self.transaction(op).await,
            Operation::GetView(op) => self.get_view(op.id).await,
            Operation::InsertView(op) => self.insert_view(&op.view).await,
            Operation::DeleteView(op) => self.delete_view(op.id).await,
            Operation::UpdateLastRun(op) => self.update_last_run(op.id, op.at).await,
            Operation::InsertIndex(op) => self.insert_index(&op.index).await,
            Operation::InsertBinding(op) => self.insert_binding(&op.binding).await,
            Operation::UpdateBinding(op) => self.update_binding(&op.binding).await,
            Operation::DeleteBinding(op) => self.delete_binding(op.id).await,
        }
    }
}
