mod state;
pub use state::PhysicalIndex;
use state::{State, Table, ViewRow};

use matview_core::{
    async_trait,
    driver::{
        operation::{self, Transaction},
        Operation, Response, TransactionTracker,
    },
    schema::{BindingId, MaterializedView, SchedulerBinding, ViewId},
    stmt::Statement,
    Driver, Error, Result,
};

use std::sync::Mutex;

/// An in-process driver.
///
/// Models the physical side (tables and their indexes) just far enough to
/// honor the DDL guards: `IF NOT EXISTS` creates are no-ops when the object
/// exists, `DROP INDEX` fails when it does not, and a concurrent refresh
/// requires the table to exist and carry a unique index. Transactions snapshot
/// the whole state on `Start` and restore it on `Rollback`, which is the same
/// all-or-nothing behavior transactional DDL gives the SQL drivers.
#[derive(Debug, Default)]
pub struct Memory {
    shared: Mutex<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    state: State,

    /// State as of `Transaction::Start`, restored on `Rollback`
    snapshot: Option<State>,

    tracker: TransactionTracker,

    faults: Vec<Fault>,
}

/// Where an injected fault fires. Used by tests to simulate partial failures
/// at precise points inside a lifecycle operation's transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    /// The nth DDL statement executed after injection (1-based)
    Ddl { nth: usize },
    InsertView,
    UpdateBinding,
    DeleteBinding,
    DeleteView,
}

#[derive(Debug)]
struct Fault {
    point: FaultPoint,
    error: Error,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arranges for the operation matching `point` to fail with `error`.
    pub fn inject_fault(&self, point: FaultPoint, error: Error) {
        self.shared
            .lock()
            .unwrap()
            .faults
            .push(Fault { point, error });
    }

    /// Whether the physical materialized view table exists.
    pub fn table_exists(&self, table_name: &str) -> bool {
        self.shared
            .lock()
            .unwrap()
            .state
            .tables
            .contains_key(table_name)
    }

    /// Whether the physical index exists on the given table.
    pub fn index_exists(&self, table_name: &str, index_name: &str) -> bool {
        self.shared
            .lock()
            .unwrap()
            .state
            .tables
            .get(table_name)
            .is_some_and(|table| table.indexes.contains_key(index_name))
    }

    /// Whether the table carries at least one unique index.
    pub fn unique_index_exists(&self, table_name: &str) -> bool {
        self.shared
            .lock()
            .unwrap()
            .state
            .tables
            .get(table_name)
            .is_some_and(|table| table.indexes.values().any(|index| index.unique))
    }

    /// The physical index as stored, if it exists.
    pub fn physical_index(&self, table_name: &str, index_name: &str) -> Option<PhysicalIndex> {
        self.shared
            .lock()
            .unwrap()
            .state
            .tables
            .get(table_name)
            .and_then(|table| table.indexes.get(index_name))
            .cloned()
    }

    /// The persisted binding row, independent of any in-memory descriptor.
    pub fn stored_binding(&self, id: BindingId) -> Option<SchedulerBinding> {
        self.shared.lock().unwrap().state.bindings.get(&id).cloned()
    }

    /// Whether the view descriptor row exists.
    pub fn view_row_exists(&self, id: ViewId) -> bool {
        self.shared.lock().unwrap().state.views.contains_key(&id)
    }

    /// Number of persisted view rows.
    pub fn view_row_count(&self) -> usize {
        self.shared.lock().unwrap().state.views.len()
    }

    /// Number of persisted binding rows.
    pub fn binding_row_count(&self) -> usize {
        self.shared.lock().unwrap().state.bindings.len()
    }

    /// Number of persisted index rows owned by the view.
    pub fn index_row_count(&self, id: ViewId) -> usize {
        self.shared
            .lock()
            .unwrap()
            .state
            .indexes
            .values()
            .filter(|index| index.view == id)
            .count()
    }
}

#[async_trait]
impl Driver for Memory {
    async fn exec(&self, op: Operation) -> Result<Response> {
        let mut shared = self.shared.lock().unwrap();
        shared.exec(op)
    }
}

impl Shared {
    fn exec(&mut self, op: Operation) -> Result<Response> {
        self.check_fault(&op)?;

        match op {
            Operation::Transaction(op) => self.transaction(op),
            Operation::Ddl(ddl) => self.ddl(ddl.statement),
            Operation::GetView(op) => self.get_view(op.id).map(Response::from),
            Operation::InsertView(op) => self.insert_view(op.view),
            Operation::DeleteView(op) => self.delete_view(op.id),
            Operation::UpdateLastRun(op) => self.update_last_run(op),
            Operation::InsertIndex(op) => self.insert_index(op.index),
            Operation::InsertBinding(op) => self.insert_binding(op.binding),
            Operation::UpdateBinding(op) => self.update_binding(op.binding),
            Operation::DeleteBinding(op) => self.delete_binding(op.id),
        }
    }

    fn check_fault(&mut self, op: &Operation) -> Result<()> {
        let candidate = self.faults.iter_mut().position(|fault| {
            match (&mut fault.point, op) {
                (FaultPoint::Ddl { nth }, Operation::Ddl(_)) => {
                    if *nth > 1 {
                        *nth -= 1;
                        false
                    } else {
                        true
                    }
                }
                (FaultPoint::InsertView, Operation::InsertView(_)) => true,
                (FaultPoint::UpdateBinding, Operation::UpdateBinding(_)) => true,
                (FaultPoint::DeleteBinding, Operation::DeleteBinding(_)) => true,
                (FaultPoint::DeleteView, Operation::DeleteView(_)) => true,
                _ => false,
            }
        });

        match candidate {
            Some(at) => Err(self.faults.remove(at).error),
            None => Ok(()),
        }
    }

    fn transaction(&mut self, op: Transaction) -> Result<Response> {
        self.tracker.apply(op)?;

        match op {
            Transaction::Start => self.snapshot = Some(self.state.clone()),
            Transaction::Commit => self.snapshot = None,
            // The tracker guarantees a snapshot exists here
            Transaction::Rollback => self.state = self.snapshot.take().unwrap(),
        }

        Ok(Response::Unit)
    }

    fn ddl(&mut self, statement: Statement) -> Result<Response> {
        match statement {
            Statement::CreateMaterializedView(stmt) => {
                // IF NOT EXISTS: re-creating is success, not error
                self.state
                    .tables
                    .entry(stmt.table_name)
                    .or_insert_with(Table::default);
            }
            Statement::CreateIndex(stmt) => {
                let table = self.state.tables.get_mut(&stmt.on).ok_or_else(|| {
                    Error::not_found(format!("relation {} does not exist", stmt.on))
                })?;
                table.indexes.entry(stmt.name).or_insert(PhysicalIndex {
                    column: stmt.column,
                    method: stmt.method,
                    unique: stmt.unique,
                });
            }
            Statement::DropIndex(stmt) => {
                let owner = self
                    .state
                    .tables
                    .values_mut()
                    .find(|table| table.indexes.contains_key(&stmt.name));
                match owner {
                    Some(table) => {
                        table.indexes.shift_remove(&stmt.name);
                    }
                    None => {
                        return Err(Error::not_found(format!(
                            "index {} does not exist",
                            stmt.name
                        )))
                    }
                }
            }
            Statement::DropMaterializedView(stmt) => {
                // IF EXISTS: dropping an already-dropped view is a no-op.
                // Physical indexes go with the table.
                self.state.tables.shift_remove(&stmt.table_name);
            }
            Statement::RefreshMaterializedView(stmt) => {
                let table = self.state.tables.get(&stmt.table_name).ok_or_else(|| {
                    Error::not_found(format!("relation {} does not exist", stmt.table_name))
                })?;
                if !table.indexes.values().any(|index| index.unique) {
                    return Err(Error::refresh(format!(
                        "materialized view {} has no unique index",
                        stmt.table_name
                    )));
                }
            }
        }

        Ok(Response::Unit)
    }

    fn get_view(&self, id: ViewId) -> Result<MaterializedView> {
        let row = self
            .state
            .views
            .get(&id)
            .ok_or_else(|| Error::not_found(format!("materialized view id={id}")))?;

        let binding = self
            .state
            .bindings
            .get(&row.binding)
            .ok_or_else(|| Error::not_found(format!("scheduler binding id={}", row.binding)))?;

        let indexes = self
            .state
            .indexes
            .values()
            .filter(|index| index.view == id)
            .cloned()
            .collect();

        Ok(row.assemble(binding.clone(), indexes))
    }

    fn insert_view(&mut self, view: MaterializedView) -> Result<Response> {
        if !self.state.bindings.contains_key(&view.binding.id) {
            return Err(Error::not_found(format!(
                "scheduler binding id={}",
                view.binding.id
            )));
        }
        if self.state.views.contains_key(&view.id) {
            return Err(matview_core::err!("duplicate view id={}", view.id));
        }
        self.state.views.insert(view.id, ViewRow::from_view(&view));
        Ok(Response::Unit)
    }

    fn delete_view(&mut self, id: ViewId) -> Result<Response> {
        if self.state.views.shift_remove(&id).is_none() {
            return Err(Error::not_found(format!("materialized view id={id}")));
        }
        // Cascade: index rows are owned by the view row
        self.state.indexes.retain(|_, index| index.view != id);
        Ok(Response::Unit)
    }

    fn update_last_run(&mut self, op: operation::UpdateLastRun) -> Result<Response> {
        let row = self
            .state
            .views
            .get_mut(&op.id)
            .ok_or_else(|| Error::not_found(format!("materialized view id={}", op.id)))?;
        row.last_run_at = Some(op.at);
        Ok(Response::Unit)
    }

    fn insert_index(&mut self, index: matview_core::schema::ViewIndex) -> Result<Response> {
        if !self.state.views.contains_key(&index.view) {
            return Err(Error::not_found(format!(
                "materialized view id={}",
                index.view
            )));
        }
        self.state.indexes.insert(index.id, index);
        Ok(Response::Unit)
    }

    fn insert_binding(&mut self, binding: SchedulerBinding) -> Result<Response> {
        if self.state.bindings.contains_key(&binding.id) {
            return Err(matview_core::err!("duplicate binding id={}", binding.id));
        }
        self.state.bindings.insert(binding.id, binding);
        Ok(Response::Unit)
    }

    fn update_binding(&mut self, binding: SchedulerBinding) -> Result<Response> {
        if !self.state.bindings.contains_key(&binding.id) {
            return Err(Error::not_found(format!(
                "scheduler binding id={}",
                binding.id
            )));
        }
        self.state.bindings.insert(binding.id, binding);
        Ok(Response::Unit)
    }

    fn delete_binding(&mut self, id: BindingId) -> Result<Response> {
        if self.state.bindings.shift_remove(&id).is_none() {
            return Err(Error::not_found(format!("scheduler binding id={id}")));
        }
        Ok(Response::Unit)
    }
}
