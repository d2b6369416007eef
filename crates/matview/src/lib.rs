pub mod db;
pub use db::{Db, IndexDef, ViewDef};

pub mod driver;

pub mod task;

pub use matview_core::{schema, stmt, Error, Result};
