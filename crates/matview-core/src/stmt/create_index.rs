use super::Statement;

use crate::schema::{IndexMethod, ViewIndex};

/// `CREATE [UNIQUE] INDEX IF NOT EXISTS {name} ON {on} USING {method}({column})`
#[derive(Debug, Clone)]
pub struct CreateIndex {
    /// Name of the index, derived as `{table}_{column}`
    pub name: String,

    /// Which table to index
    pub on: String,

    /// The index method keyword
    pub method: IndexMethod,

    /// The column to index
    pub column: String,

    /// When true, the index is unique
    pub unique: bool,
}

impl Statement {
    pub fn create_index(index: &ViewIndex, table_name: &str) -> Self {
        CreateIndex {
            name: index.index_name(table_name),
            on: table_name.to_string(),
            method: index.method,
            column: index.column.clone(),
            unique: index.unique,
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
