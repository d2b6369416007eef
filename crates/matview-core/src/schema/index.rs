use super::ViewId;

use jiff::Timestamp;
use std::fmt;
use uuid::Uuid;

/// An index on a materialized view table.
///
/// The metadata row's lifecycle is independent of the physical index: the DDL
/// operations are issued separately and fail naturally when the owning view's
/// table does not exist.
#[derive(Debug, Clone)]
pub struct ViewIndex {
    /// Uniquely identifies the index descriptor
    pub id: IndexId,

    /// Human label
    pub title: String,

    /// The owning view. A weak reference for lookup only; the view owns the
    /// index, never the other way around.
    pub view: ViewId,

    /// The index method keyword
    pub method: IndexMethod,

    /// Column on the materialized table being indexed
    pub column: String,

    /// When `true`, indexed entries are unique. A concurrent refresh requires
    /// at least one unique index on the table.
    pub unique: bool,

    /// Audit metadata
    pub created_by: Option<String>,
    pub created_at: Timestamp,
}

impl ViewIndex {
    /// The derived physical index name: `{table_name}_{column}`.
    ///
    /// Not guaranteed collision-free across tables with overlapping name
    /// prefixes; callers pick names that do not collide.
    pub fn index_name(&self, table_name: &str) -> String {
        format!("{}_{}", table_name, self.column)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct IndexId(pub Uuid);

impl IndexId {
    pub fn generate() -> Self {
        IndexId(Uuid::new_v4())
    }
}

impl fmt::Debug for IndexId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "IndexId({})", self.0)
    }
}

impl fmt::Display for IndexId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, fmt)
    }
}

impl std::str::FromStr for IndexId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(IndexId(s.parse()?))
    }
}

/// The closed set of index methods the database supports for materialized
/// view tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum IndexMethod {
    #[default]
    BTree,
    Gin,
    Gist,
    Hash,
}

impl IndexMethod {
    /// Returns the keyword used in `CREATE INDEX ... USING {keyword}`.
    pub fn sql_name(&self) -> &'static str {
        match self {
            IndexMethod::BTree => "btree",
            IndexMethod::Gin => "gin",
            IndexMethod::Gist => "gist",
            IndexMethod::Hash => "hash",
        }
    }
}

impl fmt::Display for IndexMethod {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.sql_name())
    }
}

impl std::str::FromStr for IndexMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "btree" => Ok(IndexMethod::BTree),
            "gin" => Ok(IndexMethod::Gin),
            "gist" => Ok(IndexMethod::Gist),
            "hash" => Ok(IndexMethod::Hash),
            _ => Err(crate::err!("unknown index method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_method_sql_names() {
        assert_eq!(IndexMethod::BTree.sql_name(), "btree");
        assert_eq!(IndexMethod::Gin.sql_name(), "gin");
        assert_eq!(IndexMethod::Gist.sql_name(), "gist");
        assert_eq!(IndexMethod::Hash.sql_name(), "hash");
    }

    #[test]
    fn index_method_round_trip() {
        for method in [
            IndexMethod::BTree,
            IndexMethod::Gin,
            IndexMethod::Gist,
            IndexMethod::Hash,
        ] {
            assert_eq!(method.sql_name().parse::<IndexMethod>().unwrap(), method);
        }
    }

    #[test]
    fn index_method_unknown_keyword() {
        assert!("brin".parse::<IndexMethod>().is_err());
    }

    #[test]
    fn derived_index_name() {
        let index = ViewIndex {
            id: IndexId::generate(),
            title: "by id".to_string(),
            view: ViewId::generate(),
            method: IndexMethod::BTree,
            column: "id".to_string(),
            unique: true,
            created_by: None,
            created_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(index.index_name("t1"), "t1_id");
    }
}
