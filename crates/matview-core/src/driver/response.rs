use crate::schema::MaterializedView;

/// Successful result of a driver operation.
#[derive(Debug)]
pub enum Response {
    /// The operation completed and returns nothing
    Unit,

    /// A resolved view descriptor, including its binding and ordered indexes
    View(Box<MaterializedView>),
}

impl Response {
    pub fn into_view(self) -> crate::Result<MaterializedView> {
        match self {
            Response::View(view) => Ok(*view),
            Response::Unit => Err(crate::err!("driver returned no view for a view lookup")),
        }
    }
}

impl From<MaterializedView> for Response {
    fn from(value: MaterializedView) -> Self {
        Response::View(Box::new(value))
    }
}
