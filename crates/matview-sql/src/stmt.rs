pub use matview_core::stmt::*;
