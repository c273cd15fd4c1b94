//! Commands that work on any item kind

mod delete;

pub use delete::DeleteItem;
