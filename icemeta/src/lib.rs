//! icemeta lists the current metadata file location of every
//! [Apache Iceberg](https://iceberg.apache.org/) table registered in a
//! Unity Catalog or AWS Glue catalog.

// Make sure all our public APIs have docs.
#![deny(missing_docs)]

mod table;
pub use table::{LoadedTable, Namespace, TableIdentifier};
mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

pub mod catalog;
pub mod inventory;
pub mod profile;
