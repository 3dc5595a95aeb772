use std::fmt::Display;

use iceberg::{NamespaceIdent, TableIdent};
use itertools::Itertools;

use crate::error::Result;
use crate::{Error, ErrorKind};

/// Namespace of tables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// Levels in namespace.
    pub levels: Vec<String>,
}

impl Namespace {
    /// Creates namespace
    pub fn new(levels: impl IntoIterator<Item = impl ToString>) -> Self {
        Self {
            levels: levels.into_iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Dotted name used for display and for exclusion matching.
    pub fn dotted_name(&self) -> String {
        self.levels.iter().join(".")
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dotted_name())
    }
}

impl From<NamespaceIdent> for Namespace {
    fn from(value: NamespaceIdent) -> Self {
        Self::new(value.inner())
    }
}

impl TryFrom<&Namespace> for NamespaceIdent {
    type Error = Error;

    fn try_from(value: &Namespace) -> Result<Self> {
        NamespaceIdent::from_vec(value.levels.clone()).map_err(|e| {
            Error::new(
                ErrorKind::Unexpected,
                format!("Can't convert namespace [{value}] to catalog identifier"),
            )
            .set_source(e)
        })
    }
}

/// Full qualified name of table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableIdentifier {
    /// Namespace
    pub namespace: Namespace,
    /// Table name
    pub name: String,
}

impl TableIdentifier {
    /// Creates a full qualified table identifier from a list of names.
    pub fn new(names: impl IntoIterator<Item = impl ToString>) -> Result<Self> {
        let mut names: Vec<String> = names.into_iter().map(|s| s.to_string()).collect();
        let table_name = names.pop().ok_or_else(|| {
            Error::new(ErrorKind::Unexpected, "Table identifier can't be empty!")
        })?;

        Ok(Self {
            namespace: Namespace { levels: names },
            name: table_name,
        })
    }
}

impl Display for TableIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.levels.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

impl From<TableIdent> for TableIdentifier {
    fn from(value: TableIdent) -> Self {
        Self {
            namespace: Namespace::from(value.namespace),
            name: value.name,
        }
    }
}

impl TryFrom<&TableIdentifier> for TableIdent {
    type Error = Error;

    fn try_from(value: &TableIdentifier) -> Result<Self> {
        Ok(TableIdent::new(
            NamespaceIdent::try_from(&value.namespace)?,
            value.name.clone(),
        ))
    }
}

/// What the catalog returned when loading a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    /// Whether the catalog returned table metadata.
    pub has_metadata: bool,
    /// Location of the current metadata file, if the catalog reported one.
    pub metadata_location: Option<String>,
}

impl LoadedTable {
    /// Creates a loaded table pointing at `metadata_location`.
    pub fn new(metadata_location: impl Into<String>) -> Self {
        Self {
            has_metadata: true,
            metadata_location: Some(metadata_location.into()),
        }
    }

    /// Returns the metadata location only when this is a valid iceberg table,
    /// i.e. both metadata and a non-empty metadata location are present.
    pub fn iceberg_metadata_location(&self) -> Option<&str> {
        if !self.has_metadata {
            return None;
        }
        self.metadata_location
            .as_deref()
            .filter(|location| !location.is_empty())
    }
}
