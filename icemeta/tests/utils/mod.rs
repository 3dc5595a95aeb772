use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use icemeta::catalog::Catalog;
use icemeta::{Error, ErrorKind, LoadedTable, Namespace, Result, TableIdentifier};
use log::Level;

/// Capture log records of the current test thread.
pub fn set_up() {
    testing_logger::setup();
}

/// Drain log records captured since `set_up`, returning `(level, body)`.
pub fn take_logs() -> Vec<(Level, String)> {
    let logs = RefCell::new(vec![]);
    testing_logger::validate(|captured| {
        logs.borrow_mut()
            .extend(captured.iter().map(|log| (log.level, log.body.clone())));
    });
    logs.into_inner()
}

/// Bodies of `logs` at `level`.
pub fn bodies(logs: &[(Level, String)], level: Level) -> Vec<&str> {
    logs.iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, body)| body.as_str())
        .collect()
}

/// What loading a table returns.
#[derive(Clone)]
pub enum TableState {
    Iceberg(String),
    NoMetadataLocation,
    NoMetadata,
    LoadFails(String),
}

/// Catalog kept in memory, namespaces listed in insertion order.
#[derive(Default)]
pub struct MemoryCatalog {
    namespaces: Vec<(Namespace, BTreeMap<String, TableState>)>,
    broken_namespaces: Vec<Namespace>,
    loads: AtomicUsize,
}

impl MemoryCatalog {
    pub fn with_table(mut self, ns: &str, table: &str, state: TableState) -> Self {
        let namespace = Namespace::new(ns.split('.'));
        match self.namespaces.iter_mut().find(|(n, _)| n == &namespace) {
            Some((_, tables)) => {
                tables.insert(table.to_string(), state);
            }
            None => self.namespaces.push((
                namespace,
                BTreeMap::from([(table.to_string(), state)]),
            )),
        }
        self
    }

    pub fn with_namespace(mut self, ns: &str) -> Self {
        self.namespaces
            .push((Namespace::new(ns.split('.')), BTreeMap::new()));
        self
    }

    /// Listing tables of `ns` fails.
    pub fn with_broken_namespace(mut self, ns: &str) -> Self {
        let namespace = Namespace::new(ns.split('.'));
        self.namespaces.push((namespace.clone(), BTreeMap::new()));
        self.broken_namespaces.push(namespace);
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        Ok(self.namespaces.iter().map(|(ns, _)| ns.clone()).collect())
    }

    async fn list_tables(&self, ns: &Namespace) -> Result<Vec<TableIdentifier>> {
        if self.broken_namespaces.contains(ns) {
            return Err(Error::new(
                ErrorKind::CatalogUnavailable,
                format!("Namespace {ns} can't be listed!"),
            ));
        }

        let (_, tables) = self
            .namespaces
            .iter()
            .find(|(n, _)| n == ns)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::CatalogUnavailable,
                    format!("Namespace {ns} not found!"),
                )
            })?;

        Ok(tables
            .keys()
            .map(|name| TableIdentifier {
                namespace: ns.clone(),
                name: name.clone(),
            })
            .collect())
    }

    async fn load_table(&self, table_name: &TableIdentifier) -> Result<LoadedTable> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        let state = self
            .namespaces
            .iter()
            .find(|(n, _)| n == &table_name.namespace)
            .and_then(|(_, tables)| tables.get(&table_name.name))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::CatalogUnavailable,
                    format!("Table {table_name} not found!"),
                )
            })?;

        match state {
            TableState::Iceberg(location) => Ok(LoadedTable::new(location.clone())),
            TableState::NoMetadataLocation => Ok(LoadedTable {
                has_metadata: true,
                metadata_location: None,
            }),
            TableState::NoMetadata => Ok(LoadedTable {
                has_metadata: false,
                metadata_location: Some(format!("s3://warehouse/{table_name}")),
            }),
            TableState::LoadFails(message) => {
                Err(Error::new(ErrorKind::CatalogUnavailable, message.clone()))
            }
        }
    }
}
