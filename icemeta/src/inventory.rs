//! Walks a catalog and collects the metadata location of every iceberg table.

use std::collections::{HashMap, HashSet};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::table::{Namespace, TableIdentifier};
use crate::Error;

/// Namespaces skipped when none are given on the command line.
pub const DEFAULT_EXCLUDED_NAMESPACES: [&str; 2] = ["default", "information_schema"];

/// A table whose load failed during traversal.
#[derive(Debug)]
pub struct TableLoadFailure {
    /// Table that failed.
    pub table: TableIdentifier,
    /// Why it failed.
    pub error: Error,
}

/// Table name to metadata location, in the order the catalog returned them.
#[derive(Debug, Default)]
pub struct MetadataPaths {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,

    failures: Vec<TableLoadFailure>,
    skipped_namespaces: Vec<Namespace>,
}

impl MetadataPaths {
    /// Insert or overwrite the location of `table_name`.
    pub fn insert(&mut self, table_name: String, metadata_location: String) {
        match self.index.get(&table_name) {
            Some(&pos) => self.entries[pos].1 = metadata_location,
            None => {
                self.index.insert(table_name.clone(), self.entries.len());
                self.entries.push((table_name, metadata_location));
            }
        }
    }

    /// Metadata location of `table_name`.
    pub fn get(&self, table_name: &str) -> Option<&str> {
        self.index
            .get(table_name)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Iterate `(table_name, metadata_location)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no iceberg table was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tables that failed to load.
    pub fn failures(&self) -> &[TableLoadFailure] {
        &self.failures
    }

    /// Namespaces skipped because they were excluded.
    pub fn skipped_namespaces(&self) -> &[Namespace] {
        &self.skipped_namespaces
    }

    /// Entries as a plain map, ignoring order.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.iter().cloned().collect()
    }
}

/// Collect metadata locations of all iceberg tables in `catalog`.
///
/// Namespaces whose dotted name is in `excluded_namespaces` are skipped.
/// A table that fails to load is logged and recorded in
/// [`MetadataPaths::failures`]; a table without metadata or metadata location
/// is not an iceberg table and is left out silently. Errors listing
/// namespaces or tables abort the traversal.
pub async fn get_iceberg_metadata_paths(
    catalog: &dyn Catalog,
    excluded_namespaces: Option<&HashSet<String>>,
) -> Result<MetadataPaths> {
    let empty = HashSet::new();
    let excluded_namespaces = excluded_namespaces.unwrap_or(&empty);

    let mut results = MetadataPaths::default();

    for namespace in catalog.list_namespaces().await? {
        let schema_name = namespace.dotted_name();
        log::info!("Checking schema: {schema_name}");

        if excluded_namespaces.contains(&schema_name) {
            log::info!("Skipping excluded schema: {schema_name}");
            results.skipped_namespaces.push(namespace);
            continue;
        }

        for table_id in catalog.list_tables(&namespace).await? {
            let table_name = table_id.to_string();
            match catalog.load_table(&table_id).await {
                Ok(table) => {
                    if let Some(location) = table.iceberg_metadata_location() {
                        results.insert(table_name, location.to_string());
                    }
                }
                Err(error) => {
                    log::error!("Error processing {table_name}: {error}");
                    results.failures.push(TableLoadFailure {
                        table: table_id,
                        error,
                    });
                }
            }
        }
    }

    Ok(results)
}
