//! This module defines the catalog api used by the inventory.

use std::sync::Arc;

use async_trait::async_trait;
use iceberg::{NamespaceIdent, TableIdent};

use crate::error::Result;
use crate::profile::{CatalogConfig, Profile};
use crate::table::{LoadedTable, Namespace, TableIdentifier};

mod glue;
pub use glue::*;
mod rest;
pub use rest::*;

/// Reference to catalog.
pub type CatalogRef = Arc<dyn Catalog>;

/// Catalog definition.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Return catalog's name.
    fn name(&self) -> &str;

    /// List top level namespaces.
    async fn list_namespaces(&self) -> Result<Vec<Namespace>>;

    /// List tables under namespace.
    async fn list_tables(&self, ns: &Namespace) -> Result<Vec<TableIdentifier>>;

    /// Load table.
    async fn load_table(&self, table_name: &TableIdentifier) -> Result<LoadedTable>;
}

/// Creates the catalog described by `profile`.
pub async fn load_catalog(profile: &Profile) -> Result<CatalogRef> {
    log::debug!(
        "Creating {} catalog for profile {}",
        profile.catalog_type(),
        profile.name
    );

    match &profile.catalog {
        CatalogConfig::Glue(glue) => {
            log::info!("Configuring AWS Glue catalog in region {}.", glue.region);
            let catalog = new_glue_catalog(&profile.name, glue).await?;
            log::info!("Glue catalog configured successfully.");
            Ok(Arc::new(catalog))
        }
        CatalogConfig::UnityCatalog(uc) => {
            let catalog = new_unity_catalog(&profile.name, uc)?;
            log::info!(
                "Unity Catalog configured successfully.\nCATALOG_URL: {}\nCATALOG_NAMESPACE: {}",
                uc.url,
                uc.namespace
            );
            Ok(Arc::new(catalog))
        }
    }
}

/// Catalog backed by a client of the `iceberg` crate.
pub struct IcebergCatalog<C> {
    name: String,
    inner: C,
}

impl<C> IcebergCatalog<C> {
    /// Wraps `inner` under `name`.
    pub fn new(name: impl AsRef<str>, inner: C) -> Self {
        Self {
            name: name.as_ref().to_string(),
            inner,
        }
    }
}

#[async_trait]
impl<C> Catalog for IcebergCatalog<C>
where
    C: iceberg::Catalog,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        Ok(self
            .inner
            .list_namespaces(None)
            .await?
            .into_iter()
            .map(Namespace::from)
            .collect())
    }

    async fn list_tables(&self, ns: &Namespace) -> Result<Vec<TableIdentifier>> {
        let ns_ident = NamespaceIdent::try_from(ns)?;
        Ok(self
            .inner
            .list_tables(&ns_ident)
            .await
            .map_err(|e| crate::Error::from(e).with_context("namespace", ns.to_string()))?
            .into_iter()
            .map(TableIdentifier::from)
            .collect())
    }

    async fn load_table(&self, table_name: &TableIdentifier) -> Result<LoadedTable> {
        let table_ident = TableIdent::try_from(table_name)?;
        let table = self
            .inner
            .load_table(&table_ident)
            .await
            .map_err(|e| crate::Error::from(e).with_context("table", table_name.to_string()))?;

        let metadata_location = table.metadata_location().map(str::to_string);
        log::debug!("Table metadata location of {table_name} is {metadata_location:?}");

        Ok(LoadedTable {
            has_metadata: true,
            metadata_location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::UnityCatalogProfile;

    #[tokio::test]
    async fn test_load_unity_catalog() {
        let profile = Profile {
            name: "E2DEMO".to_string(),
            catalog: CatalogConfig::UnityCatalog(UnityCatalogProfile {
                namespace: "ns1".to_string(),
                url: "host.example.com".to_string(),
                credential: "tok".to_string(),
            }),
        };

        let catalog = load_catalog(&profile).await.unwrap();
        assert_eq!("E2DEMO", catalog.name());
    }
}
