//! Unity catalog, reached through its iceberg rest endpoint.

use std::collections::HashMap;

use iceberg_catalog_rest::{RestCatalog, RestCatalogConfig};

use crate::error::Result;
use crate::profile::UnityCatalogProfile;
use crate::{Error, ErrorKind};

use super::IcebergCatalog;

/// Rest catalog config key: catalog kind.
pub const REST_CATALOG_TYPE: &str = "type";
/// Rest catalog config key: endpoint uri.
pub const REST_CATALOG_URI: &str = "uri";
/// Rest catalog config key: bearer token.
pub const REST_CATALOG_TOKEN: &str = "token";
/// Rest catalog config key: warehouse.
pub const REST_CATALOG_WAREHOUSE: &str = "warehouse";

const UNITY_CATALOG_ICEBERG_REST_PATH: &str = "api/2.1/unity-catalog/iceberg-rest";

/// Unity catalog backed by the iceberg rest client.
pub type UnityCatalog = IcebergCatalog<RestCatalog>;

/// Returns the iceberg rest endpoint of a unity catalog workspace host.
pub fn unity_catalog_endpoint(host: &str) -> String {
    format!("https://{host}/{UNITY_CATALOG_ICEBERG_REST_PATH}")
}

/// Rest catalog properties for a unity catalog profile.
pub fn unity_catalog_props(profile: &UnityCatalogProfile) -> HashMap<String, String> {
    HashMap::from([
        (REST_CATALOG_TYPE.to_string(), "rest".to_string()),
        (
            REST_CATALOG_URI.to_string(),
            unity_catalog_endpoint(&profile.url),
        ),
        (REST_CATALOG_TOKEN.to_string(), profile.credential.clone()),
        (REST_CATALOG_WAREHOUSE.to_string(), profile.namespace.clone()),
    ])
}

/// Creates unity catalog.
pub fn new_unity_catalog(name: &str, profile: &UnityCatalogProfile) -> Result<UnityCatalog> {
    let mut props = unity_catalog_props(profile);
    let uri = take(&mut props, REST_CATALOG_URI)?;
    let warehouse = take(&mut props, REST_CATALOG_WAREHOUSE)?;
    props.remove(REST_CATALOG_TYPE);

    log::debug!("Creating rest catalog {name} with uri {uri} and warehouse {warehouse}");

    let config = RestCatalogConfig::builder()
        .uri(uri)
        .warehouse(warehouse)
        .props(props)
        .build();

    Ok(IcebergCatalog::new(name, RestCatalog::new(config)))
}

fn take(props: &mut HashMap<String, String>, key: &str) -> Result<String> {
    props.remove(key).ok_or_else(|| {
        Error::new(
            ErrorKind::Unexpected,
            format!("{key} is missing for rest catalog."),
        )
    })
}
