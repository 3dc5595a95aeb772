//! AWS Glue data catalog.

use std::collections::HashMap;

use iceberg::io::{S3_ACCESS_KEY_ID, S3_REGION, S3_SECRET_ACCESS_KEY, S3_SESSION_TOKEN};
use iceberg_catalog_glue::{GlueCatalog, GlueCatalogConfig};

use crate::error::Result;
use crate::profile::GlueProfile;

use super::IcebergCatalog;

/// Glue catalog config key: aws region.
pub const GLUE_REGION_NAME: &str = "region_name";
/// Glue catalog config key: aws access key id.
pub const GLUE_ACCESS_KEY_ID: &str = "aws_access_key_id";
/// Glue catalog config key: aws secret access key.
pub const GLUE_SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
/// Glue catalog config key: aws session token.
pub const GLUE_SESSION_TOKEN: &str = "aws_session_token";

/// Glue catalog backed by the iceberg glue client.
pub type AwsGlueCatalog = IcebergCatalog<GlueCatalog>;

/// Glue catalog properties for a glue profile.
///
/// The same credentials feed both the glue api client and the s3 file io
/// that reads table metadata. The process environment is left untouched.
pub fn glue_catalog_props(profile: &GlueProfile) -> HashMap<String, String> {
    HashMap::from([
        (GLUE_REGION_NAME.to_string(), profile.region.clone()),
        (GLUE_ACCESS_KEY_ID.to_string(), profile.access_key_id.clone()),
        (
            GLUE_SECRET_ACCESS_KEY.to_string(),
            profile.secret_access_key.clone(),
        ),
        (GLUE_SESSION_TOKEN.to_string(), profile.session_token.clone()),
        (S3_REGION.to_string(), profile.region.clone()),
        (S3_ACCESS_KEY_ID.to_string(), profile.access_key_id.clone()),
        (
            S3_SECRET_ACCESS_KEY.to_string(),
            profile.secret_access_key.clone(),
        ),
        (S3_SESSION_TOKEN.to_string(), profile.session_token.clone()),
    ])
}

/// Glue client config for a glue profile.
pub fn glue_catalog_config(profile: &GlueProfile) -> GlueCatalogConfig {
    let builder = GlueCatalogConfig::builder()
        .warehouse(profile.warehouse.clone())
        .props(glue_catalog_props(profile));

    match &profile.catalog_id {
        Some(catalog_id) => builder.catalog_id(catalog_id.clone()).build(),
        None => builder.build(),
    }
}

/// Creates glue catalog.
pub async fn new_glue_catalog(name: &str, profile: &GlueProfile) -> Result<AwsGlueCatalog> {
    log::debug!(
        "Creating glue catalog {name} with warehouse {} and catalog id {:?}",
        profile.warehouse,
        profile.catalog_id
    );

    let catalog = GlueCatalog::new(glue_catalog_config(profile)).await?;
    Ok(IcebergCatalog::new(name, catalog))
}
