//! This module contains catalog profiles read from an INI config file.
//!
//! A config file holds one section per profile:
//!
//! ```ini
//! [E2DEMO]
//! CATALOG_TYPE = UC
//! CATALOG_NAMESPACE = aka_interop
//! CATALOG_URL = e2-demo-field-eng.cloud.databricks.com
//! CATALOG_CREDENTIAL = dapixxxxxxxxxxxxxx
//! ```
//!
//! Keys in a `[DEFAULT]` section apply to every profile unless the profile
//! sets them itself. Key names are matched without regard to case.

use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use ini::Ini;

use crate::error::Result;
use crate::{Error, ErrorKind};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "pyiceberg/config.ini";

/// Profile key: catalog type, `GLUE` or `UC`.
pub const CATALOG_TYPE: &str = "CATALOG_TYPE";

/// Profile key: aws region of glue catalog.
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
/// Profile key: aws access key id.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Profile key: aws secret access key.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Profile key: aws session token.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
/// Profile key: warehouse location used by glue catalog file io. Optional.
pub const GLUE_WAREHOUSE: &str = "GLUE_WAREHOUSE";
/// Profile key: glue catalog id. Optional.
pub const GLUE_CATALOG_ID: &str = "GLUE_CATALOG_ID";

/// Profile key: unity catalog warehouse.
pub const CATALOG_NAMESPACE: &str = "CATALOG_NAMESPACE";
/// Profile key: unity catalog workspace host.
pub const CATALOG_URL: &str = "CATALOG_URL";
/// Profile key: unity catalog personal access token.
pub const CATALOG_CREDENTIAL: &str = "CATALOG_CREDENTIAL";

/// Section whose keys every profile inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

const DEFAULT_GLUE_WAREHOUSE: &str = "s3://";

/// Supported catalog backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogType {
    /// AWS Glue data catalog.
    Glue,
    /// Databricks Unity Catalog through its iceberg rest endpoint.
    UnityCatalog,
}

impl CatalogType {
    /// Convert self into the value used in config files.
    pub fn into_static(self) -> &'static str {
        match self {
            CatalogType::Glue => "GLUE",
            CatalogType::UnityCatalog => "UC",
        }
    }
}

impl Display for CatalogType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

impl FromStr for CatalogType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GLUE" => Ok(CatalogType::Glue),
            "UC" => Ok(CatalogType::UnityCatalog),
            other => Err(Error::new(
                ErrorKind::CatalogTypeUnsupported,
                format!("Unsupported CATALOG_TYPE: {other}"),
            )),
        }
    }
}

/// Connection settings of a glue catalog.
#[derive(Clone, PartialEq, Eq)]
pub struct GlueProfile {
    /// Aws region.
    pub region: String,
    /// Aws access key id.
    pub access_key_id: String,
    /// Aws secret access key.
    pub secret_access_key: String,
    /// Aws session token.
    pub session_token: String,
    /// Warehouse location.
    pub warehouse: String,
    /// Glue catalog id, the account's default catalog when absent.
    pub catalog_id: Option<String>,
}

impl Debug for GlueProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlueProfile")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &"***")
            .field("warehouse", &self.warehouse)
            .field("catalog_id", &self.catalog_id)
            .finish()
    }
}

/// Connection settings of a unity catalog.
#[derive(Clone, PartialEq, Eq)]
pub struct UnityCatalogProfile {
    /// Warehouse, the unity catalog name.
    pub namespace: String,
    /// Workspace host, without scheme.
    pub url: String,
    /// Bearer token.
    pub credential: String,
}

impl Debug for UnityCatalogProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnityCatalogProfile")
            .field("namespace", &self.namespace)
            .field("url", &self.url)
            .field("credential", &"***")
            .finish()
    }
}

/// Backend specific part of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogConfig {
    /// Glue catalog settings.
    Glue(GlueProfile),
    /// Unity catalog settings.
    UnityCatalog(UnityCatalogProfile),
}

/// A named profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Section name in config file.
    pub name: String,
    /// Catalog settings.
    pub catalog: CatalogConfig,
}

impl Profile {
    /// Load profile `name` from the INI file at `path`.
    pub fn load(path: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = path.as_ref();
        let conf = Ini::load_from_file(path)
            .map_err(|e| Error::from(e).with_context("config", path.display().to_string()))?;

        let section = conf.section(Some(name)).ok_or_else(|| {
            Error::new(
                ErrorKind::ConfigInvalid,
                format!("Profile {name} not found in config file"),
            )
            .with_context("config", path.display().to_string())
        })?;

        let props: HashMap<String, String> = conf
            .section(Some(DEFAULT_SECTION))
            .into_iter()
            .chain([section])
            .flat_map(|props| props.iter())
            .map(|(k, v)| (k.to_uppercase(), v.to_string()))
            .collect();

        Self::from_section(name, &props)
            .map_err(|e| e.with_context("config", path.display().to_string()))
    }

    /// Build profile `name` from the key values of its section.
    pub fn from_section(name: &str, props: &HashMap<String, String>) -> Result<Self> {
        let profile_type = required(name, props, CATALOG_TYPE)?;
        log::info!("Profile type: {profile_type}");

        let catalog_type = profile_type.parse::<CatalogType>().map_err(|e| {
            log::error!("Unsupported CATALOG_TYPE: {profile_type}");
            e.with_context("profile", name)
        })?;

        let catalog = match catalog_type {
            CatalogType::Glue => CatalogConfig::Glue(GlueProfile {
                region: required(name, props, AWS_DEFAULT_REGION)?,
                access_key_id: required(name, props, AWS_ACCESS_KEY_ID)?,
                secret_access_key: required(name, props, AWS_SECRET_ACCESS_KEY)?,
                session_token: required(name, props, AWS_SESSION_TOKEN)?,
                warehouse: props
                    .get(GLUE_WAREHOUSE)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_GLUE_WAREHOUSE.to_string()),
                catalog_id: props.get(GLUE_CATALOG_ID).cloned(),
            }),
            CatalogType::UnityCatalog => CatalogConfig::UnityCatalog(UnityCatalogProfile {
                namespace: required(name, props, CATALOG_NAMESPACE)?,
                url: required(name, props, CATALOG_URL)?,
                credential: required(name, props, CATALOG_CREDENTIAL)?,
            }),
        };

        Ok(Self {
            name: name.to_string(),
            catalog,
        })
    }

    /// Returns catalog type of this profile.
    pub fn catalog_type(&self) -> CatalogType {
        match &self.catalog {
            CatalogConfig::Glue(_) => CatalogType::Glue,
            CatalogConfig::UnityCatalog(_) => CatalogType::UnityCatalog,
        }
    }
}

fn required(profile: &str, props: &HashMap<String, String>, key: &str) -> Result<String> {
    props.get(key).cloned().ok_or_else(|| {
        Error::new(
            ErrorKind::ConfigInvalid,
            format!("{key} is missing in profile {profile}."),
        )
        .with_context("profile", profile)
    })
}
