use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use icemeta::catalog::load_catalog;
use icemeta::inventory::{get_iceberg_metadata_paths, DEFAULT_EXCLUDED_NAMESPACES};
use icemeta::profile::{Profile, DEFAULT_CONFIG_PATH};

/// List the metadata location of every iceberg table in a catalog.
#[derive(Parser, Debug)]
#[command(about = "Select configuration profile.")]
struct Args {
    /// Configuration profile to use (e.g., SANDBOX or E2DEMO).
    #[arg(short, long)]
    profile: String,

    /// Config file holding the profiles.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Namespace to skip, may be repeated.
    #[arg(long = "exclude", default_values = DEFAULT_EXCLUDED_NAMESPACES)]
    excluded_namespaces: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Using profile: {}", args.profile);

    let profile = Profile::load(&args.config, &args.profile)?;
    let catalog = load_catalog(&profile).await?;

    log::info!("Listing iceberg tables of catalog {}", catalog.name());

    let excluded: HashSet<String> = args.excluded_namespaces.into_iter().collect();
    let metadata_paths = get_iceberg_metadata_paths(catalog.as_ref(), Some(&excluded)).await?;

    println!("Iceberg Metadata Paths:");
    for (table, path) in metadata_paths.iter() {
        println!("{table}: {path}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_is_required() {
        assert!(Args::try_parse_from(["icemeta"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["icemeta", "-p", "E2DEMO"]).unwrap();
        assert_eq!("E2DEMO", args.profile);
        assert_eq!(PathBuf::from(DEFAULT_CONFIG_PATH), args.config);
        assert_eq!(
            vec!["default".to_string(), "information_schema".to_string()],
            args.excluded_namespaces
        );
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "icemeta",
            "--profile",
            "SANDBOX",
            "--config",
            "/etc/icemeta.ini",
            "--exclude",
            "staging",
        ])
        .unwrap();
        assert_eq!("SANDBOX", args.profile);
        assert_eq!(PathBuf::from("/etc/icemeta.ini"), args.config);
        assert_eq!(vec!["staging".to_string()], args.excluded_namespaces);
    }
}
