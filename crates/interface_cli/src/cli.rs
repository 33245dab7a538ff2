//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inventory-sync")]
#[command(about = "Query and synchronise with the inventory backend")]
#[command(version)]
pub struct Cli {
    /// Configuration file, overridden by INVENTORY_* environment variables
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "INVENTORY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Keep one session open for the whole command instead of per request
    #[arg(long, global = true)]
    pub keep_alive: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a session and report backend health
    Health,

    /// List carrier names
    Carriers,

    /// List location group names
    LocationGroups,

    /// Show a part by SKU
    Part {
        sku: String,
        /// Location group to read the part in (defaults to the configured one)
        #[arg(long)]
        location_group: Option<String>,
    },

    /// Print available inventory for every eligible variant in a JSON file
    Inventory {
        /// JSON array of storefront variants
        variants: PathBuf,
    },

    /// Print shipped shipments for an order stored as JSON
    Shipments {
        /// JSON storefront order
        order: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_part_with_location_group() {
        let cli = Cli::parse_from([
            "inventory-sync",
            "part",
            "MUG-01",
            "--location-group",
            "Overflow",
        ]);

        assert_eq!(
            cli.command,
            Command::Part {
                sku: "MUG-01".to_string(),
                location_group: Some("Overflow".to_string()),
            }
        );
        assert!(!cli.keep_alive);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "inventory-sync",
            "inventory",
            "variants.json",
            "--keep-alive",
            "--config",
            "inventory.toml",
        ]);

        assert!(cli.keep_alive);
        assert_eq!(cli.config, Some(PathBuf::from("inventory.toml")));
        assert!(matches!(cli.command, Command::Inventory { .. }));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
