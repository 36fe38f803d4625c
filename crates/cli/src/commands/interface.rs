//! `clientgen interface`: print an interface for a schema map.

use std::path::PathBuf;

use clap::Args;
use clientgen_core::descriptor::load_schema_map;
use clientgen_core::generate_interface;

use super::run_inner;

/// Arguments for `clientgen interface`.
#[derive(Args, Debug, Clone)]
pub struct InterfaceArgs {
    /// Interface name
    #[arg(long, value_name = "NAME")]
    pub name: String,
    /// Member schemas as a JSON or YAML map
    #[arg(long, value_name = "FILE")]
    pub schemas: PathBuf,
}

/// Run `interface` and return the exit code.
pub fn run(args: &InterfaceArgs) -> i32 {
    run_inner(|| {
        let schemas = load_schema_map(&args.schemas).map_err(|e| e.to_string())?;
        let rendered = generate_interface(&args.name, &schemas).map_err(|e| e.to_string())?;
        print!("{rendered}");
        Ok(())
    })
}
