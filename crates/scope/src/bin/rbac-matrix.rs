//! Prints the permission table and the capability matrix as JSON.
//!
//! Used when reviewing access changes: diff the output before and after.

use serde::Serialize;

use fuelops_auth::RbacRegistry;
use fuelops_scope::{CapabilityRow, ScopeConfig, capability_matrix};

#[derive(Serialize)]
struct Matrix {
    registry: RbacRegistry,
    capabilities: Vec<CapabilityRow>,
}

fn main() -> anyhow::Result<()> {
    fuelops_observability::init();
    let config = ScopeConfig::from_env();

    let matrix = Matrix {
        registry: RbacRegistry::build(),
        capabilities: capability_matrix(&config),
    };
    println!("{}", serde_json::to_string_pretty(&matrix)?);
    Ok(())
}
