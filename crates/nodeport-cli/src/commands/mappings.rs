//! List the active type mapping

use anyhow::Result;
use nodeport_codegen::TypeMapping;

/// Run the mappings command
pub async fn run(config_path: Option<&str>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let mapping = TypeMapping::from_config(&config);

    println!(
        "Profile: {} ({} entries, output type {})",
        mapping.name(),
        mapping.len(),
        mapping.output_type()
    );
    for (tag, construct) in mapping.entries() {
        println!("  {:<24} {}", tag, construct);
    }
    Ok(())
}
