use crate::config::Config;
use schemars::schema_for;

/// JSON Schema describing `planledger.yaml`
pub fn config_schema() -> anyhow::Result<String> {
    let schema = schema_for!(Config);
    Ok(serde_json::to_string_pretty(&schema)?)
}

pub fn execute() -> anyhow::Result<()> {
    println!("{}", config_schema()?);
    Ok(())
}
