use crate::cli::DefaultsArgs;
use crate::error::Result;
use std::io::{self, Write};
use tornado::analysis::config::AnalysisConfig;
use tracing::info;

pub fn run(args: DefaultsArgs) -> Result<()> {
    let text = AnalysisConfig::default().to_toml_string()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)?;
            info!("Default configuration written to {:?}", path);
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}
