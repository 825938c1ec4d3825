use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use crate::report;
use std::io::{self, Write};
use tornado::analysis::config::AnalysisConfig;
use tornado::analysis::progress::ProgressReporter;
use tornado::core::io::delimited::CsvRecordFile;
use tornado::core::io::traits::AtomRecordFile;
use tornado::core::topology::registry::{RegistryBuilder, ResidueRegistry};
use tornado::workflows;
use tracing::{debug, info, warn};

pub fn run(args: AnalyzeArgs, show_progress: bool) -> Result<()> {
    let progress = CliProgressHandler::new(show_progress);
    let stdout = io::stdout();
    let result = execute(&args, &progress, &mut stdout.lock());
    progress.finish();
    result
}

fn execute(
    args: &AnalyzeArgs,
    progress: &CliProgressHandler,
    out: &mut impl Write,
) -> Result<()> {
    let config = resolve_config(args)?;

    let registry = match &args.aliases {
        Some(path) => {
            info!("Loading residue aliases from {:?}", path);
            RegistryBuilder::new().with_aliases_file(path)?.build()
        }
        None => ResidueRegistry::standard(),
    };

    info!("Loading atom records from {:?}", &args.input);
    let set = CsvRecordFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e,
    })?;
    if !set.skipped.is_empty() {
        warn!(
            skipped = set.skipped.len(),
            "Some atom records were malformed and skipped."
        );
        for e in &set.skipped {
            debug!("{}", e);
        }
    }

    let reporter = ProgressReporter::with_callback(progress.callback());
    let analysis = workflows::analyze::run(&set.records, &registry, &config, &reporter)?;
    info!(
        "Workflow finished with {} molecule(s).",
        analysis.molecules.len()
    );

    report::write_report(out, &analysis)?;
    Ok(())
}

/// Loads the config file (or the defaults) and applies command-line overrides.
fn resolve_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading analysis configuration from {:?}", path);
            AnalysisConfig::load(path)?
        }
        None => AnalysisConfig::default(),
    };
    if args.no_distance_bonds {
        config.bonds.infer_from_distance = false;
    }
    if let Some(n) = args.min_base_pairs {
        config.duplexes.min_base_pairs = n;
    }
    config.validate()?;
    Ok(config)
}
