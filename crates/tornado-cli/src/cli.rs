use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tornado CLI - infer bonds, base pairs and duplex helices from atom records.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a structure: molecules, bonds, base pairs and duplexes.
    Analyze(AnalyzeArgs),
    /// Print the default analysis configuration as TOML.
    Defaults(DefaultsArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the input atom records (CSV with a header row).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a TOML file with extra residue-code aliases.
    #[arg(long, value_name = "PATH")]
    pub aliases: Option<PathBuf>,

    // --- Overrides ---
    /// Skip distance-based bond inference, overriding the config file.
    #[arg(long)]
    pub no_distance_bonds: bool,

    /// Override the minimum number of base pairs in a duplex.
    #[arg(long, value_name = "INT")]
    pub min_base_pairs: Option<usize>,
}

/// Arguments for the `defaults` subcommand.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Write the configuration to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_arguments_parse() {
        let cli = Cli::parse_from([
            "tornado",
            "-vv",
            "analyze",
            "-i",
            "atoms.csv",
            "--no-distance-bonds",
            "--min-base-pairs",
            "5",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected the analyze subcommand");
        };
        assert_eq!(args.input, PathBuf::from("atoms.csv"));
        assert!(args.no_distance_bonds);
        assert_eq!(args.min_base_pairs, Some(5));
        assert!(args.config.is_none());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["tornado", "-q", "-v", "defaults"]);
        assert!(result.is_err());
    }
}
