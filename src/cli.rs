use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vulnscope::application::dto::OutputFormat;
use vulnscope::scan_report::domain::Severity;
use vulnscope::scan_report::policies::{SchemaVersion, SortStrategy};

/// Assemble vulnerability reports and normalize distro/ecosystem specifiers
#[derive(Parser, Debug)]
#[command(name = "vulnscope")]
#[command(version)]
#[command(
    about = "Assemble vulnerability reports and normalize distro/ecosystem specifiers",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble a report document from a scan input file
    Report(ReportArgs),

    /// Resolve a raw OS release to the specifier the vulnerability database indexes
    ResolveOs(ResolveOsArgs),

    /// Resolve a raw ecosystem name to its canonical package type
    ResolveEcosystem {
        /// Ecosystem as reported upstream (e.g. "golang", "pecl", "dpkg")
        ecosystem: String,
    },

    /// Print the built-in override tables as JSON
    Overrides {
        /// Which table to print
        #[arg(short, long, value_enum, default_value_t = OverrideKind::All)]
        kind: OverrideKind,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ReportArgs {
    /// Scan input file (JSON with packages, matches, ignoredMatches, source)
    #[arg(short, long, value_name = "FILE")]
    pub scan: PathBuf,

    /// Vulnerability metadata export (JSON array of records)
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Match ordering: package, severity, vulnerability or risk
    #[arg(long)]
    pub sort_by: Option<SortStrategy>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with code 1 when a match at or above this severity is reported
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// Config file path (defaults to ./vulnscope.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ResolveOsArgs {
    /// OS name as reported by the inventory (e.g. "rockylinux")
    pub name: String,

    /// Raw version string (e.g. "8.4", "3.20_alpha20240329")
    #[arg(default_value = "")]
    pub version: String,

    /// Codename reported alongside the version
    #[arg(long)]
    pub codename: Option<String>,

    /// Database schema version of the consuming client
    #[arg(long, value_name = "VERSION")]
    pub db_schema: Option<SchemaVersion>,

    /// Config file path (defaults to ./vulnscope.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    Os,
    Package,
    All,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_report_args() {
        let args = Args::try_parse_from([
            "vulnscope",
            "report",
            "--scan",
            "scan.json",
            "-f",
            "md",
            "--sort-by",
            "severity",
            "--fail-on",
            "high",
        ])
        .unwrap();

        match args.command {
            Command::Report(report) => {
                assert_eq!(report.scan, PathBuf::from("scan.json"));
                assert_eq!(report.format, Some(OutputFormat::Markdown));
                assert_eq!(report.sort_by, Some(SortStrategy::Severity));
                assert_eq!(report.fail_on, Some(Severity::High));
                assert!(report.metadata.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_report_requires_scan() {
        assert!(Args::try_parse_from(["vulnscope", "report"]).is_err());
    }

    #[test]
    fn test_parse_resolve_os_defaults() {
        let args = Args::try_parse_from(["vulnscope", "resolve-os", "archlinux"]).unwrap();
        match args.command {
            Command::ResolveOs(resolve) => {
                assert_eq!(resolve.name, "archlinux");
                assert_eq!(resolve.version, "");
                assert!(resolve.db_schema.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_db_schema_is_rejected() {
        let result = Args::try_parse_from([
            "vulnscope",
            "resolve-os",
            "rhel",
            "8.4",
            "--db-schema",
            "six",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_kind() {
        let args = Args::try_parse_from(["vulnscope", "overrides", "--kind", "package"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Overrides {
                kind: OverrideKind::Package
            }
        ));
    }
}
