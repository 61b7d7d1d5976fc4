mod cli;
mod config;

use cli::{Args, Command, OverrideKind, ReportArgs, ResolveOsArgs};
use config::{EffectiveConfig, ReportConfig, DEFAULT_DB_SCHEMA_VERSION};
use std::process;
use vulnscope::adapters::outbound::console::StderrProgressReporter;
use vulnscope::adapters::outbound::database::InMemoryMetadataStore;
use vulnscope::adapters::outbound::filesystem::FileSystemReader;
use vulnscope::application::dto::{DocumentRequest, OutputFormat, ToolIdentity};
use vulnscope::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use vulnscope::application::read_models::Document;
use vulnscope::application::use_cases::BuildDocumentUseCase;
use vulnscope::ports::inbound::DocumentAssemblyPort;
use vulnscope::ports::outbound::{MetadataSource, ScanInputReader};
use vulnscope::scan_report::domain::Severity;
use vulnscope::scan_report::policies::{
    resolve_known_ecosystem, resolve_os_specifier, OsSpecifier, SchemaVersion, SortableMatch,
    KNOWN_OS_SPECIFIER_OVERRIDES, KNOWN_PACKAGE_SPECIFIER_OVERRIDES,
};
use vulnscope::shared::error::ExitCode;
use vulnscope::shared::Result;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };
    process::exit(exit_code.as_i32());
}

fn run() -> Result<ExitCode> {
    // Clap exits with code 2 on its own for invalid arguments
    let args = Args::parse_args();

    match args.command {
        Command::Report(report) => run_report(report),
        Command::ResolveOs(resolve) => run_resolve_os(resolve),
        Command::ResolveEcosystem { ecosystem } => {
            println!("{}", resolve_known_ecosystem(&ecosystem));
            Ok(ExitCode::Success)
        }
        Command::Overrides { kind } => run_overrides(kind),
    }
}

fn run_report(args: ReportArgs) -> Result<ExitCode> {
    let loaded = config::load_config(args.config.as_deref())?;
    let (config_path, file_config) = match loaded {
        Some((path, file)) => (Some(path), file.resolve()?),
        None => (None, ReportConfig::default()),
    };

    // CLI flags take precedence over the config file
    let format = args.format.or(file_config.format).unwrap_or_default();
    let sort_strategy = args.sort_by.or(file_config.sort_by).unwrap_or_default();
    let fail_on = args.fail_on.or(file_config.fail_on);

    let reader = FileSystemReader::new();
    let input = reader.read_scan_input(&args.scan)?;
    let metadata = match args.metadata.as_deref() {
        Some(path) => reader.read_metadata(path)?,
        None => Vec::new(),
    };

    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };
    let use_case = BuildDocumentUseCase::new(InMemoryMetadataStore::new(metadata), progress_reporter);

    let effective = EffectiveConfig {
        scan: args.scan.clone(),
        metadata: args.metadata.clone(),
        format: format.to_string(),
        sort_by: sort_strategy.to_string(),
        fail_on: fail_on.map(|s| s.to_string()),
        config_file: config_path,
    };
    let tool = match file_config.tool_name {
        Some(name) => ToolIdentity::new(name, env!("CARGO_PKG_VERSION")),
        None => ToolIdentity::default(),
    };
    let request = DocumentRequest::new(tool, serde_json::to_value(&effective)?, sort_strategy);

    let document = use_case.assemble(&input, &request)?;

    render(&document, format, args.output, args.quiet)?;

    Ok(exit_code_for(&document, fail_on))
}

fn render(
    document: &Document,
    format: OutputFormat,
    output: Option<std::path::PathBuf>,
    quiet: bool,
) -> Result<()> {
    if !quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
    let formatted_output = FormatterFactory::create(format).format(document)?;
    PresenterFactory::create(PresenterType::from(output)).present(&formatted_output)
}

/// Maps the report onto the process exit code given the `--fail-on` threshold
fn exit_code_for(document: &Document, fail_on: Option<Severity>) -> ExitCode {
    let Some(threshold) = fail_on else {
        return ExitCode::Success;
    };

    if document.matches.iter().any(|m| m.severity() >= threshold) {
        ExitCode::VulnerabilitiesDetected
    } else {
        ExitCode::Success
    }
}

fn run_resolve_os(args: ResolveOsArgs) -> Result<ExitCode> {
    let schema = match args.db_schema {
        Some(schema) => schema,
        None => {
            let file_schema = match config::load_config(args.config.as_deref())? {
                Some((_, file)) => file.resolve()?.db_schema_version,
                None => None,
            };
            match file_schema {
                Some(schema) => schema,
                None => DEFAULT_DB_SCHEMA_VERSION.parse::<SchemaVersion>()?,
            }
        }
    };

    let mut specifier = OsSpecifier::from_release(&args.name, &args.version);
    if let Some(codename) = args.codename {
        specifier = specifier.with_codename(codename);
    }

    let resolved = resolve_os_specifier(
        &KNOWN_OS_SPECIFIER_OVERRIDES,
        specifier,
        &args.version,
        &schema,
    );
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(ExitCode::Success)
}

fn run_overrides(kind: OverrideKind) -> Result<ExitCode> {
    let os = &*KNOWN_OS_SPECIFIER_OVERRIDES;
    let package = &*KNOWN_PACKAGE_SPECIFIER_OVERRIDES;

    let value = match kind {
        OverrideKind::Os => serde_json::to_value(os)?,
        OverrideKind::Package => serde_json::to_value(package)?,
        OverrideKind::All => serde_json::json!({ "os": os, "package": package }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(ExitCode::Success)
}
