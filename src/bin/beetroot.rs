//! Command-line entry point for Beetroot.
//!
//! Usage:
//!
//! ```text
//! beetroot [--root <dir>] scan [--batch] [--answers <file>] [--json]
//! beetroot [--root <dir>] mose <action> [--project <name>] [--pretty]
//! beetroot [--root <dir>] run-script <name>
//! beetroot [--root <dir>] version [--json]
//! ```
//!
//! `scan` walks the services directory, asks for routing settings of every
//! project missing from the registry and prints the environment check.
//! `mose` forwards a fleet action to `config/scripts/mose.sh` and prints its
//! JSON outcome. Every location defaults to the standard checkout layout and
//! can be overridden by flag or `BEETROOT_*` environment variable.

use beetroot::{
    orchestration::{
        adapters::ProcessScriptRunner,
        domain::{ActionOutcome, ScriptName},
        services::{FleetScriptService, FleetScriptServiceError},
    },
    project_registry::{
        adapters::{
            TracingDiagnostics,
            fs::YamlRegistryStore,
            provider::{
                AnswersConfigProvider, DefaultsConfigProvider, InteractiveConfigProvider,
                RoutingPolicy,
            },
        },
        domain::{ProjectConfig, ProjectName, ProjectRegistryDomainError},
        ports::{ConfigProvider, ConfigProviderResult, DiagnosticSink, RegistryStoreError},
        services::{ProjectRegistryReconciler, ReconcilerError, SummaryError},
    },
    settings::{BeetrootSettings, SettingsError, utf8},
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::{Dir, File};
use clap::{Args, Parser, Subcommand};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Beetroot command-line interface.
#[derive(Debug, Parser)]
#[command(name = "beetroot")]
#[command(about = "Environment checks and fleet actions for Beetroot services", long_about = None)]
#[command(version)]
struct Cli {
    /// Root of the Beetroot checkout.
    #[arg(long, env = "BEETROOT_ROOT", default_value = ".")]
    root: PathBuf,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, env = "BEETROOT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log file; defaults to `shared/logs/beetenv.log` below the root.
    #[arg(long, env = "BEETROOT_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Disable the log file.
    #[arg(long, conflicts_with = "log_file")]
    no_log_file: bool,

    /// Helper scripts directory; defaults to `config/scripts` below the root.
    #[arg(long, env = "BEETROOT_SCRIPTS_DIR")]
    scripts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check every service directory and register new projects.
    Scan(ScanArgs),
    /// Run a fleet action through the fleet script.
    Mose(MoseArgs),
    /// Run a helper script from the scripts directory.
    RunScript(RunScriptArgs),
    /// Print the commit the checkout is at.
    Version(VersionArgs),
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Services directory; defaults to `docker` below the root.
    #[arg(long, env = "BEETROOT_SERVICES_DIR")]
    services_dir: Option<PathBuf>,

    /// Registry document; defaults to `config/service-config.yaml`.
    #[arg(long, env = "BEETROOT_REGISTRY")]
    registry: Option<PathBuf>,

    /// Configure new projects with defaults instead of prompting. With
    /// `--answers`, defaults cover projects the document does not list.
    #[arg(long)]
    batch: bool,

    /// Configure new projects from a document in the registry format.
    #[arg(long)]
    answers: Option<PathBuf>,

    /// With `--batch` or `--answers`, never route projects configured by
    /// default.
    #[arg(long)]
    never_route: bool,

    /// Reverse proxy whose labels are looked for.
    #[arg(long)]
    proxy: Option<String>,

    /// Documentation link template with a `project` variable.
    #[arg(long)]
    docs_link: Option<String>,

    /// Print the scan report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct MoseArgs {
    /// Action: up, down, pull, restart, upgrade, import or ps.
    action: String,

    /// Limit the action to one project.
    #[arg(long)]
    project: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Args)]
struct RunScriptArgs {
    /// Script name without directory or `.sh` extension.
    name: String,
}

#[derive(Debug, Args)]
struct VersionArgs {
    /// Print `{"hash": ...}` instead of plain text.
    #[arg(long)]
    json: bool,
}

/// Errors that stop the command-line tool.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Reconciler(#[from] ReconcilerError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Fleet(#[from] FleetScriptServiceError),
    #[error("failed to load answers: {0}")]
    Answers(#[source] RegistryStoreError),
    #[error("invalid project name: {0}")]
    ProjectName(#[source] ProjectRegistryDomainError),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    #[error("failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
}

/// Configuration provider chosen on the command line.
#[derive(Debug)]
enum ScanProvider {
    Interactive(InteractiveConfigProvider),
    Defaults(DefaultsConfigProvider),
    Answers(AnswersConfigProvider),
}

impl ConfigProvider for ScanProvider {
    fn obtain_config(
        &self,
        project: &ProjectName,
        routed_default: bool,
    ) -> ConfigProviderResult<ProjectConfig> {
        match self {
            Self::Interactive(provider) => provider.obtain_config(project, routed_default),
            Self::Defaults(provider) => provider.obtain_config(project, routed_default),
            Self::Answers(provider) => provider.obtain_config(project, routed_default),
        }
    }
}

#[derive(Debug, Serialize)]
struct VersionReport {
    version: &'static str,
    hash: String,
}

fn main() -> Result<ExitCode, BoxError> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;
    init_tracing(&cli.log_level, settings.log_file())?;

    let result = match cli.command {
        Command::Scan(args) => run_scan(&settings, &args),
        Command::Mose(args) => run_mose(&settings, &args),
        Command::RunScript(args) => run_helper_script(&settings, &args),
        Command::Version(args) => print_version(&settings, &args),
    };
    result.map_err(|err| {
        warn!(error = %err, "command failed");
        err.into()
    })
}

fn resolve_settings(cli: &Cli) -> Result<BeetrootSettings, CliError> {
    let mut settings = BeetrootSettings::from_path(cli.root.clone())?;
    if cli.no_log_file {
        settings = settings.with_log_file(None);
    } else if let Some(path) = &cli.log_file {
        settings = settings.with_log_file(Some(utf8(path.clone())?));
    }
    if let Some(dir) = &cli.scripts_dir {
        settings = settings.with_scripts_dir(utf8(dir.clone())?);
    }
    if let Command::Scan(args) = &cli.command {
        if let Some(dir) = &args.services_dir {
            settings = settings.with_services_dir(utf8(dir.clone())?);
        }
        if let Some(path) = &args.registry {
            settings = settings.with_registry_path(utf8(path.clone())?);
        }
        if let Some(proxy) = &args.proxy {
            settings = settings.with_proxy_name(proxy)?;
        }
        if let Some(template) = &args.docs_link {
            settings = settings.with_docs_link_template(template.clone());
        }
    }
    Ok(settings)
}

fn init_tracing(log_level: &str, log_file: Option<&Utf8Path>) -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|err| CliError::Logging(err.to_string()))?;
    let file_layer = log_file
        .map(open_log_file)
        .transpose()?
        .map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn open_log_file(path: &Utf8Path) -> io::Result<File> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("log file {path} must include a file name")))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Dir::create_ambient_dir_all(parent, ambient_authority())?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.open_with(file_name, OpenOptions::new().create(true).append(true))
}

fn scan_provider(args: &ScanArgs) -> Result<ScanProvider, CliError> {
    let policy = if args.never_route {
        RoutingPolicy::NeverRoute
    } else {
        RoutingPolicy::FollowManifest
    };
    if let Some(path) = &args.answers {
        let store = YamlRegistryStore::new(utf8(path.clone())?);
        let answers = AnswersConfigProvider::load(&store).map_err(CliError::Answers)?;
        let provider = if args.batch {
            answers.with_fallback(DefaultsConfigProvider::new(policy))
        } else {
            answers
        };
        return Ok(ScanProvider::Answers(provider));
    }
    if args.batch {
        return Ok(ScanProvider::Defaults(DefaultsConfigProvider::new(policy)));
    }
    Ok(ScanProvider::Interactive(InteractiveConfigProvider::new()))
}

fn run_scan(settings: &BeetrootSettings, args: &ScanArgs) -> Result<ExitCode, CliError> {
    let reconciler = ProjectRegistryReconciler::new(
        Arc::new(settings.project_tree()),
        Arc::new(settings.registry_store()),
        Arc::new(scan_provider(args)?),
        Arc::new(DefaultClock),
        settings.compose_rules()?,
    );
    let diagnostics = TracingDiagnostics::new();

    info!(services = %settings.services_dir(), registry = %settings.registry_path(), "Scanning docker services...");
    let registry = reconciler.load_registry()?;
    let scanned = reconciler.run_scan(registry, &diagnostics);
    diagnostics.flush()?;
    let outcome = scanned?;
    info!(
        projects = outcome.report.projects.len(),
        findings = outcome.report.finding_count(),
        "Environment check complete."
    );

    let rendered = if args.json {
        serde_json::to_string_pretty(&outcome.report)?
    } else {
        settings.summary_renderer().render(&outcome.report)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end())?;
    Ok(ExitCode::SUCCESS)
}

fn fleet_service(settings: &BeetrootSettings) -> FleetScriptService<ProcessScriptRunner> {
    FleetScriptService::new(
        Arc::new(ProcessScriptRunner::new()),
        settings.scripts_dir(),
        settings.root(),
    )
}

fn run_mose(settings: &BeetrootSettings, args: &MoseArgs) -> Result<ExitCode, CliError> {
    let project = args
        .project
        .as_deref()
        .map(ProjectName::new)
        .transpose()
        .map_err(CliError::ProjectName)?;
    let outcome = fleet_service(settings).run_named_action(&args.action, project.as_ref(), args.pretty)?;
    print_outcome(&outcome, args.pretty)
}

fn run_helper_script(settings: &BeetrootSettings, args: &RunScriptArgs) -> Result<ExitCode, CliError> {
    let name = ScriptName::new(args.name.as_str()).map_err(FleetScriptServiceError::from)?;
    let outcome = fleet_service(settings).run_script(&name)?;
    print_outcome(&outcome, false)
}

fn print_outcome(outcome: &ActionOutcome, pretty: bool) -> Result<ExitCode, CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", outcome.to_json(pretty)?)?;
    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_version(settings: &BeetrootSettings, args: &VersionArgs) -> Result<ExitCode, CliError> {
    let report = VersionReport {
        version: env!("CARGO_PKG_VERSION"),
        hash: fleet_service(settings).commit_hash(),
    };
    let mut stdout = io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
    } else {
        writeln!(stdout, "beetroot {} ({})", report.version, report.hash)?;
    }
    Ok(ExitCode::SUCCESS)
}
