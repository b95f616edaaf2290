use std::process::ExitCode;

use crate::cli::{Cli, USAGE};
use reconflow::artifact::ArtifactStore;
use reconflow::config::Config;
use reconflow::deps::{DependencyResolver, ScriptFetcher, ScriptStatus, SearchPath, HTTPX_RENAME, REQUIRED_TOOLS};
use reconflow::external::ProcessExecutor;
use reconflow::http_client::create_fetch_client;
use reconflow::output::console;
use reconflow::pipeline::Pipeline;

fn init_logging(debug: bool, verbose: bool) {
    // Keep reqwest/hyper at INFO so --debug stays readable.
    use tracing_subscriber::EnvFilter;
    let crate_level = if debug { "debug" } else if verbose { "info" } else { "warn" };
    let filter_str = format!("reconflow={crate_level},reqwest=info,hyper=info");
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    init_logging(cli.debug, cli.verbose);

    // checked before anything touches the system
    let domain = match cli.target() {
        Ok(d) => d,
        Err(e) => {
            console::error(format!("Error: {e}."));
            console::info(USAGE);
            return Ok(ExitCode::from(1));
        }
    };

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(out) = cli.out {
        config.work_dir = out;
    }
    let store = ArtifactStore::open(&config.work_dir)?;

    console::print_banner();
    tracing::info!(target=%domain, work_dir=%config.work_dir.display(), skip_install = cli.skip_install, "starting recon");

    let mut resolver = DependencyResolver::new(&config, SearchPath::from_env());
    resolver.init();
    if cli.skip_install {
        console::warn("Skipping dependency installation.");
    } else {
        bootstrap(&resolver, &config).await;
    }

    println!("[>] Target: {domain}");
    println!("\n{}\n", "-".repeat(60));

    let pipeline = Pipeline::standard(&domain, store, &config);
    let executor = ProcessExecutor::new(resolver.into_search_path());
    let report = pipeline.run(&executor).await;
    tracing::debug!(failed = report.failed_count(), counts=?report.counts, "run summary");

    console::print_completion();
    Ok(ExitCode::SUCCESS)
}

async fn bootstrap(resolver: &DependencyResolver, config: &Config) {
    console::rule();
    console::info("System Check: Verifying required tools...");
    resolver.ensure_tools(&REQUIRED_TOOLS).await;
    resolver.ensure_renamed(&HTTPX_RENAME).await;
    console::rule();

    let fetcher = ScriptFetcher::new(config.script_url.clone(), config.script_path());
    let client = match create_fetch_client() {
        Ok(c) => c,
        Err(e) => {
            console::error(format!("Error downloading SecretFinder: {e}"));
            return;
        }
    };
    match fetcher.ensure(&client).await {
        Ok(ScriptStatus::Downloaded { .. }) => {
            console::success("SecretFinder downloaded successfully.");
        }
        Ok(ScriptStatus::AlreadyPresent) => {}
        Err(e) => console::error(format!("Error downloading SecretFinder: {e}")),
    }
}
