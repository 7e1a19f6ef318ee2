use {
    crate::{
        arguments::Arguments,
        chain::{Deployment, Ethereum},
        config::Config,
        error::DeploymentError,
        observe,
        orchestrator::Orchestrator,
    },
    clap::Parser,
    contracts::Artifacts,
    std::{process::ExitCode, sync::Arc},
};

/// Parses the arguments, sets up logging and runs a single deployment. The
/// exit status is zero only if the contract was deployed and reported.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    // Loaded before parsing so `.env` entries can feed the `env` fallbacks.
    let dotenv = dotenvy::dotenv();
    let args = match Arguments::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            // Usage goes to stdout, everything else to stderr.
            let _ = err.print();
            return ExitCode::from(argument_error_status(&err));
        }
    };
    ::observe::tracing::initialize(&::observe::Config::new(
        &args.log_filter,
        args.use_json_logs,
    ));
    match dotenv {
        Ok(path) => tracing::debug!(?path, "loaded environment file"),
        Err(err) if err.not_found() => (),
        Err(err) => tracing::warn!(?err, "failed to load environment file"),
    }
    tracing::info!("running deployer with validated arguments:\n{}", args);

    ExitCode::from(exit_status(&run(args).await))
}

/// `--help` and `--version` succeed; malformed arguments fail like any other
/// error.
fn argument_error_status(err: &clap::Error) -> u8 {
    if err.exit_code() == 0 { 0 } else { 1 }
}

/// Maps the outcome of a run to the process exit status, logging failures.
fn exit_status(result: &Result<Deployment, DeploymentError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            observe::failed(err);
            1
        }
    }
}

/// Resolves the configuration and deploys, printing the report to stdout.
pub async fn run(args: Arguments) -> Result<Deployment, DeploymentError> {
    let config = Config::load(args).await?;
    tracing::debug!(?config, "resolved configuration");

    let artifacts = Artifacts::new(config.artifacts);
    tracing::debug!(root = ?artifacts.root(), "resolving artifacts");
    let chain = Ethereum::new(config.node_url, &config.submission)?;
    let orchestrator = Orchestrator {
        signers: Arc::new(config.credentials),
        artifacts: Arc::new(artifacts),
        chain: Arc::new(chain),
        parameters: config.parameters,
        expected_chain_id: config.expected_chain_id,
    };
    orchestrator.run(&mut std::io::stdout()).await
}
