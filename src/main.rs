use clap::Parser;
use studyplan_lib::cli::{Cli, RunContext};
use studyplan_lib::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let context = RunContext::new(cli.config.as_deref(), cli.store.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize: {}", e))?;

    let mut logging = context.config().logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if cli.json_logs {
        logging.json = true;
    }
    init_logging(&logging)?;
    context.config_origin().log();

    match context.execute(&cli.command).await {
        Ok(output) => {
            println!("{}", output.body);
            if !output.success {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            Err(anyhow::anyhow!(e))
        }
    }
}
