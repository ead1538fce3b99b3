//! Main entry point for the dmax-links CLI

use anyhow::Context;
use clap::Parser;
use dmax_links::cli::{Args, OutputFormatter, ProgressLogWriter, VerbosityLevel};
use dmax_links::core::LinkCollector;
use dmax_links::export::XlsxSink;
use dmax_links::platform::ApiClient;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let mut formatter = OutputFormatter::new(args.verbosity_level());
    init_logging(args.verbosity_level(), formatter.log_writer());

    debug!("Starting dmax-links with args: {:?}", args);

    match run(&args, &mut formatter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            formatter.finish_progress();
            formatter.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, formatter: &mut OutputFormatter) -> anyhow::Result<()> {
    let config = args.to_config();
    let request = args.to_request(&config)?;
    formatter.print_run_start(&request);

    let client = ApiClient::new(&config).context("could not build HTTP client")?;
    let collector = LinkCollector::new(&client, &config);

    let report = collector
        .run(&request, |index, total, link| {
            formatter.update_link(index, total, link)
        })
        .await
        .with_context(|| format!("could not get links for show {}", request.show_id))?;
    formatter.finish_progress();

    let sink = XlsxSink::new(&config.output_dir);
    let path = report
        .export(&sink)
        .context("could not write spreadsheet")?;
    info!("Run finished: {} rows", report.links.len());

    formatter.print_summary(&report, &path);
    Ok(())
}

/// Initialize logging system
fn init_logging(verbosity: VerbosityLevel, writer: ProgressLogWriter) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(writer)
                .compact(),
        )
        .init();
}
