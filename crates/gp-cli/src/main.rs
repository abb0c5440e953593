use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gp_compactor::worker::{self, Job, JobOutcome, JobOutput};
use gp_compactor::GlampressPipeline;
use gp_core::{fsio, GlampressConfig};
use gp_parser::{ChatExportParser, TranscriptParser};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "glampress={level},gp_core={level},gp_parser={level},gp_compactor={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>, threshold: Option<f64>) -> Result<GlampressConfig> {
    let mut config = match path {
        Some(p) => GlampressConfig::from_toml_file(p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => GlampressConfig::default(),
    };
    if let Some(t) = threshold {
        config = config.with_plain_threshold(t);
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Encode { input, out_dir, threshold } => {
            let pipeline = GlampressPipeline::new(load_config(config_path, threshold)?)?;
            if !ChatExportParser::new().can_parse(&input) {
                tracing::warn!(path = %input.display(), "input does not look like a .txt transcript");
            }
            let output = submit(pipeline, Job::Encode { input, out_dir }).await?;
            if let JobOutput::Encoded(file) = output {
                println!("GLaMpress {} compression complete:", file.report.mode);
                println!("{}", file.path.display());
                println!();
                println!("{}", file.report);
            }
            Ok(())
        }
        Commands::Decode { artifact } => {
            let pipeline = GlampressPipeline::new(load_config(config_path, None)?)?;
            let output = submit(pipeline, Job::Decode { artifact }).await?;
            if let JobOutput::Decoded(file) = output {
                println!("Decompressed file saved at:");
                println!("{}", file.path.display());
                if file.unknown_symbols > 0 {
                    println!("{} line(s) referenced unknown symbols", file.unknown_symbols);
                }
            }
            Ok(())
        }
        Commands::Inspect { input, threshold } => {
            let pipeline = GlampressPipeline::new(load_config(config_path, threshold)?)?;
            let text = fsio::read_text_lossy(&input)?;
            let a = pipeline.analyze(&text);
            println!("lines:          {}", a.parse.lines);
            println!("junk filtered:  {}", a.parse.junk);
            println!("continuations:  {}", a.parse.continuations);
            println!("dropped:        {}", a.parse.dropped);
            println!("date groups:    {}", a.groups);
            println!("messages (M):   {}", a.message_count);
            println!("motifs (D):     {}", a.motif_count);
            println!("D/M:            {:.3}", a.motif_ratio());
            println!("mode:           {}", a.mode);
            Ok(())
        }
    }
}

/// Hand a job to the background worker and wait for its single outcome.
async fn submit(pipeline: GlampressPipeline, job: Job) -> Result<JobOutput> {
    let outcome = worker::submit(Arc::new(pipeline), job)
        .await
        .context("worker exited without reporting")?;
    match outcome {
        JobOutcome::Completed(output) => Ok(output),
        JobOutcome::Failed { reason } => bail!(reason),
    }
}
