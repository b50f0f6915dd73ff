use anyhow::Context;
use bmi_etl::cli::{Args, setup_logging};
use bmi_etl::processor::{EtlPipeline, report_summary};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.to_config();
    let pipeline = EtlPipeline::new(config).context("Invalid configuration")?;

    let stats = pipeline.run().context("ETL job failed")?;

    if !args.quiet {
        report_summary(&stats);
    }
    Ok(())
}
