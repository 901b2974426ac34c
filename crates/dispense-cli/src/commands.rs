use anyhow::Result;
use dispense_model::PipelineOptions;
use tracing::info;

use dispense_cli::pipeline::run_pipeline;
use dispense_cli::types::{RunConfig, RunResult};

use crate::cli::Cli;

pub fn run_build(cli: &Cli) -> Result<RunResult> {
    let config = RunConfig {
        repo_dir: cli.repo_dir.clone(),
        input_dir: cli.input_dir.clone(),
        parquet_glob: cli.parquet_glob.clone(),
        out_dir: cli.out_dir.clone(),
    };
    let options = PipelineOptions::new().with_frequency(cli.freq.into());

    info!(
        repo_dir = %config.repo_dir.display(),
        input_dir = %config.input_dir.display(),
        pattern = %config.parquet_glob,
        out_dir = %config.out_dir.display(),
        "starting build"
    );
    run_pipeline(&config, &options)
}
