use anyhow::{Result, bail};
use clap::Parser;

use crate::pipeline::{DEFAULT_PORT, PipelineConfig, factory_available};

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// UDP port the pipeline would listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl CheckCommand {
    pub fn run(self) -> Result<()> {
        check(&PipelineConfig::udp(self.port))
    }
}

fn check(config: &PipelineConfig) -> Result<()> {
    println!("Pipeline: {}", config.describe());
    println!();

    let mut missing = 0;
    for stage in &config.stages {
        if factory_available(&stage.factory) {
            println!("  OK       {:<12} {}", stage.role, stage.factory);
        } else {
            missing += 1;
            println!("  MISSING  {:<12} {}", stage.role, stage.factory);
        }
    }

    println!();
    if missing > 0 {
        bail!(
            "{} of {} element(s) are not installed",
            missing,
            config.stages.len()
        );
    }

    println!("All elements available.");
    Ok(())
}
