use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::pipeline::{DEFAULT_PORT, Outcome, PipelineConfig, ReceiverPipeline};

#[derive(Parser, Debug)]
pub struct PlayCommand {
    /// UDP port to receive RTP packets on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Default for PlayCommand {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl PlayCommand {
    pub fn run(self) -> Result<()> {
        play(&PipelineConfig::udp(self.port))
    }
}

/**
    Build and start `config`, then drain the bus.

    Succeeds only on end-of-stream; a bus error fails the command.
*/
fn play(config: &PipelineConfig) -> Result<()> {
    let pipeline = ReceiverPipeline::build(config).context("Failed to build the pipeline")?;
    pipeline.start().context("Failed to start the pipeline")?;

    println!("Playing: {}", config.describe());

    match pipeline.run()? {
        Outcome::EndOfStream => Ok(()),
        Outcome::Error { source, message } => {
            bail!("Pipeline stopped by element '{}': {}", source, message)
        }
    }
}
