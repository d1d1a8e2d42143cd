use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gstreamer as gst;

mod check;
mod play;

pub use check::CheckCommand;
pub use play::PlayCommand;

#[derive(Parser, Debug)]
#[command(name = "rtpview")]
#[command(about = "Receive an RTP/H.264 stream over UDP and display it")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Receive and display the stream (default)
    Play(PlayCommand),
    /// Check that every required GStreamer element is installed
    Check(CheckCommand),
}

impl Args {
    pub fn run(self) -> Result<()> {
        let command = self
            .command
            .unwrap_or(Command::Play(PlayCommand::default()));

        // Reads GST_DEBUG, GST_PLUGIN_PATH and friends from the environment
        gst::init().context("Failed to initialize GStreamer")?;

        match command {
            Command::Play(cmd) => cmd.run(),
            Command::Check(cmd) => cmd.run(),
        }
    }
}
