/*!
    RTP H.264 Receiver

    Receives an RTP/H.264 stream over UDP and renders it in a video window.

    Pipeline:
      udpsrc port=<port> ! rtph264depay ! avdec_h264 ! autovideosink

    Prerequisites:
    - GStreamer with the good, libav and base plugin sets
      (`brew install gstreamer` or `apt install gstreamer1.0-plugins-good gstreamer1.0-libav`)

    Usage:
      cargo run --release
      cargo run --release -- play --port 5000
      cargo run --release -- check

    Sending a test stream:
      gst-launch-1.0 videotestsrc ! x264enc tune=zerolatency ! rtph264pay ! \
          udpsink host=127.0.0.1 port=8080

    Diagnostics:
      GST_DEBUG=rtpview:5 cargo run
*/

use anyhow::Result;
use clap::Parser;

mod cli;
mod log;
mod pipeline;

fn main() -> Result<()> {
    cli::Args::parse().run()
}
