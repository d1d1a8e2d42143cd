/*!
    Bus message handling.

    Only errors, end-of-stream and state changes are popped from the bus.
    Errors and end-of-stream end the loop; pipeline state changes are
    reported and everything else is skipped.
*/

use gstreamer as gst;
use gstreamer::MessageView;
use gstreamer::prelude::*;

use crate::log::CAT;

use super::{PipelineError, ReceiverPipeline};

/**
    A bus message reduced to what the run loop acts on.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusEvent {
    Error {
        /// Name of the element that posted the error.
        source: String,
        message: String,
        debug: Option<String>,
    },
    EndOfStream,
    /// A state change of the pipeline itself. Child element changes are `Ignored`.
    StateChanged {
        old: gst::State,
        current: gst::State,
        pending: gst::State,
    },
    Ignored,
}

/**
    How the run loop finished.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    EndOfStream,
    Error { source: String, message: String },
}

pub fn classify(msg: &gst::MessageRef, pipeline: &gst::Pipeline) -> BusEvent {
    match msg.view() {
        MessageView::Error(err) => BusEvent::Error {
            source: msg
                .src()
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            message: err.error().message().to_string(),
            debug: err.debug().map(|d| d.to_string()),
        },
        MessageView::Eos(_) => BusEvent::EndOfStream,
        MessageView::StateChanged(change) => {
            if msg.src() == Some(pipeline.upcast_ref::<gst::Object>()) {
                BusEvent::StateChanged {
                    old: change.old(),
                    current: change.current(),
                    pending: change.pending(),
                }
            } else {
                BusEvent::Ignored
            }
        }
        _ => BusEvent::Ignored,
    }
}

/// Upper-case state name as GStreamer prints it (`PLAYING`, `PAUSED`, ...).
pub fn state_name(state: gst::State) -> &'static str {
    match state {
        gst::State::VoidPending => "VOID_PENDING",
        gst::State::Null => "NULL",
        gst::State::Ready => "READY",
        gst::State::Paused => "PAUSED",
        gst::State::Playing => "PLAYING",
        _ => "UNKNOWN",
    }
}

impl ReceiverPipeline {
    /**
        Block on the bus until an error or end-of-stream arrives.

        There is no timeout: a pipeline that never errors and never ends
        keeps this call waiting.
    */
    pub fn run(&self) -> Result<Outcome, PipelineError> {
        let bus = self.pipeline.bus().ok_or(PipelineError::NoBus)?;

        loop {
            let Some(msg) = bus.timed_pop_filtered(
                gst::ClockTime::NONE,
                &[
                    gst::MessageType::Error,
                    gst::MessageType::Eos,
                    gst::MessageType::StateChanged,
                ],
            ) else {
                // Only a flushing bus returns nothing without a timeout
                return Err(PipelineError::BusFlushing);
            };

            match classify(&msg, &self.pipeline) {
                BusEvent::Error {
                    source,
                    message,
                    debug,
                } => {
                    eprintln!("Error received from element {}: {}", source, message);
                    eprintln!(
                        "Debugging information: {}",
                        debug.as_deref().unwrap_or("none")
                    );
                    return Ok(Outcome::Error { source, message });
                }
                BusEvent::EndOfStream => {
                    println!("End-Of-Stream reached.");
                    return Ok(Outcome::EndOfStream);
                }
                BusEvent::StateChanged {
                    old,
                    current,
                    pending,
                } => {
                    println!(
                        "Pipeline state changed from {} to {}:",
                        state_name(old),
                        state_name(current)
                    );
                    gst::debug!(CAT, "Pending state: {}", state_name(pending));
                }
                BusEvent::Ignored => {
                    gst::trace!(CAT, "Skipping {:?} from {:?}", msg.type_(), msg.src());
                }
            }
        }
    }
}
