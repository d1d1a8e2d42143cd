use gstreamer as gst;
use gstreamer::glib;
use thiserror::Error;

/// Failures while assembling or starting the receive pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Construction ──────────────────────────────────────────────────
    #[error("Not all elements could be created: '{name}' needs factory '{factory}'")]
    ElementCreation { factory: String, name: String },
    /// `(element name, factory)` for every stage that could not be created.
    #[error("Not all elements could be created: {}", describe_missing(.0))]
    MissingElements(Vec<(String, String)>),
    #[error("element '{element}' has no property '{property}'")]
    UnknownProperty { element: String, property: String },
    #[error("element '{element}' rejected value '{value}' for property '{property}'")]
    InvalidPropertyValue {
        element: String,
        property: String,
        value: String,
    },
    #[error("elements could not be added to the pipeline")]
    Add(#[source] glib::BoolError),
    #[error("Elements could not be linked.")]
    Link(#[source] glib::BoolError),

    // ── Running ───────────────────────────────────────────────────────
    #[error("Unable to set the pipeline to the {target:?} state.")]
    StateChange {
        target: gst::State,
        #[source]
        source: gst::StateChangeError,
    },
    #[error("pipeline has no bus")]
    NoBus,
    #[error("pipeline bus is flushing")]
    BusFlushing,
}

fn describe_missing(missing: &[(String, String)]) -> String {
    missing
        .iter()
        .map(|(name, factory)| format!("'{}' needs factory '{}'", name, factory))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_elements_message() {
        let err = PipelineError::MissingElements(vec![
            ("src".to_string(), "udpsrc".to_string()),
            ("decode".to_string(), "avdec_h264".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "Not all elements could be created: 'src' needs factory 'udpsrc', \
             'decode' needs factory 'avdec_h264'"
        );
    }

    #[test]
    fn test_single_element_message_matches() {
        let err = PipelineError::ElementCreation {
            factory: "udpsrc".to_string(),
            name: "src".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Not all elements could be created: 'src' needs factory 'udpsrc'"
        );
    }
}
