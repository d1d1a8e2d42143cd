use std::sync::LazyLock;

use gstreamer as gst;

/// Debug category for this application, enabled with `GST_DEBUG=rtpview:<level>`.
pub static CAT: LazyLock<gst::DebugCategory> = LazyLock::new(|| {
    gst::DebugCategory::new(
        "rtpview",
        gst::DebugColorFlags::empty(),
        Some("RTP H.264 receiver"),
    )
});
