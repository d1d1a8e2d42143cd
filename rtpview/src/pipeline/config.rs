/*!
    The fixed receiver chain.
*/

use std::fmt;

/// UDP port used when none is given.
pub const DEFAULT_PORT: u16 = 8080;

const PIPELINE_NAME: &str = "test-pipeline";

/**
    Position of an element in the receive chain.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Source,
    Depayloader,
    Decoder,
    Sink,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Source => "source",
            Role::Depayloader => "depayloader",
            Role::Decoder => "decoder",
            Role::Sink => "sink",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/**
    One element of the chain: which factory makes it, what it is called,
    and the properties set on it before linking.
*/
#[derive(Clone, Debug)]
pub struct Stage {
    pub role: Role,
    /// GStreamer element factory name (e.g. `udpsrc`).
    pub factory: String,
    /// Element instance name, reported in bus errors.
    pub name: String,
    /// Property assignments as `(name, value)`, values in GStreamer string syntax.
    pub properties: Vec<(String, String)>,
}

impl Stage {
    pub fn new(role: Role, factory: &str, name: &str) -> Self {
        Self {
            role,
            factory: factory.to_string(),
            name: name.to_string(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: impl ToString) -> Self {
        self.properties.push((name.to_string(), value.to_string()));
        self
    }
}

/**
    A named, ordered chain of stages linked source to sink.
*/
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub name: String,
    pub stages: Vec<Stage>,
}

impl PipelineConfig {
    /**
        The RTP/H.264 receive chain listening on `port`:
        `udpsrc ! rtph264depay ! avdec_h264 ! autovideosink`.
    */
    pub fn udp(port: u16) -> Self {
        Self {
            name: PIPELINE_NAME.to_string(),
            stages: vec![
                Stage::new(Role::Source, "udpsrc", "source").with_property("port", port),
                Stage::new(Role::Depayloader, "rtph264depay", "depay"),
                Stage::new(Role::Decoder, "avdec_h264", "decode"),
                Stage::new(Role::Sink, "autovideosink", "sink"),
            ],
        }
    }

    /// Launch-line style summary of the chain.
    pub fn describe(&self) -> String {
        self.stages
            .iter()
            .map(|stage| {
                let mut part = stage.factory.clone();
                for (name, value) in &stage.properties {
                    part.push_str(&format!(" {}={}", name, value));
                }
                part
            })
            .collect::<Vec<_>>()
            .join(" ! ")
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::udp(DEFAULT_PORT)
    }
}

#[cfg(test)]
impl PipelineConfig {
    /// Chain of core elements only: `fakesrc num-buffers=<n> ! identity ! fakesink`.
    pub fn fake(num_buffers: i32) -> Self {
        Self {
            name: "fake-pipeline".to_string(),
            stages: vec![
                Stage::new(Role::Source, "fakesrc", "src").with_property("num-buffers", num_buffers),
                Stage::new(Role::Decoder, "identity", "pass"),
                Stage::new(Role::Sink, "fakesink", "sink"),
            ],
        }
    }

    /// Unbounded core chain whose `identity` posts an error after two buffers.
    pub fn failing() -> Self {
        let mut config = Self::fake(-1);
        config.stages[1] = config.stages[1].clone().with_property("error-after", 2);
        config
    }
}
