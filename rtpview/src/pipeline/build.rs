use gstreamer as gst;
use gstreamer::glib;
use gstreamer::prelude::*;

use crate::log::CAT;

use super::PipelineError;
use super::config::{PipelineConfig, Stage};

/**
    A constructed receive pipeline.

    Elements are created, configured, added and linked by [`ReceiverPipeline::build`].
    The pipeline is returned to `Null` when this value is dropped.
*/
pub struct ReceiverPipeline {
    pub(super) pipeline: gst::Pipeline,
}

impl ReceiverPipeline {
    /**
        Create every element named by `config`, apply its properties and link
        the chain in order.

        When several factories are missing they are all reported at once.
    */
    pub fn build(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let mut elements = Vec::with_capacity(config.stages.len());
        let mut missing: Vec<&Stage> = Vec::new();

        for stage in &config.stages {
            match gst::ElementFactory::make(&stage.factory)
                .name(stage.name.as_str())
                .build()
            {
                Ok(element) => elements.push(element),
                Err(e) => {
                    gst::warning!(
                        CAT,
                        "Could not create '{}' from factory '{}': {}",
                        stage.name,
                        stage.factory,
                        e
                    );
                    missing.push(stage);
                }
            }
        }

        match missing.as_slice() {
            [] => {}
            [stage] => {
                return Err(PipelineError::ElementCreation {
                    factory: stage.factory.clone(),
                    name: stage.name.clone(),
                });
            }
            stages => {
                return Err(PipelineError::MissingElements(
                    stages
                        .iter()
                        .map(|s| (s.name.clone(), s.factory.clone()))
                        .collect(),
                ));
            }
        }

        let pipeline = gst::Pipeline::with_name(&config.name);

        for (stage, element) in config.stages.iter().zip(&elements) {
            for (property, value) in &stage.properties {
                set_property(element, &stage.name, property, value)?;
            }
        }

        pipeline.add_many(&elements).map_err(PipelineError::Add)?;
        gst::Element::link_many(&elements).map_err(PipelineError::Link)?;

        gst::debug!(CAT, "Built pipeline '{}': {}", config.name, config.describe());

        Ok(Self { pipeline })
    }

    /// Transition the pipeline to `Playing`.
    pub fn start(&self) -> Result<(), PipelineError> {
        let result = self
            .pipeline
            .set_state(gst::State::Playing)
            .map_err(|source| PipelineError::StateChange {
                target: gst::State::Playing,
                source,
            })?;
        gst::info!(CAT, "Set pipeline to playing: {:?}", result);
        Ok(())
    }

    /// Transition the pipeline to `Null`, releasing its resources.
    pub fn stop(&self) {
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            gst::warning!(CAT, "Failed to stop pipeline: {}", e);
        }
    }
}

impl Drop for ReceiverPipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

/**
    Parse `value` with the property's own type and assign it.
*/
fn set_property(
    element: &gst::Element,
    element_name: &str,
    property: &str,
    value: &str,
) -> Result<(), PipelineError> {
    let pspec = element
        .find_property(property)
        .ok_or_else(|| PipelineError::UnknownProperty {
            element: element_name.to_string(),
            property: property.to_string(),
        })?;

    let parsed = glib::Value::deserialize(value, pspec.value_type()).map_err(|_| {
        PipelineError::InvalidPropertyValue {
            element: element_name.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        }
    })?;

    element.set_property_from_value(property, &parsed);
    gst::debug!(CAT, "Set {}.{} = {}", element_name, property, value);
    Ok(())
}

/// Whether an element factory is present in the GStreamer registry.
pub fn factory_available(factory: &str) -> bool {
    gst::ElementFactory::find(factory).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::config::Role;

    fn init() {
        gst::init().unwrap();
    }

    #[test]
    fn test_build_core_chain() {
        init();
        let receiver = ReceiverPipeline::build(&PipelineConfig::fake(3)).unwrap();

        assert_eq!(receiver.pipeline.name().as_str(), "fake-pipeline");
        assert_eq!(receiver.pipeline.children().len(), 3);

        let src = receiver.pipeline.by_name("src").unwrap();
        assert_eq!(src.property::<i32>("num-buffers"), 3);

        // Linked in order
        let identity = receiver.pipeline.by_name("pass").unwrap();
        let peer = src.static_pad("src").unwrap().peer().unwrap();
        assert_eq!(peer.parent_element().unwrap(), identity);
    }

    #[test]
    fn test_missing_factory() {
        init();
        let mut config = PipelineConfig::fake(1);
        config.stages[1] = Stage::new(Role::Decoder, "no-such-element-xyz", "decode");

        match ReceiverPipeline::build(&config) {
            Err(PipelineError::ElementCreation { factory, name }) => {
                assert_eq!(factory, "no-such-element-xyz");
                assert_eq!(name, "decode");
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("build should fail"),
        }
    }

    #[test]
    fn test_reports_all_missing_factories() {
        init();
        let mut config = PipelineConfig::fake(1);
        config.stages[0] = Stage::new(Role::Source, "no-such-source-xyz", "src");
        config.stages[2] = Stage::new(Role::Sink, "no-such-sink-xyz", "sink");

        match ReceiverPipeline::build(&config) {
            Err(PipelineError::MissingElements(missing)) => {
                assert_eq!(
                    missing,
                    vec![
                        ("src".to_string(), "no-such-source-xyz".to_string()),
                        ("sink".to_string(), "no-such-sink-xyz".to_string()),
                    ]
                );
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("build should fail"),
        }
    }

    #[test]
    fn test_unknown_property() {
        init();
        let mut config = PipelineConfig::fake(1);
        config.stages[0] = config.stages[0].clone().with_property("port", 8080);

        match ReceiverPipeline::build(&config) {
            Err(PipelineError::UnknownProperty { element, property }) => {
                assert_eq!(element, "src");
                assert_eq!(property, "port");
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("build should fail"),
        }
    }

    #[test]
    fn test_invalid_property_value() {
        init();
        let mut config = PipelineConfig::fake(1);
        config.stages[0].properties[0].1 = "lots".to_string();

        assert!(matches!(
            ReceiverPipeline::build(&config),
            Err(PipelineError::InvalidPropertyValue { .. })
        ));
    }

    #[test]
    fn test_link_failure() {
        init();
        // A sink has no source pad, so it cannot feed anything downstream
        let config = PipelineConfig {
            name: "backwards".to_string(),
            stages: vec![
                Stage::new(Role::Sink, "fakesink", "sink"),
                Stage::new(Role::Source, "fakesrc", "src"),
            ],
        };

        assert!(matches!(
            ReceiverPipeline::build(&config),
            Err(PipelineError::Link(_))
        ));
    }

    #[test]
    fn test_factory_available() {
        init();
        assert!(factory_available("fakesrc"));
        assert!(!factory_available("no-such-element-xyz"));
    }

    #[test]
    fn test_drop_returns_to_null() {
        init();
        let receiver = ReceiverPipeline::build(&PipelineConfig::fake(1)).unwrap();
        let pipeline = receiver.pipeline.clone();
        pipeline.set_state(gst::State::Ready).unwrap();
        drop(receiver);

        let (_, current, _) = pipeline.state(gst::ClockTime::ZERO);
        assert_eq!(current, gst::State::Null);
    }
}
