pub mod dataset;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;

pub use detection::{build_standard_pipeline, ShapeClassifier};
pub use error::ClassifyError;
pub use models::{
    AccuracyReport, Centroid, ClassifiedShape, DistanceProfile, Mismatch, ShapeCoefficients,
    ShapeLabel,
};
pub use pipeline::{
    DebugConfig, MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineStep,
};
