//! Core type definitions for measurement mapping
//!
//! This module provides the records that flow through the mapper:
//! - [`RawAnnotationEvent`]: Annotation event emitted by the measurement tool
//! - [`DisplaySet`] and [`ImageIdentity`]: Image catalog context
//! - [`MappedAnnotation`], [`DisplayText`], [`Measurement`]: Mapper output
//! - [`Report`]: Column/value table built on demand from a measurement
//! - [`ValueType`]: Measurement value type tag
//! - [`MappingConfig`]: Configuration of the mapper

mod config;
mod display_set;
mod event;
mod measurement;
mod report;
mod value_type;

pub use config::{DisplayUnits, MappingConfig, MAX_PRECISION};
pub use display_set::{DisplaySet, ImageIdentity, InstanceInfo};
pub use event::{
    Annotation, AnnotationData, AnnotationMetadata, CachedStats, Handles, Point,
    RawAnnotationEvent, TargetStat, TextBox,
};
pub use measurement::{DisplayText, MappedAnnotation, Measurement, ANGLE_UNIT};
pub use report::{Report, ReportGenerator, ReportValue};
pub use value_type::{ToolTypeClassifier, ValueType, ValueTypeClassifier, SUPPORTED_TOOLS};
