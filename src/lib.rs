//! Pascal VOC to YOLO format converter
//!
//! This library converts Pascal VOC XML annotations into YOLO label files,
//! reading each paired image to normalize the bounding boxes.

pub mod class_map;
pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;
pub mod voc;

// Re-export commonly used types and functions
pub use class_map::ClassMapping;
pub use config::{Args, ConvertConfig};
pub use dataset::{convert, convert_annotation_file, FileOutcome};
pub use error::{ConvertError, ConvertResult};
pub use io::resolve_image_dimensions;
pub use types::{AnnotationRecord, BoundingBox, ConversionStats, ImageDimensions, YoloRecord};
