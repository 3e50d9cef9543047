use std::fmt;

// Default extension of the image paired with each annotation
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

// Extension of the Pascal VOC annotation files picked up from the input directory
pub const ANNOTATION_EXTENSION: &str = "xml";

// Extension of the generated YOLO label files
pub const LABEL_EXTENSION: &str = "txt";

// An axis-aligned box in absolute pixel coordinates, as stored in a VOC <object>
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub class_name: String,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

// Declared <size> of a VOC document. Informational only, never used for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredSize {
    pub width: u32,
    pub height: u32,
}

// One parsed Pascal VOC document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationRecord {
    pub filename: Option<String>,
    pub size: Option<DeclaredSize>,
    pub boxes: Vec<BoundingBox>,
}

/// Pixel size of a decoded image. Both sides are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Returns `None` when either side is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }
}

/// A single YOLO label line: class id followed by the normalized box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoloRecord {
    pub class_id: usize,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for YoloRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.center_x, self.center_y, self.width, self.height
        )
    }
}

// Struct to hold conversion statistics for a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub annotations_found: usize,
    pub files_converted: usize,
    pub skipped_missing_image: usize,
    pub boxes_written: usize,
    pub skipped_unknown_class: usize,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Annotation files found: {}", self.annotations_found);
        log::info!("Label files written: {}", self.files_converted);
        log::info!("Boxes written: {}", self.boxes_written);

        if self.skipped_missing_image > 0 {
            log::warn!(
                "Skipped {} annotation file(s) with a missing or unreadable image",
                self.skipped_missing_image
            );
        }
        if self.skipped_unknown_class > 0 {
            log::warn!(
                "Skipped {} object(s) with a class name outside the class mapping",
                self.skipped_unknown_class
            );
        }
    }
}
