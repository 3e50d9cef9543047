use log::warn;
use std::path::Path;

use crate::class_map::ClassMapping;
use crate::types::{AnnotationRecord, BoundingBox, ImageDimensions, YoloRecord};

/// Label text produced for one annotation file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelData {
    pub text: String,
    pub boxes_written: usize,
    pub skipped_unknown_class: usize,
}

/// Normalize a pixel bounding box against the image size
pub fn normalize_bounding_box(
    bbox: &BoundingBox,
    class_id: usize,
    dims: ImageDimensions,
) -> YoloRecord {
    let image_width = dims.width as f64;
    let image_height = dims.height as f64;

    YoloRecord {
        class_id,
        center_x: (bbox.xmin + bbox.xmax) / (2.0 * image_width),
        center_y: (bbox.ymin + bbox.ymax) / (2.0 * image_height),
        width: (bbox.xmax - bbox.xmin) / image_width,
        height: (bbox.ymax - bbox.ymin) / image_height,
    }
}

/// Convert an annotation to YOLO label text, one line per recognized box in document order.
///
/// Boxes whose class name is not in `class_map` are skipped with a warning that
/// names `source`.
pub fn convert_to_yolo_format(
    annotation: &AnnotationRecord,
    dims: ImageDimensions,
    class_map: &ClassMapping,
    source: &Path,
) -> LabelData {
    let mut label = LabelData {
        text: String::with_capacity(annotation.boxes.len() * 48),
        ..LabelData::default()
    };

    for bbox in &annotation.boxes {
        let class_id = match class_map.get(&bbox.class_name) {
            Some(class_id) => class_id,
            None => {
                warn!(
                    "Class '{}' not found in class mapping ({}). Skipping object...",
                    bbox.class_name,
                    source.display()
                );
                label.skipped_unknown_class += 1;
                continue;
            }
        };

        let record = normalize_bounding_box(bbox, class_id, dims);
        label.text.push_str(&record.to_string());
        label.text.push('\n');
        label.boxes_written += 1;
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(class_name: &str, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> BoundingBox {
        BoundingBox {
            class_name: class_name.to_string(),
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    fn dims(width: u32, height: u32) -> ImageDimensions {
        ImageDimensions::new(width, height).unwrap()
    }

    #[test]
    fn test_normalize_full_image_box() {
        let record =
            normalize_bounding_box(&bbox("pug", 0.0, 0.0, 640.0, 480.0), 1, dims(640, 480));
        assert_eq!(record.to_string(), "1 0.500000 0.500000 1.000000 1.000000");
    }

    #[test]
    fn test_normalize_bounding_box() {
        let record =
            normalize_bounding_box(&bbox("pug", 10.0, 10.0, 20.0, 20.0), 0, dims(100, 100));

        assert_eq!(record.center_x, 0.15);
        assert_eq!(record.center_y, 0.15);
        assert_eq!(record.width, 0.1);
        assert_eq!(record.height, 0.1);
    }

    #[test]
    fn test_normalize_inside_box_stays_in_unit_range() {
        let image = dims(333, 177);
        for &(xmin, ymin, xmax, ymax) in &[
            (1.0, 1.0, 2.0, 2.0),
            (0.5, 100.0, 332.5, 176.0),
            (150.0, 20.0, 151.0, 21.0),
        ] {
            let r = normalize_bounding_box(&bbox("pug", xmin, ymin, xmax, ymax), 0, image);
            for value in [r.center_x, r.center_y, r.width, r.height] {
                assert!(value > 0.0 && value < 1.0, "{:?} out of range", r);
            }
        }
    }

    #[test]
    fn test_convert_to_yolo_format_skips_unknown_classes() {
        let class_map = ClassMapping::from_label_list(&["pug", "boxer"]).unwrap();
        let annotation = AnnotationRecord {
            boxes: vec![
                bbox("boxer", 0.0, 0.0, 100.0, 50.0),
                bbox("cat", 1.0, 1.0, 2.0, 2.0),
                bbox("pug", 10.0, 10.0, 110.0, 110.0),
            ],
            ..AnnotationRecord::default()
        };

        let label =
            convert_to_yolo_format(&annotation, dims(200, 200), &class_map, Path::new("a.xml"));

        assert_eq!(
            label.text,
            "1 0.250000 0.125000 0.500000 0.250000\n0 0.300000 0.300000 0.500000 0.500000\n"
        );
        assert_eq!(label.boxes_written, 2);
        assert_eq!(label.skipped_unknown_class, 1);
    }

    #[test]
    fn test_convert_empty_annotation() {
        let class_map = ClassMapping::from_label_list(&["pug"]).unwrap();
        let label = convert_to_yolo_format(
            &AnnotationRecord::default(),
            dims(10, 10),
            &class_map,
            Path::new("empty.xml"),
        );
        assert_eq!(label, LabelData::default());
    }
}
