use clap::Parser;
use std::path::PathBuf;

use crate::class_map::ClassMapping;
use crate::error::{ConvertError, ConvertResult};
use crate::types::DEFAULT_IMAGE_EXTENSION;

/// Command-line arguments parser for converting Pascal VOC XML to YOLO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing Pascal VOC XML files
    #[arg(short = 'i', long = "input_dir")]
    pub input_dir: PathBuf,

    /// Directory where the YOLO label files are written
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: PathBuf,

    /// Directory containing the images paired with the annotations
    #[arg(short = 'm', long = "image_dir")]
    pub image_dir: PathBuf,

    /// Extension of the paired images
    #[arg(long = "image_ext", default_value = DEFAULT_IMAGE_EXTENSION, value_parser = validate_extension)]
    pub image_ext: String,

    /// JSON file mapping class names to ids, e.g. {"pug": 0, "boxer": 1}
    #[arg(long = "class_map", conflicts_with = "label_list")]
    pub class_map: Option<PathBuf>,

    /// Also write dataset.yaml with the class names into the output directory
    #[arg(long = "dataset_yaml")]
    pub dataset_yaml: bool,

    /// Ordered list of class names; a label's position is its class id
    #[arg(use_value_delimiter = true)]
    pub label_list: Vec<String>,
}

/// Paths and options for one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub image_dir: PathBuf,
    pub image_ext: String,
    pub write_dataset_yaml: bool,
}

impl ConvertConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            image_dir: image_dir.into(),
            image_ext: DEFAULT_IMAGE_EXTENSION.to_string(),
            write_dataset_yaml: false,
        }
    }
}

impl Args {
    pub fn to_convert_config(&self) -> ConvertConfig {
        ConvertConfig {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            image_dir: self.image_dir.clone(),
            image_ext: self.image_ext.clone(),
            write_dataset_yaml: self.dataset_yaml,
        }
    }

    /// Build the class mapping from `--class_map` or the positional label list.
    pub fn to_class_mapping(&self) -> ConvertResult<ClassMapping> {
        match &self.class_map {
            Some(path) => ClassMapping::from_json_file(path),
            None if self.label_list.is_empty() => Err(ConvertError::ClassMap(
                "pass a label list or --class_map <FILE>".to_string(),
            )),
            None => ClassMapping::from_label_list(self.label_list.as_slice()),
        }
    }
}

// Validate an extension given without the leading dot, e.g. "jpg"
fn validate_extension(s: &str) -> Result<String, String> {
    let ext = s.trim();
    if ext.is_empty() || ext.contains(['.', '/', '\\']) {
        Err("EXT must be a bare extension such as 'jpg'".to_string())
    } else {
        Ok(ext.to_string())
    }
}
