use glob::{glob_with, MatchOptions, Pattern};
use image::{GenericImageView, ImageReader};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::class_map::ClassMapping;
use crate::error::{ConvertError, ConvertResult};
use crate::types::{ImageDimensions, ANNOTATION_EXTENSION, LABEL_EXTENSION};

/// List the VOC annotation files directly inside `input_dir`, sorted by path.
///
/// Only regular files with an `.xml` extension (any case) are returned.
pub fn collect_annotation_files(input_dir: &Path) -> ConvertResult<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(ConvertError::io(
            input_dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "input directory not found"),
        ));
    }

    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&input_dir.to_string_lossy()),
        ANNOTATION_EXTENSION
    );
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let paths = glob_with(&pattern, options).map_err(|e| {
        ConvertError::io(
            input_dir,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        )
    })?;
    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Path of the image paired with an annotation: same base name, `image_ext` extension.
pub fn image_path_for(image_dir: &Path, annotation_file: &Path, image_ext: &str) -> PathBuf {
    let file_name = annotation_file.file_name().unwrap_or(annotation_file.as_os_str());
    image_dir.join(Path::new(file_name).with_extension(image_ext))
}

/// Path of the label file written for an annotation: same base name, `.txt` extension.
pub fn label_path_for(output_dir: &Path, annotation_file: &Path) -> PathBuf {
    let file_name = annotation_file.file_name().unwrap_or(annotation_file.as_os_str());
    output_dir.join(Path::new(file_name).with_extension(LABEL_EXTENSION))
}

/// Label files that more than one annotation would write, with their sources in order.
///
/// On a case-sensitive filesystem `a.xml` and `a.XML` both map to `a.txt`.
pub fn find_label_collisions(
    output_dir: &Path,
    annotation_files: &[PathBuf],
) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut by_label: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for annotation_file in annotation_files {
        by_label
            .entry(label_path_for(output_dir, annotation_file))
            .or_default()
            .push(annotation_file.clone());
    }
    by_label
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .collect()
}

/// Decode the image paired with an annotation and return its size.
///
/// Returns `None` when the image is missing, cannot be decoded, or is empty.
pub fn resolve_image_dimensions(
    image_dir: &Path,
    annotation_file: &Path,
    image_ext: &str,
) -> Option<ImageDimensions> {
    let image_path = image_path_for(image_dir, annotation_file, image_ext);
    if !image_path.is_file() {
        debug!("Image not found: {}", image_path.display());
        return None;
    }

    // The content sniff wins over the extension, so a PNG saved as .jpg still decodes.
    let decoded = ImageReader::open(&image_path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode());

    match decoded {
        Ok(image) => {
            let (width, height) = image.dimensions();
            ImageDimensions::new(width, height)
        }
        Err(e) => {
            debug!("Failed to decode image {}: {}", image_path.display(), e);
            None
        }
    }
}

/// Write an output file in a single scope.
///
/// On failure the partially written file is removed before the error is returned.
pub fn write_output_file(path: &Path, contents: &str) -> ConvertResult<()> {
    let result = File::create(path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        writer.write_all(contents.as_bytes())?;
        writer.flush()
    });

    result.map_err(|e| {
        remove_output_file(path);
        ConvertError::io(path, e)
    })
}

/// Remove an output file left over from an earlier run or a failed write.
pub fn remove_output_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed output file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove output file {}: {}", path.display(), e),
    }
}

/// Create the dataset.yaml file listing the class names by id
pub fn create_dataset_yaml(output_dir: &Path, class_map: &ClassMapping) -> ConvertResult<PathBuf> {
    let dataset_yaml_path = output_dir.join("dataset.yaml");

    let names = class_map.names_by_id();
    let mut yaml_content = format!("nc: {}\n\nnames:\n", names.len());
    for (id, label) in names {
        yaml_content.push_str(&format!("    {}: {}\n", id, label));
    }

    write_output_file(&dataset_yaml_path, &yaml_content)?;
    Ok(dataset_yaml_path)
}
