use log::{info, warn};
use std::path::Path;

use crate::class_map::ClassMapping;
use crate::config::ConvertConfig;
use crate::conversion::convert_to_yolo_format;
use crate::error::ConvertResult;
use crate::io::{
    collect_annotation_files, create_dataset_yaml, find_label_collisions, label_path_for,
    remove_output_file, resolve_image_dimensions, write_output_file,
};
use crate::types::ConversionStats;
use crate::utils::{create_output_directory, create_progress_bar};
use crate::voc::parse_voc_file;

/// What happened to a single annotation file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Written {
        boxes_written: usize,
        skipped_unknown_class: usize,
    },
    SkippedMissingImage,
}

/// Convert every annotation in `config.input_dir` into a YOLO label file.
///
/// Files are processed one at a time in path order. A missing image skips the
/// file, an unknown class skips the object; a malformed annotation stops the run
/// and is returned as the error. Label files written before the failure are kept.
pub fn convert(config: &ConvertConfig, class_map: &ClassMapping) -> ConvertResult<ConversionStats> {
    let annotation_files = collect_annotation_files(&config.input_dir)?;
    create_output_directory(&config.output_dir)?;

    info!(
        "Found {} annotation file(s) in {}",
        annotation_files.len(),
        config.input_dir.display()
    );

    let mut stats = ConversionStats::new();
    stats.annotations_found = annotation_files.len();

    for (label_path, sources) in find_label_collisions(&config.output_dir, &annotation_files) {
        let sources: Vec<_> = sources.iter().map(|p| p.display().to_string()).collect();
        warn!(
            "{} annotation files share the label file {}; the last one wins: {}",
            sources.len(),
            label_path.display(),
            sources.join(", ")
        );
    }

    let pb = create_progress_bar(annotation_files.len() as u64);
    for annotation_file in &annotation_files {
        if let Some(name) = annotation_file.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        let outcome = match convert_annotation_file(annotation_file, config, class_map) {
            Ok(outcome) => outcome,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };

        match outcome {
            FileOutcome::Written {
                boxes_written,
                skipped_unknown_class,
            } => {
                stats.files_converted += 1;
                stats.boxes_written += boxes_written;
                stats.skipped_unknown_class += skipped_unknown_class;
            }
            FileOutcome::SkippedMissingImage => stats.skipped_missing_image += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if config.write_dataset_yaml {
        let yaml_path = create_dataset_yaml(&config.output_dir, class_map)?;
        info!("Wrote class names to {}", yaml_path.display());
    }

    stats.print_summary();
    Ok(stats)
}

/// Convert a single annotation file into its label file under `config.output_dir`.
///
/// The whole document is converted in memory before the label file is created,
/// so a malformed annotation never leaves a partial or stale label file behind.
pub fn convert_annotation_file(
    annotation_file: &Path,
    config: &ConvertConfig,
    class_map: &ClassMapping,
) -> ConvertResult<FileOutcome> {
    let label_path = label_path_for(&config.output_dir, annotation_file);

    let dims = match resolve_image_dimensions(&config.image_dir, annotation_file, &config.image_ext)
    {
        Some(dims) => dims,
        None => {
            warn!(
                "Image dimensions not found for {}. Skipping...",
                annotation_file.display()
            );
            return Ok(FileOutcome::SkippedMissingImage);
        }
    };

    let annotation = match parse_voc_file(annotation_file) {
        Ok(annotation) => annotation,
        Err(e) => {
            remove_output_file(&label_path);
            return Err(e);
        }
    };

    let label = convert_to_yolo_format(&annotation, dims, class_map, annotation_file);
    write_output_file(&label_path, &label.text)?;

    info!(
        "Converted: {} -> {}",
        annotation_file.display(),
        label_path.display()
    );

    Ok(FileOutcome::Written {
        boxes_written: label.boxes_written,
        skipped_unknown_class: label.skipped_unknown_class,
    })
}
