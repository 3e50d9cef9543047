//! Console messages emitted during a conversion run.
//!
//! The logger is process-global, so this file holds a single test.

use log::{Level, Log, Metadata, Record};
use std::fs;
use std::sync::Mutex;

use voc2yolo::{convert, ClassMapping, ConvertConfig};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

const DOG_AND_CAT: &str = "<annotation>\
    <object><name>pug</name><bndbox><xmin>1</xmin><ymin>1</ymin><xmax>5</xmax><ymax>5</ymax></bndbox></object>\
    <object><name>cat</name><bndbox><xmin>2</xmin><ymin>2</ymin><xmax>4</xmax><ymax>4</ymax></bndbox></object>\
    </annotation>";

#[test]
fn test_conversion_warnings_and_progress_messages() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    let config = ConvertConfig::new(root.join("xml"), root.join("labels"), root.join("images"));
    fs::create_dir_all(&config.input_dir).unwrap();
    fs::create_dir_all(&config.image_dir).unwrap();

    let orphan = config.input_dir.join("orphan.xml");
    let dog = config.input_dir.join("d.xml");
    fs::write(&orphan, DOG_AND_CAT).unwrap();
    fs::write(&dog, DOG_AND_CAT).unwrap();
    image::RgbImage::new(10, 10)
        .save(config.image_dir.join("d.jpg"))
        .unwrap();

    // a.xml and a.XML only coexist on a case-sensitive filesystem.
    fs::write(config.input_dir.join("a.xml"), DOG_AND_CAT).unwrap();
    fs::write(config.input_dir.join("a.XML"), DOG_AND_CAT).unwrap();
    image::RgbImage::new(10, 10)
        .save(config.image_dir.join("a.jpg"))
        .unwrap();
    let case_sensitive = fs::read_dir(&config.input_dir).unwrap().count() == 4;

    let class_map = ClassMapping::from_label_list(&["pug", "boxer"]).unwrap();
    let stats = convert(&config, &class_map).unwrap();

    let records = LOGGER.records.lock().unwrap().clone();
    let warnings: Vec<&str> = records
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message.as_str())
        .collect();
    let infos: Vec<&str> = records
        .iter()
        .filter(|(level, _)| *level == Level::Info)
        .map(|(_, message)| message.as_str())
        .collect();

    let orphan_name = orphan.display().to_string();
    assert_eq!(
        warnings.iter().filter(|m| m.contains(&orphan_name)).count(),
        1,
        "{:?}",
        warnings
    );

    let dog_name = dog.display().to_string();
    assert_eq!(
        warnings
            .iter()
            .filter(|m| m.contains("'cat'") && m.contains(&dog_name))
            .count(),
        1,
        "{:?}",
        warnings
    );

    let converted: Vec<&str> = infos
        .iter()
        .copied()
        .filter(|m| m.starts_with("Converted: "))
        .collect();
    assert_eq!(converted.len(), stats.files_converted);
    let dog_line = format!(
        "Converted: {} -> {}",
        dog_name,
        config.output_dir.join("d.txt").display()
    );
    assert_eq!(converted.iter().filter(|m| **m == dog_line).count(), 1);
    assert!(!infos.iter().any(|m| m.contains(&orphan_name)));

    let shared_label = config.output_dir.join("a.txt").display().to_string();
    let collision_warnings = warnings
        .iter()
        .filter(|m| m.contains("share the label file") && m.contains(&shared_label))
        .count();
    assert_eq!(collision_warnings, if case_sensitive { 1 } else { 0 });
}
