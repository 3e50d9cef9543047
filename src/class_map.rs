//! Closed mapping from class name to YOLO class id.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

// On-disk class map: a JSON object of class name to id
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct ClassMapFile(HashMap<String, usize>);

/// Immutable lookup table from class name to class id.
///
/// Built once at startup and shared by reference with the converter. Names
/// that are not in the table are skipped by the converter, never added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    ids: HashMap<String, usize>,
}

impl ClassMapping {
    /// Build a mapping from an ordered label list; each label gets its position as id.
    pub fn from_label_list<S: AsRef<str>>(labels: &[S]) -> ConvertResult<Self> {
        let mut ids = HashMap::with_capacity(labels.len());
        for (id, label) in labels.iter().enumerate() {
            let label = label.as_ref().trim();
            if label.is_empty() {
                return Err(ConvertError::ClassMap(format!(
                    "label at position {} is empty",
                    id
                )));
            }
            if ids.insert(label.to_string(), id).is_some() {
                return Err(ConvertError::ClassMap(format!(
                    "label '{}' is listed more than once",
                    label
                )));
            }
        }
        Self::from_map(ids)
    }

    /// Load a mapping from a JSON object of the form `{"name": id, ...}`.
    pub fn from_json_file(path: &Path) -> ConvertResult<Self> {
        let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
        let ClassMapFile(ids) = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ConvertError::ClassMap(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Self::from_map(ids)
    }

    pub fn from_map(ids: HashMap<String, usize>) -> ConvertResult<Self> {
        if ids.is_empty() {
            return Err(ConvertError::ClassMap(
                "at least one class name is required".to_string(),
            ));
        }
        Ok(Self { ids })
    }

    pub fn get(&self, class_name: &str) -> Option<usize> {
        self.ids.get(class_name).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `(id, name)` pairs sorted by id, then name.
    pub fn names_by_id(&self) -> Vec<(usize, &str)> {
        let mut sorted: Vec<_> = self
            .ids
            .iter()
            .map(|(name, id)| (*id, name.as_str()))
            .collect();
        sorted.sort();
        sorted
    }
}
