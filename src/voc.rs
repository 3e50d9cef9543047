//! Pascal VOC annotation parsing.
//!
//! Only the parts of the VOC schema needed for bounding boxes are read:
//! ```xml
//! <annotation>
//!   <filename>pug_001.jpg</filename>
//!   <size><width>500</width><height>375</height><depth>3</depth></size>
//!   <object>
//!     <name>pug</name>
//!     <bndbox>
//!       <xmin>48</xmin><ymin>240</ymin><xmax>195</xmax><ymax>371</ymax>
//!     </bndbox>
//!   </object>
//! </annotation>
//! ```
//! Any other element is ignored.

use std::fs;
use std::path::Path;

use roxmltree::Node;

use crate::error::{ConvertError, ConvertResult};
use crate::types::{AnnotationRecord, BoundingBox, DeclaredSize};

/// Read and parse a VOC annotation file.
///
/// The file must be UTF-8 (or plain ASCII); anything else is reported as a
/// malformed annotation.
pub fn parse_voc_file(path: &Path) -> ConvertResult<AnnotationRecord> {
    let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    let content = String::from_utf8(bytes).map_err(|source| ConvertError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    parse_voc_str(&content, path)
}

/// Parse VOC XML text. `path` is only used to label errors.
pub fn parse_voc_str(xml: &str, path: &Path) -> ConvertResult<AnnotationRecord> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| ConvertError::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    let root = doc.root_element();

    let filename = child_element(&root, "filename")
        .and_then(|n| n.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    let size = child_element(&root, "size").and_then(|size| parse_declared_size(&size));

    let boxes = root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "object")
        .map(|object| parse_object(&object, path))
        .collect::<ConvertResult<Vec<_>>>()?;

    Ok(AnnotationRecord {
        filename,
        size,
        boxes,
    })
}

fn parse_object(object: &Node, path: &Path) -> ConvertResult<BoundingBox> {
    // An empty <name/> is kept as an empty class name; the converter will skip it as unknown.
    let class_name = required_element(object, "name", path)?
        .text()
        .unwrap_or_default()
        .trim()
        .to_string();

    let bndbox = required_element(object, "bndbox", path)?;

    Ok(BoundingBox {
        class_name,
        xmin: coordinate(&bndbox, "xmin", path)?,
        ymin: coordinate(&bndbox, "ymin", path)?,
        xmax: coordinate(&bndbox, "xmax", path)?,
        ymax: coordinate(&bndbox, "ymax", path)?,
    })
}

fn parse_declared_size(size: &Node) -> Option<DeclaredSize> {
    let read = |name: &str| {
        child_element(size, name)
            .and_then(|n| n.text())
            .and_then(|text| text.trim().parse::<u32>().ok())
    };
    Some(DeclaredSize {
        width: read("width")?,
        height: read("height")?,
    })
}

fn coordinate(bndbox: &Node, element: &str, path: &Path) -> ConvertResult<f64> {
    let text = required_element(bndbox, element, path)?
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| missing(path, element))?;

    text.parse::<f64>()
        .map_err(|_| ConvertError::InvalidCoordinate {
            path: path.to_path_buf(),
            element: element.to_string(),
            value: text.to_string(),
        })
}

fn child_element<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn required_element<'a, 'input>(
    node: &Node<'a, 'input>,
    name: &str,
    path: &Path,
) -> ConvertResult<Node<'a, 'input>> {
    child_element(node, name).ok_or_else(|| missing(path, name))
}

fn missing(path: &Path, element: &str) -> ConvertError {
    ConvertError::MissingElement {
        path: path.to_path_buf(),
        element: element.to_string(),
    }
}
