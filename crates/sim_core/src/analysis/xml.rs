use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use roxmltree::{Document, Node};

use super::AnalysisError;

/// An engine document read into memory, parsed on demand.
pub(super) struct XmlFile {
    path: PathBuf,
    text: String,
}

impl XmlFile {
    pub(super) fn read(path: &Path) -> Result<Self, AnalysisError> {
        let text = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub(super) fn parse(&self) -> Result<Document<'_>, AnalysisError> {
        Document::parse(&self.text).map_err(|source| AnalysisError::Xml {
            path: self.path.clone(),
            source,
        })
    }

    pub(super) fn attr<'a>(&self, node: Node<'a, '_>, name: &str) -> Result<&'a str, AnalysisError> {
        node.attribute(name)
            .ok_or_else(|| AnalysisError::MissingAttribute {
                path: self.path.clone(),
                element: node.tag_name().name().to_string(),
                attribute: name.to_string(),
            })
    }

    pub(super) fn number<T: FromStr>(&self, node: Node<'_, '_>, name: &str) -> Result<T, AnalysisError> {
        let raw = self.attr(node, name)?;
        self.parse_number(node, name, raw)
    }

    /// `None` when the attribute is absent; present but unparsable is an error.
    pub(super) fn optional_number<T: FromStr>(
        &self,
        node: Node<'_, '_>,
        name: &str,
    ) -> Result<Option<T>, AnalysisError> {
        node.attribute(name)
            .map(|raw| self.parse_number(node, name, raw))
            .transpose()
    }

    fn parse_number<T: FromStr>(&self, node: Node<'_, '_>, name: &str, raw: &str) -> Result<T, AnalysisError> {
        raw.trim()
            .parse()
            .map_err(|_| AnalysisError::InvalidNumber {
                path: self.path.clone(),
                element: node.tag_name().name().to_string(),
                attribute: name.to_string(),
                value: raw.to_string(),
            })
    }
}

/// Direct children of the root element with the given tag.
pub(super) fn children_named<'a, 'input>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.root_element()
        .children()
        .filter(move |node| node.has_tag_name(tag))
}
