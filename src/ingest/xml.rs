/// Generic XML tree for the DHMZ feeds.
///
/// Converts an XML document into nested ordered maps following the
/// Parker convention:
///   - the root element name is dropped
///   - an element with child elements becomes a `Map` keyed by child tag
///   - repeated sibling tags collapse into a `List` under one key
///   - a leaf element becomes `Text` (trimmed, empty for `<Tag/>`)
///   - attributes are ignored
///
/// Shape-specific extraction happens in `feed.rs`; this module knows
/// nothing about stations.

use xmltree::{Element, XMLNode};

use crate::model::FeedError;

/// One node of a converted feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedNode {
    Text(String),
    Map(Vec<(String, FeedNode)>),
    List(Vec<FeedNode>),
}

impl FeedNode {
    /// Child under `key`, if this is a map that has one.
    pub fn get(&self, key: &str) -> Option<&FeedNode> {
        match self {
            FeedNode::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeedNode::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Ordered map entries; empty for anything that is not a map.
    pub fn entries(&self) -> &[(String, FeedNode)] {
        match self {
            FeedNode::Map(entries) => entries,
            _ => &[],
        }
    }

    /// Sequence view: a `List` yields its items, anything else yields itself.
    ///
    /// Parker output cannot tell a one-element sequence from a single
    /// element, so callers expecting repeats should always go through here.
    pub fn items(&self) -> &[FeedNode] {
        match self {
            FeedNode::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Text child under `key`, as a convenience for required string fields.
    pub fn text_field(&self, key: &str) -> Result<&str, FeedError> {
        self.get(key)
            .ok_or_else(|| FeedError::MissingField(key.to_string()))?
            .as_text()
            .ok_or_else(|| FeedError::NotText(key.to_string()))
    }
}

/// Parses XML text into a `FeedNode` tree rooted at the document element's
/// content.
pub fn parse_document(xml: &str) -> Result<FeedNode, FeedError> {
    let root = Element::parse(xml.as_bytes())?;
    Ok(convert(&root))
}

fn convert(element: &Element) -> FeedNode {
    let mut entries: Vec<(String, FeedNode)> = Vec::new();

    for child in element.children.iter() {
        let XMLNode::Element(child) = child else {
            continue;
        };
        let value = convert(child);

        let Some(idx) = entries.iter().position(|(k, _)| *k == child.name) else {
            entries.push((child.name.clone(), value));
            continue;
        };

        let slot = &mut entries[idx].1;
        match slot {
            // convert() never returns a List, so any List here came from a repeat
            FeedNode::List(items) => items.push(value),
            _ => {
                let first = std::mem::replace(slot, FeedNode::List(Vec::new()));
                *slot = FeedNode::List(vec![first, value]);
            }
        }
    }

    if entries.is_empty() {
        let text = element
            .get_text()
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        FeedNode::Text(text)
    } else {
        FeedNode::Map(entries)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_element_is_dropped() {
        let doc = parse_document("<Root><A>1</A></Root>").expect("should parse");
        assert_eq!(doc.text_field("A").unwrap(), "1");
        assert!(doc.get("Root").is_none(), "root tag must not appear as a key");
    }

    #[test]
    fn test_repeated_tags_collapse_into_list_in_order() {
        let doc = parse_document("<R><T>a</T><T>b</T><T>c</T></R>").expect("should parse");
        let items: Vec<_> = doc
            .get("T")
            .expect("T present")
            .items()
            .iter()
            .map(|n| n.as_text().unwrap())
            .collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_child_reads_as_one_item_sequence() {
        let doc = parse_document("<R><T>only</T></R>").expect("should parse");
        let t = doc.get("T").unwrap();
        assert_eq!(t.items().len(), 1);
        assert_eq!(t.items()[0].as_text(), Some("only"));
    }

    #[test]
    fn test_empty_element_is_empty_text() {
        let doc = parse_document("<R><A/><B>  </B></R>").expect("should parse");
        assert_eq!(doc.text_field("A").unwrap(), "");
        assert_eq!(doc.text_field("B").unwrap(), "", "whitespace-only text is trimmed");
    }

    #[test]
    fn test_map_preserves_document_order() {
        let doc = parse_document("<R><Z>1</Z><A>2</A><M>3</M></R>").expect("should parse");
        let keys: Vec<_> = doc.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_attributes_are_ignored() {
        let doc = parse_document(r#"<R><Grad autom="1"><GradIme>Pula</GradIme></Grad></R>"#)
            .expect("should parse");
        let grad = doc.get("Grad").unwrap();
        assert_eq!(grad.entries().len(), 1);
        assert_eq!(grad.text_field("GradIme").unwrap(), "Pula");
    }

    #[test]
    fn test_malformed_xml_returns_xml_error() {
        let result = parse_document("<R><A>unclosed</R>");
        assert!(
            matches!(result, Err(FeedError::Xml(_))),
            "malformed XML should be an Xml error, got {:?}",
            result
        );
    }

    #[test]
    fn test_text_field_reports_missing_and_non_text() {
        let doc = parse_document("<R><A><B>1</B></A></R>").expect("should parse");
        assert!(matches!(doc.text_field("X"), Err(FeedError::MissingField(k)) if k == "X"));
        assert!(matches!(doc.text_field("A"), Err(FeedError::NotText(k)) if k == "A"));
    }
}
