//! Descriptive records for a MISP-style threat-intelligence data model.
//!
//! Only what the builders need is modelled here: a named object holding
//! typed attributes, and directed references between objects.

pub mod elf;
pub mod file;
pub mod macho;
pub mod pe;
pub mod section;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Opaque key/value pairs copied onto every attribute (e.g. `to_ids`,
/// `distribution`, `comment`). This crate never interprets them.
pub type AttributeParameters = Map<String, Value>;

/// Keys an attribute always sets itself; defaults never replace them.
const RESERVED_KEYS: &[&str] = &["object_relation", "type", "value"];

/// Settings shared by every record built for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectOptions {
    /// `false` when the records are embedded in a larger report.
    pub standalone: bool,
    pub default_attributes_parameters: AttributeParameters,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            standalone: true,
            default_attributes_parameters: AttributeParameters::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub object_relation: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(flatten)]
    pub parameters: AttributeParameters,
}

/// Directed, typed link from one object to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectReference {
    pub uuid: Uuid,
    pub object_uuid: Uuid,
    pub referenced_uuid: Uuid,
    pub relationship_type: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MispObject {
    pub name: String,
    pub uuid: Uuid,
    pub standalone: bool,
    #[serde(rename = "Attribute")]
    pub attributes: Vec<Attribute>,
    #[serde(rename = "ObjectReference", skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ObjectReference>,
    #[serde(skip)]
    default_parameters: AttributeParameters,
}

impl MispObject {
    pub fn new(name: &str, options: &ObjectOptions) -> Self {
        Self {
            name: name.to_string(),
            uuid: Uuid::new_v4(),
            standalone: options.standalone,
            attributes: Vec::new(),
            references: Vec::new(),
            default_parameters: options.default_attributes_parameters.clone(),
        }
    }

    pub fn add_attribute(
        &mut self,
        object_relation: &str,
        kind: &str,
        value: impl ToString,
    ) -> &mut Self {
        let parameters = self
            .default_parameters
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.attributes.push(Attribute {
            object_relation: object_relation.to_string(),
            kind: kind.to_string(),
            value: value.to_string(),
            parameters,
        });
        self
    }

    pub fn add_reference(
        &mut self,
        referenced_uuid: Uuid,
        relationship_type: &str,
        comment: &str,
    ) -> &ObjectReference {
        self.references.push(ObjectReference {
            uuid: Uuid::new_v4(),
            object_uuid: self.uuid,
            referenced_uuid,
            relationship_type: relationship_type.to_string(),
            comment: comment.to_string(),
        });
        &self.references[self.references.len() - 1]
    }

    /// All attributes with the given relation, in insertion order.
    pub fn get_attributes<'a: 'b, 'b>(
        &'a self,
        object_relation: &'b str,
    ) -> impl Iterator<Item = &'a Attribute> + 'b {
        self.attributes
            .iter()
            .filter(move |a| a.object_relation == object_relation)
    }

    /// Value of the first attribute with the given relation.
    pub fn attribute_value(&self, object_relation: &str) -> Option<&str> {
        self.get_attributes(object_relation)
            .next()
            .map(|a| a.value.as_str())
    }
}

/// A format object together with the section objects it includes.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatRecord {
    pub object: MispObject,
    pub sections: Vec<MispObject>,
}
