// Wire attribute values
// One row on the wire is a map from attribute name to a typed value.

use std::collections::HashMap;

pub type AttributeMap = HashMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    S(String),
    /// Numbers travel as their decimal string form.
    N(String),
    B(Vec<u8>),
    Bool(bool),
    Null,
    Ss(Vec<String>),
    Ns(Vec<String>),
    Bs(Vec<Vec<u8>>),
    L(Vec<AttributeValue>),
    M(HashMap<String, AttributeValue>),
    /// A wire type this model does not cover. Kept so decoding can reject it.
    Unsupported,
}

impl AttributeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null => "NULL",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
            AttributeValue::Unsupported => "UNSUPPORTED",
        }
    }

    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(value) => Some(value),
            _ => None,
        }
    }

    /// Store semantics of `contains(path, operand)`: substring for strings,
    /// membership for sets and lists. Anything else never matches.
    pub fn contains(&self, operand: &AttributeValue) -> bool {
        match (self, operand) {
            (AttributeValue::S(haystack), AttributeValue::S(needle)) => {
                haystack.contains(needle.as_str())
            }
            (AttributeValue::Ss(set), AttributeValue::S(needle)) => set.contains(needle),
            (AttributeValue::Ns(set), AttributeValue::N(needle)) => set.contains(needle),
            (AttributeValue::L(items), operand) => items.contains(operand),
            _ => false,
        }
    }
}
