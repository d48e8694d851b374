// Record schema
// A record declares, once, the ordered table of its fields and their wire
// attribute names. Projection, encoding and decoding all read this table.

use std::fmt;

use thiserror::Error;

use crate::entities::attribute::AttributeValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Number,
}

impl AttributeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::String => "S",
            AttributeKind::Number => "N",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("attribute {attribute}: expected {expected}, found {found}")]
    TypeMismatch {
        attribute: &'static str,
        expected: AttributeKind,
        found: &'static str,
    },
    #[error("attribute {attribute}: invalid number {value:?}")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },
}

enum Accessor<R> {
    String {
        get: fn(&R) -> &String,
        get_mut: fn(&mut R) -> &mut String,
    },
    Integer {
        get: fn(&R) -> &i64,
        get_mut: fn(&mut R) -> &mut i64,
    },
}

/// One entry of a record's field table.
pub struct FieldSpec<R> {
    name: &'static str,
    attribute: &'static str,
    accessor: Accessor<R>,
}

impl<R> FieldSpec<R> {
    pub const fn string(
        name: &'static str,
        attribute: &'static str,
        get: fn(&R) -> &String,
        get_mut: fn(&mut R) -> &mut String,
    ) -> Self {
        Self {
            name,
            attribute,
            accessor: Accessor::String { get, get_mut },
        }
    }

    pub const fn integer(
        name: &'static str,
        attribute: &'static str,
        get: fn(&R) -> &i64,
        get_mut: fn(&mut R) -> &mut i64,
    ) -> Self {
        Self {
            name,
            attribute,
            accessor: Accessor::Integer { get, get_mut },
        }
    }

    /// In-memory field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wire attribute name.
    pub fn attribute(&self) -> &'static str {
        self.attribute
    }

    pub fn kind(&self) -> AttributeKind {
        match self.accessor {
            Accessor::String { .. } => AttributeKind::String,
            Accessor::Integer { .. } => AttributeKind::Number,
        }
    }

    pub fn encode(&self, record: &R) -> AttributeValue {
        match self.accessor {
            Accessor::String { get, .. } => AttributeValue::S(get(record).clone()),
            Accessor::Integer { get, .. } => AttributeValue::N(get(record).to_string()),
        }
    }

    /// Writes `value` into the field. `NULL` leaves the field untouched; a
    /// string field also takes an `N` value's digits.
    pub fn decode_into(&self, record: &mut R, value: &AttributeValue) -> Result<(), DecodeError> {
        if matches!(value, AttributeValue::Null) {
            return Ok(());
        }
        match self.accessor {
            Accessor::String { get_mut, .. } => {
                // Numbers land in string fields as their digit text.
                let text = value
                    .as_s()
                    .or_else(|| value.as_n())
                    .ok_or_else(|| self.mismatch(value))?;
                *get_mut(record) = text.to_string();
            }
            Accessor::Integer { get_mut, .. } => {
                let digits = value.as_n().ok_or_else(|| self.mismatch(value))?;
                let number = digits.trim().parse::<i64>().map_err(|_| DecodeError::InvalidNumber {
                    attribute: self.attribute,
                    value: digits.to_string(),
                })?;
                *get_mut(record) = number;
            }
        }
        Ok(())
    }

    fn mismatch(&self, found: &AttributeValue) -> DecodeError {
        DecodeError::TypeMismatch {
            attribute: self.attribute,
            expected: self.kind(),
            found: found.type_name(),
        }
    }
}

impl<R> fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("attribute", &self.attribute)
            .field("kind", &self.kind())
            .finish()
    }
}

/// A typed row with a statically declared field table.
pub trait Record: Default + Sized + 'static {
    fn fields() -> &'static [FieldSpec<Self>];

    fn attribute_names() -> Vec<&'static str> {
        Self::fields().iter().map(FieldSpec::attribute).collect()
    }
}
