// Filter and projection expressions
// Mirrors the store's expression grammar: attribute names are aliased as
// `#N`, values as `:N`, and a name used twice shares one alias.

use std::collections::HashMap;

use thiserror::Error;

use crate::entities::attribute::{AttributeMap, AttributeValue};
use crate::entities::event::ATTR_CREATED_AT;
use crate::entities::schema::Record;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("projection must name at least one attribute")]
    EmptyProjection,
    #[error("attribute name must not be empty")]
    EmptyAttributeName,
    #[error("expression builder has neither a filter nor a projection")]
    EmptyBuilder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// `contains(attribute, substring)`; the substring is used verbatim.
    Contains { attribute: String, substring: String },
}

impl FilterExpression {
    pub fn contains(attribute: impl Into<String>, substring: impl Into<String>) -> Self {
        FilterExpression::Contains {
            attribute: attribute.into(),
            substring: substring.into(),
        }
    }

    /// Evaluates the predicate against one row the way the store does.
    pub fn matches(&self, row: &AttributeMap) -> bool {
        match self {
            FilterExpression::Contains {
                attribute,
                substring,
            } => row
                .get(attribute)
                .map(|value| value.contains(&AttributeValue::S(substring.clone())))
                .unwrap_or(false),
        }
    }

    fn attribute(&self) -> &str {
        match self {
            FilterExpression::Contains { attribute, .. } => attribute,
        }
    }
}

/// Filter on the event creation timestamp. No normalization of `value`.
pub fn created_at_contains(value: &str) -> FilterExpression {
    FilterExpression::contains(ATTR_CREATED_AT, value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionExpression {
    attributes: Vec<String>,
}

impl ProjectionExpression {
    pub fn names<I, S>(names: I) -> Result<Self, ExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes: Vec<String> = names.into_iter().map(Into::into).collect();
        if attributes.is_empty() {
            return Err(ExpressionError::EmptyProjection);
        }
        if attributes.iter().any(|name| name.trim().is_empty()) {
            return Err(ExpressionError::EmptyAttributeName);
        }
        Ok(Self { attributes })
    }

    /// Every attribute the record declares, in declaration order.
    pub fn for_record<R: Record>() -> Result<Self, ExpressionError> {
        Self::names(R::attribute_names())
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Keeps only the projected attributes of `row`.
    pub fn apply(&self, row: &AttributeMap) -> AttributeMap {
        self.attributes
            .iter()
            .filter_map(|name| row.get(name).map(|value| (name.clone(), value.clone())))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    filter: Option<FilterExpression>,
    projection: Option<ProjectionExpression>,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: FilterExpression) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_projection(mut self, projection: ProjectionExpression) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn build(self) -> Result<ScanExpression, ExpressionError> {
        if self.filter.is_none() && self.projection.is_none() {
            return Err(ExpressionError::EmptyBuilder);
        }

        let mut aliases = AliasTable::default();

        let filter_text = match &self.filter {
            Some(filter) => {
                if filter.attribute().trim().is_empty() {
                    return Err(ExpressionError::EmptyAttributeName);
                }
                Some(match filter {
                    FilterExpression::Contains {
                        attribute,
                        substring,
                    } => {
                        let name = aliases.name(attribute);
                        let value = aliases.value(AttributeValue::S(substring.clone()));
                        format!("contains ({name}, {value})")
                    }
                })
            }
            None => None,
        };

        let projection_text = self.projection.as_ref().map(|projection| {
            projection
                .attributes
                .iter()
                .map(|attribute| aliases.name(attribute))
                .collect::<Vec<_>>()
                .join(", ")
        });

        Ok(ScanExpression {
            filter: self.filter,
            projection: self.projection,
            filter_text,
            projection_text,
            names: aliases.names,
            values: aliases.values,
        })
    }
}

#[derive(Default)]
struct AliasTable {
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
    by_attribute: HashMap<String, String>,
}

impl AliasTable {
    fn name(&mut self, attribute: &str) -> String {
        if let Some(alias) = self.by_attribute.get(attribute) {
            return alias.clone();
        }
        let alias = format!("#{}", self.names.len());
        self.names.insert(alias.clone(), attribute.to_string());
        self.by_attribute
            .insert(attribute.to_string(), alias.clone());
        alias
    }

    fn value(&mut self, value: AttributeValue) -> String {
        let alias = format!(":{}", self.values.len());
        self.values.insert(alias.clone(), value);
        alias
    }
}

/// A built query description: structured parts plus their wire rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanExpression {
    filter: Option<FilterExpression>,
    projection: Option<ProjectionExpression>,
    filter_text: Option<String>,
    projection_text: Option<String>,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl ScanExpression {
    pub fn filter(&self) -> Option<&FilterExpression> {
        self.filter.as_ref()
    }

    pub fn projection(&self) -> Option<&ProjectionExpression> {
        self.projection.as_ref()
    }

    pub fn filter_text(&self) -> Option<&str> {
        self.filter_text.as_deref()
    }

    pub fn projection_text(&self) -> Option<&str> {
        self.projection_text.as_deref()
    }

    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    pub fn values(&self) -> &HashMap<String, AttributeValue> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::event::Event;

    fn row(created_at: &str) -> AttributeMap {
        let mut row = AttributeMap::new();
        row.insert(
            ATTR_CREATED_AT.to_string(),
            AttributeValue::S(created_at.to_string()),
        );
        row
    }

    #[test]
    fn projection_for_event_matches_field_table() {
        let projection = ProjectionExpression::for_record::<Event>().expect("projection");
        assert_eq!(projection.attributes().len(), Event::fields().len());
        let declared: Vec<&str> = Event::fields().iter().map(|spec| spec.attribute()).collect();
        let projected: Vec<&str> = projection.attributes().iter().map(String::as_str).collect();
        assert_eq!(projected, declared);
    }

    #[test]
    fn empty_projection_is_rejected() {
        let err = ProjectionExpression::names(Vec::<String>::new()).expect_err("empty");
        assert_eq!(err, ExpressionError::EmptyProjection);
    }

    #[test]
    fn blank_projection_name_is_rejected() {
        let err = ProjectionExpression::names(["id", " "]).expect_err("blank");
        assert_eq!(err, ExpressionError::EmptyAttributeName);
    }

    #[test]
    fn builder_without_parts_is_rejected() {
        let err = ExpressionBuilder::new().build().expect_err("empty builder");
        assert_eq!(err, ExpressionError::EmptyBuilder);
    }

    #[test]
    fn builder_rejects_blank_filter_attribute() {
        let err = ExpressionBuilder::new()
            .with_filter(FilterExpression::contains("", "01/06"))
            .build()
            .expect_err("blank attribute");
        assert_eq!(err, ExpressionError::EmptyAttributeName);
    }

    #[test]
    fn builder_aliases_names_and_shares_repeated_attributes() {
        let expression = ExpressionBuilder::new()
            .with_filter(created_at_contains("01/06/2022"))
            .with_projection(ProjectionExpression::for_record::<Event>().expect("projection"))
            .build()
            .expect("build");

        assert_eq!(expression.filter_text(), Some("contains (#0, :0)"));
        assert_eq!(
            expression.projection_text(),
            Some("#1, #2, #3, #4, #5, #6, #0, #7")
        );
        assert_eq!(expression.names().len(), 8);
        assert_eq!(
            expression.names().get("#0").map(String::as_str),
            Some(ATTR_CREATED_AT)
        );
        assert_eq!(
            expression.values().get(":0"),
            Some(&AttributeValue::S("01/06/2022".to_string()))
        );
    }

    #[test]
    fn filter_value_is_used_verbatim() {
        let expression = ExpressionBuilder::new()
            .with_filter(created_at_contains(" 01/06 "))
            .build()
            .expect("build");
        assert_eq!(
            expression.values().get(":0"),
            Some(&AttributeValue::S(" 01/06 ".to_string()))
        );
        assert!(expression.projection_text().is_none());
    }

    #[test]
    fn substring_filter_selects_matching_rows() {
        let rows = [
            row("01/06/2022 10:00"),
            row("02/06/2022 09:00"),
            row("01/07/2022 08:00"),
        ];

        let day = created_at_contains("01/06");
        let hits: Vec<bool> = rows.iter().map(|r| day.matches(r)).collect();
        assert_eq!(hits, vec![true, false, false]);

        let month = created_at_contains("06/2022");
        let hits: Vec<bool> = rows.iter().map(|r| month.matches(r)).collect();
        assert_eq!(hits, vec![true, true, false]);
    }

    #[test]
    fn empty_filter_value_matches_every_row_with_the_attribute() {
        let filter = created_at_contains("");
        assert!(filter.matches(&row("01/06/2022 10:00")));
        assert!(filter.matches(&row("")));
        assert!(!filter.matches(&AttributeMap::new()));
    }

    #[test]
    fn projection_apply_drops_unrequested_attributes() {
        let projection = ProjectionExpression::names(["id"]).expect("projection");
        let mut source = row("01/06/2022 10:00");
        source.insert("id".to_string(), AttributeValue::S("evt-1".to_string()));
        let projected = projection.apply(&source);
        assert_eq!(projected.len(), 1);
        assert!(projected.contains_key("id"));
    }
}
