// Row codec
// Converts between attribute maps and typed records through the record's
// field table.

use crate::entities::attribute::AttributeMap;
use crate::entities::schema::{DecodeError, Record};

/// Decodes one row. Attributes the row lacks, or holds as `NULL`, keep the
/// field's zero value; a value of the wrong type fails the whole row. Numbers
/// are accepted by string fields.
pub fn decode_row<R: Record>(row: &AttributeMap) -> Result<R, DecodeError> {
    let mut record = R::default();
    for spec in R::fields() {
        if let Some(value) = row.get(spec.attribute()) {
            spec.decode_into(&mut record, value)?;
        }
    }
    Ok(record)
}

pub fn encode_row<R: Record>(record: &R) -> AttributeMap {
    R::fields()
        .iter()
        .map(|spec| (spec.attribute().to_string(), spec.encode(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::attribute::AttributeValue;
    use crate::entities::event::{
        Event, ATTR_CREATED_AT, ATTR_EXPIRES_AT, ATTR_ID, ATTR_SHIPMENT_STEPS_ID, ATTR_TITLE,
    };
    use crate::entities::schema::AttributeKind;

    fn sample_event() -> Event {
        Event {
            id: "4f1c".to_string(),
            occurred_at: "2022-06-01T10:00:00Z".to_string(),
            description: "left the distribution center".to_string(),
            title: "In transit".to_string(),
            shipment_steps_id: "step-9".to_string(),
            expires_at: 1_656_633_600,
            created_at: "01/06/2022 10:00".to_string(),
            service_status: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn encode_then_decode_preserves_every_field() {
        let event = sample_event();
        let row = encode_row(&event);
        assert_eq!(row.len(), Event::fields().len());
        let decoded: Event = decode_row(&row).expect("decode");
        assert_eq!(decoded, event);
    }

    #[test]
    fn encode_writes_expires_at_as_number() {
        let row = encode_row(&sample_event());
        assert_eq!(
            row.get(ATTR_EXPIRES_AT),
            Some(&AttributeValue::N("1656633600".to_string()))
        );
    }

    #[test]
    fn missing_and_null_attributes_decode_to_zero_values() {
        let mut row = AttributeMap::new();
        row.insert(ATTR_ID.to_string(), AttributeValue::S("only-id".to_string()));
        row.insert(ATTR_TITLE.to_string(), AttributeValue::Null);
        let decoded: Event = decode_row(&row).expect("decode");
        assert_eq!(decoded.id, "only-id");
        assert_eq!(decoded.title, "");
        assert_eq!(decoded.expires_at, 0);
    }

    #[test]
    fn type_mismatch_fails_the_row() {
        let mut row = encode_row(&sample_event());
        row.insert(ATTR_EXPIRES_AT.to_string(), AttributeValue::S("soon".to_string()));
        let err = decode_row::<Event>(&row).expect_err("mismatch");
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                attribute: ATTR_EXPIRES_AT,
                expected: AttributeKind::Number,
                found: "S",
            }
        );
    }

    #[test]
    fn number_into_string_field_keeps_digits() {
        let mut row = AttributeMap::new();
        row.insert(ATTR_ID.to_string(), AttributeValue::S("evt-1".to_string()));
        row.insert(
            ATTR_SHIPMENT_STEPS_ID.to_string(),
            AttributeValue::N("42".to_string()),
        );
        let decoded: Event = decode_row(&row).expect("decode");
        assert_eq!(decoded.id, "evt-1");
        assert_eq!(decoded.shipment_steps_id, "42");
    }

    #[test]
    fn unsupported_value_in_declared_field_fails_the_row() {
        let mut row = encode_row(&sample_event());
        row.insert(ATTR_TITLE.to_string(), AttributeValue::Unsupported);
        let err = decode_row::<Event>(&row).expect_err("mismatch");
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                attribute: ATTR_TITLE,
                expected: AttributeKind::String,
                found: "UNSUPPORTED",
            }
        );
    }

    #[test]
    fn unparseable_number_fails_the_row() {
        let mut row = encode_row(&sample_event());
        row.insert(ATTR_EXPIRES_AT.to_string(), AttributeValue::N("1.5".to_string()));
        let err = decode_row::<Event>(&row).expect_err("invalid number");
        assert!(matches!(err, DecodeError::InvalidNumber { .. }));
    }

    #[test]
    fn unknown_attributes_are_ignored() {
        let mut row = encode_row(&sample_event());
        row.insert("shard".to_string(), AttributeValue::Bool(true));
        row.insert(ATTR_CREATED_AT.to_string(), AttributeValue::S("02/06/2022".to_string()));
        let decoded: Event = decode_row(&row).expect("decode");
        assert_eq!(decoded.created_at, "02/06/2022");
    }
}
