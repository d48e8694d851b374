// Event entity
// A shipment event row as stored in the events table.

use serde::{Deserialize, Serialize};

use crate::entities::schema::{FieldSpec, Record};

pub const ATTR_ID: &str = "id";
pub const ATTR_OCCURRED_AT: &str = "occurred_at";
pub const ATTR_DESCRIPTION: &str = "description";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_SHIPMENT_STEPS_ID: &str = "shipment_steps_id";
/// Epoch seconds; the store expires the row once this passes.
pub const ATTR_EXPIRES_AT: &str = "expires_at";
/// Human formatted timestamp, e.g. `01/06/2022 10:00`. Matched by substring.
pub const ATTR_CREATED_AT: &str = "created_at";
pub const ATTR_SERVICE_STATUS: &str = "service_status";

pub const DEFAULT_TABLE_NAME: &str = "events";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub occurred_at: String,
    pub description: String,
    pub title: String,
    pub shipment_steps_id: String,
    pub expires_at: i64,
    pub created_at: String,
    pub service_status: String,
}

pub static EVENT_FIELDS: [FieldSpec<Event>; 8] = [
    FieldSpec::string("id", ATTR_ID, |e: &Event| &e.id, |e: &mut Event| &mut e.id),
    FieldSpec::string(
        "occurred_at",
        ATTR_OCCURRED_AT,
        |e: &Event| &e.occurred_at,
        |e: &mut Event| &mut e.occurred_at,
    ),
    FieldSpec::string(
        "description",
        ATTR_DESCRIPTION,
        |e: &Event| &e.description,
        |e: &mut Event| &mut e.description,
    ),
    FieldSpec::string("title", ATTR_TITLE, |e: &Event| &e.title, |e: &mut Event| &mut e.title),
    FieldSpec::string(
        "shipment_steps_id",
        ATTR_SHIPMENT_STEPS_ID,
        |e: &Event| &e.shipment_steps_id,
        |e: &mut Event| &mut e.shipment_steps_id,
    ),
    FieldSpec::integer(
        "expires_at",
        ATTR_EXPIRES_AT,
        |e: &Event| &e.expires_at,
        |e: &mut Event| &mut e.expires_at,
    ),
    FieldSpec::string(
        "created_at",
        ATTR_CREATED_AT,
        |e: &Event| &e.created_at,
        |e: &mut Event| &mut e.created_at,
    ),
    FieldSpec::string(
        "service_status",
        ATTR_SERVICE_STATUS,
        |e: &Event| &e.service_status,
        |e: &mut Event| &mut e.service_status,
    ),
];

impl Record for Event {
    fn fields() -> &'static [FieldSpec<Self>] {
        &EVENT_FIELDS
    }
}
