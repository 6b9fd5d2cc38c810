//! # Wire Records
//!
//! The shapes the back-office API actually returns, and their mapping onto
//! core types.
//!
//! ## Accepted Response Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bare list                 [ {...}, {...} ]                             │
//! │                            filtered = configured default                │
//! │                                                                         │
//! │  Envelope                  { "data": [ {...} ], "filtered": true }      │
//! │                            filtered = envelope flag (default false)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are decoded one at a time. A record that does not fit (or has
//! no id under any accepted name) is skipped, not fatal to the page.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use tripdesk_core::{Candidate, EntityKind, ServiceOption};

use crate::error::LookupResult;

// =============================================================================
// Envelope
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Bare(Vec<Value>),
    Wrapped {
        data: Vec<Value>,
        #[serde(default)]
        filtered: Option<bool>,
    },
}

/// A decoded list of records, before any filtering or capping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage<T> {
    pub records: Vec<T>,
    /// Set only when the envelope said so.
    pub filtered: Option<bool>,
}

fn decode_page<T, F>(body: Value, mut convert: F) -> LookupResult<RecordPage<T>>
where
    F: FnMut(Value) -> Option<T>,
{
    let (items, filtered) = match serde_json::from_value::<ListEnvelope>(body)? {
        ListEnvelope::Bare(items) => (items, None),
        ListEnvelope::Wrapped { data, filtered } => (data, filtered),
    };

    let total = items.len();
    let records: Vec<T> = items.into_iter().filter_map(&mut convert).collect();
    if records.len() < total {
        debug!(skipped = total - records.len(), "Skipped malformed records");
    }

    Ok(RecordPage { records, filtered })
}

/// Text form of an id/phone that may arrive as a string or a number.
fn scalar_text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// =============================================================================
// Customer Record
// =============================================================================

/// `GET /customers` item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub customer_id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub mobile: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CustomerRecord {
    pub fn into_candidate(self) -> Option<Candidate> {
        let id = scalar_text(&self.id).or_else(|| scalar_text(&self.customer_id))?;

        Some(Candidate {
            kind: EntityKind::Customer,
            id,
            name: non_blank(self.name),
            phone: scalar_text(&self.phone).or_else(|| scalar_text(&self.mobile)),
            email: non_blank(self.email),
            owner_name: None,
            location: None,
        })
    }
}

// =============================================================================
// Vendor Record
// =============================================================================

/// `GET /vendors` item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub object_id: Option<Value>,
    #[serde(default)]
    pub trade_name: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub contact_no: Option<Value>,
    #[serde(default)]
    pub trade_location: Option<String>,
}

impl VendorRecord {
    pub fn into_candidate(self) -> Option<Candidate> {
        let id = scalar_text(&self.id).or_else(|| scalar_text(&self.object_id))?;

        Some(Candidate {
            kind: EntityKind::Vendor,
            id,
            name: non_blank(self.trade_name),
            phone: scalar_text(&self.contact_no),
            email: None,
            owner_name: non_blank(self.owner_name),
            location: non_blank(self.trade_location),
        })
    }
}

/// Decodes a search response for `kind` into candidates.
pub fn decode_candidates(kind: EntityKind, body: Value) -> LookupResult<RecordPage<Candidate>> {
    match kind {
        EntityKind::Customer => decode_page(body, |item| {
            serde_json::from_value::<CustomerRecord>(item)
                .ok()
                .and_then(CustomerRecord::into_candidate)
        }),
        EntityKind::Vendor => decode_page(body, |item| {
            serde_json::from_value::<VendorRecord>(item)
                .ok()
                .and_then(VendorRecord::into_candidate)
        }),
    }
}

// =============================================================================
// Service Record
// =============================================================================

/// `GET /services` item: `{ value, label }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRecord {
    pub value: Value,
    #[serde(default)]
    pub label: Option<String>,
}

impl ServiceRecord {
    pub fn into_option(self) -> Option<ServiceOption> {
        let id = scalar_text(&Some(self.value))?;
        let name = non_blank(self.label).unwrap_or_else(|| id.clone());
        Some(ServiceOption { id, name })
    }
}

/// Decodes the service catalog response.
pub fn decode_services(body: Value) -> LookupResult<Vec<ServiceOption>> {
    let page = decode_page(body, |item| {
        serde_json::from_value::<ServiceRecord>(item)
            .ok()
            .and_then(ServiceRecord::into_option)
    })?;

    Ok(page.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use serde_json::json;

    #[test]
    fn test_customer_field_aliases() {
        let page = decode_candidates(
            EntityKind::Customer,
            json!([
                { "id": "C-1", "name": "John Smith", "phone": "0170", "email": "john@example.com" },
                { "customerId": 42, "name": "Jo Ann", "mobile": 1811 },
            ]),
        )
        .unwrap();

        assert_eq!(page.filtered, None);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].email.as_deref(), Some("john@example.com"));
        assert_eq!(page.records[1].id, "42");
        assert_eq!(page.records[1].phone.as_deref(), Some("1811"));
    }

    #[test]
    fn test_vendor_field_aliases() {
        let page = decode_candidates(
            EntityKind::Vendor,
            json!({
                "data": [
                    { "_id": "65f0a1", "tradeName": "Sky Travels", "ownerName": "Rahim",
                      "contactNo": "0191", "tradeLocation": "Motijheel" }
                ],
                "filtered": true
            }),
        )
        .unwrap();

        assert_eq!(page.filtered, Some(true));
        let vendor = &page.records[0];
        assert_eq!(vendor.kind, EntityKind::Vendor);
        assert_eq!(vendor.id, "65f0a1");
        assert_eq!(vendor.name.as_deref(), Some("Sky Travels"));
        assert_eq!(vendor.owner_name.as_deref(), Some("Rahim"));
        assert_eq!(vendor.location.as_deref(), Some("Motijheel"));
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let page = decode_candidates(
            EntityKind::Customer,
            json!([{ "name": "Ghost" }, { "id": "", "name": "Blank" }, { "id": "C-2" }, "junk"]),
        )
        .unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id, "C-2");
        assert_eq!(page.records[0].display_label(), "C-2");
    }

    #[test]
    fn test_unrecognized_body_is_an_error() {
        let err = decode_candidates(EntityKind::Customer, json!({ "rows": [] })).unwrap_err();
        assert!(matches!(err, LookupError::DeserializationFailed(_)));
    }

    #[test]
    fn test_services_decode() {
        let services = decode_services(json!({
            "data": [
                { "value": "air-ticket-domestic", "label": "Domestic Air Ticket" },
                { "value": 7, "label": "Visa Processing" },
                { "value": "hotel" },
            ]
        }))
        .unwrap();

        assert_eq!(services.len(), 3);
        assert_eq!(services[1].id, "7");
        assert_eq!(services[2].name, "hotel");
    }

    #[test]
    fn test_services_without_usable_entries_decode_empty() {
        assert!(decode_services(json!([])).unwrap().is_empty());
        assert!(decode_services(json!([{ "label": "no value" }])).unwrap().is_empty());
    }
}
