//! Text field identifiers
//!
//! Every text input of the claim form has one stable identifier. The same
//! identifier drives display binding (the hyphenated UI id) and payload key
//! derivation (the camel-cased wire key), through an explicit table rather
//! than a string transform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClaimError;

/// A text field of the claim draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    Name,
    Aadhaar,
    Phone,
    Email,
    FarmLocation,
    FarmSize,
    CropType,
    DamageDescription,
    DateFrom,
    DateTo,
    RainfallRange,
}

impl FieldId {
    /// All text fields in form (and payload) order
    pub const ALL: [FieldId; 11] = [
        FieldId::Name,
        FieldId::Aadhaar,
        FieldId::Phone,
        FieldId::Email,
        FieldId::FarmLocation,
        FieldId::FarmSize,
        FieldId::CropType,
        FieldId::DamageDescription,
        FieldId::DateFrom,
        FieldId::DateTo,
        FieldId::RainfallRange,
    ];

    /// Identifier used by the form view for the input element
    pub fn ui_id(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Aadhaar => "aadhaar",
            FieldId::Phone => "phone",
            FieldId::Email => "email",
            FieldId::FarmLocation => "farm-location",
            FieldId::FarmSize => "farm-size",
            FieldId::CropType => "crop-type",
            FieldId::DamageDescription => "damage-description",
            FieldId::DateFrom => "date-from",
            FieldId::DateTo => "date-to",
            FieldId::RainfallRange => "rainfall-range",
        }
    }

    /// Key under which the field is sent to the claims endpoint
    pub fn payload_key(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Aadhaar => "aadhaar",
            FieldId::Phone => "phone",
            FieldId::Email => "email",
            FieldId::FarmLocation => "farmLocation",
            FieldId::FarmSize => "farmSize",
            FieldId::CropType => "cropType",
            FieldId::DamageDescription => "damageDescription",
            FieldId::DateFrom => "dateFrom",
            FieldId::DateTo => "dateTo",
            FieldId::RainfallRange => "rainfallRange",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Full Name",
            FieldId::Aadhaar => "Aadhaar Number",
            FieldId::Phone => "Phone Number",
            FieldId::Email => "Email (optional)",
            FieldId::FarmLocation => "Farm Location",
            FieldId::FarmSize => "Farm Area (acres/hectares)",
            FieldId::CropType => "Crop Type",
            FieldId::DamageDescription => "Damage Description",
            FieldId::DateFrom => "Date of Incident (Start)",
            FieldId::DateTo => "Date of Incident (End)",
            FieldId::RainfallRange => "Rainfall Duration (Days)",
        }
    }

    /// Whether the claims server requires a value for this field
    pub fn is_required(self) -> bool {
        !matches!(self, FieldId::Email | FieldId::FarmSize | FieldId::RainfallRange)
    }

    /// Looks up a field by its UI identifier
    pub fn from_ui_id(ui_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.ui_id() == ui_id)
    }

    /// Looks up a field by its payload key
    pub fn from_payload_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.payload_key() == key)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ui_id())
    }
}

impl FromStr for FieldId {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ui_id(s).ok_or_else(|| ClaimError::UnrecognizedField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ui_ids_and_payload_keys_are_unique() {
        let ui: HashSet<_> = FieldId::ALL.iter().map(|f| f.ui_id()).collect();
        let keys: HashSet<_> = FieldId::ALL.iter().map(|f| f.payload_key()).collect();
        assert_eq!(ui.len(), FieldId::ALL.len());
        assert_eq!(keys.len(), FieldId::ALL.len());
    }

    #[test]
    fn test_lookup_round_trips_through_table() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_ui_id(field.ui_id()), Some(field));
            assert_eq!(FieldId::from_payload_key(field.payload_key()), Some(field));
            assert_eq!(field.ui_id().parse::<FieldId>().unwrap(), field);
        }
    }

    #[test]
    fn test_payload_key_is_camel_case_of_ui_id() {
        for field in FieldId::ALL {
            let mut camel = String::new();
            let mut upper = false;
            for c in field.ui_id().chars() {
                if c == '-' {
                    upper = true;
                } else if upper {
                    camel.extend(c.to_uppercase());
                    upper = false;
                } else {
                    camel.push(c);
                }
            }
            assert_eq!(camel, field.payload_key());
        }
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        assert!(FieldId::from_ui_id("farmLocation").is_none());
        assert!(matches!(
            "farm_location".parse::<FieldId>(),
            Err(ClaimError::UnrecognizedField(id)) if id == "farm_location"
        ));
    }

    #[test]
    fn test_required_fields() {
        assert!(FieldId::Name.is_required());
        assert!(FieldId::DateTo.is_required());
        assert!(!FieldId::Email.is_required());
        assert!(!FieldId::RainfallRange.is_required());
    }

    #[test]
    fn test_serde_uses_ui_id() {
        let json = serde_json::to_string(&FieldId::DamageDescription).unwrap();
        assert_eq!(json, "\"damage-description\"");
    }
}
