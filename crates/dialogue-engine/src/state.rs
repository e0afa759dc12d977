//! Partially filled booking state and typed field updates

use crate::fields::BookingField;
use crate::normalize::{MileageValue, WarrantyValue};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// The booking attributes collected so far for one session.
///
/// A field is filled iff it is `Some`; `Some(false)` counts as filled for
/// `warranty`. Fills are monotonic: a filled field is only ever
/// overwritten by a new non-null value, never cleared.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingState {
    pub name: Option<String>,
    pub car_reg: Option<String>,
    pub car_model: Option<String>,
    pub mileage: Option<i64>,
    pub warranty: Option<bool>,
    pub issue: Option<String>,
}

impl BookingState {
    pub fn is_filled(&self, field: BookingField) -> bool {
        match field {
            BookingField::Name => self.name.is_some(),
            BookingField::CarReg => self.car_reg.is_some(),
            BookingField::CarModel => self.car_model.is_some(),
            BookingField::Mileage => self.mileage.is_some(),
            BookingField::Warranty => self.warranty.is_some(),
            BookingField::Issue => self.issue.is_some(),
        }
    }

    /// True once all six fields are filled.
    pub fn is_complete(&self) -> bool {
        BookingField::ALL.iter().all(|f| self.is_filled(*f))
    }

    /// Unfilled fields in canonical ask order.
    pub fn missing_fields(&self) -> Vec<BookingField> {
        BookingField::ALL
            .iter()
            .copied()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }

    /// JSON view with all six keys present, unfilled values as `null`.
    /// Used for extraction prompts and turn outcomes.
    pub fn snapshot(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "car_reg": self.car_reg,
            "car_model": self.car_model,
            "mileage": self.mileage,
            "warranty": self.warranty,
            "issue": self.issue,
        })
    }
}

/// A partial update decoded from the extraction model's output.
///
/// Absent or `null` keys stay `None`; unknown keys are ignored during
/// deserialization. Mileage and warranty accept either their target type
/// or free text, since the model may answer `"45,000 miles"` or
/// `"expired"` as readily as `45000` or `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldUpdates {
    pub name: Option<String>,
    pub car_reg: Option<String>,
    pub car_model: Option<String>,
    pub mileage: Option<MileageValue>,
    pub warranty: Option<WarrantyValue>,
    pub issue: Option<String>,
}

impl FieldUpdates {
    /// True when no key carries a value; an empty update means the model
    /// extracted nothing and the turn should fall back.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.car_reg.is_none()
            && self.car_model.is_none()
            && self.mileage.is_none()
            && self.warranty.is_none()
            && self.issue.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearly_complete() -> BookingState {
        BookingState {
            name: Some("Alex Smith".into()),
            car_reg: Some("AB12CDE".into()),
            car_model: Some("Ford Focus".into()),
            mileage: Some(45000),
            warranty: Some(false),
            issue: None,
        }
    }

    #[test]
    fn empty_state_missing_everything_in_order() {
        let state = BookingState::default();
        assert!(!state.is_complete());
        assert_eq!(state.missing_fields(), BookingField::ALL.to_vec());
    }

    #[test]
    fn missing_only_issue_is_not_complete() {
        let state = nearly_complete();
        assert!(!state.is_complete());
        assert_eq!(state.missing_fields(), vec![BookingField::Issue]);
    }

    #[test]
    fn warranty_false_counts_as_filled() {
        let mut state = nearly_complete();
        state.issue = Some("brakes squealing".into());
        assert!(state.is_complete());
        assert!(state.missing_fields().is_empty());
    }

    #[test]
    fn snapshot_keeps_null_for_unfilled() {
        let state = BookingState {
            name: Some("Alex".into()),
            ..Default::default()
        };
        let snap = state.snapshot();
        assert_eq!(snap["name"], "Alex");
        assert!(snap["car_reg"].is_null());
        assert_eq!(snap.as_object().map(|o| o.len()), Some(6));
    }

    #[test]
    fn updates_deserialize_mixed_types_and_ignore_unknown_keys() {
        let raw = r#"{"name":"Alex","mileage":"120k","warranty":"expired","colour":"red"}"#;
        let updates: FieldUpdates = serde_json::from_str(raw).unwrap();
        assert_eq!(updates.name.as_deref(), Some("Alex"));
        assert_eq!(updates.mileage, Some(MileageValue::Text("120k".into())));
        assert_eq!(updates.warranty, Some(WarrantyValue::Text("expired".into())));
        assert!(!updates.is_empty());
    }

    #[test]
    fn all_null_updates_are_empty() {
        let raw = r#"{"name":null,"car_reg":null,"mileage":null}"#;
        let updates: FieldUpdates = serde_json::from_str(raw).unwrap();
        assert!(updates.is_empty());
    }
}
