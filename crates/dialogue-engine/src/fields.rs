//! The canonical booking fields and their pre-recorded audio keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six booking attributes, in the order they are asked.
///
/// The declaration order is the canonical question order; question
/// sequencing and `missing_fields` both depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    Name,
    CarReg,
    CarModel,
    Mileage,
    Warranty,
    Issue,
}

impl BookingField {
    /// All fields in canonical ask order.
    pub const ALL: [BookingField; 6] = [
        BookingField::Name,
        BookingField::CarReg,
        BookingField::CarModel,
        BookingField::Mileage,
        BookingField::Warranty,
        BookingField::Issue,
    ];

    /// Snake-case key used in prompts, JSON snapshots and asset names.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::CarReg => "car_reg",
            BookingField::CarModel => "car_model",
            BookingField::Mileage => "mileage",
            BookingField::Warranty => "warranty",
            BookingField::Issue => "issue",
        }
    }

    /// The canned question for this field (pre-recorded via TTS).
    pub fn question(&self) -> &'static str {
        match self {
            BookingField::Name => "What's your full name?",
            BookingField::CarReg => "What's your car registration number?",
            BookingField::CarModel => "What's the make and model of your car?",
            BookingField::Mileage => "What's the current mileage on your vehicle?",
            BookingField::Warranty => {
                "Is your car currently under warranty or a service contract?"
            }
            BookingField::Issue => "What service or issue can we help you with today?",
        }
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key into the pre-recorded audio catalog.
///
/// The dialogue core only ever emits keys; resolving a key to an actual
/// audio file is the asset store's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Greeting,
    Completion,
    DidntCatch,
    Field(BookingField),
}

impl AssetKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKey::Greeting => "greeting",
            AssetKey::Completion => "completion",
            AssetKey::DidntCatch => "didnt_catch",
            AssetKey::Field(field) => field.as_str(),
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AssetKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_fixed() {
        let keys: Vec<&str> = BookingField::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "car_reg", "car_model", "mileage", "warranty", "issue"]
        );
    }

    #[test]
    fn asset_keys_match_field_names() {
        assert_eq!(AssetKey::Field(BookingField::CarReg).as_str(), "car_reg");
        assert_eq!(AssetKey::Greeting.as_str(), "greeting");
        assert_eq!(AssetKey::Completion.as_str(), "completion");
    }
}
