use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::de;

/// How open a family member is to unfamiliar food.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Adventurousness {
    PickyEater,
    Conservative,
    #[default]
    Moderate,
    Adventurous,
    Experimental,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FamilyMember {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(max = 130))]
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub allergies: Vec<String>,
    #[serde(
        default,
        alias = "adventurousness",
        deserialize_with = "de::null_default"
    )]
    pub adventurousness_level: Adventurousness,
    #[serde(default, deserialize_with = "de::null_default")]
    pub other_preferences: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FamilyPreferences {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(
        default,
        alias = "favorite_cuisines",
        deserialize_with = "de::null_default"
    )]
    pub preferred_cuisines: Vec<String>,
    #[serde(
        default,
        alias = "cooking_equipment",
        deserialize_with = "de::null_default"
    )]
    pub cooking_apparatus: Vec<String>,
}

/// Fields of a family member to overwrite. `None` leaves a field alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Validate)]
pub struct FamilyMemberChanges {
    #[validate(length(min = 1, max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(range(max = 130))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adventurousness_level: Option<Adventurousness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_preferences: Option<String>,
}

impl FamilyMemberChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl FamilyPreferences {
    /// Trims every entry and drops blanks and repeats.
    pub fn normalized(mut self) -> Self {
        self.preferred_cuisines = clean_labels(self.preferred_cuisines);
        self.cooking_apparatus = clean_labels(self.cooking_apparatus);
        self
    }
}

/// Splits a comma separated list such as `"peanuts, shellfish"`.
pub fn split_labels(value: &str) -> Vec<String> {
    clean_labels(value.split(','))
}

fn clean_labels<I>(labels: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();

    for label in labels {
        let label = label.as_ref().trim();
        if label.is_empty() || cleaned.iter().any(|c| c == label) {
            continue;
        }
        cleaned.push(label.to_owned());
    }

    cleaned
}
