use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::de;

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
pub enum Complexity {
    #[default]
    Easy,
    Moderate,
    Difficult,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Ingredient {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub amount: String,
    #[serde(default, deserialize_with = "de::text")]
    pub unit: String,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            unit: unit.into(),
        }
    }

    /// Ingredients sharing a key end up on the same shopping line.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn quantity(&self) -> String {
        format!("{} {}", self.amount, self.unit)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Meal {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub cuisine_type: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub complexity_level: Complexity,
    #[serde(default, deserialize_with = "de::whole_number")]
    pub prep_time: u32,
    #[serde(default, deserialize_with = "de::whole_number")]
    pub cook_time: u32,
    #[serde(default, deserialize_with = "de::whole_number")]
    pub servings: u16,
    #[serde(default, deserialize_with = "de::null_default")]
    pub can_prepare_ahead: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub is_favorite: bool,
    #[validate(nested)]
    #[serde(default, deserialize_with = "de::null_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub equipment_needed: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub tags: Vec<String>,
}

impl Meal {
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}
