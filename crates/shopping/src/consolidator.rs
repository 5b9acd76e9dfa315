use std::collections::HashMap;

use mealmuse_shared::meal::Meal;
use serde::Serialize;

use crate::collate;

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub amount: String,
    pub unit: String,
    pub combined_amount: String,
    pub meals: Vec<String>,
}

/// Merges the ingredients of `meals` into one list, one item per
/// lower-cased ingredient name. Quantities are joined as text with `+`.
pub fn consolidate<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Vec<ShoppingItem> {
    let mut items: Vec<ShoppingItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for meal in meals {
        for ingredient in &meal.ingredients {
            let key = ingredient.key();

            if let Some(&position) = index.get(&key) {
                let item = &mut items[position];
                item.combined_amount = format!("{} + {}", item.combined_amount, ingredient.quantity());
                item.meals.push(meal.name.to_owned());
                continue;
            }

            index.insert(key, items.len());
            items.push(ShoppingItem {
                name: ingredient.name.to_owned(),
                amount: ingredient.amount.to_owned(),
                unit: ingredient.unit.to_owned(),
                combined_amount: ingredient.quantity(),
                meals: vec![meal.name.to_owned()],
            });
        }
    }

    items.sort_by(|a, b| collate::compare(&a.name, &b.name));

    items
}
