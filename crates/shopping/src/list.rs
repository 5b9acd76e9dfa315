use std::{collections::BTreeSet, fmt::Write};

use mealmuse_shared::mealplan::PlannedMeal;

use crate::{Progress, ShoppingItem, consolidate, toggle_checked};

/// Meals picked for shopping, the list they produce and the items already
/// in the cart.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    selected: Vec<PlannedMeal>,
    items: Vec<ShoppingItem>,
    checked: BTreeSet<String>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from the planned meals whose plan id is in `plan_ids`,
    /// or from every planned meal when `plan_ids` is empty.
    pub fn for_plans(planned: &[PlannedMeal], plan_ids: &[String]) -> mealmuse_shared::Result<Self> {
        if let Some(missing) = plan_ids
            .iter()
            .find(|id| !planned.iter().any(|planned| &planned.plan_id == *id))
        {
            mealmuse_shared::user!("plan {} is not on the calendar", missing);
        }

        let mut list = Self::new();

        for meal in planned
            .iter()
            .filter(|planned| plan_ids.is_empty() || plan_ids.contains(&planned.plan_id))
        {
            if !list.is_selected(meal) {
                list.toggle_meal(meal);
            }
        }

        Ok(list)
    }

    pub fn selected(&self) -> &[PlannedMeal] {
        &self.selected
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn checked(&self) -> &BTreeSet<String> {
        &self.checked
    }

    pub fn is_selected(&self, planned: &PlannedMeal) -> bool {
        self.selected
            .iter()
            .any(|selected| selected.selection_key() == planned.selection_key())
    }

    /// Selects or deselects one planned meal. Any selection change rebuilds
    /// the list and clears the checked items.
    pub fn toggle_meal(&mut self, planned: &PlannedMeal) {
        let before = self.selected.len();
        self.selected
            .retain(|selected| selected.selection_key() != planned.selection_key());

        if self.selected.len() == before {
            self.selected.push(planned.clone());
        }

        self.items = consolidate(self.selected.iter().map(|planned| &planned.meal));
        self.checked.clear();

        tracing::debug!(
            selected = self.selected.len(),
            items = self.items.len(),
            "shopping list rebuilt"
        );
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.items.clear();
        self.checked.clear();
    }

    pub fn toggle_item(&mut self, name: &str) -> mealmuse_shared::Result<()> {
        if !self.items.iter().any(|item| item.name == name) {
            mealmuse_shared::user!("{} is not on the shopping list", name);
        }

        self.checked = toggle_checked(name, &self.checked);

        Ok(())
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(&self.items, &self.checked)
    }

    pub fn render(&self) -> String {
        let progress = self.progress();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Shopping list: {}/{} items ({}%)",
            progress.checked, progress.total, progress.percent
        );

        for item in &self.items {
            let mark = if self.checked.contains(&item.name) { 'x' } else { ' ' };
            let _ = writeln!(
                out,
                "[{}] {}: {} ({})",
                mark,
                item.name,
                item.combined_amount.trim_end(),
                item.meals.join(", ")
            );
        }

        out
    }
}
