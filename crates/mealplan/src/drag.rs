use mealmuse_shared::mealplan::{MealPlan, MealType, NewMealPlan, PlanChanges};
use time::Date;

use crate::calendar::plan_for_date;

/// A single write to the meal plan collection.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanUpsert {
    Update { id: String, changes: PlanChanges },
    Create(NewMealPlan),
}

/// Store writes produced by a calendar edit. Deletes are applied first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    pub to_delete: Vec<String>,
    pub to_upsert: Vec<PlanUpsert>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_upsert.is_empty()
    }
}

/// Moves the plan on `source` to `dest`. A plan already on `dest` is
/// overwritten with the moved meal, not swapped back to `source`.
pub fn apply_drag_move(source: Date, dest: Date, plans: &[MealPlan]) -> ChangeSet {
    if source == dest {
        return ChangeSet::default();
    }

    let Some(moved) = plan_for_date(source, plans) else {
        return ChangeSet::default();
    };

    let upsert = match plan_for_date(dest, plans) {
        Some(existing) => PlanUpsert::Update {
            id: existing.id.to_owned(),
            changes: PlanChanges {
                meal_id: moved.meal_id.to_owned(),
                family_members: Some(moved.family_members.clone()),
            },
        },
        None => PlanUpsert::Create(NewMealPlan {
            date: dest,
            meal_id: moved.meal_id.to_owned(),
            meal_type: MealType::Dinner,
            family_members: moved.family_members.clone(),
        }),
    };

    ChangeSet {
        to_delete: vec![moved.id.to_owned()],
        to_upsert: vec![upsert],
    }
}
