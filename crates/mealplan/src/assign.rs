use mealmuse_shared::{
    family::FamilyMember,
    mealplan::{MealPlan, MealType, NewMealPlan, PlanChanges},
};
use time::Date;

use crate::{calendar::plan_for_date, drag::PlanUpsert};

/// Puts `meal_id` on `date`. An existing plan keeps its members and only
/// swaps the meal; a new plan is a dinner for the whole family.
pub fn assign_meal(
    date: Date,
    meal_id: &str,
    plans: &[MealPlan],
    family: &[FamilyMember],
) -> PlanUpsert {
    match plan_for_date(date, plans) {
        Some(existing) => PlanUpsert::Update {
            id: existing.id.to_owned(),
            changes: PlanChanges {
                meal_id: meal_id.to_owned(),
                family_members: None,
            },
        },
        None => PlanUpsert::Create(NewMealPlan {
            date,
            meal_id: meal_id.to_owned(),
            meal_type: MealType::Dinner,
            family_members: family.iter().map(|member| member.id.to_owned()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn member(id: &str) -> FamilyMember {
        FamilyMember {
            id: id.to_owned(),
            name: id.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_assign_empty_day() {
        let upsert = assign_meal(
            date!(2025 - 06 - 03),
            "m1",
            &[],
            &[member("ava"), member("mike")],
        );

        assert_eq!(
            upsert,
            PlanUpsert::Create(NewMealPlan {
                date: date!(2025 - 06 - 03),
                meal_id: "m1".to_owned(),
                meal_type: MealType::Dinner,
                family_members: vec!["ava".to_owned(), "mike".to_owned()],
            })
        );
    }

    #[test]
    fn test_assign_replaces_meal_and_keeps_members() {
        let plans = vec![MealPlan {
            id: "p1".to_owned(),
            date: date!(2025 - 06 - 03),
            meal_id: "m0".to_owned(),
            meal_type: MealType::Lunch,
            family_members: vec!["ava".to_owned()],
            skipped: false,
        }];

        let upsert = assign_meal(date!(2025 - 06 - 03), "m1", &plans, &[member("mike")]);

        assert_eq!(
            upsert,
            PlanUpsert::Update {
                id: "p1".to_owned(),
                changes: PlanChanges {
                    meal_id: "m1".to_owned(),
                    family_members: None,
                },
            }
        );
    }
}
