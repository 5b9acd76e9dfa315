use mealmuse_shared::{
    meal::Meal,
    mealplan::{MealPlan, PlannedMeal},
};

use crate::calendar::{CalendarWindow, meal_by_id};

/// Plans inside the window joined with their meals, ordered by day.
/// Plans whose meal has been deleted are left out.
pub fn planned_meals(window: &CalendarWindow, plans: &[MealPlan], meals: &[Meal]) -> Vec<PlannedMeal> {
    let mut planned = plans
        .iter()
        .filter(|plan| window.contains(plan.date))
        .filter_map(|plan| {
            let meal = meal_by_id(&plan.meal_id, meals)?;

            Some(PlannedMeal {
                plan_id: plan.id.to_owned(),
                date: plan.date,
                meal: meal.clone(),
            })
        })
        .collect::<Vec<_>>();

    planned.sort_by_key(|planned| planned.date);

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealmuse_shared::mealplan::MealType;
    use time::{Date, macros::date};

    fn meal(id: &str) -> Meal {
        Meal {
            id: id.to_owned(),
            name: id.to_uppercase(),
            ..Default::default()
        }
    }

    fn plan(id: &str, date: Date, meal_id: &str) -> MealPlan {
        MealPlan {
            id: id.to_owned(),
            date,
            meal_id: meal_id.to_owned(),
            meal_type: MealType::Dinner,
            family_members: vec![],
            skipped: false,
        }
    }

    #[test]
    fn test_planned_meals_in_window_sorted() {
        let window = CalendarWindow::new(date!(2025 - 06 - 01));
        let meals = vec![meal("tacos"), meal("nachos")];
        let plans = vec![
            plan("p3", date!(2025 - 06 - 09), "tacos"),
            plan("p1", date!(2025 - 05 - 31), "tacos"),
            plan("p2", date!(2025 - 06 - 02), "nachos"),
            plan("p4", date!(2025 - 06 - 15), "nachos"),
            plan("p5", date!(2025 - 06 - 05), "missing"),
        ];

        let planned = planned_meals(&window, &plans, &meals);
        let ids = planned.iter().map(|p| p.plan_id.as_str()).collect::<Vec<_>>();

        assert_eq!(ids, vec!["p2", "p3"]);
        assert_eq!(planned[0].meal.name, "NACHOS");
    }

    #[test]
    fn test_same_meal_twice_has_distinct_selection_keys() {
        let window = CalendarWindow::new(date!(2025 - 06 - 01));
        let meals = vec![meal("tacos")];
        let plans = vec![
            plan("p1", date!(2025 - 06 - 01), "tacos"),
            plan("p2", date!(2025 - 06 - 08), "tacos"),
        ];

        let planned = planned_meals(&window, &plans, &meals);

        assert_eq!(planned.len(), 2);
        assert_ne!(planned[0].selection_key(), planned[1].selection_key());
    }
}
