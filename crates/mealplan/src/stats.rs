use mealmuse_shared::{meal::Meal, mealplan::MealPlan};
use time::Date;

pub const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_meals: usize,
    pub favorite_count: usize,
    pub planned_count: usize,
}

impl DashboardStats {
    pub fn compute(meals: &[Meal], plans: &[MealPlan]) -> Self {
        Self {
            total_meals: meals.len(),
            favorite_count: meals.iter().filter(|meal| meal.is_favorite).count(),
            planned_count: plans.len(),
        }
    }
}

/// Next plans on or after `from`, soonest first.
pub fn upcoming(plans: &[MealPlan], from: Date, limit: usize) -> Vec<&MealPlan> {
    let mut upcoming = plans
        .iter()
        .filter(|plan| plan.date >= from)
        .collect::<Vec<_>>();

    upcoming.sort_by_key(|plan| plan.date);
    upcoming.truncate(limit);

    upcoming
}
