use mealmuse_shared::{meal::Meal, mealplan::MealPlan};
use time::Date;

/// Number of days shown on the calendar, starting today.
pub const WINDOW_DAYS: usize = 14;

/// The rolling window of calendar days a family plans for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start: Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: Date,
    pub plan: Option<&'a MealPlan>,
    pub meal: Option<&'a Meal>,
}

impl CalendarWindow {
    pub fn new(start: Date) -> Self {
        Self { start }
    }

    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        std::iter::successors(Some(self.start), |day| day.next_day()).take(WINDOW_DAYS)
    }

    pub fn end(&self) -> Date {
        self.days().last().unwrap_or(self.start)
    }

    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end()
    }

    pub fn resolve<'a>(&self, plans: &'a [MealPlan], meals: &'a [Meal]) -> Vec<CalendarDay<'a>> {
        self.days()
            .map(|date| {
                let plan = plan_for_date(date, plans);
                CalendarDay {
                    date,
                    plan,
                    meal: plan.and_then(|plan| meal_by_id(&plan.meal_id, meals)),
                }
            })
            .collect()
    }
}

/// First plan recorded for the day, whatever its meal type.
pub fn plan_for_date(date: Date, plans: &[MealPlan]) -> Option<&MealPlan> {
    plans.iter().find(|plan| plan.date == date)
}

pub fn meal_by_id<'a>(id: &str, meals: &'a [Meal]) -> Option<&'a Meal> {
    meals.iter().find(|meal| meal.id == id)
}

/// Meal planned for `date`, if any. A plan pointing at a meal that no longer
/// exists resolves to nothing.
pub fn meal_for_date<'a>(date: Date, plans: &[MealPlan], meals: &'a [Meal]) -> Option<&'a Meal> {
    plan_for_date(date, plans).and_then(|plan| meal_by_id(&plan.meal_id, meals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealmuse_shared::mealplan::MealType;
    use time::macros::date;

    fn meal(id: &str, name: &str) -> Meal {
        Meal {
            id: id.to_owned(),
            name: name.to_owned(),
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
    fn test_window_has_fourteen_consecutive_days() {
        let window = CalendarWindow::new(date!(2025 - 12 - 25));
        let days = window.days().collect::<Vec<_>>();

        assert_eq!(days.len(), WINDOW_DAYS);
        assert_eq!(days[0], date!(2025 - 12 - 25));
        assert_eq!(days[7], date!(2026 - 01 - 01));
        assert_eq!(window.end(), date!(2026 - 01 - 07));
        assert!(window.contains(date!(2026 - 01 - 07)));
        assert!(!window.contains(date!(2026 - 01 - 08)));
        assert!(!window.contains(date!(2025 - 12 - 24)));
    }

    #[test]
    fn test_meal_for_date() {
        let meals = vec![meal("m1", "Tacos"), meal("m2", "Nachos")];
        let plans = vec![plan("p1", date!(2025 - 06 - 02), "m2")];

        assert_eq!(
            meal_for_date(date!(2025 - 06 - 02), &plans, &meals).map(|m| m.name.as_str()),
            Some("Nachos")
        );
    }

    #[test]
    fn test_meal_for_date_without_plan() {
        let meals = vec![meal("m1", "Tacos")];
        let plans = vec![plan("p1", date!(2025 - 06 - 02), "m1")];

        assert!(meal_for_date(date!(2025 - 06 - 01), &plans, &meals).is_none());
        assert!(meal_for_date(date!(2025 - 06 - 01), &[], &meals).is_none());
    }

    #[test]
    fn test_meal_for_date_with_dangling_meal_id() {
        let plans = vec![plan("p1", date!(2025 - 06 - 01), "deleted")];

        assert!(meal_for_date(date!(2025 - 06 - 01), &plans, &[meal("m1", "Tacos")]).is_none());
    }

    #[test]
    fn test_resolve_window() {
        let window = CalendarWindow::new(date!(2025 - 06 - 01));
        let meals = vec![meal("m1", "Tacos")];
        let plans = vec![
            plan("p1", date!(2025 - 06 - 03), "m1"),
            plan("p2", date!(2025 - 06 - 20), "m1"),
            plan("p3", date!(2025 - 06 - 05), "gone"),
        ];

        let days = window.resolve(&plans, &meals);

        assert_eq!(days.len(), WINDOW_DAYS);
        assert_eq!(days[2].meal.map(|m| m.id.as_str()), Some("m1"));
        assert_eq!(days[4].plan.map(|p| p.id.as_str()), Some("p3"));
        assert!(days[4].meal.is_none());
        assert_eq!(days.iter().filter(|day| day.plan.is_some()).count(), 2);
    }
}
