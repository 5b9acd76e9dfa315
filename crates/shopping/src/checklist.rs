use std::collections::BTreeSet;

use crate::ShoppingItem;

/// Adds `name` when absent, removes it when present.
pub fn toggle_checked(name: &str, checked: &BTreeSet<String>) -> BTreeSet<String> {
    let mut next = checked.clone();

    if !next.remove(name) {
        next.insert(name.to_owned());
    }

    next
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    pub fn compute(items: &[ShoppingItem], checked: &BTreeSet<String>) -> Self {
        let total = items.len();
        let checked = items
            .iter()
            .filter(|item| checked.contains(&item.name))
            .count();

        let percent = if total == 0 {
            0
        } else {
            ((checked as f64 / total as f64) * 100.0).round() as u8
        };

        Self {
            checked,
            total,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }
}
