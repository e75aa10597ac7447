//! Meal-type distribution

use serde::Serialize;

use crate::feed::{Complaint, MealType};

/// Complaint count for one meal category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MealSlice {
    pub name: MealType,
    pub value: usize,
}

impl MealSlice {
    /// Fraction of `total` this slice covers, 0 when `total` is 0
    pub fn share(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.value as f64 / total as f64
        }
    }
}

/// Exactly four slices in `breakfast, lunch, dinner, brunch` order.
///
/// Empty categories are kept. Unknown meal types are not counted anywhere.
pub fn meal_type_distribution(complaints: &[Complaint]) -> [MealSlice; 4] {
    MealType::ALL.map(|meal| MealSlice {
        name: meal,
        value: complaints.iter().filter(|c| c.meal() == Some(meal)).count(),
    })
}

/// Sum of all slices, i.e. complaints with a known meal type
pub fn known_meal_total(slices: &[MealSlice]) -> usize {
    slices.iter().map(|s| s.value).sum()
}
