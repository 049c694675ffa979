//! Meal metrics aggregation.

use serde::Serialize;

/// Summary of a user's meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    pub total_meals: u64,
    pub total_meals_on_diet: u64,
    pub total_meals_off_diet: u64,
    pub best_on_diet_sequence: u64,
}

impl MealMetrics {
    /// Aggregate on-diet flags ordered newest first.
    ///
    /// The streak counter increments on every on-diet meal and resets on an
    /// off-diet meal; the best streak is the largest counter value seen.
    ///
    /// # Examples
    /// ```
    /// use diet_backend::domain::MealMetrics;
    ///
    /// let metrics = MealMetrics::from_newest_first([true, true, false, true]);
    /// assert_eq!(metrics.total_meals, 4);
    /// assert_eq!(metrics.total_meals_on_diet, 3);
    /// assert_eq!(metrics.total_meals_off_diet, 1);
    /// assert_eq!(metrics.best_on_diet_sequence, 2);
    /// ```
    pub fn from_newest_first<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut metrics = Self::default();
        let mut current = 0_u64;
        for on_diet in flags {
            metrics.total_meals += 1;
            if on_diet {
                metrics.total_meals_on_diet += 1;
                current += 1;
            } else {
                metrics.total_meals_off_diet += 1;
                current = 0;
            }
            if current > metrics.best_on_diet_sequence {
                metrics.best_on_diet_sequence = current;
            }
        }
        metrics
    }
}
