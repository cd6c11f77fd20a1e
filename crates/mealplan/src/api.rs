use async_trait::async_trait;
use mealcal_shared::Result;

use crate::MealPlanRecord;

/// Meal-plan endpoints of the server. Authentication is the transport's
/// concern.
#[async_trait]
pub trait MealPlanApi: Send + Sync {
    /// Asks the server to plan up to `days` new dates.
    async fn generate_meal_plan(&self, days: usize) -> Result<()>;

    async fn list_meal_plans(&self) -> Result<Vec<MealPlanRecord>>;

    /// Removes `date` from the planning horizon.
    async fn complete_day(&self, date: &str) -> Result<()>;

    /// Fills every remaining slot of the horizon.
    async fn generate_ahead(&self) -> Result<()>;
}

#[async_trait]
impl<T: MealPlanApi + ?Sized> MealPlanApi for std::sync::Arc<T> {
    async fn generate_meal_plan(&self, days: usize) -> Result<()> {
        (**self).generate_meal_plan(days).await
    }

    async fn list_meal_plans(&self) -> Result<Vec<MealPlanRecord>> {
        (**self).list_meal_plans().await
    }

    async fn complete_day(&self, date: &str) -> Result<()> {
        (**self).complete_day(date).await
    }

    async fn generate_ahead(&self) -> Result<()> {
        (**self).generate_ahead().await
    }
}
