use std::sync::Arc;

use mealcal_mealplan::{
    Calendar, MealAssignment, MealPlanApi, MealPlanRecord, MealType, find_meal, validate_request,
};
use mealcal_shared::{Error, Result, date};
use mealcal_user::{AuthApi, SessionManager};
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Owns the last fetched meal-plan records. Every mutation is followed by
/// a fresh fetch, and only one mutation may be outstanding at a time.
pub struct Planner<A> {
    session: Arc<SessionManager<A>>,
    records: RwLock<Option<Vec<MealPlanRecord>>>,
    in_flight: Mutex<()>,
}

impl<A: AuthApi + MealPlanApi> Planner<A> {
    pub fn new(session: Arc<SessionManager<A>>) -> Self {
        Self {
            session,
            records: RwLock::new(None),
            in_flight: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &SessionManager<A> {
        &self.session
    }

    /// Records from the last successful fetch, `None` before the first one.
    pub async fn records(&self) -> Option<Vec<MealPlanRecord>> {
        self.records.read().await.clone()
    }

    /// Fetches the records and replaces the cached list.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self) -> Result<Calendar> {
        let records = self
            .session
            .call(|api| api.list_meal_plans())
            .await
            .map_err(|err| err.or_fallback("Failed to load meal plans. Please try again."))?;

        let calendar = Calendar::build(&records);
        tracing::debug!(
            records = records.len(),
            planned = calendar.capacity.planned,
            "meal plans loaded"
        );

        *self.records.write().await = Some(records);

        Ok(calendar)
    }

    /// Calendar from the cached records, fetching them on first use.
    pub async fn calendar(&self) -> Result<Calendar> {
        if let Some(records) = self.records.read().await.as_ref() {
            return Ok(Calendar::build(records));
        }

        self.refresh().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn generate(&self, days: usize) -> Result<Calendar> {
        let _guard = self.begin()?;

        let calendar = self.calendar().await?;
        validate_request(calendar.capacity.planned, days)?;

        self.session
            .call(|api| api.generate_meal_plan(days))
            .await
            .map_err(|err| err.or_fallback("Failed to generate meal plan. Please try again."))?;

        tracing::info!(days, "meal plan generated");

        self.refresh().await
    }

    /// Fills every remaining day of the horizon.
    #[tracing::instrument(skip_all)]
    pub async fn generate_ahead(&self) -> Result<Calendar> {
        let _guard = self.begin()?;

        let capacity = self.calendar().await?.capacity;
        validate_request(capacity.planned, capacity.remaining.max(1))?;

        self.session
            .call(|api| api.generate_ahead())
            .await
            .map_err(|err| err.or_fallback("Failed to generate meal plan. Please try again."))?;

        tracing::info!(days = capacity.remaining, "meal plan filled ahead");

        self.refresh().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn complete(&self, value: &str) -> Result<Calendar> {
        let _guard = self.begin()?;

        let day = date::canonical(date::parse(value)?);

        self.session
            .call(|api| api.complete_day(&day))
            .await
            .map_err(|err| err.or_fallback("Failed to mark day as complete. Please try again."))?;

        tracing::info!(date = day.as_str(), "day completed");

        self.refresh().await
    }

    /// Meal shown for `value` on a freshly fetched calendar.
    pub async fn meal(&self, value: &str, meal_type: MealType) -> Result<Option<MealAssignment>> {
        date::parse(value)?;

        self.refresh().await?;

        let records = self.records.read().await;

        Ok(records
            .as_deref()
            .and_then(|records| find_meal(records, value, meal_type)))
    }

    fn begin(&self) -> Result<MutexGuard<'_, ()>> {
        self.in_flight.try_lock().map_err(|_| {
            Error::Validation("A meal plan request is already in progress".to_owned())
        })
    }
}
