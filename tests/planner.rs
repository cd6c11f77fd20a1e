use std::time::Duration;

use mealcal_mealplan::MealType;
use mealcal_shared::Error;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

mod helpers;

#[tokio::test]
async fn test_refresh_builds_calendar() -> anyhow::Result<()> {
    let app = helpers::signed_in().await?;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            helpers::plan(&["2024-03-09", "2024-03-10"]),
            helpers::plan(&["2024-03-10", "2024-03-11"])
        ])))
        .mount(&app.server)
        .await;

    assert!(app.planner.records().await.is_none());

    let calendar = app.planner.refresh().await?;

    assert_eq!(calendar.days.len(), 3);
    assert_eq!(calendar.weeks.len(), 2);
    assert_eq!(calendar.capacity.planned, 3);
    assert_eq!(calendar.capacity.remaining, 4);
    assert_eq!(app.planner.records().await.map(|r| r.len()), Some(2));

    Ok(())
}

#[tokio::test]
async fn test_generate_then_refresh() -> anyhow::Result<()> {
    let app = helpers::signed_in().await?;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([helpers::plan(&["2024-03-10"])])),
        )
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            helpers::plan(&["2024-03-10"]),
            helpers::plan(&["2024-03-11", "2024-03-12"])
        ])))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/meal-plans/generate"))
        .and(body_json(json!({"days": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&app.server)
        .await;

    let calendar = app.planner.generate(2).await?;

    assert_eq!(calendar.capacity.planned, 3);
    assert_eq!(
        calendar.days.iter().map(|d| d.date.as_str()).collect::<Vec<_>>(),
        vec!["2024-03-10", "2024-03-11", "2024-03-12"]
    );

    Ok(())
}

#[tokio::test]
async fn test_generate_beyond_capacity_is_not_sent() -> anyhow::Result<()> {
    let app = helpers::signed_in().await?;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([helpers::plan(&[
            "2024-03-10",
            "2024-03-11",
            "2024-03-12",
            "2024-03-13",
            "2024-03-14",
            "2024-03-15"
        ])])))
        .mount(&app.server)
        .await;
    Mock::given(path("/meal-plans/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let err = app.planner.generate(2).await.unwrap_err();
    assert_eq!(err.to_string(), "You can generate up to 1 more day");

    let err = app.planner.generate(0).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    Ok(())
}

#[tokio::test]
async fn test_generate_ahead_when_full() -> anyhow::Result<()> {
    let app = helpers::signed_in().await?;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([helpers::plan(&[
            "2024-03-10",
            "2024-03-11",
            "2024-03-12",
            "2024-03-13",
            "2024-03-14",
            "2024-03-15",
            "2024-03-16"
        ])])))
        .mount(&app.server)
        .await;
    Mock::given(path("/meal-plans/generate-ahead"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let err = app.planner.generate_ahead().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "All 7 days are already planned. Complete a day to make room."
    );

    Ok(())
}

#[tokio::test]
async fn test_concurrent_generate_is_rejected() -> anyhow::Result<()> {
    let app = helpers::signed_in().await?;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/meal-plans/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let (first, second) = tokio::join!(app.planner.generate(3), app.planner.generate(3));

    assert!(first.is_ok());
    assert_eq!(
        second.unwrap_err().to_string(),
        "A meal plan request is already in progress"
    );

    Ok(())
}

#[tokio::test]
async fn test_complete_day() -> anyhow::Result<()> {
    let app = helpers::signed_in().await?;
    Mock::given(method("POST"))
        .and(path("/meal-plans/complete"))
        .and(body_json(json!({"date": "2024-03-10"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([helpers::plan(&["2024-03-11"])])),
        )
        .mount(&app.server)
        .await;

    let err = app.planner.complete("2024-3-10").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let calendar = app.planner.complete("2024-03-10").await?;
    assert_eq!(calendar.capacity.planned, 1);

    Ok(())
}

#[tokio::test]
async fn test_meal_lookup() -> anyhow::Result<()> {
    let app = helpers::signed_in().await?;
    Mock::given(method("GET"))
        .and(path("/meal-plans/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([helpers::plan(&["2024-03-10"])])),
        )
        .mount(&app.server)
        .await;

    let meal = app
        .planner
        .meal("2024-03-10", MealType::Dinner)
        .await?
        .unwrap();
    assert_eq!(meal.name, "Dinner 2024-03-10");
    assert_eq!(meal.recipe.map(|r| r.total_time_mins()), Some(30));

    assert!(
        app.planner
            .meal("2024-03-10", MealType::Breakfast)
            .await?
            .is_none()
    );

    Ok(())
}
