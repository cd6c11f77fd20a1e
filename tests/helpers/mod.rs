use std::path::PathBuf;

use mealcal::{
    HttpApi, Planner,
    config::{ApiConfig, Config, StorageConfig},
};
use serde_json::{Map, Value, json};
use temp_dir::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub server: MockServer,
    pub config: Config,
    pub planner: Planner<HttpApi>,
    pub token_path: PathBuf,
    _dir: TempDir,
}

pub async fn setup() -> anyhow::Result<TestApp> {
    let server = MockServer::start().await;
    let dir = TempDir::new()?;
    let token_path = dir.child("mealcal").join("session.json");

    let config = Config {
        api: ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        },
        storage: StorageConfig {
            token_path: token_path.clone(),
        },
        ..Default::default()
    };
    let planner = Planner::new(mealcal::connect(&config)?);

    Ok(TestApp {
        server,
        config,
        planner,
        token_path,
        _dir: dir,
    })
}

#[allow(dead_code)]
pub async fn mount_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "65f0",
            "email": "jane@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "profile": {"allergies": ["peanuts"]}
        })))
        .mount(server)
        .await;
}

/// Writes a stored token and restores the session from it.
#[allow(dead_code)]
pub async fn signed_in() -> anyhow::Result<TestApp> {
    let app = setup().await?;
    mount_profile(&app.server).await;

    std::fs::create_dir_all(app.token_path.parent().unwrap())?;
    std::fs::write(&app.token_path, r#"{"token": "stored-token"}"#)?;
    app.planner.session().bootstrap().await;
    assert!(app.planner.session().is_authenticated());

    Ok(app)
}

/// One meal-plan record with a dinner on each of `dates`.
#[allow(dead_code)]
pub fn plan(dates: &[&str]) -> Value {
    let mut keys = Map::new();
    let mut days = Map::new();

    for (index, date) in dates.iter().enumerate() {
        let key = format!("Day{}", index + 1);
        keys.insert(key.clone(), json!(date));
        days.insert(
            key,
            json!({"Dinner": {"name": format!("Dinner {date}"), "recipe": {"prepTimeMins": 10, "cookTimeMins": 20}}}),
        );
    }

    json!({"id": "plan", "user_id": "65f0", "dates": keys, "days": days})
}
