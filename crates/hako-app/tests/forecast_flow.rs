#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hako_app::App;
use hako_core::{AppError, CalculatorConfig, Config, NetworkError, WeatherConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AREAS: &str = r#"{
    "centers": {
        "010100": {"name": "Hokkaido", "children": ["014030", "014100"]},
        "010300": {"name": "Kanto Koshin", "children": ["130000"]}
    },
    "offices": {
        "014030": {"name": "Tokachi", "parent": "010100"},
        "014100": {"name": "Kushiro", "parent": "010100"},
        "130000": {"name": "Tokyo", "parent": "010300"}
    }
}"#;

fn forecast_body(weather: &str, report: &str) -> serde_json::Value {
    serde_json::json!([{
        "publishingOffice": "JMA",
        "reportDatetime": report,
        "timeSeries": [
            {
                "timeDefines": ["2024-07-01T11:00:00+09:00", "2024-07-02T00:00:00+09:00"],
                "areas": [{
                    "area": {"name": "Kushiro", "code": "014100"},
                    "weathers": [weather, "Cloudy"],
                    "winds": ["West wind", "North wind"],
                    "waves": ["1.5m", "1m"]
                }]
            },
            {
                "timeDefines": ["2024-07-01T09:00:00+09:00", "2024-07-02T00:00:00+09:00"],
                "areas": [{"area": {"name": "Kushiro", "code": "47418"}, "temps": ["21", "14"]}]
            }
        ]
    }])
}

fn config(dir: &std::path::Path, base_url: &str) -> Config {
    let areas_path = dir.join("areas.json");
    std::fs::write(&areas_path, AREAS).unwrap();
    Config {
        config_dir: dir.to_path_buf(),
        weather: WeatherConfig {
            base_url: base_url.to_string(),
            areas_path,
            database_path: dir.join("data").join("weather.db"),
            timeout_secs: 5,
            area_overrides: BTreeMap::from([("014030".to_string(), "014100".to_string())]),
        },
        calculator: CalculatorConfig::default(),
    }
}

#[tokio::test]
async fn fetch_store_and_query_history() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/014100.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body("Sunny", "2024-07-01T05:00:00+09:00")),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/014100.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body("Fog", "2024-07-01T11:00:00+09:00")),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = App::from_config(config(dir.path(), &mock_server.uri())).unwrap();
    app.initialize().unwrap();

    let groups = app.forecasts().groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups.get("010100").unwrap().offices.len(), 2);

    // Tokachi is fetched from Kushiro but recorded under its own code
    assert!(app.forecasts().refresh("014030").await.unwrap());
    assert!(app.forecasts().refresh("014030").await.unwrap());

    let current = app.forecasts().current().unwrap();
    assert_eq!(current.fetched_code, "014100");
    let summary = app.forecasts().summary().unwrap();
    assert_eq!(summary.areas[0].weather.as_deref(), Some("Fog"));

    let history = app
        .forecasts()
        .history("014030", NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        .unwrap();
    let weathers: Vec<_> = history.iter().filter_map(|r| r.weather.as_deref()).collect();
    assert_eq!(weathers, ["Fog", "Sunny"]);
    assert!(history.iter().all(|r| r.area_code == "014030"));

    assert!(app
        .forecasts()
        .history("014100", NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn server_error_is_reported_and_previous_forecast_kept() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/130000.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body("Rain", "2024-07-01T05:00:00+09:00")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/014100.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = App::from_config(config(dir.path(), &mock_server.uri())).unwrap();

    app.forecasts().refresh("130000").await.unwrap();
    let err = app.forecasts().refresh("014100").await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Network(NetworkError::ServerError { status: 503, .. })
    ));
    assert!(app.forecasts().last_error().unwrap().contains("503"));
    assert_eq!(app.forecasts().current().unwrap().requested_code, "130000");
    assert!(!app.forecasts().is_busy());
}

#[test]
fn calculator_uses_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), "https://www.jma.go.jp/bosai/forecast/data/forecast");
    cfg.calculator.show_memory_indicator = false;

    let mut app = App::from_config(cfg).unwrap();
    let calc = app.calculator();
    assert_eq!(calc.run(["5", "!", "M+"]).unwrap(), "120");
    assert_eq!(calc.memory_label(), None);
    assert!(dir.path().join("data").join("weather.db").exists());
}
