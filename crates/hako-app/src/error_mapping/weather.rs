use hako_core::error::{ReqwestErrorExt, RusqliteErrorExt};
use hako_core::{AppError, NetworkError, ParseError, ResourceError};
use hako_weather::WeatherError;

use super::IntoAppError;

impl IntoAppError for WeatherError {
    fn into_app_error(self) -> AppError {
        match self {
            WeatherError::Network(e) => AppError::Network(e.into_network_error()),
            WeatherError::Status { status, url } => AppError::Network(NetworkError::ServerError {
                status,
                message: url,
            }),
            WeatherError::MalformedJson(e) => AppError::Parse(ParseError::MalformedJson(e.to_string())),
            WeatherError::EmptyPayload => AppError::Parse(ParseError::EmptyPayload),
            WeatherError::UnexpectedShape(s) => AppError::Parse(ParseError::UnexpectedShape(s)),
            WeatherError::Parse(s) => AppError::Parse(ParseError::InvalidValue(s)),
            WeatherError::DatasetNotFound(path) => {
                AppError::Resource(ResourceError::NotFound(path.display().to_string()))
            }
            WeatherError::DatasetMalformed(message) => AppError::Resource(ResourceError::Malformed {
                path: "areas.json".to_string(),
                message,
            }),
            WeatherError::Io(e) => AppError::Io(e),
            WeatherError::Store(e) => AppError::Database(e.into_database_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn status_maps_to_server_error() {
        let err = WeatherError::Status {
            status: 503,
            url: "http://x/130000.json".into(),
        }
        .into_app_error();
        assert!(matches!(
            err,
            AppError::Network(NetworkError::ServerError { status: 503, .. })
        ));
    }

    #[test]
    fn payload_errors_map_to_parse() {
        assert!(matches!(
            WeatherError::EmptyPayload.into_app_error(),
            AppError::Parse(ParseError::EmptyPayload)
        ));
        assert!(matches!(
            WeatherError::Parse("pop".into()).into_app_error(),
            AppError::Parse(ParseError::InvalidValue(_))
        ));
    }

    #[test]
    fn missing_dataset_maps_to_resource() {
        let err = WeatherError::DatasetNotFound(PathBuf::from("/data/areas.json")).into_app_error();
        assert!(matches!(err, AppError::Resource(ResourceError::NotFound(ref p)) if p == "/data/areas.json"));
    }
}
