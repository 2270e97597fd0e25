use crate::schema::FieldError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to read request body"))]
    ReadBody { source: BytesRejection },
    #[snafu(display("Request body is not valid JSON: {}", source))]
    ParseJson { source: serde_json::Error },
    #[snafu(display("Invalid student: {}", fields.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")))]
    InvalidStudent { fields: Vec<FieldError> },
    #[snafu(display("Student not found"))]
    MissingStudent { id: i64 },
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::UNPROCESSABLE_ENTITY; //bad input

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::MakeQuery { source } => match source {
                sqlx::Error::RowNotFound => NF,
                _ => ISE,
            },
            Self::BadEnvVar { .. } | Self::ParseNumber { .. } => ISE,
            Self::ReadBody { source } => source.status(),
            Self::ParseJson { .. } => BI,
            Self::InvalidStudent { .. } => BI,
            Self::MissingStudent { .. } => NF,
        };

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, %status_code, "Rejected request");
        }

        let body = match self {
            Self::InvalidStudent { fields } => json!({ "detail": fields }),
            other => json!({ "detail": other.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}
