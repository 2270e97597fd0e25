use crate::{
    data::student::{NewStudent, Student},
    error::{InvalidStudentSnafu, ReadBodySnafu, RosterError, RosterResult},
};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::Serialize;
use serde_json::{Map, Value};
use snafu::ResultExt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOutput {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

///an empty `field` means the whole body was wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let loc: &[&str] = if self.field.is_empty() {
            &["body"]
        } else {
            &["body", self.field]
        };

        let mut s = serializer.serialize_struct("FieldError", 2)?;
        s.serialize_field("loc", loc)?;
        s.serialize_field("msg", self.message)?;
        s.end()
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            write!(f, "body {}", self.message)
        } else {
            write!(f, "`{}` {}", self.field, self.message)
        }
    }
}

impl StudentInput {
    ///reports every bad field at once, unknown fields are ignored
    pub fn parse(raw: &[u8]) -> RosterResult<Self> {
        let Ok(value) = serde_json::from_slice::<Value>(raw) else {
            return InvalidStudentSnafu {
                fields: vec![FieldError {
                    field: "",
                    message: "must be valid JSON",
                }],
            }
            .fail();
        };

        let Value::Object(object) = value else {
            return InvalidStudentSnafu {
                fields: vec![FieldError {
                    field: "",
                    message: "must be a JSON object",
                }],
            }
            .fail();
        };

        let mut fields = vec![];
        let first_name = string_field(&object, "firstName", &mut fields);
        let last_name = string_field(&object, "lastName", &mut fields);
        let age = integer_field(&object, "age", &mut fields);

        match (first_name, last_name, age) {
            (Some(first_name), Some(last_name), Some(age)) => Ok(Self {
                first_name,
                last_name,
                age,
            }),
            _ => InvalidStudentSnafu { fields }.fail(),
        }
    }

    pub fn into_new_student(self) -> NewStudent {
        let Self {
            first_name,
            last_name,
            age,
        } = self;

        NewStudent {
            first_name,
            last_name,
            age,
        }
    }
}

fn string_field(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError {
                field,
                message: "must be a string",
            });
            None
        }
        None => {
            errors.push(FieldError {
                field,
                message: "is required",
            });
            None
        }
    }
}

fn integer_field(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    match object.get(field) {
        Some(value) => {
            let coerced = coerce_integer(value);
            if coerced.is_none() {
                errors.push(FieldError {
                    field,
                    message: "must be an integer",
                });
            }
            coerced
        }
        None => {
            errors.push(FieldError {
                field,
                message: "is required",
            });
            None
        }
    }
}

///integral floats and numeric strings count too
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let float = n.as_f64()?;
            let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
            (float.fract() == 0.0 && in_range).then_some(float as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl<S: Send + Sync> FromRequest<S> for StudentInput {
    type Rejection = RosterError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .context(ReadBodySnafu)?;
        Self::parse(&body)
    }
}

impl From<Student> for StudentOutput {
    fn from(student: Student) -> Self {
        let Student {
            id,
            first_name,
            last_name,
            age,
        } = student;

        Self {
            id,
            first_name,
            last_name,
            age,
        }
    }
}
