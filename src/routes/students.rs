use crate::{
    data::{DataType, student::Student},
    error::{MissingStudentSnafu, RosterResult},
    schema::{StudentInput, StudentOutput},
    state::RosterState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use snafu::OptionExt;

pub async fn post_student(
    State(state): State<RosterState>,
    input: StudentInput,
) -> RosterResult<(StatusCode, Json<StudentOutput>)> {
    let mut conn = state.get_connection().await?;
    let student = Student::insert_into_database(input.into_new_student(), &mut conn).await?;
    info!(id = student.id, "Created student");

    Ok((StatusCode::CREATED, Json(student.into())))
}

pub async fn get_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
) -> RosterResult<Json<StudentOutput>> {
    let mut conn = state.get_connection().await?;
    debug!(id, "Looking up student");

    let student = Student::get_from_db_by_id(id, &mut conn)
        .await?
        .context(MissingStudentSnafu { id })?;
    Ok(Json(student.into()))
}

pub async fn get_students(State(state): State<RosterState>) -> RosterResult<Json<Vec<StudentOutput>>> {
    let mut conn = state.get_connection().await?;

    let students = Student::get_all(&mut conn).await?;
    debug!(count = students.len(), "Listing students");

    Ok(Json(students.into_iter().map(Into::into).collect()))
}

pub async fn put_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
    input: StudentInput,
) -> RosterResult<Json<StudentOutput>> {
    let mut conn = state.get_connection().await?;

    let mut student = Student::get_from_db_by_id(id, &mut conn)
        .await?
        .context(MissingStudentSnafu { id })?;
    student.overwrite(input.into_new_student());
    student.update_in_database(&mut conn).await?;
    info!(id, "Updated student");

    Ok(Json(student.into()))
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
) -> RosterResult<Json<Value>> {
    let mut conn = state.get_connection().await?;

    Student::get_from_db_by_id(id, &mut conn)
        .await?
        .context(MissingStudentSnafu { id })?;
    Student::remove_from_database(id, &mut conn).await?;
    info!(id, "Deleted student");

    Ok(Json(json!({ "message": format!("Student {id} deleted") })))
}
