use axum::Json;
use axum::extract::{Path, State};
use http::StatusCode;
use serde::Deserialize;
use tally_core::{Failure, FieldFailure};

use crate::boundary::HandlerResult;
use crate::state::AppState;
use crate::store::User;

/// Signup payload
///
/// Fields are optional at the wire level so that missing values surface as
/// field-level validation messages instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    age: Option<i64>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> HandlerResult<(StatusCode, Json<User>)> {
    let user = validate(input)?;
    state.store.insert(user.clone())?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(State(state): State<AppState>, Path(email): Path<String>) -> HandlerResult<Json<User>> {
    let key = tally_cache::hashed_key(&email);

    if let Some(ref cache) = state.cache {
        match cache.get::<User>(&key).await {
            Ok(Some(user)) => return Ok(Json(user)),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "cache read failed"),
        }
    }

    let user = state.store.find(&email)?;

    if let Some(ref cache) = state.cache
        && let Err(e) = cache.put(&key, &user, None).await
    {
        tracing::warn!(error = %e, "cache write failed");
    }

    Ok(Json(user))
}

/// Check the payload field by field, in declaration order
fn validate(input: CreateUser) -> Result<User, Failure> {
    let mut fields = Vec::new();

    let email = input.email.unwrap_or_default();
    if email.is_empty() {
        fields.push(FieldFailure::for_field("email", "email is required"));
    } else if !email.contains('@') {
        fields.push(FieldFailure::for_field("email", "email must contain '@'"));
    }

    if let Some(age) = input.age
        && age <= 0
    {
        fields.push(FieldFailure::for_field("age", "age must be positive"));
    }

    if !fields.is_empty() {
        return Err(Failure::validation(fields));
    }

    Ok(User {
        email,
        age: input.age,
    })
}
