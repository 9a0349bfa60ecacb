use crate::error::{AppError, Result};
use crate::extract::ClientAddress;
use crate::model::{CreateSetForm, CreatedSetResponse, ResolvedVideoResponse, ValidationFailedResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use fiftyfifty_core::{Member, MemberChoice};
use fiftyfifty_service::ServiceError;

pub async fn create_set_handler(
    State(state): State<AppState>,
    ClientAddress(creator_address): ClientAddress,
    Form(form): Form<CreateSetForm>,
) -> Result<Response> {
    match state
        .sets()
        .create(form.clone().into_new_set(creator_address))
        .await
    {
        Ok(created) => Ok((
            StatusCode::CREATED,
            Json(CreatedSetResponse::from(created)),
        )
            .into_response()),
        Err(ServiceError::Validation(errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationFailedResponse::new(&errors, form)),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn random_member_handler(
    State(state): State<AppState>,
    Path(set_ref): Path<String>,
) -> Result<Json<ResolvedVideoResponse>> {
    resolve(&state, &set_ref, MemberChoice::Random).await
}

pub async fn member_handler(
    State(state): State<AppState>,
    Path((set_ref, member)): Path<(String, String)>,
) -> Result<Json<ResolvedVideoResponse>> {
    let member = Member::from_selector(&member).ok_or(AppError::NotFound)?;
    resolve(&state, &set_ref, member.into()).await
}

async fn resolve(
    state: &AppState,
    set_ref: &str,
    choice: MemberChoice,
) -> Result<Json<ResolvedVideoResponse>> {
    let raw_id = set_ref.strip_prefix('~').ok_or(AppError::NotFound)?;
    let video = state
        .sets()
        .resolve_raw(raw_id, choice)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(video.into()))
}
