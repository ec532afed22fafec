use crate::emissions::{catalog, round2};
use crate::errors::{AppError, TrackerError};
use crate::models::{
    ActivityInput, ActivityListQuery, ActivityView, CategoryEntry,
    DashboardResponse, LoginRequest, PasswordStrengthRequest, PasswordStrengthResponse,
    SessionResponse, SessionUser, SignupRequest, SignupResponse, TipsResponse, TodayResponse,
    UserResponse,
};
use crate::state::AppState;
use crate::stats::{activities_on, aggregate_by_day, build_dashboard, top_categories};
use crate::tips::{personalized_tips, total_potential_impact};
use crate::validation::{password_strength, validate_login, validate_signup};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, Utc};

const TIP_FOCUS: usize = 2;

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    validate_signup(&payload)?;

    let user = state
        .mutate(|tracker| {
            tracker
                .signup(&payload.name, &payload.email, &payload.password, Utc::now())
                .map(UserResponse::from)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful!".to_string(),
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionUser>, AppError> {
    validate_login(&payload)?;

    let session = state
        .mutate(|tracker| tracker.login(&payload.email, &payload.password))
        .await?;

    Ok(Json(session))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .mutate(|tracker| {
            tracker.logout();
            Ok(())
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let tracker = state.tracker.lock().await;
    Json(SessionResponse {
        user: tracker.session(),
    })
}

pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityListQuery>,
) -> Result<Json<Vec<ActivityView>>, AppError> {
    let tracker = state.tracker.lock().await;
    let activities = tracker.list_activities(query.order)?;
    let limit = query.limit.unwrap_or(activities.len());

    Ok(Json(
        activities
            .into_iter()
            .take(limit)
            .map(ActivityView::from)
            .collect(),
    ))
}

pub async fn add_activity(
    State(state): State<AppState>,
    Json(payload): Json<ActivityInput>,
) -> Result<(StatusCode, Json<ActivityView>), AppError> {
    let activity = state
        .mutate(|tracker| tracker.add_activity(&payload, Utc::now()))
        .await?;

    Ok((StatusCode::CREATED, Json(ActivityView::from(&activity))))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let today = Local::now().date_naive();
    let tracker = state.tracker.lock().await;
    let user = tracker.current_user().ok_or(TrackerError::NotLoggedIn)?;

    let todays = activities_on(&user.activities, today);
    Ok(Json(TodayResponse {
        date: today.to_string(),
        activity_count: todays.len(),
        total_co2_kg: round2(aggregate_by_day(&user.activities, today)),
        activities: todays.into_iter().rev().map(ActivityView::from).collect(),
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    let user = tracker.current_user().ok_or(TrackerError::NotLoggedIn)?;
    Ok(Json(build_dashboard(&SessionUser::from(user), &user.activities)))
}

/// Tips are public; a logged-in user gets them ordered by their heaviest
/// categories.
pub async fn get_tips(State(state): State<AppState>) -> Json<TipsResponse> {
    let tracker = state.tracker.lock().await;
    let focus = tracker
        .current_user()
        .map(|user| top_categories(&user.activities, TIP_FOCUS))
        .unwrap_or_default();

    Json(TipsResponse {
        tips: personalized_tips(&focus),
        focus,
        total_potential_kg: round2(total_potential_impact()),
    })
}

pub async fn get_factors() -> Json<Vec<CategoryEntry>> {
    Json(catalog())
}

pub async fn check_password(
    Json(payload): Json<PasswordStrengthRequest>,
) -> Json<PasswordStrengthResponse> {
    Json(password_strength(&payload.password))
}

