use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::{CreateEmployeeInput, DirectoryError, Employee, Result};
use crate::service::EmployeeService;

#[derive(Clone)]
pub struct AppState {
    pub service: EmployeeService,
}

impl AppState {
    pub fn new(service: EmployeeService) -> Self {
        Self { service }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ServerError(_) | Self::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/employee", get(list_employees).post(create_employee))
        .route("/api/v1/employee/search/:fragment", get(search_employees))
        .route("/api/v1/employee/highestSalary", get(highest_salary))
        .route(
            "/api/v1/employee/topTenHighestEarningEmployeeNames",
            get(top_ten_names),
        )
        .route(
            "/api/v1/employee/:id",
            get(get_employee).delete(delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>> {
    Ok(Json(state.service.list_all().await?))
}

async fn search_employees(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
) -> Result<Json<Vec<Employee>>> {
    Ok(Json(state.service.search_by_name(&fragment).await?))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>> {
    Ok(Json(state.service.get_by_id(id).await?))
}

async fn highest_salary(State(state): State<AppState>) -> Result<Json<Option<u32>>> {
    Ok(Json(state.service.highest_salary().await?))
}

async fn top_ten_names(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.service.top_ten_names().await?))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeInput>,
) -> Result<(StatusCode, Json<Employee>)> {
    validate_create_input(&payload)?;

    let employee = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<String>> {
    Ok(Json(state.service.delete(id).await?))
}

fn validate_create_input(input: &CreateEmployeeInput) -> Result<()> {
    ensure_not_blank("name", &input.name)?;
    ensure_not_blank("title", &input.title)?;
    ensure_positive("salary", input.salary)?;
    ensure_positive("age", input.age)?;
    Ok(())
}

fn ensure_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::BadRequest(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}

fn ensure_positive(field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(DirectoryError::BadRequest(format!(
            "{field} must be positive"
        )));
    }
    Ok(())
}
