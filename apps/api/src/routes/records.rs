//! Thin read endpoints over the store's search operations. These reuse the
//! same filters the assistant tools drive.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Candidate, CompanySummary, JobWithCompany, PipelineStats};
use crate::state::AppState;
use crate::store::{CandidateFilter, CompanyFilter, JobFilter};

const DEFAULT_PAGE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub query: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/candidates
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidateQuery>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let filter = CandidateFilter {
        query: params.query,
        location: params.location,
        status: params.status,
        limit: params.limit.unwrap_or(DEFAULT_PAGE),
    };
    let candidates = state.store.search_candidates(&filter).await?;
    Ok(Json(candidates))
}

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub query: Option<String>,
    pub location: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/companies
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<CompanyQuery>,
) -> Result<Json<Vec<CompanySummary>>, AppError> {
    let filter = CompanyFilter {
        query: params.query,
        location: params.location,
        limit: params.limit.unwrap_or(DEFAULT_PAGE),
    };
    let companies = state.store.search_companies(&filter).await?;
    Ok(Json(companies))
}

#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub query: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub remote: Option<bool>,
    pub limit: Option<i64>,
}

/// GET /api/jobs — open jobs only.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobQuery>,
) -> Result<Json<Vec<JobWithCompany>>, AppError> {
    let filter = JobFilter {
        query: params.query,
        location: params.location,
        job_type: params.job_type,
        remote: params.remote,
        limit: params.limit.unwrap_or(DEFAULT_PAGE),
    };
    let jobs = state.store.search_jobs(&filter).await?;
    Ok(Json(jobs))
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<PipelineStats>, AppError> {
    let stats = state.store.pipeline_stats().await?;
    Ok(Json(stats))
}
