//! Persistence seam. All reads and writes the importer, the assistant tools,
//! and the read endpoints perform go through the `TalentStore` trait so the
//! core stays testable against an in-memory implementation.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Candidate, Company, CompanySummary, Contact, JobWithCompany, NewCandidate, NewCompany,
    NewContact, PipelineStats,
};

pub mod pg;

#[cfg(test)]
pub mod memory;

/// Filter for candidate search. Text filters are case-insensitive substring
/// matches; `query` fans out over name, title, skills, and summary.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    pub query: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub limit: i64,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            query: None,
            location: None,
            status: None,
            limit: 5,
        }
    }
}

/// Filter for job search. Only OPEN jobs are returned.
#[derive(Debug, Clone)]
pub struct JobFilter {
    pub query: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub remote: Option<bool>,
    pub limit: i64,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            query: None,
            location: None,
            job_type: None,
            remote: None,
            limit: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompanyFilter {
    pub query: Option<String>,
    pub location: Option<String>,
    pub limit: i64,
}

impl Default for CompanyFilter {
    fn default() -> Self {
        Self {
            query: None,
            location: None,
            limit: 5,
        }
    }
}

/// The persistence collaborator. Consistency guarantees (unique email on
/// candidates, foreign keys) belong to the implementation.
#[async_trait]
pub trait TalentStore: Send + Sync {
    async fn find_candidate_by_email(&self, email: &str) -> Result<Option<Candidate>>;
    async fn create_candidate(&self, new: &NewCandidate) -> Result<Candidate>;
    async fn create_company(&self, new: &NewCompany) -> Result<Company>;
    async fn create_contact(&self, new: &NewContact) -> Result<Contact>;

    async fn search_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>>;
    async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobWithCompany>>;
    async fn search_companies(&self, filter: &CompanyFilter) -> Result<Vec<CompanySummary>>;

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>>;
    async fn get_job(&self, id: Uuid) -> Result<Option<JobWithCompany>>;

    async fn pipeline_stats(&self) -> Result<PipelineStats>;
}
