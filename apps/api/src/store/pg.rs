use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    Candidate, Company, CompanySummary, Contact, JobWithCompany, NewCandidate, NewCompany,
    NewContact, PipelineStats,
};
use crate::store::{CandidateFilter, CompanyFilter, JobFilter, TalentStore};

/// PostgreSQL-backed store. Optional filters use the `($n IS NULL OR ...)`
/// pattern so every search runs as a single prepared statement.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const JOB_SELECT: &str = r#"
    SELECT j.id, j.title, j.description, j.requirements, j.location, j.job_type,
           j.remote, j.status, j.salary_min, j.salary_max, j.company_id,
           c.name AS company_name, j.created_at
    FROM jobs j
    LEFT JOIN companies c ON c.id = j.company_id
"#;

#[async_trait]
impl TalentStore for PgStore {
    async fn find_candidate_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as("SELECT * FROM candidates WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(candidate)
    }

    async fn create_candidate(&self, new: &NewCandidate) -> Result<Candidate> {
        let candidate = sqlx::query_as(
            r#"
            INSERT INTO candidates
                (first_name, last_name, email, phone, location, current_title,
                 current_company, years_experience, skills, linkedin_url, resume_url,
                 status, source, desired_salary, desired_role, availability)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.location)
        .bind(&new.current_title)
        .bind(&new.current_company)
        .bind(new.years_experience)
        .bind(&new.skills)
        .bind(&new.linkedin_url)
        .bind(&new.resume_url)
        .bind(&new.status)
        .bind(&new.source)
        .bind(&new.desired_salary)
        .bind(&new.desired_role)
        .bind(&new.availability)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn create_company(&self, new: &NewCompany) -> Result<Company> {
        let company = sqlx::query_as(
            r#"
            INSERT INTO companies (name, industry, website, size, location, description, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.industry)
        .bind(&new.website)
        .bind(&new.size)
        .bind(&new.location)
        .bind(&new.description)
        .bind(&new.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    async fn create_contact(&self, new: &NewContact) -> Result<Contact> {
        let contact = sqlx::query_as(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone, title, is_primary, company_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.title)
        .bind(new.is_primary)
        .bind(new.company_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(contact)
    }

    async fn search_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as(
            r#"
            SELECT * FROM candidates
            WHERE ($1::text IS NULL
                   OR first_name ILIKE '%' || $1 || '%'
                   OR last_name ILIKE '%' || $1 || '%'
                   OR current_title ILIKE '%' || $1 || '%'
                   OR skills ILIKE '%' || $1 || '%'
                   OR summary ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR location ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR status = $3)
            ORDER BY updated_at DESC
            LIMIT $4
            "#,
        )
        .bind(&filter.query)
        .bind(&filter.location)
        .bind(&filter.status)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobWithCompany>> {
        let sql = format!(
            r#"
            {JOB_SELECT}
            WHERE j.status = 'OPEN'
              AND ($1::text IS NULL
                   OR j.title ILIKE '%' || $1 || '%'
                   OR j.description ILIKE '%' || $1 || '%'
                   OR j.requirements ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR j.location ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR j.job_type = $3)
              AND ($4::boolean IS NULL OR j.remote = $4)
            ORDER BY j.created_at DESC
            LIMIT $5
            "#
        );
        let jobs = sqlx::query_as(&sql)
            .bind(&filter.query)
            .bind(&filter.location)
            .bind(&filter.job_type)
            .bind(filter.remote)
            .bind(filter.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn search_companies(&self, filter: &CompanyFilter) -> Result<Vec<CompanySummary>> {
        let companies = sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.industry, c.website, c.size, c.location,
                   c.description, c.status, c.updated_at,
                   COUNT(j.id) FILTER (WHERE j.status = 'OPEN') AS open_jobs
            FROM companies c
            LEFT JOIN jobs j ON j.company_id = c.id
            WHERE ($1::text IS NULL
                   OR c.name ILIKE '%' || $1 || '%'
                   OR c.industry ILIKE '%' || $1 || '%'
                   OR c.description ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR c.location ILIKE '%' || $2 || '%')
            GROUP BY c.id
            ORDER BY c.updated_at DESC
            LIMIT $3
            "#,
        )
        .bind(&filter.query)
        .bind(&filter.location)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(companies)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(candidate)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobWithCompany>> {
        let sql = format!("{JOB_SELECT} WHERE j.id = $1");
        let job = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn pipeline_stats(&self) -> Result<PipelineStats> {
        let total_candidates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;
        let active_candidates: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM candidates WHERE status = 'ACTIVE'")
                .fetch_one(&self.pool)
                .await?;
        let total_companies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await?;
        let open_jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = 'OPEN'")
            .fetch_one(&self.pool)
            .await?;
        let total_placements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM placements")
            .fetch_one(&self.pool)
            .await?;
        let recent_placements: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM placements WHERE created_at >= NOW() - INTERVAL '30 days'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PipelineStats::with_summary(
            total_candidates,
            active_candidates,
            total_companies,
            open_jobs,
            total_placements,
            recent_placements,
        ))
    }
}
