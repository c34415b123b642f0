//! In-memory `TalentStore` used by the importer, tool, and orchestrator tests.
//! Mirrors the Postgres implementation's search semantics, including the
//! unique-email constraint on candidates.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    Candidate, Company, CompanySummary, Contact, JobWithCompany, NewCandidate, NewCompany,
    NewContact, PipelineStats,
};
use crate::store::{CandidateFilter, CompanyFilter, JobFilter, TalentStore};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    candidates: Vec<Candidate>,
    companies: Vec<Company>,
    contacts: Vec<Contact>,
    jobs: Vec<JobWithCompany>,
    placements: i64,
    recent_placements: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_job(&self, job: JobWithCompany) {
        self.inner.lock().unwrap().jobs.push(job);
    }

    pub fn seed_placements(&self, total: i64, recent: i64) {
        let mut inner = self.inner.lock().unwrap();
        inner.placements = total;
        inner.recent_placements = recent;
    }

    pub fn candidate_count(&self) -> usize {
        self.inner.lock().unwrap().candidates.len()
    }

    pub fn contact_count(&self) -> usize {
        self.inner.lock().unwrap().contacts.len()
    }
}

fn contains_ci(haystack: &Option<String>, needle: &str) -> bool {
    haystack
        .as_deref()
        .is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

#[async_trait]
impl TalentStore for MemoryStore {
    async fn find_candidate_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.candidates.iter().find(|c| c.email == email).cloned())
    }

    async fn create_candidate(&self, new: &NewCandidate) -> Result<Candidate> {
        let mut inner = self.inner.lock().unwrap();
        if inner.candidates.iter().any(|c| c.email == new.email) {
            bail!("duplicate key value violates unique constraint \"candidates_email_key\"");
        }
        let now = Utc::now();
        let candidate = Candidate {
            id: Uuid::new_v4(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            location: new.location.clone(),
            current_title: new.current_title.clone(),
            current_company: new.current_company.clone(),
            years_experience: new.years_experience,
            skills: new.skills.clone(),
            linkedin_url: new.linkedin_url.clone(),
            resume_url: new.resume_url.clone(),
            status: new.status.clone(),
            source: new.source.clone(),
            desired_salary: new.desired_salary.clone(),
            desired_role: new.desired_role.clone(),
            availability: new.availability.clone(),
            summary: None,
            created_at: now,
            updated_at: now,
        };
        inner.candidates.push(candidate.clone());
        Ok(candidate)
    }

    async fn create_company(&self, new: &NewCompany) -> Result<Company> {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            industry: new.industry.clone(),
            website: new.website.clone(),
            size: new.size.clone(),
            location: new.location.clone(),
            description: new.description.clone(),
            status: new.status.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.companies.push(company.clone());
        Ok(company)
    }

    async fn create_contact(&self, new: &NewContact) -> Result<Contact> {
        let mut inner = self.inner.lock().unwrap();
        let contact = Contact {
            id: Uuid::new_v4(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            title: new.title.clone(),
            is_primary: new.is_primary,
            company_id: new.company_id,
        };
        inner.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn search_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>> {
        let inner = self.inner.lock().unwrap();
        let mut hits: Vec<Candidate> = inner
            .candidates
            .iter()
            .filter(|c| {
                filter.query.as_deref().map_or(true, |q| {
                    let q = q.to_lowercase();
                    c.first_name.to_lowercase().contains(&q)
                        || c.last_name.to_lowercase().contains(&q)
                        || contains_ci(&c.current_title, &q)
                        || contains_ci(&c.skills, &q)
                        || contains_ci(&c.summary, &q)
                })
            })
            .filter(|c| {
                filter
                    .location
                    .as_deref()
                    .map_or(true, |l| contains_ci(&c.location, l))
            })
            .filter(|c| filter.status.as_deref().map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        hits.truncate(filter.limit as usize);
        Ok(hits)
    }

    async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobWithCompany>> {
        let inner = self.inner.lock().unwrap();
        let mut hits: Vec<JobWithCompany> = inner
            .jobs
            .iter()
            .filter(|j| j.status == "OPEN")
            .filter(|j| {
                filter.query.as_deref().map_or(true, |q| {
                    let q = q.to_lowercase();
                    j.title.to_lowercase().contains(&q)
                        || contains_ci(&j.description, &q)
                        || contains_ci(&j.requirements, &q)
                })
            })
            .filter(|j| {
                filter
                    .location
                    .as_deref()
                    .map_or(true, |l| contains_ci(&j.location, l))
            })
            .filter(|j| {
                filter
                    .job_type
                    .as_deref()
                    .map_or(true, |t| j.job_type.as_deref() == Some(t))
            })
            .filter(|j| filter.remote.map_or(true, |r| j.remote == r))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        hits.truncate(filter.limit as usize);
        Ok(hits)
    }

    async fn search_companies(&self, filter: &CompanyFilter) -> Result<Vec<CompanySummary>> {
        let inner = self.inner.lock().unwrap();
        let mut hits: Vec<CompanySummary> = inner
            .companies
            .iter()
            .filter(|c| {
                filter.query.as_deref().map_or(true, |q| {
                    let q = q.to_lowercase();
                    c.name.to_lowercase().contains(&q)
                        || contains_ci(&c.industry, &q)
                        || contains_ci(&c.description, &q)
                })
            })
            .filter(|c| {
                filter
                    .location
                    .as_deref()
                    .map_or(true, |l| contains_ci(&c.location, l))
            })
            .map(|c| CompanySummary {
                id: c.id,
                name: c.name.clone(),
                industry: c.industry.clone(),
                website: c.website.clone(),
                size: c.size.clone(),
                location: c.location.clone(),
                description: c.description.clone(),
                status: c.status.clone(),
                open_jobs: inner
                    .jobs
                    .iter()
                    .filter(|j| j.company_id == c.id && j.status == "OPEN")
                    .count() as i64,
                updated_at: c.updated_at,
            })
            .collect();
        hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        hits.truncate(filter.limit as usize);
        Ok(hits)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobWithCompany>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn pipeline_stats(&self) -> Result<PipelineStats> {
        let inner = self.inner.lock().unwrap();
        Ok(PipelineStats::with_summary(
            inner.candidates.len() as i64,
            inner
                .candidates
                .iter()
                .filter(|c| c.status == "ACTIVE")
                .count() as i64,
            inner.companies.len() as i64,
            inner.jobs.iter().filter(|j| j.status == "OPEN").count() as i64,
            inner.placements,
            inner.recent_placements,
        ))
    }
}
