//! Tool registry for the assistant. A closed set of tagged variants maps tool
//! names to typed handlers; arguments are validated by deserializing against
//! each tool's schema before the handler runs. Every tool is a read-only
//! function of its arguments — an unknown name or bad arguments yield an
//! error payload fed back to the model, never a failed request.

use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

use crate::llm_client::ToolDefinition;
use crate::store::{CandidateFilter, CompanyFilter, JobFilter, TalentStore};

/// Default result ceiling for search tools.
const DEFAULT_LIMIT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    SearchCandidates,
    SearchJobs,
    SearchCompanies,
    GetPipelineStats,
    MatchCandidateToJob,
    SearchExternalJobs,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::SearchCandidates,
        ToolKind::SearchJobs,
        ToolKind::SearchCompanies,
        ToolKind::GetPipelineStats,
        ToolKind::MatchCandidateToJob,
        ToolKind::SearchExternalJobs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SearchCandidates => "search_candidates",
            ToolKind::SearchJobs => "search_jobs",
            ToolKind::SearchCompanies => "search_companies",
            ToolKind::GetPipelineStats => "get_pipeline_stats",
            ToolKind::MatchCandidateToJob => "match_candidate_to_job",
            ToolKind::SearchExternalJobs => "search_external_jobs",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn declaration(self) -> ToolDefinition {
        let (description, input_schema) = match self {
            ToolKind::SearchCandidates => (
                "Search for candidates in the database by skills, title, location, experience level, or availability. Use this when the user wants to find candidates matching certain criteria.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Free text search query for candidate skills, title, or summary"
                        },
                        "location": {
                            "type": "string",
                            "description": "Location to filter candidates by (city, state, or country)"
                        },
                        "status": {
                            "type": "string",
                            "enum": ["ACTIVE", "PASSIVE", "NOT_LOOKING", "PLACED"],
                            "description": "Candidate availability status"
                        },
                        "limit": {
                            "type": "number",
                            "description": "Maximum number of results to return (default 5)"
                        }
                    },
                    "required": []
                }),
            ),
            ToolKind::SearchJobs => (
                "Search for job openings in the database by title, company, location, or job type.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Free text search for job title or description"
                        },
                        "location": {
                            "type": "string",
                            "description": "Job location filter"
                        },
                        "type": {
                            "type": "string",
                            "enum": ["FULL_TIME", "PART_TIME", "CONTRACT", "FREELANCE"],
                            "description": "Type of employment"
                        },
                        "remote": {
                            "type": "boolean",
                            "description": "Filter for remote jobs only"
                        },
                        "limit": {
                            "type": "number",
                            "description": "Maximum results to return"
                        }
                    },
                    "required": []
                }),
            ),
            ToolKind::SearchCompanies => (
                "Search for companies/clients in the database by name, industry, or location.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Company name or industry search"
                        },
                        "location": {
                            "type": "string",
                            "description": "Company location filter"
                        },
                        "limit": {
                            "type": "number",
                            "description": "Maximum results"
                        }
                    },
                    "required": []
                }),
            ),
            ToolKind::GetPipelineStats => (
                "Get recruiting pipeline statistics including total candidates, active jobs, placements, etc.",
                json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            ),
            ToolKind::MatchCandidateToJob => (
                "Analyze how well a specific candidate matches a job opening based on their skills and experience.",
                json!({
                    "type": "object",
                    "properties": {
                        "candidateId": {
                            "type": "string",
                            "description": "The candidate's ID"
                        },
                        "jobId": {
                            "type": "string",
                            "description": "The job's ID"
                        }
                    },
                    "required": ["candidateId", "jobId"]
                }),
            ),
            ToolKind::SearchExternalJobs => (
                "Search for job listings from external sources on the web. Use this when the user wants to find jobs outside of the A&A Top Talent database, or wants to find opportunities for their candidates.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Job search query (title, skills, industry)"
                        },
                        "location": {
                            "type": "string",
                            "description": "Preferred location for jobs"
                        },
                        "remote": {
                            "type": "boolean",
                            "description": "Search for remote opportunities"
                        }
                    },
                    "required": ["query"]
                }),
            ),
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// The full tool set declared to the model.
pub fn declarations() -> Vec<ToolDefinition> {
    ToolKind::ALL.into_iter().map(ToolKind::declaration).collect()
}

#[derive(Debug, Deserialize, Default)]
struct CandidateSearchArgs {
    query: Option<String>,
    location: Option<String>,
    status: Option<CandidateStatus>,
    limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum CandidateStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "PASSIVE")]
    Passive,
    #[serde(rename = "NOT_LOOKING")]
    NotLooking,
    #[serde(rename = "PLACED")]
    Placed,
}

impl CandidateStatus {
    fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Active => "ACTIVE",
            CandidateStatus::Passive => "PASSIVE",
            CandidateStatus::NotLooking => "NOT_LOOKING",
            CandidateStatus::Placed => "PLACED",
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct JobSearchArgs {
    query: Option<String>,
    location: Option<String>,
    #[serde(rename = "type")]
    job_type: Option<JobType>,
    remote: Option<bool>,
    limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum JobType {
    #[serde(rename = "FULL_TIME")]
    FullTime,
    #[serde(rename = "PART_TIME")]
    PartTime,
    #[serde(rename = "CONTRACT")]
    Contract,
    #[serde(rename = "FREELANCE")]
    Freelance,
}

impl JobType {
    fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Freelance => "FREELANCE",
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct CompanySearchArgs {
    query: Option<String>,
    location: Option<String>,
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchArgs {
    candidate_id: String,
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct ExternalSearchArgs {
    query: String,
    location: Option<String>,
    remote: Option<bool>,
}

/// Executes one requested tool. The returned value is always JSON-serializable
/// data; failures become `{ "error": ... }` payloads for the model to read.
pub async fn dispatch(store: &dyn TalentStore, name: &str, input: &Value) -> Value {
    let Some(kind) = ToolKind::from_name(name) else {
        return json!({ "error": format!("Unknown tool: {name}") });
    };

    let result = match kind {
        ToolKind::SearchCandidates => match parse_args::<CandidateSearchArgs>(name, input) {
            Ok(args) => search_candidates(store, args).await,
            Err(e) => return e,
        },
        ToolKind::SearchJobs => match parse_args::<JobSearchArgs>(name, input) {
            Ok(args) => search_jobs(store, args).await,
            Err(e) => return e,
        },
        ToolKind::SearchCompanies => match parse_args::<CompanySearchArgs>(name, input) {
            Ok(args) => search_companies(store, args).await,
            Err(e) => return e,
        },
        ToolKind::GetPipelineStats => get_pipeline_stats(store).await,
        ToolKind::MatchCandidateToJob => match parse_args::<MatchArgs>(name, input) {
            Ok(args) => match_candidate_to_job(store, args).await,
            Err(e) => return e,
        },
        ToolKind::SearchExternalJobs => match parse_args::<ExternalSearchArgs>(name, input) {
            Ok(args) => Ok(search_external_jobs(args)),
            Err(e) => return e,
        },
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Tool {name} failed: {e}");
            json!({ "error": e.to_string() })
        }
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(name: &str, input: &Value) -> Result<T, Value> {
    serde_json::from_value(input.clone())
        .map_err(|e| json!({ "error": format!("Invalid arguments for {name}: {e}") }))
}

async fn search_candidates(
    store: &dyn TalentStore,
    args: CandidateSearchArgs,
) -> anyhow::Result<Value> {
    let filter = CandidateFilter {
        query: args.query,
        location: args.location,
        status: args.status.map(|s| s.as_str().to_string()),
        limit: args.limit.unwrap_or(DEFAULT_LIMIT),
    };
    let candidates = store.search_candidates(&filter).await?;
    Ok(serde_json::to_value(candidates)?)
}

async fn search_jobs(store: &dyn TalentStore, args: JobSearchArgs) -> anyhow::Result<Value> {
    let filter = JobFilter {
        query: args.query,
        location: args.location,
        job_type: args.job_type.map(|t| t.as_str().to_string()),
        remote: args.remote,
        limit: args.limit.unwrap_or(DEFAULT_LIMIT),
    };
    let jobs = store.search_jobs(&filter).await?;
    Ok(serde_json::to_value(jobs)?)
}

async fn search_companies(
    store: &dyn TalentStore,
    args: CompanySearchArgs,
) -> anyhow::Result<Value> {
    let filter = CompanyFilter {
        query: args.query,
        location: args.location,
        limit: args.limit.unwrap_or(DEFAULT_LIMIT),
    };
    let companies = store.search_companies(&filter).await?;
    Ok(serde_json::to_value(companies)?)
}

async fn get_pipeline_stats(store: &dyn TalentStore) -> anyhow::Result<Value> {
    let stats = store.pipeline_stats().await?;
    Ok(serde_json::to_value(stats)?)
}

/// Two-id lookup producing a side-by-side comparison payload. A missing or
/// unparsable id is a "not found" data result, not a failure.
async fn match_candidate_to_job(store: &dyn TalentStore, args: MatchArgs) -> anyhow::Result<Value> {
    let not_found = json!({ "error": "Candidate or job not found" });

    let (Ok(candidate_id), Ok(job_id)) = (
        Uuid::parse_str(&args.candidate_id),
        Uuid::parse_str(&args.job_id),
    ) else {
        return Ok(not_found);
    };

    let (candidate, job) = tokio::join!(store.get_candidate(candidate_id), store.get_job(job_id));
    let (Some(candidate), Some(job)) = (candidate?, job?) else {
        return Ok(not_found);
    };

    Ok(json!({
        "candidate": {
            "name": format!("{} {}", candidate.first_name, candidate.last_name),
            "title": candidate.current_title,
            "skills": candidate.skills,
            "experience": candidate.years_experience,
            "location": candidate.location,
        },
        "job": {
            "title": job.title,
            "company": job.company_name,
            "requirements": job.requirements,
            "location": job.location,
            "salary": job.salary_range(),
        }
    }))
}

/// No data-store access: returns static guidance (links and tips) for
/// off-platform job search.
fn search_external_jobs(args: ExternalSearchArgs) -> Value {
    let remote = args.remote.unwrap_or(false);
    let location = args.location.as_deref().unwrap_or("");
    let combined_query = [args.query.as_str(), location, if remote { "remote" } else { "" }]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let mut suggestion = format!("To find \"{}\" jobs", args.query);
    if !location.is_empty() {
        suggestion.push_str(&format!(" in {location}"));
    }
    if remote {
        suggestion.push_str(" (remote)");
    }
    suggestion.push_str(", I recommend checking:");

    json!({
        "searchSuggestion": suggestion,
        "sources": [
            {
                "name": "LinkedIn Jobs",
                "url": search_url(
                    "https://www.linkedin.com/jobs/search/",
                    &[("keywords", combined_query.as_str())],
                ),
            },
            {
                "name": "Indeed",
                "url": search_url(
                    "https://www.indeed.com/jobs",
                    &[("q", args.query.as_str()), ("l", location)],
                ),
            },
            {
                "name": "Glassdoor",
                "url": search_url(
                    "https://www.glassdoor.com/Job/jobs.htm",
                    &[("sc.keyword", args.query.as_str())],
                ),
            },
        ],
        "tips": [
            "LinkedIn is great for professional/corporate roles",
            "Indeed has the largest volume of listings",
            "Glassdoor includes salary insights",
            "Check company career pages directly for the best opportunities"
        ]
    })
}

fn search_url(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.to_string(),
        Err(_) => base.to_string(),
    }
}
