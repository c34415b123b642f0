use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job opening joined with the owning company's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobWithCompany {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub remote: bool,
    pub status: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub company_id: Uuid,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobWithCompany {
    /// "$90,000 - $120,000" when both bounds are present, otherwise None.
    pub fn salary_range(&self) -> Option<String> {
        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) => {
                Some(format!("${} - ${}", thousands(min), thousands(max)))
            }
            _ => None,
        }
    }
}

fn thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Snapshot counts over the recruiting pipeline, served by the stats endpoint
/// and the `get_pipeline_stats` assistant tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub total_candidates: i64,
    pub active_candidates: i64,
    pub total_companies: i64,
    pub open_jobs: i64,
    pub total_placements: i64,
    pub recent_placements: i64,
    pub summary: String,
}

impl PipelineStats {
    pub fn with_summary(
        total_candidates: i64,
        active_candidates: i64,
        total_companies: i64,
        open_jobs: i64,
        total_placements: i64,
        recent_placements: i64,
    ) -> Self {
        let summary = format!(
            "You have {total_candidates} total candidates ({active_candidates} actively looking), \
             {total_companies} companies, {open_jobs} open positions, and {total_placements} \
             placements ({recent_placements} in the last 30 days)."
        );
        Self {
            total_candidates,
            active_candidates,
            total_companies,
            open_jobs,
            total_placements,
            recent_placements,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(min: Option<i64>, max: Option<i64>) -> JobWithCompany {
        JobWithCompany {
            id: Uuid::new_v4(),
            title: "Engineer".into(),
            description: None,
            requirements: None,
            location: None,
            job_type: None,
            remote: false,
            status: "OPEN".into(),
            salary_min: min,
            salary_max: max,
            company_id: Uuid::new_v4(),
            company_name: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_salary_range_both_bounds() {
        assert_eq!(
            job(Some(90_000), Some(120_000)).salary_range().as_deref(),
            Some("$90,000 - $120,000")
        );
    }

    #[test]
    fn test_salary_range_missing_bound() {
        assert_eq!(job(Some(90_000), None).salary_range(), None);
        assert_eq!(job(None, None).salary_range(), None);
    }

    #[test]
    fn test_stats_summary_sentence() {
        let stats = PipelineStats::with_summary(10, 4, 3, 2, 5, 1);
        assert!(stats.summary.contains("10 total candidates"));
        assert!(stats.summary.contains("(1 in the last 30 days)"));
    }
}
