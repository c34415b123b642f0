//! Bulk import driver. Rows are processed strictly in file order and one at a
//! time: each candidate row's duplicate check runs against already-committed
//! state, so ordering is a correctness requirement. A bad row is recorded and
//! skipped; the batch never aborts early and no transaction spans it.

use serde::Serialize;

use crate::import::csv::{ImportRow, ParsedCsv};
use crate::models::{NewCandidate, NewCompany, NewContact};
use crate::store::TalentStore;

/// Which record type a batch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Candidates,
    Companies,
}

/// Aggregate result of one import call. `imported <= total`; every rejected
/// row contributes exactly one error string naming its source line.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub total: usize,
    pub errors: Vec<String>,
}

pub async fn import_rows(
    store: &dyn TalentStore,
    kind: ImportKind,
    csv: &ParsedCsv,
) -> ImportOutcome {
    let mut errors: Vec<String> = csv
        .skipped
        .iter()
        .map(|s| {
            format!(
                "Row {}: Expected {} columns, found {}; row skipped",
                s.line, s.expected, s.found
            )
        })
        .collect();
    let mut imported = 0usize;

    for row in &csv.rows {
        let result = match kind {
            ImportKind::Candidates => import_candidate_row(store, row).await,
            ImportKind::Companies => import_company_row(store, row).await,
        };
        match result {
            Ok(()) => imported += 1,
            Err(reason) => errors.push(format!("Row {}: {reason}", row.line)),
        }
    }

    ImportOutcome {
        imported,
        total: csv.rows.len(),
        errors,
    }
}

async fn import_candidate_row(store: &dyn TalentStore, row: &ImportRow) -> Result<(), String> {
    let (Some(first_name), Some(last_name), Some(email)) = (
        row.get("firstName"),
        row.get("lastName"),
        row.get("email"),
    ) else {
        return Err("Missing required fields (firstName, lastName, email)".to_string());
    };

    // Duplicate check is per-row against committed state, not an in-batch set.
    match store.find_candidate_by_email(email).await {
        Ok(Some(_)) => return Err(format!("Email {email} already exists")),
        Ok(None) => {}
        Err(e) => return Err(e.to_string()),
    }

    let new = NewCandidate {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: row.opt("phone"),
        location: row.opt("location"),
        current_title: row.opt("currentTitle"),
        current_company: row.opt("currentCompany"),
        // Unparsable numbers import as absent rather than failing the row.
        years_experience: row.get("yearsExperience").and_then(|v| v.parse().ok()),
        skills: row.opt("skills"),
        linkedin_url: row.opt("linkedinUrl"),
        resume_url: row.opt("resumeUrl"),
        status: row.get("status").unwrap_or("active").to_string(),
        source: Some(row.get("source").unwrap_or("csv_import").to_string()),
        desired_salary: row.opt("desiredSalary"),
        desired_role: row.opt("desiredRole"),
        availability: row.opt("availability"),
    };

    store
        .create_candidate(&new)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

async fn import_company_row(store: &dyn TalentStore, row: &ImportRow) -> Result<(), String> {
    let Some(name) = row.get("name") else {
        return Err("Missing required field (name)".to_string());
    };

    let new = NewCompany {
        name: name.to_string(),
        industry: row.opt("industry"),
        website: row.opt("website"),
        size: row.opt("size"),
        location: row.opt("location"),
        description: row.opt("description"),
        status: row.get("status").unwrap_or("active").to_string(),
    };

    let company = store.create_company(&new).await.map_err(|e| e.to_string())?;

    // A row carrying contact name columns also creates a primary contact for
    // the new company. The company itself has committed by this point; a
    // contact failure is surfaced as this row's error and the row does not
    // count as imported.
    if let (Some(contact_first), Some(contact_last)) =
        (row.get("contactFirstName"), row.get("contactLastName"))
    {
        store
            .create_contact(&NewContact {
                first_name: contact_first.to_string(),
                last_name: contact_last.to_string(),
                email: row.opt("contactEmail"),
                phone: row.opt("contactPhone"),
                title: row.opt("contactTitle"),
                is_primary: true,
                company_id: company.id,
            })
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
