//! Opportunity Model
//!
//! Jobs and internships share one listing with a kind-specific detail
//! record. Internally the details are a tagged union, so an opportunity
//! with both (or neither) detail payloads is unrepresentable once the
//! create payload has been validated.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers::double_option;
use crate::utils::AppError;

/// Opportunity kind. Immutable after creation: changing it would require
/// a semantic migration of the detail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum OpportunityKind {
    Job,
    Internship,
}

/// Job-specific details
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobDetails {
    /// E.g. "Full-time", "Part-time", "Contract"
    pub employment_type: Option<String>,
    /// E.g. "60k-80k", "Competitive"
    pub salary_range: Option<String>,
}

/// Internship-specific details
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct InternshipDetails {
    /// E.g. 3, 6
    pub duration_months: Option<i64>,
    /// E.g. "10k/month", "Unpaid"
    pub stipend: Option<String>,
}

/// Kind-specific detail record; exactly one variant exists per opportunity
#[derive(Debug, Clone)]
pub enum OpportunityDetails {
    Job(JobDetails),
    Internship(InternshipDetails),
}

impl OpportunityDetails {
    pub fn kind(&self) -> OpportunityKind {
        match self {
            OpportunityDetails::Job(_) => OpportunityKind::Job,
            OpportunityDetails::Internship(_) => OpportunityKind::Internship,
        }
    }
}

/// Opportunity row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Opportunity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payload. `job_details`/`internship_details` must match `type`
/// exactly; the mismatching combinations are rejected before any row is
/// persisted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OpportunityCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub job_details: Option<JobDetails>,
    pub internship_details: Option<InternshipDetails>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl OpportunityCreate {
    /// Collapse the two optional payload fields into the tagged union,
    /// enforcing that exactly the matching one is present.
    pub fn details(&self) -> Result<OpportunityDetails, AppError> {
        match self.kind {
            OpportunityKind::Job => {
                if self.internship_details.is_some() {
                    return Err(AppError::validation(
                        "internship_details is not allowed when type is JOB",
                    ));
                }
                let details = self
                    .job_details
                    .clone()
                    .ok_or_else(|| AppError::validation("job_details is required when type is JOB"))?;
                Ok(OpportunityDetails::Job(details))
            }
            OpportunityKind::Internship => {
                if self.job_details.is_some() {
                    return Err(AppError::validation(
                        "job_details is not allowed when type is INTERNSHIP",
                    ));
                }
                let details = self.internship_details.clone().ok_or_else(|| {
                    AppError::validation("internship_details is required when type is INTERNSHIP")
                })?;
                Ok(OpportunityDetails::Internship(details))
            }
        }
    }
}

/// Partial update payload.
///
/// `type` is intentionally not updatable. A detail payload for the
/// non-matching kind is ignored (no-op), matching the public contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpportunityUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    pub job_details: Option<JobDetails>,
    pub internship_details: Option<InternshipDetails>,
    pub requirements: Option<Vec<String>>,
}

/// Opportunity response; serialization picks the active detail variant
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_details: Option<JobDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internship_details: Option<InternshipDetails>,
    pub requirements: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl OpportunityResponse {
    pub fn from_parts(
        opportunity: Opportunity,
        details: OpportunityDetails,
        requirements: Vec<String>,
    ) -> Self {
        let (job_details, internship_details) = match details {
            OpportunityDetails::Job(d) => (Some(d), None),
            OpportunityDetails::Internship(d) => (None, Some(d)),
        };

        Self {
            id: opportunity.id,
            title: opportunity.title,
            description: opportunity.description,
            location: opportunity.location,
            kind: opportunity.kind,
            job_details,
            internship_details,
            requirements,
            created_at: opportunity.created_at,
            updated_at: opportunity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_create(json: &str) -> OpportunityCreate {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_job_with_job_details_is_accepted() {
        let payload = job_create(
            r#"{"title":"Backend Engineer","type":"JOB",
                "job_details":{"employment_type":"Full-time","salary_range":"60k-80k"},
                "requirements":["Rust"]}"#,
        );
        let details = payload.details().unwrap();
        assert_eq!(details.kind(), OpportunityKind::Job);
    }

    #[test]
    fn test_job_with_internship_details_is_rejected() {
        let payload = job_create(
            r#"{"title":"Backend Engineer","type":"JOB",
                "job_details":{"employment_type":"Full-time","salary_range":null},
                "internship_details":{"duration_months":3,"stipend":null},
                "requirements":[]}"#,
        );
        assert!(payload.details().is_err());
    }

    #[test]
    fn test_internship_without_details_is_rejected() {
        let payload = job_create(r#"{"title":"Intern","type":"INTERNSHIP","requirements":[]}"#);
        assert!(payload.details().is_err());
    }

    #[test]
    fn test_response_serializes_only_active_variant() {
        let response = OpportunityResponse::from_parts(
            Opportunity {
                id: 1,
                title: "Intern".to_string(),
                description: None,
                location: None,
                kind: OpportunityKind::Internship,
                created_at: 0,
                updated_at: 0,
            },
            OpportunityDetails::Internship(InternshipDetails {
                duration_months: Some(6),
                stipend: Some("10k/month".to_string()),
            }),
            vec!["Git".to_string()],
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "INTERNSHIP");
        assert!(json.get("job_details").is_none());
        assert_eq!(json["internship_details"]["duration_months"], 6);
    }
}
