//! Submission record, closed value sets, and the request validator.
//!
//! Validation order is fixed: required fields first (all missing fields are
//! collected and reported together), then email format, then tower, then
//! problem. Each of the last three stops at the first failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{format_timestamp, Timestamp};

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_SUBMISSION_TIME: &str = "submissionTime";
pub const FIELD_USER_NAME: &str = "userName";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_EMPLOYEE_ID: &str = "employeeId";
pub const FIELD_TOWER: &str = "tower";
pub const FIELD_PROBLEM: &str = "problem";
pub const FIELD_BUSINESS_BENEFIT: &str = "businessBenefit";
pub const FIELD_JUSTIFICATION: &str = "justification";

/// Fields that must be present and non-blank, in reporting order.
pub const REQUIRED_FIELDS: &[&str] = &[
    FIELD_USER_NAME,
    FIELD_EMAIL,
    FIELD_EMPLOYEE_ID,
    FIELD_TOWER,
    FIELD_PROBLEM,
    FIELD_BUSINESS_BENEFIT,
    FIELD_JUSTIFICATION,
];

// ---------------------------------------------------------------------------
// Tower
// ---------------------------------------------------------------------------

/// Organizational unit selected by the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tower {
    #[serde(rename = "Tz")]
    Tz,
    #[serde(rename = "EDL")]
    Edl,
    #[serde(rename = "ESB")]
    Esb,
    #[serde(rename = "EDI")]
    Edi,
    #[serde(rename = "Corporate")]
    Corporate,
    #[serde(rename = "Legacy Apps")]
    LegacyApps,
}

impl Tower {
    pub const ALL: [Tower; 6] = [
        Tower::Tz,
        Tower::Edl,
        Tower::Esb,
        Tower::Edi,
        Tower::Corporate,
        Tower::LegacyApps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tower::Tz => "Tz",
            Tower::Edl => "EDL",
            Tower::Esb => "ESB",
            Tower::Edi => "EDI",
            Tower::Corporate => "Corporate",
            Tower::LegacyApps => "Legacy Apps",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn parse(value: &str) -> Option<Tower> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

/// Supported request category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Problem {
    #[serde(rename = "Incident Solution Recommendation")]
    IncidentSolutionRecommendation,
    #[serde(rename = "Knowledge chatbot")]
    KnowledgeChatbot,
    #[serde(rename = "Ticket Classification")]
    TicketClassification,
    #[serde(rename = "Dynamic Query Response")]
    DynamicQueryResponse,
    #[serde(rename = "Automated Ticket Auditing")]
    AutomatedTicketAuditing,
    #[serde(rename = "Code Documentation")]
    CodeDocumentation,
    #[serde(rename = "Sentiment Analysis")]
    SentimentAnalysis,
    #[serde(rename = "File Processor for Special Character Corrections")]
    SpecialCharacterFileProcessor,
}

impl Problem {
    pub const ALL: [Problem; 8] = [
        Problem::IncidentSolutionRecommendation,
        Problem::KnowledgeChatbot,
        Problem::TicketClassification,
        Problem::DynamicQueryResponse,
        Problem::AutomatedTicketAuditing,
        Problem::CodeDocumentation,
        Problem::SentimentAnalysis,
        Problem::SpecialCharacterFileProcessor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Problem::IncidentSolutionRecommendation => "Incident Solution Recommendation",
            Problem::KnowledgeChatbot => "Knowledge chatbot",
            Problem::TicketClassification => "Ticket Classification",
            Problem::DynamicQueryResponse => "Dynamic Query Response",
            Problem::AutomatedTicketAuditing => "Automated Ticket Auditing",
            Problem::CodeDocumentation => "Code Documentation",
            Problem::SentimentAnalysis => "Sentiment Analysis",
            Problem::SpecialCharacterFileProcessor => {
                "File Processor for Special Character Corrections"
            }
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn parse(value: &str) -> Option<Problem> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A validated survey record, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_time: String,
    pub user_name: String,
    pub email: String,
    pub employee_id: String,
    pub tower: Tower,
    pub problem: Problem,
    pub business_benefit: String,
    pub justification: String,
}

impl Submission {
    /// Cell values in storage column order.
    pub fn to_row(&self) -> [&str; 8] {
        [
            self.submission_time.as_str(),
            self.user_name.as_str(),
            self.email.as_str(),
            self.employee_id.as_str(),
            self.tower.as_str(),
            self.problem.as_str(),
            self.business_benefit.as_str(),
            self.justification.as_str(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Read a field as trimmed text.
///
/// Strings are used as-is, numbers and booleans are stringified. `null`,
/// arrays and objects are treated as absent.
fn text_field(raw: &Map<String, Value>, name: &str) -> Option<String> {
    let text = match raw.get(name)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Basic shape check only: the address must contain both `@` and `.`.
pub fn is_plausible_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// Validate a raw key-value submission.
///
/// `received_at` is used as the submission time when the payload carries
/// none (or a blank one).
pub fn validate_submission(
    raw: &Map<String, Value>,
    received_at: Timestamp,
) -> Result<Submission, ValidationError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| text_field(raw, name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let field = |name: &str| text_field(raw, name).unwrap_or_default();

    let email = field(FIELD_EMAIL);
    if !is_plausible_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    let tower = Tower::parse(&field(FIELD_TOWER)).ok_or(ValidationError::InvalidTower)?;
    let problem = Problem::parse(&field(FIELD_PROBLEM)).ok_or(ValidationError::InvalidProblem)?;

    let submission_time = text_field(raw, FIELD_SUBMISSION_TIME)
        .unwrap_or_else(|| format_timestamp(&received_at));

    Ok(Submission {
        submission_time,
        user_name: field(FIELD_USER_NAME),
        email,
        employee_id: field(FIELD_EMPLOYEE_ID),
        tower,
        problem,
        business_benefit: field(FIELD_BUSINESS_BENEFIT),
        justification: field(FIELD_JUSTIFICATION),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn received_at() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2025, 3, 4, 10, 30, 0).unwrap()
    }

    fn valid_payload() -> Map<String, Value> {
        match json!({
            "userName": "Jane",
            "email": "jane@co.com",
            "employeeId": "E1",
            "tower": "EDI",
            "problem": "Knowledge chatbot",
            "businessBenefit": "saves time",
            "justification": "daily tickets",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        let sub = validate_submission(&valid_payload(), received_at()).unwrap();
        assert_eq!(sub.user_name, "Jane");
        assert_eq!(sub.tower, Tower::Edi);
        assert_eq!(sub.problem, Problem::KnowledgeChatbot);
        assert_eq!(sub.submission_time, "2025-03-04T10:30:00.000Z");
    }

    #[test]
    fn keeps_supplied_submission_time() {
        let mut raw = valid_payload();
        raw.insert(FIELD_SUBMISSION_TIME.into(), json!("2024-12-01T08:00:00.000Z"));
        let sub = validate_submission(&raw, received_at()).unwrap();
        assert_eq!(sub.submission_time, "2024-12-01T08:00:00.000Z");
    }

    #[test]
    fn blank_submission_time_defaults_to_receipt() {
        let mut raw = valid_payload();
        raw.insert(FIELD_SUBMISSION_TIME.into(), json!("   "));
        let sub = validate_submission(&raw, received_at()).unwrap();
        assert_eq!(sub.submission_time, "2025-03-04T10:30:00.000Z");
    }

    #[test]
    fn whitespace_only_field_is_missing() {
        let mut raw = valid_payload();
        raw.insert(FIELD_USER_NAME.into(), json!("  "));
        assert_matches!(
            validate_submission(&raw, received_at()),
            Err(ValidationError::MissingFields(fields)) if fields == vec!["userName"]
        );
    }

    #[test]
    fn reports_every_missing_field() {
        let mut raw = valid_payload();
        raw.remove(FIELD_EMAIL);
        raw.remove(FIELD_JUSTIFICATION);
        raw.insert(FIELD_TOWER.into(), Value::Null);
        assert_matches!(
            validate_submission(&raw, received_at()),
            Err(ValidationError::MissingFields(fields))
                if fields == vec!["email", "tower", "justification"]
        );
    }

    #[test]
    fn missing_fields_short_circuit_other_checks() {
        let mut raw = valid_payload();
        raw.insert(FIELD_EMAIL.into(), json!("not-an-email"));
        raw.remove(FIELD_PROBLEM);
        assert_matches!(
            validate_submission(&raw, received_at()),
            Err(ValidationError::MissingFields(_))
        );
    }

    #[test]
    fn rejects_email_without_at_or_dot() {
        for email in ["not-an-email", "jane.co.com", "jane@co"] {
            let mut raw = valid_payload();
            raw.insert(FIELD_EMAIL.into(), json!(email));
            assert_eq!(
                validate_submission(&raw, received_at()),
                Err(ValidationError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn email_checked_before_tower() {
        let mut raw = valid_payload();
        raw.insert(FIELD_EMAIL.into(), json!("nope"));
        raw.insert(FIELD_TOWER.into(), json!("InvalidTower"));
        assert_eq!(
            validate_submission(&raw, received_at()),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn rejects_unknown_tower() {
        let mut raw = valid_payload();
        raw.insert(FIELD_TOWER.into(), json!("InvalidTower"));
        raw.insert(FIELD_PROBLEM.into(), json!("Not a problem"));
        assert_eq!(
            validate_submission(&raw, received_at()),
            Err(ValidationError::InvalidTower)
        );
    }

    #[test]
    fn tower_match_is_case_sensitive() {
        let mut raw = valid_payload();
        raw.insert(FIELD_TOWER.into(), json!("edi"));
        assert_eq!(
            validate_submission(&raw, received_at()),
            Err(ValidationError::InvalidTower)
        );
    }

    #[test]
    fn rejects_unknown_problem() {
        let mut raw = valid_payload();
        raw.insert(FIELD_PROBLEM.into(), json!("Weather Forecasting"));
        assert_eq!(
            validate_submission(&raw, received_at()),
            Err(ValidationError::InvalidProblem)
        );
    }

    #[test]
    fn numeric_employee_id_is_stringified() {
        let mut raw = valid_payload();
        raw.insert(FIELD_EMPLOYEE_ID.into(), json!(4021));
        let sub = validate_submission(&raw, received_at()).unwrap();
        assert_eq!(sub.employee_id, "4021");
    }

    #[test]
    fn text_fields_are_trimmed() {
        let mut raw = valid_payload();
        raw.insert(FIELD_USER_NAME.into(), json!("  Jane  "));
        raw.insert(FIELD_TOWER.into(), json!(" Legacy Apps "));
        let sub = validate_submission(&raw, received_at()).unwrap();
        assert_eq!(sub.user_name, "Jane");
        assert_eq!(sub.tower, Tower::LegacyApps);
    }

    #[test]
    fn every_enumerated_value_round_trips_through_parse() {
        for tower in Tower::ALL {
            assert_eq!(Tower::parse(tower.as_str()), Some(tower));
        }
        for problem in Problem::ALL {
            assert_eq!(Problem::parse(problem.as_str()), Some(problem));
        }
    }

    #[test]
    fn row_follows_column_order() {
        let sub = validate_submission(&valid_payload(), received_at()).unwrap();
        assert_eq!(
            sub.to_row(),
            [
                "2025-03-04T10:30:00.000Z",
                "Jane",
                "jane@co.com",
                "E1",
                "EDI",
                "Knowledge chatbot",
                "saves time",
                "daily tickets",
            ]
        );
    }
}
