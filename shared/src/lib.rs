use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of activity categories offered by the activity form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Administration,
    Academics,
    Finance,
    Social,
    #[serde(rename = "community service")]
    CommunityService,
    Documentation,
}

impl ActivityCategory {
    /// Every category, in the order the form lists them
    pub const ALL: [ActivityCategory; 6] = [
        ActivityCategory::Administration,
        ActivityCategory::Academics,
        ActivityCategory::Finance,
        ActivityCategory::Social,
        ActivityCategory::CommunityService,
        ActivityCategory::Documentation,
    ];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Administration => "administration",
            ActivityCategory::Academics => "academics",
            ActivityCategory::Finance => "finance",
            ActivityCategory::Social => "social",
            ActivityCategory::CommunityService => "community service",
            ActivityCategory::Documentation => "documentation",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known categories
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activity category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ActivityCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ActivityCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A logged unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
    pub name: String,
    pub category: ActivityCategory,
    pub duration_hours: f64,
    pub output: String,
    pub notes: String,
    /// Evidence blobs attached to this activity, in upload order
    pub file_ids: Vec<String>,
}

/// Body of POST /activities and PUT /activities/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRequest {
    pub date: NaiveDate,
    pub name: String,
    /// Validated against `ActivityCategory` by the backend
    pub category: String,
    /// Missing or `null` (an unparsable form value) reads as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub duration_hours: f64,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// An income/expense ledger line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finance {
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    /// income - expense, derived on every read
    pub net: Decimal,
    pub notes: String,
}

/// Body of POST /finances and PUT /finances/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub income: Decimal,
    #[serde(default)]
    pub expense: Decimal,
    #[serde(default)]
    pub notes: String,
}

/// Monthly aggregate returned by GET /recap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recap {
    pub total_activities: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Only categories with at least one activity are present
    pub activities_by_category: BTreeMap<String, u32>,
    pub summary: String,
}

/// Query string carrying the requested month and year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodQuery {
    pub month: u32,
    pub year: i32,
}

/// Query string for the activity and finance list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordListQuery {
    pub month: u32,
    pub year: i32,
    /// Case-insensitive substring matched against every displayed field
    pub search: Option<String>,
}

/// Document formats offered by GET /export/:format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Excel,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => f.write_str("pdf"),
            ExportFormat::Excel => f.write_str("excel"),
        }
    }
}

/// Response of POST /files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub id: String,
    pub file_name: String,
    pub size: u64,
}

/// JSON body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&ActivityCategory::CommunityService).unwrap();
        assert_eq!(json, "\"community service\"");

        let parsed: ActivityCategory = serde_json::from_str("\"academics\"").unwrap();
        assert_eq!(parsed, ActivityCategory::Academics);
    }

    #[test]
    fn test_category_from_str_is_lenient_about_case_and_spaces() {
        assert_eq!("  Social ".parse::<ActivityCategory>().unwrap(), ActivityCategory::Social);
        assert_eq!(
            "Community Service".parse::<ActivityCategory>().unwrap(),
            ActivityCategory::CommunityService
        );
        assert!("sports".parse::<ActivityCategory>().is_err());
        assert!("".parse::<ActivityCategory>().is_err());
    }

    #[test]
    fn test_activity_request_defaults() {
        let request: ActivityRequest = serde_json::from_str(
            r#"{"date":"2024-03-05","name":"Seminar","category":"academics","files":[]}"#,
        )
        .unwrap();
        assert_eq!(request.duration_hours, 0.0);
        assert!(request.file_ids.is_empty());
        assert_eq!(request.notes, "");
    }

    #[test]
    fn test_activity_request_null_duration_reads_as_zero() {
        let request: ActivityRequest = serde_json::from_str(
            r#"{"date":"2024-03-05","name":"Seminar","category":"academics","duration_hours":null}"#,
        )
        .unwrap();
        assert_eq!(request.duration_hours, 0.0);

        let request: ActivityRequest = serde_json::from_str(
            r#"{"date":"2024-03-05","name":"Seminar","category":"academics","duration_hours":1.5}"#,
        )
        .unwrap();
        assert_eq!(request.duration_hours, 1.5);
    }

    #[test]
    fn test_finance_request_accepts_plain_numbers() {
        let request: FinanceRequest = serde_json::from_str(
            r#"{"date":"2024-03-10","category":"grant","income":100,"expense":40.5,"notes":""}"#,
        )
        .unwrap();
        assert_eq!(request.income, Decimal::new(100, 0));
        assert_eq!(request.expense, Decimal::new(405, 1));
    }

    #[test]
    fn test_recap_money_serializes_as_numbers() {
        let recap = Recap {
            total_activities: 1,
            total_income: Decimal::new(10000, 2),
            total_expense: Decimal::new(4000, 2),
            activities_by_category: BTreeMap::from([("academics".to_string(), 1)]),
            summary: String::new(),
        };
        let value = serde_json::to_value(&recap).unwrap();
        assert!(value["total_income"].is_number());
        assert_eq!(value["total_income"].as_f64(), Some(100.0));
        assert_eq!(value["activities_by_category"]["academics"], 1);
    }

    #[test]
    fn test_export_format_wire_names() {
        let format: ExportFormat = serde_json::from_str("\"excel\"").unwrap();
        assert_eq!(format, ExportFormat::Excel);
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }
}
