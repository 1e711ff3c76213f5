//! Data structures for cruisecast
//!
//! Shared models used across the API client, the views and the CLI:
//! - **Castings**: open/closed opportunities and their write payload
//! - **Applications**: a candidate's submission against one casting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Casting Models
// =============================================================================

/// Server-assigned casting identifier.
///
/// The backend decides the shape; whatever arrives is echoed back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CastingId {
    Number(u64),
    Text(String),
}

impl CastingId {
    /// Parse a user-supplied id, preferring the numeric form when it
    /// round-trips exactly (`"007"` stays text)
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.parse::<u64>() {
            Ok(n) if n.to_string() == s => CastingId::Number(n),
            _ => CastingId::Text(s.to_string()),
        }
    }

    /// Path segment for `/castings/{id}/`
    pub fn as_path_segment(&self) -> String {
        match self {
            CastingId::Number(n) => n.to_string(),
            CastingId::Text(s) => urlencoding::encode(s).into_owned(),
        }
    }
}

impl fmt::Display for CastingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastingId::Number(n) => write!(f, "{}", n),
            CastingId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for CastingId {
    fn from(n: u64) -> Self {
        CastingId::Number(n)
    }
}

/// Casting status as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastingStatus {
    #[default]
    Open,
    Closed,
    /// Anything else the server might send; shown like a closed casting
    #[serde(untagged)]
    Other(String),
}

impl CastingStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, CastingStatus::Open)
    }

    /// Case-insensitive; unknown values are kept verbatim
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "open" => CastingStatus::Open,
            "closed" => CastingStatus::Closed,
            _ => CastingStatus::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CastingStatus::Open => "open",
            CastingStatus::Closed => "closed",
            CastingStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for CastingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A casting opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Casting {
    pub id: CastingId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub external_link: Option<String>,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub status: CastingStatus,
}

impl Casting {
    /// Writable fields of this casting, as an update would send them
    pub fn fields(&self) -> CastingFields {
        CastingFields {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            external_link: self.external_link.clone(),
            deadline: self.deadline,
            status: self.status.clone(),
        }
    }

    /// Deadline formatted for display, e.g. "January 1, 2025"
    pub fn format_deadline(&self) -> String {
        format_date(self.deadline)
    }
}

impl fmt::Display for Casting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) - deadline {}",
            self.id,
            self.title,
            self.status,
            self.format_deadline()
        )
    }
}

/// Casting payload for create and full-replace update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastingFields {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    pub deadline: NaiveDate,
    pub status: CastingStatus,
}

impl CastingFields {
    /// New casting fields; status defaults to open
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        requirements: Vec<String>,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            requirements,
            external_link: None,
            deadline,
            status: CastingStatus::Open,
        }
    }

    pub fn with_external_link(mut self, link: Option<String>) -> Self {
        self.external_link = normalize_optional(link);
        self
    }
}

// =============================================================================
// Application Models
// =============================================================================

/// A candidate's application against one casting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationFields {
    pub casting: CastingId,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_links: Option<String>,
    pub role_fit: String,
    pub experience: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Split requirement text into lines, dropping blank ones
pub fn split_requirements(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Join requirement lines back into editable text
pub fn join_requirements(lines: &[String]) -> String {
    lines.join("\n")
}

/// Trim an optional text value, mapping blank to `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Format a date like "January 1, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_optional(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_split_requirements_drops_blank_lines() {
        assert_eq!(split_requirements("a\nb\n\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_requirements("  \n\t\n"), Vec::<String>::new());
        assert_eq!(split_requirements("one\r\ntwo\r\n"), vec!["one", "two"]);
    }

    #[test]
    fn test_join_then_split_keeps_lines() {
        let lines = vec!["Reliable".to_string(), "Loves boats".to_string()];
        assert_eq!(split_requirements(&join_requirements(&lines)), lines);
    }

    #[test]
    fn test_casting_id_parse() {
        assert_eq!(CastingId::parse("42"), CastingId::Number(42));
        assert_eq!(CastingId::parse(" abc "), CastingId::Text("abc".into()));
        // Leading zeros would be lost as a number
        assert_eq!(CastingId::parse("007"), CastingId::Text("007".into()));
        assert_eq!(CastingId::parse("007").as_path_segment(), "007");
        assert_eq!(CastingId::Text("a b".into()).as_path_segment(), "a%20b");
    }

    #[test]
    fn test_casting_deserialize() {
        let json = r#"{
            "id": 1,
            "title": "Host",
            "description": "Lead the show",
            "requirements": ["Reliable"],
            "external_link": "",
            "deadline": "2025-01-01",
            "status": "open"
        }"#;
        let casting: Casting = serde_json::from_str(json).unwrap();
        assert_eq!(casting.id, CastingId::Number(1));
        assert_eq!(casting.external_link, None);
        assert_eq!(casting.deadline, date(2025, 1, 1));
        assert!(casting.status.is_open());
    }

    #[test]
    fn test_unknown_status_is_not_open() {
        let status: CastingStatus = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(status, CastingStatus::Other("paused".into()));
        assert!(!status.is_open());

        let closed: CastingStatus = serde_json::from_str(r#""closed""#).unwrap();
        assert_eq!(closed, CastingStatus::Closed);
    }

    #[test]
    fn test_fields_without_link_omit_key() {
        let fields = CastingFields::new("Host", "desc", vec!["a".into()], date(2025, 1, 1))
            .with_external_link(Some("   ".into()));
        let json = serde_json::to_value(&fields).unwrap();
        assert!(json.get("external_link").is_none());
        assert_eq!(json["status"], "open");
        assert_eq!(json["deadline"], "2025-01-01");
    }

    #[test]
    fn test_application_serializes_casting_id_shape() {
        let app = ApplicationFields {
            casting: CastingId::Number(1),
            full_name: "Jane".into(),
            email: "j@x.com".into(),
            phone: None,
            social_media_links: Some("@jane".into()),
            role_fit: "fit".into(),
            experience: "lots".into(),
        };
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["casting"], 1);
        assert!(json.get("phone").is_none());
        assert_eq!(json["social_media_links"], "@jane");
    }

    #[test]
    fn test_format_deadline() {
        assert_eq!(format_date(date(2025, 1, 1)), "January 1, 2025");
        assert_eq!(parse_date("2025-03-15"), Some(date(2025, 3, 15)));
        assert_eq!(parse_date("15/03/2025"), None);
    }
}
