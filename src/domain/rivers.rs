//! Vault river filters.
//!
//! The vault serves archival articles filtered by issue, section, cover
//! status and date window. The filter is a chainable builder whose output is
//! the `get`-scope parameter map a request would carry, which is also what
//! the document cache keys on.

use serde_json::{Map, Value};

/// Filter over the vault article archive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaultFilter {
    issue: Option<String>,
    sections: Vec<String>,
    not_sections: Vec<String>,
    uncurated: bool,
    start_date: Option<String>,
    end_date: Option<String>,
    unique_issues: bool,
    no_sort: bool,
}

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

impl VaultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single issue number.
    pub fn in_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    /// Limit articles to these sections.
    pub fn in_sections(mut self, sections: Vec<String>) -> Self {
        self.sections = sections;
        self
    }

    /// Hide articles from these sections.
    pub fn not_in_sections(mut self, sections: Vec<String>) -> Self {
        self.not_sections = sections;
        self
    }

    /// Show only cover articles, given the platform's cover-section list.
    pub fn only_covers(self, cover_sections: &[String]) -> Self {
        self.in_sections(cover_sections.to_vec())
    }

    /// Hide all cover articles, given the platform's cover-section list.
    pub fn no_covers(self, cover_sections: &[String]) -> Self {
        self.not_in_sections(cover_sections.to_vec())
    }

    /// Window by cover date. Accepts preformatted `YYYY-MM-DD HH:MM:SS`
    /// strings or unix timestamps via [`VaultFilter::between_timestamps`].
    pub fn between_dates(mut self, start: impl Into<String>, end: Option<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = end;
        self
    }

    /// Window by cover date from unix timestamps.
    pub fn between_timestamps(self, start: i64, end: Option<i64>) -> Self {
        self.between_dates(format_timestamp(start), end.map(format_timestamp))
    }

    /// Window over a ten-year span starting at `decade`.
    pub fn from_decade(self, decade: i32) -> Self {
        self.between_dates(
            format!("{decade}-01-01 00:00:00"),
            Some(format!("{}-01-01 00:00:00", decade + 10)),
        )
    }

    /// Window over a single year.
    pub fn from_year(self, year: i32) -> Self {
        self.between_dates(
            format!("{year}-01-01 00:00:00"),
            Some(format!("{}-01-01 00:00:00", year + 1)),
        )
    }

    /// Include uncurated articles.
    pub fn with_uncurated(mut self) -> Self {
        self.uncurated = true;
        self
    }

    /// Collapse results to one article per issue.
    pub fn unique_issues(mut self) -> Self {
        self.unique_issues = true;
        self
    }

    /// Leave result ordering to the backend.
    pub fn no_sort(mut self) -> Self {
        self.no_sort = true;
        self
    }

    /// The filter as request parameters, suitable for merging into the `get`
    /// scope of a request's options.
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("vault_query".to_string(), Value::Bool(true));
        params.insert("issue".to_string(), json_or_null(self.issue.clone()));
        params.insert("uncurated".to_string(), Value::Bool(self.uncurated));
        params.insert(
            "cover_start_date".to_string(),
            json_or_null(self.start_date.clone()),
        );
        params.insert(
            "cover_end_date".to_string(),
            json_or_null(self.end_date.clone()),
        );
        params.insert("unique_issues".to_string(), Value::Bool(self.unique_issues));

        if self.no_sort {
            params.insert("no_sort".to_string(), Value::Bool(true));
        }
        if !self.sections.is_empty() {
            params.insert(
                "vault_sections".to_string(),
                Value::from(self.sections.clone()),
            );
        }
        if !self.not_sections.is_empty() {
            params.insert(
                "vault_not_sections".to_string(),
                Value::from(self.not_sections.clone()),
            );
        }

        params
    }
}

fn json_or_null(value: Option<String>) -> Value {
    value.map_or(Value::Null, Value::from)
}

fn format_timestamp(timestamp: i64) -> String {
    time::OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|dt| dt.format(DATE_FORMAT).ok())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_window_spans_ten_years() {
        let params = VaultFilter::new().from_decade(1950).to_params();
        assert_eq!(params["cover_start_date"], "1950-01-01 00:00:00");
        assert_eq!(params["cover_end_date"], "1960-01-01 00:00:00");
    }

    #[test]
    fn year_window_spans_one_year() {
        let params = VaultFilter::new().from_year(1954).to_params();
        assert_eq!(params["cover_start_date"], "1954-01-01 00:00:00");
        assert_eq!(params["cover_end_date"], "1955-01-01 00:00:00");
    }

    #[test]
    fn timestamps_format_as_dates() {
        let params = VaultFilter::new()
            .between_timestamps(0, Some(86_400))
            .to_params();
        assert_eq!(params["cover_start_date"], "1970-01-01 00:00:00");
        assert_eq!(params["cover_end_date"], "1970-01-02 00:00:00");
    }

    #[test]
    fn sections_only_appear_when_set() {
        let bare = VaultFilter::new().to_params();
        assert!(!bare.contains_key("vault_sections"));
        assert!(!bare.contains_key("no_sort"));

        let covers = vec!["cover".to_string(), "cover_story".to_string()];
        let filtered = VaultFilter::new().only_covers(&covers).no_sort().to_params();
        assert_eq!(filtered["vault_sections"], serde_json::json!(covers));
        assert_eq!(filtered["no_sort"], true);
    }

    #[test]
    fn no_covers_populates_the_exclusion_list() {
        let covers = vec!["cover".to_string()];
        let params = VaultFilter::new().no_covers(&covers).to_params();
        assert_eq!(params["vault_not_sections"], serde_json::json!(covers));
        assert!(!params.contains_key("vault_sections"));
    }

    #[test]
    fn filter_always_marks_vault_queries() {
        let params = VaultFilter::new().in_issue("1203").to_params();
        assert_eq!(params["vault_query"], true);
        assert_eq!(params["issue"], "1203");
    }
}
