//! BLS request and response payloads.
//!
//! Request body:
//!
//! ```json
//! {"seriesid": ["LNS14000000"], "startyear": "2002", "endyear": "2021", "registrationkey": "..."}
//! ```
//!
//! Response body:
//!
//! ```json
//! {"status": "REQUEST_SUCCEEDED", "message": [], "Results": {"series": [
//!     {"seriesID": "LNS14000000", "data": [
//!         {"year": "2021", "period": "M12", "periodName": "December", "value": "3.9", "footnotes": [{}]}
//!     ]}
//! ]}}
//! ```

use laborstat_types::{SeriesObservation, YearRange};
use serde::{Deserialize, Serialize};

use crate::RetrieveError;

const STATUS_SUCCEEDED: &str = "REQUEST_SUCCEEDED";

/// JSON body of a time series request.
#[derive(Debug, Serialize)]
pub(crate) struct TimeseriesRequest<'a> {
    #[serde(rename = "seriesid")]
    pub(crate) series_ids: &'a [String],
    #[serde(rename = "startyear")]
    pub(crate) start_year: String,
    #[serde(rename = "endyear")]
    pub(crate) end_year: String,
    #[serde(rename = "registrationkey", skip_serializing_if = "Option::is_none")]
    pub(crate) registration_key: Option<&'a str>,
    #[serde(rename = "annualaverage", skip_serializing_if = "std::ops::Not::not")]
    pub(crate) annual_average: bool,
}

impl<'a> TimeseriesRequest<'a> {
    pub(crate) fn new(
        series_ids: &'a [String],
        range: YearRange,
        registration_key: Option<&'a str>,
        annual_average: bool,
    ) -> Self {
        Self {
            series_ids,
            start_year: range.start.to_string(),
            end_year: range.end.to_string(),
            registration_key,
            annual_average,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    message: Vec<String>,
    #[serde(rename = "Results", default)]
    results: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Results {
    #[serde(default)]
    series: Vec<SeriesPayload>,
}

#[derive(Debug, Deserialize)]
struct SeriesPayload {
    #[serde(rename = "seriesID")]
    series_id: String,
    #[serde(default)]
    data: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
struct DataPoint {
    year: String,
    period: String,
    #[serde(rename = "periodName", default)]
    period_name: Option<String>,
    #[serde(default)]
    value: String,
    #[serde(default)]
    footnotes: Vec<Footnote>,
}

#[derive(Debug, Deserialize)]
struct Footnote {
    #[serde(default)]
    text: Option<String>,
}

/// Parses a BLS time series response for the given request range.
///
/// Provider-level failures are classified from the response messages:
/// quota messages become [`RetrieveError::RateLimit`], key problems become
/// [`RetrieveError::Auth`], and everything else [`RetrieveError::Api`].
/// A successful response whose range was silently shortened by the provider
/// is rejected with [`RetrieveError::RangeTooLarge`].
///
/// # Errors
///
/// Returns an error if the request was not processed or the payload is malformed.
pub fn parse_response(
    body: &str,
    range: YearRange,
    max_span: u32,
) -> Result<Vec<SeriesObservation>, RetrieveError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| RetrieveError::Parse(e.to_string()))?;

    if envelope.status != STATUS_SUCCEEDED {
        return Err(classify_failure(&envelope.status, &envelope.message));
    }

    for message in &envelope.message {
        let lower = message.to_lowercase();
        if lower.contains("year range has been reduced") {
            return Err(RetrieveError::RangeTooLarge { range, max_span });
        }
        tracing::debug!(%range, message = %message, "provider message");
    }

    let Some(results) = envelope.results else {
        return Ok(Vec::new());
    };
    let results: Results =
        serde_json::from_value(results).map_err(|e| RetrieveError::Parse(e.to_string()))?;

    let mut observations = Vec::new();
    for series in results.series {
        for point in series.data {
            let observation =
                SeriesObservation::parse(&series.series_id, &point.year, &point.period, &point.value)
                    .map_err(|e| {
                        RetrieveError::Parse(format!("series {}: {e}", series.series_id))
                    })?;
            let footnotes = point
                .footnotes
                .into_iter()
                .filter_map(|f| f.text)
                .filter(|text| !text.is_empty())
                .collect();
            let observation = match point.period_name {
                Some(name) => observation.with_period_name(name),
                None => observation,
            };
            observations.push(observation.with_footnotes(footnotes));
        }
    }

    Ok(observations)
}

fn classify_failure(status: &str, messages: &[String]) -> RetrieveError {
    let detail = if messages.is_empty() {
        status.to_string()
    } else {
        messages.join("; ")
    };
    let lower = detail.to_lowercase();

    if lower.contains("threshold") || lower.contains("too many requests") {
        RetrieveError::RateLimit(detail)
    } else if lower.contains("key")
        && ["invalid", "expired", "not valid", "inactive"]
            .iter()
            .any(|needle| lower.contains(needle))
    {
        RetrieveError::Auth(detail)
    } else {
        RetrieveError::Api(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laborstat_types::Period;

    fn range() -> YearRange {
        YearRange::new(2020, 2021).unwrap()
    }

    #[test]
    fn test_request_body() {
        let ids = vec!["LNS14000000".to_string()];
        let request = TimeseriesRequest::new(&ids, range(), Some("secret"), false);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "seriesid": ["LNS14000000"],
                "startyear": "2020",
                "endyear": "2021",
                "registrationkey": "secret"
            })
        );
    }

    #[test]
    fn test_request_body_public_with_annual_average() {
        let ids = vec!["LNS14000000".to_string()];
        let request = TimeseriesRequest::new(&ids, range(), None, true);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("registrationkey").is_none());
        assert_eq!(json["annualaverage"], serde_json::json!(true));
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{
            "status": "REQUEST_SUCCEEDED",
            "responseTime": 120,
            "message": [],
            "Results": {"series": [{
                "seriesID": "LNS14000000",
                "data": [
                    {"year": "2021", "period": "M12", "periodName": "December", "latest": "true",
                     "value": "3.9", "footnotes": [{}]},
                    {"year": "2021", "period": "M11", "periodName": "November",
                     "value": "4.2", "footnotes": [{"code": "P", "text": "preliminary"}]},
                    {"year": "2021", "period": "M10", "periodName": "October",
                     "value": "-", "footnotes": [{}]}
                ]
            }]}
        }"#;
        let observations = parse_response(body, range(), 20).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].period(), Period::Month(12));
        assert_eq!(observations[0].value(), Some(3.9));
        assert!(observations[0].footnotes().is_empty());
        assert_eq!(observations[1].footnotes(), ["preliminary".to_string()]);
        assert_eq!(observations[2].value(), None);
    }

    #[test]
    fn test_parse_no_data_message_is_not_an_error() {
        let body = r#"{
            "status": "REQUEST_SUCCEEDED",
            "message": ["No Data Available for Series LNS14000000 Year: 1900"],
            "Results": {"series": [{"seriesID": "LNS14000000", "data": []}]}
        }"#;
        assert!(parse_response(body, range(), 20).unwrap().is_empty());
    }

    #[test]
    fn test_parse_truncated_range() {
        let body = r#"{
            "status": "REQUEST_SUCCEEDED",
            "message": ["Year range has been reduced to the system-allowed limit of 10 years."],
            "Results": {"series": []}
        }"#;
        assert_eq!(
            parse_response(body, range(), 10),
            Err(RetrieveError::RangeTooLarge {
                range: range(),
                max_span: 10
            })
        );
    }

    #[test]
    fn test_parse_rate_limited() {
        let body = r#"{
            "status": "REQUEST_NOT_PROCESSED",
            "message": ["The daily threshold for total number of requests allocated to the user has been reached."],
            "Results": {}
        }"#;
        assert!(matches!(
            parse_response(body, range(), 20),
            Err(RetrieveError::RateLimit(_))
        ));
    }

    #[test]
    fn test_parse_invalid_key() {
        let body = r#"{
            "status": "REQUEST_NOT_PROCESSED",
            "message": ["The key:abc provided by the User is invalid."]
        }"#;
        assert!(matches!(
            parse_response(body, range(), 20),
            Err(RetrieveError::Auth(_))
        ));
    }

    #[test]
    fn test_parse_other_failure() {
        let body = r#"{"status": "REQUEST_FAILED_INVALID_PARAMETERS", "message": []}"#;
        assert_eq!(
            parse_response(body, range(), 20),
            Err(RetrieveError::Api(
                "REQUEST_FAILED_INVALID_PARAMETERS".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_response("<html>", range(), 20),
            Err(RetrieveError::Parse(_))
        ));
        let bad_period = r#"{
            "status": "REQUEST_SUCCEEDED",
            "Results": {"series": [{"seriesID": "X", "data": [
                {"year": "2021", "period": "Z99", "value": "1"}
            ]}]}
        }"#;
        assert!(matches!(
            parse_response(bad_period, range(), 20),
            Err(RetrieveError::Parse(_))
        ));
    }
}
