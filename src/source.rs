use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use crate::config::BackendConfig;
use crate::error::SourceError;
use crate::fields;
use crate::models::{DateRange, Review};

#[derive(Debug, Deserialize)]
struct BackendRecord {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct BackendPage {
    #[serde(default)]
    records: Vec<BackendRecord>,
    offset: Option<String>,
}

impl From<BackendRecord> for Review {
    fn from(record: BackendRecord) -> Self {
        Review::new(Some(record.id), record.fields)
    }
}

fn formula_date(day: NaiveDate) -> String {
    day.format("%-d %b, %Y").to_string()
}

/// Backend filter selecting submissions inside any of the ranges. The
/// backend comparisons are exclusive, so each bound is widened by a day and
/// exact bucketing happens locally.
pub fn period_formula(ranges: &[DateRange]) -> String {
    let clauses: Vec<String> = ranges
        .iter()
        .map(|range| {
            format!(
                "AND(IS_AFTER({{{field}}}, '{after}'), IS_BEFORE({{{field}}}, '{before}'))",
                field = fields::SUBMITTED_ON,
                after = formula_date(range.from - Duration::days(1)),
                before = formula_date(range.to + Duration::days(1)),
            )
        })
        .collect();
    format!("OR({})", clauses.join(", "))
}

/// Read-only client for the tabular backend holding reviews and check-ins.
pub struct AirtableSource {
    client: reqwest::Client,
    config: BackendConfig,
}

impl AirtableSource {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub async fn fetch_reviews(&self, ranges: &[DateRange]) -> Result<Vec<Review>, SourceError> {
        self.fetch_table(&self.config.review_table, ranges).await
    }

    /// Check-in records, when a check-in table is configured.
    pub async fn fetch_check_ins(
        &self,
        ranges: &[DateRange],
    ) -> Result<Option<Vec<Review>>, SourceError> {
        match &self.config.indemnity_table {
            Some(table) => Ok(Some(self.fetch_table(table, ranges).await?)),
            None => Ok(None),
        }
    }

    /// Fetches every record of `table` inside the ranges, newest first,
    /// following the backend's offset cursor.
    pub async fn fetch_table(
        &self,
        table: &str,
        ranges: &[DateRange],
    ) -> Result<Vec<Review>, SourceError> {
        let url = format!(
            "{}/v0/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.base_id,
            table
        );
        let formula = period_formula(ranges);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut query: Vec<(&str, &str)> = vec![
                ("filterByFormula", formula.as_str()),
                ("sort[0][field]", fields::SUBMITTED_ON),
                ("sort[0][direction]", "desc"),
                ("pageSize", "100"),
            ];
            if let Some(cursor) = offset.as_deref() {
                query.push(("offset", cursor));
            }

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.config.api_key)
                .query(&query)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SourceError::Status {
                    status: status.as_u16(),
                    table: table.to_string(),
                    body,
                });
            }

            let page: BackendPage = response.json().await?;
            debug!(table, count = page.records.len(), "fetched page");
            records.extend(page.records.into_iter().map(Review::from));

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        info!(table, count = records.len(), "fetched records");
        Ok(records)
    }
}

/// Loads records exported to disk, as JSON or CSV depending on extension.
pub fn load_file(path: &Path) -> Result<Vec<Review>, SourceError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let records = match extension.as_deref() {
        Some("json") => {
            let raw = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_json(&raw)?
        }
        Some("csv") => {
            let reader = csv::Reader::from_path(path)?;
            parse_csv(reader)?
        }
        _ => {
            return Err(SourceError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Accepts a bare array of flat records or the backend's
/// `{"records": [{"id", "fields"}]}` envelope.
pub fn parse_json(raw: &str) -> Result<Vec<Review>, SourceError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Export {
        Flat(Vec<Review>),
        Envelope { records: Vec<BackendRecord> },
    }

    let records = match serde_json::from_str::<Export>(raw)? {
        Export::Flat(records) => records,
        Export::Envelope { records } => records.into_iter().map(Review::from).collect(),
    };
    Ok(records)
}

pub fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Review>, SourceError> {
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut fields = Map::new();
        let mut id = None;
        for (header, cell) in headers.iter().zip(row.iter()) {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            if header == "id" {
                id = Some(cell.to_string());
                continue;
            }
            fields.insert(header.to_string(), coerce_cell(cell));
        }
        records.push(Review::new(id, fields));
    }

    Ok(records)
}

fn coerce_cell(cell: &str) -> Value {
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(whole) = cell.parse::<i64>() {
        return Value::Number(whole.into());
    }
    if let Some(number) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn formula_widens_each_range_by_a_day() {
        let formula = period_formula(&[
            DateRange::new(date(2024, 3, 1), date(2024, 3, 31)),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 29)),
        ]);
        assert_eq!(
            formula,
            "OR(AND(IS_AFTER({Submitted On (UTC)}, '29 Feb, 2024'), \
             IS_BEFORE({Submitted On (UTC)}, '1 Apr, 2024')), \
             AND(IS_AFTER({Submitted On (UTC)}, '31 Jan, 2024'), \
             IS_BEFORE({Submitted On (UTC)}, '1 Mar, 2024')))"
        );
    }

    #[test]
    fn parses_backend_envelope() {
        let raw = r#"{"records": [
            {"id": "rec1", "createdTime": "2024-03-01T00:00:00.000Z",
             "fields": {"Full Name": "Avery Lee", "Your Accommodation": 5}}
        ]}"#;
        let records = parse_json(raw).expect("envelope parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("rec1"));
        assert_eq!(records[0].number("Your Accommodation"), 5.0);
    }

    #[test]
    fn parses_flat_array() {
        let raw = r#"[{"id": "rec2", "Nationality": "Kenya"}, {"The Food": "4"}]"#;
        let records = parse_json(raw).expect("array parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("Nationality").as_deref(), Some("Kenya"));
        assert_eq!(records[1].id, None);
        assert_eq!(records[1].number("The Food"), 4.0);
    }

    #[test]
    fn csv_cells_are_coerced() {
        let data = "id,Full Name,Your Accommodation,Would you recommend Tuludi to your friends?,Key Sightings\n\
                    rec1,Avery Lee,4,TRUE,\"Lion, Elephant\"\n\
                    rec2,,3.5,false,\n";
        let records = parse_csv(csv::Reader::from_reader(data.as_bytes())).expect("csv parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("rec1"));
        assert_eq!(records[0].number("Your Accommodation"), 4.0);
        assert!(records[0].flag("Would you recommend Tuludi to your friends?"));
        assert_eq!(records[0].tokens("Key Sightings"), vec!["Lion", "Elephant"]);
        assert_eq!(records[1].guest_name(), "Anonymous");
        assert_eq!(records[1].number("Your Accommodation"), 3.5);
        assert!(records[1].get("Key Sightings").is_none());
    }

    #[test]
    fn loads_files_by_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        let json_path = dir.path().join("reviews.json");
        let mut file = std::fs::File::create(&json_path).expect("create json");
        write!(file, r#"[{{"Full Name": "Jules"}}]"#).expect("write json");
        assert_eq!(load_file(&json_path).expect("json loads").len(), 1);

        let csv_path = dir.path().join("reviews.CSV");
        std::fs::write(&csv_path, "Full Name\nKiara\nAvery\n").expect("write csv");
        assert_eq!(load_file(&csv_path).expect("csv loads").len(), 2);

        let other = dir.path().join("reviews.xlsx");
        std::fs::write(&other, "").expect("write other");
        assert!(matches!(
            load_file(&other),
            Err(SourceError::UnsupportedFormat { .. })
        ));
    }

    /// Serves one canned response per connection and returns the request
    /// heads it saw, in order.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.expect("accept");
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                    let read = socket.read(&mut chunk).await.expect("read request");
                    if read == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..read]);
                }
                requests.push(String::from_utf8_lossy(&head).into_owned());

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket
                    .write_all(response.as_bytes())
                    .await
                    .expect("write response");
                let _ = socket.shutdown().await;
            }
            requests
        });
        (format!("http://{addr}"), handle)
    }

    fn backend(api_url: String) -> AirtableSource {
        AirtableSource::new(BackendConfig {
            api_url,
            api_key: "key123".to_string(),
            base_id: "app123".to_string(),
            review_table: "Reviews".to_string(),
            indemnity_table: None,
        })
    }

    fn march() -> DateRange {
        DateRange::new(date(2024, 3, 1), date(2024, 3, 31))
    }

    #[tokio::test]
    async fn fetch_follows_offset_cursor() {
        let (url, server) = serve(vec![
            (
                200,
                r#"{"records": [
                    {"id": "rec1", "fields": {"Full Name": "Avery"}},
                    {"id": "rec2", "fields": {"Full Name": "Jules"}}
                ], "offset": "itrNext"}"#,
            ),
            (
                200,
                r#"{"records": [{"id": "rec3", "fields": {"Full Name": "Kiara"}}]}"#,
            ),
        ])
        .await;

        let records = backend(url)
            .fetch_reviews(&[march()])
            .await
            .expect("both pages load");
        let ids: Vec<&str> = records
            .iter()
            .filter_map(|record| record.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["rec1", "rec2", "rec3"]);
        assert_eq!(records[2].guest_name(), "Kiara");

        let requests = server.await.expect("server finishes");
        assert_eq!(requests.len(), 2);
        let first = &requests[0];
        assert!(first.starts_with("GET /v0/app123/Reviews?"));
        assert!(first.contains("filterByFormula=OR%28AND%28IS_AFTER"));
        assert!(first.contains("sort%5B0%5D%5Bdirection%5D=desc"));
        assert!(first.contains("pageSize=100"));
        assert!(!first.contains("offset="));
        assert!(first.to_ascii_lowercase().contains("authorization: bearer key123"));
        assert!(requests[1].contains("offset=itrNext"));
    }

    #[tokio::test]
    async fn error_status_is_reported_with_table() {
        let (url, server) = serve(vec![(422, r#"{"error": "INVALID_FILTER_BY_FORMULA"}"#)]).await;

        let err = backend(url)
            .fetch_reviews(&[march()])
            .await
            .expect_err("422 fails the fetch");
        match err {
            SourceError::Status {
                status,
                table,
                body,
            } => {
                assert_eq!(status, 422);
                assert_eq!(table, "Reviews");
                assert!(body.contains("INVALID_FILTER_BY_FORMULA"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        server.await.expect("server finishes");
    }

    #[tokio::test]
    async fn check_ins_skipped_without_table() {
        let source = backend("http://127.0.0.1:9".to_string());
        let check_ins = source
            .fetch_check_ins(&[march()])
            .await
            .expect("no request is made");
        assert!(check_ins.is_none());
    }

    #[test]
    fn missing_json_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.json");
        assert!(matches!(load_file(&missing), Err(SourceError::Io { .. })));
    }
}
