//! Trading Economics 경제 캘린더 파서 (JSON 배열, PascalCase 키).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use altdata_core::{AltDataResult, CalendarEvent, Importance, Record, RecordKind};

use super::serde_helpers::{
    deserialize_lenient_string, deserialize_text_opt, deserialize_timestamp,
    deserialize_timestamp_opt,
};
use super::{ParseContext, RecordParser};

fn default_importance() -> Importance {
    Importance::Low
}

/// 캘린더 원본 레코드.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CalendarRow {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    calendar_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    date: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    country: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    event: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    reference: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    actual: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    previous: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    forecast: Option<String>,
    #[serde(default, rename = "TEForecast", deserialize_with = "deserialize_text_opt")]
    te_forecast: Option<String>,
    #[serde(default, rename = "URL", deserialize_with = "deserialize_text_opt")]
    url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    date_span: Option<String>,
    #[serde(default = "default_importance")]
    importance: Importance,
    #[serde(default, deserialize_with = "deserialize_timestamp_opt")]
    last_update: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    revised: Option<String>,
    #[serde(default, rename = "OCountry", deserialize_with = "deserialize_text_opt")]
    original_country: Option<String>,
    #[serde(default, rename = "OCategory", deserialize_with = "deserialize_text_opt")]
    original_category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    ticker: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    symbol: Option<String>,
}

/// 경제 캘린더 파서.
///
/// `end_time`은 발표 시각이며, `LastUpdate`가 더 늦으면 그 시각으로 승격됩니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalendarParser;

impl RecordParser for CalendarParser {
    fn kind(&self) -> RecordKind {
        RecordKind::CalendarEvent
    }

    fn parse(&self, content: &str, context: &ParseContext<'_>) -> AltDataResult<Vec<Record>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<CalendarRow> =
            serde_json::from_str(content).map_err(|e| context.error(e))?;

        let records: Vec<Record> = rows
            .into_iter()
            .map(|row| {
                Record::CalendarEvent(CalendarEvent {
                    end_time: CalendarEvent::effective_time(row.date, row.last_update),
                    calendar_id: row.calendar_id,
                    date: row.date,
                    country: row.country,
                    category: row.category,
                    event: row.event,
                    reference: row.reference,
                    source: row.source,
                    actual: row.actual,
                    previous: row.previous,
                    forecast: row.forecast,
                    te_forecast: row.te_forecast,
                    url: row.url,
                    date_span: row.date_span,
                    importance: row.importance,
                    last_update: row.last_update,
                    revised: row.revised,
                    original_country: row.original_country,
                    original_category: row.original_category,
                    ticker: row.ticker,
                    te_symbol: row.symbol,
                    symbol: None,
                })
            })
            .collect();

        let promoted = records
            .iter()
            .filter(|r| matches!(r, Record::CalendarEvent(e) if e.is_promoted()))
            .count();
        debug!(
            symbol = %context.symbol,
            count = records.len(),
            promoted,
            "캘린더 파싱 완료"
        );
        Ok(records)
    }
}
