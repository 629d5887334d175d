//! Estimize 추정치 파서 (JSON 배열).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use altdata_core::{fiscal_period_start, AltDataResult, Estimate, Record, RecordKind};

use super::serde_helpers::{
    deserialize_decimal_opt, deserialize_lenient_string, deserialize_timestamp_opt,
};
use super::{ParseContext, RecordParser};

/// Estimize 추정치 원본 레코드.
///
/// 회계 연도와 분기만 필수이고 나머지 필드는 없으면 기본값을 씁니다.
#[derive(Debug, Deserialize)]
struct EstimateRow {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    ticker: String,
    fiscal_year: i32,
    fiscal_quarter: u32,
    #[serde(default, deserialize_with = "deserialize_timestamp_opt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_decimal_opt")]
    eps: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_decimal_opt")]
    revenue: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    username: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    analyst_id: String,
    #[serde(default)]
    flagged: bool,
}

/// 추정치 파서.
///
/// `end_time`은 회계 분기 시작일입니다 (Q1 → 1월 1일, Q4 → 10월 1일).
#[derive(Debug, Default, Clone, Copy)]
pub struct EstimateParser;

impl RecordParser for EstimateParser {
    fn kind(&self) -> RecordKind {
        RecordKind::Estimate
    }

    fn parse(&self, content: &str, context: &ParseContext<'_>) -> AltDataResult<Vec<Record>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<EstimateRow> =
            serde_json::from_str(content).map_err(|e| context.error(e))?;

        let records = rows
            .into_iter()
            .map(|row| {
                let end_time = fiscal_period_start(row.fiscal_year, row.fiscal_quarter)
                    .ok_or_else(|| {
                        context.error(format!(
                            "estimate {}: fiscal quarter {} of {} is out of range",
                            row.id, row.fiscal_quarter, row.fiscal_year
                        ))
                    })?;
                Ok(Record::Estimate(Estimate {
                    id: row.id,
                    ticker: row.ticker,
                    fiscal_year: row.fiscal_year,
                    fiscal_quarter: row.fiscal_quarter,
                    created_at: row.created_at,
                    eps: row.eps,
                    revenue: row.revenue,
                    username: row.username,
                    analyst_id: row.analyst_id,
                    flagged: row.flagged,
                    symbol: None,
                    end_time,
                }))
            })
            .collect::<AltDataResult<Vec<_>>>()?;

        debug!(symbol = %context.symbol, count = records.len(), "추정치 파싱 완료");
        Ok(records)
    }
}
