//! coarse 펀더멘털 파서 (헤더 없는 CSV, 한 줄에 종목 하나).
//!
//! 열 순서: `sid,symbol,close,volume,dollar_volume,has_fundamental_data[,price_factor,split_factor]`

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use altdata_core::{AltDataResult, CoarseFundamental, Record, RecordKind, Symbol};

use super::serde_helpers::parse_decimal;
use super::{ParseContext, RecordParser};

const LEGACY_COLUMNS: usize = 6;
const FACTOR_COLUMNS: usize = 8;

/// coarse 펀더멘털 파서.
///
/// `time`은 기준일 자정(UTC), `end_time`은 그 다음 날 자정입니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoarseFundamentalParser;

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_volume(raw: &str) -> Option<i64> {
    raw.parse::<i64>()
        .ok()
        .or_else(|| parse_decimal(raw).and_then(|v| v.trunc().to_i64()))
}

impl RecordParser for CoarseFundamentalParser {
    fn kind(&self) -> RecordKind {
        RecordKind::CoarseFundamental
    }

    fn parse(&self, content: &str, context: &ParseContext<'_>) -> AltDataResult<Vec<Record>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let (time, end_time) = CoarseFundamental::period(context.as_of);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let line = idx + 1;
            let row = result.map_err(|e| context.error(format!("line {}: {}", line, e)))?;

            if row.len() != LEGACY_COLUMNS && row.len() != FACTOR_COLUMNS {
                return Err(context.error(format!(
                    "line {}: expected {} or {} columns, found {}",
                    line,
                    LEGACY_COLUMNS,
                    FACTOR_COLUMNS,
                    row.len()
                )));
            }

            let field = |i: usize| row.get(i).unwrap_or_default();
            let decimal = |i: usize, name: &str| {
                parse_decimal(field(i)).ok_or_else(|| {
                    context.error(format!("line {}: invalid {} '{}'", line, name, field(i)))
                })
            };

            let symbol = Symbol::new(field(1));
            if symbol.value().is_empty() {
                return Err(context.error(format!("line {}: empty symbol", line)));
            }
            let volume = parse_volume(field(3)).ok_or_else(|| {
                context.error(format!("line {}: invalid volume '{}'", line, field(3)))
            })?;
            let has_fundamental_data = parse_bool(field(5)).ok_or_else(|| {
                context.error(format!("line {}: invalid flag '{}'", line, field(5)))
            })?;
            let (price_factor, split_factor) = if row.len() == FACTOR_COLUMNS {
                (decimal(6, "price factor")?, decimal(7, "split factor")?)
            } else {
                (Decimal::ONE, Decimal::ONE)
            };

            records.push(Record::CoarseFundamental(CoarseFundamental {
                symbol,
                sid: field(0).to_string(),
                close: decimal(2, "close")?,
                volume,
                dollar_volume: decimal(4, "dollar volume")?,
                has_fundamental_data,
                price_factor,
                split_factor,
                time,
                end_time,
            }));
        }

        debug!(
            symbol = %context.symbol,
            date = %context.as_of,
            count = records.len(),
            "coarse 파싱 완료"
        );
        Ok(records)
    }
}
