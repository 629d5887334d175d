//! CLI 명령어 구현 모듈.

pub mod parse;
pub mod resolve;
pub mod select;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use altdata_core::{RecordKind, Symbol};

/// YYYY-MM-DD 형식의 날짜를 파싱합니다.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

/// 심볼을 파싱하고 접미사로 레코드 종류를 결정합니다.
pub fn parse_feed_symbol(s: &str) -> Result<(Symbol, RecordKind)> {
    let symbol: Symbol = s.parse().map_err(|e: String| anyhow!(e))?;
    let kind = symbol.kind().ok_or_else(|| {
        anyhow!(
            "Symbol {} has no known kind suffix (.E estimate, .C calendar, .U coarse)",
            symbol
        )
    })?;
    Ok((symbol, kind))
}
