//! 분기 실적 추정치 레코드 (Estimize).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Symbol;

/// 회계 분기의 시작 시각(UTC 자정)을 계산합니다.
///
/// 분기 시작 월은 `quarter * 3 - 2` 입니다 (Q1 → 1월, Q4 → 10월).
/// 분기가 1~4 범위를 벗어나거나 연도가 표현 불가능하면 `None`을 반환합니다.
pub fn fiscal_period_start(year: i32, quarter: u32) -> Option<DateTime<Utc>> {
    if !(1..=4).contains(&quarter) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, quarter * 3 - 2, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 특정 회사의 분기 실적 추정치.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// 추정치 고유 식별자
    pub id: String,
    /// 추정 대상 회사의 티커
    pub ticker: String,
    /// 추정 대상 회계 연도
    pub fiscal_year: i32,
    /// 추정 대상 회계 분기 (1~4)
    pub fiscal_quarter: u32,
    /// 추정치 작성 시각 (UTC). 원본에 없으면 `None`
    pub created_at: Option<DateTime<Utc>>,
    /// 주당순이익 추정치
    pub eps: Option<Decimal>,
    /// 매출 추정치
    pub revenue: Option<Decimal>,
    /// 작성자 사용자명
    pub username: String,
    /// 작성자 애널리스트 ID
    pub analyst_id: String,
    /// 내부적으로 오류(스팸, 회계 기준 불일치 등)로 표시되었는지 여부
    pub flagged: bool,
    /// 소유 피드 심볼 (조립 시 채워짐)
    pub symbol: Option<Symbol>,
    /// 회계 분기 시작 시각
    pub end_time: DateTime<Utc>,
}

impl Estimate {
    /// 기본값 0을 적용한 EPS. 원본 값의 부재는 `eps` 필드로 확인합니다.
    pub fn value(&self) -> Decimal {
        self.eps.unwrap_or(Decimal::ZERO)
    }

    /// 내부적으로 오류로 표시된 추정치인지 확인합니다.
    pub fn is_flagged(&self) -> bool {
        self.flagged
    }
}

fn optional(value: &Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(Q{} {}) :: EPS: {} Revenue: {} on {} by {}({})",
            self.ticker,
            self.fiscal_quarter,
            self.fiscal_year,
            optional(&self.eps),
            optional(&self.revenue),
            self.end_time.format("%Y%m%d"),
            self.username,
            self.analyst_id
        )
    }
}
