//! 경제 캘린더 이벤트 레코드 (Trading Economics).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Symbol;

/// 이벤트 중요도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    /// 벤더의 숫자 코드(1~3)를 변환합니다.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Importance::Low),
            2 => Some(Importance::Medium),
            3 => Some(Importance::High),
            _ => None,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Importance::Low => write!(f, "Low"),
            Importance::Medium => write!(f, "Medium"),
            Importance::High => write!(f, "High"),
        }
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u64>() {
            return Importance::from_code(code).ok_or_else(|| format!("Unknown importance: {}", s));
        }
        match trimmed.to_lowercase().as_str() {
            "low" => Ok(Importance::Low),
            "medium" => Ok(Importance::Medium),
            "high" => Ok(Importance::High),
            _ => Err(format!("Unknown importance: {}", s)),
        }
    }
}

struct ImportanceVisitor;

impl<'de> Visitor<'de> for ImportanceVisitor {
    type Value = Importance;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("low, medium, high or a numeric code 1-3")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Importance, E> {
        Importance::from_code(value)
            .ok_or_else(|| E::custom(format!("Unknown importance code: {}", value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Importance, E> {
        u64::try_from(value)
            .ok()
            .and_then(Importance::from_code)
            .ok_or_else(|| E::custom(format!("Unknown importance code: {}", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Importance, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Importance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ImportanceVisitor)
    }
}

/// 경제 캘린더 이벤트.
///
/// 벤더 피드의 자유 텍스트 필드는 null일 수 있으므로 `Option<String>`으로 보관합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// 캘린더 이벤트 고유 식별자
    pub calendar_id: String,
    /// 발표 시각 (UTC)
    pub date: DateTime<Utc>,
    /// 국가
    pub country: Option<String>,
    /// 지표 분류
    pub category: Option<String>,
    /// 이벤트 명
    pub event: Option<String>,
    /// 기준 기간
    pub reference: Option<String>,
    /// 발표 기관
    pub source: Option<String>,
    /// 실제 발표값 (원문)
    pub actual: Option<String>,
    /// 이전 값
    pub previous: Option<String>,
    /// 컨센서스 예측치
    pub forecast: Option<String>,
    /// Trading Economics 자체 예측치
    pub te_forecast: Option<String>,
    /// 상세 페이지 URL
    pub url: Option<String>,
    /// 기간 구분
    pub date_span: Option<String>,
    /// 중요도
    pub importance: Importance,
    /// 최종 수정 시각
    pub last_update: Option<DateTime<Utc>>,
    /// 수정된 이전 값
    pub revised: Option<String>,
    /// 원본 국가명
    pub original_country: Option<String>,
    /// 원본 분류명
    pub original_category: Option<String>,
    /// 벤더 티커
    pub ticker: Option<String>,
    /// 벤더 심볼 (피드 심볼과 별개)
    pub te_symbol: Option<String>,
    /// 소유 피드 심볼 (조립 시 채워짐)
    pub symbol: Option<Symbol>,
    /// 발표 시각과 최종 수정 시각 중 늦은 쪽
    pub end_time: DateTime<Utc>,
}

impl CalendarEvent {
    /// 이벤트의 유효 시각을 계산합니다. 최종 수정 시각이 더 늦으면 그 시각으로 승격됩니다.
    pub fn effective_time(date: DateTime<Utc>, last_update: Option<DateTime<Utc>>) -> DateTime<Utc> {
        match last_update {
            Some(updated) if updated > date => updated,
            _ => date,
        }
    }

    /// 실제 발표값을 숫자로 해석합니다. 끝의 `%`는 제거합니다.
    pub fn actual_value(&self) -> Option<Decimal> {
        let raw = self.actual.as_deref()?.trim();
        let raw = raw.strip_suffix('%').unwrap_or(raw).trim();
        Decimal::from_str(raw).ok()
    }

    /// 기본값 0을 적용한 실제 발표값.
    pub fn value(&self) -> Decimal {
        self.actual_value().unwrap_or(Decimal::ZERO)
    }

    /// 마지막 수정으로 유효 시각이 승격되었는지 확인합니다.
    pub fn is_promoted(&self) -> bool {
        self.end_time > self.date
    }

    fn display_symbol(&self) -> &str {
        match self.te_symbol.as_deref() {
            Some(symbol) if !symbol.trim().is_empty() => symbol,
            _ => self.ticker.as_deref().unwrap_or_default(),
        }
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {}): {} : Importance.{}",
            self.display_symbol(),
            self.country.as_deref().unwrap_or_default(),
            self.category.as_deref().unwrap_or_default(),
            self.event.as_deref().unwrap_or_default(),
            self.importance
        )
    }
}
