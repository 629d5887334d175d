//! 벤더 페이로드 역직렬화를 위한 공통 헬퍼 함수.
//!
//! 벤더 피드는 같은 필드를 숫자, 문자열, null로 섞어 보내는 경우가 많습니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// 타임스탬프 문자열을 UTC로 해석합니다.
///
/// RFC 3339, 시간대 없는 `YYYY-MM-DDTHH:MM:SS[.fff]` (UTC로 간주),
/// 공백 구분자, 날짜만 있는 형식을 허용합니다.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 숫자 문자열을 Decimal로 해석합니다. 지수 표기도 허용합니다.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// 필수 타임스탬프 필드.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw)))
}

/// 선택 타임스탬프 필드. null과 빈 문자열은 `None`입니다.
pub fn deserialize_timestamp_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw))),
    }
}

/// 숫자, 숫자 문자열, null을 모두 받는 선택 Decimal 필드.
pub fn deserialize_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => parse_decimal(&n.to_string())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid decimal: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_decimal(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid decimal: {}", s))),
        Some(other) => Err(D::Error::custom(format!(
            "decimal must be a number or string, got {}",
            other
        ))),
    }
}

/// 문자열 또는 숫자를 문자열로 받는 필드 (식별자 등). null은 빈 문자열입니다.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text_opt(deserializer)?.unwrap_or_default())
}

/// 자유 텍스트 선택 필드. 숫자와 불리언은 문자열로 변환합니다.
pub fn deserialize_text_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected text, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2020, 1, 10, 13, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2020-01-10T13:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2020-01-10T14:30:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2020-01-10T13:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2020-01-10 13:30:00.000"), Some(expected));
        assert_eq!(
            parse_timestamp("2020-01-10"),
            Some(Utc.with_ymd_and_hms(2020, 1, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(" 1.25 "), Some(dec!(1.25)));
        assert_eq!(parse_decimal("1e-2"), Some(dec!(0.01)));
        assert_eq!(parse_decimal("abc"), None);
    }
}
