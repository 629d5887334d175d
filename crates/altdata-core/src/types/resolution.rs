//! 구독 데이터 해상도 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 데이터 해상도.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// 틱 단위
    Tick,
    /// 초 단위
    Second,
    /// 분 단위
    Minute,
    /// 시간 단위
    Hour,
    /// 일 단위
    #[default]
    Daily,
}

impl Resolution {
    /// 이 해상도의 기간을 반환합니다. 틱은 고정 기간이 없으므로 0입니다.
    pub fn duration(&self) -> Duration {
        match self {
            Resolution::Tick => Duration::ZERO,
            Resolution::Second => Duration::from_secs(1),
            Resolution::Minute => Duration::from_secs(60),
            Resolution::Hour => Duration::from_secs(60 * 60),
            Resolution::Daily => Duration::from_secs(24 * 60 * 60),
        }
    }

    /// 이 해상도의 초 단위 값을 반환합니다.
    pub fn as_secs(&self) -> u64 {
        self.duration().as_secs()
    }

    /// 설정 파일에서 사용하는 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Tick => "tick",
            Resolution::Second => "second",
            Resolution::Minute => "minute",
            Resolution::Hour => "hour",
            Resolution::Daily => "daily",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tick" => Ok(Resolution::Tick),
            "second" | "1s" => Ok(Resolution::Second),
            "minute" | "1m" => Ok(Resolution::Minute),
            "hour" | "hourly" | "1h" => Ok(Resolution::Hour),
            "daily" | "day" | "1d" => Ok(Resolution::Daily),
            _ => Err(format!("Invalid resolution: {}", s)),
        }
    }
}
