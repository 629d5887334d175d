//! 레코드 종류와 심볼 접미사 규칙.
//!
//! 각 레코드 종류는 고유한 심볼 접미사를 가집니다. 로케이터와 파서는
//! 이 접미사로 어떤 구현을 적용할지 결정합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::FileFormat;

/// 레코드 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// 분기 실적 추정치 (Estimize)
    Estimate,
    /// 경제 캘린더 이벤트 (Trading Economics)
    CalendarEvent,
    /// 미국 주식 coarse 펀더멘털 (유니버스 피드)
    CoarseFundamental,
}

impl RecordKind {
    /// 등록된 모든 종류.
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Estimate,
        RecordKind::CalendarEvent,
        RecordKind::CoarseFundamental,
    ];

    /// 이 종류의 심볼 접미사.
    pub fn suffix(&self) -> &'static str {
        match self {
            RecordKind::Estimate => ".E",
            RecordKind::CalendarEvent => ".C",
            RecordKind::CoarseFundamental => ".U",
        }
    }

    /// 원본 파일의 형식.
    pub fn file_format(&self) -> FileFormat {
        match self {
            RecordKind::Estimate | RecordKind::CalendarEvent => FileFormat::WholeFileCollection,
            RecordKind::CoarseFundamental => FileFormat::LineDelimited,
        }
    }

    /// 심볼 값의 접미사로 종류를 찾습니다.
    pub fn from_symbol_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| value.ends_with(kind.suffix()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Estimate => write!(f, "estimate"),
            RecordKind::CalendarEvent => write!(f, "calendar_event"),
            RecordKind::CoarseFundamental => write!(f, "coarse_fundamental"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "estimate" | "e" => Ok(RecordKind::Estimate),
            "calendar_event" | "calendar" | "c" => Ok(RecordKind::CalendarEvent),
            "coarse_fundamental" | "coarse" | "u" => Ok(RecordKind::CoarseFundamental),
            _ => Err(format!("Unknown record kind: {}", s)),
        }
    }
}
