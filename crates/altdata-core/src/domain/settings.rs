//! 구독 및 유니버스 설정.
//!
//! 두 값 모두 생성 후 읽기 전용이며, 필요한 곳에 명시적으로 전달됩니다.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::types::{RecordKind, Resolution, Symbol};

/// 피드 하나의 구독 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionConfig {
    /// 피드 심볼
    pub symbol: Symbol,
    /// 레코드 종류
    pub kind: RecordKind,
    /// 데이터 해상도
    pub resolution: Resolution,
    /// 원본 데이터의 시간대
    pub data_time_zone: Tz,
    /// 거래소 시간대
    pub exchange_time_zone: Tz,
    /// 빈 구간을 직전 값으로 채울지 여부
    pub fill_forward: bool,
    /// 정규장 외 시간 포함 여부
    pub extended_hours: bool,
    /// 엔진 내부용 피드 여부 (사용자에게 노출되지 않음)
    pub is_internal_feed: bool,
    /// 사용자 정의 데이터 여부
    pub is_custom: bool,
    /// 필터링 구독 여부
    pub is_filtered_subscription: bool,
}

impl SubscriptionConfig {
    /// coarse 유니버스 피드 설정.
    ///
    /// 일 단위, 뉴욕 시간대, fill-forward 없음, 내부 피드입니다.
    pub fn coarse_universe(symbol: Symbol) -> Self {
        Self {
            symbol,
            kind: RecordKind::CoarseFundamental,
            resolution: Resolution::Daily,
            data_time_zone: Tz::America__New_York,
            exchange_time_zone: Tz::America__New_York,
            fill_forward: false,
            extended_hours: false,
            is_internal_feed: true,
            is_custom: false,
            is_filtered_subscription: false,
        }
    }

    /// 사용자 정의 대체 데이터 피드 설정 (UTC, 일 단위).
    pub fn custom(symbol: Symbol, kind: RecordKind) -> Self {
        Self {
            symbol,
            kind,
            resolution: Resolution::Daily,
            data_time_zone: Tz::UTC,
            exchange_time_zone: Tz::UTC,
            fill_forward: false,
            extended_hours: false,
            is_internal_feed: false,
            is_custom: true,
            is_filtered_subscription: true,
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_time_zones(mut self, data: Tz, exchange: Tz) -> Self {
        self.data_time_zone = data;
        self.exchange_time_zone = exchange;
        self
    }

    pub fn with_fill_forward(mut self, fill_forward: bool) -> Self {
        self.fill_forward = fill_forward;
        self
    }

    pub fn with_extended_hours(mut self, extended_hours: bool) -> Self {
        self.extended_hours = extended_hours;
        self
    }

    /// 심볼 접미사가 설정된 종류와 일치하는지 확인합니다.
    pub fn is_consistent(&self) -> bool {
        self.symbol.has_kind(self.kind)
    }
}

/// 유니버스가 추가하는 구독에 적용되는 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseSettings {
    /// 추가되는 구독의 해상도
    pub resolution: Resolution,
    /// fill-forward 여부
    pub fill_forward: bool,
    /// 정규장 외 시간 포함 여부
    pub extended_hours: bool,
    /// 유니버스에 머무르는 최소 기간 (초)
    pub minimum_time_in_universe_secs: i64,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::Minute,
            fill_forward: true,
            extended_hours: false,
            minimum_time_in_universe_secs: Duration::days(1).num_seconds(),
        }
    }
}

impl UniverseSettings {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    /// 유니버스에 머무르는 최소 기간.
    pub fn minimum_time_in_universe(&self) -> Duration {
        Duration::seconds(self.minimum_time_in_universe_secs)
    }

    pub fn with_minimum_time_in_universe(mut self, minimum: Duration) -> Self {
        self.minimum_time_in_universe_secs = minimum.num_seconds();
        self
    }
}
