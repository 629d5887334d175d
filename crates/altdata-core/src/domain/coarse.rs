//! 미국 주식 coarse 펀더멘털 레코드 (유니버스 피드).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Symbol;

/// 하루치 coarse 파일의 한 줄. 종목별 가격/거래대금 요약입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoarseFundamental {
    /// 이 줄이 설명하는 주식 심볼
    pub symbol: Symbol,
    /// 벤더 보안 식별자
    pub sid: String,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: i64,
    /// 거래대금
    pub dollar_volume: Decimal,
    /// 펀더멘털 데이터 보유 여부
    pub has_fundamental_data: bool,
    /// 배당 조정 계수
    pub price_factor: Decimal,
    /// 분할 조정 계수
    pub split_factor: Decimal,
    /// 기준일 자정 (UTC)
    pub time: DateTime<Utc>,
    /// 기준일 다음 날 자정
    pub end_time: DateTime<Utc>,
}

impl CoarseFundamental {
    /// 기준일에서 시작/종료 시각을 계산합니다.
    pub fn period(as_of: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let time = as_of.and_time(chrono::NaiveTime::MIN).and_utc();
        (time, time + Duration::days(1))
    }

    /// 주요 값 (종가).
    pub fn value(&self) -> Decimal {
        self.close
    }

    /// 배당/분할 조정 가격.
    pub fn adjusted_price(&self) -> Decimal {
        self.close * self.price_factor * self.split_factor
    }
}
