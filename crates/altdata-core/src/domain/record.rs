//! 종류별 레코드를 하나로 묶는 태그드 유니온.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CalendarEvent, CoarseFundamental, Estimate};
use crate::types::{RecordKind, Symbol};

/// 파싱된 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Estimate(Estimate),
    CalendarEvent(CalendarEvent),
    CoarseFundamental(CoarseFundamental),
}

impl Record {
    /// 레코드의 권위 있는 시각.
    pub fn end_time(&self) -> DateTime<Utc> {
        match self {
            Record::Estimate(r) => r.end_time,
            Record::CalendarEvent(r) => r.end_time,
            Record::CoarseFundamental(r) => r.end_time,
        }
    }

    /// 기본값이 적용된 주요 값.
    pub fn value(&self) -> Decimal {
        match self {
            Record::Estimate(r) => r.value(),
            Record::CalendarEvent(r) => r.value(),
            Record::CoarseFundamental(r) => r.value(),
        }
    }

    /// 레코드 종류.
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Estimate(_) => RecordKind::Estimate,
            Record::CalendarEvent(_) => RecordKind::CalendarEvent,
            Record::CoarseFundamental(_) => RecordKind::CoarseFundamental,
        }
    }

    /// 레코드가 속한 심볼. 조립 전의 추정치/캘린더 레코드는 `None`입니다.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Record::Estimate(r) => r.symbol.as_ref(),
            Record::CalendarEvent(r) => r.symbol.as_ref(),
            Record::CoarseFundamental(r) => Some(&r.symbol),
        }
    }

    /// 심볼이 비어 있으면 소유 심볼로 채웁니다. 이미 심볼이 있으면 그대로 둡니다.
    pub fn stamp(&mut self, owner: &Symbol) {
        let slot = match self {
            Record::Estimate(r) => &mut r.symbol,
            Record::CalendarEvent(r) => &mut r.symbol,
            Record::CoarseFundamental(_) => return,
        };
        if slot.is_none() {
            *slot = Some(owner.clone());
        }
    }
}

/// `Record`의 개별 변형 타입이 구현하는 트레이트.
///
/// 유니버스 선택기는 이 트레이트로 이질적인 컬렉션에서 자기 종류만 골라냅니다.
pub trait RecordVariant: Clone + Send + Sync + 'static {
    /// 이 변형의 레코드 종류.
    const KIND: RecordKind;

    /// 레코드가 이 변형이면 참조를 반환합니다.
    fn from_record(record: &Record) -> Option<&Self>;

    /// 레코드로 감쌉니다.
    fn into_record(self) -> Record;
}

macro_rules! impl_record_variant {
    ($ty:ident, $kind:ident) => {
        impl RecordVariant for $ty {
            const KIND: RecordKind = RecordKind::$kind;

            fn from_record(record: &Record) -> Option<&Self> {
                match record {
                    Record::$kind(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_record(self) -> Record {
                Record::$kind(self)
            }
        }

        impl From<$ty> for Record {
            fn from(value: $ty) -> Self {
                Record::$kind(value)
            }
        }
    };
}

impl_record_variant!(Estimate, Estimate);
impl_record_variant!(CalendarEvent, CalendarEvent);
impl_record_variant!(CoarseFundamental, CoarseFundamental);
