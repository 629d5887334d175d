//! 레코드 파서.
//!
//! 레코드 종류마다 파서가 하나씩 있으며, [`parser_for`]가 종류로 파서를 고릅니다.
//! 파서는 이미 가져온 원본 텍스트를 받아 정렬되지 않은 레코드 목록을 반환합니다.
//! 정렬과 심볼 채우기는 [`altdata_core::Collection::assemble`]이 담당합니다.

mod calendar;
mod coarse;
mod estimate;
mod serde_helpers;

pub use calendar::CalendarParser;
pub use coarse::CoarseFundamentalParser;
pub use estimate::EstimateParser;

use chrono::NaiveDate;

use altdata_core::{AltDataError, AltDataResult, Record, RecordKind, Symbol};

/// 파싱 대상 소스에 대한 정보.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// 피드 심볼
    pub symbol: &'a Symbol,
    /// 요청 기준일
    pub as_of: NaiveDate,
    /// 원본 위치 (에러 메시지용)
    pub location: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(symbol: &'a Symbol, as_of: NaiveDate, location: &'a str) -> Self {
        Self {
            symbol,
            as_of,
            location,
        }
    }

    /// 이 소스에 한정된 파싱 에러를 생성합니다.
    pub fn error(&self, message: impl ToString) -> AltDataError {
        AltDataError::parse(self.location, message)
    }
}

/// 원본 텍스트를 레코드로 변환하는 파서.
pub trait RecordParser: Send + Sync {
    /// 이 파서가 생성하는 레코드 종류.
    fn kind(&self) -> RecordKind;

    /// 원본 텍스트를 파싱합니다.
    ///
    /// 빈 텍스트(공백만 있는 경우 포함)는 빈 목록을 반환합니다.
    /// 잘못된 형식이면 소스에 한정된 `Parse` 에러를 반환합니다.
    fn parse(&self, content: &str, context: &ParseContext<'_>) -> AltDataResult<Vec<Record>>;
}

static ESTIMATE_PARSER: EstimateParser = EstimateParser;
static CALENDAR_PARSER: CalendarParser = CalendarParser;
static COARSE_PARSER: CoarseFundamentalParser = CoarseFundamentalParser;

/// 레코드 종류에 해당하는 파서를 반환합니다.
pub fn parser_for(kind: RecordKind) -> &'static dyn RecordParser {
    match kind {
        RecordKind::Estimate => &ESTIMATE_PARSER,
        RecordKind::CalendarEvent => &CALENDAR_PARSER,
        RecordKind::CoarseFundamental => &COARSE_PARSER,
    }
}
