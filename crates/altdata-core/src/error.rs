//! 파이프라인의 에러 타입.
//!
//! 소스 해석, 레코드 파싱, 유니버스 선택 단계에서 발생하는 에러를 정의합니다.
//! 해석/선택 에러는 현재 작업 단위를 중단시키고, 파싱 에러는 해당 날짜의
//! 빈 컬렉션으로 강등됩니다.

use thiserror::Error;

use crate::types::RecordKind;

/// 파이프라인 에러.
#[derive(Debug, Error)]
pub enum AltDataError {
    /// 심볼 접미사가 요청된 레코드 종류와 일치하지 않음
    #[error("Invalid symbol {symbol}: expected suffix '{}' for {expected}", expected.suffix())]
    InvalidSymbolKind {
        symbol: String,
        expected: RecordKind,
    },

    /// 잘못된 형식의 페이로드 (소스 하나에 한정)
    #[error("Parse error in {location}: {message}")]
    Parse { location: String, message: String },

    /// 주입된 선택 함수가 실패함
    #[error("Selection error: {0}")]
    Selection(String),

    /// 잘못된 입력
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 외부 스케줄러가 진행 중인 평가를 취소함
    #[error("Evaluation cancelled")]
    Cancelled,
}

/// 파이프라인 작업을 위한 Result 타입.
pub type AltDataResult<T> = Result<T, AltDataError>;

impl AltDataError {
    /// 파싱 에러를 생성합니다.
    pub fn parse(location: impl Into<String>, message: impl ToString) -> Self {
        AltDataError::Parse {
            location: location.into(),
            message: message.to_string(),
        }
    }

    /// 현재 작업 단위를 중단시켜야 하는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// 빈 결과로 강등하고 계속 진행할 수 있는 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AltDataError::Parse { .. })
    }
}

impl From<config::ConfigError> for AltDataError {
    fn from(err: config::ConfigError) -> Self {
        AltDataError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_recoverable() {
        let err = AltDataError::parse("abc.zip", "expected array");
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_resolution_and_selection_errors_are_fatal() {
        let err = AltDataError::InvalidSymbolKind {
            symbol: "ABC".to_string(),
            expected: RecordKind::Estimate,
        };
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Invalid symbol ABC: expected suffix '.E' for estimate"
        );

        assert!(AltDataError::Selection("boom".to_string()).is_fatal());
        assert!(AltDataError::Cancelled.is_fatal());
    }
}
