//! # Altdata Core
//!
//! 대체 데이터(alternative data) 구독 및 유니버스 선택 파이프라인의 핵심 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 심볼 및 레코드 종류(접미사 규칙) 정의
//! - 데이터 소스 기술자 (위치, 전송 방식, 형식)
//! - 종류별 레코드 (Estimate, CalendarEvent, CoarseFundamental)
//! - 날짜별 레코드 컬렉션 조립
//! - 구독/유니버스 설정
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
