//! 대체 데이터 소스 해석 및 로딩.
//!
//! 이 crate는 다음을 제공합니다:
//! - 심볼/날짜/모드로 원본 위치를 결정하는 소스 로케이터
//! - 레코드 종류별 파서와 종류 인덱스 파서 테이블
//! - 외부 fetcher 경계 (`SourceFetcher`)
//! - 피드 파이프라인: 해석 → 가져오기 → 파싱 → 조립, 다중 심볼 병렬 로딩과 취소 지원

pub mod fetch;
pub mod locator;
pub mod parser;
pub mod pipeline;

pub use fetch::{LocalFileFetcher, SourceFetcher, StaticFetcher};
pub use locator::SourceLocator;
pub use parser::{parser_for, ParseContext, RecordParser};
pub use pipeline::{CancellationFlag, FeedPipeline, FeedRequest, LoadResult};
