//! 유니버스 선택.
//!
//! 이 crate는 다음을 제공합니다:
//! - 주입 가능한 선택 함수 계약 (`UniverseSelector`)
//! - 구독 설정과 선택 함수를 묶은 `Universe`와 한 틱 평가
//! - 기본 coarse 선택기 (`TopDollarVolume`)
//!
//! 이전 틱과의 멤버십 비교(추가/제거)는 외부 엔진의 몫입니다.

pub mod selector;
pub mod universe;

pub use selector::{selector_fn, BoxError, SelectionResult, TopDollarVolume, UniverseSelector};
pub use universe::{CoarseFundamentalUniverse, Evaluation, Universe};
