//! 대체 데이터 파이프라인의 도메인 모델.

mod calendar;
mod coarse;
mod collection;
mod estimate;
mod record;
mod settings;
mod source;

pub use calendar::*;
pub use coarse::*;
pub use collection::*;
pub use estimate::*;
pub use record::*;
pub use settings::*;
pub use source::*;
