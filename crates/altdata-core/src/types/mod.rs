//! 파이프라인 전반에서 사용되는 공통 타입.

mod kind;
mod resolution;
mod symbol;

pub use kind::*;
pub use resolution::*;
pub use symbol::*;
