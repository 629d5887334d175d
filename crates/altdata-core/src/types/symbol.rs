//! 심볼 정의.
//!
//! 심볼은 불투명한 상품 식별자이며, 대체 데이터 피드의 경우 끝에 붙은
//! 접미사(`.E`, `.C`, `.U`)가 레코드 종류를 나타냅니다.
//! 예: `AAPL.E` (AAPL 추정치), `USA.C` (미국 경제 캘린더), `USA.U` (미국 coarse 유니버스).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RecordKind;

/// 거래 가능한 상품 또는 데이터 피드를 나타내는 심볼.
///
/// 정렬 가능하므로 선택 결과(`BTreeSet<Symbol>`)의 순회 순서가 항상 동일합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// 새 심볼을 생성합니다. 앞뒤 공백은 제거됩니다.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    /// 기본 식별자에 종류 접미사를 붙여 피드 심볼을 생성합니다.
    pub fn for_kind(base: impl AsRef<str>, kind: RecordKind) -> Self {
        Self::new(format!("{}{}", base.as_ref().trim(), kind.suffix()))
    }

    /// 미국 시장 coarse 유니버스 심볼 (`USA.U`).
    pub fn coarse_universe(market: impl AsRef<str>) -> Self {
        Self::for_kind(market.as_ref().to_uppercase(), RecordKind::CoarseFundamental)
    }

    /// 심볼 값 전체.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// 접미사로 판별한 레코드 종류.
    pub fn kind(&self) -> Option<RecordKind> {
        RecordKind::from_symbol_value(&self.0)
    }

    /// 주어진 종류의 접미사로 끝나는지 확인합니다.
    pub fn has_kind(&self, kind: RecordKind) -> bool {
        self.0.ends_with(kind.suffix())
    }

    /// 접미사를 제외한 기본 식별자.
    ///
    /// 등록된 접미사가 없으면 값 전체를 반환합니다.
    pub fn base(&self) -> &str {
        match self.kind() {
            Some(kind) => &self.0[..self.0.len() - kind.suffix().len()],
            None => &self.0,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = Self::new(s);
        if symbol.0.is_empty() {
            return Err("Symbol must not be empty".to_string());
        }
        Ok(symbol)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
