//! 유니버스 선택 함수 계약과 기본 선택기.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use altdata_core::{CoarseFundamental, CoarseSelectionConfig, Symbol};

/// 선택 결과. 정렬된 집합이므로 순회 순서가 항상 같고 중복이 없습니다.
pub type SelectionResult = BTreeSet<Symbol>;

/// 선택 함수가 반환하는 에러.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 레코드 목록에서 유니버스 구성 심볼을 고르는 선택 함수.
///
/// 입력은 유니버스의 레코드 종류로 미리 걸러져 있으며 공유 슬라이스로 전달됩니다.
/// 같은 입력에는 같은 결과를 반환해야 합니다.
pub trait UniverseSelector<R>: Send {
    fn select(&mut self, records: &[R]) -> Result<SelectionResult, BoxError>;
}

impl<R, F> UniverseSelector<R> for F
where
    F: FnMut(&[R]) -> Result<SelectionResult, BoxError> + Send,
{
    fn select(&mut self, records: &[R]) -> Result<SelectionResult, BoxError> {
        self(records)
    }
}

/// 실패하지 않는 클로저를 선택 함수로 감쌉니다.
///
/// ```
/// use altdata_core::{CoarseFundamental, Symbol};
/// use altdata_universe::{selector_fn, UniverseSelector};
///
/// let mut echo = selector_fn(|records: &[CoarseFundamental]| {
///     records.iter().map(|r| r.symbol.clone()).collect::<Vec<Symbol>>()
/// });
/// let empty: Vec<CoarseFundamental> = Vec::new();
/// assert!(echo.select(&empty).unwrap().is_empty());
/// ```
pub fn selector_fn<R, I, F>(mut f: F) -> impl FnMut(&[R]) -> Result<SelectionResult, BoxError> + Send
where
    F: FnMut(&[R]) -> I + Send,
    I: IntoIterator<Item = Symbol>,
{
    move |records: &[R]| Ok(f(records).into_iter().collect())
}

/// 거래대금 상위 종목 선택기.
///
/// 최소 종가(와 필요하면 펀더멘털 보유) 조건을 통과한 종목을 거래대금 내림차순으로
/// 정렬하고 상위 `count`개를 고릅니다. 거래대금이 같으면 심볼 오름차순입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct TopDollarVolume {
    pub count: usize,
    pub min_price: Decimal,
    pub require_fundamentals: bool,
}

impl TopDollarVolume {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            min_price: Decimal::ZERO,
            require_fundamentals: false,
        }
    }

    pub fn with_min_price(mut self, min_price: Decimal) -> Self {
        self.min_price = min_price;
        self
    }

    pub fn with_require_fundamentals(mut self, required: bool) -> Self {
        self.require_fundamentals = required;
        self
    }

    /// 조건을 통과한 종목을 순위대로 반환합니다.
    pub fn rank<'a>(&self, records: &'a [CoarseFundamental]) -> Vec<&'a CoarseFundamental> {
        let mut eligible: Vec<&CoarseFundamental> = records
            .iter()
            .filter(|r| r.close >= self.min_price)
            .filter(|r| !self.require_fundamentals || r.has_fundamental_data)
            .collect();

        eligible.sort_by(|a, b| {
            b.dollar_volume
                .cmp(&a.dollar_volume)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        eligible.truncate(self.count);
        eligible
    }
}

impl From<&CoarseSelectionConfig> for TopDollarVolume {
    fn from(config: &CoarseSelectionConfig) -> Self {
        Self::new(config.count)
            .with_min_price(config.min_price)
            .with_require_fundamentals(config.require_fundamentals)
    }
}

impl UniverseSelector<CoarseFundamental> for TopDollarVolume {
    fn select(&mut self, records: &[CoarseFundamental]) -> Result<SelectionResult, BoxError> {
        Ok(self
            .rank(records)
            .into_iter()
            .map(|r| r.symbol.clone())
            .collect())
    }
}
