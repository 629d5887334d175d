//! 유니버스 정의와 틱 평가.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use tracing::{info, warn};

use altdata_core::{
    feed_span, AltDataError, AltDataResult, CoarseFundamental, Collection, RecordVariant,
    SubscriptionConfig, Symbol, UniverseSettings,
};
use altdata_source::{CancellationFlag, FeedPipeline, SourceFetcher};

use crate::selector::{SelectionResult, UniverseSelector};

/// 한 틱 평가 결과.
#[derive(Debug)]
pub struct Evaluation {
    /// 선택된 심볼 집합
    pub selection: SelectionResult,
    /// 파싱 에러가 있었다면 그 원인 (선택은 빈 컬렉션으로 수행됨)
    pub parse_error: Option<AltDataError>,
}

/// 레코드 종류 `R`의 피드를 기반으로 하는 동적 종목 집합.
///
/// 선택은 `&mut self`를 요구하므로 같은 유니버스를 동시에 평가할 수 없습니다.
pub struct Universe<R: RecordVariant> {
    config: SubscriptionConfig,
    settings: UniverseSettings,
    selector: Box<dyn UniverseSelector<R>>,
}

/// 미국 주식 coarse 펀더멘털 유니버스.
pub type CoarseFundamentalUniverse = Universe<CoarseFundamental>;

impl<R: RecordVariant> fmt::Debug for Universe<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("config", &self.config)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<R: RecordVariant> Universe<R> {
    /// 유니버스를 생성합니다.
    ///
    /// # Errors
    ///
    /// 구독 설정의 종류나 심볼 접미사가 `R`과 맞지 않으면 `InvalidSymbolKind`.
    pub fn new(
        config: SubscriptionConfig,
        settings: UniverseSettings,
        selector: impl UniverseSelector<R> + 'static,
    ) -> AltDataResult<Self> {
        if config.kind != R::KIND || !config.symbol.has_kind(R::KIND) {
            return Err(AltDataError::InvalidSymbolKind {
                symbol: config.symbol.to_string(),
                expected: R::KIND,
            });
        }
        Ok(Self {
            config,
            settings,
            selector: Box::new(selector),
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.config.symbol
    }

    pub fn config(&self) -> &SubscriptionConfig {
        &self.config
    }

    pub fn settings(&self) -> &UniverseSettings {
        &self.settings
    }

    /// 컬렉션에서 `R` 종류의 레코드만 골라 선택 함수를 실행합니다.
    ///
    /// 선택 함수 에러는 `Selection` 에러로 전파되며 대체 결과는 없습니다.
    pub fn select_symbols(
        &mut self,
        utc_time: DateTime<Utc>,
        data: &Collection,
    ) -> AltDataResult<SelectionResult> {
        let records = data.of_kind::<R>();
        let selection = self.selector.select(&records).map_err(|e| {
            warn!(universe = %self.config.symbol, error = %e, "선택 함수 실패");
            AltDataError::Selection(e.to_string())
        })?;

        info!(
            universe = %self.config.symbol,
            time = %utc_time,
            candidates = records.len(),
            selected = selection.len(),
            "유니버스 선택 완료"
        );
        Ok(selection)
    }

    /// 한 틱을 평가합니다: 해석 → 가져오기 → 파싱 → 조립 → 선택.
    pub fn evaluate(
        &mut self,
        pipeline: &FeedPipeline,
        fetcher: &dyn SourceFetcher,
        as_of: NaiveDate,
        is_live: bool,
    ) -> AltDataResult<Evaluation> {
        self.evaluate_with_cancel(pipeline, fetcher, as_of, is_live, &CancellationFlag::new())
    }

    /// 취소 가능한 틱 평가. 취소된 틱은 선택 함수에 도달하지 않습니다.
    pub fn evaluate_with_cancel(
        &mut self,
        pipeline: &FeedPipeline,
        fetcher: &dyn SourceFetcher,
        as_of: NaiveDate,
        is_live: bool,
        cancel: &CancellationFlag,
    ) -> AltDataResult<Evaluation> {
        let _span = feed_span!("evaluate", self.config.symbol, R::KIND, as_of).entered();

        if pipeline.kind() != R::KIND {
            return Err(AltDataError::InvalidInput(format!(
                "pipeline for {} cannot feed a {} universe",
                pipeline.kind(),
                R::KIND
            )));
        }

        cancel.check()?;
        let loaded = pipeline.fetch_and_load(fetcher, &self.config.symbol, as_of, is_live)?;
        cancel.check()?;

        let utc_time = as_of.and_time(NaiveTime::MIN).and_utc();
        let selection = self.select_symbols(utc_time, &loaded.collection)?;
        Ok(Evaluation {
            selection,
            parse_error: loaded.error,
        })
    }
}

impl Universe<CoarseFundamental> {
    /// 미국 시장(`USA.U`) coarse 유니버스.
    pub fn coarse(
        settings: UniverseSettings,
        selector: impl UniverseSelector<CoarseFundamental> + 'static,
    ) -> Self {
        Self {
            config: SubscriptionConfig::coarse_universe(Symbol::coarse_universe("usa")),
            settings,
            selector: Box::new(selector),
        }
    }

    /// 지정한 심볼의 coarse 유니버스.
    pub fn coarse_with_symbol(
        symbol: Symbol,
        settings: UniverseSettings,
        selector: impl UniverseSelector<CoarseFundamental> + 'static,
    ) -> AltDataResult<Self> {
        Self::new(SubscriptionConfig::coarse_universe(symbol), settings, selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{selector_fn, BoxError};
    use altdata_core::{Estimate, RecordKind, Resolution};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 2).unwrap()
    }

    #[test]
    fn test_coarse_universe_defaults() {
        let universe = CoarseFundamentalUniverse::coarse(
            UniverseSettings::new(Resolution::Daily),
            selector_fn(|_: &[CoarseFundamental]| Vec::<Symbol>::new()),
        );
        assert_eq!(universe.symbol().value(), "USA.U");
        assert!(universe.config().is_internal_feed);
        assert_eq!(universe.config().resolution, Resolution::Daily);
    }

    #[test]
    fn test_new_rejects_mismatched_kind() {
        let config = SubscriptionConfig::custom(Symbol::new("ABC.E"), RecordKind::Estimate);
        let err = Universe::<CoarseFundamental>::new(
            config,
            UniverseSettings::default(),
            selector_fn(|_: &[CoarseFundamental]| Vec::<Symbol>::new()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AltDataError::InvalidSymbolKind { expected: RecordKind::CoarseFundamental, .. }
        ));

        let err = CoarseFundamentalUniverse::coarse_with_symbol(
            Symbol::new("USA"),
            UniverseSettings::default(),
            selector_fn(|_: &[CoarseFundamental]| Vec::<Symbol>::new()),
        )
        .unwrap_err();
        assert!(matches!(err, AltDataError::InvalidSymbolKind { .. }));
    }

    #[test]
    fn test_selection_error_propagates() {
        let config = SubscriptionConfig::custom(Symbol::new("ABC.E"), RecordKind::Estimate);
        let failing = |_: &[Estimate]| -> Result<SelectionResult, BoxError> {
            Err("upstream ranking unavailable".into())
        };
        let mut universe =
            Universe::<Estimate>::new(config, UniverseSettings::default(), failing).unwrap();

        let collection = Collection::empty(Symbol::new("ABC.E"), as_of());
        let err = universe
            .select_symbols(as_of().and_time(NaiveTime::MIN).and_utc(), &collection)
            .unwrap_err();
        match err {
            AltDataError::Selection(message) => {
                assert_eq!(message, "upstream ranking unavailable")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
