//! 피드 파이프라인.
//!
//! 레코드 종류 하나에 대해 해석 → 가져오기 → 파싱 → 조립을 수행합니다.
//! 해석 에러는 요청을 중단시키고, 파싱 에러는 빈 컬렉션과 함께 보고됩니다.

use chrono::NaiveDate;
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use altdata_core::{
    feed_span, AltDataError, AltDataResult, Collection, DataConfig, RecordKind, SourceDescriptor,
    Symbol,
};

use crate::fetch::SourceFetcher;
use crate::locator::SourceLocator;
use crate::parser::{parser_for, ParseContext, RecordParser};

/// 외부 스케줄러가 진행 중인 로딩을 취소할 때 사용하는 플래그.
///
/// 복제본은 같은 상태를 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 취소를 요청합니다.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// 취소되었으면 `Cancelled` 에러를 반환합니다.
    pub fn check(&self) -> AltDataResult<()> {
        if self.is_cancelled() {
            Err(AltDataError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// (심볼, 기준일) 로딩 요청.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedRequest {
    pub symbol: Symbol,
    pub as_of: NaiveDate,
}

impl FeedRequest {
    pub fn new(symbol: Symbol, as_of: NaiveDate) -> Self {
        Self { symbol, as_of }
    }
}

/// 로딩 결과.
///
/// 파싱에 실패하면 `collection`은 비어 있고 `error`에 원인이 담깁니다.
#[derive(Debug)]
pub struct LoadResult {
    pub collection: Collection,
    pub error: Option<AltDataError>,
}

impl LoadResult {
    /// 파싱 에러로 빈 컬렉션이 된 결과인지 확인합니다.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// 레코드 종류 하나에 대한 파이프라인.
pub struct FeedPipeline {
    locator: SourceLocator,
    parser: &'static dyn RecordParser,
}

impl fmt::Debug for FeedPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedPipeline")
            .field("kind", &self.kind())
            .field("locator", &self.locator)
            .finish()
    }
}

impl FeedPipeline {
    /// 레코드 종류에 맞는 로케이터와 파서로 파이프라인을 구성합니다.
    pub fn for_kind(kind: RecordKind, data: &DataConfig) -> Self {
        Self {
            locator: SourceLocator::new(kind, data),
            parser: parser_for(kind),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.parser.kind()
    }

    pub fn locator(&self) -> &SourceLocator {
        &self.locator
    }

    /// 원본 위치를 결정합니다. [`SourceLocator::resolve`] 참조.
    pub fn resolve(
        &self,
        symbol: &Symbol,
        as_of: NaiveDate,
        is_live: bool,
    ) -> AltDataResult<SourceDescriptor> {
        self.locator.resolve(symbol, as_of, is_live)
    }

    /// 이미 가져온 페이로드를 파싱하고 컬렉션으로 조립합니다.
    ///
    /// 페이로드가 없으면 에러 없는 빈 컬렉션을 반환합니다.
    pub fn load(
        &self,
        symbol: &Symbol,
        as_of: NaiveDate,
        source: &SourceDescriptor,
        payload: Option<&str>,
    ) -> LoadResult {
        let _span = feed_span!("load", symbol, self.kind(), as_of).entered();

        let Some(content) = payload else {
            debug!(location = %source.location, "페이로드 없음, 빈 컬렉션 반환");
            return LoadResult {
                collection: Collection::empty(symbol.clone(), as_of),
                error: None,
            };
        };

        let context = ParseContext::new(symbol, as_of, &source.location);
        match self.parser.parse(content, &context) {
            Ok(records) => LoadResult {
                collection: Collection::assemble(symbol.clone(), as_of, records),
                error: None,
            },
            Err(e) => {
                warn!(location = %source.location, error = %e, "파싱 실패, 빈 컬렉션으로 대체");
                LoadResult {
                    collection: Collection::empty(symbol.clone(), as_of),
                    error: Some(e),
                }
            }
        }
    }

    /// 위치를 결정하고, 가져오고, 로딩합니다.
    ///
    /// 위치 결정에 실패하면 fetcher를 호출하지 않습니다.
    pub fn fetch_and_load(
        &self,
        fetcher: &dyn SourceFetcher,
        symbol: &Symbol,
        as_of: NaiveDate,
        is_live: bool,
    ) -> AltDataResult<LoadResult> {
        let source = self.resolve(symbol, as_of, is_live)?;
        let payload = fetcher.fetch(&source);
        Ok(self.load(symbol, as_of, &source, payload.as_deref()))
    }

    /// 여러 요청을 병렬로 가져와 로딩합니다.
    ///
    /// 결과는 요청 순서대로 반환됩니다. 요청별 해석 에러는 해당 항목에만 담기고,
    /// 도중에 취소되면 배치 전체가 `Cancelled`를 반환합니다.
    pub fn fetch_all(
        &self,
        fetcher: &dyn SourceFetcher,
        requests: &[FeedRequest],
        is_live: bool,
        cancel: &CancellationFlag,
    ) -> AltDataResult<Vec<AltDataResult<LoadResult>>> {
        cancel.check()?;
        info!(kind = %self.kind(), count = requests.len(), "병렬 로딩 시작");

        let results: Vec<AltDataResult<LoadResult>> = requests
            .par_iter()
            .map(|request| {
                cancel.check()?;
                self.fetch_and_load(fetcher, &request.symbol, request.as_of, is_live)
            })
            .collect();

        cancel.check()?;
        Ok(results)
    }

    /// 이미 가져온 페이로드들을 병렬로 로딩합니다. 순서와 취소 규칙은 [`Self::fetch_all`]과 같습니다.
    pub fn load_all(
        &self,
        requests: &[(FeedRequest, Option<String>)],
        is_live: bool,
        cancel: &CancellationFlag,
    ) -> AltDataResult<Vec<AltDataResult<LoadResult>>> {
        cancel.check()?;

        let results: Vec<AltDataResult<LoadResult>> = requests
            .par_iter()
            .map(|(request, payload)| {
                cancel.check()?;
                let source = self.resolve(&request.symbol, request.as_of, is_live)?;
                Ok(self.load(&request.symbol, request.as_of, &source, payload.as_deref()))
            })
            .collect();

        cancel.check()?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;
    use altdata_core::Estimate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pipeline() -> FeedPipeline {
        FeedPipeline::for_kind(RecordKind::Estimate, &DataConfig::with_root("/data"))
    }

    #[test]
    fn test_load_without_payload_is_empty() {
        let pipeline = pipeline();
        let symbol = Symbol::new("ABC.E");
        let source = pipeline.resolve(&symbol, date(2020, 1, 1), false).unwrap();
        let result = pipeline.load(&symbol, date(2020, 1, 1), &source, None);
        assert!(result.collection.is_empty());
        assert!(!result.is_degraded());
    }

    #[test]
    fn test_load_degrades_on_parse_error() {
        let pipeline = pipeline();
        let symbol = Symbol::new("ABC.E");
        let source = pipeline.resolve(&symbol, date(2020, 1, 1), false).unwrap();
        let result = pipeline.load(&symbol, date(2020, 1, 1), &source, Some("[{"));

        assert!(result.collection.is_empty());
        match result.error {
            Some(AltDataError::Parse { location, .. }) => assert_eq!(location, source.location),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_fetch_and_load_stamps_owner() {
        let pipeline = pipeline();
        let symbol = Symbol::new("ABC.E");
        let source = pipeline.resolve(&symbol, date(2020, 6, 1), false).unwrap();
        let fetcher = StaticFetcher::new().with_payload(
            source.location,
            r#"[{"id": "1", "ticker": "ABC", "fiscal_year": 2020, "fiscal_quarter": 2,
                 "created_at": "2020-03-01T00:00:00Z", "eps": 0.5}]"#,
        );

        let result = pipeline
            .fetch_and_load(&fetcher, &symbol, date(2020, 6, 1), false)
            .unwrap();
        let estimates = result.collection.of_kind::<Estimate>();
        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].symbol.as_ref(), Some(&symbol));
    }

    #[test]
    fn test_cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let clone = flag.clone();
        assert!(flag.check().is_ok());
        clone.cancel();
        assert!(flag.is_cancelled());
        assert!(matches!(flag.check(), Err(AltDataError::Cancelled)));
    }

    #[test]
    fn test_cancelled_batch_returns_cancelled() {
        let pipeline = pipeline();
        let fetcher = StaticFetcher::new();
        let cancel = CancellationFlag::new();
        cancel.cancel();

        let requests = vec![FeedRequest::new(Symbol::new("ABC.E"), date(2020, 1, 1))];
        let result = pipeline.fetch_all(&fetcher, &requests, false, &cancel);
        assert!(matches!(result, Err(AltDataError::Cancelled)));
        assert_eq!(fetcher.calls(), 0);
    }
}
