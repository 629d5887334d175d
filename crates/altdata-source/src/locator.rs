//! 소스 로케이터.
//!
//! (심볼, 기준일, 라이브 여부)를 [`SourceDescriptor`]로 변환합니다.
//! I/O를 하지 않으며, 같은 입력에는 항상 같은 위치를 반환합니다.

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::trace;

use altdata_core::{
    AltDataError, AltDataResult, DataConfig, RecordKind, SourceDescriptor, Symbol, TransportMedium,
};

/// 레코드 종류 하나에 대한 소스 로케이터.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    kind: RecordKind,
    root: PathBuf,
    live_endpoint: Option<String>,
    live_transport: TransportMedium,
}

impl SourceLocator {
    /// 데이터 설정으로 로케이터를 생성합니다.
    pub fn new(kind: RecordKind, data: &DataConfig) -> Self {
        Self {
            kind,
            root: data.root.clone(),
            live_endpoint: data
                .live_endpoint
                .as_deref()
                .map(str::trim)
                .filter(|endpoint| !endpoint.is_empty())
                .map(str::to_string),
            live_transport: data.live_transport,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// 원본 데이터 위치를 결정합니다.
    ///
    /// # Errors
    ///
    /// - 심볼 접미사가 이 로케이터의 종류와 다르면 `InvalidSymbolKind`
    /// - 접미사를 제외한 식별자가 비어 있으면 `InvalidInput`
    pub fn resolve(
        &self,
        symbol: &Symbol,
        as_of: NaiveDate,
        is_live: bool,
    ) -> AltDataResult<SourceDescriptor> {
        if !symbol.has_kind(self.kind) {
            return Err(AltDataError::InvalidSymbolKind {
                symbol: symbol.to_string(),
                expected: self.kind,
            });
        }

        let value = symbol.value();
        let id = value[..value.len() - self.kind.suffix().len()]
            .trim()
            .to_lowercase();
        if id.is_empty() {
            return Err(AltDataError::InvalidInput(format!(
                "Symbol {} has an empty identifier",
                symbol
            )));
        }

        let segments = self.segments(&id, as_of);
        let descriptor = match (&self.live_endpoint, is_live) {
            (Some(endpoint), true) => SourceDescriptor::new(
                format!("{}/{}", endpoint.trim_end_matches('/'), segments.join("/")),
                self.live_transport,
                self.kind.file_format(),
            ),
            _ => {
                let path = segments
                    .iter()
                    .fold(self.root.clone(), |path, segment| path.join(segment));
                SourceDescriptor::new(
                    path.to_string_lossy(),
                    TransportMedium::LocalFile,
                    self.kind.file_format(),
                )
            }
        };

        trace!(symbol = %symbol, date = %as_of, location = %descriptor.location, "소스 위치 결정");
        Ok(descriptor)
    }

    /// 루트 아래의 종류별 경로 구성요소.
    fn segments(&self, id: &str, as_of: NaiveDate) -> Vec<String> {
        match self.kind {
            RecordKind::Estimate => vec![
                "alternative".to_string(),
                "estimize".to_string(),
                "estimate".to_string(),
                format!("{}.zip", id),
            ],
            RecordKind::CalendarEvent => vec![
                "alternative".to_string(),
                "trading-economics".to_string(),
                format!("{}_calendar.zip", id),
            ],
            RecordKind::CoarseFundamental => vec![
                "equity".to_string(),
                id.to_string(),
                "fundamental".to_string(),
                "coarse".to_string(),
                format!("{}.csv", as_of.format("%Y%m%d")),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altdata_core::FileFormat;
    use std::path::Path;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn local(parts: &[&str]) -> String {
        parts
            .iter()
            .fold(Path::new("/data").to_path_buf(), |path, part| path.join(part))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_resolve_estimate() {
        let locator = SourceLocator::new(RecordKind::Estimate, &DataConfig::with_root("/data"));
        let descriptor = locator
            .resolve(&Symbol::new("ABC.E"), date(2020, 6, 1), false)
            .unwrap();

        assert_eq!(
            descriptor.location,
            local(&["alternative", "estimize", "estimate", "abc.zip"])
        );
        assert_eq!(descriptor.transport, TransportMedium::LocalFile);
        assert_eq!(descriptor.format, FileFormat::WholeFileCollection);
    }

    #[test]
    fn test_resolve_calendar_is_date_independent() {
        let locator =
            SourceLocator::new(RecordKind::CalendarEvent, &DataConfig::with_root("/data"));
        let symbol = Symbol::new("USA.C");
        let first = locator.resolve(&symbol, date(2020, 1, 1), false).unwrap();
        let second = locator.resolve(&symbol, date(2021, 7, 4), false).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.location,
            local(&["alternative", "trading-economics", "usa_calendar.zip"])
        );
    }

    #[test]
    fn test_resolve_coarse_uses_date() {
        let locator =
            SourceLocator::new(RecordKind::CoarseFundamental, &DataConfig::with_root("/data"));
        let descriptor = locator
            .resolve(&Symbol::new("USA.U"), date(2020, 3, 2), false)
            .unwrap();

        assert_eq!(
            descriptor.location,
            local(&["equity", "usa", "fundamental", "coarse", "20200302.csv"])
        );
        assert_eq!(descriptor.format, FileFormat::LineDelimited);
    }

    #[test]
    fn test_resolve_rejects_wrong_suffix() {
        let locator = SourceLocator::new(RecordKind::Estimate, &DataConfig::with_root("/data"));
        for value in ["ABC", "ABC.C", "ABC.e"] {
            let err = locator
                .resolve(&Symbol::new(value), date(2020, 1, 1), false)
                .unwrap_err();
            assert!(matches!(
                err,
                AltDataError::InvalidSymbolKind { expected: RecordKind::Estimate, .. }
            ));
        }
    }

    #[test]
    fn test_resolve_rejects_empty_identifier() {
        let locator = SourceLocator::new(RecordKind::Estimate, &DataConfig::with_root("/data"));
        let err = locator
            .resolve(&Symbol::new(".E"), date(2020, 1, 1), false)
            .unwrap_err();
        assert!(matches!(err, AltDataError::InvalidInput(_)));
    }

    #[test]
    fn test_resolve_live_endpoint() {
        let data = DataConfig {
            live_endpoint: Some("https://feeds.example.com/".to_string()),
            live_transport: TransportMedium::Rest,
            ..DataConfig::with_root("/data")
        };
        let locator = SourceLocator::new(RecordKind::CoarseFundamental, &data);
        let symbol = Symbol::new("USA.U");

        let live = locator.resolve(&symbol, date(2020, 3, 2), true).unwrap();
        assert_eq!(
            live.location,
            "https://feeds.example.com/equity/usa/fundamental/coarse/20200302.csv"
        );
        assert_eq!(live.transport, TransportMedium::Rest);

        let backtest = locator.resolve(&symbol, date(2020, 3, 2), false).unwrap();
        assert!(backtest.is_local());
    }

    #[test]
    fn test_live_without_endpoint_matches_backtest() {
        let locator = SourceLocator::new(RecordKind::Estimate, &DataConfig::with_root("/data"));
        let symbol = Symbol::new("ABC.E");
        assert_eq!(
            locator.resolve(&symbol, date(2020, 1, 1), true).unwrap(),
            locator.resolve(&symbol, date(2020, 1, 1), false).unwrap()
        );
    }
}
