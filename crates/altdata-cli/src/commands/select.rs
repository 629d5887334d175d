//! coarse 유니버스 선택 명령.

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{info, warn};

use altdata_core::{PipelineConfig, RecordKind, Resolution, Symbol, UniverseSettings};
use altdata_source::{FeedPipeline, LocalFileFetcher, SourceFetcher};
use altdata_universe::{CoarseFundamentalUniverse, SelectionResult, TopDollarVolume};

use super::parse_date;

/// `select` 명령 옵션.
#[derive(Debug, Clone)]
pub struct SelectOptions {
    pub date: String,
    pub market: String,
    pub count: Option<usize>,
    pub min_price: Option<Decimal>,
    pub live: bool,
}

/// 설정과 명령행 옵션을 합쳐 선택기를 만듭니다.
fn build_selector(config: &PipelineConfig, options: &SelectOptions) -> TopDollarVolume {
    let mut selector = TopDollarVolume::from(&config.coarse);
    if let Some(count) = options.count {
        selector.count = count;
    }
    if let Some(min_price) = options.min_price {
        selector.min_price = min_price;
    }
    selector
}

/// 기본 fetcher로 coarse 유니버스를 한 번 평가합니다.
pub fn select_universe(config: &PipelineConfig, options: &SelectOptions) -> Result<SelectionResult> {
    select_universe_with(config, options, &LocalFileFetcher)
}

/// 주어진 fetcher로 coarse 유니버스를 한 번 평가합니다.
pub fn select_universe_with(
    config: &PipelineConfig,
    options: &SelectOptions,
    fetcher: &dyn SourceFetcher,
) -> Result<SelectionResult> {
    let as_of = parse_date(&options.date)?;
    let selector = build_selector(config, options);
    info!(
        market = %options.market,
        date = %as_of,
        count = selector.count,
        min_price = %selector.min_price,
        "coarse 유니버스 선택 시작"
    );

    let pipeline = FeedPipeline::for_kind(RecordKind::CoarseFundamental, &config.data);
    let mut universe = CoarseFundamentalUniverse::coarse_with_symbol(
        Symbol::coarse_universe(&options.market),
        UniverseSettings::new(Resolution::Daily),
        selector,
    )?;

    let evaluation = universe.evaluate(&pipeline, fetcher, as_of, options.live)?;
    if let Some(error) = &evaluation.parse_error {
        warn!(error = %error, "coarse 파일 파싱 실패, 빈 유니버스");
    }
    Ok(evaluation.selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use altdata_core::DataConfig;

    fn options() -> SelectOptions {
        SelectOptions {
            date: "2020-03-02".to_string(),
            market: "usa".to_string(),
            count: Some(1),
            min_price: Some(Decimal::new(5, 0)),
            live: false,
        }
    }

    #[test]
    fn test_select_universe_from_data_root() {
        let dir = tempfile::tempdir().unwrap();
        let coarse_dir = dir.path().join("equity/usa/fundamental/coarse");
        std::fs::create_dir_all(&coarse_dir).unwrap();
        std::fs::write(
            coarse_dir.join("20200302.csv"),
            "A X,AAA,10,100,1000,True\nB X,BBB,10,100,5000,True\nC X,CCC,1,100,9000,True\n",
        )
        .unwrap();

        let config = PipelineConfig {
            data: DataConfig::with_root(dir.path()),
            ..Default::default()
        };
        let selection = select_universe(&config, &options()).unwrap();
        let names: Vec<&str> = selection.iter().map(Symbol::value).collect();
        assert_eq!(names, vec!["BBB"]);
    }

    #[test]
    fn test_select_universe_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            data: DataConfig::with_root(dir.path()),
            ..Default::default()
        };
        assert!(select_universe(&config, &options()).unwrap().is_empty());
    }

    #[test]
    fn test_options_override_config() {
        let mut options = options();
        options.min_price = Some(Decimal::new(125, 1));
        let selector = build_selector(&PipelineConfig::default(), &options);
        assert_eq!(selector.count, 1);
        assert_eq!(selector.min_price, Decimal::new(125, 1));

        options.min_price = None;
        options.count = None;
        let selector = build_selector(&PipelineConfig::default(), &options);
        assert_eq!(selector.count, 100);
        assert_eq!(selector.min_price, Decimal::new(5, 0));
    }
}
