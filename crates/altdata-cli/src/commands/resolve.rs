//! 소스 위치 확인 명령.

use anyhow::Result;
use tracing::info;

use altdata_core::{PipelineConfig, SourceDescriptor};
use altdata_source::SourceLocator;

use super::{parse_date, parse_feed_symbol};

/// 심볼과 날짜로 원본 위치를 결정합니다.
pub fn resolve_source(
    config: &PipelineConfig,
    symbol: &str,
    date: &str,
    live: bool,
) -> Result<SourceDescriptor> {
    let (symbol, kind) = parse_feed_symbol(symbol)?;
    let as_of = parse_date(date)?;

    let descriptor = SourceLocator::new(kind, &config.data).resolve(&symbol, as_of, live)?;
    info!(symbol = %symbol, kind = %kind, location = %descriptor.location, "소스 위치 확인");
    Ok(descriptor)
}
