//! 원본 파일 파싱 명령.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use altdata_core::{Collection, PipelineConfig};
use altdata_source::FeedPipeline;

use super::{parse_date, parse_feed_symbol};

/// 로컬 파일을 심볼의 종류에 맞게 파싱하고 컬렉션으로 조립합니다.
///
/// 파싱 에러는 경고로 기록하고 빈 컬렉션을 반환합니다.
pub fn parse_file(
    config: &PipelineConfig,
    symbol: &str,
    date: &str,
    input: &Path,
) -> Result<Collection> {
    let (symbol, kind) = parse_feed_symbol(symbol)?;
    let as_of = parse_date(date)?;
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let pipeline = FeedPipeline::for_kind(kind, &config.data);
    let mut source = pipeline.resolve(&symbol, as_of, false)?;
    source.location = input.display().to_string();

    let result = pipeline.load(&symbol, as_of, &source, Some(&content));
    if let Some(error) = &result.error {
        warn!(input = %input.display(), error = %error, "파싱 실패, 빈 컬렉션 출력");
    }

    info!(symbol = %symbol, records = result.collection.len(), "파싱 완료");
    Ok(result.collection)
}
