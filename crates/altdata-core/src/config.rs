//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `ALTDATA__` 환경 변수 순서로 덮어씁니다.
//! 예: `ALTDATA__DATA__ROOT=/mnt/data`, `ALTDATA__COARSE__COUNT=50`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::TransportMedium;
use crate::error::AltDataResult;
use crate::logging::LogFormat;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 파이프라인 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 데이터 위치 설정
    pub data: DataConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// coarse 유니버스 선택 설정
    pub coarse: CoarseSelectionConfig,
}

/// 데이터 위치 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// 데이터 루트 디렉토리
    pub root: PathBuf,
    /// 라이브 모드에서 사용할 원격 엔드포인트 (없으면 로컬 경로 사용)
    pub live_endpoint: Option<String>,
    /// 라이브 엔드포인트의 전송 방식
    pub live_transport: TransportMedium,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            live_endpoint: None,
            live_transport: TransportMedium::RemoteFile,
        }
    }
}

impl DataConfig {
    /// 주어진 루트로 데이터 설정을 생성합니다.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// coarse 유니버스 선택 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoarseSelectionConfig {
    /// 선택할 종목 수
    pub count: usize,
    /// 최소 종가
    pub min_price: Decimal,
    /// 펀더멘털 데이터 보유 종목만 선택할지 여부
    pub require_fundamentals: bool,
}

impl Default for CoarseSelectionConfig {
    fn default() -> Self {
        Self {
            count: 100,
            min_price: Decimal::new(5, 0),
            require_fundamentals: true,
        }
    }
}

impl PipelineConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다. 파일이 없으면 기본값을 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> AltDataResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("data.root", "data")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("ALTDATA")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> AltDataResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
