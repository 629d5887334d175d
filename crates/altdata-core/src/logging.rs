//! tracing 기반 로깅 설정.
//!
//! 라이브러리 crate는 이벤트만 기록하고 구독자는 설치하지 않습니다.
//! 바이너리(또는 외부 엔진)가 시작할 때 [`init_logging`]을 한 번 호출합니다.
//! 출력은 stderr로 보내므로 stdout은 명령 결과(JSON)에 쓸 수 있습니다.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 색상이 포함된 여러 줄 형식 (개발용)
    #[default]
    Pretty,
    /// 한 줄에 JSON 객체 하나 (로그 수집용)
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 초기화 에러.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// 필터 표현식을 해석할 수 없음
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    /// 전역 구독자가 이미 설치됨
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// 구독자 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 필터 표현식 (예: "info", "altdata_source=debug,warn")
    pub level: String,
    pub format: LogFormat,
    /// span 진입/종료 이벤트 출력 여부
    pub with_span_events: bool,
    /// 파일명과 줄 번호 출력 여부
    pub with_file: bool,
    /// 스레드 ID 출력 여부 (rayon 병렬 로딩 추적용)
    pub with_thread_ids: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
            with_thread_ids: false,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }

    /// `RUST_LOG`(레벨)와 `LOG_FORMAT`(형식) 환경 변수로 설정을 만듭니다.
    pub fn from_env() -> Self {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        Self::new(level).with_format(format)
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| LoggingError::InvalidFilter {
                filter: self.level.clone(),
                message: e.to_string(),
            })
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.with_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let base = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.with_file)
            .with_line_number(self.with_file)
            .with_thread_ids(self.with_thread_ids)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Pretty => base.pretty().boxed(),
            LogFormat::Json => base.json().boxed(),
            LogFormat::Compact => base.compact().boxed(),
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self::new(config.level.clone()).with_format(config.format)
    }
}

/// 전역 구독자를 설치합니다. `RUST_LOG`가 있으면 `config.level`보다 우선합니다.
///
/// ```no_run
/// use altdata_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("altdata_source=debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(config.layer())
        .with(config.filter()?)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(format = ?config.format, level = %config.level, "로깅 초기화 완료");
    Ok(())
}

/// [`LogConfig::from_env`]로 로깅을 초기화합니다.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    init_logging(LogConfig::from_env())
}

/// 피드 필드(심볼, 레코드 종류, 날짜)를 담은 debug span을 만듭니다.
#[macro_export]
macro_rules! feed_span {
    ($name:expr, $symbol:expr) => {
        tracing::debug_span!($name, symbol = %$symbol)
    };
    ($name:expr, $symbol:expr, $kind:expr) => {
        tracing::debug_span!($name, symbol = %$symbol, kind = %$kind)
    };
    ($name:expr, $symbol:expr, $kind:expr, $date:expr) => {
        tracing::debug_span!($name, symbol = %$symbol, kind = %$kind, date = %$date)
    };
}
