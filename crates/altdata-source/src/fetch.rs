//! 원본 데이터 fetcher 경계.
//!
//! 실제 다운로드/캐싱은 엔진의 몫입니다. 파이프라인은 [`SourceFetcher`]를 통해서만
//! 원본 텍스트를 받으며, 가져오기 실패는 "페이로드 없음"(빈 컬렉션)으로 취급합니다.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

use altdata_core::{SourceDescriptor, TransportMedium};

/// 소스 기술자로 원본 텍스트를 가져오는 트레이트.
pub trait SourceFetcher: Send + Sync {
    /// 원본 텍스트를 반환합니다. 없거나 읽을 수 없으면 `None`입니다.
    fn fetch(&self, source: &SourceDescriptor) -> Option<String>;
}

/// 로컬 파일 시스템 fetcher.
///
/// UTF-8 텍스트 파일만 읽습니다. 압축 아카이브는 외부 캐시에서 미리 풀어 두어야 합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileFetcher;

impl SourceFetcher for LocalFileFetcher {
    fn fetch(&self, source: &SourceDescriptor) -> Option<String> {
        if source.transport != TransportMedium::LocalFile {
            warn!(
                location = %source.location,
                transport = %source.transport,
                "로컬 fetcher가 처리할 수 없는 전송 방식"
            );
            return None;
        }

        let path = Path::new(&source.location);
        if !path.exists() {
            debug!(location = %source.location, "원본 파일 없음");
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(location = %source.location, error = %e, "원본 파일 읽기 실패");
                None
            }
        }
    }
}

/// 메모리에 등록된 페이로드를 돌려주는 fetcher (테스트, 재현용).
///
/// 호출 횟수를 세므로 "I/O 없이 실패했는지"를 검증할 때도 사용합니다.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    payloads: RwLock<HashMap<String, String>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 위치에 페이로드를 등록합니다.
    pub fn with_payload(self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(location, content);
        self
    }

    /// 위치에 페이로드를 등록하거나 교체합니다.
    pub fn insert(&self, location: impl Into<String>, content: impl Into<String>) {
        self.payloads
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.into(), content.into());
    }

    /// 지금까지 `fetch`가 호출된 횟수.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SourceFetcher for StaticFetcher {
    fn fetch(&self, source: &SourceDescriptor) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&source.location)
            .cloned()
    }
}
