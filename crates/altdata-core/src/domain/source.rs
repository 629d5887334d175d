//! 데이터 소스 기술자.
//!
//! 로케이터가 생성하고 외부 fetcher가 소비하는 값입니다. 한 번 생성되면 변경되지 않습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 원본 데이터를 가져오는 전송 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMedium {
    /// 로컬 파일 시스템
    #[default]
    LocalFile,
    /// 원격 파일 (HTTP 다운로드 등)
    RemoteFile,
    /// REST 엔드포인트
    Rest,
}

impl fmt::Display for TransportMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMedium::LocalFile => write!(f, "local-file"),
            TransportMedium::RemoteFile => write!(f, "remote-file"),
            TransportMedium::Rest => write!(f, "rest"),
        }
    }
}

impl FromStr for TransportMedium {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "local-file" | "local" => Ok(TransportMedium::LocalFile),
            "remote-file" | "remote" => Ok(TransportMedium::RemoteFile),
            "rest" => Ok(TransportMedium::Rest),
            _ => Err(format!("Unknown transport medium: {}", s)),
        }
    }
}

/// 원본 파일의 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileFormat {
    /// 한 줄에 레코드 하나
    LineDelimited,
    /// 파일 전체가 하나의 레코드 컬렉션
    WholeFileCollection,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::LineDelimited => write!(f, "line-delimited"),
            FileFormat::WholeFileCollection => write!(f, "whole-file-collection"),
        }
    }
}

/// 원본 데이터의 위치와 읽는 방법.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// 파일 경로 또는 URL
    pub location: String,
    /// 전송 방식
    pub transport: TransportMedium,
    /// 파일 형식
    pub format: FileFormat,
}

impl SourceDescriptor {
    /// 새 소스 기술자를 생성합니다.
    pub fn new(location: impl Into<String>, transport: TransportMedium, format: FileFormat) -> Self {
        Self {
            location: location.into(),
            transport,
            format,
        }
    }

    /// 로컬 파일 소스인지 확인합니다.
    pub fn is_local(&self) -> bool {
        self.transport == TransportMedium::LocalFile
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.location, self.transport, self.format)
    }
}
