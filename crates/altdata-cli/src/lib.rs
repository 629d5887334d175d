//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 소스 위치 확인 (`resolve`)
//! - 원본 파일 파싱 및 컬렉션 출력 (`parse`)
//! - coarse 유니버스 선택 (`select`)

pub mod commands;
