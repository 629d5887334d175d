//! 대체 데이터 파이프라인 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # AAPL 추정치 파일 위치 확인
//! altdata resolve -s AAPL.E -d 2020-06-01
//!
//! # 경제 캘린더 파일을 파싱해서 컬렉션 JSON 출력
//! altdata parse -s USA.C -d 2020-01-20 -i ./usa_calendar.json
//!
//! # 2020-03-02 미국 coarse 유니버스 상위 50종목 선택
//! altdata select -d 2020-03-02 --count 50 --min-price 5
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::error;

use altdata_cli::commands::parse::parse_file;
use altdata_cli::commands::resolve::resolve_source;
use altdata_cli::commands::select::{select_universe, SelectOptions};
use altdata_core::{init_logging, LogConfig, PipelineConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "altdata")]
#[command(about = "Alternative data CLI - 소스 해석, 파싱, 유니버스 선택", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (없으면 기본값 사용)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 심볼과 날짜로 원본 데이터 위치 확인
    Resolve {
        /// 피드 심볼 (예: AAPL.E, USA.C, USA.U)
        #[arg(short, long)]
        symbol: String,

        /// 기준일 (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// 라이브 모드 위치 사용
        #[arg(long, default_value = "false")]
        live: bool,
    },

    /// 원본 파일을 파싱해서 컬렉션 출력
    Parse {
        /// 피드 심볼 (종류는 접미사로 결정)
        #[arg(short, long)]
        symbol: String,

        /// 기준일 (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// 입력 파일 경로
        #[arg(short, long)]
        input: PathBuf,
    },

    /// coarse 유니버스 선택
    Select {
        /// 기준일 (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// 시장 (기본: usa)
        #[arg(short, long, default_value = "usa")]
        market: String,

        /// 선택할 종목 수 (기본: 설정 파일 값)
        #[arg(long)]
        count: Option<usize>,

        /// 최소 종가 (기본: 설정 파일 값)
        #[arg(long)]
        min_price: Option<Decimal>,

        /// 라이브 모드 위치 사용
        #[arg(long, default_value = "false")]
        live: bool,
    },
}

fn run(cli: Cli, config: &PipelineConfig) -> Result<String> {
    let output = match cli.command {
        Commands::Resolve { symbol, date, live } => {
            serde_json::to_string_pretty(&resolve_source(config, &symbol, &date, live)?)?
        }
        Commands::Parse {
            symbol,
            date,
            input,
        } => serde_json::to_string_pretty(&parse_file(config, &symbol, &date, &input)?)?,
        Commands::Select {
            date,
            market,
            count,
            min_price,
            live,
        } => {
            let options = SelectOptions {
                date,
                market,
                count,
                min_price,
                live,
            };
            serde_json::to_string_pretty(&select_universe(config, &options)?)?
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = PipelineConfig::load(&cli.config)?;

    // 트레이싱 초기화
    init_logging(LogConfig::from(&config.logging))?;

    match run(cli, &config) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "명령 실행 실패");
            Err(e)
        }
    }
}
