//! 컬렉션 조립 속성 테스트.
//!
//! proptest로 다음을 검증합니다:
//! 1. 조립된 레코드는 `end_time` 기준 비내림차순
//! 2. 같은 시각의 레코드는 파싱 순서 유지 (안정 정렬)
//! 3. 조립은 레코드를 추가하거나 버리지 않음

use altdata_core::{fiscal_period_start, Collection, Estimate, Record, Symbol};
use chrono::NaiveDate;
use proptest::prelude::*;

// ── Strategies ───────────────────────────────────────────────────────

fn arb_period() -> impl Strategy<Value = (i32, u32)> {
    (2018..2022_i32, 1..=4_u32)
}

fn estimate(seq: usize, (year, quarter): (i32, u32)) -> Record {
    let end_time = fiscal_period_start(year, quarter).unwrap();
    Record::Estimate(Estimate {
        id: seq.to_string(),
        ticker: "ABC".to_string(),
        fiscal_year: year,
        fiscal_quarter: quarter,
        created_at: Some(end_time),
        eps: None,
        revenue: None,
        username: "user".to_string(),
        analyst_id: "analyst".to_string(),
        flagged: false,
        symbol: None,
        end_time,
    })
}

fn sequence(record: &Record) -> usize {
    match record {
        Record::Estimate(e) => e.id.parse().unwrap(),
        _ => unreachable!("only estimates are generated"),
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn assembled_records_are_time_ordered(periods in prop::collection::vec(arb_period(), 0..64)) {
        let records: Vec<Record> = periods
            .iter()
            .enumerate()
            .map(|(seq, period)| estimate(seq, *period))
            .collect();
        let collection = Collection::assemble(Symbol::new("ABC.E"), as_of(), records);

        for pair in collection.records().windows(2) {
            prop_assert!(pair[0].end_time() <= pair[1].end_time());
            if pair[0].end_time() == pair[1].end_time() {
                prop_assert!(sequence(&pair[0]) < sequence(&pair[1]));
            }
        }
    }

    #[test]
    fn assembly_preserves_record_count(periods in prop::collection::vec(arb_period(), 0..64)) {
        let records: Vec<Record> = periods
            .iter()
            .enumerate()
            .map(|(seq, period)| estimate(seq, *period))
            .collect();
        let collection = Collection::assemble(Symbol::new("ABC.E"), as_of(), records);

        prop_assert_eq!(collection.len(), periods.len());
        prop_assert!(collection
            .iter()
            .all(|r| r.symbol().map(|s| s.value()) == Some("ABC.E")));
    }
}
