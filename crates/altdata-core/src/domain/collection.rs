//! 날짜별 레코드 컬렉션 조립.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::{Record, RecordVariant};
use crate::types::Symbol;

/// 한 심볼의 하루치 레코드 묶음.
///
/// 레코드는 `end_time` 오름차순으로 정렬되어 있으며, 같은 시각의 레코드는
/// 파싱 순서를 유지합니다. 조립 후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    as_of: NaiveDate,
    symbol: Symbol,
    records: Vec<Record>,
}

impl Collection {
    /// 파서 출력으로 컬렉션을 조립합니다.
    ///
    /// 심볼이 없는 레코드에는 소유 심볼을 채운 뒤 안정 정렬합니다.
    pub fn assemble(symbol: Symbol, as_of: NaiveDate, mut records: Vec<Record>) -> Self {
        for record in records.iter_mut() {
            record.stamp(&symbol);
        }
        records.sort_by_key(Record::end_time);

        debug!(symbol = %symbol, date = %as_of, count = records.len(), "컬렉션 조립 완료");

        Self {
            as_of,
            symbol,
            records,
        }
    }

    /// 레코드가 없는 컬렉션.
    pub fn empty(symbol: Symbol, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            symbol,
            records: Vec::new(),
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// 주어진 변형 타입의 레코드만 순서대로 반환합니다.
    pub fn of_kind<R: RecordVariant>(&self) -> Vec<R> {
        self.records
            .iter()
            .filter_map(R::from_record)
            .cloned()
            .collect()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fiscal_period_start, CoarseFundamental, Estimate};
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn estimate(id: &str, quarter: u32) -> Record {
        let end_time = fiscal_period_start(2020, quarter).unwrap();
        Record::Estimate(Estimate {
            id: id.to_string(),
            ticker: "ABC".to_string(),
            fiscal_year: 2020,
            fiscal_quarter: quarter,
            created_at: Some(end_time),
            eps: None,
            revenue: None,
            username: String::new(),
            analyst_id: String::new(),
            flagged: false,
            symbol: None,
            end_time,
        })
    }

    fn coarse(ticker: &str, end_time: DateTime<Utc>) -> Record {
        Record::CoarseFundamental(CoarseFundamental {
            symbol: Symbol::new(ticker),
            sid: ticker.to_string(),
            close: dec!(10),
            volume: 1,
            dollar_volume: dec!(10),
            has_fundamental_data: true,
            price_factor: Decimal::ONE,
            split_factor: Decimal::ONE,
            time: end_time,
            end_time,
        })
    }

    fn ids(collection: &Collection) -> Vec<String> {
        collection
            .of_kind::<Estimate>()
            .into_iter()
            .map(|e| e.id)
            .collect()
    }

    #[test]
    fn test_assemble_sorts_and_keeps_tie_order() {
        let as_of = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let records = vec![
            estimate("q2-a", 2),
            estimate("q1", 1),
            estimate("q2-b", 2),
            estimate("q2-c", 2),
        ];
        let collection = Collection::assemble(Symbol::new("ABC.E"), as_of, records);

        assert_eq!(ids(&collection), vec!["q1", "q2-a", "q2-b", "q2-c"]);
        assert_eq!(collection.len(), 4);
        assert_eq!(collection.as_of(), as_of);
    }

    #[test]
    fn test_assemble_stamps_only_unowned_records() {
        let as_of = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let owner = Symbol::new("USA.U");
        let time = fiscal_period_start(2020, 1).unwrap();
        let collection = Collection::assemble(
            owner.clone(),
            as_of,
            vec![coarse("AAPL", time), estimate("e", 1)],
        );

        let symbols: Vec<&str> = collection
            .iter()
            .filter_map(|r| r.symbol())
            .map(|s| s.value())
            .collect();
        assert_eq!(symbols, vec!["AAPL", "USA.U"]);
    }

    #[test]
    fn test_of_kind_filters_heterogeneous_records() {
        let as_of = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let time = fiscal_period_start(2020, 3).unwrap();
        let collection = Collection::assemble(
            Symbol::new("MIX"),
            as_of,
            vec![estimate("e", 1), coarse("MSFT", time)],
        );

        assert_eq!(collection.of_kind::<CoarseFundamental>().len(), 1);
        assert_eq!(collection.of_kind::<Estimate>().len(), 1);
    }

    #[test]
    fn test_empty_collection() {
        let as_of = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let collection = Collection::empty(Symbol::new("ABC.E"), as_of);
        assert!(collection.is_empty());
        assert_eq!(collection.symbol().value(), "ABC.E");
    }
}
