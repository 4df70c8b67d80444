use std::sync::Arc;

use cafe_scout_core::query::{requested_count, ScoredTable, SharedTable};
use cafe_scout_core::scoring::Factor;
use cafe_scout_core::table::{MetricTable, TimeBand, TimeOfDaySales, Unit};
use cafe_scout_core::ScoutError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn seoul_sample() -> ScoredTable {
    let rhythm = TimeOfDaySales {
        dawn: dec!(2),
        morning: dec!(28),
        lunch: dec!(30),
        afternoon: dec!(20),
        evening: dec!(15),
        night: dec!(5),
    };
    let units = vec![
        Unit::new("Yeoksam 1", 52_000, dec!(0.86), dec!(0.58), dec!(120)),
        Unit::new("Myeong", 31_000, dec!(0.74), dec!(0.48), dec!(85)),
        Unit::new("Jongno 1.2.3.4", 45_000, dec!(0.88), dec!(0.61), dec!(60)),
        Unit::new("Yeouido", 70_000, dec!(0.91), dec!(0.63), dec!(95)),
        Unit::new("Seogyo", 12_000, dec!(0.52), dec!(0.22), dec!(140)),
    ]
    .into_iter()
    .map(|u| u.with_time_of_day_sales(rhythm.clone()))
    .collect();
    ScoredTable::from_table(MetricTable::new(units).unwrap()).unwrap()
}

#[test]
fn test_top_ten_of_five_returns_five_in_rank_order() {
    let table = seoul_sample();
    let top = table.top_n(10);
    assert_eq!(top.len(), 5);
    let ranks: Vec<u32> = top.iter().map(|s| s.overall_rank).collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable();
    assert_eq!(ranks, sorted);
}

#[test]
fn test_failed_lookup_does_not_affect_later_queries() {
    let table = seoul_sample();
    let before: Vec<String> = table.top_n(5).iter().map(|s| s.unit.name.clone()).collect();

    let err = table.lookup_by_name("NonexistentUnit").unwrap_err();
    assert!(matches!(err, ScoutError::UnitNotFound { ref name } if name == "NonexistentUnit"));

    assert_eq!(table.lookup_by_name("Yeouido").unwrap().unit.employee_count, 70_000);
    let after: Vec<String> = table.top_n(5).iter().map(|s| s.unit.name.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_negative_count_is_rejected_zero_is_empty() {
    assert!(matches!(
        requested_count(-1),
        Err(ScoutError::InvalidInput { .. })
    ));
    let n = requested_count(0).unwrap();
    assert!(seoul_sample().top_n(n).is_empty());
}

#[test]
fn test_explain_matches_lookup() {
    let table = seoul_sample();
    let unit = table.lookup_by_name("Jongno 1.2.3.4").unwrap();
    let e = table.explain("Jongno 1.2.3.4").unwrap();

    assert_eq!(e.opportunity_index, unit.opportunity_index);
    assert_eq!(e.overall_rank, unit.overall_rank);
    for c in &e.components {
        assert_eq!(c.percentile, unit.percentiles.get(c.factor));
    }
    let weights: Decimal = e.components.iter().map(|c| c.effective_weight).sum();
    assert_eq!(weights, Decimal::ONE);
    assert_eq!(e.recomputed_index(), e.opportunity_index);
    for c in &e.components {
        assert_eq!(Decimal::from(c.count) / Decimal::from(5u64), c.percentile);
    }
}

#[test]
fn test_explain_exposes_inverse_competition() {
    let table = seoul_sample();
    // Jongno has the fewest cafes
    let e = table.explain("Jongno 1.2.3.4").unwrap();
    let competition = e
        .components
        .iter()
        .find(|c| c.factor == Factor::LowCompetition)
        .unwrap();
    assert_eq!(competition.percentile, Decimal::ONE);
    assert_eq!(competition.points, dec!(100));
}

#[test]
fn test_profile_reports_rank_out_of_total() {
    let table = seoul_sample();
    let p = table.profile("Seogyo").unwrap();
    assert_eq!(p.total_units, 5);
    assert_eq!(p.overall_rank, table.lookup_by_name("Seogyo").unwrap().overall_rank);
    assert_eq!(p.peak_time_band, TimeBand::Lunch);
}

#[test]
fn test_scatter_pairs_match_units() {
    let table = seoul_sample();
    for pair in table.supply_demand_pairs() {
        let unit = table.lookup_by_name(pair.name).unwrap();
        assert_eq!(pair.cafe_count, unit.unit.cafe_count);
        assert_eq!(pair.employee_count, unit.unit.employee_count);
        assert_eq!(pair.opportunity_index, unit.opportunity_index);
    }
}

#[test]
fn test_shared_table_sessions_keep_their_snapshot() {
    let shared = SharedTable::new(seoul_sample());
    let session = shared.snapshot();

    let reduced = MetricTable::new(vec![Unit::new("Yeouido", 70_000, dec!(0.91), dec!(0.63), dec!(95))])
        .unwrap();
    let _previous = shared.replace(ScoredTable::from_table(reduced).unwrap());

    assert_eq!(session.total_units(), 5);
    assert_eq!(shared.snapshot().total_units(), 1);
    assert_eq!(Arc::strong_count(&session), 2);
}
