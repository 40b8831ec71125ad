use super::{IntStrategy, Numeric, RoundingRule, coerce};

const AWAY: RoundingRule = RoundingRule::ToNearestOrAwayFromZero;

#[test]
fn exact_accepts_only_lossless_values() {
	assert_eq!(coerce::<i16>(Numeric::Float(10.0), IntStrategy::Exact), Some(10));
	assert_eq!(coerce::<i8>(Numeric::Float(10.1), IntStrategy::Exact), None);
	assert_eq!(coerce::<u8>(Numeric::Signed(-1), IntStrategy::Exact), None);
	assert_eq!(coerce::<i8>(Numeric::Signed(128), IntStrategy::Exact), None);
	assert_eq!(coerce::<u64>(Numeric::Unsigned(u64::MAX), IntStrategy::Exact), Some(u64::MAX));
	assert_eq!(coerce::<i64>(Numeric::Unsigned(u64::MAX), IntStrategy::Exact), None);
	assert_eq!(coerce::<i32>(Numeric::Float(f64::INFINITY), IntStrategy::Exact), None);
}

#[test]
fn rounding_applies_rule_before_exact_check() {
	assert_eq!(coerce::<i16>(Numeric::Float(10.5), IntStrategy::Rounding(AWAY)), Some(11));
	assert_eq!(coerce::<i16>(Numeric::Float(-10.5), IntStrategy::Rounding(AWAY)), Some(-11));
	assert_eq!(coerce::<i16>(Numeric::Float(10.5), IntStrategy::Rounding(RoundingRule::ToNearestOrEven)), Some(10));
	assert_eq!(coerce::<i16>(Numeric::Float(10.2), IntStrategy::Rounding(RoundingRule::Up)), Some(11));
	assert_eq!(coerce::<i16>(Numeric::Float(-10.2), IntStrategy::Rounding(RoundingRule::Down)), Some(-11));
	assert_eq!(coerce::<i16>(Numeric::Float(-10.8), IntStrategy::Rounding(RoundingRule::TowardZero)), Some(-10));
	assert_eq!(coerce::<i16>(Numeric::Float(-10.2), IntStrategy::Rounding(RoundingRule::AwayFromZero)), Some(-11));
	assert_eq!(coerce::<i8>(Numeric::Float(300.4), IntStrategy::Rounding(AWAY)), None);
	assert_eq!(coerce::<i8>(Numeric::Signed(300), IntStrategy::Rounding(AWAY)), None);
}

#[test]
fn clamping_saturates_at_target_bounds() {
	assert_eq!(coerce::<i8>(Numeric::Float(1000.0), IntStrategy::Clamping(None)), Some(127));
	assert_eq!(coerce::<i8>(Numeric::Float(-1000.0), IntStrategy::Clamping(None)), Some(-128));
	assert_eq!(coerce::<u8>(Numeric::Signed(-5), IntStrategy::Clamping(None)), Some(0));
	assert_eq!(coerce::<i16>(Numeric::Unsigned(u64::MAX), IntStrategy::Clamping(None)), Some(i16::MAX));
	assert_eq!(coerce::<i8>(Numeric::Float(f64::INFINITY), IntStrategy::Clamping(Some(AWAY))), Some(127));
	assert_eq!(coerce::<i8>(Numeric::Float(f64::NEG_INFINITY), IntStrategy::Clamping(Some(AWAY))), Some(-128));
	assert_eq!(coerce::<i64>(Numeric::Float(1e30), IntStrategy::Clamping(None)), Some(i64::MAX));
	assert_eq!(coerce::<i8>(Numeric::Float(99.6), IntStrategy::Clamping(Some(AWAY))), Some(100));
}

#[test]
fn nan_fails_under_every_policy() {
	for strategy in [IntStrategy::Exact, IntStrategy::Rounding(AWAY), IntStrategy::Clamping(None), IntStrategy::Clamping(Some(AWAY))] {
		assert_eq!(coerce::<i8>(Numeric::Float(f64::NAN), strategy), None, "{strategy}");
	}
}

#[test]
fn clamping_without_rule_rejects_fractional_sources() {
	assert_eq!(coerce::<i8>(Numeric::Float(1.5), IntStrategy::Clamping(None)), None);
}
