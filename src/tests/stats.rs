use std::thread;

use num_bigint::BigUint;
use proptest::prelude::*;

use crate::{
	dice::{Dice, Limits},
	stats::{
		distribution_stats, probability_at_least, ways_to_reach_sum, Distribution, DistributionStats, Quality,
		RollSummary, WaysTable,
	},
};

const TOLERANCE: f64 = 1e-9;

#[test]
fn two_d6_ways_to_seven() {
	assert_eq!(ways_to_reach_sum(7, 2, 6), BigUint::from(6u8));
}

#[test]
fn two_d6_full_table() {
	let expected = [1u8, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];
	for (sum, ways) in (2..=12).zip(expected) {
		assert_eq!(ways_to_reach_sum(sum, 2, 6), BigUint::from(ways), "sum {sum}");
	}
}

#[test]
fn single_die_base_case() {
	for target in 1..=20 {
		assert_eq!(ways_to_reach_sum(target, 1, 20), BigUint::from(1u8));
	}
	assert_eq!(ways_to_reach_sum(0, 1, 20), BigUint::from(0u8));
	assert_eq!(ways_to_reach_sum(21, 1, 20), BigUint::from(0u8));
}

#[test]
fn out_of_range_targets_have_no_ways() {
	assert_eq!(ways_to_reach_sum(-5, 3, 6), BigUint::from(0u8));
	assert_eq!(ways_to_reach_sum(2, 3, 6), BigUint::from(0u8));
	assert_eq!(ways_to_reach_sum(19, 3, 6), BigUint::from(0u8));
	assert_eq!(ways_to_reach_sum(i64::MAX, 100, 100), BigUint::from(0u8));
}

#[test]
fn zero_dice_only_reach_zero() {
	assert_eq!(ways_to_reach_sum(0, 0, 6), BigUint::from(1u8));
	assert_eq!(ways_to_reach_sum(1, 0, 6), BigUint::from(0u8));
}

#[test]
fn three_d6_known_counts() {
	// 3d6 has 27 ways to roll 10 and 27 ways to roll 11 out of 216
	assert_eq!(ways_to_reach_sum(10, 3, 6), BigUint::from(27u8));
	assert_eq!(ways_to_reach_sum(11, 3, 6), BigUint::from(27u8));
	assert_eq!(ways_to_reach_sum(3, 3, 6), BigUint::from(1u8));
	assert_eq!(ways_to_reach_sum(18, 3, 6), BigUint::from(1u8));
}

#[test]
fn ways_table_matches_direct_counts() {
	let mut table = WaysTable::new(4, 13);
	for _ in 0..3 {
		table.add_die();
	}
	assert_eq!(table.dice(), 3);
	assert_eq!(table.faces(), 4);

	for sum in 0..=12 {
		assert_eq!(table.ways(sum), Some(&ways_to_reach_sum(sum as i64, 3, 4)), "sum {sum}");
	}
	assert_eq!(table.ways(13), None);
}

#[test]
fn ways_cover_every_outcome() {
	for count in 1..=8 {
		for faces in 1..=8 {
			assert_sums_to_outcomes(count, faces);
		}
	}

	assert_sums_to_outcomes(1, 100);
	assert_sums_to_outcomes(100, 1);
}

#[test]
fn large_distributions_cover_every_outcome() {
	for (count, faces) in [(100u8, 100u8), (100, 6), (50, 100), (7, 99)] {
		let dist = Distribution::new(count, faces);
		let total: BigUint = dist.iter().map(|(_, ways)| ways).sum();
		assert_eq!(&total, dist.outcomes(), "{count}d{faces}");
		assert_eq!(dist.outcomes(), &BigUint::from(faces).pow(u32::from(count)));
	}
}

#[test]
fn hundred_d100_extremes() {
	let dist = Distribution::new(100, 100);
	assert_eq!(dist.min_sum(), 100);
	assert_eq!(dist.max_sum(), 10_000);
	assert_eq!(dist.ways(100), BigUint::from(1u8));
	assert_eq!(dist.ways(10_000), BigUint::from(1u8));
	assert_eq!(dist.ways(101), BigUint::from(100u8));
	assert_eq!(dist.outcomes(), &BigUint::from(100u8).pow(100));
}

#[test]
fn probability_edges_are_exact() {
	for (count, faces) in [(1u8, 1u8), (1, 6), (2, 6), (3, 20), (10, 10), (100, 100)] {
		let max = i64::from(count) * i64::from(faces);
		assert_eq!(probability_at_least(i64::from(count), count, faces), 1.0, "{count}d{faces}");
		assert_eq!(probability_at_least(max + 1, count, faces), 0.0, "{count}d{faces}");
		assert_eq!(probability_at_least(-7, count, faces), 1.0, "{count}d{faces}");
	}
}

#[test]
fn two_d6_at_least_seven() {
	assert_eq!(probability_at_least(7, 2, 6), 21.0 / 36.0);
	assert!((probability_at_least(7, 2, 6) - 0.5833).abs() < 1e-4);
}

#[test]
fn max_total_still_has_a_chance() {
	assert_eq!(probability_at_least(12, 2, 6), 1.0 / 36.0);
	assert!(probability_at_least(10_000, 100, 100) > 0.0);
}

#[test]
fn probability_decreases_with_target() {
	let dist = Distribution::new(4, 6);
	let chances = (4..=25).map(|target| dist.probability_at_least(target)).collect::<Vec<_>>();
	assert!(chances.windows(2).all(|pair| pair[0] >= pair[1]));
	assert_eq!(chances.first(), Some(&1.0));
	assert_eq!(chances.last(), Some(&0.0));
}

#[test]
fn distribution_agrees_with_free_functions() {
	let dist = Distribution::new(3, 8);
	for target in 0..=26 {
		assert_eq!(dist.probability_at_least(target), probability_at_least(target, 3, 8));
		assert_eq!(dist.ways(target), ways_to_reach_sum(target, 3, 8));
	}
}

#[test]
fn probability_of_exact_sums() {
	let dist = Distribution::new(2, 6);
	assert_eq!(dist.probability_of(7), 6.0 / 36.0);
	assert_eq!(dist.probability_of(1), 0.0);
	let total: f64 = (2..=12).map(|sum| dist.probability_of(sum)).sum();
	assert!((total - 1.0).abs() < TOLERANCE);
}

#[test]
fn two_d6_stats() {
	let stats = distribution_stats(2, 6);
	assert_eq!(stats.mean, 7.0);
	assert!((stats.std_dev - (35.0_f64 / 6.0).sqrt()).abs() < TOLERANCE);
	assert!((stats.std_dev - 2.415).abs() < 1e-3);
}

#[test]
fn single_face_dice_have_no_spread() {
	let stats = distribution_stats(5, 1);
	assert_eq!(stats.mean, 5.0);
	assert_eq!(stats.std_dev, 0.0);
}

#[test]
fn closed_form_matches_exact_moments() {
	for count in 1..=12 {
		for faces in 1..=12 {
			assert_moments_match(count, faces);
		}
	}

	assert_moments_match(100, 100);
	assert_moments_match(100, 2);
	assert_moments_match(1, 100);
}

#[test]
fn stats_of_validated_dice() {
	let dice = Dice::validate(4, 10, Limits::DEFAULT).unwrap();
	assert_eq!(DistributionStats::of(&dice), distribution_stats(4, 10));
	assert_eq!(Distribution::of(&dice), Distribution::new(4, 10));
}

#[test]
fn classification() {
	let stats = distribution_stats(2, 6);
	assert_eq!(stats.classify(2), Quality::Low);
	assert_eq!(stats.classify(4), Quality::Low);
	assert_eq!(stats.classify(5), Quality::Average);
	assert_eq!(stats.classify(7), Quality::Average);
	assert_eq!(stats.classify(9), Quality::Average);
	assert_eq!(stats.classify(10), Quality::High);
	assert_eq!(stats.classify(12), Quality::High);
}

#[test]
fn classification_boundaries_are_average() {
	// 1d7 has a mean of 4 and a standard deviation of exactly 2
	let stats = distribution_stats(1, 7);
	assert_eq!(stats.mean, 4.0);
	assert_eq!(stats.std_dev, 2.0);

	assert_eq!(stats.classify(6), Quality::Average);
	assert_eq!(stats.classify(2), Quality::Average);
	assert_eq!(stats.classify(7), Quality::High);
	assert_eq!(stats.classify(1), Quality::Low);
}

#[test]
fn quality_names() {
	assert_eq!(Quality::Low.to_string(), "Low");
	assert_eq!(Quality::Average.to_string(), "Average");
	assert_eq!(Quality::High.to_string(), "High");
}

#[test]
fn roll_summary() {
	let summary = RollSummary::of(&[3, 1, 6, 2]).unwrap();
	assert_eq!(summary.min, 1);
	assert_eq!(summary.max, 6);
	assert_eq!(summary.count, 4);
	assert_eq!(summary.mean, 3.0);

	assert_eq!(RollSummary::of(&[]), None);
}

#[test]
fn shared_distribution_across_threads() {
	let dist = Distribution::new(20, 20);
	let expected = dist.probability_at_least(230);

	thread::scope(|scope| {
		let handles = (0..4)
			.map(|_| scope.spawn(|| dist.probability_at_least(230)))
			.collect::<Vec<_>>();
		for handle in handles {
			assert_eq!(handle.join().unwrap(), expected);
		}
	});
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn distribution_sums_to_outcomes(count in 1u8..=25, faces in 1u8..=25) {
		let dist = Distribution::new(count, faces);
		let total: BigUint = dist.iter().map(|(_, ways)| ways).sum();
		prop_assert_eq!(&total, dist.outcomes());
	}

	#[test]
	fn probability_stays_in_unit_range(count in 1u8..=25, faces in 1u8..=25, target in -10i64..700) {
		let chance = probability_at_least(target, count, faces);
		prop_assert!((0.0..=1.0).contains(&chance));
	}

	#[test]
	fn distribution_is_symmetric(count in 1u8..=20, faces in 1u8..=20, offset in 0i64..400) {
		let dist = Distribution::new(count, faces);
		let (min, max) = (i64::from(dist.min_sum()), i64::from(dist.max_sum()));
		let sum = min + offset % (max - min + 1);
		prop_assert_eq!(dist.ways(sum), dist.ways(min + max - sum));
	}
}

fn assert_sums_to_outcomes(count: u8, faces: u8) {
	let total: BigUint = (i64::from(count)..=i64::from(count) * i64::from(faces))
		.map(|sum| ways_to_reach_sum(sum, count, faces))
		.sum();
	assert_eq!(total, BigUint::from(faces).pow(u32::from(count)), "{count}d{faces}");
}

fn assert_moments_match(count: u8, faces: u8) {
	let closed = distribution_stats(count, faces);
	let exact = Distribution::new(count, faces).empirical_stats();
	assert!(
		(closed.mean - exact.mean).abs() < TOLERANCE,
		"{count}d{faces} mean: {} vs {}",
		closed.mean,
		exact.mean
	);
	assert!(
		(closed.std_dev - exact.std_dev).abs() < TOLERANCE,
		"{count}d{faces} std dev: {} vs {}",
		closed.std_dev,
		exact.std_dev
	);
}
