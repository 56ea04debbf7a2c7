//! Exact distributions of dice sums and the statistics derived from them.
//!
//! Every count here is an ordered outcome count: rolling (1, 2) and (2, 1) on two dice are distinct outcomes, so
//! `count` dice with `faces` faces each have exactly `faces^count` equally likely outcomes. Counts grow far past any
//! machine integer for large dice sets (100d100 has 10^200 outcomes), so they are kept as [`BigUint`]s and only
//! converted to `f64` when a ratio is taken.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use tracing::debug;

use crate::dice::Dice;

/// Highest bit length kept from the operands of a ratio so both convert to finite `f64`s.
const RATIO_BITS: u64 = 960;

/// Bottom-up table of the number of ordered ways a growing set of dice can reach each sum.
///
/// The table holds a single row at a time: after `n` calls to [`Self::add_die()`], `ways(s)` is the number of ways
/// `n` dice can sum to exactly `s`. Row `0` has a single way to reach `0`. Each new row is
/// `next[j] = Σ_{k=1..faces} row[j-k]`, computed with a sliding window so a die costs one addition and at most one
/// subtraction per column. The width is fixed at construction, which bounds both memory and work.
///
/// # Examples
/// ```
/// use rollstat::stats::WaysTable;
///
/// let mut table = WaysTable::new(6, 13);
/// table.add_die();
/// table.add_die();
/// assert_eq!(table.ways(7).map(ToString::to_string).as_deref(), Some("6"));
/// assert_eq!(table.ways(1).map(ToString::to_string).as_deref(), Some("0"));
/// assert!(table.ways(13).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaysTable {
	/// Number of faces on each die
	faces: u8,

	/// Number of dice added so far
	dice: u8,

	/// Ways to reach each sum with the current dice, indexed by the sum itself
	row: Vec<BigUint>,
}

impl WaysTable {
	/// Creates a table for dice with `faces` faces covering the sums `0..width`, with no dice added yet.
	#[must_use]
	pub fn new(faces: u8, width: usize) -> Self {
		let mut row = vec![BigUint::zero(); width];
		if let Some(first) = row.first_mut() {
			*first = BigUint::one();
		}

		Self { faces, dice: 0, row }
	}

	/// Adds one more die to the table, replacing the current row with the next one.
	pub fn add_die(&mut self) {
		let span = usize::from(self.faces) + 1;
		let mut next = vec![BigUint::zero(); self.row.len()];
		let mut window = BigUint::zero();

		for (sum, slot) in next.iter_mut().enumerate().skip(1) {
			window += &self.row[sum - 1];
			if let Some(expired) = sum.checked_sub(span) {
				window -= &self.row[expired];
			}
			slot.clone_from(&window);
		}

		self.row = next;
		self.dice = self.dice.saturating_add(1);
	}

	/// Number of ways the dice added so far reach exactly `sum`, or `None` if `sum` is outside the table.
	#[must_use]
	#[inline]
	pub fn ways(&self, sum: usize) -> Option<&BigUint> {
		self.row.get(sum)
	}

	/// Number of dice added so far
	#[must_use]
	#[inline]
	pub const fn dice(&self) -> u8 {
		self.dice
	}

	/// Number of faces on each die
	#[must_use]
	#[inline]
	pub const fn faces(&self) -> u8 {
		self.faces
	}

	/// Takes the current row out of the table.
	fn into_row(self) -> Vec<BigUint> {
		self.row
	}
}

/// Counts the ordered ways `dice_remaining` dice with `faces` faces each can sum to exactly `target`.
///
/// Targets below the minimum possible sum (`dice_remaining`) or above the maximum (`dice_remaining * faces`) are
/// answered with zero without building a table. Otherwise a [`WaysTable`] of `target + 1` columns is built and
/// dropped once the answer is read.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use rollstat::stats::ways_to_reach_sum;
///
/// assert_eq!(ways_to_reach_sum(7, 2, 6), BigUint::from(6u8));
/// assert_eq!(ways_to_reach_sum(1, 2, 6), BigUint::from(0u8));
/// assert_eq!(ways_to_reach_sum(13, 2, 6), BigUint::from(0u8));
/// ```
#[must_use]
pub fn ways_to_reach_sum(target: i64, dice_remaining: u8, faces: u8) -> BigUint {
	let max = i64::from(dice_remaining) * i64::from(faces);
	if target < i64::from(dice_remaining) || target > max {
		return BigUint::zero();
	}
	let Ok(target) = usize::try_from(target) else {
		return BigUint::zero();
	};

	let mut table = WaysTable::new(faces, target + 1);
	for _ in 0..dice_remaining {
		table.add_die();
	}
	table.ways(target).cloned().unwrap_or_default()
}

/// Probability (0 to 1) that `count` dice with `faces` faces each total `target` or higher.
///
/// The result is exactly `1.0` whenever `target` is at or below the minimum possible sum, and exactly `0.0` whenever
/// it is above the maximum possible sum. The bound is inclusive, so the maximum total itself still has a non-zero
/// probability.
///
/// # Examples
/// ```
/// use rollstat::stats::probability_at_least;
///
/// assert_eq!(probability_at_least(7, 2, 6), 21.0 / 36.0);
/// assert_eq!(probability_at_least(12, 2, 6), 1.0 / 36.0);
/// assert_eq!(probability_at_least(2, 2, 6), 1.0);
/// assert_eq!(probability_at_least(13, 2, 6), 0.0);
/// ```
#[must_use]
pub fn probability_at_least(target: i64, count: u8, faces: u8) -> f64 {
	if target <= i64::from(count) {
		return 1.0;
	}
	if target > i64::from(count) * i64::from(faces) {
		return 0.0;
	}

	Distribution::new(count, faces).probability_at_least(target)
}

/// Closed-form mean and standard deviation of the sum of `count` dice with `faces` faces each.
///
/// # Examples
/// ```
/// use rollstat::stats::distribution_stats;
///
/// let stats = distribution_stats(2, 6);
/// assert_eq!(stats.mean, 7.0);
/// assert!((stats.std_dev - (35.0_f64 / 6.0).sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn distribution_stats(count: u8, faces: u8) -> DistributionStats {
	let count = f64::from(count);
	let faces = f64::from(faces);
	let variance = count * (faces * faces - 1.0) / 12.0;

	DistributionStats {
		mean: count * (faces + 1.0) / 2.0,
		std_dev: variance.sqrt(),
	}
}

/// The complete exact distribution of sums for one set of dice.
///
/// Building it costs one [`WaysTable`] pass over every achievable sum; after that every query is a lookup or a
/// sum over the stored counts. It holds no interior mutability and can be shared between threads freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
	/// Number of dice
	count: u8,

	/// Number of faces on each die
	faces: u8,

	/// Ways to reach each sum, indexed by the sum itself
	ways: Vec<BigUint>,

	/// Total number of equally likely outcomes (`faces^count`)
	outcomes: BigUint,
}

impl Distribution {
	/// Builds the distribution of sums for `count` dice with `faces` faces each.
	#[must_use]
	pub fn new(count: u8, faces: u8) -> Self {
		let max = usize::from(count) * usize::from(faces);
		let mut table = WaysTable::new(faces, max + 1);
		for _ in 0..count {
			table.add_die();
		}
		debug!(count, faces, "built sum distribution");

		Self {
			count,
			faces,
			ways: table.into_row(),
			outcomes: BigUint::from(faces).pow(u32::from(count)),
		}
	}

	/// Builds the distribution of sums for a validated set of dice.
	#[must_use]
	#[inline]
	pub fn of(dice: &Dice) -> Self {
		Self::new(dice.count(), dice.faces())
	}

	/// Lowest achievable sum
	#[must_use]
	#[inline]
	pub const fn min_sum(&self) -> u16 {
		self.count as u16
	}

	/// Highest achievable sum
	#[must_use]
	#[inline]
	pub const fn max_sum(&self) -> u16 {
		self.count as u16 * self.faces as u16
	}

	/// Total number of equally likely outcomes (`faces^count`)
	#[must_use]
	#[inline]
	pub const fn outcomes(&self) -> &BigUint {
		&self.outcomes
	}

	/// Number of ordered ways to reach exactly `sum`. Zero for any sum that can't be rolled.
	#[must_use]
	pub fn ways(&self, sum: i64) -> BigUint {
		usize::try_from(sum)
			.ok()
			.and_then(|sum| self.ways.get(sum))
			.cloned()
			.unwrap_or_default()
	}

	/// Iterates over every achievable sum along with its number of ways, lowest sum first.
	pub fn iter(&self) -> impl Iterator<Item = (u16, &BigUint)> + '_ {
		(self.min_sum()..=self.max_sum()).zip(self.ways.iter().skip(usize::from(self.count)))
	}

	/// Probability of rolling exactly `sum`.
	#[must_use]
	pub fn probability_of(&self, sum: i64) -> f64 {
		ratio(&self.ways(sum), &self.outcomes)
	}

	/// Probability of rolling `target` or higher. See [`probability_at_least()`] for the exact edge values.
	#[must_use]
	pub fn probability_at_least(&self, target: i64) -> f64 {
		if target <= i64::from(self.count) {
			return 1.0;
		}
		if target > i64::from(self.max_sum()) {
			return 0.0;
		}

		let start = usize::try_from(target).unwrap_or(usize::MAX);
		let favorable: BigUint = self.ways.iter().skip(start).sum();
		ratio(&favorable, &self.outcomes)
	}

	/// Mean and standard deviation computed by weighting every sum by its exact probability.
	///
	/// This agrees with [`distribution_stats()`] to within floating-point rounding.
	#[must_use]
	pub fn empirical_stats(&self) -> DistributionStats {
		let mut first = BigUint::zero();
		let mut second = BigUint::zero();
		for (sum, ways) in self.iter() {
			let weighted = ways * u32::from(sum);
			second += &weighted * u32::from(sum);
			first += weighted;
		}

		// Var = (N·Σs²w - (Σsw)²) / N², kept exact until the final division
		let spread = &self.outcomes * &second - &first * &first;
		let variance = ratio(&spread, &(&self.outcomes * &self.outcomes));

		DistributionStats {
			mean: ratio(&first, &self.outcomes),
			std_dev: variance.sqrt(),
		}
	}
}

/// Divides two big integers into an `f64`, dropping low bits from both first when they're too large to convert.
fn ratio(num: &BigUint, den: &BigUint) -> f64 {
	if den.is_zero() {
		return 0.0;
	}

	let shift = den.bits().saturating_sub(RATIO_BITS);
	let (num, den) = (num >> shift, den >> shift);
	num.to_f64().unwrap_or(f64::INFINITY) / den.to_f64().unwrap_or(f64::INFINITY)
}

/// Mean and standard deviation of a dice sum distribution
#[derive(Debug, Clone, Copy, PartialEq)]
#[expect(clippy::exhaustive_structs, reason = "These are the two moments reported")]
pub struct DistributionStats {
	/// Expected value of the sum
	pub mean: f64,

	/// Standard deviation of the sum
	pub std_dev: f64,
}

impl DistributionStats {
	/// Closed-form statistics for a validated set of dice. Same as [`distribution_stats()`].
	#[must_use]
	#[inline]
	pub fn of(dice: &Dice) -> Self {
		distribution_stats(dice.count(), dice.faces())
	}

	/// Classifies a rolled total by how far it lies from the mean.
	///
	/// Totals more than one standard deviation above the mean are [`Quality::High`], more than one below are
	/// [`Quality::Low`]. A total exactly one standard deviation away is still [`Quality::Average`].
	///
	/// # Examples
	/// ```
	/// use rollstat::stats::{distribution_stats, Quality};
	///
	/// let stats = distribution_stats(2, 6);
	/// assert_eq!(stats.classify(12), Quality::High);
	/// assert_eq!(stats.classify(7), Quality::Average);
	/// assert_eq!(stats.classify(2), Quality::Low);
	/// ```
	#[must_use]
	pub fn classify(&self, total: u16) -> Quality {
		let total = f64::from(total);
		if total > self.mean + self.std_dev {
			Quality::High
		} else if total < self.mean - self.std_dev {
			Quality::Low
		} else {
			Quality::Average
		}
	}
}

/// How a rolled total compares with the rest of its distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Quality {
	/// More than one standard deviation below the mean
	Low,

	/// Within one standard deviation of the mean
	Average,

	/// More than one standard deviation above the mean
	High,
}

impl fmt::Display for Quality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Low => "Low",
			Self::Average => "Average",
			Self::High => "High",
		})
	}
}

/// Basic statistics over a list of individual rolls
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct RollSummary {
	/// Average roll value
	pub mean: f64,

	/// Lowest roll value
	pub min: u8,

	/// Highest roll value
	pub max: u8,

	/// Number of rolls
	pub count: usize,
}

impl RollSummary {
	/// Summarizes a list of roll values, or returns `None` if the list is empty.
	///
	/// # Examples
	/// ```
	/// use rollstat::stats::RollSummary;
	///
	/// let summary = RollSummary::of(&[2, 6, 4]).unwrap();
	/// assert_eq!((summary.min, summary.max, summary.count), (2, 6, 3));
	/// assert_eq!(summary.mean, 4.0);
	///
	/// assert!(RollSummary::of(&[]).is_none());
	/// ```
	#[must_use]
	#[expect(clippy::cast_precision_loss, reason = "Roll lists are nowhere near 2^52 long")]
	pub fn of(values: &[u8]) -> Option<Self> {
		let min = *values.iter().min()?;
		let max = *values.iter().max()?;
		let sum: u64 = values.iter().map(|&val| u64::from(val)).sum();

		Some(Self {
			mean: sum as f64 / values.len() as f64,
			min,
			max,
			count: values.len(),
		})
	}
}
