//! Abstractions for rolling [`Dice`] using various means.

use std::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Dice, Rolled};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die with the given number of faces.
	#[must_use]
	fn roll_die(&mut self, faces: u8) -> u8;

	/// Rolls a set of dice, producing one value per die and their total.
	fn roll(&mut self, dice: &Dice) -> Rolled
	where
		Self: Sized,
	{
		let rolls = (0..dice.count()).map(|_| self.roll_die(dice.faces())).collect::<Vec<_>>();
		Rolled::from_dice_and_rolls(*dice, rolls)
	}
}

/// Generates rolls with uniformly random values using [fastrand]. Requires the `fastrand` feature (enabled by
/// default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use rollstat::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice, Limits};
///
/// let mut roller = FastRandRoller::default();
///
/// let dice = Dice::validate(4, 6, Limits::DEFAULT)?;
/// let rolled = roller.roll(&dice);
/// assert_eq!(rolled.rolls().len(), 4);
/// assert!(rolled.rolls().iter().all(|&val| (1..=6).contains(&val)));
/// # Ok::<(), rollstat::dice::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use rollstat::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice, Limits};
///
/// let dice = Dice::validate(4, 6, Limits::DEFAULT)?;
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// assert_eq!(first, second);
/// # Ok::<(), rollstat::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, faces: u8) -> u8 {
		if faces > 0 {
			self.0.u8(1..=faces)
		} else {
			0
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use rollstat::dice::{roller::{Roller, Val as ValRoller}, Dice, Limits};
///
/// let mut roller = ValRoller(1);
///
/// let dice = Dice::validate(4, 6, Limits::DEFAULT)?;
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls().iter().all(|&val| val == 1));
/// assert_eq!(rolled.total(), 4);
/// # Ok::<(), rollstat::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u8);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _faces: u8) -> u8 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use rollstat::dice::{roller::{Max as MaxRoller, Roller}, Dice, Limits};
///
/// let mut roller = MaxRoller;
///
/// let dice = Dice::validate(2, 20, Limits::DEFAULT)?;
/// let rolled = roller.roll(&dice);
/// assert_eq!(rolled.rolls(), &[20, 20]);
/// assert_eq!(rolled.total(), dice.max_total());
/// # Ok::<(), rollstat::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of faces).
	#[inline]
	fn roll_die(&mut self, faces: u8) -> u8 {
		faces
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use rollstat::dice::{roller::{Iter as IterRoller, Roller}, Dice, Limits};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// let dice = Dice::validate(5, 6, Limits::DEFAULT)?;
/// assert_eq!(roller.roll(&dice).rolls(), &[1, 2, 3, 4, 10]);
/// # Ok::<(), rollstat::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u8>>(Peekable<I>);

impl<I: Iterator<Item = u8>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u8>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _faces: u8) -> u8 {
		self.0.next().expect("iterator is finished")
	}
}
