//! All functionality for validating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For the statistics of a set of dice, see [`crate::stats`].

pub mod roller;

use std::fmt;

pub use self::roller::Roller;

/// Upper bounds that [`Dice`] are validated against.
///
/// The defaults allow up to 100 dice with up to 100 faces each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Only ever a pair of bounds")]
pub struct Limits {
	/// Maximum number of dice in a single roll
	pub max_count: u8,

	/// Maximum number of faces per die
	pub max_faces: u8,
}

impl Limits {
	/// Default limits (100 dice with up to 100 faces).
	pub const DEFAULT: Self = Self::new(100, 100);

	/// Creates a new set of limits.
	#[must_use]
	pub const fn new(max_count: u8, max_faces: u8) -> Self {
		Self { max_count, max_faces }
	}
}

impl Default for Limits {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// A validated set of one or more rollable dice with a specific number of faces.
///
/// The only way to obtain one from untrusted input is [`Dice::validate()`], so a `Dice` always has a positive
/// count and face count within the [`Limits`] it was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dice {
	/// Number of dice to roll
	count: u8,

	/// Number of faces on each die
	faces: u8,
}

impl Dice {
	/// Validates a raw dice count and face count against a set of limits.
	///
	/// Checks run in a fixed order and the first failing one is reported: non-positive values, then the dice count
	/// bound, then the face count bound.
	///
	/// # Errors
	/// [`Error::ZeroOrNegative`] if either value is zero or negative, [`Error::TooManyDice`] if `count` exceeds
	/// [`Limits::max_count`], or [`Error::TooManyFaces`] if `faces` exceeds [`Limits::max_faces`].
	///
	/// # Examples
	/// ```
	/// use rollstat::dice::{Dice, Error, Limits};
	///
	/// let dice = Dice::validate(2, 6, Limits::DEFAULT)?;
	/// assert_eq!(dice.to_string(), "2d6");
	///
	/// assert!(matches!(Dice::validate(0, 6, Limits::DEFAULT), Err(Error::ZeroOrNegative)));
	/// assert!(matches!(Dice::validate(101, 6, Limits::DEFAULT), Err(Error::TooManyDice { max: 100 })));
	/// assert!(matches!(Dice::validate(2, 101, Limits::DEFAULT), Err(Error::TooManyFaces { max: 100 })));
	/// # Ok::<(), rollstat::dice::Error>(())
	/// ```
	pub fn validate(count: i64, faces: i64, limits: Limits) -> Result<Self, Error> {
		if count <= 0 || faces <= 0 {
			return Err(Error::ZeroOrNegative);
		}

		let count = u8::try_from(count)
			.ok()
			.filter(|&count| count <= limits.max_count)
			.ok_or(Error::TooManyDice { max: limits.max_count })?;
		let faces = u8::try_from(faces)
			.ok()
			.filter(|&faces| faces <= limits.max_faces)
			.ok_or(Error::TooManyFaces { max: limits.max_faces })?;

		Ok(Self { count, faces })
	}

	/// Number of dice to roll
	#[must_use]
	#[inline]
	pub const fn count(&self) -> u8 {
		self.count
	}

	/// Number of faces on each die
	#[must_use]
	#[inline]
	pub const fn faces(&self) -> u8 {
		self.faces
	}

	/// Lowest total these dice can roll (every die showing 1).
	#[must_use]
	#[inline]
	pub const fn min_total(&self) -> u16 {
		self.count as u16
	}

	/// Highest total these dice can roll (every die showing its max face).
	#[must_use]
	#[inline]
	pub const fn max_total(&self) -> u16 {
		self.count as u16 * self.faces as u16
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.faces)
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rolled {
	/// Each individual die value
	rolls: Vec<u8>,

	/// Sum of all values in `rolls`
	total: u16,

	/// Dice that were rolled to produce this
	dice: Dice,
}

impl Rolled {
	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	/// The total is computed once here and never changes afterwards.
	#[must_use]
	pub fn from_dice_and_rolls(dice: Dice, rolls: impl IntoIterator<Item = u8>) -> Self {
		let rolls: Vec<u8> = rolls.into_iter().collect();
		let total = rolls.iter().map(|&val| u16::from(val)).sum();
		Self { rolls, total, dice }
	}

	/// Each individual die value, in the order rolled
	#[must_use]
	#[inline]
	pub fn rolls(&self) -> &[u8] {
		&self.rolls
	}

	/// Sum of all die values
	#[must_use]
	#[inline]
	pub const fn total(&self) -> u16 {
		self.total
	}

	/// Dice that were rolled to produce this
	#[must_use]
	#[inline]
	pub const fn dice(&self) -> Dice {
		self.dice
	}

	/// Builds the chat-ready report of the individual rolls and their total.
	///
	/// # Examples
	/// ```
	/// use rollstat::dice::{Dice, Limits, Rolled};
	///
	/// let dice = Dice::validate(3, 6, Limits::DEFAULT)?;
	/// let rolled = Rolled::from_dice_and_rolls(dice, [2, 6, 3]);
	/// assert_eq!(rolled.report(), "🎲 Rolls: [2, 6, 3]\n**Total: 11**");
	/// # Ok::<(), rollstat::dice::Error>(())
	/// ```
	#[must_use]
	pub fn report(&self) -> String {
		format!("🎲 Rolls: [{}]\n**Total: {}**", join_rolls(self.rolls.iter()), self.total)
	}

	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use rollstat::dice::{Dice, Limits, Rolled};
	///
	/// let dice = Dice::validate(4, 6, Limits::DEFAULT)?;
	/// let rolled = Rolled::from_dice_and_rolls(dice, [6, 2, 5, 3]);
	///
	/// assert_eq!(rolled.describe(None), "4d6[6, 2, 5, 3]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6[6, 2, 2 more...]");
	/// # Ok::<(), rollstat::dice::Error>(())
	/// ```
	#[must_use]
	pub fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			self.dice,
			join_rolls(self.rolls.iter().take(list_limit)),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Joins roll values into a comma-separated list.
fn join_rolls<'a>(rolls: impl Iterator<Item = &'a u8>) -> String {
	rolls.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// An error resulting from validating dice
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The dice count or face count was zero or negative.
	#[error("Number of dice and faces must be greater than 0!")]
	ZeroOrNegative,

	/// The dice count was above the configured maximum.
	#[error("Cannot roll more than {max} dice at once!")]
	TooManyDice {
		/// Maximum dice count that was exceeded
		max: u8,
	},

	/// The face count was above the configured maximum.
	#[error("Dice cannot have more than {max} faces!")]
	TooManyFaces {
		/// Maximum face count that was exceeded
		max: u8,
	},
}
