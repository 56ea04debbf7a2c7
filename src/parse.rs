//! Parsers for the `NdM` and `NdM X` dice notations used by chat commands.
//!
//! Parsing only checks the shape of the input. The numbers are handed back as-is so that [`Dice::validate()`] can
//! report out-of-range values with a specific error instead of a generic parse failure.
//!
//! [`Dice::validate()`]: crate::dice::Dice::validate

#![cfg(feature = "parse")]

use std::{fmt, ops::Range, str::FromStr};

use chumsky::prelude::*;

use crate::dice::{Dice, Error as DiceError, Limits};

/// Dice notation as typed by a user, before validation (e.g. "2d6")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Mirrors the notation exactly")]
pub struct Notation {
	/// Number of dice
	pub count: i64,

	/// Number of faces per die
	pub faces: i64,
}

impl Notation {
	/// Validates the notation against a set of limits. See [`Dice::validate()`].
	///
	/// # Errors
	/// Returns the validation error for the first check the notation fails.
	#[inline]
	pub fn validate(&self, limits: Limits) -> Result<Dice, DiceError> {
		Dice::validate(self.count, self.faces, limits)
	}
}

impl fmt::Display for Notation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.faces)
	}
}

/// A probability question as typed by a user (e.g. "2d6 7" for "how likely is 7 or higher on 2d6")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Mirrors the notation exactly")]
pub struct Query {
	/// Dice being asked about
	pub notation: Notation,

	/// Total to meet or exceed
	pub target: i64,
}

/// Generates a parser for a run of decimal digits (leading zeros allowed).
///
/// Values too large for an `i64` saturate to [`i64::MAX`], so they still fail validation or probability bounds
/// like any other out-of-range number.
fn number<'src>() -> impl Parser<'src, &'src str, i64, extra::Err<Rich<'src, char>>> + Clone {
	text::digits(10)
		.at_least(1)
		.to_slice()
		.map(|digits: &str| digits.parse::<i64>().unwrap_or(i64::MAX))
}

/// Generates a parser that handles dice notation like "2d6" or "10d100".
pub fn notation_part<'src>() -> impl Parser<'src, &'src str, Notation, extra::Err<Rich<'src, char>>> + Clone {
	number()
		.then_ignore(just('d'))
		.then(number())
		.map(|(count, faces)| Notation { count, faces })
}

/// Generates a parser that handles dice notation like "2d6" and expects end of input.
/// Surrounding whitespace is ignored.
pub fn notation<'src>() -> impl Parser<'src, &'src str, Notation, extra::Err<Rich<'src, char>>> + Clone {
	notation_part().padded().then_ignore(end())
}

/// Generates a parser that handles probability queries like "2d6 7" (dice notation, whitespace, target total).
pub fn query_part<'src>() -> impl Parser<'src, &'src str, Query, extra::Err<Rich<'src, char>>> + Clone {
	notation_part()
		.then_ignore(text::whitespace().at_least(1))
		.then(number())
		.map(|(notation, target)| Query { notation, target })
}

/// Generates a parser that handles probability queries like "2d6 7" and expects end of input.
/// Surrounding whitespace is ignored.
pub fn query<'src>() -> impl Parser<'src, &'src str, Query, extra::Err<Rich<'src, char>>> + Clone {
	query_part().padded().then_ignore(end())
}

/// Malformed input: the text didn't match the expected notation
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Error {
	/// Every problem found, with the byte range of the (lowercased) input it applies to
	pub problems: Vec<(Range<usize>, String)>,
}

impl Error {
	/// Iterates over the messages of every problem found.
	pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
		self.problems.iter().map(|(_, msg)| msg.as_str())
	}

	/// Collects chumsky's errors, keeping only their spans and messages.
	fn from_rich(errs: Vec<Rich<'_, char>>) -> Self {
		Self {
			problems: errs
				.into_iter()
				.map(|err| {
					let span = *err.span();
					(span.start..span.end, err.to_string())
				})
				.collect(),
		}
	}
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.messages().collect::<Vec<_>>().join("; "))
	}
}

impl FromStr for Notation {
	type Err = Error;

	/// Parses dice notation, ignoring case.
	///
	/// # Examples
	/// ```
	/// use rollstat::parse::Notation;
	///
	/// let notation: Notation = "3D8".parse()?;
	/// assert_eq!(notation, Notation { count: 3, faces: 8 });
	/// assert!("3d".parse::<Notation>().is_err());
	/// # Ok::<(), rollstat::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lc = s.to_lowercase();
		let result = notation().parse(&lc).into_result().map_err(Error::from_rich);
		result
	}
}

impl FromStr for Query {
	type Err = Error;

	/// Parses a probability query, ignoring case.
	///
	/// # Examples
	/// ```
	/// use rollstat::parse::{Notation, Query};
	///
	/// let query: Query = "2d6 7".parse()?;
	/// assert_eq!(query, Query { notation: Notation { count: 2, faces: 6 }, target: 7 });
	/// assert!("2d6".parse::<Query>().is_err());
	/// # Ok::<(), rollstat::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lc = s.to_lowercase();
		let result = query().parse(&lc).into_result().map_err(Error::from_rich);
		result
	}
}
