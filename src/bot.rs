//! Chat-bot command layer: routes prefixed messages to the dice core and builds the replies to send back.
//!
//! Nothing in here talks to a chat platform. A front end hands each incoming message to [`Bot::handle()`] along
//! with the author's display name, and renders whatever [`Reply`] comes back (or stays silent on `None`).

#![cfg(feature = "bot")]

use std::fmt;

use tracing::{debug, info, warn};

use crate::{
	dice::{Error as DiceError, Limits, Roller},
	parse::{Error as ParseError, Notation, Query},
	stats::{Distribution, DistributionStats},
};

/// Immutable bot configuration, built once at start-up and handed to [`Bot::new()`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Constructed with struct update syntax from Default")]
pub struct Config {
	/// Prefix that marks a message as a command (e.g. `!`)
	pub prefix: String,

	/// Name of the command that rolls dice
	pub roll_command: String,

	/// Name of the command that answers probability questions
	pub probability_command: String,

	/// Name of the command that shows the help text
	pub help_command: String,

	/// Bounds applied to every dice notation before it's rolled or analyzed
	pub limits: Limits,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			prefix: "!".to_owned(),
			roll_command: "roll".to_owned(),
			probability_command: "probability".to_owned(),
			help_command: "dicehelp".to_owned(),
			limits: Limits::DEFAULT,
		}
	}
}

impl Config {
	/// Usage message shown for a malformed roll command.
	#[must_use]
	pub fn roll_usage(&self) -> String {
		format!(
			"Error: Invalid format! Use: {p}{c} NdM (e.g., {p}{c} 2d6)",
			p = self.prefix,
			c = self.roll_command
		)
	}

	/// Usage message shown for a malformed probability command.
	#[must_use]
	pub fn probability_usage(&self) -> String {
		format!(
			"Invalid format! Use: {p}{c} NdM X (e.g., {p}{c} 2d6 7)",
			p = self.prefix,
			c = self.probability_command
		)
	}

	/// Full help text listing every command and the configured limits.
	#[must_use]
	pub fn help_message(&self) -> String {
		let Self {
			prefix: p,
			roll_command: roll,
			probability_command: prob,
			limits,
			..
		} = self;

		format!(
			"\n\
			**Dice Roller Bot Help**\n\
			Roll dice using the following command:\n\
			`{p}{roll} NdM`\n\
			where:\n\
			- N is the number of dice (1-{max_dice})\n\
			- d is the separator\n\
			- M is the number of faces per die (1-{max_faces})\n\
			\n\
			Example: `{p}{roll} 2d6` rolls two six-sided dice\n\
			\n\
			\n\
			**Statistics Commands:**\n\
			`{p}{prob} NdM X` - Calculate probability of rolling X with NdM dice\n",
			max_dice = limits.max_count,
			max_faces = limits.max_faces,
		)
	}

	/// Status text advertising the help command.
	#[must_use]
	pub fn presence(&self) -> String {
		format!("{}{} for commands", self.prefix, self.help_command)
	}
}

/// A command recognized in a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
	/// Roll some dice and analyze the result
	Roll(Notation),

	/// Compute the probability of meeting or beating a total
	Probability(Query),

	/// Show the help text
	Help,
}

impl Command {
	/// Recognizes a command in a chat message.
	///
	/// Messages that don't start with the configured prefix aren't meant for the bot and yield `Ok(None)`.
	///
	/// # Errors
	/// [`Error::UnknownCommand`] if the command name isn't recognized, or [`Error::Malformed`] if the arguments don't
	/// match the command's notation.
	///
	/// # Examples
	/// ```
	/// use rollstat::{bot::{Command, Config}, parse::Notation};
	///
	/// let config = Config::default();
	/// assert_eq!(
	/// 	Command::parse("!roll 2D6", &config)?,
	/// 	Some(Command::Roll(Notation { count: 2, faces: 6 }))
	/// );
	/// assert_eq!(Command::parse("hello there", &config)?, None);
	/// # Ok::<(), rollstat::bot::Error>(())
	/// ```
	pub fn parse(message: &str, config: &Config) -> Result<Option<Self>, Error> {
		let Some(body) = message.trim_start().strip_prefix(config.prefix.as_str()) else {
			return Ok(None);
		};
		let (name, args) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
		let args = args.trim();

		if name == config.roll_command {
			args.parse()
				.map(|notation| Some(Self::Roll(notation)))
				.map_err(|source| Error::Malformed {
					usage: config.roll_usage(),
					input: args.to_lowercase(),
					source,
				})
		} else if name == config.probability_command {
			args.parse()
				.map(|query| Some(Self::Probability(query)))
				.map_err(|source| Error::Malformed {
					usage: config.probability_usage(),
					input: args.to_lowercase(),
					source,
				})
		} else if name == config.help_command {
			Ok(Some(Self::Help))
		} else {
			Err(Error::UnknownCommand {
				name: name.to_owned(),
				help: format!("{}{}", config.prefix, config.help_command),
			})
		}
	}
}

/// Accent color of a reply, for front ends that can show one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Color {
	/// Roll results
	Blue,

	/// Informational replies (probabilities, help)
	Green,

	/// Errors
	Red,
}

/// A titled field inside a [`Reply`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain name/value pair")]
pub struct Field {
	/// Field heading
	pub name: String,

	/// Field body
	pub value: String,
}

/// A message for the front end to send back, shaped like a chat embed
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Reply {
	/// Heading, if any
	pub title: Option<String>,

	/// Main body text
	pub description: String,

	/// Extra titled sections below the body
	pub fields: Vec<Field>,

	/// Small print at the bottom, if any
	pub footer: Option<String>,

	/// Accent color
	pub color: Color,
}

impl Reply {
	/// Creates a reply with no fields or footer.
	fn new(title: Option<String>, description: String, color: Color) -> Self {
		Self {
			title,
			description,
			fields: Vec::new(),
			footer: None,
			color,
		}
	}

	/// Creates an error reply with no title.
	#[must_use]
	pub fn error(message: String) -> Self {
		Self::new(None, message, Color::Red)
	}
}

impl fmt::Display for Reply {
	/// Renders the reply as plain text, one section per paragraph.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(title) = &self.title {
			writeln!(f, "{title}")?;
		}
		write!(f, "{}", self.description)?;
		for field in &self.fields {
			write!(f, "\n\n{}\n{}", field.name, field.value)?;
		}
		if let Some(footer) = &self.footer {
			write!(f, "\n\n{footer}")?;
		}
		Ok(())
	}
}

/// Dispatches chat messages to the dice core using a fixed configuration and roller.
#[derive(Debug, Clone)]
pub struct Bot<R: Roller> {
	/// Configuration applied to every command
	config: Config,

	/// Source of dice rolls
	roller: R,
}

impl<R: Roller> Bot<R> {
	/// Creates a new bot.
	#[must_use]
	pub const fn new(config: Config, roller: R) -> Self {
		Self { config, roller }
	}

	/// Configuration the bot was created with
	#[must_use]
	#[inline]
	pub const fn config(&self) -> &Config {
		&self.config
	}

	/// Handles one chat message, turning any error into an error reply.
	/// Returns `None` when the message isn't addressed to the bot.
	pub fn handle(&mut self, message: &str, author: &str) -> Option<Reply> {
		match self.try_handle(message, author) {
			Ok(reply) => reply,
			Err(err) => {
				warn!(%err, message, "command failed");
				Some(Reply::error(err.user_message()))
			}
		}
	}

	/// Handles one chat message.
	///
	/// # Errors
	/// Any error from recognizing the command or validating its dice.
	pub fn try_handle(&mut self, message: &str, author: &str) -> Result<Option<Reply>, Error> {
		let Some(command) = Command::parse(message, &self.config)? else {
			return Ok(None);
		};
		debug!(?command, author, "command received");

		let reply = match command {
			Command::Roll(notation) => self.roll(notation, author)?,
			Command::Probability(query) => self.probability(query)?,
			Command::Help => Reply::new(
				Some("Dice Roller Bot Help".to_owned()),
				self.config.help_message(),
				Color::Green,
			),
		};
		Ok(Some(reply))
	}

	/// Rolls the dice and scores the total against its distribution.
	fn roll(&mut self, notation: Notation, author: &str) -> Result<Reply, Error> {
		let dice = notation.validate(self.config.limits)?;
		let rolled = self.roller.roll(&dice);

		let quality = DistributionStats::of(&dice).classify(rolled.total());
		let chance = Distribution::of(&dice).probability_at_least(i64::from(rolled.total())) * 100.0;
		info!(%rolled, total = rolled.total(), %quality, "roll completed");

		let mut reply = Reply::new(Some(format!("Rolling {dice}")), rolled.report(), Color::Blue);
		reply.fields.push(Field {
			name: "Roll Analysis".to_owned(),
			value: format!("Roll Quality: {quality}\nProbability of this roll or better: {chance:.1}%"),
		});
		reply.footer = Some(format!("Requested by {author}"));
		Ok(reply)
	}

	/// Answers a probability question.
	fn probability(&self, query: Query) -> Result<Reply, Error> {
		let dice = query.notation.validate(self.config.limits)?;
		let chance = Distribution::of(&dice).probability_at_least(query.target) * 100.0;
		info!(%dice, target = query.target, chance, "probability computed");

		Ok(Reply::new(
			Some(format!("Probability Analysis for {dice}")),
			format!("Chance of rolling {} or higher: {chance:.2}%", query.target),
			Color::Green,
		))
	}
}

/// An error resulting from handling a chat command
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The command's arguments didn't match its notation.
	#[error("malformed arguments {input:?}: {source}")]
	Malformed {
		/// Usage message for the command
		usage: String,

		/// Lowercased arguments that failed to parse
		input: String,

		/// Problems found by the parser
		source: ParseError,
	},

	/// The dice in the command failed validation.
	#[error(transparent)]
	Invalid(#[from] DiceError),

	/// The command name isn't one the bot knows.
	#[error("unknown command: {name}")]
	UnknownCommand {
		/// Name that was used
		name: String,

		/// Full invocation of the help command
		help: String,
	},
}

impl Error {
	/// Text to show the user who sent the command.
	#[must_use]
	pub fn user_message(&self) -> String {
		match self {
			Self::Malformed { usage, .. } => usage.clone(),
			Self::Invalid(err) => format!("Error: {err}"),
			Self::UnknownCommand { help, .. } => format!("Unknown command. Use {help} for available commands."),
		}
	}
}
