use std::io::{self, BufRead};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use rollstat::{
	bot::{Bot, Config, Error, Reply},
	dice::{roller::FastRand, Limits},
	parse::Error as ParseError,
};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Console front end for the dice bot: reads chat commands and prints the bot's replies.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Args {
	/// Prefix that marks a message as a command
	#[arg(long, env = "DICEBOT_PREFIX", default_value = "!")]
	prefix: String,

	/// Maximum number of dice in one roll
	#[arg(long, env = "DICEBOT_MAX_DICE", default_value_t = Limits::DEFAULT.max_count)]
	max_dice: u8,

	/// Maximum number of faces per die
	#[arg(long, env = "DICEBOT_MAX_FACES", default_value_t = Limits::DEFAULT.max_faces)]
	max_faces: u8,

	/// Seed for the dice roller, for reproducible rolls
	#[arg(long, env = "DICEBOT_SEED")]
	seed: Option<u64>,

	/// Name shown as the author of every command
	#[arg(long, default_value = "console")]
	author: String,

	/// Single command to run, e.g. `!roll 2d6`. Commands are read from stdin, one per line, when omitted.
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	command: Vec<String>,
}

fn main() -> io::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();
	let config = Config {
		prefix: args.prefix,
		limits: Limits::new(args.max_dice, args.max_faces),
		..Config::default()
	};
	let roller = args.seed.map_or_else(FastRand::default, FastRand::with_seed);
	let mut bot = Bot::new(config, roller);
	info!(presence = %bot.config().presence(), "dice bot ready");

	// Combine all args into the command so that it can be left unquoted even with spaces
	if !args.command.is_empty() {
		return respond(&mut bot, &args.command.join(" "), &args.author);
	}

	for line in io::stdin().lock().lines() {
		respond(&mut bot, &line?, &args.author)?;
	}
	Ok(())
}

fn respond(bot: &mut Bot<FastRand>, message: &str, author: &str) -> io::Result<()> {
	match bot.try_handle(message, author) {
		Ok(Some(reply)) => println!("{reply}\n"),
		Ok(None) => {}
		Err(err) => {
			if let Error::Malformed { input, source, .. } = &err {
				report_malformed(input, source)?;
			}
			println!("{}\n", Reply::error(err.user_message()));
		}
	}
	Ok(())
}

fn report_malformed(input: &str, err: &ParseError) -> io::Result<()> {
	for (span, msg) in &err.problems {
		Report::build(ReportKind::Error, ("command", span.clone()))
			.with_message("malformed dice notation")
			.with_label(
				Label::new(("command", span.clone()))
					.with_message(msg)
					.with_color(Color::Red),
			)
			.finish()
			.eprint(("command", Source::from(input)))?;
	}
	Ok(())
}
