use crate::dice::{
	roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller, Val as ValRoller},
	Dice, Error, Limits, Rolled,
};

#[test]
fn validates_in_bounds_dice() {
	let dice = Dice::validate(2, 6, Limits::DEFAULT).unwrap();
	assert_eq!(dice.count(), 2);
	assert_eq!(dice.faces(), 6);
	assert_eq!(dice.to_string(), "2d6");
}

#[test]
fn validates_limits_inclusively() {
	assert!(Dice::validate(100, 100, Limits::DEFAULT).is_ok());
	assert!(Dice::validate(1, 1, Limits::DEFAULT).is_ok());
}

#[test]
fn rejects_zero_and_negative() {
	assert_eq!(Dice::validate(0, 6, Limits::DEFAULT), Err(Error::ZeroOrNegative));
	assert_eq!(Dice::validate(2, 0, Limits::DEFAULT), Err(Error::ZeroOrNegative));
	assert_eq!(Dice::validate(-3, 6, Limits::DEFAULT), Err(Error::ZeroOrNegative));
	assert_eq!(Dice::validate(2, -6, Limits::DEFAULT), Err(Error::ZeroOrNegative));
}

#[test]
fn rejects_too_many_dice() {
	assert_eq!(Dice::validate(101, 6, Limits::DEFAULT), Err(Error::TooManyDice { max: 100 }));
	assert_eq!(Dice::validate(i64::MAX, 6, Limits::DEFAULT), Err(Error::TooManyDice { max: 100 }));
}

#[test]
fn rejects_too_many_faces() {
	assert_eq!(Dice::validate(2, 101, Limits::DEFAULT), Err(Error::TooManyFaces { max: 100 }));
	assert_eq!(Dice::validate(2, 1000, Limits::DEFAULT), Err(Error::TooManyFaces { max: 100 }));
}

#[test]
fn first_failing_check_wins() {
	assert_eq!(Dice::validate(0, 101, Limits::DEFAULT), Err(Error::ZeroOrNegative));
	assert_eq!(Dice::validate(101, 0, Limits::DEFAULT), Err(Error::ZeroOrNegative));
	assert_eq!(Dice::validate(101, 101, Limits::DEFAULT), Err(Error::TooManyDice { max: 100 }));
}

#[test]
fn custom_limits() {
	let limits = Limits::new(10, 20);
	assert!(Dice::validate(10, 20, limits).is_ok());
	assert_eq!(Dice::validate(11, 20, limits), Err(Error::TooManyDice { max: 10 }));
	assert_eq!(Dice::validate(10, 21, limits), Err(Error::TooManyFaces { max: 20 }));
}

#[test]
fn error_messages() {
	assert_eq!(
		Error::ZeroOrNegative.to_string(),
		"Number of dice and faces must be greater than 0!"
	);
	assert_eq!(
		Error::TooManyDice { max: 100 }.to_string(),
		"Cannot roll more than 100 dice at once!"
	);
	assert_eq!(
		Error::TooManyFaces { max: 100 }.to_string(),
		"Dice cannot have more than 100 faces!"
	);
}

#[test]
fn single_d20() {
	let dice = construct(1, 20);
	let rolled = rolls_in_range(&dice);
	assert_eq!(rolled.rolls().len(), 1);
	assert_eq!(rolled.dice(), dice);
}

#[test]
fn hundred_d100s() {
	let dice = construct(100, 100);
	let rolled = rolls_in_range(&dice);
	assert_eq!(rolled.rolls().len(), 100);
}

#[test]
fn random_rolls_stay_in_range() {
	let mut rng = fastrand::Rng::with_seed(0x5eed);
	let mut roller = FastRandRoller::default();

	for _ in 0..10_000 {
		let dice = construct(rng.u8(1..=100), rng.u8(1..=100));
		let rolled = roller.roll(&dice);

		assert_eq!(rolled.rolls().len(), usize::from(dice.count()));
		assert!(rolled.rolls().iter().all(|&val| (1..=dice.faces()).contains(&val)));
		assert_eq!(
			u32::from(rolled.total()),
			rolled.rolls().iter().map(|&val| u32::from(val)).sum::<u32>()
		);
	}
}

#[test]
fn all_faces_occur() {
	let dice = construct(100, 20);
	let mut roller = FastRandRoller::default();
	let mut seen = [false; 20];

	for _ in 0..100 {
		for &val in roller.roll(&dice).rolls() {
			seen[usize::from(val) - 1] = true;
		}
	}

	assert!(seen.iter().all(|&seen| seen));
}

#[test]
fn seeded_rolls_repeat() {
	let dice = construct(10, 12);
	let first = FastRandRoller::with_seed(42).roll(&dice);
	let second = FastRandRoller::with_seed(42).roll(&dice);
	assert_eq!(first, second);
}

#[test]
fn fixed_rollers() {
	let dice = construct(3, 8);

	let rolled = MaxRoller.roll(&dice);
	assert_eq!(rolled.rolls(), &[8, 8, 8]);
	assert_eq!(rolled.total(), dice.max_total());

	let rolled = ValRoller(1).roll(&dice);
	assert_eq!(rolled.total(), dice.min_total());

	let mut roller = IterRoller::new([4, 1, 7, 2]);
	assert_eq!(roller.roll(&dice).rolls(), &[4, 1, 7]);
	assert!(roller.can_roll());
	let _ = roller.roll_die(8);
	assert!(!roller.can_roll());
}

#[test]
fn report_and_describe() {
	let dice = construct(5, 6);
	let rolled = Rolled::from_dice_and_rolls(dice, [6, 1, 3, 3, 5]);

	assert_eq!(rolled.total(), 18);
	assert_eq!(rolled.report(), "🎲 Rolls: [6, 1, 3, 3, 5]\n**Total: 18**");
	assert_eq!(rolled.describe(None), "5d6[6, 1, 3, 3, 5]");
	assert_eq!(rolled.describe(Some(3)), "5d6[6, 1, 3, 2 more...]");
	assert_eq!(rolled.describe(Some(5)), "5d6[6, 1, 3, 3, 5]");
	assert_eq!(rolled.to_string(), rolled.describe(None));
}

fn construct(count: u8, faces: u8) -> Dice {
	let dice = Dice::validate(i64::from(count), i64::from(faces), Limits::DEFAULT).unwrap();
	assert_eq!(dice.count(), count);
	assert_eq!(dice.faces(), faces);
	dice
}

fn rolls_in_range(dice: &Dice) -> Rolled {
	let rolled = FastRandRoller::default().roll(dice);
	assert!(rolled.rolls().iter().all(|&val| val >= 1 && val <= dice.faces()));
	rolled
}
