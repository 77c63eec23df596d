use std::{error::Error, io::Write, str::FromStr};

use clap::Parser;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use rubiksbfs::prelude::*;

#[cfg(feature = "interactive")]
mod interactive;

/// Rubik's Cube breadth-first solver written in Rust
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Play with the cube interactively
	/// The cube built from the other options is the starting point
	#[cfg(feature = "interactive")]
	#[arg(short, long, default_value_t = false)]
	interactive: bool,

	/// Use a sequence to apply on the cube
	#[arg(short, default_value_t = String::new())]
	sequence: String,

	/// Set the cube from a string (the same format as when you output the cube via the "-c"-flag)
	#[arg(long, default_value_t = String::new())]
	set: String,

	/// Load the cube from a file written with --save
	#[arg(long)]
	load: Option<String>,

	/// Apply a named pattern (see --list-patterns)
	#[arg(short, long)]
	pattern: Option<String>,

	/// Print all known patterns and quit
	#[arg(long, default_value_t = false)]
	list_patterns: bool,

	/// Scramble the cube with this many random moves
	#[arg(short, long, default_value_t = 0)]
	random: usize,

	/// Seed for the random moves
	#[arg(long)]
	seed: Option<u64>,

	/// Solve the cube (the output is a sequence)
	#[arg(long, default_value_t = false)]
	solve: bool,

	/// The maximal length of a solution
	#[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
	max_depth: usize,

	/// Output length of sequence (if --solve is used)
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Output the cube as a string rather than colored
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Print the output to a file rather to the stdout
	#[arg(short, long, default_value_t = String::new())]
	output: String,

	/// Write the resulting cube into a file
	#[arg(long)]
	save: Option<String>,
}

/// Build the cube from the options in a fixed order:
/// `--set`/`--load`, then `--pattern`, then `--random` and last `-s`.
fn build_cube(args: &Args) -> Result<CubeState, Box<dyn Error>> {
	let mut cube = CubeState::default();

	// Parses a cube out of the cube string
	if !args.set.is_empty() {
		cube = CubeState::from_str(&args.set)?;
	}

	if let Some(path) = &args.load {
		cube = CubeState::load(path)?;
	}

	if !cube.has_valid_color_counts() {
		warn!("The given cube doesn't have nine stickers of every color");
	}

	if let Some(key) = &args.pattern {
		let pattern = find_pattern(key).ok_or_else(|| format!("Unknown pattern \"{}\"", key))?;
		info!("Applying {}: {}", pattern.name, pattern.algorithm);
		cube = pattern.apply(&cube)?;
	}

	// Scramble the cube
	if args.random > 0 {
		let turns = match args.seed {
			Some(seed) => random_sequence_with(&mut StdRng::seed_from_u64(seed), args.random),
			None => random_sequence(args.random),
		};
		info!("Scramble: {}", format_moves(&turns));
		cube = cube.apply_moves(turns);
	}

	// Applies turns from args
	cube = cube.apply_moves(parse_moves(&args.sequence)?);

	Ok(cube)
}

fn main() -> Result<(), Box<dyn Error>> {
	pretty_env_logger::init();

	let args = Args::parse();
	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn std::io::Write> = if args.output.is_empty() {
		Box::new(std::io::stdout())
	} else {
		Box::new(std::fs::File::create(&args.output)?)
	};

	// List the patterns and exit
	if args.list_patterns {
		for p in patterns() {
			writeln!(out, "{:<14} {:<22} {}", p.key, p.name, p.algorithm)?;
		}
		return Ok(());
	}

	let cube = build_cube(&args)?;

	if let Some(path) = &args.save {
		cube.save(path)?;
	}

	#[cfg(feature = "interactive")]
	if args.interactive {
		return interactive::interactive_mode(cube, args.max_depth);
	}

	// Solve the cube and only outputs the sequence
	if args.solve {
		match solve(&cube, args.max_depth) {
			Some(turns) => {
				write!(out, "{}", format_moves(&turns))?;
				if args.length {
					writeln!(out, " (len={})", turns.len())?;
				} else {
					writeln!(out)?;
				}
				return Ok(());
			}
			None => {
				return Err(format!("No solution within {} moves", args.max_depth).into());
			}
		}
	}

	// Print the resulting cube (either as a string or with colors)
	if args.char_print {
		let s: String = cube.into();
		writeln!(out, "{}", s)?;
	} else if args.output.is_empty() {
		cube.print();
	} else {
		write!(out, "{}", cube)?;
	}

	Ok(())
}
