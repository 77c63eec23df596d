use std::{
	error::Error,
	io::{self, BufRead, Write},
};

use rubiksbfs::prelude::*;

const HELP: &str = "\
Enter moves separated by spaces (U U' D D' R R' L L' F F' B B')
Commands:
  show            display the current cube
  compare         display the solved cube next to the current one
  pattern <name>  start over from a pattern
  patterns        list the patterns
  depth <n>       set the maximal solution length
  reset           return to the solved cube
  quit            leave";

/// The cube being played with and what was done to it
struct Session {
	/// Where the session started, or the last reset
	start: CubeState,
	cube: CubeState,
	/// Moves applied since `start`
	applied: Vec<Move>,
	solver: BfsSolver,
	colored: bool,
}

impl Session {
	fn new(start: CubeState, max_depth: usize) -> Self {
		Self {
			start,
			cube: start,
			applied: vec![],
			solver: BfsSolver::new(max_depth),
			colored: true,
		}
	}

	fn prompt(&self) -> String {
		if self.cube.is_solved() {
			"[solved] > ".to_string()
		} else if self.applied.is_empty() {
			"[start] > ".to_string()
		} else {
			format!("[{} moves since start] > ", self.applied.len())
		}
	}

	fn restart(&mut self, start: CubeState) {
		self.start = start;
		self.cube = start;
		self.applied.clear();
	}

	/// Run one line of input. Returns `false` if the session should end.
	fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool, Box<dyn Error>> {
		let line = line.trim();
		let mut words = line.split_whitespace();

		match words.next() {
			None => {}
			Some("quit" | "exit" | "q") => return Ok(false),
			Some("help") => writeln!(out, "{}", HELP)?,
			Some("reset") => {
				self.restart(CubeState::solved());
				writeln!(out, "Reset to the solved cube")?;
			}
			Some("show") => write!(out, "{}", self.cube.net(self.colored))?,
			Some("compare") => {
				let solved = CubeState::solved();
				if self.cube == solved {
					writeln!(out, "The cube is solved, nothing to compare")?;
				} else {
					let width = 4 * (2 * CUBE_DIM + 1);
					writeln!(out, "{:width$}   {}", "Solved", "Current", width = width)?;
					write!(out, "{}", solved.side_by_side(&self.cube, self.colored))?;
				}
			}
			Some("patterns") => {
				for p in patterns() {
					writeln!(out, "  {:<14} {}", p.key, p.description)?;
				}
			}
			Some("pattern") => {
				let key = words.next().unwrap_or_default();
				match find_pattern(key) {
					Some(p) => {
						let moves = p.moves()?;
						self.restart(CubeState::solved());
						self.cube = self.start.apply_moves(moves.iter().copied());
						self.applied = moves;
						writeln!(out, "Applied {}: {}", p.name, p.algorithm)?;
						write!(out, "{}", self.cube.net(self.colored))?;
					}
					None => writeln!(out, "Pattern \"{}\" not found", key)?,
				}
			}
			Some("depth") => match words.next().map(str::parse::<usize>) {
				Some(Ok(depth)) => {
					self.solver.max_depth = depth;
					writeln!(out, "Solutions may now have up to {} moves", depth)?;
				}
				_ => writeln!(out, "Usage: depth <n>")?,
			},
			Some(_) => {
				// Nothing is applied if a single move is wrong
				let moves = match parse_moves(line) {
					Ok(moves) => moves,
					Err(e) => {
						writeln!(out, "{}", e)?;
						return Ok(true);
					}
				};

				self.cube = self.cube.apply_moves(moves.iter().copied());
				self.applied.extend(moves);
				writeln!(out, "Total: {}", format_moves(&self.applied))?;
				write!(out, "{}", self.cube.net(self.colored))?;

				match self.solver.solve(&self.cube) {
					Some(solution) => writeln!(
						out,
						"Solution: {} ({} moves)",
						format_moves(&solution),
						solution.len()
					)?,
					None => writeln!(out, "No solution within {} moves", self.solver.max_depth)?,
				}
			}
		}

		Ok(true)
	}
}

/// Handle the interactive mode
///
/// After every line of moves the cube is solved again with the current depth.
pub fn interactive_mode(start: CubeState, max_depth: usize) -> Result<(), Box<dyn Error>> {
	let mut session = Session::new(start, max_depth);

	let stdin = io::stdin();
	let mut stdout = io::stdout();

	writeln!(stdout, "{}", HELP)?;

	loop {
		write!(stdout, "\n{}", session.prompt())?;
		stdout.flush()?;

		let mut line = String::new();
		if stdin.lock().read_line(&mut line)? == 0 {
			break; // EOF
		}
		if !session.handle_line(&line, &mut stdout)? {
			break;
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn session() -> Session {
		Session { colored: false, ..Session::new(CubeState::solved(), 4) }
	}

	fn run(session: &mut Session, line: &str) -> String {
		let mut out = Vec::new();
		assert!(session.handle_line(line, &mut out).unwrap());
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn invalid_line_applies_nothing() {
		let mut s = session();
		run(&mut s, "U");
		let before = s.cube;

		let out = run(&mut s, "R X");
		assert_eq!(out.trim(), MoveError::InvalidMove("X".to_string()).to_string());
		assert_eq!(s.cube, before);
		assert_eq!(s.applied, vec![Move::U]);
	}

	#[test]
	fn moves_are_solved() {
		let mut s = session();
		let out = run(&mut s, "R U R' U'");

		assert_eq!(s.applied.len(), 4);
		assert!(out.contains("Total: R U R' U'"));
		assert!(out.contains("Solution: U R U' R' (4 moves)"));

		run(&mut s, "depth 1");
		let out = run(&mut s, "F");
		assert!(out.contains("No solution within 1 moves"));
	}

	#[test]
	fn compare_shows_both_cubes() {
		let mut s = session();
		assert_eq!(run(&mut s, "compare").trim(), "The cube is solved, nothing to compare");

		run(&mut s, "U");
		let out = run(&mut s, "compare");
		let lines: Vec<&str> = out.lines().collect();

		assert_eq!(lines.len(), 10);
		assert!(lines[0].starts_with("Solved "));
		assert!(lines[0].ends_with("   Current"));
		assert_eq!(&lines[1..], CubeState::solved().side_by_side(&s.cube, false).lines().collect::<Vec<_>>());
		assert_eq!(lines[4], "O O O  G G G  R R R  B B B     G G G  R R R  B B B  O O O  ");
	}

	#[test]
	fn prompt_follows_the_cube() {
		let scrambled = CubeState::solved().apply_moves([Move::R, Move::F]);
		let mut s = Session { colored: false, ..Session::new(scrambled, 4) };
		assert_eq!(s.prompt(), "[start] > ");

		run(&mut s, "F' R'");
		assert_eq!(s.prompt(), "[solved] > ");

		run(&mut s, "pattern t_pattern");
		assert_eq!(s.applied.len(), 4);
		assert_eq!(s.prompt(), "[4 moves since start] > ");

		run(&mut s, "reset");
		assert_eq!(s.cube, CubeState::solved());
		assert!(s.applied.is_empty());
	}

	#[test]
	fn quit_ends_the_session() {
		let mut s = session();
		let mut out = Vec::new();
		assert!(!s.handle_line("quit", &mut out).unwrap());
		assert!(run(&mut s, "   ").is_empty());
	}
}
