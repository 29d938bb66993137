//! # 2048 Plus CLI
//!
//! Command-line interface for playing 2048 Plus interactively or running
//! headless simulations with configurable policies.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use plus2048_core::{Direction, Session, DEFAULT_BOARD_SIZE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Read, Write};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "plus2048")]
#[command(author, version, about = "Play 2048 Plus in the terminal or run simulations")]
struct Args {
    /// Run in interactive mode (default if no other mode specified)
    #[arg(short, long)]
    interactive: bool,

    /// Number of episodes to run in headless mode
    #[arg(short, long)]
    episodes: Option<u32>,

    /// Board side length
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Random seed for deterministic runs
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Maximum steps per episode (0 = unlimited)
    #[arg(short, long, default_value = "10000")]
    max_steps: u32,

    /// Policy for headless mode
    #[arg(short, long, value_enum, default_value = "random")]
    policy: Policy,

    /// Tracing filter for headless progress, e.g. "info", "debug"
    #[arg(long, default_value = "info")]
    log: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Random valid moves
    Random,
    /// Cycle through directions: Left, Down, Right, Up
    Cycle,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(episodes) = args.episodes {
        run_headless(&args, episodes)?;
    } else {
        run_interactive(&args)?;
    }
    Ok(())
}

/// Run interactive mode where the user plays with the keyboard.
fn run_interactive(args: &Args) -> Result<()> {
    let mut session = Session::new(args.size, args.seed)?;

    // Set terminal to raw mode for single-key input
    enable_raw_mode();

    let mut stdin = io::stdin();
    let mut buffer = [0u8; 3];

    redraw(&session)?;

    loop {
        let bytes_read = stdin.read(&mut buffer).unwrap_or(0);
        if bytes_read == 0 {
            continue;
        }

        match parse_input(&buffer[..bytes_read]) {
            InputAction::Move(direction) => {
                if let Some(step) = session.apply_move(direction) {
                    redraw(&session)?;
                    if step.score_gained > 0 {
                        println!("  +{} points!", step.score_gained);
                    }
                    if step.terminal {
                        println!("\n  *** GAME OVER ***");
                        println!("  Final Score: {}", session.score());
                        println!("  Max Tile: {}", session.board().max_value());
                        println!("\n  Press U to undo, R to restart or Q to quit");
                    }
                    // A terminal redraw is instant, so close the gate now
                    session.finish_animation();
                }
            }
            InputAction::Undo => {
                if session.undo() {
                    redraw(&session)?;
                } else {
                    println!("  Nothing to undo");
                }
            }
            InputAction::Restart => {
                session.reset(args.seed);
                redraw(&session)?;
            }
            InputAction::Quit => {
                disable_raw_mode();
                println!("\nGoodbye!");
                break;
            }
            InputAction::None => {}
        }
    }
    Ok(())
}

/// Clear the screen and draw the header plus the session.
fn redraw(session: &Session) -> Result<()> {
    println!("\x1b[2J\x1b[H");
    println!("=== 2048 Plus ===");
    println!("Controls: WASD or Arrow Keys | U undo | R restart | Q quit\n");
    print!("{}", session);
    io::stdout().flush()?;
    Ok(())
}

/// Run headless simulation mode.
fn run_headless(args: &Args, episodes: u32) -> Result<()> {
    // An empty run has no statistics to report
    if episodes == 0 {
        println!("=== Simulation Results ===");
        println!("episodes=0");
        return Ok(());
    }

    let mut total_score: u64 = 0;
    let mut max_tile_overall: u32 = 0;
    let mut scores: Vec<u32> = Vec::with_capacity(episodes as usize);
    let mut max_tiles: Vec<u32> = Vec::with_capacity(episodes as usize);

    // Use a separate RNG for direction selection
    let mut policy_rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1000));

    for episode in 0..episodes {
        let episode_seed = args.seed.wrapping_add(episode as u64);
        let mut session = Session::new(args.size, episode_seed)?;
        let mut steps = 0;
        let mut cycle = 0;

        while !session.is_terminal() && (args.max_steps == 0 || steps < args.max_steps) {
            let direction = match args.policy {
                Policy::Random => select_random_direction(&session, &mut policy_rng),
                Policy::Cycle => select_cycle_direction(&session, &mut cycle),
            };

            match direction {
                Some(direction) => {
                    if session.apply_move(direction).is_none() {
                        break;
                    }
                    session.finish_animation();
                    steps += 1;
                    debug!(episode = episode + 1, step = steps, direction = ?direction);
                }
                None => break, // No valid directions
            }
        }

        let score = session.score();
        let max_tile = session.board().max_value();

        scores.push(score);
        max_tiles.push(max_tile);
        total_score += score as u64;
        max_tile_overall = max_tile_overall.max(max_tile);

        info!(
            episode = episode + 1,
            score = score,
            max_tile = max_tile,
            steps = steps,
            "episode finished"
        );
    }

    // Compute statistics
    let avg_score = total_score as f64 / episodes as f64;
    scores.sort();
    let median_score = if episodes % 2 == 0 {
        (scores[(episodes / 2 - 1) as usize] + scores[(episodes / 2) as usize]) as f64 / 2.0
    } else {
        scores[(episodes / 2) as usize] as f64
    };

    // Count tile distribution
    let mut tile_counts = std::collections::HashMap::new();
    for tile in &max_tiles {
        *tile_counts.entry(*tile).or_insert(0u32) += 1;
    }

    // Output results in parseable format
    println!("=== Simulation Results ===");
    println!("episodes={}", episodes);
    println!("policy={:?}", args.policy);
    println!("size={}", args.size);
    println!("seed={}", args.seed);
    println!("max_steps={}", args.max_steps);
    println!("avg_score={:.2}", avg_score);
    println!("median_score={:.2}", median_score);
    println!("min_score={}", scores.first().unwrap_or(&0));
    println!("max_score={}", scores.last().unwrap_or(&0));
    println!("max_tile_overall={}", max_tile_overall);

    let mut tile_list: Vec<_> = tile_counts.iter().collect();
    tile_list.sort_by_key(|&(tile, _)| *tile);
    print!("tile_distribution=");
    for (i, (tile, count)) in tile_list.iter().enumerate() {
        if i > 0 {
            print!(",");
        }
        print!("{}:{}", tile, count);
    }
    println!();
    Ok(())
}

/// Select a random valid direction.
fn select_random_direction(session: &Session, rng: &mut SmallRng) -> Option<Direction> {
    let legal = session.legal_moves();
    let valid: Vec<Direction> = Direction::all()
        .into_iter()
        .enumerate()
        .filter(|(i, _)| legal[*i])
        .map(|(_, d)| d)
        .collect();

    if valid.is_empty() {
        None
    } else {
        Some(valid[rng.gen_range(0..valid.len())])
    }
}

/// Select a direction in a cycle: Left, Down, Right, Up.
fn select_cycle_direction(session: &Session, cycle: &mut usize) -> Option<Direction> {
    let order = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];
    let legal = session.legal_moves();

    // Try directions in cycle order, starting from the current position
    for _ in 0..4 {
        let direction = order[*cycle % 4];
        *cycle += 1;
        if legal[direction as usize] {
            return Some(direction);
        }
    }

    None
}

#[derive(Debug, PartialEq)]
enum InputAction {
    Move(Direction),
    Undo,
    Restart,
    Quit,
    None,
}

fn parse_input(bytes: &[u8]) -> InputAction {
    match bytes {
        // Arrow keys (escape sequences)
        [27, 91, 65] => InputAction::Move(Direction::Up),    // Up arrow
        [27, 91, 66] => InputAction::Move(Direction::Down),  // Down arrow
        [27, 91, 67] => InputAction::Move(Direction::Right), // Right arrow
        [27, 91, 68] => InputAction::Move(Direction::Left),  // Left arrow

        // WASD keys
        [b'w'] | [b'W'] => InputAction::Move(Direction::Up),
        [b's'] | [b'S'] => InputAction::Move(Direction::Down),
        [b'a'] | [b'A'] => InputAction::Move(Direction::Left),
        [b'd'] | [b'D'] => InputAction::Move(Direction::Right),

        // Control keys
        [b'u'] | [b'U'] => InputAction::Undo,
        [b'q'] | [b'Q'] | [3] | [27] => InputAction::Quit, // q, Q, Ctrl+C, Esc
        [b'r'] | [b'R'] => InputAction::Restart,

        _ => InputAction::None,
    }
}

// Platform-specific terminal raw mode handling
#[cfg(unix)]
fn enable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        // ISIG off too, so Ctrl+C arrives as byte 3 and quits through the
        // input loop, which restores the terminal on its way out.
        termios.c_lflag &= !(libc::ICANON | libc::ECHO | libc::ISIG);
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
        libc::tcsetattr(fd, libc::TCSANOW, &termios);
    }
}

#[cfg(unix)]
fn disable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios.c_lflag |= libc::ICANON | libc::ECHO | libc::ISIG;
        libc::tcsetattr(fd, libc::TCSANOW, &termios);
    }
}

#[cfg(not(unix))]
fn enable_raw_mode() {
    // On non-Unix systems, just continue without raw mode
    // Interactive mode will require Enter after each key
}

#[cfg(not(unix))]
fn disable_raw_mode() {}

// =============================================================================
// Tests
// =============================================================================
