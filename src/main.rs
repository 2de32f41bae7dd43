//! Bulls and Cows Bot CLI
//!
//! Interactive command-line interface for the entropy-based solver.

use std::io::{self, BufRead, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bulls_cows_bot::{
    parse_codes, score, Code, Feedback, Game, GameParams, GuessAnalysis, GuessPool, ScoreError,
    Solver,
};
use tracing_subscriber::{fmt, EnvFilter};

const BANNER_TEXT: &str = include_str!("text/banner.txt");
const USAGE_TEXT: &str = include_str!("text/usage.txt");
const LOG_ENV: &str = "BULLS_COWS_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stdout().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stdout().flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn print_banner() {
    for line in BANNER_TEXT.lines().take(6) {
        println!("{}", line);
    }
}

fn print_help() {
    println!("{}", BANNER_TEXT);
}

fn print_analysis(analysis: &GuessAnalysis, remaining: usize) {
    println!();
    println!("Best guess: {}", analysis.code);
    println!("  Entropy: {:.3} bits", analysis.entropy);
    println!("  Expected remaining: {:.1} codes", analysis.expected_remaining);
    println!("  Worst case remaining: {}", analysis.largest_partition);
    if analysis.is_possible_answer {
        println!("  ✓ This code is a possible answer");
    } else {
        println!("  ✗ This code is NOT a possible answer");
    }
    println!();
    println!("Remaining possibilities: {}", remaining);
    println!();
}

fn print_guesses(guesses: &[(Code, Feedback)], code_length: usize) {
    for (i, (guess, feedback)) in guesses.iter().enumerate() {
        println!("Guess {}: {} → {}", i + 1, guess, feedback);
    }
    println!();
    match guesses.last() {
        Some((_, feedback)) if feedback.is_win(code_length) => {
            println!("✓ Solved in {} guesses!", guesses.len());
        }
        _ => println!("✗ Failed to solve."),
    }
}

fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> T) -> T {
    let spinner = Spinner::new(message);
    let result = work();
    spinner.stop();
    result
}

fn run_interactive(params: GameParams) -> Result<(), ScoreError> {
    print_banner();

    let mut solver = Solver::new(params)?;
    println!(
        "{} digits, length {}: {} possible codes.",
        params.alphabet_size(),
        params.code_length(),
        solver.remaining_count()
    );
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let outcome = match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => {
                print_help();
                Ok(())
            }
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "suggest" | "s" | "best" => {
                with_spinner("Scoring...", || solver.find_best_guess()).map(|best| match best {
                    Some(analysis) => print_analysis(&analysis, solver.remaining_count()),
                    None => println!("No possible codes remaining. Use 'reset' to start over."),
                })
            }
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                with_spinner("Scoring...", || solver.find_best_guesses(n)).map(|top| {
                    if top.is_empty() {
                        println!("No possible codes remaining.");
                        return;
                    }
                    println!();
                    println!("Top {} guesses:", top.len());
                    println!(
                        "{:>4} {:>8} {:>8} {:>12} {:>6} Possible?",
                        "#", "Code", "Entropy", "Exp. Remain", "Worst"
                    );
                    println!("{}", "-".repeat(56));
                    for (i, analysis) in top.iter().enumerate() {
                        println!(
                            "{:>4} {:>8} {:>8.3} {:>12.1} {:>6} {}",
                            i + 1,
                            analysis.code,
                            analysis.entropy,
                            analysis.expected_remaining,
                            analysis.largest_partition,
                            if analysis.is_possible_answer { "✓" } else { "" }
                        );
                    }
                    println!();
                })
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <code> <feedback>");
                    println!("Example: feedback 0123 1A2B");
                    continue;
                }
                record_feedback(&mut solver, parts[1], parts[2])
            }
            "score" => match parts.get(1) {
                Some(guess) => Code::parse(guess, &params)
                    .and_then(|code| solver.analyze(&code))
                    .map(|analysis| {
                        println!();
                        println!("Score: {:.4}", analysis.score);
                        print_analysis(&analysis, solver.remaining_count());
                    }),
                None => {
                    println!("Usage: score <code>");
                    Ok(())
                }
            },
            "remaining" | "r" | "left" => {
                let remaining = solver.possible_answers();
                println!();
                println!("Remaining possibilities: {}", remaining.len());
                if remaining.len() <= 50 {
                    for (i, code) in remaining.iter().enumerate() {
                        if i > 0 && i % 10 == 0 {
                            println!();
                        }
                        print!("{:>8}", code.to_string());
                    }
                    println!();
                }
                println!();
                Ok(())
            }
            "pool" => {
                let pool = match solver.guess_pool() {
                    GuessPool::AllCodes => GuessPool::Candidates,
                    GuessPool::Candidates => GuessPool::AllCodes,
                };
                solver.set_guess_pool(pool);
                match pool {
                    GuessPool::AllCodes => println!("Guessing from all codes."),
                    GuessPool::Candidates => println!("Guessing from remaining candidates only."),
                }
                Ok(())
            }
            "solve" => match parts.get(1) {
                Some(secret) => Code::parse(secret, &params).and_then(|secret| {
                    println!();
                    println!("Solving for: {}", secret);
                    println!();
                    solver.reset();
                    let guesses = with_spinner("Solving...", || solver.solve_for_secret(&secret));
                    solver.reset();
                    guesses.map(|guesses| print_guesses(&guesses, params.code_length()))
                }),
                None => {
                    println!("Usage: solve <secret>");
                    Ok(())
                }
            },
            "play" => {
                let mut game = Game::random(params);
                solver.reset();
                let guesses = with_spinner("Solving...", || solver.play(&mut game));
                solver.reset();
                guesses.map(|guesses| {
                    println!();
                    println!("Secret was: {}", game.peek_secret());
                    print_guesses(&guesses, params.code_length());
                })
            }
            "reset" => {
                solver.reset();
                println!(
                    "Reset to initial state. {} codes available.",
                    solver.remaining_count()
                );
                Ok(())
            }
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("Error: {}", err);
        }
    }

    Ok(())
}

fn record_feedback(solver: &mut Solver, guess: &str, feedback: &str) -> Result<(), ScoreError> {
    let params = *solver.params();
    let guess = Code::parse(guess, &params)?;
    let feedback: Feedback = feedback.parse()?;

    let prev_count = solver.remaining_count();
    solver.apply_feedback(&guess, feedback)?;
    let new_count = solver.remaining_count();

    println!();
    println!("Guess: {}", guess);
    println!("Feedback: {}", feedback);
    println!(
        "Eliminated {} codes ({} → {})",
        prev_count - new_count,
        prev_count,
        new_count
    );

    if feedback.is_win(params.code_length()) {
        println!();
        println!("🎉 Congratulations! You solved it!");
    } else if new_count == 0 {
        println!();
        println!("⚠️  No codes match this feedback!");
        println!("This might indicate an error. Use 'reset' to start over.");
    } else if new_count <= 10 {
        println!();
        println!(
            "Remaining codes: {}",
            solver
                .possible_answers()
                .iter()
                .map(Code::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
    println!();
    Ok(())
}

/// Pull `--digits` and `--length` out of the argument list.
fn parse_params(args: &mut Vec<String>) -> Result<GameParams, String> {
    let mut alphabet_size = GameParams::CLASSIC.alphabet_size();
    let mut code_length = GameParams::CLASSIC.code_length();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--digits" | "--length") => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} needs a value", flag))?
                    .clone();
                if flag == "--digits" {
                    alphabet_size = value
                        .parse()
                        .map_err(|_| format!("invalid alphabet size: {}", value))?;
                } else {
                    code_length = value
                        .parse()
                        .map_err(|_| format!("invalid code length: {}", value))?;
                }
                args.drain(i..i + 2);
            }
            _ => i += 1,
        }
    }

    GameParams::new(alphabet_size, code_length).map_err(|err| err.to_string())
}

fn run_command(params: GameParams, args: &[String]) -> Result<(), ScoreError> {
    match args[0].as_str() {
        "solve" => {
            let Some(secret) = args.get(1) else {
                eprintln!("Usage: bulls-cows-bot solve <secret>");
                process::exit(1);
            };
            let secret = Code::parse(secret, &params)?;
            let mut solver = Solver::new(params)?;

            println!("Solving for: {}", secret);
            println!();
            let guesses = with_spinner("Solving...", || solver.solve_for_secret(&secret))?;
            print_guesses(&guesses, params.code_length());
        }
        "play" => {
            let mut game = Game::random(params);
            let mut solver = Solver::new(params)?;
            let guesses = with_spinner("Solving...", || solver.play(&mut game))?;
            println!("Secret was: {}", game.peek_secret());
            println!();
            print_guesses(&guesses, params.code_length());
        }
        "suggest" => {
            let solver = Solver::new(params)?;
            match with_spinner("Scoring...", || solver.find_best_guess())? {
                Some(analysis) => {
                    println!("Best opening guess: {}", analysis.code);
                    println!("Entropy: {:.3} bits", analysis.entropy);
                }
                None => eprintln!("No codes available."),
            }
        }
        "score" => {
            if args.len() < 3 {
                eprintln!("Usage: bulls-cows-bot score <guess> <candidate>...");
                process::exit(1);
            }
            let guess = Code::parse(&args[1], &params)?;
            let memory = parse_codes(args[2..].iter().map(String::as_str), &params)?;
            println!("{:.6}", score(&guess, &memory, params.alphabet_size())?);
        }
        "benchmark" | "bench" => {
            let samples: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
            let solver = Solver::new(params)?;
            let secrets = solver.action_space().evenly_spaced(samples)?;

            let start = Instant::now();
            let distribution = with_spinner("Running benchmark...", || {
                solver.benchmark_guess_distribution(&secrets)
            })?;
            let elapsed = start.elapsed();

            let total: usize = distribution.iter().map(|(_, c)| c).sum();
            let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
            println!("Guess distribution:");
            for (guesses, count) in &distribution {
                let pct = *count as f64 / total as f64 * 100.0;
                let bar = "█".repeat((*count * 40 / total).max(1));
                println!("  {} guesses: {:>5} ({:>5.1}%) {}", guesses, count, pct, bar);
            }
            println!();
            println!("Average guesses: {:.3}", total_guesses as f64 / total as f64);
            println!("Secrets: {}", total);
            println!("Time: {:.2?}", elapsed);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Use --help for usage information.");
            process::exit(1);
        }
    }
    Ok(())
}

fn main() {
    init_logging();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE_TEXT);
        return;
    }

    let params = match parse_params(&mut args) {
        Ok(params) => params,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let result = if args.is_empty() {
        run_interactive(params)
    } else {
        run_command(params, &args)
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
