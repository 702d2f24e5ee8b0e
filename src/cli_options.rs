/*
cli_options.rs

Copyright 2025 The Wordpath Authors

This file is part of Wordpath.

Wordpath is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Wordpath is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Wordpath. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! Each subcommand runs one request against the saved games and prints the answer in JSON
//! format. Games are saved in the `--store` directory between two commands.
//!
//! # Examples
//!
//! Start a game and ask for the neighbors and the distance of a word:
//!
//! ```text
//! $ wordpath --words words.json start --difficulty 3
//! {
//!   "gameId": "5b0c2c1e-7d2a-4f43-9a36-0d9d3b0f4a51",
//!   "startWord": "bright",
//!   "targetWord": "sleep",
//!   "optimalDistance": 4,
//!   "puzzlePath": ["bright", "light", "dark", "night", "sleep"]
//! }
//! $ wordpath --words words.json next 5b0c2c1e-7d2a-4f43-9a36-0d9d3b0f4a51 light
//! $ wordpath --words words.json dist 5b0c2c1e-7d2a-4f43-9a36-0d9d3b0f4a51 dark
//! ```
//!
//! Generate ten puzzles at difficulty 5 and print some statistics:
//!
//! ```text
//! $ wordpath --words words.json generate -f 5 -c 10 --summary
//! ```

use clap::{Parser, Subcommand};
use log::{LevelFilter, debug};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use wordpath::config::{COPYRIGHT_NOTICE, SESSION_TTL_SECS, Settings};
use wordpath::errors::{ErrorKind, GameError, Result};
use wordpath::game::{GameSession, Neighbors};
use wordpath::generator::puzzles::{Difficulty, PuzzleConfig, PuzzleGenerator};
use wordpath::generator::random_walk::Walk;
use wordpath::generator::word_graph::{RelationPolicy, WordGraph};
use wordpath::leaderboard::{Leaderboard, LeaderboardEntry};
use wordpath::player_moves::PlayerMoves;
use wordpath::saver::leaderboard::SaverLeaderboard;
use wordpath::saver::session::FileSessionStore;
use wordpath::service::WordPathService;
use wordpath::shortest_path::Distance;
use wordpath::similarity::EmbeddingTable;

/// Find your way from one word to another through synonyms, antonyms, and related words.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Relation data file
    #[arg(short, long, env = "WORDPATH_WORDS", global = true)]
    words: Option<PathBuf>,

    /// Directory for the saved games and the leaderboard
    #[arg(long, env = "WORDPATH_STORE", default_value = "./sessions", global = true)]
    store: PathBuf,

    /// How the relations are inserted in the graph
    #[arg(value_enum, long, default_value_t = RelationPolicy::Directed, global = true)]
    policy: RelationPolicy,

    /// Lifetime of the saved games, in seconds
    #[arg(long, default_value_t = SESSION_TTL_SECS, global = true)]
    ttl: u64,

    /// Seed for the random source
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game
    Start {
        /// Difficulty level (positive integer)
        #[arg(short = 'f', long)]
        difficulty: Option<String>,
    },

    /// List the neighbor words of a word
    Next { game_id: String, word: String },

    /// Give the distance between a word and the target word
    Dist { game_id: String, word: String },

    /// Give the similarity between a word and the target word
    Similarity {
        game_id: String,
        word: String,

        /// Word vector file
        #[arg(long, env = "WORDPATH_VECTORS")]
        vectors: PathBuf,
    },

    /// End a game and reveal the solution
    Quit { game_id: String },

    /// Play a game in the terminal
    Play {
        /// Difficulty level (positive integer)
        #[arg(short = 'f', long)]
        difficulty: Option<String>,

        /// Name to record in the leaderboard when the target word is reached
        #[arg(short, long)]
        player: Option<String>,
    },

    /// Generate puzzles and print them (for developers)
    Generate {
        /// Difficulty level (positive integer)
        #[arg(short = 'f', long)]
        difficulty: Option<String>,

        /// Number of puzzles to generate
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Print some statistics after generating the puzzles
        #[arg(short, long, default_value_t = false)]
        summary: bool,
    },

    /// Manage the leaderboard
    Score {
        #[command(subcommand)]
        action: ScoreCommand,
    },
}

#[derive(Subcommand)]
enum ScoreCommand {
    /// Record a finished game
    Add {
        player_name: String,
        time_seconds: f64,
        moves: u32,
        optimal_distance: u32,
    },

    /// List the best scores
    List,
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut builder: env_logger::Builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    match run(args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            match e.kind() {
                ErrorKind::Fatal => 2,
                _ => 1,
            }
        }
    }
}

fn settings(args: &Args) -> Result<Settings> {
    let words: PathBuf = args.words.clone().ok_or_else(|| {
        GameError::InvalidConfig("the relation data file is required (--words)".to_string())
    })?;
    let mut settings: Settings = Settings::new(words, args.store.clone());
    settings.ttl = Duration::from_secs(args.ttl);
    settings.policy = args.policy;
    settings.seed = args.seed;
    Ok(settings)
}

fn load_graph(settings: &Settings) -> Result<Arc<WordGraph>> {
    let graph: WordGraph = WordGraph::from_file(&settings.words, settings.policy)?;
    Ok(Arc::new(graph))
}

fn rng(settings: &Settings) -> StdRng {
    match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    if let Command::Score { action } = &args.command {
        return score(&args.store, action);
    }

    let settings: Settings = settings(&args)?;
    let graph: Arc<WordGraph> = load_graph(&settings)?;

    match args.command {
        Command::Generate {
            difficulty,
            count,
            summary,
        } => {
            let difficulty: Difficulty = Difficulty::from_option(difficulty.as_deref())?;
            generate(&graph, difficulty, count, summary, &mut rng(&settings))
        }
        Command::Play { difficulty, player } => {
            let difficulty: Difficulty = Difficulty::from_option(difficulty.as_deref())?;
            let session: GameSession =
                GameSession::new(graph.clone(), difficulty, &mut rng(&settings))?;
            play(&graph, session, player.as_deref(), &settings.data_dir)
        }
        command => {
            let store: FileSessionStore = FileSessionStore::new(settings.data_dir.clone());
            store.purge_expired()?;
            let mut service: WordPathService<FileSessionStore, StdRng> =
                WordPathService::new(graph, store, settings.ttl, rng(&settings));
            match command {
                Command::Start { difficulty } => print_json(&service.start(difficulty.as_deref())?),
                Command::Next { game_id, word } => print_json(&service.next(&game_id, &word)?),
                Command::Dist { game_id, word } => print_json(&service.dist(&game_id, &word)?),
                Command::Similarity {
                    game_id,
                    word,
                    vectors,
                } => {
                    let table: EmbeddingTable = EmbeddingTable::from_file(&vectors)?;
                    print_json(&service.similarity(&game_id, &word, &table)?)
                }
                Command::Quit { game_id } => print_json(&service.quit(&game_id)?),
                _ => Ok(()),
            }
        }
    }
}

/// Record a score or list the leaderboard.
fn score(data_dir: &Path, action: &ScoreCommand) -> Result<()> {
    let saver: SaverLeaderboard = SaverLeaderboard::new(data_dir.to_path_buf());
    let mut leaderboard: Leaderboard = saver.get_leaderboard()?;

    match action {
        ScoreCommand::Add {
            player_name,
            time_seconds,
            moves,
            optimal_distance,
        } => {
            let entry: LeaderboardEntry =
                LeaderboardEntry::new(player_name, *time_seconds, *moves, *optimal_distance)?;
            let score: f64 = entry.score;
            let position: Option<usize> = leaderboard.add(entry);
            saver.save_leaderboard(&leaderboard)?;
            print_json(&serde_json::json!({ "score": score, "position": position }))
        }
        ScoreCommand::List => print_json(&leaderboard.entries()),
    }
}

/// Generate puzzles and print their paths.
fn generate(
    graph: &Arc<WordGraph>,
    difficulty: Difficulty,
    count: usize,
    summary: bool,
    rng: &mut StdRng,
) -> Result<()> {
    let config: PuzzleConfig = difficulty.config();
    let mut generator: PuzzleGenerator = PuzzleGenerator::new(graph);
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    let mut short: usize = 0;
    let mut unreachable: usize = 0;

    for i in 0..count {
        debug!("Iteration {i}");

        let now: Instant = Instant::now();
        let walk: Walk = generator.generate(&config, rng)?;
        let duration: f32 = now.elapsed().as_secs_f32();
        total += duration;
        if duration > max {
            max = duration;
        }
        attempts += generator.attempts;
        if walk.path.len() < config.min_path_length {
            short += 1;
        }

        let words: Vec<String> = graph.words(walk.path.get());
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let session: GameSession = GameSession::from_path(graph.clone(), &refs)?;
        if !session.optimal_distance().is_reachable() {
            unreachable += 1;
        }
        println!(
            "{} -> {} (optimal distance {}): {}",
            session.start_word(),
            session.target_word(),
            session.optimal_distance(),
            words.join(" -> ")
        );
    }

    if summary && count > 0 {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
    short puzzles  = {}
 unreachable start = {}",
            total,
            total / count as f32,
            max,
            attempts / count,
            short,
            unreachable
        );
    }
    Ok(())
}

/// Play a game in the terminal.
fn play(
    graph: &WordGraph,
    mut session: GameSession,
    player: Option<&str>,
    data_dir: &Path,
) -> Result<()> {
    let mut moves: PlayerMoves = PlayerMoves::new(session.puzzle().start);
    let now: Instant = Instant::now();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!(
        "Start word: {}, target word: {}",
        session.start_word(),
        session.target_word()
    );
    println!("Possible path: {}", session.puzzle_path_words().join(" -> "));

    while !session.is_target(graph.word(moves.current())) {
        let current: String = graph.word(moves.current()).to_string();
        let neighbors: Neighbors = session.neighbors(&current)?;
        let distance: Distance = session.query_distance(&current)?;
        println!("Current word: {current} (distance {distance})");
        println!("  synonyms: {}", neighbors.synonyms.join(", "));
        println!("  antonyms: {}", neighbors.antonyms.join(", "));
        println!("  related:  {}", neighbors.related.join(", "));
        print!("Choose your next word (/back, /quit): ");
        io::stdout().flush()?;

        let line: String = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        let choice: &str = line.trim();
        match choice {
            "/quit" => {
                println!("Game over. Thanks for playing!");
                if let Some(solution) = session.solution_path_words() {
                    println!("Solution: {}", solution.join(" <- "));
                }
                return Ok(());
            }
            "/back" => {
                if !moves.back() {
                    println!("You are at the start word.");
                }
            }
            word => match moves.move_to(graph, word) {
                Ok(true) => (),
                Ok(false) => println!("'{word}' is not a neighbor of '{current}', try again."),
                Err(e) => println!("{e}, try again."),
            },
        }
    }

    let time_seconds: f64 = now.elapsed().as_secs_f64();
    println!(
        "Congratulations! You reached the target word '{}' in {} actions.",
        session.target_word(),
        moves.actions()
    );

    if let Some(name) = player {
        let Some(entry) = LeaderboardEntry::for_game(
            name,
            time_seconds,
            moves.actions(),
            session.optimal_distance().steps(),
        )?
        else {
            return Ok(());
        };
        let saver: SaverLeaderboard = SaverLeaderboard::new(data_dir.to_path_buf());
        let mut leaderboard: Leaderboard = saver.get_leaderboard()?;
        let score: f64 = entry.score;
        match leaderboard.add(entry) {
            Some(position) => println!("Score {score:.1}, position {position} in the leaderboard."),
            None => println!("Score {score:.1}."),
        }
        saver.save_leaderboard(&leaderboard)?;
    }
    Ok(())
}
