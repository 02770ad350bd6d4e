//! Command line front end for the chess rules engine.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::{Path, PathBuf};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand, crate_version};
use simplelog::{WriteLogger, LevelFilter, Config as LogConfig};
use chess_rules::chess::{variations, Coord, Game, GameResult, Players, Position};
use chess_rules::chess::game::STARTING_FEN;
use chess_rules::config::{self, Config};

fn main() -> Result<(), Error> {
    let matches =
        App::new("chess-rules")
            .version(crate_version!())
            .about("Plays, checks and counts chess moves.")
            .setting(AppSettings::SubcommandRequired)
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("FILE")
                .takes_value(true)
                .help("Reads settings from FILE instead of ~/.chess-rules/config.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .help("Sets the log file if logging is turned on [default: chess-rules.log]"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on [default: info]"))
            .subcommand(SubCommand::with_name("play")
                .about("Plays a sequence of moves in coordinate notation (eg e2e4) and shows \
                        the resulting\nposition. Move numbers such as `1.` are ignored.")
                .arg(fen_arg())
                .arg(Arg::with_name("white")
                    .long("white")
                    .value_name("NAME")
                    .takes_value(true)
                    .help("Name of the player with the white pieces"))
                .arg(Arg::with_name("black")
                    .long("black")
                    .value_name("NAME")
                    .takes_value(true)
                    .help("Name of the player with the black pieces"))
                .arg(Arg::with_name("undo")
                    .long("undo")
                    .short("u")
                    .value_name("N")
                    .takes_value(true)
                    .help("Takes back the last N moves after playing them"))
                .arg(Arg::with_name("moves")
                    .value_name("MOVES")
                    .multiple(true)
                    .help("Moves to play")))
            .subcommand(SubCommand::with_name("moves")
                .about("Lists the legal moves in a position")
                .arg(fen_arg())
                .arg(Arg::with_name("square")
                    .value_name("SQUARE")
                    .help("Only lists moves of the piece on SQUARE (eg e2)")))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(STARTING_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let config = Config::load_or_default(matches.value_of_os("config").map(Path::new))?;
    init_logging(&matches, &config)?;

    match matches.subcommand() {
        ("play", Some(matches)) => play(matches, &config),
        ("moves", Some(matches)) => moves(matches, &config),
        ("counts", Some(matches)) => counts(matches),
        _ => unreachable!(),
    }
}

fn fen_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("fen")
        .long("fen")
        .short("f")
        .value_name("FEN_STRING")
        .takes_value(true)
        .help("Starting position in Forsyth-Edwards Notation (FEN)")
}

fn init_logging(matches: &ArgMatches, config: &Config) -> Result<(), Error> {
    let log_file = matches.value_of_os("log-file")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.log_file.clone());
    let log_level = match matches.value_of("log-level") {
        Some(level) => config::parse_level(level)?,
        None => config.level_filter()?,
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            LogConfig::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, LogConfig::default(), std::io::sink())
    };

    Ok(())
}

fn start(matches: &ArgMatches, players: Players) -> Result<Game, Error> {
    let fen = matches.value_of("fen");
    Game::new(players, fen).map_err(|err| match fen {
        Some(fen) => Error(format!("{}: {}", fen, err)),
        None => Error(err.to_string()),
    })
}

fn play(matches: &ArgMatches, config: &Config) -> Result<(), Error> {
    let mut players = config.players();
    if let Some(white) = matches.value_of("white") {
        players.white = white.to_owned();
    }
    if let Some(black) = matches.value_of("black") {
        players.black = black.to_owned();
    }

    let mut game = start(matches, players)?;
    if let Some(moves) = matches.values_of("moves") {
        let moves: Vec<&str> = moves.collect();
        game.push_moves_from_str(&moves.join(" "))?;
    }
    if let Some(undo) = matches.value_of("undo") {
        let undo: usize = undo.parse().map_err(|_| Error("undo count must be numeric".to_owned()))?;
        for _ in 0..undo {
            game.pop_move()?;
        }
    }

    print!("{}", game.position().diagram());
    println!();
    println!("{}", game.fen());
    println!("moves: {}", game);
    println!("{} legal moves", game.legal_moves().len());
    println!("{}", status(&game));

    Ok(())
}

fn status(game: &Game) -> String {
    let players = game.players();
    match game.result() {
        Some(result @ GameResult::Win(..)) => {
            let winner = !game.turn();
            format!("{}: {} wins", result, players.name(winner))
        }
        Some(result @ GameResult::Draw(_)) => format!("{}: draw", result),
        None if game.in_check() => {
            format!("{} ({}) to move, in check", players.name(game.turn()), game.turn().name())
        }
        None => format!("{} ({}) to move", players.name(game.turn()), game.turn().name()),
    }
}

fn moves(matches: &ArgMatches, config: &Config) -> Result<(), Error> {
    let game = start(matches, config.players())?;
    let moves = match matches.value_of("square") {
        Some(square) => {
            let coord: Coord = square.parse().map_err(|err| Error(format!("{}: {}", square, err)))?;
            game.legal_moves_at(coord)
        }
        None => game.legal_moves(),
    };

    let moves: Vec<String> = moves.iter().map(|mv| mv.to_string()).collect();
    println!("{}", moves.join(" "));

    Ok(())
}

fn counts(matches: &ArgMatches) -> Result<(), Error> {
    let depth = matches
        .value_of("depth")
        .expect("INFALLIBLE")
        .parse()
        .map_err(|_| {Error("depth must be numeric".to_owned())})?;

    println!();
    for fen in matches.values_of("fen").expect("INFALLIBLE") {
        let pos: Position = fen.parse().map_err(|err| {Error(format!("{}: {}", fen, err))})?;
        println!("{}", fen);
        let count = variations::print(&pos, depth);
        println!("Depth {} total:\t{:12}\n", depth, count);
    }

    Ok(())
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<chess_rules::chess::Error> for Error {
    fn from(err: chess_rules::chess::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error(err.to_string())
    }
}
