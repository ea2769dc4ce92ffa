//! gdesc CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use gdesc_engine::{Engine, EngineConfig};
use gdesc_runtime::{RustylineConsole, init_tracing, load_from_file};
use gdesc_world::GameInfo;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    world: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    seed: Option<u64>,
    max_turns: Option<u64>,
    log: Option<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn option_value<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{name} requires a value"))
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--seed" => {
                i += 1;
                let value = option_value(&args, i, "--seed")?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --seed value: {value}"))?,
                );
            }
            "--max-turns" => {
                i += 1;
                let value = option_value(&args, i, "--max-turns")?;
                config.max_turns = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --max-turns value: {value}"))?,
                );
            }
            "--log" => {
                i += 1;
                config.log = Some(option_value(&args, i, "--log")?.to_string());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.world.is_some() {
                    return Err(format!("unexpected argument: {path}").into());
                }
                config.world = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("gdesc {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(config.log.as_deref());

    let Some(path) = config.world else {
        return Err("no world file given (see --help)".into());
    };
    let model = load_from_file(&path)?;
    print_banner(&model.info);

    let mut engine_config = EngineConfig::default();
    if let Some(seed) = config.seed {
        engine_config = engine_config.with_seed(seed);
    }
    if let Some(turns) = config.max_turns {
        engine_config = engine_config.with_pass_limit(turns);
    }

    let console = RustylineConsole::new()?;

    let mut engine = match Engine::new(model, console, engine_config) {
        Ok(engine) => engine,
        Err(err) => {
            for load_error in err.load_errors() {
                eprintln!("\x1b[31m{load_error}\x1b[0m");
                if let Some(context) = &load_error.context {
                    eprintln!("{context}");
                }
            }
            return Err(err.into());
        }
    };

    let words: Vec<String> = engine
        .world()
        .vocabulary_words()
        .into_iter()
        .map(String::from)
        .collect();
    engine.console_mut().set_words(words);

    engine.run_inits()?;
    if !engine.is_halted() {
        engine.run_forever()?;
    }
    Ok(())
}

fn print_banner(info: &GameInfo) {
    if !info.name.is_empty() {
        println!("Welcome to {}", info.name);
    }
    if !info.version.is_empty() {
        println!("   Version {}", info.version);
    }
    if !info.author.is_empty() {
        println!("Created by {}", info.author);
    }
    if !info.date.is_empty() {
        println!("        on {}", info.date);
    }
    println!();
}

fn print_help() {
    println!(
        "\x1b[1mgdesc\x1b[0m - Text adventure runtime

\x1b[1mUSAGE:\x1b[0m
    gdesc [OPTIONS] <WORLD>

\x1b[1mARGUMENTS:\x1b[0m
    <WORLD>    Compiled world model (MessagePack)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    --seed N           Seed for the random number generator
    --max-turns N      Stop after N passes of the main loop
    --log FILTER       Enable logging with a tracing filter (overrides RUST_LOG)

\x1b[1mEXAMPLES:\x1b[0m
    gdesc cellar.gdw                       Play cellar.gdw
    gdesc --seed 42 cellar.gdw             Play with a fixed random sequence
    gdesc --log gdesc_engine=debug w.gdw   Log dispatch decisions to stderr

\x1b[1mIN GAME:\x1b[0m
    Ctrl+D               Quit
    Ctrl+C               Quit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("gdesc")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_options_and_world() {
        let config = parse_args(args(&["--seed", "7", "--max-turns", "3", "w.gdw"])).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_turns, Some(3));
        assert_eq!(config.world, Some(PathBuf::from("w.gdw")));
    }

    #[test]
    fn missing_value_is_rejected() {
        let err = parse_args(args(&["--seed"])).err().unwrap();
        assert_eq!(err.to_string(), "--seed requires a value");
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(parse_args(args(&["--fast"])).is_err());
    }
}
