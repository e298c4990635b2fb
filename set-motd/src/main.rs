//! The `motd` CLI. Greets someone through the message of the day.
//!
//! ```bash
//! # write "Hello, Ada" over /etc/motd
//! motd -n Ada -g Hello
//!
//! # just print it
//! motd -n Ada -g Hello --preview
//!
//! # ask for the greeting and name on stdin
//! motd --prompt
//! ```

use std::{
    env,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use clap::{CommandFactory, Parser};
use env_logger::{Builder, Env};
use log::{debug, warn};
use motd_writer::{Config, Outcome, DEFAULT_MOTD_PATH};

/// Write a greeting into /etc/motd
#[derive(Parser, Debug)]
#[command(name = "motd", version, about = "Write a greeting into /etc/motd", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Name to use in message. REQUIRED!
    #[arg(short, long, default_value = "", hide_default_value = true)]
    name: String,

    /// Greeting to use in message. REQUIRED!
    #[arg(short, long, default_value = "", hide_default_value = true)]
    greeting: String,

    /// Preview message instead of writing to /etc/motd
    #[arg(short = 'v', long)]
    preview: bool,

    /// Prompt for name and greeting
    #[arg(short, long)]
    prompt: bool,
}

const AFTER_HELP: &str = "\
ENVIRONMENT:
  DEBUG     print the parsed flags and exit without doing anything
  MOTD_LOG  log filter for diagnostics on stderr (default: warn)
";

impl Cli {
    fn into_config(self, debug: bool) -> Config {
        Config {
            name: self.name,
            greeting: self.greeting,
            preview: self.preview,
            prompt: self.prompt,
            debug,
        }
    }
}

fn logger_init() {
    let env = Env::default().filter_or("MOTD_LOG", "warn");
    Builder::from_env(env).init();
}

fn main() -> ExitCode {
    logger_init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() { 1 } else { 0 };
            if let Err(print_err) = e.print() {
                warn!("printing argument error: {:?}", print_err);
            }
            return ExitCode::from(code);
        }
    };

    let debug = env::var_os("DEBUG").is_some_and(|v| !v.is_empty());
    let config = cli.into_config(debug);
    debug!("resolved config: {:?}", config);

    let outcome = {
        let mut out = io::stdout().lock();
        motd_writer::run(&config, Path::new(DEFAULT_MOTD_PATH), io::stdin().lock(), &mut out)
    };

    match &outcome {
        Outcome::Usage => {
            let mut out = io::stdout().lock();
            let printed = Cli::command()
                .write_help(&mut out)
                .and_then(|_| writeln!(out));
            if let Err(e) = printed {
                warn!("printing usage: {:?}", e);
            }
        }
        outcome => {
            if let Some(diagnostic) = outcome.diagnostic() {
                println!("{}", diagnostic);
            }
        }
    }

    ExitCode::from(outcome.exit_code())
}
