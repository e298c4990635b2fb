/*!
The motd-writer crate composes a greeting like `Hello, Ada` and either
previews it or writes it over the current message of the day. It backs
the `motd` CLI from the set-motd crate, but the logic is all here so
it can be driven with any input and output streams.

A single call to `run` resolves the inputs, composes the message and
dispatches it, returning an `Outcome` that tells the caller what
happened. Nothing in this crate exits the process; mapping an `Outcome`
to an exit status is left to the binary.

```
use std::path::Path;

let config = motd_writer::Config {
    name: String::from("Ada"),
    greeting: String::from("Hello"),
    preview: true,
    ..Default::default()
};

let mut out = Vec::new();
let outcome = motd_writer::run(
    &config,
    Path::new(motd_writer::DEFAULT_MOTD_PATH),
    std::io::empty(),
    &mut out,
);

assert_eq!(outcome.exit_code(), 0);
assert_eq!(String::from_utf8_lossy(&out), "Hello, Ada\n");
```

When `preview` is off, the message is written into the target file
without creating or truncating it. The file must already exist, and if
the new message is shorter than what was there before, the old tail
stays in place.
*/

use std::{
    io,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};

mod dispatch;
mod resolve;

pub use dispatch::write_motd;
pub use resolve::{resolve, Resolution};

/// The file the `motd` CLI writes to.
pub const DEFAULT_MOTD_PATH: &str = "/etc/motd";

/// Everything one invocation needs to know, gathered up front from
/// the command line and the environment.
///
/// This is serializable so that programs embedding the crate can keep
/// a greeting in their own config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Who is being greeted.
    pub name: String,
    /// The greeting word, e.g. "Hello".
    pub greeting: String,
    /// Print the message instead of writing it to the motd file.
    pub preview: bool,
    /// Read the greeting and name from the input stream, replacing
    /// whatever was given in `name` and `greeting`.
    pub prompt: bool,
    /// Dump the config and stop before doing anything else.
    pub debug: bool,
}

/// How an invocation ended.
#[derive(Debug)]
pub enum Outcome {
    /// Inputs were missing and no prompt was requested, so the caller
    /// should show usage.
    Usage,
    /// The config was dumped because debug mode is on.
    Debug,
    /// The message was printed.
    Preview,
    /// The message was written into the motd file.
    Written,
    /// The motd file could not be opened for writing.
    OpenError(Error),
    /// The motd file was opened, but writing to it failed.
    WriteError(Error),
}

impl Outcome {
    /// The process exit status this outcome maps to.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Usage | Outcome::Debug | Outcome::Preview | Outcome::Written => 0,
            Outcome::OpenError(_) | Outcome::WriteError(_) => 1,
        }
    }

    /// The line to show the user for a failed outcome, e.g.
    /// `Error: Failed to write to /etc/motd`.
    pub fn diagnostic(&self) -> Option<String> {
        self.error().map(|e| format!("Error: {}", e))
    }

    /// The error behind a failed outcome, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::OpenError(e) | Outcome::WriteError(e) => Some(e),
            _ => None,
        }
    }
}

/// Resolve inputs, compose the message and dispatch it.
///
/// Prompts and the prompted lines go through `out` and `input`. With
/// `preview` set, the message is written to `out` as well, otherwise
/// it goes into the file at `motd_path`.
pub fn run<R, W>(config: &Config, motd_path: &Path, input: R, out: &mut W) -> Outcome
where
    R: BufRead,
    W: Write,
{
    if config.debug {
        if let Err(e) = dump_config(config, out) {
            warn!("dumping config: {:?}", e);
        }
        return Outcome::Debug;
    }

    let (name, greeting) = match resolve(config, input, out) {
        Resolution::Usage => {
            debug!("name or greeting missing, asking for usage");
            return Outcome::Usage;
        }
        Resolution::Resolved { name, greeting } => (name, greeting),
    };

    let message = compose(&name, &greeting);
    dispatch::dispatch(&message, config.preview, motd_path, out)
}

/// Build the message from its parts. No escaping or trimming happens here.
pub fn compose(name: &str, greeting: &str) -> String {
    format!("{}, {}", greeting, name)
}

fn dump_config<W: Write>(config: &Config, out: &mut W) -> io::Result<()> {
    writeln!(out, "Name: {}", config.name)?;
    writeln!(out, "Greeting: {}", config.greeting)?;
    writeln!(out, "Prompt: {}", config.prompt)?;
    writeln!(out, "Preview: {}", config.preview)?;
    out.flush()
}

/// Errors encountered while writing the message of the day.
///
/// The `Display` impl gives the short message meant for users. The
/// underlying io error is available through `source()`.
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// The motd file could not be opened. It is never created, so a
    /// missing file lands here too.
    Open { path: PathBuf, source: io::Error },
    /// Writing the message into an opened motd file failed.
    Write { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::Open { path, .. } => write!(f, "Unable to open to {}", path.display())?,
            Error::Write { path, .. } => write!(f, "Failed to write to {}", path.display())?,
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } | Error::Write { source, .. } => Some(source),
        }
    }
}
