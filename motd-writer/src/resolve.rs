use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::Config;

const GREETING_LABEL: &str = "Your Greeting: ";
const NAME_LABEL: &str = "Your Name: ";

/// What the inputs resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Name or greeting is missing and there is no prompt to fill
    /// them in.
    Usage,
    Resolved { name: String, greeting: String },
}

/// Work out the name and greeting to use.
///
/// When `config.prompt` is set, both values are read from `input`
/// (greeting first), each after writing a label to `out`, and they
/// replace whatever the config holds even if they come back empty.
/// A line that cannot be read counts as an empty answer.
pub fn resolve<R, W>(config: &Config, mut input: R, out: &mut W) -> Resolution
where
    R: BufRead,
    W: Write,
{
    if config.prompt {
        let greeting = ask(GREETING_LABEL, &mut input, out);
        let name = ask(NAME_LABEL, &mut input, out);
        return Resolution::Resolved { name, greeting };
    }

    if config.name.is_empty() || config.greeting.is_empty() {
        return Resolution::Usage;
    }

    Resolution::Resolved {
        name: config.name.clone(),
        greeting: config.greeting.clone(),
    }
}

fn ask<R, W>(label: &str, input: &mut R, out: &mut W) -> String
where
    R: BufRead,
    W: Write,
{
    if let Err(e) = out.write_all(label.as_bytes()).and_then(|_| out.flush()) {
        warn!("writing prompt {:?}: {:?}", label, e);
    }

    // bytes that aren't utf-8 are kept as replacement chars rather than
    // failing the whole line
    let mut line = Vec::new();
    if let Err(e) = input.read_until(b'\n', &mut line) {
        debug!("reading answer to {:?}, using empty string: {:?}", label, e);
        return String::new();
    }

    String::from(String::from_utf8_lossy(&line).trim())
}

#[cfg(test)]
mod tests {
    use std::io::{self, BufReader, Cursor, Read};

    use super::*;

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin went away"))
        }
    }

    fn flags(name: &str, greeting: &str, prompt: bool) -> Config {
        Config {
            name: String::from(name),
            greeting: String::from(greeting),
            prompt,
            ..Default::default()
        }
    }

    #[test]
    fn flags_pass_through() {
        let mut out = Vec::new();
        let res = resolve(&flags("Ada", "Hello", false), io::empty(), &mut out);
        assert_eq!(
            res,
            Resolution::Resolved {
                name: String::from("Ada"),
                greeting: String::from("Hello"),
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn missing_flag_means_usage() {
        let mut out = Vec::new();
        assert_eq!(
            resolve(&flags("", "Hello", false), io::empty(), &mut out),
            Resolution::Usage
        );
        assert_eq!(
            resolve(&flags("Ada", "", false), io::empty(), &mut out),
            Resolution::Usage
        );
        assert_eq!(
            resolve(&flags("", "", false), io::empty(), &mut out),
            Resolution::Usage
        );
    }

    #[test]
    fn prompt_trims_and_overrides() {
        let mut out = Vec::new();
        let res = resolve(
            &flags("X", "Y", true),
            Cursor::new("  Hello  \n  Ada \n"),
            &mut out,
        );
        assert_eq!(
            res,
            Resolution::Resolved {
                name: String::from("Ada"),
                greeting: String::from("Hello"),
            }
        );
        assert_eq!(out, b"Your Greeting: Your Name: ");
    }

    #[test]
    fn prompt_at_eof_gives_empty_values() {
        let mut out = Vec::new();
        let res = resolve(&flags("X", "Y", true), Cursor::new("Hi\n"), &mut out);
        assert_eq!(
            res,
            Resolution::Resolved {
                name: String::new(),
                greeting: String::from("Hi"),
            }
        );
    }

    #[test]
    fn prompt_keeps_lines_that_are_not_utf8() {
        let mut out = Vec::new();
        let res = resolve(
            &flags("X", "Y", true),
            Cursor::new(&b"Hi\xff\nAda\n"[..]),
            &mut out,
        );
        assert_eq!(
            res,
            Resolution::Resolved {
                name: String::from("Ada"),
                greeting: String::from("Hi\u{FFFD}"),
            }
        );
    }

    #[test]
    fn prompt_read_errors_are_swallowed() {
        let mut out = Vec::new();
        let res = resolve(
            &flags("X", "Y", true),
            BufReader::new(BrokenPipe),
            &mut out,
        );
        assert_eq!(
            res,
            Resolution::Resolved {
                name: String::new(),
                greeting: String::new(),
            }
        );
        assert_eq!(out, b"Your Greeting: Your Name: ");
    }
}
