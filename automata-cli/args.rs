use std::fmt::Write;

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
};

const USAGE: &'static str = "\
Match each line of stdin against a pattern.

The pattern must match a line in its entirety. Each line is echoed back along
with whether it matched.

USAGE:
    automata -E <pattern> [options]

OPTIONS:
";

/// What the command line asked for.
#[derive(Debug)]
pub enum Command {
    /// Print the usage message and quit.
    Help,
    /// Match stdin against a pattern.
    Run(Config),
}

/// The settings for one run of the matcher.
#[derive(Debug, Default)]
pub struct Config {
    pub pattern: String,
    pub dfa: bool,
    pub in_place: bool,
    pub prompt: bool,
    pub debug: bool,
}

impl Config {
    const USAGES: &'static [Usage] = &[
        Usage::new("-E <pattern>", "The pattern to match lines against."),
        Usage::new("--dfa", "Match with a DFA instead of the NFA."),
        Usage::new(
            "--in-place",
            "Compile quantifiers without adding new states.",
        ),
        Usage::new("--prompt", "Print a prompt before reading each line."),
        Usage::new("--debug", "Print the automata to stderr before matching."),
        Usage::new("-h, --help", "Print this message."),
    ];
}

/// Returns the full usage message.
pub fn usage() -> String {
    format!("{}{}", USAGE, Usage::short(Config::USAGES))
}

/// Parse the command line. Errors are always usage errors.
pub fn parse(p: &mut Parser) -> anyhow::Result<Command> {
    let mut config = Config::default();
    let mut pattern = None;
    while let Some(arg) = p.next()? {
        match arg {
            Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
            Arg::Short('E') => {
                let value = p.value().context("-E")?;
                pattern = Some(value.string().context("-E")?);
            }
            Arg::Long("dfa") => config.dfa = true,
            Arg::Long("in-place") => config.in_place = true,
            Arg::Long("prompt") => config.prompt = true,
            Arg::Long("debug") => config.debug = true,
            arg => return Err(arg.unexpected().into()),
        }
    }
    config.pattern = match pattern {
        None => anyhow::bail!("missing required flag -E <pattern>"),
        Some(pattern) => pattern,
    };
    Ok(Command::Run(config))
}

/// A type for expressing the documentation of a flag.
///
/// `Usage::short` takes a slice of usages and formats them into two aligned
/// columns.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// The format of the flag, for example, '-E <pattern>'.
    pub format: &'static str,
    /// A very short description of the flag. Should fit on one line along
    /// with the format.
    pub short: &'static str,
}

impl Usage {
    /// Create a new usage from the given components.
    pub const fn new(format: &'static str, short: &'static str) -> Usage {
        Usage { format, short }
    }

    /// Format a two column table from the given usages, where the first
    /// column is the format and the second column is the short description.
    pub fn short(usages: &[Usage]) -> String {
        const MIN_SPACE: usize = 2;

        let mut result = String::new();
        let max_len = match usages.iter().map(|u| u.format.len()).max() {
            None => return result,
            Some(len) => len,
        };
        for usage in usages.iter() {
            let padlen = MIN_SPACE + (max_len - usage.format.len());
            let padding = " ".repeat(padlen);
            // Writing to a String cannot fail.
            let _ = writeln!(
                result,
                "    {}{}{}",
                usage.format, padding, usage.short
            );
        }
        result
    }
}
