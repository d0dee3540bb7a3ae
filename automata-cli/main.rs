use std::io::{BufRead, Write};

use anyhow::Context;
use pattern_automata::{
    dfa::DFA,
    nfa::{Compiler, Config},
    NFA,
};

use crate::args::Command;

mod args;

fn main() {
    env_logger::init();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = execute(
        &mut lexopt::Parser::from_env(),
        stdin.lock(),
        stdout.lock(),
        stderr.lock(),
    );
    std::process::exit(code);
}

/// Parse arguments and match every line of `rdr`, returning the exit code.
///
/// Usage errors exit with `2`. Any other error, including a pattern that
/// fails to compile, exits with `1`.
fn execute<R: BufRead, W: Write, E: Write>(
    p: &mut lexopt::Parser,
    rdr: R,
    mut wtr: W,
    mut ewtr: E,
) -> i32 {
    let config = match args::parse(p) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            return match write!(wtr, "{}", args::usage()) {
                Ok(()) => 0,
                Err(_) => 1,
            };
        }
        Err(err) => {
            let _ = writeln!(ewtr, "{:#}\n\n{}", err, args::usage());
            return 2;
        }
    };
    if let Err(err) = run(&config, rdr, &mut wtr, &mut ewtr) {
        if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1") {
            let _ = writeln!(ewtr, "{:?}", err);
        } else {
            let _ = writeln!(ewtr, "{:#}", err);
        }
        return 1;
    }
    0
}

fn run<R: BufRead, W: Write, E: Write>(
    config: &args::Config,
    mut rdr: R,
    mut wtr: W,
    ewtr: E,
) -> anyhow::Result<()> {
    let matcher = Matcher::new(config, ewtr)?;
    let mut buf = vec![];
    loop {
        if config.prompt {
            write!(wtr, "> ")?;
            wtr.flush()?;
        }
        buf.clear();
        let n = rdr
            .read_until(b'\n', &mut buf)
            .context("failed to read stdin")?;
        if n == 0 {
            break;
        }
        // Invalid UTF-8 is replaced with U+FFFD, which no pattern char
        // can be confused with.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(|c| c == '\n' || c == '\r');
        let verdict =
            if matcher.is_match(line) { "Matched." } else { "Not matched." };
        writeln!(wtr, "{}\t\t=> {}", line, verdict)?;
    }
    Ok(())
}

/// The automaton lines are matched with.
enum Matcher {
    NFA(NFA),
    DFA(DFA),
}

impl Matcher {
    fn new<E: Write>(
        config: &args::Config,
        mut ewtr: E,
    ) -> anyhow::Result<Matcher> {
        let mut compiler = Compiler::new();
        compiler.configure(Config::new().explicit(!config.in_place));
        let nfa = compiler
            .build(&config.pattern)
            .context("failed to compile pattern")?;
        if config.debug {
            writeln!(ewtr, "{:?}", nfa)?;
            writeln!(ewtr, "{:?}", nfa.transition_table())?;
        }
        if !config.dfa {
            log::debug!("matching with the NFA ({} states)", nfa.len());
            return Ok(Matcher::NFA(nfa));
        }
        let dfa = DFA::new(&nfa);
        if config.debug {
            writeln!(ewtr, "{:?}", dfa)?;
        }
        log::debug!("matching with the DFA ({} states)", dfa.state_len());
        Ok(Matcher::DFA(dfa))
    }

    fn is_match(&self, line: &str) -> bool {
        match *self {
            Matcher::NFA(ref nfa) => nfa.is_match(line),
            Matcher::DFA(ref dfa) => dfa.is_match(line),
        }
    }
}
