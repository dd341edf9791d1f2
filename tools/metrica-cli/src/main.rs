use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use metrica_foot::{FootError, FootedWord};
use metrica_parser::parse_stress_pattern;
use metrica_protocol::{Parameter, ParameterSet, Polarity, Settings};
use metrica_space::{reference_word, ParameterSpace};

#[derive(Parser)]
#[command(author, version, about = "Explores metrical stress parameter settings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every retained footing of one reference word
    List(SessionArgs),
    /// Print the distinct renderings of one reference word
    Distinct(SessionArgs),
    /// Foot one reference word under a full assignment
    Foot {
        #[arg(short, long, default_value_t = 5)]
        length: usize,

        /// All six parameters, e.g. "iterativity=on,directionality=rtl,..."
        #[arg(short, long, value_name = "ASSIGNMENT")]
        params: String,

        #[arg(long)]
        json: bool,
    },
    /// List parameter names and their values
    Parameters,
}

#[derive(Args)]
struct SessionArgs {
    /// Syllable count of the reference word to show
    #[arg(short, long, default_value_t = 5)]
    length: usize,

    /// Fix a parameter, e.g. --set word_headedness=left
    #[arg(short, long = "set", value_name = "PARAM=VALUE")]
    settings: Vec<String>,

    /// Rule out one full assignment
    #[arg(short, long = "exclude", value_name = "ASSIGNMENT")]
    exclusions: Vec<String>,

    /// Keep combinations producing this stress pattern, e.g. 0102 or "s s̀ s ś"
    #[arg(short, long, value_name = "PATTERN")]
    observe: Option<String>,

    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FootingReport {
    rendering: String,
    parameters: ParameterSet,
    stress: Vec<u8>,
    unfootable: bool,
}

impl From<&FootedWord> for FootingReport {
    fn from(word: &FootedWord) -> Self {
        Self {
            rendering: word.to_string(),
            parameters: *word.parameters(),
            stress: word.stress_profile().into_iter().map(|s| s.level()).collect(),
            unfootable: word.is_unfootable(),
        }
    }
}

#[derive(Serialize)]
struct SessionReport {
    length: usize,
    settings: Settings,
    implied: Settings,
    footings: Vec<FootingReport>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// 3 when footing itself failed, 2 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.chain().any(|cause| cause.downcast_ref::<FootError>().is_some()) {
        3
    } else {
        2
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::List(args) => list(&args),
        Command::Distinct(args) => distinct(&args),
        Command::Foot { length, params, json } => foot(length, &params, json),
        Command::Parameters => {
            parameters();
            Ok(())
        }
    }
}

/// Applies the session arguments in order: settings, exclusions, observation.
fn build_session(args: &SessionArgs) -> anyhow::Result<(ParameterSpace, usize)> {
    let mut space = ParameterSpace::new();
    let index = space.index_of_length(args.length)?;

    for entry in &args.settings {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("expected PARAM=VALUE, got {:?}", entry))?;
        space
            .set_named(name.trim(), value)
            .with_context(|| format!("in --set {}", entry))?;
    }
    let removed = space.commit()?;
    eprintln!("⚙️  Fixed {} ({} footings removed)", space.settings(), removed);

    for entry in &args.exclusions {
        let assignment: Settings = entry
            .parse()
            .with_context(|| format!("in --exclude {}", entry))?;
        let removed = space.exclude(&assignment)?;
        eprintln!("⚙️  Excluded {} ({} footings removed)", assignment, removed);
    }

    if let Some(text) = &args.observe {
        let pattern = parse_stress_pattern(text).with_context(|| format!("in --observe {}", text))?;
        let removed = space.observe(index, &pattern)?;
        eprintln!("📖 Observed {} ({} footings removed)", text, removed);
    }

    Ok((space, index))
}

fn list(args: &SessionArgs) -> anyhow::Result<()> {
    let (space, index) = build_session(args)?;
    let word = space.word(index)?;

    if args.json {
        let report = SessionReport {
            length: word.length(),
            settings: *space.settings(),
            implied: space.implied(),
            footings: word.footings().map(FootingReport::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for footing in word.footings() {
            println!("{:<32} {}", footing.to_string(), footing.parameters());
        }
    }

    eprintln!(
        "✅ {} footing(s) of the {}-syllable word remain",
        word.len(),
        word.length()
    );
    Ok(())
}

fn distinct(args: &SessionArgs) -> anyhow::Result<()> {
    let (space, index) = build_session(args)?;
    let renderings = space.distinct_renderings(index)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&renderings)?);
    } else {
        for rendering in &renderings {
            println!("{}", rendering);
        }
    }

    let undetermined: Vec<&str> = space.undetermined().into_iter().map(Parameter::name).collect();
    eprintln!(
        "✅ {} distinct rendering(s); still open: {}",
        renderings.len(),
        if undetermined.is_empty() {
            "nothing".to_string()
        } else {
            undetermined.join(", ")
        }
    );
    Ok(())
}

fn foot(length: usize, params: &str, json: bool) -> anyhow::Result<()> {
    let settings: Settings = params.parse().context("in --params")?;
    let parameters = settings.resolve().context("--params must fix all six parameters")?;

    let syllables = reference_word(length);
    let word = FootedWord::new(&syllables, parameters)
        .with_context(|| format!("footing {} syllable(s) with {}", length, parameters))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&FootingReport::from(&word))?);
    } else {
        println!("{}", word);
    }
    if word.is_unfootable() {
        eprintln!("⚙️  One syllable could not be footed");
    }
    Ok(())
}

fn parameters() {
    for parameter in Parameter::ALL {
        let [minus, plus] = Polarity::BOTH.map(|p| parameter.value_name(p));
        println!("{:<18} {} | {}", parameter.name(), minus, plus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(settings: &[&str], exclusions: &[&str], observe: Option<&str>) -> SessionArgs {
        SessionArgs {
            length: 5,
            settings: settings.iter().map(|s| s.to_string()).collect(),
            exclusions: exclusions.iter().map(|s| s.to_string()).collect(),
            observe: observe.map(str::to_string),
            json: false,
        }
    }

    #[test]
    fn test_session_applies_arguments_in_order() {
        let args = session(
            &["iterativity=off", "directionality=rtl", "word_headedness=right"],
            &[],
            Some("00020"),
        );
        let (space, index) = build_session(&args).unwrap();

        assert_eq!(index, 1);
        assert_eq!(space.word(index).unwrap().len(), 4);
    }

    #[test]
    fn test_exit_codes() {
        let bad_setting = build_session(&session(&["stress=on"], &[], None)).unwrap_err();
        assert_eq!(exit_code(&bad_setting), 2);

        let partial = build_session(&session(&[], &["iterativity=on"], None)).unwrap_err();
        assert_eq!(exit_code(&partial), 2);

        let too_short = foot(
            1,
            "iterativity=off,directionality=ltr,extrametricality=off,\
             foot_headedness=left,degenerate_feet=disallowed,word_headedness=left",
            false,
        )
        .unwrap_err();
        assert_eq!(exit_code(&too_short), 3);
    }

    #[test]
    fn test_cli_parses_repeated_flags() {
        let cli = Cli::try_parse_from([
            "metrica",
            "list",
            "--length",
            "6",
            "--set",
            "iterativity=on",
            "--set",
            "word_headedness=left",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::List(args) => {
                assert_eq!(args.length, 6);
                assert_eq!(args.settings.len(), 2);
                assert!(args.json);
            }
            _ => panic!("expected list"),
        }
    }
}
