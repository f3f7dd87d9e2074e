//! Command-line interface for sylcut
//!
//! Usage:
//!   sylcut [OPTIONS] <TEXT>
//!   echo "วันนี้ โรงเรียนเปิด" | sylcut
//!
//! Options:
//!   -c, --classes          Print the token class of each unit
//!   -e, --encode <SCHEME>  Encode `|`-marked lines into unit labels
//!   -l, --split <N>        Split `|`-marked lines into pieces of at most N units
//!       --eval <REF> <PRED> Score a predicted corpus against a reference corpus
//!   -s, --steps <FILE>     JSON list of normalization steps
//!   -n, --no-normalize     Skip normalization
//!   -j, --json             Output as JSON
//!   -v                     Increase log verbosity (repeatable)
//!   -h, --help             Show help

use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, BufRead};

use sylcut::normalizer::load_steps_json;
use sylcut::{
    default_steps, evaluate, preprocess, syllable_to_token, LabelScheme, LongSequenceSplitter,
    Step, Syllabifier, TokenClass,
};

fn print_help() {
    eprintln!(
        r#"sylcut - Thai syllable tokenizer and word-boundary tagger

USAGE:
    sylcut [OPTIONS] [TEXT]
    echo "วันนี้ โรงเรียนเปิด" | sylcut

OPTIONS:
    -c, --classes           Print the token class of each unit
    -e, --encode <SCHEME>   Encode `|`-marked lines (binary, BI, BIO, SchemeA)
    -l, --split <N>         Split `|`-marked lines into pieces of at most N units
        --eval <REF> <PRED> Score a predicted corpus against a reference corpus
    -s, --steps <FILE>      JSON list of normalization steps
    -n, --no-normalize      Skip normalization
    -j, --json              Output as JSON
    -v                      Increase log verbosity (-v, -vv, -vvv)
    -h, --help              Show this help message

EXAMPLES:
    sylcut "วันนี้ โรงเรียนเปิด"
    sylcut -c "หน้าที่ 19..."
    sylcut -e BI "ผม|ไม่|ชอบ"
    sylcut -l 8 < training.txt
    sylcut --eval label.txt predicted.txt
"#
    );
}

enum Mode {
    Units,
    Classes,
    Encode(LabelScheme),
    Split(LongSequenceSplitter),
    Eval(String, String),
}

struct Options {
    mode: Mode,
    steps: Vec<Step>,
    json: bool,
    verbosity: u8,
    text: Option<String>,
}

#[derive(Serialize)]
struct UnitRecord<'a> {
    text: &'a str,
    kind: &'static str,
    start: usize,
    end: usize,
}

#[derive(Serialize)]
struct ClassRecord<'a> {
    text: &'a str,
    class: TokenClass,
    token: &'a str,
}

fn exit_with(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn value_of(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => exit_with(&format!("{} requires a value", flag)),
    }
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().collect();

    let mut opts = Options {
        mode: Mode::Units,
        steps: default_steps(),
        json: false,
        verbosity: 2,
        text: None,
    };
    let mut normalize = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--classes" => opts.mode = Mode::Classes,
            "-j" | "--json" => opts.json = true,
            "-n" | "--no-normalize" => normalize = false,
            "-e" | "--encode" => {
                i += 1;
                let name = value_of(&args, i, "--encode");
                match name.parse() {
                    Ok(scheme) => opts.mode = Mode::Encode(scheme),
                    Err(e) => exit_with(&e.to_string()),
                }
            }
            "-l" | "--split" => {
                i += 1;
                let n = value_of(&args, i, "--split");
                let splitter = n
                    .parse::<usize>()
                    .map_err(|e| e.to_string())
                    .and_then(|n| LongSequenceSplitter::new(n).map_err(|e| e.to_string()));
                match splitter {
                    Ok(s) => opts.mode = Mode::Split(s),
                    Err(e) => exit_with(&format!("invalid --split value `{}`: {}", n, e)),
                }
            }
            "--eval" => {
                let reference = value_of(&args, i + 1, "--eval");
                let prediction = value_of(&args, i + 2, "--eval");
                opts.mode = Mode::Eval(reference, prediction);
                i += 2;
            }
            "-s" | "--steps" => {
                i += 1;
                let path = value_of(&args, i, "--steps");
                match load_steps_json(&path) {
                    Ok(steps) => opts.steps = steps,
                    Err(e) => exit_with(&format!("cannot load steps from '{}': {}", path, e)),
                }
            }
            arg if arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v') => {
                opts.verbosity = opts.verbosity.saturating_add((arg.len() - 1) as u8);
            }
            arg if !arg.starts_with('-') => {
                opts.text = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !normalize {
        opts.steps.clear();
    }
    opts
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => stderrlog::LogLevelNum::Off,
        1 => stderrlog::LogLevelNum::Error,
        2 => stderrlog::LogLevelNum::Warn,
        3 => stderrlog::LogLevelNum::Info,
        4 => stderrlog::LogLevelNum::Debug,
        _ => stderrlog::LogLevelNum::Trace,
    };
    if let Err(e) = stderrlog::new().verbosity(level).init() {
        eprintln!("Error setting up logging: {}", e);
    }
}

fn read_lines(path: &str) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) => exit_with(&format!("cannot read '{}': {}", path, e)),
    }
}

fn input_lines(text: Option<String>) -> Vec<String> {
    if let Some(t) = text {
        return vec![t];
    }
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        match line {
            Ok(l) => lines.push(l),
            Err(e) => exit_with(&format!("reading stdin: {}", e)),
        }
    }
    lines
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with(&format!("serializing to JSON: {}", e)),
    }
}

fn process_line(line: &str, opts: &Options) -> sylcut::Result<()> {
    let text = preprocess(line, &opts.steps);
    match &opts.mode {
        Mode::Units => {
            let syllabifier = Syllabifier::new(&text);
            let units = syllabifier.make_units();
            if opts.json {
                let records: Vec<_> = units
                    .iter()
                    .map(|u| UnitRecord {
                        text: u.as_str(&text),
                        kind: u.kind.as_str(),
                        start: u.start,
                        end: u.end(),
                    })
                    .collect();
                print_json(&records);
            } else {
                let strings: Vec<_> = units.iter().map(|u| u.as_str(&text)).collect();
                println!("{}", strings.join("~"));
            }
        }
        Mode::Classes => {
            let units = Syllabifier::new(&text).unit_strings();
            if opts.json {
                let records: Vec<_> = units
                    .iter()
                    .map(|u| {
                        let class = TokenClass::of(u);
                        ClassRecord {
                            text: u,
                            class,
                            token: class.token().unwrap_or(u.as_str()),
                        }
                    })
                    .collect();
                print_json(&records);
            } else {
                for unit in &units {
                    println!("{}\t{}", unit, syllable_to_token(unit));
                }
                println!();
            }
        }
        Mode::Encode(scheme) => {
            let example = scheme.encode(&text);
            if opts.json {
                print_json(&example);
            } else {
                for (unit, label) in example.units.iter().zip(&example.labels) {
                    println!("{}\t{}", unit, label);
                }
                println!();
            }
        }
        Mode::Split(splitter) => {
            let pieces = splitter.split(&text)?;
            if opts.json {
                print_json(&pieces);
            } else {
                for piece in pieces {
                    println!("{}", piece);
                }
            }
        }
        Mode::Eval(..) => {}
    }
    Ok(())
}

fn run_eval(reference: &str, prediction: &str, opts: &Options) -> sylcut::Result<()> {
    let normalize = |lines: Vec<String>| -> Vec<String> {
        lines
            .iter()
            .map(|l| preprocess(l.trim(), &opts.steps))
            .collect()
    };
    let references = normalize(read_lines(reference));
    let predictions = normalize(read_lines(prediction));
    let stats = evaluate(&references, &predictions)?;

    if opts.json {
        print_json(&stats);
    } else {
        println!(
            "char\tprecision {:.4}\trecall {:.4}\tf1 {:.4}",
            stats.char_precision(),
            stats.char_recall(),
            stats.char_f1()
        );
        println!(
            "word\tprecision {:.4}\trecall {:.4}\tf1 {:.4}",
            stats.word_precision(),
            stats.word_recall(),
            stats.word_f1()
        );
    }
    Ok(())
}

fn main() {
    let mut opts = parse_args();
    setup_logging(opts.verbosity);

    if let Mode::Eval(reference, prediction) = &opts.mode {
        if let Err(e) = run_eval(reference, prediction, &opts) {
            exit_with(&e.to_string());
        }
        return;
    }

    let lines = input_lines(opts.text.take());
    if lines.is_empty() {
        eprintln!("Error: No input text provided");
        print_help();
        std::process::exit(1);
    }

    for line in &lines {
        if let Err(e) = process_line(line, &opts) {
            exit_with(&e.to_string());
        }
    }
}
