use mimalloc::MiMalloc;
use proof_checker_rs::{read_proof, Proof};
use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let proof = match args.as_slice() {
        [] => input_proof(),
        [path] => read_proof(path).map_err(|e| e.to_string()),
        _ => Err("usage: proof-checker-rs [FILE]".into()),
    };
    let proof = match proof {
        Ok(proof) => proof,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    match proof.first_failure() {
        None => {
            println!("Valid proof.");
            ExitCode::SUCCESS
        }
        Some(failure) => {
            println!("Invalid proof.");
            eprintln!("{failure}");
            ExitCode::FAILURE
        }
    }
}

/// Asks for the lines one by one, repeating each until it is acceptable.
fn input_proof() -> Result<Proof, String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    prompt("Enter the number of lines in the proof: ")?;
    let n: usize = read_line(&mut input)?
        .trim()
        .parse()
        .map_err(|e| format!("invalid number of lines: {e}"))?;

    let mut proof = Proof::new();
    while proof.len() < n {
        prompt(&format!("{} ", proof.next_number()))?;
        let record = read_line(&mut input)?;
        if let Err(e) = proof.push_record(record.trim_end()) {
            eprintln!("{e}");
        }
    }
    Ok(proof)
}

fn prompt(s: &str) -> Result<(), String> {
    let mut stdout = io::stdout();
    write!(stdout, "{s}")
        .and_then(|_| stdout.flush())
        .map_err(|e| e.to_string())
}

fn read_line(input: &mut impl BufRead) -> Result<String, String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Err("unexpected end of input".into()),
        Ok(_) => Ok(line),
        Err(e) => Err(e.to_string()),
    }
}
