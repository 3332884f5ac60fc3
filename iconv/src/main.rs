//! iconv-style converter from UTF-8 to the unitext encodings.
//!
//! Usage:
//!   uniconv -t <to-encoding> [-o <file>] [--lossy] [file...]
//!   uniconv -c [file...]
//!   uniconv -l

use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use unitext::decode;
use unitext::registry;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::from(1);
    }

    let mut to_encoding: Option<String> = None;
    let mut output_file: Option<String> = None;
    let mut input_files: Vec<String> = Vec::new();
    let mut list_encodings = false;
    let mut check_only = false;
    let mut lossy = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--to-code" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires an encoding name");
                    return ExitCode::from(1);
                }
                to_encoding = Some(args[i].clone());
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -o requires a filename");
                    return ExitCode::from(1);
                }
                output_file = Some(args[i].clone());
            }
            "-c" | "--check" => {
                check_only = true;
            }
            "--lossy" => {
                lossy = true;
            }
            "-l" | "--list" => {
                list_encodings = true;
            }
            "-h" | "--help" => {
                print_usage(&args[0]);
                return ExitCode::SUCCESS;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                return ExitCode::from(1);
            }
            _ => {
                input_files.push(args[i].clone());
            }
        }
        i += 1;
    }

    if list_encodings {
        let mut entries: Vec<_> = registry::encodings().collect();
        entries.sort_unstable_by_key(|e| e.name());

        println!("Encodings:");
        for enc in entries {
            let aliases: Vec<_> = enc.aliases.to_vec();
            if aliases.is_empty() {
                println!("  {}", enc.name());
            } else {
                println!("  {} ({})", enc.name(), aliases.join(", "));
            }
        }
        return ExitCode::SUCCESS;
    }

    let input = match read_input(&input_files) {
        Ok(buf) => buf,
        Err(code) => return code,
    };

    if check_only {
        return match decode::validate_utf8(&input) {
            Ok(()) => {
                println!("valid UTF-8 ({} bytes)", input.len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                match e.error_length() {
                    Some(len) => println!(
                        "invalid UTF-8: valid_up_to={} error_length={}",
                        e.valid_up_to(),
                        len
                    ),
                    None => println!(
                        "invalid UTF-8: valid_up_to={} error_length=none (truncated)",
                        e.valid_up_to()
                    ),
                }
                ExitCode::from(1)
            }
        };
    }

    let to = match to_encoding {
        Some(t) => t,
        None => {
            eprintln!("Error: Target encoding (-t) is required");
            return ExitCode::from(1);
        }
    };

    let output = match registry::transcode_from_utf8(&input, &to, lossy) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let write_result = match output_file {
        Some(path) => {
            let mut file = match File::create(&path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error creating {}: {}", path, e);
                    return ExitCode::from(1);
                }
            };
            file.write_all(&output)
        }
        None => io::stdout().write_all(&output),
    };

    if let Err(e) = write_result {
        eprintln!("Error writing output: {}", e);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Reads stdin, or the concatenation of `files` when any are given.
fn read_input(files: &[String]) -> Result<Vec<u8>, ExitCode> {
    let mut buf = Vec::new();

    if files.is_empty() {
        if let Err(e) = io::stdin().read_to_end(&mut buf) {
            eprintln!("Error reading stdin: {}", e);
            return Err(ExitCode::from(1));
        }
        return Ok(buf);
    }

    for path in files {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error opening {}: {}", path, e);
                return Err(ExitCode::from(1));
            }
        };
        if let Err(e) = file.read_to_end(&mut buf) {
            eprintln!("Error reading {}: {}", path, e);
            return Err(ExitCode::from(1));
        }
    }
    Ok(buf)
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} -t <to-encoding> [-o <file>] [--lossy] [file...]",
        program
    );
    eprintln!("       {} -c [file...]", program);
    eprintln!("       {} -l", program);
    eprintln!();
    eprintln!("Input is always UTF-8.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --to-code <encoding>    Target encoding");
    eprintln!("  -o, --output <file>         Output file (default: stdout)");
    eprintln!("      --lossy                 Replace ill-formed input with U+FFFD");
    eprintln!("  -c, --check                 Only validate the input");
    eprintln!("  -l, --list                  List available encodings");
    eprintln!("  -h, --help                  Show this help");
}
