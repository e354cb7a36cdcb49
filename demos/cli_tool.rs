//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using xlsxrows for exporting worksheet rows as CSV, JSON or Markdown.

use std::fs::File;
use std::io::{self, Write};
use std::process;
use xlsxrows::{OutputFormat, ReaderBuilder, XlsxRowsError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: {} <input.xlsx> <output> <columns> [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  --format <csv|json|markdown>  Output format (default: csv)");
        eprintln!("  --list-sheets                 Print worksheet names and exit");
        eprintln!("  --stdout                      Write output to stdout instead of file");
        eprintln!("\nExamples:");
        eprintln!("  {} input.xlsx output.csv 5", args[0]);
        eprintln!("  {} input.xlsx output.md 5 --format markdown", args[0]);
        eprintln!("  {} input.xlsx - 5 --stdout --format json", args[0]);
        process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let columns = args[3].parse::<usize>().unwrap_or_else(|_| {
        eprintln!("Error: Invalid column count: {}", args[3]);
        process::exit(1);
    });
    let use_stdout = output_path == "-" || args.contains(&"--stdout".to_string());

    // Parse options
    let mut format = OutputFormat::Csv;
    let mut list_sheets = false;
    let mut i = 4;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --format requires a value");
                    process::exit(1);
                }
                format = match args[i + 1].as_str() {
                    "csv" => OutputFormat::Csv,
                    "json" => OutputFormat::Json,
                    "markdown" | "md" => OutputFormat::Markdown,
                    other => {
                        eprintln!("Error: Unknown format: {}", other);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--list-sheets" => {
                list_sheets = true;
                i += 1;
            }
            "--stdout" => {
                // Already handled above
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    let result = if list_sheets {
        print_sheet_names(input_path)
    } else {
        export_rows(input_path, output_path, columns, format, use_stdout)
    };

    match result {
        Ok(_) => {
            if !use_stdout && !list_sheets {
                println!("Export completed: {} -> {}", input_path, output_path);
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn print_sheet_names(input_path: &str) -> Result<(), XlsxRowsError> {
    let reader = ReaderBuilder::new().build()?;
    for name in reader.sheet_names(File::open(input_path)?)? {
        println!("{}", name);
    }
    Ok(())
}

fn export_rows(
    input_path: &str,
    output_path: &str,
    columns: usize,
    format: OutputFormat,
    use_stdout: bool,
) -> Result<(), XlsxRowsError> {
    let reader = ReaderBuilder::new()
        .with_columns(columns)
        .with_output_format(format)
        .build()?;

    // Open input file
    let input = File::open(input_path)?;

    // Handle output
    if use_stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        reader.convert(input, &mut handle)?;
        handle.flush()?;
    } else {
        let output = File::create(output_path)?;
        reader.convert(input, output)?;
    }

    Ok(())
}

fn handle_error(error: XlsxRowsError) {
    match error {
        XlsxRowsError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        XlsxRowsError::Package(msg) => {
            eprintln!("Package Error: {}", msg);
            eprintln!("The file may not be a valid XLSX workbook or may be corrupted.");
        }
        XlsxRowsError::MalformedReference(msg) => {
            eprintln!("Malformed Cell Reference: {}", msg);
        }
        XlsxRowsError::IndexOutOfRange { kind, index, bound } => {
            eprintln!("Index Out Of Range: {} {} (bound: {})", kind, index, bound);
            eprintln!("Try a larger column count if a value lies beyond the configured width.");
        }
        XlsxRowsError::Format(msg) => {
            eprintln!("Format Error: {}", msg);
        }
        XlsxRowsError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check the column count.");
        }
        XlsxRowsError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
    }
}
