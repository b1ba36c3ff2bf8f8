//! Kinesense CLI - drive the classification engine from the command line
//!
//! Commands:
//! - transform: Process a batch of tick records into state reports
//! - run: Process streaming records from stdin, one report per line
//! - validate: Validate tick records against landmark.tick.v1
//! - doctor: Diagnose configuration and environment
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use kinesense::pipeline::{EngineConfig, TickProcessor};
use kinesense::report::TickReport;
use kinesense::schema::{TickRecord, SCHEMA_VERSION};
use kinesense::{EngineError, ENGINE_VERSION, PRODUCER_NAME, REPORT_VERSION};

/// Kinesense - classification and debounce engine for landmark streams
#[derive(Parser)]
#[command(name = "kinesense")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Turn landmark tick records into debounced state reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a batch of tick records into state reports
    Transform {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Engine configuration file (JSON, partial overrides allowed)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Process streaming records from stdin, one report per line
    Run {
        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Engine configuration file (JSON, partial overrides allowed)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Flush output after each record
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Validate tick records against the input schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check an engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (landmark.tick.v1)
    Input,
    /// Output schema (state.tick.v1)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), KinesenseCliError> {
    match cli.command {
        Commands::Transform {
            input,
            output,
            input_format,
            output_format,
            config,
        } => cmd_transform(&input, &output, input_format, output_format, config.as_deref()),

        Commands::Run {
            output_format,
            config,
            flush,
        } => cmd_run(output_format, config.as_deref(), flush),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_transform(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), KinesenseCliError> {
    let input_data = read_input(input)?;

    let records = match input_format {
        InputFormat::Ndjson => TickRecord::parse_ndjson(&input_data)?,
        InputFormat::Json => TickRecord::parse_array(&input_data)?,
    };

    if records.is_empty() {
        return Err(KinesenseCliError::NoRecords);
    }

    let mut processor = build_processor(config)?;

    let mut reports: Vec<TickReport> = Vec::with_capacity(records.len());
    for record in &records {
        reports.push(processor.process_record(record)?);
    }

    let output_data = format_output(&reports, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(
    output_format: OutputFormat,
    config: Option<&Path>,
    flush: bool,
) -> Result<(), KinesenseCliError> {
    let mut processor = build_processor(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut reports: Vec<TickReport> = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let record = TickRecord::parse(trimmed)?;
        let report = processor.process_record(&record)?;

        match output_format {
            OutputFormat::Ndjson => {
                writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
                if flush {
                    stdout.flush()?;
                }
            }
            // Array formats are buffered until the stream ends
            _ => reports.push(report),
        }
    }

    match output_format {
        OutputFormat::Ndjson => {}
        _ => {
            write!(stdout, "{}", format_output(&reports, &output_format)?)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), KinesenseCliError> {
    let input_data = read_input(input)?;

    let records = match input_format {
        InputFormat::Ndjson => TickRecord::parse_ndjson(&input_data)?,
        InputFormat::Json => TickRecord::parse_array(&input_data)?,
    };

    let errors: Vec<ValidationErrorDetail> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record.validate().err().map(|e| ValidationErrorDetail {
                index,
                tick: record.tick,
                error: e.to_string(),
            })
        })
        .collect();

    let report = ValidationReport {
        total_records: records.len(),
        valid_records: records.len() - errors.len(),
        invalid_records: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                let tick = err
                    .tick
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!("  - Record {} (tick {}): {}", err.index, tick, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(KinesenseCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), KinesenseCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Kinesense version {}", ENGINE_VERSION),
    });

    checks.push(DoctorCheck {
        name: "schema_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {}", SCHEMA_VERSION),
    });

    if let Some(config_path) = config {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str::<EngineConfig>(&content) {
                    Ok(parsed) => match parsed.validate() {
                        Ok(()) => checks.push(DoctorCheck {
                            name: "config".to_string(),
                            status: CheckStatus::Ok,
                            message: format!(
                                "Config valid (gesture confirm: {} ticks, posture alert: {} ticks, blink minimum: {} ticks)",
                                parsed.gesture.confirm_ticks,
                                parsed.posture.alert_ticks,
                                parsed.blink.min_closed_ticks
                            ),
                        }),
                        Err(e) => checks.push(DoctorCheck {
                            name: "config".to_string(),
                            status: CheckStatus::Error,
                            message: format!("Config rejected: {e}"),
                        }),
                    },
                    Err(e) => checks.push(DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Invalid config JSON: {e}"),
                    }),
                },
                Err(e) => checks.push(DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Cannot read config file: {e}"),
                }),
            }
        } else {
            checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: "Config file does not exist (defaults would be used)".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Kinesense Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(KinesenseCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), KinesenseCliError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {}", SCHEMA_VERSION);
            println!();
            println!("One record per tick, NDJSON on the wire:");
            println!();
            println!("- schema_version: must be \"{}\"", SCHEMA_VERSION);
            println!("- tick: optional producer-side counter");
            println!("- observed_at: optional RFC3339 timestamp");
            println!("- observation: domain-tagged payload, one of:");
            println!();
            println!("1. hand - 21 landmarks (wrist + four joints per digit)");
            println!("   {{\"domain\": \"hand\", \"landmarks\": [{{x, y, z?, visibility?}}, ...]}}");
            println!();
            println!("2. pose - five upper-body landmarks");
            println!("   {{\"domain\": \"pose\", \"landmarks\": {{nose, left_shoulder,");
            println!("    right_shoulder, left_ear, right_ear}}}}");
            println!();
            println!("3. face - 6 ordered contour points per eye");
            println!("   {{\"domain\": \"face\", \"eyes\": {{left: [...], right: [...]}}}}");
            println!();
            println!("Omit the landmark payload to mark a tick with no subject detected.");
            println!("Coordinates are normalized to [0, 1]; y grows downward.");
        }
        SchemaType::Output => {
            println!("Output Schema: {}", REPORT_VERSION);
            println!();
            println!("One report per input record:");
            println!();
            println!("- report_version: \"{}\"", REPORT_VERSION);
            println!("- producer: {{ name, version, instance_id }}");
            println!("- tick: input record's counter, or the processor's own");
            println!("- computed_at_utc: RFC3339 timestamp");
            println!("- state: domain-tagged result, one of:");
            println!();
            println!("  hand: {{ raw, confirmed, run_length, diagnostics }}");
            println!("  pose: {{ bad_this_tick, run_length, alert, diagnostics }}");
            println!("  face: {{ eye_state, mean_ear, closed_run_length,");
            println!("          blink_completed, total_blinks }}");
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, KinesenseCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn build_processor(config: Option<&Path>) -> Result<TickProcessor, KinesenseCliError> {
    match config {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let config: EngineConfig = serde_json::from_str(&content)?;
            Ok(TickProcessor::with_config(config)?)
        }
        None => Ok(TickProcessor::new()),
    }
}

fn format_output(
    reports: &[TickReport],
    format: &OutputFormat,
) -> Result<String, KinesenseCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(reports)?),
    }
}

// Error types

#[derive(Debug)]
enum KinesenseCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for KinesenseCliError {
    fn from(e: io::Error) -> Self {
        KinesenseCliError::Io(e)
    }
}

impl From<EngineError> for KinesenseCliError {
    fn from(e: EngineError) -> Self {
        KinesenseCliError::Engine(e)
    }
}

impl From<serde_json::Error> for KinesenseCliError {
    fn from(e: serde_json::Error) -> Self {
        KinesenseCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<KinesenseCliError> for CliError {
    fn from(e: KinesenseCliError) -> Self {
        match e {
            KinesenseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            KinesenseCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches {}", SCHEMA_VERSION)),
            },
            KinesenseCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            KinesenseCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            KinesenseCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            KinesenseCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    tick: Option<u64>,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
