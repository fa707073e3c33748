//! FAN Courier CLI - validate, encode and submit AWB batches
//!
//! # Main Commands
//!
//! ```bash
//! fancourier generate params.json              # Validate, upload, print results
//! fancourier validate params.json              # Check params against the field rules
//! fancourier encode params.json -o awb.csv     # Write the CSV upload body
//! fancourier parse reply.csv --params params.json
//! ```
//!
//! # Reference Commands
//!
//! ```bash
//! fancourier columns                           # CSV column layout
//! fancourier rules                             # Field rules
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=fancourier=debug` for details.

use clap::{Parser, Subcommand};
use fancourier::{
    ClientConfig, FanCourierClient, GenerateAwb, ParsedResultLine, AWB_COLUMNS, AWB_FIELD_RULES,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fancourier")]
#[command(about = "Generate FAN Courier AWBs from JSON shipment batches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate params, upload them and print one result per shipment
    Generate {
        /// JSON params file ({"fisier": [...]})
        params: PathBuf,

        /// Output file for results (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Validate a params file against the field rules
    Validate {
        /// JSON params file ({"fisier": [...]})
        params: PathBuf,
    },

    /// Validate a params file and write the CSV upload body
    Encode {
        /// JSON params file ({"fisier": [...]})
        params: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a saved API reply against the params that produced it
    Parse {
        /// Raw reply file
        reply: PathBuf,

        /// JSON params file that was submitted
        #[arg(short, long)]
        params: PathBuf,

        /// Output file for results (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the CSV column layout
    Columns,

    /// Show the field rules
    Rules,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            params,
            output,
            base_url,
        } => cmd_generate(&params, output.as_deref(), base_url.as_deref()).await,

        Commands::Validate { params } => cmd_validate(&params),

        Commands::Encode { params, output } => cmd_encode(&params, output.as_deref()),

        Commands::Parse {
            reply,
            params,
            output,
        } => cmd_parse(&reply, &params, output.as_deref()),

        Commands::Columns => cmd_columns(),

        Commands::Rules => cmd_rules(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_generate(
    params_path: &Path,
    output: Option<&Path>,
    base_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = load_params(params_path)?;

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }

    let client = FanCourierClient::new(config)?;
    let lines = client.generate_awb(&params).await?;

    print_summary(&lines);
    write_output(&serde_json::to_string_pretty(&lines)?, output)
}

fn cmd_validate(params_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let params = load_params(params_path)?;
    let request = GenerateAwb::new(&params)?;

    eprintln!("✅ {} shipments valid", request.batch().len());
    Ok(())
}

fn cmd_encode(params_path: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let params = load_params(params_path)?;
    let request = GenerateAwb::new(&params)?;
    let csv = request.to_csv()?;

    eprintln!("✅ Encoded {} shipments", request.batch().len());
    write_output(csv.trim_end_matches('\n'), output)
}

fn cmd_parse(
    reply_path: &Path,
    params_path: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = load_params(params_path)?;
    let request = GenerateAwb::new(&params)?;

    let bytes = fs::read(reply_path)?;
    let reply = fancourier::client::decode_reply(&bytes);
    let lines = request.parse_result(&reply.text);

    print_summary(&lines);
    write_output(&serde_json::to_string_pretty(&lines)?, output)
}

fn cmd_columns() -> Result<(), Box<dyn std::error::Error>> {
    for (i, (key, label)) in AWB_COLUMNS.columns().iter().enumerate() {
        if key == label {
            println!("{:>2}  {}", i + 1, label);
        } else {
            println!("{:>2}  {} (from '{}')", i + 1, label, key);
        }
    }
    Ok(())
}

fn cmd_rules() -> Result<(), Box<dyn std::error::Error>> {
    for (field, rule) in AWB_FIELD_RULES.iter() {
        let presence = if rule.required { "required" } else { "optional" };
        match &rule.allowed_values {
            Some(values) => println!("{:<28} {:<9} {}", field, presence, values.join(" | ")),
            None => println!("{:<28} {}", field, presence),
        }
    }
    Ok(())
}

fn load_params(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
    Ok(serde_json::from_str(&content)?)
}

fn print_summary(lines: &[ParsedResultLine]) {
    let accepted = lines.iter().filter(|l| l.is_success()).count();
    eprintln!("📦 {} lines: {} accepted, {} rejected", lines.len(), accepted, lines.len() - accepted);
    for line in lines.iter().filter(|l| !l.is_success()).take(5) {
        eprintln!("   ❌ line {}: {}", line.line, line.error_message);
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
