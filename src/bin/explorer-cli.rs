use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "explorer-cli")]
#[command(about = "Command-line client for the block explorer JSON API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chain summary with peer connection count
    Info,
    /// Most recent blocks, newest first
    Blocks {
        /// How many blocks (1-100)
        count: Option<u32>,
    },
    /// A single block by hash
    Block { hash: String },
    /// Unspent balance of an address
    Balance { address: String },
    /// Unspent outputs of an address
    Utxos { address: String },
    /// Broadcast a signed raw transaction
    Broadcast { hex: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Info => client.get(format!("{}/api/info", base)),
        Commands::Blocks { count: Some(n) } => client.get(format!("{}/api/blocks/{}", base, n)),
        Commands::Blocks { count: None } => client.get(format!("{}/api/blocks", base)),
        Commands::Block { hash } => client.get(format!("{}/api/block/{}", base, hash)),
        Commands::Balance { address } => {
            client.get(format!("{}/api/wallet/balance/{}", base, address))
        }
        Commands::Utxos { address } => client.get(format!("{}/api/wallet/utxos/{}", base, address)),
        Commands::Broadcast { hex } => client
            .post(format!("{}/api/wallet/broadcast", base))
            .json(&json!({ "hex": hex })),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: explorer returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }
    Ok(())
}
