use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use gateway_context::context::{GatewayContext, HEADER_NAME, decode_header};
use gateway_context::registry::{Host, Registry, ServicePath};

#[derive(Parser)]
#[command(name = "gateway-context-cli")]
#[command(about = "Inspect gateway headers and service paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a service path against a host
    Path {
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: u16,
        /// Positional service arguments: name [version [reserved]]
        args: Vec<String>,
    },
    /// Decode a gateway header value and print the resulting context
    Decode {
        /// Raw header value (JSON)
        value: String,
    },
    /// Send a header to a running service and print what it saw
    Probe {
        #[arg(short, long, default_value = "http://localhost:4100")]
        url: String,
        /// Raw header value (JSON)
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Path { host, port, args } => {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            println!("{}", Host::new(host, port).path(&ServicePath::from_args(&args)));
        }
        Commands::Decode { value } => {
            let mut headers = HeaderMap::new();
            headers.insert(HEADER_NAME, HeaderValue::from_bytes(value.as_bytes())?);

            match decode_header(&headers)? {
                Some(payload) => {
                    let ctx = GatewayContext::from_payload(payload, Registry::default().into());
                    println!("{}", serde_json::to_string_pretty(&ctx)?);
                }
                None => println!("no context"),
            }
        }
        Commands::Probe { url, value } => {
            let res = reqwest::Client::new()
                .get(format!("{}/context", url))
                .header(HEADER_NAME, value)
                .send()
                .await?;

            let status = res.status();
            if status == reqwest::StatusCode::NO_CONTENT {
                println!("no context");
            } else if !status.is_success() {
                eprintln!("Error: service returned status {}", status);
            } else {
                let json: Value = res.json().await?;
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
    }

    Ok(())
}
