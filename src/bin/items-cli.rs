use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "items-cli")]
#[command(about = "Command-line client for the item service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all items
    List,
    /// Show a single item
    Get { id: u64 },
    /// Create an item
    Create {
        name: String,
        description: String,
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Update fields of an existing item
    Update {
        id: u64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Delete an item
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let items_url = format!("{}/api/items", cli.url.trim_end_matches('/'));

    match cli.command {
        Commands::List => {
            let res = client.get(&items_url).send().await?;
            print_response(res).await?;
        }
        Commands::Get { id } => {
            let res = client.get(format!("{}/{}", items_url, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Create {
            name,
            description,
            status,
        } => {
            let mut body = json!({ "name": name, "description": description });
            if let Some(status) = status {
                body["status"] = Value::String(status);
            }
            let res = client.post(&items_url).json(&body).send().await?;
            print_response(res).await?;
        }
        Commands::Update {
            id,
            name,
            description,
            status,
        } => {
            let mut body = Map::new();
            for (key, value) in [("name", name), ("description", description), ("status", status)] {
                if let Some(value) = value {
                    body.insert(key.to_string(), Value::String(value));
                }
            }
            let res = client
                .put(format!("{}/{}", items_url, id))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Delete { id } => {
            let res = client.delete(format!("{}/{}", items_url, id)).send().await?;
            if res.status() == reqwest::StatusCode::NO_CONTENT {
                println!("Deleted item {}", id);
            } else {
                print_response(res).await?;
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: item service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
