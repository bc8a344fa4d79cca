//! Seller portal CLI: command-line client for the seller backend.
//!
//! Set PORTAL_API_URL (or API_URL) and, after `login`, PORTAL_AUTH_TOKEN.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use portal_api_client::{ApiClient, LoginRequest};
use portal_cli::{encode_file, field_messages, print_error, print_json, KindArg, ProfileView};
use portal_core::validation::validate_login;
use portal_core::{PortalConfig, PortalError};
use portal_documents::codec::{parse_payload, Payload};
use portal_documents::{HandleRegistry, LocalFile, ProfileEditSession, SlotError};

#[derive(Parser)]
#[command(name = "seller-portal", about = "Seller portal CLI")]
struct Cli {
    /// Include internal error details in error output
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        /// Falls back to PORTAL_PASSWORD
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Seller profile operations
    Profile {
        #[command(subcommand)]
        sub: ProfileCommands,
    },
    /// Validate a local file and print it as a data URI
    Encode {
        file: PathBuf,
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    /// Product operations
    Products {
        #[command(subcommand)]
        sub: ProductCommands,
    },
    /// Support ticket operations
    Tickets {
        #[command(subcommand)]
        sub: TicketCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the profile with document summaries
    Show,
    /// Upload a document into a profile slot (e.g. gstCertificate)
    SetDocument { slot: String, file: PathBuf },
    /// Remove the document held by a profile slot
    ClearDocument { slot: String },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List the seller's products
    List,
}

#[derive(Subcommand)]
enum TicketCommands {
    /// List the seller's support tickets
    List,
    /// Reply to a ticket by its id
    Reply { id: String, message: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let config = PortalConfig::from_env().context("Invalid configuration")?;
    portal_infra::init_telemetry(config.log_json, None)?;

    let result = run(cli, &config).await;
    portal_infra::shutdown_telemetry();

    if let Err(err) = result {
        if let Some(err) = err.downcast_ref::<PortalError>() {
            print_error(err, verbose);
        } else if let Some(err) = err.downcast_ref::<SlotError>() {
            print_error(err, verbose);
        } else {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli, config: &PortalConfig) -> anyhow::Result<()> {
    let client = ApiClient::from_config(config)?;

    match cli.command {
        Commands::Login { email, password } => {
            let request = LoginRequest { email, password };
            validate_login(&request)
                .into_result()
                .map_err(PortalError::from)?;
            let response = client.login(&request).await?;
            print_json(&serde_json::json!({
                "token": response.token,
                "message": response.message,
                "hint": "export PORTAL_AUTH_TOKEN=<token>",
            }))?;
        }
        Commands::Profile { sub } => profile_command(sub, &client, config).await?,
        Commands::Encode { file, kind } => {
            let report = encode_file(&file, kind.into(), config.max_upload_bytes).await?;
            print_json(&report)?;
        }
        Commands::Products { sub } => match sub {
            ProductCommands::List => {
                let mut products = client.list_seller_products().await?;
                for product in &mut products {
                    let inline = product
                        .image_url
                        .as_deref()
                        .is_some_and(|url| !matches!(parse_payload(url), Payload::Remote { .. }));
                    if inline {
                        product.image_url = Some("<redacted>".to_string());
                    }
                }
                print_json(&products)?;
            }
        },
        Commands::Tickets { sub } => match sub {
            TicketCommands::List => {
                let tickets = client.list_tickets().await?;
                print_json(&tickets)?;
            }
            TicketCommands::Reply { id, message } => {
                let ticket = client.reply_to_ticket(&id, &message).await?;
                print_json(&ticket)?;
            }
        },
    }

    Ok(())
}

async fn profile_command(
    sub: ProfileCommands,
    client: &ApiClient,
    config: &PortalConfig,
) -> anyhow::Result<()> {
    let profile = client.get_profile().await?;

    let (slot, file) = match sub {
        ProfileCommands::Show => {
            print_json(&ProfileView::new(&profile))?;
            return Ok(());
        }
        ProfileCommands::SetDocument { slot, file } => (slot, Some(file)),
        ProfileCommands::ClearDocument { slot } => (slot, None),
    };

    let mut session = ProfileEditSession::new(HandleRegistry::new(), config.max_upload_bytes);
    session.load(profile);
    session.begin_edit();

    match file {
        Some(path) => {
            let file = LocalFile::open(&path).await.map_err(SlotError::from)?;
            session.select_document(&slot, &file).await?;
        }
        None => session.clear_document(&slot)?,
    }

    if let Some(err) = session.documents().error(&slot) {
        tracing::warn!(slot = %slot, error = %err, "Document stored without preview");
    }

    let update = match session.prepare_update() {
        Ok(update) => update,
        Err(errors) => {
            print_json(&serde_json::json!({ "fieldErrors": field_messages(&errors) }))?;
            return Err(PortalError::from(errors).into());
        }
    };

    let stored = client.update_profile(&update).await?;
    session.commit_saved(stored);
    print_json(&ProfileView::new(session.saved()))?;
    Ok(())
}
