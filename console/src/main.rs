use api::prelude::*;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::render::{format_due, TermsDocument};
use console::signature::{Point, SignaturePad};
use console::signing::{ReviewState, SignerDetails, SigningDesk, SigningError};
use console::wizard::{ContractWizard, WizardError};
use console::{ConsoleConfig, Session};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "countersign")]
#[command(about = "Draft, send, and sign service contracts from the terminal")]
struct Cli {
    /// Path to the console config file
    #[arg(long, default_value = "countersign.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account role: user or client
        #[arg(long, value_parser = parse_role, default_value = "user")]
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Walk the creation wizard and send the contract to the client
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        client_email: String,
        #[arg(long)]
        client_name: Option<String>,
        /// Contract category (service, consulting, nda; anything else is custom)
        #[arg(long = "type", default_value = "service")]
        contract_type: ContractType,
        /// Currency-formatted amount, e.g. "$5,000"
        #[arg(long, default_value = "")]
        amount: String,
        /// Due date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        description: String,
        /// Clause to include (repeatable): payment, liability, confidentiality, termination
        #[arg(long = "clause")]
        clauses: Vec<String>,
    },
    /// List contracts for the signed-in account
    List,
    /// Hand a contract to the signing page
    Select {
        contract_id: String,
    },
    /// Render the selected contract's terms
    Review,
    /// Sign the selected contract
    Sign {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Acknowledge the terms and conditions
        #[arg(long)]
        agree: bool,
        /// JSON strokes file: an array of strokes, each an array of [x, y] points
        #[arg(long)]
        signature: PathBuf,
    },
    /// Decline the selected contract
    Decline {
        /// Confirm the decline
        #[arg(long)]
        yes: bool,
    },
    /// Check that the contract service is reachable
    Health,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    match raw {
        "user" => Ok(Role::User),
        "client" => Ok(Role::Client),
        other => Err(format!("unknown role '{}' (expected user or client)", other)),
    }
}

fn parse_clause(raw: &str) -> Option<Clause> {
    match raw {
        "payment" => Some(Clause::Payment),
        "liability" => Some(Clause::Liability),
        "confidentiality" => Some(Clause::Confidentiality),
        "termination" => Some(Clause::Termination),
        _ => None,
    }
}

fn api_message(err: &ApiError) -> String {
    if err.is_transport() {
        "Could not reach the server.".to_string()
    } else {
        err.to_string()
    }
}

fn wizard_message(err: &WizardError) -> String {
    match err {
        WizardError::Api(api) => api_message(api),
        other => other.to_string(),
    }
}

fn signing_message(err: &SigningError) -> String {
    match err {
        SigningError::Api(api) => api_message(api),
        other => other.to_string(),
    }
}

fn print_terms(document: &TermsDocument) {
    println!("{}", document.title);
    println!("{}", document.preamble);
    for section in &document.sections {
        println!();
        println!("{}", section.heading);
        println!("{}", section.body);
    }
}

fn pad_from_strokes(strokes: Vec<Vec<[f64; 2]>>) -> SignaturePad {
    let mut pad = SignaturePad::new();
    for stroke in strokes {
        let mut points = stroke.into_iter().map(|[x, y]| Point::new(x, y));
        let Some(first) = points.next() else {
            continue;
        };
        pad.press(first);
        for point in points {
            pad.drag(point);
        }
        pad.release();
    }
    pad
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = ConsoleConfig::load(&cli.config)?.apply_env();
    let service = HttpContractService::new(config.service_config())
        .map_err(|err| format!("Invalid service configuration: {}", err))?;
    let mut session = Session::load(&config.session_file)?;

    match cli.command {
        Commands::Login {
            role,
            email,
            password,
        } => {
            match service.login(role, &LoginRequest::new(email, password)).await {
                Ok(response) => {
                    println!("Signed in as {} ({})", response.name, response.role);
                    session.log_in(response.into());
                    session.save(&config.session_file)?;
                }
                Err(err) => println!("{}", api_message(&err)),
            }
        }
        Commands::Logout => {
            session.log_out();
            session.save(&config.session_file)?;
            println!("Signed out.");
        }
        Commands::Create {
            title,
            client_email,
            client_name,
            contract_type,
            amount,
            due,
            description,
            clauses,
        } => {
            let mut wizard = ContractWizard::new();
            wizard.select_type(contract_type);
            wizard.form.title = title;
            wizard.form.client_email = client_email.clone();
            wizard.form.client_name = client_name.unwrap_or_default();
            wizard.form.amount = amount;
            wizard.form.due_date = due;
            wizard.form.description = description;

            for raw in &clauses {
                match parse_clause(raw) {
                    Some(clause) => {
                        wizard.toggle_clause(clause);
                    }
                    None => println!("Ignoring unknown clause '{}'", raw),
                }
            }

            // Walk the steps the way the form does.
            wizard.advance().map_err(|err| wizard_message(&err))?;
            wizard.advance().map_err(|err| wizard_message(&err))?;
            debug!("Review preview: {:?}", wizard.preview());

            match wizard.submit(&service, &session).await {
                Ok(contract) => {
                    println!("Contract sent successfully to {}", client_email);
                    println!("Contract id: {}", contract.id);
                }
                Err(err) => println!("{}", wizard_message(&err)),
            }
        }
        Commands::List => {
            let identity = match session.require_identity() {
                Ok(identity) => identity,
                Err(err) => {
                    println!("{}", err);
                    return Ok(());
                }
            };
            let result = match identity.role {
                Role::User => service.contracts_for_user(&identity.id).await,
                Role::Client => service.contracts_for_client(&identity.id).await,
            };
            match result {
                Ok(contracts) => {
                    for contract in contracts {
                        println!(
                            "{}  {:<8}  ${}  due {}  {}",
                            contract.id,
                            contract.status.to_string(),
                            console::render::format_amount(contract.amount),
                            format_due(contract.due_date),
                            contract.title,
                        );
                    }
                }
                Err(err) => println!("{}", api_message(&err)),
            }
        }
        Commands::Select { contract_id } => {
            session.select_contract(&contract_id);
            session.save(&config.session_file)?;
            println!("Selected contract {}", contract_id);
        }
        Commands::Review => {
            let mut desk = SigningDesk::new();
            desk.load_for_review(&service, &session).await;
            match desk.state() {
                ReviewState::Idle => println!("No contract selected."),
                ReviewState::Pending => println!("Could not load the contract. Try again."),
                ReviewState::Ready(contract) => {
                    println!(
                        "Action Required: please review and sign this contract by {}",
                        format_due(contract.due_date)
                    );
                    println!();
                    if let Some(document) = desk.terms() {
                        print_terms(&document);
                    }
                }
            }
        }
        Commands::Sign {
            name,
            email,
            agree,
            signature,
        } => {
            let raw = std::fs::read_to_string(&signature)?;
            let strokes: Vec<Vec<[f64; 2]>> = serde_json::from_str(&raw)?;
            let pad = pad_from_strokes(strokes);

            let signer = SignerDetails {
                name,
                email,
                agreed_to_terms: agree,
            };

            let mut desk = SigningDesk::new();
            match desk.sign(&service, &mut session, &signer, &pad).await {
                Ok(contract) => {
                    session.save(&config.session_file)?;
                    println!(
                        "Contract signed successfully! You will receive a confirmation email shortly."
                    );
                    println!("Contract {} is now {}", contract.id, contract.status);
                }
                Err(err) => println!("{}", signing_message(&err)),
            }
        }
        Commands::Decline { yes } => {
            if !yes {
                println!("Declining requires --yes to confirm.");
                return Ok(());
            }
            let mut desk = SigningDesk::new();
            match desk.decline(&service, &mut session, true).await {
                Ok(Some(_)) => {
                    session.save(&config.session_file)?;
                    println!("Contract declined. The other party has been notified.");
                }
                Ok(None) => {}
                Err(err) => println!("{}", signing_message(&err)),
            }
        }
        Commands::Health => match service.health_check().await {
            Ok(()) => println!("Contract service is reachable."),
            Err(err) => println!("{}", api_message(&err)),
        },
    }

    Ok(())
}
