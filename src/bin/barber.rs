//! `barber`: command-line client for the barbershop API.
//!
//! Keeps its session cookie in a local JSON jar, so `barber login` once and
//! later commands reuse the token until it expires or the API rejects it.

use std::path::PathBuf;
use std::sync::Arc;

use barberpro_web::config::{ConfigError, DEFAULT_CHECKOUT_URL, parse_api_url};
use barberpro_web::format::{format_brl, parse_price};
use barberpro_web::nav::Notice;
use barberpro_web::net::api::{ApiClient, ApiError, build_http};
use barberpro_web::net::endpoints;
use barberpro_web::net::types::{FREE_HAIRCUT_LIMIT, Haircut, HaircutUpdate, is_premium};
use barberpro_web::session::token::{ClientCookies, TokenStore, TokenStoreError};
use barberpro_web::session::{AuthError, Session};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("cookie jar: {0}")]
    Token(#[from] TokenStoreError),
    #[error("not signed in; run `barber login` first")]
    NotAuthenticated,
    #[error("{}", .0.message())]
    Refused(Notice),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "barber", about = "BarberPRO command-line client")]
struct Cli {
    #[arg(long, env = "BARBER_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "BARBER_COOKIE_FILE", default_value = ".barber-session.json")]
    cookie_file: PathBuf,

    #[arg(long, env = "BARBER_API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[arg(long, env = "BARBER_CHECKOUT_URL", default_value = DEFAULT_CHECKOUT_URL)]
    checkout_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session in the cookie file.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BARBER_PASSWORD")]
        password: String,
    },
    /// Create an account. Does not sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BARBER_PASSWORD")]
        password: String,
    },
    Logout,
    #[command(flatten)]
    Signed(SignedCommand),
}

/// Commands that need a live session.
#[derive(Subcommand, Debug)]
enum SignedCommand {
    Whoami,
    Agenda(AgendaCommand),
    Haircuts(HaircutsCommand),
    Plan(PlanCommand),
}

#[derive(Args, Debug)]
struct AgendaCommand {
    #[command(subcommand)]
    command: AgendaSubcommand,
}

#[derive(Subcommand, Debug)]
enum AgendaSubcommand {
    List,
    Add {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        haircut_id: String,
    },
    Finish {
        schedule_id: String,
    },
}

#[derive(Args, Debug)]
struct HaircutsCommand {
    #[command(subcommand)]
    command: HaircutsSubcommand,
}

#[derive(Subcommand, Debug)]
enum HaircutsSubcommand {
    List {
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
    Show {
        haircut_id: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
    },
    Update {
        haircut_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
}

#[derive(Args, Debug)]
struct PlanCommand {
    #[command(subcommand)]
    command: PlanSubcommand,
}

#[derive(Subcommand, Debug)]
enum PlanSubcommand {
    Status,
    Subscribe,
    Portal,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let api_url = parse_api_url(cli.api_url.as_deref())?;
    let api = ApiClient::new(build_http(cli.timeout_secs)?, &api_url);
    let jar = Arc::new(ClientCookies::persistent(&cli.cookie_file)?);
    let session = Session::new(api, TokenStore::new(jar));
    let signed_in = session.bootstrap().await;

    match cli.command {
        Command::Login { email, password } => {
            session.sign_in(&email, &password).await?;
            let name = session.user().map(|user| user.name).unwrap_or_default();
            println!("signed in as {name}");
            Ok(())
        }
        Command::Signup { name, email, password } => {
            session.sign_up(&name, &email, &password).await?;
            println!("{}", Notice::SignUpDone.message());
            Ok(())
        }
        Command::Logout => {
            session.sign_out();
            println!("signed out");
            Ok(())
        }
        Command::Signed(command) => {
            if !signed_in {
                return Err(CliError::NotAuthenticated);
            }
            run_signed(&session, &cli.checkout_url, command).await
        }
    }
}

async fn run_signed(session: &Session, checkout_url: &str, command: SignedCommand) -> Result<(), CliError> {
    match command {
        SignedCommand::Whoami => {
            let user = session.refresh_user().await?;
            print_json(&user)
        }
        SignedCommand::Agenda(agenda) => run_agenda(session.api(), agenda).await,
        SignedCommand::Haircuts(haircuts) => run_haircuts(session.api(), haircuts).await,
        SignedCommand::Plan(plan) => run_plan(session, checkout_url, plan).await,
    }
}

async fn run_agenda(api: &ApiClient, agenda: AgendaCommand) -> Result<(), CliError> {
    match agenda.command {
        AgendaSubcommand::List => {
            for item in endpoints::fetch_schedule(api).await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    item.id,
                    item.customer,
                    item.haircut.name,
                    format_brl(item.haircut.price.value())
                );
            }
            Ok(())
        }
        AgendaSubcommand::Add { customer, haircut_id } => {
            let customer = required("customer", &customer)?;
            let haircut_id = required("haircut_id", &haircut_id)?;
            endpoints::create_schedule(api, customer, haircut_id)
                .await
                .map_err(|e| refused_unless_unauthorized(e, Notice::ScheduleFailed))?;
            println!("registered {customer}");
            Ok(())
        }
        AgendaSubcommand::Finish { schedule_id } => {
            endpoints::finish_schedule(api, &schedule_id)
                .await
                .map_err(|e| refused_unless_unauthorized(e, Notice::FinishFailed))?;
            println!("finished {schedule_id}");
            Ok(())
        }
    }
}

async fn run_haircuts(api: &ApiClient, haircuts: HaircutsCommand) -> Result<(), CliError> {
    match haircuts.command {
        HaircutsSubcommand::List { inactive } => {
            for haircut in endpoints::fetch_haircuts(api, !inactive).await?.unwrap_or_default() {
                print_haircut(&haircut);
            }
            Ok(())
        }
        HaircutsSubcommand::Show { haircut_id } => {
            let haircut = endpoints::fetch_haircut(api, &haircut_id).await?;
            print_json(&haircut)
        }
        HaircutsSubcommand::Add { name, price } => {
            let name = required("name", &name)?;
            let price = parse_price(required("price", &price)?).ok_or(CliError::Refused(Notice::InvalidPrice))?;
            let check = endpoints::check_subscription(api).await?;
            let count = endpoints::count_haircuts(api).await?;
            if !is_premium(check.subscription.as_ref()) && count >= FREE_HAIRCUT_LIMIT {
                return Err(CliError::Refused(Notice::HaircutLimitReached));
            }
            endpoints::create_haircut(api, name, price)
                .await
                .map_err(|e| refused_unless_unauthorized(e, Notice::HaircutCreateFailed))?;
            println!("created {name}");
            Ok(())
        }
        HaircutsSubcommand::Update { haircut_id, name, price, active } => {
            let check = endpoints::check_subscription(api).await?;
            if !is_premium(check.subscription.as_ref()) {
                return Err(CliError::Refused(Notice::PremiumRequired));
            }
            let current = endpoints::fetch_haircut(api, &haircut_id).await?;
            let name = match &name {
                Some(name) => required("name", name)?,
                None => current.name.as_str(),
            };
            let price = match &price {
                Some(raw) => parse_price(raw).ok_or(CliError::Refused(Notice::InvalidPrice))?,
                None => current.price.value(),
            };
            let update = HaircutUpdate {
                name,
                price,
                status: active.unwrap_or(current.status),
                haircut_id: &current.id,
            };
            endpoints::update_haircut(api, &update)
                .await
                .map_err(|e| refused_unless_unauthorized(e, Notice::HaircutUpdateFailed))?;
            println!("{}", Notice::HaircutUpdated.message());
            Ok(())
        }
    }
}

async fn run_plan(session: &Session, checkout_url: &str, plan: PlanCommand) -> Result<(), CliError> {
    let premium = session.refresh_user().await?.is_premium();
    match plan.command {
        PlanSubcommand::Status => {
            println!("{}", if premium { "premium" } else { "free" });
            Ok(())
        }
        PlanSubcommand::Subscribe => {
            if premium {
                println!("already premium");
                return Ok(());
            }
            let checkout = endpoints::create_checkout(session.api())
                .await
                .map_err(|e| refused_unless_unauthorized(e, Notice::CheckoutFailed))?;
            println!("{checkout_url}{}", checkout.session_id);
            Ok(())
        }
        PlanSubcommand::Portal => {
            if !premium {
                return Err(CliError::Refused(Notice::PremiumRequired));
            }
            let portal = endpoints::create_portal(session.api())
                .await
                .map_err(|e| refused_unless_unauthorized(e, Notice::PortalFailed))?;
            println!("{}", portal.session_id);
            Ok(())
        }
    }
}

fn refused_unless_unauthorized(err: ApiError, notice: Notice) -> CliError {
    if err.is_unauthorized() {
        return CliError::NotAuthenticated;
    }
    tracing::warn!(error = %err, "request failed");
    CliError::Refused(notice)
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::MissingField(field));
    }
    Ok(trimmed)
}

fn print_haircut(haircut: &Haircut) {
    println!("{}\t{}\t{}", haircut.id, haircut.name, format_brl(haircut.price.value()));
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
