use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use treaty_ledger::{
    config::Config,
    handlers::{
        create::{self, CreatePage},
        dashboard::{self, DashboardPage},
        detail::{self, DetailPage},
        login::{self, LoginPage},
    },
    models::treaty::{TreatyFilters, TreatyId},
    navigation::Navigation,
    services::auth::{self as auth_service, Credentials},
    state::AppState,
    view::dom::to_html,
    view::treaty_form::TreatyForm,
};

#[derive(Parser)]
#[command(name = "treaty-ledger", version, about = "Treaty ledger client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in as one of the test accounts.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// List treaties, optionally filtered.
    List {
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one treaty with its audit history.
    Show { id: TreatyId },
    /// Show the audit history of a treaty.
    Audit { id: TreatyId },
    /// Create a treaty.
    Create(TreatyFields),
    /// Edit a treaty; only the given fields change.
    Edit {
        id: TreatyId,
        #[command(flatten)]
        fields: TreatyFields,
    },
    /// Archive a treaty.
    Archive {
        id: TreatyId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Run the backend's expiry notification check.
    CheckExpiry,
    /// Show the status breakdown and treaties expiring soon.
    Reports,
}

#[derive(Args)]
struct TreatyFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long = "type")]
    treaty_type: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    date_signed: Option<String>,
    #[arg(long)]
    effective_date: Option<String>,
    #[arg(long)]
    expiry_date: Option<String>,
    /// Comma-separated country names.
    #[arg(long)]
    countries: Option<String>,
}

impl TreatyFields {
    fn apply(self, form: &mut TreatyForm) {
        let overrides = [
            (self.title, &mut form.title),
            (self.status, &mut form.current_status),
            (self.description, &mut form.description),
            (self.treaty_type, &mut form.treaty_type),
            (self.category, &mut form.category),
            (self.date_signed, &mut form.date_signed),
            (self.effective_date, &mut form.effective_date),
            (self.expiry_date, &mut form.expiry_date),
            (self.countries, &mut form.signatory_countries),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config)?;

    match cli.command {
        Command::Login { email, password } => {
            let mut page = LoginPage::default();
            login::handle_login(&state, &mut page, Credentials::new(email, password))?;
            println!("{}", page.to_html());
            follow(page.navigation).await;
        }
        Command::Logout => {
            auth_service::sign_out(&state)?;
        }
        Command::List {
            term,
            status,
            category,
        } => {
            let mut page = DashboardPage {
                filters: TreatyFilters {
                    term,
                    status,
                    category,
                },
                ..DashboardPage::default()
            };
            dashboard::fetch_treaties(&state, &mut page).await;
            println!("{}", to_html(&page.treaty_list));
            follow(page.navigation).await;
        }
        Command::Show { id } => {
            let mut page = DetailPage::default();
            detail::fetch_treaty_details(&state, &mut page, id).await;
            if page.navigation.is_none() {
                detail::fetch_audit_logs(&state, &mut page, id).await;
            }
            println!("{}", page.to_html());
            follow(page.navigation).await;
        }
        Command::Audit { id } => {
            let mut page = DetailPage::default();
            detail::fetch_audit_logs(&state, &mut page, id).await;
            println!("{}", to_html(&page.audit_log));
            follow(page.navigation).await;
        }
        Command::Create(fields) => {
            let mut page = CreatePage::default();
            fields.apply(&mut page.form);
            create::create_new_treaty(&state, &mut page).await;
            println!("{}", page.to_html());
            follow(page.navigation).await;
        }
        Command::Edit { id, fields } => {
            let mut page = DetailPage::default();
            detail::fetch_treaty_details(&state, &mut page, id).await;
            if page.navigation.is_none() {
                if !page.controls.edit_button {
                    anyhow::bail!("{}: editing is not available for this session", page.title_display);
                }
                page.enter_edit_mode();
                fields.apply(&mut page.form);
                detail::save_treaty_changes(&state, &mut page).await;
            }
            println!("{}", page.to_html());
            follow(page.navigation).await;
        }
        Command::Archive { id, yes } => {
            let mut page = DetailPage::default();
            detail::fetch_treaty_details(&state, &mut page, id).await;
            if page.navigation.is_none() {
                detail::archive_treaty(&state, &mut page, |prompt| yes || confirm(prompt)).await;
            }
            if let Some(alert) = &page.alert {
                println!("{}", alert);
            }
            follow(page.navigation).await;
        }
        Command::CheckExpiry => {
            let mut page = DetailPage::default();
            detail::trigger_expiry_check(&state, &mut page).await;
            println!("{}", to_html(&page.expiry_alerts));
            follow(page.navigation).await;
        }
        Command::Reports => {
            let mut page = DashboardPage::default();
            dashboard::load_reports(&state, &mut page).await;
            println!("{}", page.to_html());
            follow(page.navigation).await;
        }
    }

    Ok(())
}

/// Waits out a pending navigation and reports where it leads.
async fn follow(navigation: Option<Navigation>) {
    if let Some(navigation) = navigation {
        tokio::time::sleep(navigation.delay).await;
        tracing::info!("➡️ Navigating to {}", navigation.to.href());
    }
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    if io::stderr().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}
