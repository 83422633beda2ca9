//! Vitalboard command line client.
//!
//! Stands in for the browser shell as the composition root: it builds the
//! credential store, navigator, and area clients, persists credentials
//! between invocations in a JSON snapshot under the user config directory,
//! and subscribes to session events so an expired credential turns into a
//! navigation command instead of dying inside the data layer.
//!
//! Every data command first navigates to the page that would host it in the
//! browser, so the guard sees the same transitions a user would produce:
//! an anonymous `health list` lands on the login page and is refused before
//! any request is dispatched.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use vitalboard_client::ClientError;
use vitalboard_client::config::{self, Config};
use vitalboard_client::guard::Decision;
use vitalboard_client::nav::{Location, Navigator};
use vitalboard_client::net::ai::AiApi;
use vitalboard_client::net::auth::AuthApi;
use vitalboard_client::net::health::HealthApi;
use vitalboard_client::net::knowledge::KnowledgeApi;
use vitalboard_client::net::types::{
    AdminUserQuery, AnalysisWindow, ArticlePatch, ArticleQuery, ChatPrompt, HealthMeasurements,
    HealthRecordQuery, NewArticle, NewUser,
};
use vitalboard_client::net::{ApiClient, TokenPreference};
use vitalboard_client::routes::{self, RouteTable};
use vitalboard_client::session::{Credentials, Role, SessionEvent, Slot, Snapshot};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("api call failed: {0}")]
    Client(#[from] ClientError),
    #[error("credential file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no config directory available; pass --credentials")]
    NoConfigDir,
    #[error("not signed in; the guard sent this navigation to {0}")]
    NotSignedIn(String),
    #[error("already signed in; the guard sent the login page to {0} (run `vitalboard logout` first)")]
    AlreadySignedIn(String),
    #[error("{slot} session expired; credential cleared, sign in again")]
    SessionExpired { slot: Slot },
}

#[derive(Parser, Debug)]
#[command(name = "vitalboard", about = "Vitalboard health platform API client")]
struct Cli {
    #[arg(long, env = config::ENV_BASE_URL, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Credential snapshot file; defaults to
    /// `<config dir>/vitalboard/credentials.json`.
    #[arg(long, env = "VITALBOARD_CREDENTIALS")]
    credentials: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the issued token.
    Login(LoginArgs),
    /// Create a regular user account.
    Register(RegisterArgs),
    /// Drop stored credentials.
    Logout {
        /// Clear the admin slot instead of the user slot.
        #[arg(long)]
        admin: bool,
        /// Clear both slots and every cached value.
        #[arg(long)]
        all: bool,
    },
    /// Show the profile behind the current credential.
    Me,
    /// Explain where the guard sends a navigation under the stored session.
    Route { path: String },
    Health(HealthCommand),
    Ai(AiCommand),
    Knowledge(KnowledgeCommand),
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    username: String,
    password: String,
    /// Use the administrator login and the admin credential slot.
    #[arg(long)]
    admin: bool,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    username: String,
    email: String,
    password: String,
}

#[derive(Args, Debug)]
struct HealthCommand {
    #[command(subcommand)]
    command: HealthSubcommand,
}

#[derive(Subcommand, Debug)]
enum HealthSubcommand {
    /// List health records.
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Record a set of measurements.
    Create(MeasurementArgs),
    Show {
        record_id: i64,
    },
    /// Update an existing record; omitted fields stay untouched.
    Update {
        record_id: i64,
        #[command(flatten)]
        measurements: MeasurementArgs,
    },
    Delete {
        record_id: i64,
    },
    /// Aggregate statistics over all records.
    Summary,
    /// Rule-based analysis over a date window.
    Analyze {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
}

#[derive(Args, Debug)]
struct MeasurementArgs {
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    systolic: Option<i64>,
    #[arg(long)]
    diastolic: Option<i64>,
    #[arg(long)]
    heart_rate: Option<i64>,
    #[arg(long)]
    blood_sugar: Option<f64>,
    #[arg(long)]
    recorded_at: Option<String>,
}

impl MeasurementArgs {
    fn into_measurements(self) -> HealthMeasurements {
        HealthMeasurements {
            weight: self.weight,
            height: self.height,
            blood_pressure_systolic: self.systolic,
            blood_pressure_diastolic: self.diastolic,
            heart_rate: self.heart_rate,
            blood_sugar: self.blood_sugar,
            recorded_at: self.recorded_at,
        }
    }
}

#[derive(Args, Debug)]
struct AiCommand {
    #[command(subcommand)]
    command: AiSubcommand,
}

#[derive(Subcommand, Debug)]
enum AiSubcommand {
    /// Send a message to the assistant.
    Chat { message: String },
    /// List past conversations.
    History,
    /// Messages of one conversation.
    Messages { chat_id: i64 },
    DeleteChat { chat_id: i64 },
    /// Personalized health recommendations.
    Recommendations { user_id: i64 },
    /// Assistant-side analysis over a date window.
    Analyze {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
}

#[derive(Args, Debug)]
struct KnowledgeCommand {
    #[command(subcommand)]
    command: KnowledgeSubcommand,
}

#[derive(Subcommand, Debug)]
enum KnowledgeSubcommand {
    /// Browse published articles.
    Articles {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Read one article (also records reading history).
    Show { article_id: i64 },
    Favorite { article_id: i64 },
    Unfavorite { article_id: i64 },
    Favorites {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Recent reading history.
    History {
        #[arg(long, default_value_t = 30)]
        limit: u32,
    },
    /// Homepage recommendations (hot and latest articles).
    Home,
    /// Publish an article (admin).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        content: String,
        #[arg(long)]
        cover_image: Option<String>,
        #[arg(long)]
        tags: Vec<String>,
    },
    /// Edit an article (admin); omitted fields stay untouched.
    Update {
        article_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        cover_image: Option<String>,
        #[arg(long)]
        tags: Option<Vec<String>>,
    },
    /// Remove an article (admin).
    Delete { article_id: i64 },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    /// List user accounts.
    Users {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        keyword: Option<String>,
        /// `active` or `disabled`.
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    Show { user_id: i64 },
    /// Re-enable an account.
    Enable { user_id: i64 },
    /// Disable an account.
    Disable { user_id: i64 },
    /// Reset an account password to the initial one.
    ResetPassword { user_id: i64 },
}

struct AppContext {
    credentials: Credentials,
    navigator: Navigator,
    auth: AuthApi,
    health: HealthApi,
    ai: AiApi,
    knowledge: KnowledgeApi,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::new(cli.base_url)?;
    let snapshot_path = credentials_path(cli.credentials)?;

    let credentials = Credentials::new();
    if let Some(snapshot) = load_snapshot(&snapshot_path)? {
        credentials.restore(snapshot);
    }
    let mut events = credentials.subscribe();

    let location = Location::new();
    let navigator = Navigator::new(RouteTable::standard(), credentials.clone(), location.clone());
    let ctx = build_context(&config, &credentials, &location, navigator)?;

    let outcome = run(&ctx, cli.command).await;

    // Composition root's side of the expiry contract: every AuthExpired
    // event becomes a navigation to the right login page.
    while let Ok(SessionEvent::AuthExpired { slot, redirect }) = events.try_recv() {
        let settled = ctx.navigator.navigate(redirect)?;
        eprintln!("{slot} session expired; sign in again at {settled}");
    }

    save_snapshot(&snapshot_path, &ctx.credentials.snapshot())?;

    match outcome {
        Err(CliError::Client(ClientError::AuthExpired { slot })) => Err(CliError::SessionExpired { slot }),
        other => other,
    }
}

fn build_context(
    config: &Config,
    credentials: &Credentials,
    location: &Location,
    navigator: Navigator,
) -> Result<AppContext, ClientError> {
    let user_api = ApiClient::new(
        config,
        TokenPreference::UserThenAdmin,
        config::DEFAULT_TIMEOUT,
        credentials.clone(),
        location.clone(),
    )?;
    let admin_api = ApiClient::new(
        config,
        TokenPreference::AdminOnly,
        config::DEFAULT_TIMEOUT,
        credentials.clone(),
        location.clone(),
    )?;
    let ai_api = ApiClient::new(
        config,
        TokenPreference::UserThenAdmin,
        config::AI_TIMEOUT,
        credentials.clone(),
        location.clone(),
    )?;

    Ok(AppContext {
        credentials: credentials.clone(),
        navigator,
        auth: AuthApi::new(user_api.clone(), admin_api.clone()),
        health: HealthApi::new(user_api.clone()),
        ai: AiApi::new(ai_api),
        knowledge: KnowledgeApi::new(user_api, admin_api),
    })
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login(args) => run_login(ctx, args).await,
        Command::Register(args) => run_register(ctx, args).await,
        Command::Logout { admin, all } => run_logout(ctx, admin, all),
        Command::Me => {
            let page = if admin_session(ctx) { "/admin/settings" } else { "/dashboard/profile" };
            ensure_page(ctx, page)?;
            print_json(&ctx.auth.me().await?)
        }
        Command::Route { path } => run_route(ctx, &path),
        Command::Health(health) => run_health(ctx, health.command).await,
        Command::Ai(ai) => run_ai(ctx, ai.command).await,
        Command::Knowledge(knowledge) => run_knowledge(ctx, knowledge.command).await,
        Command::Admin(admin) => run_admin(ctx, admin.command).await,
    }
}

async fn run_login(ctx: &AppContext, args: LoginArgs) -> Result<(), CliError> {
    let entry = if args.admin { routes::ADMIN_LOGIN } else { routes::LOGIN };
    let settled = ctx.navigator.navigate(entry)?;
    if settled != entry {
        return Err(CliError::AlreadySignedIn(settled));
    }

    let grant = if args.admin {
        ctx.auth.admin_login(&args.username, &args.password).await?
    } else {
        ctx.auth.login(&args.username, &args.password).await?
    };

    let slot = if args.admin { Slot::Admin } else { Slot::User };
    let fallback = if args.admin { Role::Admin } else { Role::User };
    let role = grant.role.as_deref().map_or(fallback, Role::from_subject);
    ctx.credentials.set(slot, grant.access_token.clone(), role);
    if let Some(name) = &grant.username {
        ctx.credentials.set_display_name(slot, name);
    }

    let home = ctx.navigator.navigate(if args.admin { routes::ADMIN_HOME } else { routes::DASHBOARD })?;
    let name = grant.username.as_deref().unwrap_or(&args.username);
    println!("signed in as {name} ({role}); now at {home}");
    Ok(())
}

async fn run_register(ctx: &AppContext, args: RegisterArgs) -> Result<(), CliError> {
    let settled = ctx.navigator.navigate(routes::REGISTER)?;
    if settled != routes::REGISTER {
        return Err(CliError::AlreadySignedIn(settled));
    }
    let account = ctx
        .auth
        .register(&NewUser { username: args.username, email: args.email, password: args.password })
        .await?;
    print_json(&account)
}

fn run_logout(ctx: &AppContext, admin: bool, all: bool) -> Result<(), CliError> {
    if all {
        ctx.credentials.clear_all();
    } else if admin {
        ctx.credentials.clear(Slot::Admin);
    } else {
        ctx.credentials.clear(Slot::User);
    }
    let settled = ctx.navigator.navigate("/")?;
    println!("signed out; now at {settled}");
    Ok(())
}

fn run_route(ctx: &AppContext, path: &str) -> Result<(), CliError> {
    match ctx.navigator.check(path) {
        Decision::Admit => println!("admit {path}"),
        Decision::Redirect(next) => {
            let settled = ctx.navigator.navigate(path)?;
            println!("redirect {path} -> {next} (settles at {settled})");
        }
    }
    Ok(())
}

async fn run_health(ctx: &AppContext, command: HealthSubcommand) -> Result<(), CliError> {
    let page = if admin_session(ctx) { "/admin/health-data" } else { "/dashboard/health-data" };
    ensure_page(ctx, page)?;

    match command {
        HealthSubcommand::List { skip, limit, start_date, end_date } => {
            let query = HealthRecordQuery { skip, limit, start_date, end_date };
            print_json(&ctx.health.records(&query).await?)
        }
        HealthSubcommand::Create(measurements) => {
            print_json(&ctx.health.create_record(&measurements.into_measurements()).await?)
        }
        HealthSubcommand::Show { record_id } => print_json(&ctx.health.record(record_id).await?),
        HealthSubcommand::Update { record_id, measurements } => {
            print_json(&ctx.health.update_record(record_id, &measurements.into_measurements()).await?)
        }
        HealthSubcommand::Delete { record_id } => print_json(&ctx.health.delete_record(record_id).await?),
        HealthSubcommand::Summary => print_json(&ctx.health.summary().await?),
        HealthSubcommand::Analyze { start_date, end_date } => {
            let window = AnalysisWindow { start_date, end_date };
            print_json(&ctx.health.analyze(&window).await?)
        }
    }
}

async fn run_ai(ctx: &AppContext, command: AiSubcommand) -> Result<(), CliError> {
    let page = if admin_session(ctx) { "/admin/ai-chat" } else { "/dashboard/ai-chat" };
    ensure_page(ctx, page)?;

    match command {
        AiSubcommand::Chat { message } => {
            print_json(&ctx.ai.send_message(&ChatPrompt::new(message)).await?)
        }
        AiSubcommand::History => print_json(&ctx.ai.chat_history().await?),
        AiSubcommand::Messages { chat_id } => print_json(&ctx.ai.chat_messages(chat_id).await?),
        AiSubcommand::DeleteChat { chat_id } => print_json(&ctx.ai.delete_chat(chat_id).await?),
        AiSubcommand::Recommendations { user_id } => {
            print_json(&ctx.ai.recommendations(user_id).await?)
        }
        AiSubcommand::Analyze { start_date, end_date } => {
            let window = AnalysisWindow { start_date, end_date };
            print_json(&ctx.ai.analyze(&window).await?)
        }
    }
}

async fn run_knowledge(ctx: &AppContext, command: KnowledgeSubcommand) -> Result<(), CliError> {
    let admin = admin_session(ctx);
    let page = match &command {
        KnowledgeSubcommand::Create { .. }
        | KnowledgeSubcommand::Update { .. }
        | KnowledgeSubcommand::Delete { .. } => "/admin/articles".to_owned(),
        KnowledgeSubcommand::Show { article_id } if !admin => {
            format!("/dashboard/knowledge-center/article/{article_id}")
        }
        _ if admin => "/admin/articles".to_owned(),
        _ => "/dashboard/knowledge-center".to_owned(),
    };
    ensure_page(ctx, &page)?;

    match command {
        KnowledgeSubcommand::Articles { page, page_size, category, keyword } => {
            let query = ArticleQuery { page, page_size, category, keyword };
            print_json(&ctx.knowledge.articles(&query).await?)
        }
        KnowledgeSubcommand::Show { article_id } => print_json(&ctx.knowledge.article(article_id).await?),
        KnowledgeSubcommand::Favorite { article_id } => {
            print_json(&ctx.knowledge.favorite(article_id).await?)
        }
        KnowledgeSubcommand::Unfavorite { article_id } => {
            print_json(&ctx.knowledge.unfavorite(article_id).await?)
        }
        KnowledgeSubcommand::Favorites { page, page_size } => {
            let query = ArticleQuery { page, page_size, ..ArticleQuery::default() };
            print_json(&ctx.knowledge.favorites(&query).await?)
        }
        KnowledgeSubcommand::History { limit } => print_json(&ctx.knowledge.read_history(limit).await?),
        KnowledgeSubcommand::Home => print_json(&ctx.knowledge.home_recommendations().await?),
        KnowledgeSubcommand::Create { title, category, summary, content, cover_image, tags } => {
            let article = NewArticle { title, category, summary, content, cover_image, tags };
            print_json(&ctx.knowledge.create_article(&article).await?)
        }
        KnowledgeSubcommand::Update { article_id, title, category, summary, content, cover_image, tags } => {
            let patch = ArticlePatch { title, category, summary, content, cover_image, tags };
            print_json(&ctx.knowledge.update_article(article_id, &patch).await?)
        }
        KnowledgeSubcommand::Delete { article_id } => {
            print_json(&ctx.knowledge.delete_article(article_id).await?)
        }
    }
}

async fn run_admin(ctx: &AppContext, command: AdminSubcommand) -> Result<(), CliError> {
    ensure_page(ctx, "/admin/users")?;

    match command {
        AdminSubcommand::Users { page, page_size, keyword, status, role } => {
            let query = AdminUserQuery { page, page_size, keyword, status, role };
            print_json(&ctx.auth.admin_users(&query).await?)
        }
        AdminSubcommand::Show { user_id } => print_json(&ctx.auth.admin_user(user_id).await?),
        AdminSubcommand::Enable { user_id } => {
            print_json(&ctx.auth.set_admin_user_status(user_id, true).await?)
        }
        AdminSubcommand::Disable { user_id } => {
            print_json(&ctx.auth.set_admin_user_status(user_id, false).await?)
        }
        AdminSubcommand::ResetPassword { user_id } => {
            print_json(&ctx.auth.reset_admin_user_password(user_id).await?)
        }
    }
}

fn admin_session(ctx: &AppContext) -> bool {
    ctx.credentials.active_role() == Some(Role::Admin) && ctx.credentials.get(Slot::Admin).is_some()
}

/// Navigate to the page that hosts a command. Landing on a login page means
/// the guard refused the transition; the command never runs.
fn ensure_page(ctx: &AppContext, page: &str) -> Result<(), CliError> {
    let settled = ctx.navigator.navigate(page)?;
    if settled == routes::LOGIN || settled == routes::ADMIN_LOGIN {
        return Err(CliError::NotSignedIn(settled));
    }
    Ok(())
}

fn credentials_path(override_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = override_path {
        return Ok(path);
    }
    let base = dirs::config_dir().ok_or(CliError::NoConfigDir)?;
    Ok(base.join("vitalboard").join("credentials.json"))
}

fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, CliError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(error) => {
            // A corrupt snapshot is equivalent to being signed out.
            tracing::warn!(%error, path = %path.display(), "ignoring unreadable credential snapshot");
            Ok(None)
        }
    }
}

fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
