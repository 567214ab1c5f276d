use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use portal::actions;
use portal::api::{ApiClient, ApiError, ApiRequest, ApiResponse, HttpTransport, Method};
use portal::auth::{AuthContext, AuthError, Session};
use portal::claims;
use portal::config::PortalConfig;
use portal::customer::Customer;
use portal::notify::Notification;
use portal::store::{StoreError, TokenStore};
use portal::validation::{self, CustomerForm, Field, FieldErrors};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `customer-cli login` first")]
    NotSignedIn,
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{title}: {description}")]
    Request { title: String, description: String },
    #[error("customer {0} not found")]
    NotFound(i64),
    #[error("failed to write {path}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Notification::from_api_error(&err).into()
    }
}

impl From<AuthError> for CliError {
    fn from(err: AuthError) -> Self {
        Notification::from_auth_error(&err).into()
    }
}

impl From<Notification> for CliError {
    fn from(n: Notification) -> Self {
        Self::Request {
            title: n.title,
            description: n.description,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "customer-cli", about = "Customer management API client")]
struct Cli {
    /// REST backend origin. Falls back to `CUSTOMER_API_BASE_URL`, then
    /// `http://localhost:8080`.
    #[arg(long)]
    base_url: Option<String>,

    /// Where the access token is kept between invocations.
    #[arg(long, env = "CUSTOMER_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the issued token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CUSTOMER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register a new customer and sign in as them.
    Signup(ProfileArgs),
    /// Forget the stored token.
    Logout,
    /// Print the current session's claims.
    Whoami,
    Customers(CustomersCommand),
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    age: String,
    #[arg(long)]
    gender: String,
    #[arg(long, env = "CUSTOMER_PASSWORD", hide_env_values = true)]
    password: String,
}

impl ProfileArgs {
    fn into_form(self) -> CustomerForm {
        CustomerForm {
            name: self.name,
            email: self.email,
            age: self.age,
            gender: self.gender,
            password: self.password,
        }
    }
}

#[derive(Args, Debug)]
struct CustomersCommand {
    #[command(subcommand)]
    command: CustomersSubcommand,
}

#[derive(Subcommand, Debug)]
enum CustomersSubcommand {
    List,
    Get {
        id: i64,
    },
    Create(ProfileArgs),
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },
    Delete {
        id: i64,
    },
    /// Download the profile image.
    Image {
        id: i64,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the profile image URL.
    ImageUrl {
        id: i64,
    },
}

/// Plain `reqwest` transport for the shared API client.
struct ReqwestTransport {
    client: reqwest::Client,
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &request.url);
        if let Some(value) = request.authorization() {
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let authorization = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_vec();
        Ok(ApiResponse {
            status,
            authorization,
            body,
        })
    }
}

/// Token persisted as a single line in a file.
struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token)
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        Ok(self.write(token)?)
    }

    fn read(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_owned())
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to remove token"),
        }
    }
}

/// Environment config, with `--base-url` taking precedence.
fn resolve_config(base_url: Option<&str>) -> PortalConfig {
    let mut config = PortalConfig::from_env();
    if let Some(url) = base_url {
        config.api_base_url = PortalConfig::new(url).api_base_url;
    }
    config
}

/// `$HOME/.customer-portal/<token key>`, or a relative path without a home.
fn default_token_path(config: &PortalConfig) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".customer-portal").join(&config.token_key)
}

struct CliContext {
    api: ApiClient,
    auth: AuthContext,
}

impl CliContext {
    fn new(config: &PortalConfig, token_path: &Path) -> Result<Self, CliError> {
        let store: Rc<dyn TokenStore> = Rc::new(FileTokenStore::new(token_path.to_path_buf()));
        let transport = Rc::new(ReqwestTransport {
            client: reqwest::Client::builder().build()?,
        });
        let auth = AuthContext::new(Rc::clone(&store), Rc::new(claims::system_now));
        let api = ApiClient::new(config, transport, store);
        Ok(Self { api, auth })
    }

    /// Mirror of the route guard: customer commands need a live session.
    fn require_session(&self) -> Result<(), CliError> {
        match self.auth.check() {
            Session::Authenticated(_) => Ok(()),
            Session::Unauthenticated => Err(CliError::NotSignedIn),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.base_url.as_deref());
    let token_path = cli.token_file.unwrap_or_else(|| default_token_path(&config));
    let ctx = CliContext::new(&config, &token_path)?;
    tracing::debug!(base_url = %config.api_base_url, token_file = %token_path.display(), "starting");

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Signup(profile) => run_signup(&ctx, profile).await,
        Command::Logout => {
            ctx.auth.logout();
            println!("signed out");
            Ok(())
        }
        Command::Whoami => run_whoami(&ctx),
        Command::Customers(customers) => {
            ctx.require_session()?;
            run_customers(&ctx, customers.command).await
        }
    }
}

async fn run_login(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let credentials = validation::validate_login(email, password).map_err(invalid)?;
    let claims = ctx.auth.login(&ctx.api, &credentials).await?;
    tracing::info!(subject = %claims.subject, "signed in");
    println!("signed in as {}", claims.subject);
    Ok(())
}

async fn run_signup(ctx: &CliContext, profile: ProfileArgs) -> Result<(), CliError> {
    let registration = validation::validate_registration(&profile.into_form()).map_err(invalid)?;
    let claims = actions::sign_up(&ctx.api, &ctx.auth, &registration).await?;
    print_notification(&Notification::customer_saved(&registration.name));
    println!("signed in as {}", claims.subject);
    Ok(())
}

fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    let Session::Authenticated(claims) = ctx.auth.check() else {
        return Err(CliError::NotSignedIn);
    };
    print_json(&serde_json::json!({
        "subject": claims.subject,
        "roles": claims.roles,
        "issuedAt": claims.issued_at,
        "expiresAt": claims.expires_at,
    }))
}

async fn run_customers(ctx: &CliContext, command: CustomersSubcommand) -> Result<(), CliError> {
    match command {
        CustomersSubcommand::List => {
            let customers = ctx.api.list_customers().await?;
            print_customers(&customers)
        }
        CustomersSubcommand::Get { id } => {
            let customer = ctx.api.get_customer(id).await.map_err(not_found(id))?;
            print_json(&serde_json::to_value(customer)?)
        }
        CustomersSubcommand::Create(profile) => {
            let registration = validation::validate_registration(&profile.into_form()).map_err(invalid)?;
            let customers = actions::create_customer_and_refresh(&ctx.api, &registration).await?;
            print_notification(&Notification::customer_saved(&registration.name));
            print_customers(&customers)
        }
        CustomersSubcommand::Update {
            id,
            name,
            email,
            age,
            gender,
        } => {
            let existing = ctx.api.get_customer(id).await.map_err(not_found(id))?;
            let form = merge_update(&existing, name, email, age, gender);
            let update = validation::validate_update(&form).map_err(invalid)?;
            let customers = actions::update_customer_and_refresh(&ctx.api, id, &update).await?;
            print_notification(&Notification::customer_updated(&form.name));
            print_customers(&customers)
        }
        CustomersSubcommand::Delete { id } => {
            let customers = actions::delete_customer_and_refresh(&ctx.api, id)
                .await
                .map_err(not_found(id))?;
            print_notification(&Notification::customer_deleted(&format!("Customer {id}")));
            print_customers(&customers)
        }
        CustomersSubcommand::Image { id, output } => {
            let bytes = ctx.api.fetch_profile_image(id).await.map_err(not_found(id))?;
            fs::write(&output, &bytes).map_err(|source| CliError::WriteFile {
                path: output.clone(),
                source,
            })?;
            println!("wrote {} bytes to {}", bytes.len(), output.display());
            Ok(())
        }
        CustomersSubcommand::ImageUrl { id } => {
            println!("{}", ctx.api.profile_image_url(id));
            Ok(())
        }
    }
}

/// Report a 404 for `id` as a missing customer; other errors pass through.
fn not_found(id: i64) -> impl FnOnce(ApiError) -> CliError {
    move |err| {
        if err.status() == Some(404) {
            CliError::NotFound(id)
        } else {
            err.into()
        }
    }
}

/// Overlay the provided flags on the customer's current values.
fn merge_update(
    existing: &Customer,
    name: Option<String>,
    email: Option<String>,
    age: Option<String>,
    gender: Option<String>,
) -> CustomerForm {
    CustomerForm {
        name: name.unwrap_or_else(|| existing.name.clone()),
        email: email.unwrap_or_else(|| existing.email.clone()),
        age: age.unwrap_or_else(|| existing.age.to_string()),
        gender: gender.unwrap_or_else(|| existing.gender.as_str().to_owned()),
        password: String::new(),
    }
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Username | Field::Email => "email",
        Field::Password => "password",
        Field::Name => "name",
        Field::Age => "age",
        Field::Gender => "gender",
    }
}

/// `name: Required; age: Must be a number`
fn describe_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {message}", field_name(field)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn invalid(errors: FieldErrors) -> CliError {
    CliError::Invalid(describe_field_errors(&errors))
}

fn print_notification(n: &Notification) {
    eprintln!("{}: {}", n.title, n.description);
}

fn print_customers(customers: &[Customer]) -> Result<(), CliError> {
    print_json(&serde_json::to_value(customers)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
