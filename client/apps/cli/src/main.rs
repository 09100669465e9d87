//! Academic Records Client Entry Point
//!
//! Wires the session core to a file-backed credential store and the HTTP
//! transport, then runs one command. The session survives between runs in
//! the store file. Uses `anyhow` for top-level errors; core errors are
//! reported through `kernel::error::AppError`.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::application::sign_in::SignInUseCase;
use auth::application::sign_out::SignOutUseCase;
use auth::application::sign_up::{SignUpInput, SignUpUseCase};
use auth::domain::{
    LoginCredentials, Navigator, Registration, StudentRegistration, TeacherRegistration, View,
};
use auth::policy::Resource;
use auth::presentation::{AcademicApi, AuthApi};
use auth::{
    AuthError, ClientConfig, GuardDecision, ReqwestTransport, RequestGateway, RouteGuard,
    SessionManager, SlotCredentialStore,
};
use kernel::error::app_error::AppError;
use platform::storage::FileStore;

type Store = SlotCredentialStore<FileStore>;

/// Academic records client
#[derive(Parser, Debug)]
#[command(name = "academic")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Records server base URL (overrides ACADEMIC_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ACADEMIC_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Show the navigation entries for the current role
    Nav,

    /// Check whether a path may be opened
    Open {
        /// Client path, e.g. /students
        path: String,
    },

    /// Dashboard statistics (admin)
    Stats,

    /// List students
    Students {
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },

    /// List teachers (admin)
    Teachers {
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },

    /// List courses
    Courses {
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },

    /// List grades (own grades for students)
    Grades,

    /// Check server liveness
    Health,

    /// Register a student account
    RegisterStudent(StudentArgs),

    /// Register a teacher account
    RegisterTeacher(TeacherArgs),
}

#[derive(Args, Debug)]
struct AccountArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    full_name: String,
    #[arg(long, env = "ACADEMIC_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, env = "ACADEMIC_CONFIRM_PASSWORD", hide_env_values = true)]
    confirm_password: String,
}

#[derive(Args, Debug)]
struct StudentArgs {
    #[command(flatten)]
    account: AccountArgs,
    #[arg(long)]
    student_id: String,
    #[arg(long)]
    date_of_birth: String,
    #[arg(long)]
    enrollment_date: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

#[derive(Args, Debug)]
struct TeacherArgs {
    #[command(flatten)]
    account: AccountArgs,
    #[arg(long)]
    teacher_id: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    hire_date: String,
    #[arg(long)]
    specialization: Option<String>,
}

/// Navigator for a terminal: reports forced transitions to the user
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, view: View) {
        tracing::debug!(view = %view, "Navigate");
        if view == View::Login {
            eprintln!("-> {} (sign in to continue)", view.path());
        } else {
            eprintln!("-> {}", view.path());
        }
    }
}

/// Wired client core
struct Client {
    sessions: Arc<SessionManager<Store>>,
    navigator: Arc<TerminalNavigator>,
    auth_api: Arc<AuthApi<ReqwestTransport>>,
    api: AcademicApi<ReqwestTransport>,
}

impl Client {
    fn build(config: &ClientConfig) -> anyhow::Result<Self> {
        let slots = Arc::new(FileStore::open(&config.store_path));
        let store = Arc::new(SlotCredentialStore::from_config(slots, config));
        let sessions = Arc::new(SessionManager::new(store.clone()));
        let navigator = Arc::new(TerminalNavigator);

        let transport = ReqwestTransport::from_config(config).map_err(report)?;
        let gateway = Arc::new(RequestGateway::standard(
            transport,
            store,
            sessions.clone(),
            navigator.clone(),
        ));

        Ok(Self {
            sessions,
            navigator,
            auth_api: Arc::new(AuthApi::new(gateway.clone())),
            api: AcademicApi::new(gateway, config.page_size, config.verify_path.clone()),
        })
    }

    async fn hydrate(&self, config: &ClientConfig) {
        let phase = if config.verify_on_hydrate {
            self.sessions.hydrate_verified(&self.api).await
        } else {
            self.sessions.hydrate()
        };
        tracing::debug!(phase = %phase, "Session hydrated");
    }

    fn sign_in(&self) -> SignInUseCase<AuthApi<ReqwestTransport>, Store> {
        SignInUseCase::new(
            self.auth_api.clone(),
            self.sessions.clone(),
            self.navigator.clone(),
        )
    }

    fn sign_up(&self) -> SignUpUseCase<AuthApi<ReqwestTransport>> {
        SignUpUseCase::new(self.auth_api.clone(), self.navigator.clone())
    }
}

/// Convert a core error into a user-facing report
fn report(e: AuthError) -> anyhow::Error {
    let app: AppError = e.into();
    anyhow::anyhow!("{app}")
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn registration_input(account: AccountArgs, registration: Registration) -> SignUpInput {
    SignUpInput {
        registration,
        confirm_password: account.confirm_password,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "academic=info,auth=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    tracing::debug!(
        api_base_url = %config.api_base_url,
        timeout_ms = config.request_timeout_ms(),
        store = %config.store_path.display(),
        "Configuration loaded"
    );

    let client = Client::build(&config)?;
    client.hydrate(&config).await;

    match cli.command {
        Commands::Login { email, password } => {
            let identity = client
                .sign_in()
                .execute(LoginCredentials::new(email, password))
                .await
                .map_err(report)?;
            println!("{}", identity.greeting());
        }

        Commands::Logout => {
            let signout = SignOutUseCase::new(client.sessions.clone(), client.navigator.clone());
            if !signout.execute() {
                println!("Not signed in");
            }
        }

        Commands::Whoami => match client.sessions.identity() {
            Some(identity) => {
                println!("{}", identity.greeting());
                println!("email: {}", identity.email);
            }
            None => println!("Not signed in"),
        },

        Commands::Nav => {
            for entry in client.sessions.capabilities().navigation() {
                println!("{:<12} {}", entry.label, entry.view.path());
            }
        }

        Commands::Open { path } => {
            let session = client.sessions.snapshot();
            match RouteGuard::new().check_path(&session, &path) {
                None => anyhow::bail!("No such page: {path}"),
                Some((view, GuardDecision::Admit)) => println!("open {}", view.path()),
                Some((_, GuardDecision::Pending)) => println!("loading"),
                Some((view, decision)) => {
                    if let Some(target) = decision.target(view) {
                        client.navigator.navigate(target);
                    }
                }
            }
        }

        Commands::Stats => print_json(&client.api.dashboard_stats().await.map_err(report)?)?,

        Commands::Students { skip } => {
            print_json(&client.api.students(skip).await.map_err(report)?)?
        }

        Commands::Teachers { skip } => {
            print_json(&client.api.teachers(skip).await.map_err(report)?)?
        }

        Commands::Courses { skip } => {
            print_json(&client.api.courses(skip).await.map_err(report)?)?
        }

        Commands::Grades => {
            if !client.sessions.capabilities().can_read(Resource::OwnGrades) {
                anyhow::bail!("Only students have a grade listing");
            }
            print_json(&client.api.my_grades().await.map_err(report)?)?
        }

        Commands::Health => print_json(&client.api.health().await.map_err(report)?)?,

        Commands::RegisterStudent(args) => {
            let registration = Registration::Student(StudentRegistration {
                email: args.account.email.clone(),
                full_name: args.account.full_name.clone(),
                password: args.account.password.clone(),
                student_id: args.student_id,
                date_of_birth: args.date_of_birth,
                enrollment_date: args.enrollment_date,
                address: args.address,
                phone: args.phone,
            });
            client
                .sign_up()
                .execute(registration_input(args.account, registration))
                .await
                .map_err(report)?;
            println!("Registration successful! You can now login.");
        }

        Commands::RegisterTeacher(args) => {
            let registration = Registration::Teacher(TeacherRegistration {
                email: args.account.email.clone(),
                full_name: args.account.full_name.clone(),
                password: args.account.password.clone(),
                teacher_id: args.teacher_id,
                department: args.department,
                hire_date: args.hire_date,
                specialization: args.specialization,
            });
            client
                .sign_up()
                .execute(registration_input(args.account, registration))
                .await
                .map_err(report)?;
            println!("Registration successful! You can now login.");
        }
    }

    Ok(())
}
