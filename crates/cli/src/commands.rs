//! CLI commands

use anyhow::{Context, Result, bail};
use aula_core::academic::{FilterParams, ParticipationFilters};
use aula_core::{Credentials, FileStorage, RecordId, Role};
use aula_frontend_common::auth::get_user_friendly_error;
use aula_frontend_common::{GuardDecision, Route, SessionStore, guard, navigation_items};
use aula_http::{ApiGateway, ClientError};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::{self, CliConfig};

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (prompted for when omitted)
        #[arg(long, env = "AULA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// End the session and revoke its refresh token
    Logout,

    /// Show the stored session without contacting the server
    Whoami,

    /// Fetch the current user's profile from the server
    Profile,

    Students {
        #[command(subcommand)]
        command: StudentCommands,
    },

    Subjects {
        #[command(subcommand)]
        command: SubjectCommands,
    },

    Courses {
        #[command(subcommand)]
        command: ListCommand,
    },

    /// Grading periods
    Periods {
        #[command(subcommand)]
        command: ListCommand,
    },

    Grades {
        #[command(subcommand)]
        command: FilteredListCommand,
    },

    Attendance {
        #[command(subcommand)]
        command: FilteredListCommand,
    },

    Participations {
        #[command(subcommand)]
        command: FilteredListCommand,
    },

    Predictions {
        #[command(subcommand)]
        command: FilteredListCommand,
    },

    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },

    /// Summary dashboard; students get their own
    Dashboard {
        /// Show the dashboard of this student
        #[arg(long)]
        student: Option<RecordId>,
    },

    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum StudentCommands {
    List {
        /// Only students of this course
        #[arg(long)]
        course: Option<RecordId>,

        /// Only students in the current teacher's subjects
        #[arg(long, conflicts_with = "course")]
        mine: bool,
    },
    Show {
        id: RecordId,
    },
}

#[derive(Subcommand)]
pub enum SubjectCommands {
    List {
        /// Only subjects taught by the current teacher
        #[arg(long)]
        mine: bool,
    },
    Show {
        id: RecordId,
    },
}

#[derive(Subcommand)]
pub enum ListCommand {
    List,
}

#[derive(Subcommand)]
pub enum FilteredListCommand {
    List(RecordFilters),
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read {
        id: RecordId,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Grade statistics for one subject
    Subject {
        subject: RecordId,
        #[arg(long)]
        period: Option<RecordId>,
    },
    /// Term results of a course
    Term {
        course: RecordId,
        period: RecordId,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with the current settings
    Init {
        /// Output file path (defaults to <data-dir>/aula.toml)
        output: Option<PathBuf>,

        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RecordFilters {
    #[arg(long)]
    student: Option<RecordId>,
    #[arg(long)]
    subject: Option<RecordId>,
    #[arg(long)]
    course: Option<RecordId>,
    #[arg(long)]
    period: Option<RecordId>,
    #[arg(long)]
    page: Option<u32>,
}

impl From<RecordFilters> for FilterParams {
    fn from(filters: RecordFilters) -> Self {
        Self {
            student: filters.student,
            subject: filters.subject,
            course: filters.course,
            period: filters.period,
            page: filters.page,
            ..Self::default()
        }
    }
}

impl From<RecordFilters> for ParticipationFilters {
    fn from(filters: RecordFilters) -> Self {
        Self {
            student: filters.student,
            subject: filters.subject,
            course: filters.course,
            ..Self::default()
        }
    }
}

/// Everything a command needs once the session has been restored
struct App {
    store: SessionStore,
    gateway: ApiGateway,
    data_dir: PathBuf,
    config: CliConfig,
}

impl App {
    async fn open(data_dir: PathBuf, config: CliConfig) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(data_dir.join(config::SESSION_FILE_NAME)));
        let gateway = ApiGateway::builder()
            .base_url(&config.api_url)
            .storage(storage)
            .build()
            .context("Failed to create API client")?;
        let store = SessionStore::new(gateway.clone());
        store.bootstrap().await;
        Ok(Self {
            store,
            gateway,
            data_dir,
            config,
        })
    }

    /// Refuse commands the session may not run, like the route guard does
    fn authorize(&self, route: &Route) -> Result<()> {
        match guard(route, &self.store.state()) {
            GuardDecision::Render => Ok(()),
            GuardDecision::RedirectToLogin { .. } => {
                bail!("not logged in, run `aula login` first")
            }
            GuardDecision::Unauthorized => {
                let role = self
                    .store
                    .current_user()
                    .map(|user| user.role.to_string())
                    .unwrap_or_default();
                bail!("a {role} account may not open {}", route.path())
            }
        }
    }
}

/// Turn a client error into its user-facing text, keeping the cause
fn friendly<T>(result: Result<T, ClientError>) -> Result<T> {
    result.map_err(|err| {
        let message = get_user_friendly_error(&err);
        anyhow::Error::new(err).context(message)
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

impl Commands {
    pub async fn execute(self, data_dir: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
        let config_path = config_path.unwrap_or_else(|| data_dir.join(config::CONFIG_FILE_NAME));
        let config = CliConfig::load(&config_path)?;
        let app = App::open(data_dir, config).await?;

        match self {
            Commands::Login { username, password } => {
                let password = match password {
                    Some(password) => password,
                    None => prompt_password()?,
                };
                login(&app, Credentials::new(username, password)).await
            }
            Commands::Logout => {
                app.store.logout().await;
                println!("Logged out");
                Ok(())
            }
            Commands::Whoami => whoami(&app),
            Commands::Profile => {
                app.authorize(&Route::Dashboard)?;
                print_json(&friendly(app.store.reload_profile().await)?)
            }
            Commands::Students { command } => command.execute(&app).await,
            Commands::Subjects { command } => command.execute(&app).await,
            Commands::Courses {
                command: ListCommand::List,
            } => {
                app.authorize(&Route::Courses)?;
                print_json(&friendly(app.gateway.list_courses().await)?)
            }
            Commands::Periods {
                command: ListCommand::List,
            } => {
                app.authorize(&Route::Grades)?;
                print_json(&friendly(app.gateway.list_periods().await)?)
            }
            Commands::Grades {
                command: FilteredListCommand::List(filters),
            } => {
                app.authorize(&Route::Grades)?;
                let filters = FilterParams::from(filters);
                print_json(&friendly(app.gateway.list_grades(&filters).await)?)
            }
            Commands::Attendance {
                command: FilteredListCommand::List(filters),
            } => {
                app.authorize(&Route::Attendance)?;
                let filters = FilterParams::from(filters);
                print_json(&friendly(app.gateway.list_attendance(&filters).await)?)
            }
            Commands::Participations {
                command: FilteredListCommand::List(filters),
            } => {
                app.authorize(&Route::Participations)?;
                let filters = ParticipationFilters::from(filters);
                print_json(&friendly(app.gateway.list_participations(&filters).await)?)
            }
            Commands::Predictions {
                command: FilteredListCommand::List(filters),
            } => {
                app.authorize(&Route::Reports)?;
                let filters = FilterParams::from(filters);
                print_json(&friendly(app.gateway.list_predictions(&filters).await)?)
            }
            Commands::Notifications { command } => command.execute(&app).await,
            Commands::Dashboard { student } => dashboard(&app, student).await,
            Commands::Reports { command } => command.execute(&app).await,
            Commands::Config { command } => command.execute(&app),
        }
    }
}

async fn login(app: &App, credentials: Credentials) -> Result<()> {
    if app.store.login(&credentials).await {
        let state = app.store.state();
        if let Some(user) = state.current_user {
            println!("Logged in as {} ({})", user.display_name(), user.role);
            let pages: Vec<_> = navigation_items(user.role)
                .iter()
                .map(|item| item.title)
                .collect();
            println!("Available sections: {}", pages.join(", "));
        }
        Ok(())
    } else {
        let message = app
            .store
            .state()
            .last_error
            .unwrap_or_else(|| "login failed".to_string());
        bail!(message)
    }
}

fn whoami(app: &App) -> Result<()> {
    let state = app.store.state();
    match state.current_user {
        Some(user) if state.is_authenticated() => {
            println!(
                "{} <{}> as {} (id {})",
                user.display_name(),
                user.email,
                user.role,
                user.id
            );
            Ok(())
        }
        _ => bail!("not logged in"),
    }
}

async fn dashboard(app: &App, student: Option<RecordId>) -> Result<()> {
    app.authorize(&Route::Dashboard)?;
    let is_student = app
        .store
        .current_user()
        .is_some_and(|user| user.has_role(Role::Student));

    if let Some(id) = student {
        app.authorize(&Route::StudentDetail(id))?;
        return print_json(&friendly(app.gateway.student_dashboard(Some(id)).await)?);
    }
    if is_student {
        print_json(&friendly(app.gateway.student_dashboard(None).await)?)
    } else {
        print_json(&friendly(app.gateway.dashboard_general().await)?)
    }
}

impl StudentCommands {
    async fn execute(self, app: &App) -> Result<()> {
        match self {
            StudentCommands::List { course, mine } => {
                app.authorize(&Route::Students)?;
                let students = if mine {
                    app.gateway.list_teacher_students().await
                } else {
                    app.gateway.list_students(course).await
                };
                print_json(&friendly(students)?)
            }
            StudentCommands::Show { id } => {
                app.authorize(&Route::StudentDetail(id))?;
                print_json(&friendly(app.gateway.get_user(id).await)?)
            }
        }
    }
}

impl SubjectCommands {
    async fn execute(self, app: &App) -> Result<()> {
        app.authorize(&Route::Subjects)?;
        match self {
            SubjectCommands::List { mine } => {
                let subjects = if mine {
                    app.gateway.list_my_subjects().await
                } else {
                    app.gateway.list_subjects().await
                };
                print_json(&friendly(subjects)?)
            }
            SubjectCommands::Show { id } => {
                print_json(&friendly(app.gateway.get_subject(id).await)?)
            }
        }
    }
}

impl NotificationCommands {
    async fn execute(self, app: &App) -> Result<()> {
        app.authorize(&Route::Dashboard)?;
        match self {
            NotificationCommands::List { unread } => {
                let notifications = friendly(app.gateway.list_notifications().await)?;
                let notifications: Vec<_> = notifications
                    .into_items()
                    .into_iter()
                    .filter(|notification| !unread || notification.is_unread())
                    .collect();
                print_json(&notifications)
            }
            NotificationCommands::Read { id } => {
                print_json(&friendly(app.gateway.mark_notification_read(id).await)?)
            }
        }
    }
}

impl ReportCommands {
    async fn execute(self, app: &App) -> Result<()> {
        app.authorize(&Route::Reports)?;
        match self {
            ReportCommands::Subject { subject, period } => print_json(&friendly(
                app.gateway.subject_statistics(subject, period).await,
            )?),
            ReportCommands::Term { course, period } => {
                print_json(&friendly(app.gateway.term_report(course, period).await)?)
            }
        }
    }
}

impl ConfigCommands {
    fn execute(self, app: &App) -> Result<()> {
        match self {
            ConfigCommands::Init { output, force } => {
                let path = output.unwrap_or_else(|| app.data_dir.join(config::CONFIG_FILE_NAME));
                app.config.write(&path, force)?;
                info!(path = %path.display(), "Wrote configuration");
                println!("Generated configuration at: {}", path.display());
                Ok(())
            }
        }
    }
}
