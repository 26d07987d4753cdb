use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, StorageBackend};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use users_admin::contract::{
    DashboardStats, FilterCriteria, NewUser, Role, User, UserPatch, UserStatus, UsersAdminError,
    UsersPage,
};
use users_admin::domain::permissions::RoleCatalog;
use users_admin::domain::ports::{Notice, NoticeLevel, Notifier};
use users_admin::domain::view::UsersView;
use users_admin::infra::auth::DemoAuthenticator;
use users_admin::infra::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use users_admin::{UsersAdmin, UsersAdminConfig, UsersAdminDeps};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Users administration console
#[derive(Parser)]
#[command(name = "admin-console")]
#[command(about = "Users administration console: manage users, roles and sessions")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Keep all state in memory for this invocation
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration and storage
    Check,
    /// Sign in with a demo account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List roles and their permissions
    Roles,
    /// Show dashboard statistics
    Stats,
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand)]
enum UsersCommand {
    /// List users, filtered and paginated
    List(ListArgs),
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "active")]
        status: UserStatus,
    },
    /// Update fields of a user
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        status: Option<UserStatus>,
    },
    /// Delete a user
    Delete { id: String },
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive match on name or email
    #[arg(long, default_value = "")]
    search: String,
    /// active, inactive or all
    #[arg(long, default_value = "all")]
    status: String,
    /// Role id or all
    #[arg(long, default_value = "all")]
    role: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    page_size: Option<usize>,
}

/// Prints notices the way toasts would show them: successes and infos on
/// stdout, errors on stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("[ok] {}", notice.message),
            NoticeLevel::Info => println!("[info] {}", notice.message),
            NoticeLevel::Error => eprintln!("[error] {}", notice.message),
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        memory: cli.memory,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(
        &logging_config,
        Path::new(&config.console.home_dir),
    );
    tracing::info!("admin-console starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let admin = init_users_admin(&config)?;
    let notifier = ConsoleNotifier;

    match execute(cli.command.unwrap_or(Commands::Check), &config, &admin, &notifier) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<UsersAdminError>() {
            Some(user_facing) => {
                tracing::debug!("command failed: {}", user_facing);
                notifier.notify(Notice::error(user_facing.to_string()));
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}

fn open_storage(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(MemoryKeyValueStore::new()))
        }
        StorageBackend::File => {
            let dir = config.storage_dir();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("cannot create storage dir {}", dir.display()))?;
            tracing::info!("Using file storage at {}", dir.display());
            Ok(Arc::new(FileKeyValueStore::new(dir)))
        }
    }
}

fn init_users_admin(config: &AppConfig) -> Result<UsersAdmin> {
    let module_config = UsersAdminConfig {
        default_page_size: config.users.default_page_size,
        max_page_size: config.users.max_page_size,
        users_key: config.storage.users_key.clone(),
        session_key: config.storage.session_key.clone(),
    };
    UsersAdmin::init(module_config, open_storage(config)?, UsersAdminDeps::default())
}

fn execute(
    command: Commands,
    config: &AppConfig,
    admin: &UsersAdmin,
    notifier: &dyn Notifier,
) -> Result<()> {
    match command {
        Commands::Check => check_config(config, admin),
        Commands::Login { email, password } => login(admin, notifier, &email, &password),
        Commands::Logout => {
            admin.logout()?;
            notifier.notify(Notice::success("Signed out"));
            Ok(())
        }
        Commands::Whoami => {
            match admin.session().current() {
                Some(me) => println!("{} <{}> role={} id={}", me.name, me.email, me.role.id, me.id),
                None => notifier.notify(Notice::info("Not signed in")),
            }
            Ok(())
        }
        Commands::Roles => {
            print_roles(admin.roles());
            Ok(())
        }
        Commands::Stats => {
            print_stats(&admin.client().stats());
            Ok(())
        }
        Commands::Users(cmd) => run_users_command(cmd, admin, notifier),
    }
}

fn check_config(config: &AppConfig, admin: &UsersAdmin) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration check passed");
    println!("home_dir: {}", config.console.home_dir);
    match config.storage.backend {
        StorageBackend::File => println!("storage: file ({})", config.storage_dir().display()),
        StorageBackend::Memory => println!("storage: memory"),
    }
    println!("users: {}", admin.client().list_users().len());
    Ok(())
}

fn login(admin: &UsersAdmin, notifier: &dyn Notifier, email: &str, password: &str) -> Result<()> {
    let authenticator = DemoAuthenticator::new(admin.roles());
    match admin.login(&authenticator, email, password)? {
        Some(me) => {
            notifier.notify(Notice::success(format!(
                "Signed in as {} ({})",
                me.name, me.role.name
            )));
            Ok(())
        }
        None => Err(UsersAdminError::validation("email", "Invalid email or password").into()),
    }
}

fn run_users_command(cmd: UsersCommand, admin: &UsersAdmin, notifier: &dyn Notifier) -> Result<()> {
    let client = admin.client();
    match cmd {
        UsersCommand::List(list) => {
            let page = list_users(admin, list)?;
            print_page(&page);
        }
        UsersCommand::Create {
            name,
            email,
            role,
            status,
        } => {
            let role = lookup_role(admin.roles(), &role)?;
            let created = client.create_user(NewUser {
                name,
                email,
                role,
                status,
                last_login: None,
            })?;
            notifier.notify(Notice::success(format!(
                "User {} created successfully (id {})",
                created.name, created.id
            )));
        }
        UsersCommand::Update {
            id,
            name,
            email,
            role,
            status,
        } => {
            let role = role.map(|r| lookup_role(admin.roles(), &r)).transpose()?;
            let patch = UserPatch {
                name,
                email,
                role,
                status,
                last_login: None,
            };
            if patch.is_empty() {
                notifier.notify(Notice::info("Nothing to update"));
                return Ok(());
            }
            let updated = client.update_user(&id, patch)?;
            notifier.notify(Notice::success(format!(
                "User {} updated successfully",
                updated.name
            )));
        }
        UsersCommand::Delete { id } => {
            client.delete_user(&id)?;
            notifier.notify(Notice::success(format!("User {} deleted successfully", id)));
        }
    }
    Ok(())
}

fn list_users(admin: &UsersAdmin, list: ListArgs) -> Result<UsersPage> {
    let cfg = admin.config();
    let status = FilterCriteria::parse_status(&list.status)
        .map_err(|e| UsersAdminError::validation("status", e.to_string()))?;

    let mut view = UsersView::new(cfg.default_page_size);
    view.set_search_term(list.search);
    view.set_status_filter(status);
    view.set_role_filter(FilterCriteria::parse_role(&list.role));
    if let Some(size) = list.page_size {
        view.set_page_size(size.min(cfg.max_page_size));
    }
    view.set_page(list.page);

    Ok(view.recompute(&admin.client().list_users()))
}

fn lookup_role(catalog: &RoleCatalog, role_id: &str) -> Result<Role> {
    catalog
        .get(role_id.trim())
        .cloned()
        .ok_or_else(|| UsersAdminError::validation("role", format!("Unknown role '{}'", role_id)).into())
}

fn print_roles(catalog: &RoleCatalog) {
    for role in catalog.all() {
        let perms: Vec<&str> = role.permissions.iter().map(|p| p.id.as_str()).collect();
        println!("{:<8} {:<14} {}", role.id, role.name, perms.join(", "));
    }
}

fn print_stats(stats: &DashboardStats) {
    println!("Total users:    {}", stats.total_users);
    println!("Active users:   {}", stats.active_users);
    println!("Inactive users: {}", stats.inactive_users);
    println!("Admins:         {}", stats.admin_users);
    println!();
    println!("By role:");
    for rc in &stats.role_distribution {
        println!("  {:<14} {}", rc.role_name, rc.count);
    }
    println!();
    println!("Recent users:");
    for u in &stats.recent_users {
        println!("  {}", format_user(u));
    }
}

fn format_user(u: &User) -> String {
    let last_login = u
        .last_login
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "{:<6} {:<20} {:<30} {:<8} {:<8} {} {}",
        u.id,
        u.name,
        u.email,
        u.role.id,
        u.status,
        u.created_at.format("%Y-%m-%d"),
        last_login
    )
}

fn print_page(page: &UsersPage) {
    if page.items.is_empty() {
        println!("No users found.");
    }
    for u in &page.items {
        println!("{}", format_user(u));
    }
    println!(
        "Page {} of {} ({} users)",
        page.page,
        page.total_pages.max(1),
        page.total
    );
}
