mod app;
mod event;
mod theme;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::info;

use app::App;
use cargoops_console::AppShell;
use cargoops_core::{MenuTree, RoleAllowList, Session};
use cargoops_infrastructure::HttpWarehouseRepository;
use cargoops_shared::config::AppConfig;
use cargoops_shared::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "cargoops-console")]
#[command(about = "Terminal console for CargoOps warehouse operations")]
struct Cli {
    /// Directory holding default.toml and {APP_ENV}.toml
    #[arg(short, long, env = "CARGOOPS_CONFIG_DIR", default_value = "config")]
    config: String,

    /// Role to sign in with (overrides [session].role)
    #[arg(long, env = "CARGOOPS_ROLE")]
    role: Option<String>,

    #[arg(long, env = "CARGOOPS_EMPLOYEE_ID")]
    employee_id: Option<String>,

    /// API credential sent with every request
    #[arg(long, env = "CARGOOPS_CREDENTIAL", hide_env_values = true)]
    credential: Option<String>,

    /// Initial path, e.g. /binning/assign
    #[arg(short, long, env = "CARGOOPS_PATH", default_value = "/")]
    path: String,

    /// Write JSON logs here instead of stderr
    #[arg(long, env = "CARGOOPS_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config).context("Failed to load configuration")?;
    if let Some(role) = cli.role {
        config.session.role = role;
    }
    if let Some(employee_id) = cli.employee_id {
        config.session.employee_id = employee_id;
    }
    if let Some(credential) = cli.credential {
        config.session.credential = credential;
    }
    if config.session.role.trim().is_empty() || config.session.employee_id.trim().is_empty() {
        anyhow::bail!("A role and an employee id are required to sign in (--role, --employee-id)");
    }

    let log_dir = cli.log_dir.or_else(|| config.log.dir.clone());
    let _guard = init_telemetry(&config.log.filter, log_dir.as_deref())?;
    info!(app = %config.app.name, env = %config.app.env, "Starting console");

    let tree = Arc::new(MenuTree::warehouse()?);
    let allow = Arc::new(RoleAllowList::builtin(&tree).with_overrides(&tree, &config.roles));

    let session = Session::new(
        config.session.role.trim(),
        config.session.employee_id.trim(),
        config.session.credential.as_str(),
    );
    let repository = HttpWarehouseRepository::new(&config.api, session.clone())?;

    let mut shell = AppShell::sign_in(session, tree, allow, Arc::new(repository));
    shell.navigate_path(&cli.path);

    start_tui(shell).await
}

async fn start_tui(shell: AppShell) -> anyhow::Result<()> {
    let terminal = ratatui::init();
    let result = run_app(terminal, App::new(shell)).await;
    ratatui::restore();

    let app = result?;
    app.shell.sign_out();
    Ok(())
}

async fn run_app(mut terminal: DefaultTerminal, mut app: App) -> anyhow::Result<App> {
    loop {
        app.shell.process_events();
        app.sync_selection();

        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.should_quit {
            break;
        }

        // 100ms poll keeps fetch results flowing while idle
        if let Some(evt) = event::poll_event(100)? {
            event::handle_event(&mut app, evt);
        }
        tokio::task::yield_now().await;
    }
    Ok(app)
}
