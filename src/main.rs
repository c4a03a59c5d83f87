//! `devicedesk` command-line entry point.
//!
//! Each invocation is one short-lived session: resolve config, restore the
//! stored token, run one command through the [`Driver`] until no request is
//! in flight, print the resulting view and exit.
//!
//! # Configuration Priority
//!
//! defaults < `config.toml` < `DEVICEDESK_*` environment < command-line flags

#![allow(clippy::multiple_crate_versions)]

mod args;

use crate::args::{
    ApplicationAction, ClientAction, Command, CreateOperationalArgs, DeviceDeskArgs, ListArgs, LoginArgs,
    OperationalAction,
};
use anyhow::{bail, Context};
use clap::Parser;
use devicedesk::api::{AdminApi, HttpAdminClient, InvoiceDocument};
use devicedesk::app::{StatusChoice, ViewKind};
use devicedesk::auth::{AuthContext, JsonSessionStore, SessionStore};
use devicedesk::domain::{AuthSession, DeviceDeskError, LoginRequest, RegisterOperationalRequest};
use devicedesk::infrastructure::paths;
use devicedesk::ui::renderer;
use devicedesk::{initialize, observability, Config, Driver, Event};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = DeviceDeskArgs::parse();

    let config = load_config(&args)?;
    observability::init_tracing(&config, args.verbose);
    tracing::info!(api_url = %config.api_url, "devicedesk starting");

    let mut store = JsonSessionStore::new(paths::get_session_file())?;
    let session = store.load()?;
    let auth = AuthContext::with_token(session.as_ref().map(|s| s.token.clone()));
    let api = Arc::new(HttpAdminClient::create(&config.http_config(), auth.clone())?);

    match args.command {
        Command::Login(login) => sign_in(api.as_ref(), &auth, &mut store, login).await,
        Command::Logout => {
            store.clear()?;
            auth.clear();
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            match session {
                Some(session) => println!(
                    "{} ({}) since {}",
                    session.email,
                    session.role.as_deref().unwrap_or("no role"),
                    session.signed_in_at.to_rfc3339()
                ),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        command => {
            if !auth.is_authenticated() {
                bail!(DeviceDeskError::Unauthenticated.user_message());
            }
            let driver = Driver::new(api.clone(), initialize(&config));
            run_view_command(driver, api.as_ref(), command).await
        }
    }
}

fn load_config(args: &DeviceDeskArgs) -> anyhow::Result<Config> {
    let path = args
        .config
        .as_ref()
        .map_or_else(paths::get_config_file, |p| paths::expand_tilde(&p.to_string_lossy()));
    let mut config = Config::load(&path).with_context(|| format!("loading {}", path.display()))?;
    if let Some(api_url) = &args.api_url {
        config.api_url.clone_from(api_url);
    }
    if let Some(page_size) = args.page_size.filter(|n| *n > 0) {
        config.page_size = page_size;
    }
    Ok(config)
}

async fn sign_in(
    api: &HttpAdminClient,
    auth: &AuthContext,
    store: &mut JsonSessionStore,
    login: LoginArgs,
) -> anyhow::Result<()> {
    let request = LoginRequest {
        email: login.email.clone(),
        password: login.password,
    };
    let response = api.login(&request).await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let session = AuthSession::from_login(&login.email, response);
    auth.set(session.token.clone());
    store.save(&session)?;
    println!("Signed in as {}", session.email);
    Ok(())
}

async fn run_view_command<A: AdminApi + ?Sized + 'static>(
    mut driver: Driver<A>,
    api: &A,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Dashboard => show_view(&mut driver, ViewKind::Dashboard).await,
        Command::Stats { kind } => {
            driver.dispatch(&Event::SetStatisticsKind(kind))?;
            show_view(&mut driver, ViewKind::Statistics).await
        }
        Command::Users { query, list } => {
            if let Some(query) = query {
                driver.dispatch(&Event::SubmitSearch {
                    view: ViewKind::AllUsers,
                    input: query,
                })?;
            }
            show_list(&mut driver, ViewKind::AllUsers, &list).await
        }
        Command::Search { query, list } => {
            driver.dispatch(&Event::SubmitSearch {
                view: ViewKind::Search,
                input: query,
            })?;
            show_list(&mut driver, ViewKind::Search, &list).await
        }
        Command::Clients(action) => match action {
            ClientAction::List(list) => show_list(&mut driver, ViewKind::ClientUsers, &list).await,
            ClientAction::Show { id } => {
                let user = api.client_user(&id).await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("{}", renderer::render_client_user(&user));
                Ok(())
            }
            ClientAction::SetStatus { id, status, notes } => {
                set_status(
                    &mut driver,
                    ViewKind::ClientUsers,
                    id,
                    StatusChoice::Registration(status),
                    notes,
                )
                .await
            }
            ClientAction::Invoice { id, output, inline } => {
                let info = api.invoice_info(&id).await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("{}", renderer::render_invoice(&info));
                if let Some(output) = output {
                    let document = if inline { InvoiceDocument::View } else { InvoiceDocument::Download };
                    let bytes = api
                        .invoice_document(&id, document)
                        .await
                        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                    std::fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
                    println!("Saved {} bytes to {}", bytes.len(), output.display());
                }
                Ok(())
            }
        },
        Command::Operational(action) => match action {
            OperationalAction::List(list) => show_list(&mut driver, ViewKind::OperationalUsers, &list).await,
            OperationalAction::Show { id } => {
                let user = api
                    .operational_user(&id)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("{}", renderer::render_operational_user(&user));
                Ok(())
            }
            OperationalAction::Create(create) => create_operational(&mut driver, api, create).await,
        },
        Command::Applications(action) => match action {
            ApplicationAction::List(list) => show_list(&mut driver, ViewKind::Applications, &list).await,
            ApplicationAction::Stats => show_view(&mut driver, ViewKind::ApplicationStats).await,
            ApplicationAction::SetStatus { id, status, reason } => {
                set_status(
                    &mut driver,
                    ViewKind::Applications,
                    id,
                    StatusChoice::Application(status),
                    reason,
                )
                .await
            }
        },
        Command::Login(_) | Command::Logout | Command::Whoami => Ok(()),
    }
}

async fn show_view<A: AdminApi + ?Sized + 'static>(driver: &mut Driver<A>, view: ViewKind) -> anyhow::Result<()> {
    driver.run(&Event::Mount(view)).await?;
    println!("{}", renderer::render(driver.state(), view));
    Ok(())
}

async fn show_list<A: AdminApi + ?Sized + 'static>(
    driver: &mut Driver<A>,
    view: ViewKind,
    list: &ListArgs,
) -> anyhow::Result<()> {
    driver.run(&Event::Mount(view)).await?;
    apply_list_args(driver, view, list)?;
    println!("{}", renderer::render(driver.state(), view));
    Ok(())
}

fn apply_list_args<A: AdminApi + ?Sized + 'static>(
    driver: &mut Driver<A>,
    view: ViewKind,
    list: &ListArgs,
) -> anyhow::Result<()> {
    if let Some(term) = &list.search {
        driver.dispatch(&Event::SetSearchTerm {
            view,
            term: term.clone(),
        })?;
    }
    if list.status.is_some() {
        driver.dispatch(&Event::SetStatusFilter {
            view,
            status: list.status.clone(),
        })?;
    }
    if list.region.is_some() {
        driver.dispatch(&Event::SetRegionFilter {
            view,
            region: list.region.clone(),
        })?;
    }
    if list.user_type.is_some() {
        driver.dispatch(&Event::SetUserTypeFilter {
            view,
            user_type: list.user_type.clone(),
        })?;
    }
    if list.page > 1 {
        driver.dispatch(&Event::GoToPage {
            view,
            page_index: list.page - 1,
        })?;
    }
    Ok(())
}

/// Opens the status dialog on `id`, submits, and waits for the write and the
/// reload that follows it.
async fn set_status<A: AdminApi + ?Sized + 'static>(
    driver: &mut Driver<A>,
    view: ViewKind,
    id: String,
    choice: StatusChoice,
    reason: Option<String>,
) -> anyhow::Result<()> {
    driver.run(&Event::Mount(view)).await?;
    if let Some(error) = driver.state().error(view) {
        bail!("{error}");
    }
    driver.dispatch(&Event::OpenStatusDialog { view, id: id.clone() })?;
    if driver.state().dialog.is_none() {
        bail!("{}", driver.state().error(view).unwrap_or("Record not found"));
    }

    driver.run(&Event::SubmitStatusUpdate { choice, reason }).await?;
    if let Some(dialog) = &driver.state().dialog {
        bail!("{}", dialog.error.as_deref().unwrap_or("Status update did not complete"));
    }
    println!("Updated {id}");
    println!("{}", renderer::render(driver.state(), view));
    Ok(())
}

async fn create_operational<A: AdminApi + ?Sized + 'static>(
    driver: &mut Driver<A>,
    api: &A,
    create: CreateOperationalArgs,
) -> anyhow::Result<()> {
    let request = RegisterOperationalRequest {
        first_name: create.first_name,
        last_name: create.last_name,
        email: create.email,
        phone: create.phone,
        role: create.role,
        password: create.password,
    };
    request.validate().map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let ack = api
        .register_operational(&request)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("{}", ack.message.as_deref().unwrap_or("Operational user created"));
    show_view(driver, ViewKind::OperationalUsers).await
}
