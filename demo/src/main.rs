//! rolegate demo CLI
//!
//! Loads a TOML role configuration and answers permission and role checks
//! against it. Without `--config`, the bundled `config/roles.toml` is used.
//!
//! Usage:
//!   cargo run -p rolegate-demo -- check --permission read --identity alice --role editor
//!   cargo run -p rolegate-demo -- check --permission article.read
//!   cargo run -p rolegate-demo -- has-role --role viewer --assigned editor
//!   cargo run -p rolegate-demo -- scenario

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rolegate_audit::{AuditedAuthorizer, InMemoryAuditSink};
use rolegate_contracts::{
    error::RbacResult,
    identity::SimpleIdentity,
    permission::Permission,
};
use rolegate_provider::{build_role_service, RbacConfig, StaticIdentityProvider};

const BUNDLED_CONFIG: &str = include_str!("../config/roles.toml");

// ── CLI definition ────────────────────────────────────────────────────────────

/// rolegate: role-based access control checks from the command line.
#[derive(Parser)]
#[command(
    name = "rolegate-demo",
    about = "Permission checks against a rolegate TOML configuration"
)]
struct Cli {
    /// Path to an rbac TOML configuration. Defaults to the bundled sample.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether an identity (or an anonymous request) holds a permission.
    ///
    /// Exits with status 2 when the permission is denied.
    Check {
        #[arg(long)]
        permission: String,
        /// Identity id. Omit for an anonymous request.
        #[arg(long)]
        identity: Option<String>,
        /// Role assigned to the identity. Repeat for several roles.
        #[arg(long = "role", requires = "identity")]
        roles: Vec<String>,
    },
    /// Report whether a role is directly assigned (hierarchy is not consulted).
    HasRole {
        #[arg(long)]
        role: String,
        /// Roles assigned to the identity. Repeat for several roles.
        #[arg(long = "assigned")]
        assigned: Vec<String>,
    },
    /// Run the sample editor and guest scenarios against the bundled roles.
    Scenario,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every decision.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("rolegate error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> RbacResult<bool> {
    match cli.command {
        Command::Check {
            permission,
            identity,
            roles,
        } => {
            let config = load_config(cli.config.as_deref())?;
            run_check(&config, &permission, identity, roles)
        }
        Command::HasRole { role, assigned } => {
            let config = load_config(cli.config.as_deref())?;
            run_has_role(&config, &role, assigned)
        }
        // Always the bundled roles; --config is not read.
        Command::Scenario => run_scenario(),
    }
}

fn load_config(path: Option<&Path>) -> RbacResult<RbacConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading rbac config");
            RbacConfig::from_file(path)
        }
        None => RbacConfig::from_toml_str(BUNDLED_CONFIG),
    }
}

fn identity_provider(identity: Option<String>, roles: Vec<String>) -> StaticIdentityProvider {
    match identity {
        Some(id) => StaticIdentityProvider::authenticated(SimpleIdentity::new(id, roles)),
        None => StaticIdentityProvider::anonymous(),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_check(
    config: &RbacConfig,
    permission: &str,
    identity: Option<String>,
    roles: Vec<String>,
) -> RbacResult<bool> {
    let subject = identity.clone().unwrap_or_else(|| "anonymous".to_string());
    let service = build_role_service(config, Box::new(identity_provider(identity, roles)))?;

    let granted = service.is_granted(&Permission::new(permission))?;
    println!(
        "{} '{}' for {}",
        if granted { "GRANTED" } else { "DENIED" },
        permission,
        subject
    );
    Ok(granted)
}

fn run_has_role(config: &RbacConfig, role: &str, assigned: Vec<String>) -> RbacResult<bool> {
    let identity = SimpleIdentity::new("cli", assigned);
    let service = build_role_service(
        config,
        Box::new(StaticIdentityProvider::authenticated(identity.clone())),
    )?;

    let direct = service.has_role(&identity, role);
    let inherited = service.match_identity_roles(&[role])?;
    println!("directly assigned: {direct}");
    println!("reachable through hierarchy: {inherited}");
    Ok(direct)
}

fn run_scenario() -> RbacResult<bool> {
    let mut config = RbacConfig::from_toml_str(BUNDLED_CONFIG)?;

    println!();
    println!("Scenario 1: alice is assigned [editor]; editor inherits from viewer");
    let alice = SimpleIdentity::new("alice", ["editor"]);
    let sink = Arc::new(InMemoryAuditSink::new("scenario"));
    let authorizer = AuditedAuthorizer::new(
        build_role_service(&config, Box::new(StaticIdentityProvider::authenticated(alice)))?,
        sink.clone(),
    );
    for permission in ["read", "write", "delete"] {
        let granted = authorizer.is_granted(&Permission::new(permission))?;
        println!("  is_granted({permission:?}) -> {granted}");
    }

    println!();
    println!("Scenario 2: anonymous request, guest role = viewer");
    config.guest_role = Some("viewer".to_string());
    let authorizer = AuditedAuthorizer::new(
        build_role_service(&config, Box::new(StaticIdentityProvider::anonymous()))?,
        sink.clone(),
    );
    for permission in ["read", "write"] {
        let granted = authorizer.is_granted(&Permission::new(permission))?;
        println!("  is_granted({permission:?}) -> {granted}");
    }

    println!();
    println!("Audit: {} decisions recorded", sink.len()?);
    for record in sink.denials()? {
        println!("  denied {} to {}", record.permission, record.subject());
    }
    println!();
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
