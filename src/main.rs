//! Shortlist demo client.
//!
//! Loads configuration, restores or registers the device session and prints
//! the storefront and the user's search allowance.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shortlist::adapters::{ApiClient, FileCredentialStore, StaticEntitlementProvider};
use shortlist::application::{
    LoadStorefrontHandler, LoadStorefrontQuery, SearchAccess, SearchGate, SessionManager,
};
use shortlist::config::{AppConfig, LoggingConfig};
use shortlist::ports::RecommendationApi;

fn init_tracing(logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(logging.env_filter());
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Shortlist client failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let locale = config.locale.to_locale()?;

    let api: Arc<dyn RecommendationApi> = Arc::new(ApiClient::from_config(&config.api)?);
    let store = Arc::new(FileCredentialStore::new(&config.storage.credentials_path));
    let entitlements = Arc::new(StaticEntitlementProvider::new());

    tracing::info!(
        base_url = %config.api.resolved_base_url(),
        region = %locale.region,
        currency = %locale.currency,
        "Starting Shortlist client"
    );

    let sessions = SessionManager::new(Arc::clone(&api), store, locale.clone());
    let session = sessions.bootstrap().await?;
    tracing::info!(device_id = %session.device_id(), "Session ready");

    let storefront = LoadStorefrontHandler::new(Arc::clone(&api))
        .handle(LoadStorefrontQuery {
            currency: locale.currency.clone(),
        })
        .await?;

    for category in &storefront.categories {
        println!("{}", category.name);
        for subcategory in &category.subcategories {
            println!("  {} ({})", subcategory.name, subcategory.id);
        }
    }
    for plan in &storefront.plans {
        println!("Plan: {} - {}", plan.name, plan.price);
    }

    let gate = SearchGate::new(Arc::clone(&api), entitlements);
    let access = sessions.with_reauthentication(|| gate.check()).await?;
    match access {
        SearchAccess::Subscribed => println!("Subscription active"),
        SearchAccess::Free { remaining } => println!("{} free searches left", remaining),
        SearchAccess::UpgradeRequired => println!("Free searches used up, upgrade to continue"),
    }

    Ok(())
}
