mod assessment;
mod auth;
mod clock;
mod config;
mod cover_letter;
mod dispatch;
mod errors;
mod industry;
mod keys;
mod llm_client;
mod resume;
mod state;
mod store;
#[cfg(test)]
mod test_support;
mod user;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dispatch::event::InboundEvent;
use crate::dispatch::{dispatch, envelope::ResponseEnvelope};
use crate::llm_client::LlmClient;
use crate::state::AppState;
use crate::store::DynamoTable;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // The Lambda host timestamps every log line already.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    info!("Starting coach API v{}", env!("CARGO_PKG_VERSION"));

    let dynamo = build_dynamo_client(&config).await;
    info!("DynamoDB client initialized (table: {})", config.table.table_name);

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = Arc::new(AppState::new(
        &config.table,
        Arc::new(DynamoTable::new(dynamo)),
        Arc::new(llm),
        config.modules.clone(),
    )?);
    info!(
        "Serving modules: {}",
        config
            .modules
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    run(service_fn(|event: LambdaEvent<InboundEvent>| {
        let state = Arc::clone(&state);
        async move {
            let envelope: ResponseEnvelope = dispatch(&state, &event.payload).await;
            Ok::<_, lambda_runtime::Error>(envelope)
        }
    }))
    .await
    .map_err(|e| anyhow!(e))
}

/// DynamoDB client from the ambient AWS environment, optionally pointed at a local endpoint.
async fn build_dynamo_client(config: &Config) -> aws_sdk_dynamodb::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(endpoint) = &config.aws_endpoint_url {
        info!("Using DynamoDB endpoint override {endpoint}");
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;
    aws_sdk_dynamodb::Client::new(&sdk_config)
}
