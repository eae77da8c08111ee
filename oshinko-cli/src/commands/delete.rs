use crate::config::Config;
use crate::output::{self, OutputFormat};
use anyhow::{bail, Result};
use oshinko_core::kubernetes::client::K8sClient;
use oshinko_core::kubernetes::KubeClients;
use oshinko_core::{
    teardown, ClusterIdentity, Selector, TeardownContext, TeardownFailure, TeardownReport,
};
use std::time::Duration;
use tabled::Tabled;

/// Arguments of `oshinko delete`
#[derive(Debug, Clone)]
pub struct DeleteArgs {
    pub name: String,
    pub role: Option<String>,
    pub namespace: Option<String>,
    pub context: Option<String>,
    pub wait_attempts: Option<u32>,
    pub wait_interval_ms: Option<u64>,
}

#[derive(Tabled)]
struct FailureRow {
    phase: String,
    kind: String,
    object: String,
    cause: String,
}

impl From<&TeardownFailure> for FailureRow {
    fn from(f: &TeardownFailure) -> Self {
        Self {
            phase: f.phase.to_string(),
            kind: f.kind.to_string(),
            object: f.object.clone().unwrap_or_else(|| "-".to_string()),
            cause: f.cause.clone(),
        }
    }
}

pub async fn handle_delete_command(
    args: DeleteArgs,
    config: &Config,
    output_format: OutputFormat,
) -> Result<()> {
    let context = args.context.as_deref().or(config.context.as_deref());
    let client = match context {
        Some(context) => K8sClient::from_context(context).await?,
        None => K8sClient::infer().await?,
    };

    let namespace = args
        .namespace
        .clone()
        .or_else(|| config.namespace.clone())
        .unwrap_or_else(|| client.default_namespace().to_string());

    let mut policy = config.wait.policy();
    if let Some(attempts) = args.wait_attempts {
        policy.max_attempts = attempts;
    }
    if let Some(ms) = args.wait_interval_ms {
        policy.interval = Duration::from_millis(ms);
    }

    tracing::info!(
        cluster = %args.name,
        namespace = %namespace,
        api_server = client.api_server(),
        context = client.context().unwrap_or("current"),
        "deleting cluster"
    );

    let clients = KubeClients::new(client);
    let selector = Selector::for_cluster(&config.labels, &args.name, args.role.as_deref());
    let ctx = TeardownContext::new(
        ClusterIdentity::new(&args.name, &namespace),
        &config.labels,
        clients.templates,
        clients.controllers,
        clients.services,
    )
    .with_selector(selector)
    .with_wait_policy(policy);

    let report = teardown(ctx).await;
    render_report(&report, output_format)?;

    if !report.is_success() {
        bail!(incomplete_message(&report));
    }

    Ok(())
}

fn incomplete_message(report: &TeardownReport) -> String {
    format!(
        "cluster \"{}\" was not fully deleted: {}",
        report.cluster.name,
        report.summary()
    )
}

fn render_report(report: &TeardownReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if report.is_success() {
                output::print_success(&deleted_message(&report.cluster.name));
            } else {
                output::print_warning("Deletion may be incomplete:");
                output::print_table(report.failures.iter().map(FailureRow::from).collect());
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => output::print_single(report, format)?,
    }
    Ok(())
}

fn deleted_message(name: &str) -> String {
    format!("cluster \"{}\" deleted", name)
}
