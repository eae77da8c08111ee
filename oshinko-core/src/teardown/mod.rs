//! Cluster teardown workflow
//!
//! Removes every object labelled with a cluster's name:
//! 1. enumerate deployment configs, replication controllers and services
//! 2. delete the deployment configs so nothing scales the controllers back up
//! 3. scale the replication controllers to zero
//! 4. wait (bounded) for their pods to drain
//! 5. delete the replication controllers, then the services
//!
//! No step aborts the workflow. Every failure is recorded in the returned
//! [`TeardownReport`] and the remaining objects are still processed, so a
//! rerun on a half-deleted cluster picks up whatever is left.

pub mod delete;
pub mod enumerate;
pub mod scale;
pub mod wait;

use oshinko_common::{ClusterIdentity, TeardownReport};
use tracing::{info, info_span, Instrument};

use crate::kubernetes::resources::{ResourceClient, ScalableController};
use crate::kubernetes::selector::{Selector, SelectorLabels};

pub use delete::delete_all;
pub use enumerate::enumerate;
pub use scale::scale_down;
pub use wait::{wait_for_all, wait_for_replicas, Backoff, WaitOutcome, WaitPolicy};

/// Everything one teardown call needs, passed by value
pub struct TeardownContext<T, C, S> {
    pub cluster: ClusterIdentity,
    pub selector: Selector,
    /// Deployment templates
    pub templates: T,
    /// Scalable controllers
    pub controllers: C,
    /// Network endpoints
    pub services: S,
    pub wait_policy: WaitPolicy,
}

impl<T, C, S> TeardownContext<T, C, S> {
    /// Context selecting every object of `cluster` by its name label
    pub fn new(
        cluster: ClusterIdentity,
        labels: &SelectorLabels,
        templates: T,
        controllers: C,
        services: S,
    ) -> Self {
        let selector = Selector::for_cluster(labels, &cluster.name, None);
        Self {
            cluster,
            selector,
            templates,
            controllers,
            services,
            wait_policy: WaitPolicy::default(),
        }
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_wait_policy(mut self, policy: WaitPolicy) -> Self {
        self.wait_policy = policy;
        self
    }
}

/// Tear down one cluster, collecting every failure
pub async fn teardown<T, C, S>(ctx: TeardownContext<T, C, S>) -> TeardownReport
where
    T: ResourceClient,
    C: ResourceClient,
    C::Object: ScalableController,
    S: ResourceClient,
{
    let span = info_span!(
        "teardown",
        cluster = %ctx.cluster.name,
        namespace = %ctx.cluster.namespace
    );

    run(ctx).instrument(span).await
}

async fn run<T, C, S>(ctx: TeardownContext<T, C, S>) -> TeardownReport
where
    T: ResourceClient,
    C: ResourceClient,
    C::Object: ScalableController,
    S: ResourceClient,
{
    let TeardownContext {
        cluster,
        selector,
        templates,
        controllers,
        services,
        wait_policy,
    } = ctx;

    let namespace = cluster.namespace.clone();
    let mut report = TeardownReport::new(cluster);

    info!(selector = %selector, "tearing down cluster");

    let template_objects = enumerate(&templates, &namespace, &selector, &mut report).await;
    let controller_objects = enumerate(&controllers, &namespace, &selector, &mut report).await;
    let service_objects = enumerate(&services, &namespace, &selector, &mut report).await;

    if template_objects.is_empty() && controller_objects.is_empty() && service_objects.is_empty() {
        info!("no objects found for cluster");
        return report;
    }

    delete_all(&templates, &namespace, &template_objects, &mut report).await;

    let scaled = scale_down(&controllers, &namespace, &controller_objects, &mut report).await;
    if !scaled.is_empty() {
        info!(
            controllers = scaled.len(),
            max_wait = ?wait_policy.max_wait(),
            "waiting for controllers to drain"
        );
        wait_for_all(&controllers, &namespace, &scaled, &wait_policy).await;
    }

    delete_all(&controllers, &namespace, &controller_objects, &mut report).await;
    delete_all(&services, &namespace, &service_objects, &mut report).await;

    info!(
        deleted = report.deleted.len(),
        failures = report.failures.len(),
        "teardown finished"
    );

    report
}

/// Tear down `name` in `namespace` with default labels and wait policy,
/// returning the joined diagnostic summary (empty on success)
pub async fn teardown_cluster<T, C, S>(
    name: &str,
    namespace: &str,
    templates: T,
    controllers: C,
    services: S,
) -> String
where
    T: ResourceClient,
    C: ResourceClient,
    C::Object: ScalableController,
    S: ResourceClient,
{
    let ctx = TeardownContext::new(
        ClusterIdentity::new(name, namespace),
        &SelectorLabels::default(),
        templates,
        controllers,
        services,
    );

    teardown(ctx).await.summary()
}
