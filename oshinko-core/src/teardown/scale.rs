//! Scale-down of controllers

use oshinko_common::{TeardownFailure, TeardownReport};
use tracing::{debug, warn};

use crate::kubernetes::resources::{ManagedObject, ResourceClient, ScalableController};

/// Set every controller's desired replicas to zero
///
/// Each update submits the state captured at enumeration time. A conflicting
/// concurrent change makes that update fail; it is recorded, not retried.
/// Returns the names of the controllers whose update was accepted.
pub async fn scale_down<C>(
    client: &C,
    namespace: &str,
    controllers: &[C::Object],
    report: &mut TeardownReport,
) -> Vec<String>
where
    C: ResourceClient,
    C::Object: ScalableController,
{
    let kind = client.kind();
    let mut scaled = Vec::with_capacity(controllers.len());

    for controller in controllers {
        let mut desired = controller.clone();
        desired.set_desired_replicas(0);

        match client.update(namespace, &desired).await {
            Ok(_) => {
                debug!(kind = %kind, name = controller.name(), "scaled to zero");
                scaled.push(controller.name().to_string());
            }
            Err(e) if e.is_conflict() => {
                warn!(
                    kind = %kind,
                    name = controller.name(),
                    error = %e,
                    "controller changed since it was listed, not scaling"
                );
                report.record(TeardownFailure::scale_down(kind, controller.name(), e));
            }
            Err(e) => {
                warn!(kind = %kind, name = controller.name(), error = %e, "scale down failed");
                report.record(TeardownFailure::scale_down(kind, controller.name(), e));
            }
        }
    }

    scaled
}
