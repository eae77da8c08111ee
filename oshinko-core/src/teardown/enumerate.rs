//! Resource enumeration

use oshinko_common::{TeardownFailure, TeardownReport};
use tracing::{debug, warn};

use crate::kubernetes::resources::{ManagedObject, ResourceClient};
use crate::kubernetes::selector::Selector;

/// List the objects of one kind matching `selector`
///
/// A list failure is recorded in `report` and yields an empty set, so the
/// other kinds are still torn down.
pub async fn enumerate<C: ResourceClient>(
    client: &C,
    namespace: &str,
    selector: &Selector,
    report: &mut TeardownReport,
) -> Vec<C::Object> {
    let kind = client.kind();

    match client.list(namespace, selector).await {
        Ok(objects) => {
            debug!(
                kind = %kind,
                count = objects.len(),
                names = ?objects.iter().map(|o| o.name()).collect::<Vec<_>>(),
                "enumerated"
            );
            objects
        }
        Err(e) => {
            warn!(kind = %kind, error = %e, "unable to list {}", kind.plural());
            report.record(TeardownFailure::enumerate(kind, e));
            Vec::new()
        }
    }
}
