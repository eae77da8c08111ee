//! Object deletion

use oshinko_common::{ObjectRef, TeardownFailure, TeardownReport};
use tracing::{debug, warn};

use crate::kubernetes::resources::{ManagedObject, ResourceClient};

/// Delete each object once, recording failures and continuing
pub async fn delete_all<C: ResourceClient>(
    client: &C,
    namespace: &str,
    objects: &[C::Object],
    report: &mut TeardownReport,
) {
    let kind = client.kind();

    for object in objects {
        let name = object.name();
        match client.delete(namespace, name).await {
            Ok(()) => {
                debug!(kind = %kind, name, "deleted");
                report.deleted.push(ObjectRef::new(kind, namespace, name));
            }
            Err(e) => {
                warn!(kind = %kind, name, error = %e, "delete failed");
                report.record(TeardownFailure::delete(kind, name, e));
            }
        }
    }
}
