//! Common test utilities: in-memory resource clients

#![allow(dead_code)]

use async_trait::async_trait;
use oshinko_core::{
    K8sError, K8sResult, ManagedObject, ResourceClient, ResourceKind, ScalableController, Selector,
};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

pub const NAMESPACE: &str = "demo";

/// One recorded client call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ResourceKind),
    Get(ResourceKind, String),
    Update(ResourceKind, String),
    Delete(ResourceKind, String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::Update(..) | Call::Delete(..))
    }
}

/// Call log shared by all fake clients of one test
pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

#[derive(Debug, Clone)]
pub struct FakeObject {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub desired: i32,
    pub observed: i32,
}

impl ManagedObject for FakeObject {
    fn name(&self) -> &str {
        &self.name
    }
}

impl ScalableController for FakeObject {
    fn set_desired_replicas(&mut self, replicas: i32) {
        self.desired = replicas;
    }

    fn observed_replicas(&self) -> i32 {
        self.observed
    }
}

/// Object labelled as part of `cluster`
pub fn object(name: &str, cluster: &str) -> FakeObject {
    controller(name, cluster, 1)
}

/// Controller running `replicas` instances
pub fn controller(name: &str, cluster: &str, replicas: i32) -> FakeObject {
    let mut labels = BTreeMap::new();
    labels.insert("cluster-name".to_string(), cluster.to_string());
    FakeObject {
        name: name.to_string(),
        labels,
        desired: replicas,
        observed: replicas,
    }
}

pub fn with_role(mut obj: FakeObject, role: &str) -> FakeObject {
    obj.labels.insert("role".to_string(), role.to_string());
    obj
}

#[derive(Default)]
struct State {
    objects: Vec<FakeObject>,
    list_error: Option<String>,
    failing_updates: HashSet<String>,
    failing_deletes: HashSet<String>,
    observed_script: HashMap<String, VecDeque<i32>>,
}

/// In-memory client for one resource kind
///
/// Clones share state, so a test can keep a handle while the workflow owns
/// another. Scaling an unscripted controller to zero drains it instantly.
#[derive(Clone)]
pub struct FakeClient {
    kind: ResourceKind,
    state: Arc<Mutex<State>>,
    calls: CallLog,
}

impl FakeClient {
    pub fn new(kind: ResourceKind, calls: &CallLog) -> Self {
        Self {
            kind,
            state: Arc::new(Mutex::new(State::default())),
            calls: calls.clone(),
        }
    }

    pub fn with_objects(self, objects: Vec<FakeObject>) -> Self {
        self.state.lock().unwrap().objects = objects;
        self
    }

    pub fn fail_list(self, message: &str) -> Self {
        self.state.lock().unwrap().list_error = Some(message.to_string());
        self
    }

    pub fn fail_update(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_updates
            .insert(name.to_string());
        self
    }

    pub fn fail_delete(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_deletes
            .insert(name.to_string());
        self
    }

    /// Observed counts returned by successive `get` calls; the last value repeats
    pub fn script_observed(self, name: &str, sequence: &[i32]) -> Self {
        self.state
            .lock()
            .unwrap()
            .observed_script
            .insert(name.to_string(), sequence.iter().copied().collect());
        self
    }

    /// Names still stored
    pub fn remaining(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .map(|o| o.name.clone())
            .collect()
    }

    pub fn desired_of(&self, name: &str) -> Option<i32> {
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.desired)
    }

    /// Calls made through this client
    pub fn calls(&self) -> Vec<Call> {
        let kind = self.kind;
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| match c {
                Call::List(k) | Call::Get(k, _) | Call::Update(k, _) | Call::Delete(k, _) => {
                    *k == kind
                }
            })
            .cloned()
            .collect()
    }

    pub fn gets_of(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Get(_, n) if n == name))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn not_found(&self, name: &str) -> K8sError {
        K8sError::ResourceNotFound {
            kind: self.kind.to_string(),
            name: name.to_string(),
            namespace: NAMESPACE.to_string(),
        }
    }
}

#[async_trait]
impl ResourceClient for FakeClient {
    type Object = FakeObject;

    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn list(&self, _namespace: &str, selector: &Selector) -> K8sResult<Vec<FakeObject>> {
        self.record(Call::List(self.kind));
        let state = self.state.lock().unwrap();

        if let Some(msg) = &state.list_error {
            return Err(K8sError::Internal(msg.clone()));
        }

        Ok(state
            .objects
            .iter()
            .filter(|o| selector.matches(&o.labels))
            .cloned()
            .collect())
    }

    async fn get(&self, _namespace: &str, name: &str) -> K8sResult<FakeObject> {
        self.record(Call::Get(self.kind, name.to_string()));
        let mut state = self.state.lock().unwrap();

        let scripted = state.observed_script.get_mut(name).and_then(|seq| {
            if seq.len() > 1 {
                seq.pop_front()
            } else {
                seq.front().copied()
            }
        });

        let mut obj = state
            .objects
            .iter()
            .find(|o| o.name == name)
            .cloned()
            .ok_or_else(|| self.not_found(name))?;

        if let Some(observed) = scripted {
            obj.observed = observed;
        }
        Ok(obj)
    }

    async fn update(&self, _namespace: &str, object: &FakeObject) -> K8sResult<FakeObject> {
        self.record(Call::Update(self.kind, object.name.clone()));
        let mut state = self.state.lock().unwrap();

        if state.failing_updates.contains(&object.name) {
            return Err(K8sError::Conflict(format!(
                "the object has been modified; please apply your changes to the latest version ({})",
                object.name
            )));
        }

        let drains = !state.observed_script.contains_key(&object.name);
        let stored = state
            .objects
            .iter_mut()
            .find(|o| o.name == object.name)
            .ok_or_else(|| self.not_found(&object.name))?;

        stored.desired = object.desired;
        if drains {
            stored.observed = object.desired;
        }
        Ok(stored.clone())
    }

    async fn delete(&self, _namespace: &str, name: &str) -> K8sResult<()> {
        self.record(Call::Delete(self.kind, name.to_string()));
        let mut state = self.state.lock().unwrap();

        if state.failing_deletes.contains(name) {
            return Err(K8sError::Forbidden(format!("cannot delete {}", name)));
        }

        let before = state.objects.len();
        state.objects.retain(|o| o.name != name);
        if state.objects.len() == before {
            return Err(self.not_found(name));
        }
        Ok(())
    }
}

/// The three clients of one cluster sharing a call log
pub struct Clients {
    pub calls: CallLog,
    pub templates: FakeClient,
    pub controllers: FakeClient,
    pub services: FakeClient,
}

impl Clients {
    pub fn new() -> Self {
        let calls = call_log();
        Self {
            templates: FakeClient::new(ResourceKind::DeploymentConfig, &calls),
            controllers: FakeClient::new(ResourceKind::ReplicationController, &calls),
            services: FakeClient::new(ResourceKind::Service, &calls),
            calls,
        }
    }

    pub fn all_calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.all_calls().iter().position(|c| c == call)
    }
}
