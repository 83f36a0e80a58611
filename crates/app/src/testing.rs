//! In-memory backend shared by the service and editor tests.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Mutex;

use farmhub_domain::device::{Device, DeviceStatus};
use farmhub_domain::error::{FarmhubError, RemoteError};
use farmhub_domain::farm::{Farm, FarmRole};
use farmhub_domain::id::{FarmId, RuleId};
use farmhub_domain::rule::Rule;

use crate::ports::{DeviceGateway, FarmGateway, RuleGateway};

#[derive(Default)]
pub struct FakeBackend {
    farms: Mutex<Vec<Farm>>,
    devices: Mutex<Vec<Device>>,
    rules: Mutex<BTreeMap<RuleId, Rule>>,
    failures: Mutex<HashMap<&'static str, (u16, Option<String>)>>,
    calls: Mutex<Vec<String>>,
    sent: Mutex<Vec<Rule>>,
}

impl FakeBackend {
    pub fn with_farm(self, id: i64, role: FarmRole) -> Self {
        self.farms.lock().unwrap().push(Farm {
            id: FarmId::new(id),
            name: format!("Farm {id}"),
            location: None,
            current_user_role: Some(role),
        });
        self
    }

    pub fn with_device(self, device_id: &str, kind: &str) -> Self {
        self.devices.lock().unwrap().push(Device {
            device_id: device_id.to_string(),
            name: device_id.to_lowercase(),
            kind: kind.to_string(),
            status: Some(DeviceStatus::Online),
        });
        self
    }

    pub fn with_rule(self, rule: Rule) -> Self {
        let id = rule.id.expect("stored rules carry an id");
        self.rules.lock().unwrap().insert(id, rule);
        self
    }

    /// Make the next call to `op` fail with `status`.
    pub fn fail(&self, op: &'static str, status: u16, message: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.map(str::to_string)));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Rule> {
        self.sent.lock().unwrap().clone()
    }

    pub fn stored(&self, id: RuleId) -> Option<Rule> {
        self.rules.lock().unwrap().get(&id).cloned()
    }

    fn record(&self, op: &'static str, call: String) -> Result<(), FarmhubError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().remove(op) {
            Some((status, message)) => Err(RemoteError::status(status, message).into()),
            None => Ok(()),
        }
    }
}

impl RuleGateway for &FakeBackend {
    fn list_by_farm(
        &self,
        farm_id: FarmId,
    ) -> impl Future<Output = Result<Vec<Rule>, FarmhubError>> + Send {
        let result: Result<Vec<Rule>, FarmhubError> = self
            .record("list_rules", format!("GET /rules?farmId={farm_id}"))
            .map(|()| self.rules.lock().unwrap().values().cloned().collect());
        async { result }
    }

    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, FarmhubError>> + Send {
        let result = self
            .record("get_rule", format!("GET /rules/{id}"))
            .map(|()| self.rules.lock().unwrap().get(&id).cloned());
        async { result }
    }

    fn create(
        &self,
        farm_id: FarmId,
        rule: Rule,
    ) -> impl Future<Output = Result<Rule, FarmhubError>> + Send {
        self.sent.lock().unwrap().push(rule.clone());
        let result = self
            .record("create_rule", format!("POST /rules?farmId={farm_id}"))
            .map(|()| {
                let mut rules = self.rules.lock().unwrap();
                let next = rules.keys().next_back().map_or(1, |id| id.get() + 1);
                let mut created = rule;
                created.id = Some(RuleId::new(next));
                rules.insert(RuleId::new(next), created.clone());
                created
            });
        async { result }
    }

    fn update(
        &self,
        id: RuleId,
        rule: Rule,
    ) -> impl Future<Output = Result<Rule, FarmhubError>> + Send {
        self.sent.lock().unwrap().push(rule.clone());
        let result = self.record("update_rule", format!("PUT /rules/{id}")).map(|()| {
            self.rules.lock().unwrap().insert(id, rule.clone());
            rule
        });
        async { result }
    }

    fn set_enabled(
        &self,
        id: RuleId,
        enabled: bool,
    ) -> impl Future<Output = Result<(), FarmhubError>> + Send {
        let result = self
            .record("toggle_rule", format!("PATCH /rules/{id}/toggle"))
            .map(|()| {
                if let Some(rule) = self.rules.lock().unwrap().get_mut(&id) {
                    rule.enabled = enabled;
                }
            });
        async { result }
    }

    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), FarmhubError>> + Send {
        let result = self
            .record("delete_rule", format!("DELETE /rules/{id}"))
            .map(|()| {
                self.rules.lock().unwrap().remove(&id);
            });
        async { result }
    }
}

impl DeviceGateway for &FakeBackend {
    fn list_devices(
        &self,
        farm_id: FarmId,
    ) -> impl Future<Output = Result<Vec<Device>, FarmhubError>> + Send {
        let result = self
            .record("list_devices", format!("GET /devices?farmId={farm_id}"))
            .map(|()| self.devices.lock().unwrap().clone());
        async { result }
    }
}

impl FarmGateway for &FakeBackend {
    fn list_farms(&self) -> impl Future<Output = Result<Vec<Farm>, FarmhubError>> + Send {
        let result = self
            .record("list_farms", "GET /farms".to_string())
            .map(|()| self.farms.lock().unwrap().clone());
        async { result }
    }
}
