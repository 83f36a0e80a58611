//! Rule editor session: one create or edit flow from permission check to save.
//!
//! ```text
//! Idle ──open──▶ Loading ──rule + devices──▶ Ready ⇄ Submitting
//!   │               │
//!   ├─▶ Forbidden   └─▶ LoadFailed            any ──close──▶ Closed
//! ```
//!
//! The rule detail and the device list are fetched concurrently and may land
//! in either order; [`RuleEditor::on_rule_loaded`] and
//! [`RuleEditor::on_devices_loaded`] apply them and are no-ops outside
//! `Loading`, so results arriving after [`RuleEditor::close`] are dropped.
//!
//! [`RuleEditor::open`] awaits both fetches and applies them together, so the
//! form only shows once the device list is in as well. A host that wants the
//! form editable while devices are still pending runs the fetches itself and
//! feeds each result to its `on_*` handler as soon as it lands.

mod form;
mod notice;
mod view;

pub use form::RuleForm;
pub use notice::{Notice, NoticeLevel, describe_failure};
pub use view::{ActionView, ConditionView};

use farmhub_domain::device::{Device, DeviceCatalog};
use farmhub_domain::error::{FarmhubError, ValidationErrors};
use farmhub_domain::farm::FarmRole;
use farmhub_domain::id::{FarmId, RuleId};
use farmhub_domain::rule::Rule;

use crate::context::SessionContext;
use crate::ports::{DeviceGateway, FarmGateway, RuleGateway};
use crate::services::permission_service::PermissionService;
use crate::services::rule_service::RuleService;

/// Whether the session creates a new rule or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RuleId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    /// Nothing fetched yet.
    Idle,
    /// Permission granted; rule and/or devices still in flight.
    Loading,
    Ready,
    Submitting,
    /// The caller's role does not allow editing; no form is exposed.
    Forbidden(FarmRole),
    /// A fetch needed to show the form failed; carries the user-facing text.
    LoadFailed(String),
    Closed,
}

/// Result of [`RuleEditor::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Rule),
    /// Inline field errors were recorded; nothing was sent.
    Invalid,
    /// Creating without a selected farm; nothing was sent.
    MissingFarm,
    /// The backend call failed; the form is untouched.
    Failed,
    /// The editor was not `Ready`.
    Ignored,
}

/// In-memory editing session for a single rule.
pub struct RuleEditor<R, D, F> {
    rules: RuleService<R>,
    devices: D,
    permissions: PermissionService<F>,
    context: SessionContext,
    mode: EditorMode,
    state: EditorState,
    form: RuleForm,
    catalog: DeviceCatalog,
    devices_loaded: bool,
    /// The rule as fetched, in edit mode.
    original: Option<Rule>,
    field_errors: ValidationErrors,
    notices: Vec<Notice>,
    completed: bool,
}

impl<R, D, F> RuleEditor<R, D, F>
where
    R: RuleGateway,
    D: DeviceGateway,
    F: FarmGateway,
{
    pub fn new(rules: R, devices: D, farms: F, context: SessionContext, mode: EditorMode) -> Self {
        Self {
            rules: RuleService::new(rules),
            devices,
            permissions: PermissionService::new(farms),
            context,
            mode,
            state: EditorState::Idle,
            form: RuleForm::default(),
            catalog: DeviceCatalog::default(),
            devices_loaded: false,
            original: None,
            field_errors: ValidationErrors::new(),
            notices: Vec::new(),
            completed: false,
        }
    }

    /// Check permission, then load everything the form needs.
    ///
    /// Only runs from `Idle`. Viewers stop at `Forbidden` before any rule or
    /// device request is made. In edit mode the rule is applied after both
    /// fetches complete; see the module docs for partial readiness.
    #[tracing::instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn open(&mut self) {
        if self.state != EditorState::Idle {
            return;
        }
        let farm_id = self.context.farm_id();
        let permission = self.permissions.authorize_rule_editing(farm_id).await;
        if !self.on_permission_resolved(permission) {
            return;
        }
        match self.mode {
            EditorMode::Create => {
                let devices = self.load_devices(farm_id).await;
                self.on_devices_loaded(devices);
            }
            EditorMode::Edit(id) => {
                let (rule, devices) =
                    tokio::join!(self.rules.get_rule(id), self.load_devices(farm_id));
                self.on_rule_loaded(rule);
                self.on_devices_loaded(devices);
            }
        }
    }

    async fn load_devices(&self, farm_id: Option<FarmId>) -> Result<Vec<Device>, FarmhubError> {
        match farm_id {
            Some(id) => self.devices.list_devices(id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Apply the permission check. Returns `true` when loading should proceed.
    pub fn on_permission_resolved(&mut self, result: Result<FarmRole, FarmhubError>) -> bool {
        if self.state != EditorState::Idle {
            return false;
        }
        match result {
            Ok(role) if role.can_manage_rules() => {
                self.transition(EditorState::Loading);
                true
            }
            Ok(role) => {
                self.transition(EditorState::Forbidden(role));
                false
            }
            Err(FarmhubError::Forbidden(err)) => {
                self.transition(EditorState::Forbidden(err.role));
                false
            }
            Err(err) => {
                self.fail_loading(&err, "Could not check your permissions on this farm.");
                false
            }
        }
    }

    /// Apply the fetched rule (edit mode). Ignored outside `Loading`.
    pub fn on_rule_loaded(&mut self, result: Result<Rule, FarmhubError>) {
        if self.state != EditorState::Loading || self.mode == EditorMode::Create {
            return;
        }
        match result {
            Ok(rule) => {
                self.form = RuleForm::from_rule(&rule);
                self.original = Some(rule);
                self.try_ready();
            }
            Err(err) => self.fail_loading(&err, "Could not load the rule."),
        }
    }

    /// Apply the device list. A failure leaves the selectors empty but does
    /// not block the form.
    pub fn on_devices_loaded(&mut self, result: Result<Vec<Device>, FarmhubError>) {
        if self.state != EditorState::Loading || self.devices_loaded {
            return;
        }
        match result {
            Ok(devices) => self.catalog = DeviceCatalog::partition(devices),
            Err(err) => {
                tracing::warn!(error = %err, "device list unavailable");
                self.notices.push(Notice::error(describe_failure(
                    &err,
                    "Could not load the device list.",
                )));
            }
        }
        self.devices_loaded = true;
        self.try_ready();
    }

    fn form_populated(&self) -> bool {
        match self.mode {
            EditorMode::Create => true,
            EditorMode::Edit(_) => self.original.is_some(),
        }
    }

    fn try_ready(&mut self) {
        if self.state == EditorState::Loading && self.devices_loaded && self.form_populated() {
            self.transition(EditorState::Ready);
        }
    }

    fn fail_loading(&mut self, err: &FarmhubError, fallback: &str) {
        tracing::warn!(error = %err, "editor failed to load");
        let text = describe_failure(err, fallback);
        self.notices.push(Notice::error(text.clone()));
        self.transition(EditorState::LoadFailed(text));
    }

    fn transition(&mut self, next: EditorState) {
        tracing::debug!(from = ?self.state, to = ?next, "editor state changed");
        self.state = next;
    }

    /// Validate and send the form.
    ///
    /// Local problems (missing fields, no farm selected) stop before any
    /// network call. A backend failure keeps the form as it was so the user
    /// can retry.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state != EditorState::Ready {
            return SubmitOutcome::Ignored;
        }
        let (id, enabled) = match self.mode {
            EditorMode::Create => (None, true),
            EditorMode::Edit(id) => (
                Some(id),
                self.original.as_ref().is_none_or(|rule| rule.enabled),
            ),
        };
        let rule = self.form.to_rule(id, enabled);
        if let Err(errors) = rule.validate() {
            tracing::debug!(count = errors.len(), "rule form invalid");
            self.field_errors = errors;
            return SubmitOutcome::Invalid;
        }
        self.field_errors = ValidationErrors::new();

        let farm_id = self.context.farm_id();
        if self.mode == EditorMode::Create && farm_id.is_none() {
            self.notices.push(Notice::error(describe_failure(
                &FarmhubError::MissingFarm,
                "Could not create the rule.",
            )));
            return SubmitOutcome::MissingFarm;
        }

        self.transition(EditorState::Submitting);
        let (result, done, fallback) = match self.mode {
            EditorMode::Create => (
                self.rules.create_rule(farm_id, rule).await,
                "Rule created.",
                "Could not create the rule.",
            ),
            EditorMode::Edit(id) => (
                self.rules.update_rule(id, rule).await,
                "Rule updated.",
                "Could not update the rule.",
            ),
        };
        self.transition(EditorState::Ready);

        match result {
            Ok(saved) => {
                self.notices.push(Notice::success(done));
                self.completed = true;
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "rule submission failed");
                if let FarmhubError::Validation(errors) = &err {
                    self.field_errors = errors.clone();
                }
                self.notices.push(Notice::error(describe_failure(&err, fallback)));
                SubmitOutcome::Failed
            }
        }
    }

    /// Tear the session down. Later fetch results are ignored.
    pub fn close(&mut self) {
        self.transition(EditorState::Closed);
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    fn form_visible(&self) -> bool {
        match self.state {
            EditorState::Ready | EditorState::Submitting => true,
            EditorState::Loading => self.form_populated(),
            _ => false,
        }
    }

    /// The form, once it can be shown.
    #[must_use]
    pub fn form(&self) -> Option<&RuleForm> {
        self.form_visible().then_some(&self.form)
    }

    /// Mutable access while the user may edit: `Ready`, or `Loading` once the
    /// form is populated and only the device list is outstanding.
    pub fn form_mut(&mut self) -> Option<&mut RuleForm> {
        let editable = self.state != EditorState::Submitting && self.form_visible();
        editable.then_some(&mut self.form)
    }

    #[must_use]
    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    /// Inline errors from the last rejected submission.
    #[must_use]
    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    #[must_use]
    pub fn condition_views(&self) -> Vec<ConditionView<'_>> {
        if !self.form_visible() {
            return Vec::new();
        }
        self.form
            .conditions
            .iter()
            .enumerate()
            .map(|(index, c)| ConditionView::build(index, c, &self.catalog, &self.field_errors))
            .collect()
    }

    #[must_use]
    pub fn action_views(&self) -> Vec<ActionView<'_>> {
        if !self.form_visible() {
            return Vec::new();
        }
        self.form
            .actions
            .iter()
            .enumerate()
            .map(|(index, a)| ActionView::build(index, a, &self.catalog, &self.field_errors))
            .collect()
    }

    /// Drain pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// `true` after a successful save; the host navigates away.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
