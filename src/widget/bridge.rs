use crate::dom::{Document, EventKind, NodeId, SharedDocument};
use crate::poll::{CancelHandle, PollConfig, PollOutcome, PollTask};
use crate::preferences::{PreferenceKey, PreferenceStore, SharedPreferences};
use serde::Serialize;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Element the widget renders into.
pub const CONTAINER_ID: &str = "google_translate_element";
/// Window callback the widget script invokes once loaded.
pub const CALLBACK_NAME: &str = "googleTranslateElementInit";
/// Class of the language `<select>` the widget renders.
pub const COMBO_CLASS: &str = "goog-te-combo";

pub const DEFAULT_SCRIPT_URL: &str = "https://translate.google.com/translate_a/element.js";

const NO_TRANSLATE_CLASS: &str = "notranslate";
const RIBBON_ATTR: &str = "data-show-gt-banner";

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Translation widget library is not available")]
    Unavailable,

    #[error("Widget container '{0}' not found")]
    MissingContainer(String),

    #[error("Widget construction failed: {0}")]
    Construction(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeState {
    #[default]
    Unloaded,
    /// Script requested, waiting for its callback
    Loading,
    Ready,
}

/// Options handed to the widget constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub page_language: String,
    pub auto_display: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            page_language: "auto".to_string(),
            auto_display: false,
        }
    }
}

/// The environment that actually runs the third-party widget.
pub trait WidgetHost {
    /// Whether the widget library is already present, so no script is needed.
    fn is_loaded(&self, doc: &Document) -> bool;

    fn construct(
        &mut self,
        doc: &mut Document,
        options: &WidgetOptions,
        container_id: &str,
    ) -> Result<(), WidgetError>;
}

/// Host with no widget library: never loaded, construction always fails.
#[derive(Debug, Default)]
pub struct NullHost;

impl WidgetHost for NullHost {
    fn is_loaded(&self, _doc: &Document) -> bool {
        false
    }

    fn construct(
        &mut self,
        _doc: &mut Document,
        _options: &WidgetOptions,
        _container_id: &str,
    ) -> Result<(), WidgetError> {
        Err(WidgetError::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub script_url: String,
    pub poll: PollConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            script_url: DEFAULT_SCRIPT_URL.to_string(),
            poll: PollConfig::widget_control(),
        }
    }
}

/// Ensure the widget container exists, creating it at the end of the body.
pub fn ensure_container(doc: &mut Document) -> NodeId {
    if let Some(existing) = doc.get_element_by_id(CONTAINER_ID) {
        return existing;
    }
    let body = doc.body();
    doc.build("div").id(CONTAINER_ID).append_to(body)
}

/// Undo markup that would stop the widget from translating the page.
///
/// `notranslate` stays on the widget's own elements.
pub fn relax_no_translate(doc: &mut Document) {
    let root = doc.root();
    if doc.attribute(root, "translate") == Some("no") {
        doc.set_attribute(root, "translate", "yes");
    }

    let meta = doc.query_first(root, |el| {
        el.tag() == "meta"
            && el.attribute("name") == Some("google")
            && el.attribute("content") == Some("notranslate")
    });
    if let Some(meta) = meta {
        doc.remove(meta);
    }

    let marked = doc.query_all(root, |el| {
        el.has_class(NO_TRANSLATE_CLASS) && !el.id().is_some_and(|id| id.starts_with("google_translate"))
    });
    debug!("Clearing notranslate from {} element(s)", marked.len());
    for node in marked {
        doc.remove_class(node, NO_TRANSLATE_CLASS);
    }
}

/// Let the widget's top banner show.
pub fn show_ribbon(doc: &mut Document) {
    let root = doc.root();
    doc.set_attribute(root, RIBBON_ATTR, "true");
}

/// Hide the widget's top banner.
pub fn hide_ribbon(doc: &mut Document) {
    let root = doc.root();
    doc.remove_attribute(root, RIBBON_ATTR);
}

/// Pending application of the saved widget language. Take the cancel handle
/// before awaiting [`Reconciliation::run`] to be able to stop it.
///
/// The preference is read when the combo turns up, so a picker selection
/// made while the poll is waiting is the one applied.
pub struct Reconciliation {
    task: PollTask,
    prefs: SharedPreferences,
}

impl std::fmt::Debug for Reconciliation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciliation")
            .field("task", &self.task)
            .field("saved", &self.saved_language())
            .finish()
    }
}

impl Reconciliation {
    /// The trimmed saved preference as it stands now; empty means auto-detect.
    pub fn saved_language(&self) -> String {
        saved_language(&self.prefs.borrow())
    }

    /// Handle that stops [`Reconciliation::run`] on its next wait.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.task.cancel_handle()
    }

    /// Wait for the widget's combo, then select the saved language on it once.
    pub async fn run(self, doc: &SharedDocument) -> PollOutcome<NodeId> {
        let Reconciliation { task, prefs } = self;
        let outcome = task
            .run(|| {
                let doc = doc.borrow();
                doc.first_by_class(doc.root(), COMBO_CLASS)
            })
            .await;

        match &outcome {
            PollOutcome::Ready { value: combo, .. } => {
                let saved = saved_language(&prefs.borrow());
                let mut doc = doc.borrow_mut();
                doc.set_value(*combo, &saved);
                doc.dispatch_event(*combo, EventKind::Change);
                debug!("Widget language set to {:?}", saved);
            }
            PollOutcome::TimedOut { .. } => debug!("Widget control never appeared"),
            PollOutcome::Cancelled { .. } => debug!("Widget language reconciliation cancelled"),
        }
        outcome
    }
}

fn saved_language(prefs: &PreferenceStore) -> String {
    prefs
        .get(PreferenceKey::PreferredLanguage, "")
        .trim()
        .to_string()
}

/// Loads the translate widget script and tracks its lifecycle.
pub struct TranslateBridge {
    config: BridgeConfig,
    options: WidgetOptions,
    host: Box<dyn WidgetHost>,
    state: BridgeState,
}

impl std::fmt::Debug for TranslateBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslateBridge")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl TranslateBridge {
    pub fn new(config: BridgeConfig, host: Box<dyn WidgetHost>) -> Self {
        Self {
            config,
            options: WidgetOptions::default(),
            host,
            state: BridgeState::Unloaded,
        }
    }

    /// Where the widget is in its load lifecycle.
    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Script location, widget options and poll timing this bridge uses.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Full script URL, with the init callback name in the query.
    ///
    /// # Returns
    /// The `src` given to the injected `<script>` element
    pub fn script_src(&self) -> String {
        format!("{}?cb={}", self.config.script_url, CALLBACK_NAME)
    }

    /// Prepare the page and request the widget script.
    ///
    /// Only the first call does anything.
    pub fn start(&mut self, doc: &mut Document) -> BridgeState {
        if self.state != BridgeState::Unloaded {
            return self.state;
        }

        ensure_container(doc);
        relax_no_translate(doc);

        if self.host.is_loaded(doc) {
            debug!("Widget library already present");
            self.state = BridgeState::Ready;
            return self.state;
        }

        doc.register_global(CALLBACK_NAME);
        let src = self.script_src();
        let head = doc.head();
        doc.build("script").attr("src", &src).append_to(head);
        debug!("Requested widget script {}", src);

        self.state = BridgeState::Loading;
        self.state
    }

    /// The script's callback fired. Returns `false` if it was not expected.
    pub fn on_script_ready(&mut self, doc: &mut Document) -> bool {
        if self.state != BridgeState::Loading {
            debug!("Ignoring widget callback in state {:?}", self.state);
            return false;
        }

        if let Err(e) = self.host.construct(doc, &self.options, CONTAINER_ID) {
            warn!("Translation widget unavailable: {}", e);
        }
        self.state = BridgeState::Ready;
        true
    }

    /// Set up the saved-language poll. `None` until the bridge is ready.
    pub fn reconciliation(&self, prefs: &SharedPreferences) -> Option<Reconciliation> {
        if self.state != BridgeState::Ready {
            return None;
        }
        Some(Reconciliation {
            task: PollTask::new("widget-language", self.config.poll.clone()),
            prefs: Rc::clone(prefs),
        })
    }

    /// Remember `code` and, if the widget's combo is on the page, switch it.
    pub fn select_language(&self, doc: &mut Document, prefs: &mut PreferenceStore, code: &str) {
        prefs.set(PreferenceKey::PreferredLanguage, code);
        info!("Widget language selected: {:?}", code);

        if let Some(combo) = doc.first_by_class(doc.root(), COMBO_CLASS) {
            doc.set_value(combo, code);
            doc.dispatch_event(combo, EventKind::Change);
        }
    }
}
