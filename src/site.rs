//! The page controller.
//!
//! [`Site::load`] wires every component up in page-load order. User input is
//! fed back in through [`Site::click`], [`Site::change`], [`Site::input`],
//! [`Site::submit`] and [`Site::scroll`]. Clicks bubble: a component reacts
//! when the target is its trigger or anything inside it, and document-level
//! listeners (outside-click closing) run afterwards.
//!
//! Timer-driven behavior comes back as futures for the host to await:
//! [`Site::reveal`], [`Site::navigate`], [`Site::reconcile_widget_language`].

use crate::back_to_top::BackToTop;
use crate::config::Config;
use crate::contact::{ContactForm, Sender, SubmitOutcome};
use crate::dom::{Document, NodeId, SharedDocument};
use crate::i18n::{Dictionary, DictionaryValidator, MetricsReport};
use crate::locale::LanguageManager;
use crate::menu::MobileMenu;
use crate::poll::PollOutcome;
use crate::preferences::{PreferenceStore, SharedPreferences};
use crate::storage::{JsonFileStorage, KeyValueStore, MemoryStorage};
use crate::theme::{Theme, ThemeManager};
use crate::transition::{Navigation, PageTransition};
use crate::widget::{
    self, BridgeState, NullHost, PickerAction, Reconciliation, TranslateBridge, TranslatorPicker,
    WidgetHost, CALLBACK_NAME,
};
use serde::Serialize;
use std::cell::Ref;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Serializable view of the page state, handy for logs and assertions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSnapshot {
    pub language: String,
    /// Native name of the active language, when it is a site language
    pub language_name: Option<&'static str>,
    pub theme: Theme,
    pub menu_open: bool,
    pub widget: Option<BridgeState>,
    pub location: Option<String>,
    pub binding: MetricsReport,
}

struct Widget {
    bridge: TranslateBridge,
    picker: TranslatorPicker,
}

/// Collaborators for [`Site`]; anything left unset falls back to what the
/// [`Config`] asks for.
pub struct SiteBuilder {
    config: Config,
    storage: Option<Box<dyn KeyValueStore>>,
    widget_host: Option<Box<dyn WidgetHost>>,
    dictionary: Option<Arc<Dictionary>>,
    contact_sender: Option<Sender>,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            storage: None,
            widget_host: None,
            dictionary: None,
            contact_sender: None,
        }
    }

    pub fn storage(mut self, storage: impl KeyValueStore + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn widget_host(mut self, host: impl WidgetHost + 'static) -> Self {
        self.widget_host = Some(Box::new(host));
        self
    }

    pub fn dictionary(mut self, dictionary: Arc<Dictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn contact_sender(mut self, sender: Sender) -> Self {
        self.contact_sender = Some(sender);
        self
    }

    /// Attach to `document` and run the page-load initialization.
    pub fn load(self, mut document: Document) -> Site {
        let config = self.config;
        let storage = self
            .storage
            .unwrap_or_else(|| -> Box<dyn KeyValueStore> {
                match &config.preferences_file {
                    Some(path) => Box::new(JsonFileStorage::open(path)),
                    None => Box::new(MemoryStorage::new()),
                }
            });
        let prefs = PreferenceStore::new(storage);
        let doc = &mut document;

        let theme = ThemeManager::init(doc, &prefs, config.default_theme);
        let menu = MobileMenu::new();
        let contact = match self.contact_sender {
            Some(sender) => ContactForm::with_sender(doc, sender),
            None => ContactForm::attach(doc),
        };
        let back_to_top = BackToTop::attach(doc);
        let transition = PageTransition::attach(doc);

        let dictionary = match self.dictionary {
            Some(custom) => {
                report_dictionary_problems(&custom);
                custom
            }
            None => Arc::new(Dictionary::builtin()),
        };
        let language = LanguageManager::init(doc, &prefs, dictionary, &config.default_language);

        let widget = config.translate_widget.then(|| {
            let host = self
                .widget_host
                .unwrap_or_else(|| -> Box<dyn WidgetHost> { Box::new(NullHost) });
            let mut bridge = TranslateBridge::new(config.bridge(), host);
            bridge.start(doc);
            let picker = TranslatorPicker::build(doc);
            Widget { bridge, picker }
        });

        info!(
            "Site loaded: language={}, theme={}, widget={}",
            language.active_language(),
            theme.theme(),
            if widget.is_some() { "on" } else { "off" }
        );

        Site {
            doc: document.into_shared(),
            prefs: prefs.into_shared(),
            config,
            theme,
            menu,
            contact,
            back_to_top,
            transition,
            language,
            widget,
        }
    }
}

/// A custom dictionary still loads when it has gaps; they are only logged.
fn report_dictionary_problems(dictionary: &Dictionary) {
    let report = DictionaryValidator::validate_site(dictionary);
    for error in &report.errors {
        warn!("Dictionary: {}", error);
    }
    for warning in &report.warnings {
        debug!("Dictionary: {}", warning);
    }
}

/// The running page and every component attached to it.
pub struct Site {
    doc: SharedDocument,
    prefs: SharedPreferences,
    config: Config,
    theme: ThemeManager,
    menu: MobileMenu,
    contact: Option<ContactForm>,
    back_to_top: BackToTop,
    transition: PageTransition,
    language: LanguageManager,
    widget: Option<Widget>,
}

impl Site {
    pub fn builder(config: Config) -> SiteBuilder {
        SiteBuilder::new(config)
    }

    /// Load with in-memory preferences and everything else from `config`.
    pub fn load(config: Config, document: Document) -> Self {
        SiteBuilder::new(config).load(document)
    }

    /// The page. Borrow it briefly; handlers borrow it too.
    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    /// Borrow the preference store. Do not hold across an `.await`.
    pub fn preferences(&self) -> Ref<'_, PreferenceStore> {
        self.prefs.borrow()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Code of the language the page is currently shown in.
    pub fn active_language(&self) -> &str {
        self.language.active_language()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn back_to_top(&self) -> &BackToTop {
        &self.back_to_top
    }

    pub fn contact_form(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn bridge_state(&self) -> Option<BridgeState> {
        self.widget.as_ref().map(|w| w.bridge.state())
    }

    /// The widget language picker, when the widget is enabled.
    pub fn picker(&self) -> Option<&TranslatorPicker> {
        self.widget.as_ref().map(|w| &w.picker)
    }

    /// Capture the current page state.
    pub fn snapshot(&self) -> SiteSnapshot {
        SiteSnapshot {
            language: self.active_language().to_string(),
            language_name: self
                .language
                .context()
                .language()
                .map(|lang| lang.native_name()),
            theme: self.theme(),
            menu_open: self.menu_open(),
            widget: self.bridge_state(),
            location: self.doc.borrow().location().map(str::to_string),
            binding: self.language.context().metrics().report(),
        }
    }

    // ==================== Events ====================

    /// A click on `target`. Returns the navigation a page transition took
    /// over, to be completed with [`Site::navigate`].
    pub fn click(&mut self, target: NodeId) -> Option<Navigation> {
        let mut doc = self.doc.borrow_mut();

        if ThemeManager::triggers(&doc)
            .into_iter()
            .any(|trigger| doc.contains(trigger, target))
        {
            self.theme.toggle(&mut doc, &mut self.prefs.borrow_mut());
        }

        if MobileMenu::trigger(&doc).is_some_and(|button| doc.contains(button, target)) {
            self.menu.toggle(&mut doc);
        }

        if doc.contains(self.back_to_top.button(), target) {
            self.back_to_top.scroll_to_top(&mut doc);
        }

        let navigation = self.transition.intercept(&mut doc, target);

        if let Some(widget) = &self.widget {
            if let Some(PickerAction::Selected(code)) = widget.picker.handle_click(&mut doc, target) {
                widget.bridge.select_language(&mut doc, &mut self.prefs.borrow_mut(), &code);
            }
        }

        // Document-level listeners
        self.menu.handle_document_click(&mut doc, target);
        if let Some(widget) = &self.widget {
            widget.picker.handle_document_click(&mut doc, target);
        }

        navigation
    }

    /// The user changed a control's value. Returns `true` if a language
    /// selector handled it.
    pub fn change(&mut self, target: NodeId, value: &str) -> bool {
        let mut doc = self.doc.borrow_mut();
        doc.set_value(target, value);
        self.language
            .handle_change(&mut doc, &mut self.prefs.borrow_mut(), target, value)
    }

    /// The user typed into a control.
    pub fn input(&mut self, target: NodeId, value: &str) {
        let mut doc = self.doc.borrow_mut();
        match &self.widget {
            Some(widget) if widget.picker.search() == target => {
                widget.picker.on_search_input(&mut doc, value);
            }
            _ => doc.set_value(target, value),
        }
    }

    pub fn scroll(&mut self, y: f64) {
        self.doc.borrow_mut().set_scroll_y(y);
        self.back_to_top.on_scroll();
    }

    pub fn animation_frame(&mut self) {
        let mut doc = self.doc.borrow_mut();
        self.back_to_top.on_animation_frame(&mut doc);
    }

    /// A script invoked the window callback `callback`. Returns `true` if the
    /// widget bridge accepted it.
    pub fn script_loaded(&mut self, callback: &str) -> bool {
        let Some(widget) = &mut self.widget else {
            return false;
        };
        let mut doc = self.doc.borrow_mut();
        if callback != CALLBACK_NAME || !doc.has_global(callback) {
            debug!("Unknown script callback {:?}", callback);
            return false;
        }
        widget.bridge.on_script_ready(&mut doc)
    }

    /// Submit the contact form. Resolves once the sender has answered and,
    /// after a successful send, the success banner has been hidden again.
    ///
    /// `None` when the page has no contact form.
    pub async fn submit(&self) -> Option<SubmitOutcome> {
        let form = self.contact.as_ref()?;
        let outcome = form.submit(&self.doc).await;
        if outcome == SubmitOutcome::Sent {
            form.hide_success_after(&self.doc, self.config.success_banner_delay())
                .await;
        }
        Some(outcome)
    }

    // ==================== Timers ====================

    /// Finish the page's fade-in.
    pub async fn reveal(&self) {
        self.transition.reveal(&self.doc).await;
    }

    pub async fn navigate(&self, navigation: Navigation) {
        PageTransition::navigate(&self.doc, navigation).await;
    }

    /// The saved-language poll, if the widget is enabled and ready. Take its
    /// cancel handle before running it to be able to stop it.
    pub fn widget_reconciliation(&self) -> Option<Reconciliation> {
        self.widget
            .as_ref()
            .and_then(|w| w.bridge.reconciliation(&self.prefs))
    }

    pub async fn reconcile_widget_language(&self) -> Option<PollOutcome<NodeId>> {
        let reconciliation = self.widget_reconciliation()?;
        Some(reconciliation.run(&self.doc).await)
    }

    // ==================== Widget Ribbon ====================

    pub fn show_widget_ribbon(&self) {
        widget::show_ribbon(&mut self.doc.borrow_mut());
    }

    pub fn hide_widget_ribbon(&self) {
        widget::hide_ribbon(&mut self.doc.borrow_mut());
    }
}
