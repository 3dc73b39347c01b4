//! Optional bridge to the third-party page translation widget.
//!
//! The site's own dictionary covers English, Hindi and Punjabi. When enabled,
//! the bridge loads the external widget for every other language and adds a
//! picker to choose one.
//!
//! # Architecture
//!
//! - `bridge`: Script loading state machine, widget host seam and the
//!   saved-language reconciliation poll
//! - `picker`: Translate button with a searchable language menu
//! - `languages`: The languages the picker offers

mod bridge;
mod languages;
mod picker;

pub use bridge::{
    ensure_container, hide_ribbon, relax_no_translate, show_ribbon, BridgeConfig, BridgeState,
    NullHost, Reconciliation, TranslateBridge, WidgetError, WidgetHost, WidgetOptions,
    CALLBACK_NAME, COMBO_CLASS, CONTAINER_ID, DEFAULT_SCRIPT_URL,
};
pub use languages::{filter_languages, WIDGET_LANGUAGES};
pub use picker::{PickerAction, TranslatorPicker};
