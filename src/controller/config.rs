use crate::validation::Field;

pub(crate) const ACTIVE_CLASS: &str = "active";
pub(crate) const DRAGGING_CLASS: &str = "dragging";
pub(crate) const DRAGOVER_CLASS: &str = "dragover";
pub(crate) const DARK_MODE_CLASS: &str = "dark-mode";

pub(crate) const FAQ_ITEM_SELECTOR: &str = ".faq-item";
pub(crate) const FAQ_QUESTION_SELECTOR: &str = ".faq-question";
pub(crate) const FAQ_GLYPH_SELECTOR: &str = "span";
pub(crate) const TAB_BUTTON_SELECTOR: &str = ".tab-btn";
pub(crate) const TAB_PANEL_SELECTOR: &str = ".tab-content";
/// Dataset key on a tab button naming its panel's id (`data-tab`).
pub(crate) const TAB_TARGET_KEY: &str = "tab";

/// Ids of the elements the controller binds to. Defaults are the page's published contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub click_button: String,
    pub click_message: String,
    pub hover_box: String,
    pub reset_button: String,
    pub keyboard_input: String,
    pub mirror_text: String,
    pub dark_mode_toggle: String,
    pub increment: String,
    pub decrement: String,
    pub counter: String,
    pub form: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub form_success: String,
    pub drag_source: String,
    pub drop_target: String,
    /// Optional: when absent, a drop writes the text marker instead of moving an image.
    pub drag_image: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            click_button: "click-btn".into(),
            click_message: "click-message".into(),
            hover_box: "hover-box".into(),
            reset_button: "reset-btn".into(),
            keyboard_input: "keyboard-input".into(),
            mirror_text: "mirror-text".into(),
            dark_mode_toggle: "dark-mode-toggle".into(),
            increment: "increment".into(),
            decrement: "decrement".into(),
            counter: "counter".into(),
            form: "user-form".into(),
            name: "name".into(),
            email: "email".into(),
            password: "password".into(),
            confirm_password: "confirm-password".into(),
            form_success: "form-success".into(),
            drag_source: "draggableBox".into(),
            drop_target: "dropZone".into(),
            drag_image: "dragImg".into(),
        }
    }
}

impl ElementIds {
    pub fn input(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Inline error element for `field`: the input id with an `-error` suffix.
    pub fn error(&self, field: Field) -> String {
        format!("{}-error", self.input(field))
    }
}

/// Inline colors written by the widgets. Values are CSS, usually custom properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub success: String,
    pub danger: String,
    pub primary: String,
    pub hover_text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            success: "var(--success)".into(),
            danger: "var(--danger)".into(),
            primary: "var(--primary)".into(),
            hover_text: "white".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub click_message: String,
    pub hover_active: String,
    pub hover_idle: String,
    pub dropped: String,
    pub faq_open_glyph: String,
    pub faq_closed_glyph: String,
    pub transfer_format: String,
    pub transfer_marker: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            click_message: "Button clicked! Event handling works!".into(),
            hover_active: "Mouse is over!".into(),
            hover_idle: "Hover over me!".into(),
            dropped: "Dropped!".into(),
            faq_open_glyph: "-".into(),
            faq_closed_glyph: "+".into(),
            transfer_format: "text/plain".into(),
            transfer_marker: "dragged".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub ids: ElementIds,
    pub palette: Palette,
    pub messages: Messages,
    pub success_banner_delay_ms: i64,
    /// When set, an accepted submit cancels the previous pending banner hide instead of
    /// stacking a second one.
    pub cancel_pending_banner_hide: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            palette: Palette::default(),
            messages: Messages::default(),
            success_banner_delay_ms: 5_000,
            cancel_pending_banner_hide: false,
        }
    }
}

impl ControllerConfig {
    pub fn with_ids(mut self, ids: ElementIds) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_success_banner_delay_ms(mut self, delay_ms: i64) -> Self {
        self.success_banner_delay_ms = delay_ms;
        self
    }

    pub fn with_cancel_pending_banner_hide(mut self, enabled: bool) -> Self {
        self.cancel_pending_banner_hide = enabled;
        self
    }
}
