use std::fmt;

use crate::dom::Dom;
use crate::scheduler::SchedulerState;
use crate::trace::TraceState;
use crate::validation::{Field, FormRules};
use crate::{Error, Result};

mod binding;
mod config;
mod handlers;
mod render;
mod state;

pub(crate) use binding::{BindOutcome, bind};
pub use config::{ControllerConfig, ElementIds, Messages, Palette};
pub use state::{
    ControllerState, CounterTone, DragState, FaqState, FormState, HoverState, TabsState,
};

/// Identifies one `Page::mount` call. Listeners and timers carry it so teardown finds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(pub(crate) u64);

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Widget {
    ClickDemo,
    HoverBox,
    KeyboardMirror,
    DarkMode,
    Counter,
    Faq,
    Tabs,
    Form,
    DragDrop,
}

impl Widget {
    pub const ALL: [Widget; 9] = [
        Widget::ClickDemo,
        Widget::HoverBox,
        Widget::KeyboardMirror,
        Widget::DarkMode,
        Widget::Counter,
        Widget::Faq,
        Widget::Tabs,
        Widget::Form,
        Widget::DragDrop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Widget::ClickDemo => "click-demo",
            Widget::HoverBox => "hover-box",
            Widget::KeyboardMirror => "keyboard-mirror",
            Widget::DarkMode => "dark-mode",
            Widget::Counter => "counter",
            Widget::Faq => "faq",
            Widget::Tabs => "tabs",
            Widget::Form => "form",
            Widget::DragDrop => "drag-drop",
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a mount managed to bind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountReport {
    pub bound: Vec<Widget>,
    /// One `Error::ElementNotFound` per widget that could not bind.
    pub failures: Vec<Error>,
    pub listeners: usize,
}

impl MountReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_bound(&self, widget: Widget) -> bool {
        self.bound.contains(&widget)
    }

    pub fn failure(&self, widget: Widget) -> Option<&Error> {
        self.failures.iter().find(|err| {
            matches!(err, Error::ElementNotFound { widget: failed, .. } if *failed == widget)
        })
    }
}

/// Returned by `Page::mount`. Pass it to `Page::teardown` to unbind everything the mount added.
#[must_use = "dropping the handle leaves the controller bound with no way to tear it down"]
#[derive(Debug, PartialEq, Eq)]
pub struct MountHandle {
    pub(crate) id: MountId,
    pub(crate) report: MountReport,
}

impl MountHandle {
    pub fn id(&self) -> MountId {
        self.id
    }

    pub fn report(&self) -> &MountReport {
        &self.report
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    ShowClickMessage,
    HoverEnter,
    HoverLeave,
    HoverReset,
    MirrorInput,
    DarkModeChange,
    Increment,
    Decrement,
    FaqToggle { item: usize },
    TabSelect { tab: usize },
    FormSubmit,
    FieldInput(Field),
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

impl Handler {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Handler::ShowClickMessage => "show_click_message",
            Handler::HoverEnter => "hover_enter",
            Handler::HoverLeave => "hover_leave",
            Handler::HoverReset => "hover_reset",
            Handler::MirrorInput => "mirror_input",
            Handler::DarkModeChange => "dark_mode_change",
            Handler::Increment => "increment",
            Handler::Decrement => "decrement",
            Handler::FaqToggle { .. } => "faq_toggle",
            Handler::TabSelect { .. } => "tab_select",
            Handler::FormSubmit => "form_submit",
            Handler::FieldInput(_) => "field_input",
            Handler::DragStart => "drag_start",
            Handler::DragEnd => "drag_end",
            Handler::DragOver => "drag_over",
            Handler::DragLeave => "drag_leave",
            Handler::Drop => "drop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTask {
    HideSuccessBanner,
}

/// The parts of the page a handler may touch while it runs.
pub(crate) struct PageContext<'a> {
    pub(crate) dom: &'a mut Dom,
    pub(crate) scheduler: &'a mut SchedulerState,
    pub(crate) trace: &'a mut TraceState,
}

/// State and resolved elements for one mount.
#[derive(Debug)]
pub(crate) struct InteractionController {
    pub(crate) id: MountId,
    pub(crate) config: ControllerConfig,
    pub(crate) rules: FormRules,
    pub(crate) elements: binding::BoundElements,
    pub(crate) state: ControllerState,
    /// Id of the most recently scheduled banner hide, while it is pending.
    pub(crate) banner_timer: Option<i64>,
}

impl InteractionController {
    pub(crate) fn new(
        id: MountId,
        config: ControllerConfig,
        elements: binding::BoundElements,
        state: ControllerState,
    ) -> Result<Self> {
        Ok(Self {
            id,
            config,
            rules: FormRules::new()?,
            elements,
            state,
            banner_timer: None,
        })
    }
}
