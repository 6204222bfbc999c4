use std::error::Error as StdError;
use std::fmt;

mod controller;
mod dom;
mod events;
mod html;
mod page;
mod pattern;
mod scheduler;
mod selector;
mod trace;
mod validation;

pub use controller::{
    ControllerConfig, ControllerState, CounterTone, DragState, ElementIds, FaqState, FormState,
    HoverState, Messages, MountHandle, MountId, MountReport, Palette, TabsState, Widget,
};
pub use dom::NodeId;
pub use events::{DataTransfer, EventKind};
pub use page::Page;
pub use scheduler::PendingTimer;
pub use validation::{Field, FieldState, FieldStatus, FormRules, FormValues, ValidationFailure};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    UnsupportedSelector(String),
    SelectorNotFound(String),
    ElementNotFound {
        widget: Widget,
        id: String,
    },
    UnsupportedEvent(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    Pattern(String),
    Runtime(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::ElementNotFound { widget, id } => {
                write!(f, "element not found for {widget}: {id}")
            }
            Self::UnsupportedEvent(event) => write!(f, "unsupported event type: {event}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::Pattern(msg) => write!(f, "pattern error: {msg}"),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests;
