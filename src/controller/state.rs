use std::collections::BTreeSet;

use crate::validation::{Field, FieldState};

/// Everything the widgets know. Handlers change this; render functions project it onto the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub click_message_shown: bool,
    pub hover: HoverState,
    pub mirror_text: String,
    pub dark_mode: bool,
    pub count: i64,
    pub faq: FaqState,
    pub tabs: TabsState,
    pub form: FormState,
    pub drag: DragState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

/// Which display color the counter takes for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTone {
    Success,
    Danger,
    Neutral,
}

impl CounterTone {
    pub fn for_count(count: i64) -> Self {
        match count {
            c if c > 0 => CounterTone::Success,
            c if c < 0 => CounterTone::Danger,
            _ => CounterTone::Neutral,
        }
    }
}

/// Open accordion items, by their index in document order. Any number may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqState {
    pub open: BTreeSet<usize>,
}

impl FaqState {
    pub fn is_open(&self, item: usize) -> bool {
        self.open.contains(&item)
    }

    /// Flips `item` and returns its new flag.
    pub fn toggle(&mut self, item: usize) -> bool {
        if self.open.remove(&item) {
            false
        } else {
            self.open.insert(item);
            true
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabsState {
    /// Index of the active tab button in document order.
    pub active: Option<usize>,
    /// Id of the panel shown with it.
    pub active_panel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub fields: [FieldState; 4],
    pub banner_visible: bool,
    pub accepted_submissions: u32,
    pub rejected_submissions: u32,
}

impl FormState {
    pub fn field(&self, field: Field) -> FieldState {
        self.fields[field.index()]
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut FieldState {
        &mut self.fields[field.index()]
    }

    pub fn visible_errors(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.field(*field).error_visible)
            .collect()
    }

    pub(crate) fn reset_fields(&mut self) {
        self.fields = Default::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    pub dragging: bool,
    pub over_target: bool,
    pub dropped: bool,
}
