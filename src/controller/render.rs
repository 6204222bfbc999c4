//! Projections of controller state slices onto the page.
//!
//! Each function writes every property its widget owns, so calling it twice with the same state
//! is a no-op. Drops are the exception: moving an element is not a projection and happens once.

use super::binding::{
    ClickDemoElements, CounterElements, DarkModeElements, DragDropElements, FaqItemElements,
    FormElements, HoverElements, MirrorElements, TabsElements,
};
use super::config::{
    ACTIVE_CLASS, DARK_MODE_CLASS, DRAGGING_CLASS, DRAGOVER_CLASS, Messages, Palette,
};
use super::state::{CounterTone, DragState, FormState, HoverState, TabsState};
use crate::Result;
use crate::dom::{Dom, NodeId};
use crate::validation::Field;

const SHOWN: &str = "block";
const HIDDEN: &str = "none";

pub(crate) fn click_demo(
    dom: &mut Dom,
    elements: &ClickDemoElements,
    palette: &Palette,
    messages: &Messages,
    shown: bool,
) -> Result<()> {
    if !shown {
        return Ok(());
    }
    dom.set_text_content(elements.message, &messages.click_message)?;
    dom.style_set(elements.message, "color", &palette.success)
}

pub(crate) fn hover_box(
    dom: &mut Dom,
    elements: &HoverElements,
    palette: &Palette,
    messages: &Messages,
    hover: HoverState,
) -> Result<()> {
    let (background, color, text) = match hover {
        HoverState::Hovered => (
            palette.primary.as_str(),
            palette.hover_text.as_str(),
            messages.hover_active.as_str(),
        ),
        HoverState::Idle => ("", "", messages.hover_idle.as_str()),
    };
    dom.style_set(elements.hover_box, "background-color", background)?;
    dom.style_set(elements.hover_box, "color", color)?;
    dom.set_text_content(elements.hover_box, text)
}

pub(crate) fn mirror(dom: &mut Dom, elements: &MirrorElements, text: &str) -> Result<()> {
    dom.set_text_content(elements.output, text)
}

pub(crate) fn dark_mode(dom: &mut Dom, elements: &DarkModeElements, enabled: bool) -> Result<()> {
    dom.class_set(elements.body, DARK_MODE_CLASS, enabled)
}

pub(crate) fn counter(
    dom: &mut Dom,
    elements: &CounterElements,
    palette: &Palette,
    count: i64,
) -> Result<()> {
    dom.set_text_content(elements.display, &count.to_string())?;
    let color = match CounterTone::for_count(count) {
        CounterTone::Success => &palette.success,
        CounterTone::Danger => &palette.danger,
        CounterTone::Neutral => &palette.primary,
    };
    dom.style_set(elements.display, "color", color)
}

pub(crate) fn faq_item(
    dom: &mut Dom,
    item: &FaqItemElements,
    messages: &Messages,
    open: bool,
) -> Result<()> {
    dom.class_set(item.item, ACTIVE_CLASS, open)?;
    if let Some(glyph) = item.glyph {
        let text = if open {
            &messages.faq_open_glyph
        } else {
            &messages.faq_closed_glyph
        };
        dom.set_text_content(glyph, text)?;
    }
    Ok(())
}

/// Clears the marker from every tab and panel, then marks the active pair.
pub(crate) fn tabs(dom: &mut Dom, elements: &TabsElements, state: &TabsState) -> Result<()> {
    for tab in &elements.tabs {
        dom.class_remove(tab.button, ACTIVE_CLASS)?;
    }
    for panel in &elements.panels {
        dom.class_remove(*panel, ACTIVE_CLASS)?;
    }
    if let Some(tab) = state.active.and_then(|index| elements.tabs.get(index)) {
        dom.class_add(tab.button, ACTIVE_CLASS)?;
        dom.class_add(tab.panel, ACTIVE_CLASS)?;
    }
    Ok(())
}

pub(crate) fn field_error(
    dom: &mut Dom,
    elements: &FormElements,
    form: &FormState,
    field: Field,
) -> Result<()> {
    let display = if form.field(field).error_visible {
        SHOWN
    } else {
        HIDDEN
    };
    dom.style_set(elements.errors[field.index()], "display", display)
}

pub(crate) fn success_banner(dom: &mut Dom, elements: &FormElements, visible: bool) -> Result<()> {
    let display = if visible { SHOWN } else { HIDDEN };
    dom.style_set(elements.success, "display", display)
}

/// Puts every input back to its markup default, like `HTMLFormElement.reset()`.
pub(crate) fn reset_inputs(dom: &mut Dom, elements: &FormElements) -> Result<()> {
    for input in elements.inputs {
        let default_value = dom.attr(input, "value").unwrap_or_default();
        dom.set_value(input, &default_value)?;
    }
    Ok(())
}

pub(crate) fn drag_marks(dom: &mut Dom, elements: &DragDropElements, drag: DragState) -> Result<()> {
    dom.class_set(elements.source, DRAGGING_CLASS, drag.dragging)?;
    dom.class_set(elements.target, DRAGOVER_CLASS, drag.over_target)
}

/// Fills the drop target: the image moves in when it exists, otherwise the text marker is
/// written. The drag source is hidden either way.
pub(crate) fn drop_result(
    dom: &mut Dom,
    elements: &DragDropElements,
    messages: &Messages,
    image: Option<NodeId>,
) -> Result<()> {
    match image {
        Some(image) => {
            dom.clear_children(elements.target)?;
            dom.append_child(elements.target, image)?;
        }
        None => dom.set_text_content(elements.target, &messages.dropped)?,
    }
    dom.style_set(elements.source, "display", HIDDEN)
}
