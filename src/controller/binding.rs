//! Element resolution for each widget.
//!
//! Widgets resolve independently. A widget whose required element is missing is left unbound
//! and its `ElementNotFound` lands in the mount report; the rest still bind.

use super::config::{
    ACTIVE_CLASS, ControllerConfig, ElementIds, FAQ_GLYPH_SELECTOR, FAQ_ITEM_SELECTOR,
    FAQ_QUESTION_SELECTOR, TAB_BUTTON_SELECTOR, TAB_PANEL_SELECTOR, TAB_TARGET_KEY,
};
use super::state::ControllerState;
use super::{Handler, MountReport, Widget};
use crate::dom::{Dom, NodeId};
use crate::events::EventKind;
use crate::validation::Field;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct ClickDemoElements {
    pub(crate) button: NodeId,
    pub(crate) message: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct HoverElements {
    pub(crate) hover_box: NodeId,
    pub(crate) reset: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct MirrorElements {
    pub(crate) input: NodeId,
    pub(crate) output: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct DarkModeElements {
    pub(crate) toggle: NodeId,
    pub(crate) body: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct CounterElements {
    pub(crate) increment: NodeId,
    pub(crate) decrement: NodeId,
    pub(crate) display: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct FaqItemElements {
    pub(crate) item: NodeId,
    pub(crate) question: NodeId,
    pub(crate) glyph: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct FaqElements {
    pub(crate) items: Vec<FaqItemElements>,
}

#[derive(Debug, Clone)]
pub(crate) struct TabElements {
    pub(crate) button: NodeId,
    pub(crate) panel: NodeId,
    pub(crate) panel_id: String,
}

#[derive(Debug, Clone)]
pub(crate) struct TabsElements {
    pub(crate) tabs: Vec<TabElements>,
    /// Every `.tab-content` on the page, including panels no button points at.
    pub(crate) panels: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct FormElements {
    pub(crate) form: NodeId,
    pub(crate) inputs: [NodeId; 4],
    pub(crate) errors: [NodeId; 4],
    pub(crate) success: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct DragDropElements {
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct BoundElements {
    pub(crate) click_demo: Option<ClickDemoElements>,
    pub(crate) hover: Option<HoverElements>,
    pub(crate) mirror: Option<MirrorElements>,
    pub(crate) dark_mode: Option<DarkModeElements>,
    pub(crate) counter: Option<CounterElements>,
    pub(crate) faq: Option<FaqElements>,
    pub(crate) tabs: Option<TabsElements>,
    pub(crate) form: Option<FormElements>,
    pub(crate) drag_drop: Option<DragDropElements>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Binding {
    pub(crate) node: NodeId,
    pub(crate) kind: EventKind,
    pub(crate) handler: Handler,
}

pub(crate) struct BindOutcome {
    pub(crate) elements: BoundElements,
    pub(crate) state: ControllerState,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) report: MountReport,
}

/// Resolves every widget against `dom`. Only errors other than a missing element abort.
pub(crate) fn bind(dom: &Dom, config: &ControllerConfig) -> Result<BindOutcome> {
    let ids = &config.ids;
    let mut report = MountReport::default();
    let mut elements = BoundElements::default();

    elements.click_demo = settle(&mut report, Widget::ClickDemo, click_demo(dom, ids))?;
    elements.hover = settle(&mut report, Widget::HoverBox, hover(dom, ids))?;
    elements.mirror = settle(&mut report, Widget::KeyboardMirror, mirror(dom, ids))?;
    elements.dark_mode = settle(&mut report, Widget::DarkMode, dark_mode(dom, ids))?;
    elements.counter = settle(&mut report, Widget::Counter, counter(dom, ids))?;
    elements.faq = settle(&mut report, Widget::Faq, faq(dom))?;
    elements.tabs = settle(&mut report, Widget::Tabs, tabs(dom))?;
    elements.form = settle(&mut report, Widget::Form, form(dom, ids))?;
    elements.drag_drop = settle(&mut report, Widget::DragDrop, drag_drop(dom, ids))?;

    let bindings = elements.bindings();
    let state = elements.initial_state(dom)?;
    report.listeners = bindings.len();
    Ok(BindOutcome {
        elements,
        state,
        bindings,
        report,
    })
}

fn settle<T>(report: &mut MountReport, widget: Widget, resolved: Result<T>) -> Result<Option<T>> {
    match resolved {
        Ok(elements) => {
            report.bound.push(widget);
            Ok(Some(elements))
        }
        Err(err @ Error::ElementNotFound { .. }) => {
            report.failures.push(err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn require(dom: &Dom, widget: Widget, id: &str) -> Result<NodeId> {
    dom.by_id(id).ok_or_else(|| Error::ElementNotFound {
        widget,
        id: id.to_string(),
    })
}

fn click_demo(dom: &Dom, ids: &ElementIds) -> Result<ClickDemoElements> {
    Ok(ClickDemoElements {
        button: require(dom, Widget::ClickDemo, &ids.click_button)?,
        message: require(dom, Widget::ClickDemo, &ids.click_message)?,
    })
}

fn hover(dom: &Dom, ids: &ElementIds) -> Result<HoverElements> {
    Ok(HoverElements {
        hover_box: require(dom, Widget::HoverBox, &ids.hover_box)?,
        reset: require(dom, Widget::HoverBox, &ids.reset_button)?,
    })
}

fn mirror(dom: &Dom, ids: &ElementIds) -> Result<MirrorElements> {
    Ok(MirrorElements {
        input: require(dom, Widget::KeyboardMirror, &ids.keyboard_input)?,
        output: require(dom, Widget::KeyboardMirror, &ids.mirror_text)?,
    })
}

fn dark_mode(dom: &Dom, ids: &ElementIds) -> Result<DarkModeElements> {
    let toggle = require(dom, Widget::DarkMode, &ids.dark_mode_toggle)?;
    let body = dom.body().ok_or_else(|| Error::ElementNotFound {
        widget: Widget::DarkMode,
        id: "body".into(),
    })?;
    Ok(DarkModeElements { toggle, body })
}

fn counter(dom: &Dom, ids: &ElementIds) -> Result<CounterElements> {
    Ok(CounterElements {
        increment: require(dom, Widget::Counter, &ids.increment)?,
        decrement: require(dom, Widget::Counter, &ids.decrement)?,
        display: require(dom, Widget::Counter, &ids.counter)?,
    })
}

/// Every `.faq-item` needs a `.faq-question`; the glyph `span` inside it is optional.
fn faq(dom: &Dom) -> Result<FaqElements> {
    let mut items = Vec::new();
    for item in dom.query_selector_all(FAQ_ITEM_SELECTOR)? {
        let question = dom
            .query_selector_from(item, FAQ_QUESTION_SELECTOR)?
            .ok_or_else(|| Error::ElementNotFound {
                widget: Widget::Faq,
                id: FAQ_QUESTION_SELECTOR.into(),
            })?;
        let glyph = dom.query_selector_from(question, FAQ_GLYPH_SELECTOR)?;
        items.push(FaqItemElements {
            item,
            question,
            glyph,
        });
    }
    Ok(FaqElements { items })
}

/// Each tab button names its panel through `data-tab`. Panels are resolved now, so a button
/// pointing nowhere fails the widget at mount instead of at click time.
fn tabs(dom: &Dom) -> Result<TabsElements> {
    let mut tabs = Vec::new();
    for button in dom.query_selector_all(TAB_BUTTON_SELECTOR)? {
        let panel_id = dom
            .dataset_get(button, TAB_TARGET_KEY)
            .ok_or_else(|| Error::ElementNotFound {
                widget: Widget::Tabs,
                id: format!("data-{TAB_TARGET_KEY}"),
            })?;
        let panel = require(dom, Widget::Tabs, &panel_id)?;
        tabs.push(TabElements {
            button,
            panel,
            panel_id,
        });
    }
    let panels = dom.query_selector_all(TAB_PANEL_SELECTOR)?;
    Ok(TabsElements { tabs, panels })
}

fn form(dom: &Dom, ids: &ElementIds) -> Result<FormElements> {
    let form = require(dom, Widget::Form, &ids.form)?;
    let mut inputs = [form; 4];
    let mut errors = [form; 4];
    for field in Field::ALL {
        inputs[field.index()] = require(dom, Widget::Form, ids.input(field))?;
        errors[field.index()] = require(dom, Widget::Form, &ids.error(field))?;
    }
    let success = require(dom, Widget::Form, &ids.form_success)?;
    Ok(FormElements {
        form,
        inputs,
        errors,
        success,
    })
}

fn drag_drop(dom: &Dom, ids: &ElementIds) -> Result<DragDropElements> {
    Ok(DragDropElements {
        source: require(dom, Widget::DragDrop, &ids.drag_source)?,
        target: require(dom, Widget::DragDrop, &ids.drop_target)?,
    })
}

impl BoundElements {
    /// One (element, event, handler) triple per listener, in widget order.
    pub(crate) fn bindings(&self) -> Vec<Binding> {
        let mut out = Vec::new();
        let mut push = |node, kind, handler| out.push(Binding {
            node,
            kind,
            handler,
        });

        if let Some(click) = &self.click_demo {
            push(click.button, EventKind::Click, Handler::ShowClickMessage);
        }
        if let Some(hover) = &self.hover {
            push(hover.hover_box, EventKind::MouseOver, Handler::HoverEnter);
            push(hover.hover_box, EventKind::MouseOut, Handler::HoverLeave);
            push(hover.reset, EventKind::DblClick, Handler::HoverReset);
        }
        if let Some(mirror) = &self.mirror {
            push(mirror.input, EventKind::Input, Handler::MirrorInput);
        }
        if let Some(dark) = &self.dark_mode {
            push(dark.toggle, EventKind::Change, Handler::DarkModeChange);
        }
        if let Some(counter) = &self.counter {
            push(counter.increment, EventKind::Click, Handler::Increment);
            push(counter.decrement, EventKind::Click, Handler::Decrement);
        }
        if let Some(faq) = &self.faq {
            for (item, elements) in faq.items.iter().enumerate() {
                push(elements.question, EventKind::Click, Handler::FaqToggle { item });
            }
        }
        if let Some(tabs) = &self.tabs {
            for (tab, elements) in tabs.tabs.iter().enumerate() {
                push(elements.button, EventKind::Click, Handler::TabSelect { tab });
            }
        }
        if let Some(form) = &self.form {
            push(form.form, EventKind::Submit, Handler::FormSubmit);
            for field in Field::ALL {
                push(
                    form.inputs[field.index()],
                    EventKind::Input,
                    Handler::FieldInput(field),
                );
            }
        }
        if let Some(drag) = &self.drag_drop {
            push(drag.source, EventKind::DragStart, Handler::DragStart);
            push(drag.source, EventKind::DragEnd, Handler::DragEnd);
            push(drag.target, EventKind::DragOver, Handler::DragOver);
            push(drag.target, EventKind::DragLeave, Handler::DragLeave);
            push(drag.target, EventKind::Drop, Handler::Drop);
        }
        out
    }

    /// Reads the state the markup already shows. Nothing is written back.
    pub(crate) fn initial_state(&self, dom: &Dom) -> Result<ControllerState> {
        let mut state = ControllerState::default();

        if let Some(mirror) = &self.mirror {
            state.mirror_text = dom.text_content(mirror.output);
        }
        if let Some(dark) = &self.dark_mode {
            state.dark_mode = dom.checked(dark.toggle)?;
        }
        if let Some(faq) = &self.faq {
            for (index, item) in faq.items.iter().enumerate() {
                if dom.class_contains(item.item, ACTIVE_CLASS)? {
                    state.faq.open.insert(index);
                }
            }
        }
        if let Some(tabs) = &self.tabs {
            for (index, tab) in tabs.tabs.iter().enumerate() {
                if dom.class_contains(tab.button, ACTIVE_CLASS)? {
                    state.tabs.active = Some(index);
                    state.tabs.active_panel = Some(tab.panel_id.clone());
                    break;
                }
            }
        }
        if let Some(form) = &self.form {
            state.form.banner_visible = dom.style_get(form.success, "display")? == "block";
            for field in Field::ALL {
                state.form.fields[field.index()].error_visible =
                    dom.style_get(form.errors[field.index()], "display")? == "block";
            }
        }
        Ok(state)
    }
}
