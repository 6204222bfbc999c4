use super::{DISPATCH_STACK_BYTES, Page};
use crate::dom::{Dom, NodeId};
use crate::events::{DataTransfer, EventKind, EventState};
use crate::trace::TraceCategory;
use crate::{Error, Result};

impl Page {
    /// Clicks the first match. Checkboxes toggle and submit controls submit their form unless a
    /// click listener prevented the default.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        stacker::grow(DISPATCH_STACK_BYTES, || self.click_node(target))
    }

    /// Two clicks followed by `dblclick`, the order a browser produces.
    pub fn double_click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.click_node(target)?;
            self.click_node(target)?;
            self.dispatch_event(target, EventKind::DblClick)?;
            Ok(())
        })
    }

    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.dispatch_event(target, EventKind::MouseOver)?;
            Ok(())
        })
    }

    pub fn unhover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.dispatch_event(target, EventKind::MouseOut)?;
            Ok(())
        })
    }

    /// Replaces the control's value and fires `input`. Disabled and read-only controls ignore it.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.dom.set_value(target, text)?;
            self.dispatch_event(target, EventKind::Input)?;
            Ok(())
        })
    }

    /// Sets a checkbox. `input` and `change` fire only when the state actually changes.
    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        if !is_checkbox_input(&self.dom, target) {
            let actual = match self.dom.tag_name(target) {
                Some(tag) if tag.eq_ignore_ascii_case("input") => format!(
                    "input[type={}]",
                    self.dom.attr(target, "type").unwrap_or_else(|| "text".into())
                ),
                Some(tag) => tag.to_ascii_lowercase(),
                None => "non-element".into(),
            };
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox]".into(),
                actual,
            });
        }

        stacker::grow(DISPATCH_STACK_BYTES, || {
            if self.dom.checked(target)? != checked {
                self.dom.set_checked(target, checked)?;
                self.dispatch_event(target, EventKind::Input)?;
                self.dispatch_event(target, EventKind::Change)?;
            }
            Ok(())
        })
    }

    /// Submits the matched form, or the form owning the matched control.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let Some(form) = self.resolve_form_for_submit(target) else {
            return Ok(());
        };
        stacker::grow(DISPATCH_STACK_BYTES, || self.submit_form(form))
    }

    /// Fires a bare event of type `event` at the first match.
    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let kind = event.parse::<EventKind>()?;
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            if kind.is_drag() {
                self.dispatch_drag(target, kind)?;
            } else {
                self.dispatch_event(target, kind)?;
            }
            Ok(())
        })
    }

    /// Starts a drag session on the matched element with an empty transfer store.
    pub fn drag_start(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.dispatch_drag(target, EventKind::DragStart)?;
            Ok(())
        })
    }

    /// Returns whether a listener accepted the drop by preventing the default.
    pub fn drag_over(&mut self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            Ok(self
                .dispatch_drag(target, EventKind::DragOver)?
                .default_prevented)
        })
    }

    pub fn drag_leave(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.dispatch_drag(target, EventKind::DragLeave)?;
            Ok(())
        })
    }

    /// Fires `drop` unconditionally. Use [`Page::drag_and_drop`] for browser gating.
    pub fn drop(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.dispatch_drag(target, EventKind::Drop)?;
            Ok(())
        })
    }

    /// Ends the drag session on the source element.
    pub fn drag_end(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(DISPATCH_STACK_BYTES, || {
            self.dispatch_drag(target, EventKind::DragEnd)?;
            Ok(())
        })
    }

    /// A full gesture: dragstart, dragover, then drop if the target accepted it (dragleave
    /// otherwise), then dragend. Returns whether the drop happened.
    pub fn drag_and_drop(&mut self, source: &str, target: &str) -> Result<bool> {
        self.drag_start(source)?;
        let accepted = self.drag_over(target)?;
        if accepted {
            self.drop(target)?;
        } else {
            self.drag_leave(target)?;
        }
        self.drag_end(source)?;
        Ok(accepted)
    }

    /// Transfer data of the drag in progress.
    pub fn drag_transfer(&self) -> Option<&DataTransfer> {
        self.drag_session.as_ref()
    }

    /// How many submissions reached the browser's default action (nobody prevented it).
    pub fn native_submit_count(&self) -> usize {
        self.native_submits
    }

    fn click_node(&mut self, target: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(target, EventKind::Click)?;
        if outcome.default_prevented {
            return Ok(());
        }

        if is_checkbox_input(&self.dom, target) {
            let current = self.dom.checked(target)?;
            self.dom.set_checked(target, !current)?;
            self.dispatch_event(target, EventKind::Input)?;
            self.dispatch_event(target, EventKind::Change)?;
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
                self.submit_form(form)?;
            }
        }
        Ok(())
    }

    fn submit_form(&mut self, form: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(form, EventKind::Submit)?;
        if !outcome.default_prevented {
            self.native_submits += 1;
            let line = format!(
                "[event] native submit {} count={}",
                self.trace_node_label(form),
                self.native_submits
            );
            self.trace.line(TraceCategory::Event, line);
        }
        Ok(())
    }

    /// Drag events share the session's transfer store: writes made by one listener are visible
    /// to every later event of the same drag. `dragstart` opens a fresh session and `dragend`
    /// closes it; drag events outside a session get a throwaway store.
    fn dispatch_drag(&mut self, target: NodeId, kind: EventKind) -> Result<EventState> {
        let in_session = kind == EventKind::DragStart || self.drag_session.is_some();
        let transfer = match kind {
            EventKind::DragStart => DataTransfer::new(),
            _ => self.drag_session.take().unwrap_or_default(),
        };
        let mut event = EventState::new(kind, target, self.scheduler.now_ms);
        event.data_transfer = Some(transfer);
        let outcome = self.dispatch_prepared(event)?;
        self.drag_session = if in_session && kind != EventKind::DragEnd {
            outcome.data_transfer.clone()
        } else {
            None
        };
        Ok(outcome)
    }

    fn resolve_form_for_submit(&self, target: NodeId) -> Option<NodeId> {
        if self
            .dom
            .tag_name(target)
            .map(|tag| tag.eq_ignore_ascii_case("form"))
            .unwrap_or(false)
        {
            return Some(target);
        }
        self.dom.find_ancestor_by_tag(target, "form")
    }
}

fn is_checkbox_input(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if !element.tag_name.eq_ignore_ascii_case("input") {
        return false;
    }
    element
        .attrs
        .get("type")
        .map(|kind| kind.eq_ignore_ascii_case("checkbox"))
        .unwrap_or(false)
}

/// Buttons default to `type=submit`; inputs only submit when they say so.
fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if element.tag_name.eq_ignore_ascii_case("button") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }
    if element.tag_name.eq_ignore_ascii_case("input") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(false);
    }
    false
}
