use super::state::HoverState;
use super::{Handler, InteractionController, PageContext, TimerTask, render};
use crate::Result;
use crate::dom::Dom;
use crate::events::{DataTransfer, EventState};
use crate::trace::TraceCategory;
use crate::validation::{Field, FieldStatus, FormValues};

impl InteractionController {
    /// Runs one bound handler: update the state slice, then project it.
    pub(crate) fn handle(
        &mut self,
        handler: Handler,
        cx: &mut PageContext<'_>,
        event: &mut EventState,
    ) -> Result<()> {
        match handler {
            Handler::ShowClickMessage => self.show_click_message(cx),
            Handler::HoverEnter => self.set_hover(cx, HoverState::Hovered),
            Handler::HoverLeave | Handler::HoverReset => self.set_hover(cx, HoverState::Idle),
            Handler::MirrorInput => self.mirror_input(cx),
            Handler::DarkModeChange => self.dark_mode_change(cx),
            Handler::Increment => self.step_counter(cx, 1),
            Handler::Decrement => self.step_counter(cx, -1),
            Handler::FaqToggle { item } => self.faq_toggle(cx, item),
            Handler::TabSelect { tab } => self.tab_select(cx, tab),
            Handler::FormSubmit => self.form_submit(cx, event),
            Handler::FieldInput(field) => self.field_input(cx, field),
            Handler::DragStart => self.drag_start(cx, event),
            Handler::DragEnd => self.drag_end(cx),
            Handler::DragOver => self.drag_over(cx, event),
            Handler::DragLeave => self.drag_leave(cx),
            Handler::Drop => self.drop_on_target(cx, event),
        }
    }

    pub(crate) fn run_timer(
        &mut self,
        timer_id: i64,
        task: TimerTask,
        cx: &mut PageContext<'_>,
    ) -> Result<()> {
        match task {
            TimerTask::HideSuccessBanner => {
                if self.banner_timer == Some(timer_id) {
                    self.banner_timer = None;
                }
                self.state.form.banner_visible = false;
                let Some(form) = &self.elements.form else {
                    return Ok(());
                };
                render::success_banner(cx.dom, form, false)?;
                cx.trace.line(
                    TraceCategory::Form,
                    format!("[form] {} banner hidden timer={timer_id}", self.id),
                );
                Ok(())
            }
        }
    }

    fn show_click_message(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        let Some(click) = &self.elements.click_demo else {
            return Ok(());
        };
        self.state.click_message_shown = true;
        render::click_demo(
            cx.dom,
            click,
            &self.config.palette,
            &self.config.messages,
            true,
        )
    }

    fn set_hover(&mut self, cx: &mut PageContext<'_>, hover: HoverState) -> Result<()> {
        let Some(elements) = &self.elements.hover else {
            return Ok(());
        };
        self.state.hover = hover;
        render::hover_box(
            cx.dom,
            elements,
            &self.config.palette,
            &self.config.messages,
            hover,
        )
    }

    fn mirror_input(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        let Some(mirror) = &self.elements.mirror else {
            return Ok(());
        };
        self.state.mirror_text = cx.dom.value(mirror.input)?;
        render::mirror(cx.dom, mirror, &self.state.mirror_text)
    }

    /// The flag follows the checkbox, so a stray `change` cannot desync it.
    fn dark_mode_change(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        let Some(dark) = &self.elements.dark_mode else {
            return Ok(());
        };
        self.state.dark_mode = cx.dom.checked(dark.toggle)?;
        render::dark_mode(cx.dom, dark, self.state.dark_mode)
    }

    fn step_counter(&mut self, cx: &mut PageContext<'_>, delta: i64) -> Result<()> {
        let Some(counter) = &self.elements.counter else {
            return Ok(());
        };
        self.state.count = self.state.count.saturating_add(delta);
        render::counter(cx.dom, counter, &self.config.palette, self.state.count)
    }

    fn faq_toggle(&mut self, cx: &mut PageContext<'_>, item: usize) -> Result<()> {
        let Some(elements) = self
            .elements
            .faq
            .as_ref()
            .and_then(|faq| faq.items.get(item))
        else {
            return Ok(());
        };
        let open = self.state.faq.toggle(item);
        render::faq_item(cx.dom, elements, &self.config.messages, open)
    }

    fn tab_select(&mut self, cx: &mut PageContext<'_>, tab: usize) -> Result<()> {
        let Some(tabs) = &self.elements.tabs else {
            return Ok(());
        };
        let Some(selected) = tabs.tabs.get(tab) else {
            return Ok(());
        };
        self.state.tabs.active = Some(tab);
        self.state.tabs.active_panel = Some(selected.panel_id.clone());
        render::tabs(cx.dom, tabs, &self.state.tabs)
    }

    /// Input events can only clear an error. A field that stays invalid keeps whatever
    /// visibility its error already had.
    fn field_input(&mut self, cx: &mut PageContext<'_>, field: Field) -> Result<()> {
        let Some(form) = &self.elements.form else {
            return Ok(());
        };
        let values = read_values(cx.dom, &form.inputs)?;
        let valid = self.rules.is_valid(field, &values)?;
        let state = self.state.form.field_mut(field);
        if !valid {
            state.status = FieldStatus::Invalid;
            return Ok(());
        }
        state.status = FieldStatus::Valid;
        state.error_visible = false;
        render::field_error(cx.dom, form, &self.state.form, field)
    }

    fn form_submit(&mut self, cx: &mut PageContext<'_>, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        let Some(form) = &self.elements.form else {
            return Ok(());
        };

        let values = read_values(cx.dom, &form.inputs)?;
        let mut failures = Vec::new();
        for field in Field::ALL {
            let failure = self.rules.check(field, &values)?;
            let state = self.state.form.field_mut(field);
            state.status = if failure.is_some() {
                FieldStatus::Invalid
            } else {
                FieldStatus::Valid
            };
            state.error_visible = failure.is_some();
            render::field_error(cx.dom, form, &self.state.form, field)?;
            failures.extend(failure);
        }

        if !failures.is_empty() {
            self.state.form.rejected_submissions += 1;
            let reasons = failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            cx.trace.line(
                TraceCategory::Form,
                format!("[form] {} submit rejected: {reasons}", self.id),
            );
            return Ok(());
        }

        self.state.form.accepted_submissions += 1;
        self.state.form.banner_visible = true;
        render::success_banner(cx.dom, form, true)?;
        render::reset_inputs(cx.dom, form)?;
        self.state.form.reset_fields();

        if self.config.cancel_pending_banner_hide {
            if let Some(previous) = self.banner_timer.take() {
                cx.scheduler.clear_timeout(previous);
            }
        }
        let timer_id = cx.scheduler.schedule_timeout(
            self.id,
            TimerTask::HideSuccessBanner,
            self.config.success_banner_delay_ms,
        );
        self.banner_timer = Some(timer_id);
        cx.trace.line(
            TraceCategory::Form,
            format!(
                "[form] {} submit accepted, banner hide timer={timer_id} due_in={}",
                self.id, self.config.success_banner_delay_ms
            ),
        );
        Ok(())
    }

    fn drag_start(&mut self, cx: &mut PageContext<'_>, event: &mut EventState) -> Result<()> {
        let Some(drag) = &self.elements.drag_drop else {
            return Ok(());
        };
        self.state.drag.dragging = true;
        let messages = &self.config.messages;
        event
            .data_transfer
            .get_or_insert_with(DataTransfer::new)
            .set_data(&messages.transfer_format, &messages.transfer_marker);
        render::drag_marks(cx.dom, drag, self.state.drag)
    }

    fn drag_end(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        let Some(drag) = &self.elements.drag_drop else {
            return Ok(());
        };
        self.state.drag.dragging = false;
        render::drag_marks(cx.dom, drag, self.state.drag)
    }

    fn drag_over(&mut self, cx: &mut PageContext<'_>, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        let Some(drag) = &self.elements.drag_drop else {
            return Ok(());
        };
        self.state.drag.over_target = true;
        render::drag_marks(cx.dom, drag, self.state.drag)
    }

    fn drag_leave(&mut self, cx: &mut PageContext<'_>) -> Result<()> {
        let Some(drag) = &self.elements.drag_drop else {
            return Ok(());
        };
        self.state.drag.over_target = false;
        render::drag_marks(cx.dom, drag, self.state.drag)
    }

    /// The transfer marker is not checked: any drop on the target counts.
    fn drop_on_target(&mut self, cx: &mut PageContext<'_>, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        let Some(drag) = &self.elements.drag_drop else {
            return Ok(());
        };
        self.state.drag.over_target = false;
        render::drag_marks(cx.dom, drag, self.state.drag)?;

        let image = cx.dom.by_id(&self.config.ids.drag_image);
        render::drop_result(cx.dom, drag, &self.config.messages, image)?;
        self.state.drag.dropped = true;
        cx.trace.line(
            TraceCategory::Event,
            format!(
                "[event] {} drop image_moved={}",
                self.id,
                image.is_some()
            ),
        );
        Ok(())
    }
}

fn read_values(dom: &Dom, inputs: &[crate::dom::NodeId; 4]) -> Result<FormValues> {
    let mut values = FormValues::default();
    for field in Field::ALL {
        values.set(field, dom.value(inputs[field.index()])?);
    }
    Ok(values)
}
