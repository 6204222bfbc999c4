use std::collections::BTreeMap;

use crate::controller::{InteractionController, MountId, PageContext};
use crate::dom::{Dom, NodeId, truncate_chars};
use crate::events::{DataTransfer, EventKind, EventState, ListenerStore};
use crate::html::parse_html;
use crate::scheduler::{PendingTimer, ScheduledTask, SchedulerState};
use crate::trace::{TraceCategory, TraceState};
use crate::{Error, Result};

mod actions;
mod assertions;
mod mount;

/// Stack reserved for a user action. Dispatch walks the whole ancestor chain, so deep markup
/// must not exhaust the caller's stack.
const DISPATCH_STACK_BYTES: usize = 32 * 1024 * 1024;

/// A parsed page with a virtual clock.
///
/// Everything is deterministic: events run to completion synchronously and timers only fire
/// when the clock is advanced.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) trace: TraceState,
    pub(crate) controllers: BTreeMap<MountId, InteractionController>,
    next_mount_id: u64,
    /// Transfer data of the drag in progress, from dragstart until dragend.
    drag_session: Option<DataTransfer>,
    native_submits: usize,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            dom: parse_html(html)?,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            trace: TraceState::default(),
            controllers: BTreeMap::new(),
            next_mount_id: 1,
            drag_session: None,
            native_submits: 0,
        })
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace.timers = enabled;
    }

    pub fn set_trace_bindings(&mut self, enabled: bool) {
        self.trace.bindings = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace.set_log_limit(max_entries);
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        let existed = self.scheduler.clear_timeout(timer_id) > 0;
        self.trace.line(
            TraceCategory::Timer,
            format!("[timer] clear id={timer_id} existed={existed}"),
        );
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.clear_all();
        self.trace.line(
            TraceCategory::Timer,
            format!("[timer] clear_all cleared={cleared}"),
        );
        cleared
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = from.saturating_add(delta_ms);
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace.line(
            TraceCategory::Timer,
            format!(
                "[timer] advance delta_ms={delta_ms} from={from} to={} ran_due={ran}",
                self.scheduler.now_ms
            ),
        );
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = target_ms;
        let ran = self.run_timer_queue(Some(target_ms), false)?;
        self.trace.line(
            TraceCategory::Timer,
            format!("[timer] advance_to from={from} to={target_ms} ran_due={ran}"),
        );
        Ok(())
    }

    /// Runs every queued timer, moving the clock forward to each one's due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace.line(
            TraceCategory::Timer,
            format!(
                "[timer] flush from={from} to={} ran={ran}",
                self.scheduler.now_ms
            ),
        );
        Ok(())
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace.line(
            TraceCategory::Timer,
            format!(
                "[timer] run_due now_ms={} ran={ran}",
                self.scheduler.now_ms
            ),
        );
        Ok(ran)
    }

    /// Runs the earliest timer even if it is not due yet, advancing the clock to it.
    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.scheduler.next_task_index(None) else {
            self.trace
                .line(TraceCategory::Timer, "[timer] run_next none".into());
            return Ok(false);
        };
        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        let next_task_desc = self
            .scheduler
            .next_task_index(due_limit)
            .and_then(|idx| self.scheduler.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},due_at={},order={},mount={}",
                    task.id, task.due_at, task.order, task.mount
                )
            })
            .unwrap_or_else(|| "none".into());
        Error::Runtime(format!(
            "timer queue exceeded max steps: limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}, next_task={next_task_desc}",
            self.scheduler.timer_step_limit,
            self.scheduler.now_ms,
            self.scheduler.task_queue.len(),
        ))
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace.line(
            TraceCategory::Timer,
            format!(
                "[timer] run id={} due_at={} mount={} now_ms={}",
                task.id, task.due_at, task.mount, self.scheduler.now_ms
            ),
        );
        let Some(controller) = self.controllers.get_mut(&task.mount) else {
            return Ok(());
        };
        let mut cx = PageContext {
            dom: &mut self.dom,
            scheduler: &mut self.scheduler,
            trace: &mut self.trace,
        };
        stacker::grow(DISPATCH_STACK_BYTES, || {
            controller.run_timer(task.id, task.task, &mut cx)
        })
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    fn dispatch_event(&mut self, target: NodeId, kind: EventKind) -> Result<EventState> {
        let event = EventState::new(kind, target, self.scheduler.now_ms);
        self.dispatch_prepared(event)
    }

    /// Runs the target's listeners, then each ancestor's up to the document.
    fn dispatch_prepared(&mut self, mut event: EventState) -> Result<EventState> {
        let mut path = Vec::new();
        let mut cursor = Some(event.target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        for node in path {
            event.current_target = node;
            self.invoke_listeners(node, &mut event)?;
        }

        self.trace_event_done(&event);
        Ok(event)
    }

    fn invoke_listeners(&mut self, node_id: NodeId, event: &mut EventState) -> Result<()> {
        let listeners = self.listeners.get(node_id, event.kind);
        for listener in listeners {
            if self.trace.enabled {
                let line = format!(
                    "[event] {} target={} current={} handler={} mount={} default_prevented={}",
                    event.kind,
                    self.trace_node_label(event.target),
                    self.trace_node_label(event.current_target),
                    listener.handler.label(),
                    listener.mount,
                    event.default_prevented
                );
                self.trace.line(TraceCategory::Event, line);
            }
            let Some(controller) = self.controllers.get_mut(&listener.mount) else {
                continue;
            };
            let mut cx = PageContext {
                dom: &mut self.dom,
                scheduler: &mut self.scheduler,
                trace: &mut self.trace,
            };
            controller.handle(listener.handler, &mut cx, event)?;
        }
        Ok(())
    }

    fn trace_event_done(&mut self, event: &EventState) {
        if !self.trace.enabled {
            return;
        }
        let line = format!(
            "[event] done {} target={} default_prevented={}",
            event.kind,
            self.trace_node_label(event.target),
            event.default_prevented
        );
        self.trace.line(TraceCategory::Event, line);
    }

    fn trace_node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }
}
