use super::Page;
use crate::Result;
use crate::controller::{
    BindOutcome, ControllerConfig, ControllerState, InteractionController, MountHandle, MountId,
    bind,
};
use crate::events::Listener;
use crate::trace::TraceCategory;

impl Page {
    /// Binds an interaction controller to the page.
    ///
    /// Widgets whose elements are missing are skipped and reported in the handle; everything
    /// else binds. The page is not repainted: the controller starts from what the markup shows.
    /// Mounting again binds a second, independent controller, so every handler then runs twice.
    pub fn mount(&mut self, config: ControllerConfig) -> Result<MountHandle> {
        let BindOutcome {
            elements,
            state,
            bindings,
            report,
        } = bind(&self.dom, &config)?;

        let id = MountId(self.next_mount_id);
        self.next_mount_id += 1;
        let controller = InteractionController::new(id, config, elements, state)?;

        for failure in &report.failures {
            self.trace
                .line(TraceCategory::Bind, format!("[bind] {id} skipped: {failure}"));
        }
        for binding in &bindings {
            self.listeners.add(
                binding.node,
                binding.kind,
                Listener {
                    mount: id,
                    handler: binding.handler,
                },
            );
        }
        if self.trace.enabled {
            let bound = report
                .bound
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let line = format!(
                "[bind] {id} bound=[{bound}] listeners={}",
                report.listeners
            );
            self.trace.line(TraceCategory::Bind, line);
        }

        self.controllers.insert(id, controller);
        Ok(MountHandle { id, report })
    }

    /// Removes every listener and pending timer of the mount and returns its final state.
    /// Page content is left as the controller last painted it.
    pub fn teardown(&mut self, handle: MountHandle) -> Option<ControllerState> {
        let controller = self.controllers.remove(&handle.id)?;
        let listeners = self.listeners.remove_mount(handle.id);
        let timers = self.scheduler.clear_mount(handle.id);
        self.trace.line(
            TraceCategory::Bind,
            format!(
                "[bind] {} teardown listeners={listeners} timers={timers}",
                handle.id
            ),
        );
        Some(controller.state)
    }

    pub fn controller_state(&self, handle: &MountHandle) -> Option<&ControllerState> {
        self.controllers
            .get(&handle.id)
            .map(|controller| &controller.state)
    }

    pub fn mounted_count(&self) -> usize {
        self.controllers.len()
    }
}
