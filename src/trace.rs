use std::collections::VecDeque;

/// Page trace log.
///
/// Disabled by default. When enabled, lines are kept in a bounded buffer (oldest dropped first)
/// and optionally mirrored to stderr. Each category can be muted on its own.
#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) bindings: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            bindings: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceCategory {
    Event,
    Timer,
    Bind,
    Form,
}

impl TraceState {
    fn category_enabled(&self, category: TraceCategory) -> bool {
        match category {
            TraceCategory::Event | TraceCategory::Form => self.events,
            TraceCategory::Timer => self.timers,
            TraceCategory::Bind => self.bindings,
        }
    }

    pub(crate) fn line(&mut self, category: TraceCategory, line: String) {
        if !self.enabled || !self.category_enabled(category) {
            return;
        }
        if self.to_stderr {
            eprintln!("{line}");
        }
        while self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }

    pub(crate) fn set_log_limit(&mut self, max_entries: usize) {
        self.log_limit = max_entries;
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
    }
}
