use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::controller::{Handler, MountId};
use crate::dom::NodeId;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    DblClick,
    MouseOver,
    MouseOut,
    Input,
    Change,
    Submit,
    Reset,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::DblClick => "dblclick",
            EventKind::MouseOver => "mouseover",
            EventKind::MouseOut => "mouseout",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Submit => "submit",
            EventKind::Reset => "reset",
            EventKind::DragStart => "dragstart",
            EventKind::DragEnd => "dragend",
            EventKind::DragOver => "dragover",
            EventKind::DragLeave => "dragleave",
            EventKind::Drop => "drop",
        }
    }

    /// Drag events carry the session's [`DataTransfer`].
    pub fn is_drag(self) -> bool {
        matches!(
            self,
            EventKind::DragStart
                | EventKind::DragEnd
                | EventKind::DragOver
                | EventKind::DragLeave
                | EventKind::Drop
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let kind = match value.to_ascii_lowercase().as_str() {
            "click" => EventKind::Click,
            "dblclick" => EventKind::DblClick,
            "mouseover" => EventKind::MouseOver,
            "mouseout" => EventKind::MouseOut,
            "input" => EventKind::Input,
            "change" => EventKind::Change,
            "submit" => EventKind::Submit,
            "reset" => EventKind::Reset,
            "dragstart" => EventKind::DragStart,
            "dragend" => EventKind::DragEnd,
            "dragover" => EventKind::DragOver,
            "dragleave" => EventKind::DragLeave,
            "drop" => EventKind::Drop,
            _ => return Err(Error::UnsupportedEvent(value.to_string())),
        };
        Ok(kind)
    }
}

/// The payload store shared by every event of one drag session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    items: Vec<(String, String)>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `setData`: formats are case-insensitive and a second write replaces the first.
    pub fn set_data(&mut self, format: &str, data: &str) {
        let format = format.to_ascii_lowercase();
        if let Some(entry) = self.items.iter_mut().find(|(f, _)| *f == format) {
            entry.1 = data.to_string();
        } else {
            self.items.push((format, data.to_string()));
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        let format = format.to_ascii_lowercase();
        self.items
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, data)| data.as_str())
    }

    pub fn types(&self) -> Vec<&str> {
        self.items.iter().map(|(f, _)| f.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) mount: MountId,
    pub(crate) handler: Handler,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<EventKind, Vec<Listener>>>,
}

impl ListenerStore {
    /// Registration never dedupes: binding the same handler twice runs it twice.
    pub(crate) fn add(&mut self, node_id: NodeId, event: EventKind, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(listener);
    }

    /// Drops every listener registered by `mount`, returning how many were removed.
    pub(crate) fn remove_mount(&mut self, mount: MountId) -> usize {
        let mut removed = 0usize;
        for events in self.map.values_mut() {
            for listeners in events.values_mut() {
                let before = listeners.len();
                listeners.retain(|listener| listener.mount != mount);
                removed += before - listeners.len();
            }
            events.retain(|_, listeners| !listeners.is_empty());
        }
        self.map.retain(|_, events| !events.is_empty());
        removed
    }

    pub(crate) fn get(&self, node_id: NodeId, event: EventKind) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(&event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count_for(&self, node_id: NodeId, event: EventKind) -> usize {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(&event))
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: EventKind,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) time_stamp_ms: i64,
    pub(crate) default_prevented: bool,
    pub(crate) data_transfer: Option<DataTransfer>,
}

impl EventState {
    pub(crate) fn new(kind: EventKind, target: NodeId, time_stamp_ms: i64) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            time_stamp_ms,
            default_prevented: false,
            data_transfer: None,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
