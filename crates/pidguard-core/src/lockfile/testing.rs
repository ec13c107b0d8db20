//! In-memory process table for protocol tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::SignalError;
use crate::process::ProcessSignal;

/// Fake process table with a configurable "current process".
#[derive(Debug, Default)]
pub(crate) struct FakeProcesses {
    me: u32,
    table: HashMap<u32, Option<String>>,
    interrupted: RefCell<Vec<u32>>,
}

impl FakeProcesses {
    pub(crate) fn new(me: u32) -> Self {
        Self {
            me,
            ..Self::default()
        }
    }

    pub(crate) fn with(mut self, pid: u32, name: &str) -> Self {
        self.table.insert(pid, Some(name.to_string()));
        self
    }

    pub(crate) fn with_unnamed(mut self, pid: u32) -> Self {
        self.table.insert(pid, None);
        self
    }

    pub(crate) fn interrupted(&self) -> Vec<u32> {
        self.interrupted.borrow().clone()
    }
}

impl ProcessSignal for FakeProcesses {
    fn is_alive(&self, pid: u32) -> bool {
        self.table.contains_key(&pid)
    }

    fn executable_name(&self, pid: u32) -> Option<String> {
        self.table.get(&pid).cloned().flatten()
    }

    fn send_interrupt(&self, pid: u32) -> Result<(), SignalError> {
        if !self.is_alive(pid) {
            return Err(SignalError::NotFound { pid });
        }
        self.interrupted.borrow_mut().push(pid);
        Ok(())
    }

    fn current_pid(&self) -> u32 {
        self.me
    }
}
