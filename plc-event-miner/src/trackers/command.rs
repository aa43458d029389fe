//! Write command deduplication

use crate::modbus::ModbusMessage;
use crate::types::PlcEvent;
use std::collections::HashMap;

/// Emits an event when a write command changes the value last written to
/// the same register over the same direction
///
/// Anything that is not a command is ignored and leaves no state behind.
#[derive(Debug, Default)]
pub struct CommandChangeTracker {
    last_written: HashMap<String, String>,
}

impl CommandChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, message: &ModbusMessage<'_>) -> Option<PlcEvent> {
        if !message.is_command() {
            return None;
        }

        let key = format!("{}{}", message.direction(), message.register());
        let data = message.data();
        let previous = self.last_written.insert(key, data.to_string())?;
        if previous == data {
            return None;
        }

        log::trace!(
            "{} [{}]: {} -> {}",
            message.direction(),
            message.register(),
            previous,
            data
        );
        Some(PlcEvent::Message {
            source: message.source().to_string(),
            destination: message.destination().to_string(),
            register: message.register().to_string(),
            data: data.to_string(),
        })
    }

    /// Number of distinct direction/register keys written so far
    pub fn tracked_keys(&self) -> usize {
        self.last_written.len()
    }
}
