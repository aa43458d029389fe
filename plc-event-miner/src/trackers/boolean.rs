//! Boolean flip detection

use crate::types::PlcEvent;
use std::collections::HashMap;

/// Emits an event each time a boolean column changes value
#[derive(Debug, Default)]
pub struct BooleanChangeTracker {
    previous: HashMap<usize, String>,
}

impl BooleanChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sampled value of column `column` named `field`
    pub fn observe(&mut self, column: usize, field: &str, value: &str) -> Option<PlcEvent> {
        let previous = self.previous.insert(column, value.to_string())?;
        if previous == value {
            return None;
        }
        log::trace!("{}: {} -> {}", field, previous, value);
        Some(PlcEvent::Boolean {
            field: field.to_string(),
            previous,
            current: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacent_changes(values: &[&str]) -> usize {
        values.windows(2).filter(|w| w[0] != w[1]).count()
    }

    #[test]
    fn test_event_count_matches_adjacent_changes() {
        let sequences: [&[&str]; 5] = [
            &["0", "1", "1", "0", "1"],
            &["1", "1", "1"],
            &["1.0", "0.0"],
            &["0"],
            &[],
        ];
        for values in sequences {
            let mut tracker = BooleanChangeTracker::new();
            let events = values
                .iter()
                .filter_map(|v| tracker.observe(2, "PLC1_Pump", v))
                .count();
            assert_eq!(events, adjacent_changes(values), "sequence {:?}", values);
        }
    }

    #[test]
    fn test_event_values() {
        let mut tracker = BooleanChangeTracker::new();
        assert!(tracker.observe(0, "PLC2_Valve", "0").is_none());
        assert_eq!(
            tracker.observe(0, "PLC2_Valve", "1"),
            Some(PlcEvent::Boolean {
                field: "PLC2_Valve".to_string(),
                previous: "0".to_string(),
                current: "1".to_string(),
            })
        );
    }
}
