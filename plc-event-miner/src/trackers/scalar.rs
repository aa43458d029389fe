//! Scalar trend reversal detection

use crate::types::{MinerError, PlcEvent, Result, Trend};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// What is remembered about one scalar column
#[derive(Debug, Clone, PartialEq)]
pub struct TrendState {
    /// Last observed raw value
    pub previous: String,
    /// Direction of the last observed change, if any
    pub trend: Option<Trend>,
    /// Value at which the current trend started
    pub initial: String,
}

/// Emits an event whenever a scalar column changes direction
///
/// A direction is only computed when a value differs textually from the one
/// before it, so repeated samples never end a trend. The first direction of
/// a column is recorded without an event.
#[derive(Debug, Default)]
pub struct ScalarTrendTracker {
    states: HashMap<usize, TrendState>,
}

impl ScalarTrendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sampled value of column `column` named `field`
    pub fn observe(&mut self, column: usize, field: &str, value: &str) -> Result<Option<PlcEvent>> {
        let state = match self.states.entry(column) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                slot.insert(TrendState {
                    previous: value.to_string(),
                    trend: None,
                    initial: value.to_string(),
                });
                return Ok(None);
            }
        };

        if state.previous == value {
            return Ok(None);
        }

        let is = Trend::between(parse(field, &state.previous)?, parse(field, value)?);
        let mut event = None;
        if let Some(was) = state.trend {
            if was != is {
                log::trace!("{}: {} -> {} at {}", field, was, is, value);
                event = Some(PlcEvent::Scalar {
                    field: field.to_string(),
                    previous_trend: was,
                    current_trend: is,
                    initial_value: std::mem::replace(&mut state.initial, value.to_string()),
                    final_value: value.to_string(),
                });
            }
        }
        state.trend = Some(is);
        state.previous = value.to_string();
        Ok(event)
    }

    /// Current state of a column, if it has been observed
    pub fn state(&self, column: usize) -> Option<&TrendState> {
        self.states.get(&column)
    }
}

fn parse(field: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| MinerError::InvalidData(format!("{}: '{}' is not a number: {}", field, value, e)))
}
