//! Modbus/TCP messages from a packet capture table
//!
//! Only the handful of fields needed to recognise write commands are read;
//! the protocol itself is never parsed.

use crate::config::MinerConfig;
use crate::formats::{Record, TabularSource};
use crate::types::{MinerError, Result};

/// Column positions of the fields a message needs, resolved once per table
#[derive(Debug, Clone)]
pub struct ModbusLayout {
    source: usize,
    destination: usize,
    protocol: usize,
    function_code: usize,
    register: usize,
    info: usize,
    data: usize,
    time: usize,
    /// Smallest record width covering every field above
    width: usize,
    protocol_tag: String,
    response_marker: String,
    write_prefix: String,
}

impl ModbusLayout {
    /// Resolve every configured column against the table header
    pub fn resolve<S: TabularSource + ?Sized>(source: &S, config: &MinerConfig) -> Result<Self> {
        let columns = &config.modbus;
        let find = |name: &str| {
            source
                .column_index(name)
                .ok_or_else(|| MinerError::MissingColumn(name.to_string()))
        };

        let source_index = find(&columns.source)?;
        let destination = find(&columns.destination)?;
        let protocol = find(&columns.protocol)?;
        let function_code = find(&columns.function_code)?;
        let register = find(&columns.register)?;
        let info = find(&columns.info)?;
        let data = find(&columns.data)?;
        let time = find(&columns.time)?;
        let width = [
            source_index,
            destination,
            protocol,
            function_code,
            register,
            info,
            data,
            time,
        ]
        .into_iter()
        .max()
        .map_or(0, |i| i + 1);

        Ok(Self {
            source: source_index,
            destination,
            protocol,
            function_code,
            register,
            info,
            data,
            time,
            width,
            protocol_tag: config.protocol.clone(),
            response_marker: config.response_marker.clone(),
            write_prefix: config.write_prefix.clone(),
        })
    }

    /// View a record as a message
    ///
    /// Fails when the record is too short to hold every resolved field.
    pub fn message<'a>(&'a self, record: &'a Record) -> Result<ModbusMessage<'a>> {
        if record.len() < self.width {
            return Err(MinerError::InvalidData(format!(
                "capture record has {} fields, expected at least {}",
                record.len(),
                self.width
            )));
        }
        Ok(ModbusMessage {
            layout: self,
            record,
        })
    }
}

/// One captured packet, borrowed from its record
#[derive(Debug, Clone, Copy)]
pub struct ModbusMessage<'a> {
    layout: &'a ModbusLayout,
    record: &'a Record,
}

impl<'a> ModbusMessage<'a> {
    // In bounds: `ModbusLayout::message` checked the record width
    fn field(&self, index: usize) -> &'a str {
        self.record[index].as_str()
    }

    pub fn source(&self) -> &'a str {
        self.field(self.layout.source)
    }

    pub fn destination(&self) -> &'a str {
        self.field(self.layout.destination)
    }

    pub fn protocol(&self) -> &'a str {
        self.field(self.layout.protocol)
    }

    pub fn function_code(&self) -> &'a str {
        self.field(self.layout.function_code)
    }

    pub fn register(&self) -> &'a str {
        self.field(self.layout.register)
    }

    pub fn info(&self) -> &'a str {
        self.field(self.layout.info)
    }

    pub fn data(&self) -> &'a str {
        self.field(self.layout.data)
    }

    pub fn time(&self) -> &'a str {
        self.field(self.layout.time)
    }

    /// `source->destination`
    pub fn direction(&self) -> String {
        format!("{}->{}", self.source(), self.destination())
    }

    /// A write request, as opposed to a read or a response
    pub fn is_command(&self) -> bool {
        self.protocol() == self.layout.protocol_tag
            && !self.info().contains(self.layout.response_marker.as_str())
            && self.function_code().starts_with(self.layout.write_prefix.as_str())
    }
}
