//! Command definitions
//!
//! Opcodes and the request builder shared by every command.

use bytes::Bytes;

use super::codec::MessageWriter;
use crate::error::Result;

/// Command opcodes (values fixed by the server protocol)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Connect = 2,
    DbCreate = 4,
    DbExist = 6,
    DbDrop = 7,
    DbList = 74,
}

impl Opcode {
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Connect => "CONNECT",
            Opcode::DbCreate => "DB_CREATE",
            Opcode::DbExist => "DB_EXIST",
            Opcode::DbDrop => "DB_DROP",
            Opcode::DbList => "DB_LIST",
        }
    }
}

/// A typed request argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Null,
    Bytes(Vec<u8>),
    Bool(bool),
    Short(i16),
}

/// An outgoing command: opcode, session id, then arguments in order
#[derive(Debug, Clone)]
pub struct Request {
    opcode: Opcode,
    session_id: i32,
    args: Vec<Arg>,
}

impl Request {
    pub fn new(opcode: Opcode, session_id: i32) -> Self {
        Self {
            opcode,
            session_id,
            args: Vec::new(),
        }
    }

    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Str(value.into()));
        self
    }

    /// Null string placeholder
    pub fn null(mut self) -> Self {
        self.args.push(Arg::Null);
        self
    }

    pub fn bytes(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.args.push(Arg::Bytes(value.into()));
        self
    }

    pub fn boolean(mut self, value: bool) -> Self {
        self.args.push(Arg::Bool(value));
        self
    }

    pub fn short(mut self, value: i16) -> Self {
        self.args.push(Arg::Short(value));
        self
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn session_id(&self) -> i32 {
        self.session_id
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Encode to a single wire message
    ///
    /// Format: opcode (1) + session_id (4) + args
    pub fn encode(&self) -> Result<Bytes> {
        let mut writer = MessageWriter::with_capacity(5 + self.encoded_args_hint());
        writer.put_byte(self.opcode as u8);
        writer.put_int(self.session_id);

        for arg in &self.args {
            match arg {
                Arg::Str(s) => writer.put_string(s)?,
                Arg::Null => writer.put_null(),
                Arg::Bytes(b) => writer.put_bytes(b)?,
                Arg::Bool(b) => writer.put_bool(*b),
                Arg::Short(v) => writer.put_short(*v),
            }
        }

        Ok(writer.finish())
    }

    fn encoded_args_hint(&self) -> usize {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Str(s) => 4 + s.len(),
                Arg::Null => 4,
                Arg::Bytes(b) => 4 + b.len(),
                Arg::Bool(_) => 1,
                Arg::Short(_) => 2,
            })
            .sum()
    }
}
