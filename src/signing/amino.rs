//! Amino JSON sign documents
//!
//! Legacy `StdSignDoc` construction and its canonical serialization: keys
//! sorted at every level, no insignificant whitespace, and `&`, `<`, `>`
//! written as `\u0026`, `\u003c`, `\u003e`.

use crate::error::EngineResult;
use crate::fees::FeeDescriptor;
use crate::messages::ProtocolMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Legacy amino sign document
///
/// Numbers travel as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub account_number: String,
    pub chain_id: String,
    pub fee: Value,
    pub memo: String,
    pub msgs: Vec<Value>,
    pub sequence: String,
}

impl StdSignDoc {
    pub fn new(
        msgs: &[ProtocolMessage],
        fee: &FeeDescriptor,
        chain_id: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Self {
        Self {
            account_number: account_number.to_string(),
            chain_id: chain_id.to_string(),
            fee: fee.to_amino(),
            memo: memo.to_string(),
            msgs: msgs.iter().map(ProtocolMessage::to_amino).collect(),
            sequence: sequence.to_string(),
        }
    }

    /// Canonical bytes handed to the signer
    pub fn serialize(&self) -> EngineResult<Vec<u8>> {
        let value = serde_json::to_value(self)?;
        Ok(canonical_json_bytes(&value))
    }
}

/// Serialize JSON canonically (sorted keys, no whitespace)
pub fn canonical_json_bytes(value: &Value) -> Vec<u8> {
    fn write_string(s: &str, out: &mut Vec<u8>) {
        out.push(b'"');
        for c in s.chars() {
            match c {
                '"' => out.extend_from_slice(b"\\\""),
                '\\' => out.extend_from_slice(b"\\\\"),
                '\n' => out.extend_from_slice(b"\\n"),
                '\r' => out.extend_from_slice(b"\\r"),
                '\t' => out.extend_from_slice(b"\\t"),
                '\u{08}' => out.extend_from_slice(b"\\b"),
                '\u{0c}' => out.extend_from_slice(b"\\f"),
                '&' => out.extend_from_slice(b"\\u0026"),
                '<' => out.extend_from_slice(b"\\u003c"),
                '>' => out.extend_from_slice(b"\\u003e"),
                c if (c as u32) < 0x20 => {
                    out.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes());
                }
                c => {
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
        out.push(b'"');
    }

    fn serialize_canonical(value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Null => out.extend_from_slice(b"null"),
            Value::Bool(true) => out.extend_from_slice(b"true"),
            Value::Bool(false) => out.extend_from_slice(b"false"),
            Value::Number(n) => {
                out.extend_from_slice(n.to_string().as_bytes());
            }
            Value::String(s) => write_string(s, out),
            Value::Array(arr) => {
                out.push(b'[');
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        out.push(b',');
                    }
                    serialize_canonical(v, out);
                }
                out.push(b']');
            }
            Value::Object(obj) => {
                out.push(b'{');
                let mut keys: Vec<_> = obj.keys().collect();
                keys.sort();
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        out.push(b',');
                    }
                    write_string(key, out);
                    out.push(b':');
                    serialize_canonical(&obj[key.as_str()], out);
                }
                out.push(b'}');
            }
        }
    }

    let mut out = Vec::new();
    serialize_canonical(value, &mut out);
    out
}
