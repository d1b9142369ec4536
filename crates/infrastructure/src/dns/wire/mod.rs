//! Byte-level DNS message handling (RFC 1035 §4).

pub mod message_builder;
pub mod name;
pub mod record_parser;
pub mod response_parser;

pub use message_builder::MessageBuilder;
pub use name::{decode_name, encode_name, DecodedName};
pub use record_parser::RecordParser;
pub use response_parser::ResponseParser;

pub const HEADER_LEN: usize = 12;

/// QR bit in header byte 2: set on responses.
pub const QR_FLAG: u8 = 0x80;
/// AA bit in header byte 2.
pub const AA_FLAG: u8 = 0x04;
/// TC bit in header byte 2.
pub const TC_FLAG: u8 = 0x02;

pub const CLASS_IN: u16 = 1;

pub(crate) fn read_u16(buf: &[u8], pos: usize) -> Option<u16> {
    let bytes = buf.get(pos..pos.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub(crate) fn read_u32(buf: &[u8], pos: usize) -> Option<u32> {
    let bytes = buf.get(pos..pos.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Transaction identifier of a message, if it has a full header.
pub fn transaction_id(message: &[u8]) -> Option<u16> {
    if message.len() < HEADER_LEN {
        return None;
    }
    read_u16(message, 0)
}

pub fn is_response(message: &[u8]) -> bool {
    message.len() >= HEADER_LEN && message[2] & QR_FLAG != 0
}
