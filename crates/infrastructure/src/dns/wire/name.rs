//! Domain-name encoding and decompression (RFC 1035 §3.1, §4.1.4).

use ferrous_stub_domain::dns_query::{split_labels, POINTER_MARKER};
use ferrous_stub_domain::DomainError;

/// Pointer hops followed before a name is rejected as a loop.
pub const MAX_POINTER_HOPS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    pub name: String,
    /// Bytes of the walked slice the name occupies. For a compressed name this
    /// stops at the pointer; the bytes it points to are not counted.
    pub consumed: usize,
}

/// Encodes a dotted name as length-prefixed labels plus the root byte.
pub fn encode_name(domain: &str) -> Result<Vec<u8>, DomainError> {
    let labels = split_labels(domain)?;
    let len = labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1;
    let mut buf = vec![0u8; len];
    write_labels(&labels, &mut buf, 0);
    Ok(buf)
}

/// Writes `labels` at `offset` and returns the offset just past the root byte.
///
/// The caller guarantees `buf` has room for the whole name.
pub(crate) fn write_labels(labels: &[String], buf: &mut [u8], offset: usize) -> usize {
    let mut pos = offset;
    for label in labels {
        let bytes = label.as_bytes();
        buf[pos] = bytes.len() as u8;
        pos += 1;
        buf[pos..pos + bytes.len()].copy_from_slice(bytes);
        pos += bytes.len();
    }
    buf[pos] = 0;
    pos + 1
}

/// Decodes the name starting at `start` within `data`.
///
/// `data` is the slice being walked, either the whole message or one record's
/// RDATA. Compression pointers always resolve against `message`, the full
/// received buffer. A label running past the end of `data` ends the name
/// early instead of failing.
pub fn decode_name(data: &[u8], start: usize, message: &[u8]) -> Result<DecodedName, DomainError> {
    decode_with_hops(data, start, message, 0)
}

fn decode_with_hops(
    data: &[u8],
    start: usize,
    message: &[u8],
    hops: usize,
) -> Result<DecodedName, DomainError> {
    let mut name = String::new();
    let mut pos = start;

    while let Some(&len) = data.get(pos) {
        pos += 1;

        if len == 0 {
            break;
        }

        // Only 0xC0 marks a pointer; every other length byte is a label.
        if len == POINTER_MARKER {
            let Some(&offset) = data.get(pos) else {
                break;
            };
            pos += 1;

            if hops >= MAX_POINTER_HOPS {
                return Err(DomainError::NamePointerLoop {
                    offset: start,
                    hops,
                });
            }

            let suffix = decode_with_hops(message, offset as usize, message, hops + 1)?;
            push_label(&mut name, &suffix.name);
            break;
        }

        let len = len as usize;
        if data.len() - pos < len {
            break;
        }

        push_label(&mut name, &String::from_utf8_lossy(&data[pos..pos + len]));
        pos += len;
    }

    Ok(DecodedName {
        name,
        consumed: pos - start,
    })
}

fn push_label(name: &mut String, label: &str) {
    if label.is_empty() {
        return;
    }
    if !name.is_empty() {
        name.push('.');
    }
    name.push_str(label);
}
