//! DNS query serialization
//!
//! Writes a standard recursive query straight into a caller-supplied buffer.
//! The domain name is encoded once; every record type after the first gets a
//! question that reuses it through a compression pointer to offset 12.
//!
//! Most servers only answer the first question of a message, so a query for
//! several record types may come back with answers for the first type only.

use super::name::write_labels;
use super::{CLASS_IN, HEADER_LEN};
use ferrous_stub_domain::{DnsQuery, DomainError};

/// Pointer to the question name, which always starts right after the header.
const NAME_POINTER: [u8; 2] = [0xC0, HEADER_LEN as u8];

pub struct MessageBuilder;

impl MessageBuilder {
    /// Serializes `query` into `buffer` and returns the number of bytes written,
    /// which is always `query.wire_len()`.
    pub fn write_query(
        query: &DnsQuery,
        transaction_id: u16,
        buffer: &mut [u8],
    ) -> Result<usize, DomainError> {
        let needed = query.wire_len();
        if buffer.len() < needed {
            return Err(DomainError::BufferTooSmall {
                needed,
                actual: buffer.len(),
            });
        }

        let question_count = query.record_types().len() as u16;

        buffer[0..2].copy_from_slice(&transaction_id.to_be_bytes());
        // standard query, recursion desired
        buffer[2] = 0x01;
        buffer[3] = 0x00;
        buffer[4..6].copy_from_slice(&question_count.to_be_bytes());
        buffer[6..HEADER_LEN].fill(0);

        let mut pos = write_labels(query.labels(), buffer, HEADER_LEN);

        for (i, record_type) in query.record_types().iter().enumerate() {
            if i > 0 {
                buffer[pos..pos + 2].copy_from_slice(&NAME_POINTER);
                pos += 2;
            }
            buffer[pos..pos + 2].copy_from_slice(&record_type.to_u16().to_be_bytes());
            buffer[pos + 2..pos + 4].copy_from_slice(&CLASS_IN.to_be_bytes());
            pos += 4;
        }

        debug_assert_eq!(pos, needed);
        Ok(pos)
    }

    /// Serializes `query` into a freshly allocated buffer.
    pub fn build_query(query: &DnsQuery, transaction_id: u16) -> Result<Vec<u8>, DomainError> {
        let mut buffer = vec![0u8; query.wire_len()];
        Self::write_query(query, transaction_id, &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_stub_domain::RecordType;

    #[test]
    fn test_build_a_query() {
        let query = DnsQuery::new("google.com", RecordType::A).unwrap();
        let bytes = MessageBuilder::build_query(&query, 0xABCD).unwrap();

        assert_eq!(bytes.len(), query.wire_len());
        assert_eq!(&bytes[0..2], &[0xAB, 0xCD]);
        assert_eq!(bytes[2] & 0x01, 0x01, "RD flag should be set");
        assert_eq!(&bytes[4..6], &[0x00, 0x01]);
        assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn test_undersized_buffer() {
        let query = DnsQuery::new("google.com", RecordType::A).unwrap();
        let mut buffer = vec![0u8; query.wire_len() - 1];

        let result = MessageBuilder::write_query(&query, 1, &mut buffer);
        assert!(matches!(result, Err(DomainError::BufferTooSmall { .. })));
    }
}
