use super::{DomainError, RecordType};
use smallvec::SmallVec;

pub const HEADER_LEN: usize = 12;
pub const MAX_LABEL_LEN: usize = 255;
pub const MAX_LABELS: usize = 255;
pub const MAX_QUERY_TYPES: usize = 255;

/// Length byte that marks a compression pointer, so no label can be this long.
pub const POINTER_MARKER: u8 = 0xC0;

/// Bytes each question entry adds after the first: pointer + type + class.
const EXTRA_QUESTION_LEN: usize = 6;

/// A validated, immutable DNS query.
///
/// The total wire length is computed once at construction so the sender can
/// size its buffer before the transaction identifier is known.
///
/// WARNING: most DNS servers answer only the first question of a message.
/// A query for several record types is sent as one message holding one
/// question per type, so servers may silently answer only the first type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    labels: Vec<String>,
    record_types: SmallVec<[RecordType; 2]>,
    accept_truncated: bool,
    wire_len: usize,
}

impl DnsQuery {
    pub fn new(domain: &str, record_type: RecordType) -> Result<Self, DomainError> {
        Self::with_types(domain, &[record_type], false)
    }

    /// Builds a query for one or more record types.
    ///
    /// When `accept_truncated` is set, a truncated UDP answer is returned as-is
    /// instead of being retried over TCP.
    pub fn with_types(
        domain: &str,
        record_types: &[RecordType],
        accept_truncated: bool,
    ) -> Result<Self, DomainError> {
        if record_types.is_empty() {
            return Err(DomainError::InvalidQuery(
                "At least one record type is required".to_string(),
            ));
        }

        if record_types.len() > MAX_QUERY_TYPES {
            return Err(DomainError::InvalidQuery(format!(
                "Too many record types: {} (max {})",
                record_types.len(),
                MAX_QUERY_TYPES
            )));
        }

        let labels = split_labels(domain)?;
        let name_len = encoded_name_len(&labels);

        let wire_len =
            HEADER_LEN + name_len + 4 + (record_types.len() - 1) * EXTRA_QUESTION_LEN;

        Ok(Self {
            labels,
            record_types: SmallVec::from_slice(record_types),
            accept_truncated,
            wire_len,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn domain(&self) -> String {
        self.labels.join(".")
    }

    pub fn record_types(&self) -> &[RecordType] {
        &self.record_types
    }

    pub fn accept_truncated(&self) -> bool {
        self.accept_truncated
    }

    /// Exact number of bytes the serialized query occupies.
    pub fn wire_len(&self) -> usize {
        self.wire_len
    }
}

/// Splits a dotted name into validated labels.
pub fn split_labels(domain: &str) -> Result<Vec<String>, DomainError> {
    if domain.trim().is_empty() {
        return Err(DomainError::InvalidDomainName(
            "Name can't be empty or whitespace".to_string(),
        ));
    }

    let name = domain.strip_suffix('.').unwrap_or(domain);

    let mut labels = Vec::new();
    for label in name.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "Empty label in '{}'",
                domain
            )));
        }
        if !label.is_ascii() {
            return Err(DomainError::InvalidDomainName(format!(
                "Non-ASCII label '{}' in '{}'",
                label, domain
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "Label '{}' is {} bytes (max {})",
                label,
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        if label.len() == POINTER_MARKER as usize {
            return Err(DomainError::InvalidDomainName(format!(
                "Label of {} bytes can't be told apart from a compression pointer",
                label.len()
            )));
        }
        labels.push(label.to_string());
    }

    if labels.len() > MAX_LABELS {
        return Err(DomainError::InvalidDomainName(format!(
            "Name has {} labels (max {})",
            labels.len(),
            MAX_LABELS
        )));
    }

    Ok(labels)
}

/// Length-prefixed labels plus the root terminator.
fn encoded_name_len(labels: &[String]) -> usize {
    labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
}
