use super::DnsRecord;
use std::fmt;

/// Outcome of a query.
///
/// Codes 1-5 mirror the RCODE the server returned. `NoResponseFromServer` and
/// `CantParseResponse` are produced by the client itself. Any other RCODE the
/// server sends is carried in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsErrorCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    NoResponseFromServer,
    CantParseResponse,
    Other(u8),
}

impl DnsErrorCode {
    /// Maps the 4-bit RCODE field of a response header.
    pub fn from_rcode(rcode: u8) -> Self {
        match rcode & 0x0F {
            0 => DnsErrorCode::NoError,
            1 => DnsErrorCode::FormatError,
            2 => DnsErrorCode::ServerFailure,
            3 => DnsErrorCode::NameError,
            4 => DnsErrorCode::NotImplemented,
            5 => DnsErrorCode::Refused,
            other => DnsErrorCode::Other(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            DnsErrorCode::NoError => 0,
            DnsErrorCode::FormatError => 1,
            DnsErrorCode::ServerFailure => 2,
            DnsErrorCode::NameError => 3,
            DnsErrorCode::NotImplemented => 4,
            DnsErrorCode::Refused => 5,
            DnsErrorCode::NoResponseFromServer => 6,
            DnsErrorCode::CantParseResponse => 7,
            DnsErrorCode::Other(rcode) => *rcode,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DnsErrorCode::NoError)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DnsErrorCode::NoError => "NoError",
            DnsErrorCode::FormatError => "FormatError",
            DnsErrorCode::ServerFailure => "ServerFailure",
            DnsErrorCode::NameError => "NameError",
            DnsErrorCode::NotImplemented => "NotImplemented",
            DnsErrorCode::Refused => "Refused",
            DnsErrorCode::NoResponseFromServer => "NoResponseFromServer",
            DnsErrorCode::CantParseResponse => "CantParseResponse",
            DnsErrorCode::Other(_) => "Other",
        }
    }
}

impl fmt::Display for DnsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsErrorCode::Other(rcode) => write!(f, "RCODE{}", rcode),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Result of a query, returned by value to the caller.
///
/// `records` is `Some` only when `error_code` is `NoError`, so "no response",
/// "malformed response" and "valid response without answers" stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub error_code: DnsErrorCode,

    pub truncated: bool,

    pub authoritative: bool,

    pub tcp_used: bool,

    pub records: Option<Vec<DnsRecord>>,
}

impl DnsResponse {
    pub fn error(error_code: DnsErrorCode) -> Self {
        Self {
            error_code,
            truncated: false,
            authoritative: false,
            tcp_used: false,
            records: None,
        }
    }

    pub fn no_response() -> Self {
        Self::error(DnsErrorCode::NoResponseFromServer)
    }

    pub fn unparseable() -> Self {
        Self::error(DnsErrorCode::CantParseResponse)
    }

    pub fn is_success(&self) -> bool {
        self.error_code.is_success()
    }

    pub fn records(&self) -> &[DnsRecord] {
        self.records.as_deref().unwrap_or(&[])
    }
}
