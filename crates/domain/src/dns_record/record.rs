use super::RecordType;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A decoded answer record.
///
/// Owns all of its data; nothing borrows from the message it was decoded from.
/// The owner name of the record is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsRecord {
    Unknown {
        ttl: u32,
        record_type: u16,
    },

    A {
        ttl: u32,
        address: Ipv4Addr,
    },

    AAAA {
        ttl: u32,
        address: Ipv6Addr,
    },

    CNAME {
        ttl: u32,
        name: String,
    },

    NS {
        ttl: u32,
        name: String,
    },

    PTR {
        ttl: u32,
        name: String,
    },

    MX {
        ttl: u32,
        preference: u16,
        exchange: String,
    },

    SOA {
        ttl: u32,
        primary_ns: String,
        mailbox: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum_ttl: u32,
    },

    TXT {
        ttl: u32,
        text: String,
    },

    SRV {
        ttl: u32,
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },

    CAA {
        ttl: u32,
        flags: u8,
        tag: String,
        value: String,
    },

    DS {
        ttl: u32,
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Vec<u8>,
    },

    DNSKEY {
        ttl: u32,
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Vec<u8>,
    },

    URI {
        ttl: u32,
        priority: u16,
        weight: u16,
        target: String,
    },
}

impl DnsRecord {
    pub fn ttl(&self) -> u32 {
        match self {
            DnsRecord::Unknown { ttl, .. }
            | DnsRecord::A { ttl, .. }
            | DnsRecord::AAAA { ttl, .. }
            | DnsRecord::CNAME { ttl, .. }
            | DnsRecord::NS { ttl, .. }
            | DnsRecord::PTR { ttl, .. }
            | DnsRecord::MX { ttl, .. }
            | DnsRecord::SOA { ttl, .. }
            | DnsRecord::TXT { ttl, .. }
            | DnsRecord::SRV { ttl, .. }
            | DnsRecord::CAA { ttl, .. }
            | DnsRecord::DS { ttl, .. }
            | DnsRecord::DNSKEY { ttl, .. }
            | DnsRecord::URI { ttl, .. } => *ttl,
        }
    }

    /// Returns `None` for [`DnsRecord::Unknown`].
    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            DnsRecord::Unknown { .. } => None,
            DnsRecord::A { .. } => Some(RecordType::A),
            DnsRecord::AAAA { .. } => Some(RecordType::AAAA),
            DnsRecord::CNAME { .. } => Some(RecordType::CNAME),
            DnsRecord::NS { .. } => Some(RecordType::NS),
            DnsRecord::PTR { .. } => Some(RecordType::PTR),
            DnsRecord::MX { .. } => Some(RecordType::MX),
            DnsRecord::SOA { .. } => Some(RecordType::SOA),
            DnsRecord::TXT { .. } => Some(RecordType::TXT),
            DnsRecord::SRV { .. } => Some(RecordType::SRV),
            DnsRecord::CAA { .. } => Some(RecordType::CAA),
            DnsRecord::DS { .. } => Some(RecordType::DS),
            DnsRecord::DNSKEY { .. } => Some(RecordType::DNSKEY),
            DnsRecord::URI { .. } => Some(RecordType::URI),
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsRecord::Unknown { ttl, record_type } => {
                write!(f, "TYPE{} (ttl {})", record_type, ttl)
            }
            DnsRecord::A { ttl, address } => write!(f, "A {} (ttl {})", address, ttl),
            DnsRecord::AAAA { ttl, address } => write!(f, "AAAA {} (ttl {})", address, ttl),
            DnsRecord::CNAME { ttl, name } => write!(f, "CNAME {} (ttl {})", name, ttl),
            DnsRecord::NS { ttl, name } => write!(f, "NS {} (ttl {})", name, ttl),
            DnsRecord::PTR { ttl, name } => write!(f, "PTR {} (ttl {})", name, ttl),
            DnsRecord::MX {
                ttl,
                preference,
                exchange,
            } => write!(f, "MX {} {} (ttl {})", preference, exchange, ttl),
            DnsRecord::SOA {
                ttl,
                primary_ns,
                mailbox,
                serial,
                refresh,
                retry,
                expire,
                minimum_ttl,
            } => write!(
                f,
                "SOA {} {} {} {} {} {} {} (ttl {})",
                primary_ns, mailbox, serial, refresh, retry, expire, minimum_ttl, ttl
            ),
            DnsRecord::TXT { ttl, text } => write!(f, "TXT \"{}\" (ttl {})", text, ttl),
            DnsRecord::SRV {
                ttl,
                priority,
                weight,
                port,
                target,
            } => write!(
                f,
                "SRV {} {} {} {} (ttl {})",
                priority, weight, port, target, ttl
            ),
            DnsRecord::CAA {
                ttl,
                flags,
                tag,
                value,
            } => write!(f, "CAA {} {} \"{}\" (ttl {})", flags, tag, value, ttl),
            DnsRecord::DS {
                ttl,
                key_tag,
                algorithm,
                digest_type,
                digest,
            } => write!(
                f,
                "DS {} {} {} {} (ttl {})",
                key_tag,
                algorithm,
                digest_type,
                hex(digest),
                ttl
            ),
            DnsRecord::DNSKEY {
                ttl,
                flags,
                protocol,
                algorithm,
                public_key,
            } => write!(
                f,
                "DNSKEY {} {} {} <{} bytes> (ttl {})",
                flags,
                protocol,
                algorithm,
                public_key.len(),
                ttl
            ),
            DnsRecord::URI {
                ttl,
                priority,
                weight,
                target,
            } => write!(f, "URI {} {} \"{}\" (ttl {})", priority, weight, target, ttl),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
