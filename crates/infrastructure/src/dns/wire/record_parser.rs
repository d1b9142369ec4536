use super::name::decode_name;
use super::{read_u16, read_u32};
use ferrous_stub_domain::{DnsRecord, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Per-type RDATA decoders.
///
/// Every decoder reads `rdata` (one record's payload, borrowed from `message`)
/// and copies out what it keeps. `None` means the payload is malformed for its
/// type and the record should be skipped.
pub struct RecordParser;

impl RecordParser {
    pub fn decode(type_code: u16, ttl: u32, rdata: &[u8], message: &[u8]) -> Option<DnsRecord> {
        let Some(record_type) = RecordType::from_u16(type_code) else {
            return Some(DnsRecord::Unknown {
                ttl,
                record_type: type_code,
            });
        };

        match record_type {
            RecordType::A => decode_a(ttl, rdata),
            RecordType::AAAA => decode_aaaa(ttl, rdata),
            RecordType::CNAME => {
                decode_target(rdata, message).map(|name| DnsRecord::CNAME { ttl, name })
            }
            RecordType::NS => decode_target(rdata, message).map(|name| DnsRecord::NS { ttl, name }),
            RecordType::PTR => {
                decode_target(rdata, message).map(|name| DnsRecord::PTR { ttl, name })
            }
            RecordType::MX => decode_mx(ttl, rdata, message),
            RecordType::SOA => decode_soa(ttl, rdata, message),
            RecordType::TXT => decode_txt(ttl, rdata),
            RecordType::SRV => decode_srv(ttl, rdata, message),
            RecordType::CAA => decode_caa(ttl, rdata),
            RecordType::DS => decode_ds(ttl, rdata),
            RecordType::DNSKEY => decode_dnskey(ttl, rdata),
            RecordType::URI => decode_uri(ttl, rdata),
            RecordType::ANY => Some(DnsRecord::Unknown {
                ttl,
                record_type: type_code,
            }),
        }
    }
}

fn decode_a(ttl: u32, rdata: &[u8]) -> Option<DnsRecord> {
    let octets: [u8; 4] = rdata.try_into().ok()?;
    Some(DnsRecord::A {
        ttl,
        address: Ipv4Addr::from(octets),
    })
}

fn decode_aaaa(ttl: u32, rdata: &[u8]) -> Option<DnsRecord> {
    let octets: [u8; 16] = rdata.try_into().ok()?;
    Some(DnsRecord::AAAA {
        ttl,
        address: Ipv6Addr::from(octets),
    })
}

fn decode_target(rdata: &[u8], message: &[u8]) -> Option<String> {
    decode_name(rdata, 0, message).ok().map(|decoded| decoded.name)
}

fn decode_mx(ttl: u32, rdata: &[u8], message: &[u8]) -> Option<DnsRecord> {
    let preference = read_u16(rdata, 0)?;
    let exchange = decode_name(rdata, 2, message).ok()?.name;

    Some(DnsRecord::MX {
        ttl,
        preference,
        exchange,
    })
}

fn decode_soa(ttl: u32, rdata: &[u8], message: &[u8]) -> Option<DnsRecord> {
    let primary = decode_name(rdata, 0, message).ok()?;
    let mut pos = primary.consumed;

    let mailbox = decode_name(rdata, pos, message).ok()?;
    pos += mailbox.consumed;

    Some(DnsRecord::SOA {
        ttl,
        primary_ns: primary.name,
        mailbox: mailbox.name,
        serial: read_u32(rdata, pos)?,
        refresh: read_u32(rdata, pos + 4)?,
        retry: read_u32(rdata, pos + 8)?,
        expire: read_u32(rdata, pos + 12)?,
        minimum_ttl: read_u32(rdata, pos + 16)?,
    })
}

fn decode_txt(ttl: u32, rdata: &[u8]) -> Option<DnsRecord> {
    let (&len, text) = rdata.split_first()?;
    if len as usize != text.len() {
        return None;
    }

    Some(DnsRecord::TXT {
        ttl,
        text: String::from_utf8_lossy(text).into_owned(),
    })
}

fn decode_srv(ttl: u32, rdata: &[u8], message: &[u8]) -> Option<DnsRecord> {
    let priority = read_u16(rdata, 0)?;
    let weight = read_u16(rdata, 2)?;
    let port = read_u16(rdata, 4)?;
    let target = decode_name(rdata, 6, message).ok()?.name;

    Some(DnsRecord::SRV {
        ttl,
        priority,
        weight,
        port,
        target,
    })
}

fn decode_caa(ttl: u32, rdata: &[u8]) -> Option<DnsRecord> {
    let flags = *rdata.first()?;
    let tag_len = *rdata.get(1)? as usize;
    let tag = rdata.get(2..2 + tag_len)?;
    let value = &rdata[2 + tag_len..];

    Some(DnsRecord::CAA {
        ttl,
        flags,
        tag: String::from_utf8_lossy(tag).into_owned(),
        value: String::from_utf8_lossy(value).into_owned(),
    })
}

fn decode_ds(ttl: u32, rdata: &[u8]) -> Option<DnsRecord> {
    let key_tag = read_u16(rdata, 0)?;
    let algorithm = *rdata.get(2)?;
    let digest_type = *rdata.get(3)?;

    Some(DnsRecord::DS {
        ttl,
        key_tag,
        algorithm,
        digest_type,
        digest: rdata[4..].to_vec(),
    })
}

fn decode_dnskey(ttl: u32, rdata: &[u8]) -> Option<DnsRecord> {
    let flags = read_u16(rdata, 0)?;
    let protocol = *rdata.get(2)?;
    let algorithm = *rdata.get(3)?;

    Some(DnsRecord::DNSKEY {
        ttl,
        flags,
        protocol,
        algorithm,
        public_key: rdata[4..].to_vec(),
    })
}

fn decode_uri(ttl: u32, rdata: &[u8]) -> Option<DnsRecord> {
    let priority = read_u16(rdata, 0)?;
    let weight = read_u16(rdata, 2)?;

    Some(DnsRecord::URI {
        ttl,
        priority,
        weight,
        target: String::from_utf8_lossy(&rdata[4..]).into_owned(),
    })
}
