use super::name::decode_name;
use super::record_parser::RecordParser;
use super::{read_u16, read_u32, AA_FLAG, HEADER_LEN, TC_FLAG};
use ferrous_stub_domain::{DnsErrorCode, DnsResponse, DomainError};
use tracing::debug;

/// Type (2) + class (2) + TTL (4) + RDLENGTH (2)
const RECORD_FIXED_LEN: usize = 10;

pub struct ResponseParser;

impl ResponseParser {
    /// Parses a received message, folding every failure into a
    /// `CantParseResponse` response.
    pub fn parse(message: &[u8], via_tcp: bool) -> DnsResponse {
        match Self::try_parse(message, via_tcp) {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, len = message.len(), "Unparseable DNS response");
                Self::unparseable(via_tcp)
            }
        }
    }

    pub fn unparseable(via_tcp: bool) -> DnsResponse {
        DnsResponse {
            tcp_used: via_tcp,
            ..DnsResponse::unparseable()
        }
    }

    /// Parses a received message.
    ///
    /// A non-zero RCODE short-circuits into an error response without records.
    /// Answer records that are cut short or malformed for their type are
    /// dropped; only header and question problems fail the whole message.
    pub fn try_parse(message: &[u8], via_tcp: bool) -> Result<DnsResponse, DomainError> {
        if message.len() < HEADER_LEN {
            return Err(DomainError::MalformedMessage(format!(
                "Message is {} bytes, shorter than the header",
                message.len()
            )));
        }

        let error_code = DnsErrorCode::from_rcode(message[3]);
        if !error_code.is_success() {
            return Ok(DnsResponse {
                tcp_used: via_tcp,
                ..DnsResponse::error(error_code)
            });
        }

        let question_count = read_u16(message, 4).unwrap_or(0);
        if question_count == 0 {
            return Err(DomainError::MalformedMessage(
                "Response carries no question".to_string(),
            ));
        }

        let answer_count = read_u16(message, 6).unwrap_or(0);

        let mut pos = HEADER_LEN;
        for _ in 0..question_count {
            let question = decode_name(message, pos, message)?;
            pos += question.consumed + 4;
            if pos > message.len() {
                return Err(DomainError::MalformedMessage(
                    "Question section runs past the end of the message".to_string(),
                ));
            }
        }

        let mut records = Vec::new();

        for _ in 0..answer_count {
            if pos >= message.len() {
                break;
            }

            let owner = decode_name(message, pos, message)?;
            pos += owner.consumed;

            if message.len() - pos < RECORD_FIXED_LEN {
                break;
            }

            let type_code = read_u16(message, pos).unwrap_or(0);
            let ttl = read_u32(message, pos + 4).unwrap_or(0);
            let rdlength = read_u16(message, pos + 8).unwrap_or(0) as usize;
            pos += RECORD_FIXED_LEN;

            if message.len() - pos < rdlength {
                debug!(
                    type_code,
                    rdlength,
                    remaining = message.len() - pos,
                    "Dropping truncated trailing record"
                );
                break;
            }

            let rdata = &message[pos..pos + rdlength];
            pos += rdlength;

            match RecordParser::decode(type_code, ttl, rdata, message) {
                Some(record) => records.push(record),
                None => debug!(type_code, rdlength, "Skipping malformed record"),
            }
        }

        debug!(
            answers = answer_count,
            decoded = records.len(),
            truncated = message[2] & TC_FLAG != 0,
            via_tcp,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            error_code,
            truncated: message[2] & TC_FLAG != 0,
            authoritative: message[2] & AA_FLAG != 0,
            tcp_used: via_tcp,
            records: Some(records),
        })
    }
}
