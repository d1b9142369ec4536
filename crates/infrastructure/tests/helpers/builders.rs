#![allow(dead_code)]
use ferrous_stub_domain::{DnsQuery, RecordType};
use ferrous_stub_infrastructure::dns::wire::MessageBuilder;

/// Raw response message assembled byte by byte.
///
/// Answers use a `c0 0c` pointer as owner name, so a question section must be
/// present for them to point somewhere meaningful.
pub struct ResponseBuilder {
    id: u16,
    flags: [u8; 2],
    question_count: u16,
    answer_count: Option<u16>,
    question: Vec<u8>,
    answers: Vec<u8>,
    declared_answers: u16,
    trailer: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            flags: [0x81, 0x80],
            question_count: 0,
            answer_count: None,
            question: Vec::new(),
            answers: Vec::new(),
            declared_answers: 0,
            trailer: Vec::new(),
        }
    }

    /// Echoes the ID and question section of a query built by `MessageBuilder`.
    pub fn for_query(query: &[u8]) -> Self {
        let id = u16::from_be_bytes([query[0], query[1]]);
        let mut builder = Self::new(id);
        builder.question_count = u16::from_be_bytes([query[4], query[5]]);
        builder.question = query[12..].to_vec();
        builder
    }

    pub fn question(mut self, domain: &str, record_type: RecordType) -> Self {
        for label in domain.split('.').filter(|l| !l.is_empty()) {
            self.question.push(label.len() as u8);
            self.question.extend_from_slice(label.as_bytes());
        }
        self.question.push(0);
        self.question
            .extend_from_slice(&record_type.to_u16().to_be_bytes());
        self.question.extend_from_slice(&[0x00, 0x01]);
        self.question_count += 1;
        self
    }

    pub fn flags(mut self, high: u8, low: u8) -> Self {
        self.flags = [high, low];
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.flags[1] = (self.flags[1] & 0xF0) | (rcode & 0x0F);
        self
    }

    pub fn truncated(mut self) -> Self {
        self.flags[0] |= 0x02;
        self
    }

    pub fn authoritative(mut self) -> Self {
        self.flags[0] |= 0x04;
        self
    }

    pub fn question_count(mut self, count: u16) -> Self {
        self.question_count = count;
        self
    }

    /// Overrides the answer count written to the header.
    pub fn answer_count(mut self, count: u16) -> Self {
        self.answer_count = Some(count);
        self
    }

    pub fn answer(mut self, type_code: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.answers.extend_from_slice(&[0xC0, 0x0C]);
        self.answers.extend_from_slice(&type_code.to_be_bytes());
        self.answers.extend_from_slice(&[0x00, 0x01]);
        self.answers.extend_from_slice(&ttl.to_be_bytes());
        self.answers
            .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.answers.extend_from_slice(rdata);
        self.declared_answers += 1;
        self
    }

    pub fn answer_a(self, ttl: u32, octets: [u8; 4]) -> Self {
        self.answer(1, ttl, &octets)
    }

    /// Raw bytes appended after the answer section.
    pub fn trailer(mut self, bytes: &[u8]) -> Self {
        self.trailer.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let answer_count = self.answer_count.unwrap_or(self.declared_answers);

        let mut msg = Vec::with_capacity(12 + self.question.len() + self.answers.len());
        msg.extend_from_slice(&self.id.to_be_bytes());
        msg.extend_from_slice(&self.flags);
        msg.extend_from_slice(&self.question_count.to_be_bytes());
        msg.extend_from_slice(&answer_count.to_be_bytes());
        msg.extend_from_slice(&[0, 0, 0, 0]);
        msg.extend_from_slice(&self.question);
        msg.extend_from_slice(&self.answers);
        msg.extend_from_slice(&self.trailer);
        msg
    }
}

pub struct QueryBytes;

impl QueryBytes {
    pub fn a(domain: &str, id: u16) -> Vec<u8> {
        let query = DnsQuery::new(domain, RecordType::A).unwrap();
        MessageBuilder::build_query(&query, id).unwrap()
    }

    pub fn types(domain: &str, types: &[RecordType], id: u16) -> Vec<u8> {
        let query = DnsQuery::with_types(domain, types, false).unwrap();
        MessageBuilder::build_query(&query, id).unwrap()
    }
}
