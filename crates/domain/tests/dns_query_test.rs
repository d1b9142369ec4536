use ferrous_stub_domain::{DnsQuery, DomainError, RecordType};

mod helpers;
use helpers::DomainNameBuilder;

#[test]
fn test_wire_len_single_type() {
    let query = DnsQuery::new("google.com", RecordType::A).unwrap();

    // header + "6google3com0" + type + class
    assert_eq!(query.wire_len(), 12 + 12 + 4);
    assert_eq!(query.record_types(), [RecordType::A]);
    assert!(!query.accept_truncated());
}

#[test]
fn test_wire_len_multiple_types() {
    let types = [RecordType::A, RecordType::AAAA, RecordType::MX];
    let query = DnsQuery::with_types("google.com", &types, true).unwrap();

    assert_eq!(query.wire_len(), 12 + 12 + 4 + 2 * 6);
    assert!(query.accept_truncated());
}

#[test]
fn test_max_types_accepted() {
    let types = vec![RecordType::A; 255];
    let query = DnsQuery::with_types("example.com", &types, false).unwrap();

    assert_eq!(query.wire_len(), 12 + 13 + 4 + 254 * 6);
}

#[test]
fn test_too_many_types_rejected() {
    let types = vec![RecordType::A; 256];
    let result = DnsQuery::with_types("example.com", &types, false);

    assert!(matches!(result, Err(DomainError::InvalidQuery(_))));
}

#[test]
fn test_no_types_rejected() {
    let result = DnsQuery::with_types("example.com", &[], false);
    assert!(matches!(result, Err(DomainError::InvalidQuery(_))));
}

#[test]
fn test_empty_and_whitespace_names_rejected() {
    for name in ["", " ", "\t\n"] {
        let result = DnsQuery::new(name, RecordType::A);
        assert!(
            matches!(result, Err(DomainError::InvalidDomainName(_))),
            "name {:?} should be rejected",
            name
        );
    }
}

#[test]
fn test_label_length_limits() {
    for len in [63, 64, 100, 191, 193, 255] {
        let name = DomainNameBuilder::new().label_of_len(len).label("com").build();
        let query = DnsQuery::new(&name, RecordType::A).unwrap();
        assert_eq!(query.labels()[0].len(), len);
    }

    let too_long = DomainNameBuilder::new().label_of_len(256).label("com").build();
    assert!(DnsQuery::new(&too_long, RecordType::A).is_err());
}

#[test]
fn test_label_colliding_with_pointer_marker_rejected() {
    let name = DomainNameBuilder::new().label_of_len(192).label("com").build();
    assert!(matches!(
        DnsQuery::new(&name, RecordType::A),
        Err(DomainError::InvalidDomainName(_))
    ));
}

#[test]
fn test_label_count_limit() {
    let at_limit = vec!["a"; 255].join(".");
    let query = DnsQuery::new(&at_limit, RecordType::A).unwrap();
    assert_eq!(query.labels().len(), 255);

    let over = vec!["a"; 256].join(".");
    assert!(DnsQuery::new(&over, RecordType::A).is_err());
}

#[test]
fn test_case_is_preserved() {
    let query = DnsQuery::new("ExAmPle.COM", RecordType::A).unwrap();
    assert_eq!(query.domain(), "ExAmPle.COM");
}

#[test]
fn test_non_ascii_rejected() {
    assert!(DnsQuery::new("bücher.de", RecordType::A).is_err());
}
