use super::*;
use crate::scan_report::domain::{
    Distro, IgnoreRule, IgnoredMatch, Match, MatchSet, Severity, SourceDescription,
    SourceMetadata, Vulnerability, VulnerabilityMetadata, VulnerabilityReference,
};
use crate::scan_report::policies::SortStrategy;
use std::cell::RefCell;

// Mock implementations for testing
struct MockMetadataProvider {
    records: Vec<VulnerabilityMetadata>,
    lookups: RefCell<usize>,
}

impl MockMetadataProvider {
    fn new(records: Vec<VulnerabilityMetadata>) -> Self {
        Self {
            records,
            lookups: RefCell::new(0),
        }
    }
}

impl VulnerabilityMetadataProvider for MockMetadataProvider {
    fn vulnerability_metadata(
        &self,
        reference: &VulnerabilityReference,
    ) -> Result<Option<VulnerabilityMetadata>> {
        *self.lookups.borrow_mut() += 1;
        Ok(self
            .records
            .iter()
            .find(|r| r.id == reference.id && r.namespace == reference.namespace)
            .cloned())
    }
}

#[derive(Default)]
struct MockProgressReporter {
    messages: RefCell<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.messages
            .borrow_mut()
            .push(format!("{}/{}", current, total));
    }

    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn metadata(id: &str, severity: Severity, risk: f64) -> VulnerabilityMetadata {
    let mut record = VulnerabilityMetadata::new(id, "nvd:cpe", severity);
    record.risk = risk;
    record
}

fn create_match(vuln_id: &str, package_id: &str) -> Match {
    Match::new(
        Vulnerability::new(vuln_id, "nvd:cpe"),
        PackageId::new(package_id),
    )
}

fn create_use_case(
    records: Vec<VulnerabilityMetadata>,
) -> BuildDocumentUseCase<MockMetadataProvider, MockProgressReporter> {
    BuildDocumentUseCase::new(
        MockMetadataProvider::new(records),
        MockProgressReporter::default(),
    )
}

fn request(strategy: SortStrategy) -> DocumentRequest {
    DocumentRequest {
        sort_strategy: strategy,
        ..DocumentRequest::default()
    }
}

#[test]
fn test_empty_scan_produces_empty_matches_and_no_ignored_key() {
    let use_case = create_use_case(Vec::new());
    let document = use_case
        .execute(&ScanInput::default(), &DocumentRequest::default())
        .unwrap();

    assert!(document.matches.is_empty());
    assert!(document.ignored_matches.is_none());
    assert!(document.source.is_none());

    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["matches"], serde_json::json!([]));
    assert!(json.as_object().unwrap().get("ignoredMatches").is_none());
    assert!(json["source"].is_null());
}

#[test]
fn test_missing_package_aborts_assembly() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        packages: vec![Package::new("p1", "openssl", "3.0.2", "deb")],
        matches: MatchSet::from(vec![
            create_match("CVE-2024-0001", "p1"),
            create_match("CVE-2024-0002", "missing"),
        ]),
        ..ScanInput::default()
    };

    let error = use_case
        .execute(&input, &DocumentRequest::default())
        .unwrap_err();
    let report_error = error.downcast_ref::<ReportError>().unwrap();
    assert!(matches!(
        report_error,
        ReportError::PackageNotFound { package_id, .. } if package_id == "missing"
    ));
}

#[test]
fn test_missing_package_in_ignored_match_aborts_assembly() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        packages: vec![Package::new("p1", "openssl", "3.0.2", "deb")],
        ignored_matches: vec![IgnoredMatch {
            matched: create_match("CVE-2024-0001", "gone"),
            applied_ignore_rules: Vec::new(),
        }],
        ..ScanInput::default()
    };

    let error = use_case
        .execute(&input, &DocumentRequest::default())
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<ReportError>(),
        Some(ReportError::PackageNotFound { .. })
    ));
}

#[test]
fn test_matches_sorted_by_requested_strategy() {
    let use_case = create_use_case(vec![
        metadata("CVE-2024-0001", Severity::Low, 80.0),
        metadata("CVE-2024-0002", Severity::Critical, 10.0),
    ]);
    let input = ScanInput {
        packages: vec![
            Package::new("p1", "zlib", "1.2.13", "deb"),
            Package::new("p2", "curl", "8.0.0", "deb"),
        ],
        matches: MatchSet::from(vec![
            create_match("CVE-2024-0001", "p1"),
            create_match("CVE-2024-0002", "p2"),
        ]),
        ..ScanInput::default()
    };

    let by_risk = use_case
        .execute(&input, &request(SortStrategy::Risk))
        .unwrap();
    assert_eq!(by_risk.matches[0].vulnerability.metadata.id, "CVE-2024-0001");

    let by_severity = use_case
        .execute(&input, &request(SortStrategy::Severity))
        .unwrap();
    assert_eq!(by_severity.matches[0].vulnerability.metadata.id, "CVE-2024-0002");

    let by_package = use_case
        .execute(&input, &request(SortStrategy::Package))
        .unwrap();
    assert_eq!(by_package.matches[0].artifact.name, "curl");
}

#[test]
fn test_ignored_matches_carry_rules() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        packages: vec![Package::new("p1", "openssl", "3.0.2", "deb")],
        ignored_matches: vec![IgnoredMatch {
            matched: create_match("CVE-2024-0001", "p1"),
            applied_ignore_rules: vec![IgnoreRule {
                vulnerability: "CVE-2024-0001".to_string(),
                reason: "not reachable".to_string(),
                ..IgnoreRule::default()
            }],
        }],
        ..ScanInput::default()
    };

    let document = use_case
        .execute(&input, &DocumentRequest::default())
        .unwrap();
    assert!(document.matches.is_empty());
    let ignored = document.ignored_matches.unwrap();
    assert_eq!(ignored.len(), 1);
    assert_eq!(ignored[0].applied_ignore_rules[0].reason, "not reachable");
}

#[test]
fn test_distro_and_source_are_populated() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        source: Some(SourceDescription {
            name: String::new(),
            version: String::new(),
            metadata: SourceMetadata::Directory {
                path: "/src".to_string(),
            },
        }),
        packages: vec![
            Package::new("p1", "a", "1", "deb").with_distro(Distro::new("debian", "12")),
            Package::new("p2", "b", "1", "deb").with_distro(Distro::new("debian", "12")),
            Package::new("p3", "c", "1", "apk").with_distro(Distro::new("alpine", "3.19")),
        ],
        ..ScanInput::default()
    };

    let document = use_case
        .execute(&input, &DocumentRequest::default())
        .unwrap();
    assert_eq!(document.distro.name, "debian");
    assert_eq!(document.distro.version, "12");
    assert_eq!(document.source.unwrap().kind, "directory");
}

#[test]
fn test_unsupported_source_kind() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        source: Some(SourceDescription {
            name: String::new(),
            version: String::new(),
            metadata: SourceMetadata::Unknown {
                kind: "snap".to_string(),
            },
        }),
        ..ScanInput::default()
    };

    let error = use_case
        .execute(&input, &DocumentRequest::default())
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<ReportError>(),
        Some(ReportError::UnsupportedSource { kind }) if kind == "snap"
    ));
}

#[test]
fn test_descriptor_embeds_request_and_db() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        db: serde_json::json!({"schemaVersion": "6.0.2"}),
        ..ScanInput::default()
    };
    let request = DocumentRequest::new(
        crate::application::dto::ToolIdentity::new("vulnscope", "1.2.3"),
        serde_json::json!({"sort_by": "risk"}),
        SortStrategy::Risk,
    );

    let document = use_case.execute(&input, &request).unwrap();
    assert_eq!(document.descriptor.name, "vulnscope");
    assert_eq!(document.descriptor.version, "1.2.3");
    assert_eq!(document.descriptor.configuration["sort_by"], "risk");
    assert_eq!(document.descriptor.db["schemaVersion"], "6.0.2");
    assert!(chrono::DateTime::parse_from_rfc3339(&document.descriptor.timestamp).is_ok());
}

#[test]
fn test_progress_is_reported() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        packages: vec![Package::new("p1", "openssl", "3.0.2", "deb")],
        matches: MatchSet::from(vec![create_match("CVE-2024-0001", "p1")]),
        ..ScanInput::default()
    };

    use_case
        .execute(&input, &DocumentRequest::default())
        .unwrap();
    let messages = use_case.progress_reporter.messages.borrow();
    assert!(messages.iter().any(|m| m == "1/1"));
    assert!(messages
        .iter()
        .any(|m| m.contains("Assembled report with 1 match(es), 0 ignored")));
    assert_eq!(*use_case.metadata_provider.lookups.borrow(), 1);
}

#[test]
fn test_abort_is_reported_before_error_propagates() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        packages: vec![Package::new("p1", "openssl", "3.0.2", "deb")],
        matches: MatchSet::from(vec![
            create_match("CVE-2024-0001", "p1"),
            create_match("CVE-2024-0002", "missing"),
        ]),
        ..ScanInput::default()
    };

    assert!(use_case
        .execute(&input, &DocumentRequest::default())
        .is_err());
    let messages = use_case.progress_reporter.messages.borrow();
    assert!(messages
        .iter()
        .any(|m| m.contains("Report assembly stopped at match 2/2")));
    assert!(!messages.iter().any(|m| m.contains("Assembled report")));
}

#[test]
fn test_ignored_match_abort_is_reported() {
    let use_case = create_use_case(Vec::new());
    let input = ScanInput {
        ignored_matches: vec![IgnoredMatch {
            matched: create_match("CVE-2024-0001", "gone"),
            applied_ignore_rules: Vec::new(),
        }],
        ..ScanInput::default()
    };

    assert!(use_case
        .execute(&input, &DocumentRequest::default())
        .is_err());
    let messages = use_case.progress_reporter.messages.borrow();
    assert!(messages
        .iter()
        .any(|m| m.contains("Report assembly stopped at ignored match 1/1")));
}

#[test]
fn test_matches_tied_on_every_key_keep_canonical_order() {
    let mut nvd = metadata("CVE-2024-0001", Severity::High, 20.0);
    nvd.namespace = "nvd:cpe".to_string();
    let mut distro = metadata("CVE-2024-0001", Severity::High, 20.0);
    distro.namespace = "debian:distro:debian:12".to_string();
    let use_case = create_use_case(vec![nvd, distro]);

    // Inserted in the reverse of the canonical (fingerprint) order
    let input = ScanInput {
        packages: vec![Package::new("p1", "openssl", "3.0.2", "deb")],
        matches: MatchSet::from(vec![
            Match::new(
                Vulnerability::new("CVE-2024-0001", "nvd:cpe"),
                PackageId::new("p1"),
            ),
            Match::new(
                Vulnerability::new("CVE-2024-0001", "debian:distro:debian:12"),
                PackageId::new("p1"),
            ),
        ]),
        ..ScanInput::default()
    };

    for strategy in SortStrategy::ALL {
        let document = use_case.execute(&input, &request(strategy)).unwrap();
        let namespaces: Vec<&str> = document
            .matches
            .iter()
            .map(|m| m.vulnerability.metadata.namespace.as_str())
            .collect();
        assert_eq!(
            namespaces,
            vec!["debian:distro:debian:12", "nvd:cpe"],
            "strategy {}",
            strategy.as_str()
        );
    }
}

#[test]
fn test_timestamp_uses_z_for_utc_and_trims_fraction() {
    use chrono::Utc;

    let whole = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(format_timestamp(whole).unwrap(), "2024-01-02T03:04:05Z");

    let offset = DateTime::parse_from_rfc3339("2024-01-02T03:04:05.5+09:00").unwrap();
    assert_eq!(
        format_timestamp(offset).unwrap(),
        "2024-01-02T03:04:05.500+09:00"
    );
}

#[test]
fn test_timestamp_outside_rfc3339_years_is_rejected() {
    use chrono::Utc;

    let far_future = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
    assert!(matches!(
        format_timestamp(far_future),
        Err(ReportError::Timestamp { details }) if details.contains("10000")
    ));
}
