mod helper;

use helper::{fixture, fixture_dir};
use refoveo::verify::file::{kind, size};
use refoveo::verify::{VerifyError, contains_file, is_empty_dir, unc_file_exists};
use refoveo::xml::{XmlInput, appcast, document, schema};
use url::Url;

#[test]
fn fixtures_are_plain_files_within_limits() {
    let appcast = fixture("appcast.xml");
    let path = appcast.to_string_lossy();

    assert!(kind::is_file(&path).unwrap());
    assert!(!kind::is_system(&path).unwrap());
    assert!(size::less_than(&appcast, 10 * 1024 * 1024).unwrap());
    assert!(size::greater_than(&appcast, 0).unwrap());

    let uri = Url::from_file_path(&appcast).unwrap();
    assert!(unc_file_exists(uri.as_str()).unwrap());
}

#[test]
fn feed_directory_layout() {
    let dir = fixture_dir(&["appcast.xml", "appcast.xsd"]);
    let path = dir.path().to_string_lossy();

    assert!(contains_file(&path, "appcast.xml").unwrap());
    assert!(!contains_file(&path, "appversion.xml").unwrap());
    assert!(!is_empty_dir(&path).unwrap());
    assert!(matches!(
        is_empty_dir(&dir.path().join("appcast.xml").to_string_lossy()),
        Err(VerifyError::InvalidArgument { .. })
    ));
}

#[test]
fn fixture_manifests_match_fixture_schemas() {
    for (xml, xsd) in [
        ("appcast.xml", "appcast.xsd"),
        ("appversion.xml", "appversion.xsd"),
    ] {
        let xml = fixture(xml);
        let xsd = fixture(xsd);

        assert!(document::verify_file(&xml).unwrap().is_valid());
        assert!(schema::verify_file(&xsd).unwrap().is_valid());
        assert!(
            appcast::verify(XmlInput::File(&xml), Some(XmlInput::File(&xsd)))
                .unwrap()
                .is_valid()
        );
    }
}

#[test]
fn manifest_against_the_wrong_schema_is_invalid() {
    let validation = appcast::verify(
        XmlInput::File(&fixture("appversion.xml")),
        Some(XmlInput::File(&fixture("appcast.xsd"))),
    )
    .unwrap();

    let issue = validation.issue().unwrap();
    assert!(issue.message.contains("'appversion'"), "{}", issue.message);
    assert_eq!((issue.line, issue.column), (2, 1));
}

#[test]
fn release_without_download_or_in_a_foreign_namespace_is_invalid() {
    let xsd = fixture("appcast.xsd");
    let appcast = std::fs::read_to_string(fixture("appcast.xml")).unwrap();

    let without_enclosure = appcast.replace(
        r#"<enclosure url="https://example.com/refoveo-1.4.1.zip"/>"#,
        "",
    );
    let validation =
        appcast::verify(XmlInput::Memory(&without_enclosure), Some(XmlInput::File(&xsd))).unwrap();
    let issue = validation.issue().unwrap();
    assert!(issue.message.contains("'enclosure'"), "{}", issue.message);
    assert_eq!((issue.line, issue.column), (7, 3));

    let foreign = appcast.replace(
        r#"<item version="1.4.1">"#,
        r#"<item xmlns="urn:other" version="1.4.1">"#,
    );
    let validation =
        appcast::verify(XmlInput::Memory(&foreign), Some(XmlInput::File(&xsd))).unwrap();
    assert!(!validation.is_valid());
}
