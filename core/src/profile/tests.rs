use super::*;
use tempfile::TempDir;

const FULL: &str = r#"{
  "name": "Jane Doe",
  "title": "Systems Engineer",
  "tagline": "Building reliable things",
  "location": "Pune, India",
  "about": "I like storage engines.",
  "photo": "https://example.com/me.png",
  "github": "https://github.com/jane",
  "linkedin": "https://linkedin.com/in/jane",
  "email": "jane@example.com",
  "education": [
    {"id": 1, "degree": "B.Tech", "institution": "Some University", "location": "Pune", "duration": "2016 - 2020", "details": "CGPA 9.1"}
  ],
  "experience": [
    {"id": 1, "title": "Engineer", "company": "Acme", "type": "Full-time", "location": "Remote", "duration": "2020 - now", "description": "Backend work", "achievements": ["Shipped v2"]},
    {"id": "intern", "title": "Intern", "company": "Beta", "location": "Pune", "duration": "2019", "description": "Tooling"}
  ],
  "skills": {"languages": ["Rust", "Go"], "frontend": [], "backend": ["Axum"], "databases": ["Postgres"], "tools": ["Git"]},
  "projects": [
    {"id": 1, "name": "folio", "desc": "Portfolio site", "tech": ["Rust"], "link": "https://example.com/folio"},
    {"id": 2, "name": "notes", "desc": "Note taker"}
  ],
  "certificates": [
    {"id": 1, "name": "Cloud Cert", "issuer": "Cloud Co", "date": "2023", "description": "Cloud basics"}
  ]
}"#;

fn minimal() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "title": "Engineer",
        "location": "Earth",
        "about": "Hi",
        "github": "gh",
        "linkedin": "li",
        "email": "jane@example.com",
        "education": [],
        "experience": [],
        "skills": {},
        "projects": []
    })
}

#[test]
fn test_parses_full_document() {
    let profile = Profile::from_json(FULL).unwrap();

    assert_eq!(profile.first_name(), "Jane");
    assert_eq!(profile.tagline.as_deref(), Some("Building reliable things"));
    assert_eq!(profile.experience[0].kind.as_deref(), Some("Full-time"));
    assert_eq!(profile.experience[1].id, ItemId::Text("intern".to_string()));
    assert!(profile.experience[1].achievements.is_empty());
    assert_eq!(profile.projects[1].link, None);
    assert_eq!(profile.certificates.len(), 1);
}

#[test]
fn test_optional_fields_default() {
    let profile = Profile::from_json(&minimal().to_string()).unwrap();

    assert_eq!(profile.tagline, None);
    assert_eq!(profile.photo, None);
    assert_eq!(profile.portfolio, None);
    assert!(profile.certificates.is_empty());
    assert_eq!(profile.skills, Skills::default());
}

#[test]
fn test_missing_required_field_fails_to_parse() {
    let mut doc = minimal();
    doc.as_object_mut().unwrap().remove("education");

    let result = Profile::from_json(&doc.to_string());

    assert!(matches!(result, Err(ProfileLoadError::Parse(_))));
}

#[test]
fn test_invalid_values_are_reported_together() {
    let mut doc = minimal();
    doc["name"] = serde_json::json!("  ");
    doc["email"] = serde_json::json!("nobody");

    let Err(ProfileLoadError::Invalid(errors)) = Profile::from_json(&doc.to_string()) else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("profile.json");
    std::fs::write(&path, FULL).unwrap();

    let profile = Profile::load(&ProfileSource::File(path)).unwrap();

    assert_eq!(profile.name, "Jane Doe");
}

#[test]
fn test_load_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let result = Profile::load(&ProfileSource::File(temp.path().join("absent.json")));
    assert!(matches!(result, Err(ProfileLoadError::Io(_))));
}

#[test]
fn test_load_unreachable_url_fails() {
    let result = Profile::load(&ProfileSource::Url("http://127.0.0.1:9/profile.json".to_string()));
    assert!(matches!(result, Err(ProfileLoadError::Http(_))));
}

#[test]
fn test_source_parse() {
    assert_eq!(
        ProfileSource::parse("https://example.com/profile.json"),
        ProfileSource::Url("https://example.com/profile.json".to_string())
    );
    assert_eq!(
        ProfileSource::parse("data/profile.json"),
        ProfileSource::File(PathBuf::from("data/profile.json"))
    );
}

#[test]
fn test_summary_renders_sections() {
    let summary = Profile::from_json(FULL).unwrap().summary();

    assert!(summary.starts_with("Jane Doe\nSystems Engineer\n"));
    assert!(summary.contains("## Education\n- B.Tech at Some University (Pune, 2016 - 2020)"));
    assert!(summary.contains("- Engineer, Acme [Full-time]"));
    assert!(summary.contains("  * Shipped v2"));
    assert!(summary.contains("- Languages: Rust, Go"));
    assert!(!summary.contains("Frontend"));
    assert!(summary.contains("## Certificates\n- Cloud Cert (Cloud Co, 2023)"));
}
