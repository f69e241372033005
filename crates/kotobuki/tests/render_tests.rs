//! End-to-end rendering of the fixture template against fixture wedding data.

use kotobuki::{
    Kotobuki, KotobukiError, Locale, RenderOptions, SectionKind, TemplateLoader, WeddingData,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_wedding() -> WeddingData {
    let path = fixtures_dir().join("wedding.json");
    let source =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    WeddingData::from_json(&source).unwrap()
}

fn load_invitation() -> Kotobuki {
    let mut loader = TemplateLoader::new(fixtures_dir().join("templates")).unwrap();
    Kotobuki::from_template(loader.load("classic").unwrap())
}

#[test]
fn test_renders_visible_sections_in_order() {
    let page = load_invitation().render_wedding(&load_wedding()).unwrap();
    let ids: Vec<&str> = page.blocks.iter().map(|block| block.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "cover",
            "couple",
            "ceremony",
            "gallery",
            "divider",
            "blessing",
            "guestbook",
            "rsvp",
            "footer-space"
        ]
    );
    assert_eq!(page.max_width, "480px");
    assert_eq!(page.find("rsvp").unwrap().children[0].id, "rsvp-note");
    assert_eq!(page.find("gallery").unwrap().kind, SectionKind::Gallery);
}

#[test]
fn test_resolved_content() {
    let page = load_invitation().render_wedding(&load_wedding()).unwrap();
    let text = |id: &str| page.find(id).unwrap().content.text_content();

    assert_eq!(text("cover"), "Chen Ming & Lin Yue2024年5月20日");
    assert!(text("ceremony").contains("West Lake Garden Hall"));
    assert!(text("ceremony").contains("11:18"));
    assert!(text("rsvp").contains("Please reply by the end of April"));
    // An empty blessing text is present, so the fallback does not apply
    assert_eq!(text("blessing"), "Grandma Lin");
}

#[test]
fn test_html_output() {
    let invitation = load_invitation().with_options(
        RenderOptions::default()
            .with_locale(Locale::EnUs)
            .with_asset_base("https://cdn.example.com/w-2024-0520"),
    );
    let data = load_wedding().to_value().unwrap();
    let html = invitation.render_html(&data);

    assert!(html.starts_with("<style>:root { --kb-background: #fffaf5;"));
    assert!(html.contains("<main class=\"invitation\" style=\"max-width:480px\">"));
    assert!(html.contains("<h1 class=\"title\">Chen Ming &amp; Lin Yue</h1>"));
    assert!(html.contains("<p class=\"date\">May 20, 2024</p>"));
    assert!(html.contains("<p class=\"time\">11:18 AM</p>"));
    assert!(html.contains("src=\"https://cdn.example.com/w-2024-0520/cover.jpg\""));
    assert!(html.contains("src=\"https://cdn.example.com/w-2024-0520/avatars/ming.jpg\""));
    assert!(html.contains("src=\"https://img.example.com/yue.jpg\""));
    assert!(html.contains("<div class=\"kb-gallery gallery-masonry\">"));
    assert!(html.contains("style=\"animation:fadeIn 1.2s ease-out both;animation-delay:0s\""));
    assert!(html.contains("style=\"animation:slideUp 0.8s ease-out both;animation-delay:0.2s\""));
    assert!(!html.contains("sparkles"));
}

#[test]
fn test_conditions_follow_data() {
    let invitation = load_invitation();
    let mut data = load_wedding();
    data.guestbook.enabled = false;
    data.rsvp.enabled = false;

    let page = invitation.render_wedding(&data).unwrap();
    assert!(page.find("guestbook").is_none());
    assert!(page.find("rsvp-note").is_none());
    assert!(page
        .find("rsvp")
        .unwrap()
        .content
        .text_content()
        .contains("RSVP is closed"));
}

#[test]
fn test_empty_data_degrades_gracefully() {
    let page = load_invitation().render(&json!({}));
    // gallery: missing never equals 0, so the hide condition passes
    assert!(page.find("gallery").is_some());
    assert!(page.find("guestbook").is_none());
    assert_eq!(
        page.find("blessing").unwrap().content.text_content(),
        "Thank you for sharing our day"
    );
}

#[test]
fn test_render_is_idempotent_and_pure() {
    let invitation = load_invitation();
    let data = load_wedding().to_value().unwrap();
    let before = data.clone();
    assert_eq!(invitation.render(&data), invitation.render(&data));
    assert_eq!(data, before);
}

#[test]
fn test_loader_rejects_traversal() {
    let mut loader = TemplateLoader::new(fixtures_dir().join("templates")).unwrap();
    assert!(matches!(
        loader.load("../wedding"),
        Err(KotobukiError::TemplateError { .. })
    ));
}
