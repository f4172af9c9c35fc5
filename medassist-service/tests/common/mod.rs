//! Shared helpers for medassist-service integration tests.
#![allow(dead_code)]

use lopdf::{dictionary, Document, Object, Stream};
use medassist_service::config::{
    GoogleConfig, MedassistConfig, ModelConfig, UploadConfig, DEFAULT_GEMINI_API_BASE,
    DEFAULT_MAX_UPLOAD_BYTES,
};
use medassist_service::services::providers::TextProvider;
use medassist_service::startup::Application;
use service_core::config::Config;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub fn test_config(max_upload_bytes: usize) -> MedassistConfig {
    MedassistConfig {
        common: Config {
            port: 0,
            log_level: "debug".to_string(),
        },
        models: ModelConfig {
            text_model: "gemini-2.0-flash".to_string(),
        },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        },
        upload: UploadConfig {
            max_bytes: max_upload_bytes,
        },
        otlp_endpoint: None,
    }
}

/// Spawn the application on a random port and return its base URL.
pub async fn spawn_app(provider: Arc<dyn TextProvider>) -> String {
    spawn_app_with_limit(provider, DEFAULT_MAX_UPLOAD_BYTES).await
}

pub async fn spawn_app_with_limit(provider: Arc<dyn TextProvider>, max_upload_bytes: usize) -> String {
    let app = Application::with_provider(test_config(max_upload_bytes), provider)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{}", port)
}

/// Single-page PDF whose page draws `text` with a standard font.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let content = format!("BT /F1 11 Tf 72 720 Td ({text}) Tj ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("Failed to serialize PDF");
    buf
}

/// Minimal DOCX package with one body paragraph per entry.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .expect("Failed to start zip entry");
    writer
        .write_all(document.as_bytes())
        .expect("Failed to write zip entry");
    writer
        .finish()
        .expect("Failed to finish zip")
        .into_inner()
}
