#![allow(dead_code)]

use flate2::read::ZlibDecoder;
use lopdf::{Document, Object, Stream};
use report_service::config::{ReportConfig, BUNDLED_IMAGE_PATH};
use report_service::startup::Application;
use std::io::Read;
use std::path::PathBuf;

pub struct TestApp {
    pub http_address: String,
    pub http_port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_image(BUNDLED_IMAGE_PATH).await
    }

    pub async fn spawn_with_image(image_path: impl Into<PathBuf>) -> Self {
        let mut config = ReportConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.assets.image_path = image_path.into();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let http_port = app.port();
        let http_address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            http_address,
            http_port,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.http_address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// An image XObject pulled back out of a generated PDF.
pub struct ExtractedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

pub fn parse_pdf(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("response body is not a parseable PDF")
}

pub fn extract_all_text(doc: &Document) -> String {
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    doc.extract_text(&pages).expect("Failed to extract text")
}

/// Every image XObject referenced from a page's resources, in page order.
pub fn extract_images(doc: &Document) -> Vec<ExtractedImage> {
    let mut images = Vec::new();

    for page_id in doc.get_pages().values() {
        let page = doc.get_dictionary(*page_id).expect("page dictionary");
        let Ok(resources) = page.get(b"Resources").and_then(|r| resolve_dict(doc, r)) else {
            continue;
        };
        let Ok(xobjects) = resources.get(b"XObject").and_then(|x| resolve_dict(doc, x)) else {
            continue;
        };

        for (_, object) in xobjects.iter() {
            let id = object.as_reference().expect("XObject reference");
            let stream = doc
                .get_object(id)
                .and_then(Object::as_stream)
                .expect("XObject stream");
            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name_str)
                .map_or(false, |subtype| subtype == "Image");
            if !is_image {
                continue;
            }

            let alpha = stream.dict.get(b"SMask").ok().map(|smask| {
                let smask_id = smask.as_reference().expect("SMask reference");
                let smask = doc
                    .get_object(smask_id)
                    .and_then(Object::as_stream)
                    .expect("SMask stream");
                inflate_samples(smask)
            });

            images.push(ExtractedImage {
                width: stream.dict.get(b"Width").and_then(Object::as_i64).unwrap() as u32,
                height: stream.dict.get(b"Height").and_then(Object::as_i64).unwrap() as u32,
                rgb: inflate_samples(stream),
                alpha,
            });
        }
    }

    images
}

/// Raw samples of a FlateDecode image stream. lopdf declines to decode image
/// streams, so the zlib data is inflated here.
fn inflate_samples(stream: &Stream) -> Vec<u8> {
    let mut samples = Vec::new();
    ZlibDecoder::new(stream.content.as_slice())
        .read_to_end(&mut samples)
        .expect("image samples are zlib data");
    samples
}

fn resolve_dict<'a>(
    doc: &'a Document,
    object: &'a Object,
) -> lopdf::Result<&'a lopdf::Dictionary> {
    match object {
        Object::Reference(id) => doc.get_dictionary(*id),
        other => other.as_dict(),
    }
}

/// The bundled asset decoded with `image`, independently of the service's own decoder.
pub fn bundled_asset() -> image::RgbaImage {
    image::open(BUNDLED_IMAGE_PATH)
        .expect("bundled image asset")
        .to_rgba8()
}
