// src/unesco/client.rs
use std::path::Path;
use std::time::Duration;

use reqwest::header;

use crate::storage::StorageManager;
use crate::unesco::models::{extension_for_content_type, form_file_name, DownloadStats, DownloadedForm};
use crate::unesco::page::find_english_form_url;
use crate::utils::error::ScrapeError;
use crate::utils::AppError;

const USER_AGENT: &str = concat!("nomination_forms/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client for the UNESCO site.
pub fn build_client() -> Result<reqwest::Client, ScrapeError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(60))
        .build()?;
    Ok(client)
}

async fn get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(ScrapeError::Http { status, url: url.to_string() });
    }
    Ok(response)
}

/// Fetches an element page and returns its HTML.
pub async fn fetch_page(client: &reqwest::Client, page_url: &str) -> Result<String, ScrapeError> {
    tracing::info!("Fetching page: {}", page_url);
    let body = get(client, page_url).await?.text().await?;
    tracing::debug!("Fetched {} bytes from {}", body.len(), page_url);
    Ok(body)
}

/// Downloads the English nomination form linked from one element page and
/// saves it as `<number><ext>`.
pub async fn download_nomination_form(
    client: &reqwest::Client,
    storage: &StorageManager,
    page_url: &str,
    number: usize,
) -> Result<DownloadedForm, AppError> {
    let html = fetch_page(client, page_url).await?;
    let form_url = find_english_form_url(&html, page_url)?;
    tracing::info!("Downloading form from: {}", form_url);

    let response = get(client, &form_url)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to download file from {}", form_url);
            e
        })?;
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await.map_err(ScrapeError::from)?;

    let file_name = form_file_name(number, extension_for_content_type(content_type.as_deref()));
    let path = storage.save_bytes(&file_name, &bytes)?;
    tracing::info!("Downloaded: {} from {}", file_name, page_url);

    Ok(DownloadedForm {
        page_url: page_url.to_string(),
        form_url,
        path,
        bytes: bytes.len(),
    })
}

/// Walks the URL list in order, pausing `delay` between pages. A page that
/// fails is logged and skipped; its number is not reused.
pub async fn download_all(
    page_urls: &[String],
    output_dir: &Path,
    delay: Duration,
) -> Result<(Vec<DownloadedForm>, DownloadStats), AppError> {
    let client = build_client()?;
    let storage = StorageManager::new(output_dir)?;
    let mut forms = Vec::new();
    let mut stats = DownloadStats::default();

    for (idx, page_url) in page_urls.iter().enumerate() {
        match download_nomination_form(&client, &storage, page_url, idx + 1).await {
            Ok(form) => {
                stats.downloaded += 1;
                forms.push(form);
            }
            Err(e) => {
                tracing::warn!("Error processing {}: {}", page_url, e);
                stats.skipped += 1;
            }
        }
        tokio::time::sleep(delay).await;
    }

    Ok((forms, stats))
}
