//! Loading the status page from a URL or from disk

use super::PageDocument;
use crate::defaults::PAGE_LOAD_TIMEOUT;
use crate::error::{AppError, Result};
use crate::models::{Config, PageSource};
use reqwest::Client;

/// Load and parse the page named by the configuration
pub async fn load_page(config: &Config) -> Result<PageDocument> {
    match &config.page_source {
        PageSource::Url(_) => {
            let location = config.page_location()?;
            let client = Client::builder()
                .timeout(PAGE_LOAD_TIMEOUT)
                .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
                .build()
                .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

            let response = client.get(location).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::http_request(format!(
                    "Status page returned HTTP {}",
                    status.as_u16()
                )));
            }

            // After redirects the page lives at the final URL.
            let final_location = response.url().clone();
            let body = response.text().await?;
            PageDocument::parse(&body, final_location)
        }
        PageSource::File(path) => {
            let body = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AppError::io(format!("{}: {}", path.display(), e)))?;
            PageDocument::parse(&body, config.page_location()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fixtures::STATUS_PAGE;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_page_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STATUS_PAGE.as_bytes()).unwrap();

        let mut config = Config::new(PageSource::File(file.path().to_path_buf()));
        config.base_url = Some("http://127.0.0.1:9090/".to_string());

        let page = load_page(&config).await.unwrap();
        assert_eq!(page.location().as_str(), "http://127.0.0.1:9090/");
        assert_eq!(page.list_items().len(), 5);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let config = Config::new(PageSource::File("/definitely/not/here.html".into()));
        let err = load_page(&config).await.unwrap_err();
        assert_eq!(err.category(), "IO");
    }

    #[tokio::test]
    async fn test_load_page_from_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/release/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_PAGE))
            .mount(&server)
            .await;

        let url = format!("{}/release/index.html", server.uri());
        let page = load_page(&Config::new(PageSource::Url(url.clone()))).await.unwrap();
        assert_eq!(page.location().as_str(), url);
        assert!(page.element_by_id("lineMs1").is_some());
    }

    #[tokio::test]
    async fn test_page_error_status_fails_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = Config::new(PageSource::Url(format!("{}/index.html", server.uri())));
        let err = load_page(&config).await.unwrap_err();
        assert!(matches!(err, AppError::HttpRequest(_)));
    }
}
