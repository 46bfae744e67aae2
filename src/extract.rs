//! Readable-text extraction from web pages, PDFs and local files.
//!
//! HTML extraction mirrors what a reader-mode heuristic does: skip page
//! chrome, prefer a main-content container, fall back to substantial
//! paragraphs, then to the whole body. PDFs only work when they carry a
//! text layer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Elements whose text is never treated as page content.
const UNWANTED_SELECTORS: &[&str] = &[
    "nav", "header", "footer", "aside", "script", "style", ".ad", ".ads", ".sidebar",
];

/// Main-content containers, tried in order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role=\"main\"]",
    ".post-content",
    ".article-content",
    ".entry-content",
];

/// A content container must exceed this many characters to be accepted.
const MIN_CONTAINER_CHARS: usize = 300;

/// A paragraph must exceed this many characters to join the fallback text.
const MIN_PARAGRAPH_CHARS: usize = 50;

/// PDF text shorter than this is treated as missing.
const MIN_PDF_CHARS: usize = 50;

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Title used when a page has none.
pub const UNTITLED: &str = "Untitled";

/// Errors raised while loading or extracting page content.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source is not a web page, PDF, or readable file.
    #[error("Please navigate to a webpage or PDF file ({source_label})")]
    UnsupportedSource {
        /// The rejected source as given by the caller.
        source_label: String,
    },

    /// Fetching the page failed at the network level.
    #[error("Cannot access this page: {url}: {source}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Cannot access this page: {url} returned HTTP {status}")]
    HttpStatus {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Reading a local file or stdin failed.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// Path that failed, or `-` for stdin.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The PDF has no usable text layer.
    #[error(
        "Could not extract text from PDF. It may be image-based (scanned) or still loading."
    )]
    PdfNoText,

    /// The PDF could not be parsed at all.
    #[error("Could not read PDF: {0}")]
    Pdf(String),
}

/// Where page content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// An `http`, `https` or `file` URL.
    Url(String),
    /// A local HTML, PDF or plain-text file.
    File(PathBuf),
    /// Raw text piped on stdin.
    Stdin(String),
}

/// Extracted content ready for summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    /// Page or document title.
    pub title: String,
    /// Readable text.
    pub content: String,
    /// Whether the content came from a PDF.
    pub is_pdf: bool,
}

/// Builds the HTTP client used for page fetching.
///
/// # Errors
///
/// Returns the client builder error when TLS or proxy setup fails.
pub fn build_fetch_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("clarity/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
}

/// Loads readable text from `source`.
///
/// # Errors
///
/// Returns [`ExtractError`] for unsupported schemes, network or IO failures,
/// and PDFs without a text layer.
#[instrument(skip(client))]
pub async fn load_page(source: &PageSource, client: &Client) -> Result<LoadedPage, ExtractError> {
    match source {
        PageSource::Url(raw) => load_url(raw, client).await,
        PageSource::File(path) => load_file(path),
        PageSource::Stdin(text) => Ok(classify_text(text)),
    }
}

async fn load_url(raw: &str, client: &Client) -> Result<LoadedPage, ExtractError> {
    let url = Url::parse(raw).map_err(|_| ExtractError::UnsupportedSource {
        source_label: raw.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| ExtractError::UnsupportedSource {
                    source_label: raw.to_string(),
                })?;
            return load_file(&path);
        }
        _ => {
            return Err(ExtractError::UnsupportedSource {
                source_label: raw.to_string(),
            });
        }
    }

    debug!(url = %url, "fetching page");
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| ExtractError::Fetch {
            url: raw.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::HttpStatus {
            url: raw.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let bytes = response.bytes().await.map_err(|source| ExtractError::Fetch {
        url: raw.to_string(),
        source,
    })?;

    let is_pdf = content_type.starts_with("application/pdf")
        || looks_like_pdf_location(raw)
        || bytes.starts_with(b"%PDF-");
    if is_pdf {
        let content = extract_pdf_text(&bytes)?;
        return Ok(LoadedPage {
            title: title_from_location(url.path()),
            content,
            is_pdf: true,
        });
    }

    let html = String::from_utf8_lossy(&bytes);
    let page = LoadedPage {
        title: extract_title(&html),
        content: extract_page_text(&html),
        is_pdf: false,
    };
    info!(chars = page.content.len(), "extracted page text");
    Ok(page)
}

fn load_file(path: &Path) -> Result<LoadedPage, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.starts_with(b"%PDF-") || looks_like_pdf_location(&path.to_string_lossy()) {
        return Ok(LoadedPage {
            title: title_from_location(&path.to_string_lossy()),
            content: extract_pdf_text(&bytes)?,
            is_pdf: true,
        });
    }

    let text = String::from_utf8_lossy(&bytes);
    let mut page = classify_text(&text);
    if page.title == UNTITLED {
        page.title = title_from_location(&path.to_string_lossy());
    }
    Ok(page)
}

/// Treats text as HTML when it looks like markup, otherwise as plain text.
fn classify_text(text: &str) -> LoadedPage {
    if looks_like_html(text) {
        LoadedPage {
            title: extract_title(text),
            content: extract_page_text(text),
            is_pdf: false,
        }
    } else {
        LoadedPage {
            title: UNTITLED.to_string(),
            content: text.trim().to_string(),
            is_pdf: false,
        }
    }
}

fn looks_like_html(text: &str) -> bool {
    let head: String = text.trim_start().chars().take(512).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.contains("<html") || head.contains("<body")
}

fn looks_like_pdf_location(location: &str) -> bool {
    let lowered = location.to_ascii_lowercase();
    lowered.contains(".pdf") || lowered.contains("pdfjs")
}

fn title_from_location(location: &str) -> String {
    location
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .map_or_else(|| UNTITLED.to_string(), ToString::to_string)
}

/// Returns the trimmed `<title>` text, or [`UNTITLED`].
#[must_use]
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("title") else {
        return UNTITLED.to_string();
    };
    document
        .select(&selector)
        .next()
        .map(|title| normalize_ws(&title.text().collect::<String>()))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Extracts the readable text of an HTML page.
///
/// Order of preference: the first main-content container with more than 300
/// characters, then every paragraph longer than 50 characters, then the body.
#[must_use]
#[instrument(skip_all, fields(html_len = html.len()))]
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let unwanted: Vec<Selector> = UNWANTED_SELECTORS
        .iter()
        .filter_map(|sel| Selector::parse(sel).ok())
        .collect();

    for raw in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        if let Some(container) = document.select(&selector).next() {
            let text = visible_text(container, &unwanted);
            if text.chars().count() > MIN_CONTAINER_CHARS {
                debug!(selector = raw, "using main-content container");
                return text.trim().to_string();
            }
        }
    }

    if let Ok(paragraph) = Selector::parse("p") {
        let paragraphs: Vec<String> = document
            .select(&paragraph)
            .map(|p| visible_text(p, &unwanted).trim().to_string())
            .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
            .collect();
        if !paragraphs.is_empty() {
            debug!(count = paragraphs.len(), "using paragraph fallback");
            return paragraphs.join("\n\n");
        }
    }

    warn!("no content container or paragraphs found; using body text");
    Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .map(|body| visible_text(body, &unwanted).trim().to_string())
        .unwrap_or_default()
}

/// Collects text under `root`, skipping descendants that match `unwanted`.
fn visible_text(root: ElementRef<'_>, unwanted: &[Selector]) -> String {
    let mut out = String::new();
    collect_text(root, unwanted, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, unwanted: &[Selector], out: &mut String) {
    if unwanted.iter().any(|selector| selector.matches(&element)) {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let block = is_block(child_element.value().name());
            if block && !out.ends_with('\n') && !out.is_empty() {
                out.push('\n');
            }
            collect_text(child_element, unwanted, out);
            if block && !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "section"
            | "article"
            | "li"
            | "ul"
            | "ol"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "br"
            | "tr"
            | "blockquote"
            | "pre"
    )
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the text layer of an in-memory PDF.
///
/// # Errors
///
/// Returns [`ExtractError::Pdf`] when the document cannot be parsed and
/// [`ExtractError::PdfNoText`] when it has no meaningful text.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    let trimmed = text.trim();
    if trimmed.chars().count() <= MIN_PDF_CHARS {
        warn!(chars = trimmed.len(), "PDF text layer is empty or too short");
        return Err(ExtractError::PdfNoText);
    }
    debug!(chars = trimmed.len(), "extracted PDF text layer");
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn long_sentence(topic: &str) -> String {
        format!(
            "The {topic} section explains in plain words how the whole process works from start to finish."
        )
    }

    #[test]
    fn test_extract_title_present() {
        let html = "<html><head><title>  Cell  Biology </title></head><body></body></html>";
        assert_eq!(extract_title(html), "Cell Biology");
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title("<html><body>hi</body></html>"), UNTITLED);
    }

    #[test]
    fn test_extract_prefers_article_container() {
        let body = (0..5).map(|_| long_sentence("article")).collect::<Vec<_>>().join(" ");
        let html = format!(
            "<html><body><nav>Home About Contact</nav><article><p>{body}</p></article>\
             <p>{}</p></body></html>",
            long_sentence("outside")
        );
        let text = extract_page_text(&html);
        assert!(text.contains("The article section"));
        assert!(!text.contains("outside"));
        assert!(!text.contains("Home About"));
    }

    #[test]
    fn test_extract_skips_unwanted_inside_container() {
        let body = (0..5).map(|_| long_sentence("main")).collect::<Vec<_>>().join(" ");
        let html = format!(
            "<html><body><main><aside>Sponsored links</aside><script>var x = 1;</script>\
             <p>{body}</p><div class=\"ads\">Buy now</div></main></body></html>"
        );
        let text = extract_page_text(&html);
        assert!(text.contains("The main section"));
        assert!(!text.contains("Sponsored"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("Buy now"));
    }

    #[test]
    fn test_extract_short_container_falls_back_to_paragraphs() {
        let html = format!(
            "<html><body><article>Tiny</article><p>{}</p><p>short</p><p>{}</p></body></html>",
            long_sentence("first"),
            long_sentence("second")
        );
        let text = extract_page_text(&html);
        assert_eq!(
            text,
            format!("{}\n\n{}", long_sentence("first"), long_sentence("second"))
        );
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        let html = "<html><body><div>Only a short div here</div></body></html>";
        assert_eq!(extract_page_text(html), "Only a short div here");
    }

    #[test]
    fn test_pdf_location_detection() {
        assert!(looks_like_pdf_location("https://example.com/paper.PDF"));
        assert!(looks_like_pdf_location("chrome-extension://x/pdfjs/viewer.html"));
        assert!(!looks_like_pdf_location("https://example.com/page.html"));
    }

    #[test]
    fn test_title_from_location_uses_last_segment() {
        assert_eq!(title_from_location("/papers/notes.pdf"), "notes.pdf");
        assert_eq!(title_from_location("/"), UNTITLED);
    }

    #[test]
    fn test_extract_pdf_text_rejects_garbage() {
        let result = extract_pdf_text(b"not a pdf at all");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_page_stdin_plain_text_passthrough() {
        let client = build_fetch_client().unwrap();
        let page = load_page(&PageSource::Stdin("  plain text  ".to_string()), &client)
            .await
            .unwrap();
        assert_eq!(page.content, "plain text");
        assert_eq!(page.title, UNTITLED);
        assert!(!page.is_pdf);
    }

    #[tokio::test]
    async fn test_load_page_html_file_uses_title() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "<!DOCTYPE html><html><head><title>Leaves</title></head><body><p>{}</p></body></html>",
            long_sentence("leaf")
        )
        .unwrap();
        let client = build_fetch_client().unwrap();
        let page = load_page(&PageSource::File(file.path().to_path_buf()), &client)
            .await
            .unwrap();
        assert_eq!(page.title, "Leaves");
        assert!(page.content.contains("The leaf section"));
    }

    #[tokio::test]
    async fn test_load_page_rejects_unsupported_scheme() {
        let client = build_fetch_client().unwrap();
        let result = load_page(&PageSource::Url("chrome://settings".to_string()), &client).await;
        assert!(matches!(result, Err(ExtractError::UnsupportedSource { .. })));
    }

    #[tokio::test]
    async fn test_load_page_missing_file_is_io_error() {
        let client = build_fetch_client().unwrap();
        let result = load_page(
            &PageSource::File(PathBuf::from("/nonexistent/page.html")),
            &client,
        )
        .await;
        assert!(matches!(result, Err(ExtractError::Io { .. })));
    }
}
