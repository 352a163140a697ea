//! Renders a [`SearchResponse`] as Google-style result markup.
//!
//! The downstream result filter expects the DOM of a classic Google results
//! page: `#main > #cnt > #rcnt > #center_col > #res > #search > #rso`, with
//! each hit in a `div.ZINbbc` block. The class names are part of that
//! contract and must not change.
//!
//! Image results are handed to an [`ImageLayout`] so the host application can
//! render them with its own template.

use serde::Serialize;

use crate::escape::escape_html;
use crate::types::{SearchResponse, SearchResult};

/// Title shown in the error block.
pub const ERROR_TITLE: &str = "SearXNG Error";

/// Label for the per-image link in the image layout.
pub const VIEW_IMAGE_LABEL: &str = "View Image";

/// Results per upstream page; drives pagination and the next-page offset.
const PAGE_SIZE: usize = 10;

/// Maximum number of suggestions shown under "Related searches".
const MAX_SUGGESTIONS: usize = 5;

/// One image tile handed to an [`ImageLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageItem {
    /// Host of the page the image was found on.
    pub domain: String,
    /// Full-size image URL.
    pub img_url: String,
    /// Page the image was found on.
    pub web_page: String,
    /// Thumbnail URL.
    pub img_tbn: String,
}

/// Everything an image template needs to render one page of image results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePage {
    /// Number of items.
    pub length: usize,
    pub results: Vec<ImageItem>,
    /// Label for the per-image link.
    pub view_label: String,
    /// Link to the next page, present only for full pages.
    pub next_link: Option<String>,
}

/// Renders image results. Implemented by the host's template layer.
pub trait ImageLayout {
    /// Render one page of image results to markup.
    fn render(&self, page: &ImagePage) -> String;
}

/// Minimal built-in image grid, used when the host supplies no template.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicImageLayout;

impl ImageLayout for BasicImageLayout {
    fn render(&self, page: &ImagePage) -> String {
        let mut html = String::new();
        html.push_str(r#"<html><body><div id="main" data-searxng="true"><div class="images">"#);
        for item in &page.results {
            html.push_str(&format!(
                r#"<div class="image-result">
                    <a href="{img}"><img src="{tbn}" alt="{domain}"></a>
                    <div class="image-domain">{domain}</div>
                    <a href="{page}">{label}</a>
                </div>"#,
                img = escape_html(&item.img_url),
                tbn = escape_html(&item.img_tbn),
                domain = escape_html(&item.domain),
                page = escape_html(&item.web_page),
                label = escape_html(&page.view_label),
            ));
        }
        html.push_str("</div>"); // images
        if let Some(next) = &page.next_link {
            html.push_str(&format!(
                r#"<div id="foot"><a href="{}">Next</a></div>"#,
                escape_html(next)
            ));
        }
        html.push_str("</div></body></html>");
        html
    }
}

/// Render `response` for `query`, using [`BasicImageLayout`] for images.
#[must_use]
pub fn render(response: &SearchResponse, query: &str) -> String {
    render_with(response, query, &BasicImageLayout)
}

/// Render `response` for `query`, delegating image results to `images`.
///
/// Dispatch order: error block, no-results block, image layout (if any
/// result is an image), text layout.
#[must_use]
pub fn render_with(response: &SearchResponse, query: &str, images: &dyn ImageLayout) -> String {
    if let Some(message) = response.error() {
        return error_html(ERROR_TITLE, message);
    }
    if !response.has_results() {
        return no_results_html(query);
    }
    if response.is_image_search() {
        tracing::trace!(count = response.result_count(), "rendering image layout");
        return images.render(&image_page(response, query));
    }
    text_results_html(response, query)
}

/// Build the template input for an image result page.
pub fn image_page(response: &SearchResponse, query: &str) -> ImagePage {
    let results: Vec<ImageItem> = response.results().iter().map(image_item).collect();
    let next_link = (results.len() >= PAGE_SIZE).then(|| {
        format!(
            "search?q={}&tbm=isch&start={PAGE_SIZE}",
            urlencoding::encode(query)
        )
    });
    ImagePage {
        length: results.len(),
        results,
        view_label: VIEW_IMAGE_LABEL.to_owned(),
        next_link,
    }
}

fn image_item(result: &SearchResult) -> ImageItem {
    let img_url = result
        .image_source
        .clone()
        .unwrap_or_else(|| result.url.clone());
    let img_tbn = result
        .thumbnail_source
        .clone()
        .or_else(|| result.thumbnail.clone())
        .unwrap_or_else(|| img_url.clone());
    ImageItem {
        domain: display_host(&result.url),
        img_url,
        web_page: result.url.clone(),
        img_tbn,
    }
}

fn text_results_html(response: &SearchResponse, query: &str) -> String {
    let mut results_html = String::new();
    for result in response.results() {
        results_html.push_str(&format!(
            r#"
        <div class="ZINbbc xpd O9g5cc uUPGi">
            <div class="kCrYT">
                <a href="{href}">
                    <h3 class="BNeawe vvjwJb AP7Wnd">{title}</h3>
                    <div class="BNeawe UPmit AP7Wnd luh4tb" style="color: var(--whoogle-result-url);">{host}</div>
                </a>
            </div>
            <div class="kCrYT">
                <div class="BNeawe s3v9rd AP7Wnd">
                    <span class="VwiC3b">{content}</span>
                </div>
            </div>
        </div>
        "#,
            href = escape_html(&result.url),
            title = escape_html(&result.title),
            host = escape_html(&display_host(&result.url)),
            content = escape_html(&result.content),
        ));
    }

    let wants_pagination = response.number_of_results() > PAGE_SIZE as u64
        || response.result_count() >= PAGE_SIZE;
    let pagination_html = if wants_pagination {
        pagination_html(query)
    } else {
        String::new()
    };

    format!(
        r#"
    <html>
    <body>
        <div id="main" data-searxng="true">
            <div id="cnt">
                <div id="rcnt">
                    <div id="center_col">
                        <div id="res">
                            <div id="search">
                                <div id="rso">
                                    {results_html}
                                </div>
                            </div>
                        </div>
                        {suggestions_html}
                        {pagination_html}
                    </div>
                </div>
            </div>
        </div>
    </body>
    </html>
    "#,
        suggestions_html = suggestions_html(response.suggestions()),
    )
}

fn suggestions_html(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let links: Vec<String> = suggestions
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|s| {
            format!(
                r#"<a href="search?q={}">{}</a>"#,
                urlencoding::encode(s),
                escape_html(s)
            )
        })
        .collect();
    format!(
        r#"<div style="padding: 10px 0;"><span style="color: #70757a;">Related searches: </span>{}</div>"#,
        links.join(" &middot; ")
    )
}

fn pagination_html(query: &str) -> String {
    format!(
        r#"
    <div id="foot" style="text-align: center; padding: 20px;">
        <a href="search?q={}&start={PAGE_SIZE}">Next</a>
    </div>
    "#,
        urlencoding::encode(query)
    )
}

fn error_html(title: &str, message: &str) -> String {
    format!(
        r#"
    <html>
    <body>
        <div id="main">
            <div style="padding: 20px; text-align: center;">
                <h2 style="color: #d93025;">{}</h2>
                <p>{}</p>
            </div>
        </div>
    </body>
    </html>
    "#,
        escape_html(title),
        escape_html(message)
    )
}

fn no_results_html(query: &str) -> String {
    format!(
        r#"
    <html>
    <body>
        <div id="main">
            <div style="padding: 20px;">
                <p>No results found for <b>{}</b></p>
            </div>
        </div>
    </body>
    </html>
    "#,
        escape_html(query)
    )
}

/// The `host[:port]` part of a URL as written, or empty if it has no host.
///
/// `Url` only decides whether there is a host. The text itself comes from the
/// raw link so IDN hosts and explicit default ports are shown unchanged.
/// Userinfo is dropped.
fn display_host(link: &str) -> String {
    if !url::Url::parse(link).is_ok_and(|parsed| parsed.has_host()) {
        return String::new();
    }
    let Some((_, rest)) = link.trim().split_once("://") else {
        return String::new();
    };
    let authority = &rest[..rest.find(['/', '?', '#']).unwrap_or(rest.len())];
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    host.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    fn text_result(title: &str, url: &str, content: &str) -> SearchResult {
        SearchResult::new(title, url, content)
    }

    fn image_result(n: usize) -> SearchResult {
        SearchResult {
            category: "images".into(),
            image_source: Some(format!("https://img.example.com/{n}.png")),
            ..SearchResult::new(format!("Image {n}"), format!("https://page.example.com/{n}"), "")
        }
    }

    /// Records the page it was asked to render.
    struct CapturingLayout(std::cell::RefCell<Option<ImagePage>>);

    impl ImageLayout for CapturingLayout {
        fn render(&self, page: &ImagePage) -> String {
            *self.0.borrow_mut() = Some(page.clone());
            "IMAGE-LAYOUT".to_owned()
        }
    }

    #[test]
    fn results_to_html() {
        let response = SearchResponse::new(
            "python",
            vec![text_result(
                "Python.org",
                "https://www.python.org/",
                "The official Python site.",
            )],
        )
        .with_number_of_results(100);
        let html = render(&response, "python");
        assert!(html.contains("Python.org"));
        assert!(html.contains("https://www.python.org/"));
        assert!(html.contains("The official Python site."));
        assert!(html.contains(r#"id="main""#));
        assert!(html.contains("data-searxng"));
        assert!(html.contains(r#"<div id="rso">"#));
        assert!(html.contains("www.python.org</div>"));
    }

    #[test]
    fn error_to_html() {
        let response = SearchResponse::with_error_message("test", "Connection failed");
        let html = render(&response, "test");
        assert!(html.contains("SearXNG Error"));
        assert!(html.contains("Connection failed"));
        assert!(!html.contains("data-searxng"));
    }

    #[test]
    fn error_message_is_escaped() {
        let response = SearchResponse::from_error(
            "q",
            &SearchError::UpstreamReported("<b>bad</b> & worse".into()),
        );
        let html = render(&response, "q");
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt; &amp; worse"));
        assert!(!html.contains("&amp;amp;"));
    }

    #[test]
    fn no_results_to_html() {
        let response = SearchResponse::new("xyzzzz", Vec::new());
        let html = render(&response, "xyzzzz");
        assert!(html.contains("No results found"));
        assert!(html.contains("xyzzzz"));
    }

    #[test]
    fn no_results_query_is_escaped() {
        let html = render(&SearchResponse::new("q", Vec::new()), "<script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn visible_text_escaped_exactly_once() {
        let response = SearchResponse::new(
            "q",
            vec![text_result(
                "Tom & Jerry <3",
                "https://example.com/?a=1&b=2",
                "\"quoted\" & 'single'",
            )],
        );
        let html = render(&response, "q");
        assert!(html.contains("Tom &amp; Jerry &lt;3"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=2""#));
        assert!(html.contains("&quot;quoted&quot; &amp; &#39;single&#39;"));
        assert!(!html.contains("&amp;amp;"));
        assert!(!html.contains("&amp;lt;"));
    }

    #[test]
    fn suggestions_in_html() {
        let response = SearchResponse::new(
            "test",
            vec![text_result("Result", "https://example.com", "Content")],
        )
            .with_suggestions(vec!["suggestion1".into(), "suggestion2".into()]);
        let html = render(&response, "test");
        assert!(html.contains("Related searches"));
        assert!(html.contains(r#"<a href="search?q=suggestion1">suggestion1</a> &middot; <a href="search?q=suggestion2">suggestion2</a>"#));
    }

    #[test]
    fn suggestions_capped_at_five_and_encoded() {
        let suggestions: Vec<String> = (1..=7).map(|i| format!("rust {i}")).collect();
        let response = SearchResponse::new("rust", vec![text_result("a", "https://a.com", "")])
            .with_suggestions(suggestions);
        let html = render(&response, "rust");
        assert!(html.contains("search?q=rust%205"));
        assert!(!html.contains("rust 6"));
        assert_eq!(html.matches(" &middot; ").count(), 4);
    }

    #[test]
    fn no_suggestions_block_without_suggestions() {
        let response = SearchResponse::new("q", vec![text_result("a", "https://a.com", "")]);
        assert!(!render(&response, "q").contains("Related searches"));
    }

    #[test]
    fn pagination_when_total_exceeds_page() {
        let response = SearchResponse::new("rust lang", vec![text_result("a", "https://a.com", "")])
            .with_number_of_results(11);
        let html = render(&response, "rust lang");
        assert!(html.contains(r#"<a href="search?q=rust%20lang&start=10">Next</a>"#));
    }

    #[test]
    fn pagination_when_page_is_full() {
        let results = (0..10)
            .map(|i| text_result("t", &format!("https://{i}.example.com"), ""))
            .collect();
        let html = render(&SearchResponse::new("q", results), "q");
        assert!(html.contains(r#"id="foot""#));
    }

    #[test]
    fn no_pagination_for_small_result_sets() {
        let response = SearchResponse::new("q", vec![text_result("a", "https://a.com", "")])
            .with_number_of_results(10);
        assert!(!render(&response, "q").contains(r#"id="foot""#));
    }

    #[test]
    fn image_source_selects_image_layout() {
        let mut result = text_result("Logo", "https://example.com/logo", "");
        result.image_source = Some("https://example.com/logo.png".into());
        let response =
            SearchResponse::new("logo", vec![text_result("a", "https://a.com", ""), result]);

        let layout = CapturingLayout(Default::default());
        let html = render_with(&response, "logo", &layout);
        assert_eq!(html, "IMAGE-LAYOUT");
        let page = layout.0.borrow().clone().expect("layout called");
        assert_eq!(page.length, 2);
        assert_eq!(page.view_label, "View Image");
    }

    #[test]
    fn image_category_selects_image_layout() {
        let result = SearchResult {
            category: "images".into(),
            ..text_result("a", "https://a.com", "")
        };
        let html = render(&SearchResponse::new("q", vec![result]), "q");
        assert!(html.contains(r#"class="image-result""#));
        assert!(!html.contains("ZINbbc"));
    }

    #[test]
    fn image_item_url_resolution() {
        let explicit = SearchResult {
            image_source: Some("https://img.example.com/full.png".into()),
            thumbnail_source: Some("https://img.example.com/tbn.png".into()),
            thumbnail: Some("https://img.example.com/other.png".into()),
            ..text_result("a", "https://www.example.com:8443/page", "")
        };
        let item = image_item(&explicit);
        assert_eq!(item.domain, "www.example.com:8443");
        assert_eq!(item.img_url, "https://img.example.com/full.png");
        assert_eq!(item.img_tbn, "https://img.example.com/tbn.png");
        assert_eq!(item.web_page, "https://www.example.com:8443/page");

        let secondary = SearchResult {
            thumbnail: Some("https://img.example.com/other.png".into()),
            category: "images".into(),
            ..text_result("a", "https://example.com/page", "")
        };
        let item = image_item(&secondary);
        assert_eq!(item.img_url, "https://example.com/page");
        assert_eq!(item.img_tbn, "https://img.example.com/other.png");

        let bare = SearchResult {
            category: "images".into(),
            ..text_result("a", "https://example.com/pic.jpg", "")
        };
        let item = image_item(&bare);
        assert_eq!(item.img_tbn, "https://example.com/pic.jpg");
    }

    #[test]
    fn image_next_link_only_for_full_pages() {
        let nine = SearchResponse::new("cats", (0..9).map(image_result).collect());
        assert!(image_page(&nine, "cats").next_link.is_none());

        let ten = SearchResponse::new("big cats", (0..10).map(image_result).collect());
        assert_eq!(
            image_page(&ten, "big cats").next_link.as_deref(),
            Some("search?q=big%20cats&tbm=isch&start=10")
        );
    }

    #[test]
    fn display_host_keeps_host_as_written() {
        assert_eq!(display_host("https://münchen.de/x"), "münchen.de");
        assert_eq!(display_host("https://example.com:443/a?b#c"), "example.com:443");
        assert_eq!(display_host("http://localhost:8080"), "localhost:8080");
        assert_eq!(display_host("https://example.com?q=1"), "example.com");
        assert_eq!(display_host("https://user:pw@example.com/"), "example.com");
    }

    #[test]
    fn idn_host_shown_in_text_results() {
        let response = SearchResponse::new(
            "q",
            vec![text_result("Stadt", "https://münchen.de/rathaus", "")],
        );
        let html = render(&response, "q");
        assert!(html.contains(">münchen.de</div>"));
        assert!(!html.contains("xn--"));
    }

    #[test]
    fn display_host_handles_bad_urls() {
        assert_eq!(display_host("https://docs.rs/serde"), "docs.rs");
        assert_eq!(display_host("not a url"), "");
        assert_eq!(display_host(""), "");
    }

    #[test]
    fn image_page_serializes_for_templates() {
        let page = image_page(&SearchResponse::new("q", vec![image_result(1)]), "q");
        let json = serde_json::to_value(&page).expect("serialize");
        assert_eq!(json["length"], 1);
        assert_eq!(json["results"][0]["img_url"], "https://img.example.com/1.png");
        assert_eq!(json["next_link"], serde_json::Value::Null);
    }
}
