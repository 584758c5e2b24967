//! Page drivers
//!
//! [`PageDriver`] is the seam to whatever renders pages. [`HttpPageDriver`]
//! fetches markup with reqwest and scans it for link candidates without
//! executing scripts.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

use linkprobe_core::LinkCandidate;

use super::{Result, Selector, ValidatorError};

static COMMENT_OR_RAW_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("Invalid raw-text regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:[^>\x22']|\x22[^\x22]*\x22|'[^']*')*)>")
        .expect("Invalid tag regex")
});

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|quot|apos|lt|gt|nbsp|amp);")
        .expect("Invalid entity regex")
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("Invalid attribute regex")
});

/// Loads pages and finds link candidates on the current one
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate to `url`. Fails when the page cannot be loaded.
    async fn visit(&mut self, url: &str) -> Result<()>;

    /// URL of the loaded page after redirects
    fn current_url(&self) -> Option<&str>;

    /// Every element matching `selector`, with the href of its closest
    /// enclosing anchor resolved against the current URL.
    fn find_link_candidates(&self, selector: &Selector) -> Result<Vec<LinkCandidate>>;
}

/// Markup-only driver backed by reqwest
#[derive(Debug)]
pub struct HttpPageDriver {
    client: reqwest::Client,
    current_url: Option<String>,
    body: String,
}

impl HttpPageDriver {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            current_url: None,
            body: String::new(),
        }
    }
}

#[async_trait]
impl PageDriver for HttpPageDriver {
    async fn visit(&mut self, url: &str) -> Result<()> {
        info!("Visiting {}", url);
        let page_error = |message: String| ValidatorError::PageLoad {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| page_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(page_error(format!("HTTP {}", status.as_u16())));
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| page_error(e.to_string()))?;

        debug!("Loaded {} ({} bytes)", final_url, body.len());
        self.current_url = Some(final_url);
        self.body = body;
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    fn find_link_candidates(&self, selector: &Selector) -> Result<Vec<LinkCandidate>> {
        let page_url = self.current_url().ok_or(ValidatorError::NoPageLoaded)?;
        Ok(scan_link_candidates(&self.body, page_url, selector))
    }
}

/// Scan `html` for elements matching `selector`.
///
/// An element inside an `<a>` (or an `<a>` itself) carries that anchor's
/// href resolved against the document base; an anchor without `href` yields
/// an empty href, and an element outside any anchor yields none. Anchors do
/// not nest: a new `<a>` start tag closes the open one.
pub fn scan_link_candidates(html: &str, page_url: &str, selector: &Selector) -> Vec<LinkCandidate> {
    let stripped = COMMENT_OR_RAW_TEXT.replace_all(html, "");
    let html: &str = &stripped;
    let base = document_base(html, page_url);

    // Resolved href of the open anchor, if any.
    let mut open_anchor: Option<String> = None;
    let mut candidates = Vec::new();

    for caps in TAG.captures_iter(html) {
        let closing = !caps[1].is_empty();
        let tag = caps[2].to_ascii_lowercase();
        let is_anchor = tag == "a";

        if closing {
            if is_anchor {
                open_anchor = None;
            }
            continue;
        }

        let attrs = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
        let self_closing = attrs.trim_end().ends_with('/');
        let class_attr = attribute(attrs, "class");
        let id_attr = attribute(attrs, "id");

        let own_href = if is_anchor {
            open_anchor = None;
            Some(match attribute(attrs, "href") {
                Some(raw) => resolve_href(base.as_ref(), &raw),
                None => String::new(),
            })
        } else {
            None
        };

        if selector.matches(&tag, class_attr.as_deref(), id_attr.as_deref()) {
            let end = caps.get(0).map(|m| m.end()).unwrap_or(html.len());
            let text = leading_text(&html[end..]);
            let href = own_href.clone().or_else(|| open_anchor.clone());
            candidates.push(LinkCandidate { href, text });
        }

        if let Some(href) = own_href {
            if !self_closing {
                open_anchor = Some(href);
            }
        }
    }

    candidates
}

/// The first `<base href>` resolved against `page_url`, else `page_url`.
fn document_base(html: &str, page_url: &str) -> Option<Url> {
    let page = Url::parse(page_url).ok();
    let declared = TAG
        .captures_iter(html)
        .filter(|c| c[1].is_empty() && c[2].eq_ignore_ascii_case("base"))
        .find_map(|c| attribute(c.get(3).map(|m| m.as_str()).unwrap_or_default(), "href"));

    match (declared, page) {
        (Some(href), Some(page)) => page.join(href.trim()).ok().or(Some(page)),
        (Some(href), None) => Url::parse(href.trim()).ok(),
        (None, page) => page,
    }
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|c| c[1].eq_ignore_ascii_case(name))
        .map(|c| {
            let value = c
                .get(2)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            decode_entities(value)
        })
}

/// Mirror the DOM `href` property: resolved when possible, verbatim
/// otherwise. An empty value points at the base itself.
fn resolve_href(base: Option<&Url>, raw: &str) -> String {
    let raw = raw.trim();
    match base {
        Some(base) if raw.is_empty() => base.to_string(),
        Some(base) => match base.join(raw) {
            Ok(url) => url.to_string(),
            Err(_) => raw.to_string(),
        },
        None => raw.to_string(),
    }
}

fn leading_text(rest: &str) -> String {
    let text = rest.split('<').next().unwrap_or_default();
    decode_entities(text.trim())
}

fn decode_entities(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "quot" => Some('"'),
                "apos" => Some('\''),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "nbsp" => Some(' '),
                "amp" => Some('&'),
                _ => {
                    let code = match entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
