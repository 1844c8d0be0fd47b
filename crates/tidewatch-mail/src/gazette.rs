//! Gazette newsletter recognition and link extraction
//!
//! The mailbox receives all kinds of traffic; only the Statstidende
//! newsletter messages matter. A message qualifies when its subject matches
//! the newsletter patterns and at least one body part carries a publication
//! PDF link.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use mail_parser::MessageParser;
use regex::Regex;
use tracing::debug;

use tidewatch_domain::{MailError, MailMessage};

/// Subject fragments (lowercase) that identify the gazette newsletter.
const SUBJECT_PATTERNS: &[&str] = &["dagens kundgørelse", "statstidende", "pdf"];

static PDF_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://statstidende\.dk/api/publication/\d+/pdf")
        .unwrap_or_else(|e| panic!("invalid pdf link pattern: {e}"))
});

/// True when `subject` matches one of the gazette newsletter patterns.
pub fn is_gazette_subject(subject: &str) -> bool {
    let lower = subject.to_lowercase();
    SUBJECT_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Publication PDF links found in `text`, de-duplicated, in order of first
/// occurrence.
pub fn extract_pdf_links(text: &str) -> Vec<String> {
    let mut links = Vec::new();
    for m in PDF_LINK.find_iter(text) {
        let url = m.as_str();
        if !links.iter().any(|l| l == url) {
            links.push(url.to_string());
        }
    }
    links
}

/// Parse a raw RFC822 message and decide whether it is a gazette newsletter.
///
/// Returns `Ok(None)` for messages that parse fine but are not newsletters
/// (wrong subject, or no publication links in any body part). Only an
/// unparseable payload is an error.
pub fn parse_gazette_message(raw: &[u8]) -> Result<Option<MailMessage>, MailError> {
    let message = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| MailError::Parse("malformed RFC822 message".to_string()))?;

    let subject = message.subject().unwrap_or_default().to_string();
    if !is_gazette_subject(&subject) {
        debug!(subject, "subject does not match gazette patterns, skipping");
        return Ok(None);
    }

    let mut pdf_urls = Vec::new();
    let mut i = 0;
    while let Some(body) = message.body_text(i) {
        for url in extract_pdf_links(&body) {
            if !pdf_urls.contains(&url) {
                pdf_urls.push(url);
            }
        }
        i += 1;
    }
    let mut i = 0;
    while let Some(body) = message.body_html(i) {
        for url in extract_pdf_links(&body) {
            if !pdf_urls.contains(&url) {
                pdf_urls.push(url);
            }
        }
        i += 1;
    }

    if pdf_urls.is_empty() {
        debug!(subject, "gazette subject but no publication links, skipping");
        return Ok(None);
    }

    let from = message
        .from()
        .and_then(|addrs| addrs.first())
        .map(|addr| match addr.name() {
            Some(name) => format!("{} <{}>", name, addr.address().unwrap_or_default()),
            None => addr.address().unwrap_or_default().to_string(),
        })
        .unwrap_or_default();

    let date = message
        .date()
        .and_then(|d| DateTime::parse_from_rfc3339(&d.to_rfc3339()).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let id = message.message_id().unwrap_or_default().to_string();

    debug!(subject, links = pdf_urls.len(), "accepted gazette message");
    Ok(Some(MailMessage {
        id,
        subject,
        from,
        date,
        pdf_urls,
    }))
}
