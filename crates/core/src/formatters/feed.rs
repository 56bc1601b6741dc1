//! RSS 2.0 feed rendering and re-parsing.
//!
//! The feed is the system's primary output and also its only memory:
//! differential runs read the previously written feed back and take the
//! maximum `pubDate` as the new `since` bound. Emission and re-parse must
//! therefore round-trip exactly, which pins both to the same RFC-2822
//! timestamp format.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;

use crate::item::AnnouncementItem;
use crate::{Error, Result};

/// Timestamp format used for `pubDate`/`lastBuildDate`, e.g.
/// `Wed, 09 Apr 2025 00:00:00 +0000`. Must stay parseable by
/// `DateTime::parse_from_rfc2822` for [`latest_seen`] to round-trip.
pub const RFC2822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

const DEFAULT_TITLE: &str = "お知らせフィード";
const DEFAULT_DESCRIPTION: &str = "お知らせ情報のフィード";

/// Renders items as an RSS 2.0 document.
///
/// Entries keep the order they are given — callers that want a sorted feed
/// sort beforehand. `title` and `description` default to generic Japanese
/// channel metadata when the page provided none.
pub fn render_feed(
    items: &[AnnouncementItem], source_url: &str, title: Option<&str>, description: Option<&str>,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    write(&mut writer, Event::Start(rss))?;
    write(&mut writer, Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", title.unwrap_or(DEFAULT_TITLE))?;
    text_element(&mut writer, "link", source_url)?;
    text_element(&mut writer, "description", description.unwrap_or(DEFAULT_DESCRIPTION))?;
    text_element(&mut writer, "language", "ja")?;
    text_element(&mut writer, "lastBuildDate", &Utc::now().format(RFC2822_FORMAT).to_string())?;

    for item in items {
        write(&mut writer, Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &item.title)?;
        text_element(&mut writer, "link", &item.link)?;
        text_element(&mut writer, "description", &item.description)?;
        text_element(&mut writer, "pubDate", &item.published_at.format(RFC2822_FORMAT).to_string())?;
        for category in &item.categories {
            text_element(&mut writer, "category", category)?;
        }

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        write(&mut writer, Event::Start(guid))?;
        write(&mut writer, Event::Text(BytesText::new(&item.guid)))?;
        write(&mut writer, Event::End(BytesEnd::new("guid")))?;

        write(&mut writer, Event::End(BytesEnd::new("item")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write(&mut writer, Event::End(BytesEnd::new("rss")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::FeedParse(e.to_string()))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| Error::FeedParse(e.to_string()))
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

/// Maximum publish timestamp across a feed document's entries.
///
/// Entries whose `pubDate` does not parse as RFC-2822 are skipped rather
/// than failing the whole scan; a feed with no parseable dates yields
/// `None`.
pub fn latest_seen(xml: &str) -> Result<Option<DateTime<FixedOffset>>> {
    let rss: Rss = quick_xml::de::from_str(xml).map_err(|e| Error::FeedParse(e.to_string()))?;

    Ok(rss
        .channel
        .items
        .iter()
        .filter_map(|item| item.pub_date.as_deref())
        .filter_map(|text| DateTime::parse_from_rfc2822(text).ok())
        .max())
}

/// [`latest_seen`] over a feed file; a missing file yields `None`.
pub fn latest_seen_in_file(path: &Path) -> Result<Option<DateTime<FixedOffset>>> {
    if !path.exists() {
        return Ok(None);
    }
    let xml = fs::read_to_string(path)?;
    latest_seen(&xml)
}
