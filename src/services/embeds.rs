//! Rewrites bare media URLs in rich-text HTML into inline embed markup.
//!
//! Only URLs sitting in text content are touched. Anything already inside a
//! tag (so `href`/`src` attributes) or inside an `<a>` element is left alone,
//! which also makes the transform a no-op on its own output. The result is
//! NOT sanitized; callers must pipe it through a sanitizer before rendering.

use regex::Regex;
use url::Url;

use std::sync::OnceLock;

static URL_RE: OnceLock<Regex> = OnceLock::new();

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg"];

/// Matches http(s) URLs, and scheme-less tokens that end in a recognized
/// media extension (`photo.png`). Plain words never match.
fn url_pattern() -> &'static Regex {
    URL_RE.get_or_init(|| {
        Regex::new(
            r#"(?i)https?://[^\s"<>]+|[A-Za-z0-9][A-Za-z0-9_.~/-]*\.(?:jpe?g|png|gif|webp|svg|mp4|webm|ogg)\b"#,
        )
        .expect("invalid embed URL pattern")
    })
}

pub fn rewrite_embeds(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 4);
    let mut rest = html;
    let mut anchor_depth: usize = 0;

    while let Some(lt) = rest.find('<') {
        let (text, tail) = rest.split_at(lt);
        push_text(&mut out, text, anchor_depth);

        let Some(gt) = find_tag_end(tail) else {
            // Unterminated tag; nothing after it is safe to rewrite.
            out.push_str(tail);
            return out;
        };
        let tag = &tail[..=gt];
        match anchor_delta(tag) {
            AnchorDelta::Open => anchor_depth += 1,
            AnchorDelta::Close => anchor_depth = anchor_depth.saturating_sub(1),
            AnchorDelta::Unrelated => {}
        }
        out.push_str(tag);
        rest = &tail[gt + 1..];
    }

    push_text(&mut out, rest, anchor_depth);
    out
}

fn push_text(out: &mut String, text: &str, anchor_depth: usize) {
    if anchor_depth == 0 {
        rewrite_text_run(out, text);
    } else {
        out.push_str(text);
    }
}

fn rewrite_text_run(out: &mut String, text: &str) {
    let mut last = 0;
    for found in url_pattern().find_iter(text) {
        let (url, end) = trim_trailing_punctuation(found.as_str(), found.end());
        if url.is_empty() {
            continue;
        }
        out.push_str(&text[last..found.start()]);
        out.push_str(&render_embed(url));
        last = end;
    }
    out.push_str(&text[last..]);
}

/// Punctuation butting up against a URL belongs to the sentence, not the URL.
fn trim_trailing_punctuation(url: &str, end: usize) -> (&str, usize) {
    let trimmed = url.trim_end_matches(['.', ',', ':', ';', '!', '?', '\'', '"', ')', ']']);
    (trimmed, end - (url.len() - trimmed.len()))
}

enum Embed {
    YouTube(String),
    Image,
    Video(&'static str),
    Link,
}

fn render_embed(url: &str) -> String {
    match classify(url) {
        Embed::YouTube(id) => format!(
            r#"<iframe src="https://www.youtube.com/embed/{}" frameborder="0" allowfullscreen></iframe>"#,
            escape_html(&id)
        ),
        Embed::Image => format!(r#"<img src="{}" alt=""/>"#, escape_html(url)),
        Embed::Video(mime) => format!(
            r#"<video controls><source src="{}" type="{}"></video>"#,
            escape_html(url),
            mime
        ),
        Embed::Link => format!(
            r#"<a href="{0}" target="_blank" rel="noopener noreferrer">{0}</a>"#,
            escape_html(url)
        ),
    }
}

fn classify(url: &str) -> Embed {
    if let Some(parsed) = Url::parse(url).ok().filter(|u| u.host_str().is_some()) {
        if is_youtube_host(&parsed) {
            // A YouTube link without an extractable id degrades to a plain
            // external link, never to a media guess.
            return match youtube_video_id(&parsed) {
                Some(id) => Embed::YouTube(id),
                None => Embed::Link,
            };
        }
        return classify_by_extension(parsed.path());
    }
    classify_by_extension(url)
}

fn classify_by_extension(path: &str) -> Embed {
    let Some(extension) = path.rsplit('.').next().map(str::to_ascii_lowercase) else {
        return Embed::Link;
    };

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Embed::Image;
    }
    match extension.as_str() {
        "mp4" => Embed::Video("video/mp4"),
        "webm" => Embed::Video("video/webm"),
        "ogg" => Embed::Video("video/ogg"),
        _ => Embed::Link,
    }
}

fn is_youtube_host(url: &Url) -> bool {
    matches!(
        url.host_str().map(|h| h.trim_start_matches("www.")),
        Some("youtube.com") | Some("m.youtube.com") | Some("youtu.be")
    )
}

fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.");

    let id = if host == "youtu.be" {
        url.path_segments()?.next().map(str::to_string)?
    } else if url.path() == "/watch" {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    } else if let Some(segment) = url.path().strip_prefix("/shorts/") {
        segment.split('/').next().map(str::to_string)?
    } else {
        return None;
    };

    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

/// Index of the `>` closing the tag that starts at the beginning of `tail`,
/// skipping over quoted attribute values.
fn find_tag_end(tail: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in tail.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

enum AnchorDelta {
    Open,
    Close,
    Unrelated,
}

fn anchor_delta(tag: &str) -> AnchorDelta {
    let inner = tag.strip_prefix('<').unwrap_or(tag);
    if let Some(rest) = inner.strip_prefix('/') {
        return if tag_name_is(rest, "a") {
            AnchorDelta::Close
        } else {
            AnchorDelta::Unrelated
        };
    }
    if tag_name_is(inner, "a") && !inner.trim_end_matches('>').trim_end().ends_with('/') {
        AnchorDelta::Open
    } else {
        AnchorDelta::Unrelated
    }
}

fn tag_name_is(inner: &str, name: &str) -> bool {
    let tag_name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    tag_name.eq_ignore_ascii_case(name)
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
