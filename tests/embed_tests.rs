#[cfg(test)]
pub mod embed_tests {
    use newsdesk::services::embeds::{escape_html, rewrite_embeds};

    #[test]
    fn test_plain_text_unchanged() {
        let input = "The council session wrapped up late.";
        assert_eq!(rewrite_embeds(input), input);
    }

    #[test]
    fn test_non_media_filenames_unchanged() {
        let input = "Attach report.docx and notes.txt before Friday.";
        assert_eq!(rewrite_embeds(input), input);
    }

    #[test]
    fn test_youtube_watch_url_becomes_iframe() {
        let input = "Check https://www.youtube.com/watch?v=abc123DEF end";
        let expected = concat!(
            "Check ",
            r#"<iframe src="https://www.youtube.com/embed/abc123DEF" frameborder="0" allowfullscreen></iframe>"#,
            " end"
        );
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_youtu_be_url_becomes_iframe() {
        let input = "https://youtu.be/dQw4w9WgXcQ";
        let expected = r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ" frameborder="0" allowfullscreen></iframe>"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_youtube_shorts_url_becomes_iframe() {
        let input = "https://www.youtube.com/shorts/xyz_-42";
        let expected = r#"<iframe src="https://www.youtube.com/embed/xyz_-42" frameborder="0" allowfullscreen></iframe>"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_youtube_url_without_id_becomes_link() {
        let input = "https://www.youtube.com/feed/subscriptions";
        let expected = r#"<a href="https://www.youtube.com/feed/subscriptions" target="_blank" rel="noopener noreferrer">https://www.youtube.com/feed/subscriptions</a>"#;
        assert_eq!(
            rewrite_embeds(input),
            expected,
            "A YouTube URL with no video id must degrade to a plain link"
        );
    }

    #[test]
    fn test_image_url_becomes_img() {
        let input = "https://cdn.example.com/photo.png";
        let expected = r#"<img src="https://cdn.example.com/photo.png" alt=""/>"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_bare_media_token_becomes_img() {
        let input = "See photo.png here";
        let expected = r#"See <img src="photo.png" alt=""/> here"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_uppercase_extension_still_matches() {
        let input = "PHOTO.PNG";
        let expected = r#"<img src="PHOTO.PNG" alt=""/>"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_video_url_becomes_video_tag() {
        let input = "https://cdn.example.com/clip.mp4";
        let expected = r#"<video controls><source src="https://cdn.example.com/clip.mp4" type="video/mp4"></video>"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_generic_url_becomes_anchor() {
        let input = "https://example.com/report";
        let expected = r#"<a href="https://example.com/report" target="_blank" rel="noopener noreferrer">https://example.com/report</a>"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_trailing_punctuation_stays_in_text() {
        let input = "Watch https://youtu.be/abc123.";
        let expected = concat!(
            "Watch ",
            r#"<iframe src="https://www.youtube.com/embed/abc123" frameborder="0" allowfullscreen></iframe>"#,
            "."
        );
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_parenthesized_url_keeps_closing_punctuation() {
        let input = "(see https://cdn.example.com/photo.jpg).";
        let expected = concat!(
            "(see ",
            r#"<img src="https://cdn.example.com/photo.jpg" alt=""/>"#,
            ")."
        );
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_attribute_urls_untouched() {
        let input = r#"<img src="https://cdn.example.com/photo.png">"#;
        assert_eq!(rewrite_embeds(input), input);
    }

    #[test]
    fn test_anchor_content_untouched() {
        let input = r#"<a href="https://example.com">https://example.com/photo.png</a>"#;
        assert_eq!(
            rewrite_embeds(input),
            input,
            "URLs already inside an anchor must stay as written"
        );
    }

    #[test]
    fn test_text_between_tags_is_rewritten() {
        let input = "<p>photo.jpg</p>";
        let expected = r#"<p><img src="photo.jpg" alt=""/></p>"#;
        assert_eq!(rewrite_embeds(input), expected);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let input = "Intro https://cdn.example.com/clip.webm and https://youtu.be/abc123 done";
        let once = rewrite_embeds(input);
        assert_eq!(
            rewrite_embeds(&once),
            once,
            "Re-running the rewrite must not double-wrap embeds"
        );
    }

    #[test]
    fn test_unterminated_tag_passes_through() {
        let input = r#"before <img src="x.png" and then https://example.com/a.png"#;
        assert_eq!(
            rewrite_embeds(input),
            input,
            "Nothing after an unterminated tag is safe to rewrite"
        );
    }

    #[test]
    fn test_escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }
}
