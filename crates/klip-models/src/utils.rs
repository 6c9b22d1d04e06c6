//! Free-text URL extraction.
//!
//! Analysis documents often embed the source video URL somewhere in the
//! prose. Extraction is best-effort: the first recognizable YouTube URL wins.

/// Extract the first YouTube-style video URL from free text.
///
/// Recognizes `watch?v=` and `youtu.be` short-link forms. Returns `None`
/// when no URL is present.
pub fn extract_video_url(text: &str) -> Option<String> {
    for token in text.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '/' && c != ':');
        if let Some(url) = match_watch_url(token).or_else(|| match_short_url(token)) {
            return Some(url);
        }
    }
    None
}

/// Match a youtube.com/watch?v=VIDEO_ID form.
fn match_watch_url(token: &str) -> Option<String> {
    if !token.contains("youtube.com/watch") || !token.contains("v=") {
        return None;
    }
    let v_pos = token.find("v=")?;
    let id = id_prefix(&token[v_pos + 2..]);
    if id.is_empty() {
        return None;
    }
    Some(format!("https://www.youtube.com/watch?v={}", id))
}

/// Match a youtu.be/VIDEO_ID short form.
fn match_short_url(token: &str) -> Option<String> {
    let be_pos = token.find("youtu.be/")?;
    let id = id_prefix(&token[be_pos + 9..]);
    if id.is_empty() {
        return None;
    }
    Some(format!("https://youtu.be/{}", id))
}

/// Take the leading run of valid video-id characters.
fn id_prefix(s: &str) -> &str {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len());
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_watch_url() {
        let text = "Analisis untuk https://www.youtube.com/watch?v=dQw4w9WgXcQ berikut ini";
        assert_eq!(
            extract_video_url(text),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_short_url() {
        let text = "Source: https://youtu.be/dQw4w9WgXcQ?t=30";
        assert_eq!(
            extract_video_url(text),
            Some("https://youtu.be/dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_with_query_params() {
        let text = "https://youtube.com/watch?v=dQw4w9WgXcQ&list=PLx";
        assert_eq!(
            extract_video_url(text),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_absent() {
        assert_eq!(extract_video_url("no links here"), None);
        assert_eq!(extract_video_url("https://vimeo.com/123"), None);
    }
}
