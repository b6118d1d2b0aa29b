use reqwest::Url;

use crate::shared::constants::YOUTUBE_WATCH_URL;

/// Extract the video id from the common YouTube URL shapes.
///
/// Handles `youtu.be/<id>`, `youtube.com/watch?v=<id>` and
/// `youtube.com/embed/<id>`. Anything else is returned unchanged, since it
/// may already be an id.
pub fn extract_video_id(input: &str) -> String {
    if input.contains("youtu.be") {
        let last = input.rsplit('/').next().unwrap_or(input);
        return last.split('?').next().unwrap_or(last).to_string();
    }

    if let Ok(url) = Url::parse(input) {
        let is_youtube = url
            .host_str()
            .map(|host| host.contains("youtube.com"))
            .unwrap_or(false);
        if is_youtube {
            if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v") {
                return id.into_owned();
            }
            if let Some(rest) = url.path().strip_prefix("/embed/") {
                return rest.split('/').next().unwrap_or(rest).to_string();
            }
        }
    }

    input.to_string()
}

/// Expand a bare video id into a watch URL; URLs pass through.
pub fn normalize_source(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("{YOUTUBE_WATCH_URL}{trimmed}")
    }
}
