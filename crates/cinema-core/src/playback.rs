//! Decide whether a source URL can be played inline or needs an outbound link.

/// Container/stream format of a directly playable URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaHint {
    Mp4,
    WebM,
    /// HTTP Live Streaming playlist (`.m3u8`).
    HlsPlaylist,
    /// MPEG-DASH manifest (`.mpd`).
    Dash,
}

impl MediaHint {
    pub fn mime_type(self) -> &'static str {
        match self {
            MediaHint::Mp4 => "video/mp4",
            MediaHint::WebM => "video/webm",
            MediaHint::HlsPlaylist => "application/x-mpegURL",
            MediaHint::Dash => "application/dash+xml",
        }
    }

    /// True for manifest formats that reference segmented media.
    pub fn is_stream(self) -> bool {
        matches!(self, MediaHint::HlsPlaylist | MediaHint::Dash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playability {
    DirectMedia(MediaHint),
    ExternalLink,
}

const EXTENSIONS: &[(&str, MediaHint)] = &[
    (".mp4", MediaHint::Mp4),
    (".webm", MediaHint::WebM),
    (".m3u8", MediaHint::HlsPlaylist),
    (".mpd", MediaHint::Dash),
];

/// Classify a source URL. Case-insensitive; the query string and fragment
/// are ignored. Empty or absent URLs are always [`Playability::ExternalLink`].
pub fn classify_playability(url: Option<&str>) -> Playability {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Playability::ExternalLink;
    };

    let path = url.split(['?', '#']).next().unwrap_or("").to_ascii_lowercase();

    EXTENSIONS
        .iter()
        .find(|(ext, _)| path.ends_with(*ext))
        .map(|(_, hint)| Playability::DirectMedia(*hint))
        .unwrap_or(Playability::ExternalLink)
}
