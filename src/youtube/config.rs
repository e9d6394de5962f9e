pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Caption languages to ask for, most preferred first.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "zh-CN", "zh-Hans", "zh-TW", "ja", "ko"];

#[derive(Clone, Debug)]
pub struct YoutubeConfig {
    pub base_url: String,
    pub languages: Vec<String>,
    pub innertube_client_name: String,
    pub innertube_client_version: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            languages: DEFAULT_LANGUAGES.iter().map(|lang| lang.to_string()).collect(),
            innertube_client_name: "ANDROID".to_string(),
            innertube_client_version: "20.10.38".to_string(),
        }
    }
}

impl YoutubeConfig {
    pub fn watch_url(&self, video_id: &str) -> String {
        format!("{}/watch?v={video_id}", self.base_url)
    }

    pub fn player_url(&self, api_key: &str) -> String {
        format!("{}/youtubei/v1/player?key={api_key}", self.base_url)
    }
}
