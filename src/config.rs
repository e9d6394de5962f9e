pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }
}

#[derive(Debug)]
pub struct ClientConfig {
    pub server_url: String,
    pub input: String,
    pub text_only: bool,
}

impl ClientConfig {
    pub fn new(server_url: String, input: String, text_only: bool) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            input,
            text_only,
        }
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.server_url)
    }

    pub fn transcript_url(&self) -> String {
        format!("{}/api/transcript", self.server_url)
    }
}
