use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SERVER_URL};

#[derive(Parser)]
#[command(
    name = "yt-summarizer-backend",
    about = "YouTube Summarizer Backend - transcript relay",
    long_about = "Fetches YouTube video transcripts and serves them as JSON over HTTP, for clients that summarize them.",
    after_help = "EXAMPLES:\n    # Start the transcript server on 127.0.0.1:5000\n    yt-summarizer-backend serve\n\n    # Fetch a transcript through a running server\n    yt-summarizer-backend transcript https://youtu.be/dQw4w9WgXcQ\n\n    # Print only the transcript text\n    yt-summarizer-backend transcript dQw4w9WgXcQ --text\n\n    # Use a different server\n    yt-summarizer-backend transcript dQw4w9WgXcQ --server-url http://my-server:5000"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(name = "serve")]
    Serve {
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    #[command(name = "transcript")]
    Transcript {
        /// YouTube URL or video id
        input: String,

        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,

        /// Print only the transcript text
        #[arg(long)]
        text: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_uses_loopback_defaults() {
        let cli = Cli::parse_from(["yt-summarizer-backend", "serve"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 5000);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn transcript_takes_input_and_flags() {
        let cli = Cli::parse_from([
            "yt-summarizer-backend",
            "transcript",
            "dQw4w9WgXcQ",
            "--server-url",
            "http://remote:8000",
            "--text",
        ]);
        match cli.command {
            Commands::Transcript {
                input,
                server_url,
                text,
            } => {
                assert_eq!(input, "dQw4w9WgXcQ");
                assert_eq!(server_url, "http://remote:8000");
                assert!(text);
            }
            _ => panic!("expected transcript"),
        }
    }
}
