use std::{path::Path, time::Duration};

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use clap::{Parser, Subcommand};
use colored::*;
use eduassist_client::{markdown, FunctionsClient, TutorSession, DEFAULT_TIMEOUT};
use eduassist_learning::{Grade, Language, Message, Role, Subject, UserSettings};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eduassist")]
#[command(about = "Ask the EduAssist tutor from the terminal")]
#[command(version)]
struct Cli {
    /// Base URL of the relay
    #[arg(long, env = "EDUASSIST_RELAY_URL", default_value = "http://127.0.0.1:7070")]
    relay_url: String,

    /// Access token, when the relay requires one
    #[arg(long, env = "EDUASSIST_ACCESS_TOKEN")]
    access_token: Option<String>,

    /// 1 to 12, or "college"
    #[arg(long, default_value = "5")]
    grade: Grade,

    /// math, science or computer
    #[arg(long, default_value = "math")]
    subject: Subject,

    /// Language answers are translated into
    #[arg(long, default_value = "telugu")]
    language: Language,

    /// Seconds to wait for each relay call
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_seconds: u64,

    /// Print answers without colours
    #[arg(long)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        question: Option<String>,
        /// Photo of the problem: a file path, http(s) URL or data URI
        #[arg(long)]
        image: Option<String>,
    },
    /// Translate text
    Translate {
        text: String,
        #[arg(long, default_value = "telugu")]
        to: Language,
    },
    /// Send an audio file for transcription
    Transcribe { file: String },
    /// Interactive tutoring session
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    debug!(relay_url = %cli.relay_url, "using relay");

    let mut client =
        FunctionsClient::with_timeout(&cli.relay_url, Duration::from_secs(cli.timeout_seconds))
            .context("failed to build relay client")?;
    if let Some(token) = &cli.access_token {
        client = client.with_api_key(token);
    }
    let settings = UserSettings::new(cli.grade, cli.subject, cli.language);

    match cli.command {
        Commands::Ask { question, image } => {
            let mut session = TutorSession::new(client, settings);
            let reply = match image {
                Some(image) => {
                    let image = load_image(&image).await?;
                    session.ask_about_photo(&image, question.as_deref()).await
                }
                None => {
                    let question = question.ok_or_else(|| anyhow!("a question is required"))?;
                    session.ask(&question).await
                }
            }
            .map_err(|error| anyhow!("{error}"))?;
            print_reply(reply, cli.plain);
        }
        Commands::Translate { text, to } => {
            let translation = client
                .translate_text(&text, to)
                .await
                .map_err(|error| anyhow!("{error}"))?;
            println!("{}", translation.translated_text);
        }
        Commands::Transcribe { file } => {
            let audio = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read audio file {file}"))?;
            let transcript = client
                .transcribe_audio(&audio)
                .await
                .map_err(|error| anyhow!("{error}"))?;
            println!("{transcript}");
        }
        Commands::Chat => run_chat(TutorSession::new(client, settings), cli.plain).await?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout is reserved for answers.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_chat(mut session: TutorSession, plain: bool) -> Result<()> {
    println!("{}", "EduAssist".bold().cyan());
    print_settings(session.settings());
    println!("Type a question, or '/help' for commands. '/quit' exits.");
    println!("---");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                break;
            }
            "/help" | "/h" => {
                println!("Available commands:");
                println!("  /grade <grade>               - Change grade");
                println!("  /subject <subject>           - Change subject");
                println!("  /language <telugu|english>   - Change answer language");
                println!("  /photo <path|url> [question] - Ask about a photo");
                println!("  /history                     - Show this session");
                println!("  /clear                       - Start a new conversation");
                println!("  /settings                    - Show current settings");
                println!("  /quit, /exit, /q             - Leave");
                println!("Grades: {}", grade_choices());
                println!("Subjects: {}", subject_choices());
            }
            "/grade" => match argument.parse::<Grade>() {
                Ok(grade) => {
                    session.set_grade(grade);
                    print_settings(session.settings());
                }
                Err(error) => println!("{}", error.to_string().red()),
            },
            "/subject" => match argument.parse::<Subject>() {
                Ok(subject) => {
                    session.set_subject(subject);
                    print_settings(session.settings());
                }
                Err(error) => println!("{}", error.to_string().red()),
            },
            "/language" => match argument.parse::<Language>() {
                Ok(language) => {
                    session.set_language(language);
                    print_settings(session.settings());
                }
                Err(error) => println!("{}", error.to_string().red()),
            },
            "/settings" => print_settings(session.settings()),
            "/history" => {
                let messages = session.conversation().messages();
                if messages.is_empty() {
                    println!("No messages yet");
                }
                for message in messages {
                    let who = match message.role {
                        Role::User => message.role.as_str().green(),
                        Role::Assistant => message.role.as_str().cyan(),
                    };
                    println!("[{who}] {}", message.content);
                }
            }
            "/clear" => {
                session.reset();
                println!("Conversation cleared");
            }
            "/photo" => {
                let (image, question) = match argument.split_once(char::is_whitespace) {
                    Some((image, question)) => (image, Some(question.trim())),
                    None => (argument, None),
                };
                if image.is_empty() {
                    println!("{}", "usage: /photo <path|url> [question]".yellow());
                    continue;
                }
                let image = match load_image(image).await {
                    Ok(image) => image,
                    Err(error) => {
                        println!("{}", format!("{error:#}").red());
                        continue;
                    }
                };
                println!("{}", "Thinking...".dimmed());
                match session.ask_about_photo(&image, question).await {
                    Ok(reply) => print_reply(reply, plain),
                    Err(error) => println!("{}", error.to_string().red()),
                }
            }
            _ if command.starts_with('/') => {
                println!("Unknown command '{command}'. Type '/help'.");
            }
            _ => {
                println!("{}", "Thinking...".dimmed());
                match session.ask(input).await {
                    Ok(reply) => print_reply(reply, plain),
                    Err(error) => println!("{}", error.to_string().red()),
                }
            }
        }
    }

    Ok(())
}

fn grade_choices() -> String {
    Grade::all()
        .map(|grade| grade.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn subject_choices() -> String {
    Subject::ALL
        .iter()
        .map(|subject| subject.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_settings(settings: &UserSettings) {
    println!(
        "Grade {} | {} | answers in {}",
        settings.grade.to_string().yellow(),
        settings.subject.title().yellow(),
        settings.language.label().yellow()
    );
}

fn print_reply(reply: &Message, plain: bool) {
    let render = |content: &str| {
        let blocks = markdown::render(content);
        if plain {
            markdown::to_plain(&blocks)
        } else {
            markdown::to_terminal(&blocks)
        }
    };

    println!();
    println!("{}", render(&reply.content));
    if let Some(translated) = &reply.translated_content {
        println!();
        println!("{}", "Translation".bold().magenta());
        println!("{}", render(translated));
    }
    println!();
}

/// Turns a local photo into a data URI; URLs and data URIs pass through.
async fn load_image(reference: &str) -> Result<String> {
    if ["http://", "https://", "data:"]
        .iter()
        .any(|prefix| reference.starts_with(prefix))
    {
        return Ok(reference.to_string());
    }

    let bytes = tokio::fs::read(reference)
        .await
        .with_context(|| format!("failed to read image {reference}"))?;
    let mime = image_mime(Path::new(reference));
    Ok(format!(
        "data:{mime};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    ))
}

fn image_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_follows_extension() {
        assert_eq!(image_mime(Path::new("board.PNG")), "image/png");
        assert_eq!(image_mime(Path::new("notes.jpg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("scan")), "image/jpeg");
    }

    #[tokio::test]
    async fn load_image_passes_urls_through() {
        let url = "https://example.com/triangle.png";
        assert_eq!(load_image(url).await.unwrap(), url);
    }

    #[test]
    fn cli_parses_settings_and_subcommand() {
        let cli = Cli::try_parse_from([
            "eduassist",
            "--grade",
            "college",
            "--subject",
            "computer",
            "--language",
            "english",
            "ask",
            "What is recursion?",
        ])
        .expect("valid arguments");

        assert_eq!(cli.grade, Grade::College);
        assert_eq!(cli.subject, Subject::Computer);
        assert_eq!(cli.language, Language::English);
        assert_eq!(cli.timeout_seconds, DEFAULT_TIMEOUT.as_secs());
        assert!(matches!(cli.command, Commands::Ask { question: Some(_), image: None }));
    }

    #[test]
    fn help_lists_every_grade_and_subject() {
        let grades = grade_choices();
        assert!(grades.starts_with("1, 2, 3"));
        assert!(grades.ends_with("12, college"));
        assert_eq!(subject_choices(), "math, science, computer");
    }

    #[test]
    fn cli_rejects_unknown_grade() {
        assert!(Cli::try_parse_from(["eduassist", "--grade", "13", "chat"]).is_err());
    }
}
