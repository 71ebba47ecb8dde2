//! Event loop tying the two views to the inference client.
//!
//! User commands and request completions are handled one at a time on the
//! loop. Requests run in spawned tasks and report back over an mpsc
//! channel, so input keeps flowing while a view is busy. A busy view
//! refuses a second action instead of queueing or cancelling it.

use anyhow::Result;
use inference_client::{GenderInference, InferenceError};
use oracle_core::InferenceResult;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::command::{Command, HELP};
use crate::image_file::load_image;
use crate::render::{error_line, notice_line, pending_line, ResultCard, Surface};
use crate::views::{ImageView, ImageViewState, TextView, TextViewState};

/// Completion of a spawned request, routed to the view that started it.
#[derive(Debug)]
pub enum ViewEvent {
    TextCompleted(Result<InferenceResult, InferenceError>),
    ImageCompleted(Result<InferenceResult, InferenceError>),
}

/// Whether the loop should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Model identifiers shown in the banner and by `models`.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub text_model: String,
    pub image_model: String,
}

pub struct App {
    client: Arc<dyn GenderInference>,
    models: ModelInfo,
    text: TextView,
    image: ImageView,
    events: mpsc::UnboundedSender<ViewEvent>,
}

impl App {
    pub fn new(
        client: Arc<dyn GenderInference>,
        models: ModelInfo,
    ) -> (Self, mpsc::UnboundedReceiver<ViewEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let app = Self {
            client,
            models,
            text: TextView::new(),
            image: ImageView::new(),
            events,
        };
        (app, rx)
    }

    #[cfg(test)]
    pub fn text_view(&self) -> &TextView {
        &self.text
    }

    #[cfg(test)]
    pub fn image_view(&self) -> &ImageView {
        &self.image
    }

    /// True while either view has a request in flight.
    pub fn has_pending(&self) -> bool {
        !self.text.can_submit() || self.image.is_analyzing()
    }

    pub fn banner(&self) -> Vec<String> {
        use colored::Colorize;
        vec![
            format!("{}", "Gender Oracle: The AI Identity Engine".bold()),
            format!(
                "Models: {} & {}",
                self.models.text_model, self.models.image_model
            )
            .dimmed()
            .to_string(),
            "Type `help` for commands.".to_string(),
        ]
    }

    /// Handle one command; returns the lines to print.
    pub async fn handle_command(&mut self, command: Command) -> (Flow, Vec<String>) {
        let lines = match command {
            Command::Name(name) => self.submit_name(name),
            Command::Image(path) => self.select_image(&path).await,
            Command::Analyze => self.analyze_image(),
            Command::Status => self.status(),
            Command::Models => vec![
                format!("Name model:  {}", self.models.text_model),
                format!("Image model: {}", self.models.image_model),
            ],
            Command::Help => vec![HELP.to_string()],
            Command::Quit => return (Flow::Quit, Vec::new()),
            Command::Empty => Vec::new(),
            Command::Unknown(input) => vec![notice_line(&format!(
                "Unknown command: {input}. Type `help` for commands."
            ))
            .to_string()],
        };
        (Flow::Continue, lines)
    }

    /// Deliver a completion to its view; returns the lines to print.
    pub fn handle_event(&mut self, event: ViewEvent) -> Vec<String> {
        match event {
            ViewEvent::TextCompleted(outcome) => {
                self.text.complete(outcome);
                render_text_state(self.text.state())
            }
            ViewEvent::ImageCompleted(outcome) => {
                self.image.complete(outcome);
                render_image_state(self.image.state())
            }
        }
    }

    fn submit_name(&mut self, name: String) -> Vec<String> {
        self.text.set_input(name);
        if !self.text.can_submit() {
            return vec![notice_line("Still analyzing the previous name; please wait.").to_string()];
        }
        let Some(name) = self.text.submit() else {
            return vec![notice_line("Please enter a name.").to_string()];
        };

        debug!(name = %name, "Submitting name");
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.infer_from_text(&name).await;
            // The receiver only closes when the loop has exited.
            let _ = events.send(ViewEvent::TextCompleted(outcome));
        });

        vec![pending_line(Surface::Text).to_string()]
    }

    async fn select_image(&mut self, path: &Path) -> Vec<String> {
        if self.image.is_analyzing() {
            return vec![notice_line("Analysis in progress; the photo can't be changed yet.").to_string()];
        }
        match load_image(path).await {
            Ok(image) => {
                let summary = format!(
                    "Loaded {} ({} bytes). Type `analyze` to run visual analysis.",
                    image.file_name, image.byte_len
                );
                self.image.load(image);
                vec![summary]
            }
            Err(e) => vec![error_line(&format!("{e:#}")).to_string()],
        }
    }

    fn analyze_image(&mut self) -> Vec<String> {
        if self.image.is_analyzing() {
            return vec![notice_line("Already analyzing; please wait.").to_string()];
        }
        let Some(data_url) = self.image.analyze() else {
            return vec![notice_line("Select a photo first with `image <path>`.").to_string()];
        };

        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.infer_from_image(&data_url).await;
            let _ = events.send(ViewEvent::ImageCompleted(outcome));
        });

        vec![pending_line(Surface::Image).to_string()]
    }

    fn status(&self) -> Vec<String> {
        let mut lines = vec!["[Name]".to_string()];
        if !self.text.input().trim().is_empty() {
            lines.push(format!("Input: {}", self.text.input()));
        }
        match self.text.state() {
            TextViewState::Idle => lines.push("Enter a name with `name <text>`.".to_string()),
            state => lines.extend(render_text_state(state)),
        }

        lines.push(String::new());
        lines.push("[Photo]".to_string());
        if let Some(image) = self.image.image() {
            lines.push(format!("Selected: {} ({} bytes)", image.file_name, image.byte_len));
        }
        match self.image.state() {
            ImageViewState::Empty => {
                lines.push("No photo selected. Clear faces work best.".to_string());
            }
            ImageViewState::Loaded => lines.push("Ready for `analyze`.".to_string()),
            state => lines.extend(render_image_state(state)),
        }
        lines
    }
}

pub(crate) fn render_text_state(state: &TextViewState) -> Vec<String> {
    match state {
        TextViewState::Idle => Vec::new(),
        TextViewState::Submitting => vec![pending_line(Surface::Text).to_string()],
        TextViewState::Success(result) => vec![ResultCard::new(Surface::Text, result).render()],
        TextViewState::Failed(message) => vec![error_line(message).to_string()],
    }
}

pub(crate) fn render_image_state(state: &ImageViewState) -> Vec<String> {
    match state {
        ImageViewState::Empty | ImageViewState::Loaded => Vec::new(),
        ImageViewState::Analyzing => vec![pending_line(Surface::Image).to_string()],
        ImageViewState::Success(result) => vec![ResultCard::new(Surface::Image, result).render()],
        ImageViewState::Failed(message) => vec![error_line(message).to_string()],
    }
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Run the interactive session on stdin.
pub async fn run_interactive(
    mut app: App,
    mut events: mpsc::UnboundedReceiver<ViewEvent>,
) -> Result<()> {
    print_lines(&app.banner());
    drive(&mut app, &mut events, BufReader::new(tokio::io::stdin())).await?;
    info!("Session ended");
    Ok(())
}

/// Process commands from `input` until `quit`, or until the input closes
/// and every in-flight request has finished.
async fn drive<R>(
    app: &mut App,
    events: &mut mpsc::UnboundedReceiver<ViewEvent>,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut input = input.lines();
    let mut input_open = true;

    loop {
        if !input_open && !app.has_pending() {
            break;
        }

        tokio::select! {
            line = input.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        let (flow, lines) = app.handle_command(Command::parse(&line)).await;
                        print_lines(&lines);
                        if flow == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        debug!("Input closed; waiting for in-flight requests");
                        input_open = false;
                    }
                }
            }
            Some(event) = events.recv() => {
                print_lines(&app.handle_event(event));
            }
        }
    }

    Ok(())
}
