//! Interactive loop: credential entry until a key is present, then the
//! main screen.
//!
//! Generic over the line source and the output so tests can drive it with
//! in-memory buffers. Notifications are drained and printed after every
//! command; adjustments run to completion before the next line is read.

use crate::commands::import_file;
use crate::error::TonecraftError;
use crate::input::{
    CredentialInput, EDIT_TERMINATOR, UserCommand, parse_command, parse_credential_line,
};
use crate::screens;

use tone_core::validation::{check_api_key_format, is_valid_text_for_adjustment};
use tone_core::{AdjustmentOrchestrator, Notification};

use std::io::Write;

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<R, W> {
    orchestrator: AdjustmentOrchestrator,
    notifications: UnboundedReceiver<Notification>,
    lines: Lines<R>,
    out: W,
    show_main_screen: bool,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        orchestrator: AdjustmentOrchestrator,
        notifications: UnboundedReceiver<Notification>,
        reader: R,
        out: W,
    ) -> Self {
        Self {
            orchestrator,
            notifications,
            lines: reader.lines(),
            out,
            show_main_screen: true,
        }
    }

    /// Give back the output sink (tests inspect what was written).
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `:quit` or end of input.
    pub async fn run(&mut self) -> Result<(), TonecraftError> {
        info!("Interactive session started");

        loop {
            self.flush_notifications()?;

            let flow = if self.orchestrator.has_credential().await {
                self.main_step().await?
            } else {
                self.credential_step().await?
            };

            if flow == Flow::Quit {
                break;
            }
        }

        self.flush_notifications()?;
        info!("Interactive session ended");
        Ok(())
    }

    async fn credential_step(&mut self) -> Result<Flow, TonecraftError> {
        let error = self.orchestrator.last_error().await;
        let screen = screens::render_credential_screen(error.as_deref());
        self.write(&screen)?;
        self.write(screens::KEY_PROMPT)?;

        let Some(line) = self.read_line().await? else {
            return Ok(Flow::Quit);
        };

        match parse_credential_line(&line) {
            CredentialInput::Quit => Ok(Flow::Quit),
            CredentialInput::Empty => Ok(Flow::Continue),
            CredentialInput::Key(key) => {
                if let Err(failure) = check_api_key_format(&key) {
                    warn!("Entered API key looks malformed: {}", failure);
                    self.write(&screens::render_key_warning(&failure))?;
                }

                if let Err(e) = self.orchestrator.set_credential(&key).await {
                    self.write(&format!("Could not save the API key: {e}\n"))?;
                }
                self.show_main_screen = true;
                Ok(Flow::Continue)
            }
        }
    }

    async fn main_step(&mut self) -> Result<Flow, TonecraftError> {
        if self.show_main_screen {
            let snapshot = self.orchestrator.snapshot().await;
            self.write(&screens::render_main_screen(&snapshot))?;
            self.show_main_screen = false;
        }
        self.write(screens::PROMPT)?;

        let Some(line) = self.read_line().await? else {
            return Ok(Flow::Quit);
        };

        match parse_command(&line) {
            Ok(command) => self.execute(command).await,
            Err(e) => {
                self.write(&format!("{e}\n"))?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn execute(&mut self, command: UserCommand) -> Result<Flow, TonecraftError> {
        debug!("Executing {:?}", command);

        match command {
            UserCommand::SelectTone(tone) => {
                let text = self.orchestrator.snapshot().await.current;
                if !text.trim().is_empty() && !is_valid_text_for_adjustment(&text) {
                    self.write("Note: the text is very short; results may be poor.\n")?;
                }

                self.write(&screens::render_loading(&tone))?;
                if self.orchestrator.select_tone(&tone).await.is_ok() {
                    self.show_main_screen = true;
                }
            }
            UserCommand::Edit => {
                self.write(&format!(
                    "Enter the new text. End with a line containing only '{EDIT_TERMINATOR}'.\n"
                ))?;
                match self.read_block().await? {
                    Some(text) => match self.orchestrator.edit_text(&text).await {
                        Ok(()) => self.show_main_screen = true,
                        Err(e) => self.write(&format!("Could not update the text: {e}\n"))?,
                    },
                    None => self.write("Edit cancelled.\n")?,
                }
            }
            UserCommand::Load(path) => match import_file(&self.orchestrator, &path).await {
                Ok(()) => self.show_main_screen = true,
                Err(TonecraftError::Io { message, .. }) => self.write(&format!("{message}\n"))?,
                Err(e) => return Err(e),
            },
            UserCommand::Reset => match self.orchestrator.reset().await {
                Ok(()) => self.show_main_screen = true,
                Err(e) => self.write(&format!("Could not reset: {e}\n"))?,
            },
            UserCommand::Show => self.show_main_screen = true,
            UserCommand::Tones => self.write(&screens::render_tone_list())?,
            UserCommand::Logout => {
                if let Err(e) = self.orchestrator.clear_credential().await {
                    self.write(&format!("Could not remove the stored API key: {e}\n"))?;
                }
                self.write("API key removed.\n")?;
            }
            UserCommand::Help => self.write(&screens::render_help())?,
            UserCommand::Quit => return Ok(Flow::Quit),
            UserCommand::Empty => {}
        }

        Ok(Flow::Continue)
    }

    /// Lines up to the terminator, joined with `\n`. `None` on end of input.
    async fn read_block(&mut self) -> Result<Option<String>, TonecraftError> {
        let mut block = Vec::new();
        while let Some(line) = self.read_line().await? {
            if line.trim_end() == EDIT_TERMINATOR {
                return Ok(Some(block.join("\n")));
            }
            block.push(line);
        }
        Ok(None)
    }

    async fn read_line(&mut self) -> Result<Option<String>, TonecraftError> {
        self.out.flush().map_err(|e| TonecraftError::io(e))?;
        self.lines.next_line().await.map_err(|e| TonecraftError::io(e))
    }

    fn flush_notifications(&mut self) -> Result<(), TonecraftError> {
        while let Ok(notification) = self.notifications.try_recv() {
            self.write(&screens::render_notification(&notification))?;
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), TonecraftError> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|e| TonecraftError::io(e))
    }
}
