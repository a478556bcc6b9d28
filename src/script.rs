//! Gesture scripts: replaying toolbar changes and pointer input from text.
//!
//! One command per line; blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! set <control> <value...>     # feed a toolbar control, e.g. `set tool Spray`
//! origin <left> <top>          # move the canvas within the viewport
//! down <x> <y> [button]        # press (left by default)
//! move <x> <y>
//! up <x> <y> [button]          # release (left by default)
//! wait <ms>                    # advance the surface clock
//! answer <text...>             # queue an answer for the next text prompt
//! cancel                       # queue a cancelled text prompt
//! ```
//!
//! Coordinates are viewport coordinates, like the events a host delivers.

use crate::error::PaintError;
use crate::input::{EventOutcome, MouseButton, PointerEvent};
use crate::surface::PaintSurface;
use crate::toolbar::Toolbar;
use crate::tools::QueuedPrompt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors from parsing or replaying a script. Line numbers start at 1.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Paint {
        line: usize,
        #[source]
        source: PaintError,
    },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// One script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { control: String, value: String },
    Origin { left: f64, top: f64 },
    Pointer(PointerEvent),
    Wait(Duration),
    Answer(String),
    Cancel,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<(usize, Command)>,
}

/// Counts gathered while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Presses that started a tool
    pub dispatched: usize,
    /// Events nothing listened to
    pub ignored: usize,
    /// Timer ticks fired by `wait`
    pub ticks: u64,
}

impl Script {
    /// Parses script text.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let command =
                parse_command(text).map_err(|message| ScriptError::Parse { line, message })?;
            steps.push((line, command));
        }
        Ok(Self { steps })
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.steps.iter().map(|(_, command)| command)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Replays the script against `surface`.
    ///
    /// Stops at the first failing command. Text prompts are answered from the
    /// `answer`/`cancel` commands seen so far; an unanswered prompt counts as
    /// cancelled.
    pub fn run(
        &self,
        surface: &mut PaintSurface,
        toolbar: &mut Toolbar,
    ) -> Result<ReplayStats, ScriptError> {
        let mut prompt = QueuedPrompt::new();
        let mut stats = ReplayStats::default();

        for (line, command) in &self.steps {
            let line = *line;
            let paint_err = move |source| ScriptError::Paint { line, source };
            match command {
                Command::Set { control, value } => {
                    toolbar.apply(surface, control, value).map_err(paint_err)?;
                }
                Command::Origin { left, top } => surface.set_canvas_origin(*left, *top),
                Command::Pointer(event) => {
                    match toolbar
                        .handle_pointer(surface, event, &mut prompt)
                        .map_err(paint_err)?
                    {
                        EventOutcome::Dispatched => stats.dispatched += 1,
                        EventOutcome::Ignored => stats.ignored += 1,
                        EventOutcome::Tracked | EventOutcome::Released => {}
                    }
                }
                Command::Wait(duration) => stats.ticks += surface.advance_by(*duration),
                Command::Answer(text) => {
                    prompt.answer(text.clone());
                }
                Command::Cancel => {
                    prompt.cancel();
                }
            }
        }

        if surface.is_dragging() {
            log::warn!("Script ended with a gesture still in progress");
        }
        if prompt.pending() > 0 {
            log::warn!("{} prompt answers were never used", prompt.pending());
        }
        log::debug!("Script replay finished: {stats:?}");
        Ok(stats)
    }
}

fn parse_command(text: &str) -> Result<Command, String> {
    let (word, rest) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(word, rest)| (word, rest.trim()));
    let args: Vec<&str> = rest.split_whitespace().collect();

    match word {
        "set" => {
            let (control, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(control, value)| (control, value.trim()));
            if control.is_empty() {
                return Err("set needs a control name".to_string());
            }
            Ok(Command::Set {
                control: control.to_string(),
                value: value.to_string(),
            })
        }
        "origin" => {
            let [left, top] = coordinates(word, &args, 0)?;
            Ok(Command::Origin { left, top })
        }
        "down" | "up" => {
            let [x, y] = coordinates(word, &args, 1)?;
            let button = match args.get(2) {
                None => MouseButton::Left,
                Some(name) => parse_button(name)?,
            };
            Ok(Command::Pointer(if word == "down" {
                PointerEvent::down(button, x, y)
            } else {
                PointerEvent::up(button, x, y)
            }))
        }
        "move" => {
            let [x, y] = coordinates(word, &args, 0)?;
            Ok(Command::Pointer(PointerEvent::moved(x, y)))
        }
        "wait" => match args.as_slice() {
            [ms] => ms
                .parse::<u64>()
                .map(|ms| Command::Wait(Duration::from_millis(ms)))
                .map_err(|_| format!("invalid duration '{ms}'")),
            _ => Err("wait takes one argument in milliseconds".to_string()),
        },
        "answer" => Ok(Command::Answer(rest.to_string())),
        "cancel" if args.is_empty() => Ok(Command::Cancel),
        "cancel" => Err("cancel takes no arguments".to_string()),
        other => Err(format!("unknown command '{other}'")),
    }
}

/// Parses the two leading numbers of `args`, allowing `optional` extra words.
fn coordinates(word: &str, args: &[&str], optional: usize) -> Result<[f64; 2], String> {
    if args.len() < 2 || args.len() > 2 + optional {
        return Err(format!("{word} takes x and y"));
    }
    let number = |value: &str| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate '{value}'"))
    };
    Ok([number(args[0])?, number(args[1])?])
}

fn parse_button(name: &str) -> Result<MouseButton, String> {
    match name.to_lowercase().as_str() {
        "left" => Ok(MouseButton::Left),
        "right" => Ok(MouseButton::Right),
        "middle" => Ok(MouseButton::Middle),
        _ => Err(format!("unknown button '{name}'")),
    }
}
