//! Program text format
//!
//! A program file holds the variable declarations followed by the authored
//! frame lines, each under a section header:
//!
//! ```text
//! # Variables
//! idle=900
//! redline=6500
//!
//! # Animation CSV Lines
//! [1-3],idle,redline-1000,0,255,0,255,255,0,0
//! [1-13],redline,9999,255,0,0,255,0,0,1,100
//! ```
//!
//! Files without headers are also accepted: lines containing `=` that do not
//! start with `[` are variables, lines starting with `[` are frames.

use std::fs;
use std::path::Path;

use crate::animation::{Animation, MAX_FRAMES};
use crate::error::{AnimationError, DecodeError, ProgramError};
use crate::frame::Frame;
use crate::variables::VariableTable;

/// Header that starts the variables section
pub const VARIABLES_HEADER: &str = "# Variables";
/// Header that starts the frame lines section
pub const FRAMES_HEADER: &str = "# Animation CSV Lines";

/// Raw sections of a program file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramFile {
    /// Variable declaration lines
    pub variables: Vec<String>,
    /// Authored frame lines
    pub frames: Vec<String>,
}

impl ProgramFile {
    /// Split program text into its sections
    pub fn parse(text: &str) -> Self {
        let mut file = Self::default();
        let mut in_variables = false;
        let mut in_frames = false;

        for line in text.lines().map(str::trim) {
            if line == VARIABLES_HEADER {
                in_variables = true;
                in_frames = false;
                continue;
            }
            if line == FRAMES_HEADER {
                in_variables = false;
                in_frames = true;
                continue;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if in_variables || (!in_frames && file.frames.is_empty()) {
                file.variables.push(line.to_string());
            } else {
                file.frames.push(line.to_string());
            }
        }

        // Without any headers everything lands in `variables`; classify by shape
        if !text.lines().any(|l| is_header(l.trim())) {
            let lines = std::mem::take(&mut file.variables);
            for line in lines {
                if line.starts_with('[') {
                    file.frames.push(line);
                } else if line.contains('=') {
                    file.variables.push(line);
                } else {
                    log::warn!("program: ignoring unrecognised line '{}'", line);
                }
            }
        }

        file
    }

    /// Read and split a program file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Variables section as one block of text
    pub fn variables_text(&self) -> String {
        self.variables.join("\n")
    }

    /// Render in the sectioned format
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(VARIABLES_HEADER);
        out.push('\n');
        for line in &self.variables {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(FRAMES_HEADER);
        out.push('\n');
        for line in &self.frames {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Render and write to `path`
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ProgramError> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

fn is_header(line: &str) -> bool {
    line == VARIABLES_HEADER || line == FRAMES_HEADER
}

/// A frame line that was dropped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Position of the line within the frames section (0-based)
    pub index: usize,
    /// The line as written
    pub line: String,
    /// Why it was dropped
    pub error: AnimationError,
}

/// Variables and animation loaded from a program file
#[derive(Debug, Default)]
pub struct Program {
    /// Active variable table
    pub variables: VariableTable,
    /// Frames that decoded successfully
    pub animation: Animation,
    /// Frame lines that were dropped
    pub rejected: Vec<Rejected>,
}

impl Program {
    /// Build a program from its sections
    ///
    /// An invalid variables section fails the whole load. Invalid frame lines
    /// are dropped and recorded in [`Program::rejected`]; once the animation
    /// is full every remaining line is rejected as well.
    pub fn load(file: &ProgramFile) -> Result<Self, ProgramError> {
        let variables = VariableTable::parse(&file.variables_text())?;
        let mut animation = Animation::new();
        let mut rejected = Vec::new();

        for (index, line) in file.frames.iter().enumerate() {
            if let Err(error) = animation.append(line, Some(&variables)) {
                log::warn!("program: dropping frame line {} '{}': {}", index + 1, line, error);
                rejected.push(Rejected {
                    index,
                    line: line.clone(),
                    error,
                });
            }
        }

        if animation.len() == MAX_FRAMES && !rejected.is_empty() {
            log::warn!("program: animation is full ({} frames)", MAX_FRAMES);
        }
        log::debug!(
            "program: loaded {} variable(s), {} frame(s), {} rejected",
            variables.len(),
            animation.len(),
            rejected.len()
        );

        Ok(Self {
            variables,
            animation,
            rejected,
        })
    }

    /// Parse program text and load it
    pub fn from_text(text: &str) -> Result<Self, ProgramError> {
        Self::load(&ProgramFile::parse(text))
    }

    /// Read a program file and load it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        Self::load(&ProgramFile::from_file(path)?)
    }

    /// Re-resolve every frame against the current variables
    ///
    /// Yields one result per frame in animation order.
    pub fn resolved_frames(&self) -> impl Iterator<Item = Result<Frame, DecodeError>> + '_ {
        self.animation
            .entries()
            .iter()
            .map(|entry| entry.resolve(Some(&self.variables)))
    }

    /// Encoded form of every frame that still resolves
    pub fn evaluated_lines(&self) -> Vec<String> {
        self.resolved_frames()
            .filter_map(Result::ok)
            .map(|frame| frame.encode())
            .collect()
    }

    /// Sections for saving: current variables and authored frame lines
    pub fn to_program_file(&self) -> ProgramFile {
        ProgramFile {
            variables: self
                .variables
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect(),
            frames: self
                .animation
                .entries()
                .iter()
                .map(|e| e.source().to_string())
                .collect(),
        }
    }
}
