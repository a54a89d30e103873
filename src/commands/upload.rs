//! Upload command with progress reporting

use std::path::Path;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use shiftlight_core::{DecodeError, Program};
use shiftlight_serial::{
    ProgramContext, ProgrammingSession, SerialTransport, SessionConfig, SessionProgress,
    SessionReport,
};

use super::program::print_rejected;

/// Create a progress bar counting frames
fn create_frame_bar(total: u64) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames {msg}",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Create a standard spinner style
fn create_spinner_style() -> Result<ProgressStyle, Box<dyn std::error::Error>> {
    Ok(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?)
}

/// Progress reporter using indicatif
pub struct IndicatifProgress {
    multi: MultiProgress,
    current_bar: Option<ProgressBar>,
    port: String,
}

impl IndicatifProgress {
    pub fn new(port: &str) -> Self {
        Self {
            multi: MultiProgress::new(),
            current_bar: None,
            port: port.to_string(),
        }
    }

    fn create_spinner(&mut self, message: String) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(create_spinner_style().unwrap_or_else(|_| ProgressStyle::default_spinner()));
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        self.current_bar = Some(pb);
    }

    fn finish(&mut self, message: &str) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl SessionProgress for IndicatifProgress {
    fn connecting(&mut self, baud_rate: u32) {
        self.create_spinner(format!(
            "Waiting for device on {} ({} baud)...",
            self.port, baud_rate
        ));
    }

    fn handshake_complete(&mut self) {
        self.finish("Device ready");
    }

    fn streaming(&mut self, total_frames: usize) {
        let pb = self.multi.add(
            create_frame_bar(total_frames as u64)
                .unwrap_or_else(|_| ProgressBar::new(total_frames as u64)),
        );
        self.current_bar = Some(pb);
    }

    fn frame_sent(&mut self, index: usize, _line: &str) {
        if let Some(pb) = &self.current_bar {
            pb.set_position(index as u64 + 1);
        }
    }

    fn frame_skipped(&mut self, index: usize, error: &DecodeError) {
        if let Some(pb) = &self.current_bar {
            pb.set_position(index as u64 + 1);
            pb.println(format!("Skipped frame {}: {}", index, error));
        }
    }

    fn complete(&mut self, report: &SessionReport) {
        self.finish("Upload complete");

        println!(
            "Programmed {} frame(s) in {:.2?}",
            report.sent, report.elapsed
        );
        if !report.skipped.is_empty() {
            println!("{} frame(s) skipped:", report.skipped.len());
            for skipped in &report.skipped {
                println!("  {:>2}: {} ({})", skipped.index, skipped.line, skipped.error);
            }
        }
    }
}

impl Drop for IndicatifProgress {
    fn drop(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.abandon();
        }
    }
}

/// Load `file` and program it into the device on `port`
pub fn run_upload(
    port: &str,
    file: &Path,
    config: SessionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::from_file(file)?;
    print_rejected(&program);

    if program.animation.is_empty() {
        log::warn!("{} contains no frames", file.display());
    }
    log::info!(
        "Uploading {} frame(s) from {}",
        program.animation.len(),
        file.display()
    );

    let mut session = ProgrammingSession::new(SerialTransport::new(port), config);
    let mut progress = IndicatifProgress::new(port);
    session.run(ProgramContext::from(&program), &mut progress)?;
    Ok(())
}
