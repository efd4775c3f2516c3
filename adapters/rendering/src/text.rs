//! Plain-text presenter that prints glyph frames.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};

use crate::{Presentation, Presenter};

/// Presenter that writes glyph frames to any byte sink.
#[derive(Debug)]
pub struct TextPresenter<W> {
    out: W,
    frames: u64,
}

impl<W: Write> TextPresenter<W> {
    /// Wraps the provided writer.
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Releases the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()> {
        let scene = &presentation.scene;
        writeln!(self.out, "{} (tick {})", presentation.title, scene.tick)
            .context("failed to write frame header")?;
        self.out
            .write_all(scene.render_text().as_bytes())
            .context("failed to write frame body")?;
        self.out.flush().context("failed to flush frame")?;
        self.frames += 1;
        Ok(())
    }
}
