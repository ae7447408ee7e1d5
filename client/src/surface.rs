use crate::scene::SceneGraph;

/// Where a frame ends up once the scene has been updated.
pub trait RenderSurface {
    fn present(&mut self, scene: &SceneGraph);
}

/// Headless surface: logs a short scene summary every `every` frames.
#[derive(Debug)]
pub struct LogSurface {
    every: u64,
    frames: u64,
}

impl LogSurface {
    /// `every == 0` never logs.
    pub fn new(every: u64) -> Self {
        Self { every, frames: 0 }
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSurface for LogSurface {
    fn present(&mut self, scene: &SceneGraph) {
        self.frames += 1;
        if self.every == 0 || self.frames % self.every != 0 {
            return;
        }

        let mean_distance = if scene.is_empty() {
            0.0
        } else {
            scene
                .iter()
                .map(|(_, node)| node.translation.norm())
                .sum::<f32>()
                / scene.len() as f32
        };
        log::info!(
            "Frame {}: {} objects, mean distance from origin {:.1}",
            self.frames,
            scene.len(),
            mean_distance
        );
    }
}
