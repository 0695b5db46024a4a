use crate::config::Config;
use crate::dump::Dumper;
use crate::grid::{Grid, Preset};
use crate::input::{InputTracker, PointerEvent};
use crate::input_mapping::InputAction;
use crate::surface::Surface;
use crate::transmit::Transmit;

/// What the event loop should do after an [`InputAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The paint surface together with its pointer queue and dump channel.
pub struct Editor {
    surface: Surface,
    input: InputTracker,
    dumper: Dumper,
    snapshot: Option<Vec<u64>>,
}

impl Editor {
    pub fn new(config: &Config, transmitter: Box<dyn Transmit>) -> Self {
        let grid = Grid::new(config.columns, config.rows, config.cell_width, config.cell_height);
        log::info!(
            "{}x{} grid of {}x{} px cells at {:?}",
            grid.cols(),
            grid.rows(),
            config.cell_width,
            config.cell_height,
            config.offset
        );
        Self {
            surface: Surface::new(grid, (config.offset.x, config.offset.y)),
            input: InputTracker::new(),
            dumper: Dumper::new(transmitter),
            snapshot: None,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn push_pointer(&mut self, event: PointerEvent) {
        self.input.push(event);
    }

    /// One simulation step: fold queued pointer events, then hit-test.
    pub fn update(&mut self, _step: f64) {
        let pointer = *self.input.drain();
        self.surface.update(&pointer);
    }

    /// Dumps the grid if it changed; returns the current serialization.
    pub fn serialize(&mut self) -> &str {
        self.dumper.dump(self.surface.serialize());
        self.dumper.last()
    }

    pub fn load_preset(&mut self, preset: Preset) {
        log::info!("Loading preset {}", preset);
        self.surface.grid_mut().load_preset(preset);
    }

    pub fn clear(&mut self) {
        self.surface.grid_mut().reset();
    }

    pub fn apply(&mut self, action: InputAction) -> Flow {
        match action {
            InputAction::LoadPreset(preset) => self.load_preset(preset),
            InputAction::Clear => self.clear(),
            InputAction::Save => {
                let rows = self.surface.save();
                log::info!("Saved rows: {:?}", rows);
                self.snapshot = Some(rows);
            }
            InputAction::Restore => match &self.snapshot {
                Some(rows) => self.surface.load(rows),
                None => log::warn!("Nothing saved to restore"),
            },
            InputAction::Quit => return Flow::Quit,
            InputAction::None => {}
        }
        Flow::Continue
    }
}
