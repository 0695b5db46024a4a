use crate::grid::{Grid, Rect};
use crate::input::{InputState, PointerButton};
use crate::raster::{Canvas, Image, Rgba};

const BORDER: Rgba = Rgba::rgb(0x99, 0x99, 0x99);
const GRID_LINE: Rgba = Rgba::rgb(0xDD, 0xDD, 0xDD);
const HOVER_ALPHA: f32 = 0.2;

/// Interactive view of a [`Grid`] placed at `offset` within a larger canvas.
pub struct Surface {
    grid: Grid,
    offset: (i32, i32),
    background: Image,
    has_focus: bool,
}

impl Surface {
    pub fn new(grid: Grid, offset: (i32, i32)) -> Self {
        let background = Self::draw_background(&grid);
        Self {
            grid,
            offset,
            background,
            has_focus: false,
        }
    }

    /// Border, white interior and gridlines, drawn once and read back.
    fn draw_background(grid: &Grid) -> Image {
        let (width, height) = grid.pixel_size();
        let (cell_width, cell_height) = grid.cell_size();
        let (w, h) = (width as i32, height as i32);

        let mut scratch = Image::new(width, height);
        scratch.fill_rect(Rect::new(0, 0, w, h), BORDER);
        scratch.fill_rect(Rect::new(1, 1, w - 2, h - 2), Rgba::WHITE);

        for x in (cell_width as i32..w).step_by(cell_width.max(1) as usize) {
            scratch.fill_rect(Rect::new(x, 1, 1, h - 2), GRID_LINE);
        }
        for y in (cell_height as i32..h).step_by(cell_height.max(1) as usize) {
            scratch.fill_rect(Rect::new(1, y, w - 2, 1), GRID_LINE);
        }

        scratch.get_image(Rect::new(0, 0, w, h))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Canvas size needed to show the grid with the same margin on every side.
    pub fn canvas_size(&self) -> (u32, u32) {
        let (width, height) = self.grid.pixel_size();
        (
            width + 2 * self.offset.0.max(0) as u32,
            height + 2 * self.offset.1.max(0) as u32,
        )
    }

    /// The origin itself counts as outside; `(0, 0)` is where a pointer
    /// that left the canvas is parked.
    fn compute_focus(&self, pointer: &InputState) -> bool {
        let (width, height) = self.grid.pixel_size();
        pointer.x > 0 && pointer.y > 0 && pointer.x <= width as i32 && pointer.y <= height as i32
    }

    /// Recomputes focus, hover and paint state from the pointer.
    pub fn update(&mut self, pointer: &InputState) {
        let focus = self.compute_focus(pointer);
        if focus != self.has_focus {
            log::debug!("Surface focus changed: {}", focus);
        }
        self.has_focus = focus;
        if !focus {
            return;
        }

        let (dx, dy) = self.offset;
        let pressed = pointer.pressed();
        for cell in self.grid.cells_mut() {
            cell.hovered = false;
            if cell.rect().translate(dx, dy).contains(pointer.x, pointer.y) {
                cell.hovered = true;
                if let Some(button) = pressed {
                    cell.on = button == PointerButton::Primary;
                }
            }
        }
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        let (dx, dy) = self.offset;
        canvas.put_image(&self.background, dx, dy);

        let hover = Rgba::BLACK.with_alpha(HOVER_ALPHA);
        for cell in self.grid.cells() {
            let rect = cell.rect().translate(dx + 1, dy + 1);
            if cell.on {
                canvas.fill_rect(rect, Rgba::BLACK);
            }
            if cell.hovered {
                canvas.blend_rect(rect, hover);
            }
        }
    }

    pub fn serialize(&self) -> String {
        self.grid.encode()
    }

    /// In-memory snapshot as per-row values.
    pub fn save(&self) -> Vec<u64> {
        self.grid.row_bits()
    }

    pub fn load(&mut self, rows: &[u64]) {
        self.grid.load_rows(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Preset;

    fn surface() -> Surface {
        Surface::new(Grid::default(), (10, 10))
    }

    fn pointer(x: i32, y: i32, button: Option<PointerButton>) -> InputState {
        InputState {
            x,
            y,
            over: true,
            moving: true,
            down: button.is_some(),
            button,
            ..InputState::default()
        }
    }

    #[test]
    fn origin_is_not_focused() {
        let mut surface = surface();
        surface.update(&pointer(0, 0, None));
        assert!(!surface.has_focus());
        surface.update(&pointer(1, 1, None));
        assert!(surface.has_focus());
        surface.update(&pointer(160, 160, None));
        assert!(surface.has_focus());
        surface.update(&pointer(161, 20, None));
        assert!(!surface.has_focus());
    }

    #[test]
    fn hover_follows_pointer() {
        let mut surface = surface();
        // first cell spans 10..=29 on both axes
        surface.update(&pointer(29, 29, None));
        assert!(surface.grid().get_cell(1, 1).unwrap().hovered);
        surface.update(&pointer(30, 15, None));
        assert!(!surface.grid().get_cell(1, 1).unwrap().hovered);
        assert!(surface.grid().get_cell(1, 2).unwrap().hovered);
        assert_eq!(surface.grid().cells().filter(|c| c.hovered).count(), 1);
    }

    #[test]
    fn primary_press_paints_and_stays_after_leaving_cell() {
        let mut surface = surface();
        surface.update(&pointer(15, 15, Some(PointerButton::Primary)));
        assert!(surface.grid().get_cell(1, 1).unwrap().on);

        surface.update(&pointer(55, 15, Some(PointerButton::Primary)));
        assert!(surface.grid().get_cell(1, 1).unwrap().on);
        assert!(surface.grid().get_cell(1, 3).unwrap().on);
        assert!(!surface.grid().get_cell(1, 2).unwrap().on);
    }

    #[test]
    fn other_button_erases() {
        let mut surface = surface();
        surface.grid_mut().load_preset(Preset::Heart);
        assert!(surface.grid().get_cell(2, 1).unwrap().on);
        surface.update(&pointer(15, 35, Some(PointerButton::Secondary)));
        assert!(!surface.grid().get_cell(2, 1).unwrap().on);
        surface.update(&pointer(35, 35, Some(PointerButton::Middle)));
        assert!(!surface.grid().get_cell(2, 2).unwrap().on);
    }

    #[test]
    fn unfocused_updates_leave_grid_untouched() {
        let mut surface = surface();
        surface.update(&pointer(15, 15, None));
        surface.grid_mut().cell_mut(4, 4).unwrap().on = true;
        let before = surface.grid().clone();

        let parked = InputState::default();
        surface.update(&parked);
        surface.update(&parked);
        let after = surface.grid();
        assert!(before.cells().zip(after.cells()).all(|(a, b)| a == b));
        // hover from the last focused step is kept
        assert!(after.get_cell(1, 1).unwrap().hovered);
    }

    #[test]
    fn render_draws_background_cells_and_hover() {
        let mut surface = surface();
        surface.grid_mut().cell_mut(1, 1).unwrap().on = true;
        surface.update(&pointer(35, 15, None));

        let (width, height) = surface.canvas_size();
        assert_eq!((width, height), (180, 180));
        let mut canvas = Image::new(width, height);
        surface.render(&mut canvas);

        // border, interior and gridline
        assert_eq!(canvas.pixel(10, 10), Some(BORDER));
        assert_eq!(canvas.pixel(12, 12), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(30, 50), Some(GRID_LINE));
        assert_eq!(canvas.pixel(45, 55), Some(Rgba::WHITE));
        // hovered cell (1, 2) is white darkened by 20%
        assert_eq!(canvas.pixel(45, 15), Some(Rgba::rgb(204, 204, 204)));
        // painted and hovered: the overlay over black stays black
        surface.update(&pointer(15, 15, None));
        surface.render(&mut canvas);
        assert!(surface.grid().get_cell(1, 1).unwrap().hovered);
        assert_eq!(canvas.pixel(12, 12), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(45, 15), Some(Rgba::WHITE));
        // outside the grid nothing was drawn
        assert_eq!(canvas.pixel(5, 5), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn serialize_and_round_trip() {
        let mut surface = surface();
        surface.update(&pointer(15, 15, Some(PointerButton::Primary)));
        assert_eq!(surface.serialize(), "128,0,0,0,0,0,0,0");

        let saved = surface.save();
        surface.grid_mut().reset();
        surface.load(&saved);
        assert_eq!(surface.serialize(), "128,0,0,0,0,0,0,0");
    }
}
