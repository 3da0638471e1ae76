use lattice::{Lattice, LatticeError};

/// Canvas value written over the trajectory start before rendering.
pub const START_MARKER: f64 = 3.0;

/// Glyph for one canvas cell.
///
/// Canvas cells hold small integers; anything outside the known set renders
/// as `?` so the grid keeps its width.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn glyph(value: f64) -> char {
    match value.round() as i64 {
        -1 => 'o',
        1 => '*',
        0 => ' ',
        2 => '@',
        -2 => 'O',
        3 => 'x',
        _ => '?',
    }
}

/// Renders the canvas as a bordered `L x L` grid, marking `start` with `x`.
///
/// # Errors
///
/// Fails when the canvas does not hold `L * L` cells or `start` is off the
/// lattice.
pub fn render_canvas(canvas: &[f64], lattice: Lattice, start: usize) -> Result<String, LatticeError> {
    lattice.check_map("canvas", canvas)?;
    lattice.check_site(start)?;

    let mut cells = canvas.to_vec();
    cells[start] = START_MARKER;

    let border = "---".repeat(lattice.size());
    let mut screen = String::from("\n");
    screen.push_str(&format!("\t+{border}+\n"));
    for row in cells.chunks(lattice.size()) {
        screen.push_str("\t|");
        for &value in row {
            screen.push(' ');
            screen.push(glyph(value));
            screen.push(' ');
        }
        screen.push_str("|\n");
    }
    screen.push_str(&format!("\t+{border}+\n"));
    Ok(screen)
}
