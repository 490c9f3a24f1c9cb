use ag_core::charset::{DARKEST, ramp, ramp_index};
use ag_core::config::RenderOptions;
use ag_core::frame::BrightnessGrid;

/// Render a brightness grid as newline-terminated text.
///
/// Each cell becomes `ramp[floor(b / 25.51)]`, each row is followed by `\n`
/// (the last one included). With `remove_border`, cells on the last row or
/// last column are dropped unless they are the darkest character `@`, so the
/// output is no longer guaranteed rectangular.
///
/// # Example
/// ```
/// use ag_core::config::RenderOptions;
/// use ag_core::frame::BrightnessGrid;
/// use ag_ascii::render::render;
///
/// let grid = BrightnessGrid::from_rows(&[vec![0.0, 255.0]]).unwrap();
/// assert_eq!(render(&grid, RenderOptions::default()), "@ \n");
/// let inverted = RenderOptions { invert: true, ..Default::default() };
/// assert_eq!(render(&grid, inverted), " @\n");
/// ```
#[must_use]
pub fn render(grid: &BrightnessGrid, options: RenderOptions) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.rows().len());
    render_into(grid, options, &mut out);
    out
}

/// Same as [`render`], appending to `out`.
pub fn render_into(grid: &BrightnessGrid, options: RenderOptions, out: &mut String) {
    let chars = ramp(options.invert);
    let rows = grid.rows();
    let last_row = rows.len().saturating_sub(1);
    let last_col = grid.width().saturating_sub(1);

    for (r, row) in rows.enumerate() {
        for (c, &brightness) in row.iter().enumerate() {
            let ch = chars[ramp_index(brightness)];
            let on_border = r == last_row || c == last_col;
            if options.remove_border && on_border && ch != DARKEST {
                continue;
            }
            out.push(ch);
        }
        out.push('\n');
    }
}
