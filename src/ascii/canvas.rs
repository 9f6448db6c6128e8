//! 2D text canvas operations for the fallback renderers

/// 2D text canvas — column-major (canvas[x][y])
pub type Canvas = Vec<Vec<char>>;

/// Create a blank canvas filled with spaces
pub fn mk_canvas(width: usize, height: usize) -> Canvas {
    let mut canvas = Vec::with_capacity(width + 1);
    for _ in 0..=width {
        canvas.push(vec![' '; height + 1]);
    }
    canvas
}

fn canvas_size(canvas: &Canvas) -> (usize, usize) {
    if canvas.is_empty() {
        return (0, 0);
    }
    (
        canvas.len().saturating_sub(1),
        canvas[0].len().saturating_sub(1),
    )
}

/// Grow the canvas to fit at least (new_x, new_y)
fn increase_size(canvas: &mut Canvas, new_x: usize, new_y: usize) {
    let (curr_x, curr_y) = canvas_size(canvas);
    let target_x = new_x.max(curr_x);
    let target_y = new_y.max(curr_y);

    for col in canvas.iter_mut() {
        col.resize(target_y + 1, ' ');
    }
    while canvas.len() <= target_x {
        canvas.push(vec![' '; target_y + 1]);
    }
}

/// Set a character at position (x, y), growing the canvas as needed.
/// Negative coordinates are ignored.
pub fn set_char(canvas: &mut Canvas, x: i32, y: i32, c: char) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    increase_size(canvas, x, y);
    canvas[x][y] = c;
}

/// Draw text onto the canvas starting at position
pub fn draw_text(canvas: &mut Canvas, x: i32, y: i32, text: &str) {
    for (i, c) in text.chars().enumerate() {
        set_char(canvas, x + i as i32, y, c);
    }
}

/// Draw a horizontal run of `c` over [x0, x1] inclusive
pub fn draw_hline(canvas: &mut Canvas, x0: i32, x1: i32, y: i32, c: char) {
    for x in x0.min(x1)..=x0.max(x1) {
        set_char(canvas, x, y, c);
    }
}

/// Draw a simple one-row box centered on `cx` with the label inside
pub fn draw_label_box(canvas: &mut Canvas, cx: i32, top_y: i32, width: i32, label: &str) {
    let half_w = width / 2;
    let left = cx - half_w;
    let right = cx + half_w;

    set_char(canvas, left, top_y, '┌');
    draw_hline(canvas, left + 1, right - 1, top_y, '─');
    set_char(canvas, right, top_y, '┐');

    set_char(canvas, left, top_y + 1, '│');
    let label_x = cx - (label.chars().count() as i32) / 2;
    draw_text(canvas, label_x, top_y + 1, label);
    set_char(canvas, right, top_y + 1, '│');

    set_char(canvas, left, top_y + 2, '└');
    draw_hline(canvas, left + 1, right - 1, top_y + 2, '─');
    set_char(canvas, right, top_y + 2, '┘');
}

/// Convert the canvas to a multi-line string, dropping trailing blank
/// lines and trailing spaces on each line
pub fn canvas_to_string(canvas: &Canvas) -> String {
    let (max_x, max_y) = canvas_size(canvas);
    let mut lines = Vec::new();

    for y in 0..=max_y {
        let mut line = String::new();
        for x in 0..=max_x {
            if x < canvas.len() && y < canvas[x].len() {
                line.push(canvas[x][y]);
            } else {
                line.push(' ');
            }
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Clamp every line of `text` to at most `width` characters
pub fn clamp_width(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| {
            if line.chars().count() > width {
                line.chars().take(width).collect()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
