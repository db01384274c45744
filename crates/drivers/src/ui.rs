use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use font8x8::UnicodeFonts;
use minifb::{InputCallback, Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use sketchboard_adapters::{present_status, wrap_text, RasterCanvas};
use sketchboard_application::{
    AnalysisSession, AnalyzeCanvasCommand, SetCredentialCommand, StatusListener,
};
use sketchboard_domain::{
    AnalysisStatus, BrushSettings, Color, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, RGBA_CHANNELS,
};

use crate::config::AppConfig;

const MARGIN: usize = 24;
const HEADER_TOP: usize = 20;
const HEADER_HEIGHT: usize = 56;
const WORKAREA_TOP: usize = 94;
const PANEL_WIDTH: usize = 280;
const PANEL_INSET: usize = 14;
const PANEL_MIN_HEIGHT: usize = 360;
const STATUS_GAP: usize = 16;
const STATUS_HEIGHT: usize = 132;
const STATUS_PADDING: usize = 12;
const GLYPH_SIZE: usize = 8;
const LINE_HEIGHT: usize = 12;
const SLIDER_HEIGHT: usize = 16;
const SWATCH_SIZE: usize = 24;
const SWATCH_GAP: usize = 6;
const FIELD_HEIGHT: usize = 24;
const BUTTON_HEIGHT: usize = 30;
const BUTTON_GAP: usize = 10;

const WINDOW_TOP_COLOR: u32 = 0xF7EFE0;
const WINDOW_BOTTOM_COLOR: u32 = 0xF2E1CC;
const PANEL_COLOR: u32 = 0x2B2D34;
const TEXT_COLOR: u32 = 0xF4F1EA;
const INK_COLOR: u32 = 0x2B2D34;
const MUTED_TEXT_COLOR: u32 = 0x9EA3AE;
const ACCENT_COLOR: u32 = 0xE9A23B;

const PALETTE: [Color; 8] = [
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xFF, 0xFF, 0xFF),
    Color::rgb(0xE5, 0x39, 0x35),
    Color::rgb(0xFB, 0x8C, 0x00),
    Color::rgb(0xFD, 0xD8, 0x35),
    Color::rgb(0x43, 0xA0, 0x47),
    Color::rgb(0x1E, 0x88, 0xE5),
    Color::rgb(0x8E, 0x24, 0xAA),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    left: usize,
    top: usize,
    width: usize,
    height: usize,
}

impl Rect {
    fn right(&self) -> usize {
        self.left + self.width
    }

    fn bottom(&self) -> usize {
        self.top + self.height
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left as f32
            && y >= self.top as f32
            && x < self.right() as f32
            && y < self.bottom() as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Canvas,
    WidthSlider,
    StrokeSwatch(usize),
    BackgroundSwatch(usize),
    CredentialField,
    AnalyzeButton,
    ClearButton,
    UndoButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Canvas,
    CredentialField,
}

/// Window geometry derived from the canvas size: canvas and status box on
/// the left, controls on the right.
#[derive(Debug, Clone, Copy)]
struct Layout {
    canvas_width: usize,
    canvas_height: usize,
}

impl Layout {
    fn new(canvas_width: usize, canvas_height: usize) -> Self {
        Self {
            canvas_width,
            canvas_height,
        }
    }

    fn window_width(&self) -> usize {
        MARGIN + self.canvas_width + MARGIN + PANEL_WIDTH + MARGIN
    }

    fn window_height(&self) -> usize {
        let left_column = self.canvas_height + STATUS_GAP + STATUS_HEIGHT;
        WORKAREA_TOP + left_column.max(PANEL_MIN_HEIGHT) + MARGIN
    }

    fn canvas_rect(&self) -> Rect {
        Rect {
            left: MARGIN,
            top: WORKAREA_TOP,
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    fn status_rect(&self) -> Rect {
        Rect {
            left: MARGIN,
            top: WORKAREA_TOP + self.canvas_height + STATUS_GAP,
            width: self.canvas_width,
            height: STATUS_HEIGHT,
        }
    }

    fn panel_rect(&self) -> Rect {
        Rect {
            left: MARGIN + self.canvas_width + MARGIN,
            top: WORKAREA_TOP,
            width: PANEL_WIDTH,
            height: self.window_height() - WORKAREA_TOP - MARGIN,
        }
    }

    fn panel_row(&self, offset: usize, height: usize) -> Rect {
        let panel = self.panel_rect();
        Rect {
            left: panel.left + PANEL_INSET,
            top: panel.top + offset,
            width: panel.width - 2 * PANEL_INSET,
            height,
        }
    }

    fn slider_rect(&self) -> Rect {
        self.panel_row(30, SLIDER_HEIGHT)
    }

    fn stroke_swatch_rect(&self, index: usize) -> Rect {
        self.swatch_rect(78, index)
    }

    fn background_swatch_rect(&self, index: usize) -> Rect {
        self.swatch_rect(134, index)
    }

    fn swatch_rect(&self, offset: usize, index: usize) -> Rect {
        let row = self.panel_row(offset, SWATCH_SIZE);
        Rect {
            left: row.left + index * (SWATCH_SIZE + SWATCH_GAP),
            top: row.top,
            width: SWATCH_SIZE,
            height: SWATCH_SIZE,
        }
    }

    fn credential_rect(&self) -> Rect {
        self.panel_row(190, FIELD_HEIGHT)
    }

    fn analyze_rect(&self) -> Rect {
        self.panel_row(234, BUTTON_HEIGHT)
    }

    fn clear_rect(&self) -> Rect {
        let row = self.panel_row(274, BUTTON_HEIGHT);
        Rect {
            width: (row.width - BUTTON_GAP) / 2,
            ..row
        }
    }

    fn undo_rect(&self) -> Rect {
        let clear = self.clear_rect();
        Rect {
            left: clear.right() + BUTTON_GAP,
            ..clear
        }
    }

    fn control_at(&self, x: f32, y: f32) -> Option<Control> {
        if self.canvas_rect().contains(x, y) {
            return Some(Control::Canvas);
        }
        if self.slider_rect().contains(x, y) {
            return Some(Control::WidthSlider);
        }
        for index in 0..PALETTE.len() {
            if self.stroke_swatch_rect(index).contains(x, y) {
                return Some(Control::StrokeSwatch(index));
            }
            if self.background_swatch_rect(index).contains(x, y) {
                return Some(Control::BackgroundSwatch(index));
            }
        }
        if self.credential_rect().contains(x, y) {
            return Some(Control::CredentialField);
        }
        if self.analyze_rect().contains(x, y) {
            return Some(Control::AnalyzeButton);
        }
        if self.clear_rect().contains(x, y) {
            return Some(Control::ClearButton);
        }
        if self.undo_rect().contains(x, y) {
            return Some(Control::UndoButton);
        }
        None
    }

    fn to_canvas(&self, x: f32, y: f32) -> (i32, i32) {
        let canvas = self.canvas_rect();
        (
            x.floor() as i32 - canvas.left as i32,
            y.floor() as i32 - canvas.top as i32,
        )
    }
}

/// Mirrors the session status into the render loop.
#[derive(Clone, Default)]
struct StatusMirror(Rc<RefCell<AnalysisStatus>>);

impl StatusMirror {
    fn current(&self) -> AnalysisStatus {
        self.0.borrow().clone()
    }
}

impl StatusListener for StatusMirror {
    fn on_status_changed(&self, status: &AnalysisStatus) {
        *self.0.borrow_mut() = status.clone();
    }
}

struct TypedChars(Rc<RefCell<Vec<char>>>);

impl InputCallback for TypedChars {
    fn add_char(&mut self, uni_char: u32) {
        if let Some(ch) = char::from_u32(uni_char).filter(|ch| !ch.is_control()) {
            self.0.borrow_mut().push(ch);
        }
    }
}

struct FrameView<'a> {
    canvas: &'a RasterCanvas,
    status: &'a AnalysisStatus,
    credential_len: usize,
    focus: Focus,
    hovered: Option<Control>,
}

pub fn launch_window(session: &mut AnalysisSession, config: &AppConfig) -> Result<(), String> {
    let layout = Layout::new(config.canvas_width as usize, config.canvas_height as usize);
    let width = layout.window_width();
    let height = layout.window_height();

    let mut canvas = RasterCanvas::new(config.canvas_width, config.canvas_height, config.brush)
        .map_err(|error| format!("failed to create canvas: {error}"))?;
    let mirror = StatusMirror::default();
    session.subscribe(Box::new(mirror.clone()));
    let typed = Rc::new(RefCell::new(Vec::new()));

    let mut window = Window::new("sketchboard", width, height, WindowOptions::default())
        .map_err(|error| format!("failed to start UI window: {error}"))?;
    window.limit_update_rate(Some(Duration::from_micros(16_000)));
    window.set_input_callback(Box::new(TypedChars(Rc::clone(&typed))));

    let mut buffer = vec![WINDOW_TOP_COLOR; width * height];
    let mut focus = Focus::Canvas;
    let mut credential_input = String::new();
    let mut slider_drag = false;
    let mut was_mouse_down = false;
    let mut analysis_requested = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mouse_down = window.get_mouse_down(MouseButton::Left);
        let mouse_pos = window.get_mouse_pos(MouseMode::Clamp);
        let hovered = mouse_pos.and_then(|(x, y)| layout.control_at(x, y));

        if mouse_down && !was_mouse_down {
            focus = if hovered == Some(Control::CredentialField) {
                Focus::CredentialField
            } else {
                Focus::Canvas
            };
            match hovered {
                Some(Control::Canvas) => {
                    if let Some((x, y)) = mouse_pos {
                        let (cx, cy) = layout.to_canvas(x, y);
                        canvas.begin_stroke(cx, cy);
                    }
                }
                Some(Control::WidthSlider) => slider_drag = true,
                Some(Control::StrokeSwatch(index)) => update_brush(&mut canvas, |brush| {
                    brush.stroke_color = PALETTE[index];
                })?,
                Some(Control::BackgroundSwatch(index)) => update_brush(&mut canvas, |brush| {
                    brush.background_color = PALETTE[index];
                })?,
                Some(Control::AnalyzeButton) => analysis_requested = true,
                Some(Control::ClearButton) => canvas.clear(),
                Some(Control::UndoButton) => {
                    canvas.undo();
                }
                Some(Control::CredentialField) | None => {}
            }
        } else if mouse_down && canvas.is_drawing() {
            if let Some((x, y)) = mouse_pos {
                let (cx, cy) = layout.to_canvas(x, y);
                canvas.extend_stroke(cx, cy);
            }
        }

        if slider_drag && mouse_down {
            if let Some((x, _)) = mouse_pos {
                let stroke_width = x_to_stroke_width(x, layout.slider_rect());
                if stroke_width != canvas.brush().stroke_width {
                    update_brush(&mut canvas, |brush| brush.stroke_width = stroke_width)?;
                }
            }
        }

        if !mouse_down && was_mouse_down {
            canvas.end_stroke();
            slider_drag = false;
        }
        was_mouse_down = mouse_down;

        let typed_chars: Vec<char> = typed.borrow_mut().drain(..).collect();
        match focus {
            Focus::CredentialField => {
                let mut changed = !typed_chars.is_empty();
                credential_input.extend(typed_chars);
                if window.is_key_pressed(Key::Backspace, KeyRepeat::Yes) {
                    changed |= credential_input.pop().is_some();
                }
                if changed {
                    session.set_credential(SetCredentialCommand {
                        secret: credential_input.clone(),
                    });
                }
                if window.is_key_pressed(Key::Enter, KeyRepeat::No)
                    || window.is_key_pressed(Key::Tab, KeyRepeat::No)
                {
                    focus = Focus::Canvas;
                }
            }
            Focus::Canvas => {
                if window.is_key_pressed(Key::Enter, KeyRepeat::No) {
                    analysis_requested = true;
                }
                if window.is_key_pressed(Key::C, KeyRepeat::No) {
                    canvas.clear();
                }
                if window.is_key_pressed(Key::U, KeyRepeat::No) {
                    canvas.undo();
                }
            }
        }

        // The request blocks the loop, so paint the running state first.
        let will_run = analysis_requested && session.has_credential() && canvas.stroke_count() > 0;
        let status = if will_run {
            AnalysisStatus::Running
        } else {
            mirror.current()
        };

        draw_frame(
            &mut buffer,
            width,
            height,
            &layout,
            &FrameView {
                canvas: &canvas,
                status: &status,
                credential_len: credential_input.chars().count(),
                focus,
                hovered,
            },
        );
        window.set_title(&build_window_title(&status, canvas.brush(), canvas.stroke_count()));
        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|error| format!("failed to update UI window: {error}"))?;

        if analysis_requested {
            analysis_requested = false;
            canvas.end_stroke();
            session.analyze(&canvas, AnalyzeCanvasCommand);
        }
    }

    Ok(())
}

fn update_brush(
    canvas: &mut RasterCanvas,
    change: impl FnOnce(&mut BrushSettings),
) -> Result<(), String> {
    let mut brush = canvas.brush();
    change(&mut brush);
    canvas
        .set_brush(brush)
        .map_err(|error| format!("brush update failed: {error}"))
}

fn stroke_width_to_x(stroke_width: u32, track: Rect) -> usize {
    let span = (MAX_STROKE_WIDTH - MIN_STROKE_WIDTH) as f32;
    let clamped = stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    let t = (clamped - MIN_STROKE_WIDTH) as f32 / span;
    track.left + (t * (track.width - 1) as f32).round() as usize
}

fn x_to_stroke_width(x: f32, track: Rect) -> u32 {
    let t = ((x - track.left as f32) / (track.width - 1) as f32).clamp(0.0, 1.0);
    MIN_STROKE_WIDTH + (t * (MAX_STROKE_WIDTH - MIN_STROKE_WIDTH) as f32).round() as u32
}

/// One star per typed character, capped at the field width.
fn mask_secret(len: usize, max_columns: usize) -> String {
    "*".repeat(len.min(max_columns))
}

fn build_window_title(status: &AnalysisStatus, brush: BrushSettings, strokes: usize) -> String {
    format!(
        "sketchboard | status={} | strokes={} | width={} | stroke={} | background={}",
        status.label(),
        strokes,
        brush.stroke_width,
        brush.stroke_color,
        brush.background_color
    )
}

fn draw_frame(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    layout: &Layout,
    view: &FrameView<'_>,
) {
    draw_background(buffer, width, height);
    draw_header(buffer, width);
    draw_canvas(buffer, width, layout, view.canvas);
    draw_status(buffer, width, layout, view.status);
    draw_panel(buffer, width, layout, view);
}

fn draw_background(buffer: &mut [u32], width: usize, height: usize) {
    for y in 0..height {
        let t = y as f32 / height.max(1) as f32;
        let color = lerp_color(WINDOW_TOP_COLOR, WINDOW_BOTTOM_COLOR, t);
        buffer[y * width..(y + 1) * width].fill(color);
    }
}

fn draw_header(buffer: &mut [u32], width: usize) {
    fill_rect(buffer, width, MARGIN, HEADER_TOP, width - 2 * MARGIN, HEADER_HEIGHT, PANEL_COLOR);
    fill_rect(
        buffer,
        width,
        MARGIN,
        HEADER_TOP + HEADER_HEIGHT - 4,
        width - 2 * MARGIN,
        4,
        ACCENT_COLOR,
    );
    draw_text(buffer, width, MARGIN + 16, HEADER_TOP + 14, "SKETCHBOARD", TEXT_COLOR);
    draw_text(
        buffer,
        width,
        MARGIN + 16,
        HEADER_TOP + 30,
        "Draw a sketch and let the model describe it",
        MUTED_TEXT_COLOR,
    );
}

fn draw_canvas(buffer: &mut [u32], width: usize, layout: &Layout, canvas: &RasterCanvas) {
    let rect = layout.canvas_rect();
    let channels = usize::from(RGBA_CHANNELS);
    let canvas_width = canvas.width() as usize;

    for (row, line) in canvas
        .pixels()
        .chunks_exact(canvas_width * channels)
        .enumerate()
        .take(rect.height)
    {
        for (col, px) in line.chunks_exact(channels).enumerate().take(rect.width) {
            let color = Color::rgb(px[0], px[1], px[2]).to_rgb_u32();
            set_pixel(buffer, width, rect.left + col, rect.top + row, color);
        }
    }

    draw_rect(
        buffer,
        width,
        rect.left - 1,
        rect.top - 1,
        rect.width + 2,
        rect.height + 2,
        INK_COLOR,
    );
}

fn draw_status(buffer: &mut [u32], width: usize, layout: &Layout, status: &AnalysisStatus) {
    let rect = layout.status_rect();
    let (fill, stripe) = match status {
        AnalysisStatus::Idle => (0xFFFFFF, MUTED_TEXT_COLOR),
        AnalysisStatus::Warning(_) => (0xFFF4D6, ACCENT_COLOR),
        AnalysisStatus::Running => (0xE8F1FB, 0x1E88E5),
        AnalysisStatus::Success { .. } => (0xE7F5E8, 0x43A047),
        AnalysisStatus::Error { .. } => (0xFBE4E4, 0xE53935),
    };
    fill_rect(buffer, width, rect.left, rect.top, rect.width, rect.height, fill);
    fill_rect(buffer, width, rect.left, rect.top, 4, rect.height, stripe);
    draw_rect(buffer, width, rect.left, rect.top, rect.width, rect.height, darken_color(fill, 40));

    let columns = (rect.width - 2 * STATUS_PADDING) / GLYPH_SIZE;
    let max_lines = (rect.height - 2 * STATUS_PADDING) / LINE_HEIGHT;
    let mut lines = wrap_text(&present_status(status), columns);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep = columns.saturating_sub(3);
            *last = last.chars().take(keep).collect::<String>() + "...";
        }
    }

    for (index, line) in lines.iter().enumerate() {
        draw_text(
            buffer,
            width,
            rect.left + STATUS_PADDING,
            rect.top + STATUS_PADDING + index * LINE_HEIGHT,
            line,
            INK_COLOR,
        );
    }
}

fn draw_panel(buffer: &mut [u32], width: usize, layout: &Layout, view: &FrameView<'_>) {
    let panel = layout.panel_rect();
    fill_rect(buffer, width, panel.left, panel.top, panel.width, panel.height, PANEL_COLOR);
    let brush = view.canvas.brush();
    let text_left = panel.left + PANEL_INSET;

    draw_text(
        buffer,
        width,
        text_left,
        panel.top + 12,
        &format!("STROKE WIDTH {}", brush.stroke_width),
        TEXT_COLOR,
    );
    let track = layout.slider_rect();
    let track_color = if view.hovered == Some(Control::WidthSlider) {
        lighten_color(PANEL_COLOR, 48)
    } else {
        lighten_color(PANEL_COLOR, 28)
    };
    fill_rect(buffer, width, track.left, track.top + 6, track.width, 4, track_color);
    let knob_x = stroke_width_to_x(brush.stroke_width, track);
    fill_rect(buffer, width, track.left, track.top + 6, knob_x - track.left, 4, ACCENT_COLOR);
    fill_rect(buffer, width, knob_x.saturating_sub(4), track.top, 9, track.height, TEXT_COLOR);

    draw_text(buffer, width, text_left, panel.top + 62, "STROKE COLOR", TEXT_COLOR);
    draw_text(buffer, width, text_left, panel.top + 118, "BACKGROUND", TEXT_COLOR);
    for (index, color) in PALETTE.iter().enumerate() {
        draw_swatch(
            buffer,
            width,
            layout.stroke_swatch_rect(index),
            *color,
            *color == brush.stroke_color,
        );
        draw_swatch(
            buffer,
            width,
            layout.background_swatch_rect(index),
            *color,
            *color == brush.background_color,
        );
    }

    draw_text(buffer, width, text_left, panel.top + 174, "API KEY", TEXT_COLOR);
    let field = layout.credential_rect();
    let focused = view.focus == Focus::CredentialField;
    fill_rect(buffer, width, field.left, field.top, field.width, field.height, 0xFFFFFF);
    draw_rect(
        buffer,
        width,
        field.left,
        field.top,
        field.width,
        field.height,
        if focused { ACCENT_COLOR } else { MUTED_TEXT_COLOR },
    );
    let columns = (field.width - 16) / GLYPH_SIZE;
    let masked = mask_secret(view.credential_len, columns.saturating_sub(1));
    if masked.is_empty() && !focused {
        draw_text(
            buffer,
            width,
            field.left + 8,
            field.top + 8,
            "click to enter key",
            MUTED_TEXT_COLOR,
        );
    } else {
        draw_text(buffer, width, field.left + 8, field.top + 8, &masked, INK_COLOR);
        if focused {
            let cursor_x = field.left + 8 + masked.len() * GLYPH_SIZE;
            fill_rect(buffer, width, cursor_x, field.top + 6, 2, 12, INK_COLOR);
        }
    }

    let buttons = [
        (layout.analyze_rect(), "ANALYZE", Control::AnalyzeButton, true),
        (layout.clear_rect(), "CLEAR", Control::ClearButton, false),
        (layout.undo_rect(), "UNDO", Control::UndoButton, false),
    ];
    for (rect, label, control, primary) in buttons {
        let hovered = view.hovered == Some(control);
        draw_button(buffer, width, rect, label, hovered, primary);
    }

    let hints_top = layout.undo_rect().bottom() + 20;
    let hints = [
        "ENTER  analyze",
        "C      clear canvas",
        "U      undo stroke",
        "ESC    quit",
    ];
    for (index, hint) in hints.iter().enumerate() {
        let top = hints_top + index * LINE_HEIGHT;
        draw_text(buffer, width, text_left, top, hint, MUTED_TEXT_COLOR);
    }
}

fn draw_swatch(buffer: &mut [u32], width: usize, rect: Rect, color: Color, selected: bool) {
    fill_rect(buffer, width, rect.left, rect.top, rect.width, rect.height, color.to_rgb_u32());
    let outline = if selected { ACCENT_COLOR } else { lighten_color(PANEL_COLOR, 40) };
    draw_rect(buffer, width, rect.left, rect.top, rect.width, rect.height, outline);
    if selected {
        draw_rect(
            buffer,
            width,
            rect.left + 1,
            rect.top + 1,
            rect.width - 2,
            rect.height - 2,
            outline,
        );
    }
}

fn draw_button(
    buffer: &mut [u32],
    width: usize,
    rect: Rect,
    label: &str,
    hovered: bool,
    primary: bool,
) {
    let base = if primary { ACCENT_COLOR } else { lighten_color(PANEL_COLOR, 36) };
    let fill = if hovered { lighten_color(base, 24) } else { base };
    fill_rect(buffer, width, rect.left, rect.top, rect.width, rect.height, fill);
    let text_width = label.chars().count() * GLYPH_SIZE;
    let text_left = rect.left + rect.width.saturating_sub(text_width) / 2;
    let text_color = if primary { INK_COLOR } else { TEXT_COLOR };
    let text_top = rect.top + (rect.height - GLYPH_SIZE) / 2;
    draw_text(buffer, width, text_left, text_top, label, text_color);
}

fn fill_rect(
    buffer: &mut [u32],
    width: usize,
    left: usize,
    top: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    for y in top..top + h {
        for x in left..left + w {
            set_pixel(buffer, width, x, y, color);
        }
    }
}

fn draw_rect(
    buffer: &mut [u32],
    width: usize,
    left: usize,
    top: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    if w == 0 || h == 0 {
        return;
    }
    for x in left..left + w {
        set_pixel(buffer, width, x, top, color);
        set_pixel(buffer, width, x, top + h - 1, color);
    }
    for y in top..top + h {
        set_pixel(buffer, width, left, y, color);
        set_pixel(buffer, width, left + w - 1, y, color);
    }
}

fn lerp_color(start: u32, end: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let a = ((start >> shift) & 0xFF) as f32;
        let b = ((end >> shift) & 0xFF) as f32;
        ((a + (b - a) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

fn darken_color(color: u32, amount: u8) -> u32 {
    map_channels(color, |value| value.saturating_sub(amount))
}

fn lighten_color(color: u32, amount: u8) -> u32 {
    map_channels(color, |value| value.saturating_add(amount))
}

fn map_channels(color: u32, map: impl Fn(u8) -> u8) -> u32 {
    let r = map(((color >> 16) & 0xFF) as u8) as u32;
    let g = map(((color >> 8) & 0xFF) as u8) as u32;
    let b = map((color & 0xFF) as u8) as u32;
    (r << 16) | (g << 8) | b
}

fn set_pixel(buffer: &mut [u32], width: usize, x: usize, y: usize, color: u32) {
    let height = buffer.len() / width;
    if x < width && y < height {
        buffer[y * width + x] = color;
    }
}

fn draw_text(buffer: &mut [u32], width: usize, x: usize, y: usize, text: &str, color: u32) {
    let mut cursor_x = x;
    for ch in text.chars() {
        if ch == '\n' {
            continue;
        }
        draw_char(buffer, width, cursor_x, y, ch, color);
        cursor_x = cursor_x.saturating_add(GLYPH_SIZE);
    }
}

fn draw_char(buffer: &mut [u32], width: usize, x: usize, y: usize, ch: char, color: u32) {
    let glyph = font8x8::BASIC_FONTS.get(ch).unwrap_or([0; 8]);
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8 {
            if (bits >> col) & 1 == 1 {
                set_pixel(buffer, width, x + col, y + row, color);
            }
        }
    }
}
