use glam::Vec2;
use serde::Serialize;

// --- Color ---

/// RGBA color carried by entities and draw commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xFF }
    }

    /// Same color with a different alpha, used for translucent fills.
    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }
}

// --- Text alignment ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

// --- Drawing surface contract ---

/// Abstract 2D drawing surface. The core only issues draw calls through
/// this trait and never reads pixels back; the concrete surface (browser
/// canvas, GPU quad list, recording buffer) is supplied by the host.
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Clears the whole surface. Renderers call this before anything else.
    fn clear(&mut self);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    /// Dashed variant with a `[dash, gap]` pattern in pixels.
    fn draw_dashed_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32, dash: [f32; 2]);

    /// Stroked (outline only) circle.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// `size` is the font size in pixels; the font family is a theme
    /// concern owned by the host surface.
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, align: TextAlign, color: Color);
}

// --- Recording implementation ---

/// One recorded draw call. Sequences of these are compared in tests to
/// check render determinism, so everything derives PartialEq.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear,
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    DashedLine {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
        dash: [f32; 2],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
    FilledCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Headless surface that records every draw call in order. Used by the
/// runner (which has no real canvas) and by tests.
#[derive(Debug)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        RecordingCanvas {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands, leaving the canvas empty for the
    /// next frame.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_dashed_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32, dash: [f32; 2]) {
        self.commands.push(DrawCommand::DashedLine {
            from,
            to,
            color,
            width,
            dash,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            width,
        });
    }

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FilledCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
            align,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn records_commands_in_order() {
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        canvas.clear();
        canvas.draw_line(vec2(0.0, 0.0), vec2(10.0, 0.0), Color::rgb(1, 2, 3), 2.0);
        canvas.draw_filled_circle(vec2(5.0, 5.0), 8.0, Color::rgb(4, 5, 6));

        assert_eq!(canvas.commands().len(), 3);
        assert_eq!(canvas.commands()[0], DrawCommand::Clear);
        assert!(matches!(canvas.commands()[2], DrawCommand::FilledCircle { radius, .. } if radius == 8.0));
    }

    #[test]
    fn take_commands_drains_the_buffer() {
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        canvas.clear();
        let frame = canvas.take_commands();
        assert_eq!(frame.len(), 1);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn alpha_override_keeps_rgb() {
        let base = Color::rgb(0xDB, 0x45, 0x45);
        let fill = base.with_alpha(0x20);
        assert_eq!((fill.r, fill.g, fill.b, fill.a), (0xDB, 0x45, 0x45, 0x20));
    }
}
