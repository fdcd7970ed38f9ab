//! Greedy word wrap with mixed-font atomic tokens.
//!
//! Layout never touches a rasterizer. It asks a [`TextMeasure`] for advances, decides line
//! breaks, and produces a [`TextBlock`] of positioned runs; the compositor then draws every run
//! with the font role it carries.

use crate::foundation::error::{BadgeError, BadgeResult};

/// Which of the two configured fonts a run is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// The display font used for the sentence.
    Primary,
    /// The system-style font used for glyphs the display font renders poorly.
    Fallback,
}

/// Source of horizontal advances for a string in a given font.
pub trait TextMeasure {
    /// Advance width in pixels of `text` set in `font` at `size_px`.
    fn advance(&mut self, text: &str, font: FontRole, size_px: f32) -> BadgeResult<f64>;
}

/// A token that is split across two fonts but wraps as one unit.
///
/// `"Web3"` with `primary_len = 3` draws `"Web"` in the primary font and `"3"` in the fallback.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SplitToken {
    /// Literal to look for inside each word.
    pub token: String,
    /// Byte length of the prefix kept in the primary font.
    pub primary_len: usize,
}

impl Default for SplitToken {
    fn default() -> Self {
        Self {
            token: "Web3".to_string(),
            primary_len: 3,
        }
    }
}

impl SplitToken {
    /// Reject tokens whose split point is not a char boundary strictly inside the token.
    pub fn validate(&self) -> BadgeResult<()> {
        if self.token.is_empty() {
            return Err(BadgeError::validation("split token must be non-empty"));
        }
        if self.primary_len == 0
            || self.primary_len >= self.token.len()
            || !self.token.is_char_boundary(self.primary_len)
        {
            return Err(BadgeError::validation(format!(
                "split point {} is not inside token '{}'",
                self.primary_len, self.token
            )));
        }
        Ok(())
    }
}

/// One contiguous piece of text in a single font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Text content.
    pub text: String,
    /// Font the text is measured and drawn with.
    pub font: FontRole,
}

/// Ordered segments of one atomic unit (a whitespace-delimited word).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextRun {
    /// Segments in reading order.
    pub segments: Vec<Segment>,
}

impl TextRun {
    /// Split `word` into font segments: every occurrence of the split token becomes a primary
    /// prefix followed by a fallback suffix, everything else stays primary.
    pub fn from_word(word: &str, rule: &SplitToken) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut push = |text: &str, font: FontRole| {
            if text.is_empty() {
                return;
            }
            if let Some(prev) = segments.last_mut().filter(|s| s.font == font) {
                prev.text.push_str(text);
            } else {
                segments.push(Segment {
                    text: text.to_string(),
                    font,
                });
            }
        };

        let mut rest = word;
        while let Some(at) = rest.find(&rule.token) {
            push(&rest[..at], FontRole::Primary);
            let token = &rest[at..at + rule.token.len()];
            push(&token[..rule.primary_len], FontRole::Primary);
            push(&token[rule.primary_len..], FontRole::Fallback);
            rest = &rest[at + rule.token.len()..];
        }
        push(rest, FontRole::Primary);

        Self { segments }
    }

    /// The unit's text with segment boundaries removed.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Wrapping and placement parameters, all in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextLayoutParams {
    /// Maximum line width.
    pub max_width: f64,
    /// Font size for both font roles.
    pub font_size: f32,
    /// Line advance as a multiple of the font size.
    pub line_height_ratio: f64,
    /// Horizontal centre every line is centred on.
    pub center_x: f64,
    /// Baseline of the first line.
    pub top_y: f64,
}

impl TextLayoutParams {
    /// Line advance in pixels.
    pub fn line_height(&self) -> f64 {
        f64::from(self.font_size) * self.line_height_ratio
    }

    fn validate(&self) -> BadgeResult<()> {
        if !self.max_width.is_finite() || self.max_width <= 0.0 {
            return Err(BadgeError::layout("max_width must be finite and > 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(BadgeError::layout("font_size must be finite and > 0"));
        }
        if !self.line_height_ratio.is_finite() || self.line_height_ratio <= 0.0 {
            return Err(BadgeError::layout("line_height_ratio must be finite and > 0"));
        }
        Ok(())
    }
}

/// A segment with its final horizontal position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRun {
    /// Text content.
    pub text: String,
    /// Font the run is drawn with.
    pub font: FontRole,
    /// Left edge of the run.
    pub x: f64,
    /// Measured advance of the run.
    pub width: f64,
}

/// One wrapped line.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    /// Words of the line joined by single spaces.
    pub text: String,
    /// Vertical offset from the first line's baseline.
    pub y_offset: f64,
    /// Total measured width including inter-word spaces.
    pub width: f64,
    /// Positioned runs, left to right.
    pub runs: Vec<PlacedRun>,
}

impl LayoutLine {
    /// Left edge of the line.
    pub fn start_x(&self) -> f64 {
        self.runs.first().map(|r| r.x).unwrap_or_default()
    }

    /// Horizontal centre of the line's ink box.
    pub fn center_x(&self) -> f64 {
        self.start_x() + self.width / 2.0
    }
}

/// A fully positioned block of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Font size every run is set at.
    pub font_size: f32,
    /// Baseline of the first line.
    pub top_y: f64,
    /// Lines in order.
    pub lines: Vec<LayoutLine>,
}

impl TextBlock {
    /// Absolute baseline of `line`.
    pub fn baseline(&self, line: &LayoutLine) -> f64 {
        self.top_y + line.y_offset
    }

    /// `(line_text, y_offset)` pairs.
    pub fn line_offsets(&self) -> Vec<(String, f64)> {
        self.lines
            .iter()
            .map(|l| (l.text.clone(), l.y_offset))
            .collect()
    }
}

struct MeasuredRun {
    run: TextRun,
    widths: Vec<f64>,
    width: f64,
}

fn measure_run(
    measure: &mut dyn TextMeasure,
    run: TextRun,
    font_size: f32,
) -> BadgeResult<MeasuredRun> {
    let mut widths = Vec::with_capacity(run.segments.len());
    for seg in &run.segments {
        let w = measure.advance(&seg.text, seg.font, font_size)?;
        if !w.is_finite() || w < 0.0 {
            return Err(BadgeError::layout(format!(
                "measured advance for '{}' is invalid: {w}",
                seg.text
            )));
        }
        widths.push(w);
    }
    let width = widths.iter().sum();
    Ok(MeasuredRun { run, widths, width })
}

/// Greedy-wrap `text` and position every run.
///
/// Words accumulate on a line while the line's measured width stays within `max_width`. A word
/// is never split, so a single over-wide word occupies a line on its own.
pub fn layout_text(
    measure: &mut dyn TextMeasure,
    text: &str,
    params: &TextLayoutParams,
    rule: &SplitToken,
) -> BadgeResult<TextBlock> {
    params.validate()?;
    rule.validate()?;

    let space = measure.advance(" ", FontRole::Primary, params.font_size)?;
    if !space.is_finite() || space < 0.0 {
        return Err(BadgeError::layout(format!("space advance is invalid: {space}")));
    }

    let mut measured = Vec::new();
    for word in text.split_whitespace() {
        measured.push(measure_run(
            measure,
            TextRun::from_word(word, rule),
            params.font_size,
        )?);
    }

    let mut wrapped: Vec<Vec<MeasuredRun>> = Vec::new();
    let mut current: Vec<MeasuredRun> = Vec::new();
    let mut current_width = 0.0;
    for m in measured {
        if current.is_empty() {
            current_width = m.width;
            current.push(m);
            continue;
        }
        let candidate = current_width + space + m.width;
        if candidate <= params.max_width {
            current_width = candidate;
            current.push(m);
        } else {
            wrapped.push(std::mem::take(&mut current));
            current_width = m.width;
            current.push(m);
        }
    }
    if !current.is_empty() {
        wrapped.push(current);
    }

    let line_height = params.line_height();
    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, words)| place_line(words, space, params.center_x, i as f64 * line_height))
        .collect();

    Ok(TextBlock {
        font_size: params.font_size,
        top_y: params.top_y,
        lines,
    })
}

fn place_line(words: Vec<MeasuredRun>, space: f64, center_x: f64, y_offset: f64) -> LayoutLine {
    let gaps = words.len().saturating_sub(1) as f64;
    let width = words.iter().map(|w| w.width).sum::<f64>() + gaps * space;

    let mut x = center_x - width / 2.0;
    let mut runs = Vec::new();
    let mut text = String::new();
    for (i, word) in words.into_iter().enumerate() {
        if i > 0 {
            x += space;
            text.push(' ');
        }
        text.push_str(&word.run.text());
        for (seg, w) in word.run.segments.into_iter().zip(word.widths) {
            runs.push(PlacedRun {
                text: seg.text,
                font: seg.font,
                x,
                width: w,
            });
            x += w;
        }
    }

    LayoutLine {
        text,
        y_offset,
        width,
        runs,
    }
}

/// Wrap `text` and return only `(line_text, y_offset)` pairs, centred on `x = 0`.
pub fn wrap_lines(
    measure: &mut dyn TextMeasure,
    text: &str,
    max_width: f64,
    font_size: f32,
) -> BadgeResult<Vec<(String, f64)>> {
    let params = TextLayoutParams {
        max_width,
        font_size,
        line_height_ratio: 1.25,
        center_x: 0.0,
        top_y: 0.0,
    };
    Ok(layout_text(measure, text, &params, &SplitToken::default())?.line_offsets())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
