//! Inline format directives and the style state they drive.
//!
//! A directive is the marker character (`§` by default) followed by one code
//! character. Directives always consume both characters; a marker at the very
//! end of a string is an ordinary character.

use std::str::Chars;

use bitflags::bitflags;
use sigil_render::Color;

use crate::font::VariantKind;

/// Text colors selected by codes `0` through `f`.
pub const PALETTE: [Color; 16] = [
    Color::from_rgb_u8(0, 0, 0),
    Color::from_rgb_u8(0, 0, 170),
    Color::from_rgb_u8(0, 170, 0),
    Color::from_rgb_u8(0, 170, 170),
    Color::from_rgb_u8(170, 0, 0),
    Color::from_rgb_u8(170, 0, 170),
    Color::from_rgb_u8(255, 170, 0),
    Color::from_rgb_u8(170, 170, 170),
    Color::from_rgb_u8(85, 85, 85),
    Color::from_rgb_u8(85, 85, 255),
    Color::from_rgb_u8(85, 255, 85),
    Color::from_rgb_u8(85, 255, 255),
    Color::from_rgb_u8(255, 85, 85),
    Color::from_rgb_u8(255, 85, 255),
    Color::from_rgb_u8(255, 255, 85),
    Color::from_rgb_u8(255, 255, 255),
];

/// Shadow colors paired with [`PALETTE`].
pub const SHADOW_PALETTE: [Color; 16] = [
    Color::from_rgb_u8(0, 0, 0),
    Color::from_rgb_u8(0, 0, 42),
    Color::from_rgb_u8(0, 42, 0),
    Color::from_rgb_u8(0, 42, 42),
    Color::from_rgb_u8(42, 0, 0),
    Color::from_rgb_u8(42, 0, 42),
    Color::from_rgb_u8(42, 42, 0),
    Color::from_rgb_u8(42, 42, 42),
    Color::from_rgb_u8(21, 21, 21),
    Color::from_rgb_u8(21, 21, 63),
    Color::from_rgb_u8(21, 63, 21),
    Color::from_rgb_u8(21, 63, 63),
    Color::from_rgb_u8(63, 21, 21),
    Color::from_rgb_u8(63, 21, 63),
    Color::from_rgb_u8(63, 63, 21),
    Color::from_rgb_u8(63, 63, 63),
];

/// The code character of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    /// `0`-`9`, `a`-`f`: palette index.
    Color(u8),
    /// `k`
    Obfuscated,
    /// `l`
    Bold,
    /// `m`
    Strikethrough,
    /// `n`
    Underline,
    /// `o`
    Italic,
    /// `r`
    Reset,
    /// Anything else. Behaves like [`FormatCode::Reset`].
    Unknown(char),
}

impl FormatCode {
    /// Every recognised code character, in palette/index order.
    pub const CODES: &'static str = "0123456789abcdefklmnor";

    /// Parse a code character, ignoring ASCII case.
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            d @ '0'..='9' => FormatCode::Color(d as u8 - b'0'),
            h @ 'a'..='f' => FormatCode::Color(h as u8 - b'a' + 10),
            'k' => FormatCode::Obfuscated,
            'l' => FormatCode::Bold,
            'm' => FormatCode::Strikethrough,
            'n' => FormatCode::Underline,
            'o' => FormatCode::Italic,
            'r' => FormatCode::Reset,
            _ => FormatCode::Unknown(c),
        }
    }

    /// The canonical (lowercase) code character.
    pub fn to_char(self) -> char {
        match self {
            FormatCode::Color(index) => char::from_digit(u32::from(index), 16).unwrap_or('f'),
            FormatCode::Obfuscated => 'k',
            FormatCode::Bold => 'l',
            FormatCode::Strikethrough => 'm',
            FormatCode::Underline => 'n',
            FormatCode::Italic => 'o',
            FormatCode::Reset => 'r',
            FormatCode::Unknown(c) => c,
        }
    }

    /// Whether this code returns the style to its baseline.
    pub fn is_reset(self) -> bool {
        matches!(self, FormatCode::Reset | FormatCode::Unknown(_))
    }
}

/// One step of a tokenized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Marker plus code, two characters.
    Directive(FormatCode),
    /// A literal character.
    Char(char),
}

/// Splits a string into directives and literal characters.
///
/// ```
/// use sigil_text::{FormatCode, FormatTokens, Token};
///
/// let tokens: Vec<_> = FormatTokens::new("§lA§", '§').collect();
/// assert_eq!(
///     tokens,
///     [
///         Token::Directive(FormatCode::Bold),
///         Token::Char('A'),
///         Token::Char('§'),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FormatTokens<'a> {
    chars: Chars<'a>,
    marker: char,
}

impl<'a> FormatTokens<'a> {
    pub fn new(text: &'a str, marker: char) -> Self {
        Self {
            chars: text.chars(),
            marker,
        }
    }
}

impl Iterator for FormatTokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let c = self.chars.next()?;
        if c == self.marker {
            if let Some(code) = self.chars.next() {
                return Some(Token::Directive(FormatCode::from_char(code)));
            }
        }
        Some(Token::Char(c))
    }
}

bitflags! {
    /// Decoration flags toggled by directives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const OBFUSCATED = 1 << 4;
    }
}

/// The style a pass starts from and returns to on reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleBaseline {
    pub color: Color,
    pub shadow_color: Color,
    /// Effective (already scaled) point size.
    pub point_size: f32,
}

impl StyleBaseline {
    pub fn new(color: Color, shadow_color: Color, point_size: f32) -> Self {
        Self {
            color,
            shadow_color,
            point_size,
        }
    }
}

/// What a directive changed, beyond the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// The new variant, if the directive switched it.
    pub variant: Option<VariantKind>,
    /// Whether the point size was restored to the baseline.
    pub restores_size: bool,
}

/// Style in effect at one position of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleState {
    flags: StyleFlags,
    text_color: Color,
    shadow_color: Color,
    variant: VariantKind,
    point_size: f32,
    baseline: StyleBaseline,
}

impl StyleState {
    pub fn new(baseline: StyleBaseline) -> Self {
        Self {
            flags: StyleFlags::empty(),
            text_color: baseline.color,
            shadow_color: baseline.shadow_color,
            variant: VariantKind::Regular,
            point_size: baseline.point_size,
            baseline,
        }
    }

    /// Apply one directive.
    pub fn apply(self, code: FormatCode) -> StyleState {
        self.step(code).0
    }

    /// Apply one directive and report what changed.
    pub fn step(self, code: FormatCode) -> (StyleState, Transition) {
        let next = match code {
            FormatCode::Color(index) => {
                let index = usize::from(index) & 0x0F;
                StyleState {
                    text_color: PALETTE[index],
                    shadow_color: SHADOW_PALETTE[index],
                    ..StyleState::new(self.baseline)
                }
            }
            FormatCode::Obfuscated => self.with_flag(StyleFlags::OBFUSCATED),
            FormatCode::Bold => StyleState {
                variant: VariantKind::Bold,
                ..self.with_flag(StyleFlags::BOLD)
            },
            FormatCode::Strikethrough => self.with_flag(StyleFlags::STRIKETHROUGH),
            FormatCode::Underline => self.with_flag(StyleFlags::UNDERLINE),
            FormatCode::Italic => self.with_flag(StyleFlags::ITALIC),
            FormatCode::Reset | FormatCode::Unknown(_) => StyleState::new(self.baseline),
        };

        let transition = Transition {
            variant: (next.variant != self.variant).then_some(next.variant),
            restores_size: matches!(code, FormatCode::Color(_)) || code.is_reset(),
        };
        (next, transition)
    }

    fn with_flag(self, flag: StyleFlags) -> Self {
        Self {
            flags: self.flags | flag,
            ..self
        }
    }

    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    pub fn is_bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }

    pub fn is_italic(&self) -> bool {
        self.flags.contains(StyleFlags::ITALIC)
    }

    pub fn is_underline(&self) -> bool {
        self.flags.contains(StyleFlags::UNDERLINE)
    }

    pub fn is_strikethrough(&self) -> bool {
        self.flags.contains(StyleFlags::STRIKETHROUGH)
    }

    pub fn is_obfuscated(&self) -> bool {
        self.flags.contains(StyleFlags::OBFUSCATED)
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn shadow_color(&self) -> Color {
        self.shadow_color
    }

    /// Color glyphs are drawn with in a shadow or a main pass.
    pub fn draw_color(&self, shadow: bool) -> Color {
        if shadow { self.shadow_color } else { self.text_color }
    }

    pub fn variant(&self) -> VariantKind {
        self.variant
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn baseline(&self) -> &StyleBaseline {
        &self.baseline
    }
}
