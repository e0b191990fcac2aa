//! Cosmetic options shared by every chart.

use serde::Serialize;

/// The font size used for chart text unless configured otherwise.
pub const DEFAULT_FONT_SIZE: u32 = 10;

/// Styling merged into the options of every chart before it is drawn, so all
/// panels share the same background and font.
///
/// Serializes to an ECharts option fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStyle {
    /// The CSS colour painted behind the chart.
    pub background_color: String,
    /// The default text style of the chart.
    pub text_style: TextStyle,
}

/// The text style part of [GraphStyle].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: u32,
}

impl GraphStyle {
    /// The default style with a custom font size.
    pub fn with_font_size(font_size: u32) -> Self {
        Self {
            text_style: TextStyle { font_size },
            ..Self::default()
        }
    }
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            background_color: "rgba(0,0,0,0.9)".to_owned(),
            text_style: TextStyle {
                font_size: DEFAULT_FONT_SIZE,
            },
        }
    }
}
