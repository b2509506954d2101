use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where element styles end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// `style` attribute on each element
    #[default]
    Inline,
    /// Generated class per element plus a `<style>` block
    Classname,
}

/// Attribute naming convention of the target markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeDialect {
    /// Plain HTML
    #[default]
    Default,
    /// JSX: `className`, and object-literal inline styles
    #[serde(alias = "react")]
    Jsx,
}

impl AttributeDialect {
    pub fn class_attribute(&self) -> &'static str {
        match self {
            AttributeDialect::Default => "class",
            AttributeDialect::Jsx => "className",
        }
    }
}

impl FromStr for StyleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(StyleMode::Inline),
            "classname" => Ok(StyleMode::Classname),
            _ => Err(format!("Unknown style mode: {}. Use: inline or classname", s)),
        }
    }
}

impl FromStr for AttributeDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "html" => Ok(AttributeDialect::Default),
            "jsx" | "react" => Ok(AttributeDialect::Jsx),
            _ => Err(format!("Unknown attribute dialect: {}. Use: default or jsx", s)),
        }
    }
}

/// Options for markup compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Spaces before every line, on top of nesting
    pub base_indent_offset: usize,
    /// Spaces added per nesting level
    pub indent_step: usize,
    pub style_mode: StyleMode,
    pub attribute_dialect: AttributeDialect,
    /// Emit the `<style>` block in classname mode
    pub style_block: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            base_indent_offset: 0,
            indent_step: 2,
            style_mode: StyleMode::Inline,
            attribute_dialect: AttributeDialect::Default,
            style_block: true,
        }
    }
}
