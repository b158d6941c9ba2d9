//! Output styling for the text report.
//!
//! Styles are only applied when stdout supports color, so piped output and
//! test captures stay plain text.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream, Style};
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Modify, Style as TableStyle, object::Rows},
};

/// Styles for output text.
pub struct Styles;

impl Styles {
    pub fn header() -> Style {
        Style::new().bold()
    }

    pub fn label() -> Style {
        Style::new().cyan()
    }

    pub fn value() -> Style {
        Style::new().green()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn error() -> Style {
        Style::new().red()
    }
}

fn styled<T: Display>(v: T, style: Style) -> String {
    v.if_supports_color(Stream::Stdout, |text| text.style(style))
        .to_string()
}

/// Format a value with label styling.
pub fn label<T: Display>(v: T) -> String {
    styled(v, Styles::label())
}

/// Format a value with value styling.
pub fn value<T: Display>(v: T) -> String {
    styled(v, Styles::value())
}

/// Format a value with header styling.
pub fn header<T: Display>(v: T) -> String {
    styled(v, Styles::header())
}

/// Format a value with dim styling.
pub fn dim<T: Display>(v: T) -> String {
    styled(v, Styles::dim())
}

/// Format a value with error styling.
pub fn error<T: Display>(v: T) -> String {
    styled(v, Styles::error())
}

/// Finish a table built row by row with rounded borders and a centered header.
pub fn rounded_table(builder: Builder) -> Table {
    let mut table = builder.build();
    table
        .with(TableStyle::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table
}
