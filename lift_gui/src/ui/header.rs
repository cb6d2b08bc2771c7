//! Page header

use iced::widget::{column, text};
use iced::Element;

use crate::{Message, APP_TITLE};

/// Render the title and one-line introduction
pub fn view_header() -> Element<'static, Message> {
    column![
        text(APP_TITLE).size(24),
        text("Enter the slab details below to get an estimate. All calculations are based on standard industry formulas.")
            .size(12),
    ]
    .spacing(4)
    .into()
}
