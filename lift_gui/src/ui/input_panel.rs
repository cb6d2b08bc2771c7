//! Input Panel (Left Sidebar)
//!
//! The five estimate inputs and the "Calculate Estimate" button. A field
//! named by the last validation error has its label shown in red.

use iced::widget::{button, column, container, pick_list, scrollable, text, text_input, Column, Space};
use iced::{Element, Length, Padding};

use lift_core::SettledSides;

use crate::{App, Message};

/// Sidebar width in pixels
const SIDEBAR_WIDTH: f32 = 270.0;

/// Render the input sidebar
pub fn view_input_panel(app: &App) -> Element<'_, Message> {
    let invalid = app.invalid_field.as_deref();

    let sides_picker = column![
        field_label("How many sides of the slab have settled", invalid == Some("settled_sides")),
        pick_list(
            &SettledSides::ALL[..],
            Some(app.form.settled_sides),
            Message::SidesSelected
        )
        .width(Length::Fill)
        .text_size(11),
    ]
    .spacing(2);

    let panel: Column<'_, Message> = column![
        text("Inputs").size(14),
        Space::new().height(8),
        labeled_input(
            "Width of slab (feet)",
            "10.0",
            &app.form.width_ft,
            invalid == Some("width_ft"),
            Message::WidthChanged
        ),
        labeled_input(
            "Length of slab (feet)",
            "10.0",
            &app.form.length_ft,
            invalid == Some("length_ft"),
            Message::LengthChanged
        ),
        sides_picker,
        labeled_input(
            "Settlement at lowest point (inches)",
            "1.0",
            &app.form.settlement_in,
            invalid == Some("settlement_in"),
            Message::SettlementChanged
        ),
        labeled_input(
            "Price per pound of polyfoam ($)",
            "2.00",
            &app.form.price_per_lb,
            invalid == Some("price_per_lb"),
            Message::PriceChanged
        ),
        Space::new().height(10),
        button(text("Calculate Estimate").size(12))
            .on_press(Message::Calculate)
            .padding(Padding::from([6, 12]))
            .width(Length::Fill)
            .style(button::primary),
    ]
    .spacing(6);

    container(scrollable(panel.padding(8)))
        .width(Length::Fixed(SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn field_label(label: &str, invalid: bool) -> Element<'_, Message> {
    let label = text(label).size(11);
    if invalid {
        label.color(super::ERROR).into()
    } else {
        label.into()
    }
}

/// Label above a text input
fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    invalid: bool,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    column![
        field_label(label, invalid),
        text_input(placeholder, value)
            .on_input(on_change)
            .on_submit(Message::Calculate)
            .width(Length::Fill)
            .padding(4)
            .size(11),
    ]
    .spacing(2)
    .into()
}
