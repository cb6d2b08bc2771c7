//! Results Panel (Right Side)
//!
//! Shows, in order of precedence:
//! - the last validation error
//! - the estimate metrics (two columns, then the total cost)
//! - a hint to fill in the sidebar
//!
//! followed by the collapsible sample case.

use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{Element, Length, Padding};

use lift_core::report::{EstimateReport, Metric, DISCLAIMER};
use lift_core::EstimateInput;

use crate::{App, Message};
use super::{ERROR, MUTED};

/// Render the results panel
pub fn view_results_panel(app: &App) -> Element<'_, Message> {
    let content: Column<'_, Message> = if let Some(ref error) = app.error_message {
        column![
            text("Error").size(14),
            Space::new().height(8),
            text(error).size(12).color(ERROR),
        ]
    } else if let Some(ref result) = app.result {
        let report = EstimateReport::new(result, &app.config.display);
        view_report(&report)
    } else {
        column![text("Enter values in the sidebar and click 'Calculate Estimate' to see results.")
            .size(12)
            .color(MUTED)]
    };

    let content = content
        .push(Space::new().height(15))
        .push(view_sample(app.show_sample));

    container(scrollable(content.padding(8)))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_report<'a>(report: &EstimateReport) -> Column<'a, Message> {
    let [area, avg_settlement] = report.left_column();
    let [volume, pounds] = report.right_column();

    let columns = row![
        column![view_metric(area), view_metric(avg_settlement)]
            .spacing(12)
            .width(Length::FillPortion(1)),
        column![view_metric(volume), view_metric(pounds)]
            .spacing(12)
            .width(Length::FillPortion(1)),
    ]
    .spacing(12);

    column![
        text("Estimation Results").size(16),
        Space::new().height(10),
        columns,
        Space::new().height(12),
        view_metric(&report.total_cost),
        Space::new().height(12),
        text(DISCLAIMER).size(10).color(MUTED),
    ]
}

fn view_metric<'a>(metric: &Metric) -> Element<'a, Message> {
    column![
        text(metric.label).size(11).color(MUTED),
        text(metric.value.clone()).size(22),
    ]
    .spacing(2)
    .into()
}

/// Collapsible "Try This Sample" section
fn view_sample<'a>(expanded: bool) -> Element<'a, Message> {
    let marker = if expanded { "▼" } else { "▶" };
    let header = button(text(format!("{} {}", marker, EstimateInput::SAMPLE_DESCRIPTION)).size(11))
        .on_press(Message::ToggleSample)
        .padding(Padding::from([4, 8]))
        .width(Length::Fill)
        .style(button::secondary);

    if !expanded {
        return header.into();
    }

    column![
        header,
        container(
            column![
                text(EstimateInput::SAMPLE_EXPECTATION).size(11),
                button(text("Load sample").size(10))
                    .on_press(Message::LoadSample)
                    .padding(Padding::from([4, 8]))
                    .style(button::primary),
            ]
            .spacing(6)
        )
        .padding(8),
    ]
    .into()
}
