//! Warehouse Panel
//!
//! On-demand connection check against the warehouse configured in the
//! secrets file. Runs in the background; the estimator stays usable.

use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use lift_warehouse::{SmokeStep, StepStatus};

use crate::{App, Message, SmokeState};
use super::{ERROR, MUTED, SUCCESS};

/// Render the warehouse connection panel
pub fn view_warehouse_panel(app: &App) -> Element<'_, Message> {
    let running = matches!(app.smoke, SmokeState::Running);
    let button_label = if running { "Testing..." } else { "Test Connection" };

    let header = row![
        text("Warehouse Connection").size(14),
        Space::new().width(Length::Fill),
        button(text(button_label).size(11))
            .on_press_maybe((!running).then_some(Message::TestConnection))
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .align_y(Alignment::Center);

    let body: Column<'_, Message> = match &app.smoke {
        SmokeState::Idle => column![text(format!(
            "Credentials are read from {}",
            app.secrets_path.display()
        ))
        .size(10)
        .color(MUTED)],
        SmokeState::Running => column![text("Connecting to the warehouse...").size(11)],
        SmokeState::ConfigError(error) => column![text(error).size(11).color(ERROR)],
        SmokeState::Finished(report) => {
            let summary_color = if report.succeeded() { SUCCESS } else { ERROR };
            report
                .steps
                .iter()
                .fold(column![text(report.summary()).size(12).color(summary_color)], |col, step| {
                    col.push(view_step(step))
                })
                .push(
                    text(format!(
                        "Finished {} in {} ms",
                        report.finished_at.format("%H:%M:%S UTC"),
                        report.elapsed().num_milliseconds()
                    ))
                    .size(10)
                    .color(MUTED),
                )
                .spacing(2)
        }
    };

    container(column![header, Space::new().height(6), body])
        .width(Length::Fill)
        .style(container::bordered_box)
        .padding(10)
        .into()
}

fn view_step(step: &SmokeStep) -> Element<'_, Message> {
    let color = match step.status {
        StepStatus::Passed(_) => SUCCESS,
        StepStatus::Failed(_) => ERROR,
        StepStatus::Skipped => MUTED,
    };
    text(step.to_string()).size(10).color(color).into()
}
