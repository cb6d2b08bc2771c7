//! # Foamlift GUI Application
//!
//! Single-page estimator: inputs in a sidebar, results on the right, and a
//! warehouse connection check underneath. Built with Iced.

mod ui;

use std::path::PathBuf;

use iced::widget::{column, row, rule};
use iced::{Element, Length, Task};
use tracing_subscriber::EnvFilter;

use lift_core::config::{resolve_secrets_path, AppConfig};
use lift_core::{EstimateInput, EstimateResult, InputForm, SettledSides};
use lift_warehouse::SmokeReport;

/// Window title and page heading
pub const APP_TITLE: &str = "Concrete Lifting Polyfoam Cost Estimator";

pub fn main() -> iced::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    iced::application(App::new, App::update, App::view)
        .title(APP_TITLE)
        .window_size((980.0, 640.0))
        .run()
}

/// Progress of the warehouse connection check
#[derive(Debug, Clone)]
pub enum SmokeState {
    Idle,
    Running,
    Finished(SmokeReport),
    /// The secrets file could not be read
    ConfigError(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Inputs
    WidthChanged(String),
    LengthChanged(String),
    SidesSelected(SettledSides),
    SettlementChanged(String),
    PriceChanged(String),

    // Actions
    Calculate,
    ToggleSample,
    LoadSample,

    // Warehouse
    TestConnection,
    SmokeTestFinished(SmokeReport),
}

pub struct App {
    pub config: AppConfig,
    pub secrets_path: PathBuf,
    pub form: InputForm,
    /// Result of the last successful "Calculate Estimate"
    pub result: Option<EstimateResult>,
    pub error_message: Option<String>,
    /// Form field named by the last validation error
    pub invalid_field: Option<String>,
    pub show_sample: bool,
    pub smoke: SmokeState,
    pub status: String,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let secrets_path = resolve_secrets_path(None);
        let (config, status) = match AppConfig::load(&secrets_path) {
            Ok(config) => (config, "Ready".to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "using default settings");
                (AppConfig::default(), format!("Settings not loaded: {}", e))
            }
        };

        let mut app = App::with_config(config, secrets_path);
        app.status = status;
        (app, Task::none())
    }

    pub fn with_config(config: AppConfig, secrets_path: PathBuf) -> Self {
        App {
            config,
            secrets_path,
            form: InputForm::default(),
            result: None,
            error_message: None,
            invalid_field: None,
            show_sample: false,
            smoke: SmokeState::Idle,
            status: "Ready".to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WidthChanged(value) => self.edit(|form| form.width_ft = value),
            Message::LengthChanged(value) => self.edit(|form| form.length_ft = value),
            Message::SidesSelected(sides) => self.edit(|form| form.settled_sides = sides),
            Message::SettlementChanged(value) => self.edit(|form| form.settlement_in = value),
            Message::PriceChanged(value) => self.edit(|form| form.price_per_lb = value),

            Message::Calculate => self.calculate(),
            Message::ToggleSample => self.show_sample = !self.show_sample,
            Message::LoadSample => {
                self.form = InputForm::from_input(&EstimateInput::sample());
                self.calculate();
            }

            Message::TestConnection => return self.start_smoke_test(),
            Message::SmokeTestFinished(report) => {
                self.status = report.summary();
                self.smoke = SmokeState::Finished(report);
            }
        }
        Task::none()
    }

    /// Apply a form edit. Results only describe the inputs they were calculated from.
    fn edit(&mut self, change: impl FnOnce(&mut InputForm)) {
        change(&mut self.form);
        self.result = None;
        self.error_message = None;
        self.invalid_field = None;
    }

    fn calculate(&mut self) {
        match self.form.parse() {
            Ok(input) => {
                let result = input.estimate();
                tracing::info!(?input, total_cost = result.total_cost, "estimate calculated");
                self.result = Some(result);
                self.error_message = None;
                self.invalid_field = None;
                self.status = "Estimate updated".to_string();
            }
            Err(e) => {
                self.result = None;
                self.invalid_field = e.field().map(str::to_string);
                self.error_message = Some(e.to_string());
                self.status = "Check the highlighted input".to_string();
            }
        }
    }

    fn start_smoke_test(&mut self) -> Task<Message> {
        if matches!(self.smoke, SmokeState::Running) {
            return Task::none();
        }

        // Re-read so edits to the secrets file apply without a restart
        match AppConfig::load(&self.secrets_path) {
            Ok(config) => self.config = config,
            Err(e) => {
                self.smoke = SmokeState::ConfigError(e.to_string());
                self.status = "Secrets file could not be read".to_string();
                return Task::none();
            }
        }

        self.smoke = SmokeState::Running;
        self.status = "Testing warehouse connection...".to_string();
        Task::perform(
            lift_warehouse::run_smoke_test(self.config.clone()),
            Message::SmokeTestFinished,
        )
    }

    fn view(&self) -> Element<'_, Message> {
        let body = row![
            ui::input_panel::view_input_panel(self),
            column![
                ui::results_panel::view_results_panel(self),
                ui::warehouse_panel::view_warehouse_panel(self),
            ]
            .spacing(6)
            .width(Length::Fill),
        ]
        .spacing(6)
        .height(Length::Fill);

        column![
            ui::header::view_header(),
            rule::horizontal(1),
            body,
            rule::horizontal(1),
            ui::status_bar::view_status_bar(&self.status),
        ]
        .spacing(6)
        .padding(10)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_config(AppConfig::default(), PathBuf::from("/nonexistent/secrets.toml"))
    }

    #[test]
    fn test_calculate_defaults() {
        let mut app = app();
        let _ = app.update(Message::Calculate);

        let result = app.result.expect("default form should calculate");
        assert_eq!(result.total_cost, 150.0);
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_invalid_input_flags_field() {
        let mut app = app();
        let _ = app.update(Message::PriceChanged("0".to_string()));
        let _ = app.update(Message::Calculate);

        assert!(app.result.is_none());
        assert_eq!(app.invalid_field.as_deref(), Some("price_per_lb"));
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_edit_clears_result() {
        let mut app = app();
        let _ = app.update(Message::Calculate);
        let _ = app.update(Message::SidesSelected(SettledSides::One));
        assert!(app.result.is_none());

        let _ = app.update(Message::Calculate);
        assert_eq!(app.result.map(|r| r.factor), Some(0.5));
    }

    #[test]
    fn test_edit_clears_stale_error() {
        let mut app = app();
        let _ = app.update(Message::WidthChanged("abc".to_string()));
        let _ = app.update(Message::Calculate);
        assert_eq!(app.invalid_field.as_deref(), Some("width_ft"));

        let _ = app.update(Message::WidthChanged("12".to_string()));
        assert!(app.invalid_field.is_none());
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_load_sample() {
        let mut app = app();
        let _ = app.update(Message::WidthChanged("33".to_string()));
        let _ = app.update(Message::LoadSample);

        assert_eq!(app.form, InputForm::default());
        assert_eq!(app.result.map(|r| r.pounds), Some(75.0));
    }

    #[test]
    fn test_smoke_test_without_credentials_starts() {
        let mut app = app();
        let _ = app.update(Message::TestConnection);
        assert!(matches!(app.smoke, SmokeState::Running));
    }
}
