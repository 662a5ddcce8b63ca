/*!
 * Desktop dashboard for unidash - universities per country
 *
 * One window with:
 * - A country dropdown
 * - The university table
 * - A pie chart of universities per state
 * - A "Download Chart as PDF" button
 *
 * Platform support: Windows, macOS, Linux
 */

use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use unidash::api::DEFAULT_BASE_URL;
use unidash::dashboard::{FetchOutcome, FetchTicket};
use unidash::{
    Client, Country, Dashboard, DashboardConfig, FetchError, University, export, table,
};

#[derive(Parser, Debug)]
#[command(name = "unidash-gui", version, about = "Universities dashboard")]
struct GuiArgs {
    /// Base URL of the universities service.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// TTF font used for chart labels.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Folder the PDF is saved to (default: the user's download folder).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Enable logging for better debugging
    env_logger::init();
    let args = GuiArgs::parse();

    let config = DashboardConfig {
        base_url: args.base_url,
        font_path: args.font,
        ..DashboardConfig::default()
    };
    // A chart that cannot be drawn is fatal, before any window opens.
    let dashboard = Dashboard::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Universities - unidash"),
        ..Default::default()
    };

    eframe::run_native(
        "Universities",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(UniApp::new(
                dashboard,
                Client::new(config.base_url),
                args.out_dir,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}

type FetchReply = (FetchTicket, Result<Vec<University>, FetchError>);

/// Main application state
struct UniApp {
    dashboard: Dashboard,
    client: Client,
    /// Dropdown value; compared against the dashboard's country after each frame.
    selected: Country,
    out_dir: Option<PathBuf>,

    // Table cell texts, rebuilt only when a fetch is applied
    table_cells: Vec<[String; 5]>,

    // Chart texture, tagged with the chart id it was uploaded from
    chart_texture: Option<(u64, egui::TextureHandle)>,

    // UI state
    in_flight: usize,
    status_message: String,
    error_message: String,

    // Background fetches
    sender: mpsc::Sender<FetchReply>,
    receiver: mpsc::Receiver<FetchReply>,
}

impl UniApp {
    fn new(mut dashboard: Dashboard, client: Client, out_dir: Option<PathBuf>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let selected = dashboard.country();
        let ticket = dashboard.initial_request();
        let mut app = Self {
            dashboard,
            client,
            selected,
            out_dir,
            table_cells: Vec::new(),
            chart_texture: None,
            in_flight: 0,
            status_message: String::new(),
            error_message: String::new(),
            sender,
            receiver,
        };
        app.spawn_fetch(ticket);
        app
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        self.in_flight += 1;
        let client = self.client.clone();
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = client.fetch_universities(ticket.country());
            let _ = sender.send((ticket, result));
        });
    }

    fn check_fetch_results(&mut self) {
        while let Ok((ticket, result)) = self.receiver.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            match self.dashboard.apply(ticket, result) {
                Ok(FetchOutcome::Applied { .. }) => {
                    self.table_cells = table::cell_rows(self.dashboard.universities());
                }
                Ok(_) => {}
                Err(err) => {
                    log::error!("{}", err);
                    self.error_message = format!("Chart rendering failed: {}", err);
                }
            }
        }
    }

    fn download_pdf(&mut self) {
        let path = export::default_export_path(self.out_dir.as_deref());
        match self.dashboard.export_pdf(&path) {
            Ok(written) => {
                self.status_message = format!("Saved {}", written.display());
                self.error_message.clear();
            }
            Err(err) => {
                self.error_message = format!("Export failed: {:#}", err);
                self.status_message.clear();
            }
        }
    }

    fn chart_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let chart = self.dashboard.chart().current()?;
        let stale = self
            .chart_texture
            .as_ref()
            .is_none_or(|(id, _)| *id != chart.id());
        if stale {
            let canvas = chart.canvas()?;
            let image = egui::ColorImage::from_rgb(
                [canvas.width() as usize, canvas.height() as usize],
                canvas.pixels(),
            );
            // Replacing the handle frees the previous texture.
            let handle = ctx.load_texture("state-chart", image, egui::TextureOptions::LINEAR);
            self.chart_texture = Some((chart.id(), handle));
        }
        self.chart_texture.as_ref().map(|(_, h)| h.clone())
    }
}

impl eframe::App for UniApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch_results();

        // Keep polling while a worker is running
        if self.in_flight > 0 {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Universities");
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("Select Country:");
                    egui::ComboBox::from_id_salt("countrySelect")
                        .selected_text(self.selected.as_str())
                        .show_ui(ui, |ui| {
                            for c in Country::ALL {
                                ui.selectable_value(&mut self.selected, c, c.as_str());
                            }
                        });
                    if self.in_flight > 0 {
                        ui.spinner();
                    }
                });

                ui.add_space(10.0);

                egui::Grid::new("universities")
                    .striped(true)
                    .num_columns(table::HEADERS.len())
                    .show(ui, |ui| {
                        for h in table::HEADERS {
                            ui.strong(h);
                        }
                        ui.end_row();
                        for row in &self.table_cells {
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });

                ui.add_space(15.0);

                if let Some(texture) = self.chart_texture(ui.ctx()) {
                    ui.image(&texture);
                }

                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Download Chart as PDF").clicked() {
                        self.download_pdf();
                    }
                    if ui.button("Folder…").clicked()
                        && let Some(path) = rfd::FileDialog::new().pick_folder()
                    {
                        self.out_dir = Some(path);
                    }
                    let target = export::default_export_path(self.out_dir.as_deref());
                    ui.weak(target.display().to_string());
                });

                // Status messages
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }

                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });
        });

        // One fetch per actual change of the dropdown, not per frame
        if let Some(ticket) = self.dashboard.select_country(self.selected) {
            self.spawn_fetch(ticket);
        }
    }
}
