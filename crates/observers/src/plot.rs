//! Plotting observer for watching a run unfold.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use heatloop_core::Observer;

/// How a [`PlotObserver`] window is drawn.
///
/// Start from [`ShowConfig::new`] and chain the options you need.
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Inlet drop").legend().x_label("time"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    x_label: Option<String>,
    y_label: Option<String>,
}

impl ShowConfig {
    /// No title, no legend, unlabeled axes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Labels each trace by its name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }
}

/// An event that knows where it lands on a plot.
///
/// Returning `None` from [`x`][Plottable::x] drops the whole event; `None` in
/// one slot of [`traces`][Plottable::traces] drops only that trace.
///
/// Simulation events implement `Plottable<4>` with the traces temperature,
/// setpoint, heater power and inlet temperature, plotted against time.
pub trait Plottable<const N: usize> {
    fn x(&self) -> Option<f64>;

    fn traces(&self) -> [Option<f64>; N];
}

impl Plottable<4> for heatloop_sim::Event {
    fn x(&self) -> Option<f64> {
        Some(self.time)
    }

    fn traces(&self) -> [Option<f64>; 4] {
        [
            Some(self.temperature),
            Some(self.controller.input.setpoint),
            Some(self.controller.output.output),
            Some(self.inlet_temperature),
        ]
    }
}

/// Collects `N` named traces during a run and shows them in an egui window.
///
/// Pass `&mut PlotObserver` straight to `Simulation::run_observed`, or call
/// [`record`][PlotObserver::record] from a closure for event types that do
/// not implement [`Plottable`], such as the tank integrator's events.
///
/// ```ignore
/// let mut obs = PlotObserver::new(["T", "setpoint", "Q", "T_in"]);
/// Simulation::new(Scenario::canonical())?.run_observed(&mut obs)?;
/// obs.show(ShowConfig::new().title("Canonical run").legend())?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records one point per trace at `x`, skipping `None` slots.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (points, y) in self.data.iter_mut().zip(traces) {
            if let Some(y) = y {
                points.push([x, y]);
            }
        }
    }

    /// Opens a window with every trace and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let ShowConfig {
            title,
            legend,
            x_label,
            y_label,
        } = config;
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title.unwrap_or_default(),
            eframe::NativeOptions::default(),
            Box::new(move |_cc| {
                Ok(Box::new(PlotApp {
                    traces,
                    legend,
                    x_label,
                    y_label,
                }))
            }),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Lets the observer be lent to a run and shown afterwards.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    legend: bool,
    x_label: Option<String>,
    y_label: Option<String>,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("heatloop_plot");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.x_label {
                plot = plot.x_axis_label(label.clone());
            }
            if let Some(label) = &self.y_label {
                plot = plot.y_axis_label(label.clone());
            }
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(name));
                }
            });
        });
    }
}
