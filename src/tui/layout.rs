//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // header
            Constraint::Percentage(50), // irradiance chart
            Constraint::Min(8),         // power chart
            Constraint::Length(3),      // status panel
            Constraint::Length(1),      // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let irradiance: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|s| (s.time_hours(), s.irradiance_wm2))
        .collect();
    let power: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|s| (s.time_hours(), s.power_w))
        .collect();

    render_series(
        frame,
        app,
        chunks[1],
        " Solar Irradiance Over Time ",
        "Irradiance (W/m2)",
        "W/m2",
        style::IRRADIANCE_COLOR,
        &irradiance,
    );
    render_series(
        frame,
        app,
        chunks[2],
        " Solar Panel Power Output Over Time ",
        "Power Output (W)",
        "W",
        style::POWER_COLOR,
        &power,
    );
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: scenario name, step progress, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let header = Line::from(vec![
        Span::styled(
            " SOLAR-TWIN ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.scenario_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ step {}/{} │ {}ms │ {} {} ",
            app.step,
            app.total_steps,
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// One time-series chart against simulated hours.
#[expect(clippy::too_many_arguments)]
fn render_series(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    legend: &str,
    unit: &str,
    color: Color,
    data: &[(f64, f64)],
) {
    let x_lo = app.start_hours();
    let x_hi = app.end_hours().max(x_lo + 1.0);
    let y_bounds = style::auto_bounds_y(data);

    let datasets = vec![
        Dataset::default()
            .name(legend.to_string())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Time (hours)")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{x_lo:.0}"), format!("{x_hi:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title(unit.to_string())
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Status panel showing the latest sample.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(s) = app.last_sample() {
        Line::from(format!(
            "  t={:>6.2} h   irradiance={:>8.2} W/m2   power={:>8.2} W",
            s.time_hours(),
            s.irradiance_wm2,
            s.power_w,
        ))
    } else if app.total_steps == 0 {
        Line::from("  Invalid simulation clock; nothing to replay.")
    } else {
        Line::from("  Waiting for first step...")
    };

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  1/2/3/4:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
