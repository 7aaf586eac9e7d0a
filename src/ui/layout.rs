use {
    crate::{
        dashboard::{DashboardReport, VolatilityPoint},
        series::TvlSeries,
        ui::renderer::{format_date, format_pct, format_usd, format_usd_compact},
    },
    ratatui::{
        layout::{Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        symbols,
        text::{Line, Span},
        widgets::{
            Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
            Row, Table, Wrap,
        },
        Frame,
    },
    std::sync::Arc,
};

const SOLANA_PURPLE: Color = Color::Rgb(0x9d, 0x5c, 0xff);
const SOLANA_GREEN: Color = Color::Rgb(0x14, 0xf1, 0x95);
const SOLANA_PALETTE: [Color; 5] = [
    SOLANA_PURPLE,
    SOLANA_GREEN,
    Color::Rgb(0x00, 0xff, 0xa3),
    Color::Rgb(0xc7, 0x7d, 0xff),
    Color::Rgb(0x7f, 0x6c, 0xff),
];

/// Selected protocol detail shown in the trend/volatility charts
pub struct ProtocolDetail {
    pub name: String,
    pub series: Option<Arc<TvlSeries>>,
    pub volatility: Vec<VolatilityPoint>,
}

/// Render the main UI layout
pub fn render_layout(f: &mut Frame, area: Rect, report: &DashboardReport, detail: &ProtocolDetail) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                 // Header
            Constraint::Length(3),                                 // Overview metrics
            Constraint::Min(12),                                   // Charts
            Constraint::Length(report.scores.len() as u16 + 3),   // AQS table
            Constraint::Length(3),                                 // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_overview(f, chunks[1], report);

    let charts = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    render_tvl_bars(f, charts[0], report);

    let detail_area = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(charts[1]);
    render_trend(f, detail_area[0], detail);
    render_volatility(f, detail_area[1], detail);

    render_scores(f, chunks[3], report);
    render_footer(f, chunks[4]);
}

/// Terminal state for an empty snapshot
pub fn render_no_data(f: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from("Press 'q' or Esc to quit"),
    ];
    let block = Block::default().borders(Borders::ALL).title("Error");
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Block::default()
        .borders(Borders::ALL)
        .title("Solana DeFi Adoption & User Behavior Dashboard");

    let text = vec![Line::from(vec![
        Span::styled(
            "Adoption quality",
            Style::default().fg(SOLANA_PURPLE).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" = growth momentum + capital stability | ←/→ select protocol | r refresh | q quit"),
    ])];

    f.render_widget(Paragraph::new(text).block(header), area);
}

fn render_overview(f: &mut Frame, area: Rect, report: &DashboardReport) {
    let summary = &report.summary;
    let cells = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let metrics = [
        ("Protocols Analyzed", summary.protocols_analyzed.to_string()),
        ("Top TVL Protocol", summary.top_tvl_protocol.clone()),
        ("Average TVL ($)", format_usd(summary.average_tvl)),
    ];

    for (cell, (label, value)) in cells.iter().zip(metrics) {
        let text = Line::from(Span::styled(
            value,
            Style::default().fg(SOLANA_GREEN).add_modifier(Modifier::BOLD),
        ));
        let block = Block::default().borders(Borders::ALL).title(label);
        f.render_widget(Paragraph::new(text).block(block), *cell);
    }
}

fn render_tvl_bars(f: &mut Frame, area: Rect, report: &DashboardReport) {
    let ranked = report.snapshot.ranked_by_tvl();
    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Bar::default()
                // bar heights in whole millions
                .value((row.tvl / 1e6).max(0.0).round() as u64)
                .text_value(format_usd_compact(row.tvl))
                .label(Line::from(row.name.clone()))
                .style(Style::default().fg(SOLANA_PALETTE[i % SOLANA_PALETTE.len()]))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Total Value Locked (TVL) Across Solana DeFi"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2);

    f.render_widget(chart, area);
}

fn render_trend(f: &mut Frame, area: Rect, detail: &ProtocolDetail) {
    let title = format!("{} - TVL Trend", detail.name);
    let Some(series) = detail.series.as_ref() else {
        let block = Block::default().borders(Borders::ALL).title(title);
        let warning = Paragraph::new("TVL history not available for this protocol.")
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(warning, area);
        return;
    };

    let points: Vec<(f64, f64)> = series
        .points()
        .iter()
        .map(|p| (p.date.timestamp() as f64, p.total_liquidity_usd))
        .collect();
    let x_bounds = [
        series.first().date.timestamp() as f64,
        series.latest().date.timestamp() as f64,
    ];
    let y_bounds = padded_bounds(points.iter().map(|(_, y)| *y));

    let dataset = Dataset::default()
        .name("TVL (USD)")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(SOLANA_GREEN))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .bounds(x_bounds)
                .labels(vec![
                    Span::raw(format_date(series.first().date)),
                    Span::raw(format_date(series.latest().date)),
                ]),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![
                    Span::raw(format_usd_compact(y_bounds[0])),
                    Span::raw(format_usd_compact(y_bounds[1])),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_volatility(f: &mut Frame, area: Rect, detail: &ProtocolDetail) {
    let title = format!("{} - TVL Volatility (7-Day)", detail.name);
    let points: Vec<(f64, f64)> = detail
        .volatility
        .iter()
        .filter_map(|p| p.volatility.map(|v| (p.date.timestamp() as f64, v)))
        .collect();

    if points.is_empty() {
        let block = Block::default().borders(Borders::ALL).title(title);
        f.render_widget(Paragraph::new("Not enough history for a 7-day window.").block(block), area);
        return;
    }

    let x_bounds = [points[0].0, points[points.len() - 1].0];
    let y_bounds = padded_bounds(points.iter().map(|(_, y)| *y));

    let dataset = Dataset::default()
        .name("Volatility")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(SOLANA_PURPLE))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(Axis::default().bounds(x_bounds))
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![
                    Span::raw(format!("{:.4}", y_bounds[0])),
                    Span::raw(format!("{:.4}", y_bounds[1])),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_scores(f: &mut Frame, area: Rect, report: &DashboardReport) {
    let header = Row::new(vec!["Rank", "Protocol", "Growth", "Volatility", "AQS"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = report
        .scores
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Row::new(vec![
                (i + 1).to_string(),
                s.protocol.clone(),
                format_pct(s.growth_rate),
                format!("{:.4}", s.volatility),
                format!("{:.3}", s.adoption_quality_score),
            ])
            .style(Style::default().fg(SOLANA_PALETTE[i % SOLANA_PALETTE.len()]))
        })
        .collect();

    let widths = [
        Constraint::Length(6),  // Rank
        Constraint::Length(12), // Protocol
        Constraint::Length(12), // Growth
        Constraint::Length(12), // Volatility
        Constraint::Length(8),  // AQS
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Adoption Quality Score (AQS)"));

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("High AQS", Style::default().fg(SOLANA_GREEN)),
        Span::raw(" sticky capital | "),
        Span::styled("High growth + high volatility", Style::default().fg(Color::Yellow)),
        Span::raw(" speculative inflows | "),
        Span::styled("Low volatility + steady growth", Style::default().fg(SOLANA_PURPLE)),
        Span::raw(" mature usage | Data: DefiLlama"),
    ])];

    let footer = Block::default().borders(Borders::ALL).title("How to Interpret");
    f.render_widget(Paragraph::new(text).block(footer), area);
}

/// Axis bounds with a little headroom; flat data gets a unit band
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if max == min {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.05 };
        return [min - pad, max + pad];
    }

    let pad = (max - min) * 0.05;
    [min - pad, max + pad]
}
