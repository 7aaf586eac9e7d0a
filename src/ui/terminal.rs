use {
    crate::{
        dashboard::{AdoptionDashboard, DashboardReport},
        ui::layout::{self, ProtocolDetail},
    },
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{io::Stdout, time::Duration},
};

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI event loop
///
/// Handles protocol selection, manual refresh and quit keys. The terminal is
/// restored even when the loop fails.
pub async fn run_ui(dashboard: &AdoptionDashboard) -> Result<(), Box<dyn std::error::Error>> {
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, dashboard).await;

    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    result
}

async fn event_loop(
    terminal: &mut DashboardTerminal,
    dashboard: &AdoptionDashboard,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut report = dashboard.report().await;
    let mut selected = 0usize;
    let mut detail = load_detail(dashboard, report.as_ref().ok(), selected).await;

    loop {
        terminal.draw(|f| {
            let area = f.size();
            match (&report, &detail) {
                (Ok(report), Some(detail)) => layout::render_layout(f, area, report, detail),
                (Err(e), _) => layout::render_no_data(f, area, &e.to_string()),
                (Ok(_), None) => layout::render_no_data(f, area, "No protocol selected"),
            }
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let protocol_count = report.as_ref().map(|r| r.snapshot.len()).unwrap_or(0);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Right | KeyCode::Tab if protocol_count > 0 => {
                selected = (selected + 1) % protocol_count;
            }
            KeyCode::Left | KeyCode::BackTab if protocol_count > 0 => {
                selected = (selected + protocol_count - 1) % protocol_count;
            }
            KeyCode::Char('r') => {
                log::info!("🔄 Refreshing TVL data");
                dashboard.cache().clear().await;
                report = dashboard.report().await;
                let count = report.as_ref().map(|r| r.snapshot.len()).unwrap_or(0);
                if selected >= count {
                    selected = 0;
                }
            }
            _ => continue,
        }

        detail = load_detail(dashboard, report.as_ref().ok(), selected).await;
    }

    Ok(())
}

async fn load_detail(
    dashboard: &AdoptionDashboard,
    report: Option<&DashboardReport>,
    selected: usize,
) -> Option<ProtocolDetail> {
    let row = report?.snapshot.rows().get(selected)?;
    let series = dashboard.series(&row.slug).await.series().cloned();
    let volatility = dashboard
        .rolling_volatility(&row.slug)
        .await
        .unwrap_or_default();

    Some(ProtocolDetail {
        name: row.name.clone(),
        series,
        volatility,
    })
}
