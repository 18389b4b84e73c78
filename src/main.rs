use std::sync::Arc;

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use iwtui::app::{App, FocusedBlock};
use iwtui::cli;
use iwtui::config::Config;
use iwtui::event::{Event, EventHandler};
use iwtui::handler::handle_key_events;
use iwtui::iwd::Mode;
use iwtui::notification::{Notification, NotificationLevel};
use iwtui::tui::Tui;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = cli::cli().get_matches();
    let mode = args
        .get_one::<String>("mode")
        .map(|m| Mode::try_from(m.as_str()))
        .transpose()?;

    let config = Arc::new(Config::new());

    let events = EventHandler::new(config.tick_rate_ms);
    let sender = events.sender.clone();

    let mut app = App::new(sender.clone(), config.clone(), mode).await?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let terminal = Terminal::new(backend)?;
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    while app.running {
        tui.draw(&mut app)?;

        match tui.events.next().await? {
            Event::Tick => {
                if let Err(e) = app.tick().await {
                    log::error!("Refresh failed: {e:#}");
                }
            }
            Event::Key(key_event) => {
                handle_key_events(key_event, &mut app, sender.clone(), config.clone()).await?;
            }
            Event::Notification(notification) => {
                app.notifications.push(notification);
            }
            Event::Auth(network_name) => {
                app.auth.psk.open(network_name);
                app.focused_block = FocusedBlock::PskAuthKey;
            }
            Event::AuthCancel => {
                if app.focused_block == FocusedBlock::PskAuthKey {
                    app.auth.psk.reset();
                    app.focused_block = FocusedBlock::NewNetworks;
                }
            }
            Event::Reset(mode) => {
                if let Err(e) = app.set_mode(mode).await {
                    Notification::send(e.to_string(), NotificationLevel::Error, &sender)?;
                }
            }
            Event::Resize(_, _) => {}
        }
    }

    tui.exit()?;
    Ok(())
}
