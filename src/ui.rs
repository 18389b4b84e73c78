use ratatui::Frame;

use crate::app::{App, FocusedBlock};
use crate::iwd::Mode;

pub fn render(app: &mut App, frame: &mut Frame) {
    if app.device.is_powered {
        match app.device.mode {
            // The mode models borrow the device for its header row, so
            // they are taken out for the duration of the draw.
            Mode::Station => {
                if let Some(mut station) = app.device.station.take() {
                    station.render(frame, app.focused_block, &app.device, app.config.clone());
                    app.device.station = Some(station);
                }
            }
            Mode::Ap => {
                if let Some(mut ap) = app.device.ap.take() {
                    ap.render(frame, app.focused_block, &app.device, app.config.clone());
                    app.device.ap = Some(ap);
                }
            }
        }
    } else {
        app.device.render(frame, app.focused_block, app.config.clone());
    }

    match app.focused_block {
        FocusedBlock::AdapterInfos => {
            app.adapter
                .render(frame, app.device.name.clone(), app.device.address.clone());
        }
        FocusedBlock::HiddenSsidInput => {
            app.auth.hidden.render(frame);
        }
        FocusedBlock::PskAuthKey => {
            app.auth.psk.render(frame);
        }
        _ => {}
    }

    app.reset.render(frame);

    for (index, notification) in app.notifications.iter().enumerate() {
        notification.render(index, frame);
    }
}
