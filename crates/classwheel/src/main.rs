use classwheel::config;
use classwheel::gui::app::AppModel;
use classwheel::gui::state::WheelState;
use classwheel::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }
    let config = config::load_or_default();
    let state = match WheelState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid spin settings: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.classtool.classwheel");

    app.run::<AppModel>((state, config.monitor, rx));
}
