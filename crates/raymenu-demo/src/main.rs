use clap::Parser;
use raymenu::{RayMenu, config};
use relm4::prelude::*;
use std::path::PathBuf;

mod events;
mod gui;
mod sys;

use gui::app::{AppInit, AppModel};

#[derive(Parser, Debug)]
#[command(name = "raymenu-demo", version, about, long_about = None)]
struct Cli {
    /// Number of menu items besides the toggle
    #[arg(short = 'n', long, default_value_t = 6)]
    items: usize,

    /// Pixels per density-independent unit (overrides the config file)
    #[arg(short, long)]
    density: Option<f64>,

    /// Config file to load and watch
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.write_config {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut menu_config = config::load_or_default(&config_path);
    if let Some(density) = cli.density {
        menu_config.layout.density = density;
    }

    let menu = RayMenu::from_children(gui::demo_children(cli.items), menu_config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    sys::runtime::start_background_services(tx, config_path.clone());

    let app = RelmApp::new("org.raymenu.demo");

    app.run::<AppModel>(AppInit {
        menu,
        config_path,
        density_override: cli.density,
        rx,
    });

    Ok(())
}
