//! Postbox - A console mailbox client
//!
//! This is the main entry point for the Postbox console application.

use anyhow::Result;
use log::{debug, error, info};
use mail::ServiceConfig;
use std::io::{self, BufRead, Write};

mod app;
mod command;
mod navigator;
mod render;

use app::PostboxApp;
use command::Command;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    match config::init() {
        Ok(dir) => debug!("Config directory: {}", dir.root().display()),
        Err(e) => error!("Failed to initialize config directory: {}", e),
    }

    let service = ServiceConfig::load()?;
    info!("Using mail service at {}", service.base_url);

    let mut app = PostboxApp::connect(&service);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", render::HELP);
    loop {
        print!("{}> ", app.prompt());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                for output in app.handle(command) {
                    println!("{}", output);
                }
            }
            Err(message) => println!("{}", message),
        }
    }

    app.shutdown();
    Ok(())
}
