use std::env;
use std::process::ExitCode;

use rp_app::client::GenerationClient;
use rp_app::progress::progress_channel;
use rp_app::relay::HttpRelay;
use rp_app::session::Session;
use rp_core::PaintColor;
use tracing::error;

const DEFAULT_RELAY_URL: &str = "http://localhost:3001/api/predictions";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let (Some(image_path), Some(color_arg)) = (args.next(), args.next()) else {
        eprintln!("usage: rp-app <image> <#RRGGBB> [relay-url]");
        return ExitCode::FAILURE;
    };
    let relay_url = args.next().unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());

    let color: PaintColor = match color_arg.parse() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("invalid color {color_arg:?}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let image = match std::fs::read(&image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("could not read {image_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new();
    session.upload_image(image);
    session.select_color(color);

    let ticket = match session.begin() {
        Ok(ticket) => ticket,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let client = GenerationClient::new(HttpRelay::new(relay_url));
    let (progress, mut progress_rx) = progress_channel();

    let printer = tokio::spawn(async move {
        while let Some(message) = progress_rx.recv().await {
            println!("{message}");
        }
    });

    let outcome = client.generate(&ticket.image, &ticket.color, &progress).await;
    drop(progress);
    let _ = printer.await;

    session.finish(ticket.epoch, outcome);
    match session.result_url() {
        Some(url) => {
            println!("{url}");
            ExitCode::SUCCESS
        }
        None => {
            let message = session.error().unwrap_or("generation did not finish");
            error!("{message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
