#[path = "dualbot/app.rs"]
mod app;
#[path = "dualbot/args.rs"]
mod args;
#[path = "dualbot/config/mod.rs"]
mod config;
#[path = "dualbot/logging.rs"]
mod logging;
#[path = "dualbot/paper.rs"]
mod paper;
#[path = "dualbot/render.rs"]
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
