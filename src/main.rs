use tidemark::{
    cli::{Cli, Context},
    config::Settings,
    utils,
};

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Failed to load configuration");
    let cli = Cli::parse_args();

    utils::logger::init_logging(&settings.logs);

    cli.execute(&Context {
        settings: &settings,
    })
    .await;
}
