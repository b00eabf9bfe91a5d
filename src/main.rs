use yosegaki_service::api;
use yosegaki_service::common::init;
use yosegaki_service::settings::AppSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        _ => panic!("Unknown app component"),
    }
}
