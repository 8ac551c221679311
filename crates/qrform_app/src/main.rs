mod platform;

fn main() -> std::io::Result<()> {
    let config = platform::config::AppConfig::from_env();
    platform::logging::initialize(&config.log);
    platform::app::run_app(config)
}
