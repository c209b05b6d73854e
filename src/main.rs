use splash::config::Config;
use splash::init::App;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let config = Config::from_env()?;
    App::init(config)?.run()
}
