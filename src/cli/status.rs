use cobble::config::Config;
use cobble::core::path::{config_file, state_file};
use cobble::core::CobbleResult;
use cobble::deploy::locate_tool;
use cobble::package::WorkDir;
use cobble::state::LocalState;

pub fn run() -> CobbleResult<()> {
    let config = Config::load()?;
    let state = LocalState::load_from(&state_file()?)?;
    let work_dir = WorkDir::new(config.get_work_dir()?);

    println!("Local release: {}", state.tag());
    println!("Config:        {}", config_file()?.display());
    println!("Working dir:   {}", work_dir.path().display());

    match work_dir.locate_package() {
        Ok(package) => println!("Package:       {}", package.display()),
        Err(_) => println!("Package:       (none downloaded)"),
    }

    match locate_tool(&config) {
        Ok(tool) => println!("Deploy tool:   {}", tool.display()),
        Err(e) => println!("Deploy tool:   not found ({})", e),
    }

    Ok(())
}
