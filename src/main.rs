use std::error::Error;
use std::f64::consts::PI;

use midquad::configuration::Configuration;

fn main() {
    env_logger::init();

    match run(std::env::args().nth(1)) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    }
}

/// 讀取（可選的）設定檔，積分 sin(x) 於 [0, π]，回傳 JSON 格式的結果。
fn run(config_path: Option<String>) -> Result<String, Box<dyn Error>> {
    let config = match config_path {
        Some(config_path) => Configuration::from_reader(&config_path)
            .map_err(|error| format!("failed to load {}: {}", config_path, error))?,
        None => Configuration::new(),
    };
    let integrator = config.integrator()?;
    let outcome = integrator.integrate(&f64::sin, 0.0, PI, config.tolerance())?;
    Ok(serde_json::to_string_pretty(&outcome)?)
}
