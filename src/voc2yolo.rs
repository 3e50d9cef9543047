use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use voc2yolo::{convert, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let class_map = match args.to_class_mapping() {
        Ok(class_map) => class_map,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let config = args.to_convert_config();

    info!("Starting Pascal VOC to YOLO conversion...");

    match convert(&config, &class_map) {
        Ok(_) => {
            info!("Conversion process completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
