use rgbd_superpixels::config::load_config;
use rgbd_superpixels::image::io::{
    load_depth_image, load_rgb_image, save_label_image, write_json_file,
};
use rgbd_superpixels::{Result, Segmenter};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    let Some(config_path) = env::args().nth(1) else {
        eprintln!("Usage: segment_rgbd <config.json>");
        std::process::exit(2);
    };
    if let Err(err) = run(Path::new(&config_path)) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let rgb = load_rgb_image(&config.input.rgb)?;
    let depth = load_depth_image(&config.input.depth)?;

    let segmenter = Segmenter::new(config.params)?;
    let report = segmenter.process_with_diagnostics(&rgb.as_view(), &depth.as_view())?;

    if let Some(path) = &config.output.regions_png {
        save_label_image(&report.regions, path)?;
    }
    if let Some(path) = &config.output.superpixels_png {
        save_label_image(&report.superpixels.labels, path)?;
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
    }

    println!(
        "superpixels={} regions={} total_ms={:.3}",
        report.superpixels.len(),
        report.region_count,
        report.trace.timings.total_ms
    );
    Ok(())
}
