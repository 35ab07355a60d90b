use rgbd_superpixels::image::{ImageDepthU16, ImageRgb8};
use rgbd_superpixels::{Segmenter, SegmenterParams};

fn main() {
    env_logger::init();
    // Demo stub: a synthetic frontal wall with a box in front of it
    let (w, h) = (320usize, 240usize);
    let mut color = vec![[180u8, 180, 170]; w * h];
    let mut depth = vec![2000u16; w * h];
    for y in 80..180 {
        for x in 100..220 {
            color[y * w + x] = [200, 40, 40];
            depth[y * w + x] = 1200;
        }
    }
    let rgb = ImageRgb8 {
        w,
        h,
        stride: w,
        data: &color,
    };
    let depth = ImageDepthU16 {
        w,
        h,
        stride: w,
        data: &depth,
    };

    let params = SegmenterParams {
        num_superpixels: 300,
        ..Default::default()
    };
    let segmenter = match Segmenter::new(params) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match segmenter.process_with_diagnostics(&rgb, &depth) {
        Ok(report) => println!(
            "superpixels={} regions={} latency_ms={:.3}",
            report.superpixels.len(),
            report.region_count,
            report.trace.timings.total_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
