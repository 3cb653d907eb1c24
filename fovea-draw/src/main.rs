use field_core::{nalgebra::Point2, GroundPlaneCamera};
use fovea::Thresholding;
use image::ImageOutputFormat;
use log::*;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fovea-draw",
    about = "A tool to show the field colour segmentation of an image"
)]
struct Opt {
    /// Side of the averaging window in samples.
    #[structopt(short, long, default_value = "101")]
    window: usize,
    /// Bias of the threshold in percent of the window mean.
    ///
    /// Raising it makes more of the image white.
    #[structopt(short, long, default_value = "-40", allow_hyphen_values = true)]
    percent: i32,
    /// Raw pixels per sample along each axis.
    #[structopt(short, long, default_value = "2")]
    density: usize,
    /// Camera height above the ground in millimetres.
    ///
    /// If this is provided, line points are found and drawn as well.
    #[structopt(long)]
    camera_height: Option<f64>,
    /// Camera pitch below the horizon in radians.
    #[structopt(long, default_value = "0.5")]
    pitch: f64,
    /// Focal length in pixels.
    #[structopt(long, default_value = "300")]
    focal: f64,
    /// The output path to write to (autodetects image type from extension).
    ///
    /// If this is not provided, then the output goes to stdout as a PNG.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// The image file to segment.
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    let image = image::open(&opt.input).expect("failed to open image file");
    let ground = opt.camera_height.map(|height| {
        let centre = Point2::new(image.width() as f64 / 2.0, image.height() as f64 / 2.0);
        GroundPlaneCamera::new(opt.focal, centre, height, opt.pitch)
    });
    let thresholding = Thresholding::new(opt.window, opt.percent);
    info!("segmenting {}", opt.input.display());
    let image = fovea_draw::render_colours(&image, &thresholding, opt.density, ground.as_ref())
        .expect("failed to segment image");
    let stdout = std::io::stdout();
    if let Some(path) = opt.output {
        image.save(path).expect("failed to write image to file");
    } else {
        let mut buffer = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .expect("failed to write image to stdout");
        std::io::Write::write_all(&mut stdout.lock(), buffer.get_ref())
            .expect("failed to write image to stdout");
    }
}
